use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One unit of work for the task service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Job {
    #[serde(rename = "upsertPluginInfo", rename_all = "camelCase")]
    UpsertPluginInfo {
        plugin_info: Map<String, Value>,
        user: String,
    },
    #[serde(rename = "deletePluginInfo", rename_all = "camelCase")]
    DeletePluginInfo { plugin_info_id: String, user: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub description: String,
    pub application: String,
    pub job: Vec<Job>,
}

/// Whatever the task service answered with, typically a reference to poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHandle(pub Value);
