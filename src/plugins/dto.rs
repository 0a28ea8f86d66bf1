use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::services::PluginDescriptor;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PluginState {
    Created,
    Disabled,
    Resolved,
    #[default]
    Started,
    Stopped,
    Failed,
}

/// A plugin loaded into the gateway process itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalPlugin {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Version requirement expression, e.g. `gate>=1.0.0`.
    #[serde(default)]
    pub requires: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub state: PluginState,
}

impl LocalPlugin {
    pub fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor(json!({
            "pluginId": self.id,
            "version": self.version,
            "pluginDescription": self.description,
            "requires": self.requires,
            "provider": self.provider,
            "state": self.state,
        }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InstalledPluginsQuery {
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
