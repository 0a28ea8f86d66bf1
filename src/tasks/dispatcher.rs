use std::sync::Arc;

use serde_json::{Map, Value};

use crate::context::{RequestContext, RequestContextExt};
use crate::error::Result;

use super::client::TaskSubmitter;
use super::dto::{Job, TaskEnvelope, TaskHandle};

/// Turns plugin info mutations into task submissions. Never waits for the
/// task itself to finish.
pub struct MutationDispatcher {
    tasks: Arc<dyn TaskSubmitter>,
    application: String,
}

impl MutationDispatcher {
    pub fn new(tasks: Arc<dyn TaskSubmitter>, application: impl Into<String>) -> Self {
        Self {
            tasks,
            application: application.into(),
        }
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub async fn upsert_plugin_info(
        &self,
        plugin_info: Map<String, Value>,
        context: &RequestContext,
    ) -> Result<TaskHandle> {
        let description = format!(
            "Upsert plugin info with Id: {}",
            describe_id(plugin_info.get("id"))
        );
        let job = Job::UpsertPluginInfo {
            plugin_info,
            user: context.acting_user(),
        };

        self.initiate_task(description, vec![job], context).await
    }

    pub async fn delete_plugin_info(
        &self,
        id: &str,
        context: &RequestContext,
    ) -> Result<TaskHandle> {
        let job = Job::DeletePluginInfo {
            plugin_info_id: id.to_string(),
            user: context.acting_user(),
        };

        self.initiate_task(format!("Delete Plugin info with Id: {}", id), vec![job], context)
            .await
    }

    async fn initiate_task(
        &self,
        description: String,
        job: Vec<Job>,
        context: &RequestContext,
    ) -> Result<TaskHandle> {
        let envelope = TaskEnvelope {
            description,
            application: self.application.clone(),
            job,
        };

        tracing::info!(
            description = %envelope.description,
            caller = %context.label(),
            "Submitting plugin info task"
        );
        self.tasks.create(&envelope, context).await.map_err(|err| {
            tracing::warn!(description = %envelope.description, error = %err, "Task submission failed");
            err
        })
    }
}

/// Missing ids render as `null` rather than failing the request.
fn describe_id(id: Option<&Value>) -> String {
    match id {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
    }
}
