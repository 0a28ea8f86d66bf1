#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use plugin_gateway::context::RequestContext;
use plugin_gateway::plugins::{LocalPlugin, PluginManager, PluginState};
use plugin_gateway::services::{InstalledPluginsClient, KnownService, PluginDescriptor, ServiceRegistry};
use plugin_gateway::tasks::{TaskEnvelope, TaskHandle, TaskSubmitter};
use plugin_gateway::{GatewayConfig, GatewayError, GatewayServer, Result};
use reqwest::StatusCode;
use serde_json::json;

pub enum Reply {
    Plugins(Vec<&'static str>),
    Status(StatusCode),
    Slow(Duration),
}

/// Fake backend that answers with a fixed reply and counts calls.
pub struct FakeBackend {
    name: &'static str,
    reply: Reply,
    calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new(name: &'static str, reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InstalledPluginsClient for FakeBackend {
    async fn installed_plugins(&self, _context: &RequestContext) -> Result<Vec<PluginDescriptor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Plugins(ids) => Ok(ids.iter().map(|id| descriptor(id)).collect()),
            Reply::Status(status) => Err(GatewayError::backend_status(self.name, *status, "")),
            Reply::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(vec![descriptor("slow.plugin")])
            }
        }
    }
}

/// Records submitted envelopes and answers with a task reference.
#[derive(Default)]
pub struct RecordingTasks {
    pub submitted: Mutex<Vec<(TaskEnvelope, RequestContext)>>,
    pub reject: bool,
}

impl RecordingTasks {
    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            submitted: Mutex::new(Vec::new()),
            reject: true,
        })
    }

    pub fn envelopes(&self) -> Vec<TaskEnvelope> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(envelope, _)| envelope.clone())
            .collect()
    }
}

#[async_trait]
impl TaskSubmitter for RecordingTasks {
    async fn create(&self, envelope: &TaskEnvelope, context: &RequestContext) -> Result<TaskHandle> {
        if self.reject {
            return Err(GatewayError::TaskSubmission {
                status: StatusCode::BAD_REQUEST,
                body: "rejected".to_string(),
            });
        }
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push((envelope.clone(), context.clone()));
        Ok(TaskHandle(json!({ "ref": format!("/tasks/{}", submitted.len()) })))
    }
}

pub fn descriptor(id: &str) -> PluginDescriptor {
    PluginDescriptor(json!({ "pluginId": id, "version": "1.0.0" }))
}

pub fn local_plugin(id: &str) -> LocalPlugin {
    LocalPlugin {
        id: id.to_string(),
        version: "1.0.0".to_string(),
        description: None,
        requires: Some("gate>=1.0.0".to_string()),
        provider: Some("netflix".to_string()),
        state: PluginState::Started,
    }
}

pub fn remote(name: &'static str, optional: bool, reply: Reply) -> (KnownService, Arc<FakeBackend>) {
    let backend = FakeBackend::new(name, reply);
    (KnownService::remote(name, optional, backend.clone()), backend)
}

/// Full registry with every backend healthy and the optional ones unwired.
pub fn default_registry() -> Vec<KnownService> {
    vec![
        remote("clouddriver", false, Reply::Plugins(vec!["cd.plugin"])).0,
        KnownService::unwired("echo"),
        remote("fiat", false, Reply::Plugins(vec![])).0,
        remote("front50", false, Reply::Plugins(vec!["f50.plugin"])).0,
        KnownService::local("gate"),
        KnownService::unwired("igor"),
        KnownService::unwired("keel"),
        remote("orca", false, Reply::Plugins(vec!["orca.plugin"])).0,
        KnownService::unwired("rosco"),
        KnownService::unwired("swabbie"),
    ]
}

pub fn test_server(services: Vec<KnownService>, tasks: Arc<RecordingTasks>) -> GatewayServer {
    test_server_with(GatewayConfig::default(), services, tasks)
}

pub fn test_server_with(
    config: GatewayConfig,
    services: Vec<KnownService>,
    tasks: Arc<RecordingTasks>,
) -> GatewayServer {
    let registry = Arc::new(ServiceRegistry::new(services).unwrap());
    let plugin_manager = Arc::new(
        PluginManager::from_plugins([local_plugin("com.netflix.gate.enabled.plugin")]).unwrap(),
    );
    GatewayServer::from_parts(config, registry, plugin_manager, tasks)
}

pub fn context(user: Option<&str>) -> RequestContext {
    RequestContext::new(user.map(str::to_string), "test-request")
}
