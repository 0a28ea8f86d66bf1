use std::sync::Arc;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::installed::InstalledPluginsAggregator;
use crate::plugins::PluginManager;
use crate::services::{build_http_client, ServiceRegistry};
use crate::tasks::{HttpTaskClient, MutationDispatcher, TaskSubmitter};

pub struct GatewayServer {
    config: GatewayConfig,
    registry: Arc<ServiceRegistry>,
    plugin_manager: Arc<PluginManager>,
    aggregator: InstalledPluginsAggregator,
    dispatcher: MutationDispatcher,
}

impl GatewayServer {
    /// Wires every collaborator from configuration.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(ServiceRegistry::from_config(&config)?);
        let plugin_manager = Arc::new(PluginManager::from_plugins(
            config.extensions.plugins.iter().cloned(),
        )?);

        let tasks_url = config
            .tasks
            .base_url
            .clone()
            .ok_or_else(|| GatewayError::config_error("Missing tasks base_url"))?;
        let http = build_http_client(Duration::from_millis(config.tasks.timeout_ms));
        let tasks: Arc<dyn TaskSubmitter> = Arc::new(HttpTaskClient::new(http, tasks_url));

        Ok(Self::from_parts(config, registry, plugin_manager, tasks))
    }

    pub fn from_parts(
        config: GatewayConfig,
        registry: Arc<ServiceRegistry>,
        plugin_manager: Arc<PluginManager>,
        tasks: Arc<dyn TaskSubmitter>,
    ) -> Self {
        let aggregator = InstalledPluginsAggregator::new(
            Arc::clone(&registry),
            Arc::clone(&plugin_manager),
            Duration::from_millis(config.server.request_timeout_ms),
        );
        let dispatcher = MutationDispatcher::new(tasks, config.extensions.application_name.clone());

        Self {
            config,
            registry,
            plugin_manager,
            aggregator,
            dispatcher,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn plugin_manager(&self) -> &PluginManager {
        &self.plugin_manager
    }

    pub fn aggregator(&self) -> &InstalledPluginsAggregator {
        &self.aggregator
    }

    pub fn dispatcher(&self) -> &MutationDispatcher {
        &self.dispatcher
    }
}
