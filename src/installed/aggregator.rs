use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;

use crate::context::RequestContext;
use crate::error::{GatewayError, Result};
use crate::plugins::PluginManager;
use crate::services::{KnownService, PluginDescriptor, ServiceRegistry, ServiceSource};

/// Service name to the plugins that service reports, ordered by name.
pub type InstalledPlugins = BTreeMap<String, Vec<PluginDescriptor>>;

pub struct InstalledPluginsAggregator {
    registry: Arc<ServiceRegistry>,
    local_plugins: Arc<PluginManager>,
    deadline: Duration,
}

impl InstalledPluginsAggregator {
    pub fn new(
        registry: Arc<ServiceRegistry>,
        local_plugins: Arc<PluginManager>,
        deadline: Duration,
    ) -> Self {
        Self {
            registry,
            local_plugins,
            deadline,
        }
    }

    /// Lists installed plugins for `selector`, or for every known service when
    /// the selector is unset or names no known service.
    ///
    /// A selected optional service that is not deployed yields an empty map.
    /// In a full sweep the same service is still present, with no plugins.
    /// Any backend failure other than a missing endpoint fails the whole call.
    pub async fn list_installed_plugins(
        &self,
        selector: Option<&str>,
        context: &RequestContext,
    ) -> Result<InstalledPlugins> {
        match selector.and_then(|name| self.registry.get(name)) {
            Some(service) => self.list_for_service(service, context).await,
            None => {
                if let Some(name) = selector {
                    tracing::debug!(service = name, "Unknown service selector, querying all");
                }
                self.list_for_all(context).await
            }
        }
    }

    async fn list_for_service(
        &self,
        service: &KnownService,
        context: &RequestContext,
    ) -> Result<InstalledPlugins> {
        let mut installed = InstalledPlugins::new();
        if !service.is_available() {
            tracing::debug!(service = service.name(), "Selected service is not deployed");
            return Ok(installed);
        }

        let plugins = self.with_deadline(self.fetch(service, context)).await?;
        installed.insert(service.name().to_string(), plugins);
        Ok(installed)
    }

    /// Queries every service concurrently. The first failure to complete
    /// wins; the other in-flight calls are dropped.
    async fn list_for_all(&self, context: &RequestContext) -> Result<InstalledPlugins> {
        let calls = self.registry.iter().map(|service| async move {
            let plugins = self.fetch(service, context).await?;
            Ok::<_, GatewayError>((service.name().to_string(), plugins))
        });

        let entries = self.with_deadline(try_join_all(calls)).await?;
        tracing::debug!(services = entries.len(), "Collected installed plugins");
        Ok(entries.into_iter().collect())
    }

    async fn fetch(
        &self,
        service: &KnownService,
        context: &RequestContext,
    ) -> Result<Vec<PluginDescriptor>> {
        match service.source() {
            ServiceSource::Local => self.local_plugins.descriptors(),
            ServiceSource::Unwired => Ok(Vec::new()),
            ServiceSource::Remote(client) => {
                classify(service.name(), client.installed_plugins(context).await)
            }
        }
    }

    async fn with_deadline<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.deadline, call).await {
            Ok(result) => result,
            Err(_) => {
                let elapsed_ms = millis(self.deadline);
                tracing::warn!(elapsed_ms, "Timed out waiting for installed plugins");
                Err(GatewayError::Timeout { elapsed_ms })
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn classify(
    service: &str,
    result: Result<Vec<PluginDescriptor>>,
) -> Result<Vec<PluginDescriptor>> {
    match result {
        Ok(plugins) => Ok(plugins),
        Err(err) if err.is_capability_absent() => {
            tracing::debug!(service, "Service has no installed plugins endpoint");
            Ok(Vec::new())
        }
        Err(err) => {
            tracing::warn!(service, error = %err, "Failed to fetch installed plugins");
            Err(err)
        }
    }
}
