use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{GatewayError, Result};
use crate::services::PluginDescriptor;

use super::dto::LocalPlugin;

/// Plugins loaded into this gateway. Answers the `gate` selector without a
/// network call.
#[derive(Default)]
pub struct PluginManager {
    plugins: RwLock<BTreeMap<String, LocalPlugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_plugins(plugins: impl IntoIterator<Item = LocalPlugin>) -> Result<Self> {
        let manager = Self::new();
        for plugin in plugins {
            manager.register_plugin(plugin)?;
        }
        Ok(manager)
    }

    /// Registers `plugin`, replacing any plugin with the same id.
    pub fn register_plugin(&self, plugin: LocalPlugin) -> Result<LocalPlugin> {
        if plugin.id.trim().is_empty() {
            return Err(GatewayError::validation_error("Plugin id cannot be empty"));
        }
        if plugin.version.trim().is_empty() {
            return Err(GatewayError::validation_error(format!(
                "Plugin {} has an empty version",
                plugin.id
            )));
        }

        let mut guard = self
            .plugins
            .write()
            .map_err(|_| GatewayError::internal("Plugin registry lock poisoned"))?;
        if guard.insert(plugin.id.clone(), plugin.clone()).is_some() {
            tracing::warn!(plugin_id = %plugin.id, "Replaced previously registered plugin");
        }

        Ok(plugin)
    }

    pub fn list_plugins(&self) -> Result<Vec<LocalPlugin>> {
        let guard = self
            .plugins
            .read()
            .map_err(|_| GatewayError::internal("Plugin registry lock poisoned"))?;
        Ok(guard.values().cloned().collect())
    }

    pub fn descriptors(&self) -> Result<Vec<PluginDescriptor>> {
        Ok(self
            .list_plugins()?
            .iter()
            .map(LocalPlugin::descriptor)
            .collect())
    }
}
