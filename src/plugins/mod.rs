pub mod dto;
pub mod handler;
mod helpers;
pub mod manager;

pub use dto::{ErrorResponse, InstalledPluginsQuery, LocalPlugin, PluginState};
pub(crate) use handler::{delete_plugin_info, get_installed_plugins, health, upsert_plugin_info};
pub use manager::PluginManager;
