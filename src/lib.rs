pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod installed;
pub mod plugins;
pub mod server;
pub mod services;
pub mod tasks;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use installed::{InstalledPlugins, InstalledPluginsAggregator};
pub use server::GatewayServer;
pub use tasks::MutationDispatcher;
