pub mod aggregator;

pub use aggregator::{InstalledPlugins, InstalledPluginsAggregator};
