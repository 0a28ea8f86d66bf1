pub mod client;
pub mod dto;
mod helpers;
pub mod registry;

pub use client::{HttpServiceClient, InstalledPluginsClient};
pub use dto::{
    PluginDescriptor, ServiceSpec, CLOUDDRIVER, ECHO, FIAT, FRONT50, GATE, IGOR, KEEL,
    KNOWN_SERVICES, ORCA, ROSCO, SWABBIE,
};
pub(crate) use helpers::{build_http_client, build_url};
pub use registry::{KnownService, ServiceRegistry, ServiceSource};
