use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One installed plugin as reported by a service. Relayed without looking
/// at its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginDescriptor(pub Value);

impl From<Value> for PluginDescriptor {
    fn from(value: Value) -> Self {
        PluginDescriptor(value)
    }
}

/// Static facts about a known service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSpec {
    pub name: &'static str,
    /// May be left out of a deployment.
    pub optional: bool,
    /// Answered from the gateway's own plugin manager, never over the network.
    pub local: bool,
}

impl ServiceSpec {
    const fn remote(name: &'static str, optional: bool) -> Self {
        Self {
            name,
            optional,
            local: false,
        }
    }

    pub const fn is_remote(&self) -> bool {
        !self.local
    }
}

pub const CLOUDDRIVER: &str = "clouddriver";
pub const ECHO: &str = "echo";
pub const FIAT: &str = "fiat";
pub const FRONT50: &str = "front50";
pub const GATE: &str = "gate";
pub const IGOR: &str = "igor";
pub const KEEL: &str = "keel";
pub const ORCA: &str = "orca";
pub const ROSCO: &str = "rosco";
pub const SWABBIE: &str = "swabbie";

pub const KNOWN_SERVICES: &[ServiceSpec] = &[
    ServiceSpec::remote(CLOUDDRIVER, false),
    ServiceSpec::remote(ECHO, true),
    ServiceSpec::remote(FIAT, false),
    ServiceSpec::remote(FRONT50, false),
    ServiceSpec {
        name: GATE,
        optional: false,
        local: true,
    },
    ServiceSpec::remote(IGOR, true),
    ServiceSpec::remote(KEEL, true),
    ServiceSpec::remote(ORCA, false),
    ServiceSpec::remote(ROSCO, true),
    ServiceSpec::remote(SWABBIE, true),
];
