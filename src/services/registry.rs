use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

use super::client::{HttpServiceClient, InstalledPluginsClient};
use super::dto::KNOWN_SERVICES;
use super::helpers::build_http_client;

/// Where a known service's installed plugins come from.
#[derive(Clone)]
pub enum ServiceSource {
    /// The gateway's own plugin manager.
    Local,
    Remote(Arc<dyn InstalledPluginsClient>),
    /// Optional service that is not part of this deployment.
    Unwired,
}

#[derive(Clone)]
pub struct KnownService {
    name: String,
    optional: bool,
    source: ServiceSource,
}

impl KnownService {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            source: ServiceSource::Local,
        }
    }

    pub fn remote(
        name: impl Into<String>,
        optional: bool,
        client: Arc<dyn InstalledPluginsClient>,
    ) -> Self {
        Self {
            name: name.into(),
            optional,
            source: ServiceSource::Remote(client),
        }
    }

    pub fn unwired(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: true,
            source: ServiceSource::Unwired,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn source(&self) -> &ServiceSource {
        &self.source
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.source, ServiceSource::Unwired)
    }
}

/// Every service the gateway knows about, fixed for the life of the process.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: BTreeMap<String, KnownService>,
}

impl ServiceRegistry {
    pub fn new(services: impl IntoIterator<Item = KnownService>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for service in services {
            if map.contains_key(&service.name) {
                return Err(GatewayError::config_error(format!(
                    "Service {} registered twice",
                    service.name
                )));
            }
            map.insert(service.name.clone(), service);
        }
        Ok(Self { services: map })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let http = build_http_client(Duration::from_millis(config.services.backend_timeout_ms));

        let services = KNOWN_SERVICES
            .iter()
            .map(|spec| {
                if spec.local {
                    return Ok(KnownService::local(spec.name));
                }
                match config.services.urls.get(spec.name) {
                    Some(url) => {
                        let client = HttpServiceClient::new(spec.name, http.clone(), url.clone());
                        Ok(KnownService::remote(spec.name, spec.optional, Arc::new(client)))
                    }
                    None if spec.optional => {
                        tracing::info!(service = spec.name, "Optional service not configured");
                        Ok(KnownService::unwired(spec.name))
                    }
                    None => Err(GatewayError::config_error(format!(
                        "Missing base URL for required service {}",
                        spec.name
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(services)
    }

    pub fn get(&self, name: &str) -> Option<&KnownService> {
        self.services.get(name)
    }

    /// Services in name order.
    pub fn iter(&self) -> impl Iterator<Item = &KnownService> {
        self.services.values()
    }
}
