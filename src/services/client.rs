use async_trait::async_trait;
use reqwest::Client;

use crate::context::{forwarded_headers, RequestContext};
use crate::error::{GatewayError, Result};

use super::dto::PluginDescriptor;
use super::helpers::build_url;

const INSTALLED_PLUGINS_PATH: &str = "installedPlugins";

/// A backend that can report the plugins it has installed.
///
/// Implementations must surface a missing endpoint as an error for which
/// [`GatewayError::is_capability_absent`] holds.
#[async_trait]
pub trait InstalledPluginsClient: Send + Sync {
    async fn installed_plugins(&self, context: &RequestContext) -> Result<Vec<PluginDescriptor>>;
}

#[derive(Clone)]
pub struct HttpServiceClient {
    service: String,
    http: Client,
    base_url: String,
}

impl HttpServiceClient {
    pub fn new(service: impl Into<String>, http: Client, base_url: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl InstalledPluginsClient for HttpServiceClient {
    async fn installed_plugins(&self, context: &RequestContext) -> Result<Vec<PluginDescriptor>> {
        let url = build_url(&self.base_url, &[INSTALLED_PLUGINS_PATH]);
        tracing::debug!(service = %self.service, %url, "Fetching installed plugins");

        let mut request = self.http.get(&url);
        for (name, value) in forwarded_headers(context) {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(GatewayError::Network)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::backend_status(&self.service, status, body));
        }

        let plugins = response
            .json::<Vec<PluginDescriptor>>()
            .await
            .map_err(GatewayError::Network)?;
        Ok(plugins)
    }
}
