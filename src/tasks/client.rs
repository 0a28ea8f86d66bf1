use async_trait::async_trait;
use reqwest::Client;

use crate::context::{forwarded_headers, RequestContext};
use crate::error::{GatewayError, Result};
use crate::services::build_url;

use super::dto::{TaskEnvelope, TaskHandle};

const OPS_PATH: &str = "ops";

/// The asynchronous task service that performs plugin registry mutations.
#[async_trait]
pub trait TaskSubmitter: Send + Sync {
    async fn create(&self, envelope: &TaskEnvelope, context: &RequestContext) -> Result<TaskHandle>;
}

#[derive(Clone)]
pub struct HttpTaskClient {
    http: Client,
    base_url: String,
}

impl HttpTaskClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TaskSubmitter for HttpTaskClient {
    async fn create(&self, envelope: &TaskEnvelope, context: &RequestContext) -> Result<TaskHandle> {
        let url = build_url(&self.base_url, &[OPS_PATH]);

        let mut request = self.http.post(&url).json(envelope);
        for (name, value) in forwarded_headers(context) {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(GatewayError::Network)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::TaskSubmission { status, body });
        }

        let handle = response
            .json::<TaskHandle>()
            .await
            .map_err(GatewayError::Network)?;
        Ok(handle)
    }
}
