use serde::{Deserialize, Serialize};

/// Identity and correlation data for one inbound request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestContext {
    #[serde(default)]
    pub user: Option<String>,
    pub request_id: String,
}

impl RequestContext {
    pub fn new(user: Option<String>, request_id: impl Into<String>) -> Self {
        Self {
            user,
            request_id: request_id.into(),
        }
    }
}
