use axum::http::HeaderMap;

use super::dto::RequestContext;

pub const USER_HEADER: &str = "x-spinnaker-user";
pub const REQUEST_ID_HEADER: &str = "x-spinnaker-request-id";

/// Never fails: a missing or unreadable user header means an unauthenticated
/// caller, and a missing request id is generated.
pub fn extract_context_from_headers(headers: &HeaderMap) -> RequestContext {
    let user = header_text(headers, USER_HEADER);
    let request_id =
        header_text(headers, REQUEST_ID_HEADER).unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    RequestContext { user, request_id }
}

/// Headers forwarded to every downstream call made on behalf of `context`.
pub fn forwarded_headers(context: &RequestContext) -> Vec<(&'static str, String)> {
    let mut headers = vec![(REQUEST_ID_HEADER, context.request_id.clone())];
    if let Some(user) = context.user.as_deref() {
        headers.push((USER_HEADER, user.to_string()));
    }
    headers
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
