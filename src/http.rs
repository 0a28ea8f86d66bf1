use crate::context::{extract_context_from_headers, REQUEST_ID_HEADER};
use crate::plugins;
use crate::GatewayServer;
use anyhow::Result;
use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::Instrument;

#[derive(Clone)]
pub struct AppState {
    server: Arc<GatewayServer>,
}

impl AppState {
    pub fn new(server: GatewayServer) -> Self {
        Self {
            server: Arc::new(server),
        }
    }

    pub fn server(&self) -> &GatewayServer {
        &self.server
    }
}

/// Resolves the caller's identity and request id once per request and echoes
/// the request id back on the response.
async fn request_context(mut request: Request, next: Next) -> Response {
    let context = extract_context_from_headers(request.headers());
    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %context.request_id,
    );
    let request_id = HeaderValue::from_str(&context.request_id).ok();
    request.extensions_mut().insert(context);

    let mut response = next.run(request).instrument(span).await;
    if let Some(value) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/plugins/installed", get(plugins::get_installed_plugins))
        .route(
            "/plugins/info",
            post(plugins::upsert_plugin_info).put(plugins::upsert_plugin_info),
        )
        .route("/plugins/info/:id", delete(plugins::delete_plugin_info))
        .route("/health", get(plugins::health))
        .layer(middleware::from_fn(request_context))
        .with_state(state)
}

pub async fn run_http_server(server: GatewayServer, port: u16) -> Result<()> {
    let app = router(AppState::new(server));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting plugin gateway on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
