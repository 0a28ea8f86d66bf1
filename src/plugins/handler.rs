use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::context::RequestContext;
use crate::error::GatewayError;
use crate::http::AppState;
use crate::installed::InstalledPlugins;
use crate::tasks::TaskHandle;

use super::dto::{ErrorResponse, InstalledPluginsQuery};
use super::helpers::map_error;

pub(crate) async fn get_installed_plugins(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Query(query): Query<InstalledPluginsQuery>,
) -> Result<Json<InstalledPlugins>, (StatusCode, Json<ErrorResponse>)> {
    match state
        .server()
        .aggregator()
        .list_installed_plugins(query.service.as_deref(), &context)
        .await
    {
        Ok(plugins) => Ok(Json(plugins)),
        Err(err) => Err(map_error(err)),
    }
}

pub(crate) async fn upsert_plugin_info(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Json(body): Json<Value>,
) -> Result<Json<TaskHandle>, (StatusCode, Json<ErrorResponse>)> {
    let Value::Object(plugin_info) = body else {
        return Err(map_error(GatewayError::validation_error(
            "Plugin info must be a JSON object",
        )));
    };

    match state
        .server()
        .dispatcher()
        .upsert_plugin_info(plugin_info, &context)
        .await
    {
        Ok(handle) => Ok(Json(handle)),
        Err(err) => Err(map_error(err)),
    }
}

pub(crate) async fn delete_plugin_info(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<TaskHandle>, (StatusCode, Json<ErrorResponse>)> {
    match state
        .server()
        .dispatcher()
        .delete_plugin_info(&id, &context)
        .await
    {
        Ok(handle) => Ok(Json(handle)),
        Err(err) => Err(map_error(err)),
    }
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "UP" }))
}
