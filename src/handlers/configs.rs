use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;

use crate::error::{ApiErrorResponse, ConfkeepError};
use crate::router::ConfkeepState;
use crate::types::configs::{ConfigCreate, ConfigResponse, ConfigUpdate};

/// GET /configs
#[utoipa::path(
    get,
    path = "/configs",
    tag = "configs",
    responses((status = 200, description = "All config entries", body = [ConfigResponse]))
)]
pub async fn list_configs(
    State(state): State<ConfkeepState>,
) -> Result<Json<Vec<ConfigResponse>>, ConfkeepError> {
    let configs = state.store.get_all().await?;
    Ok(Json(configs.into_iter().map(Into::into).collect()))
}

/// GET /configs/{key}
#[utoipa::path(
    get,
    path = "/configs/{key}",
    tag = "configs",
    params(("key" = String, Path, description = "Config key")),
    responses(
        (status = 200, description = "Config entry", body = ConfigResponse),
        (status = 404, description = "Config not found", body = ApiErrorResponse)
    )
)]
pub async fn read_config(
    State(state): State<ConfkeepState>,
    Path(key): Path<String>,
) -> Result<Json<ConfigResponse>, ConfkeepError> {
    let config = state.store.get(&key).await?.ok_or(ConfkeepError::NotFound)?;
    Ok(Json(config.into()))
}

/// POST /configs
#[utoipa::path(
    post,
    path = "/configs",
    tag = "configs",
    request_body = ConfigCreate,
    responses(
        (status = 200, description = "Config created", body = ConfigResponse),
        (status = 400, description = "Config already exists", body = ApiErrorResponse)
    )
)]
pub async fn create_config(
    State(state): State<ConfkeepState>,
    Json(body): Json<ConfigCreate>,
) -> Result<Json<ConfigResponse>, ConfkeepError> {
    if state.store.get(&body.key).await?.is_some() {
        return Err(ConfkeepError::AlreadyExists);
    }
    let created = state
        .store
        .create(&body.key, &body.value, &body.kind)
        .await?;
    info!(key = %created.key, kind = %created.kind, "config created");
    Ok(Json(created.into()))
}

/// PUT /configs/{key}
#[utoipa::path(
    put,
    path = "/configs/{key}",
    tag = "configs",
    params(("key" = String, Path, description = "Config key")),
    request_body = ConfigUpdate,
    responses(
        (status = 200, description = "Config updated", body = ConfigResponse),
        (status = 404, description = "Config not found", body = ApiErrorResponse)
    )
)]
pub async fn update_config(
    State(state): State<ConfkeepState>,
    Path(key): Path<String>,
    Json(body): Json<ConfigUpdate>,
) -> Result<Json<ConfigResponse>, ConfkeepError> {
    if state.store.get(&key).await?.is_none() {
        return Err(ConfkeepError::NotFound);
    }
    let updated = state
        .store
        .update(&key, &body.value)
        .await?
        .ok_or(ConfkeepError::NotFound)?;
    info!(key = %updated.key, "config updated");
    Ok(Json(updated.into()))
}

/// DELETE /configs/{key}
#[utoipa::path(
    delete,
    path = "/configs/{key}",
    tag = "configs",
    params(("key" = String, Path, description = "Config key")),
    responses(
        (status = 200, description = "Deleted config entry", body = ConfigResponse),
        (status = 404, description = "Config not found", body = ApiErrorResponse)
    )
)]
pub async fn delete_config(
    State(state): State<ConfkeepState>,
    Path(key): Path<String>,
) -> Result<Json<ConfigResponse>, ConfkeepError> {
    let deleted = state
        .store
        .delete(&key)
        .await?
        .ok_or(ConfkeepError::NotFound)?;
    info!(key = %deleted.key, "config deleted");
    Ok(Json(deleted.into()))
}
