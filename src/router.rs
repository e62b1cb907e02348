use axum::{Json, Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::db::sqlite::ConfigStorage;
use crate::error::{ApiErrorBody, ApiErrorResponse};
use crate::handlers::configs;
use crate::service::registry::Services;
use crate::types::configs::{ConfigCreate, ConfigResponse, ConfigUpdate};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Config API",
        version = "0.1.0",
        description = "A simple API to manage configurations"
    ),
    paths(
        configs::list_configs,
        configs::read_config,
        configs::create_config,
        configs::update_config,
        configs::delete_config,
    ),
    components(schemas(
        ConfigCreate,
        ConfigUpdate,
        ConfigResponse,
        ApiErrorBody,
        ApiErrorResponse
    )),
    tags((name = "configs", description = "Config entry management"))
)]
pub struct ApiDoc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ConfkeepState {
    pub store: ConfigStorage,
}

impl ConfkeepState {
    pub fn new(store: ConfigStorage) -> Self {
        Self { store }
    }
}

impl From<&Services> for ConfkeepState {
    fn from(services: &Services) -> Self {
        Self::new(services.db.clone())
    }
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn confkeep_router(state: ConfkeepState) -> Router {
    // development default: any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/configs",
            get(configs::list_configs).post(configs::create_config),
        )
        .route(
            "/configs/{key}",
            get(configs::read_config)
                .put(configs::update_config)
                .delete(configs::delete_config),
        )
        .route("/openapi.json", get(openapi_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
