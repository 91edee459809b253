use std::sync::Arc;

use axum::{Json, response::IntoResponse};
use tracing::info;

use crate::api::StatusResponse;
use crate::config::Config;
use crate::db::Database;
use crate::faults::ErrorPolicy;

/// Everything a handler may touch. Cloned per request; the database handle
/// is shared.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub api_token: Arc<str>,
    pub errors: ErrorPolicy,
}

impl AppState {
    pub fn new(db: Arc<Database>, api_token: &str, errors: ErrorPolicy) -> Self {
        AppState {
            db,
            api_token: Arc::from(api_token),
            errors,
        }
    }

    pub fn from_config(db: Arc<Database>, cfg: &Config) -> Self {
        let errors = ErrorPolicy {
            expose_internal_errors: cfg.app.expose_internal_errors(),
        };
        AppState::new(db, cfg.app.get_api_token(), errors)
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(StatusResponse::new_from_msg("ok"))
}
