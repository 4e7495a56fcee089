use axum::{Extension, http::StatusCode};
use log::error;
use sea_orm::DatabaseConnection;

/// Returns "OK" when the service can reach its database
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", content_type = "text/plain", body = String),
        (status = 503, description = "Database unreachable", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn health(Extension(db): Extension<DatabaseConnection>) -> (StatusCode, &'static str) {
    match db.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(err) => {
            error!("Health check failed: {err}");
            (StatusCode::SERVICE_UNAVAILABLE, "Database unreachable")
        }
    }
}
