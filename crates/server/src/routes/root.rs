use crate::routes::auth::Caller;
use axum::http::StatusCode;

/// Greets the caller with their subject and the role the token grants
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Successfully authenticated", content_type = "text/plain", body = String),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Token carries no subject")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn root(Caller(access): Caller) -> Result<String, StatusCode> {
    let sub = access.subject.ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(match access.student_id {
        Some(student_id) => format!("Hello, {sub} ({}, student {student_id})", access.role),
        None => format!("Hello, {sub} ({})", access.role),
    })
}
