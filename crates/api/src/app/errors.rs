use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use mandir_auth::{AccessError, DenialClass};

/// Map an access denial to its transport shape.
///
/// The status code follows the denial class; the body carries the stable
/// reason code plus the human-readable rule that fired.
pub fn access_denied(err: &AccessError) -> axum::response::Response {
    let status = match err.class() {
        DenialClass::Unauthenticated => StatusCode::UNAUTHORIZED,
        DenialClass::Forbidden => StatusCode::FORBIDDEN,
        DenialClass::BadRequest => StatusCode::BAD_REQUEST,
    };
    json_error(status, err.code(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
