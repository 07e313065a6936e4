use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

impl ErrorResponse {
	pub fn new(error: &str, message: impl Into<String>) -> Self {
		Self {
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp(),
		}
	}
}

pub fn error_response(
	status: StatusCode,
	error: &str,
	message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
	(status, Json(ErrorResponse::new(error, message)))
}
