use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
	pub status: &'static str,
	pub stores: usize,
	pub couriers: usize,
}

/// GET /health - Liveness probe with registered store/courier counts
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok",
		stores: state.aggregator_service.stores().len(),
		couriers: state.aggregator_service.registry().len(),
	})
}
