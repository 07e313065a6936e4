use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use shipquote_types::{AggregatedResult, QuoteRequest};
use tracing::info;

use crate::handlers::common::{error_response, ErrorResponse};
use crate::state::AppState;

/// POST /shipping-quote - Aggregate quotes across stores and couriers
///
/// Malformed bodies (including a non-array `courierIds`) are a 400, not the
/// 422 axum's default Json extractor would produce. An empty aggregation is
/// a 200 with null cheapest/fastest.
pub async fn post_shipping_quote(
	State(state): State<AppState>,
	request: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<AggregatedResult>, (StatusCode, Json<ErrorResponse>)> {
	let Json(request) = request.map_err(|e| {
		error_response(
			StatusCode::BAD_REQUEST,
			"INVALID_BODY",
			format!("Invalid request body: {}", e.body_text()),
		)
	})?;

	if let Err(e) = request.validate() {
		return Err(error_response(
			StatusCode::BAD_REQUEST,
			"VALIDATION_ERROR",
			format!("Invalid request: {}", e),
		));
	}

	info!(
		destination = %request.destination_pincode,
		weight_grams = request.weight_grams,
		"received shipping-quote request"
	);

	let result = state
		.aggregator_service
		.aggregate_quotes(
			&request.destination_pincode,
			request.weight_grams,
			request.courier_ids.as_deref(),
		)
		.await;

	Ok(Json(result))
}
