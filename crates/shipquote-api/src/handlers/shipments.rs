use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use shipquote_service::ShipmentError;
use shipquote_types::{
	AdapterError, CancelResponse, LabelResponse, ShipmentPayload, ShipmentResponse,
};
use tracing::{info, warn};

use crate::handlers::common::{error_response, ErrorResponse};
use crate::state::AppState;

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Query parameters for shipment operations keyed by tracking id; the
/// courier is not derivable from a tracking id alone
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShipmentQuery {
	pub courier_id: String,
	pub order_id: Option<String>,
}

/// POST /shipments - Book a shipment with a specific courier
pub async fn post_shipments(
	State(state): State<AppState>,
	payload: Result<Json<ShipmentPayload>, JsonRejection>,
) -> Result<Json<ShipmentResponse>, HandlerError> {
	let Json(payload) = payload.map_err(|e| {
		error_response(
			StatusCode::BAD_REQUEST,
			"INVALID_BODY",
			format!("Invalid request body: {}", e.body_text()),
		)
	})?;

	info!(
		courier = %payload.courier_id,
		order = %payload.order_id,
		"received shipment creation request"
	);

	state
		.shipment_service
		.create_shipment(&payload)
		.await
		.map(Json)
		.map_err(shipment_error)
}

/// POST /shipments/{tracking_id}/cancel
pub async fn cancel_shipment(
	State(state): State<AppState>,
	Path(tracking_id): Path<String>,
	Query(query): Query<ShipmentQuery>,
) -> Result<Json<CancelResponse>, HandlerError> {
	state
		.shipment_service
		.cancel_shipment(&query.courier_id, &tracking_id, query.order_id.as_deref())
		.await
		.map(Json)
		.map_err(shipment_error)
}

/// GET /shipments/{tracking_id}/label
pub async fn get_shipment_label(
	State(state): State<AppState>,
	Path(tracking_id): Path<String>,
	Query(query): Query<ShipmentQuery>,
) -> Result<Json<LabelResponse>, HandlerError> {
	state
		.shipment_service
		.get_label(&query.courier_id, &tracking_id, query.order_id.as_deref())
		.await
		.map(Json)
		.map_err(shipment_error)
}

/// GET /shipments/{tracking_id}/track
pub async fn track_shipment(
	State(state): State<AppState>,
	Path(tracking_id): Path<String>,
	Query(query): Query<ShipmentQuery>,
) -> Result<Json<serde_json::Value>, HandlerError> {
	state
		.shipment_service
		.track_shipment(&query.courier_id, &tracking_id)
		.await
		.map(Json)
		.map_err(shipment_error)
}

/// Caller mistakes are a 400, our misconfiguration a 500, and a courier
/// that is reachable but misbehaving a 502
fn shipment_error(err: ShipmentError) -> HandlerError {
	warn!("shipment operation failed: {}", err);
	match &err {
		ShipmentError::UnknownCourier { .. } => {
			error_response(StatusCode::BAD_REQUEST, "UNKNOWN_COURIER", err.to_string())
		},
		ShipmentError::CourierDisabled { .. } => {
			error_response(StatusCode::BAD_REQUEST, "COURIER_DISABLED", err.to_string())
		},
		ShipmentError::Adapter(adapter_err) => match adapter_err {
			AdapterError::UnsupportedOperation { .. } => error_response(
				StatusCode::BAD_REQUEST,
				"UNSUPPORTED_OPERATION",
				err.to_string(),
			),
			AdapterError::MissingCredentials { .. } | AdapterError::Config { .. } => {
				error_response(
					StatusCode::INTERNAL_SERVER_ERROR,
					"CONFIGURATION_ERROR",
					err.to_string(),
				)
			},
			_ => error_response(StatusCode::BAD_GATEWAY, "COURIER_ERROR", err.to_string()),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn error_statuses_by_class() {
		let (status, _) = shipment_error(ShipmentError::UnknownCourier {
			courier_id: "x".to_string(),
		});
		assert_eq!(status, StatusCode::BAD_REQUEST);

		let (status, _) = shipment_error(ShipmentError::Adapter(AdapterError::unsupported(
			"cancel_shipment",
			"bluedart",
		)));
		assert_eq!(status, StatusCode::BAD_REQUEST);

		let (status, _) = shipment_error(ShipmentError::Adapter(AdapterError::MissingCredentials {
			courier_id: "bluedart".to_string(),
			detail: "username".to_string(),
		}));
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

		let (status, _) = shipment_error(ShipmentError::Adapter(AdapterError::status(
			503,
			"upstream down",
		)));
		assert_eq!(status, StatusCode::BAD_GATEWAY);
	}
}
