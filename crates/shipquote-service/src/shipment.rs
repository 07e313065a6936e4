//! Shipment lifecycle routing
//!
//! Thin dispatch layer from a courier id to its adapter. Unlike the quote
//! path, shipment operations are loud: a missing credential or an upstream
//! rejection propagates to the caller instead of degrading silently.

use std::sync::Arc;

use shipquote_adapters::AdapterRegistry;
use shipquote_types::{
	AdapterError, CancelResponse, CourierAdapter, LabelResponse, ShipmentPayload,
	ShipmentResponse,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ShipmentError {
	#[error("unknown courier: '{courier_id}'")]
	UnknownCourier { courier_id: String },
	#[error("courier '{courier_id}' is disabled")]
	CourierDisabled { courier_id: String },
	#[error(transparent)]
	Adapter(#[from] AdapterError),
}

pub struct ShipmentService {
	registry: Arc<AdapterRegistry>,
}

impl ShipmentService {
	pub fn new(registry: Arc<AdapterRegistry>) -> Self {
		Self { registry }
	}

	fn adapter(&self, courier_id: &str) -> Result<&Arc<dyn CourierAdapter>, ShipmentError> {
		let adapter =
			self.registry
				.get(courier_id)
				.ok_or_else(|| ShipmentError::UnknownCourier {
					courier_id: courier_id.to_string(),
				})?;
		if !adapter.is_enabled() {
			return Err(ShipmentError::CourierDisabled {
				courier_id: courier_id.to_string(),
			});
		}
		Ok(adapter)
	}

	pub async fn create_shipment(
		&self,
		payload: &ShipmentPayload,
	) -> Result<ShipmentResponse, ShipmentError> {
		let adapter = self.adapter(&payload.courier_id)?;
		let response = adapter.create_shipment(payload).await?;
		info!(
			courier = %payload.courier_id,
			order = %payload.order_id,
			tracking = %response.tracking_id,
			"shipment created"
		);
		Ok(response)
	}

	pub async fn cancel_shipment(
		&self,
		courier_id: &str,
		tracking_id: &str,
		order_id: Option<&str>,
	) -> Result<CancelResponse, ShipmentError> {
		let adapter = self.adapter(courier_id)?;
		Ok(adapter.cancel_shipment(tracking_id, order_id).await?)
	}

	pub async fn get_label(
		&self,
		courier_id: &str,
		tracking_id: &str,
		order_id: Option<&str>,
	) -> Result<LabelResponse, ShipmentError> {
		let adapter = self.adapter(courier_id)?;
		Ok(adapter.get_label(tracking_id, order_id).await?)
	}

	pub async fn track_shipment(
		&self,
		courier_id: &str,
		tracking_id: &str,
	) -> Result<serde_json::Value, ShipmentError> {
		let adapter = self.adapter(courier_id)?;
		Ok(adapter.track_shipment(tracking_id).await?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use shipquote_adapters::FormulaAdapter;
	use shipquote_types::Courier;

	fn service() -> ShipmentService {
		let mut registry = AdapterRegistry::new();
		registry
			.register(Arc::new(FormulaAdapter::new(
				Courier::new("dtdc", "DTDC", true),
				4500,
				3.5,
				4,
				2,
			)))
			.unwrap();
		registry
			.register(Arc::new(FormulaAdapter::new(
				Courier::new("paused", "Paused", false),
				4500,
				3.5,
				4,
				2,
			)))
			.unwrap();
		ShipmentService::new(Arc::new(registry))
	}

	#[tokio::test]
	async fn unknown_courier_is_rejected() {
		let err = service()
			.track_shipment("nope", "TRK-1")
			.await
			.unwrap_err();
		assert!(matches!(err, ShipmentError::UnknownCourier { .. }));
	}

	#[tokio::test]
	async fn disabled_courier_is_rejected() {
		let err = service()
			.track_shipment("paused", "TRK-1")
			.await
			.unwrap_err();
		assert!(matches!(err, ShipmentError::CourierDisabled { .. }));
	}

	#[tokio::test]
	async fn unsupported_operation_propagates() {
		let err = service()
			.cancel_shipment("dtdc", "TRK-1", None)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			ShipmentError::Adapter(AdapterError::UnsupportedOperation { .. })
		));
	}
}
