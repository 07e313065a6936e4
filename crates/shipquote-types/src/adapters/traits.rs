//! The courier adapter contract

use async_trait::async_trait;
use std::fmt::Debug;

use super::models::{CancelResponse, LabelResponse, ShipmentPayload, ShipmentResponse};
use super::{AdapterError, AdapterResult, Courier};
use crate::quotes::{CourierPayload, CourierQuote};

/// Uniform capability every courier integration implements
///
/// `get_quote` is the hot path and is infallible by construction: network
/// errors, non-2xx statuses and malformed bodies are absorbed inside the
/// adapter and come back as an unavailable quote. The aggregator relies on
/// this so one bad carrier cannot abort a whole aggregation.
///
/// The shipment-lifecycle operations are optional. The default
/// implementations return [`AdapterError::UnsupportedOperation`] so the
/// registry and services never crash calling an operation a carrier lacks;
/// adapters with a live integration override them.
#[async_trait]
pub trait CourierAdapter: Send + Sync + Debug {
	/// Identity and enablement for this courier instance
	fn courier_info(&self) -> &Courier;

	fn id(&self) -> &str {
		&self.courier_info().id
	}

	fn name(&self) -> &str {
		&self.courier_info().name
	}

	/// Cheap, side-effect-free enablement check, consulted before any I/O
	fn is_enabled(&self) -> bool {
		self.courier_info().enabled
	}

	/// Price and delivery estimate for an origin/destination/weight triple
	///
	/// Never fails: ordinary failures become
	/// [`CourierQuote::unavailable`](crate::quotes::CourierQuote::unavailable).
	async fn get_quote(&self, payload: &CourierPayload) -> CourierQuote;

	/// Book a shipment. Unlike quoting, booking failures must be loud.
	async fn create_shipment(&self, _payload: &ShipmentPayload) -> AdapterResult<ShipmentResponse> {
		Err(AdapterError::unsupported("create_shipment", self.id()))
	}

	async fn cancel_shipment(
		&self,
		_tracking_id: &str,
		_order_id: Option<&str>,
	) -> AdapterResult<CancelResponse> {
		Err(AdapterError::unsupported("cancel_shipment", self.id()))
	}

	async fn get_label(
		&self,
		_tracking_id: &str,
		_order_id: Option<&str>,
	) -> AdapterResult<LabelResponse> {
		Err(AdapterError::unsupported("get_label", self.id()))
	}

	/// Provider-specific tracking status, surfaced as raw JSON
	async fn track_shipment(&self, _tracking_id: &str) -> AdapterResult<serde_json::Value> {
		Err(AdapterError::unsupported("track_shipment", self.id()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug)]
	struct QuoteOnlyCourier {
		courier: Courier,
	}

	#[async_trait]
	impl CourierAdapter for QuoteOnlyCourier {
		fn courier_info(&self) -> &Courier {
			&self.courier
		}

		async fn get_quote(&self, _payload: &CourierPayload) -> CourierQuote {
			CourierQuote::available(self.id(), self.name(), 4200, 3)
		}
	}

	#[tokio::test]
	async fn default_lifecycle_ops_fail_cleanly() {
		let adapter = QuoteOnlyCourier {
			courier: Courier::new("quote-only", "Quote Only", true),
		};

		assert!(matches!(
			adapter.cancel_shipment("TRK123", None).await,
			Err(AdapterError::UnsupportedOperation { .. })
		));
		assert!(matches!(
			adapter.get_label("TRK123", None).await,
			Err(AdapterError::UnsupportedOperation { .. })
		));
		assert!(matches!(
			adapter.track_shipment("TRK123").await,
			Err(AdapterError::UnsupportedOperation { .. })
		));
	}

	#[tokio::test]
	async fn enabled_flag_comes_from_courier_info() {
		let adapter = QuoteOnlyCourier {
			courier: Courier::new("quote-only", "Quote Only", false),
		};
		assert!(!adapter.is_enabled());
	}
}
