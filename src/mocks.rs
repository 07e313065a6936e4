//! Mock couriers for examples and testing
//!
//! Simple, deterministic adapters usable in tests without any network or
//! credentials. The quote mock can be configured to fail, stall, or panic
//! to exercise the aggregator's isolation guarantees.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shipquote_types::{
	AdapterResult, CancelResponse, Courier, CourierAdapter, CourierPayload, CourierQuote,
	LabelResponse, ShipmentPayload, ShipmentResponse,
};

/// What a [`MockCourier`] does when asked for a quote
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
	/// Answer with the configured price and delivery days
	Quote,
	/// Answer `available: false`, as a live adapter does on upstream failure
	Unavailable,
	/// Panic inside the quote task
	Panic,
}

/// Configurable mock courier
#[derive(Debug)]
pub struct MockCourier {
	courier: Courier,
	pub price: u64,
	pub delivery_days: u32,
	pub behavior: MockBehavior,
	/// Artificial latency before answering
	pub delay: Option<Duration>,
	calls: AtomicUsize,
}

impl MockCourier {
	pub fn new(id: &str, price: u64, delivery_days: u32) -> Self {
		Self {
			courier: Courier::new(id, format!("Mock {}", id), true),
			price,
			delivery_days,
			behavior: MockBehavior::Quote,
			delay: None,
			calls: AtomicUsize::new(0),
		}
	}

	pub fn unavailable(id: &str) -> Self {
		Self {
			behavior: MockBehavior::Unavailable,
			..Self::new(id, 0, 0)
		}
	}

	pub fn panicking(id: &str) -> Self {
		Self {
			behavior: MockBehavior::Panic,
			..Self::new(id, 0, 0)
		}
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	pub fn arced(self) -> Arc<Self> {
		Arc::new(self)
	}

	/// Number of quote calls received so far
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl CourierAdapter for MockCourier {
	fn courier_info(&self) -> &Courier {
		&self.courier
	}

	async fn get_quote(&self, _payload: &CourierPayload) -> CourierQuote {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		match self.behavior {
			MockBehavior::Quote => {
				CourierQuote::available(self.id(), self.name(), self.price, self.delivery_days)
			},
			MockBehavior::Unavailable => CourierQuote::unavailable(self.id(), self.name()),
			MockBehavior::Panic => panic!("mock courier '{}' exploded", self.id()),
		}
	}

	async fn create_shipment(&self, payload: &ShipmentPayload) -> AdapterResult<ShipmentResponse> {
		Ok(ShipmentResponse {
			tracking_id: format!("MOCK-{}", payload.order_id),
			courier_name: self.name().to_string(),
			label_url: Some(format!("https://mock.test/labels/{}", payload.order_id)),
			estimated_delivery: None,
		})
	}

	async fn cancel_shipment(
		&self,
		_tracking_id: &str,
		_order_id: Option<&str>,
	) -> AdapterResult<CancelResponse> {
		Ok(CancelResponse {
			success: true,
			message: None,
		})
	}

	async fn get_label(
		&self,
		tracking_id: &str,
		_order_id: Option<&str>,
	) -> AdapterResult<LabelResponse> {
		Ok(LabelResponse {
			label_url: format!("https://mock.test/labels/{}", tracking_id),
		})
	}

	async fn track_shipment(&self, tracking_id: &str) -> AdapterResult<shipquote_types::serde_json::Value> {
		Ok(shipquote_types::serde_json::json!({
			"trackingId": tracking_id,
			"status": "in_transit",
		}))
	}
}
