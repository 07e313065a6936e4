use std::sync::Arc;

use shipquote_service::{AggregatorService, ShipmentService};

use crate::handlers::options::QuoteOptionsResponse;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub aggregator_service: Arc<AggregatorService>,
	pub shipment_service: Arc<ShipmentService>,
	/// Precomputed options payload; config is immutable after startup
	pub quote_options: Arc<QuoteOptionsResponse>,
}
