//! Courier adapter contract, models and errors

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{AdapterError, AdapterResult};
pub use models::{
	CancelResponse, LabelResponse, PaymentMethod, ShipmentAddress, ShipmentItem, ShipmentPayload,
	ShipmentResponse,
};
pub use traits::CourierAdapter;

use serde::{Deserialize, Serialize};

/// Identity and enablement of one courier integration
///
/// This doubles as the static courier config list entry: disabled couriers'
/// adapters must never be invoked, which the registry enforces by filtering
/// before fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Courier {
	pub id: String,
	pub name: String,
	pub enabled: bool,
}

impl Courier {
	pub fn new(id: impl Into<String>, name: impl Into<String>, enabled: bool) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			enabled,
		}
	}
}
