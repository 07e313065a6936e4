//! Store (shipping origin) configuration model

use serde::{Deserialize, Serialize};

/// A warehouse/store a shipment can originate from
///
/// The list is static, loaded once at startup and read-only thereafter.
/// Only `enabled == true` entries participate in aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
	pub id: String,
	pub name: String,
	/// 6-digit origin pincode
	pub pincode: String,
	pub enabled: bool,
}

impl StoreConfig {
	pub fn new(
		id: impl Into<String>,
		name: impl Into<String>,
		pincode: impl Into<String>,
		enabled: bool,
	) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			pincode: pincode.into(),
			enabled,
		}
	}
}
