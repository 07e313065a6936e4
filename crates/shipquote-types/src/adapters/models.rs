//! Shipment-lifecycle request and response models
//!
//! These are only used by the booking capability, never by the quoting hot
//! path.

use serde::{Deserialize, Serialize};

/// How the customer pays for the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
	Prepaid,
	Cod,
}

/// A postal address attached to a shipment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentAddress {
	pub name: String,
	pub phone: String,
	pub line1: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub line2: Option<String>,
	pub city: String,
	pub state: String,
	pub pincode: String,
}

/// One line item inside the parcel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentItem {
	pub name: String,
	pub quantity: u32,
	/// Unit price in the smallest currency unit
	pub price: u64,
}

/// Request to book an actual shipment with a courier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPayload {
	pub order_id: String,
	pub courier_id: String,
	pub pickup_address: ShipmentAddress,
	pub delivery_address: ShipmentAddress,
	pub items: Vec<ShipmentItem>,
	pub weight_grams: f64,
	pub payment_method: PaymentMethod,
	/// Order value in the smallest currency unit
	pub amount: u64,
}

/// Successful booking confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentResponse {
	pub tracking_id: String,
	pub courier_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub estimated_delivery: Option<String>,
}

/// Outcome of a cancellation attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

/// Label lookup result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelResponse {
	pub label_url: String,
}
