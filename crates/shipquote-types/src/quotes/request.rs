//! Quote request body and validation

use serde::{Deserialize, Serialize};

use super::{QuoteValidationError, QuoteValidationResult};

/// True iff `value` is exactly six ASCII digits
pub fn is_valid_pincode(value: &str) -> bool {
	value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit())
}

/// API request body for POST /shipping-quote
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuoteRequest {
	/// 6-digit destination pincode
	pub destination_pincode: String,
	/// Parcel weight in grams
	pub weight_grams: f64,
	/// Optional opt-in subset of courier ids; empty or omitted means all
	/// enabled couriers participate
	#[serde(skip_serializing_if = "Option::is_none")]
	pub courier_ids: Option<Vec<String>>,
}

impl QuoteRequest {
	/// Validate the request before it reaches the aggregation core
	///
	/// Applied validations:
	/// - destinationPincode must be exactly six ASCII digits
	/// - weightGrams must be positive and finite
	/// - courierIds, when present, must contain non-empty ids
	pub fn validate(&self) -> QuoteValidationResult<()> {
		if !is_valid_pincode(&self.destination_pincode) {
			return Err(QuoteValidationError::InvalidPincode {
				field: "destinationPincode".to_string(),
				value: self.destination_pincode.clone(),
			});
		}

		if !(self.weight_grams.is_finite() && self.weight_grams > 0.0) {
			return Err(QuoteValidationError::InvalidWeight {
				weight_grams: self.weight_grams,
			});
		}

		if let Some(ids) = &self.courier_ids {
			if ids.iter().any(|id| id.trim().is_empty()) {
				return Err(QuoteValidationError::InvalidCourierFilter {
					reason: "courierIds must not contain empty ids".to_string(),
				});
			}
		}

		Ok(())
	}
}
