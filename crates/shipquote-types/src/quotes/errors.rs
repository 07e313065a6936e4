//! Validation errors for quote requests

use thiserror::Error;

/// Result type for quote request validation
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;

#[derive(Error, Debug)]
pub enum QuoteValidationError {
	#[error("Invalid pincode in '{field}': '{value}' is not a 6-digit pincode")]
	InvalidPincode { field: String, value: String },

	#[error("Invalid weight: {weight_grams} grams (must be a positive, finite number)")]
	InvalidWeight { weight_grams: f64 },

	#[error("Invalid courier filter: {reason}")]
	InvalidCourierFilter { reason: String },
}
