//! Error types for adapter operations
//!
//! These never cross the quoting hot path: `get_quote` absorbs all of them
//! into an unavailable quote. They do surface from the shipment-lifecycle
//! operations, where a human is waiting synchronously and silent failure
//! would hide a real booking problem.

use thiserror::Error;

/// Result type for fallible adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	Status { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Authentication failed for courier {courier_id}")]
	AuthenticationFailed { courier_id: String },

	#[error("Missing credentials for courier {courier_id}: {detail}")]
	MissingCredentials { courier_id: String, detail: String },

	#[error("No usable rates returned for courier {courier_id}")]
	NoRates { courier_id: String },

	#[error("Unsupported operation: {operation} for courier {courier_id}")]
	UnsupportedOperation {
		operation: String,
		courier_id: String,
	},

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Adapter configuration error: {reason}")]
	Config { reason: String },

	#[error("Duplicate courier id registered: {courier_id}")]
	DuplicateCourier { courier_id: String },
}

impl AdapterError {
	pub fn status(status_code: u16, reason: impl Into<String>) -> Self {
		Self::Status {
			status_code,
			reason: reason.into(),
		}
	}

	pub fn unsupported(operation: &str, courier_id: &str) -> Self {
		Self::UnsupportedOperation {
			operation: operation.to_string(),
			courier_id: courier_id.to_string(),
		}
	}

	/// Whether this failure means "route not covered" rather than an outage
	///
	/// Carriers signal an unserviceable pincode pair with a 400/404 on an
	/// otherwise healthy endpoint; that maps to an unavailable quote, not an
	/// error worth alerting on.
	pub fn is_not_serviceable(&self) -> bool {
		matches!(
			self,
			AdapterError::Status {
				status_code: 400 | 404,
				..
			} | AdapterError::NoRates { .. }
		)
	}
}
