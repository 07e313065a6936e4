//! Core domain types for the shipquote aggregator
//!
//! Request-scoped value objects (payloads, quotes, shipping options), the
//! courier adapter contract and the validation errors shared across crates.

pub mod adapters;
pub mod models;
pub mod quotes;
pub mod stores;

pub use adapters::{
	AdapterError, AdapterResult, CancelResponse, Courier, CourierAdapter, LabelResponse,
	PaymentMethod, ShipmentAddress, ShipmentItem, ShipmentPayload, ShipmentResponse,
};
pub use models::SecretString;
pub use quotes::{
	AggregatedResult, CourierPayload, CourierQuote, QuoteRequest, QuoteValidationError,
	QuoteValidationResult, ShippingOption,
};
pub use stores::StoreConfig;

// Re-exported for downstream crates so they don't need a direct dependency
pub use chrono;
pub use serde_json;
