//! HTTP request handlers

pub mod common;
pub mod health;
pub mod options;
pub mod quotes;
pub mod shipments;

pub use health::health;
pub use options::get_quote_options;
pub use quotes::post_shipping_quote;
pub use shipments::{cancel_shipment, get_shipment_label, post_shipments, track_shipment};
