//! Quote domain models and ranking
//!
//! Everything here is a request-scoped value object: created fresh per call,
//! never mutated after construction, discarded once the response is sent.

pub mod errors;
pub mod request;

pub use errors::{QuoteValidationError, QuoteValidationResult};
pub use request::QuoteRequest;

use serde::{Deserialize, Serialize};

use crate::stores::StoreConfig;

/// Quote request handed to a single courier adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierPayload {
	/// 6-digit origin pincode (the store's pincode)
	pub origin_pincode: String,
	/// 6-digit destination pincode
	pub destination_pincode: String,
	/// Parcel weight in grams, always positive
	pub weight_grams: f64,
}

impl CourierPayload {
	pub fn new(
		origin_pincode: impl Into<String>,
		destination_pincode: impl Into<String>,
		weight_grams: f64,
	) -> Self {
		Self {
			origin_pincode: origin_pincode.into(),
			destination_pincode: destination_pincode.into(),
			weight_grams,
		}
	}

	/// Whether origin and destination share a pincode (same-city delivery)
	pub fn is_same_city(&self) -> bool {
		self.origin_pincode == self.destination_pincode
	}
}

/// A single courier's answer to a [`CourierPayload`]
///
/// `available == false` means the route is not serviceable or the carrier
/// call failed; `price` and `delivery_days` are 0 sentinels in that case and
/// the quote must never participate in ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierQuote {
	pub courier_id: String,
	pub courier_name: String,
	/// Price in the smallest currency unit (e.g. paise)
	pub price: u64,
	pub delivery_days: u32,
	pub available: bool,
}

impl CourierQuote {
	pub fn available(
		courier_id: impl Into<String>,
		courier_name: impl Into<String>,
		price: u64,
		delivery_days: u32,
	) -> Self {
		Self {
			courier_id: courier_id.into(),
			courier_name: courier_name.into(),
			price,
			delivery_days,
			available: true,
		}
	}

	/// The sentinel quote every adapter falls back to on failure
	pub fn unavailable(courier_id: impl Into<String>, courier_name: impl Into<String>) -> Self {
		Self {
			courier_id: courier_id.into(),
			courier_name: courier_name.into(),
			price: 0,
			delivery_days: 0,
			available: false,
		}
	}
}

/// A [`CourierQuote`] tied to the store origin that produced it
///
/// The same courier quoting from two stores yields two distinct options;
/// (courier_id, store_pincode, price) identifies one for display purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
	pub courier_id: String,
	pub courier_name: String,
	pub price: u64,
	pub delivery_days: u32,
	pub available: bool,
	pub store_pincode: String,
	pub store_name: String,
}

impl ShippingOption {
	pub fn from_quote(quote: CourierQuote, store: &StoreConfig) -> Self {
		Self {
			courier_id: quote.courier_id,
			courier_name: quote.courier_name,
			price: quote.price,
			delivery_days: quote.delivery_days,
			available: quote.available,
			store_pincode: store.pincode.clone(),
			store_name: store.name.clone(),
		}
	}
}

/// Final aggregation output returned by the quote endpoint
///
/// `cheapest` and `fastest` are derived views over `all_options`, which stays
/// in encounter order (store-then-courier iteration order of the fan-out).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
	pub cheapest: Option<ShippingOption>,
	pub fastest: Option<ShippingOption>,
	pub all_options: Vec<ShippingOption>,
	pub weight_grams: f64,
}

impl AggregatedResult {
	/// Derive the ranked views from the available options
	///
	/// Callers must pass only `available == true` options, already in
	/// encounter order. Cheapest is the minimum price, first on tie.
	/// Fastest is the minimum delivery days with price ascending as the
	/// tie-break, then encounter order.
	pub fn rank(all_options: Vec<ShippingOption>, weight_grams: f64) -> Self {
		let mut cheapest: Option<&ShippingOption> = None;
		let mut fastest: Option<&ShippingOption> = None;

		for option in &all_options {
			match cheapest {
				Some(best) if option.price >= best.price => {},
				_ => cheapest = Some(option),
			}
			match fastest {
				Some(best)
					if (option.delivery_days, option.price)
						>= (best.delivery_days, best.price) => {},
				_ => fastest = Some(option),
			}
		}

		Self {
			cheapest: cheapest.cloned(),
			fastest: fastest.cloned(),
			all_options,
			weight_grams,
		}
	}

	/// Empty result for a request that produced no usable options
	pub fn empty(weight_grams: f64) -> Self {
		Self {
			cheapest: None,
			fastest: None,
			all_options: Vec::new(),
			weight_grams,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn option(courier_id: &str, store: &str, price: u64, days: u32) -> ShippingOption {
		ShippingOption {
			courier_id: courier_id.to_string(),
			courier_name: courier_id.to_string(),
			price,
			delivery_days: days,
			available: true,
			store_pincode: store.to_string(),
			store_name: format!("Store {}", store),
		}
	}

	#[test]
	fn rank_picks_cheapest_and_fastest() {
		let options = vec![
			option("a", "400001", 5000, 4),
			option("b", "400001", 3000, 6),
			option("c", "110001", 7000, 2),
		];

		let result = AggregatedResult::rank(options, 500.0);
		assert_eq!(result.cheapest.as_ref().unwrap().courier_id, "b");
		assert_eq!(result.fastest.as_ref().unwrap().courier_id, "c");
		assert_eq!(result.all_options.len(), 3);
	}

	#[test]
	fn cheapest_tie_breaks_on_encounter_order() {
		let options = vec![
			option("first", "400001", 3000, 5),
			option("second", "110001", 3000, 2),
		];

		let result = AggregatedResult::rank(options, 200.0);
		assert_eq!(result.cheapest.as_ref().unwrap().courier_id, "first");
	}

	#[test]
	fn fastest_tie_breaks_on_price_then_encounter_order() {
		let options = vec![
			option("pricey", "400001", 9000, 2),
			option("cheap", "110001", 4000, 2),
			option("also-cheap", "560001", 4000, 2),
		];

		let result = AggregatedResult::rank(options, 200.0);
		// Same delivery days everywhere: price ascending wins, then the
		// earlier encounter of the two equally-priced options.
		assert_eq!(result.fastest.as_ref().unwrap().courier_id, "cheap");
	}

	#[test]
	fn cheapest_bounds_all_options() {
		let options = vec![
			option("a", "400001", 5200, 3),
			option("b", "400001", 4100, 4),
			option("c", "110001", 8000, 1),
		];

		let result = AggregatedResult::rank(options, 750.0);
		let cheapest = result.cheapest.as_ref().unwrap();
		let fastest = result.fastest.as_ref().unwrap();
		for opt in &result.all_options {
			assert!(cheapest.price <= opt.price);
			assert!(fastest.delivery_days <= opt.delivery_days);
		}
	}

	#[test]
	fn empty_options_yield_null_views() {
		let result = AggregatedResult::rank(Vec::new(), 120.0);
		assert!(result.cheapest.is_none());
		assert!(result.fastest.is_none());
		assert!(result.all_options.is_empty());
		assert_eq!(result.weight_grams, 120.0);
	}

	#[test]
	fn unavailable_quote_uses_zero_sentinels() {
		let quote = CourierQuote::unavailable("dtdc", "DTDC");
		assert!(!quote.available);
		assert_eq!(quote.price, 0);
		assert_eq!(quote.delivery_days, 0);
	}

	#[test]
	fn same_city_detection() {
		let payload = CourierPayload::new("400001", "400001", 250.0);
		assert!(payload.is_same_city());

		let payload = CourierPayload::new("400001", "110001", 250.0);
		assert!(!payload.is_same_city());
	}
}
