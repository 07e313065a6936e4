//! Deterministic-formula adapter
//!
//! Backs the carriers that have no live integration so the system works
//! end-to-end without credentials: price is a linear function of weight
//! plus a fixed base fee, delivery days are a small constant that shrinks
//! for same-city routes.

use async_trait::async_trait;
use shipquote_config::{AdapterSettings, CourierSettings};
use shipquote_types::{AdapterError, AdapterResult, Courier, CourierAdapter, CourierPayload, CourierQuote};

#[derive(Debug, Clone)]
pub struct FormulaAdapter {
	courier: Courier,
	/// Fixed base fee in paise
	base_fee: u64,
	/// Paise per gram
	per_gram: f64,
	delivery_days: u32,
	same_city_days: u32,
}

impl FormulaAdapter {
	pub fn new(
		courier: Courier,
		base_fee: u64,
		per_gram: f64,
		delivery_days: u32,
		same_city_days: u32,
	) -> Self {
		Self {
			courier,
			base_fee,
			per_gram,
			delivery_days,
			same_city_days,
		}
	}

	pub fn from_settings(settings: &CourierSettings) -> AdapterResult<Self> {
		match settings.adapter {
			AdapterSettings::Formula {
				base_fee,
				per_gram,
				delivery_days,
				same_city_days,
			} => Ok(Self::new(
				settings.courier(),
				base_fee,
				per_gram,
				delivery_days,
				same_city_days,
			)),
			_ => Err(AdapterError::Config {
				reason: format!("courier '{}' is not a formula courier", settings.id),
			}),
		}
	}

	fn price_for(&self, weight_grams: f64) -> u64 {
		self.base_fee + (self.per_gram * weight_grams).round() as u64
	}
}

#[async_trait]
impl CourierAdapter for FormulaAdapter {
	fn courier_info(&self) -> &Courier {
		&self.courier
	}

	async fn get_quote(&self, payload: &CourierPayload) -> CourierQuote {
		let delivery_days = if payload.is_same_city() {
			self.same_city_days
		} else {
			self.delivery_days
		};

		CourierQuote::available(
			self.id(),
			self.name(),
			self.price_for(payload.weight_grams),
			delivery_days,
		)
	}
}
