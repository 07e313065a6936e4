//! Courier adapter implementations and registry
//!
//! Each courier integration lives behind the [`CourierAdapter`] trait from
//! `shipquote-types`. The registry holds adapters in configuration order and
//! that order is what makes quote ranking ties deterministic, so it is a
//! `Vec`, not a map.

pub mod bluedart;
pub mod client_cache;
pub mod delhivery;
pub mod formula;
mod money;
pub mod shiprocket;
pub mod token_cache;

pub use bluedart::BluedartAdapter;
pub use client_cache::{ClientCache, ClientKey};
pub use delhivery::DelhiveryAdapter;
pub use formula::FormulaAdapter;
pub use shiprocket::ShiprocketAdapter;
pub use token_cache::TokenCache;

use std::sync::Arc;

use shipquote_config::{AdapterSettings, CourierSettings};
use shipquote_types::{AdapterError, AdapterResult, CourierAdapter};
use tracing::info;

/// Ordered collection of registered courier adapters
#[derive(Debug, Default)]
pub struct AdapterRegistry {
	adapters: Vec<Arc<dyn CourierAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a registry from courier configuration, sharing one HTTP client
	/// cache and one token cache across all live adapters.
	///
	/// Disabled couriers are registered too (so lookups can tell "disabled"
	/// from "unknown") but never participate in aggregation. Credentials are
	/// not resolved here; a courier with a missing env var still registers.
	pub fn from_settings(
		couriers: &[CourierSettings],
		clients: ClientCache,
		tokens: TokenCache,
	) -> AdapterResult<Self> {
		let mut registry = Self::new();
		for settings in couriers {
			let adapter: Arc<dyn CourierAdapter> = match &settings.adapter {
				AdapterSettings::Formula { .. } => {
					Arc::new(FormulaAdapter::from_settings(settings)?)
				},
				AdapterSettings::Delhivery { mode, api_key } => Arc::new(DelhiveryAdapter::new(
					settings.courier(),
					*mode,
					required_endpoint(settings)?,
					api_key.clone(),
					clients.clone(),
				)),
				AdapterSettings::Shiprocket { email, password } => {
					Arc::new(ShiprocketAdapter::new(
						settings.courier(),
						required_endpoint(settings)?,
						email.clone(),
						password.clone(),
						clients.clone(),
						tokens.clone(),
					))
				},
				AdapterSettings::Bluedart { username, password } => {
					Arc::new(BluedartAdapter::new(
						settings.courier(),
						required_endpoint(settings)?,
						username.clone(),
						password.clone(),
						clients.clone(),
					))
				},
			};
			registry.register(adapter)?;
		}
		info!(count = registry.len(), "courier adapters registered");
		Ok(registry)
	}

	/// Appends an adapter, rejecting duplicate courier ids
	pub fn register(&mut self, adapter: Arc<dyn CourierAdapter>) -> AdapterResult<()> {
		if self.adapters.iter().any(|a| a.id() == adapter.id()) {
			return Err(AdapterError::DuplicateCourier {
				courier_id: adapter.id().to_string(),
			});
		}
		self.adapters.push(adapter);
		Ok(())
	}

	pub fn get(&self, courier_id: &str) -> Option<&Arc<dyn CourierAdapter>> {
		self.adapters.iter().find(|a| a.id() == courier_id)
	}

	/// All adapters in registration order
	pub fn all(&self) -> &[Arc<dyn CourierAdapter>] {
		&self.adapters
	}

	/// Enabled adapters in registration order
	pub fn enabled(&self) -> impl Iterator<Item = &Arc<dyn CourierAdapter>> {
		self.adapters.iter().filter(|a| a.is_enabled())
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

fn required_endpoint(settings: &CourierSettings) -> AdapterResult<String> {
	settings
		.endpoint
		.clone()
		.ok_or_else(|| AdapterError::Config {
			reason: format!("courier '{}' is missing an endpoint", settings.id),
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use shipquote_config::Settings;
	use shipquote_types::Courier;

	fn formula(id: &str, enabled: bool) -> Arc<dyn CourierAdapter> {
		Arc::new(FormulaAdapter::new(
			Courier::new(id, id, enabled),
			4000,
			3.0,
			5,
			3,
		))
	}

	#[test]
	fn register_rejects_duplicate_ids() {
		let mut registry = AdapterRegistry::new();
		registry.register(formula("dtdc", true)).unwrap();

		let err = registry.register(formula("dtdc", true)).unwrap_err();
		assert!(matches!(
			err,
			AdapterError::DuplicateCourier { courier_id } if courier_id == "dtdc"
		));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn enabled_preserves_registration_order() {
		let mut registry = AdapterRegistry::new();
		registry.register(formula("a", true)).unwrap();
		registry.register(formula("b", false)).unwrap();
		registry.register(formula("c", true)).unwrap();

		let ids: Vec<&str> = registry.enabled().map(|a| a.id()).collect();
		assert_eq!(ids, vec!["a", "c"]);
	}

	#[test]
	fn from_settings_builds_all_default_couriers() {
		let settings = Settings::default();
		let registry = AdapterRegistry::from_settings(
			&settings.couriers,
			ClientCache::new(),
			TokenCache::new(),
		)
		.unwrap();

		assert_eq!(registry.len(), settings.couriers.len());
		assert!(registry.get("delhivery-surface").is_some());
		assert!(registry.get("shiprocket").is_some());
		assert!(registry.get("nonexistent").is_none());

		let ids: Vec<&str> = registry.all().iter().map(|a| a.id()).collect();
		let expected: Vec<&str> = settings.couriers.iter().map(|c| c.id.as_str()).collect();
		assert_eq!(ids, expected);
	}

	#[test]
	fn from_settings_requires_endpoint_for_live_couriers() {
		let mut settings = Settings::default();
		for courier in &mut settings.couriers {
			if courier.id == "bluedart" {
				courier.endpoint = None;
			}
		}

		let err = AdapterRegistry::from_settings(
			&settings.couriers,
			ClientCache::new(),
			TokenCache::new(),
		)
		.unwrap_err();
		assert!(matches!(err, AdapterError::Config { .. }));
	}
}
