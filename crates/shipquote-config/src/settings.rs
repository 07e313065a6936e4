//! Configuration settings structures

use serde::{Deserialize, Serialize};
use shipquote_types::{Courier, StoreConfig};
use std::collections::BTreeMap;

use crate::configurable_value::ConfigurableValue;

/// Main application settings
///
/// Store and courier lists are ordered: registration order drives the
/// deterministic encounter order used for ranking tie-breaks, so these are
/// vectors, not maps.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub server: ServerSettings,
	pub stores: Vec<StoreSettings>,
	pub couriers: Vec<CourierSettings>,
	pub weight: WeightSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// One shipping-origin store
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreSettings {
	pub id: String,
	pub name: String,
	pub pincode: String,
	pub enabled: bool,
}

impl From<&StoreSettings> for StoreConfig {
	fn from(settings: &StoreSettings) -> Self {
		StoreConfig::new(
			settings.id.clone(),
			settings.name.clone(),
			settings.pincode.clone(),
			settings.enabled,
		)
	}
}

/// One courier integration instance
///
/// The same adapter type can appear twice with distinct ids, e.g. Delhivery
/// registered once per service tier (surface and express).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CourierSettings {
	pub id: String,
	pub name: String,
	pub enabled: bool,
	/// Base URL for live integrations; formula couriers have none
	pub endpoint: Option<String>,
	pub adapter: AdapterSettings,
}

impl CourierSettings {
	pub fn courier(&self) -> Courier {
		Courier::new(self.id.clone(), self.name.clone(), self.enabled)
	}
}

/// Which integration backs a courier, with its pricing/auth parameters
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AdapterSettings {
	/// Deterministic linear pricing for carriers without a live integration
	Formula {
		/// Fixed base fee in the smallest currency unit
		base_fee: u64,
		/// Price per gram in the smallest currency unit
		per_gram: f64,
		delivery_days: u32,
		/// Shorter estimate when origin pincode equals destination pincode
		same_city_days: u32,
	},
	/// Delhivery: static API key in a request header, per-tier instances
	Delhivery {
		mode: DelhiveryMode,
		api_key: ConfigurableValue,
	},
	/// Shiprocket: login call issuing a short-lived bearer token
	Shiprocket {
		email: ConfigurableValue,
		password: ConfigurableValue,
	},
	/// Bluedart: HTTP Basic auth from env-configured credentials
	Bluedart {
		username: ConfigurableValue,
		password: ConfigurableValue,
	},
}

/// Delhivery service tier
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DelhiveryMode {
	Surface,
	Express,
}

/// Weight-engine lookup tables
///
/// BTreeMaps keep the options endpoint's dump stable across runs.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeightSettings {
	/// Grams per sheet at the reference paper density, keyed by page size
	pub base_weights: BTreeMap<String, f64>,
	/// Multiplier applied for a paper density, keyed by gsm value
	pub gsm_multipliers: BTreeMap<String, f64>,
	/// Added grams per binding type
	pub binding_weights: BTreeMap<String, f64>,
	/// Added grams per packaging type
	pub packaging_weights: BTreeMap<String, f64>,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings {
				host: "0.0.0.0".to_string(),
				port: 3000,
			},
			stores: vec![
				StoreSettings {
					id: "mumbai".to_string(),
					name: "Lower Parel Press".to_string(),
					pincode: "400013".to_string(),
					enabled: true,
				},
				StoreSettings {
					id: "delhi".to_string(),
					name: "Daryaganj Press".to_string(),
					pincode: "110002".to_string(),
					enabled: true,
				},
				StoreSettings {
					id: "bengaluru".to_string(),
					name: "Chickpet Press".to_string(),
					pincode: "560053".to_string(),
					enabled: false,
				},
			],
			couriers: default_couriers(),
			weight: default_weight_settings(),
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
		}
	}
}

fn default_couriers() -> Vec<CourierSettings> {
	vec![
		CourierSettings {
			id: "delhivery-surface".to_string(),
			name: "Delhivery Surface".to_string(),
			enabled: true,
			endpoint: Some("https://track.delhivery.com".to_string()),
			adapter: AdapterSettings::Delhivery {
				mode: DelhiveryMode::Surface,
				api_key: ConfigurableValue::from_env("DELHIVERY_API_KEY"),
			},
		},
		CourierSettings {
			id: "delhivery-express".to_string(),
			name: "Delhivery Express".to_string(),
			enabled: true,
			endpoint: Some("https://track.delhivery.com".to_string()),
			adapter: AdapterSettings::Delhivery {
				mode: DelhiveryMode::Express,
				api_key: ConfigurableValue::from_env("DELHIVERY_API_KEY"),
			},
		},
		CourierSettings {
			id: "shiprocket".to_string(),
			name: "Shiprocket".to_string(),
			enabled: true,
			endpoint: Some("https://apiv2.shiprocket.in".to_string()),
			adapter: AdapterSettings::Shiprocket {
				email: ConfigurableValue::from_env("SHIPROCKET_EMAIL"),
				password: ConfigurableValue::from_env("SHIPROCKET_PASSWORD"),
			},
		},
		CourierSettings {
			id: "bluedart".to_string(),
			name: "Bluedart".to_string(),
			enabled: true,
			endpoint: Some("https://apigateway.bluedart.com".to_string()),
			adapter: AdapterSettings::Bluedart {
				username: ConfigurableValue::from_env("BLUEDART_USERNAME"),
				password: ConfigurableValue::from_env("BLUEDART_PASSWORD"),
			},
		},
		CourierSettings {
			id: "indiapost-speed".to_string(),
			name: "India Post Speed Post".to_string(),
			enabled: true,
			endpoint: None,
			adapter: AdapterSettings::Formula {
				base_fee: 4000,
				per_gram: 3.0,
				delivery_days: 5,
				same_city_days: 3,
			},
		},
		CourierSettings {
			id: "dtdc".to_string(),
			name: "DTDC".to_string(),
			enabled: true,
			endpoint: None,
			adapter: AdapterSettings::Formula {
				base_fee: 4500,
				per_gram: 3.5,
				delivery_days: 4,
				same_city_days: 2,
			},
		},
		CourierSettings {
			id: "xpressbees".to_string(),
			name: "Xpressbees".to_string(),
			enabled: true,
			endpoint: None,
			adapter: AdapterSettings::Formula {
				base_fee: 5000,
				per_gram: 4.0,
				delivery_days: 3,
				same_city_days: 2,
			},
		},
		CourierSettings {
			id: "ecom-express".to_string(),
			name: "Ecom Express".to_string(),
			enabled: true,
			endpoint: None,
			adapter: AdapterSettings::Formula {
				base_fee: 5500,
				per_gram: 4.2,
				delivery_days: 3,
				same_city_days: 1,
			},
		},
	]
}

fn default_weight_settings() -> WeightSettings {
	let table = |pairs: &[(&str, f64)]| {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), *v))
			.collect::<BTreeMap<String, f64>>()
	};

	WeightSettings {
		base_weights: table(&[("A5", 2.5), ("A4", 5.0), ("A3", 8.0), ("Letter", 4.8)]),
		gsm_multipliers: table(&[("70", 0.9), ("80", 1.0), ("100", 1.25), ("130", 1.6)]),
		binding_weights: table(&[
			("none", 0.0),
			("staple", 10.0),
			("spiral", 120.0),
			("perfect", 200.0),
			("hardbound", 350.0),
		]),
		packaging_weights: table(&[
			("envelope", 50.0),
			("standard", 150.0),
			("reinforced", 300.0),
			("box", 400.0),
		]),
	}
}

impl Settings {
	/// Server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Enabled stores only, in configuration order
	pub fn enabled_stores(&self) -> Vec<StoreConfig> {
		self.stores
			.iter()
			.filter(|s| s.enabled)
			.map(StoreConfig::from)
			.collect()
	}

	/// Enabled couriers only, in configuration order
	pub fn enabled_couriers(&self) -> Vec<Courier> {
		self.couriers
			.iter()
			.filter(|c| c.enabled)
			.map(CourierSettings::courier)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_cover_all_adapter_families() {
		let settings = Settings::default();
		assert_eq!(settings.couriers.len(), 8);

		let formula = settings
			.couriers
			.iter()
			.filter(|c| matches!(c.adapter, AdapterSettings::Formula { .. }))
			.count();
		assert_eq!(formula, 4);

		// Delhivery appears once per service tier with distinct ids
		let delhivery: Vec<_> = settings
			.couriers
			.iter()
			.filter(|c| matches!(c.adapter, AdapterSettings::Delhivery { .. }))
			.collect();
		assert_eq!(delhivery.len(), 2);
		assert_ne!(delhivery[0].id, delhivery[1].id);
	}

	#[test]
	fn enabled_filters_preserve_order() {
		let settings = Settings::default();
		let stores = settings.enabled_stores();
		assert_eq!(stores.len(), 2);
		assert_eq!(stores[0].id, "mumbai");
		assert_eq!(stores[1].id, "delhi");

		let couriers = settings.enabled_couriers();
		assert_eq!(couriers.first().map(|c| c.id.clone()).as_deref(), Some("delhivery-surface"));
	}

	#[test]
	fn weight_tables_contain_published_options() {
		let weight = Settings::default().weight;
		assert_eq!(weight.base_weights.get("A4"), Some(&5.0));
		assert_eq!(weight.gsm_multipliers.get("80"), Some(&1.0));
		assert_eq!(weight.binding_weights.get("spiral"), Some(&120.0));
		assert_eq!(weight.packaging_weights.get("standard"), Some(&150.0));
	}

	#[test]
	fn courier_settings_deserialize_from_toml() {
		let toml = r#"
			id = "dtdc"
			name = "DTDC"
			enabled = true

			[adapter]
			type = "formula"
			base_fee = 4500
			per_gram = 3.5
			delivery_days = 4
			same_city_days = 2
		"#;

		let parsed: CourierSettings = toml_from_str(toml);
		assert_eq!(parsed.id, "dtdc");
		assert!(matches!(
			parsed.adapter,
			AdapterSettings::Formula { base_fee: 4500, .. }
		));
	}

	// Settings are normally loaded through the `config` crate; json is the
	// lowest-dependency way to exercise the serde shapes in unit tests.
	fn toml_from_str(input: &str) -> CourierSettings {
		let value: serde_json::Value = {
			let cfg = config::Config::builder()
				.add_source(config::File::from_str(input, config::FileFormat::Toml))
				.build()
				.unwrap();
			cfg.try_deserialize().unwrap()
		};
		serde_json::from_value(value).unwrap()
	}
}
