use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use shipquote_config::Settings;

use crate::state::AppState;

/// Static configuration dump driving client-side weight and courier pickers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteOptionsResponse {
	pub page_sizes: Vec<String>,
	pub gsm_options: Vec<String>,
	pub binding_weights: BTreeMap<String, f64>,
	pub packaging_weights: BTreeMap<String, f64>,
	pub couriers: Vec<CourierOption>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierOption {
	pub id: String,
	pub name: String,
}

impl QuoteOptionsResponse {
	pub fn from_settings(settings: &Settings) -> Self {
		Self {
			page_sizes: settings.weight.base_weights.keys().cloned().collect(),
			gsm_options: settings.weight.gsm_multipliers.keys().cloned().collect(),
			binding_weights: settings.weight.binding_weights.clone(),
			packaging_weights: settings.weight.packaging_weights.clone(),
			couriers: settings
				.enabled_couriers()
				.into_iter()
				.map(|c| CourierOption {
					id: c.id,
					name: c.name,
				})
				.collect(),
		}
	}
}

/// GET /shipping-quote/options - Options for the quote form, no logic
pub async fn get_quote_options(State(state): State<AppState>) -> Json<QuoteOptionsResponse> {
	Json(state.quote_options.as_ref().clone())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn options_reflect_default_settings() {
		let options = QuoteOptionsResponse::from_settings(&Settings::default());

		assert!(options.page_sizes.contains(&"A4".to_string()));
		assert!(options.gsm_options.contains(&"130".to_string()));
		assert_eq!(options.binding_weights.get("spiral"), Some(&120.0));
		assert_eq!(options.packaging_weights.get("reinforced"), Some(&300.0));
		// Disabled couriers never reach the picker
		assert!(options.couriers.iter().all(|c| c.id != "disabled"));
		assert!(options.couriers.iter().any(|c| c.id == "shiprocket"));
	}
}
