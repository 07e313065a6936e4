//! Bluedart adapter
//!
//! HTTP Basic auth on every call, single-rate transit response. Bluedart is
//! quote-and-track only here; booking goes through their offline channel, so
//! the shipment creation operations keep their unsupported defaults.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use shipquote_config::ConfigurableValue;
use shipquote_types::{
	AdapterError, AdapterResult, Courier, CourierAdapter, CourierPayload, CourierQuote,
	SecretString,
};
use tracing::{debug, warn};

use crate::client_cache::{ClientCache, ClientKey};
use crate::money::rupees_to_paise;

#[derive(Debug)]
pub struct BluedartAdapter {
	courier: Courier,
	endpoint: String,
	username: ConfigurableValue,
	password: ConfigurableValue,
	clients: ClientCache,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BluedartRate {
	net_charge: f64,
	transit_days: u32,
}

impl BluedartAdapter {
	pub fn new(
		courier: Courier,
		endpoint: String,
		username: ConfigurableValue,
		password: ConfigurableValue,
		clients: ClientCache,
	) -> Self {
		Self {
			courier,
			endpoint,
			username,
			password,
			clients,
		}
	}

	fn client(&self) -> AdapterResult<Arc<reqwest::Client>> {
		self.clients
			.get_client(&ClientKey::new(self.id(), &self.endpoint))
	}

	fn credential(&self, value: &ConfigurableValue, which: &str) -> AdapterResult<SecretString> {
		value
			.resolve_secret()
			.map_err(|e| AdapterError::MissingCredentials {
				courier_id: self.id().to_string(),
				detail: format!("{}: {}", which, e),
			})
	}

	async fn fetch_quote(&self, payload: &CourierPayload) -> AdapterResult<CourierQuote> {
		let username = self.credential(&self.username, "username")?;
		let password = self.credential(&self.password, "password")?;
		let client = self.client()?;
		let url = format!("{}/transit/v1/rates", self.endpoint);

		debug!(
			courier = self.id(),
			origin = %payload.origin_pincode,
			destination = %payload.destination_pincode,
			"fetching Bluedart rate"
		);

		let response = client
			.get(&url)
			.query(&[
				("originPincode", payload.origin_pincode.as_str()),
				("destinationPincode", payload.destination_pincode.as_str()),
				("weightGrams", &payload.weight_grams.ceil().to_string()),
			])
			.basic_auth(
				username.expose_secret(),
				Some(password.expose_secret()),
			)
			.send()
			.await?;

		let status = response.status();
		if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
			return Err(AdapterError::AuthenticationFailed {
				courier_id: self.id().to_string(),
			});
		}
		if !status.is_success() {
			return Err(AdapterError::status(status.as_u16(), "Bluedart rates"));
		}

		let rate: BluedartRate =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Bluedart rates body: {}", e),
				})?;

		let price = rupees_to_paise(rate.net_charge).ok_or_else(|| AdapterError::NoRates {
			courier_id: self.id().to_string(),
		})?;

		Ok(CourierQuote::available(
			self.id(),
			self.name(),
			price,
			rate.transit_days.max(1),
		))
	}
}

#[async_trait]
impl CourierAdapter for BluedartAdapter {
	fn courier_info(&self) -> &Courier {
		&self.courier
	}

	async fn get_quote(&self, payload: &CourierPayload) -> CourierQuote {
		match self.fetch_quote(payload).await {
			Ok(quote) => quote,
			Err(e) if e.is_not_serviceable() => {
				debug!(courier = self.id(), "route not serviceable: {}", e);
				CourierQuote::unavailable(self.id(), self.name())
			},
			Err(e) => {
				warn!(courier = self.id(), "quote fetch failed: {}", e);
				CourierQuote::unavailable(self.id(), self.name())
			},
		}
	}

	async fn track_shipment(&self, tracking_id: &str) -> AdapterResult<serde_json::Value> {
		let username = self.credential(&self.username, "username")?;
		let password = self.credential(&self.password, "password")?;
		let client = self.client()?;
		let url = format!("{}/tracking/v1/shipments/{}", self.endpoint, tracking_id);

		let response = client
			.get(&url)
			.basic_auth(
				username.expose_secret(),
				Some(password.expose_secret()),
			)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::status(status.as_u16(), "Bluedart tracking"));
		}

		Ok(response.json().await?)
	}
}
