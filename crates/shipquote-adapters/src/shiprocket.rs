//! Shiprocket adapter
//!
//! Shiprocket is an aggregator itself: one serviceability call returns rates
//! for many underlying carriers, and we surface the cheapest of them. Auth
//! is a login-issued bearer token valid for 24 hours; tokens are kept in a
//! shared [`TokenCache`] with a 23 hour TTL so a token is never presented
//! close to its provider-side expiry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use shipquote_config::ConfigurableValue;
use shipquote_types::{
	AdapterError, AdapterResult, Courier, CourierAdapter, CourierPayload, CourierQuote,
	SecretString, ShipmentPayload, ShipmentResponse,
};
use tracing::{debug, warn};

use crate::client_cache::{ClientCache, ClientKey};
use crate::money::{json_number, rupees_to_paise};
use crate::token_cache::TokenCache;

const TOKEN_TTL: Duration = Duration::from_secs(23 * 60 * 60);

#[derive(Debug)]
pub struct ShiprocketAdapter {
	courier: Courier,
	endpoint: String,
	email: ConfigurableValue,
	password: ConfigurableValue,
	clients: ClientCache,
	tokens: TokenCache,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
	token: String,
}

impl ShiprocketAdapter {
	pub fn new(
		courier: Courier,
		endpoint: String,
		email: ConfigurableValue,
		password: ConfigurableValue,
		clients: ClientCache,
		tokens: TokenCache,
	) -> Self {
		Self {
			courier,
			endpoint,
			email,
			password,
			clients,
			tokens,
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

	/// Returns a cached bearer token, logging in only when the cache misses.
	/// A failed login is not cached, so the next call retries from scratch.
	async fn bearer_token(&self) -> AdapterResult<SecretString> {
		if let Some(token) = self.tokens.get(self.id()) {
			return Ok(token);
		}

		let email = self.credential(&self.email, "email")?;
		let password = self.credential(&self.password, "password")?;
		let client = self.client()?;
		let url = format!("{}/v1/external/auth/login", self.endpoint);

		debug!(courier = self.id(), "logging in to Shiprocket");

		let response = client
			.post(&url)
			.json(&serde_json::json!({
				"email": email.expose_secret(),
				"password": password.expose_secret(),
			}))
			.send()
			.await?;

		let status = response.status();
		if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
			return Err(AdapterError::AuthenticationFailed {
				courier_id: self.id().to_string(),
			});
		}
		if !status.is_success() {
			return Err(AdapterError::status(status.as_u16(), "Shiprocket login"));
		}

		let login: LoginResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Shiprocket login body: {}", e),
				})?;

		let token = SecretString::new(login.token);
		self.tokens.store(self.id(), token.clone(), TOKEN_TTL);
		Ok(token)
	}

	async fn fetch_quote(&self, payload: &CourierPayload) -> AdapterResult<CourierQuote> {
		let token = self.bearer_token().await?;
		let client = self.client()?;
		let url = format!("{}/v1/external/courier/serviceability/", self.endpoint);
		let weight_kg = payload.weight_grams / 1000.0;

		let response = client
			.get(&url)
			.query(&[
				("pickup_postcode", payload.origin_pincode.as_str()),
				("delivery_postcode", payload.destination_pincode.as_str()),
				("weight", &weight_kg.to_string()),
				("cod", "0"),
			])
			.bearer_auth(token.expose_secret())
			.send()
			.await?;

		let status = response.status();
		if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
			return Err(AdapterError::AuthenticationFailed {
				courier_id: self.id().to_string(),
			});
		}
		if !status.is_success() {
			return Err(AdapterError::status(
				status.as_u16(),
				"Shiprocket serviceability",
			));
		}

		let body: serde_json::Value = response.json().await?;
		self.cheapest_company(&body)
	}

	/// Picks the lowest positive rate among the returned carrier companies.
	/// Entries with a missing, zero or unparseable rate are skipped; rate and
	/// day fields arrive as numbers or numeric strings depending on carrier.
	fn cheapest_company(&self, body: &serde_json::Value) -> AdapterResult<CourierQuote> {
		let companies = body
			.pointer("/data/available_courier_companies")
			.and_then(|c| c.as_array())
			.ok_or_else(|| AdapterError::InvalidResponse {
				reason: "Shiprocket serviceability body has no courier list".to_string(),
			})?;

		let mut best: Option<(u64, u32, String)> = None;
		for company in companies {
			let rate = company.get("rate").and_then(json_number);
			let days = company
				.get("estimated_delivery_days")
				.and_then(json_number)
				.map(|d| d.max(1.0) as u32);
			let name = company
				.get("courier_name")
				.and_then(|n| n.as_str())
				.unwrap_or(self.name());

			let (Some(rate), Some(days)) = (rate, days) else {
				continue;
			};
			let Some(price) = rupees_to_paise(rate) else {
				continue;
			};

			match &best {
				Some((best_price, _, _)) if price >= *best_price => {},
				_ => best = Some((price, days, name.to_string())),
			}
		}

		let (price, days, name) = best.ok_or_else(|| AdapterError::NoRates {
			courier_id: self.id().to_string(),
		})?;

		// Surface the underlying carrier in the display name
		Ok(CourierQuote::available(
			self.id(),
			format!("{} ({})", self.name(), name),
			price,
			days,
		))
	}
}

#[async_trait]
impl CourierAdapter for ShiprocketAdapter {
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

	async fn create_shipment(&self, payload: &ShipmentPayload) -> AdapterResult<ShipmentResponse> {
		let token = self.bearer_token().await?;
		let client = self.client()?;
		let url = format!("{}/v1/external/orders/create/adhoc", self.endpoint);

		let body = serde_json::json!({
			"order_id": payload.order_id,
			"order_date": shipquote_types::chrono::Utc::now().format("%Y-%m-%d").to_string(),
			"billing_customer_name": payload.delivery_address.name,
			"billing_address": payload.delivery_address.line1,
			"billing_city": payload.delivery_address.city,
			"billing_pincode": payload.delivery_address.pincode,
			"billing_state": payload.delivery_address.state,
			"billing_country": "India",
			"billing_phone": payload.delivery_address.phone,
			"shipping_is_billing": true,
			"order_items": payload
				.items
				.iter()
				.map(|i| {
					serde_json::json!({
						"name": i.name,
						"units": i.quantity,
						"selling_price": i.price as f64 / 100.0,
					})
				})
				.collect::<Vec<_>>(),
			"payment_method": match payload.payment_method {
				shipquote_types::PaymentMethod::Prepaid => "Prepaid",
				shipquote_types::PaymentMethod::Cod => "COD",
			},
			"sub_total": payload.amount as f64 / 100.0,
			"weight": payload.weight_grams / 1000.0,
			"length": 10,
			"breadth": 10,
			"height": 5,
		});

		let response = client
			.post(&url)
			.bearer_auth(token.expose_secret())
			.json(&body)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::status(
				status.as_u16(),
				"Shiprocket order creation",
			));
		}

		let created: serde_json::Value = response.json().await?;
		let tracking_id = created
			.get("shipment_id")
			.map(|id| match id {
				serde_json::Value::String(s) => s.clone(),
				other => other.to_string(),
			})
			.ok_or_else(|| AdapterError::InvalidResponse {
				reason: "Shiprocket creation returned no shipment_id".to_string(),
			})?;

		Ok(ShipmentResponse {
			tracking_id,
			courier_name: self.name().to_string(),
			label_url: None,
			estimated_delivery: None,
		})
	}

	async fn track_shipment(&self, tracking_id: &str) -> AdapterResult<serde_json::Value> {
		let token = self.bearer_token().await?;
		let client = self.client()?;
		let url = format!(
			"{}/v1/external/courier/track/shipment/{}",
			self.endpoint, tracking_id
		);

		let response = client
			.get(&url)
			.bearer_auth(token.expose_secret())
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::status(status.as_u16(), "Shiprocket tracking"));
		}

		Ok(response.json().await?)
	}
}
