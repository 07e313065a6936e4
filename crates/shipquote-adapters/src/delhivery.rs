//! Delhivery adapter
//!
//! Static API-key auth (`Authorization: Token <key>` on every request).
//! Registered once per service tier — surface and express share the code
//! but carry distinct courier ids, endpoints queried with a different mode
//! flag and different delivery estimates.

use async_trait::async_trait;
use serde::Deserialize;
use shipquote_config::{ConfigurableValue, DelhiveryMode};
use shipquote_types::{
	AdapterError, AdapterResult, CancelResponse, Courier, CourierAdapter, CourierPayload,
	CourierQuote, LabelResponse, SecretString, ShipmentPayload, ShipmentResponse,
};
use tracing::{debug, warn};

use crate::client_cache::{ClientCache, ClientKey};
use crate::money::rupees_to_paise;

#[derive(Debug)]
pub struct DelhiveryAdapter {
	courier: Courier,
	mode: DelhiveryMode,
	endpoint: String,
	api_key: ConfigurableValue,
	clients: ClientCache,
}

/// One entry of the freight-charge response
#[derive(Debug, Deserialize)]
struct DelhiveryCharge {
	total_amount: f64,
}

#[derive(Debug, Deserialize)]
struct DelhiveryPackage {
	waybill: String,
	#[serde(default)]
	status: Option<String>,
	#[serde(default)]
	pdf_download_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DelhiveryPackagesResponse {
	packages: Vec<DelhiveryPackage>,
}

impl DelhiveryAdapter {
	pub fn new(
		courier: Courier,
		mode: DelhiveryMode,
		endpoint: String,
		api_key: ConfigurableValue,
		clients: ClientCache,
	) -> Self {
		Self {
			courier,
			mode,
			endpoint,
			api_key,
			clients,
		}
	}

	fn mode_code(&self) -> &'static str {
		match self.mode {
			DelhiveryMode::Surface => "S",
			DelhiveryMode::Express => "E",
		}
	}

	fn delivery_days(&self, same_city: bool) -> u32 {
		match (self.mode, same_city) {
			(DelhiveryMode::Surface, false) => 5,
			(DelhiveryMode::Surface, true) => 2,
			(DelhiveryMode::Express, false) => 2,
			(DelhiveryMode::Express, true) => 1,
		}
	}

	/// Credentials are resolved per call, so a missing env var degrades to
	/// an unavailable quote instead of failing startup
	fn api_key(&self) -> AdapterResult<SecretString> {
		self.api_key
			.resolve_secret()
			.map_err(|e| AdapterError::MissingCredentials {
				courier_id: self.id().to_string(),
				detail: e.to_string(),
			})
	}

	fn client(&self) -> AdapterResult<std::sync::Arc<reqwest::Client>> {
		self.clients
			.get_client(&ClientKey::new(self.id(), &self.endpoint))
	}

	async fn fetch_quote(&self, payload: &CourierPayload) -> AdapterResult<CourierQuote> {
		let api_key = self.api_key()?;
		let client = self.client()?;
		let url = format!("{}/api/kinko/v1/invoice/charges/.json", self.endpoint);
		let weight = payload.weight_grams.ceil() as u64;

		debug!(
			courier = self.id(),
			origin = %payload.origin_pincode,
			destination = %payload.destination_pincode,
			weight_grams = weight,
			"fetching Delhivery freight charge"
		);

		let response = client
			.get(&url)
			.query(&[
				("md", self.mode_code()),
				("ss", "Delivered"),
				("o_pin", payload.origin_pincode.as_str()),
				("d_pin", payload.destination_pincode.as_str()),
				("cgm", &weight.to_string()),
			])
			.header(
				"Authorization",
				format!("Token {}", api_key.expose_secret()),
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
			return Err(AdapterError::status(
				status.as_u16(),
				"Delhivery charges endpoint",
			));
		}

		let charges: Vec<DelhiveryCharge> =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Delhivery charges body: {}", e),
				})?;

		let price = charges
			.first()
			.and_then(|c| rupees_to_paise(c.total_amount))
			.ok_or_else(|| AdapterError::NoRates {
				courier_id: self.id().to_string(),
			})?;

		Ok(CourierQuote::available(
			self.id(),
			self.name(),
			price,
			self.delivery_days(payload.is_same_city()),
		))
	}
}

#[async_trait]
impl CourierAdapter for DelhiveryAdapter {
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
		let api_key = self.api_key()?;
		let client = self.client()?;
		let url = format!("{}/api/cmu/create.json", self.endpoint);

		let body = serde_json::json!({
			"pickup_location": {
				"name": payload.pickup_address.name,
				"add": payload.pickup_address.line1,
				"city": payload.pickup_address.city,
				"pin_code": payload.pickup_address.pincode,
				"phone": payload.pickup_address.phone,
			},
			"shipments": [{
				"order": payload.order_id,
				"name": payload.delivery_address.name,
				"add": payload.delivery_address.line1,
				"city": payload.delivery_address.city,
				"state": payload.delivery_address.state,
				"pin": payload.delivery_address.pincode,
				"phone": payload.delivery_address.phone,
				"payment_mode": match payload.payment_method {
					shipquote_types::PaymentMethod::Prepaid => "Prepaid",
					shipquote_types::PaymentMethod::Cod => "COD",
				},
				"cod_amount": payload.amount,
				"weight": payload.weight_grams,
				"products_desc": payload
					.items
					.iter()
					.map(|i| i.name.as_str())
					.collect::<Vec<_>>()
					.join(", "),
			}],
		});

		let response = client
			.post(&url)
			.header(
				"Authorization",
				format!("Token {}", api_key.expose_secret()),
			)
			.json(&body)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::status(
				status.as_u16(),
				"Delhivery shipment creation",
			));
		}

		let created: DelhiveryPackagesResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Delhivery creation body: {}", e),
				})?;

		let package = created
			.packages
			.first()
			.ok_or_else(|| AdapterError::InvalidResponse {
				reason: "Delhivery creation returned no packages".to_string(),
			})?;

		if package.status.as_deref() == Some("Fail") {
			return Err(AdapterError::InvalidResponse {
				reason: format!("Delhivery rejected waybill {}", package.waybill),
			});
		}

		Ok(ShipmentResponse {
			tracking_id: package.waybill.clone(),
			courier_name: self.name().to_string(),
			label_url: None,
			estimated_delivery: None,
		})
	}

	async fn cancel_shipment(
		&self,
		tracking_id: &str,
		_order_id: Option<&str>,
	) -> AdapterResult<CancelResponse> {
		let api_key = self.api_key()?;
		let client = self.client()?;
		let url = format!("{}/api/p/edit", self.endpoint);

		let response = client
			.post(&url)
			.header(
				"Authorization",
				format!("Token {}", api_key.expose_secret()),
			)
			.json(&serde_json::json!({
				"waybill": tracking_id,
				"cancellation": "true",
			}))
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::status(status.as_u16(), "Delhivery cancel"));
		}

		let body: serde_json::Value = response.json().await?;
		let success = body
			.get("status")
			.and_then(|s| s.as_bool())
			.unwrap_or(false);

		Ok(CancelResponse {
			success,
			message: body
				.get("remark")
				.and_then(|r| r.as_str())
				.map(str::to_string),
		})
	}

	async fn get_label(
		&self,
		tracking_id: &str,
		_order_id: Option<&str>,
	) -> AdapterResult<LabelResponse> {
		let api_key = self.api_key()?;
		let client = self.client()?;
		let url = format!("{}/api/p/packing_slip", self.endpoint);

		let response = client
			.get(&url)
			.query(&[("wbns", tracking_id)])
			.header(
				"Authorization",
				format!("Token {}", api_key.expose_secret()),
			)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::status(status.as_u16(), "Delhivery label"));
		}

		let body: DelhiveryPackagesResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Delhivery label body: {}", e),
				})?;

		body.packages
			.first()
			.and_then(|p| p.pdf_download_link.clone())
			.map(|label_url| LabelResponse { label_url })
			.ok_or_else(|| AdapterError::InvalidResponse {
				reason: format!("no label available for waybill {}", tracking_id),
			})
	}

	async fn track_shipment(&self, tracking_id: &str) -> AdapterResult<serde_json::Value> {
		let api_key = self.api_key()?;
		let client = self.client()?;
		let url = format!("{}/api/v1/packages/json/", self.endpoint);

		let response = client
			.get(&url)
			.query(&[("waybill", tracking_id)])
			.header(
				"Authorization",
				format!("Token {}", api_key.expose_secret()),
			)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::status(status.as_u16(), "Delhivery tracking"));
		}

		Ok(response.json().await?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn adapter(mode: DelhiveryMode) -> DelhiveryAdapter {
		let id = match mode {
			DelhiveryMode::Surface => "delhivery-surface",
			DelhiveryMode::Express => "delhivery-express",
		};
		DelhiveryAdapter::new(
			Courier::new(id, "Delhivery", true),
			mode,
			"https://track.delhivery.com".to_string(),
			ConfigurableValue::from_plain("test-key"),
			ClientCache::new(),
		)
	}

	#[test]
	fn mode_codes_differ_per_tier() {
		assert_eq!(adapter(DelhiveryMode::Surface).mode_code(), "S");
		assert_eq!(adapter(DelhiveryMode::Express).mode_code(), "E");
	}

	#[test]
	fn express_is_faster_than_surface() {
		let surface = adapter(DelhiveryMode::Surface);
		let express = adapter(DelhiveryMode::Express);
		assert!(express.delivery_days(false) < surface.delivery_days(false));
		assert!(surface.delivery_days(true) < surface.delivery_days(false));
	}

	#[tokio::test]
	async fn missing_credentials_degrade_to_unavailable() {
		let adapter = DelhiveryAdapter::new(
			Courier::new("delhivery-surface", "Delhivery Surface", true),
			DelhiveryMode::Surface,
			"https://track.delhivery.com".to_string(),
			ConfigurableValue::from_env("DELHIVERY_KEY_THAT_IS_NOT_SET"),
			ClientCache::new(),
		);

		let quote = adapter
			.get_quote(&CourierPayload::new("400013", "110001", 500.0))
			.await;
		assert!(!quote.available);
		assert_eq!(quote.price, 0);
	}
}
