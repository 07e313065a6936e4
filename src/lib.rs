//! Shipquote Aggregator Library
//!
//! A multi-courier, multi-store shipping-rate aggregator for print-shop
//! orders: quote aggregation, print-job weight calculation, and shipment
//! booking behind a small HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

// Core domain types
pub use shipquote_types::{
	chrono,
	serde_json,
	AdapterError,
	AdapterResult,
	AggregatedResult,
	Courier,
	CourierAdapter,
	CourierPayload,
	CourierQuote,
	QuoteRequest,
	QuoteValidationError,
	ShipmentPayload,
	ShipmentResponse,
	ShippingOption,
	StoreConfig,
};

// Service layer
pub use shipquote_service::{
	calculate_weight, calculate_weight_lenient, AggregatorService, PrintSide, ShipmentError,
	ShipmentService, WeightError, WeightInput, WeightResult,
};

// API layer
pub use shipquote_api::{create_router, AppState, QuoteOptionsResponse};

// Adapters
pub use shipquote_adapters::{AdapterRegistry, ClientCache, FormulaAdapter, TokenCache};

// Config
pub use shipquote_config::{load_config, log_startup_complete, log_startup_summary, Settings};

// Module aliases for direct access to the member crates
pub mod models {
	pub use shipquote_types::*;
}

pub mod config {
	pub use shipquote_config::*;
}

pub mod adapters {
	pub use shipquote_adapters::*;
}

pub mod api {
	pub use shipquote_api::*;
}

pub mod service {
	pub use shipquote_service::*;
}

pub mod mocks;

// Re-export external dependencies for downstream adapter implementations
pub use async_trait;

/// Builder pattern for configuring the aggregator
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	extra_adapters: Vec<Arc<dyn CourierAdapter>>,
}

impl Default for AggregatorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl AggregatorBuilder {
	pub fn new() -> Self {
		Self {
			settings: None,
			extra_adapters: Vec::new(),
		}
	}

	/// Set custom settings instead of loading from the config file
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Register a custom courier adapter alongside the configured ones
	pub fn with_adapter(mut self, adapter: Arc<dyn CourierAdapter>) -> Self {
		self.extra_adapters.push(adapter);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use shipquote_config::LogFormat;

		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));

		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
		}

		Ok(())
	}

	/// Build the services and return the configured router with state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.clone().unwrap_or_default();

		let mut registry = AdapterRegistry::from_settings(
			&settings.couriers,
			ClientCache::new(),
			TokenCache::new(),
		)?;
		for adapter in self.extra_adapters {
			registry.register(adapter)?;
		}
		let registry = Arc::new(registry);

		let stores: Vec<StoreConfig> = settings.stores.iter().map(StoreConfig::from).collect();
		info!(
			stores = stores.len(),
			couriers = registry.len(),
			"aggregator initialized"
		);

		let aggregator_service = Arc::new(AggregatorService::new(
			stores,
			Arc::clone(&registry),
			settings.weight.clone(),
		));
		let shipment_service = Arc::new(ShipmentService::new(Arc::clone(&registry)));
		let quote_options = Arc::new(QuoteOptionsResponse::from_settings(&settings));

		let app_state = AppState {
			aggregator_service,
			shipment_service,
			quote_options,
		};

		let router = create_router().with_state(app_state.clone());
		Ok((router, app_state))
	}

	/// Start the complete server: .env loading, configuration, tracing,
	/// and binding the listener
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config().unwrap_or_default(),
		};

		self.init_tracing_from_settings(&settings)?;
		log_startup_summary(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;
		log_startup_complete(&bind_addr);

		axum::serve(listener, app).await?;
		Ok(())
	}
}
