//! Startup logging helpers

use tracing::info;

use crate::settings::{AdapterSettings, Settings};

/// Log the effective store/courier configuration at startup
pub fn log_startup_summary(settings: &Settings) {
	let stores = settings.enabled_stores();
	info!("Enabled stores: {}", stores.len());
	for store in &stores {
		info!("  - {} ({}) pincode {}", store.id, store.name, store.pincode);
	}

	let enabled = settings.couriers.iter().filter(|c| c.enabled);
	info!(
		"Enabled couriers: {}",
		settings.couriers.iter().filter(|c| c.enabled).count()
	);
	for courier in enabled {
		let kind = match &courier.adapter {
			AdapterSettings::Formula { .. } => "formula",
			AdapterSettings::Delhivery { .. } => "delhivery",
			AdapterSettings::Shiprocket { .. } => "shiprocket",
			AdapterSettings::Bluedart { .. } => "bluedart",
		};
		match &courier.endpoint {
			Some(endpoint) => info!("  - {} [{}] via {}", courier.id, kind, endpoint),
			None => info!("  - {} [{}]", courier.id, kind),
		}
	}
}

/// Log that the server is up and which surface it exposes
pub fn log_startup_complete(bind_addr: &str) {
	info!("shipquote aggregator listening on {}", bind_addr);
	info!("API endpoints available:");
	info!("  GET  /health");
	info!("  POST /shipping-quote");
	info!("  POST /api/shipping-quote");
	info!("  GET  /shipping-quote/options");
	info!("  POST /shipments");
	info!("  POST /shipments/{{tracking_id}}/cancel");
	info!("  GET  /shipments/{{tracking_id}}/label");
	info!("  GET  /shipments/{{tracking_id}}/track");
}
