//! Core aggregation service logic

use std::sync::Arc;

use futures::future::join_all;
use shipquote_adapters::AdapterRegistry;
use shipquote_config::WeightSettings;
use shipquote_types::{
	AggregatedResult, CourierAdapter, CourierPayload, ShippingOption, StoreConfig,
};
use tracing::{debug, info, warn};

use crate::weight::{calculate_weight, WeightError, WeightInput, WeightResult};

/// Service for aggregating shipping quotes across stores and couriers
///
/// Every enabled (store × courier) pair is queried concurrently in its own
/// task. Tasks are spawned and joined in store-then-courier configuration
/// order, which fixes the encounter order that ranking tie-breaks rely on.
pub struct AggregatorService {
	stores: Vec<StoreConfig>,
	registry: Arc<AdapterRegistry>,
	weight_settings: WeightSettings,
}

impl AggregatorService {
	pub fn new(
		stores: Vec<StoreConfig>,
		registry: Arc<AdapterRegistry>,
		weight_settings: WeightSettings,
	) -> Self {
		Self {
			stores,
			registry,
			weight_settings,
		}
	}

	pub fn registry(&self) -> &Arc<AdapterRegistry> {
		&self.registry
	}

	pub fn stores(&self) -> &[StoreConfig] {
		&self.stores
	}

	/// Fetch quotes concurrently from every enabled store × courier pair
	///
	/// Adapters never fail by contract; a task that still goes down (panic)
	/// is logged and dropped without affecting its siblings. An empty result
	/// is an answer, not an error.
	pub async fn aggregate_quotes(
		&self,
		destination_pincode: &str,
		weight_grams: f64,
		courier_ids: Option<&[String]>,
	) -> AggregatedResult {
		// An empty filter list means "no filter", same as omitting it
		let courier_ids = courier_ids.filter(|ids| !ids.is_empty());
		let adapters: Vec<Arc<dyn CourierAdapter>> = self
			.registry
			.enabled()
			.filter(|adapter| match courier_ids {
				Some(ids) => ids.iter().any(|id| id == adapter.id()),
				None => true,
			})
			.map(Arc::clone)
			.collect();

		let enabled_stores: Vec<&StoreConfig> =
			self.stores.iter().filter(|s| s.enabled).collect();

		info!(
			destination = %destination_pincode,
			weight_grams,
			stores = enabled_stores.len(),
			couriers = adapters.len(),
			"aggregating shipping quotes"
		);

		let tasks = enabled_stores.iter().flat_map(|store| {
			adapters.iter().map(move |adapter| {
				let adapter = Arc::clone(adapter);
				let store = (*store).clone();
				let payload = CourierPayload::new(
					store.pincode.clone(),
					destination_pincode.to_string(),
					weight_grams,
				);

				tokio::spawn(async move {
					debug!(
						courier = adapter.id(),
						store = %store.id,
						"fetching quote"
					);
					let quote = adapter.get_quote(&payload).await;
					(quote, store)
				})
			})
		});

		// join_all preserves spawn order, so encounter order stays
		// store-then-courier regardless of completion times
		let results = join_all(tasks).await;
		let attempted = results.len();

		let options: Vec<ShippingOption> = results
			.into_iter()
			.filter_map(|joined| match joined {
				Ok(outcome) => Some(outcome),
				Err(e) => {
					warn!("quote task aborted: {}", e);
					None
				},
			})
			.filter(|(quote, _)| quote.available)
			.map(|(quote, store)| ShippingOption::from_quote(quote, &store))
			.collect();

		info!(
			attempted,
			usable = options.len(),
			"quote aggregation completed"
		);

		AggregatedResult::rank(options, weight_grams)
	}

	/// Compute a print job's weight, then aggregate quotes for it
	///
	/// Uses the strict weight variant: an unknown print option is a caller
	/// error and surfaces before any courier is contacted.
	pub async fn aggregate_for_print_job(
		&self,
		input: &WeightInput,
		destination_pincode: &str,
		courier_ids: Option<&[String]>,
	) -> Result<(WeightResult, AggregatedResult), WeightError> {
		let weight = calculate_weight(input, &self.weight_settings)?;
		let result = self
			.aggregate_quotes(
				destination_pincode,
				weight.total_weight_grams,
				courier_ids,
			)
			.await;
		Ok((weight, result))
	}

	pub fn weight_settings(&self) -> &WeightSettings {
		&self.weight_settings
	}
}
