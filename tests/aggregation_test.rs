//! Aggregation fan-out behavior across stores and couriers

use std::sync::Arc;
use std::time::{Duration, Instant};

use shipquote_aggregator::mocks::MockCourier;
use shipquote_aggregator::{
	AdapterRegistry, AggregatorService, CourierAdapter, Settings, StoreConfig,
};

fn stores(n: usize) -> Vec<StoreConfig> {
	(0..n)
		.map(|i| {
			StoreConfig::new(
				format!("store-{}", i),
				format!("Store {}", i),
				format!("40010{}", i),
				true,
			)
		})
		.collect()
}

fn service(stores: Vec<StoreConfig>, adapters: Vec<Arc<MockCourier>>) -> AggregatorService {
	let mut registry = AdapterRegistry::new();
	for adapter in adapters {
		registry
			.register(adapter as Arc<dyn CourierAdapter>)
			.expect("unique courier ids");
	}
	AggregatorService::new(
		stores,
		Arc::new(registry),
		Settings::default().weight,
	)
}

#[tokio::test]
async fn attempts_every_store_courier_pair() {
	let a = MockCourier::new("a", 5000, 3).arced();
	let b = MockCourier::new("b", 4000, 5).arced();
	let svc = service(stores(3), vec![a.clone(), b.clone()]);

	let result = svc.aggregate_quotes("110001", 500.0, None).await;

	assert_eq!(result.all_options.len(), 6);
	assert_eq!(a.call_count(), 3);
	assert_eq!(b.call_count(), 3);
}

#[tokio::test]
async fn panicking_adapter_does_not_poison_the_batch() {
	let good = MockCourier::new("good", 5000, 3).arced();
	let bad = MockCourier::panicking("bad").arced();
	let svc = service(stores(2), vec![good.clone(), bad]);

	let result = svc.aggregate_quotes("110001", 500.0, None).await;

	// The panicking courier's quotes are simply missing
	assert_eq!(result.all_options.len(), 2);
	assert!(result.all_options.iter().all(|o| o.courier_id == "good"));
	assert_eq!(result.cheapest.as_ref().unwrap().courier_id, "good");
}

#[tokio::test]
async fn quotes_are_fetched_concurrently() {
	let slow: Vec<Arc<MockCourier>> = (0..4)
		.map(|i| {
			MockCourier::new(&format!("slow-{}", i), 5000, 3)
				.with_delay(Duration::from_millis(100))
				.arced()
		})
		.collect();
	let svc = service(stores(2), slow);

	let started = Instant::now();
	let result = svc.aggregate_quotes("110001", 500.0, None).await;
	let elapsed = started.elapsed();

	assert_eq!(result.all_options.len(), 8);
	// 8 sequential calls would take ~800ms; concurrent ones take ~100ms
	assert!(
		elapsed < Duration::from_millis(400),
		"aggregation took {:?}",
		elapsed
	);
}

#[tokio::test]
async fn cheapest_tie_goes_to_the_first_encountered() {
	let a = MockCourier::new("a", 5000, 3).arced();
	let b = MockCourier::new("b", 5000, 2).arced();
	let svc = service(stores(2), vec![a, b]);

	let result = svc.aggregate_quotes("110001", 500.0, None).await;

	// Encounter order is store-then-courier: store-0/a comes first
	let cheapest = result.cheapest.unwrap();
	assert_eq!(cheapest.courier_id, "a");
	assert_eq!(cheapest.store_name, "Store 0");
}

#[tokio::test]
async fn fastest_tie_prefers_the_cheaper_option() {
	let pricey = MockCourier::new("pricey", 9000, 2).arced();
	let cheap = MockCourier::new("cheap", 6000, 2).arced();
	let svc = service(stores(1), vec![pricey, cheap]);

	let result = svc.aggregate_quotes("110001", 500.0, None).await;
	assert_eq!(result.fastest.unwrap().courier_id, "cheap");
}

#[tokio::test]
async fn courier_filter_restricts_the_batch() {
	let a = MockCourier::new("a", 5000, 3).arced();
	let b = MockCourier::new("b", 4000, 5).arced();
	let svc = service(stores(2), vec![a.clone(), b.clone()]);

	let ids = vec!["a".to_string()];
	let result = svc.aggregate_quotes("110001", 500.0, Some(&ids)).await;

	assert_eq!(result.all_options.len(), 2);
	assert_eq!(a.call_count(), 2);
	assert_eq!(b.call_count(), 0);
}

#[tokio::test]
async fn all_unavailable_yields_an_empty_answer() {
	let down_a = MockCourier::unavailable("down-a").arced();
	let down_b = MockCourier::unavailable("down-b").arced();
	let svc = service(stores(2), vec![down_a, down_b]);

	let result = svc.aggregate_quotes("110001", 640.0, None).await;

	assert!(result.cheapest.is_none());
	assert!(result.fastest.is_none());
	assert!(result.all_options.is_empty());
	assert_eq!(result.weight_grams, 640.0);
}

#[tokio::test]
async fn no_stores_means_no_calls() {
	let a = MockCourier::new("a", 5000, 3).arced();
	let svc = service(Vec::new(), vec![a.clone()]);

	let result = svc.aggregate_quotes("110001", 500.0, None).await;
	assert!(result.all_options.is_empty());
	assert_eq!(a.call_count(), 0);
}
