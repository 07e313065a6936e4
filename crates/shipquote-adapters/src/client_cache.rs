//! HTTP client cache for the live courier integrations
//!
//! One pooled reqwest client per (courier, endpoint) pair, reused across
//! requests for connection keep-alive. Auth is applied per request by the
//! adapters, so credentials never become part of the cache key.

use dashmap::DashMap;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use shipquote_types::{AdapterError, AdapterResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache key: which courier talks to which base URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey {
	pub courier_id: String,
	pub base_url: String,
}

impl ClientKey {
	pub fn new(courier_id: impl Into<String>, base_url: impl Into<String>) -> Self {
		Self {
			courier_id: courier_id.into(),
			base_url: base_url.into(),
		}
	}
}

#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe, TTL-bounded cache of pooled HTTP clients
///
/// Clones share the underlying map, so one cache instance can be handed to
/// every adapter at startup.
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientKey, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Default 30-minute client TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create the pooled client for a key
	pub fn get_client(&self, key: &ClientKey) -> AdapterResult<Arc<Client>> {
		self.clients
			.remove_if(key, |_, cached| cached.is_expired(self.ttl));

		if let Some(cached) = self.clients.get(key) {
			return Ok(cached.client.clone());
		}

		let client = Arc::new(build_client()?);
		let cached = CachedClient {
			client: client.clone(),
			created_at: Instant::now(),
		};

		use dashmap::mapref::entry::Entry;
		match self.clients.entry(key.clone()) {
			// Another task built a client concurrently; use theirs
			Entry::Occupied(entry) => Ok(entry.get().client.clone()),
			Entry::Vacant(entry) => {
				debug!("created pooled client for {} -> {}", key.courier_id, key.base_url);
				entry.insert(cached);
				Ok(client)
			},
		}
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

fn build_client() -> AdapterResult<Client> {
	let mut headers = HeaderMap::new();
	headers.insert("Content-Type", HeaderValue::from_static("application/json"));
	headers.insert("Accept", HeaderValue::from_static("application/json"));
	headers.insert(
		"User-Agent",
		HeaderValue::from_static("shipquote-aggregator/0.1"),
	);

	ClientBuilder::new()
		.pool_max_idle_per_host(10)
		.pool_idle_timeout(Duration::from_secs(90))
		.tcp_keepalive(Duration::from_secs(60))
		.default_headers(headers)
		.build()
		.map_err(AdapterError::Http)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cache_reuses_clients_per_key() {
		let cache = ClientCache::new();
		let key = ClientKey::new("delhivery-surface", "https://track.delhivery.com");

		let first = cache.get_client(&key).unwrap();
		let second = cache.get_client(&key).unwrap();
		assert!(Arc::ptr_eq(&first, &second));

		let other = cache
			.get_client(&ClientKey::new("bluedart", "https://apigateway.bluedart.com"))
			.unwrap();
		assert!(!Arc::ptr_eq(&first, &other));
	}

	#[tokio::test]
	async fn expired_clients_are_rebuilt() {
		let cache = ClientCache::with_ttl(Duration::from_millis(40));
		let key = ClientKey::new("shiprocket", "https://apiv2.shiprocket.in");

		let first = cache.get_client(&key).unwrap();
		tokio::time::sleep(Duration::from_millis(80)).await;
		let second = cache.get_client(&key).unwrap();
		assert!(!Arc::ptr_eq(&first, &second));
	}

	#[test]
	fn clones_share_the_map() {
		let cache = ClientCache::new();
		let clone = cache.clone();
		let key = ClientKey::new("dtdc", "https://example.com");

		let first = cache.get_client(&key).unwrap();
		let second = clone.get_client(&key).unwrap();
		assert!(Arc::ptr_eq(&first, &second));
	}
}
