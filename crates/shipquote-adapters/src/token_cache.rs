//! Process-wide bearer-token cache for token-auth couriers
//!
//! Keyed by provider id and shared across all adapter instances and
//! requests. A token is only replaced on expiry or by a newer successful
//! login; a failed carrier call never invalidates it. Concurrent cache
//! misses may race into duplicate logins, which is accepted: both tokens
//! are valid and the later write wins.

use dashmap::DashMap;
use shipquote_types::SecretString;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CachedToken {
	token: SecretString,
	expires_at: Instant,
}

/// Injectable token cache (no global state, so tests get a clean one per run)
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
	tokens: Arc<DashMap<String, CachedToken>>,
}

impl TokenCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Current token for a provider, or None when absent or past expiry
	///
	/// Expiry is checked at read time; there is no background eviction.
	pub fn get(&self, provider_id: &str) -> Option<SecretString> {
		let cached = self.tokens.get(provider_id)?;
		if Instant::now() >= cached.expires_at {
			return None;
		}
		Some(cached.token.clone())
	}

	/// Store a freshly acquired token with its (already safety-margined) TTL
	pub fn store(&self, provider_id: &str, token: SecretString, ttl: Duration) {
		self.tokens.insert(
			provider_id.to_string(),
			CachedToken {
				token,
				expires_at: Instant::now() + ttl,
			},
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stored_token_is_returned_until_expiry() {
		let cache = TokenCache::new();
		assert!(cache.get("shiprocket").is_none());

		cache.store("shiprocket", SecretString::from("tok-1"), Duration::from_secs(60));
		assert_eq!(cache.get("shiprocket").unwrap().expose_secret(), "tok-1");
	}

	#[tokio::test]
	async fn expired_token_reads_as_absent() {
		let cache = TokenCache::new();
		cache.store("shiprocket", SecretString::from("tok-1"), Duration::from_millis(30));

		tokio::time::sleep(Duration::from_millis(60)).await;
		assert!(cache.get("shiprocket").is_none());
	}

	#[test]
	fn later_write_wins() {
		let cache = TokenCache::new();
		cache.store("shiprocket", SecretString::from("tok-1"), Duration::from_secs(60));
		cache.store("shiprocket", SecretString::from("tok-2"), Duration::from_secs(60));
		assert_eq!(cache.get("shiprocket").unwrap().expose_secret(), "tok-2");
	}

	#[test]
	fn providers_are_isolated() {
		let cache = TokenCache::new();
		cache.store("shiprocket", SecretString::from("tok-1"), Duration::from_secs(60));
		assert!(cache.get("other-provider").is_none());
	}
}
