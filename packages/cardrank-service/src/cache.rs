use std::{
	collections::HashMap,
	sync::{Arc, Mutex, PoisonError},
};

use time::{Duration, OffsetDateTime};

use crate::{Error, Result};
use cardrank_domain::NormalizedItem;

const CACHE_SCHEMA_VERSION: i32 = 1;

/// One computed ranking, replaced wholesale on refresh.
#[derive(Clone, Debug)]
pub struct CacheEntry {
	pub fetched_at: OffsetDateTime,
	pub pages: u32,
	pub items: Vec<NormalizedItem>,
}
impl CacheEntry {
	pub fn is_fresh(&self, now: OffsetDateTime, ttl: Duration) -> bool {
		now - self.fetched_at < ttl
	}

	pub fn fetched_at_ms(&self) -> i64 {
		i64::try_from(self.fetched_at.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
	}
}

/// In-memory TTL cache keyed by request shape, owned by one service instance. Each key also has
/// an async lock so concurrent cold requests share a single refresh.
#[derive(Debug)]
pub struct ResultCache {
	enabled: bool,
	ttl: Duration,
	entries: Mutex<HashMap<String, CacheEntry>>,
	refresh_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}
impl ResultCache {
	pub fn new(cfg: &cardrank_config::Cache) -> Self {
		Self {
			enabled: cfg.enabled,
			ttl: Duration::seconds(i64::try_from(cfg.ttl_secs).unwrap_or(i64::MAX)),
			entries: Mutex::new(HashMap::new()),
			refresh_locks: Mutex::new(HashMap::new()),
		}
	}

	pub fn enabled(&self) -> bool {
		self.enabled
	}

	pub fn fresh(&self, key: &str, now: OffsetDateTime) -> Option<CacheEntry> {
		if !self.enabled {
			return None;
		}

		let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

		entries.get(key).filter(|entry| entry.is_fresh(now, self.ttl)).cloned()
	}

	pub fn insert(&self, key: String, entry: CacheEntry) {
		if !self.enabled {
			return;
		}

		self.entries.lock().unwrap_or_else(PoisonError::into_inner).insert(key, entry);
	}

	pub fn refresh_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
		let mut locks = self.refresh_locks.lock().unwrap_or_else(PoisonError::into_inner);

		locks.entry(key.to_string()).or_default().clone()
	}
}

pub fn hash_cache_key(payload: &serde_json::Value) -> Result<String> {
	let raw = serde_json::to_vec(payload).map_err(|err| Error::Internal {
		message: format!("Failed to encode cache key payload: {err}"),
	})?;

	Ok(blake3::hash(&raw).to_hex().to_string())
}

pub fn rankings_cache_key(card_type: &str, allow_secondaries: bool) -> Result<String> {
	let payload = serde_json::json!({
		"kind": "rankings",
		"schema_version": CACHE_SCHEMA_VERSION,
		"card_type": card_type.trim(),
		"allow_secondaries": allow_secondaries,
	});

	hash_cache_key(&payload)
}
