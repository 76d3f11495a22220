pub mod cache;
pub mod dedupe;
pub mod fetcher;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use cache::{CacheEntry, ResultCache};
use cardrank_config::Config;
use cardrank_domain::{ItemNormalizer, ModelSet, NormalizedItem, ranking_order};
use cardrank_providers::catalog::{CatalogClient, CatalogPage};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait CatalogProvider
where
	Self: Send + Sync,
{
	fn fetch_page<'a>(
		&'a self,
		page: u32,
	) -> BoxFuture<'a, cardrank_providers::Result<CatalogPage>>;
}
impl CatalogProvider for CatalogClient {
	fn fetch_page<'a>(
		&'a self,
		page: u32,
	) -> BoxFuture<'a, cardrank_providers::Result<CatalogPage>> {
		Box::pin(CatalogClient::fetch_page(self, page))
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct RankingsRequest {
	/// Bypass the cache and refetch.
	#[serde(default)]
	pub force: bool,
	#[serde(default)]
	pub allow_secondaries: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct RankingsResponse {
	pub items: Vec<NormalizedItem>,
	pub meta: RankingsMeta,
}

#[derive(Clone, Debug, Serialize)]
pub struct RankingsMeta {
	pub cached: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fetched_at: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pages: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub count: Option<usize>,
}

pub struct RankingService {
	pub cfg: Config,
	normalizer: ItemNormalizer,
	catalog: Arc<dyn CatalogProvider>,
	cache: ResultCache,
}
impl RankingService {
	/// Uses the HTTP catalog client built from `cfg.catalog`.
	pub fn new(cfg: Config, models: ModelSet) -> Result<Self> {
		let client = CatalogClient::new(&cfg.catalog).map_err(|err| Error::Internal {
			message: format!("Failed to build catalog client: {err}"),
		})?;

		Ok(Self::with_provider(cfg, models, Arc::new(client)))
	}

	pub fn with_provider(
		cfg: Config,
		models: ModelSet,
		catalog: Arc<dyn CatalogProvider>,
	) -> Self {
		let cache = ResultCache::new(&cfg.cache);

		Self { cfg, normalizer: ItemNormalizer::new(models), catalog, cache }
	}

	pub fn normalizer(&self) -> &ItemNormalizer {
		&self.normalizer
	}

	pub async fn rankings(&self, req: RankingsRequest) -> Result<RankingsResponse> {
		let key = cache::rankings_cache_key(&self.cfg.catalog.card_type, req.allow_secondaries)?;

		if !req.force
			&& let Some(entry) = self.cache.fresh(&key, OffsetDateTime::now_utc())
		{
			tracing::debug!(count = entry.items.len(), "Rankings cache hit.");

			return Ok(response(entry, true));
		}
		if !self.cache.enabled() {
			let entry = self.refresh(req.allow_secondaries).await?;

			return Ok(response(entry, false));
		}

		let lock = self.cache.refresh_lock(&key);
		let _guard = lock.lock().await;

		// A concurrent caller may have refreshed while this one waited.
		if !req.force
			&& let Some(entry) = self.cache.fresh(&key, OffsetDateTime::now_utc())
		{
			tracing::debug!(count = entry.items.len(), "Rankings refreshed by another request.");

			return Ok(response(entry, true));
		}

		tracing::info!(force = req.force, "Rankings cache miss.");

		let entry = self.refresh(req.allow_secondaries).await?;

		self.cache.insert(key, entry.clone());

		Ok(response(entry, false))
	}

	async fn refresh(&self, allow_secondaries: bool) -> Result<CacheEntry> {
		let outcome = fetcher::fetch_all(
			self.catalog.clone(),
			self.cfg.catalog.concurrency as usize,
			self.cfg.catalog.max_pages,
		)
		.await?;
		let normalized = outcome
			.items
			.iter()
			.map(|raw| self.normalizer.normalize(raw, allow_secondaries))
			.collect();
		let mut items = dedupe::dedupe(normalized);

		items.sort_by(ranking_order);

		tracing::info!(
			pages = outcome.pages,
			failed_pages = outcome.failed_pages.len(),
			fetched = outcome.items.len(),
			count = items.len(),
			"Rankings refreshed."
		);

		Ok(CacheEntry { fetched_at: OffsetDateTime::now_utc(), pages: outcome.pages, items })
	}
}

/// Reads the model artifact named by `cfg.model.path`.
pub fn load_models(cfg: &Config) -> Result<ModelSet> {
	cardrank_providers::model::load_model_set(&cfg.model.path).map_err(|err| Error::Model {
		message: format!("Failed to load model artifact {}: {err}", cfg.model.path.display()),
	})
}

fn response(entry: CacheEntry, cached: bool) -> RankingsResponse {
	let meta = RankingsMeta {
		cached,
		fetched_at: Some(entry.fetched_at_ms()),
		pages: Some(entry.pages),
		count: Some(entry.items.len()),
	};

	RankingsResponse { items: entry.items, meta }
}
