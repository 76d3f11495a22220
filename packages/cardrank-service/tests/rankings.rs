use std::{
	collections::{BTreeMap, HashMap},
	path::PathBuf,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use serde_json::{Map, Value};

use cardrank_config::{Cache, Catalog, Config, Model, Service};
use cardrank_domain::{LinearModel, ModelSet, model::LinearSpec};
use cardrank_providers::catalog::{CatalogPage, parse_catalog_page};
use cardrank_service::{
	BoxFuture, CatalogProvider, Error, RankingService, RankingsRequest, fetcher,
};

struct FakeCatalog {
	total_pages: u32,
	pages: HashMap<u32, Vec<Value>>,
	failing: Vec<u32>,
	delay: Option<Duration>,
	calls: Arc<AtomicUsize>,
	page_one_calls: Arc<AtomicUsize>,
}
impl FakeCatalog {
	fn new(total_pages: u32) -> Self {
		let pages =
			(1..=total_pages).map(|page| (page, vec![card(page, 0), card(page, 1)])).collect();

		Self {
			total_pages,
			pages,
			failing: Vec::new(),
			delay: None,
			calls: Arc::new(AtomicUsize::new(0)),
			page_one_calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	fn failing(mut self, pages: &[u32]) -> Self {
		self.failing = pages.to_vec();

		self
	}
}
impl CatalogProvider for FakeCatalog {
	fn fetch_page<'a>(
		&'a self,
		page: u32,
	) -> BoxFuture<'a, cardrank_providers::Result<CatalogPage>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			if page == 1 {
				self.page_one_calls.fetch_add(1, Ordering::SeqCst);
			}
			if let Some(delay) = self.delay {
				tokio::time::sleep(delay).await;
			}
			if self.failing.contains(&page) {
				return Err(cardrank_providers::Error::Status {
					status: 503,
					url: format!("https://catalog.test/items.json?page={page}"),
				});
			}

			let items = self.pages.get(&page).cloned().unwrap_or_default();

			parse_catalog_page(serde_json::json!({
				"page": page,
				"total_pages": self.total_pages,
				"items": items,
			}))
		})
	}
}

fn card(page: u32, slot: u32) -> Value {
	let position = if slot == 0 { "SS" } else { "CF" };

	serde_json::json!({
		"uuid": format!("p{page}-{slot}"),
		"name": format!("Player {page}-{slot}"),
		"display_position": position,
		"bat_hand": "R",
		"height": "6'1\"",
		"ovr": 70 + page,
		"contact_left": 60 + page * 3 + slot,
		"contact_right": 62 + page * 2,
		"power_left": 55 + slot * 4,
		"power_right": 58,
		"fielding_ability": 70 + page,
		"reaction_time": 72,
		"arm_strength": 68,
		"arm_accuracy": 66,
		"speed": 75
	})
}

fn models() -> ModelSet {
	let coefficients: BTreeMap<String, f64> = [
		"contact_left",
		"contact_right",
		"power_left",
		"power_right",
		"fielding_ability",
		"reaction_time",
		"arm_strength",
		"arm_accuracy",
		"speed",
	]
	.into_iter()
	.map(|key| (key.to_string(), 0.1))
	.collect();

	let hitter = LinearModel::from_spec(&LinearSpec { intercept: 0.0, coefficients });

	ModelSet::new(Some(hitter), None)
}

fn config(concurrency: u32, max_pages: Option<u32>) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		catalog: Catalog {
			api_base: "https://catalog.test/items.json".to_string(),
			card_type: "mlb_card".to_string(),
			timeout_ms: 1_000,
			concurrency,
			max_pages,
			default_headers: Map::new(),
		},
		model: Model { path: PathBuf::from("model/weights.json") },
		cache: Cache { enabled: true, ttl_secs: 3_600 },
	}
}

fn service(catalog: FakeCatalog, cfg: Config) -> RankingService {
	RankingService::with_provider(cfg, models(), Arc::new(catalog))
}

fn uuids(items: &[cardrank_domain::NormalizedItem]) -> Vec<String> {
	let mut out: Vec<_> = items.iter().map(|item| item.uuid.clone()).collect();

	out.sort();

	out
}

#[tokio::test]
async fn failed_middle_page_is_dropped_without_error() {
	let service = service(FakeCatalog::new(3).failing(&[2]), config(10, None));
	let response =
		service.rankings(RankingsRequest::default()).await.expect("Expected partial result.");

	assert_eq!(uuids(&response.items), vec!["p1-0", "p1-1", "p3-0", "p3-1"]);
	assert_eq!(response.meta.count, Some(4));
	assert_eq!(response.meta.pages, Some(3));
	assert!(!response.meta.cached);
}

#[tokio::test]
async fn failed_first_page_is_an_upstream_error() {
	let service = service(FakeCatalog::new(3).failing(&[1]), config(10, None));
	let err = service.rankings(RankingsRequest::default()).await.expect_err("Expected failure.");

	assert!(matches!(err, Error::Upstream { .. }), "{err}");
}

#[tokio::test]
async fn second_request_is_served_from_cache_until_forced() {
	let catalog = FakeCatalog::new(2);
	let calls = catalog.calls.clone();
	let service = service(catalog, config(4, None));
	let first = service.rankings(RankingsRequest::default()).await.expect("first");
	let second = service.rankings(RankingsRequest::default()).await.expect("second");

	assert!(!first.meta.cached);
	assert!(second.meta.cached);
	assert_eq!(second.meta.fetched_at, first.meta.fetched_at);
	assert_eq!(calls.load(Ordering::SeqCst), 2);

	let forced = service
		.rankings(RankingsRequest { force: true, ..RankingsRequest::default() })
		.await
		.expect("forced");

	assert!(!forced.meta.cached);
	assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn allow_secondaries_is_cached_separately() {
	let catalog = FakeCatalog::new(1);
	let calls = catalog.calls.clone();
	let service = service(catalog, config(4, None));

	service.rankings(RankingsRequest::default()).await.expect("plain");

	let with_secondaries = service
		.rankings(RankingsRequest { allow_secondaries: true, ..RankingsRequest::default() })
		.await
		.expect("secondaries");

	assert!(!with_secondaries.meta.cached);
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn concurrent_cold_requests_share_one_fetch() {
	let mut catalog = FakeCatalog::new(2);

	catalog.delay = Some(Duration::from_millis(20));

	let page_one_calls = catalog.page_one_calls.clone();
	let service = service(catalog, config(4, None));
	let (a, b) = tokio::join!(
		service.rankings(RankingsRequest::default()),
		service.rankings(RankingsRequest::default())
	);
	let (a, b) = (a.expect("a"), b.expect("b"));

	assert_eq!(page_one_calls.load(Ordering::SeqCst), 1);
	assert_ne!(a.meta.cached, b.meta.cached);
	assert_eq!(a.items, b.items);
}

#[tokio::test]
async fn duplicate_identities_keep_the_first_page() {
	let mut catalog = FakeCatalog::new(3);
	let mut duplicate = card(1, 0);

	duplicate["name"] = Value::from("Late Copy");

	catalog.pages.entry(3).or_default().push(duplicate);

	let service = service(catalog, config(3, None));
	let response = service.rankings(RankingsRequest::default()).await.expect("rankings");
	let kept: Vec<_> = response.items.iter().filter(|item| item.uuid == "p1-0").collect();

	assert_eq!(kept.len(), 1);
	assert_eq!(kept[0].name, "Player 1-0");
	assert_eq!(response.meta.count, Some(6));
}

#[tokio::test]
async fn items_are_ordered_by_meta_rating() {
	let service = service(FakeCatalog::new(3), config(2, None));
	let response = service.rankings(RankingsRequest::default()).await.expect("rankings");
	let metas: Vec<f64> =
		response.items.iter().map(|item| item.meta_ovr.expect("meta")).collect();

	assert!(metas.windows(2).all(|pair| pair[0] >= pair[1]), "{metas:?}");
}

#[tokio::test]
async fn page_cap_limits_discovered_pages() {
	let catalog = FakeCatalog::new(5);
	let calls = catalog.calls.clone();
	let provider: Arc<dyn CatalogProvider> = Arc::new(catalog);
	let outcome = fetcher::fetch_all(provider, 10, Some(2)).await.expect("fetch");

	assert_eq!(outcome.pages, 2);
	assert_eq!(outcome.items.len(), 4);
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn fetcher_keeps_page_order_and_reports_failures() {
	let provider: Arc<dyn CatalogProvider> = Arc::new(FakeCatalog::new(6).failing(&[4, 5]));
	let outcome = fetcher::fetch_all(provider, 3, None).await.expect("fetch");
	let names: Vec<_> = outcome.items.iter().map(|item| item.uuid.as_str()).collect();

	assert_eq!(names, vec!["p1-0", "p1-1", "p2-0", "p2-1", "p3-0", "p3-1", "p6-0", "p6-1"]);
	assert_eq!(outcome.failed_pages, vec![4, 5]);
}
