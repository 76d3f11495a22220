use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Map, Value};
use tower::util::ServiceExt;

use cardrank_api::{routes, state::AppState};
use cardrank_config::{Cache, Catalog, Config, Model, Service};
use cardrank_domain::{LinearModel, ModelSet, model::LinearSpec};
use cardrank_providers::catalog::{CatalogPage, parse_catalog_page};
use cardrank_service::{BoxFuture, CatalogProvider, RankingService};

struct StaticCatalog {
	fail_first_page: bool,
}
impl CatalogProvider for StaticCatalog {
	fn fetch_page<'a>(
		&'a self,
		page: u32,
	) -> BoxFuture<'a, cardrank_providers::Result<CatalogPage>> {
		Box::pin(async move {
			if self.fail_first_page {
				return Err(cardrank_providers::Error::Status {
					status: 500,
					url: format!("https://catalog.test/items.json?page={page}"),
				});
			}

			parse_catalog_page(serde_json::json!({
				"total_pages": 1,
				"items": [
					{
						"uuid": "a",
						"name": "Glove First",
						"display_position": "SS",
						"bat_hand": "S",
						"fielding_ability": 92,
						"reaction_time": 90,
						"contact_left": 60,
						"contact_right": 62
					},
					{
						"uuid": "b",
						"name": "Arm Only",
						"display_position": "SP",
						"ovr": 77,
						"stamina": 80
					}
				]
			}))
		})
	}
}

fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		catalog: Catalog {
			api_base: "https://catalog.test/items.json".to_string(),
			card_type: "mlb_card".to_string(),
			timeout_ms: 1_000,
			concurrency: 2,
			max_pages: None,
			default_headers: Map::new(),
		},
		model: Model { path: PathBuf::from("model/weights.json") },
		cache: Cache { enabled: true, ttl_secs: 60 },
	}
}

fn app(fail_first_page: bool) -> Router {
	let coefficients: BTreeMap<String, f64> =
		["fielding_ability", "reaction_time", "contact_left", "contact_right"]
			.into_iter()
			.map(|key| (key.to_string(), 0.2))
			.collect();
	let models = ModelSet::new(
		Some(LinearModel::from_spec(&LinearSpec { intercept: 1.0, coefficients })),
		None,
	);
	let service = RankingService::with_provider(
		test_config(),
		models,
		Arc::new(StaticCatalog { fail_first_page }),
	);

	routes::router(AppState::from_service(service))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call router.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Response body must be JSON.")
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let (status, _) = get(app(false), "/health").await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rankings_returns_items_and_meta() {
	let (status, json) = get(app(false), "/rankings?force=1&allow_secondaries=true").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["meta"]["cached"], false);
	assert_eq!(json["meta"]["count"], 2);
	assert_eq!(json["meta"]["pages"], 1);
	assert!(json["meta"]["fetched_at"].is_i64());

	let items = json["items"].as_array().expect("items must be an array");
	let hitter = items.iter().find(|item| item["uuid"] == "a").expect("hitter");
	let pitcher = items.iter().find(|item| item["uuid"] == "b").expect("pitcher");

	assert_eq!(hitter["role"], "hitter");
	assert_eq!(hitter["metaPosition"], "SS");
	assert!(hitter["metaOvr"].as_f64().expect("metaOvr") <= 125.0);
	assert!(hitter["facets"]["defense"].is_f64());
	assert_eq!(pitcher["role"], "pitcher");
	assert_eq!(pitcher["ovr"], 77.0);
	assert_eq!(pitcher["metaOvr"], Value::Null);
	assert_eq!(pitcher["facets"]["power"], Value::Null);
}

#[tokio::test]
async fn repeated_requests_hit_the_cache() {
	let app = app(false);
	let (_, first) = get(app.clone(), "/rankings").await;
	let (_, second) = get(app, "/rankings?force=0").await;

	assert_eq!(first["meta"]["cached"], false);
	assert_eq!(second["meta"]["cached"], true);
	assert_eq!(first["items"], second["items"]);
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
	let (status, json) = get(app(true), "/rankings").await;

	assert_eq!(status, StatusCode::BAD_GATEWAY);
	assert!(json["error"].as_str().expect("error message").contains("page 1"));
}
