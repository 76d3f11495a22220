use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub catalog: Catalog,
	pub model: Model,
	#[serde(default)]
	pub cache: Cache,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
	/// Items endpoint, e.g. `https://mlb25.theshow.com/apis/items.json`.
	pub api_base: String,
	/// Value sent as the `type` query parameter.
	pub card_type: String,
	pub timeout_ms: u64,
	/// Number of page workers running after page 1 has been fetched.
	#[serde(default = "default_concurrency")]
	pub concurrency: u32,
	/// Optional. Upper bound on the page count reported by the upstream.
	pub max_pages: Option<u32>,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Model {
	pub path: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Cache {
	pub enabled: bool,
	pub ttl_secs: u64,
}
impl Default for Cache {
	fn default() -> Self {
		Self { enabled: true, ttl_secs: 3_600 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_concurrency() -> u32 {
	10
}
