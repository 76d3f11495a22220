use std::time::Duration;

use reqwest::{Client, header::HeaderMap};
use serde_json::Value;

use crate::{Error, Result};
use cardrank_config::Catalog;
use cardrank_domain::RawCardItem;

/// One decoded page of the upstream catalog.
#[derive(Clone, Debug, Default)]
pub struct CatalogPage {
	pub items: Vec<RawCardItem>,
	pub total_pages: u32,
	/// Records on the page that could not be decoded and were dropped.
	pub skipped: usize,
}

#[derive(Clone, Debug)]
pub struct CatalogClient {
	client: Client,
	api_base: String,
	card_type: String,
	headers: HeaderMap,
}
impl CatalogClient {
	pub fn new(cfg: &Catalog) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
		let headers = crate::default_headers(&cfg.default_headers)?;

		Ok(Self {
			client,
			api_base: cfg.api_base.clone(),
			card_type: cfg.card_type.clone(),
			headers,
		})
	}

	/// `GET <api_base>?type=<card_type>&page=<page>`.
	pub async fn fetch_page(&self, page: u32) -> Result<CatalogPage> {
		let page = page.to_string();
		let res = self
			.client
			.get(&self.api_base)
			.headers(self.headers.clone())
			.query(&[("type", self.card_type.as_str()), ("page", page.as_str())])
			.send()
			.await?;
		let status = res.status();

		if !status.is_success() {
			return Err(Error::Status { status: status.as_u16(), url: res.url().to_string() });
		}

		let json: Value = res.json().await?;

		parse_catalog_page(json)
	}
}

/// Decodes `{ items: [...], total_pages: n }`. Items that fail to decode are skipped so one bad
/// record does not cost the whole page.
pub fn parse_catalog_page(json: Value) -> Result<CatalogPage> {
	let total_pages = match json.get("total_pages") {
		None | Some(Value::Null) => 1,
		Some(value) => value
			.as_u64()
			.and_then(|pages| u32::try_from(pages).ok())
			.ok_or_else(|| Error::InvalidResponse {
				message: "Catalog total_pages must be a non-negative integer.".to_string(),
			})?,
	};
	let Some(Value::Array(raw_items)) = json.get("items") else {
		return Err(Error::InvalidResponse {
			message: "Catalog response is missing items array.".to_string(),
		});
	};
	let mut items = Vec::with_capacity(raw_items.len());
	let mut skipped = 0;

	for (index, raw) in raw_items.iter().enumerate() {
		match serde_json::from_value::<RawCardItem>(raw.clone()) {
			Ok(item) => items.push(item),
			Err(err) => {
				skipped += 1;

				tracing::warn!(index, error = %err, "Skipping undecodable catalog item.");
			},
		}
	}

	Ok(CatalogPage { items, total_pages, skipped })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_items_and_page_count() {
		let json = serde_json::json!({
			"page": 1,
			"total_pages": 3,
			"items": [
				{ "uuid": "a", "name": "Alpha", "contact_left": 80 },
				{ "uuid": "b", "name": "Beta", "quirks": 7 },
				{ "uuid": "c", "name": "Gamma" }
			]
		});
		let page = parse_catalog_page(json).expect("Failed to parse page.");

		assert_eq!(page.total_pages, 3);
		assert_eq!(page.items.len(), 2);
		assert_eq!(page.skipped, 1);
		assert_eq!(page.items[1].name, "Gamma");
	}

	#[test]
	fn missing_total_pages_means_one_page() {
		let page = parse_catalog_page(serde_json::json!({ "items": [] })).expect("parse failed");

		assert_eq!(page.total_pages, 1);
		assert!(page.items.is_empty());
	}

	#[test]
	fn rejects_pages_without_items() {
		let err = parse_catalog_page(serde_json::json!({ "total_pages": 2 }))
			.expect_err("Expected missing items to fail.");

		assert!(matches!(err, Error::InvalidResponse { .. }));
	}

	#[test]
	fn rejects_negative_page_counts() {
		let err = parse_catalog_page(serde_json::json!({ "items": [], "total_pages": -1 }))
			.expect_err("Expected negative page count to fail.");

		assert!(matches!(err, Error::InvalidResponse { .. }));
	}
}
