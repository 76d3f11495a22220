use std::sync::{
	Arc,
	atomic::{AtomicU32, Ordering},
};

use tokio::task::JoinSet;

use crate::{CatalogProvider, Error, Result};
use cardrank_domain::RawCardItem;

/// Raw records from every page that arrived, in page order.
#[derive(Debug, Default)]
pub struct FetchOutcome {
	pub items: Vec<RawCardItem>,
	/// Page count after applying the configured cap.
	pub pages: u32,
	pub failed_pages: Vec<u32>,
}

/// Fetches page 1 to learn the page count, then drains the remaining pages with at most
/// `concurrency` workers pulling from a shared cursor. Only a page 1 failure is an error; later
/// failures drop that page.
pub async fn fetch_all(
	provider: Arc<dyn CatalogProvider>,
	concurrency: usize,
	max_pages: Option<u32>,
) -> Result<FetchOutcome> {
	let first = provider.fetch_page(1).await.map_err(|err| Error::Upstream {
		message: format!("Failed to fetch catalog page 1: {err}"),
	})?;
	let mut pages = first.total_pages.max(1);

	if let Some(cap) = max_pages
		&& pages > cap
	{
		tracing::info!(reported = pages, cap, "Capping catalog page count.");

		pages = cap.max(1);
	}

	tracing::info!(pages, first_page_items = first.items.len(), "Discovered catalog pages.");

	let remaining = pages.saturating_sub(1) as usize;
	let workers = concurrency.max(1).min(remaining);
	let cursor = Arc::new(AtomicU32::new(2));
	let mut set = JoinSet::new();

	for _ in 0..workers {
		let provider = provider.clone();
		let cursor = cursor.clone();

		set.spawn(async move {
			let mut fetched = Vec::new();
			let mut failed = Vec::new();

			loop {
				let page = cursor.fetch_add(1, Ordering::SeqCst);

				if page > pages {
					break;
				}

				match provider.fetch_page(page).await {
					Ok(result) => fetched.push((page, result.items)),
					Err(err) => {
						tracing::warn!(page, error = %err, "Dropping failed catalog page.");

						failed.push(page);
					},
				}
			}

			(fetched, failed)
		});
	}

	let mut by_page = vec![(1, first.items)];
	let mut failed_pages = Vec::new();

	while let Some(joined) = set.join_next().await {
		match joined {
			Ok((fetched, failed)) => {
				by_page.extend(fetched);
				failed_pages.extend(failed);
			},
			Err(err) => {
				return Err(Error::Internal { message: format!("Catalog worker failed: {err}") });
			},
		}
	}

	by_page.sort_by_key(|(page, _)| *page);
	failed_pages.sort_unstable();

	let items = by_page.into_iter().flat_map(|(_, items)| items).collect();

	Ok(FetchOutcome { items, pages, failed_pages })
}
