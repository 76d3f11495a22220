use std::collections::HashSet;

use cardrank_domain::NormalizedItem;

/// Drops later items whose identity (uuid, else name) was already seen. Items with neither are
/// kept as they cannot collide.
pub fn dedupe(items: Vec<NormalizedItem>) -> Vec<NormalizedItem> {
	let mut seen = HashSet::with_capacity(items.len());

	items
		.into_iter()
		.filter(|item| {
			let identity = item.identity();

			identity.is_empty() || seen.insert(identity.to_string())
		})
		.collect()
}
