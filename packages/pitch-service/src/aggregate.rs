use std::collections::HashSet;

use pitch_domain::{Query, SearchResult, SourceResult};

/// Per-source caps applied before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
	pub remote: usize,
	pub local: usize,
}
impl Default for Limits {
	fn default() -> Self {
		Self { remote: 10, local: 5 }
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
	pub results: Vec<SearchResult>,
	/// Soft warning from a failed source. Never blocks the other source's items.
	pub warning: Option<String>,
}

/// Merges one cycle's two source results into the displayed order.
///
/// Exact case-insensitive name matches come first in arrival order, then everything else by
/// source priority. The sort is stable, so provider order breaks all remaining ties. Later
/// duplicates of the same `(kind, id)` are dropped; equal names across kinds are kept.
pub fn aggregate(
	query: &Query,
	remote: &SourceResult,
	local: &SourceResult,
	limits: Limits,
) -> Aggregate {
	let mut seen = HashSet::new();
	let mut results: Vec<SearchResult> = remote
		.contribution()
		.iter()
		.take(limits.remote)
		.chain(local.contribution().iter().take(limits.local))
		.filter(|item| seen.insert((item.kind, item.id.clone())))
		.cloned()
		.collect();

	results.sort_by_key(|item| rank_key(query, item));

	let warning = [remote, local].into_iter().find_map(|source| {
		source.failed.then(|| {
			source
				.error_message
				.clone()
				.unwrap_or_else(|| format!("The {} search failed.", source.kind))
		})
	});

	Aggregate { results, warning }
}

fn rank_key(query: &Query, item: &SearchResult) -> (u8, u8) {
	if query.matches_name(&item.name) { (0, 0) } else { (1, item.kind.priority()) }
}
