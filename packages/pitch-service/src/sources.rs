use std::{
	sync::{Arc, RwLock, RwLockReadGuard},
	time::Duration,
};

use reqwest::Client;
use tokio::time;

use pitch_config::RemoteConfig;
use pitch_domain::{Query, RequestToken, ResultKind, SearchResult, SourceResult, Venue};
use pitch_providers::users;

use crate::{BoxFuture, LocalSource, RemoteSource, Result};

pub struct HttpUserSource {
	client: Client,
	cfg: RemoteConfig,
	limit: usize,
}
impl HttpUserSource {
	pub fn new(cfg: RemoteConfig, limit: usize) -> Result<Self> {
		let client = users::build_client(&cfg)?;

		Ok(Self { client, cfg, limit })
	}
}

impl RemoteSource for HttpUserSource {
	fn search<'a>(
		&'a self,
		query: &'a Query,
	) -> BoxFuture<'a, pitch_providers::Result<Vec<SearchResult>>> {
		Box::pin(users::search(&self.client, &self.cfg, query.as_str(), self.limit))
	}
}

#[derive(Debug, Default)]
struct CatalogState {
	venues: Vec<Venue>,
	loading: bool,
}

/// Venue collection owned by an external refresh cycle. Readers always see current contents.
#[derive(Clone, Debug, Default)]
pub struct SharedCatalog {
	inner: Arc<RwLock<CatalogState>>,
}
impl SharedCatalog {
	pub fn new(venues: Vec<Venue>) -> Self {
		Self { inner: Arc::new(RwLock::new(CatalogState { venues, loading: false })) }
	}

	/// Starts empty with the loading flag raised.
	pub fn loading() -> Self {
		let catalog = Self::default();

		catalog.set_loading(true);

		catalog
	}

	/// Parses a JSON array of venues.
	pub fn from_json(raw: &str) -> Result<Self> {
		let venues: Vec<Venue> = serde_json::from_str(raw)?;

		Ok(Self::new(venues))
	}

	/// Swaps in a refreshed collection and lowers the loading flag.
	pub fn replace(&self, venues: Vec<Venue>) {
		let mut state = self.inner.write().unwrap_or_else(|err| err.into_inner());

		state.venues = venues;
		state.loading = false;
	}

	pub fn set_loading(&self, loading: bool) {
		self.inner.write().unwrap_or_else(|err| err.into_inner()).loading = loading;
	}

	pub fn is_loading(&self) -> bool {
		self.read().loading
	}

	pub fn len(&self) -> usize {
		self.read().venues.len()
	}

	pub fn is_empty(&self) -> bool {
		self.read().venues.is_empty()
	}

	fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
		self.inner.read().unwrap_or_else(|err| err.into_inner())
	}
}

pub struct CatalogSource {
	catalog: SharedCatalog,
	limit: usize,
}
impl CatalogSource {
	pub fn new(catalog: SharedCatalog, limit: usize) -> Self {
		Self { catalog, limit }
	}
}

impl LocalSource for CatalogSource {
	fn query(&self, token: RequestToken, query: &Query) -> SourceResult {
		if query.is_empty() {
			return SourceResult::empty(token, ResultKind::Venue);
		}

		let needle = query.needle();
		let items = self
			.catalog
			.read()
			.venues
			.iter()
			.filter(|venue| venue.matches(&needle))
			.take(self.limit)
			.map(Venue::to_result)
			.collect();

		SourceResult::ok(token, ResultKind::Venue, items)
	}

	fn is_loading(&self) -> bool {
		self.catalog.is_loading()
	}
}

/// Runs one remote call for `token` and folds any failure into the result.
pub async fn query_remote(
	remote: &dyn RemoteSource,
	token: RequestToken,
	query: &Query,
	deadline: Option<Duration>,
) -> SourceResult {
	if query.is_empty() {
		return SourceResult::empty(token, ResultKind::User);
	}

	let outcome = match deadline {
		Some(deadline) => match time::timeout(deadline, remote.search(query)).await {
			Ok(outcome) => outcome,
			Err(_) => {
				tracing::warn!(%token, ?deadline, "Remote user search missed the cycle deadline.");

				return SourceResult::failed(token, ResultKind::User, "Remote search timed out.");
			},
		},
		None => remote.search(query).await,
	};

	match outcome {
		Ok(items) => SourceResult::ok(token, ResultKind::User, items),
		Err(err) => {
			tracing::warn!(error = %err, %token, "Remote user search failed.");

			SourceResult::failed(token, ResultKind::User, err.user_message())
		},
	}
}
