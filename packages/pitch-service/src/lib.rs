pub mod aggregate;
pub mod controller;
pub mod guard;
pub mod handle;
pub mod sources;

mod error;

pub use aggregate::{Aggregate, Limits};
pub use controller::{ControllerConfig, QueryController, SettledHook};
pub use error::{Error, Result};
pub use guard::{Admission, StaleResponseGuard};
pub use handle::{Command, SearchHandle};
pub use sources::{CatalogSource, HttpUserSource, SharedCatalog};

use std::{future::Future, pin::Pin, sync::Arc};

use pitch_domain::{Query, RequestToken, SearchResult, SourceResult};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Asynchronous source. One call issues at most one outbound request.
pub trait RemoteSource
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a Query,
	) -> BoxFuture<'a, pitch_providers::Result<Vec<SearchResult>>>;
}

/// Synchronous source over data the caller already holds. Never fails.
pub trait LocalSource
where
	Self: Send + Sync,
{
	fn query(&self, token: RequestToken, query: &Query) -> SourceResult;

	/// Whether the backing collection is still being filled by its owner.
	fn is_loading(&self) -> bool {
		false
	}
}

#[derive(Clone)]
pub struct Providers {
	pub remote: Arc<dyn RemoteSource>,
	pub local: Arc<dyn LocalSource>,
}
impl Providers {
	pub fn new(remote: Arc<dyn RemoteSource>, local: Arc<dyn LocalSource>) -> Self {
		Self { remote, local }
	}

	pub fn from_config(cfg: &pitch_config::Config, catalog: SharedCatalog) -> Result<Self> {
		let remote = HttpUserSource::new(cfg.remote.clone(), cfg.search.remote_limit)?;
		let local = CatalogSource::new(catalog, cfg.search.local_limit);

		Ok(Self::new(Arc::new(remote), Arc::new(local)))
	}
}
