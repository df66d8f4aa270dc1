use std::time::Duration;

use tokio::{
	sync::{mpsc, watch},
	task::JoinHandle,
	time,
};

use pitch_domain::{Query, RequestToken, ResultKind, SearchResult, SearchState, SourceResult};

use crate::{
	Providers,
	aggregate::{self, Limits},
	guard::{Admission, StaleResponseGuard},
	sources,
};

/// Called once per settled cycle with the query text and the final list.
pub type SettledHook = Box<dyn Fn(&str, &[SearchResult]) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct ControllerConfig {
	pub debounce: Duration,
	pub limits: Limits,
	/// Optional bound on each remote call. A miss counts as a remote failure.
	pub cycle_deadline: Option<Duration>,
}
impl ControllerConfig {
	pub fn from_search(cfg: &pitch_config::Search) -> Self {
		Self {
			debounce: Duration::from_millis(cfg.debounce_ms),
			limits: Limits { remote: cfg.remote_limit, local: cfg.local_limit },
			cycle_deadline: cfg.cycle_deadline_ms.map(Duration::from_millis),
		}
	}
}

impl Default for ControllerConfig {
	fn default() -> Self {
		Self { debounce: Duration::from_millis(300), limits: Limits::default(), cycle_deadline: None }
	}
}

#[derive(Debug)]
pub(crate) enum Event {
	DebounceFired { epoch: u64 },
	Arrived(SourceResult),
}

/// Armed debounce timer. Replaced as a whole on every input.
struct Debounce {
	epoch: u64,
	task: JoinHandle<()>,
}

/// Results collected so far for the active token.
struct Cycle {
	token: RequestToken,
	query: Query,
	remote: Option<SourceResult>,
	local: Option<SourceResult>,
}
impl Cycle {
	fn new(token: RequestToken, query: Query) -> Self {
		Self { token, query, remote: None, local: None }
	}

	fn record(&mut self, result: SourceResult) {
		match result.kind {
			ResultKind::User => self.remote = Some(result),
			ResultKind::Venue => self.local = Some(result),
		}
	}

	fn awaiting_remote(&self) -> bool {
		self.remote.is_none()
	}

	fn is_complete(&self) -> bool {
		self.remote.is_some() && self.local.is_some()
	}
}

/// Owns the query text, the debounce timer and the token sequence for one search box.
///
/// All transitions run on whichever task owns the controller. Remote calls run as spawned
/// tasks and report back through an internal channel, so a result is only ever applied
/// between `await` points of the owner.
pub struct QueryController {
	providers: Providers,
	cfg: ControllerConfig,
	text: String,
	guard: StaleResponseGuard,
	debounce: Option<Debounce>,
	epoch: u64,
	cycle: Option<Cycle>,
	in_flight: usize,
	results: Vec<SearchResult>,
	error: Option<String>,
	on_settled: Option<SettledHook>,
	pub(crate) events_tx: mpsc::UnboundedSender<Event>,
	pub(crate) events_rx: mpsc::UnboundedReceiver<Event>,
	state_tx: watch::Sender<SearchState>,
}
impl QueryController {
	pub fn new(providers: Providers, cfg: ControllerConfig) -> Self {
		let (events_tx, events_rx) = mpsc::unbounded_channel();
		let (state_tx, _) = watch::channel(SearchState::default());

		Self {
			providers,
			cfg,
			text: String::new(),
			guard: StaleResponseGuard::new(),
			debounce: None,
			epoch: 0,
			cycle: None,
			in_flight: 0,
			results: Vec::new(),
			error: None,
			on_settled: None,
			events_tx,
			events_rx,
			state_tx,
		}
	}

	pub fn with_on_settled(mut self, hook: SettledHook) -> Self {
		self.on_settled = Some(hook);

		self
	}

	/// Records a keystroke. Empty text clears synchronously; anything else re-arms the debounce.
	pub fn set_query(&mut self, text: &str) {
		self.text = text.to_string();

		if Query::new(text).is_empty() {
			self.reset();
		} else {
			self.abandon_cycle();
			self.arm_debounce();
		}

		self.publish();
	}

	pub fn clear(&mut self) {
		self.text.clear();
		self.reset();
		self.publish();
	}

	/// Skips the debounce and dispatches the current text right away.
	pub fn search_now(&mut self) {
		self.cancel_debounce();

		if Query::new(&self.text).is_empty() {
			self.reset();
		} else {
			self.dispatch();
		}

		self.publish();
	}

	pub fn state(&self) -> SearchState {
		SearchState {
			query: self.text.clone(),
			results: self.results.clone(),
			loading: self.is_loading(),
			error: self.error.clone(),
		}
	}

	pub fn subscribe(&self) -> watch::Receiver<SearchState> {
		self.state_tx.subscribe()
	}

	pub fn results(&self) -> &[SearchResult] {
		&self.results
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn active_token(&self) -> Option<RequestToken> {
		self.guard.active()
	}

	/// Debounce pending, remote call of the active cycle in flight, or local source still loading.
	pub fn is_loading(&self) -> bool {
		self.debounce.is_some()
			|| self.cycle.as_ref().is_some_and(Cycle::awaiting_remote)
			|| self.providers.local.is_loading()
	}

	/// True when no timer is armed and no remote call, current or stale, is outstanding.
	pub fn is_idle(&self) -> bool {
		self.debounce.is_none() && self.in_flight == 0
	}

	/// Waits for and applies one internal event. Returns `false` without waiting when idle.
	pub async fn next_event(&mut self) -> bool {
		if self.is_idle() {
			return false;
		}

		match self.events_rx.recv().await {
			Some(event) => {
				self.handle_event(event);

				true
			},
			None => false,
		}
	}

	/// Applies events until the controller is idle.
	pub async fn settle(&mut self) {
		while self.next_event().await {}
	}

	pub(crate) fn handle_event(&mut self, event: Event) {
		match event {
			Event::DebounceFired { epoch } => {
				if self.debounce.as_ref().map(|debounce| debounce.epoch) != Some(epoch) {
					tracing::debug!(epoch, "Ignoring superseded debounce firing.");

					return;
				}

				self.debounce = None;
				self.dispatch();
			},
			Event::Arrived(result) => {
				self.in_flight = self.in_flight.saturating_sub(1);
				self.accept(result);
			},
		}

		self.publish();
	}

	fn arm_debounce(&mut self) {
		self.cancel_debounce();

		self.epoch += 1;

		let epoch = self.epoch;
		let delay = self.cfg.debounce;
		let tx = self.events_tx.clone();
		let task = tokio::spawn(async move {
			time::sleep(delay).await;

			let _ = tx.send(Event::DebounceFired { epoch });
		});

		self.debounce = Some(Debounce { epoch, task });
	}

	fn cancel_debounce(&mut self) {
		if let Some(debounce) = self.debounce.take() {
			debounce.task.abort();
		}
	}

	fn dispatch(&mut self) {
		let query = Query::new(&self.text);
		let token = self.guard.mint();

		tracing::debug!(%token, query = %query, "Dispatching search cycle.");

		self.cycle = Some(Cycle::new(token, query.clone()));
		self.in_flight += 1;

		let remote = self.providers.remote.clone();
		let tx = self.events_tx.clone();
		let deadline = self.cfg.cycle_deadline;
		let remote_query = query.clone();

		let call = tokio::spawn(async move {
			sources::query_remote(remote.as_ref(), token, &remote_query, deadline).await
		});

		tokio::spawn(async move {
			let result = match call.await {
				Ok(result) => result,
				Err(err) => {
					tracing::warn!(error = %err, %token, "Remote user search task failed.");

					SourceResult::failed(token, ResultKind::User, "Failed to search users.")
				},
			};
			let _ = tx.send(Event::Arrived(result));
		});

		let local = self.providers.local.query(token, &query);

		self.accept(local);
	}

	fn accept(&mut self, result: SourceResult) {
		if self.guard.admit(result.token) == Admission::Stale {
			tracing::debug!(
				token = %result.token,
				active = ?self.guard.active(),
				kind = %result.kind,
				"Discarding stale source result."
			);

			return;
		}

		let Some(cycle) = self.cycle.as_mut() else {
			return;
		};

		cycle.record(result);

		if cycle.is_complete() {
			self.finish_cycle();
		}
	}

	fn finish_cycle(&mut self) {
		let Some(Cycle { token, query, remote: Some(remote), local: Some(local) }) =
			self.cycle.take()
		else {
			return;
		};
		let merged = aggregate::aggregate(&query, &remote, &local, self.cfg.limits);

		tracing::debug!(
			%token,
			results = merged.results.len(),
			warning = merged.warning.is_some(),
			"Search cycle settled."
		);

		self.results = merged.results;
		self.error = merged.warning;

		if let Some(hook) = self.on_settled.as_ref() {
			hook(query.as_str(), &self.results);
		}
	}

	/// Stops listening to the collecting cycle. The displayed list stays until the next settle.
	fn abandon_cycle(&mut self) {
		if let Some(cycle) = self.cycle.take() {
			tracing::debug!(token = %cycle.token, "Abandoning superseded search cycle.");

			self.guard.invalidate();
		}
	}

	fn reset(&mut self) {
		self.cancel_debounce();
		self.guard.invalidate();
		self.cycle = None;
		self.results.clear();
		self.error = None;
	}

	fn publish(&self) {
		self.state_tx.send_replace(self.state());
	}
}

impl Drop for QueryController {
	fn drop(&mut self) {
		self.cancel_debounce();
	}
}
