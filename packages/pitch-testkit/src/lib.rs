mod error;

pub use error::{Error, Result};

use std::{
	collections::HashMap,
	future::IntoFuture,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use axum::{
	Json, Router,
	extract::{Query, State},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	response::{IntoResponse, Response},
	routing,
};
use serde_json::Value;
use tokio::{
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
	time,
};

pub const SEARCH_PATH: &str = "/users/buscar";

type Responder = dyn Fn(&str) -> DirectoryReply + Send + Sync;

/// Canned response served by [`UserDirectory`].
#[derive(Debug, Clone)]
pub struct DirectoryReply {
	pub status: u16,
	pub body: Value,
	pub delay: Option<Duration>,
}
impl DirectoryReply {
	/// Successful envelope wrapping `data`, which should be a JSON array of user records.
	pub fn users(data: Value) -> Self {
		let count = data.as_array().map(Vec::len).unwrap_or(0);

		Self {
			status: 200,
			body: serde_json::json!({ "success": true, "data": data, "count": count }),
			delay: None,
		}
	}

	pub fn error(status: u16, message: &str) -> Self {
		Self { status, body: serde_json::json!({ "message": message }), delay: None }
	}

	pub fn raw(status: u16, body: Value) -> Self {
		Self { status, body, delay: None }
	}

	pub fn delayed(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);

		self
	}
}

/// One user record in the shape the directory API returns.
pub fn user_record(id: i64, name: &str, slug: &str) -> Value {
	serde_json::json!({ "id": id, "name_user": name, "slug": slug, "imagenes_webp": [] })
}

struct DirectoryState {
	responder: Box<Responder>,
	calls: AtomicUsize,
	queries: Mutex<Vec<String>>,
	authorization: Mutex<Option<String>>,
}

/// In-process stand-in for the remote user directory.
pub struct UserDirectory {
	api_base: String,
	state: Arc<DirectoryState>,
	shutdown: Option<Sender<()>>,
}
impl UserDirectory {
	pub async fn start<F>(responder: F) -> Result<Self>
	where
		F: Fn(&str) -> DirectoryReply + Send + Sync + 'static,
	{
		let state = Arc::new(DirectoryState {
			responder: Box::new(responder),
			calls: AtomicUsize::new(0),
			queries: Mutex::new(Vec::new()),
			authorization: Mutex::new(None),
		});
		let app = Router::new()
			.route(&format!("/api{SEARCH_PATH}"), routing::get(search_handler))
			.with_state(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (tx, rx) = oneshot::channel();
		let server = axum::serve(listener, app).with_graceful_shutdown(async move {
			let _ = rx.await;
		});

		tokio::spawn(async move {
			let _ = server.into_future().await;
		});

		Ok(Self { api_base: format!("http://{addr}/api"), state, shutdown: Some(tx) })
	}

	pub fn api_base(&self) -> &str {
		&self.api_base
	}

	pub fn calls(&self) -> usize {
		self.state.calls.load(Ordering::SeqCst)
	}

	pub fn queries(&self) -> Vec<String> {
		self.state.queries.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn last_authorization(&self) -> Option<String> {
		self.state.authorization.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn shutdown(mut self) -> Result<()> {
		let Some(tx) = self.shutdown.take() else {
			return Err(Error::Message("User directory was already shut down.".to_string()));
		};

		tx.send(()).map_err(|_| Error::Message("User directory server has exited.".to_string()))
	}
}

impl Drop for UserDirectory {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

async fn search_handler(
	State(state): State<Arc<DirectoryState>>,
	Query(params): Query<HashMap<String, String>>,
	headers: HeaderMap,
) -> Response {
	let query = params.get("q").cloned().unwrap_or_default();

	state.calls.fetch_add(1, Ordering::SeqCst);
	state.queries.lock().unwrap_or_else(|err| err.into_inner()).push(query.clone());
	*state.authorization.lock().unwrap_or_else(|err| err.into_inner()) =
		headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()).map(str::to_string);

	let reply = (state.responder)(&query);

	if let Some(delay) = reply.delay {
		time::sleep(delay).await;
	}

	let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

	(status, Json(reply.body)).into_response()
}
