use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub remote: RemoteConfig,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

/// Connection settings for the remote user directory.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
	/// Optional. When absent, every remote query degrades to a warning instead of a request.
	pub api_base: Option<String>,
	#[serde(default = "default_remote_path")]
	pub path: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Optional. Sent as a bearer token.
	pub auth_token: Option<String>,
	/// Extra headers attached to every request, e.g. a session cookie.
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	pub debounce_ms: u64,
	pub local_limit: usize,
	pub remote_limit: usize,
	/// Optional. Per-cycle deadline for the remote source.
	pub cycle_deadline_ms: Option<u64>,
}
impl Default for Search {
	fn default() -> Self {
		Self { debounce_ms: 300, local_limit: 5, remote_limit: 10, cycle_deadline_ms: None }
	}
}

fn default_remote_path() -> String {
	"/users/buscar".to_string()
}

fn default_timeout_ms() -> u64 {
	5_000
}
