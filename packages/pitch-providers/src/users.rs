use std::time::Duration;

use reqwest::{Client, StatusCode, header::ACCEPT};
use serde::Deserialize;
use serde_json::Value;

use pitch_config::RemoteConfig;
use pitch_domain::{ResultId, ResultKind, SearchResult};

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
	#[serde(default)]
	success: bool,
	#[serde(default)]
	data: Option<Value>,
	#[serde(default)]
	count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
	id: ResultId,
	name_user: String,
	slug: String,
	#[serde(default)]
	imagenes_webp: Vec<UserImage>,
}

#[derive(Debug, Deserialize)]
struct UserImage {
	#[serde(default)]
	url_webp: Option<String>,
}

pub fn build_client(cfg: &RemoteConfig) -> Result<Client> {
	let headers = crate::auth_headers(cfg.auth_token.as_deref(), &cfg.default_headers)?;
	let client = Client::builder()
		.timeout(Duration::from_millis(cfg.timeout_ms))
		.default_headers(headers)
		.build()?;

	Ok(client)
}

/// Queries the remote user directory. Returns at most `limit` results in server order.
pub async fn search(
	client: &Client,
	cfg: &RemoteConfig,
	query: &str,
	limit: usize,
) -> Result<Vec<SearchResult>> {
	let query = query.trim();

	if query.is_empty() {
		return Ok(Vec::new());
	}

	let api_base = cfg.api_base.as_deref().filter(|base| !base.trim().is_empty()).ok_or_else(
		|| Error::InvalidConfig { message: "API base URL is not configured.".to_string() },
	)?;
	let url = format!("{api_base}{}", cfg.path);
	let res = client
		.get(url)
		.query(&[("q", query)])
		.header(ACCEPT, "application/json")
		.send()
		.await?;
	let status = res.status();
	let body = res.bytes().await?;

	if !status.is_success() {
		return Err(Error::Status { status: status.as_u16(), message: failure_message(status, &body) });
	}

	parse_search_response(&body, api_base, limit)
}

fn failure_message(status: StatusCode, body: &[u8]) -> String {
	serde_json::from_slice::<Value>(body)
		.ok()
		.and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
		.filter(|message| !message.trim().is_empty())
		.unwrap_or_else(|| format!("Error {}: could not search users.", status.as_u16()))
}

fn parse_search_response(body: &[u8], api_base: &str, limit: usize) -> Result<Vec<SearchResult>> {
	let envelope: SearchEnvelope = serde_json::from_slice(body)?;

	if !envelope.success {
		return Err(invalid_response());
	}

	let Some(Value::Array(data)) = envelope.data else {
		return Err(invalid_response());
	};

	tracing::debug!(count = ?envelope.count, received = data.len(), "Decoded user search envelope.");

	let results = data
		.into_iter()
		.filter_map(|item| match serde_json::from_value::<UserRecord>(item) {
			Ok(record) => Some(record.into_result(api_base)),
			Err(err) => {
				tracing::warn!(error = %err, "Skipping malformed user record.");

				None
			},
		})
		.take(limit)
		.collect();

	Ok(results)
}

fn invalid_response() -> Error {
	Error::InvalidResponse { message: "Invalid response from server.".to_string() }
}

impl UserRecord {
	fn into_result(self, api_base: &str) -> SearchResult {
		let image = self
			.imagenes_webp
			.first()
			.and_then(|image| image.url_webp.as_deref())
			.and_then(|raw| crate::resolve_asset_url(api_base, raw));

		SearchResult {
			id: self.id,
			kind: ResultKind::User,
			name: self.name_user,
			image,
			subtitle: None,
			target: format!("/perfil/{}", self.slug),
		}
	}
}
