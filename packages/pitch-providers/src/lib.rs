pub mod users;

mod error;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Map, Value};

pub fn auth_headers(
	auth_token: Option<&str>,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(token) = auth_token {
		headers.insert(AUTHORIZATION, format!("Bearer {token}").parse()?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

/// Resolves an asset path returned by the API against `api_base`. Absolute URLs pass through.
pub fn resolve_asset_url(api_base: &str, raw: &str) -> Option<String> {
	let raw = raw.trim();

	if raw.is_empty() {
		return None;
	}
	if raw.starts_with("http") {
		return Some(raw.to_string());
	}

	let base = api_base.trim_end_matches('/');

	if raw.starts_with('/') { Some(format!("{base}{raw}")) } else { Some(format!("{base}/{raw}")) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_relative_asset_paths() {
		assert_eq!(
			resolve_asset_url("http://api.local/api/", "uploads/a.webp").as_deref(),
			Some("http://api.local/api/uploads/a.webp")
		);
		assert_eq!(
			resolve_asset_url("http://api.local/api", "/uploads/a.webp").as_deref(),
			Some("http://api.local/api/uploads/a.webp")
		);
	}

	#[test]
	fn keeps_absolute_urls_and_drops_blank_ones() {
		assert_eq!(
			resolve_asset_url("http://api.local", "https://cdn.local/a.webp").as_deref(),
			Some("https://cdn.local/a.webp")
		);
		assert_eq!(resolve_asset_url("http://api.local", "  "), None);
	}
}
