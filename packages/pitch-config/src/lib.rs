mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, RemoteConfig, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	if let Some(api_base) = cfg.remote.api_base.as_deref()
		&& !(api_base.starts_with("http://") || api_base.starts_with("https://"))
	{
		return Err(Error::Validation {
			message: "remote.api_base must start with http:// or https://.".to_string(),
		});
	}

	if !cfg.remote.path.starts_with('/') {
		return Err(Error::Validation {
			message: "remote.path must start with '/'.".to_string(),
		});
	}
	if cfg.remote.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "remote.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.remote.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("remote.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.search.local_limit == 0 {
		return Err(Error::Validation {
			message: "search.local_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.remote_limit == 0 {
		return Err(Error::Validation {
			message: "search.remote_limit must be greater than zero.".to_string(),
		});
	}

	if let Some(deadline) = cfg.search.cycle_deadline_ms
		&& deadline == 0
	{
		return Err(Error::Validation {
			message: "search.cycle_deadline_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.remote.api_base.as_deref().map(|base| base.trim().is_empty()).unwrap_or(false) {
		cfg.remote.api_base = None;
	}
	if let Some(base) = cfg.remote.api_base.as_mut() {
		let trimmed = base.trim().trim_end_matches('/').to_string();

		*base = trimmed;
	}
	if cfg.remote.auth_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false) {
		cfg.remote.auth_token = None;
	}
}
