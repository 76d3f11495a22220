mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Cache, Catalog, Config, Model, Service};

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
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.catalog.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "catalog.api_base must be non-empty.".to_string(),
		});
	}
	if !cfg.catalog.api_base.starts_with("http://") && !cfg.catalog.api_base.starts_with("https://")
	{
		return Err(Error::Validation {
			message: "catalog.api_base must be an http or https URL.".to_string(),
		});
	}
	if cfg.catalog.card_type.trim().is_empty() {
		return Err(Error::Validation {
			message: "catalog.card_type must be non-empty.".to_string(),
		});
	}
	if cfg.catalog.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "catalog.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.catalog.concurrency == 0 {
		return Err(Error::Validation {
			message: "catalog.concurrency must be greater than zero.".to_string(),
		});
	}
	if let Some(max_pages) = cfg.catalog.max_pages
		&& max_pages == 0
	{
		return Err(Error::Validation {
			message: "catalog.max_pages must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.catalog.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("catalog.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.model.path.as_os_str().is_empty() {
		return Err(Error::Validation { message: "model.path must be non-empty.".to_string() });
	}
	if cfg.cache.enabled && cfg.cache.ttl_secs == 0 {
		return Err(Error::Validation {
			message: "cache.ttl_secs must be greater than zero when cache.enabled is true."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.catalog.api_base = cfg.catalog.api_base.trim().to_string();
	cfg.catalog.card_type = cfg.catalog.card_type.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
