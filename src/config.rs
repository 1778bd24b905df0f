//! Build-time client configuration.
//!
//! A CSR bundle has no process environment at runtime, so settings are baked
//! in when the WASM is compiled:
//!
//! - `GRAPH_API_URL`: backend base URL (default `/api`)
//! - `GRAPH_DEFAULT_LIMIT`: node limit sent with graph queries (default `200`)

use log::warn;

/// Base URL used when `GRAPH_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "/api";
/// Node limit used when `GRAPH_DEFAULT_LIMIT` is unset or invalid.
pub const DEFAULT_LIMIT: u32 = 200;

/// Where the backend lives and how much to ask for.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
	/// Base URL without a trailing slash.
	pub base_url: String,
	/// Limit sent when a query does not set its own.
	pub default_limit: u32,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_API_URL.to_string(),
			default_limit: DEFAULT_LIMIT,
		}
	}
}

impl ApiConfig {
	/// Read the values baked in at compile time.
	pub fn from_build_env() -> Self {
		Self::from_values(option_env!("GRAPH_API_URL"), option_env!("GRAPH_DEFAULT_LIMIT"))
	}

	fn from_values(base_url: Option<&str>, limit: Option<&str>) -> Self {
		let base_url = base_url
			.map(str::trim)
			.filter(|u| !u.is_empty())
			.unwrap_or(DEFAULT_API_URL)
			.trim_end_matches('/')
			.to_string();
		let default_limit = match limit.map(str::parse::<u32>) {
			Some(Ok(n)) if n > 0 => n,
			Some(_) => {
				warn!("ignoring invalid GRAPH_DEFAULT_LIMIT, using {}", DEFAULT_LIMIT);
				DEFAULT_LIMIT
			}
			None => DEFAULT_LIMIT,
		};
		Self {
			base_url,
			default_limit,
		}
	}

	/// Join `path` onto the base URL.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_when_unset() {
		assert_eq!(ApiConfig::from_values(None, None), ApiConfig::default());
	}

	#[test]
	fn trims_base_and_parses_limit() {
		let cfg = ApiConfig::from_values(Some("https://rag.local/api/ "), Some("50"));
		assert_eq!(cfg.base_url, "https://rag.local/api");
		assert_eq!(cfg.default_limit, 50);
		assert_eq!(cfg.endpoint("/graph"), "https://rag.local/api/graph");
	}

	#[test]
	fn bad_limit_falls_back() {
		assert_eq!(ApiConfig::from_values(None, Some("lots")).default_limit, DEFAULT_LIMIT);
		assert_eq!(ApiConfig::from_values(None, Some("0")).default_limit, DEFAULT_LIMIT);
	}
}
