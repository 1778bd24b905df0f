//! Graph endpoint client.
//!
//! Uses gloo-net in the browser; native builds get a stub so the rest of
//! the crate (and its tests) compile off-target.

use crate::components::graph_visualization::GraphData;
use crate::config::ApiConfig;
use crate::error::GraphError;

/// Parameters for one graph request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphQuery {
	/// Free-text search; blank means "whole graph".
	pub query: String,
	/// Restrict to the neighbourhood of this node.
	pub node: Option<String>,
	/// Overrides [`ApiConfig::default_limit`].
	pub limit: Option<u32>,
}

impl GraphQuery {
	/// Full-text search.
	pub fn text(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			..Self::default()
		}
	}

	/// Expand around one node.
	pub fn around(node_id: impl Into<String>) -> Self {
		Self {
			node: Some(node_id.into()),
			..Self::default()
		}
	}

	/// URL query part, without the leading `?`.
	pub fn to_query_string(&self, default_limit: u32) -> String {
		let mut parts = Vec::with_capacity(3);
		if !self.query.trim().is_empty() {
			parts.push(format!("q={}", encode_component(self.query.trim())));
		}
		if let Some(node) = &self.node {
			parts.push(format!("node={}", encode_component(node)));
		}
		parts.push(format!("limit={}", self.limit.unwrap_or(default_limit)));
		parts.join("&")
	}

	/// Full request URL for `config`.
	pub fn url(&self, config: &ApiConfig) -> String {
		format!(
			"{}?{}",
			config.endpoint("graph"),
			self.to_query_string(config.default_limit)
		)
	}
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_component(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for b in s.bytes() {
		match b {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
				out.push(b as char)
			}
			_ => out.push_str(&format!("%{:02X}", b)),
		}
	}
	out
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_graph(config: &ApiConfig, query: &GraphQuery) -> Result<GraphData, GraphError> {
	use gloo_net::http::Request;
	use log::info;

	let url = query.url(config);
	info!("fetching graph: {}", url);
	let resp = Request::get(&url)
		.send()
		.await
		.map_err(|e| GraphError::Network(e.to_string()))?;

	if !resp.ok() {
		return Err(GraphError::Http {
			status: resp.status(),
			status_text: resp.status_text(),
		});
	}

	let body = resp
		.text()
		.await
		.map_err(|e| GraphError::Network(e.to_string()))?;
	let data = GraphData::from_json(&body)?;
	info!(
		"graph loaded: {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Ok(data)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_graph(_config: &ApiConfig, _query: &GraphQuery) -> Result<GraphData, GraphError> {
	Err(GraphError::Unsupported("Graph fetching"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn query_string_encodes_and_defaults_limit() {
		let q = GraphQuery::text("  vector search & BM25 ");
		assert_eq!(q.to_query_string(200), "q=vector%20search%20%26%20BM25&limit=200");
	}

	#[test]
	fn node_queries_skip_empty_text() {
		let q = GraphQuery {
			limit: Some(25),
			..GraphQuery::around("doc/42")
		};
		assert_eq!(q.to_query_string(200), "node=doc%2F42&limit=25");
	}

	#[test]
	fn url_joins_config_base() {
		let cfg = ApiConfig {
			base_url: "http://localhost:8000/api".into(),
			default_limit: 10,
		};
		assert_eq!(
			GraphQuery::text("rust").url(&cfg),
			"http://localhost:8000/api/graph?q=rust&limit=10"
		);
	}

	#[test]
	fn encodes_utf8_bytes() {
		assert_eq!(encode_component("é"), "%C3%A9");
	}
}
