use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::filter::EdgeType;
use crate::error::GraphError;

/// A graph entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique, non-empty id.
	pub id: String,
	/// Display text.
	#[serde(default)]
	pub label: String,
	/// Entity type, picks the fill color.
	#[serde(rename = "type", default)]
	pub node_type: String,
	/// Link count reported by the backend; sizes the node.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub degree: Option<u32>,
}

impl GraphNode {
	/// Text drawn next to the node; falls back to the id.
	pub fn display_label(&self) -> &str {
		if self.label.is_empty() { &self.id } else { &self.label }
	}
}

/// Embedded endpoint as sent by layout-aware backends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedNode {
	/// Node id.
	pub id: String,
}

/// Link endpoint: either a bare node id or a node object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkEnd {
	/// Plain id.
	Id(String),
	/// Node object carrying an id.
	Node(EmbeddedNode),
}

impl LinkEnd {
	/// Id of the referenced node.
	pub fn id(&self) -> &str {
		match self {
			LinkEnd::Id(id) => id,
			LinkEnd::Node(node) => &node.id,
		}
	}
}

impl From<&str> for LinkEnd {
	fn from(id: &str) -> Self {
		LinkEnd::Id(id.to_string())
	}
}

/// A directed relation between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
	/// Tail node.
	pub source: LinkEnd,
	/// Head node.
	pub target: LinkEnd,
	/// Relation name; doubles as the edge type.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Strength in `[0, 1]`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub weight: Option<f64>,
}

impl GraphLink {
	/// Canonical relation name, `None` for unlabeled links.
	///
	/// Known relations map to their [`EdgeType`] name (`co-occurs` becomes
	/// `CO_OCCURS`); anything else is uppercased as is.
	pub fn edge_type(&self) -> Option<String> {
		self.label.as_deref().and_then(canonical_edge_type)
	}
}

/// Canonical form of a relation label, shared by filters, legend and palette.
pub fn canonical_edge_type(raw: &str) -> Option<String> {
	let raw = raw.trim();
	if raw.is_empty() {
		return None;
	}
	Some(match EdgeType::parse(raw) {
		Some(t) => t.as_str().to_string(),
		None => raw.to_uppercase(),
	})
}

/// Nodes plus links, as returned by the graph endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Entities.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Relations; `edges` is accepted too.
	#[serde(default, alias = "edges")]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parse a backend payload and check it before anything renders it.
	pub fn from_json(body: &str) -> Result<Self, GraphError> {
		let data: GraphData = serde_json::from_str(body)?;
		data.validate()?;
		Ok(data)
	}

	/// Reject empty or duplicate ids and out-of-range weights.
	pub fn validate(&self) -> Result<(), GraphError> {
		let mut seen = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if node.id.trim().is_empty() {
				return Err(GraphError::InvalidGraph("node with empty id".into()));
			}
			if !seen.insert(node.id.as_str()) {
				return Err(GraphError::InvalidGraph(format!(
					"duplicate node id '{}'",
					node.id
				)));
			}
		}
		for link in &self.links {
			if let Some(w) = link.weight {
				if !w.is_finite() || !(0.0..=1.0).contains(&w) {
					return Err(GraphError::InvalidGraph(format!(
						"weight {} on {} -> {} is outside [0, 1]",
						w,
						link.source.id(),
						link.target.id()
					)));
				}
			}
		}
		Ok(())
	}

	/// No nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_string_and_object_endpoints() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [
					{"id": "1", "label": "Rust", "type": "LANGUAGE", "degree": 2},
					{"id": "2", "label": "Cargo", "type": "TOOL"}
				],
				"links": [
					{"source": "1", "target": {"id": "2", "x": 4.0}, "label": "relates_to", "weight": 0.8}
				]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes[0].node_type, "LANGUAGE");
		assert_eq!(data.nodes[0].degree, Some(2));
		assert_eq!(data.nodes[1].degree, None);
		assert_eq!(data.links[0].source.id(), "1");
		assert_eq!(data.links[0].target.id(), "2");
		assert_eq!(data.links[0].edge_type().as_deref(), Some("RELATES_TO"));
	}

	#[test]
	fn accepts_edges_alias_and_missing_arrays() {
		let data = GraphData::from_json(r#"{"edges": [{"source": "a", "target": "b"}]}"#).unwrap();
		assert!(data.is_empty());
		assert_eq!(data.links.len(), 1);
		assert_eq!(data.links[0].edge_type(), None);
	}

	#[test]
	fn rejects_duplicate_ids() {
		let err = GraphData::from_json(
			r#"{"nodes": [{"id": "x", "label": "", "type": ""}, {"id": "x", "label": "", "type": ""}], "links": []}"#,
		)
		.unwrap_err();
		assert_eq!(
			err,
			GraphError::InvalidGraph("duplicate node id 'x'".into())
		);
	}

	#[test]
	fn rejects_out_of_range_weight() {
		let err = GraphData::from_json(
			r#"{"nodes": [], "links": [{"source": "a", "target": "b", "weight": 1.5}]}"#,
		)
		.unwrap_err();
		assert!(matches!(err, GraphError::InvalidGraph(_)));
	}

	#[test]
	fn rejects_non_graph_json() {
		let err = GraphData::from_json(r#"{"nodes": 3}"#).unwrap_err();
		assert!(matches!(err, GraphError::Decode(_)));
	}

	#[test]
	fn display_label_falls_back_to_id() {
		let node = GraphNode {
			id: "n1".into(),
			label: String::new(),
			node_type: "ENTITY".into(),
			degree: None,
		};
		assert_eq!(node.display_label(), "n1");
	}
}
