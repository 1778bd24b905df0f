//! Color lookup tables for edge and node types.

use super::types::canonical_edge_type;

/// Catch-all edge type for unlabeled or unlisted relations.
pub const DEFAULT_EDGE_TYPE: &str = "DEFAULT";

/// Edge type to stroke color, in legend order.
pub const EDGE_TYPE_COLORS: &[(&str, &str)] = &[
	("RELATES_TO", "#64b4ff"),
	("CO_OCCURS", "#ffb347"),
	("MENTIONED_IN", "#9ad96c"),
	("HAS_SECTION", "#c792ea"),
	("DEFINES", "#ff6b81"),
	("BELONGS_TO", "#4dd0c8"),
	("WORKS_FOR", "#f7d154"),
	("LOCATED_IN", "#b39ddb"),
	(DEFAULT_EDGE_TYPE, "#8a8fa8"),
];

const NODE_TYPE_COLORS: &[(&str, &str)] = &[
	("ENTITY", "#1f77b4"),
	("PERSON", "#ff7f0e"),
	("ORGANIZATION", "#2ca02c"),
	("LOCATION", "#d62728"),
	("CONCEPT", "#9467bd"),
	("DOCUMENT", "#8c564b"),
	("SECTION", "#e377c2"),
	("CHUNK", "#7f7f7f"),
	("EVENT", "#bcbd22"),
	("TECHNOLOGY", "#17becf"),
];

const FALLBACK_NODE_COLOR: &str = "#6c7a89";

/// Types shown in the legend (every table entry but the catch-all).
pub fn legend_types() -> Vec<(String, String)> {
	EDGE_TYPE_COLORS
		.iter()
		.filter(|(t, _)| *t != DEFAULT_EDGE_TYPE)
		.map(|(t, c)| (t.to_string(), c.to_string()))
		.collect()
}

/// Stroke color for an edge type; unknown types get the catch-all color.
pub fn edge_color(edge_type: Option<&str>) -> &'static str {
	let key = edge_type.and_then(canonical_edge_type);
	lookup(EDGE_TYPE_COLORS, key.as_deref().unwrap_or(DEFAULT_EDGE_TYPE))
		.unwrap_or_else(|| lookup(EDGE_TYPE_COLORS, DEFAULT_EDGE_TYPE).unwrap_or("#8a8fa8"))
}

/// Fill color for a node type.
pub fn node_color(node_type: &str) -> &'static str {
	lookup(NODE_TYPE_COLORS, &node_type.to_uppercase()).unwrap_or(FALLBACK_NODE_COLOR)
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
	table.iter().find(|(k, _)| *k == key).map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn legend_excludes_default() {
		let types = legend_types();
		assert_eq!(types.len(), EDGE_TYPE_COLORS.len() - 1);
		assert!(types.iter().all(|(t, _)| t != DEFAULT_EDGE_TYPE));
	}

	#[test]
	fn lookups_are_case_insensitive_with_fallbacks() {
		assert_eq!(edge_color(Some("relates_to")), "#64b4ff");
		assert_eq!(edge_color(Some("SIBLING_OF")), "#8a8fa8");
		assert_eq!(edge_color(None), "#8a8fa8");
		assert_eq!(edge_color(Some("co-occurs")), "#ffb347");
		assert_eq!(edge_color(Some("located in")), "#b39ddb");
		assert_eq!(node_color("person"), "#ff7f0e");
		assert_eq!(node_color(""), FALLBACK_NODE_COLOR);
	}
}
