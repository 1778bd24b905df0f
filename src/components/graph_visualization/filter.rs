//! Edge filtering: the controlled `EdgeFilters` criteria and the
//! legend-owned visible edge-type set.
//!
//! Both are applied before anything reaches the canvas. An edge is drawn
//! only if it passes [`filter_edges`] and its type is visible.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::types::{GraphData, GraphLink, canonical_edge_type};

/// Relation types the filter flags know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeType {
	/// Generic association between two entities.
	RelatesTo,
	/// Entities seen in the same chunk.
	CoOccurs,
	/// Entity mentioned in a document.
	MentionedIn,
	/// Document to section.
	HasSection,
	/// Section defines an entity.
	Defines,
	/// Membership.
	BelongsTo,
	/// Employment.
	WorksFor,
	/// Place.
	LocatedIn,
}

impl EdgeType {
	/// Every type, in legend order.
	pub const ALL: [EdgeType; 8] = [
		EdgeType::RelatesTo,
		EdgeType::CoOccurs,
		EdgeType::MentionedIn,
		EdgeType::HasSection,
		EdgeType::Defines,
		EdgeType::BelongsTo,
		EdgeType::WorksFor,
		EdgeType::LocatedIn,
	];

	/// Case-insensitive; `-` and spaces count as `_`.
	pub fn parse(raw: &str) -> Option<Self> {
		let norm: String = raw
			.trim()
			.chars()
			.map(|c| match c {
				'-' | ' ' => '_',
				c => c.to_ascii_uppercase(),
			})
			.collect();
		EdgeType::ALL.into_iter().find(|t| t.as_str() == norm)
	}

	/// Canonical wire name, e.g. `RELATES_TO`.
	pub fn as_str(self) -> &'static str {
		match self {
			EdgeType::RelatesTo => "RELATES_TO",
			EdgeType::CoOccurs => "CO_OCCURS",
			EdgeType::MentionedIn => "MENTIONED_IN",
			EdgeType::HasSection => "HAS_SECTION",
			EdgeType::Defines => "DEFINES",
			EdgeType::BelongsTo => "BELONGS_TO",
			EdgeType::WorksFor => "WORKS_FOR",
			EdgeType::LocatedIn => "LOCATED_IN",
		}
	}

	/// Human-readable name.
	pub fn label(self) -> &'static str {
		match self {
			EdgeType::RelatesTo => "Relates to",
			EdgeType::CoOccurs => "Co-occurs",
			EdgeType::MentionedIn => "Mentioned in",
			EdgeType::HasSection => "Has section",
			EdgeType::Defines => "Defines",
			EdgeType::BelongsTo => "Belongs to",
			EdgeType::WorksFor => "Works for",
			EdgeType::LocatedIn => "Located in",
		}
	}

	/// Whether the flag for this type is optional in [`EdgeFilters`].
	pub fn is_extended(self) -> bool {
		!matches!(
			self,
			EdgeType::RelatesTo | EdgeType::CoOccurs | EdgeType::MentionedIn
		)
	}
}

/// User-controlled edge criteria. Owned by the page, passed down as a prop.
///
/// Extended flags are optional: `None` means the control is not present and
/// edges of that type pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeFilters {
	/// Draw `RELATES_TO` edges.
	pub show_relates_to: bool,
	/// Draw `CO_OCCURS` edges.
	pub show_co_occurs: bool,
	/// Draw `MENTIONED_IN` edges.
	pub show_mentioned_in: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	/// Draw `HAS_SECTION` edges.
	pub show_has_section: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	/// Draw `DEFINES` edges.
	pub show_defines: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	/// Draw `BELONGS_TO` edges.
	pub show_belongs_to: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	/// Draw `WORKS_FOR` edges.
	pub show_works_for: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	/// Draw `LOCATED_IN` edges.
	pub show_located_in: Option<bool>,
	#[serde(default)]
	/// Weighted edges below this are dropped.
	pub min_weight: f64,
}

impl Default for EdgeFilters {
	fn default() -> Self {
		Self {
			show_relates_to: true,
			show_co_occurs: true,
			show_mentioned_in: true,
			show_has_section: None,
			show_defines: None,
			show_belongs_to: None,
			show_works_for: None,
			show_located_in: None,
			min_weight: 0.0,
		}
	}
}

impl EdgeFilters {
	/// Filters with every extended control present and enabled.
	pub fn extended() -> Self {
		Self {
			show_has_section: Some(true),
			show_defines: Some(true),
			show_belongs_to: Some(true),
			show_works_for: Some(true),
			show_located_in: Some(true),
			..Self::default()
		}
	}

	/// `None` for extended types whose control is absent.
	pub fn flag(&self, edge_type: EdgeType) -> Option<bool> {
		match edge_type {
			EdgeType::RelatesTo => Some(self.show_relates_to),
			EdgeType::CoOccurs => Some(self.show_co_occurs),
			EdgeType::MentionedIn => Some(self.show_mentioned_in),
			EdgeType::HasSection => self.show_has_section,
			EdgeType::Defines => self.show_defines,
			EdgeType::BelongsTo => self.show_belongs_to,
			EdgeType::WorksFor => self.show_works_for,
			EdgeType::LocatedIn => self.show_located_in,
		}
	}

	/// Absent flags allow.
	pub fn allows_type(&self, edge_type: EdgeType) -> bool {
		self.flag(edge_type).unwrap_or(true)
	}

	/// Type and weight check for one link. Unknown and unlabeled types only face the weight check.
	pub fn allows(&self, link: &GraphLink) -> bool {
		let type_ok = link
			.label
			.as_deref()
			.and_then(EdgeType::parse)
			.is_none_or(|t| self.allows_type(t));
		let weight_ok = link.weight.is_none_or(|w| w >= self.min_weight);
		type_ok && weight_ok
	}

	/// Copy with one type switched on or off.
	pub fn with_type(&self, edge_type: EdgeType, show: bool) -> Self {
		let mut next = self.clone();
		match edge_type {
			EdgeType::RelatesTo => next.show_relates_to = show,
			EdgeType::CoOccurs => next.show_co_occurs = show,
			EdgeType::MentionedIn => next.show_mentioned_in = show,
			EdgeType::HasSection => next.show_has_section = Some(show),
			EdgeType::Defines => next.show_defines = Some(show),
			EdgeType::BelongsTo => next.show_belongs_to = Some(show),
			EdgeType::WorksFor => next.show_works_for = Some(show),
			EdgeType::LocatedIn => next.show_located_in = Some(show),
		}
		next
	}

	/// Clamped to `[0, 1]`; NaN resets to 0.
	pub fn with_min_weight(&self, min_weight: f64) -> Self {
		let min_weight = if min_weight.is_nan() {
			0.0
		} else {
			min_weight.clamp(0.0, 1.0)
		};
		Self {
			min_weight,
			..self.clone()
		}
	}
}

/// Drop links hidden by `filters`. `None` passes the data through unchanged.
pub fn filter_edges(data: &GraphData, filters: Option<&EdgeFilters>) -> GraphData {
	let Some(filters) = filters else {
		return data.clone();
	};
	GraphData {
		nodes: data.nodes.clone(),
		links: data
			.links
			.iter()
			.filter(|link| filters.allows(link))
			.cloned()
			.collect(),
	}
}

/// Canonical edge-type names the legend currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleEdgeTypes(BTreeSet<String>);

fn type_key(edge_type: &str) -> String {
	canonical_edge_type(edge_type).unwrap_or_default()
}

impl VisibleEdgeTypes {
	/// Set holding every given type.
	pub fn all<I, S>(types: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self(types.into_iter().map(|t| type_key(t.as_ref())).collect())
	}

	/// Whether `edge_type` is shown.
	pub fn contains(&self, edge_type: &str) -> bool {
		self.0.contains(&type_key(edge_type))
	}

	/// Flip one type's membership.
	pub fn toggle(&mut self, edge_type: &str) {
		let key = type_key(edge_type);
		if !self.0.remove(&key) {
			self.0.insert(key);
		}
	}

	/// Number of shown types.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Nothing shown.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Shown types in sorted order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

/// Whether the visible set lets `link` through.
///
/// Links whose type is not in `known` fall under the catch-all type, which
/// has no legend row and is always drawn.
pub fn is_drawn(link: &GraphLink, visible: &VisibleEdgeTypes, known: &[String]) -> bool {
	match link.edge_type() {
		Some(t) if known.iter().any(|k| type_key(k) == t) => visible.contains(&t),
		_ => true,
	}
}

/// The edge set the canvas and the stats panel see.
pub fn visible_links(
	data: &GraphData,
	filters: Option<&EdgeFilters>,
	visible: &VisibleEdgeTypes,
	known: &[String],
) -> GraphData {
	let mut filtered = filter_edges(data, filters);
	filtered.links.retain(|link| is_drawn(link, visible, known));
	filtered
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_visualization::types::GraphNode;

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: format!("Node {id}"),
			node_type: "ENTITY".into(),
			degree: None,
		}
	}

	fn link(label: Option<&str>, weight: Option<f64>) -> GraphLink {
		GraphLink {
			source: "1".into(),
			target: "2".into(),
			label: label.map(String::from),
			weight,
		}
	}

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![node("1"), node("2")],
			links: vec![
				link(Some("RELATES_TO"), Some(0.8)),
				link(Some("co_occurs"), Some(0.3)),
				link(Some("MENTIONED_IN"), None),
				link(Some("HAS_SECTION"), Some(0.95)),
				link(Some("SIBLING_OF"), Some(0.1)),
				link(None, Some(0.6)),
			],
		}
	}

	#[test]
	fn no_filters_is_identity() {
		let data = sample();
		assert_eq!(filter_edges(&data, None), data);
	}

	#[test]
	fn weight_threshold_example() {
		let data = GraphData {
			nodes: vec![node("1"), node("2")],
			links: vec![link(Some("RELATES_TO"), Some(0.8))],
		};
		let strict = EdgeFilters::default().with_min_weight(0.9);
		assert!(filter_edges(&data, Some(&strict)).links.is_empty());
		let loose = EdgeFilters::default().with_min_weight(0.7);
		assert_eq!(filter_edges(&data, Some(&loose)).links.len(), 1);
	}

	#[test]
	fn disabled_type_is_dropped_case_insensitively() {
		let filters = EdgeFilters::default().with_type(EdgeType::CoOccurs, false);
		let out = filter_edges(&sample(), Some(&filters));
		assert_eq!(out.links.len(), 5);
		assert!(out.links.iter().all(|l| l.label.as_deref() != Some("co_occurs")));
		assert_eq!(out.nodes.len(), 2);
	}

	#[test]
	fn unknown_types_only_face_the_weight_check() {
		let filters = EdgeFilters {
			show_relates_to: false,
			show_co_occurs: false,
			show_mentioned_in: false,
			..EdgeFilters::extended().with_type(EdgeType::HasSection, false)
		};
		let out = filter_edges(&sample(), Some(&filters));
		let labels: Vec<_> = out.links.iter().map(|l| l.label.clone()).collect();
		assert_eq!(labels, vec![Some("SIBLING_OF".to_string()), None]);

		let out = filter_edges(&sample(), Some(&filters.with_min_weight(0.5)));
		assert_eq!(out.links.len(), 1);
		assert_eq!(out.links[0].label, None);
	}

	#[test]
	fn absent_extended_flag_lets_edges_pass() {
		let filters = EdgeFilters::default();
		assert_eq!(filters.flag(EdgeType::HasSection), None);
		assert!(filters.allows(&link(Some("has-section"), None)));
	}

	#[test]
	fn result_matches_membership_rule() {
		let data = sample();
		let filters = EdgeFilters::extended()
			.with_type(EdgeType::RelatesTo, false)
			.with_type(EdgeType::Defines, false)
			.with_min_weight(0.25);
		let out = filter_edges(&data, Some(&filters));
		for l in &data.links {
			let type_ok = match l.label.as_deref().and_then(EdgeType::parse) {
				Some(t) => filters.flag(t).unwrap_or(true),
				None => true,
			};
			let weight_ok = l.weight.is_none_or(|w| w >= 0.25);
			assert_eq!(out.links.contains(l), type_ok && weight_ok, "{l:?}");
		}
		assert!(out.links.iter().all(|l| data.links.contains(l)));
	}

	#[test]
	fn min_weight_is_clamped() {
		assert_eq!(EdgeFilters::default().with_min_weight(3.0).min_weight, 1.0);
		assert_eq!(EdgeFilters::default().with_min_weight(-1.0).min_weight, 0.0);
		assert_eq!(EdgeFilters::default().with_min_weight(f64::NAN).min_weight, 0.0);
	}

	#[test]
	fn edge_type_parse_accepts_variants() {
		assert_eq!(EdgeType::parse("relates_to"), Some(EdgeType::RelatesTo));
		assert_eq!(EdgeType::parse("Co-Occurs"), Some(EdgeType::CoOccurs));
		assert_eq!(EdgeType::parse("located in"), Some(EdgeType::LocatedIn));
		assert_eq!(EdgeType::parse("KNOWS"), None);
	}

	#[test]
	fn filters_serialize_camel_case() {
		let json = serde_json::to_value(EdgeFilters::default().with_min_weight(0.5)).unwrap();
		assert_eq!(json["showRelatesTo"], true);
		assert_eq!(json["minWeight"], 0.5);
		assert!(json.get("showDefines").is_none());

		let parsed: EdgeFilters = serde_json::from_str(
			r#"{"showRelatesTo": true, "showCoOccurs": false, "showMentionedIn": true, "showWorksFor": false}"#,
		)
		.unwrap();
		assert!(!parsed.allows_type(EdgeType::CoOccurs));
		assert!(!parsed.allows_type(EdgeType::WorksFor));
		assert!(parsed.allows_type(EdgeType::Defines));
	}

	#[test]
	fn double_toggle_restores_membership() {
		let mut visible = VisibleEdgeTypes::all(["RELATES_TO", "CO_OCCURS"]);
		let before = visible.clone();
		visible.toggle("relates_to");
		assert!(!visible.contains("RELATES_TO"));
		visible.toggle("RELATES_TO");
		assert_eq!(visible, before);

		visible.toggle("DEFINES");
		visible.toggle("DEFINES");
		assert_eq!(visible, before);
	}

	#[test]
	fn visible_set_intersects_filtered_edges() {
		let known: Vec<String> = ["RELATES_TO", "CO_OCCURS", "MENTIONED_IN", "HAS_SECTION"]
			.map(String::from)
			.to_vec();
		let mut visible = VisibleEdgeTypes::all(&known);
		visible.toggle("MENTIONED_IN");
		let filters = EdgeFilters::default().with_type(EdgeType::RelatesTo, false);

		let out = visible_links(&sample(), Some(&filters), &visible, &known);
		let labels: Vec<_> = out.links.iter().filter_map(|l| l.label.clone()).collect();
		assert_eq!(labels, vec!["co_occurs", "HAS_SECTION", "SIBLING_OF"]);
		// the unlabeled link rides the catch-all type
		assert_eq!(out.links.len(), 4);
	}

	#[test]
	fn spelled_out_labels_share_the_legend_type() {
		let known: Vec<String> = ["RELATES_TO", "CO_OCCURS"].map(String::from).to_vec();
		let mut visible = VisibleEdgeTypes::all(&known);
		visible.toggle("CO_OCCURS");
		let hyphenated = link(Some("co-occurs"), Some(0.5));
		let spaced = link(Some("relates to"), Some(0.5));

		assert_eq!(hyphenated.edge_type().as_deref(), Some("CO_OCCURS"));
		assert!(!is_drawn(&hyphenated, &visible, &known));
		assert!(is_drawn(&spaced, &visible, &known));

		visible.toggle("relates to");
		assert!(!visible.contains("RELATES_TO"));
		assert!(!is_drawn(&spaced, &visible, &known));

		let filters = EdgeFilters::default().with_type(EdgeType::CoOccurs, false);
		assert!(!filters.allows(&hyphenated));
	}
}
