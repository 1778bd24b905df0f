use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::palette;
use super::types::{GraphData, GraphLink, GraphNode};

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Edge hover tolerance in screen pixels.
pub const EDGE_HIT_PX: f64 = 6.0;
/// Scale step of the zoom buttons and the wheel.
pub const ZOOM_FACTOR: f64 = 1.2;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
const FIT_PADDING: f64 = 40.0;
const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	pub radius: f64,
}

/// An edge that survived filtering and has both endpoints on the canvas.
#[derive(Clone, Debug)]
pub struct DrawnEdge {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub source_label: String,
	pub target_label: String,
	pub edge_type: Option<String>,
	pub label: Option<String>,
	pub weight: Option<f64>,
	pub color: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	pub edge: Option<usize>,
	delay_t: f64,
}

/// What the simulation is built from: node ids and link endpoints.
#[derive(Clone, Debug, Default, PartialEq)]
struct LayoutKey {
	nodes: Vec<String>,
	links: Vec<(String, String)>,
}

impl LayoutKey {
	fn of(data: &GraphData) -> Self {
		Self {
			nodes: data.nodes.iter().map(|n| n.id.clone()).collect(),
			links: data
				.links
				.iter()
				.map(|l| (l.source.id().to_string(), l.target.id().to_string()))
				.collect(),
		}
	}
}

pub struct GraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<DrawnEdge>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	layout: Option<LayoutKey>,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

/// Node radius grows with the log of its degree.
pub fn node_radius(degree: u32) -> f64 {
	NODE_RADIUS * (1.0 + 0.35 * (1.0 + degree as f64).ln()).min(3.0)
}

fn link_degrees(data: &GraphData) -> HashMap<&str, u32> {
	let mut degrees: HashMap<&str, u32> = HashMap::new();
	for link in &data.links {
		*degrees.entry(link.source.id()).or_default() += 1;
		*degrees.entry(link.target.id()).or_default() += 1;
	}
	degrees
}

fn node_info(node: &GraphNode, degrees: &HashMap<&str, u32>) -> NodeInfo {
	let degree = node
		.degree
		.unwrap_or_else(|| degrees.get(node.id.as_str()).copied().unwrap_or(0));
	NodeInfo {
		id: node.id.clone(),
		label: node.display_label().to_string(),
		color: palette::node_color(&node.node_type).to_string(),
		radius: node_radius(degree),
	}
}

impl GraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			edges: Vec::new(),
			id_to_idx: HashMap::new(),
			layout: None,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		};
		state.set_data(data);
		state
	}

	/// Lay out `data` and draw all of its links.
	pub fn set_data(&mut self, data: &GraphData) {
		self.set_layout(data);
		self.set_drawn_links(&data.links);
	}

	/// Feed `data` to the simulation without touching the view transform.
	///
	/// The simulation is only rebuilt when node ids or link endpoints
	/// change; then nodes whose id is still present keep their position.
	/// Otherwise the running layout carries on and only node labels,
	/// colors and sizes are refreshed. Returns whether it was rebuilt.
	pub fn set_layout(&mut self, data: &GraphData) -> bool {
		let key = LayoutKey::of(data);
		let degrees = link_degrees(data);
		if self.layout.as_ref() == Some(&key) {
			let by_id: HashMap<&str, &GraphNode> =
				data.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
			self.graph.visit_nodes_mut(|node| {
				if let Some(n) = by_id.get(node.data.user_data.id.as_str()) {
					node.data.user_data = node_info(n, &degrees);
				}
			});
			return false;
		}

		let mut previous: HashMap<String, (f32, f32)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});

		let mut graph = simulation();
		let mut id_to_idx = HashMap::with_capacity(data.nodes.len());
		let count = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y) = previous.get(&node.id).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count;
				((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32)
			});
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: node_info(node, &degrees),
			});
			id_to_idx.insert(node.id.clone(), idx);
		}
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.id()),
				id_to_idx.get(link.target.id()),
			) {
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}

		self.graph = graph;
		self.id_to_idx = id_to_idx;
		self.layout = Some(key);
		self.edges.clear();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
		self.animation_running = true;
		true
	}

	/// Replace the drawn edges. Links with an endpoint missing from the
	/// layout are skipped; the simulation is left alone.
	pub fn set_drawn_links(&mut self, links: &[GraphLink]) {
		let mut labels: HashMap<DefaultNodeIdx, String> = HashMap::new();
		self.graph.visit_nodes(|node| {
			labels.insert(node.index(), node.data.user_data.label.clone());
		});
		let mut edges = Vec::with_capacity(links.len());
		for link in links {
			if let (Some(&src), Some(&tgt)) = (
				self.id_to_idx.get(link.source.id()),
				self.id_to_idx.get(link.target.id()),
			) {
				let edge_type = link.edge_type();
				edges.push(DrawnEdge {
					source: src,
					target: tgt,
					source_label: labels.get(&src).cloned().unwrap_or_default(),
					target_label: labels.get(&tgt).cloned().unwrap_or_default(),
					color: palette::edge_color(edge_type.as_deref()),
					edge_type,
					label: link.label.clone(),
					weight: link.weight,
				});
			}
		}
		self.edges = edges;
		self.hover.edge = None;
		// neighbour highlight follows the drawn edges
		if let Some(idx) = self.hover.node {
			self.hover.neighbors = self.neighbors_of(idx);
		}
	}

	pub fn edges(&self) -> &[DrawnEdge] {
		&self.edges
	}

	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn node_position(&self, id: &str) -> Option<(f64, f64)> {
		let idx = *self.id_to_idx.get(id)?;
		self.positions().get(&idx).copied()
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::with_capacity(self.id_to_idx.len());
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	pub fn node_radii(&self) -> HashMap<DefaultNodeIdx, f64> {
		let mut out = HashMap::with_capacity(self.id_to_idx.len());
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), node.data.user_data.radius);
		});
		out
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// world-space, scales with zoom like nodes
			let hit = HIT_RADIUS.max(node.data.user_data.radius + 4.0);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	/// Closest drawn edge within [`EDGE_HIT_PX`] of the screen point.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let tolerance = EDGE_HIT_PX / self.transform.k;
		let positions = self.positions();
		self.edges
			.iter()
			.enumerate()
			.filter_map(|(i, e)| {
				let a = positions.get(&e.source)?;
				let b = positions.get(&e.target)?;
				let d = distance_to_segment((gx, gy), *a, *b);
				(d <= tolerance).then_some((i, d))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| i)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old highlight around for the fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			self.hover.neighbors = self.neighbors_of(idx);
		}
	}

	fn neighbors_of(&self, idx: DefaultNodeIdx) -> HashSet<DefaultNodeIdx> {
		self.edges
			.iter()
			.filter_map(|e| {
				if e.source == idx {
					Some(e.target)
				} else if e.target == idx {
					Some(e.source)
				} else {
					None
				}
			})
			.collect()
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, x: f64, y: f64) {
		self.drag.active = true;
		self.drag.moved = false;
		self.drag.node_idx = Some(idx);
		self.drag.start_x = x;
		self.drag.start_y = y;
		let (mut nx, mut ny) = (0.0, 0.0);
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				(nx, ny) = (node.x(), node.y());
			}
		});
		self.drag.node_start_x = nx;
		self.drag.node_start_y = ny;
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan.active = true;
		self.pan.start_x = x;
		self.pan.start_y = y;
		self.pan.transform_start_x = self.transform.x;
		self.pan.transform_start_y = self.transform.y;
	}

	/// Pointer moved to screen `(x, y)`; drives drag, pan and hover.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
			self.hover.edge = if hovered.is_none() && !self.pan.active {
				self.edge_at_position(x, y)
			} else {
				None
			};
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let (sx, sy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && (sx * sx + sy * sy).sqrt() < CLICK_SLOP {
				return;
			}
			self.drag.moved = true;
			let (nx, ny) = (
				self.drag.node_start_x + (sx / self.transform.k) as f32,
				self.drag.node_start_y + (sy / self.transform.k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// End any drag or pan. Returns the node id when the press was a click.
	pub fn release(&mut self) -> Option<String> {
		let clicked = match (self.drag.active, self.drag.moved, self.drag.node_idx) {
			(true, false, Some(idx)) => self.node_id(idx),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn pointer_left(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.hover.edge = None;
		self.set_hover(None);
	}

	/// Scale about screen point `(x, y)`.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// One wheel notch at `(x, y)`: scrolling down zooms out.
	pub fn wheel_zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		if delta_y > 0.0 {
			self.zoom_at(x, y, 1.0 / ZOOM_FACTOR);
		} else if delta_y < 0.0 {
			self.zoom_at(x, y, ZOOM_FACTOR);
		}
	}

	pub fn zoom_in(&mut self) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, ZOOM_FACTOR);
	}

	pub fn zoom_out(&mut self) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, 1.0 / ZOOM_FACTOR);
	}

	/// Scale and center so every node is on screen.
	pub fn fit(&mut self) {
		let positions = self.positions();
		if positions.is_empty() {
			self.reset();
			return;
		}
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for &(x, y) in positions.values() {
			min_x = min_x.min(x);
			min_y = min_y.min(y);
			max_x = max_x.max(x);
			max_y = max_y.max(y);
		}
		let (bw, bh) = ((max_x - min_x).max(1.0), (max_y - min_y).max(1.0));
		let avail_w = (self.width - 2.0 * FIT_PADDING).max(1.0);
		let avail_h = (self.height - 2.0 * FIT_PADDING).max(1.0);
		let k = (avail_w / bw).min(avail_h / bh).clamp(MIN_ZOOM, MAX_ZOOM);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	/// Unit scale with the graph origin at the canvas center.
	pub fn reset(&mut self) {
		self.transform = ViewTransform {
			x: self.width / 2.0,
			y: self.height / 2.0,
			k: 1.0,
		};
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len2 = dx * dx + dy * dy;
	let t = if len2 < 1e-9 {
		0.0
	} else {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_visualization::types::{GraphLink, GraphNode};

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: id.to_uppercase(),
			node_type: "CONCEPT".into(),
			degree: None,
		}
	}

	fn link(s: &str, t: &str) -> GraphLink {
		GraphLink {
			source: s.into(),
			target: t.into(),
			label: Some("RELATES_TO".into()),
			weight: Some(0.5),
		}
	}

	fn data(ids: &[&str], links: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: ids.iter().map(|id| node(id)).collect(),
			links: links.iter().map(|(s, t)| link(s, t)).collect(),
		}
	}

	#[test]
	fn dangling_links_are_not_drawn() {
		let state = GraphState::new(&data(&["a", "b"], &[("a", "b"), ("a", "zz")]), 800.0, 600.0);
		assert_eq!(state.node_count(), 2);
		assert_eq!(state.edges().len(), 1);
		assert_eq!(state.edges()[0].source_label, "A");
		assert_eq!(state.edges()[0].color, "#64b4ff");
	}

	#[test]
	fn set_data_keeps_view_and_surviving_positions() {
		let mut state = GraphState::new(&data(&["a", "b"], &[("a", "b")]), 800.0, 600.0);
		state.zoom_in();
		state.transform.x += 25.0;
		let view = state.transform.clone();
		let a = state.node_position("a").unwrap();

		state.set_data(&data(&["a", "c"], &[]));

		assert_eq!(state.transform, view);
		assert_eq!(state.node_position("a"), Some(a));
		assert_eq!(state.node_position("b"), None);
		assert!(state.node_position("c").is_some());
		assert!(state.edges().is_empty());
	}

	#[test]
	fn zoom_in_then_out_returns_to_scale() {
		let mut state = GraphState::new(&data(&["a"], &[]), 800.0, 600.0);
		state.zoom_in();
		assert!((state.transform.k - ZOOM_FACTOR).abs() < 1e-9);
		state.zoom_out();
		assert!((state.transform.k - 1.0).abs() < 1e-9);
		assert!((state.transform.x - 400.0).abs() < 1e-9);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = GraphState::new(&data(&["a"], &[]), 800.0, 600.0);
		for _ in 0..100 {
			state.zoom_in();
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
	}

	#[test]
	fn reset_centers_origin_at_unit_scale() {
		let mut state = GraphState::new(&data(&["a"], &[]), 800.0, 600.0);
		state.zoom_at(10.0, 10.0, 3.0);
		state.reset();
		assert_eq!(
			state.transform,
			ViewTransform {
				x: 400.0,
				y: 300.0,
				k: 1.0
			}
		);
	}

	#[test]
	fn fit_brings_all_nodes_on_screen() {
		let ids: Vec<String> = (0..40).map(|i| i.to_string()).collect();
		let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
		let mut state = GraphState::new(&data(&refs, &[]), 200.0, 200.0);
		state.zoom_at(0.0, 0.0, 8.0);
		state.fit();
		for (x, y) in state.positions().values() {
			let sx = x * state.transform.k + state.transform.x;
			let sy = y * state.transform.k + state.transform.y;
			assert!((0.0..=200.0).contains(&sx), "x {sx}");
			assert!((0.0..=200.0).contains(&sy), "y {sy}");
		}
	}

	#[test]
	fn press_without_motion_is_a_click() {
		let mut state = GraphState::new(&data(&["a"], &[]), 800.0, 600.0);
		let (x, y) = state.node_position("a").unwrap();
		let (sx, sy) = (x + state.transform.x, y + state.transform.y);
		let idx = state.node_at_position(sx, sy).unwrap();

		state.begin_drag(idx, sx, sy);
		state.pointer_moved(sx + 1.0, sy);
		assert_eq!(state.release(), Some("a".to_string()));

		state.begin_drag(idx, sx, sy);
		state.pointer_moved(sx + 30.0, sy);
		assert_eq!(state.release(), None);
		let (nx, _) = state.node_position("a").unwrap();
		assert!((nx - (x + 30.0)).abs() < 1e-3);
	}

	#[test]
	fn edge_hit_test_finds_nearby_segment() {
		let state = GraphState::new(&data(&["a", "b"], &[("a", "b")]), 800.0, 600.0);
		let (ax, ay) = state.node_position("a").unwrap();
		let (bx, by) = state.node_position("b").unwrap();
		let (mx, my) = ((ax + bx) / 2.0, (ay + by) / 2.0);
		let (sx, sy) = (mx + state.transform.x, my + state.transform.y);
		assert_eq!(state.edge_at_position(sx, sy), Some(0));
		assert_eq!(state.edge_at_position(sx, sy + 200.0), None);
	}

	#[test]
	fn degree_drives_radius() {
		let mut d = data(&["hub", "x", "y", "z"], &[("hub", "x"), ("hub", "y"), ("hub", "z")]);
		d.nodes[1].degree = Some(0);
		let state = GraphState::new(&d, 800.0, 600.0);
		let mut radii = HashMap::new();
		state.graph.visit_nodes(|n| {
			radii.insert(n.data.user_data.id.clone(), n.data.user_data.radius);
		});
		assert!(radii["hub"] > radii["y"]);
		assert_eq!(radii["x"], NODE_RADIUS);
	}

	#[test]
	fn hiding_edges_leaves_the_layout_running() {
		let full = data(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
		let mut state = GraphState::new(&full, 800.0, 600.0);
		for _ in 0..10 {
			state.tick(0.016);
		}
		let before = state.positions();

		assert!(!state.set_layout(&full));
		state.set_drawn_links(&full.links[..1]);

		assert_eq!(state.edges().len(), 1);
		assert_eq!(state.positions(), before);
		assert_eq!(state.node_count(), 3);
	}

	#[test]
	fn new_structure_rebuilds_the_layout() {
		let mut state = GraphState::new(&data(&["a", "b"], &[("a", "b")]), 800.0, 600.0);
		assert!(state.set_layout(&data(&["a", "b"], &[])));
		assert!(state.set_layout(&data(&["a", "b", "c"], &[])));
		assert!(!state.set_layout(&data(&["a", "b", "c"], &[])));
	}

	#[test]
	fn relabeled_nodes_refresh_in_place() {
		let mut renamed = data(&["a", "b"], &[("a", "b")]);
		let mut state = GraphState::new(&renamed, 800.0, 600.0);
		renamed.nodes[0].label = "Alpha".into();

		assert!(!state.set_layout(&renamed));
		state.set_drawn_links(&renamed.links);
		assert_eq!(state.edges()[0].source_label, "Alpha");
	}

	#[test]
	fn wheel_steps_match_the_buttons() {
		let mut state = GraphState::new(&data(&["a"], &[]), 800.0, 600.0);
		state.wheel_zoom(400.0, 300.0, -120.0);
		assert!((state.transform.k - ZOOM_FACTOR).abs() < 1e-9);
		state.wheel_zoom(400.0, 300.0, 120.0);
		assert!((state.transform.k - 1.0).abs() < 1e-9);
		state.wheel_zoom(400.0, 300.0, 0.0);
		assert!((state.transform.k - 1.0).abs() < 1e-9);
	}
}
