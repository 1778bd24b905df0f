use leptos::prelude::*;
use log::info;

use crate::components::graph_visualization::{
	EdgeFilters, EdgeType, GraphData, GraphLink, GraphNode, GraphVisualization,
};

const NODE_TYPES: &[&str] = &[
	"CONCEPT",
	"DOCUMENT",
	"SECTION",
	"PERSON",
	"ORGANIZATION",
	"LOCATION",
	"TECHNOLOGY",
];

/// Generate a sample knowledge graph (random tree with typed, weighted links).
pub fn generate_sample_data(n: usize) -> GraphData {
	let nodes: Vec<GraphNode> = (0..n)
		.map(|i| {
			let node_type = NODE_TYPES[i % NODE_TYPES.len()];
			GraphNode {
				id: i.to_string(),
				label: format!("{} {}", title_case(node_type), i),
				node_type: node_type.to_string(),
				degree: None,
			}
		})
		.collect();

	let links: Vec<GraphLink> = (1..n)
		.map(|i| {
			let target = (rand_simple(i) * (i as f64)) as usize;
			// every 11th link is unlabeled to exercise the catch-all type
			let label = (i % 11 != 0)
				.then(|| EdgeType::ALL[i % EdgeType::ALL.len()].as_str().to_string());
			GraphLink {
				source: i.to_string().as_str().into(),
				target: target.to_string().as_str().into(),
				label,
				weight: Some((rand_simple(i * 7) * 100.0).round() / 100.0),
			}
		})
		.collect();

	GraphData { nodes, links }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn title_case(s: &str) -> String {
	let lower = s.to_lowercase();
	let mut chars = lower.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Offline page backed by generated data.
#[component]
pub fn Demo() -> impl IntoView {
	let data = generate_sample_data(120);
	info!("demo graph: {} nodes, {} links", data.nodes.len(), data.links.len());
	let data = Signal::stored(Some(data));
	let filters = RwSignal::new(EdgeFilters::extended());
	let on_filter_change = Callback::new(move |next: EdgeFilters| filters.set(next));
	let selected = RwSignal::new(None::<String>);
	let on_node_click = Callback::new(move |id: String| selected.set(Some(id)));

	view! {
		<div class="fullscreen-graph">
			<GraphVisualization
				data=data
				edge_filters=Signal::derive(move || Some(filters.get()))
				on_edge_filter_change=on_filter_change
				on_node_click=on_node_click
			/>
			<div class="graph-overlay">
				<h1>"Knowledge Graph Demo"</h1>
				<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Hover an edge for details."</p>
				{move || selected.get().map(|id| view! { <p class="selected">"Selected node: " {id}</p> })}
			</div>
		</div>
	}
}
