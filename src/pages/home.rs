use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error as log_error};

use crate::api::{GraphQuery, fetch_graph};
use crate::components::graph_visualization::{EdgeFilters, GraphData, GraphVisualization};
use crate::config::ApiConfig;
use crate::error::GraphError;

/// Query page: asks the backend for a graph and shows it.
#[component]
pub fn Home() -> impl IntoView {
	let config = StoredValue::new(use_context::<ApiConfig>().unwrap_or_else(ApiConfig::from_build_env));
	let data = RwSignal::new(None::<GraphData>);
	let loading = RwSignal::new(false);
	let error = RwSignal::new(None::<GraphError>);
	let filters = RwSignal::new(EdgeFilters::extended());
	let query_text = RwSignal::new(String::new());
	// bumped per request; only the latest response is applied
	let generation = StoredValue::new(0u64);

	let run_query = move |query: GraphQuery| {
		generation.update_value(|g| *g += 1);
		let ticket = generation.get_value();
		loading.set(true);
		error.set(None);
		let cfg = config.get_value();
		spawn_local(async move {
			let result = fetch_graph(&cfg, &query).await;
			if generation.try_get_value() != Some(ticket) {
				debug!("dropping stale graph response #{}", ticket);
				return;
			}
			match result {
				Ok(graph) => {
					let _ = data.try_set(Some(graph));
				}
				Err(e) => {
					log_error!("graph request failed: {}", e);
					let _ = error.try_set(Some(e));
				}
			}
			let _ = loading.try_set(false);
		});
	};

	run_query(GraphQuery::default());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		run_query(GraphQuery::text(query_text.get_untracked()));
	};
	let on_node_click = Callback::new(move |node_id: String| {
		debug!("expanding around node {}", node_id);
		run_query(GraphQuery::around(node_id));
	});
	let on_filter_change = Callback::new(move |next: EdgeFilters| filters.set(next));

	view! {
		<div class="graph-page">
			<form class="graph-query" on:submit=on_submit>
				<input
					type="search"
					placeholder="Search the knowledge graph"
					prop:value=move || query_text.get()
					on:input=move |ev| query_text.set(event_target_value(&ev))
				/>
				<button type="submit" disabled=move || loading.get()>
					"Search"
				</button>
			</form>
			<div class="graph-panel">
				<GraphVisualization
					data=data
					loading=loading
					error=error
					edge_filters=Signal::derive(move || Some(filters.get()))
					on_edge_filter_change=on_filter_change
					on_node_click=on_node_click
				/>
			</div>
		</div>
	}
}
