use leptos::prelude::*;

use super::filter::VisibleEdgeTypes;

/// Known types currently hidden, in legend order.
pub fn types_to_show(known: &[(String, String)], visible: &VisibleEdgeTypes) -> Vec<String> {
	known
		.iter()
		.filter(|(t, _)| !visible.contains(t))
		.map(|(t, _)| t.clone())
		.collect()
}

/// Known types currently shown, in legend order.
pub fn types_to_hide(known: &[(String, String)], visible: &VisibleEdgeTypes) -> Vec<String> {
	known
		.iter()
		.filter(|(t, _)| visible.contains(t))
		.map(|(t, _)| t.clone())
		.collect()
}

fn pretty(edge_type: &str) -> String {
	edge_type.replace('_', " ").to_lowercase()
}

/// Toggle list of edge types. The visible set lives with the parent; every
/// action here is replayed through `on_toggle`, one type at a time.
#[component]
pub fn GraphLegend(
	/// Edge type and color, one row each.
	colors: Vec<(String, String)>,
	/// Types currently drawn.
	#[prop(into)]
	visible: Signal<VisibleEdgeTypes>,
	/// Flips one type.
	on_toggle: Callback<String>,
) -> impl IntoView {
	let known = StoredValue::new(colors.clone());

	let show_all = move |_| {
		let hidden = known.with_value(|k| types_to_show(k, &visible.get_untracked()));
		for t in hidden {
			on_toggle.run(t);
		}
	};
	let hide_all = move |_| {
		let shown = known.with_value(|k| types_to_hide(k, &visible.get_untracked()));
		for t in shown {
			on_toggle.run(t);
		}
	};

	let rows = colors
		.into_iter()
		.map(|(edge_type, color)| {
			let key = edge_type.clone();
			let is_on = move || visible.with(|v| v.contains(&key));
			let toggled = edge_type.clone();
			view! {
				<button
					class="legend-item"
					class:legend-item-hidden=move || !is_on()
					title=format!("Toggle {}", pretty(&edge_type))
					on:click=move |_| on_toggle.run(toggled.clone())
				>
					<span class="legend-swatch" style=format!("background-color: {}", color)></span>
					<span class="legend-label">{pretty(&edge_type)}</span>
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="graph-legend">
			<h3>"Edge types"</h3>
			<div class="legend-items">{rows}</div>
			<div class="legend-actions">
				<button on:click=show_all>"Show All"</button>
				<button on:click=hide_all>"Hide All"</button>
			</div>
		</div>
	}
}
