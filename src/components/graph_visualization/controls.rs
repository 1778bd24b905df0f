use leptos::prelude::*;

/// Button bar over the canvas.
#[component]
pub fn GraphControls(
	/// Zoom in one step.
	on_zoom_in: Callback<()>,
	/// Zoom out one step.
	on_zoom_out: Callback<()>,
	/// Fit all nodes in view.
	on_fit: Callback<()>,
	/// Back to the initial view.
	on_reset: Callback<()>,
	/// Download the canvas as PNG.
	on_export: Callback<()>,
	/// Enter or leave fullscreen.
	on_fullscreen: Callback<()>,
	/// Picks the fullscreen button's icon.
	#[prop(into)]
	is_fullscreen: Signal<bool>,
) -> impl IntoView {
	view! {
		<div class="graph-controls" role="toolbar">
			<button title="Zoom in" aria-label="Zoom in" on:click=move |_| on_zoom_in.run(())>
				"+"
			</button>
			<button title="Zoom out" aria-label="Zoom out" on:click=move |_| on_zoom_out.run(())>
				"−"
			</button>
			<button title="Fit to view" aria-label="Fit to view" on:click=move |_| on_fit.run(())>
				"⤢"
			</button>
			<button title="Reset view" aria-label="Reset view" on:click=move |_| on_reset.run(())>
				"⟲"
			</button>
			<button title="Export PNG" aria-label="Export PNG" on:click=move |_| on_export.run(())>
				"PNG"
			</button>
			<button
				title=move || if is_fullscreen.get() { "Exit fullscreen" } else { "Fullscreen" }
				aria-label=move || if is_fullscreen.get() { "Exit fullscreen" } else { "Fullscreen" }
				on:click=move |_| on_fullscreen.run(())
			>
				{move || if is_fullscreen.get() { "⤡" } else { "⛶" }}
			</button>
		</div>
	}
}

/// Node and edge counts of what is drawn.
#[component]
pub fn GraphStatsPanel(
	/// Node count.
	#[prop(into)]
	nodes: Signal<usize>,
	/// Edge count after filtering.
	#[prop(into)]
	edges: Signal<usize>,
) -> impl IntoView {
	view! {
		<div class="graph-stats">
			<span>{move || format!("Nodes: {}", nodes.get())}</span>
			<span>{move || format!("Edges: {}", edges.get())}</span>
		</div>
	}
}
