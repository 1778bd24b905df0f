use leptos::prelude::*;
use log::warn;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::controls::{GraphControls, GraphStatsPanel};
use super::filter::{EdgeFilters, VisibleEdgeTypes, visible_links};
use super::filter_panel::EdgeFilterPanel;
use super::legend::GraphLegend;
use super::palette;
use super::state::GraphState;
use super::surface::{RenderSurface, toggle_fullscreen};
use super::tooltip::{EdgeTooltip, TooltipContent};
use super::types::GraphData;
use crate::error::GraphError;

/// Overlay text while a request is in flight.
pub const LOADING_TEXT: &str = "Loading graph...";
/// Overlay text when there is nothing to draw.
pub const EMPTY_TEXT: &str = "No graph data available";

/// What the visualization shows, in priority order.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewPhase {
	/// A request is in flight.
	Loading,
	/// The last request failed; carries the message to show.
	Error(String),
	/// No data, or data with no nodes.
	Empty,
	/// The canvas is showing the graph.
	Ready,
}

impl ViewPhase {
	/// Loading wins over error, error over data.
	pub fn resolve(loading: bool, error: Option<&GraphError>, data: Option<&GraphData>) -> Self {
		if loading {
			return ViewPhase::Loading;
		}
		if let Some(err) = error {
			return ViewPhase::Error(err.to_string());
		}
		match data {
			Some(d) if !d.is_empty() => ViewPhase::Ready,
			_ => ViewPhase::Empty,
		}
	}
}

type Surface = StoredValue<Option<RenderSurface>, LocalStorage>;

fn with_graph<R>(surface: Surface, f: impl FnOnce(&mut GraphState) -> R) -> Option<R> {
	surface
		.try_with_value(|s| s.as_ref().map(|s| s.with_state(f)))
		.flatten()
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed view of a knowledge graph.
///
/// `edge_filters` is controlled by the caller and only changes through
/// `on_edge_filter_change`. The legend's visible edge types are owned here.
/// The canvas surface is built once per mount; data, filter and legend
/// changes are pushed into it without recreating it, so pan and zoom survive.
#[component]
pub fn GraphVisualization(
	/// Graph to draw.
	#[prop(into)]
	data: Signal<Option<GraphData>>,
	/// Shows the loading overlay.
	#[prop(into, default = Signal::stored(false))]
	loading: Signal<bool>,
	/// Shows the error overlay.
	#[prop(into, default = Signal::stored(None))]
	error: Signal<Option<GraphError>>,
	/// Controlled edge criteria; `None` draws every edge.
	#[prop(into, default = Signal::stored(None))]
	edge_filters: Signal<Option<EdgeFilters>>,
	/// Receives edits from the filter panel.
	#[prop(optional)]
	on_edge_filter_change: Option<Callback<EdgeFilters>>,
	/// Receives the id of a clicked node.
	#[prop(optional)]
	on_node_click: Option<Callback<String>>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let surface: Surface = StoredValue::new_local(None);

	let known: Vec<String> = palette::legend_types().into_iter().map(|(t, _)| t).collect();
	let visible = RwSignal::new(VisibleEdgeTypes::all(&known));
	let tooltip = RwSignal::new(None::<TooltipContent>);
	let is_fullscreen = RwSignal::new(false);

	let rendered = Memo::new(move |_| {
		let filters = edge_filters.get();
		data.with(|d| {
			d.as_ref()
				.map(|d| visible.with(|v| visible_links(d, filters.as_ref(), v, &known)))
		})
	});
	let phase = Memo::new(move |_| {
		data.with(|d| error.with(|e| ViewPhase::resolve(loading.get(), e.as_ref(), d.as_ref())))
	});

	// one-time setup
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if surface.with_value(Option::is_some) {
			return;
		}
		let layout = data.get_untracked().unwrap_or_default();
		let drawn = rendered.get_untracked().map(|r| r.links).unwrap_or_default();
		match RenderSurface::mount(canvas.into(), &layout, &drawn) {
			Ok(s) => surface.set_value(Some(s)),
			Err(e) => warn!("could not create graph surface: {:?}", e),
		}
	});

	// in-place updates; the layout follows `data`, the edges follow `rendered`
	Effect::new(move |_| {
		let Some(drawn) = rendered.get() else {
			return;
		};
		data.with(|layout| {
			if let Some(layout) = layout {
				surface.with_value(|s| {
					if let Some(s) = s {
						s.set_data(layout, &drawn.links);
					}
				});
			}
		});
		tooltip.set(None);
	});

	on_cleanup(move || {
		surface.try_update_value(|s| {
			if let Some(s) = s.as_mut() {
				s.destroy();
			}
		});
	});

	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		with_graph(surface, |s| match s.node_at_position(x, y) {
			Some(idx) => s.begin_drag(idx, x, y),
			None => s.begin_pan(x, y),
		});
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let hovered = with_graph(surface, |s| {
			s.pointer_moved(x, y);
			s.hover
				.edge
				.and_then(|i| s.edges().get(i))
				.map(|e| TooltipContent::for_edge(e, x, y))
		})
		.flatten();
		if tooltip.get_untracked() != hovered {
			tooltip.set(hovered);
		}
	};

	let on_mouseup = move |_: MouseEvent| {
		let clicked = with_graph(surface, GraphState::release).flatten();
		if let (Some(id), Some(cb)) = (clicked, on_node_click) {
			cb.run(id);
		}
	};

	let on_mouseleave = move |_: MouseEvent| {
		with_graph(surface, GraphState::pointer_left);
		tooltip.set(None);
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let delta = ev.delta_y();
		with_graph(surface, |s| s.wheel_zoom(x, y, delta));
	};

	let zoom_in = Callback::new(move |_| {
		with_graph(surface, GraphState::zoom_in);
	});
	let zoom_out = Callback::new(move |_| {
		with_graph(surface, GraphState::zoom_out);
	});
	let fit = Callback::new(move |_| {
		with_graph(surface, GraphState::fit);
	});
	let reset = Callback::new(move |_| {
		with_graph(surface, GraphState::reset);
	});
	let export = Callback::new(move |_| {
		surface.with_value(|s| {
			if let Some(Err(e)) = s.as_ref().map(RenderSurface::export_png) {
				warn!("PNG export failed: {:?}", e);
			}
		});
	});
	let fullscreen = Callback::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		match toggle_fullscreen(&container) {
			Ok(now) => is_fullscreen.set(now),
			Err(e) => warn!("fullscreen request failed: {:?}", e),
		}
	});
	let toggle_type = Callback::new(move |edge_type: String| {
		visible.update(|v| v.toggle(&edge_type));
	});

	let has_filters = Memo::new(move |_| edge_filters.get().is_some());
	let filter_panel = move || match (has_filters.get(), on_edge_filter_change) {
		(true, Some(on_change)) => Some(view! {
			<EdgeFilterPanel
				filters=Signal::derive(move || edge_filters.get().unwrap_or_default())
				on_change=on_change
			/>
		}),
		_ => None,
	};

	let overlay = move || match phase.get() {
		ViewPhase::Loading => view! {
			<div class="graph-status graph-loading">{LOADING_TEXT}</div>
		}
		.into_any(),
		ViewPhase::Error(message) => view! {
			<div class="graph-status graph-error" role="alert">
				<strong>"Error loading graph"</strong>
				<p>{message}</p>
			</div>
		}
		.into_any(),
		ViewPhase::Empty => view! {
			<div class="graph-status graph-empty">{EMPTY_TEXT}</div>
		}
		.into_any(),
		ViewPhase::Ready => view! {
			<GraphControls
				on_zoom_in=zoom_in
				on_zoom_out=zoom_out
				on_fit=fit
				on_reset=reset
				on_export=export
				on_fullscreen=fullscreen
				is_fullscreen=is_fullscreen
			/>
			<GraphStatsPanel
				nodes=Signal::derive(move || rendered.with(|r| r.as_ref().map_or(0, |d| d.nodes.len())))
				edges=Signal::derive(move || rendered.with(|r| r.as_ref().map_or(0, |d| d.links.len())))
			/>
			<GraphLegend colors=palette::legend_types() visible=visible on_toggle=toggle_type />
			{filter_panel}
			<EdgeTooltip content=tooltip />
		}
		.into_any(),
	};

	view! {
		<div
			node_ref=container_ref
			class="graph-visualization"
			class:fullscreen=move || is_fullscreen.get()
			data-testid="graph-canvas"
			style="position: relative; width: 100%; height: 100%;"
		>
			<canvas
				node_ref=canvas_ref
				class="graph-surface"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style=move || {
					if phase.get() == ViewPhase::Ready {
						"display: block; cursor: grab;"
					} else {
						"display: none;"
					}
				}
			/>
			{overlay}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_visualization::types::GraphNode;

	fn one_node() -> GraphData {
		GraphData {
			nodes: vec![GraphNode {
				id: "1".into(),
				label: "Only".into(),
				node_type: "ENTITY".into(),
				degree: None,
			}],
			links: vec![],
		}
	}

	#[test]
	fn loading_wins_over_everything() {
		let err = GraphError::Network("down".into());
		assert_eq!(
			ViewPhase::resolve(true, Some(&err), Some(&one_node())),
			ViewPhase::Loading
		);
		assert_eq!(ViewPhase::resolve(true, None, None), ViewPhase::Loading);
	}

	#[test]
	fn error_message_is_shown_verbatim() {
		let err = GraphError::Http {
			status: 500,
			status_text: "Internal Server Error".into(),
		};
		assert_eq!(
			ViewPhase::resolve(false, Some(&err), Some(&one_node())),
			ViewPhase::Error("HTTP 500: Internal Server Error".into())
		);
	}

	#[test]
	fn missing_or_nodeless_data_is_empty() {
		assert_eq!(ViewPhase::resolve(false, None, None), ViewPhase::Empty);
		assert_eq!(
			ViewPhase::resolve(false, None, Some(&GraphData::default())),
			ViewPhase::Empty
		);
		assert_eq!(
			ViewPhase::resolve(false, None, Some(&one_node())),
			ViewPhase::Ready
		);
	}
}
