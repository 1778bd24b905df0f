use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use super::state::DrawnEdge;

/// Hover time before the tooltip appears.
pub const TOOLTIP_DELAY_MS: u32 = 200;
const CURSOR_OFFSET: f64 = 12.0;

/// What the tooltip shows and where (container-relative pixels).
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
	/// Relation label.
	pub label: String,
	/// Shown as a percentage when present.
	pub weight: Option<f64>,
	/// Extra name/value rows.
	pub properties: Vec<(String, String)>,
	/// Pointer x.
	pub x: f64,
	/// Pointer y.
	pub y: f64,
}

impl TooltipContent {
	/// Tooltip for a drawn edge at the pointer.
	pub fn for_edge(edge: &DrawnEdge, x: f64, y: f64) -> Self {
		let mut properties = vec![
			("From".to_string(), edge.source_label.clone()),
			("To".to_string(), edge.target_label.clone()),
		];
		if let Some(t) = &edge.edge_type {
			properties.push(("Type".to_string(), t.clone()));
		}
		Self {
			label: edge.label.clone().unwrap_or_else(|| "related".to_string()),
			weight: edge.weight,
			properties,
			x,
			y,
		}
	}
}

/// Weight in `[0, 1]` as a whole percentage.
pub fn format_weight(weight: f64) -> String {
	format!("{}%", (weight.clamp(0.0, 1.0) * 100.0).round() as u32)
}

/// Hover detail for an edge. Shows after [`TOOLTIP_DELAY_MS`]; every new
/// content or position restarts the wait.
#[component]
pub fn EdgeTooltip(
	/// What to show, `None` hides at once.
	#[prop(into)]
	content: Signal<Option<TooltipContent>>,
) -> impl IntoView {
	let shown = RwSignal::new(None::<TooltipContent>);
	let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let next = content.get();
		shown.set(None);
		// dropping the previous Timeout cancels it
		*pending.borrow_mut() = next.map(|c| {
			Timeout::new(TOOLTIP_DELAY_MS, move || {
				let _ = shown.try_set(Some(c));
			})
		});
	});

	move || {
		shown.get().map(|c| {
			let style = format!(
				"position: absolute; left: {}px; top: {}px; pointer-events: none;",
				c.x + CURSOR_OFFSET,
				c.y + CURSOR_OFFSET
			);
			view! {
				<div class="edge-tooltip" role="tooltip" style=style>
					<div class="edge-tooltip-label">{c.label}</div>
					{c.weight.map(|w| view! {
						<div class="edge-tooltip-weight">"Weight: " {format_weight(w)}</div>
					})}
					{(!c.properties.is_empty()).then(|| view! {
						<dl class="edge-tooltip-props">
							{c.properties.into_iter().map(|(k, v)| view! {
								<dt>{k}</dt>
								<dd>{v}</dd>
							}).collect_view()}
						</dl>
					})}
				</div>
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn weight_rounds_to_percent() {
		assert_eq!(format_weight(0.876), "88%");
		assert_eq!(format_weight(0.0), "0%");
		assert_eq!(format_weight(1.0), "100%");
		assert_eq!(format_weight(0.125), "13%");
	}
}
