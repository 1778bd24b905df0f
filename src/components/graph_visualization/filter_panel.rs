use leptos::prelude::*;

use super::filter::{EdgeFilters, EdgeType};

/// Editor for the controlled [`EdgeFilters`] prop.
///
/// Extended types only get a checkbox when their flag is present. Every
/// change is sent through `on_change` as a new value; the prop itself is
/// never written.
#[component]
pub fn EdgeFilterPanel(
	/// Current criteria.
	#[prop(into)]
	filters: Signal<EdgeFilters>,
	/// Receives the edited criteria.
	on_change: Callback<EdgeFilters>,
) -> impl IntoView {
	let checkboxes = move || {
		let current = filters.get();
		EdgeType::ALL
			.into_iter()
			.filter_map(|t| current.flag(t).map(|on| (t, on)))
			.map(|(t, on)| {
				view! {
					<label class="edge-filter">
						<input
							type="checkbox"
							prop:checked=on
							on:change=move |ev| {
								let next = filters.get_untracked().with_type(t, event_target_checked(&ev));
								on_change.run(next);
							}
						/>
						{t.label()}
					</label>
				}
			})
			.collect_view()
	};

	view! {
		<fieldset class="edge-filter-panel">
			<legend>"Edge filters"</legend>
			{checkboxes}
			<label class="edge-filter-weight">
				{move || format!("Min weight: {:.2}", filters.get().min_weight)}
				<input
					type="range"
					min="0"
					max="1"
					step="0.05"
					prop:value=move || filters.get().min_weight.to_string()
					on:input=move |ev| {
						// ignore anything the range input cannot produce
						if let Ok(w) = event_target_value(&ev).parse::<f64>() {
							on_change.run(filters.get_untracked().with_min_weight(w));
						}
					}
				/>
			</label>
		</fieldset>
	}
}
