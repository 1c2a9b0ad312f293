//! match-vis: interactive views over speed-dating survey data.
//!
//! This crate provides WASM-based Leptos components for a categorical
//! legend, a match-probability bar chart, and a force-directed participant
//! graph, plus the host page that wires them to shared selectors.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};

pub mod components;
pub mod config;
pub mod data;

pub use components::bar_chart::BarChart;
pub use components::force_graph::ForceDirectedGraph;
pub use components::legend::Legend;
pub use components::tooltip::Tooltip;
pub use config::AppConfig;

use components::force_graph::AttractionMode;
use components::scales::OrdinalScale;
use components::tooltip::TooltipState;
use data::{Attribute, Dataset, Gender, get_label, load_dataset};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("match-vis: logging initialized");
}

/// Values a participant can hold for `attribute`, as selector labels.
fn label_options(attribute: Attribute) -> Vec<String> {
	attribute
		.codes()
		.into_iter()
		.filter_map(|code| get_label(attribute, code))
		.collect()
}

/// Main application component.
/// Loads the embedded dataset and configuration, then renders the views
/// under shared attribute, gender, value, and attraction selectors.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let dataset = match load_dataset() {
		Ok(data) => {
			info!(
				"match-vis: loaded {} participants, {} links",
				data.graph.participants.len(),
				data.graph.links.len()
			);
			data
		}
		Err(e) => {
			warn!("match-vis: {e:#}");
			Dataset::default()
		}
	};
	let config = AppConfig::load().unwrap_or_else(|e| {
		warn!("match-vis: using default config: {e:#}");
		AppConfig::default()
	});
	let dataset = StoredValue::new(dataset);

	let attribute = RwSignal::new(Attribute::default());
	let gender = RwSignal::new(Gender::Female);
	let label = RwSignal::new(
		label_options(Attribute::default())
			.into_iter()
			.next()
			.unwrap_or_default(),
	);
	let distance = RwSignal::new(AttractionMode::default().key().to_string());
	let tooltip = RwSignal::new(None::<TooltipState>);

	let graph_data = Signal::derive(move || dataset.with_value(|d| d.graph.clone()));
	let table = Signal::derive(move || {
		let (gender, attribute) = (gender.get(), attribute.get());
		dataset.with_value(|d| d.table(gender, attribute))
	});
	let color_scale = RwSignal::new(OrdinalScale::category10());
	let options = Memo::new(move |_| label_options(attribute.get()));

	let on_attribute = move |ev: leptos::ev::Event| {
		let Some(selected) = Attribute::from_key(&event_target_value(&ev)) else {
			return;
		};
		attribute.set(selected);
		label.set(label_options(selected).into_iter().next().unwrap_or_default());
	};
	let on_gender = move |ev: leptos::ev::Event| {
		if let Some(selected) = Gender::from_label(&event_target_value(&ev)) {
			gender.set(selected);
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Speed Dating Matches" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="controls">
			<label>
				"Attribute "
				<select on:change=on_attribute>
					{Attribute::SELECTABLE
						.into_iter()
						.map(|a| {
							view! {
								<option value=a.key() prop:selected=move || attribute.get() == a>
									{a.title()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</label>
			<label>
				"Gender "
				<select on:change=on_gender>
					{Gender::ALL
						.into_iter()
						.map(|g| {
							view! {
								<option value=g.label() prop:selected=move || gender.get() == g>
									{g.label()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</label>
			<label>
				"Value "
				<select on:change=move |ev| label.set(event_target_value(&ev))>
					{move || {
						options
							.get()
							.into_iter()
							.map(|o| {
								let value = o.clone();
								let selected = {
									let o = o.clone();
									move || label.get() == o
								};
								view! {
									<option value=value prop:selected=selected>
										{o}
									</option>
								}
							})
							.collect_view()
					}}
				</select>
			</label>
			<label>
				"Attraction "
				<select on:change=move |ev| distance.set(event_target_value(&ev))>
					{AttractionMode::ALL
						.into_iter()
						.map(|m| view! { <option value=m.key()>{m.key()}</option> })
						.collect_view()}
				</select>
			</label>
		</div>

		<Legend color_scale=color_scale config=config.legend />
		<div class="views">
			<ForceDirectedGraph
				data=graph_data
				attribute=attribute
				distance=distance
				tooltip=tooltip
				config=config.graph
				forces=config.forces
				color_scale=color_scale
			/>
			<BarChart
				table=table
				attribute=attribute
				selected_label=label
				selected_gender=gender
				tooltip=tooltip
				config=config.bar_chart
			/>
		</div>
		<Tooltip state=tooltip />
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_label_options() {
		assert_eq!(label_options(Attribute::Field)[0], "Law");
		let ages = label_options(Attribute::Age);
		assert_eq!(ages.len(), 28);
		assert_eq!(ages[0], "18");
		assert!(label_options(Attribute::From).is_empty());
	}
}
