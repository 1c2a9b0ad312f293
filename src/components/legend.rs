//! Categorical legend: one colored marker and label per category, laid out
//! in a staggered grid of at most [`ITEMS_PER_COLUMN`] rows.

use leptos::prelude::*;

use super::scales::OrdinalScale;
use super::theme::Theme;
use super::view::{Margin, ViewConfig, VisView};

/// Horizontal distance between legend columns.
pub const ITEM_WIDTH: f64 = 150.0;
/// Column capacity.
pub const ITEMS_PER_COLUMN: usize = 3;

/// Grid cell of item `i` when columns hold `n` items. Odd columns are
/// shifted down half a row.
pub fn position_legend_item(i: usize, n: usize) -> (f64, f64) {
	let n = n.max(1);
	let x = i / n;
	let mut y = (i % n) as f64;
	if x % 2 == 1 {
		y += 0.5;
	}
	(x as f64, y)
}

/// Default legend geometry.
pub fn default_legend_config() -> ViewConfig {
	ViewConfig {
		container_width: 800.0,
		container_height: 100.0,
		margin: Margin::new(15.0, 10.0, 0.0, 15.0),
	}
}

/// One marker and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
	pub label: String,
	pub color: String,
	pub transform: String,
}

/// Legend view state.
#[derive(Clone, Debug)]
pub struct LegendState {
	config: ViewConfig,
	domain: Vec<String>,
	color_scale: OrdinalScale,
	items: Vec<LegendItem>,
}

impl LegendState {
	pub fn new(config: ViewConfig) -> Self {
		Self {
			config,
			domain: Vec::new(),
			color_scale: OrdinalScale::category10(),
			items: Vec::new(),
		}
	}

	/// Replace the categories and their colors.
	pub fn set(&mut self, domain: impl IntoIterator<Item = String>, color_scale: OrdinalScale) {
		self.domain = domain.into_iter().collect();
		self.color_scale = color_scale;
	}

	pub fn items(&self) -> &[LegendItem] {
		&self.items
	}

	fn item_transform(&self, i: usize) -> String {
		let item_height = (self.height() / ITEMS_PER_COLUMN as f64) * 0.7;
		let (x, y) = position_legend_item(i, ITEMS_PER_COLUMN);
		format!("translate({}, {})", x * ITEM_WIDTH, y * item_height)
	}
}

impl VisView for LegendState {
	fn config(&self) -> &ViewConfig {
		&self.config
	}

	fn init_vis(&mut self) {
		self.update_vis();
	}

	fn update_vis(&mut self) {
		self.render_vis();
	}

	fn render_vis(&mut self) {
		self.items = self
			.domain
			.iter()
			.enumerate()
			.map(|(i, label)| LegendItem {
				label: label.clone(),
				color: self.color_scale.apply(label).to_string(),
				transform: self.item_transform(i),
			})
			.collect();
	}
}

/// Renders one entry per value in the domain of `color_scale`, in the
/// scale's colors.
#[component]
pub fn Legend(
	#[prop(into)] color_scale: Signal<OrdinalScale>,
	#[prop(default = default_legend_config())] config: ViewConfig,
) -> impl IntoView {
	let state = RwSignal::new({
		let mut s = LegendState::new(config);
		s.init_vis();
		s
	});

	Effect::new(move |_| {
		let colors = color_scale.get();
		state.update(|s| {
			s.set(colors.domain().to_vec(), colors);
			s.update_vis();
		});
	});

	let radius = Theme::default().legend_radius;
	let label_offset = format!("translate({}, 0)", radius + 5.0);

	view! {
		<svg
			class="legend"
			width=config.container_width
			height=config.container_height
		>
			<g transform=config.chart_transform()>
				{move || {
					let label_offset = label_offset.clone();
					state
						.with(|s| s.items().to_vec())
						.into_iter()
						.map(|item| {
							view! {
								<g transform=item.transform>
									<circle r=radius fill=item.color />
									<text transform=label_offset.clone() dy="0.35em">
										{item.label}
									</text>
								</g>
							}
						})
						.collect_view()
				}}
			</g>
		</svg>
	}
}
