//! Leptos component drawing the bar chart as SVG.

use leptos::ev::MouseEvent;
use leptos::prelude::*;

use super::state::{BarChartConfig, BarChartState, BarRect};
use crate::components::theme::Theme;
use crate::components::tooltip::TooltipState;
use crate::components::view::VisView;
use crate::data::{Attribute, Gender, MatchTable};

/// Horizontal bars of match probability per value of `attribute`, for a
/// participant of `selected_gender` whose value is `selected_label`.
#[component]
pub fn BarChart(
	#[prop(into)] table: Signal<MatchTable>,
	#[prop(into)] attribute: Signal<Attribute>,
	#[prop(into)] selected_label: Signal<String>,
	#[prop(into)] selected_gender: Signal<Gender>,
	tooltip: RwSignal<Option<TooltipState>>,
	#[prop(default = BarChartConfig::default())] config: BarChartConfig,
) -> impl IntoView {
	let state = RwSignal::new({
		let mut s = BarChartState::new(
			config,
			table.get_untracked(),
			attribute.get_untracked(),
			selected_label.get_untracked(),
			selected_gender.get_untracked(),
		);
		s.init_vis();
		s
	});

	Effect::new(move |_| {
		let (t, a, l, g) = (
			table.get(),
			attribute.get(),
			selected_label.get(),
			selected_gender.get(),
		);
		state.update(|s| {
			s.set_inputs(t, a, l, g);
			s.update_vis();
		});
	});

	let theme = Theme::default();
	let (bar_fill, axis_color) = (theme.bar.fill.to_css(), theme.bar.axis.to_css());
	let view_config = config.view;
	let (width, height) = (view_config.width(), view_config.height());

	let bars = move || {
		let bar_fill = bar_fill.clone();
		state
			.with(|s| s.bars().to_vec())
			.into_iter()
			.map(|bar: BarRect| {
				let datum = bar.datum.clone();
				let on_over = move |ev: MouseEvent| {
					let content = state.with_untracked(|s| s.describe(&datum));
					tooltip.set(Some(TooltipState {
						page_x: ev.page_x() as f64,
						page_y: ev.page_y() as f64,
						content,
					}));
				};
				view! {
					<rect
						class="bar"
						y=bar.y
						width=bar.width
						height=bar.height
						fill=bar_fill.clone()
						on:mouseover=on_over
						on:mouseout=move |_| tooltip.set(None)
					/>
				}
			})
			.collect_view()
	};

	let x_axis = {
		let axis_color = axis_color.clone();
		move || {
			let axis_color = axis_color.clone();
			state
				.with(|s| s.x_ticks().to_vec())
				.into_iter()
				.map(|tick| {
					view! {
						<g class="tick" transform=format!("translate({},0)", tick.offset)>
							<line y2="6" stroke=axis_color.clone() />
							<text y="9" dy="0.71em" text-anchor="middle">
								{tick.label}
							</text>
						</g>
					}
				})
				.collect_view()
		}
	};

	let y_axis = {
		let axis_color = axis_color.clone();
		move || {
			let axis_color = axis_color.clone();
			state
				.with(|s| s.y_ticks().to_vec())
				.into_iter()
				.map(|tick| {
					view! {
						<g class="tick" transform=format!("translate(0,{})", tick.offset)>
							<line x2="-6" stroke=axis_color.clone() />
							<text x="-5" y="0" dy="0.32em" style="text-anchor: end">
								{tick.label}
							</text>
						</g>
					}
				})
				.collect_view()
		}
	};

	view! {
		<svg
			class="bar-chart"
			width=view_config.container_width
			height=view_config.container_height
		>
			<defs>
				<clipPath id="bar-chart-plot">
					<rect width=width height=height />
				</clipPath>
			</defs>
			<text class="chart-title" x="0" y="0" dy=".80em">
				{move || state.with(|s| s.title().to_string())}
			</text>
			<g transform=view_config.chart_transform()>
				<g clip-path="url(#bar-chart-plot)">{bars}</g>
				<g class="axis x-axis" transform=format!("translate(0,{height})")>
					<path d=format!("M0,0H{width}") stroke=axis_color.clone() />
					{x_axis}
				</g>
				<g class="axis y-axis">
					<path d=format!("M0,0V{height}") stroke=axis_color />
					{y_axis}
				</g>
			</g>
		</svg>
	}
}
