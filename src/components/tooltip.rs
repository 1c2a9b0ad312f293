//! The floating tooltip shared by the bar chart and the graph.
//!
//! Hover handlers write a [`TooltipState`] into a signal; leaving the
//! hovered element writes `None`. Nothing else is remembered between events.

use leptos::prelude::*;

/// A run of tooltip text, optionally emphasised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
	Plain(String),
	Strong(String),
}

impl Segment {
	pub fn plain(text: impl Into<String>) -> Self {
		Segment::Plain(text.into())
	}

	pub fn strong(text: impl Into<String>) -> Self {
		Segment::Strong(text.into())
	}

	pub fn text(&self) -> &str {
		match self {
			Segment::Plain(t) | Segment::Strong(t) => t,
		}
	}
}

/// What the tooltip shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TooltipContent {
	pub heading: Option<String>,
	pub paragraphs: Vec<Vec<Segment>>,
}

impl TooltipContent {
	/// Concatenated text, without emphasis.
	pub fn plain_text(&self) -> String {
		let mut parts: Vec<String> = self.heading.iter().cloned().collect();
		parts.extend(
			self.paragraphs
				.iter()
				.map(|p| p.iter().map(Segment::text).collect::<String>()),
		);
		parts.join("\n")
	}
}

/// A visible tooltip at a page position.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipState {
	pub page_x: f64,
	pub page_y: f64,
	pub content: TooltipContent,
}

fn render_segment(segment: Segment) -> AnyView {
	match segment {
		Segment::Plain(t) => t.into_any(),
		Segment::Strong(t) => view! { <strong>{t}</strong> }.into_any(),
	}
}

/// Renders the shared tooltip. Hidden while `state` is `None`.
#[component]
pub fn Tooltip(#[prop(into)] state: Signal<Option<TooltipState>>) -> impl IntoView {
	let display = move || if state.with(Option::is_some) { "block" } else { "none" };
	let left = move || {
		state.with(|s| {
			s.as_ref()
				.map(|s| format!("{}px", s.page_x))
				.unwrap_or_default()
		})
	};
	let top = move || {
		state.with(|s| {
			s.as_ref()
				.map(|s| format!("{}px", s.page_y))
				.unwrap_or_default()
		})
	};

	view! {
		<div
			id="tooltip"
			style="position: absolute; pointer-events: none;"
			style:display=display
			style:left=left
			style:top=top
		>
			{move || {
				state
					.get()
					.map(|s| {
						let heading = s.content.heading.map(|h| view! { <h1>{h}</h1> });
						let paragraphs = s
							.content
							.paragraphs
							.into_iter()
							.map(|p| {
								view! {
									<p>{p.into_iter().map(render_segment).collect_view()}</p>
								}
							})
							.collect_view();
						view! {
							{heading}
							{paragraphs}
						}
					})
			}}
		</div>
	}
}
