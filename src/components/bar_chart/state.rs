//! Bar chart view state: row derivation, scales, and the bar/axis scene.

use serde::Deserialize;

use crate::components::scales::{BandScale, LinearScale, format_percent};
use crate::components::tooltip::{Segment, TooltipContent};
use crate::components::view::{Margin, ViewConfig, VisView};
use crate::data::{AGE_RANGE, Attribute, Gender, MatchTable, get_code, get_label};

/// Row label of the synthetic "any other value" bar.
pub const TOTAL_LABEL: &str = "Total";

/// Bar chart settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarChartConfig {
	pub view: ViewConfig,
	/// Upper end of the probability axis. Longer bars are clipped, not
	/// rescaled, so charts stay comparable.
	pub domain_max: f64,
	pub tick_count: usize,
	pub padding_inner: f64,
}

impl Default for BarChartConfig {
	fn default() -> Self {
		Self {
			view: ViewConfig {
				container_width: 500.0,
				container_height: 440.0,
				margin: Margin::new(90.0, 20.0, 20.0, 160.0),
			},
			domain_max: 0.2,
			tick_count: 10,
			padding_inner: 0.2,
		}
	}
}

/// One bar before layout.
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
	pub row: usize,
	pub row_label: String,
	pub value: f64,
}

impl BarDatum {
	pub fn is_total(&self) -> bool {
		self.row_label == TOTAL_LABEL
	}
}

/// A laid out bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarRect {
	pub datum: BarDatum,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

/// A labelled axis tick at `offset` pixels along the axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
	pub offset: f64,
	pub label: String,
}

/// Bars for `attribute` as seen by a participant labelled `selected_label`:
/// one per possible value, plus a trailing [`TOTAL_LABEL`] bar holding the
/// probability of matching anyone at all.
pub fn derive_bar_rows(
	table: &MatchTable,
	attribute: Attribute,
	selected_label: &str,
) -> Vec<BarDatum> {
	// Unknown labels read past the table and surface as NaN.
	let code = get_code(attribute, selected_label).unwrap_or(usize::MAX);
	let label = |i: usize| get_label(attribute, i).unwrap_or_else(|| i.to_string());

	let mut rows: Vec<BarDatum> = if attribute == Attribute::Age {
		AGE_RANGE
			.map(|age| BarDatum {
				row: age - (AGE_RANGE.start() - 1),
				row_label: label(age),
				value: table.value(code, age),
			})
			.collect()
	} else {
		(1..table.len())
			.map(|i| BarDatum {
				row: i,
				row_label: label(i),
				value: table.value(code, i),
			})
			.collect()
	};

	let no_match = table.no_match(code);
	rows.push(BarDatum {
		row: rows.len(),
		row_label: TOTAL_LABEL.to_string(),
		value: if no_match == 0.0 { 0.0 } else { 1.0 - no_match },
	});
	rows
}

/// Bar chart view state.
#[derive(Clone, Debug)]
pub struct BarChartState {
	config: BarChartConfig,
	table: MatchTable,
	attribute: Attribute,
	selected_label: String,
	selected_gender: Gender,
	bar_data: Vec<BarDatum>,
	x_scale: LinearScale,
	y_scale: BandScale,
	bars: Vec<BarRect>,
	x_ticks: Vec<AxisTick>,
	y_ticks: Vec<AxisTick>,
	title: String,
}

impl BarChartState {
	pub fn new(
		config: BarChartConfig,
		table: MatchTable,
		attribute: Attribute,
		selected_label: impl Into<String>,
		selected_gender: Gender,
	) -> Self {
		Self {
			config,
			table,
			attribute,
			selected_label: selected_label.into(),
			selected_gender,
			bar_data: Vec::new(),
			x_scale: LinearScale::default(),
			y_scale: BandScale::default(),
			bars: Vec::new(),
			x_ticks: Vec::new(),
			y_ticks: Vec::new(),
			title: String::new(),
		}
	}

	/// Replace every input at once. Call [`VisView::update_vis`] afterwards.
	pub fn set_inputs(
		&mut self,
		table: MatchTable,
		attribute: Attribute,
		selected_label: impl Into<String>,
		selected_gender: Gender,
	) {
		self.table = table;
		self.attribute = attribute;
		self.selected_label = selected_label.into();
		self.selected_gender = selected_gender;
	}

	pub fn chart_config(&self) -> &BarChartConfig {
		&self.config
	}

	pub fn bar_data(&self) -> &[BarDatum] {
		&self.bar_data
	}

	pub fn bars(&self) -> &[BarRect] {
		&self.bars
	}

	pub fn x_ticks(&self) -> &[AxisTick] {
		&self.x_ticks
	}

	pub fn y_ticks(&self) -> &[AxisTick] {
		&self.y_ticks
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	/// Who the hovered bar compares against.
	fn alternate_match_type(&self, datum: &BarDatum) -> String {
		let other = self.selected_gender.other();
		if datum.is_total() {
			format!("any {other}")
		} else {
			format!("{other} {}", datum.row_label)
		}
	}

	/// Tooltip for a hovered bar, worded per attribute.
	pub fn describe(&self, datum: &BarDatum) -> TooltipContent {
		let (subject_suffix, object_suffix) = match self.attribute {
			Attribute::Field => (" student", " student"),
			Attribute::Age => (" year old", " year old"),
			_ => ("", ""),
		};
		let subject = format!(
			"{} {}{}",
			self.selected_gender, self.selected_label, subject_suffix
		);
		let object = format!("{}{}", self.alternate_match_type(datum), object_suffix);

		TooltipContent {
			heading: None,
			paragraphs: vec![vec![
				Segment::plain("A "),
				Segment::strong(subject),
				Segment::plain(" has a "),
				Segment::strong(format_percent(datum.value)),
				Segment::plain(" chance of matching with "),
				Segment::strong(object),
			]],
		}
	}
}

impl VisView for BarChartState {
	fn config(&self) -> &ViewConfig {
		&self.config.view
	}

	fn init_vis(&mut self) {
		let (width, height) = (self.width(), self.height());
		self.x_scale.set_range(0.0, width);
		self.y_scale = BandScale::new((0.0, height), self.config.padding_inner);
	}

	fn update_vis(&mut self) {
		self.bar_data = derive_bar_rows(&self.table, self.attribute, &self.selected_label);
		self.x_scale.set_domain(0.0, self.config.domain_max);
		self.y_scale
			.set_domain(self.bar_data.iter().map(|d| d.row_label.clone()).collect());
		self.render_vis();
	}

	fn render_vis(&mut self) {
		let bandwidth = self.y_scale.bandwidth();
		self.bars = self
			.bar_data
			.iter()
			.map(|d| {
				let width = self.x_scale.apply(d.value);
				BarRect {
					datum: d.clone(),
					y: self.y_scale.apply(&d.row_label).unwrap_or(0.0),
					width: if width.is_finite() { width.max(0.0) } else { 0.0 },
					height: bandwidth,
				}
			})
			.collect();

		self.x_ticks = self
			.x_scale
			.ticks(self.config.tick_count)
			.into_iter()
			.map(|t| AxisTick {
				offset: self.x_scale.apply(t),
				label: format_percent(t),
			})
			.collect();

		self.y_ticks = self
			.y_scale
			.domain()
			.iter()
			.filter_map(|label| {
				self.y_scale.apply(label).map(|y| AxisTick {
					offset: y + bandwidth / 2.0,
					label: label.clone(),
				})
			})
			.collect();

		self.title = format!(
			"Prob. of {} {} matching with another person",
			self.selected_gender, self.selected_label
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Table with `rows` rows; cell (r, c) = c / 100, last column = `aggregate`.
	fn table(rows: usize, cols: usize, aggregate: f64) -> MatchTable {
		MatchTable(
			(0..rows)
				.map(|_| {
					let mut row: Vec<f64> = (0..cols).map(|c| c as f64 / 100.0).collect();
					row.resize(rows, 0.0);
					row.push(aggregate);
					row
				})
				.collect(),
		)
	}

	fn chart(attribute: Attribute, label: &str, table: MatchTable) -> BarChartState {
		let mut s = BarChartState::new(
			BarChartConfig::default(),
			table,
			attribute,
			label,
			Gender::Female,
		);
		s.init_vis();
		s.update_vis();
		s
	}

	#[test]
	fn test_age_rows() {
		let rows = derive_bar_rows(&table(50, 50, 0.4), Attribute::Age, "25");
		assert_eq!(rows.len(), 29);
		assert_eq!(rows[0].row, 1);
		assert_eq!(rows[0].row_label, "18");
		assert_eq!(rows[0].value, 0.18);
		assert_eq!(rows[27].row_label, "45");
		assert_eq!(rows[28].row_label, TOTAL_LABEL);
		assert_eq!(rows[28].row, 28);
	}

	#[test]
	fn test_coded_rows() {
		let t = table(19, 19, 0.75);
		let rows = derive_bar_rows(&t, Attribute::Field, "Law");
		assert_eq!(rows.len(), t.len() - 1 + 1);
		assert_eq!(rows[0].row_label, "Law");
		assert_eq!(rows[1].row_label, "Math");
		assert_eq!(rows[1].value, 0.02);
	}

	#[test]
	fn test_total_complement() {
		let rows = derive_bar_rows(&table(7, 7, 0.75), Attribute::Race, "Other");
		assert_eq!(rows.last().unwrap().value, 0.25);

		let rows = derive_bar_rows(&table(7, 7, 0.0), Attribute::Race, "Other");
		assert_eq!(rows.last().unwrap().value, 0.0);
	}

	#[test]
	fn test_unknown_label_yields_nan() {
		let rows = derive_bar_rows(&table(7, 7, 0.5), Attribute::Race, "Martian");
		assert!(rows.iter().all(|r| r.value.is_nan()));
	}

	#[test]
	fn test_bars_clip_past_domain() {
		let mut t = table(7, 7, 0.5);
		t.0[1][2] = 0.5;
		let s = chart(Attribute::Race, "Black/African American", t);
		let width = s.width();
		// 0.5 on a [0, 0.2] axis is drawn 2.5 times the plot width
		assert!((s.bars()[1].width - width * 2.5).abs() < 1e-9);
		assert!((s.bars()[0].width - width * 0.05).abs() < 1e-9);
		assert_eq!(s.x_ticks().len(), 11);
		assert_eq!(s.x_ticks().last().unwrap().label, "20%");
		assert_eq!(s.y_ticks().len(), s.bars().len());
	}

	#[test]
	fn test_nan_bars_have_no_width() {
		let s = chart(Attribute::Goal, "Nope", table(7, 7, 0.5));
		assert!(s.bars().iter().all(|b| b.width == 0.0));
	}

	#[test]
	fn test_title() {
		let s = chart(Attribute::Field, "Law", table(19, 19, 0.5));
		assert_eq!(s.title(), "Prob. of female Law matching with another person");
	}

	#[test]
	fn test_tooltip_wording() {
		let s = chart(Attribute::Field, "Law", table(19, 19, 0.5));
		let math = s.bar_data()[1].clone();
		assert_eq!(
			s.describe(&math).plain_text(),
			"A female Law student has a 2% chance of matching with male Math student"
		);
		let total = s.bar_data().last().unwrap().clone();
		assert_eq!(
			s.describe(&total).plain_text(),
			"A female Law student has a 50% chance of matching with any male student"
		);

		let s = chart(Attribute::Age, "25", table(50, 50, 0.5));
		let first = s.bar_data()[2].clone();
		assert_eq!(
			s.describe(&first).plain_text(),
			"A female 25 year old has a 20% chance of matching with male 20 year old"
		);

		let s = chart(Attribute::Goal, "To get a date", table(7, 7, 0.5));
		let first = s.bar_data()[0].clone();
		assert_eq!(
			s.describe(&first).plain_text(),
			"A female To get a date has a 1% chance of matching with male Seemed like a fun night out"
		);
	}
}
