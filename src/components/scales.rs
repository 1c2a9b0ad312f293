//! Scales mapping data values to pixels and colors.
//!
//! - [`LinearScale`]: continuous domain onto a pixel range, with "nice"
//!   tick generation (steps of 1, 2, or 5 times a power of ten).
//! - [`BandScale`]: discrete labels onto evenly spaced bands.
//! - [`OrdinalScale`]: discrete values onto a cycling list of colors.

use super::theme::CATEGORY10;

/// Maps `[d0, d1]` linearly onto `[r0, r1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl Default for LinearScale {
	fn default() -> Self {
		Self {
			domain: (0.0, 1.0),
			range: (0.0, 1.0),
		}
	}
}

impl LinearScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn set_domain(&mut self, d0: f64, d1: f64) {
		self.domain = (d0, d1);
	}

	pub fn set_range(&mut self, r0: f64, r1: f64) {
		self.range = (r0, r1);
	}

	/// Unclamped: values outside the domain map outside the range.
	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		if d1 == d0 {
			return (r0 + r1) / 2.0;
		}
		r0 + (value - d0) / (d1 - d0) * (r1 - r0)
	}

	/// About `count` round values spanning the domain.
	pub fn ticks(&self, count: usize) -> Vec<f64> {
		let (mut start, mut stop) = self.domain;
		if start == stop {
			return vec![start];
		}
		let reverse = stop < start;
		if reverse {
			std::mem::swap(&mut start, &mut stop);
		}
		let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
			return Vec::new();
		};
		let mut ticks: Vec<f64> = (i1..=i2)
			.map(|i| {
				if inc < 0.0 {
					i as f64 / -inc
				} else {
					i as f64 * inc
				}
			})
			.collect();
		if reverse {
			ticks.reverse();
		}
		ticks
	}
}

/// Integer tick bounds and increment. A negative increment means
/// "divide by `-inc`", which keeps fractional ticks exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
	let (e10, e5, e2) = (50f64.sqrt(), 10f64.sqrt(), 2f64.sqrt());
	let step = (stop - start) / count.max(0.0);
	if !step.is_finite() || step <= 0.0 {
		return None;
	}
	let power = step.log10().floor();
	let error = step / 10f64.powf(power);
	let factor = if error >= e10 {
		10.0
	} else if error >= e5 {
		5.0
	} else if error >= e2 {
		2.0
	} else {
		1.0
	};

	let (mut i1, mut i2, inc);
	if power < 0.0 {
		let inv = 10f64.powf(-power) / factor;
		i1 = (start * inv).round();
		i2 = (stop * inv).round();
		if i1 / inv < start {
			i1 += 1.0;
		}
		if i2 / inv > stop {
			i2 -= 1.0;
		}
		inc = -inv;
	} else {
		inc = 10f64.powf(power) * factor;
		i1 = (start / inc).round();
		i2 = (stop / inc).round();
		if i1 * inc < start {
			i1 += 1.0;
		}
		if i2 * inc > stop {
			i2 -= 1.0;
		}
	}
	if i2 < i1 && (0.5..2.0).contains(&count) {
		return tick_spec(start, stop, count * 2.0);
	}
	Some((i1 as i64, i2 as i64, inc))
}

/// Evenly spaced bands, one per label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BandScale {
	domain: Vec<String>,
	range: (f64, f64),
	padding_inner: f64,
}

impl BandScale {
	pub fn new(range: (f64, f64), padding_inner: f64) -> Self {
		Self {
			domain: Vec::new(),
			range,
			padding_inner: padding_inner.clamp(0.0, 1.0),
		}
	}

	pub fn set_domain(&mut self, domain: Vec<String>) {
		self.domain = domain;
	}

	pub fn domain(&self) -> &[String] {
		&self.domain
	}

	/// Distance between the starts of adjacent bands.
	pub fn step(&self) -> f64 {
		let n = self.domain.len() as f64;
		(self.range.1 - self.range.0) / (n - self.padding_inner).max(1.0)
	}

	pub fn bandwidth(&self) -> f64 {
		self.step() * (1.0 - self.padding_inner)
	}

	/// Start of the band for `label`, if it is in the domain.
	pub fn apply(&self, label: &str) -> Option<f64> {
		let index = self.domain.iter().position(|d| d == label)?;
		let n = self.domain.len() as f64;
		let step = self.step();
		let start =
			self.range.0 + (self.range.1 - self.range.0 - step * (n - self.padding_inner)) / 2.0;
		Some(start + step * index as f64)
	}
}

/// Discrete values onto a cycling color list.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale {
	domain: Vec<String>,
	range: Vec<String>,
}

impl Default for OrdinalScale {
	fn default() -> Self {
		Self::category10()
	}
}

impl OrdinalScale {
	pub fn new(range: Vec<String>) -> Self {
		Self {
			domain: Vec::new(),
			range,
		}
	}

	/// The ten-color categorical scheme.
	pub fn category10() -> Self {
		Self::new(CATEGORY10.iter().map(|c| c.to_string()).collect())
	}

	pub fn with_domain(mut self, domain: Vec<String>) -> Self {
		self.domain = domain;
		self
	}

	pub fn set_domain(&mut self, domain: Vec<String>) {
		self.domain = domain;
	}

	pub fn domain(&self) -> &[String] {
		&self.domain
	}

	/// Color for `value`. Values outside the domain take the slot they would
	/// get if appended to it.
	pub fn apply(&self, value: &str) -> &str {
		if self.range.is_empty() {
			return "";
		}
		let index = self
			.domain
			.iter()
			.position(|d| d == value)
			.unwrap_or(self.domain.len());
		&self.range[index % self.range.len()]
	}
}

/// Format a probability as a whole percentage (`0.25` → `"25%"`).
pub fn format_percent(value: f64) -> String {
	if value.is_finite() {
		// halves round away from zero
		format!("{}%", (value * 100.0).round())
	} else {
		"n/a".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_linear_apply() {
		let scale = LinearScale::new((0.0, 0.2), (0.0, 320.0));
		assert_eq!(scale.apply(0.0), 0.0);
		assert_eq!(scale.apply(0.1), 160.0);
		assert_eq!(scale.apply(0.4), 640.0);
	}

	#[test]
	fn test_ticks_over_probability_axis() {
		let scale = LinearScale::new((0.0, 0.2), (0.0, 1.0));
		let ticks = scale.ticks(10);
		assert_eq!(ticks.len(), 11);
		assert_eq!(ticks[0], 0.0);
		assert!((ticks[1] - 0.02).abs() < 1e-12);
		assert_eq!(ticks[10], 0.2);
		let labels: Vec<String> = ticks.iter().map(|t| format_percent(*t)).collect();
		assert_eq!(labels[5], "10%");
		assert_eq!(labels[10], "20%");
	}

	#[test]
	fn test_ticks_integer_domain() {
		let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0));
		assert_eq!(scale.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
	}

	#[test]
	fn test_band_geometry() {
		let mut scale = BandScale::new((0.0, 90.0), 0.2);
		scale.set_domain(vec!["a".into(), "b".into(), "c".into()]);
		// step = 90 / (3 - 0.2)
		let step = 90.0 / 2.8;
		assert!((scale.step() - step).abs() < 1e-9);
		assert!((scale.bandwidth() - step * 0.8).abs() < 1e-9);
		assert!(scale.apply("a").unwrap().abs() < 1e-9);
		assert!((scale.apply("c").unwrap() - 2.0 * step).abs() < 1e-9);
		assert_eq!(scale.apply("z"), None);
	}

	#[test]
	fn test_ordinal_cycles() {
		let domain: Vec<String> = (0..11).map(|i| i.to_string()).collect();
		let scale = OrdinalScale::category10().with_domain(domain);
		assert_eq!(scale.apply("0"), CATEGORY10[0]);
		assert_eq!(scale.apply("10"), CATEGORY10[0]);
		assert_eq!(scale.apply("3"), CATEGORY10[3]);
	}

	#[test]
	fn test_percent_format() {
		assert_eq!(format_percent(0.05), "5%");
		assert_eq!(format_percent(1.0), "100%");
		assert_eq!(format_percent(0.025), "3%");
		assert_eq!(format_percent(0.125), "13%");
		assert_eq!(format_percent(0.0), "0%");
		assert_eq!(format_percent(f64::NAN), "n/a");
	}
}
