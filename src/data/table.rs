//! Match probability tables.

use serde::Deserialize;

/// Probabilities of a participant with attribute code `row` matching
/// someone with code `col`. The column at index `len()` holds the
/// probability of matching with nobody.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MatchTable(pub Vec<Vec<f64>>);

impl MatchTable {
	/// Number of rows.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Cell value, or `NaN` when either index is out of range.
	pub fn value(&self, row: usize, col: usize) -> f64 {
		self.0
			.get(row)
			.and_then(|r| r.get(col))
			.copied()
			.unwrap_or(f64::NAN)
	}

	/// The "matches nobody" aggregate for `row`.
	pub fn no_match(&self, row: usize) -> f64 {
		self.value(row, self.len())
	}
}
