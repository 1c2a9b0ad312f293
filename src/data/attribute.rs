//! Survey attributes and their code/label lookups.
//!
//! Coded attributes store a small integer per participant; the tables here
//! map those codes to the labels shown on axes, legends, and tooltips.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use super::participant::Participant;

const FIELD_LABELS: &[&str] = &[
	"Law",
	"Math",
	"Social Science, Psychologist",
	"Medical Science, Pharmaceuticals, and Bio Tech",
	"Engineering",
	"English/Creative Writing/Journalism",
	"History/Religion/Philosophy",
	"Business/Econ/Finance",
	"Education, Academia",
	"Biological Sciences/Chemistry/Physics",
	"Social Work",
	"Undergrad/undecided",
	"Political Science/International Affairs",
	"Film",
	"Fine Arts/Arts Administration",
	"Languages",
	"Architecture",
	"Other",
];

const RACE_LABELS: &[&str] = &[
	"Black/African American",
	"European/Caucasian-American",
	"Latino/Hispanic American",
	"Asian/Pacific Islander/Asian-American",
	"Native American",
	"Other",
];

const GOAL_LABELS: &[&str] = &[
	"Seemed like a fun night out",
	"To meet new people",
	"To get a date",
	"Looking for a serious relationship",
	"To say I did it",
	"Other",
];

const CAREER_LABELS: &[&str] = &[
	"Lawyer",
	"Academic/Research",
	"Psychologist",
	"Doctor/Medicine",
	"Engineer",
	"Creative Arts/Entertainment",
	"Business/Finance",
	"Real Estate",
	"International/Humanitarian Affairs",
	"Undecided",
	"Social Work",
	"Speech Pathology",
	"Politics",
	"Pro sports/Athletics",
	"Other",
	"Journalism",
	"Architecture",
];

/// Youngest and oldest ages shown on age charts.
pub const AGE_RANGE: std::ops::RangeInclusive<usize> = 18..=45;

/// Value shown when a participant has no value for an attribute.
pub const UNKNOWN: &str = "Unknown";

/// Participant gender as recorded by the survey (0 = female, 1 = male).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
	#[default]
	Female,
	Male,
}

impl Gender {
	/// All genders in code order.
	pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

	/// The comparison group a chart describes matches with.
	pub fn other(self) -> Self {
		match self {
			Gender::Female => Gender::Male,
			Gender::Male => Gender::Female,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Gender::Female => "female",
			Gender::Male => "male",
		}
	}

	/// Parse a label produced by [`Gender::label`].
	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|g| g.label() == label)
	}
}

impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Label-level counterpart of [`Gender::other`] for callers holding strings.
pub fn get_other_gender(gender: &str) -> Option<&'static str> {
	Gender::from_label(gender).map(|g| g.other().label())
}

/// A participant attribute that can drive coloring or bar charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Attribute {
	#[serde(rename = "gender")]
	Gender,
	#[serde(rename = "age")]
	Age,
	#[default]
	#[serde(rename = "field_cd")]
	Field,
	#[serde(rename = "race")]
	Race,
	#[serde(rename = "goal")]
	Goal,
	#[serde(rename = "career_c")]
	Career,
	#[serde(rename = "from")]
	From,
}

impl Attribute {
	/// Attributes offered in the host selector, in display order.
	pub const SELECTABLE: [Attribute; 5] = [
		Attribute::Field,
		Attribute::Race,
		Attribute::Goal,
		Attribute::Career,
		Attribute::Age,
	];

	/// Dataset key, also used as `<option>` value.
	pub fn key(self) -> &'static str {
		match self {
			Attribute::Gender => "gender",
			Attribute::Age => "age",
			Attribute::Field => "field_cd",
			Attribute::Race => "race",
			Attribute::Goal => "goal",
			Attribute::Career => "career_c",
			Attribute::From => "from",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		[
			Attribute::Gender,
			Attribute::Age,
			Attribute::Field,
			Attribute::Race,
			Attribute::Goal,
			Attribute::Career,
			Attribute::From,
		]
		.into_iter()
		.find(|a| a.key() == key)
	}

	/// Human readable name for selectors.
	pub fn title(self) -> &'static str {
		match self {
			Attribute::Gender => "Gender",
			Attribute::Age => "Age",
			Attribute::Field => "Field of study",
			Attribute::Race => "Race",
			Attribute::Goal => "Goal",
			Attribute::Career => "Career",
			Attribute::From => "Origin",
		}
	}

	fn labels(self) -> Option<&'static [&'static str]> {
		match self {
			Attribute::Field => Some(FIELD_LABELS),
			Attribute::Race => Some(RACE_LABELS),
			Attribute::Goal => Some(GOAL_LABELS),
			Attribute::Career => Some(CAREER_LABELS),
			_ => None,
		}
	}

	/// Every code with a label, in ascending order.
	pub fn codes(self) -> Vec<usize> {
		match self {
			Attribute::Gender => vec![0, 1],
			Attribute::Age => AGE_RANGE.collect(),
			Attribute::From => Vec::new(),
			other => other.labels().map(|l| (1..=l.len()).collect()).unwrap_or_default(),
		}
	}

	/// Returns an accessor reading this attribute's display value off a node.
	pub fn decode(self) -> impl Fn(&Participant) -> String {
		move |p: &Participant| {
			let value = match self {
				Attribute::Gender => p.gender.map(|g| g.label().to_string()),
				Attribute::Age => p.age.map(|a| a.to_string()),
				Attribute::Field => p.field_cd.and_then(|c| get_label(self, c)),
				Attribute::Race => p.race.and_then(|c| get_label(self, c)),
				Attribute::Goal => p.goal.and_then(|c| get_label(self, c)),
				Attribute::Career => p.career_c.and_then(|c| get_label(self, c)),
				Attribute::From => p.from.clone(),
			};
			value.unwrap_or_else(|| UNKNOWN.to_string())
		}
	}
}

impl fmt::Display for Attribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// Label for `code` under `attribute`, if the code is known.
pub fn get_label(attribute: Attribute, code: usize) -> Option<String> {
	match attribute {
		Attribute::Age => Some(code.to_string()),
		Attribute::Gender => Gender::ALL.get(code).map(|g| g.label().to_string()),
		Attribute::From => None,
		other => other
			.labels()
			.and_then(|l| code.checked_sub(1).and_then(|i| l.get(i)))
			.map(|s| s.to_string()),
	}
}

/// Inverse of [`get_label`].
pub fn get_code(attribute: Attribute, label: &str) -> Option<usize> {
	match attribute {
		Attribute::Age => label.trim().parse().ok(),
		Attribute::Gender => Gender::ALL.iter().position(|g| g.label() == label),
		Attribute::From => None,
		other => other
			.labels()
			.and_then(|l| l.iter().position(|s| *s == label))
			.map(|i| i + 1),
	}
}

/// Distinct keys of `items` in first-seen order.
pub fn unique<T>(items: &[T], key: impl Fn(&T) -> String) -> Vec<String> {
	let mut seen = HashSet::new();
	items
		.iter()
		.map(key)
		.filter(|k| seen.insert(k.clone()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_labels_and_codes_are_inverse() {
		for attribute in Attribute::SELECTABLE {
			for code in attribute.codes() {
				let label = get_label(attribute, code).unwrap();
				assert_eq!(get_code(attribute, &label), Some(code), "{attribute} {label}");
			}
		}
	}

	#[test]
	fn test_unknown_codes() {
		assert_eq!(get_label(Attribute::Field, 0), None);
		assert_eq!(get_label(Attribute::Race, 7), None);
		assert_eq!(get_code(Attribute::Goal, "Not a goal"), None);
		assert_eq!(get_code(Attribute::From, "Chicago"), None);
	}

	#[test]
	fn test_age_codes_cover_range() {
		let codes = Attribute::Age.codes();
		assert_eq!(codes.first(), Some(&18));
		assert_eq!(codes.last(), Some(&45));
		assert_eq!(get_label(Attribute::Age, 30).as_deref(), Some("30"));
	}

	#[test]
	fn test_other_gender() {
		assert_eq!(Gender::Female.other(), Gender::Male);
		assert_eq!(get_other_gender("male"), Some("female"));
		assert_eq!(get_other_gender("robot"), None);
	}

	#[test]
	fn test_unique_keeps_first_seen_order() {
		let items = ["b", "a", "b", "c", "a"];
		assert_eq!(unique(&items, |s| s.to_string()), vec!["b", "a", "c"]);
	}

	#[test]
	fn test_decode_missing_value() {
		let p = Participant {
			id: 4,
			field_cd: Some(2),
			..Default::default()
		};
		assert_eq!(Attribute::Field.decode()(&p), "Math");
		assert_eq!(Attribute::From.decode()(&p), UNKNOWN);
	}

	#[test]
	fn test_attribute_keys_round_trip() {
		assert_eq!(Attribute::from_key("career_c"), Some(Attribute::Career));
		assert_eq!(Attribute::from_key("nope"), None);
	}
}
