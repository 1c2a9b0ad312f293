//! Participant nodes and the rating links between them.

use serde::{Deserialize, Deserializer};

use super::attribute::Gender;

/// One survey participant. Attribute fields are optional since the raw
/// survey has gaps.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Participant {
	/// Unique identifier. Links reference participants by this id.
	pub id: u32,
	#[serde(default)]
	pub gender: Option<Gender>,
	#[serde(default)]
	pub age: Option<u32>,
	/// Field of study code.
	#[serde(default)]
	pub field_cd: Option<usize>,
	#[serde(default)]
	pub race: Option<usize>,
	#[serde(default)]
	pub goal: Option<usize>,
	/// Career code.
	#[serde(default)]
	pub career_c: Option<usize>,
	/// Where the participant is from (free text).
	#[serde(default)]
	pub from: Option<String>,
}

/// A rating between two participants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Link {
	pub source: u32,
	pub target: u32,
	/// How much the source liked the target, 0 to 10. `NaN` when the rating
	/// is missing.
	#[serde(default = "missing_like", deserialize_with = "like_or_missing")]
	pub like: f64,
	/// Whether both sides said yes. Accepts `true`/`false` or `1`/`0`;
	/// missing counts as no match.
	#[serde(default, deserialize_with = "bool_or_flag")]
	pub r#match: bool,
}

fn missing_like() -> f64 {
	f64::NAN
}

fn like_or_missing<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
	Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn bool_or_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Flag {
		Bool(bool),
		Number(f64),
	}

	Ok(match Option::<Flag>::deserialize(deserializer)? {
		Some(Flag::Bool(b)) => b,
		Some(Flag::Number(n)) => n != 0.0,
		None => false,
	})
}

/// Participants and links: the input to the force-directed graph.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub participants: Vec<Participant>,
	#[serde(default)]
	pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_link_accepts_numeric_match() {
		let links: Vec<Link> = serde_json::from_str(
			r#"[{"source":1,"target":2,"like":8,"match":0},
			    {"source":2,"target":1,"like":6.5,"match":true}]"#,
		)
		.unwrap();
		assert!(!links[0].r#match);
		assert!(links[1].r#match);
		assert_eq!(links[1].like, 6.5);
	}

	#[test]
	fn test_link_tolerates_missing_ratings() {
		let links: Vec<Link> = serde_json::from_str(
			r#"[{"source":1,"target":2,"like":null,"match":null},
			    {"source":2,"target":1}]"#,
		)
		.unwrap();
		assert!(links.iter().all(|l| l.like.is_nan() && !l.r#match));
	}

	#[test]
	fn test_participant_missing_fields() {
		let p: Participant =
			serde_json::from_str(r#"{"id":7,"gender":"male","from":"Paris"}"#).unwrap();
		assert_eq!(p.id, 7);
		assert_eq!(p.gender, Some(Gender::Male));
		assert_eq!(p.field_cd, None);
		assert_eq!(p.from.as_deref(), Some("Paris"));
	}
}
