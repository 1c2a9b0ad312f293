//! Attraction modes and force parameters for the participant graph.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::data::Link;

/// Which link weight decides how close two participants sit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttractionMode {
	/// Stronger liking gives a shorter link.
	#[default]
	Like,
	/// Matched pairs are pulled together, others held apart.
	Match,
}

impl AttractionMode {
	pub const ALL: [AttractionMode; 2] = [AttractionMode::Like, AttractionMode::Match];

	pub fn key(self) -> &'static str {
		match self {
			AttractionMode::Like => "like",
			AttractionMode::Match => "match",
		}
	}
}

impl fmt::Display for AttractionMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

impl FromStr for AttractionMode {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"like" => Ok(AttractionMode::Like),
			"match" => Ok(AttractionMode::Match),
			_ => Err(()),
		}
	}
}

/// Force tuning. The defaults leave repulsion off.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
	/// Many-body repulsion. Applied as a negative charge.
	pub repel_strength: f64,
	/// Pixels per point of missing "like" (10 - like).
	pub like_distance_factor: f64,
	/// Pixels between unmatched participants.
	pub match_distance_factor: f64,
}

impl Default for ForceConfig {
	fn default() -> Self {
		Self {
			repel_strength: 0.0,
			like_distance_factor: 50.0,
			match_distance_factor: 250.0,
		}
	}
}

/// Target link length for an attraction mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkDistance {
	pub mode: AttractionMode,
	pub like_factor: f64,
	pub match_factor: f64,
}

impl LinkDistance {
	pub fn new(mode: AttractionMode, config: &ForceConfig) -> Self {
		Self {
			mode,
			like_factor: config.like_distance_factor,
			match_factor: config.match_distance_factor,
		}
	}

	pub fn distance(&self, link: &Link) -> f64 {
		match self.mode {
			AttractionMode::Like => (10.0 - link.like) * self.like_factor,
			AttractionMode::Match => {
				if link.r#match {
					0.0
				} else {
					self.match_factor
				}
			}
		}
	}
}

impl Default for LinkDistance {
	fn default() -> Self {
		Self::new(AttractionMode::default(), &ForceConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn link(like: f64, matched: bool) -> Link {
		Link {
			source: 1,
			target: 2,
			like,
			r#match: matched,
		}
	}

	#[test]
	fn test_like_distance() {
		let d = LinkDistance::new(AttractionMode::Like, &ForceConfig::default());
		assert_eq!(d.distance(&link(10.0, false)), 0.0);
		assert_eq!(d.distance(&link(0.0, false)), 500.0);
		assert_eq!(d.distance(&link(8.0, true)), 100.0);
	}

	#[test]
	fn test_match_distance() {
		let d = LinkDistance::new(AttractionMode::Match, &ForceConfig::default());
		assert_eq!(d.distance(&link(3.0, true)), 0.0);
		assert_eq!(d.distance(&link(3.0, false)), 250.0);
	}

	#[test]
	fn test_parse_mode() {
		assert_eq!("match".parse(), Ok(AttractionMode::Match));
		assert_eq!("Like".parse::<AttractionMode>(), Err(()));
	}
}
