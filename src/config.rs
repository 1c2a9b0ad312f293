//! Application configuration.
//!
//! Read from an optional `<script id="vis-config">` JSON block. Every field
//! is optional; missing ones keep their defaults.

use anyhow::Result;
use serde::Deserialize;

use crate::components::bar_chart::BarChartConfig;
use crate::components::force_graph::ForceConfig;
use crate::components::legend::default_legend_config;
use crate::components::view::ViewConfig;
use crate::data::read_embedded_json;

/// Element id holding the configuration JSON.
pub const CONFIG_ELEMENT_ID: &str = "vis-config";

/// View geometry and tuning for the whole page.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub graph: ViewConfig,
	pub legend: ViewConfig,
	pub bar_chart: BarChartConfig,
	pub forces: ForceConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			graph: ViewConfig::default(),
			legend: default_legend_config(),
			bar_chart: BarChartConfig::default(),
			forces: ForceConfig::default(),
		}
	}
}

impl AppConfig {
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Configuration embedded in the page, or defaults when absent.
	pub fn load() -> Result<Self> {
		Ok(read_embedded_json(CONFIG_ELEMENT_ID)?.unwrap_or_default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_config_is_default() {
		assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
	}

	#[test]
	fn test_partial_override() {
		let config = AppConfig::from_json(
			r#"{
				"graph": {"container_width": 1000},
				"bar_chart": {"domain_max": 0.5},
				"forces": {"repel_strength": 30}
			}"#,
		)
		.unwrap();
		assert_eq!(config.graph.container_width, 1000.0);
		assert_eq!(config.graph.container_height, 600.0);
		assert_eq!(config.bar_chart.domain_max, 0.5);
		assert_eq!(config.bar_chart.tick_count, 10);
		assert_eq!(config.forces.repel_strength, 30.0);
		assert_eq!(config.forces.like_distance_factor, 50.0);
		assert_eq!(config.legend, default_legend_config());
	}

	#[test]
	fn test_rejects_bad_types() {
		assert!(AppConfig::from_json(r#"{"forces": {"repel_strength": "high"}}"#).is_err());
	}
}
