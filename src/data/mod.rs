//! The survey dataset: participants, rating links, and match tables.
//!
//! The dataset ships inside the page as JSON in
//! `<script type="application/json" id="match-data">`.

mod attribute;
mod participant;
mod table;

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub use attribute::{
	AGE_RANGE, Attribute, Gender, UNKNOWN, get_code, get_label, get_other_gender, unique,
};
pub use participant::{GraphData, Link, Participant};
pub use table::MatchTable;

/// Element id of the embedded dataset.
pub const DATA_ELEMENT_ID: &str = "match-data";

/// Everything the views need.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Dataset {
	#[serde(flatten)]
	pub graph: GraphData,
	/// Match tables keyed by gender, then attribute.
	#[serde(default)]
	pub tables: HashMap<Gender, HashMap<Attribute, MatchTable>>,
}

impl Dataset {
	/// Table for the given gender and attribute. Empty when absent.
	pub fn table(&self, gender: Gender, attribute: Attribute) -> MatchTable {
		self.tables
			.get(&gender)
			.and_then(|t| t.get(&attribute))
			.cloned()
			.unwrap_or_default()
	}

	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).context("dataset JSON is malformed")
	}
}

/// Text content of the `<script>` element with the given id.
fn script_text(id: &str) -> Result<Option<String>> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| anyhow!("no document available"))?;
	let Some(element) = document.get_element_by_id(id) else {
		return Ok(None);
	};
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| anyhow!("#{id} is not a <script> element"))?;
	let text = script
		.text()
		.map_err(|e| anyhow!("failed to read #{id}: {e:?}"))?;
	Ok(Some(text))
}

/// Parse JSON embedded in the page under `id`, if the element exists.
pub fn read_embedded_json<T: DeserializeOwned>(id: &str) -> Result<Option<T>> {
	let Some(text) = script_text(id)? else {
		return Ok(None);
	};
	serde_json::from_str(&text)
		.with_context(|| format!("invalid JSON in #{id}"))
		.map(Some)
}

/// Load the dataset embedded in the page.
pub fn load_dataset() -> Result<Dataset> {
	read_embedded_json(DATA_ELEMENT_ID)?
		.ok_or_else(|| anyhow!("no #{DATA_ELEMENT_ID} element in the page"))
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = r#"{
		"participants": [
			{"id": 1, "gender": "female", "age": 24, "field_cd": 1, "from": "Chicago"},
			{"id": 2, "gender": "male", "age": 27, "field_cd": 5}
		],
		"links": [{"source": 1, "target": 2, "like": 8, "match": 0}],
		"tables": {
			"female": {"field_cd": [[0.0, 0.1], [0.2, 0.3]]},
			"male": {"age": [[0.5]]}
		}
	}"#;

	#[test]
	fn test_missing_like_keeps_dataset() {
		let data = Dataset::from_json(
			r#"{
				"participants": [{"id": 1}, {"id": 2}],
				"links": [
					{"source": 1, "target": 2, "like": 8, "match": 0},
					{"source": 2, "target": 1, "like": null, "match": 1}
				]
			}"#,
		)
		.unwrap();
		assert_eq!(data.graph.links.len(), 2);
		assert_eq!(data.graph.links[0].like, 8.0);
		assert!(data.graph.links[1].like.is_nan());
		assert!(data.graph.links[1].r#match);
	}

	#[test]
	fn test_parse_dataset() {
		let data = Dataset::from_json(SAMPLE).unwrap();
		assert_eq!(data.graph.participants.len(), 2);
		assert_eq!(data.graph.links.len(), 1);
		assert_eq!(data.table(Gender::Female, Attribute::Field).len(), 2);
		assert_eq!(data.table(Gender::Male, Attribute::Age).value(0, 0), 0.5);
	}

	#[test]
	fn test_missing_table_is_empty() {
		let data = Dataset::from_json(SAMPLE).unwrap();
		assert!(data.table(Gender::Male, Attribute::Race).is_empty());
	}

	#[test]
	fn test_malformed_dataset() {
		let err = Dataset::from_json("{\"participants\": 3}").unwrap_err();
		assert!(err.to_string().contains("malformed"));
	}
}
