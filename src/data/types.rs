//! Shapes returned by the aggregation service.
//!
//! Every field the service may omit or send as `null` is optional; the charts
//! decide what a missing value means.

use serde::Deserialize;

/// One event record.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Record {
	pub intensity: Option<f64>,
	pub likelihood: Option<f64>,
	pub relevance: Option<f64>,
	pub region: Option<String>,
	pub sector: Option<String>,
	pub topic: Option<String>,
	#[serde(alias = "published_year")]
	pub year: Option<i32>,
	pub country: Option<String>,
	pub title: Option<String>,
}

/// A page of the flat events query.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EventsPage {
	pub total: u64,
	pub results: Vec<Record>,
}

/// Average intensity per publication year.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct YearIntensity {
	#[serde(default)]
	pub year: Option<f64>,
	#[serde(default, rename = "avgIntensity")]
	pub avg_intensity: Option<f64>,
	#[serde(default)]
	pub count: u64,
}

/// One sample of the intensity/likelihood scatter.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScatterSample {
	pub intensity: Option<f64>,
	pub likelihood: Option<f64>,
	pub relevance: Option<f64>,
	pub region: Option<String>,
	pub country: Option<String>,
	pub title: Option<String>,
	pub topic: Option<String>,
	pub year: Option<i32>,
}

/// A node of the topic hierarchy.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct HierarchyNode {
	pub name: String,
	#[serde(default)]
	pub value: Option<f64>,
	#[serde(default)]
	pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
	/// A leaf carrying `value`.
	pub fn leaf(name: impl Into<String>, value: f64) -> Self {
		Self {
			name: name.into(),
			value: Some(value),
			children: Vec::new(),
		}
	}

	/// An inner node; its value is always derived from `children`.
	pub fn branch(name: impl Into<String>, children: Vec<HierarchyNode>) -> Self {
		Self {
			name: name.into(),
			value: None,
			children,
		}
	}
}

/// Average scores and record count of one sector.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SectorMetrics {
	pub sector: Option<String>,
	pub intensity: Option<f64>,
	pub likelihood: Option<f64>,
	pub relevance: Option<f64>,
	pub count: u64,
}

/// Record count of one topic.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TopicCount {
	#[serde(default)]
	pub topic: Option<String>,
	#[serde(default)]
	pub count: u64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::decode;

	#[test]
	fn events_page_tolerates_nulls_and_missing_fields() {
		let json = serde_json::json!({
			"total": 2,
			"page": 1,
			"results": [
				{ "intensity": 6, "likelihood": null, "region": "Asia", "published_year": 2017 },
				{ "title": "Oil output", "relevance": 2.5 }
			]
		});
		let page: EventsPage = decode(&json.to_string()).unwrap();
		assert_eq!(page.total, 2);
		assert_eq!(page.results[0].intensity, Some(6.0));
		assert_eq!(page.results[0].likelihood, None);
		assert_eq!(page.results[0].year, Some(2017));
		assert_eq!(page.results[1].title.as_deref(), Some("Oil output"));
	}

	#[test]
	fn hierarchy_children_default_to_empty() {
		let json = r#"{"name":"root","children":[{"name":"gas","value":3},{"name":"oil"}]}"#;
		let root: HierarchyNode = decode(json).unwrap();
		assert_eq!(root.children.len(), 2);
		assert_eq!(root.children[0].value, Some(3.0));
		assert!(root.children[1].children.is_empty());
		assert_eq!(root.children[1].value, None);
	}

	#[test]
	fn year_intensity_uses_service_field_names() {
		let json = r#"[{"year":2016,"avgIntensity":4.5,"count":10},{"year":null,"avgIntensity":null,"count":1}]"#;
		let rows: Vec<YearIntensity> = decode(json).unwrap();
		assert_eq!(rows[0].avg_intensity, Some(4.5));
		assert_eq!(rows[1].year, None);
	}

	#[test]
	fn sector_metrics_allow_null_scores() {
		let json = r#"[{"sector":"Energy","intensity":12.5,"likelihood":null,"count":40},{"count":2}]"#;
		let rows: Vec<SectorMetrics> = decode(json).unwrap();
		assert_eq!(rows[0].sector.as_deref(), Some("Energy"));
		assert_eq!(rows[0].intensity, Some(12.5));
		assert_eq!(rows[0].likelihood, None);
		assert_eq!(rows[0].relevance, None);
		assert_eq!(rows[1].sector, None);
		assert_eq!(rows[1].count, 2);
	}

	#[test]
	fn malformed_payload_is_an_error() {
		assert!(decode::<Vec<TopicCount>>("{not json").is_err());
	}
}
