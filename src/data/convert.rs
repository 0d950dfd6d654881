//! Shapes aggregate payloads into the inputs each chart lays out.

use std::collections::BTreeMap;

use log::warn;

use super::DataError;
use super::types::{HierarchyNode, Record, ScatterSample, TopicCount, YearIntensity};
use crate::components::charts::bubble::layout::BubbleDatum;
use crate::components::charts::line_chart::series::SeriesPoint;

/// Longest tooltip title before it is cut.
pub const MAX_TITLE_CHARS: usize = 120;

const UNKNOWN: &str = "Unknown";

/// Which per-year aggregate the time series plots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeriesMetric {
	#[default]
	AvgIntensity,
	Count,
}

impl SeriesMetric {
	pub const ALL: [SeriesMetric; 2] = [SeriesMetric::AvgIntensity, SeriesMetric::Count];

	pub fn label(self) -> &'static str {
		match self {
			SeriesMetric::AvgIntensity => "Avg intensity",
			SeriesMetric::Count => "Records",
		}
	}

	pub fn value(self, row: &YearIntensity) -> f64 {
		match self {
			SeriesMetric::AvgIntensity => row.avg_intensity.unwrap_or(f64::NAN),
			SeriesMetric::Count => row.count as f64,
		}
	}
}

/// Year-keyed points for the line chart. Rows without a year are dropped.
pub fn time_series(rows: &[YearIntensity], metric: SeriesMetric) -> Vec<SeriesPoint<YearIntensity>> {
	rows.iter()
		.filter_map(|row| {
			let year = row.year?;
			Some(SeriesPoint::new(year, metric.value(row), row.clone()))
		})
		.collect()
}

/// Intensity against likelihood, sized by relevance and colored by region.
pub fn bubbles(samples: &[ScatterSample]) -> Vec<BubbleDatum> {
	samples
		.iter()
		.filter_map(|s| {
			let x = s.intensity.filter(|v| v.is_finite())?;
			let y = s.likelihood.filter(|v| v.is_finite())?;
			// zero relevance would draw nothing; it sizes like a missing one
			let r = s.relevance.filter(|v| v.is_finite() && *v != 0.0).unwrap_or(1.0);
			let category = non_empty(s.region.as_deref()).unwrap_or(UNKNOWN).to_string();
			let title = match non_empty(s.title.as_deref()) {
				Some(t) => truncate(t, MAX_TITLE_CHARS),
				None => non_empty(s.topic.as_deref()).unwrap_or("item").to_string(),
			};
			let mut details = vec![
				format!("Region: {category}"),
				format!("Intensity: {x}"),
				format!("Likelihood: {y}"),
				format!("Relevance: {r}"),
			];
			if let Some(country) = non_empty(s.country.as_deref()) {
				details.push(format!("Country: {country}"));
			}
			if let Some(year) = s.year {
				details.push(format!("Year: {year}"));
			}
			Some(BubbleDatum {
				x,
				y,
				r,
				category,
				title,
				details,
			})
		})
		.collect()
}

/// Record counts grouped by sector, then topic.
pub fn topic_hierarchy(records: &[Record]) -> Result<HierarchyNode, DataError> {
	let mut sectors: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
	for record in records {
		let sector = non_empty(record.sector.as_deref()).unwrap_or(UNKNOWN);
		let topic = non_empty(record.topic.as_deref()).unwrap_or(UNKNOWN);
		*sectors.entry(sector).or_default().entry(topic).or_default() += 1;
	}
	if sectors.is_empty() {
		warn!("topic hierarchy requested for an empty record set");
		return Err(DataError::EmptyHierarchy("topics".into()));
	}
	let children = sectors
		.into_iter()
		.map(|(sector, topics)| {
			HierarchyNode::branch(
				sector,
				topics
					.into_iter()
					.map(|(topic, count)| HierarchyNode::leaf(topic, count as f64))
					.collect(),
			)
		})
		.collect();
	Ok(HierarchyNode::branch("topics", children))
}

/// The `limit` most frequent named topics, largest first.
pub fn top_topics(rows: &[TopicCount], limit: usize) -> Vec<(String, u64)> {
	let mut topics: Vec<_> = rows
		.iter()
		.filter(|row| row.count > 0)
		.filter_map(|row| Some((non_empty(row.topic.as_deref())?.to_string(), row.count)))
		.collect();
	topics.sort_by(|a, b| b.1.cmp(&a.1));
	topics.truncate(limit);
	topics
}

fn non_empty(s: Option<&str>) -> Option<&str> {
	s.map(str::trim).filter(|s| !s.is_empty())
}

fn truncate(s: &str, max_chars: usize) -> String {
	match s.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}…", &s[..cut]),
		None => s.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(sector: Option<&str>, topic: Option<&str>) -> Record {
		Record {
			sector: sector.map(Into::into),
			topic: topic.map(Into::into),
			..Record::default()
		}
	}

	#[test]
	fn time_series_skips_missing_years() {
		let rows = vec![
			YearIntensity { year: Some(2017.0), avg_intensity: Some(4.0), count: 3 },
			YearIntensity { year: None, avg_intensity: Some(9.0), count: 1 },
			YearIntensity { year: Some(2016.0), avg_intensity: None, count: 2 },
		];
		let avg = time_series(&rows, SeriesMetric::AvgIntensity);
		assert_eq!(avg.len(), 2);
		assert_eq!(avg[0].y, 4.0);
		assert!(avg[1].y.is_nan());
		let count = time_series(&rows, SeriesMetric::Count);
		assert_eq!(count[1].y, 2.0);
	}

	#[test]
	fn bubbles_fill_defaults() {
		let samples = vec![
			ScatterSample {
				intensity: Some(6.0),
				likelihood: Some(3.0),
				topic: Some("oil".into()),
				..ScatterSample::default()
			},
			ScatterSample {
				intensity: None,
				likelihood: Some(1.0),
				..ScatterSample::default()
			},
			ScatterSample {
				intensity: Some(1.0),
				likelihood: Some(1.0),
				relevance: Some(4.0),
				region: Some("Asia".into()),
				title: Some("x".repeat(200)),
				..ScatterSample::default()
			},
		];
		let data = bubbles(&samples);
		assert_eq!(data.len(), 2);
		assert_eq!(data[0].r, 1.0);
		assert_eq!(data[0].category, "Unknown");
		assert_eq!(data[0].title, "oil");
		assert_eq!(data[1].category, "Asia");
		assert_eq!(data[1].title.chars().count(), MAX_TITLE_CHARS + 1);
	}

	#[test]
	fn zero_relevance_sizes_like_missing() {
		let sample = |relevance| ScatterSample {
			intensity: Some(2.0),
			likelihood: Some(2.0),
			relevance,
			..ScatterSample::default()
		};
		let data = bubbles(&[sample(Some(0.0)), sample(Some(f64::NAN)), sample(Some(3.0))]);
		assert_eq!(data.iter().map(|d| d.r).collect::<Vec<_>>(), vec![1.0, 1.0, 3.0]);
	}

	#[test]
	fn hierarchy_groups_sector_then_topic() {
		let records = vec![
			record(Some("Energy"), Some("oil")),
			record(Some("Energy"), Some("oil")),
			record(Some("Energy"), Some("gas")),
			record(None, Some("market")),
			record(Some(" "), None),
		];
		let root = topic_hierarchy(&records).unwrap();
		assert_eq!(root.name, "topics");
		let energy = root.children.iter().find(|c| c.name == "Energy").unwrap();
		let oil = energy.children.iter().find(|c| c.name == "oil").unwrap();
		assert_eq!(oil.value, Some(2.0));
		let unknown = root.children.iter().find(|c| c.name == "Unknown").unwrap();
		assert_eq!(unknown.children.len(), 2);
	}

	#[test]
	fn empty_records_have_no_hierarchy() {
		assert!(matches!(topic_hierarchy(&[]), Err(DataError::EmptyHierarchy(_))));
	}

	#[test]
	fn top_topics_sorted_and_limited() {
		let rows: Vec<_> = [("gas", 5), ("", 9), ("oil", 12), ("coal", 0), ("market", 7)]
			.into_iter()
			.map(|(t, c)| TopicCount { topic: Some(t.into()), count: c })
			.collect();
		let top = top_topics(&rows, 2);
		assert_eq!(top, vec![("oil".to_string(), 12), ("market".to_string(), 7)]);
	}
}
