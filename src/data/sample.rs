//! Deterministic sample events and the aggregates the dashboard draws.
//!
//! The aggregates mirror what the service returns for the same records, so
//! the charts can run without a backend.

use std::collections::BTreeMap;

use super::types::{Record, ScatterSample, SectorMetrics, TopicCount, YearIntensity};

/// A handful of hand-written events shipped with the app, in the service's
/// wire format.
pub const SEED_EVENTS: &str = r#"{
	"total": 4,
	"results": [
		{ "intensity": 6, "likelihood": 3, "relevance": 2, "region": "Northern America", "country": "United States of America", "sector": "Energy", "topic": "gas", "published_year": 2017, "title": "U.S. natural gas consumption is expected to increase" },
		{ "intensity": 16, "likelihood": 4, "relevance": 4, "region": "Central Africa", "country": "Angola", "sector": "Energy", "topic": "oil", "published_year": 2016, "title": "Angola to boost crude output" },
		{ "intensity": 4, "likelihood": 2, "relevance": 1, "region": "Western Asia", "country": "Saudi Arabia", "sector": "Government", "topic": "policy", "published_year": 2018, "title": null },
		{ "intensity": null, "likelihood": null, "region": "", "sector": null, "topic": "market", "published_year": null }
	]
}"#;

const SECTORS: &[(&str, &[&str])] = &[
	("Energy", &["oil", "gas", "coal", "nuclear", "electricity"]),
	("Financial services", &["market", "economy", "interest rate", "debt"]),
	("Manufacturing", &["production", "robot", "automation"]),
	("Government", &["policy", "war", "trade"]),
	("Retail", &["consumption", "price"]),
];

const REGIONS: &[&str] = &[
	"Northern America",
	"Western Asia",
	"Central Africa",
	"Western Europe",
	"South America",
	"Eastern Asia",
];

const FIRST_YEAR: i32 = 2014;
const YEARS: usize = 8;

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn pick<T: Copy>(items: &[T], seed: usize) -> T {
	items[((rand_simple(seed) * items.len() as f64) as usize).min(items.len() - 1)]
}

/// `n` generated events; roughly one in twenty lacks a sector or a year.
pub fn records(n: usize) -> Vec<Record> {
	(0..n)
		.map(|i| {
			let s = i * 7;
			let (sector, topics) = pick(SECTORS, s);
			let topic = pick(topics, s + 1);
			let region = pick(REGIONS, s + 2);
			let year = FIRST_YEAR + (rand_simple(s + 3) * YEARS as f64) as i32;
			Record {
				intensity: Some((rand_simple(s + 4) * 40.0).round()),
				likelihood: Some(1.0 + (rand_simple(s + 5) * 4.0).floor()),
				relevance: Some(1.0 + (rand_simple(s + 6) * 6.0).floor()),
				region: Some(region.to_string()),
				sector: (i % 20 != 7).then(|| sector.to_string()),
				topic: Some(topic.to_string()),
				year: (i % 20 != 13).then_some(year),
				country: None,
				title: Some(format!("{topic} outlook for {region}")),
			}
		})
		.collect()
}

/// Average intensity and record count per year, ascending.
pub fn year_intensity(records: &[Record]) -> Vec<YearIntensity> {
	let mut years: BTreeMap<i32, (f64, u64, u64)> = BTreeMap::new();
	for r in records {
		let Some(year) = r.year else {
			continue;
		};
		let entry = years.entry(year).or_default();
		if let Some(v) = r.intensity.filter(|v| v.is_finite()) {
			entry.0 += v;
			entry.1 += 1;
		}
		entry.2 += 1;
	}
	years
		.into_iter()
		.map(|(year, (sum, with_intensity, count))| YearIntensity {
			year: Some(year as f64),
			avg_intensity: (with_intensity > 0).then(|| sum / with_intensity as f64),
			count,
		})
		.collect()
}

pub fn scatter(records: &[Record]) -> Vec<ScatterSample> {
	records
		.iter()
		.map(|r| ScatterSample {
			intensity: r.intensity,
			likelihood: r.likelihood,
			relevance: r.relevance,
			region: r.region.clone(),
			country: r.country.clone(),
			title: r.title.clone(),
			topic: r.topic.clone(),
			year: r.year,
		})
		.collect()
}

#[derive(Default)]
struct Mean {
	sum: f64,
	n: u64,
}

impl Mean {
	fn add(&mut self, v: Option<f64>) {
		if let Some(v) = v.filter(|v| v.is_finite()) {
			self.sum += v;
			self.n += 1;
		}
	}

	fn get(&self) -> Option<f64> {
		(self.n > 0).then(|| self.sum / self.n as f64)
	}
}

/// Average intensity, likelihood and relevance per named sector, with the
/// sector's record count. Sorted by sector name.
pub fn sector_metrics(records: &[Record]) -> Vec<SectorMetrics> {
	let mut sectors: BTreeMap<&str, (Mean, Mean, Mean, u64)> = BTreeMap::new();
	for r in records {
		let Some(sector) = r.sector.as_deref().filter(|s| !s.trim().is_empty()) else {
			continue;
		};
		let entry = sectors.entry(sector).or_default();
		entry.0.add(r.intensity);
		entry.1.add(r.likelihood);
		entry.2.add(r.relevance);
		entry.3 += 1;
	}
	sectors
		.into_iter()
		.map(|(sector, (intensity, likelihood, relevance, count))| SectorMetrics {
			sector: Some(sector.to_string()),
			intensity: intensity.get(),
			likelihood: likelihood.get(),
			relevance: relevance.get(),
			count,
		})
		.collect()
}

/// Record count per named topic, largest first.
pub fn topic_counts(records: &[Record]) -> Vec<TopicCount> {
	let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
	for topic in records.iter().filter_map(|r| r.topic.as_deref()) {
		if !topic.trim().is_empty() {
			*counts.entry(topic).or_default() += 1;
		}
	}
	let mut rows: Vec<_> = counts
		.into_iter()
		.map(|(topic, count)| TopicCount {
			topic: Some(topic.to_string()),
			count,
		})
		.collect();
	rows.sort_by(|a, b| b.count.cmp(&a.count));
	rows
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::decode;
	use crate::data::types::EventsPage;

	#[test]
	fn generation_is_deterministic() {
		assert_eq!(records(50), records(50));
		assert_eq!(records(50).len(), 50);
	}

	#[test]
	fn some_records_lack_sector_or_year() {
		let rs = records(40);
		assert!(rs.iter().any(|r| r.sector.is_none()));
		assert!(rs.iter().any(|r| r.year.is_none()));
	}

	#[test]
	fn year_aggregate_averages_known_intensities() {
		let rs = vec![
			Record { year: Some(2016), intensity: Some(2.0), ..Record::default() },
			Record { year: Some(2016), intensity: Some(4.0), ..Record::default() },
			Record { year: Some(2016), intensity: None, ..Record::default() },
			Record { year: Some(2015), intensity: None, ..Record::default() },
			Record { year: None, intensity: Some(9.0), ..Record::default() },
		];
		let agg = year_intensity(&rs);
		assert_eq!(agg.len(), 2);
		assert_eq!(agg[0].year, Some(2015.0));
		assert_eq!(agg[0].avg_intensity, None);
		assert_eq!(agg[1].avg_intensity, Some(3.0));
		assert_eq!(agg[1].count, 3);
	}

	#[test]
	fn sector_metrics_average_each_score() {
		let rs = vec![
			Record {
				sector: Some("Energy".into()),
				intensity: Some(10.0),
				likelihood: Some(2.0),
				..Record::default()
			},
			Record {
				sector: Some("Energy".into()),
				intensity: Some(20.0),
				relevance: Some(3.0),
				..Record::default()
			},
			Record { sector: Some(" ".into()), intensity: Some(99.0), ..Record::default() },
			Record { sector: None, intensity: Some(99.0), ..Record::default() },
		];
		let rows = sector_metrics(&rs);
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].sector.as_deref(), Some("Energy"));
		assert_eq!(rows[0].intensity, Some(15.0));
		assert_eq!(rows[0].likelihood, Some(2.0));
		assert_eq!(rows[0].relevance, Some(3.0));
		assert_eq!(rows[0].count, 2);
	}

	#[test]
	fn topic_counts_are_sorted() {
		let counts = topic_counts(&records(200));
		assert!(counts.windows(2).all(|w| w[0].count >= w[1].count));
		assert_eq!(counts.iter().map(|c| c.count).sum::<u64>(), 200);
	}

	#[test]
	fn seed_events_decode() {
		let page: EventsPage = decode(SEED_EVENTS).unwrap();
		assert_eq!(page.total, 4);
		assert_eq!(page.results.len(), 4);
		assert_eq!(page.results[1].topic.as_deref(), Some("oil"));
		assert_eq!(page.results[3].intensity, None);
	}
}
