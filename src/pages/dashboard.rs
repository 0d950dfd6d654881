use leptos::prelude::*;
use log::{info, warn};

use crate::components::charts::bubble::BubbleChart;
use crate::components::charts::donut::DonutChart;
use crate::components::charts::line_chart::LineChart;
use crate::components::charts::radar::RadarChart;
use crate::components::charts::sunburst::SunburstChart;
use crate::components::dropdown::Dropdown;
use crate::data::convert::{self, SeriesMetric};
use crate::data::types::{EventsPage, Record};
use crate::data::{decode, sample};

/// Number of generated events added to the seed events.
const GENERATED_EVENTS: usize = 400;
const DONUT_LIMITS: [usize; 6] = [5, 6, 7, 8, 9, 10];
const RADAR_SECTORS: usize = 8;

fn load_records() -> Vec<Record> {
	let mut records = match decode::<EventsPage>(sample::SEED_EVENTS) {
		Ok(page) => page.results,
		Err(e) => {
			warn!("seed events skipped: {e}");
			Vec::new()
		}
	};
	records.extend(sample::records(GENERATED_EVENTS));
	info!("dashboard loaded {} records", records.len());
	records
}

/// Dashboard Page
#[component]
pub fn Dashboard() -> impl IntoView {
	let records = load_records();
	let sectors = Signal::stored(sample::sector_metrics(&records));
	let years = Signal::stored(sample::year_intensity(&records));
	let bubbles = Signal::stored(convert::bubbles(&sample::scatter(&records)));
	let counts = sample::topic_counts(&records);

	let (metric, set_metric) = signal(SeriesMetric::default());
	let metric_label = Signal::derive(move || metric.get().label().to_string());
	let metric_options: Vec<String> = SeriesMetric::ALL.iter().map(|m| m.label().to_string()).collect();

	let (limit, set_limit) = signal(DONUT_LIMITS[0]);
	let limit_label = Signal::derive(move || format!("Show: {}", limit.get()));
	let limit_options: Vec<String> = DONUT_LIMITS.iter().map(|n| n.to_string()).collect();
	let top = Signal::derive(move || convert::top_topics(&counts, limit.get()));

	let hierarchy = move || {
		convert::topic_hierarchy(&records)
			.map(|root| view! { <SunburstChart data=Signal::stored(Some(root)) /> })
	};

	view! {
		<main class="dashboard">
			<section class="panel">
				<header class="panel-header">
					<h3>"Sector comparison"</h3>
				</header>
				<RadarChart data=sectors max_items=RADAR_SECTORS />
			</section>

			<section class="panel">
				<header class="panel-header">
					<h3>"Intensity by year"</h3>
					<Dropdown
						label=metric_label
						options=metric_options
						on_select=move |i: usize| set_metric.set(SeriesMetric::ALL[i])
					/>
				</header>
				<LineChart data=years metric=metric />
			</section>

			<section class="panel">
				<header class="panel-header">
					<h3>"Intensity vs likelihood"</h3>
				</header>
				<BubbleChart data=bubbles />
			</section>

			<section class="panel">
				<header class="panel-header">
					<h3>{move || format!("Top {} topics", limit.get())}</h3>
					<Dropdown
						label=limit_label
						options=limit_options
						on_select=move |i: usize| set_limit.set(DONUT_LIMITS[i])
					/>
				</header>
				<DonutChart data=top />
			</section>

			<section class="panel">
				<header class="panel-header">
					<h3>"Topics by sector"</h3>
				</header>
				<ErrorBoundary fallback=|errors| {
					view! {
						<p>"Topic hierarchy unavailable: "</p>
						<ul>
							{move || {
								errors
									.get()
									.into_iter()
									.map(|(_, e)| view! { <li>{e.to_string()}</li> })
									.collect_view()
							}}
						</ul>
					}
				}>{hierarchy}</ErrorBoundary>
			</section>
		</main>
	}
}
