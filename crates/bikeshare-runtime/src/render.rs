//! Text rendering of the reports and raw rows.
//!
//! Everything here returns lines instead of printing, so the session decides
//! where output goes and tests can compare plain strings.

use std::time::Duration;

use bikeshare_core::formatting::{format_clock, format_total_duration, separator};
use bikeshare_core::models::{month_name, weekday_name, TripRecord};
use bikeshare_data::aggregator::ValueCount;
use bikeshare_data::analysis::{
    AnalysisResult, DurationStats, StationStats, TimeStats, Timed, UserStats,
};

const NO_DATA: &str = "no data";

/// All four reports, in display order.
pub fn render_analysis(result: &AnalysisResult) -> Vec<String> {
    let mut lines = render_time_stats(&result.time);
    lines.extend(render_station_stats(&result.stations));
    lines.extend(render_duration_stats(&result.durations));
    lines.extend(render_user_stats(&result.users));
    lines
}

pub fn render_time_stats(report: &Timed<TimeStats>) -> Vec<String> {
    let stats = &report.stats;
    section(
        "Calculating The Most Frequent Times of Travel...",
        vec![
            format!(
                "The most common month: {}",
                or_no_data(stats.month.as_ref().map(|m| month_name(m.value)))
            ),
            String::new(),
            format!(
                "The most common day of week: {}",
                or_no_data(stats.weekday.as_ref().map(|d| weekday_name(d.value)))
            ),
            String::new(),
            format!(
                "The most common start hour: {}",
                or_no_data(stats.start_hour.as_ref().map(|h| h.value))
            ),
        ],
        report.elapsed,
    )
}

pub fn render_station_stats(report: &Timed<StationStats>) -> Vec<String> {
    let stats = &report.stats;
    let name =
        |vc: &Option<ValueCount<String>>| or_no_data(vc.as_ref().map(|v| v.value.clone()));
    section(
        "Calculating The Most Popular Stations and Trip...",
        vec![
            format!(
                "The most commonly used start station: {}",
                name(&stats.start_station)
            ),
            String::new(),
            format!(
                "The most commonly used end station: {}",
                name(&stats.end_station)
            ),
            String::new(),
            format!(
                "The most frequent combination of start and end station trip: {}",
                name(&stats.trip)
            ),
        ],
        report.elapsed,
    )
}

pub fn render_duration_stats(report: &Timed<DurationStats>) -> Vec<String> {
    let stats = &report.stats;
    section(
        "Calculating Trip Duration...",
        vec![
            format!(
                "Total travel time: {}",
                format_total_duration(stats.total_seconds)
            ),
            format!(
                "Mean travel time: {}",
                or_no_data(stats.mean_seconds.map(format_clock))
            ),
        ],
        report.elapsed,
    )
}

pub fn render_user_stats(report: &Timed<UserStats>) -> Vec<String> {
    let stats = &report.stats;
    let mut body = vec!["Count of user types:".to_string()];
    body.extend(breakdown(&stats.user_types));

    match &stats.demographics {
        Some(demo) => {
            body.push("Count of gender:".to_string());
            body.extend(breakdown(&demo.genders));
            body.push(format!(
                "Earliest year of birth: {}",
                or_no_data(demo.earliest_birth_year)
            ));
            body.push(format!(
                "Most recent year of birth: {}",
                or_no_data(demo.latest_birth_year)
            ));
            body.push(format!(
                "Most common year of birth: {}",
                or_no_data(demo.common_birth_year.as_ref().map(|y| y.value))
            ));
        }
        None => {
            body.push("No data available for gender.".to_string());
            body.push("No data available for birth year.".to_string());
        }
    }

    section("Calculating User Stats...", body, report.elapsed)
}

/// Header plus one line per row, numbered from `first_index`.
pub fn render_rows(
    rows: &[TripRecord],
    first_index: usize,
    has_demographics: bool,
) -> Vec<String> {
    let mut header = vec![
        "Row",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if has_demographics {
        header.extend(["Gender", "Birth Year"]);
    }

    let mut lines = vec![header.join(" | ")];
    for (offset, row) in rows.iter().enumerate() {
        let mut cells = vec![
            (first_index + offset).to_string(),
            row.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            missing(row.end_time.clone()),
            row.trip_duration.to_string(),
            row.start_station.clone(),
            row.end_station.clone(),
            missing(row.user_type.clone()),
        ];
        if has_demographics {
            cells.push(missing(row.gender.clone()));
            cells.push(missing(row.birth_year.map(|y| y.to_string())));
        }
        lines.push(cells.join(" | "));
    }
    lines
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn section(title: &str, body: Vec<String>, elapsed: Duration) -> Vec<String> {
    let mut lines = vec![String::new(), title.to_string(), String::new()];
    lines.extend(body);
    lines.push(String::new());
    lines.push(format!("This took {} seconds.", elapsed.as_secs_f64()));
    lines.push(separator());
    lines
}

fn breakdown(counts: &[ValueCount<String>]) -> Vec<String> {
    if counts.is_empty() {
        return vec![format!("  {}", NO_DATA)];
    }
    counts
        .iter()
        .map(|vc| format!("  {}: {}", vc.value, vc.count))
        .collect()
}

fn or_no_data<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| v.to_string())
}

fn missing(value: Option<String>) -> String {
    value.unwrap_or_else(|| "NaN".to_string())
}
