//! The four descriptive reports over a filtered trip table.
//!
//! Each report is a pure read pass over the rows. [`analyze`] runs all four,
//! timing each one, and returns an [`AnalysisResult`] ready for display.

use std::time::{Duration, Instant};

use bikeshare_core::models::{TripRecord, TripTable};
use chrono::{Timelike, Weekday};

use crate::aggregator::{mode, value_counts, ValueCount};

/// Joins start and end station names into a single trip key.
pub const PAIR_SEPARATOR: &str = " and ";

// ── Public types ──────────────────────────────────────────────────────────────

/// A report value plus the wall-clock time spent computing it.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub stats: T,
    pub elapsed: Duration,
}

/// Run `f` and record how long it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let stats = f();
    Timed {
        stats,
        elapsed: start.elapsed(),
    }
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: Option<ValueCount<u32>>,
    pub weekday: Option<ValueCount<Weekday>>,
    pub start_hour: Option<ValueCount<u32>>,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start_station: Option<ValueCount<String>>,
    pub end_station: Option<ValueCount<String>>,
    /// Keyed by `"{start} and {end}"`.
    pub trip: Option<ValueCount<String>>,
}

/// Total and mean trip duration, truncated to whole seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total_seconds: u64,
    /// `None` for an empty table.
    pub mean_seconds: Option<u64>,
}

/// Gender and birth-year statistics, for cities whose source has them.
#[derive(Debug, Clone, PartialEq)]
pub struct Demographics {
    pub genders: Vec<ValueCount<String>>,
    pub earliest_birth_year: Option<i32>,
    pub latest_birth_year: Option<i32>,
    pub common_birth_year: Option<ValueCount<i32>>,
}

/// User breakdowns.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<ValueCount<String>>,
    /// `None` when the city has no gender or birth-year data at all.
    pub demographics: Option<Demographics>,
}

/// All four reports for one filtered table.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub trips_analyzed: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

// ── Reports ───────────────────────────────────────────────────────────────────

/// Most common month, weekday and start hour.
pub fn time_stats(records: &[TripRecord]) -> TimeStats {
    TimeStats {
        month: mode(records.iter().map(|r| r.month)),
        weekday: mode(records.iter().map(|r| r.weekday)),
        start_hour: mode(records.iter().map(|r| r.start_time.hour())),
    }
}

/// The pair key used for the most-frequent-trip statistic. Different
/// station pairs that join to the same text share a key.
pub fn trip_key(record: &TripRecord) -> String {
    format!(
        "{}{}{}",
        record.start_station, PAIR_SEPARATOR, record.end_station
    )
}

/// Most common start station, end station and start/end combination.
pub fn station_stats(records: &[TripRecord]) -> StationStats {
    StationStats {
        start_station: mode(records.iter().map(|r| r.start_station.as_str())).map(owned),
        end_station: mode(records.iter().map(|r| r.end_station.as_str())).map(owned),
        trip: mode(records.iter().map(trip_key)),
    }
}

/// Sum and arithmetic mean of trip durations.
pub fn duration_stats(records: &[TripRecord]) -> DurationStats {
    let total: f64 = records.iter().map(|r| r.trip_duration).sum();
    let mean_seconds = if records.is_empty() {
        None
    } else {
        Some(truncate_seconds(total / records.len() as f64))
    };
    DurationStats {
        total_seconds: truncate_seconds(total),
        mean_seconds,
    }
}

/// User-type counts, plus gender and birth-year statistics when the table's
/// city provides them. Missing cells are skipped.
pub fn user_stats(table: &TripTable) -> UserStats {
    let records = &table.records;
    let user_types = value_counts(records.iter().filter_map(|r| r.user_type.as_deref()))
        .into_iter()
        .map(owned)
        .collect();

    let demographics = table.has_demographics.then(|| {
        let years = || records.iter().filter_map(|r| r.birth_year);
        Demographics {
            genders: value_counts(records.iter().filter_map(|r| r.gender.as_deref()))
                .into_iter()
                .map(owned)
                .collect(),
            earliest_birth_year: years().min(),
            latest_birth_year: years().max(),
            common_birth_year: mode(years()),
        }
    });

    UserStats {
        user_types,
        demographics,
    }
}

/// Run all four reports against `table`.
pub fn analyze(table: &TripTable) -> AnalysisResult {
    let records = &table.records;
    AnalysisResult {
        trips_analyzed: records.len(),
        time: timed(|| time_stats(records)),
        stations: timed(|| station_stats(records)),
        durations: timed(|| duration_stats(records)),
        users: timed(|| user_stats(table)),
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn owned(vc: ValueCount<&str>) -> ValueCount<String> {
    ValueCount {
        value: vc.value.to_string(),
        count: vc.count,
    }
}

fn truncate_seconds(value: f64) -> u64 {
    // `as` saturates: NaN and negatives become 0.
    value.trunc() as u64
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::formatting::{format_clock, format_total_duration};
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    fn trip(start: NaiveDateTime, duration: f64, from: &str, to: &str) -> TripRecord {
        TripRecord::new(start, duration, from, to)
    }

    fn rider(user_type: &str, gender: Option<&str>, year: Option<i32>) -> TripRecord {
        let mut rec = trip(ts(1, 2, 8), 60.0, "A", "B");
        rec.user_type = Some(user_type.to_string());
        rec.gender = gender.map(str::to_string);
        rec.birth_year = year;
        rec
    }

    // ── time_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_time_stats_modes() {
        // Jan 2 2017 Monday, Jan 3 Tuesday, Mar 6 Monday.
        let records = vec![
            trip(ts(1, 2, 8), 60.0, "A", "B"),
            trip(ts(1, 3, 17), 60.0, "A", "B"),
            trip(ts(3, 6, 17), 60.0, "A", "B"),
        ];
        let stats = time_stats(&records);
        assert_eq!(stats.month, Some(ValueCount { value: 1, count: 2 }));
        assert_eq!(stats.weekday.unwrap().value, Weekday::Mon);
        assert_eq!(stats.start_hour, Some(ValueCount { value: 17, count: 2 }));
    }

    #[test]
    fn test_time_stats_empty() {
        let stats = time_stats(&[]);
        assert!(stats.month.is_none());
        assert!(stats.weekday.is_none());
        assert!(stats.start_hour.is_none());
    }

    // ── station_stats ─────────────────────────────────────────────────────────

    #[test]
    fn test_station_pair_statistic() {
        let records = vec![
            trip(ts(1, 2, 8), 60.0, "A", "B"),
            trip(ts(1, 2, 9), 60.0, "A", "B"),
            trip(ts(1, 2, 10), 60.0, "C", "D"),
        ];
        let stats = station_stats(&records);
        let pair = stats.trip.unwrap();
        assert_eq!(pair.value, "A and B");
        assert_eq!(pair.count, 2);
        assert_eq!(stats.start_station.unwrap().value, "A");
        assert_eq!(stats.end_station.unwrap().value, "B");
    }

    #[test]
    fn test_station_pair_keys_collide_on_joined_text() {
        // "X and Y" + "Z" and "X" + "Y and Z" join to the same key.
        let records = vec![
            trip(ts(1, 2, 8), 60.0, "X and Y", "Z"),
            trip(ts(1, 2, 9), 60.0, "X", "Y and Z"),
            trip(ts(1, 2, 10), 60.0, "P", "Q"),
        ];
        let pair = station_stats(&records).trip.unwrap();
        assert_eq!(pair.value, "X and Y and Z");
        assert_eq!(pair.count, 2);
    }

    // ── duration_stats ────────────────────────────────────────────────────────

    #[test]
    fn test_duration_stats_example() {
        let records = vec![
            trip(ts(1, 2, 8), 3661.0, "A", "B"),
            trip(ts(1, 2, 9), 7323.0, "A", "B"),
        ];
        let stats = duration_stats(&records);
        assert_eq!(stats.total_seconds, 10_984);
        assert_eq!(stats.mean_seconds, Some(5_492));
        assert_eq!(
            format_total_duration(stats.total_seconds),
            "0 day 3 hour 3 minutes 4 seconds"
        );
        assert_eq!(format_clock(stats.mean_seconds.unwrap()), "01:31:32");
    }

    #[test]
    fn test_duration_stats_truncates_fractions() {
        let records = vec![
            trip(ts(1, 2, 8), 100.9, "A", "B"),
            trip(ts(1, 2, 9), 100.9, "A", "B"),
        ];
        let stats = duration_stats(&records);
        // sum 201.8 → 201, mean 100.9 → 100
        assert_eq!(stats.total_seconds, 201);
        assert_eq!(stats.mean_seconds, Some(100));
    }

    #[test]
    fn test_duration_stats_empty() {
        let stats = duration_stats(&[]);
        assert_eq!(stats.total_seconds, 0);
        assert!(stats.mean_seconds.is_none());
    }

    // ── user_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_user_stats_with_demographics() {
        let records = vec![
            rider("Subscriber", Some("Male"), Some(1985)),
            rider("Customer", None, None),
            rider("Subscriber", Some("Female"), Some(1990)),
            rider("Subscriber", Some("Male"), Some(1990)),
            rider("Subscriber", Some("Female"), Some(1962)),
        ];
        let table = TripTable::new("chicago", true, records);
        let stats = user_stats(&table);

        assert_eq!(
            stats.user_types,
            vec![
                ValueCount { value: "Subscriber".to_string(), count: 4 },
                ValueCount { value: "Customer".to_string(), count: 1 },
            ]
        );
        let demo = stats.demographics.unwrap();
        assert_eq!(demo.genders.len(), 2);
        assert_eq!(demo.genders[0].value, "Male");
        assert_eq!(demo.genders[0].count, 2);
        assert_eq!(demo.earliest_birth_year, Some(1962));
        assert_eq!(demo.latest_birth_year, Some(1990));
        assert_eq!(demo.common_birth_year.unwrap().value, 1990);
    }

    #[test]
    fn test_user_stats_without_demographics() {
        let records = vec![rider("Subscriber", None, None), rider("Customer", None, None)];
        let table = TripTable::new("washington", false, records);
        let stats = user_stats(&table);
        assert_eq!(stats.user_types.len(), 2);
        assert!(stats.demographics.is_none());
    }

    #[test]
    fn test_user_stats_demographics_on_empty_table() {
        let table = TripTable::new("chicago", true, Vec::new());
        let demo = user_stats(&table).demographics.unwrap();
        assert!(demo.genders.is_empty());
        assert!(demo.earliest_birth_year.is_none());
        assert!(demo.common_birth_year.is_none());
    }

    // ── analyze ───────────────────────────────────────────────────────────────

    #[test]
    fn test_analyze_runs_all_reports() {
        let records = vec![
            rider("Subscriber", Some("Male"), Some(1985)),
            rider("Customer", Some("Female"), Some(1999)),
        ];
        let table = TripTable::new("chicago", true, records);
        let result = analyze(&table);

        assert_eq!(result.trips_analyzed, 2);
        assert_eq!(result.time.stats.month.as_ref().unwrap().value, 1);
        assert_eq!(result.stations.stats.trip.as_ref().unwrap().value, "A and B");
        assert_eq!(result.durations.stats.total_seconds, 120);
        assert!(result.users.stats.demographics.is_some());
    }

    #[test]
    fn test_analyze_does_not_touch_table() {
        let table = TripTable::new("chicago", true, vec![rider("Subscriber", None, None)]);
        let before = table.clone();
        let _ = analyze(&table);
        assert_eq!(table, before);
    }
}
