//! CSV loading for one city's trip records.
//!
//! Reads the city's source file through the [`csv`] crate, maps each row to a
//! [`TripRecord`] with its calendar fields derived, and returns the whole
//! table. Any unreadable or malformed input fails the load as a whole.

use std::path::Path;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, TripRecord, TripTable};
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

// ── Row schema ────────────────────────────────────────────────────────────────

/// One CSV row as it appears in the source file. Columns not named here
/// (the unnamed index column, for instance) are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every trip of `city` from its source file under `data_dir`.
pub fn load_city(city: &City, data_dir: &Path) -> Result<TripTable> {
    let path = city.source_path(data_dir);
    let file = std::fs::File::open(&path).map_err(|source| BikeshareError::FileRead {
        path: path.clone(),
        source,
    })?;

    let records = read_trips(file, city.has_demographics).map_err(|err| match err {
        LoadError::Csv(source) => BikeshareError::Csv {
            path: path.clone(),
            source,
        },
        LoadError::Timestamp { row, value } => BikeshareError::TimestampParse { row, value },
    })?;

    debug!(
        "Loaded {} trips for {} from {}",
        records.len(),
        city.name,
        path.display()
    );

    Ok(TripTable::new(city.name.clone(), city.has_demographics, records))
}

/// Parse a `Start Time` cell. Accepts `YYYY-MM-DD HH:MM:SS`, optionally with
/// fractional seconds or a `T` separator.
pub fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    const FMTS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    let s = s.trim();
    FMTS.iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

enum LoadError {
    Csv(csv::Error),
    Timestamp { row: usize, value: String },
}

fn read_trips<R: std::io::Read>(
    source: R,
    has_demographics: bool,
) -> std::result::Result<Vec<TripRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<RawTrip>().enumerate() {
        let raw = result.map_err(LoadError::Csv)?;
        let start_time = parse_start_time(&raw.start_time).ok_or_else(|| LoadError::Timestamp {
            row,
            value: raw.start_time.clone(),
        })?;

        let mut record = TripRecord::new(
            start_time,
            raw.trip_duration,
            raw.start_station,
            raw.end_station,
        );
        record.end_time = non_empty(raw.end_time);
        record.user_type = non_empty(raw.user_type);
        if has_demographics {
            record.gender = non_empty(raw.gender);
            record.birth_year = raw
                .birth_year
                .filter(|y| y.is_finite())
                .map(|y| y.trunc() as i32);
        }
        records.push(record);
    }
    Ok(records)
}

/// Blank cells count as missing values.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Weekday};
    use tempfile::TempDir;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    fn write_city(dir: &TempDir, file: &str, content: &str) {
        std::fs::write(dir.path().join(file), content).unwrap();
    }

    #[test]
    fn test_parse_start_time_formats() {
        let ts = parse_start_time("2017-01-01 00:07:57").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2017, 1, 1));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (0, 7, 57));

        assert!(parse_start_time("2017-01-01T00:07:57").is_some());
        assert!(parse_start_time("2017-01-01 00:07:57.250").is_some());
        assert!(parse_start_time("01/01/2017 00:07").is_none());
        assert!(parse_start_time("").is_none());
    }

    #[test]
    fn test_load_city_with_demographics() {
        let dir = TempDir::new().unwrap();
        write_city(&dir, "chicago.csv", CHICAGO);
        let city = City::new("chicago", "chicago.csv", true);

        let table = load_city(&city, dir.path()).unwrap();
        assert_eq!(table.city, "chicago");
        assert!(table.has_demographics);
        assert_eq!(table.len(), 3);

        let first = &table.records[0];
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.end_station, "Damen Ave & Chicago Ave");
        assert_eq!(first.trip_duration, 321.0);
        assert_eq!(first.month, 6);
        // 2017-06-23 was a Friday.
        assert_eq!(first.weekday, Weekday::Fri);
        assert_eq!(first.end_time.as_deref(), Some("2017-06-23 15:14:53"));
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));

        let third = &table.records[2];
        assert_eq!(third.user_type.as_deref(), Some("Customer"));
        assert!(third.gender.is_none());
        assert!(third.birth_year.is_none());
    }

    #[test]
    fn test_load_city_without_demographics() {
        let dir = TempDir::new().unwrap();
        write_city(&dir, "washington.csv", WASHINGTON);
        let city = City::new("washington", "washington.csv", false);

        let table = load_city(&city, dir.path()).unwrap();
        assert!(!table.has_demographics);
        assert_eq!(table.len(), 2);
        assert!((table.records[0].trip_duration - 489.066).abs() < 1e-9);
        assert!(table.records.iter().all(|r| r.gender.is_none()));
        assert!(table.records.iter().all(|r| r.birth_year.is_none()));
    }

    #[test]
    fn test_demographics_ignored_when_city_lacks_them() {
        let dir = TempDir::new().unwrap();
        write_city(&dir, "chicago.csv", CHICAGO);
        let city = City::new("chicago", "chicago.csv", false);

        let table = load_city(&city, dir.path()).unwrap();
        assert!(table.records.iter().all(|r| r.gender.is_none()));
    }

    #[test]
    fn test_load_city_preserves_source_order() {
        let dir = TempDir::new().unwrap();
        write_city(&dir, "chicago.csv", CHICAGO);
        let city = City::new("chicago", "chicago.csv", true);

        let table = load_city(&city, dir.path()).unwrap();
        let months: Vec<u32> = table.records.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![6, 5, 1]);
    }

    #[test]
    fn test_missing_file_is_file_read_error() {
        let dir = TempDir::new().unwrap();
        let city = City::new("chicago", "chicago.csv", true);

        let err = load_city(&city, dir.path()).unwrap_err();
        assert!(matches!(err, BikeshareError::FileRead { .. }));
        assert!(err.is_data_source());
    }

    #[test]
    fn test_missing_required_column_is_csv_error() {
        let dir = TempDir::new().unwrap();
        write_city(
            &dir,
            "chicago.csv",
            "Start Time,Trip Duration,Start Station\n2017-01-01 00:00:00,60,A\n",
        );
        let city = City::new("chicago", "chicago.csv", true);

        let err = load_city(&city, dir.path()).unwrap_err();
        assert!(matches!(err, BikeshareError::Csv { .. }));
    }

    #[test]
    fn test_non_numeric_duration_is_csv_error() {
        let dir = TempDir::new().unwrap();
        write_city(
            &dir,
            "chicago.csv",
            "Start Time,Trip Duration,Start Station,End Station,User Type\n\
             2017-01-01 00:00:00,long,A,B,Subscriber\n",
        );
        let city = City::new("chicago", "chicago.csv", true);

        let err = load_city(&city, dir.path()).unwrap_err();
        assert!(matches!(err, BikeshareError::Csv { .. }));
    }

    #[test]
    fn test_bad_timestamp_reports_row() {
        let dir = TempDir::new().unwrap();
        write_city(
            &dir,
            "chicago.csv",
            "Start Time,Trip Duration,Start Station,End Station,User Type\n\
             2017-01-01 00:00:00,60,A,B,Subscriber\n\
             not a time,60,A,B,Subscriber\n",
        );
        let city = City::new("chicago", "chicago.csv", true);

        let err = load_city(&city, dir.path()).unwrap_err();
        match err {
            BikeshareError::TimestampParse { row, value } => {
                assert_eq!(row, 1);
                assert_eq!(value, "not a time");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_file_loads_empty_table() {
        let dir = TempDir::new().unwrap();
        write_city(
            &dir,
            "chicago.csv",
            "Start Time,Trip Duration,Start Station,End Station,User Type\n",
        );
        let city = City::new("chicago", "chicago.csv", true);

        let table = load_city(&city, dir.path()).unwrap();
        assert!(table.is_empty());
    }
}
