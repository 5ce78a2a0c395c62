use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{BikeshareError, Result};

// ── Calendar names ────────────────────────────────────────────────────────────

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Months a user may filter by. The trip data covers January to June only.
pub const SELECTABLE_MONTHS: usize = 6;

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
    ("Sunday", Weekday::Sun),
];

/// English name of a 1-based month number, `"?"` outside 1..=12.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

/// Full, capitalised English weekday name (`"Monday"` … `"Sunday"`).
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize].0
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// One row of a city's bike-share trip data.
///
/// `month` and `weekday` are derived from `start_time` when the record is
/// built and never set independently.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    /// Raw `End Time` cell, kept only for raw-row display.
    pub end_time: Option<String>,
    /// Trip duration in seconds; may be fractional in some sources.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// Calendar month of `start_time`, 1–12.
    pub month: u32,
    /// Day of week of `start_time`.
    pub weekday: Weekday,
}

impl TripRecord {
    /// Build a record with the calendar fields derived from `start_time`.
    /// Optional columns start out empty.
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
        }
    }

    /// Full weekday name of the trip start, e.g. `"Tuesday"`.
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

// ── TripTable ─────────────────────────────────────────────────────────────────

/// The trips of one city, loaded fresh for each session iteration.
///
/// Filtering narrows `records` in place and keeps source order.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    /// Name of the city the rows came from.
    pub city: String,
    /// `false` when the city's source has no gender or birth-year data.
    pub has_demographics: bool,
    pub records: Vec<TripRecord>,
}

impl TripTable {
    pub fn new(city: impl Into<String>, has_demographics: bool, records: Vec<TripRecord>) -> Self {
        Self {
            city: city.into(),
            has_demographics,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows `[start, start + size)`, clipped to the table. A start past the
    /// end yields an empty slice.
    pub fn page(&self, start: usize, size: usize) -> &[TripRecord] {
        let len = self.records.len();
        let from = start.min(len);
        let to = start.saturating_add(size).min(len);
        &self.records[from..to]
    }
}

// ── City table ────────────────────────────────────────────────────────────────

/// One supported city and where its trips come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Lower-case name the user types at the city prompt.
    pub name: String,
    /// CSV file name, resolved against the data directory.
    pub file: PathBuf,
    /// Whether the source carries `Gender` and `Birth Year` columns.
    #[serde(default = "default_true")]
    pub has_demographics: bool,
}

fn default_true() -> bool {
    true
}

impl City {
    pub fn new(name: &str, file: &str, has_demographics: bool) -> Self {
        Self {
            name: name.to_string(),
            file: PathBuf::from(file),
            has_demographics,
        }
    }

    /// Location of this city's source file below `data_dir`.
    pub fn source_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.file)
    }
}

/// City name → data source mapping, injected into the loader and the
/// session so tests can point at fixture files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTable {
    cities: Vec<City>,
}

impl Default for CityTable {
    fn default() -> Self {
        Self {
            cities: vec![
                City::new("chicago", "chicago.csv", true),
                City::new("new york city", "new_york_city.csv", true),
                City::new("washington", "washington.csv", false),
            ],
        }
    }
}

impl CityTable {
    /// Build a table from explicit entries. Names are lower-cased; an empty
    /// table or a duplicate name is a configuration error.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(BikeshareError::Config("city table is empty".to_string()));
        }
        let mut normalised: Vec<City> = Vec::with_capacity(cities.len());
        for mut city in cities {
            city.name = city.name.trim().to_lowercase();
            if city.name.is_empty() {
                return Err(BikeshareError::Config("city name is empty".to_string()));
            }
            if normalised.iter().any(|c| c.name == city.name) {
                return Err(BikeshareError::Config(format!(
                    "duplicate city \"{}\"",
                    city.name
                )));
            }
            normalised.push(city);
        }
        Ok(Self { cities: normalised })
    }

    /// Load a table from a JSON array of `{ "name", "file", "has_demographics" }`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BikeshareError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cities: Vec<City> = serde_json::from_str(&content)?;
        Self::new(cities)
    }

    /// Case-insensitive lookup by city name.
    pub fn get(&self, name: &str) -> Option<&City> {
        let wanted = name.trim().to_lowercase();
        self.cities.iter().find(|c| c.name == wanted)
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(|c| c.name.as_str())
    }
}

// ── Selectors ─────────────────────────────────────────────────────────────────

/// Month selector: a single month between January and June, or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// 1-based month number, 1 (January) to 6 (June).
    Only(u32),
}

impl MonthFilter {
    /// Parse `"all"` or a month name from January to June, ignoring case.
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = input.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        MONTH_NAMES[..SELECTABLE_MONTHS]
            .iter()
            .position(|name| name.eq_ignore_ascii_case(wanted))
            .map(|i| Self::Only(i as u32 + 1))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(m) => f.write_str(month_name(*m)),
        }
    }
}

/// Weekday selector: one day of the week, or every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Parse `"all"` or a full weekday name, ignoring case. Abbreviations
    /// such as `"mon"` are rejected.
    pub fn parse(input: &str) -> Option<Self> {
        let wanted = input.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        WEEKDAYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, day)| Self::Only(*day))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

/// The month and day selectors chosen for one session iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filters {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            month: MonthFilter::All,
            day: DayFilter::All,
        }
    }
}
