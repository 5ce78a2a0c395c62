//! Month and weekday filtering of a loaded trip table.
//!
//! Both selectors are independent row predicates, so applying them in
//! either order yields the same rows. `All` is a no-op.

use bikeshare_core::models::{DayFilter, Filters, MonthFilter, TripRecord, TripTable};
use tracing::debug;

/// `true` when `record` starts in the selected month (or any month for `All`).
pub fn month_matches(month: MonthFilter, record: &TripRecord) -> bool {
    match month {
        MonthFilter::All => true,
        MonthFilter::Only(m) => record.month == m,
    }
}

/// `true` when `record` starts on the selected weekday (or any day for `All`).
pub fn day_matches(day: DayFilter, record: &TripRecord) -> bool {
    match day {
        DayFilter::All => true,
        DayFilter::Only(d) => record.weekday == d,
    }
}

/// Keep only the rows starting in `month`, preserving order.
pub fn filter_by_month(mut table: TripTable, month: MonthFilter) -> TripTable {
    table.records.retain(|r| month_matches(month, r));
    table
}

/// Keep only the rows starting on `day`, preserving order.
pub fn filter_by_day(mut table: TripTable, day: DayFilter) -> TripTable {
    table.records.retain(|r| day_matches(day, r));
    table
}

/// Narrow `table` to the rows matching both selectors.
pub fn apply_filters(table: TripTable, filters: &Filters) -> TripTable {
    let before = table.len();
    let table = filter_by_day(filter_by_month(table, filters.month), filters.day);
    debug!(
        "Filter month={} day={} kept {} of {} trips",
        filters.month,
        filters.day,
        table.len(),
        before
    );
    table
}
