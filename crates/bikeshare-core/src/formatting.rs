const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Render a whole number of seconds as
/// `"{days} day {hours} hour {minutes} minutes {seconds} seconds"`.
///
/// Every component is plain floor division of what is left over; there is no
/// rounding and no pluralisation.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_total_duration;
///
/// assert_eq!(format_total_duration(10_984), "0 day 3 hour 3 minutes 4 seconds");
/// assert_eq!(format_total_duration(90_061), "1 day 1 hour 1 minutes 1 seconds");
/// assert_eq!(format_total_duration(0), "0 day 0 hour 0 minutes 0 seconds");
/// ```
pub fn format_total_duration(total_seconds: u64) -> String {
    let days = total_seconds / SECONDS_PER_DAY;
    let rest = total_seconds % SECONDS_PER_DAY;
    let hours = rest / 3600;
    let rest = rest % 3600;
    let minutes = rest / 60;
    let seconds = rest % 60;
    format!(
        "{} day {} hour {} minutes {} seconds",
        days, hours, minutes, seconds
    )
}

/// Render seconds as a zero-padded 24-hour clock, `HH:MM:SS`.
///
/// Values of a day or more wrap: the hour field is taken modulo 24, so
/// `90_000` seconds (25 hours) renders as `"01:00:00"`.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_clock;
///
/// assert_eq!(format_clock(5_492), "01:31:32");
/// assert_eq!(format_clock(59), "00:00:59");
/// assert_eq!(format_clock(90_000), "01:00:00");
/// ```
pub fn format_clock(seconds: u64) -> String {
    let wrapped = seconds % SECONDS_PER_DAY;
    format!(
        "{:02}:{:02}:{:02}",
        wrapped / 3600,
        (wrapped % 3600) / 60,
        wrapped % 60
    )
}

/// Horizontal rule printed between report sections.
pub fn separator() -> String {
    "-".repeat(40)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
