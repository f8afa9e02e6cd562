//! Shared utility functions for glucose crates.

/// Epoch-millisecond and calendar helpers.
///
/// Everything here takes an explicit `chrono::TimeZone` so callers decide
/// what "local" means; nothing reads the host clock.
pub mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

    pub const MS_PER_MINUTE: i64 = 60 * 1000;
    pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
    pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Epoch milliseconds as a zoned date time, or None when out of range.
    pub fn to_datetime<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_millis_opt(ms).single()
    }

    /// Hour of day (0-23) of `ms` in `tz`.
    pub fn local_hour<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<u32> {
        to_datetime(ms, tz).map(|dt| dt.hour())
    }

    /// Calendar date of `ms` in `tz`.
    pub fn local_date<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<NaiveDate> {
        to_datetime(ms, tz).map(|dt| dt.date_naive())
    }

    /// Epoch milliseconds of a wall-clock time in `tz`.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earliest instant.
    /// Skipped times (DST spring-forward) are treated as UTC wall time
    /// shifted by the zone's offset at noon that day.
    pub fn local_to_millis<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> i64 {
        if let Some(dt) = tz.from_local_datetime(naive).earliest() {
            return dt.timestamp_millis();
        }
        let noon = naive.date().and_time(NaiveTime::MIN) + chrono::Duration::hours(12);
        let offset_ms = tz
            .from_local_datetime(&noon)
            .earliest()
            .map(|dt| dt.naive_local().and_utc().timestamp_millis() - dt.timestamp_millis())
            .unwrap_or(0);
        naive.and_utc().timestamp_millis() - offset_ms
    }

    /// First millisecond of `date` in `tz`.
    pub fn start_of_day_ms<Tz: TimeZone>(date: &NaiveDate, tz: &Tz) -> i64 {
        local_to_millis(&date.and_time(NaiveTime::MIN), tz)
    }

    /// Last millisecond of `date` in `tz` (23:59:59.999).
    pub fn end_of_day_ms<Tz: TimeZone>(date: &NaiveDate, tz: &Tz) -> i64 {
        match date.succ_opt() {
            Some(next) => start_of_day_ms(&next, tz) - 1,
            None => start_of_day_ms(date, tz).saturating_add(MS_PER_DAY - 1),
        }
    }

    /// Inclusive `[end - days, end]` window in epoch milliseconds.
    pub fn trailing_window(end_ms: i64, days: i64) -> (i64, i64) {
        (end_ms.saturating_sub(days.saturating_mul(MS_PER_DAY)), end_ms)
    }

}
