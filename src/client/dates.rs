//! Calendar-day normalization for dates coming back from the API.
//!
//! The store keeps `entry_date` as a plain date. Some drivers and proxies
//! hand it back as a UTC timestamp instead, which must be read in the
//! user's local zone to land on the day that was entered.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The calendar day `raw` denotes as seen from `tz`.
pub fn normalize_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(tz).date_naive());
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

pub fn normalize(raw: &str) -> Option<NaiveDate> {
    normalize_in(raw, &Local)
}

/// `normalize` rendered back as `YYYY-MM-DD`; unparseable input is kept as is.
pub fn display(raw: &str) -> String {
    normalize(raw)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, NaiveTime, SecondsFormat, Utc};

    /// The instant `date` starts in `tz`, as a server storing UTC would send it.
    fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
        tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn calendar_day_in<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
        instant.with_timezone(tz).date_naive()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn zones() -> Vec<FixedOffset> {
        vec![
            FixedOffset::east_opt(0).unwrap(),
            FixedOffset::east_opt(5 * 3600 + 1800).unwrap(),
            FixedOffset::east_opt(14 * 3600).unwrap(),
            FixedOffset::west_opt(8 * 3600).unwrap(),
            FixedOffset::west_opt(11 * 3600).unwrap(),
        ]
    }

    #[test]
    fn plain_dates_are_taken_verbatim() {
        for tz in zones() {
            assert_eq!(normalize_in("2024-03-05", &tz), Some(ymd(2024, 3, 5)));
        }
    }

    #[test]
    fn utc_timestamps_shift_to_local_day() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        // Local midnight of 6 March in India, as a UTC timestamp.
        assert_eq!(
            normalize_in("2024-03-05T18:30:00.000Z", &ist),
            Some(ymd(2024, 3, 6))
        );

        let pst = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(
            normalize_in("2024-03-05T02:00:00Z", &pst),
            Some(ymd(2024, 3, 4))
        );
    }

    #[test]
    fn naive_timestamps_keep_their_date() {
        let tz = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(normalize_in("2024-03-05 00:00:00", &tz), Some(ymd(2024, 3, 5)));
        assert_eq!(normalize_in("garbage", &tz), None);
        assert_eq!(normalize_in("", &tz), None);
    }

    #[test]
    fn round_trip_through_local_zone_keeps_the_day() {
        let mut date = ymd(2023, 12, 25);
        let end = ymd(2024, 3, 10);

        while date <= end {
            for tz in zones() {
                let instant = start_of_day(date, &tz).unwrap();
                assert_eq!(calendar_day_in(instant, &tz), date, "{date} in {tz}");

                // Same path as a server that serializes the date as a UTC timestamp.
                let wire = instant.to_rfc3339_opts(SecondsFormat::Millis, true);
                assert_eq!(normalize_in(&wire, &tz), Some(date), "{wire} in {tz}");
            }
            date += Duration::days(1);
        }
    }

    #[test]
    fn display_falls_back_to_raw_text() {
        assert_eq!(display("2024-01-09"), "2024-01-09");
        assert_eq!(display("n/a"), "n/a");
    }
}
