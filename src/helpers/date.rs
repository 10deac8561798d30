//! Date helper functions

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Date-and-time layouts accepted in front-matter
const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts accepted in front-matter
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a front-matter date string.
///
/// Values carrying an offset (RFC 3339) keep their instant; naive values are
/// read as wall-clock time in `tz`, and a time skipped by a DST change moves
/// forward past the gap. Returns `None` for anything unrecognised.
pub fn parse_date(s: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&tz));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(localize(&dt, tz));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(localize(&dt, tz));
        }
    }

    None
}

fn localize(dt: &NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    tz.from_local_datetime(dt)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(*dt + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(dt))
}

/// Format date in full format (like "January 5, 2024")
pub fn full_date<T: TimeZone>(date: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}
