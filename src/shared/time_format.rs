//! RFC 822 timestamps (`02 Jan 06 15:04 MST`) used by show schedules.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

const DATE_TIME_FORMAT: &str = "%d %b %y %H:%M";

lazy_static! {
    /// Splits `02 Jan 06 15:04 WIB` into the wall-clock part and the zone abbreviation
    static ref RFC822_REGEX: Regex =
        Regex::new(r"^(\d{2} [A-Za-z]{3} \d{2} \d{2}:\d{2}) ([A-Z]{3,5})$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {0:?} as RFC822 time")]
pub struct TimeParseError(pub String);

/// UTC offset in seconds for a zone abbreviation.
///
/// Unknown abbreviations are accepted and treated as UTC.
fn zone_offset_secs(abbreviation: &str) -> i32 {
    const HOUR: i32 = 3600;
    match abbreviation {
        "WIB" => 7 * HOUR,
        "WITA" => 8 * HOUR,
        "WIT" => 9 * HOUR,
        "EST" => -5 * HOUR,
        "EDT" => -4 * HOUR,
        "CST" => -6 * HOUR,
        "CDT" => -5 * HOUR,
        "MST" => -7 * HOUR,
        "MDT" => -6 * HOUR,
        "PST" => -8 * HOUR,
        "PDT" => -7 * HOUR,
        _ => 0,
    }
}

pub fn parse_rfc822(input: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let err = || TimeParseError(input.to_string());

    let captures = RFC822_REGEX.captures(input).ok_or_else(err)?;
    let naive = NaiveDateTime::parse_from_str(&captures[1], DATE_TIME_FORMAT).map_err(|_| err())?;

    let offset = FixedOffset::east_opt(zone_offset_secs(&captures[2])).ok_or_else(err)?;
    let local = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(err)?;

    Ok(local.with_timezone(&Utc))
}

pub fn format_rfc822(time: &DateTime<Utc>) -> String {
    format!("{} UTC", time.format(DATE_TIME_FORMAT))
}
