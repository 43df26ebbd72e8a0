use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// Error types for timezone operations
#[derive(Debug, thiserror::Error)]
pub enum TimezoneError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),
}

/// Parse a timezone string
pub fn parse_timezone(tz_str: &str) -> Result<Tz, TimezoneError> {
    tz_str
        .trim()
        .parse()
        .map_err(|_| TimezoneError::InvalidTimezone(tz_str.to_string()))
}

/// Parse a time string in HH:MM format
pub fn parse_time_string(time_str: &str) -> Result<NaiveTime, TimezoneError> {
    NaiveTime::parse_from_str(time_str.trim(), "%H:%M")
        .map_err(|_| TimezoneError::InvalidTime(format!("Expected HH:MM format, got '{}'", time_str)))
}

/// Upper bound on how far a DST gap is searched
const MAX_GAP_MINUTES: u32 = 24 * 60;

/// Resolve a wall-clock date and time in a timezone to an instant.
///
/// Ambiguous times (DST fall-back) use the earliest instant. Times that do
/// not exist (DST spring-forward gap) resolve to the first valid minute
/// after the gap.
pub fn local_datetime(timezone: &Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let naive = date.and_time(time);
    let mut candidate = naive;

    // Walk forward minute by minute until the local time exists
    for _ in 0..=MAX_GAP_MINUTES {
        match timezone.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => candidate += TimeDelta::minutes(1),
        }
    }

    timezone.from_utc_datetime(&naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_time_string() {
        assert_eq!(
            parse_time_string("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert!(parse_time_string("23:59").is_ok());
        assert!(parse_time_string(" 08:30 ").is_ok());
        assert!(parse_time_string("24:00").is_err());
        assert!(parse_time_string("invalid").is_err());
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("UTC").is_ok());
        assert!(parse_timezone("Europe/Paris").is_ok());
        assert!(parse_timezone("Invalid/Timezone").is_err());
    }

    #[test]
    fn test_local_datetime_single() {
        let tz = parse_timezone("Europe/Paris").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let dt = local_datetime(&tz, date, time);
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.naive_utc().hour(), 8);
    }

    #[test]
    fn test_local_datetime_in_dst_gap() {
        // 02:30 does not exist on 2024-03-10 in New York; clocks jump to 03:00
        let tz = parse_timezone("America/New_York").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
        let dt = local_datetime(&tz, date, time);
        assert_eq!(dt, tz.with_ymd_and_hms(2024, 3, 10, 3, 0, 0).unwrap());
        assert_eq!(dt.date_naive(), date);
        assert_eq!(dt.naive_utc().hour(), 7);
    }

    #[test]
    fn test_local_datetime_in_dst_gap_east_of_utc() {
        let tz = parse_timezone("Europe/Paris").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
        let dt = local_datetime(&tz, date, time);
        assert_eq!((dt.hour(), dt.minute()), (3, 0));
        assert_eq!(dt.naive_utc().hour(), 1);
    }

    #[test]
    fn test_local_datetime_ambiguous_takes_earliest() {
        // 01:30 happens twice on 2024-11-03 in New York (EDT, then EST)
        let tz = parse_timezone("America/New_York").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let time = NaiveTime::from_hms_opt(1, 30, 0).unwrap();
        let dt = local_datetime(&tz, date, time);
        assert_eq!(dt.hour(), 1);
        assert_eq!(dt.naive_utc(), date.and_hms_opt(5, 30, 0).unwrap());
    }
}
