//! Times of day as seconds past midnight.
//!
//! A service day may run past midnight into the early morning of the next
//! calendar date, so valid times go up to 29:59:59 (107 999 seconds).
//! [`INFINITE`] is larger than any time a trip or walk can produce and
//! marks a stop as unreachable.

use chrono::{NaiveTime, Timelike};

use super::TimetableError;

/// Arrival time of a stop that cannot be reached.
pub const INFINITE: i32 = 200_000;

/// Latest representable time of day (29:59:59).
pub const MAX_SECONDS: i32 = 107_999;

const MAX_HOURS: i32 = 30;

/// Seconds past midnight for the given hours, minutes and seconds.
///
/// # Examples
///
/// ```
/// use isochrone::domain::time;
///
/// assert_eq!(time::from_hms(6, 8, 0).unwrap(), 22_080);
/// assert_eq!(time::from_hms(29, 59, 59).unwrap(), time::MAX_SECONDS);
/// assert!(time::from_hms(30, 0, 0).is_err());
/// ```
pub fn from_hms(hours: i32, minutes: i32, seconds: i32) -> Result<i32, TimetableError> {
    if !(0..60).contains(&seconds) {
        return Err(TimetableError::InvalidTime(format!(
            "seconds {seconds} not in 0-59"
        )));
    }
    if !(0..60).contains(&minutes) {
        return Err(TimetableError::InvalidTime(format!(
            "minutes {minutes} not in 0-59"
        )));
    }
    if !(0..MAX_HOURS).contains(&hours) {
        return Err(TimetableError::InvalidTime(format!(
            "hours {hours} not in 0-29"
        )));
    }
    Ok(hours * 3600 + minutes * 60 + seconds)
}

/// Seconds past midnight of a chrono time of day.
pub fn from_naive_time(time: NaiveTime) -> i32 {
    (time.hour() * 3600 + time.minute() * 60 + time.second()) as i32
}

/// Hours component of `spm`.
pub fn hours(spm: i32) -> Result<i32, TimetableError> {
    check_range(spm)?;
    Ok(spm.div_euclid(3600))
}

/// Minutes component of `spm`.
pub fn minutes(spm: i32) -> Result<i32, TimetableError> {
    check_range(spm)?;
    Ok(spm.rem_euclid(3600).div_euclid(60))
}

/// Seconds component of `spm`.
pub fn seconds(spm: i32) -> Result<i32, TimetableError> {
    check_range(spm)?;
    Ok(spm.rem_euclid(60))
}

/// Format `spm` as `hh:mm:ss`.
///
/// ```
/// use isochrone::domain::time;
///
/// assert_eq!(time::format_hms(22_516).unwrap(), "06:15:16");
/// assert!(time::format_hms(time::INFINITE).is_err());
/// ```
pub fn format_hms(spm: i32) -> Result<String, TimetableError> {
    Ok(format!(
        "{:02}:{:02}:{:02}",
        hours(spm)?,
        minutes(spm)?,
        seconds(spm)?
    ))
}

/// Parse `hh:mm:ss` (or `h:mm:ss`) into seconds past midnight.
pub fn parse_hms(s: &str) -> Result<i32, TimetableError> {
    let malformed = || TimetableError::Parse(format!("time {s:?}"));

    let mut parts = s.split(':');
    let (Some(h), Some(m), Some(sec), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let field = |part: &str| -> Result<i32, TimetableError> {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        part.parse().map_err(|_| malformed())
    };

    from_hms(field(h)?, field(m)?, field(sec)?)
}

fn check_range(spm: i32) -> Result<(), TimetableError> {
    if !(0..=MAX_SECONDS).contains(&spm) {
        return Err(TimetableError::InvalidTime(format!(
            "{spm} not in 0-{MAX_SECONDS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hms_valid() {
        assert_eq!(from_hms(0, 0, 0).unwrap(), 0);
        assert_eq!(from_hms(6, 15, 16).unwrap(), 22_516);
        assert_eq!(from_hms(23, 59, 59).unwrap(), 86_399);
        assert_eq!(from_hms(24, 30, 0).unwrap(), 88_200);
    }

    #[test]
    fn from_hms_rejects_out_of_range() {
        assert!(from_hms(-1, 0, 0).is_err());
        assert!(from_hms(30, 0, 0).is_err());
        assert!(from_hms(0, 60, 0).is_err());
        assert!(from_hms(0, -1, 0).is_err());
        assert!(from_hms(0, 0, 60).is_err());
        assert!(from_hms(0, 0, -1).is_err());
    }

    #[test]
    fn components() {
        let spm = from_hms(25, 7, 9).unwrap();
        assert_eq!(hours(spm).unwrap(), 25);
        assert_eq!(minutes(spm).unwrap(), 7);
        assert_eq!(seconds(spm).unwrap(), 9);
        assert!(hours(-1).is_err());
        assert!(minutes(MAX_SECONDS + 1).is_err());
    }

    #[test]
    fn format() {
        assert_eq!(format_hms(0).unwrap(), "00:00:00");
        assert_eq!(format_hms(22_080).unwrap(), "06:08:00");
        assert_eq!(format_hms(MAX_SECONDS).unwrap(), "29:59:59");
        assert!(format_hms(INFINITE).is_err());
    }

    #[test]
    fn parse() {
        assert_eq!(parse_hms("06:08:00").unwrap(), 22_080);
        assert_eq!(parse_hms("6:08:00").unwrap(), 22_080);
        assert_eq!(parse_hms("29:59:59").unwrap(), MAX_SECONDS);
        assert!(parse_hms("30:00:00").is_err());
        assert!(parse_hms("06:08").is_err());
        assert!(parse_hms("06:08:00:00").is_err());
        assert!(parse_hms("06:+8:00").is_err());
        assert!(parse_hms("06::00").is_err());
    }

    #[test]
    fn naive_time() {
        let t = NaiveTime::from_hms_opt(6, 15, 16).unwrap();
        assert_eq!(from_naive_time(t), 22_516);
    }

    #[test]
    fn infinite_exceeds_any_arrival() {
        // Latest departure plus the longest trip.
        assert!(INFINITE > MAX_SECONDS + 9_999);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Formatting then parsing returns the same time
        #[test]
        fn format_parse_roundtrip(spm in 0..=MAX_SECONDS) {
            let text = format_hms(spm).unwrap();
            prop_assert_eq!(parse_hms(&text).unwrap(), spm);
        }

        /// Components rebuild the same time
        #[test]
        fn components_roundtrip(spm in 0..=MAX_SECONDS) {
            let rebuilt = from_hms(hours(spm).unwrap(), minutes(spm).unwrap(), seconds(spm).unwrap());
            prop_assert_eq!(rebuilt.unwrap(), spm);
        }
    }
}
