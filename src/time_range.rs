use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    #[error("'{0}' is not a time range like 9:00-10:30")]
    Malformed(String),
    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u32),
    #[error("minute {0} is out of range (0-59)")]
    MinuteOutOfRange(u32),
    #[error("range {start}-{end} is not within one day")]
    OutOfBounds { start: u32, end: u32 },
}

/// A start/end pair in minutes since midnight.
///
/// `end` is always strictly after `start`; a range whose end clock time is not
/// after its start clock time runs past midnight and `end` carries the extra
/// 1440 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: u32,
    end: u32,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: u32,
    end: u32,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = TimeRangeError;

    /// Stored offsets must already be normalized: start within the day, end
    /// after start and at most one day later.
    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        let RawTimeRange { start, end } = raw;
        if start >= MINUTES_PER_DAY || end <= start || end - start > MINUTES_PER_DAY {
            return Err(TimeRangeError::OutOfBounds { start, end });
        }
        Ok(Self { start, end })
    }
}

impl TimeRange {
    /// Parse `H:MM-H:MM` (one or two hour digits, whitespace allowed around the
    /// hyphen).
    pub fn parse(text: &str) -> Result<Self, TimeRangeError> {
        let trimmed = text.trim();
        let malformed = || TimeRangeError::Malformed(trimmed.to_string());

        let (left, right) = trimmed.split_once('-').ok_or_else(malformed)?;
        let (start_hour, start_minute) = parse_clock(left.trim_end()).ok_or_else(malformed)?;
        let (end_hour, end_minute) = parse_clock(right.trim_start()).ok_or_else(malformed)?;

        for hour in [start_hour, end_hour] {
            if hour > 23 {
                return Err(TimeRangeError::HourOutOfRange(hour));
            }
        }
        for minute in [start_minute, end_minute] {
            if minute > 59 {
                return Err(TimeRangeError::MinuteOutOfRange(minute));
            }
        }

        Ok(Self::from_minutes(
            start_hour * 60 + start_minute,
            end_hour * 60 + end_minute,
        ))
    }

    /// Build a range from clock offsets, wrapping `end` past midnight when it
    /// does not come after `start`.
    pub(crate) fn from_minutes(start: u32, end: u32) -> Self {
        let end = if end <= start {
            end + MINUTES_PER_DAY
        } else {
            end
        };
        Self { start, end }
    }

    pub fn start_minutes(&self) -> u32 {
        self.start
    }

    pub fn end_minutes(&self) -> u32 {
        self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }

    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes()) / 60.0
    }

    pub fn start_hour(&self) -> u32 {
        self.start / 60
    }

    pub fn start_minute(&self) -> u32 {
        self.start % 60
    }

    /// Number of grid hours touched, counting a partial hour as a whole one.
    pub fn hours_spanned(&self) -> u32 {
        self.duration_minutes().div_ceil(60)
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end > MINUTES_PER_DAY
    }
}

impl FromStr for TimeRange {
    type Err = TimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.end % MINUTES_PER_DAY;
        write!(
            f,
            "{}:{:02}-{}:{:02}",
            self.start / 60,
            self.start % 60,
            end / 60,
            end % 60
        )
    }
}

/// `H:MM` or `HH:MM` with ASCII digits only. Range checks are left to the caller.
fn parse_clock(token: &str) -> Option<(u32, u32)> {
    let (hours, minutes) = token.split_once(':')?;
    let digits_ok = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits_ok(hours, 1, 2) || !digits_ok(minutes, 2, 2) {
        return None;
    }
    Some((hours.parse().ok()?, minutes.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_digit_hour() {
        let range = TimeRange::parse("9:00-10:30").unwrap();
        assert_eq!(range.start_minutes(), 540);
        assert_eq!(range.end_minutes(), 630);
        assert_eq!(range.duration_minutes(), 90);
    }

    #[test]
    fn overnight_range_wraps() {
        let range = TimeRange::parse("22:00-02:00").unwrap();
        assert_eq!(range.start_minutes(), 1320);
        assert_eq!(range.end_minutes(), 1560);
        assert_eq!(range.duration_minutes(), 240);
        assert!(range.crosses_midnight());
    }

    #[test]
    fn equal_endpoints_span_a_full_day() {
        let range = TimeRange::parse("8:00-8:00").unwrap();
        assert_eq!(range.duration_minutes(), MINUTES_PER_DAY);
    }

    #[test]
    fn whitespace_around_hyphen_is_allowed() {
        let range = TimeRange::parse("  13:15 -  14:00 ").unwrap();
        assert_eq!(range.start_minutes(), 795);
        assert_eq!(range.duration_minutes(), 45);
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(
            TimeRange::parse("25:00-10:00"),
            Err(TimeRangeError::HourOutOfRange(25))
        );
        assert_eq!(
            TimeRange::parse("9:00-9:60"),
            Err(TimeRangeError::MinuteOutOfRange(60))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for text in ["", "9-10", "9:0-10:00", "9:00 10:00", "123:00-1:00", "9:00-10:00pm", "9 :00-10:00"] {
            assert!(
                matches!(TimeRange::parse(text), Err(TimeRangeError::Malformed(_))),
                "expected '{text}' to be malformed"
            );
        }
    }

    #[test]
    fn display_uses_clock_times() {
        let range: TimeRange = "22:05-01:30".parse().unwrap();
        assert_eq!(range.to_string(), "22:05-1:30");
    }

    #[test]
    fn deserialize_checks_offsets() {
        let range: TimeRange = serde_json::from_str(r#"{"start":1320,"end":1560}"#).unwrap();
        assert_eq!(range, TimeRange::parse("22:00-02:00").unwrap());

        for json in [
            r#"{"start":600,"end":0}"#,
            r#"{"start":600,"end":600}"#,
            r#"{"start":5000,"end":5001}"#,
            r#"{"start":0,"end":1441}"#,
        ] {
            assert!(serde_json::from_str::<TimeRange>(json).is_err(), "{json} accepted");
        }
    }

    #[test]
    fn hours_spanned_rounds_up() {
        assert_eq!(TimeRange::parse("9:00-10:00").unwrap().hours_spanned(), 1);
        assert_eq!(TimeRange::parse("9:00-10:01").unwrap().hours_spanned(), 2);
    }
}
