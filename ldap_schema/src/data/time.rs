use std::convert::TryFrom;

use time::{
    format_description::well_known::Rfc3339, Date, Duration, Month, OffsetDateTime,
    PrimitiveDateTime, Time, UtcOffset,
};

use crate::error::InvalidGeneralizedTime;

/// An instant parsed from the LDAP GeneralizedTime syntax
/// (`YYYYMMDDHH[MM[SS]][.fraction](Z|+HH[MM]|-HH[MM])`).
///
/// Two values compare equal if they denote the same instant, regardless of
/// the time zone offset they were written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeneralizedTime(OffsetDateTime);

impl GeneralizedTime {
    pub fn parse(value: &str) -> Result<Self, InvalidGeneralizedTime> {
        parse_generalized_time(value).map(Self)
    }

    pub fn to_datetime(self) -> OffsetDateTime {
        self.0
    }

    /// RFC 3339 rendering in UTC.
    ///
    /// `None` if the instant falls outside the years 0 to 9999 in UTC.
    pub fn to_iso8601(self) -> Option<String> {
        if !in_rfc3339_range(self.0) {
            return None;
        }
        self.0.to_offset(UtcOffset::UTC).format(&Rfc3339).ok()
    }
}

impl std::fmt::Display for GeneralizedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_iso8601() {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}", self.0),
        }
    }
}

impl std::str::FromStr for GeneralizedTime {
    type Err = InvalidGeneralizedTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for GeneralizedTime {
    type Error = InvalidGeneralizedTime;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<OffsetDateTime> for GeneralizedTime {
    fn from(v: OffsetDateTime) -> Self {
        Self(v)
    }
}

impl From<GeneralizedTime> for OffsetDateTime {
    fn from(v: GeneralizedTime) -> Self {
        v.0
    }
}

impl serde::Serialize for GeneralizedTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let text = self
            .to_iso8601()
            .ok_or_else(|| serde::ser::Error::custom("time outside of the RFC 3339 range"))?;
        serializer.serialize_str(&text)
    }
}

// 0000-01-01T00:00:00Z and 9999-12-31T23:59:59Z
const MIN_UTC_TIMESTAMP: i64 = -62_167_219_200;
const MAX_UTC_TIMESTAMP: i64 = 253_402_300_799;

fn in_rfc3339_range(dt: OffsetDateTime) -> bool {
    (MIN_UTC_TIMESTAMP..=MAX_UTC_TIMESTAMP).contains(&dt.unix_timestamp())
}

fn digits(s: &str, start: usize, len: usize) -> Option<u32> {
    s.get(start..start + len)?.parse().ok()
}

/// Parse a GeneralizedTime value.
///
/// Minutes and seconds are optional, a fraction applies to the last unit
/// present. The time zone designator is required, and the instant must lie
/// within the years 0 to 9999 once shifted to UTC.
pub fn parse_generalized_time(value: &str) -> Result<OffsetDateTime, InvalidGeneralizedTime> {
    let s = value.trim();
    let err = |message: &str| InvalidGeneralizedTime::new(value, message);

    let digits_end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or_else(|| s.len());
    let head = &s[..digits_end];
    if !matches!(head.len(), 10 | 12 | 14) {
        return Err(err("expected YYYYMMDDHH[MM[SS]]"));
    }

    let year = digits(head, 0, 4).ok_or_else(|| err("invalid year"))?;
    let month = digits(head, 4, 2)
        .and_then(|m| Month::try_from(m as u8).ok())
        .ok_or_else(|| err("invalid month"))?;
    let day = digits(head, 6, 2).ok_or_else(|| err("invalid day"))?;
    let hour = digits(head, 8, 2).ok_or_else(|| err("invalid hour"))?;
    let minute = digits(head, 10, 2).unwrap_or(0);
    let second = digits(head, 12, 2).unwrap_or(0);

    let date = Date::from_calendar_date(year as i32, month, day as u8)
        .map_err(|e| err(&e.to_string()))?;
    let time = Time::from_hms(hour as u8, minute as u8, second as u8)
        .map_err(|e| err(&e.to_string()))?;

    let mut rest = &s[digits_end..];

    let mut fraction = Duration::ZERO;
    if let Some(tail) = rest.strip_prefix(|c: char| c == '.' || c == ',') {
        let end = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or_else(|| tail.len());
        if end == 0 {
            return Err(err("empty fraction"));
        }
        let value: f64 = format!("0.{}", &tail[..end])
            .parse()
            .map_err(|_| err("invalid fraction"))?;
        let unit = match head.len() {
            14 => 1.0,
            12 => 60.0,
            _ => 3600.0,
        };
        fraction = Duration::seconds_f64(value * unit);
        rest = &tail[end..];
    }

    let offset = match rest {
        "Z" | "z" => UtcOffset::UTC,
        tz if tz.starts_with('+') || tz.starts_with('-') => {
            let sign: i8 = if tz.starts_with('-') { -1 } else { 1 };
            let tz = &tz[1..];
            if !matches!(tz.len(), 2 | 4) || !tz.chars().all(|c| c.is_ascii_digit()) {
                return Err(err("invalid time zone offset"));
            }
            let hours = digits(tz, 0, 2).unwrap_or(0) as i8;
            let minutes = digits(tz, 2, 2).unwrap_or(0) as i8;
            UtcOffset::from_hms(sign * hours, sign * minutes, 0)
                .map_err(|e| err(&e.to_string()))?
        }
        "" => return Err(err("missing time zone")),
        _ => return Err(err("unexpected trailing characters")),
    };

    let dt = PrimitiveDateTime::new(date, time)
        .assume_offset(offset)
        .checked_add(fraction)
        .ok_or_else(|| err("time out of range"))?;
    if !in_rfc3339_range(dt) {
        return Err(err("time out of range in UTC"));
    }
    Ok(dt)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_parse_utc() {
        let t = parse_generalized_time("20230101120000Z").unwrap();
        assert_eq!(t, datetime!(2023-01-01 12:00:00 UTC));
    }

    #[test]
    fn test_parse_offset_is_same_instant() {
        let a = parse_generalized_time("20230101140000+0200").unwrap();
        let b = parse_generalized_time("20230101120000Z").unwrap();
        assert_eq!(a, b);

        let c = parse_generalized_time("2023010107-05").unwrap();
        assert_eq!(c, b);
    }

    #[test]
    fn test_parse_fraction() {
        let t = parse_generalized_time("20230101120000.5Z").unwrap();
        assert_eq!(t, datetime!(2023-01-01 12:00:00.5 UTC));

        // Fraction of an hour.
        let t = parse_generalized_time("2023010112.25Z").unwrap();
        assert_eq!(t, datetime!(2023-01-01 12:15:00 UTC));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_generalized_time("").is_err());
        assert!(parse_generalized_time("20230101120000").is_err());
        assert!(parse_generalized_time("20231301120000Z").is_err());
        assert!(parse_generalized_time("20230101120000+1").is_err());
        assert!(parse_generalized_time("yesterday").is_err());
    }

    #[test]
    fn test_display_iso8601() {
        let t = GeneralizedTime::parse("20230101140000+0200").unwrap();
        assert_eq!(t.to_string(), "2023-01-01T12:00:00Z");
    }

    #[test]
    fn test_parse_rejects_instants_outside_utc_range() {
        assert!(parse_generalized_time("99991231235959-0100").is_err());
        assert!(parse_generalized_time("00000101000000+0100").is_err());

        let t = GeneralizedTime::parse("99991231225959-0100").unwrap();
        assert_eq!(t.to_string(), "9999-12-31T23:59:59Z");
        let t = GeneralizedTime::parse("00000101010000+0100").unwrap();
        assert_eq!(t.to_string(), "0000-01-01T00:00:00Z");
    }

    #[test]
    fn test_display_out_of_range_does_not_fail() {
        let t = GeneralizedTime::from(datetime!(9999-12-31 23:30:00 -01:00));
        assert_eq!(t.to_iso8601(), None);
        assert!(!t.to_string().is_empty());
    }
}
