//! Time related utils.

use std::time::Duration;

use chrono::TimeDelta;
use chrono::Utc;

use crate::Error;
use crate::Result;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into http date: `Sun, 06 Nov 1994 08:49:37 GMT`
///
/// ## Note
///
/// HTTP date is slightly different from RFC2822.
///
/// - Timezone is fixed to GMT.
/// - Day must be 2 digit.
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse http date like `Sun, 06 Nov 1994 08:49:37 GMT` into datetime.
pub fn parse_http_date(s: &str) -> Result<DateTime> {
    chrono::NaiveDateTime::parse_from_str(s, "%a, %d %b %Y %H:%M:%S GMT")
        .map(|v| v.and_utc())
        .map_err(|e| Error::unexpected(format!("invalid http date: {s}")).with_source(e))
}

/// Compute the absolute expiry of a signature in unix epoch seconds.
///
/// Sub-second precision is truncated.
pub fn expires_at(t: DateTime, ttl: Duration) -> Result<i64> {
    let delta = TimeDelta::from_std(ttl)
        .map_err(|e| Error::request_invalid(format!("invalid expiration: {ttl:?}")).with_source(e))?;
    let expires = t
        .checked_add_signed(delta)
        .ok_or_else(|| Error::request_invalid(format!("expiration out of range: {ttl:?}")))?;

    Ok(expires.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(test_time()), "Mon, 01 Jan 2024 00:00:00 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let t = parse_http_date("Mon, 01 Jan 2024 00:00:00 GMT").unwrap();
        assert_eq!(t, test_time());
        assert!(parse_http_date("2024-01-01T00:00:00Z").is_err());
    }

    #[test]
    fn test_expires_at() {
        let t = test_time() + TimeDelta::milliseconds(999);
        assert_eq!(expires_at(t, Duration::from_secs(60)).unwrap(), 1704067260);
        assert_eq!(expires_at(t, Duration::ZERO).unwrap(), 1704067200);
        assert!(expires_at(t, Duration::from_secs(u64::MAX)).is_err());
    }
}
