use crate::prelude::{DecodeError, DecodeResult};
use chrono::{DateTime, Local, Utc};

/// A parsed reading timestamp: a display string for tables and popups plus
/// an absolute instant for sorting and time-bucketed aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTimestamp {
    pub display: String,
    pub instant: DateTime<Utc>,
}

/// Parses an ISO-8601 / RFC 3339 timestamp (`Z` or explicit offset) into a
/// normalized form.
///
/// With `to_local` false the display is `YYYY-MM-DD HH:MM UTC`; with it
/// true the caller's local zone is used and the zone suffix is whatever
/// the platform reports, so only the UTC form is stable across hosts.
pub fn normalize_timestamp(raw: &str, to_local: bool) -> DecodeResult<NormalizedTimestamp> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|err| DecodeError::InvalidTimestamp(format!("{raw}: {err}")))?;
    let instant = parsed.with_timezone(&Utc);

    let display = if to_local {
        parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M %Z")
            .to_string()
    } else {
        instant.format("%Y-%m-%d %H:%M UTC").to_string()
    };

    Ok(NormalizedTimestamp { display, instant })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn utc_display_matches_documented_format() {
        let normalized = normalize_timestamp("2025-06-07T00:00:00Z", false).unwrap();
        assert_eq!(normalized.display, "2025-06-07 00:00 UTC");
        assert_eq!(
            normalized.instant,
            Utc.with_ymd_and_hms(2025, 6, 7, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn explicit_offset_is_converted_to_utc_instant() {
        let normalized = normalize_timestamp("2025-06-07T02:30:00+02:30", false).unwrap();
        assert_eq!(normalized.display, "2025-06-07 00:00 UTC");
    }

    #[test]
    fn subsecond_timestamps_parse() {
        let normalized = normalize_timestamp("2025-06-07T12:34:56.789Z", false).unwrap();
        assert_eq!(normalized.display, "2025-06-07 12:34 UTC");
    }

    #[test]
    fn local_display_keeps_a_comparable_instant() {
        // Zone abbreviation is platform-dependent; assert on the instant only.
        let utc = normalize_timestamp("2025-06-07T00:00:00Z", false).unwrap();
        let local = normalize_timestamp("2025-06-07T00:00:00Z", true).unwrap();
        assert_eq!(utc.instant, local.instant);
    }

    #[test]
    fn garbage_input_is_an_invalid_timestamp() {
        let err = normalize_timestamp("not-a-timestamp", false).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTimestamp(_)));
    }
}
