//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `last_changed` and `fired_at`.
///
/// Serialized as RFC 3339 with full sub-second precision, so a value read back
/// from the wire compares equal to the one that was written.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Human-readable rendering used by the debug page (`HH:MM:SS DD-MM-YYYY`).
#[must_use]
pub fn display(ts: &Timestamp) -> String {
    ts.format("%H:%M:%S %d-%m-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_render_time_before_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(display(&ts), "07:05:01 09-03-2024");
    }

    #[test]
    fn should_roundtrip_sub_second_precision_through_json() {
        let ts = now();
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }
}
