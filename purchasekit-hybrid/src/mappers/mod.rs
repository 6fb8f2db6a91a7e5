//! Result mappers: pure projections of domain objects into key-value maps.
//!
//! Mapped shapes are a public contract with host frameworks: every field of
//! the source object has a fixed key, and absent optionals are emitted as
//! JSON `null`, never as a missing key. Date fields are emitted twice, as an
//! ISO-8601 UTC string under the plain key and as epoch milliseconds under
//! the `…Millis` key.

mod enums;
mod error;
mod offerings;
mod purchaser_info;

pub use enums::{
    billing_feature_from_index, billing_features_from_indices, proration_mode_from_index,
};
pub use error::{map_error, map_purchase_failure, ErrorContainer};
pub use offerings::{map_offering, map_offerings, map_package, map_store_product};
pub use purchaser_info::{map_purchaser_info, map_transaction};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// A mapped result: string keys with deterministic ordering.
pub type ResponseMap = serde_json::Map<String, Value>;

pub(crate) fn iso8601(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Insert `key` and `keyMillis` for an optional date, `null` when absent.
pub(crate) fn put_date(map: &mut ResponseMap, key: &str, date: Option<&DateTime<Utc>>) {
    let (text, millis) = match date {
        Some(d) => (Value::String(iso8601(d)), Value::from(d.timestamp_millis())),
        None => (Value::Null, Value::Null),
    };
    map.insert(key.to_string(), text);
    map.insert(format!("{key}Millis"), millis);
}

pub(crate) fn opt_string(value: Option<&str>) -> Value {
    match value {
        Some(s) => Value::String(s.to_string()),
        None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_are_emitted_as_iso8601_and_millis() {
        let date = Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap();
        let mut map = ResponseMap::new();
        put_date(&mut map, "requestDate", Some(&date));

        assert_eq!(
            map.get("requestDate").unwrap().as_str().unwrap(),
            "2026-06-01T10:00:00.000Z"
        );
        assert_eq!(
            map.get("requestDateMillis").unwrap().as_i64().unwrap(),
            date.timestamp_millis()
        );
    }

    #[test]
    fn absent_dates_become_null_not_missing() {
        let mut map = ResponseMap::new();
        put_date(&mut map, "expirationDate", None);

        assert!(map.contains_key("expirationDate"));
        assert!(map.contains_key("expirationDateMillis"));
        assert!(map.get("expirationDate").unwrap().is_null());
    }
}
