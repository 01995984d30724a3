//! Structural checks for booking API bodies.
//!
//! Objects are closed: a key outside the schema fails like a missing one.
//! Errors carry a JSON path such as `$.booking.bookingdates.checkin`.

use crate::result::{VitrinaError, VitrinaResult};
use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

const BOOKING_KEYS: [&str; 6] = [
    "firstname",
    "lastname",
    "totalprice",
    "depositpaid",
    "bookingdates",
    "additionalneeds",
];
const DATE_KEYS: [&str; 2] = ["checkin", "checkout"];

fn fail<T>(path: &str, rule: &str) -> VitrinaResult<T> {
    Err(VitrinaError::schema(format!("{path} {rule}")))
}

fn object<'a>(
    value: &'a Value,
    path: &str,
    allowed: &[&str],
) -> VitrinaResult<&'a Map<String, Value>> {
    let Some(map) = value.as_object() else {
        return fail(path, "must be an object");
    };
    if let Some(extra) = map.keys().find(|k| !allowed.contains(&k.as_str())) {
        return fail(&format!("{path}.{extra}"), "is not allowed");
    }
    Ok(map)
}

fn required<'a>(map: &'a Map<String, Value>, path: &str, key: &str) -> VitrinaResult<&'a Value> {
    map.get(key)
        .ok_or_else(|| VitrinaError::schema(format!("{path}.{key} is required")))
}

fn string(value: &Value, path: &str) -> VitrinaResult<()> {
    match value.as_str() {
        Some(s) if !s.is_empty() => Ok(()),
        Some(_) => fail(path, "is not allowed to be empty"),
        None => fail(path, "must be a string"),
    }
}

fn positive_integer(value: &Value, path: &str) -> VitrinaResult<()> {
    match value.as_u64() {
        Some(n) if n > 0 => Ok(()),
        _ => fail(path, "must be a positive integer"),
    }
}

/// ISO 8601 calendar date or full timestamp
fn iso_date(value: &Value, path: &str) -> VitrinaResult<()> {
    let Some(text) = value.as_str() else {
        return fail(path, "must be a valid ISO 8601 date");
    };
    let valid = NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(text).is_ok();
    if valid {
        Ok(())
    } else {
        fail(path, "must be a valid ISO 8601 date")
    }
}

fn array<'a>(body: &'a Value, path: &str) -> VitrinaResult<&'a Vec<Value>> {
    body.as_array()
        .ok_or_else(|| VitrinaError::schema(format!("{path} must be an array")))
}

/// `[]`
pub fn validate_empty_id_list(body: &Value) -> VitrinaResult<()> {
    let items = array(body, "$")?;
    if !items.is_empty() {
        return fail("$", &format!("must contain 0 items, has {}", items.len()));
    }
    Ok(())
}

/// At least one `{ "bookingid": <positive integer> }`
pub fn validate_id_list(body: &Value) -> VitrinaResult<()> {
    let items = array(body, "$")?;
    if items.is_empty() {
        return fail("$", "must contain at least 1 item");
    }
    for (i, item) in items.iter().enumerate() {
        let path = format!("$[{i}]");
        let map = object(item, &path, &["bookingid"])?;
        let id = required(map, &path, "bookingid")?;
        positive_integer(id, &format!("{path}.bookingid"))?;
    }
    Ok(())
}

fn booking_at(body: &Value, path: &str) -> VitrinaResult<()> {
    let map = object(body, path, &BOOKING_KEYS)?;
    for key in ["firstname", "lastname"] {
        string(required(map, path, key)?, &format!("{path}.{key}"))?;
    }

    let price_path = format!("{path}.totalprice");
    match required(map, path, "totalprice")?.as_f64() {
        Some(price) if price >= 0.0 => {}
        Some(_) => return fail(&price_path, "must be greater than or equal to 0"),
        None => return fail(&price_path, "must be a number"),
    }

    if !required(map, path, "depositpaid")?.is_boolean() {
        return fail(&format!("{path}.depositpaid"), "must be a boolean");
    }

    let dates_path = format!("{path}.bookingdates");
    let dates = object(required(map, path, "bookingdates")?, &dates_path, &DATE_KEYS)?;
    for key in DATE_KEYS {
        iso_date(required(dates, &dates_path, key)?, &format!("{dates_path}.{key}"))?;
    }

    if let Some(needs) = map.get("additionalneeds") {
        if !needs.is_string() {
            return fail(&format!("{path}.additionalneeds"), "must be a string");
        }
    }
    Ok(())
}

/// A single booking, as returned by `GET`/`PUT /booking/{id}`
pub fn validate_booking(body: &Value) -> VitrinaResult<()> {
    booking_at(body, "$")
}

/// `{ "bookingid": <positive integer>, "booking": <booking> }`
pub fn validate_created_booking(body: &Value) -> VitrinaResult<()> {
    let map = object(body, "$", &["bookingid", "booking"])?;
    positive_integer(required(map, "$", "bookingid")?, "$.bookingid")?;
    booking_at(required(map, "$", "booking")?, "$.booking")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::api::payloads::new_booking;
    use proptest::prelude::*;
    use serde_json::json;

    fn booking() -> Value {
        serde_json::to_value(new_booking()).unwrap()
    }

    fn message(result: VitrinaResult<()>) -> String {
        result.unwrap_err().to_string()
    }

    mod list_tests {
        use super::*;

        #[test]
        fn test_empty_list() {
            assert!(validate_empty_id_list(&json!([])).is_ok());
            assert_eq!(
                message(validate_empty_id_list(&json!([{"bookingid": 1}]))),
                "Schema validation failed: $ must contain 0 items, has 1"
            );
        }

        #[test]
        fn test_id_list() {
            assert!(validate_id_list(&json!([{"bookingid": 1}, {"bookingid": 99}])).is_ok());
            assert!(validate_id_list(&json!([])).is_err());
            assert_eq!(
                message(validate_id_list(&json!([{"bookingid": 1}, {"bookingid": 0}]))),
                "Schema validation failed: $[1].bookingid must be a positive integer"
            );
            assert_eq!(
                message(validate_id_list(&json!([{"id": 1}]))),
                "Schema validation failed: $[0].id is not allowed"
            );
            assert!(validate_id_list(&json!({"bookingid": 1})).is_err());
        }
    }

    mod booking_tests {
        use super::*;

        #[test]
        fn test_valid_booking_and_created_wrapper() {
            assert!(validate_booking(&booking()).is_ok());
            let created = json!({"bookingid": 12, "booking": booking()});
            assert!(validate_created_booking(&created).is_ok());
        }

        #[test]
        fn test_additional_needs_is_optional_and_may_be_empty() {
            let mut body = booking();
            body["additionalneeds"] = json!("");
            assert!(validate_booking(&body).is_ok());
            body.as_object_mut().unwrap().remove("additionalneeds");
            assert!(validate_booking(&body).is_ok());
        }

        #[test]
        fn test_field_violations_name_the_path() {
            let mut body = booking();
            body["totalprice"] = json!(-1);
            assert_eq!(
                message(validate_booking(&body)),
                "Schema validation failed: $.totalprice must be greater than or equal to 0"
            );

            let mut body = booking();
            body["bookingdates"]["checkout"] = json!("next tuesday");
            let created = json!({"bookingid": 3, "booking": body});
            assert_eq!(
                message(validate_created_booking(&created)),
                "Schema validation failed: $.booking.bookingdates.checkout must be a valid ISO 8601 date"
            );

            let mut body = booking();
            body.as_object_mut().unwrap().remove("depositpaid");
            assert_eq!(
                message(validate_booking(&body)),
                "Schema validation failed: $.depositpaid is required"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_any_positive_ids_pass(ids in prop::collection::vec(1u64..1_000_000, 1..50)) {
            let body = Value::Array(ids.iter().map(|id| json!({"bookingid": id})).collect());
            prop_assert!(validate_id_list(&body).is_ok());
        }

        #[test]
        fn prop_non_negative_prices_pass(price in 0.0f64..100_000.0) {
            let mut body = booking();
            body["totalprice"] = json!(price);
            prop_assert!(validate_booking(&body).is_ok());
        }
    }
}
