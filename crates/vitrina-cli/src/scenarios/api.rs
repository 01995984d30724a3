//! Booking API scenarios
//!
//! Each scenario returns its violations; transport failures and unexpected
//! bodies propagate as errors and are recorded by the runner.

use std::time::Duration;
use vitrina::api::payloads::{new_booking, update_booking, Booking, CreatedBooking};
use vitrina::api::schema;
use vitrina::{BookingClient, TimedResponse, VitrinaResult};

/// Dates no fixture booking reaches
const FUTURE_CHECKIN: &str = "2099-01-01";
const FUTURE_CHECKOUT: &str = "2099-12-31";

fn status_check(response: &TimedResponse, expected: u16) -> Option<String> {
    (response.status != expected).then(|| {
        format!(
            "Expected status {expected}, got {}: {}",
            response.status, response.text
        )
    })
}

fn timing_check(response: &TimedResponse, max: Duration) -> Option<String> {
    (!response.within(max)).then(|| {
        format!(
            "Response took {}ms, limit {}ms",
            response.duration.as_millis(),
            max.as_millis()
        )
    })
}

/// Status, JSON content type and response time
pub fn json_checks(response: &TimedResponse, expected: u16, max: Duration) -> Vec<String> {
    let mut errors: Vec<String> = status_check(response, expected).into_iter().collect();
    if !response.is_json() {
        errors.push(format!(
            "Expected JSON content type, got {}",
            response.content_type().unwrap_or("none")
        ));
    }
    errors.extend(timing_check(response, max));
    errors
}

/// The body is a booking equal to `expected`
pub fn booking_matches(response: &TimedResponse, expected: &Booking, what: &str) -> Vec<String> {
    let actual = schema::validate_booking(&response.body).and_then(|()| response.json::<Booking>());
    match actual {
        Err(e) => vec![format!("{what}: {e}")],
        Ok(actual) if actual != *expected => vec![format!(
            "{what}: expected {} {} at {}, got {} {} at {}",
            expected.firstname,
            expected.lastname,
            expected.totalprice,
            actual.firstname,
            actual.lastname,
            actual.totalprice
        )],
        Ok(_) => Vec::new(),
    }
}

fn schema_errors(result: VitrinaResult<()>) -> Vec<String> {
    result.err().map(|e| e.to_string()).into_iter().collect()
}

/// `GET /ping` answers 201
pub async fn health(client: &BookingClient) -> VitrinaResult<Vec<String>> {
    client.health_check().await?;
    Ok(Vec::new())
}

/// `GET /booking`: 200, JSON, a non-empty list of positive ids, in time
pub async fn list_bookings(client: &BookingClient, max: Duration) -> VitrinaResult<Vec<String>> {
    let response = client.get_all().await?;
    let mut errors = json_checks(&response, 200, max);
    if response.status == 200 {
        errors.extend(schema_errors(schema::validate_id_list(&response.body)));
    }
    Ok(errors)
}

/// A date window in the far future matches nothing
pub async fn search_future_dates(
    client: &BookingClient,
    max: Duration,
) -> VitrinaResult<Vec<String>> {
    let response = client.get_by_dates(FUTURE_CHECKIN, FUTURE_CHECKOUT).await?;
    let mut errors = json_checks(&response, 200, max);
    if response.status == 200 {
        errors.extend(schema_errors(schema::validate_empty_id_list(&response.body)));
    }
    Ok(errors)
}

/// The new booking id, or the violations that stop the scenario early
async fn create(
    client: &BookingClient,
    booking: &Booking,
    max: Duration,
) -> VitrinaResult<Result<u64, Vec<String>>> {
    let response = client.create(booking).await?;
    let mut errors = json_checks(&response, 200, max);
    errors.extend(schema_errors(schema::validate_created_booking(&response.body)));
    if !errors.is_empty() {
        return Ok(Err(errors));
    }
    let CreatedBooking { bookingid, booking: echoed } = response.json()?;
    if echoed != *booking {
        return Ok(Err(vec![format!(
            "Created booking {bookingid} does not echo the request"
        )]));
    }
    Ok(Ok(bookingid))
}

async fn expect_gone(client: &BookingClient, id: u64) -> VitrinaResult<Vec<String>> {
    let response = client.get_by_id(id).await?;
    Ok(status_check(&response, 404)
        .map(|e| format!("Deleted booking {id}: {e}"))
        .into_iter()
        .collect())
}

/// Create, read, update with basic auth, update with a token, delete, then
/// confirm the booking is gone
pub async fn round_trip(client: &BookingClient, max: Duration) -> VitrinaResult<Vec<String>> {
    let booking = new_booking();
    let id = match create(client, &booking, max).await? {
        Ok(id) => id,
        Err(errors) => return Ok(errors),
    };
    tracing::info!(id, "booking created");

    let read = client.get_by_id(id).await?;
    let mut errors = json_checks(&read, 200, max);
    errors.extend(booking_matches(&read, &booking, "Read"));

    let updated = update_booking();
    let response = client.update_with_basic_auth(id, &updated).await?;
    errors.extend(json_checks(&response, 200, max));
    errors.extend(booking_matches(&response, &updated, "Basic-auth update"));

    let token_update = Booking {
        totalprice: updated.totalprice * 2.0,
        ..updated
    };
    let response = client.update_with_token(id, &token_update).await?;
    errors.extend(json_checks(&response, 200, max));
    errors.extend(booking_matches(&response, &token_update, "Token update"));

    let deleted = client.delete_with_basic_auth(id).await?;
    errors.extend(status_check(&deleted, 201));
    errors.extend(timing_check(&deleted, max));
    errors.extend(expect_gone(client, id).await?);
    Ok(errors)
}

/// Create, then delete with a cookie token
pub async fn token_delete(client: &BookingClient, max: Duration) -> VitrinaResult<Vec<String>> {
    let id = match create(client, &new_booking(), max).await? {
        Ok(id) => id,
        Err(errors) => return Ok(errors),
    };
    let deleted = client.delete_with_token(id).await?;
    let mut errors: Vec<String> = status_check(&deleted, 201).into_iter().collect();
    errors.extend(timing_check(&deleted, max));
    errors.extend(expect_gone(client, id).await?);
    Ok(errors)
}
