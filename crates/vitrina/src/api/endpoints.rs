//! Booking API paths, relative to the API base URL

pub const AUTH: &str = "/auth";
pub const BOOKING: &str = "/booking";
pub const PING: &str = "/ping";

/// Single booking
#[must_use]
pub fn booking(id: u64) -> String {
    format!("{BOOKING}/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(booking(42), "/booking/42");
        assert_eq!(AUTH, "/auth");
        assert_eq!(PING, "/ping");
    }
}
