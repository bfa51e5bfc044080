//! Field-level validation for raw form and CSV values.
//!
//! Every raw string is parsed exactly once here; the engine and the store
//! only ever see typed values.

use crate::constants::{BYTE_ORDER_MARK, ERR_BOOKING_FIELDS, ERR_ROOM_FIELDS, ERR_USER_FIELDS};
use crate::error::{AppError, Result};
use crate::models::{BookingFields, NewRoom, NewUser};

/// Strip byte-order marks and surrounding whitespace from a raw cell
pub fn clean_field(raw: &str) -> String {
    raw.replace(BYTE_ORDER_MARK, "").trim().to_string()
}

/// Validate and normalize the user form
///
/// The email is lowercased so uniqueness in the store is case-insensitive.
pub fn validate_user(name: &str, email: &str, phone: Option<&str>) -> Result<NewUser> {
    let name = clean_field(name);
    let email = clean_field(email).to_lowercase();
    let phone = phone.map(clean_field).filter(|p| !p.is_empty());

    if name.is_empty() || email.is_empty() || !email.contains('@') {
        tracing::warn!("Rejected user form (name empty: {}, email: {:?})", name.is_empty(), email);
        return Err(AppError::Validation(ERR_USER_FIELDS.to_string()));
    }

    Ok(NewUser { name, email, phone })
}

/// Validate the room form: non-empty name, positive capacity, non-negative price
pub fn validate_room(name: &str, capacity_text: &str, price_text: &str) -> Result<NewRoom> {
    let name = clean_field(name);
    let capacity = parse_positive_int(capacity_text);
    let price = parse_non_negative_decimal(price_text);

    match (name.is_empty(), capacity, price) {
        (false, Some(capacity), Some(price)) => Ok(NewRoom {
            name,
            capacity,
            price,
        }),
        _ => {
            tracing::warn!(
                "Rejected room form (name: {:?}, capacity: {:?}, price: {:?})",
                name,
                capacity_text,
                price_text
            );
            Err(AppError::Validation(ERR_ROOM_FIELDS.to_string()))
        }
    }
}

/// Validate the booking form's free-text fields
///
/// The check-in date is kept as opaque text; only emptiness is rejected.
pub fn validate_booking_fields(checkin_text: &str, nights_text: &str) -> Result<BookingFields> {
    let checkin_date = clean_field(checkin_text);
    let nights = parse_positive_int(nights_text);

    match nights {
        Some(nights) if !checkin_date.is_empty() => Ok(BookingFields {
            checkin_date,
            nights,
        }),
        _ => {
            tracing::warn!(
                "Rejected booking form (checkin: {:?}, nights: {:?})",
                checkin_text,
                nights_text
            );
            Err(AppError::Validation(ERR_BOOKING_FIELDS.to_string()))
        }
    }
}

/// Parse an optional booking total
///
/// Blank or non-numeric input yields `None`, which tells the engine to derive
/// the total from the room price.
pub fn parse_total(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_non_negative_decimal)
}

/// Parse a whole-number literal made only of ASCII digits and greater than zero
pub fn parse_positive_int(raw: &str) -> Option<i64> {
    let cleaned = clean_field(raw);
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<i64>().ok().filter(|n| *n > 0)
}

/// Parse an unsigned integer or fixed-point literal (`12`, `12.5`, `.5`, `12.`)
///
/// Signs, exponents and anything other than digits plus at most one dot are
/// rejected.
pub fn parse_non_negative_decimal(raw: &str) -> Option<f64> {
    let cleaned = clean_field(raw);
    let mut dots = 0;
    let mut digits = 0;
    for c in cleaned.chars() {
        match c {
            '.' => dots += 1,
            c if c.is_ascii_digit() => digits += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Parse a reference id (user or room) from a raw cell
pub fn parse_id(raw: &str) -> Option<i64> {
    let cleaned = clean_field(raw);
    let digits = cleaned.strip_prefix('-').unwrap_or(&cleaned);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_field_strips_bom_and_whitespace() {
        assert_eq!(clean_field("\u{feff}  Alice \t"), "Alice");
        assert_eq!(clean_field("   "), "");
    }

    #[test]
    fn test_validate_user_normalizes_email() {
        let user = validate_user(" Alice ", " Alice@Example.COM ", Some(" 555-0101 ")).unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.phone.as_deref(), Some("555-0101"));
    }

    #[test]
    fn test_validate_user_blank_phone_is_none() {
        let user = validate_user("Bob", "bob@example.com", Some("  ")).unwrap();
        assert!(user.phone.is_none());

        let user = validate_user("Bob", "bob@example.com", None).unwrap();
        assert!(user.phone.is_none());
    }

    #[test]
    fn test_validate_user_rejects_bad_input() {
        assert!(matches!(
            validate_user("", "a@b.c", None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_user("Alice", "", None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_user("Alice", "alice.example.com", None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_user("\u{feff}", "a@b.c", None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_room() {
        let room = validate_room("Lake View", "2", "100").unwrap();
        assert_eq!(room.name, "Lake View");
        assert_eq!(room.capacity, 2);
        assert_eq!(room.price, 100.0);

        let room = validate_room("Attic", " 1 ", "49.5").unwrap();
        assert_eq!(room.price, 49.5);
    }

    #[test]
    fn test_validate_room_rejects_bad_numbers() {
        for (cap, price) in [
            ("0", "10"),
            ("-1", "10"),
            ("2.5", "10"),
            ("two", "10"),
            ("", "10"),
            ("2", "-10"),
            ("2", "1e3"),
            ("2", "1.2.3"),
            ("2", "."),
            ("2", ""),
            ("2", "+5"),
        ] {
            assert!(
                validate_room("Room", cap, price).is_err(),
                "capacity {cap:?} price {price:?} should be rejected"
            );
        }
        assert!(validate_room("  ", "2", "10").is_err());
    }

    #[test]
    fn test_validate_booking_fields() {
        let fields = validate_booking_fields(" 2024-06-01 ", "3").unwrap();
        assert_eq!(fields.checkin_date, "2024-06-01");
        assert_eq!(fields.nights, 3);

        // Date text is opaque: no calendar validation
        assert!(validate_booking_fields("next tuesday", "1").is_ok());

        assert!(validate_booking_fields("", "1").is_err());
        assert!(validate_booking_fields("2024-06-01", "0").is_err());
        assert!(validate_booking_fields("2024-06-01", "1.5").is_err());
        assert!(validate_booking_fields("2024-06-01", "").is_err());
    }

    #[test]
    fn test_parse_total() {
        assert_eq!(parse_total(Some("150")), Some(150.0));
        assert_eq!(parse_total(Some(" 99.90 ")), Some(99.9));
        assert_eq!(parse_total(Some("unparseable")), None);
        assert_eq!(parse_total(Some("")), None);
        assert_eq!(parse_total(Some("-5")), None);
        assert_eq!(parse_total(None), None);
    }

    #[test]
    fn test_decimal_edge_forms() {
        assert_eq!(parse_non_negative_decimal(".5"), Some(0.5));
        assert_eq!(parse_non_negative_decimal("5."), Some(5.0));
        assert_eq!(parse_non_negative_decimal("0"), Some(0.0));
        assert_eq!(parse_non_negative_decimal("NaN"), None);
        assert_eq!(parse_non_negative_decimal("inf"), None);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id("-3"), Some(-3));
        assert_eq!(parse_id("1.0"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-"), None);
    }
}
