use hotel_booking_bot::bot::identifier::{parse_identifier, ParsedIdentifier};

#[test]
fn test_numeric_id() {
    assert_eq!(
        parse_identifier("123456789"),
        ParsedIdentifier::NumericId("123456789".to_string())
    );
    assert_eq!(
        parse_identifier("  123456789  "),
        ParsedIdentifier::NumericId("123456789".to_string())
    );
    // normalized through an integer round-trip
    assert_eq!(
        parse_identifier("0001234"),
        ParsedIdentifier::NumericId("1234".to_string())
    );
}

#[test]
fn test_numeric_id_minimum_length() {
    assert_eq!(
        parse_identifier("1234"),
        ParsedIdentifier::NumericId("1234".to_string())
    );
    // three digits is too short to be a chat id
    assert_eq!(parse_identifier("123"), ParsedIdentifier::Unrecognized);
}

#[test]
fn test_at_handle() {
    assert_eq!(
        parse_identifier("@john_doe"),
        ParsedIdentifier::Handle("john_doe".to_string())
    );
    assert_eq!(
        parse_identifier("john_doe"),
        ParsedIdentifier::Handle("john_doe".to_string())
    );
    assert_eq!(
        parse_identifier("@John_Doe"),
        ParsedIdentifier::Handle("john_doe".to_string())
    );
}

#[test]
fn test_profile_links() {
    assert_eq!(
        parse_identifier("https://t.me/john_doe"),
        ParsedIdentifier::Handle("john_doe".to_string())
    );
    assert_eq!(
        parse_identifier("http://t.me/john_doe/"),
        ParsedIdentifier::Handle("john_doe".to_string())
    );
    assert_eq!(
        parse_identifier("t.me/@John_Doe"),
        ParsedIdentifier::Handle("john_doe".to_string())
    );
}

#[test]
fn test_unrecognized() {
    assert_eq!(parse_identifier("ab"), ParsedIdentifier::Unrecognized);
    assert_eq!(parse_identifier(""), ParsedIdentifier::Unrecognized);
    assert_eq!(parse_identifier("   "), ParsedIdentifier::Unrecognized);
    // handles must be at least five characters
    assert_eq!(parse_identifier("@abcd"), ParsedIdentifier::Unrecognized);
    // invalid handle characters
    assert_eq!(parse_identifier("@john-doe"), ParsedIdentifier::Unrecognized);
    assert_eq!(parse_identifier("t.me/ab"), ParsedIdentifier::Unrecognized);
}

#[test]
fn test_numeric_takes_priority_over_handle_shape() {
    // five digits could be a handle by shape, but digits parse as an id
    assert_eq!(
        parse_identifier("12345"),
        ParsedIdentifier::NumericId("12345".to_string())
    );
}
