use crate::error::Error;

/// Parses a textual numeric literal and range-checks it.
///
/// Accepts a leading `-` and the `0x`/`0o`/`0b` radix prefixes.
pub fn parse_literal(s: &str, min: i64, max: i64) -> Result<i64, Error> {
    let (neg, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (radix, digits) = match body.get(..2) {
        Some("0x") | Some("0X") => (16, &body[2..]),
        Some("0o") | Some("0O") => (8, &body[2..]),
        Some("0b") | Some("0B") => (2, &body[2..]),
        _ => (10, body),
    };
    let value =
        i64::from_str_radix(digits, radix).map_err(|_| Error::BadLiteral(s.to_string()))?;
    let value = if neg { -value } else { value };
    check_range(value, min, max)
}

/// Range-checks a value that is already a number, such as a looked-up
/// symbol address. Never parses text.
pub fn check_range(value: i64, min: i64, max: i64) -> Result<i64, Error> {
    if value < min || max < value {
        return Err(Error::OutOfRange { value, min, max });
    }
    Ok(value)
}

/// A label operand is a bare identifier: not a register, not a number.
pub fn is_label(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ----------------------------------------------------------------------------

#[test]
fn test_parse_literal() {
    assert_eq!(parse_literal("5", 0, 0xFFFF).unwrap(), 5);
    assert_eq!(parse_literal("0x86A0", 0, 0xFFFF).unwrap(), 0x86A0);
    assert_eq!(parse_literal("0b101", 0, 31).unwrap(), 5);
    assert_eq!(parse_literal("0o17", 0, 31).unwrap(), 15);
    assert_eq!(
        parse_literal("-1", i32::MIN as i64, u32::MAX as i64).unwrap(),
        -1
    );
    assert_eq!(parse_literal("-0x10", -100, 100).unwrap(), -16);
    assert!(matches!(
        parse_literal("32", 0, 31),
        Err(Error::OutOfRange { value: 32, .. })
    ));
    assert!(matches!(
        parse_literal("$t0", 0, 31),
        Err(Error::BadLiteral(_))
    ));
    assert!(matches!(parse_literal("", 0, 31), Err(Error::BadLiteral(_))));
    assert!(matches!(
        parse_literal("0x", 0, 31),
        Err(Error::BadLiteral(_))
    ));
}

#[test]
fn test_check_range() {
    assert_eq!(check_range(0xFFFF, 0, 0xFFFF).unwrap(), 0xFFFF);
    assert!(check_range(0x10000, 0, 0xFFFF).is_err());
    assert!(check_range(-1, 0, 0xFFFF).is_err());
}

#[test]
fn test_is_label() {
    assert!(is_label("main"));
    assert!(is_label("_start"));
    assert!(is_label("loop2"));
    assert!(!is_label("$t0"));
    assert!(!is_label("123"));
    assert!(!is_label("2loop"));
    assert!(!is_label(""));
}
