//! Item positions taken from request paths.
//!
//! An item's only identity is its zero-based offset in the store. Paths carry
//! that offset as text, and parsing is deliberately lenient: leading
//! whitespace and a sign are accepted, and anything after the leading digits
//! is ignored (`"2abc"` is position 2). A value with no leading digits does
//! not parse at all.

use std::fmt;

/// A parsed, possibly out-of-range, item position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(i64);

impl Position {
    /// Creates a position from a raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parses the leading integer of `raw`.
    ///
    /// Returns `None` when there are no digits after the optional sign, or
    /// when the value does not fit in an `i64`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.trim_start();
        let (negative, rest) = match rest.as_bytes().first() {
            Some(b'-') => (true, &rest[1..]),
            Some(b'+') => (false, &rest[1..]),
            _ => (false, rest),
        };

        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return None;
        }

        let magnitude: i64 = rest[..digits_len].parse().ok()?;
        Some(Self(if negative { -magnitude } else { magnitude }))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns the index into a sequence of `len` items, if in range.
    #[must_use]
    pub fn index(self, len: usize) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|&index| index < len)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        assert_eq!(Position::parse("0"), Some(Position::new(0)));
        assert_eq!(Position::parse("42"), Some(Position::new(42)));
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(Position::parse("-1"), Some(Position::new(-1)));
        assert_eq!(Position::parse("+3"), Some(Position::new(3)));
    }

    #[test]
    fn test_parse_leading_digits_only() {
        assert_eq!(Position::parse("2abc"), Some(Position::new(2)));
        assert_eq!(Position::parse("  7"), Some(Position::new(7)));
        assert_eq!(Position::parse("1.9"), Some(Position::new(1)));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(Position::parse(""), None);
        assert_eq!(Position::parse("abc"), None);
        assert_eq!(Position::parse("-"), None);
        assert_eq!(Position::parse("x1"), None);
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(Position::parse("99999999999999999999999"), None);
    }

    #[test]
    fn test_index_bounds() {
        assert_eq!(Position::new(0).index(3), Some(0));
        assert_eq!(Position::new(2).index(3), Some(2));
        assert_eq!(Position::new(3).index(3), None);
        assert_eq!(Position::new(-1).index(3), None);
        assert_eq!(Position::new(0).index(0), None);
    }
}
