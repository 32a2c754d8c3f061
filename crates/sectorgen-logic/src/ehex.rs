//! Extended hex ("eHex") digits: `0-9` then `A-Z`, covering 0–35.
//!
//! UWP fields routinely exceed 15 (law levels, tech levels), so plain hex is
//! not enough. Letters are upper-case only; `a` is not a digit.

use std::cmp::Ordering;

use thiserror::Error;

/// The 36 digits in value order.
pub const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest value a single digit can hold.
pub const MAX_VALUE: u8 = 35;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EhexError {
    #[error("'{0}' is not an eHex digit")]
    InvalidDigit(char),
    #[error("{0} is outside the eHex range 0-35")]
    OutOfRange(i32),
}

/// Decode one digit.
pub fn to_value(digit: char) -> Result<u8, EhexError> {
    match digit {
        '0'..='9' => Ok(digit as u8 - b'0'),
        'A'..='Z' => Ok(digit as u8 - b'A' + 10),
        _ => Err(EhexError::InvalidDigit(digit)),
    }
}

/// Encode one value.
pub fn to_digit(value: i32) -> Result<char, EhexError> {
    if (0..=MAX_VALUE as i32).contains(&value) {
        Ok(DIGITS[value as usize] as char)
    } else {
        Err(EhexError::OutOfRange(value))
    }
}

pub fn is_valid(digit: char) -> bool {
    to_value(digit).is_ok()
}

/// Order two digits by the value they encode.
pub fn compare(a: char, b: char) -> Result<Ordering, EhexError> {
    Ok(to_value(a)?.cmp(&to_value(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_digits() {
        assert_eq!(to_value('0'), Ok(0));
        assert_eq!(to_value('9'), Ok(9));
        assert_eq!(to_digit(7), Ok('7'));
    }

    #[test]
    fn test_letters_continue_past_f() {
        assert_eq!(to_value('A'), Ok(10));
        assert_eq!(to_value('F'), Ok(15));
        assert_eq!(to_value('G'), Ok(16));
        assert_eq!(to_value('Z'), Ok(35));
        assert_eq!(to_digit(33), Ok('X'));
    }

    #[test]
    fn test_bijection_over_full_range() {
        for v in 0..=35 {
            let d = to_digit(v).unwrap();
            assert_eq!(to_value(d).unwrap() as i32, v);
        }
        for &b in DIGITS.iter() {
            let d = b as char;
            assert_eq!(to_digit(to_value(d).unwrap() as i32).unwrap(), d);
        }
    }

    #[test]
    fn test_invalid_digits_rejected() {
        assert_eq!(to_value('a'), Err(EhexError::InvalidDigit('a')));
        assert_eq!(to_value('-'), Err(EhexError::InvalidDigit('-')));
        assert_eq!(to_value(' '), Err(EhexError::InvalidDigit(' ')));
        assert!(!is_valid('z'));
        assert!(is_valid('Q'));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(to_digit(36), Err(EhexError::OutOfRange(36)));
        assert_eq!(to_digit(-1), Err(EhexError::OutOfRange(-1)));
    }

    #[test]
    fn test_compare_uses_value_not_ascii() {
        assert_eq!(compare('9', 'A'), Ok(Ordering::Less));
        assert_eq!(compare('C', 'C'), Ok(Ordering::Equal));
        assert_eq!(compare('Z', '0'), Ok(Ordering::Greater));
        assert!(compare('9', '?').is_err());
    }
}
