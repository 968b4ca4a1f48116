// SPDX-License-Identifier: Apache-2.0

// Base-10 i64 parser, same approach as core::num's radix parsing but
// panic-free and usable in const context.

/// Why a digit run could not become an `i64`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IntParseError {
    /// The input byte slice was empty.
    Empty,
    /// The input was only a sign character.
    SignOnly,
    /// A byte that is not a base-10 digit.
    InvalidDigit,
    /// The value does not fit in an `i64`.
    Overflow,
}

/// Parses an optionally `-`/`+` signed run of ASCII digits.
///
/// The value is accumulated on the side of its sign, so `i64::MIN` parses
/// without an intermediate overflow.
pub const fn from_ascii_i64(src: &[u8]) -> Result<i64, IntParseError> {
    let (is_negative, mut digits) = match src {
        [] => return Err(IntParseError::Empty),
        [b'+', rest @ ..] => (false, rest),
        [b'-', rest @ ..] => (true, rest),
        _ => (false, src),
    };

    if digits.is_empty() {
        return Err(IntParseError::SignOnly);
    }

    let mut result: i64 = 0;
    while let Some((&byte, rest)) = digits.split_first() {
        let digit = match byte {
            b'0'..=b'9' => (byte - b'0') as i64,
            _ => return Err(IntParseError::InvalidDigit),
        };

        result = match result.checked_mul(10) {
            Some(val) => val,
            None => return Err(IntParseError::Overflow),
        };
        let next = if is_negative {
            result.checked_sub(digit)
        } else {
            result.checked_add(digit)
        };
        result = match next {
            Some(val) => val,
            None => return Err(IntParseError::Overflow),
        };

        digits = rest;
    }

    Ok(result)
}
