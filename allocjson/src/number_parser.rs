// SPDX-License-Identifier: Apache-2.0

use core::str::FromStr;

use crate::input_cursor::InputCursor;
use crate::int_parser::{from_ascii_i64, IntParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Double,
}

/// The raw text of a recognized number.
#[derive(Debug, PartialEq)]
pub struct NumberSpan<'a> {
    pub raw: &'a str,
    pub kind: NumberKind,
}

/// A number converted to its value.
#[derive(Debug, PartialEq)]
pub enum ParsedNumber {
    Integer(i64),
    Double(f64),
}

/// Scans `-?[0-9]+(\.[0-9]*)?` at the cursor.
///
/// Returns `None` without moving the cursor when no number starts here,
/// so the caller can try the other productions. A `-` without a digit
/// and a second decimal point are contract violations.
pub fn scan_number<'a>(cursor: &mut InputCursor<'a>) -> Option<NumberSpan<'a>> {
    let start = cursor.current_pos();
    let negative = cursor.peek() == Some(b'-');
    if negative {
        cursor.advance();
    }

    let mut kind = NumberKind::Integer;
    let mut digits = 0usize;
    while let Some(byte) = cursor.peek() {
        if !byte.is_ascii_digit() {
            break;
        }
        cursor.advance();
        digits += 1;

        if cursor.peek() == Some(b'.') {
            if kind == NumberKind::Double {
                fault!(
                    "second decimal point in number at byte {}",
                    cursor.current_pos()
                );
            }
            kind = NumberKind::Double;
            cursor.advance();
        }
    }

    if digits == 0 {
        if negative {
            fault!("expected digit after '-' at byte {}", cursor.current_pos());
        }
        return None;
    }
    // "1.." leaves the loop on the second dot
    if kind == NumberKind::Double && cursor.peek() == Some(b'.') {
        fault!(
            "second decimal point in number at byte {}",
            cursor.current_pos()
        );
    }

    let raw = cursor.slice(start, cursor.current_pos());
    log::trace!("number {raw:?} ({kind:?}) at byte {start}");
    Some(NumberSpan { raw, kind })
}

impl NumberSpan<'_> {
    pub fn convert(&self) -> ParsedNumber {
        match self.kind {
            NumberKind::Integer => match from_ascii_i64(self.raw.as_bytes()) {
                Ok(value) => ParsedNumber::Integer(value),
                Err(IntParseError::Overflow) => self.integer_overflow(),
                Err(e) => fault!("malformed integer {:?}: {:?}", self.raw, e),
            },
            NumberKind::Double => ParsedNumber::Double(parse_double(self.raw)),
        }
    }

    #[cfg(feature = "int-overflow-double")]
    fn integer_overflow(&self) -> ParsedNumber {
        log::debug!("integer {:?} exceeds i64, storing as f64", self.raw);
        ParsedNumber::Double(parse_double(self.raw))
    }

    #[cfg(not(feature = "int-overflow-double"))]
    fn integer_overflow(&self) -> ParsedNumber {
        fault!("integer {:?} does not fit in i64", self.raw)
    }
}

fn parse_double(raw: &str) -> f64 {
    match f64::from_str(raw) {
        Ok(value) => value,
        Err(_) => fault!("malformed floating point number {:?}", raw),
    }
}
