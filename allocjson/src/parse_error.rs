// SPDX-License-Identifier: Apache-2.0

use core::fmt;

/// Errors reported by the parser.
///
/// Only conditions a caller can meaningfully react to are reported here.
/// Malformed structure (a wrong opening character, a broken keyword, a
/// second decimal point, ...) is a contract violation and panics instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Input ended while a value, a closing `}`, `]` or `"`, or the
    /// character after a string escape was still required.
    UnexpectedEof,
    /// A byte slice handed to the parser was not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(err: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8(err)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => f.write_str("unexpected end of input"),
            ParseError::InvalidUtf8(e) => write!(f, "Invalid UTF-8: {e}"),
        }
    }
}

impl core::error::Error for ParseError {}

/// Aborts on a contract violation.
///
/// The message is logged at error level first so that targets with a
/// logger but no panic output still record why the parse stopped.
#[cold]
#[track_caller]
pub(crate) fn fault(args: fmt::Arguments<'_>) -> ! {
    log::error!("contract violation: {args}");
    panic!("contract violation: {args}");
}

/// `format!`-style front end for [`fault`].
macro_rules! fault {
    ($($arg:tt)*) => {
        $crate::parse_error::fault(format_args!($($arg)*))
    };
}
