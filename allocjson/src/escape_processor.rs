// SPDX-License-Identifier: Apache-2.0

/// Decoding of the simple JSON string escapes.
///
/// `\uXXXX` is not decoded; the parser copies such sequences
/// into the string verbatim.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Maps the character following a backslash to the byte it stands for.
    ///
    /// # Returns
    /// The unescaped byte, or `None` if `escape_char` is not a simple escape
    /// (this includes `u`).
    pub fn process_simple_escape(escape_char: u8) -> Option<u8> {
        match escape_char {
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'r' => Some(b'\r'),
            b'\\' => Some(b'\\'),
            b'"' => Some(b'"'),
            b'/' => Some(b'/'),
            b'b' => Some(0x08), // Backspace
            b'f' => Some(0x0C), // Form feed
            _ => None,
        }
    }

    pub fn is_unicode_escape(escape_char: u8) -> bool {
        escape_char == b'u'
    }
}
