// SPDX-License-Identifier: Apache-2.0

/// Read position over the input text.
///
/// Input ends at the end of the slice or at the first NUL byte, whichever
/// comes first, so NUL-terminated buffers can be passed whole.
#[derive(Debug)]
pub struct InputCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> InputCursor<'a> {
    pub fn new(input: &'a str) -> Self {
        let end = input.bytes().position(|b| b == 0).unwrap_or(input.len());
        // NUL is ASCII, so `end` is always a char boundary
        let text = input.get(..end).unwrap_or(input);
        Self { text, pos: 0 }
    }

    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// The byte under the cursor, `None` at end of input.
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Steps over the byte under the cursor.
    #[track_caller]
    pub fn advance(&mut self) {
        if self.is_eof() {
            fault!("cannot advance past end of input at byte {}", self.pos);
        }
        self.pos += 1;
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if !is_whitespace(byte) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Text between two positions. Both must sit on ASCII delimiters.
    #[track_caller]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        match self.text.get(start..end) {
            Some(s) => s,
            None => fault!("invalid slice bounds {}..{}", start, end),
        }
    }
}

/// Returns whether the given byte separates tokens.
///
/// Newline counts as whitespace unless `compat-whitespace` restores the
/// legacy set of tab, vertical tab, form feed, carriage return and space.
pub fn is_whitespace(byte: u8) -> bool {
    match byte {
        b'\t' | 0x0B | 0x0C | b'\r' | b' ' => true,
        b'\n' => cfg!(not(feature = "compat-whitespace")),
        _ => false,
    }
}
