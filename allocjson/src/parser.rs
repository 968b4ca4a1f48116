// SPDX-License-Identifier: Apache-2.0

use allocator_api2::alloc::Allocator;
use log::{debug, trace};

#[cfg(feature = "escapes")]
use crate::escape_processor::EscapeProcessor;
use crate::input_cursor::InputCursor;
use crate::number_parser::{scan_number, ParsedNumber};
use crate::parse_error::ParseError;
use crate::{Array, JsonString, Object, Value};

/// Nesting limit used by [`JsonParser::new`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// A recursive-descent parser building a [`Value`] tree in the allocator `A`.
///
/// The only state kept between calls is the cursor position: each call to
/// [`parse`](Self::parse) reads one value starting where the previous one
/// ended. Containers nested deeper than `MAX_DEPTH` are a contract
/// violation, which bounds the stack used by the recursion.
///
/// Lifetime 'a is the input text lifetime.
pub struct JsonParser<'a, A: Allocator + Clone, const MAX_DEPTH: usize = DEFAULT_MAX_DEPTH> {
    cursor: InputCursor<'a>,
    alloc: A,
    depth: usize,
}

impl<'a, A: Allocator + Clone> JsonParser<'a, A> {
    /// Creates a parser over `input` allocating from `alloc`.
    ///
    /// Input ends at the end of `input` or at its first NUL byte.
    ///
    /// # Example
    /// ```
    /// use allocator_api2::alloc::Global;
    /// use allocjson::JsonParser;
    ///
    /// let mut parser = JsonParser::new(r#"{"hello": [69, false, true, 420]}"#, Global);
    /// let root = parser.parse().unwrap();
    /// assert_eq!(root["hello"][3], allocjson::Value::Int(420));
    /// ```
    pub fn new(input: &'a str, alloc: A) -> Self {
        Self::with_max_depth(input, alloc)
    }

    /// Creates a parser from bytes, validating the text up to the first NUL.
    pub fn from_slice(input: &'a [u8], alloc: A) -> Result<Self, ParseError> {
        let end = input.iter().position(|&b| b == 0).unwrap_or(input.len());
        let text = core::str::from_utf8(&input[..end])?;
        Ok(Self::new(text, alloc))
    }
}

impl<'a, A: Allocator + Clone, const MAX_DEPTH: usize> JsonParser<'a, A, MAX_DEPTH> {
    /// Creates a parser with a custom nesting limit.
    ///
    /// # Example
    /// ```
    /// # use allocator_api2::alloc::Global;
    /// # use allocjson::JsonParser;
    /// let mut parser = JsonParser::<_, 4>::with_max_depth("[[[[]]]]", Global);
    /// assert!(parser.parse().is_ok());
    /// ```
    pub fn with_max_depth(input: &'a str, alloc: A) -> Self {
        Self {
            cursor: InputCursor::new(input),
            alloc,
            depth: 0,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.cursor.current_pos()
    }

    /// Skips whitespace and reports whether any input is left.
    pub fn is_at_end(&mut self) -> bool {
        self.cursor.skip_whitespace();
        self.cursor.is_eof()
    }

    /// Parses the value at the cursor.
    ///
    /// Numbers are tried first; otherwise the lookahead selects an object,
    /// array, string or keyword. Input ending before the value is complete
    /// is reported as [`ParseError::UnexpectedEof`]; any other malformed
    /// input panics.
    pub fn parse(&mut self) -> Result<Value<A>, ParseError> {
        self.cursor.skip_whitespace();
        if self.cursor.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }

        if let Some(number) = self.parse_number() {
            return Ok(number);
        }

        let value = match self.cursor.peek() {
            Some(b'{') => Value::Object(self.parse_object()?),
            Some(b'[') => Value::Array(self.parse_array()?),
            Some(b'"') => Value::String(self.parse_string()?),
            found => match self.parse_literal() {
                Some(literal) => literal,
                None => fault!(
                    "unexpected {} at byte {}",
                    Found(found),
                    self.cursor.current_pos()
                ),
            },
        };
        if self.depth == 0 {
            debug!("parsed {} value, cursor at byte {}", value.kind(), self.position());
        }
        Ok(value)
    }

    /// Parses `{ "key": value, ... }`. The cursor must be on `{`.
    ///
    /// A later duplicate key replaces the earlier value.
    pub fn parse_object(&mut self) -> Result<Object<A>, ParseError> {
        trace!("object at byte {}", self.position());
        self.expect(b'{', "expected object to start with '{'");
        self.cursor.skip_whitespace();

        let mut object = Object::new_in(self.alloc.clone());
        self.enter_container();
        let result = self.parse_members(&mut object);
        self.depth -= 1;
        result?;

        debug!("object with {} members closed at byte {}", object.len(), self.position());
        Ok(object)
    }

    fn parse_members(&mut self, object: &mut Object<A>) -> Result<(), ParseError> {
        loop {
            match self.cursor.peek() {
                None => return Err(ParseError::UnexpectedEof),
                Some(b'}') => break,
                Some(_) => {}
            }

            let key = self.parse_string()?;
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                return Err(ParseError::UnexpectedEof);
            }
            self.expect(b':', "expected ':' after object key");
            self.cursor.skip_whitespace();

            let value = self.parse()?;
            if let Some(replaced) = object.insert(key, value) {
                trace!("duplicate key replaced a {} value", replaced.kind());
            }
            self.eat_separator(b'}');
        }
        self.cursor.advance();
        Ok(())
    }

    /// Parses `[ value, ... ]`. The cursor must be on `[`.
    pub fn parse_array(&mut self) -> Result<Array<A>, ParseError> {
        trace!("array at byte {}", self.position());
        self.expect(b'[', "expected array to start with '['");
        self.cursor.skip_whitespace();

        let mut array = Array::new_in(self.alloc.clone());
        self.enter_container();
        let result = self.parse_elements(&mut array);
        self.depth -= 1;
        result?;

        debug!("array with {} elements closed at byte {}", array.len(), self.position());
        Ok(array)
    }

    fn parse_elements(&mut self, array: &mut Array<A>) -> Result<(), ParseError> {
        loop {
            match self.cursor.peek() {
                None => return Err(ParseError::UnexpectedEof),
                Some(b']') => break,
                Some(_) => {}
            }

            let value = self.parse()?;
            array.push(value);
            self.eat_separator(b']');
        }
        self.cursor.advance();
        Ok(())
    }

    /// Parses `"..."`. The cursor must be on the opening quote.
    ///
    /// Characters are copied verbatim up to the next `"`; with the
    /// `escapes` feature the simple escapes are decoded and `\"` no longer
    /// ends the string.
    pub fn parse_string(&mut self) -> Result<JsonString<A>, ParseError> {
        trace!("string at byte {}", self.position());
        self.expect(b'"', "expected string to start with '\"'");

        let mut value = JsonString::new_in(self.alloc.clone());
        #[cfg_attr(not(feature = "escapes"), allow(unused_mut))]
        let mut run_start = self.cursor.current_pos();
        loop {
            match self.cursor.peek() {
                None => return Err(ParseError::UnexpectedEof),
                Some(b'"') => break,
                #[cfg(feature = "escapes")]
                Some(b'\\') => {
                    let escape_start = self.cursor.current_pos();
                    value.push_str(self.cursor.slice(run_start, escape_start));
                    self.cursor.advance();
                    let escape_char = self.cursor.peek().ok_or(ParseError::UnexpectedEof)?;
                    if let Some(byte) = EscapeProcessor::process_simple_escape(escape_char) {
                        value.push(char::from(byte));
                        self.cursor.advance();
                        run_start = self.cursor.current_pos();
                    } else if EscapeProcessor::is_unicode_escape(escape_char) {
                        // Copied through verbatim with the rest of the run
                        run_start = escape_start;
                    } else {
                        fault!(
                            "invalid escape sequence at byte {}, found {}",
                            escape_start,
                            Found(Some(escape_char))
                        );
                    }
                }
                Some(_) => self.cursor.advance(),
            }
        }
        value.push_str(self.cursor.slice(run_start, self.cursor.current_pos()));
        self.cursor.advance();
        Ok(value)
    }

    /// Parses a number at the cursor, or returns `None` without consuming
    /// anything if no number starts here.
    pub fn parse_number(&mut self) -> Option<Value<A>> {
        let span = scan_number(&mut self.cursor)?;
        Some(match span.convert() {
            ParsedNumber::Integer(value) => Value::Int(value),
            ParsedNumber::Double(value) => Value::Double(value),
        })
    }

    /// Parses `true`, `false` or `null`, or returns `None` if the lookahead
    /// starts none of them. A keyword broken off midway panics.
    pub fn parse_literal(&mut self) -> Option<Value<A>> {
        let value = match self.cursor.peek()? {
            b't' => {
                self.consume_literal("true");
                Value::Bool(true)
            }
            b'f' => {
                self.consume_literal("false");
                Value::Bool(false)
            }
            b'n' => {
                self.consume_literal("null");
                Value::Null
            }
            _ => return None,
        };
        Some(value)
    }

    fn consume_literal(&mut self, literal: &str) {
        let start = self.cursor.current_pos();
        for expected in literal.bytes() {
            let found = self.cursor.peek();
            if found != Some(expected) {
                fault!(
                    "malformed literal at byte {}: expected {:?}, found {}",
                    start,
                    literal,
                    Found(found)
                );
            }
            self.cursor.advance();
        }
    }

    /// Steps over `byte`, which must be under the cursor.
    #[track_caller]
    fn expect(&mut self, byte: u8, what: &str) {
        let found = self.cursor.peek();
        if found != Some(byte) {
            fault!(
                "{} at byte {}, found {}",
                what,
                self.cursor.current_pos(),
                Found(found)
            );
        }
        self.cursor.advance();
    }

    fn enter_container(&mut self) {
        if self.depth >= MAX_DEPTH {
            fault!(
                "nesting deeper than {} containers at byte {}",
                MAX_DEPTH,
                self.position()
            );
        }
        self.depth += 1;
    }

    /// Consumes whitespace and at most one `,` after a member or element.
    ///
    /// Leaves the cursor on the next member, the closing delimiter, or at
    /// end of input.
    #[cfg_attr(not(feature = "strict-separators"), allow(unused_variables))]
    fn eat_separator(&mut self, close: u8) {
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some(b',') {
            self.cursor.advance();
            self.cursor.skip_whitespace();
            #[cfg(feature = "strict-separators")]
            if self.cursor.peek() == Some(close) {
                fault!(
                    "trailing ',' before '{}' at byte {}",
                    close as char,
                    self.position()
                );
            }
        } else {
            #[cfg(feature = "strict-separators")]
            match self.cursor.peek() {
                None => {}
                Some(b) if b == close => {}
                found => fault!(
                    "expected ',' or '{}' at byte {}, found {}",
                    close as char,
                    self.position(),
                    Found(found)
                ),
            }
        }
    }
}

/// Formats a lookahead byte for fault messages.
struct Found(Option<u8>);

impl core::fmt::Display for Found {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            None => f.write_str("end of input"),
            Some(b) if b.is_ascii_graphic() || b == b' ' => write!(f, "'{}'", b as char),
            Some(b) => write!(f, "byte 0x{b:02x}"),
        }
    }
}
