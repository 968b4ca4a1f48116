// SPDX-License-Identifier: Apache-2.0

//! A JSON tree parser that takes its memory from the caller.
//!
//! Every string, array and object of a parsed tree is stored through an
//! allocator handle passed to [`JsonParser`]; nothing touches a global
//! heap. Implement [`MemoryAllocator`] for your own memory source and wrap
//! it in an [`AllocatorRef`], or pass any `allocator-api2` allocator.
//!
//! Input that ends too early is reported as [`ParseError::UnexpectedEof`].
//! Any other malformed input, and reading a [`Value`] through the wrong
//! accessor, is a contract violation and panics.
//!
//! ```
//! use allocator_api2::alloc::Global;
//! use allocjson::{Array, Value};
//!
//! let root = allocjson::parse_in(r#"{"main": [69, -420, 69.420]}"#, Global).unwrap();
//! let main = root["main"].get::<Array<_>>();
//! assert_eq!(main.len(), 3);
//! assert_eq!(main[0], Value::Int(69));
//! assert_eq!(main[2], Value::Double(69.420));
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod parse_error;
pub use parse_error::ParseError;

// Compile-time configuration validation
mod config_check;

mod allocator;
pub use allocator::{AllocatorRef, MemoryAllocator};

mod input_cursor;

mod int_parser;

mod number_parser;

#[cfg(feature = "escapes")]
mod escape_processor;

mod json_string;
pub use json_string::JsonString;

mod array;
pub use array::Array;

mod object;
pub use object::Object;

mod value;
pub use value::{Payload, Value, ValueKind};

mod parser;
pub use parser::{JsonParser, DEFAULT_MAX_DEPTH};

pub use allocator_api2::alloc::Allocator;

/// Parses one JSON value from `input` into memory from `alloc`.
pub fn parse_in<A: Allocator + Clone>(input: &str, alloc: A) -> Result<Value<A>, ParseError> {
    JsonParser::new(input, alloc).parse()
}
