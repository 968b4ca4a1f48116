// SPDX-License-Identifier: Apache-2.0

use core::borrow::Borrow;
use core::hash::{Hash, Hasher};
use core::ops::Deref;

use allocator_api2::alloc::Allocator;
use allocator_api2::vec::Vec;

/// Owned UTF-8 text whose buffer lives in the allocator `A`.
///
/// Hashes and compares exactly like the `str` it holds, so maps keyed by
/// `JsonString` can be queried with a plain `&str`.
pub struct JsonString<A: Allocator> {
    // Only ever extended with whole `str`s, so always valid UTF-8
    bytes: Vec<u8, A>,
}

impl<A: Allocator> JsonString<A> {
    pub fn new_in(alloc: A) -> Self {
        Self {
            bytes: Vec::new_in(alloc),
        }
    }

    pub fn from_str_in(s: &str, alloc: A) -> Self {
        let mut string = Self::new_in(alloc);
        string.push_str(s);
        string
    }

    pub fn push_str(&mut self, s: &str) {
        self.bytes.extend_from_slice(s.as_bytes());
    }

    pub fn push(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.push_str(c.encode_utf8(&mut buf));
    }

    pub fn as_str(&self) -> &str {
        // `bytes` is only ever extended with whole `str` data
        match core::str::from_utf8(&self.bytes) {
            Ok(s) => s,
            Err(e) => fault!("string storage is not UTF-8: {}", e),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn allocator(&self) -> &A {
        self.bytes.allocator()
    }
}

impl<A: Allocator> Deref for JsonString<A> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl<A: Allocator> AsRef<str> for JsonString<A> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<A: Allocator> Borrow<str> for JsonString<A> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<A: Allocator> Hash for JsonString<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl<A: Allocator, B: Allocator> PartialEq<JsonString<B>> for JsonString<A> {
    fn eq(&self, other: &JsonString<B>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<A: Allocator> Eq for JsonString<A> {}

impl<A: Allocator> PartialEq<str> for JsonString<A> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<A: Allocator> PartialEq<&str> for JsonString<A> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<A: Allocator> core::fmt::Display for JsonString<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<A: Allocator> core::fmt::Debug for JsonString<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.as_str(), f)
    }
}
