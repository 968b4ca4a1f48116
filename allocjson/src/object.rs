// SPDX-License-Identifier: Apache-2.0

use allocator_api2::alloc::Allocator;
use hashbrown::{DefaultHashBuilder, HashMap};

use crate::{JsonString, Value};

/// String-keyed map of values stored in the allocator `A`.
///
/// Keys are unique; inserting an existing key replaces its value. Iteration
/// order is unspecified.
pub struct Object<A: Allocator> {
    entries: HashMap<JsonString<A>, Value<A>, DefaultHashBuilder, A>,
}

impl<A: Allocator> Object<A> {
    pub fn new_in(alloc: A) -> Self {
        Self {
            entries: HashMap::new_in(alloc),
        }
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: JsonString<A>, value: Value<A>) -> Option<Value<A>> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&Value<A>> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value<A>> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value<A>> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<A>)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(JsonString::as_str)
    }

    pub fn allocator(&self) -> &A {
        self.entries.allocator()
    }
}

impl<A: Allocator + Clone> Object<A> {
    /// Looks up `key`, inserting `Value::Null` first if it is absent.
    ///
    /// The key is only copied into the allocator when it is inserted.
    pub fn get_or_insert(&mut self, key: &str) -> &mut Value<A> {
        if !self.entries.contains_key(key) {
            let owned = JsonString::from_str_in(key, self.allocator().clone());
            self.entries.insert(owned, Value::Null);
        }
        match self.entries.get_mut(key) {
            Some(value) => value,
            None => fault!("key {:?} missing right after insertion", key),
        }
    }
}

impl<A: Allocator> PartialEq for Object<A> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<A: Allocator> core::fmt::Debug for Object<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
