// SPDX-License-Identifier: Apache-2.0

use core::ops::{Index, IndexMut};

use allocator_api2::alloc::Allocator;
use allocator_api2::vec::Vec;

use crate::Value;

/// An ordered sequence of values stored in the allocator `A`.
pub struct Array<A: Allocator> {
    items: Vec<Value<A>, A>,
}

impl<A: Allocator> Array<A> {
    pub fn new_in(alloc: A) -> Self {
        Self {
            items: Vec::new_in(alloc),
        }
    }

    /// Appends a value at the end.
    pub fn push(&mut self, value: Value<A>) {
        self.items.push(value);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value<A>> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value<A>> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Value<A>> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Value<A>> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value<A>] {
        &self.items
    }

    pub fn allocator(&self) -> &A {
        self.items.allocator()
    }
}

impl<A: Allocator> Index<usize> for Array<A> {
    type Output = Value<A>;

    #[track_caller]
    fn index(&self, index: usize) -> &Value<A> {
        let len = self.items.len();
        match self.items.get(index) {
            Some(value) => value,
            None => fault!("array index {} out of range for length {}", index, len),
        }
    }
}

impl<A: Allocator> IndexMut<usize> for Array<A> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Value<A> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(value) => value,
            None => fault!("array index {} out of range for length {}", index, len),
        }
    }
}

impl<'a, A: Allocator> IntoIterator for &'a Array<A> {
    type Item = &'a Value<A>;
    type IntoIter = core::slice::Iter<'a, Value<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<A: Allocator> PartialEq for Array<A> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<A: Allocator> core::fmt::Debug for Array<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
