// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::ops::{Index, IndexMut};

use allocator_api2::alloc::Allocator;

use crate::{Array, JsonString, Object};

/// One node of a parsed JSON tree.
///
/// Every variant that owns memory (`String`, `Object`, `Array`) keeps it in
/// the allocator `A`; dropping a value releases its whole subtree there.
pub enum Value<A: Allocator> {
    /// JSON `null`, also the default value.
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(JsonString<A>),
    Object(Object<A>),
    Array(Array<A>),
}

/// Names the active variant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Double,
    String,
    Object,
    Array,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "integer",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A type that can be borrowed out of a [`Value`] with [`Value::get`].
///
/// Implemented for `bool`, `i64`, `f64`, [`JsonString`], [`Object`] and
/// [`Array`]; sealed so the set matches the variants exactly.
pub trait Payload<A: Allocator>: sealed::Sealed + Sized {
    /// The variant holding this payload.
    const KIND: ValueKind;

    fn from_value(value: &Value<A>) -> Option<&Self>;

    fn from_value_mut(value: &mut Value<A>) -> Option<&mut Self>;
}

macro_rules! impl_payload {
    ($ty:ty, $variant:ident) => {
        impl<A: Allocator> Payload<A> for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_value(value: &Value<A>) -> Option<&Self> {
                match value {
                    Value::$variant(payload) => Some(payload),
                    _ => None,
                }
            }

            fn from_value_mut(value: &mut Value<A>) -> Option<&mut Self> {
                match value {
                    Value::$variant(payload) => Some(payload),
                    _ => None,
                }
            }
        }
    };
}

impl sealed::Sealed for bool {}
impl sealed::Sealed for i64 {}
impl sealed::Sealed for f64 {}
impl<A: Allocator> sealed::Sealed for JsonString<A> {}
impl<A: Allocator> sealed::Sealed for Object<A> {}
impl<A: Allocator> sealed::Sealed for Array<A> {}

impl_payload!(bool, Bool);
impl_payload!(i64, Int);
impl_payload!(f64, Double);
impl_payload!(JsonString<A>, String);
impl_payload!(Object<A>, Object);
impl_payload!(Array<A>, Array);

impl<A: Allocator> Value<A> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrows the payload of type `T`.
    ///
    /// # Panics
    /// If the active variant does not hold a `T`.
    ///
    /// # Example
    /// ```
    /// use allocator_api2::alloc::Global;
    /// use allocjson::{Array, JsonParser};
    ///
    /// let mut parser = JsonParser::new(r#"{"main": [69, -420, 69.420]}"#, Global);
    /// let root = parser.parse().unwrap();
    /// let main = root["main"].get::<Array<_>>();
    /// assert_eq!(*main[1].get::<i64>(), -420);
    /// assert_eq!(*main[2].get::<f64>(), 69.420);
    /// ```
    #[track_caller]
    pub fn get<T: Payload<A>>(&self) -> &T {
        match T::from_value(self) {
            Some(payload) => payload,
            None => fault!("expected {} value, found {}", T::KIND, self.kind()),
        }
    }

    /// Mutable form of [`get`](Self::get).
    #[track_caller]
    pub fn get_mut<T: Payload<A>>(&mut self) -> &mut T {
        let kind = self.kind();
        match T::from_value_mut(self) {
            Some(payload) => payload,
            None => fault!("expected {} value, found {}", T::KIND, kind),
        }
    }

    /// Borrows the payload of type `T` if that variant is active.
    pub fn try_get<T: Payload<A>>(&self) -> Option<&T> {
        T::from_value(self)
    }

    pub fn try_get_mut<T: Payload<A>>(&mut self) -> Option<&mut T> {
        T::from_value_mut(self)
    }
}

impl<A: Allocator> Default for Value<A> {
    fn default() -> Self {
        Value::Null
    }
}

impl<A: Allocator> From<bool> for Value<A> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<A: Allocator> From<i64> for Value<A> {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl<A: Allocator> From<f64> for Value<A> {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl<A: Allocator> From<JsonString<A>> for Value<A> {
    fn from(value: JsonString<A>) -> Self {
        Value::String(value)
    }
}

impl<A: Allocator> From<Object<A>> for Value<A> {
    fn from(value: Object<A>) -> Self {
        Value::Object(value)
    }
}

impl<A: Allocator> From<Array<A>> for Value<A> {
    fn from(value: Array<A>) -> Self {
        Value::Array(value)
    }
}

/// Positional access; the value must be an array.
impl<A: Allocator> Index<usize> for Value<A> {
    type Output = Value<A>;

    #[track_caller]
    fn index(&self, index: usize) -> &Value<A> {
        match self {
            Value::Array(array) => &array[index],
            other => fault!("cannot index {} value by position {}", other.kind(), index),
        }
    }
}

impl<A: Allocator> IndexMut<usize> for Value<A> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Value<A> {
        let kind = self.kind();
        match self {
            Value::Array(array) => &mut array[index],
            _ => fault!("cannot index {} value by position {}", kind, index),
        }
    }
}

/// Keyed read access; the value must be an object holding `key`.
///
/// A shared borrow cannot insert, so a missing key is a contract violation
/// here. Use the mutable form for get-or-insert.
impl<A: Allocator> Index<&str> for Value<A> {
    type Output = Value<A>;

    #[track_caller]
    fn index(&self, key: &str) -> &Value<A> {
        match self {
            Value::Object(object) => match object.get(key) {
                Some(value) => value,
                None => fault!("no member {:?} in object", key),
            },
            other => fault!("cannot index {} value by key {:?}", other.kind(), key),
        }
    }
}

/// Keyed access with map `operator[]` semantics: a missing key is inserted
/// as `Value::Null`.
impl<A: Allocator + Clone> IndexMut<&str> for Value<A> {
    #[track_caller]
    fn index_mut(&mut self, key: &str) -> &mut Value<A> {
        let kind = self.kind();
        match self {
            Value::Object(object) => object.get_or_insert(key),
            _ => fault!("cannot index {} value by key {:?}", kind, key),
        }
    }
}

impl<A: Allocator> PartialEq for Value<A> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl<A: Allocator> fmt::Debug for Value<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Double(d) => f.debug_tuple("Double").field(d).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Object(o) => f.debug_tuple("Object").field(o).finish(),
            Value::Array(a) => f.debug_tuple("Array").field(a).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocator_api2::alloc::Global;

    fn object_with(key: &str, value: Value<Global>) -> Value<Global> {
        let mut object = Object::new_in(Global);
        object.insert(JsonString::from_str_in(key, Global), value);
        Value::Object(object)
    }

    #[test]
    fn test_construction_and_kind() {
        assert_eq!(Value::<Global>::default().kind(), ValueKind::Null);
        assert_eq!(Value::<Global>::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::<Global>::from(69i64).kind(), ValueKind::Int);
        assert_eq!(Value::<Global>::from(69.420).kind(), ValueKind::Double);
        assert_eq!(
            Value::from(JsonString::from_str_in("s", Global)).kind(),
            ValueKind::String
        );
        assert_eq!(Value::from(Object::new_in(Global)).kind(), ValueKind::Object);
        assert_eq!(Value::from(Array::new_in(Global)).kind(), ValueKind::Array);
    }

    #[test]
    fn test_matching_accessor_returns_payload() {
        let mut value = Value::<Global>::Int(-420);
        assert_eq!(*value.get::<i64>(), -420);
        *value.get_mut::<i64>() = 7;
        assert_eq!(*value.get::<i64>(), 7);
        assert_eq!(value.try_get::<f64>(), None);
        assert_eq!(value.try_get::<i64>(), Some(&7));
    }

    #[test]
    #[should_panic(expected = "expected double value, found integer")]
    fn test_mismatched_accessor_faults() {
        let value = Value::<Global>::Int(69);
        value.get::<f64>();
    }

    #[test]
    #[should_panic(expected = "expected object value, found null")]
    fn test_mismatched_mut_accessor_faults() {
        let mut value = Value::<Global>::Null;
        value.get_mut::<Object<Global>>();
    }

    #[test]
    fn test_index_mut_inserts_null() {
        let mut value = object_with("present", Value::Int(1));
        assert_eq!(value["present"], Value::Int(1));

        let slot = &mut value["absent"];
        assert!(slot.is_null());
        assert_eq!(value.get::<Object<Global>>().len(), 2);

        value["absent"] = Value::Bool(true);
        assert!(*value["absent"].get::<bool>());
    }

    #[test]
    #[should_panic(expected = "no member \"absent\" in object")]
    fn test_shared_index_missing_key_faults() {
        let value = object_with("present", Value::Int(1));
        let _ = &value["absent"];
    }

    #[test]
    #[should_panic(expected = "cannot index array value by key \"k\"")]
    fn test_key_index_on_array_faults() {
        let mut value = Value::Array(Array::new_in(Global));
        value["k"] = Value::Null;
    }

    #[test]
    #[should_panic(expected = "cannot index bool value by position 0")]
    fn test_position_index_on_scalar_faults() {
        let value = Value::<Global>::Bool(true);
        let _ = &value[0];
    }

    #[test]
    fn test_deep_equality() {
        assert_ne!(Value::<Global>::Int(1), Value::Double(1.0));
        assert_eq!(object_with("k", Value::Null), object_with("k", Value::Null));
        assert_ne!(object_with("k", Value::Null), object_with("j", Value::Null));
    }
}
