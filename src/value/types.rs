//! Input Values
//!
//! A client library for a dynamic language will accept anything as a command
//! argument and send its default string conversion over the wire. `Value` is the
//! closed set of shapes this crate accepts in that position:
//!
//! | Variant | Example input            | Canonical string      |
//! |---------|--------------------------|-----------------------|
//! | `Bool`  | `true`                   | `True`                |
//! | `Int`   | `-42`                    | `-42`                 |
//! | `Text`  | `"value"`                | `value`               |
//! | `Seq`   | `[1, "2"]`               | `[1, '2']`            |
//! | `Map`   | `{"a": 1, "b": "c"}`     | `{'a': 1, 'b': 'c'}`  |
//!
//! See the [`repr`](super::repr) module for the exact formatting rules.

/// A value accepted by write commands.
///
/// Values are never stored as-is: every write command reduces them to their
/// canonical string first (see [`Value::canonical`]).
///
/// # Example
///
/// ```
/// use mockkv::Value;
///
/// assert_eq!(Value::from(true).canonical(), "True");
/// assert_eq!(Value::seq([Value::from(1), Value::from("2")]).canonical(), "[1, '2']");
/// assert_eq!(
///     Value::map([("a", Value::from(1)), ("b", Value::from("c"))]).canonical(),
///     "{'a': 1, 'b': 'c'}"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Rendered as `True` / `False`
    Bool(bool),

    /// Rendered in base 10
    Int(i64),

    /// Rendered verbatim at the top level, quoted when nested
    Text(String),

    /// An ordered sequence, rendered as `[a, b, ...]`
    Seq(Vec<Value>),

    /// A mapping with text keys in insertion order, rendered as `{'k': v, ...}`
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Builds a sequence from anything convertible into values.
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Builds a mapping with dict semantics.
    ///
    /// Keys keep the position of their first insertion; a repeated key replaces
    /// the earlier value in place.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut map: Vec<(String, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match map.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => map.push((key, value)),
            }
        }
        Value::Map(map)
    }

    /// Returns the canonical string form of this value.
    ///
    /// This is exactly what a read command returns after the value was written.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::seq(items)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::seq(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(-7i32), Value::Int(-7));
        assert_eq!(Value::from(u32::MAX), Value::Int(4_294_967_295));
        assert_eq!(Value::from("x"), Value::Text("x".to_string()));
        assert_eq!(Value::from(String::from("y")), Value::Text("y".to_string()));
    }

    #[test]
    fn test_from_collections() {
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::Seq(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(Value::from(["a"]), Value::Seq(vec![Value::from("a")]));
        assert_eq!(Value::from(Vec::<i64>::new()), Value::Seq(vec![]));
    }

    #[test]
    fn test_map_keeps_first_position_on_duplicate_key() {
        let map = Value::map([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(
            map,
            Value::Map(vec![
                ("a".to_string(), Value::Int(3)),
                ("b".to_string(), Value::Int(2)),
            ])
        );
    }
}
