//! Conversions from a decoded [`Value`] to a requested static type.
//!
//! A decoded number may be stored as `u64`, `i64` or `f64` depending on its
//! literal. Integer targets accept all three: the number is widened to
//! `i128` (floats truncate toward zero) and then narrowed with `as`, so an
//! out-of-range value wraps instead of failing. `1234` read as `u8` is `210`.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

/// A type that a decoded value can be read back as.
pub trait Coerce: Sized {
    /// Name used in type errors.
    fn type_name() -> String;

    /// Convert `value`, or `None` if it is not of a compatible variant.
    fn coerce(value: &Value) -> Option<Self>;

    /// Convert a document root. Only object-shaped targets accept one.
    fn coerce_object(_map: &Map<String, Value>) -> Option<Self> {
        None
    }
}

fn widen(n: &Number) -> Option<i128> {
    if let Some(u) = n.as_u64() {
        Some(i128::from(u))
    } else if let Some(i) = n.as_i64() {
        Some(i128::from(i))
    } else {
        // `as` truncates toward zero and saturates, NaN becomes 0.
        n.as_f64().map(|f| f as i128)
    }
}

macro_rules! coerce_integer {
    ($($t:ty),*) => {
        $(
            impl Coerce for $t {
                fn type_name() -> String {
                    stringify!($t).to_owned()
                }

                fn coerce(value: &Value) -> Option<Self> {
                    match value {
                        Value::Number(n) => widen(n).map(|w| w as $t),
                        _ => None,
                    }
                }
            }
        )*
    };
}

coerce_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Coerce for f64 {
    fn type_name() -> String {
        "f64".to_owned()
    }

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl Coerce for f32 {
    fn type_name() -> String {
        "f32".to_owned()
    }

    fn coerce(value: &Value) -> Option<Self> {
        f64::coerce(value).map(|f| f as f32)
    }
}

impl Coerce for bool {
    fn type_name() -> String {
        "bool".to_owned()
    }

    fn coerce(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Coerce for String {
    fn type_name() -> String {
        "String".to_owned()
    }

    fn coerce(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl Coerce for Value {
    fn type_name() -> String {
        "Value".to_owned()
    }

    fn coerce(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn coerce_object(map: &Map<String, Value>) -> Option<Self> {
        Some(Value::Object(map.clone()))
    }
}

impl Coerce for Map<String, Value> {
    fn type_name() -> String {
        "Map<String, Value>".to_owned()
    }

    fn coerce(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }

    fn coerce_object(map: &Map<String, Value>) -> Option<Self> {
        Some(map.clone())
    }
}

impl<T: Coerce> Coerce for Vec<T> {
    fn type_name() -> String {
        format!("Vec<{}>", T::type_name())
    }

    fn coerce(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::coerce).collect()
    }
}

impl<T: Coerce> Coerce for BTreeMap<String, T> {
    fn type_name() -> String {
        format!("BTreeMap<String, {}>", T::type_name())
    }

    fn coerce(value: &Value) -> Option<Self> {
        Self::coerce_object(value.as_object()?)
    }

    fn coerce_object(map: &Map<String, Value>) -> Option<Self> {
        map.iter()
            .map(|(k, v)| T::coerce(v).map(|t| (k.clone(), t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_narrowing_wraps() {
        assert_eq!(u8::coerce(&json!(1234)), Some(210));
        assert_eq!(i8::coerce(&json!(200)), Some(-56));
        assert_eq!(u16::coerce(&json!(-1)), Some(u16::MAX));
        assert_eq!(u8::coerce(&json!(1234.0)), Some(210));
    }

    #[test]
    fn test_float_to_integer_truncates() {
        assert_eq!(i64::coerce(&json!(1.9)), Some(1));
        assert_eq!(i64::coerce(&json!(-1.9)), Some(-1));
        assert_eq!(isize::coerce(&json!(17)), Some(17));
    }

    #[test]
    fn test_large_unsigned() {
        assert_eq!(u64::coerce(&json!(u64::MAX)), Some(u64::MAX));
        assert_eq!(i64::coerce(&json!(u64::MAX)), Some(-1));
    }

    #[test]
    fn test_floats() {
        assert_eq!(f64::coerce(&json!(1.2)), Some(1.2));
        assert_eq!(f64::coerce(&json!(3)), Some(3.0));
        assert_eq!(f32::coerce(&json!(1.2)), Some(1.2f32));
        assert_eq!(f64::coerce(&json!("1.2")), None);
    }

    #[test]
    fn test_no_cross_family() {
        assert_eq!(bool::coerce(&json!(1)), None);
        assert_eq!(i32::coerce(&json!("12")), None);
        assert_eq!(i32::coerce(&json!(true)), None);
        assert_eq!(String::coerce(&json!(12)), None);
        assert_eq!(String::coerce(&json!(null)), None);
    }

    #[test]
    fn test_homogeneous_array() {
        assert_eq!(
            Vec::<String>::coerce(&json!(["blah", "test"])),
            Some(vec!["blah".to_owned(), "test".to_owned()])
        );
        assert_eq!(Vec::<String>::coerce(&json!(["blah", 2])), None);
        assert_eq!(Vec::<u8>::coerce(&json!([1, 256])), Some(vec![1, 0]));
        assert_eq!(Vec::<Value>::coerce(&json!({"a": 1})), None);
    }

    #[test]
    fn test_homogeneous_map() {
        let m = BTreeMap::<String, i64>::coerce(&json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(m["a"], 1);
        assert_eq!(m["b"], 2);
        assert_eq!(BTreeMap::<String, i64>::coerce(&json!({"a": "x"})), None);
        assert_eq!(BTreeMap::<String, i64>::coerce(&json!([1])), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(u8::type_name(), "u8");
        assert_eq!(Vec::<String>::type_name(), "Vec<String>");
        assert_eq!(
            BTreeMap::<String, Vec<f64>>::type_name(),
            "BTreeMap<String, Vec<f64>>"
        );
        assert_eq!(Map::<String, Value>::type_name(), "Map<String, Value>");
    }

    #[test]
    fn test_root_object_targets() {
        let root = json!({"a": 1, "b": 2});
        let map = root.as_object().unwrap();
        assert_eq!(Value::coerce_object(map), Some(root.clone()));
        assert_eq!(Map::coerce_object(map).map(|m| m.len()), Some(2));
        assert_eq!(
            BTreeMap::<String, u8>::coerce_object(map).map(|m| m["b"]),
            Some(2)
        );
        assert_eq!(bool::coerce_object(map), None);
        assert_eq!(Vec::<Value>::coerce_object(map), None);
    }
}
