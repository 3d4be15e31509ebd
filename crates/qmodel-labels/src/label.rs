//! The closed set of variable label types.
//!
//! A model is generic over exactly one of these types, so the label type is
//! fixed when the model is constructed and can never be mixed afterwards.

use std::fmt::Debug;
use std::hash::Hash;

use serde_json::Value;

use crate::error::LabelError;

/// Tag naming one label instantiation, used as the `index_type` of a
/// serialized model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Int,
    Str,
    IntTuple2,
    IntTuple3,
    IntTuple4,
    StrTuple2,
    StrTuple3,
    StrTuple4,
}

impl LabelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LabelKind::Int => "int",
            LabelKind::Str => "string",
            LabelKind::IntTuple2 => "int_tuple2",
            LabelKind::IntTuple3 => "int_tuple3",
            LabelKind::IntTuple4 => "int_tuple4",
            LabelKind::StrTuple2 => "string_tuple2",
            LabelKind::StrTuple3 => "string_tuple3",
            LabelKind::StrTuple4 => "string_tuple4",
        }
    }

    /// Parse an `index_type` tag.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "int" => Some(LabelKind::Int),
            "string" => Some(LabelKind::Str),
            "int_tuple2" => Some(LabelKind::IntTuple2),
            "int_tuple3" => Some(LabelKind::IntTuple3),
            "int_tuple4" => Some(LabelKind::IntTuple4),
            "string_tuple2" => Some(LabelKind::StrTuple2),
            "string_tuple3" => Some(LabelKind::StrTuple3),
            "string_tuple4" => Some(LabelKind::StrTuple4),
            _ => None,
        }
    }

    /// Infer the label kind of a single JSON-encoded label.
    ///
    /// Tuples are encoded as arrays whose items share one scalar type.
    pub fn infer(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) if number.is_i64() => Some(LabelKind::Int),
            Value::String(_) => Some(LabelKind::Str),
            Value::Array(items) => {
                let all_int = items.iter().all(|item| item.is_i64());
                let all_str = items.iter().all(Value::is_string);
                match (items.len(), all_int, all_str) {
                    (2, true, _) => Some(LabelKind::IntTuple2),
                    (3, true, _) => Some(LabelKind::IntTuple3),
                    (4, true, _) => Some(LabelKind::IntTuple4),
                    (2, _, true) => Some(LabelKind::StrTuple2),
                    (3, _, true) => Some(LabelKind::StrTuple3),
                    (4, _, true) => Some(LabelKind::StrTuple4),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// A variable label.
///
/// Implemented for `i64`, `String`, and 2/3/4-tuples of either.
pub trait Label: Clone + Eq + Ord + Hash + Debug {
    /// Which instantiation this type is.
    const KIND: LabelKind;

    /// Encode as JSON. Tuples become arrays.
    fn to_json(&self) -> Value;

    /// Decode from JSON, returning `None` when the value has another shape.
    fn from_json(value: &Value) -> Option<Self>;

    /// Decode from JSON, reporting a type mismatch on failure.
    fn decode(value: &Value) -> Result<Self, LabelError> {
        Self::from_json(value).ok_or_else(|| LabelError::TypeMismatch {
            expected: Self::KIND,
            found: value.to_string(),
        })
    }
}

impl Label for i64 {
    const KIND: LabelKind = LabelKind::Int;

    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl Label for String {
    const KIND: LabelKind = LabelKind::Str;

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

macro_rules! define_tuple_label {
    ($kind:ident, $len:literal, $($idx:tt => $elem:ty),+ $(,)?) => {
        impl Label for ($($elem,)+) {
            const KIND: LabelKind = LabelKind::$kind;

            fn to_json(&self) -> Value {
                Value::Array(vec![$(self.$idx.to_json()),+])
            }

            fn from_json(value: &Value) -> Option<Self> {
                let items = value.as_array()?;
                if items.len() != $len {
                    return None;
                }
                Some(($(<$elem as Label>::from_json(&items[$idx])?,)+))
            }
        }
    };
}

define_tuple_label!(IntTuple2, 2, 0 => i64, 1 => i64);
define_tuple_label!(IntTuple3, 3, 0 => i64, 1 => i64, 2 => i64);
define_tuple_label!(IntTuple4, 4, 0 => i64, 1 => i64, 2 => i64, 3 => i64);
define_tuple_label!(StrTuple2, 2, 0 => String, 1 => String);
define_tuple_label!(StrTuple3, 3, 0 => String, 1 => String, 2 => String);
define_tuple_label!(StrTuple4, 4, 0 => String, 1 => String, 2 => String, 3 => String);

#[cfg(test)]
mod tests {
    use super::{Label, LabelKind};
    use crate::error::LabelError;
    use serde_json::json;

    #[test]
    fn int_label_roundtrip() {
        let value = 7_i64.to_json();
        assert_eq!(value, json!(7));
        assert_eq!(i64::from_json(&value), Some(7));
    }

    #[test]
    fn tuple_labels_encode_as_arrays() {
        let label = (1_i64, 2_i64, 3_i64);
        assert_eq!(label.to_json(), json!([1, 2, 3]));
        assert_eq!(<(i64, i64, i64)>::from_json(&json!([1, 2, 3])), Some(label));

        let label = ("a".to_string(), "b".to_string());
        assert_eq!(label.to_json(), json!(["a", "b"]));
    }

    #[test]
    fn tuple_arity_must_match() {
        assert_eq!(<(i64, i64)>::from_json(&json!([1, 2, 3])), None);
        assert_eq!(<(i64, i64, i64, i64)>::from_json(&json!([1, 2, 3])), None);
    }

    #[test]
    fn decode_reports_type_mismatch() {
        let err = String::decode(&json!(3)).unwrap_err();
        assert_eq!(
            err,
            LabelError::TypeMismatch {
                expected: LabelKind::Str,
                found: "3".to_string(),
            }
        );
        assert_eq!(err.code(), "LABEL_TYPE_MISMATCH");
    }

    #[test]
    fn infer_label_kinds() {
        assert_eq!(LabelKind::infer(&json!(0)), Some(LabelKind::Int));
        assert_eq!(LabelKind::infer(&json!("x")), Some(LabelKind::Str));
        assert_eq!(LabelKind::infer(&json!([0, 1])), Some(LabelKind::IntTuple2));
        assert_eq!(
            LabelKind::infer(&json!(["a", "b", "c", "d"])),
            Some(LabelKind::StrTuple4)
        );
        assert_eq!(LabelKind::infer(&json!([0, "a"])), None);
        assert_eq!(LabelKind::infer(&json!([0, 1, 2, 3, 4])), None);
        assert_eq!(LabelKind::infer(&json!(0.5)), None);
    }

    #[test]
    fn kind_tags_roundtrip() {
        for kind in [
            LabelKind::Int,
            LabelKind::Str,
            LabelKind::IntTuple2,
            LabelKind::IntTuple3,
            LabelKind::IntTuple4,
            LabelKind::StrTuple2,
            LabelKind::StrTuple3,
            LabelKind::StrTuple4,
        ] {
            assert_eq!(LabelKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(LabelKind::parse("uint16"), None);
    }
}
