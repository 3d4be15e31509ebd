//! Models whose label type is chosen at runtime.
//!
//! A serialized document names its label type in `index_type`, or leaves it
//! to be inferred from the first label. [`AnyQuadraticModel`] and
//! [`AnyPolynomialModel`] resolve that once and then hold a monomorphized
//! model.

use qmodel_labels::LabelKind;
use serde_json::Value;

use crate::bpm::BinaryPolynomialModel;
use crate::bqm::BinaryQuadraticModel;
use crate::error::ModelError;
use crate::types::Vartype;

type IntTuple2 = (i64, i64);
type IntTuple3 = (i64, i64, i64);
type IntTuple4 = (i64, i64, i64, i64);
type StrTuple2 = (String, String);
type StrTuple3 = (String, String, String);
type StrTuple4 = (String, String, String, String);

/// Label kind of a serialized document.
///
/// Uses `index_type` when present, otherwise infers from the first entry of
/// `variable_labels`. A document without labels reads as `int`.
pub fn document_label_kind(value: &Value) -> Result<LabelKind, ModelError> {
    if let Some(tag) = value.get("index_type").and_then(Value::as_str) {
        return LabelKind::parse(tag)
            .ok_or_else(|| ModelError::schema(format!("unknown index_type {tag:?}")));
    }
    let first = value
        .get("variable_labels")
        .and_then(Value::as_array)
        .and_then(|labels| labels.first());
    match first {
        None => Ok(LabelKind::Int),
        Some(label) => LabelKind::infer(label)
            .ok_or_else(|| ModelError::schema(format!("cannot infer label type of {label}"))),
    }
}

macro_rules! define_any_model {
    ($(#[$meta:meta])* $name:ident, $model:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub enum $name {
            Int($model<i64>),
            Str($model<String>),
            IntTuple2($model<IntTuple2>),
            IntTuple3($model<IntTuple3>),
            IntTuple4($model<IntTuple4>),
            StrTuple2($model<StrTuple2>),
            StrTuple3($model<StrTuple3>),
            StrTuple4($model<StrTuple4>),
        }

        impl $name {
            /// Decode a document, choosing the label type from its contents.
            ///
            /// # Errors
            ///
            /// Returns [`ModelError::Schema`] if the label type cannot be
            /// determined, or any error of the typed decoder.
            pub fn from_serializable(value: &Value) -> Result<Self, ModelError> {
                let kind = document_label_kind(value)?;
                let model = match kind {
                    LabelKind::Int => Self::Int($model::from_serializable(value)?),
                    LabelKind::Str => Self::Str($model::from_serializable(value)?),
                    LabelKind::IntTuple2 => Self::IntTuple2($model::from_serializable(value)?),
                    LabelKind::IntTuple3 => Self::IntTuple3($model::from_serializable(value)?),
                    LabelKind::IntTuple4 => Self::IntTuple4($model::from_serializable(value)?),
                    LabelKind::StrTuple2 => Self::StrTuple2($model::from_serializable(value)?),
                    LabelKind::StrTuple3 => Self::StrTuple3($model::from_serializable(value)?),
                    LabelKind::StrTuple4 => Self::StrTuple4($model::from_serializable(value)?),
                };
                tracing::debug!(
                    component = "dispatch",
                    operation = "from_serializable",
                    status = "success",
                    index_type = kind.as_str(),
                    "Resolved label type"
                );
                Ok(model)
            }

            /// # Errors
            ///
            /// Returns [`ModelError::Schema`] if the document cannot be encoded.
            pub fn to_serializable(&self) -> Result<Value, ModelError> {
                match self {
                    Self::Int(model) => model.to_serializable(),
                    Self::Str(model) => model.to_serializable(),
                    Self::IntTuple2(model) => model.to_serializable(),
                    Self::IntTuple3(model) => model.to_serializable(),
                    Self::IntTuple4(model) => model.to_serializable(),
                    Self::StrTuple2(model) => model.to_serializable(),
                    Self::StrTuple3(model) => model.to_serializable(),
                    Self::StrTuple4(model) => model.to_serializable(),
                }
            }

            pub fn label_kind(&self) -> LabelKind {
                match self {
                    Self::Int(_) => LabelKind::Int,
                    Self::Str(_) => LabelKind::Str,
                    Self::IntTuple2(_) => LabelKind::IntTuple2,
                    Self::IntTuple3(_) => LabelKind::IntTuple3,
                    Self::IntTuple4(_) => LabelKind::IntTuple4,
                    Self::StrTuple2(_) => LabelKind::StrTuple2,
                    Self::StrTuple3(_) => LabelKind::StrTuple3,
                    Self::StrTuple4(_) => LabelKind::StrTuple4,
                }
            }

            pub fn vartype(&self) -> Vartype {
                match self {
                    Self::Int(model) => model.vartype(),
                    Self::Str(model) => model.vartype(),
                    Self::IntTuple2(model) => model.vartype(),
                    Self::IntTuple3(model) => model.vartype(),
                    Self::IntTuple4(model) => model.vartype(),
                    Self::StrTuple2(model) => model.vartype(),
                    Self::StrTuple3(model) => model.vartype(),
                    Self::StrTuple4(model) => model.vartype(),
                }
            }

            pub fn num_variables(&self) -> usize {
                match self {
                    Self::Int(model) => model.num_variables(),
                    Self::Str(model) => model.num_variables(),
                    Self::IntTuple2(model) => model.num_variables(),
                    Self::IntTuple3(model) => model.num_variables(),
                    Self::IntTuple4(model) => model.num_variables(),
                    Self::StrTuple2(model) => model.num_variables(),
                    Self::StrTuple3(model) => model.num_variables(),
                    Self::StrTuple4(model) => model.num_variables(),
                }
            }
        }
    };
}

define_any_model!(
    /// A quadratic model over any supported label type.
    AnyQuadraticModel,
    BinaryQuadraticModel
);

define_any_model!(
    /// A polynomial model over any supported label type.
    AnyPolynomialModel,
    BinaryPolynomialModel
);

#[cfg(test)]
mod tests {
    use super::{AnyPolynomialModel, AnyQuadraticModel, document_label_kind};
    use crate::bpm::BinaryPolynomialModel;
    use crate::bqm::BinaryQuadraticModel;
    use crate::types::{Backing, Vartype};
    use qmodel_labels::LabelKind;
    use serde_json::json;

    #[test]
    fn test_label_kind_prefers_index_type() {
        let document = json!({"index_type": "string_tuple3", "variable_labels": [1]});
        assert_eq!(document_label_kind(&document).unwrap(), LabelKind::StrTuple3);
    }

    #[test]
    fn test_label_kind_inferred_from_first_label() {
        let document = json!({"variable_labels": [[1, 2], [3, 4]]});
        assert_eq!(document_label_kind(&document).unwrap(), LabelKind::IntTuple2);
        let document = json!({"variable_labels": []});
        assert_eq!(document_label_kind(&document).unwrap(), LabelKind::Int);
        let document = json!({"variable_labels": [1.5]});
        assert_eq!(
            document_label_kind(&document).unwrap_err().code(),
            "SCHEMA_INVALID"
        );
    }

    #[test]
    fn test_quadratic_dispatch_round_trip() {
        let model = BinaryQuadraticModel::new(
            [(("a".to_string(), "b".to_string()), 1.0)],
            [],
            0.5,
            Vartype::Binary,
            Backing::Dense,
        )
        .unwrap();
        let document = model.to_serializable().unwrap();
        let any = AnyQuadraticModel::from_serializable(&document).unwrap();
        assert_eq!(any.label_kind(), LabelKind::StrTuple2);
        assert_eq!(any.vartype(), Vartype::Binary);
        assert_eq!(any.num_variables(), 1);
        assert_eq!(any.to_serializable().unwrap(), document);
    }

    #[test]
    fn test_polynomial_dispatch_round_trip() {
        let model = BinaryPolynomialModel::new(
            [(vec![(1_i64, 2_i64, 3_i64, 4_i64), (0, 0, 0, 0)], -1.0)],
            Vartype::Spin,
        );
        let document = model.to_serializable().unwrap();
        let any = AnyPolynomialModel::from_serializable(&document).unwrap();
        assert!(matches!(any, AnyPolynomialModel::IntTuple4(_)));
        assert_eq!(any.num_variables(), 2);
        assert_eq!(any.to_serializable().unwrap(), document);
    }
}
