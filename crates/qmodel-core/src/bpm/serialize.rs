//! JSON document form of polynomial models.
//!
//! `poly_key_list` holds position lists into `variable_labels`; the offset
//! travels in its own field rather than as an empty key.

use qmodel_labels::{Label, LabelIndex};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BinaryPolynomialModel, Terms, key};
use crate::document::{check_index_type, decode_labels, parse_vartype};
use crate::error::ModelError;

/// `type` tag of a serialized polynomial model.
pub const POLYNOMIAL_MODEL_TYPE: &str = "BinaryPolynomialModel";
/// Current polynomial document schema.
pub const POLYNOMIAL_SCHEMA: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize)]
struct SchemaVersion {
    bpm_schema: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct PolynomialDocument {
    #[serde(rename = "type")]
    model_type: String,
    version: SchemaVersion,
    index_type: String,
    variable_labels: Vec<Value>,
    poly_key_list: Vec<Vec<usize>>,
    poly_value_list: Vec<f64>,
    offset: f64,
    variable_type: String,
}

impl<L: Label> BinaryPolynomialModel<L> {
    /// Encode as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Schema`] if the document cannot be encoded.
    pub fn to_serializable(&self) -> Result<Value, ModelError> {
        let (poly_key_list, poly_value_list): (Vec<Vec<usize>>, Vec<f64>) = self
            .terms
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, bias)| (key.clone(), *bias))
            .unzip();
        let document = PolynomialDocument {
            model_type: POLYNOMIAL_MODEL_TYPE.to_string(),
            version: SchemaVersion {
                bpm_schema: POLYNOMIAL_SCHEMA.to_string(),
            },
            index_type: L::KIND.as_str().to_string(),
            variable_labels: self.variables().iter().map(Label::to_json).collect(),
            poly_key_list,
            poly_value_list,
            offset: self.offset(),
            variable_type: self.vartype.as_str().to_string(),
        };
        let value = serde_json::to_value(document)
            .map_err(|err| ModelError::schema(err.to_string()))?;
        tracing::debug!(
            component = "bpm",
            operation = "to_serializable",
            status = "success",
            variables = self.num_variables(),
            interactions = self.num_interactions(),
            "Serialized polynomial model"
        );
        Ok(value)
    }

    /// Decode a document written by [`to_serializable`](Self::to_serializable).
    ///
    /// Keys are reduced and accumulated, so an empty key adds to the offset.
    ///
    /// # Errors
    ///
    /// - [`ModelError::Schema`] for an unknown `type`, schema or
    ///   `variable_type`, or malformed lists.
    /// - [`ModelError::LabelTypeMismatch`] if a label or the `index_type` tag
    ///   does not match `L`.
    pub fn from_serializable(value: &Value) -> Result<Self, ModelError> {
        let document: PolynomialDocument = serde_json::from_value(value.clone())
            .map_err(|err| ModelError::schema(err.to_string()))?;
        if document.model_type != POLYNOMIAL_MODEL_TYPE {
            return Err(ModelError::schema(format!(
                "expected type {POLYNOMIAL_MODEL_TYPE:?}, found {:?}",
                document.model_type
            )));
        }
        if document.version.bpm_schema != POLYNOMIAL_SCHEMA {
            return Err(ModelError::schema(format!(
                "unsupported bpm_schema {:?}",
                document.version.bpm_schema
            )));
        }
        let vartype = parse_vartype(&document.variable_type)?;
        check_index_type::<L>(Some(&document.index_type))?;
        let labels = decode_labels::<L>(&document.variable_labels)?;
        if document.poly_key_list.len() != document.poly_value_list.len() {
            return Err(ModelError::schema(format!(
                "{} keys but {} values",
                document.poly_key_list.len(),
                document.poly_value_list.len()
            )));
        }

        let n = labels.len();
        let mut terms = Terms::new();
        for (positions, bias) in document.poly_key_list.iter().zip(&document.poly_value_list) {
            if let Some(position) = positions.iter().find(|position| **position >= n) {
                return Err(ModelError::schema(format!(
                    "key position {position} out of range for {n} variables"
                )));
            }
            *terms.entry(key::reduce(positions, vartype)).or_insert(0.0) += bias;
        }
        *terms.entry(Vec::new()).or_insert(0.0) += document.offset;

        let index: LabelIndex<L> = labels.into_iter().collect();
        let model = Self::from_parts(index, terms, vartype);
        tracing::debug!(
            component = "bpm",
            operation = "from_serializable",
            status = "success",
            variables = model.num_variables(),
            interactions = model.num_interactions(),
            "Deserialized polynomial model"
        );
        Ok(model)
    }
}
