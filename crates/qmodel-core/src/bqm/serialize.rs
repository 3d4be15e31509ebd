//! JSON document form of quadratic models.
//!
//! Labels are written in position order, so `quadratic_head` and
//! `quadratic_tail` index into `variable_labels`. The schema version records
//! the backing: [`SPARSE_SCHEMA`] or [`DENSE_SCHEMA`].

use qmodel_labels::{Label, LabelIndex};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BinaryQuadraticModel;
use super::storage::InteractionStore;
use crate::document::{check_index_type, decode_labels, parse_vartype};
use crate::error::ModelError;
use crate::types::Backing;

/// `type` tag of a serialized quadratic model.
pub const QUADRATIC_MODEL_TYPE: &str = "BinaryQuadraticModel";
/// Schema version of a sparse-backed model.
pub const SPARSE_SCHEMA: &str = "3.0.0";
/// Schema version of a dense-backed model.
pub const DENSE_SCHEMA: &str = "3.0.0-dense";

#[derive(Debug, Serialize, Deserialize)]
struct SchemaVersion {
    bqm_schema: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct QuadraticDocument {
    #[serde(rename = "type")]
    model_type: String,
    version: SchemaVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index_type: Option<String>,
    variable_labels: Vec<Value>,
    linear_biases: Vec<f64>,
    quadratic_head: Vec<usize>,
    quadratic_tail: Vec<usize>,
    quadratic_biases: Vec<f64>,
    offset: f64,
    variable_type: String,
    num_variables: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_interactions: Option<usize>,
}

/// Schema version string for `backing`.
fn schema_for(backing: Backing) -> &'static str {
    match backing {
        Backing::Dense => DENSE_SCHEMA,
        Backing::Sparse => SPARSE_SCHEMA,
    }
}

fn backing_for(schema: &str) -> Result<Backing, ModelError> {
    match schema {
        DENSE_SCHEMA => Ok(Backing::Dense),
        SPARSE_SCHEMA => Ok(Backing::Sparse),
        other => Err(ModelError::schema(format!(
            "unsupported bqm_schema {other:?}"
        ))),
    }
}

impl<L: Label> BinaryQuadraticModel<L> {
    /// Encode as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Schema`] if the document cannot be encoded.
    pub fn to_serializable(&self) -> Result<Value, ModelError> {
        let slot = self.store.num_variables();
        let mut linear_biases = vec![0.0; slot];
        let mut quadratic_head = Vec::new();
        let mut quadratic_tail = Vec::new();
        let mut quadratic_biases = Vec::new();
        self.store.for_each_term(|row, col, bias| {
            if row == slot {
                return;
            }
            if col == slot {
                linear_biases[row] = bias;
            } else {
                quadratic_head.push(row);
                quadratic_tail.push(col);
                quadratic_biases.push(bias);
            }
        });

        let document = QuadraticDocument {
            model_type: QUADRATIC_MODEL_TYPE.to_string(),
            version: SchemaVersion {
                bqm_schema: schema_for(self.backing()).to_string(),
            },
            index_type: Some(L::KIND.as_str().to_string()),
            variable_labels: self.variables().iter().map(Label::to_json).collect(),
            linear_biases,
            num_interactions: Some(quadratic_biases.len()),
            quadratic_head,
            quadratic_tail,
            quadratic_biases,
            offset: self.offset(),
            variable_type: self.vartype.as_str().to_string(),
            num_variables: slot,
        };
        let value = serde_json::to_value(document)
            .map_err(|err| ModelError::schema(err.to_string()))?;
        tracing::debug!(
            component = "bqm",
            operation = "to_serializable",
            status = "success",
            variables = self.num_variables(),
            interactions = self.num_interactions(),
            "Serialized quadratic model"
        );
        Ok(value)
    }

    /// Decode a document written by [`to_serializable`](Self::to_serializable).
    ///
    /// Positions and backing are restored exactly.
    ///
    /// # Errors
    ///
    /// - [`ModelError::Schema`] for an unknown `type`, schema or
    ///   `variable_type`, or malformed arrays.
    /// - [`ModelError::LabelTypeMismatch`] if a label or the `index_type` tag
    ///   does not match `L`.
    pub fn from_serializable(value: &Value) -> Result<Self, ModelError> {
        let document: QuadraticDocument = serde_json::from_value(value.clone())
            .map_err(|err| ModelError::schema(err.to_string()))?;
        if document.model_type != QUADRATIC_MODEL_TYPE {
            return Err(ModelError::schema(format!(
                "expected type {QUADRATIC_MODEL_TYPE:?}, found {:?}",
                document.model_type
            )));
        }
        let backing = backing_for(&document.version.bqm_schema)?;
        let vartype = parse_vartype(&document.variable_type)?;
        check_index_type::<L>(document.index_type.as_deref())?;
        let labels = decode_labels::<L>(&document.variable_labels)?;

        let n = labels.len();
        if document.num_variables != n || document.linear_biases.len() != n {
            return Err(ModelError::schema(format!(
                "{} labels, {} linear biases, num_variables {}",
                n,
                document.linear_biases.len(),
                document.num_variables
            )));
        }
        let m = document.quadratic_biases.len();
        if document.quadratic_head.len() != m || document.quadratic_tail.len() != m {
            return Err(ModelError::schema(
                "quadratic_head, quadratic_tail and quadratic_biases differ in length",
            ));
        }
        if let Some(count) = document.num_interactions.filter(|count| *count != m) {
            return Err(ModelError::schema(format!(
                "num_interactions {count} but {m} quadratic biases"
            )));
        }
        let pairs = document.quadratic_head.iter().zip(&document.quadratic_tail);
        for (head, tail) in pairs.clone() {
            if *head >= n || *tail >= n || head == tail {
                return Err(ModelError::schema(format!(
                    "invalid interaction ({head}, {tail}) for {n} variables"
                )));
            }
        }

        let quadratic = pairs
            .zip(&document.quadratic_biases)
            .map(|((head, tail), bias)| (*head, *tail, *bias));
        let store = InteractionStore::from_terms(
            n,
            backing,
            document.linear_biases.iter().copied().enumerate(),
            quadratic,
            document.offset,
        );
        let index: LabelIndex<L> = labels.into_iter().collect();
        let model = Self::from_parts(index, store, vartype);
        tracing::debug!(
            component = "bqm",
            operation = "from_serializable",
            status = "success",
            backing = backing.as_str(),
            variables = model.num_variables(),
            interactions = model.num_interactions(),
            "Deserialized quadratic model"
        );
        Ok(model)
    }
}
