//! Helpers shared by the JSON document readers.

use std::collections::HashSet;

use qmodel_labels::{Label, LabelKind};
use serde_json::Value;

use crate::error::ModelError;
use crate::types::Vartype;

/// Read the `index_type` tag, if present, and check it against `L`.
pub(crate) fn check_index_type<L: Label>(tag: Option<&str>) -> Result<(), ModelError> {
    let Some(tag) = tag else {
        return Ok(());
    };
    let kind = LabelKind::parse(tag)
        .ok_or_else(|| ModelError::schema(format!("unknown index_type {tag:?}")))?;
    if kind != L::KIND {
        return Err(ModelError::LabelTypeMismatch {
            expected: L::KIND,
            found: kind.as_str().to_string(),
        });
    }
    Ok(())
}

/// Decode labels and reject duplicates.
pub(crate) fn decode_labels<L: Label>(raw: &[Value]) -> Result<Vec<L>, ModelError> {
    let labels = raw
        .iter()
        .map(L::decode)
        .collect::<Result<Vec<L>, _>>()?;
    let mut seen = HashSet::with_capacity(labels.len());
    if let Some(repeated) = labels.iter().find(|label| !seen.insert(*label)) {
        return Err(ModelError::schema(format!(
            "variable label {repeated:?} appears twice"
        )));
    }
    Ok(labels)
}

pub(crate) fn parse_vartype(name: &str) -> Result<Vartype, ModelError> {
    Vartype::parse(name)
        .ok_or_else(|| ModelError::schema(format!("unknown variable_type {name:?}")))
}
