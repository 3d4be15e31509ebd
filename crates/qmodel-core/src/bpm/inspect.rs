//! Read accessors for polynomial models.

use qmodel_labels::Label;

use super::{BinaryPolynomialModel, OFFSET_KEY, Polynomial};
use crate::error::ModelError;
use crate::types::Vartype;

impl<L: Label> BinaryPolynomialModel<L> {
    pub fn num_variables(&self) -> usize {
        self.index.len()
    }

    /// Number of stored terms other than the offset.
    pub fn num_interactions(&self) -> usize {
        self.terms.len() - usize::from(self.terms.contains_key(OFFSET_KEY))
    }

    pub fn vartype(&self) -> Vartype {
        self.vartype
    }

    pub fn offset(&self) -> f64 {
        self.terms.get(OFFSET_KEY).copied().unwrap_or(0.0)
    }

    /// Labels in position order.
    pub fn variables(&self) -> &[L] {
        self.index.labels()
    }

    pub fn has_variable(&self, label: &L) -> bool {
        self.index.contains(label)
    }

    /// Internal position of `label`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KeyNotFound`] for an unknown label.
    pub fn position_of(&self, label: &L) -> Result<usize, ModelError> {
        Ok(self.index.position_of(label)?)
    }

    /// Largest arity among stored terms; `0` for a model with no variables.
    pub fn degree(&self) -> usize {
        self.terms.keys().map(Vec::len).max().unwrap_or(0)
    }

    /// All terms keyed by sorted label tuple, the offset under the empty key.
    pub fn polynomial(&self) -> Polynomial<L> {
        self.terms
            .iter()
            .map(|(key, bias)| (self.labels_of(key), *bias))
            .collect()
    }

    /// Bias of the term `key` after reduction; zero when no such term is
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KeyNotFound`] if a label that survives reduction
    /// is not in the model.
    pub fn polynomial_bias(&self, key: &[L]) -> Result<f64, ModelError> {
        let positions = match self.lookup_key(key) {
            Some(positions) => positions,
            None => {
                let missing = key
                    .iter()
                    .find(|label| !self.index.contains(label))
                    .map(|label| format!("{label:?}"))
                    .unwrap_or_default();
                return Err(ModelError::KeyNotFound { key: missing });
            }
        };
        Ok(self.terms.get(&positions).copied().unwrap_or(0.0))
    }

    /// Parallel key and bias lists, in stored order.
    pub fn key_value_lists(&self) -> (Vec<Vec<L>>, Vec<f64>) {
        self.terms
            .iter()
            .map(|(key, bias)| (self.labels_of(key), *bias))
            .unzip()
    }

    /// Labels of a position key, sorted by label.
    pub(crate) fn labels_of(&self, key: &[usize]) -> Vec<L> {
        let mut labels: Vec<L> = key
            .iter()
            .filter_map(|position| self.index.label_of(*position).cloned())
            .collect();
        labels.sort();
        labels
    }
}
