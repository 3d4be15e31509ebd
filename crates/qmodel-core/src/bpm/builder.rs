//! Methods for adding terms to polynomial models.

use qmodel_labels::Label;

use super::{BinaryPolynomialModel, key};
use crate::error::ModelError;
use crate::types::Vartype;

impl<L: Label> BinaryPolynomialModel<L> {
    /// Add `bias` to the term `key`, creating variables as needed.
    ///
    /// The key is reduced first, so adding `v` at `[a, a, b]` and `-v` at
    /// `[b]` on a SPIN model cancels. A term that sums to exactly zero is
    /// erased, together with any variable left without terms.
    pub fn add_interaction(&mut self, key: &[L], bias: f64) {
        if bias == 0.0 {
            return;
        }
        let positions = self.intern_key(key);
        let arity = positions.len();
        self.add_term(positions, bias);
        self.prune();
        tracing::debug!(
            component = "bpm",
            operation = "add_interaction",
            status = "success",
            arity,
            bias,
            "Added polynomial term"
        );
    }

    /// Add a term expressed in `vartype`, expanding it into the model's
    /// vartype.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] if the reduced key is too wide
    /// to convert; nothing is added.
    pub fn add_interaction_as(
        &mut self,
        key: &[L],
        bias: f64,
        vartype: Vartype,
    ) -> Result<(), ModelError> {
        let reduced = key::reduce(key, vartype);
        for (subset, part) in key::expand(&reduced, bias, vartype, self.vartype)? {
            let positions = self.intern_key(&subset);
            self.add_term(positions, part);
        }
        self.prune();
        Ok(())
    }

    /// Add `bias` to the linear term of `label`.
    pub fn add_variable(&mut self, label: &L, bias: f64) {
        self.add_interaction(std::slice::from_ref(label), bias);
    }

    /// Add many terms.
    pub fn add_interactions_from<I>(&mut self, polynomial: I)
    where
        I: IntoIterator<Item = (Vec<L>, f64)>,
    {
        for (key, bias) in polynomial {
            self.add_interaction(&key, bias);
        }
    }

    /// Merge `other` into this model, converting it to this model's vartype.
    ///
    /// # Errors
    ///
    /// Fails as [`change_vartype`](Self::change_vartype) does; this model is
    /// left unchanged.
    pub fn update(&mut self, other: &BinaryPolynomialModel<L>) -> Result<(), ModelError> {
        for (key, bias) in other.change_vartype(self.vartype)?.polynomial() {
            let positions = self.intern_key(&key);
            self.add_term(positions, bias);
        }
        self.prune();
        Ok(())
    }
}
