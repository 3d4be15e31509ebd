//! SPIN/BINARY conversion for polynomial models.

use qmodel_labels::Label;

use super::{BinaryPolynomialModel, Polynomial, Terms, key};
use crate::error::ModelError;
use crate::types::Vartype;

impl<L: Label> BinaryPolynomialModel<L> {
    /// A copy of this model over `target`, with equal energies on
    /// corresponding samples.
    ///
    /// # Errors
    ///
    /// See [`change_vartype_inplace`](Self::change_vartype_inplace).
    pub fn change_vartype(&self, target: Vartype) -> Result<Self, ModelError> {
        let mut model = self.clone();
        model.change_vartype_inplace(target)?;
        Ok(model)
    }

    /// Expand every term into its subset monomials over `target`.
    /// Same vartype is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] if a term has more than
    /// [`MAX_CONVERSION_ARITY`](super::MAX_CONVERSION_ARITY) variables; the
    /// model is left unchanged.
    pub fn change_vartype_inplace(&mut self, target: Vartype) -> Result<(), ModelError> {
        if self.vartype == target {
            return Ok(());
        }
        let mut terms = Terms::new();
        for (positions, bias) in &self.terms {
            for (subset, part) in key::expand(positions, *bias, self.vartype, target)? {
                *terms.entry(subset).or_insert(0.0) += part;
            }
        }
        let source = self.vartype;
        self.vartype = target;
        self.replace_terms(terms);
        tracing::debug!(
            component = "bpm",
            operation = "change_vartype",
            status = "success",
            from = source.as_str(),
            to = target.as_str(),
            interactions = self.num_interactions(),
            "Changed vartype"
        );
        Ok(())
    }

    /// Terms of the BINARY form of this model.
    ///
    /// # Errors
    ///
    /// See [`change_vartype_inplace`](Self::change_vartype_inplace).
    pub fn to_hubo(&self) -> Result<Polynomial<L>, ModelError> {
        Ok(self.change_vartype(Vartype::Binary)?.polynomial())
    }

    /// Terms of the SPIN form of this model.
    ///
    /// # Errors
    ///
    /// See [`change_vartype_inplace`](Self::change_vartype_inplace).
    pub fn to_hising(&self) -> Result<Polynomial<L>, ModelError> {
        Ok(self.change_vartype(Vartype::Spin)?.polynomial())
    }
}
