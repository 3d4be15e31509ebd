//! Factory constructors for polynomial models.

use qmodel_labels::Label;

use super::BinaryPolynomialModel;
use crate::error::ModelError;
use crate::types::Vartype;

impl<L: Label> BinaryPolynomialModel<L> {
    /// Build a BINARY model from a higher-order unconstrained binary objective.
    pub fn from_hubo<P>(polynomial: P) -> Self
    where
        P: IntoIterator<Item = (Vec<L>, f64)>,
    {
        Self::new(polynomial, Vartype::Binary)
    }

    /// Build a SPIN model from a higher-order Ising objective.
    pub fn from_hising<P>(polynomial: P) -> Self
    where
        P: IntoIterator<Item = (Vec<L>, f64)>,
    {
        Self::new(polynomial, Vartype::Spin)
    }

    /// Build from parallel key and value lists.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] if the lists differ in length.
    pub fn from_key_value_lists(
        keys: Vec<Vec<L>>,
        values: Vec<f64>,
        vartype: Vartype,
    ) -> Result<Self, ModelError> {
        if keys.len() != values.len() {
            return Err(ModelError::invalid_argument(format!(
                "{} keys but {} values",
                keys.len(),
                values.len()
            )));
        }
        Ok(Self::new(keys.into_iter().zip(values), vartype))
    }
}
