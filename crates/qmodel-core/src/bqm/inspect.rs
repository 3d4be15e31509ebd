//! Read accessors for quadratic models.

use ndarray::Array2;
use qmodel_labels::Label;

use super::storage::InteractionStore;
use super::{BinaryQuadraticModel, Linear, Quadratic};
use crate::error::ModelError;
use crate::types::{Backing, Vartype};

impl<L: Label> BinaryQuadraticModel<L> {
    /// Get the number of variables
    pub fn num_variables(&self) -> usize {
        self.index.len()
    }

    /// Get the number of nonzero quadratic biases
    pub fn num_interactions(&self) -> usize {
        self.store.num_interactions()
    }

    pub fn vartype(&self) -> Vartype {
        self.vartype
    }

    pub fn backing(&self) -> Backing {
        self.store.backing()
    }

    pub fn offset(&self) -> f64 {
        self.store.offset()
    }

    /// Labels in position order.
    ///
    /// Array-form samples are read in this order.
    pub fn variables(&self) -> &[L] {
        self.index.labels()
    }

    pub fn contains(&self, label: &L) -> bool {
        self.index.contains(label)
    }

    /// Internal position of `label`. Positions change when variables are removed.
    pub fn position_of(&self, label: &L) -> Result<usize, ModelError> {
        self.position(label)
    }

    /// Linear biases of every variable, including zeros.
    pub fn linear(&self) -> Linear<L> {
        self.index
            .iter()
            .map(|(position, label)| (label.clone(), self.store.linear(position)))
            .collect()
    }

    /// Nonzero quadratic biases keyed by `(min label, max label)`.
    pub fn quadratic(&self) -> Quadratic<L> {
        let mut quadratic = Quadratic::new();
        self.store.for_each_quadratic(|u, v, bias| {
            if let (Some(lu), Some(lv)) = (self.index.label_of(u), self.index.label_of(v)) {
                quadratic.insert(Self::pair_key(lu, lv), bias);
            }
        });
        quadratic
    }

    /// Linear bias of one variable.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KeyNotFound`] for an unknown label.
    pub fn linear_bias(&self, label: &L) -> Result<f64, ModelError> {
        let position = self.position(label)?;
        Ok(self.store.linear(position))
    }

    /// Quadratic bias of `(u, v)`; zero when both variables exist but do not
    /// interact.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KeyNotFound`] if either label is unknown.
    pub fn quadratic_bias(&self, u: &L, v: &L) -> Result<f64, ModelError> {
        let pu = self.position(u)?;
        let pv = self.position(v)?;
        if pu == pv {
            return Ok(0.0);
        }
        Ok(self.store.quadratic(pu, pv))
    }

    /// Neighbors of `label` and the biases connecting them.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KeyNotFound`] for an unknown label.
    pub fn adjacency(&self, label: &L) -> Result<Linear<L>, ModelError> {
        let position = self.position(label)?;
        let mut neighbors = Linear::new();
        for (neighbor, bias) in self.store.neighbors(position) {
            neighbors.insert(self.label_at(neighbor)?.clone(), bias);
        }
        Ok(neighbors)
    }

    /// The augmented interaction store.
    pub fn store(&self) -> &InteractionStore {
        &self.store
    }

    /// Dense copy of the augmented `(n+1)x(n+1)` matrix, rows in position order.
    ///
    /// Feeding it back to [`from_dense_matrix`](Self::from_dense_matrix) with
    /// [`variables`](Self::variables) reproduces the model.
    pub fn to_dense_matrix(&self) -> Array2<f64> {
        self.store.to_array()
    }
}
