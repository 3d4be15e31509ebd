//! Energy evaluation for quadratic models.

use ndarray::Array1;
use qmodel_labels::Label;

use super::BinaryQuadraticModel;
use super::matrix::InteractionMatrix;
use crate::error::ModelError;
use crate::types::Sample;

impl<L: Label> BinaryQuadraticModel<L> {
    /// Energy of a label-keyed sample. Labels not in the model are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IncompleteAssignment`] if a model variable is
    /// missing from `sample`.
    pub fn energy(&self, sample: &Sample<L>) -> Result<f64, ModelError> {
        let mut values = Array1::zeros(self.num_variables());
        for (position, label) in self.variables().iter().enumerate() {
            let value = sample
                .get(label)
                .ok_or_else(|| ModelError::IncompleteAssignment {
                    missing: format!("{label:?}"),
                })?;
            values[position] = f64::from(*value);
        }
        Ok(self.store.energy(&values))
    }

    /// Energy of a sample given in position order (see [`variables`](Self::variables)).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Shape`] if `sample.len() != num_variables()`.
    pub fn energy_array(&self, sample: &[i32]) -> Result<f64, ModelError> {
        let values = self.check_array(sample)?;
        Ok(self.store.energy(&values))
    }

    /// Energies of several samples, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first sample that [`energy`](Self::energy) rejects.
    pub fn energies(&self, samples: &[Sample<L>]) -> Result<Vec<f64>, ModelError> {
        samples.iter().map(|sample| self.energy(sample)).collect()
    }

    /// Energies of several position-ordered samples, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first sample that [`energy_array`](Self::energy_array) rejects.
    pub fn energies_array(&self, samples: &[Vec<i32>]) -> Result<Vec<f64>, ModelError> {
        samples
            .iter()
            .map(|sample| self.energy_array(sample))
            .collect()
    }

    /// Symmetric interaction matrix `H`, rebuilt only after a mutation.
    pub fn interaction_matrix(&mut self) -> &InteractionMatrix {
        self.cached_matrix()
    }

    /// Energy through the cached interaction matrix:
    /// `offset + (xᵀHx - Σ H_ii x_i²) / 2 + Σ H_ii x_i`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Shape`] if `sample.len() != num_variables()`.
    pub fn matrix_energy(&mut self, sample: &[i32]) -> Result<f64, ModelError> {
        let values = self.check_array(sample)?;
        let offset = self.offset();
        let matrix = self.cached_matrix();
        let diagonal = matrix.diagonal();
        let form = matrix.quadratic_form(&values);
        let squares = (&diagonal * &values).dot(&values);
        let linear = diagonal.dot(&values);
        Ok(offset + (form - squares) / 2.0 + linear)
    }

    fn check_array(&self, sample: &[i32]) -> Result<Array1<f64>, ModelError> {
        if sample.len() != self.num_variables() {
            return Err(ModelError::Shape {
                expected: self.num_variables(),
                found: sample.len(),
            });
        }
        Ok(sample.iter().map(|value| f64::from(*value)).collect())
    }
}
