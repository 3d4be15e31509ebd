//! Energy evaluation for polynomial models.

use qmodel_labels::Label;

use super::BinaryPolynomialModel;
use crate::error::ModelError;
use crate::types::Sample;

impl<L: Label> BinaryPolynomialModel<L> {
    /// Energy of a label-keyed sample. Labels not in the model are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IncompleteAssignment`] if a model variable is
    /// missing from `sample`.
    pub fn energy(&self, sample: &Sample<L>) -> Result<f64, ModelError> {
        let mut values = Vec::with_capacity(self.num_variables());
        for label in self.variables() {
            let value = sample
                .get(label)
                .ok_or_else(|| ModelError::IncompleteAssignment {
                    missing: format!("{label:?}"),
                })?;
            values.push(f64::from(*value));
        }
        Ok(self.energy_of(&values))
    }

    /// Energy of a sample given in position order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Shape`] if `sample.len() != num_variables()`.
    pub fn energy_array(&self, sample: &[i32]) -> Result<f64, ModelError> {
        if sample.len() != self.num_variables() {
            return Err(ModelError::Shape {
                expected: self.num_variables(),
                found: sample.len(),
            });
        }
        let values: Vec<f64> = sample.iter().map(|value| f64::from(*value)).collect();
        Ok(self.energy_of(&values))
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

    fn energy_of(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(key, bias)| key.iter().fold(*bias, |product, position| product * values[*position]))
            .sum()
    }
}
