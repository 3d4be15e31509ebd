//! Helpers for turning raw solver output into labelled samples.

use qmodel_labels::Label;

use crate::bpm::BinaryPolynomialModel;
use crate::bqm::BinaryQuadraticModel;
use crate::error::ModelError;
use crate::types::{Sample, Vartype};

/// A model that can score labelled samples.
pub trait EnergyModel<L: Label> {
    fn vartype(&self) -> Vartype;

    /// Labels in position order.
    fn variables(&self) -> &[L];

    fn energy(&self, sample: &Sample<L>) -> Result<f64, ModelError>;
}

impl<L: Label> EnergyModel<L> for BinaryQuadraticModel<L> {
    fn vartype(&self) -> Vartype {
        BinaryQuadraticModel::vartype(self)
    }

    fn variables(&self) -> &[L] {
        BinaryQuadraticModel::variables(self)
    }

    fn energy(&self, sample: &Sample<L>) -> Result<f64, ModelError> {
        BinaryQuadraticModel::energy(self, sample)
    }
}

impl<L: Label> EnergyModel<L> for BinaryPolynomialModel<L> {
    fn vartype(&self) -> Vartype {
        BinaryPolynomialModel::vartype(self)
    }

    fn variables(&self) -> &[L] {
        BinaryPolynomialModel::variables(self)
    }

    fn energy(&self, sample: &Sample<L>) -> Result<f64, ModelError> {
        BinaryPolynomialModel::energy(self, sample)
    }
}

/// Label a raw solver state and score it.
///
/// `raw_state[i]` is assigned to `variables[i]`, or to the model's `i`-th
/// variable when `variables` is empty. Solvers that report the other domain
/// are accepted: `0` reads as `-1` for SPIN models and `-1` as `0` for
/// BINARY models. Returns the sample and its energy plus `offset`.
///
/// # Errors
///
/// - [`ModelError::Shape`] if `raw_state` or a non-empty `variables` is
///   shorter than the model.
/// - [`ModelError::InvalidArgument`] for a value outside both domains.
/// - [`ModelError::IncompleteAssignment`] if `variables` misses a model
///   variable.
pub fn state_and_energy<L, M>(
    model: &M,
    raw_state: &[i32],
    offset: f64,
    variables: &[L],
) -> Result<(Sample<L>, f64), ModelError>
where
    L: Label,
    M: EnergyModel<L>,
{
    let variables = if variables.is_empty() {
        model.variables()
    } else {
        variables
    };
    let n = model.variables().len();
    for len in [raw_state.len(), variables.len()] {
        if len < n {
            return Err(ModelError::Shape {
                expected: n,
                found: len,
            });
        }
    }

    let vartype = model.vartype();
    let mut sample = Sample::new();
    for (label, raw) in variables.iter().zip(raw_state).take(n) {
        let value = match (vartype, *raw) {
            (Vartype::Spin, 0) => -1,
            (Vartype::Binary, -1) => 0,
            (_, value) => value,
        };
        if !vartype.contains(value) {
            return Err(ModelError::invalid_argument(format!(
                "{raw} is neither a SPIN nor a BINARY value"
            )));
        }
        sample.insert(label.clone(), value);
    }
    let energy = model.energy(&sample)? + offset;
    tracing::debug!(
        component = "utils",
        operation = "state_and_energy",
        status = "success",
        vartype = vartype.as_str(),
        variables = n,
        energy,
        "Scored raw state"
    );
    Ok((sample, energy))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::state_and_energy;
    use crate::bpm::BinaryPolynomialModel;
    use crate::bqm::BinaryQuadraticModel;
    use crate::error::ModelError;
    use crate::types::{Backing, Sample, Vartype};

    fn names(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    fn polynomial(vartype: Vartype) -> BinaryPolynomialModel<String> {
        let terms = [
            (names(&["a"]), 1.0),
            (names(&["c"]), 3.0),
            (names(&["a", "b"]), 12.0),
            (names(&["a", "c"]), 13.0),
            (names(&["b", "c", "d"]), 234.0),
            (names(&["c", "e"]), 35.0),
        ];
        BinaryPolynomialModel::new(terms, vartype)
    }

    fn expected(values: [i32; 5]) -> Sample<String> {
        names(&["a", "b", "c", "d", "e"])
            .into_iter()
            .zip(values)
            .collect()
    }

    #[test]
    fn test_spin_model_accepts_either_domain() {
        let model = polynomial(Vartype::Spin);
        let (state, energy) = state_and_energy(&model, &[1, -1, 1, -1, 1], 0.0, &[]).unwrap();
        assert_eq!(state, expected([1, -1, 1, -1, 1]));
        assert_eq!(energy, 274.0);

        let (state, energy) = state_and_energy(&model, &[1, 0, 1, 0, 1], 20.0, &[]).unwrap();
        assert_eq!(state, expected([1, -1, 1, -1, 1]));
        assert_eq!(energy, 294.0);
    }

    #[test]
    fn test_binary_model_accepts_either_domain() {
        let model = polynomial(Vartype::Binary);
        let (state, energy) = state_and_energy(&model, &[1, 0, 1, 0, 1], 0.0, &[]).unwrap();
        assert_eq!(state, expected([1, 0, 1, 0, 1]));
        assert_eq!(energy, 52.0);

        let (_, energy) = state_and_energy(&model, &[1, -1, 1, -1, 1], 30.0, &[]).unwrap();
        assert_eq!(energy, 82.0);
    }

    #[test]
    fn test_explicit_variable_order() {
        let model = BinaryQuadraticModel::new(
            [(0_i64, 1.0), (1, -2.0)],
            [((0, 1), -1.0)],
            0.0,
            Vartype::Spin,
            Backing::Sparse,
        )
        .unwrap();
        let (state, energy) = state_and_energy(&model, &[-1, 1], 0.0, &[1, 0]).unwrap();
        assert_eq!(state, Sample::from([(0, 1), (1, -1)]));
        assert_eq!(energy, 4.0);
    }

    #[test]
    fn test_rejects_short_or_foreign_states() {
        let model = polynomial(Vartype::Spin);
        assert_eq!(
            state_and_energy(&model, &[1, 1], 0.0, &[]).unwrap_err(),
            ModelError::Shape {
                expected: 5,
                found: 2
            }
        );
        let err = state_and_energy(&model, &[1, 1, 2, 1, 1], 0.0, &[]).unwrap_err();
        assert_eq!(err.code(), "ARGUMENT_INVALID");
        let err = state_and_energy(&model, &[1; 5], 0.0, &names(&["a", "b", "c", "d", "z"]))
            .unwrap_err();
        assert_eq!(err.code(), "SAMPLE_INCOMPLETE");
    }
}
