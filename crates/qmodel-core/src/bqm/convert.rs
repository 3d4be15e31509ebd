//! SPIN/BINARY conversion for quadratic models.

use qmodel_labels::Label;

use super::{BinaryQuadraticModel, Linear, Quadratic};
use crate::types::Vartype;

impl<L: Label> BinaryQuadraticModel<L> {
    /// A copy of this model over `target`, with equal energies on
    /// corresponding samples.
    pub fn change_vartype(&self, target: Vartype) -> Self {
        let mut model = self.clone();
        model.change_vartype_inplace(target);
        model
    }

    /// Rewrite the biases for `target` in place. Same vartype is a no-op.
    pub fn change_vartype_inplace(&mut self, target: Vartype) {
        if self.vartype == target {
            return;
        }
        let mut linear_shift = vec![0.0; self.store.num_variables()];
        let mut quadratic_sum = 0.0;
        self.store.for_each_quadratic(|u, v, bias| {
            linear_shift[u] += bias;
            linear_shift[v] += bias;
            quadratic_sum += bias;
        });
        let mut linear_sum = 0.0;
        self.store.for_each_linear(|_, bias| linear_sum += bias);

        let slot = self.store.num_variables();
        match target {
            Vartype::Spin => {
                // b = (s + 1) / 2
                self.store.map_terms(|row, col, bias| {
                    if row == slot || col == slot {
                        bias
                    } else {
                        bias / 4.0
                    }
                });
                for (position, shift) in linear_shift.iter().enumerate() {
                    let linear = self.store.linear(position);
                    self.store.set_linear(position, linear / 2.0 + shift / 4.0);
                }
                self.store.add_offset(linear_sum / 2.0 + quadratic_sum / 4.0);
            }
            Vartype::Binary => {
                // s = 2b - 1
                self.store.map_terms(|row, col, bias| {
                    if row == slot || col == slot {
                        bias
                    } else {
                        bias * 4.0
                    }
                });
                for (position, shift) in linear_shift.iter().enumerate() {
                    let linear = self.store.linear(position);
                    self.store.set_linear(position, 2.0 * linear - 2.0 * shift);
                }
                self.store.add_offset(quadratic_sum - linear_sum);
            }
        }
        let source = self.vartype;
        self.vartype = target;
        self.mark_dirty();
        tracing::debug!(
            component = "bqm",
            operation = "change_vartype",
            status = "success",
            from = source.as_str(),
            to = target.as_str(),
            variables = self.num_variables(),
            "Changed vartype"
        );
    }

    /// QUBO form of this model: linear biases on the diagonal, plus the offset.
    pub fn to_qubo(&self) -> (Quadratic<L>, f64) {
        let model = self.change_vartype(Vartype::Binary);
        let mut qubo = model.quadratic();
        for (label, bias) in model.linear() {
            qubo.insert((label.clone(), label), bias);
        }
        (qubo, model.offset())
    }

    /// Ising form of this model as `(h, J, offset)`.
    pub fn to_ising(&self) -> (Linear<L>, Quadratic<L>, f64) {
        let model = self.change_vartype(Vartype::Spin);
        (model.linear(), model.quadratic(), model.offset())
    }
}
