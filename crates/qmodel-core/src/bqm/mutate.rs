//! In-place mutation of quadratic models.
//!
//! Every method validates its arguments before touching the store, so a
//! failed call leaves the model unchanged.

use std::collections::BTreeSet;

use qmodel_labels::Label;

use super::BinaryQuadraticModel;
use crate::error::ModelError;
use crate::options::{NormalizeOptions, ScaleOptions};
use crate::types::Vartype;

/// Scale options for quadratic models.
pub type QuadraticScaleOptions<L> = ScaleOptions<L, (L, L)>;
/// Normalize options for quadratic models.
pub type QuadraticNormalizeOptions<L> = NormalizeOptions<L, (L, L)>;

impl<L: Label> BinaryQuadraticModel<L> {
    /// Remove a variable and every interaction touching it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KeyNotFound`] for an unknown label.
    pub fn remove_variable(&mut self, label: &L) -> Result<(), ModelError> {
        let position = self.position(label)?;
        self.remove_position(position);
        tracing::debug!(
            component = "bqm",
            operation = "remove_variable",
            status = "success",
            variable = ?label,
            variables = self.num_variables(),
            "Removed variable"
        );
        Ok(())
    }

    /// Remove every listed variable; unknown labels are skipped.
    pub fn remove_variables_from<'a, I>(&mut self, labels: I)
    where
        I: IntoIterator<Item = &'a L>,
        L: 'a,
    {
        let mut removed = 0;
        for label in labels {
            if let Some(position) = self.index.get(label) {
                self.remove_position(position);
                removed += 1;
            }
        }
        tracing::debug!(
            component = "bqm",
            operation = "remove_variables_from",
            status = "success",
            removed,
            variables = self.num_variables(),
            "Removed variables"
        );
    }

    fn remove_position(&mut self, position: usize) {
        self.store.remove_variable(position);
        self.index.remove_at(position);
        self.mark_dirty();
    }

    /// Erase the interaction `(u, v)`. Endpoints stay in the model; missing
    /// interactions are ignored.
    pub fn remove_interaction(&mut self, u: &L, v: &L) {
        let (Some(pu), Some(pv)) = (self.index.get(u), self.index.get(v)) else {
            return;
        };
        if pu == pv {
            return;
        }
        self.store.set_quadratic(pu, pv, 0.0);
        self.mark_dirty();
    }

    pub fn remove_interactions_from<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a (L, L)>,
        L: 'a,
    {
        for (u, v) in keys {
            self.remove_interaction(u, v);
        }
    }

    pub fn add_offset(&mut self, delta: f64) {
        self.store.add_offset(delta);
        self.mark_dirty();
    }

    /// Reset the offset to exactly zero.
    pub fn remove_offset(&mut self) {
        self.store.set_offset(0.0);
        self.mark_dirty();
    }

    /// Multiply biases by `factor`, except those named in `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] if `factor` is zero or not finite.
    pub fn scale(
        &mut self,
        factor: f64,
        options: &QuadraticScaleOptions<L>,
    ) -> Result<(), ModelError> {
        if factor == 0.0 || !factor.is_finite() {
            return Err(ModelError::invalid_argument(format!(
                "scale factor must be finite and nonzero (got {factor})"
            )));
        }
        let (ignored_linear, ignored_pairs) = self.ignored_positions(options);
        let slot = self.store.num_variables();
        let ignored_offset = options.ignored_offset;
        self.store.map_terms(|row, col, bias| {
            let ignored = if row == slot {
                ignored_offset
            } else if col == slot {
                ignored_linear.contains(&row)
            } else {
                ignored_pairs.contains(&(row, col))
            };
            if ignored { bias } else { bias * factor }
        });
        self.mark_dirty();
        tracing::debug!(
            component = "bqm",
            operation = "scale",
            status = "success",
            factor,
            ignored_variables = ignored_linear.len(),
            ignored_interactions = ignored_pairs.len(),
            ignored_offset,
            "Scaled biases"
        );
        Ok(())
    }

    /// Scale so the largest non-ignored bias magnitude equals the widest end
    /// of the target range. Returns the factor applied; a model whose
    /// considered biases are all zero is left alone and `1.0` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] if the target range is `(0, 0)`.
    pub fn normalize(
        &mut self,
        options: &QuadraticNormalizeOptions<L>,
    ) -> Result<f64, ModelError> {
        let (ignored_linear, ignored_pairs) = self.ignored_positions(&options.ignored);
        let slot = self.store.num_variables();
        let mut max_bias: f64 = 0.0;
        self.store.for_each_term(|row, col, bias| {
            let considered = if row == slot {
                false
            } else if col == slot {
                !ignored_linear.contains(&row)
            } else {
                !ignored_pairs.contains(&(row, col))
            };
            if considered {
                max_bias = max_bias.max(bias.abs());
            }
        });
        if max_bias == 0.0 {
            return Ok(1.0);
        }
        let factor = options.bound() / max_bias;
        self.scale(factor, &options.ignored)?;
        Ok(factor)
    }

    fn ignored_positions(
        &self,
        options: &QuadraticScaleOptions<L>,
    ) -> (BTreeSet<usize>, BTreeSet<(usize, usize)>) {
        let linear = options
            .ignored_variables
            .iter()
            .filter_map(|label| self.index.get(label))
            .collect();
        let pairs = options
            .ignored_interactions
            .iter()
            .filter_map(|(u, v)| Some((self.index.get(u)?, self.index.get(v)?)))
            .map(|(pu, pv)| (pu.min(pv), pu.max(pv)))
            .collect();
        (linear, pairs)
    }

    fn check_value(&self, value: i32) -> Result<(), ModelError> {
        if self.vartype.contains(value) {
            Ok(())
        } else {
            Err(ModelError::invalid_argument(format!(
                "{value} is not a {} value",
                self.vartype.as_str()
            )))
        }
    }

    /// Substitute a fixed value for `label` and remove it.
    ///
    /// The linear bias times `value` moves into the offset and each incident
    /// quadratic bias times `value` into the neighbor's linear bias.
    ///
    /// # Errors
    ///
    /// - [`ModelError::KeyNotFound`] for an unknown label.
    /// - [`ModelError::InvalidArgument`] if `value` is outside the vartype's domain.
    pub fn fix_variable(&mut self, label: &L, value: i32) -> Result<(), ModelError> {
        let position = self.position(label)?;
        self.check_value(value)?;
        let value = f64::from(value);
        for (neighbor, bias) in self.store.neighbors(position) {
            self.store.add_linear(neighbor, bias * value);
        }
        let linear = self.store.linear(position);
        self.store.add_offset(linear * value);
        self.store.remove_variable(position);
        self.index.remove(label)?;
        self.mark_dirty();
        tracing::debug!(
            component = "bqm",
            operation = "fix_variable",
            status = "success",
            variable = ?label,
            value,
            "Fixed variable"
        );
        Ok(())
    }

    /// Fix several variables at once.
    ///
    /// # Errors
    ///
    /// Fails without changes if any label is unknown or repeated, or any
    /// value is outside the vartype's domain.
    pub fn fix_variables(&mut self, fixed: &[(L, i32)]) -> Result<(), ModelError> {
        let mut seen = BTreeSet::new();
        for (label, value) in fixed {
            self.position(label)?;
            self.check_value(*value)?;
            if !seen.insert(label) {
                return Err(ModelError::invalid_argument(format!(
                    "variable {label:?} is fixed twice"
                )));
            }
        }
        for (label, value) in fixed {
            self.fix_variable(label, *value)?;
        }
        Ok(())
    }

    /// Negate a variable in its own domain.
    ///
    /// SPIN: `s -> -s` negates the linear bias and every incident quadratic
    /// bias. BINARY: `b -> 1 - b` also moves the old biases into the offset
    /// and the neighbors' linear biases.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KeyNotFound`] for an unknown label.
    pub fn flip_variable(&mut self, label: &L) -> Result<(), ModelError> {
        let position = self.position(label)?;
        let linear = self.store.linear(position);
        self.store.set_linear(position, -linear);
        if self.vartype == Vartype::Binary {
            self.store.add_offset(linear);
        }
        for (neighbor, bias) in self.store.neighbors(position) {
            self.store.set_quadratic(position, neighbor, -bias);
            if self.vartype == Vartype::Binary {
                self.store.add_linear(neighbor, bias);
            }
        }
        self.mark_dirty();
        tracing::debug!(
            component = "bqm",
            operation = "flip_variable",
            status = "success",
            variable = ?label,
            vartype = self.vartype.as_str(),
            "Flipped variable"
        );
        Ok(())
    }

    /// Merge `v` into `u`, assuming the problem forces `u == v`.
    ///
    /// The `(u, v)` bias collapses to the offset (SPIN, `u·u = 1`) or to `u`'s
    /// linear bias (BINARY, `u·u = u`); `v`'s linear bias and every `(v, w)`
    /// bias move onto `u`, then `v` is removed.
    ///
    /// # Errors
    ///
    /// - [`ModelError::KeyNotFound`] if either label is unknown.
    /// - [`ModelError::InvalidArgument`] if `u == v`.
    pub fn contract_variables(&mut self, u: &L, v: &L) -> Result<(), ModelError> {
        let pu = self.position(u)?;
        let pv = self.position(v)?;
        if pu == pv {
            return Err(ModelError::invalid_argument(format!(
                "cannot contract {u:?} with itself"
            )));
        }
        let coupling = self.store.quadratic(pu, pv);
        match self.vartype {
            Vartype::Spin => self.store.add_offset(coupling),
            Vartype::Binary => self.store.add_linear(pu, coupling),
        }
        let linear = self.store.linear(pv);
        self.store.add_linear(pu, linear);
        for (neighbor, bias) in self.store.neighbors(pv) {
            if neighbor != pu {
                self.store.add_quadratic(pu, neighbor, bias);
            }
        }
        self.store.remove_variable(pv);
        self.index.remove(v)?;
        self.mark_dirty();
        tracing::debug!(
            component = "bqm",
            operation = "contract_variables",
            status = "success",
            u = ?u,
            v = ?v,
            "Contracted variables"
        );
        Ok(())
    }
}
