//! In-place mutation of polynomial models.
//!
//! Fixing, flipping and contraction substitute into every term that
//! mentions the variable and re-reduce the resulting keys.

use std::collections::BTreeSet;

use qmodel_labels::Label;

use super::{BinaryPolynomialModel, OFFSET_KEY, key};
use crate::error::ModelError;
use crate::options::{NormalizeOptions, ScaleOptions};
use crate::types::Vartype;

/// Scale options for polynomial models.
pub type PolynomialScaleOptions<L> = ScaleOptions<L, Vec<L>>;
/// Normalize options for polynomial models.
pub type PolynomialNormalizeOptions<L> = NormalizeOptions<L, Vec<L>>;

impl<L: Label> BinaryPolynomialModel<L> {
    /// Remove a variable and every term that mentions it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KeyNotFound`] for an unknown label.
    pub fn remove_variable(&mut self, label: &L) -> Result<(), ModelError> {
        let position = self.index.position_of(label)?;
        let removed = self.remove_position(position);
        tracing::debug!(
            component = "bpm",
            operation = "remove_variable",
            status = "success",
            variable = ?label,
            terms = removed,
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
        for label in labels {
            if let Some(position) = self.index.get(label) {
                self.remove_position(position);
            }
        }
    }

    // Drops every term on `position`; returns how many were dropped.
    fn remove_position(&mut self, position: usize) -> usize {
        let keys = self.keys_with(position);
        for key in &keys {
            self.take_term(key);
        }
        self.prune();
        keys.len()
    }

    /// Erase the term `key` after reduction. Missing terms are ignored.
    pub fn remove_interaction(&mut self, key: &[L]) {
        let Some(positions) = self.lookup_key(key) else {
            return;
        };
        if self.take_term(&positions).is_some() {
            self.prune();
        }
    }

    pub fn remove_interactions_from<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a Vec<L>>,
        L: 'a,
    {
        for key in keys {
            self.remove_interaction(key);
        }
    }

    pub fn add_offset(&mut self, delta: f64) {
        self.add_term(Vec::new(), delta);
    }

    pub fn remove_offset(&mut self) {
        self.take_term(OFFSET_KEY);
    }

    /// Multiply biases by `factor`, except those named in `options`.
    ///
    /// Ignored variables protect their linear term; ignored interactions are
    /// reduced like any other key.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] if `factor` is zero or not finite.
    pub fn scale(
        &mut self,
        factor: f64,
        options: &PolynomialScaleOptions<L>,
    ) -> Result<(), ModelError> {
        if factor == 0.0 || !factor.is_finite() {
            return Err(ModelError::invalid_argument(format!(
                "scale factor must be finite and nonzero (got {factor})"
            )));
        }
        let ignored = self.ignored_keys(options);
        for (key, bias) in self.terms.iter_mut() {
            if !ignored.contains(key) {
                *bias *= factor;
            }
        }
        tracing::debug!(
            component = "bpm",
            operation = "scale",
            status = "success",
            factor,
            ignored = ignored.len(),
            "Scaled biases"
        );
        Ok(())
    }

    /// Scale so the largest non-ignored, non-offset bias magnitude equals the
    /// widest end of the target range. Returns the factor applied; `1.0` when
    /// every considered bias is zero.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] if the target range is `(0, 0)`.
    pub fn normalize(
        &mut self,
        options: &PolynomialNormalizeOptions<L>,
    ) -> Result<f64, ModelError> {
        let ignored = self.ignored_keys(&options.ignored);
        let max_bias = self
            .terms
            .iter()
            .filter(|(key, _)| !key.is_empty() && !ignored.contains(*key))
            .map(|(_, bias)| bias.abs())
            .fold(0.0, f64::max);
        if max_bias == 0.0 {
            return Ok(1.0);
        }
        let factor = options.bound() / max_bias;
        self.scale(factor, &options.ignored)?;
        Ok(factor)
    }

    fn ignored_keys(&self, options: &PolynomialScaleOptions<L>) -> BTreeSet<Vec<usize>> {
        let mut ignored: BTreeSet<Vec<usize>> = options
            .ignored_variables
            .iter()
            .filter_map(|label| self.index.get(label))
            .map(|position| vec![position])
            .collect();
        ignored.extend(
            options
                .ignored_interactions
                .iter()
                .filter_map(|key| self.lookup_key(key)),
        );
        if options.ignored_offset {
            ignored.insert(Vec::new());
        }
        ignored
    }

    /// Substitute a fixed value for `label`: every term `S` containing it
    /// moves `bias · value` onto `S \ {label}`.
    ///
    /// Variables whose only terms vanish (BINARY `value = 0`) leave the model.
    ///
    /// # Errors
    ///
    /// - [`ModelError::KeyNotFound`] for an unknown label.
    /// - [`ModelError::InvalidArgument`] if `value` is outside the vartype's domain.
    pub fn fix_variable(&mut self, label: &L, value: i32) -> Result<(), ModelError> {
        let position = self.index.position_of(label)?;
        self.check_value(value)?;
        let value = f64::from(value);
        for key in self.keys_with(position) {
            let Some(bias) = self.take_term(&key) else {
                continue;
            };
            let rest: Vec<usize> = key.into_iter().filter(|p| *p != position).collect();
            self.add_term(rest, bias * value);
        }
        self.prune();
        tracing::debug!(
            component = "bpm",
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
            self.index.position_of(label)?;
            self.check_value(*value)?;
            if !seen.insert(label) {
                return Err(ModelError::invalid_argument(format!(
                    "variable {label:?} is fixed twice"
                )));
            }
        }
        for (label, value) in fixed {
            // An earlier fix may already have dropped this variable.
            if self.has_variable(label) {
                self.fix_variable(label, *value)?;
            }
        }
        Ok(())
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

    /// Negate a variable in its own domain.
    ///
    /// SPIN negates every term containing it. BINARY (`b -> 1 - b`) negates
    /// each such term `S` and adds its old bias to `S \ {label}`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::KeyNotFound`] for an unknown label.
    pub fn flip_variable(&mut self, label: &L) -> Result<(), ModelError> {
        let position = self.index.position_of(label)?;
        for key in self.keys_with(position) {
            let Some(bias) = self.terms.get(&key).copied() else {
                continue;
            };
            if self.vartype == Vartype::Binary {
                let rest: Vec<usize> = key.iter().copied().filter(|p| *p != position).collect();
                self.add_term(rest, bias);
            }
            if let Some(stored) = self.terms.get_mut(&key) {
                *stored = -*stored;
            }
        }
        self.prune();
        tracing::debug!(
            component = "bpm",
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
    /// Each term `S` containing `v` moves to the reduction of
    /// `S \ {v} ∪ {u}`, so a term holding both collapses by the vartype's
    /// idempotence rule.
    ///
    /// # Errors
    ///
    /// - [`ModelError::KeyNotFound`] if either label is unknown.
    /// - [`ModelError::InvalidArgument`] if `u == v`.
    pub fn contract_variables(&mut self, u: &L, v: &L) -> Result<(), ModelError> {
        let pu = self.index.position_of(u)?;
        let pv = self.index.position_of(v)?;
        if pu == pv {
            return Err(ModelError::invalid_argument(format!(
                "cannot contract {u:?} with itself"
            )));
        }
        for key in self.keys_with(pv) {
            let Some(bias) = self.take_term(&key) else {
                continue;
            };
            let merged: Vec<usize> = key
                .into_iter()
                .map(|p| if p == pv { pu } else { p })
                .collect();
            self.add_term(key::reduce(&merged, self.vartype), bias);
        }
        self.prune();
        tracing::debug!(
            component = "bpm",
            operation = "contract_variables",
            status = "success",
            u = ?u,
            v = ?v,
            "Contracted variables"
        );
        Ok(())
    }
}
