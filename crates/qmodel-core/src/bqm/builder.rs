//! Methods for adding variables and interactions to quadratic models.

use qmodel_labels::Label;

use super::BinaryQuadraticModel;
use crate::error::ModelError;
use crate::types::Vartype;

impl<L: Label> BinaryQuadraticModel<L> {
    /// Add `bias` to the linear bias of `label`, creating the variable if needed.
    pub fn add_variable(&mut self, label: &L, bias: f64) {
        let position = self.intern(label);
        self.store.add_linear(position, bias);
        self.mark_dirty();
        tracing::debug!(
            component = "bqm",
            operation = "add_variable",
            status = "success",
            variable = ?label,
            bias,
            "Added linear bias"
        );
    }

    /// Add a linear bias expressed in `vartype`, converting it to the model's
    /// vartype first.
    ///
    /// A BINARY bias `h` on a SPIN model becomes `h/2` plus `h/2` offset; a
    /// SPIN bias on a BINARY model becomes `2h` minus `h` offset.
    pub fn add_variable_as(&mut self, label: &L, bias: f64, vartype: Vartype) {
        match (vartype, self.vartype) {
            (Vartype::Binary, Vartype::Spin) => {
                self.add_variable(label, bias / 2.0);
                self.add_offset(bias / 2.0);
            }
            (Vartype::Spin, Vartype::Binary) => {
                self.add_variable(label, 2.0 * bias);
                self.add_offset(-bias);
            }
            _ => self.add_variable(label, bias),
        }
    }

    /// Add many linear biases.
    pub fn add_variables_from<I>(&mut self, linear: I)
    where
        I: IntoIterator<Item = (L, f64)>,
    {
        for (label, bias) in linear {
            self.add_variable(&label, bias);
        }
    }

    /// Add `bias` to the interaction `(u, v)`, creating either endpoint if
    /// needed. An accumulated bias of exactly zero removes the interaction.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SelfLoop`] when `u == v`; the model is unchanged.
    pub fn add_interaction(&mut self, u: &L, v: &L, bias: f64) -> Result<(), ModelError> {
        if u == v {
            return Err(ModelError::SelfLoop {
                label: format!("{u:?}"),
            });
        }
        let pu = self.intern(u);
        let pv = self.intern(v);
        self.store.add_quadratic(pu, pv, bias);
        self.mark_dirty();
        tracing::debug!(
            component = "bqm",
            operation = "add_interaction",
            status = "success",
            u = ?u,
            v = ?v,
            bias,
            "Added quadratic bias"
        );
        Ok(())
    }

    /// Add a quadratic bias expressed in `vartype`, expanding it into the
    /// model's vartype.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SelfLoop`] when `u == v`; the model is unchanged.
    pub fn add_interaction_as(
        &mut self,
        u: &L,
        v: &L,
        bias: f64,
        vartype: Vartype,
    ) -> Result<(), ModelError> {
        match (vartype, self.vartype) {
            (Vartype::Binary, Vartype::Spin) => {
                // b_u b_v = (s_u s_v + s_u + s_v + 1) / 4
                let quarter = bias / 4.0;
                self.add_interaction(u, v, quarter)?;
                self.add_variable(u, quarter);
                self.add_variable(v, quarter);
                self.add_offset(quarter);
            }
            (Vartype::Spin, Vartype::Binary) => {
                // s_u s_v = 4 b_u b_v - 2 b_u - 2 b_v + 1
                self.add_interaction(u, v, 4.0 * bias)?;
                self.add_variable(u, -2.0 * bias);
                self.add_variable(v, -2.0 * bias);
                self.add_offset(bias);
            }
            _ => self.add_interaction(u, v, bias)?,
        }
        Ok(())
    }

    /// Add many quadratic biases.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SelfLoop`] if any key has equal endpoints. Keys
    /// are checked before anything is added.
    pub fn add_interactions_from<I>(&mut self, quadratic: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = ((L, L), f64)>,
    {
        let quadratic: Vec<((L, L), f64)> = quadratic.into_iter().collect();
        if let Some(((u, _), _)) = quadratic.iter().find(|((u, v), _)| u == v) {
            return Err(ModelError::SelfLoop {
                label: format!("{u:?}"),
            });
        }
        for ((u, v), bias) in &quadratic {
            self.add_interaction(u, v, *bias)?;
        }
        Ok(())
    }

    /// Merge `other` into this model, converting it to this model's vartype.
    pub fn update(&mut self, other: &BinaryQuadraticModel<L>) {
        let other = other.change_vartype(self.vartype);
        for (position, label) in other.index.iter() {
            let bias = other.store.linear(position);
            self.add_variable(label, bias);
        }
        let mut pairs = Vec::with_capacity(other.num_interactions());
        other.store.for_each_quadratic(|u, v, bias| pairs.push((u, v, bias)));
        for (u, v, bias) in pairs {
            let (Some(lu), Some(lv)) = (other.index.label_of(u), other.index.label_of(v)) else {
                continue;
            };
            let pu = self.intern(lu);
            let pv = self.intern(lv);
            self.store.add_quadratic(pu, pv, bias);
        }
        self.add_offset(other.offset());
        self.mark_dirty();
    }
}
