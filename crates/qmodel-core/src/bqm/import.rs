//! Factory constructors for quadratic models.

use std::collections::BTreeSet;

use ndarray::{ArrayView2, s};
use qmodel_labels::{Label, LabelIndex};

use super::BinaryQuadraticModel;
use super::storage::InteractionStore;
use crate::error::ModelError;
use crate::types::{Backing, Vartype};

impl<L: Label> BinaryQuadraticModel<L> {
    /// Build a BINARY model from a QUBO map.
    ///
    /// Diagonal keys `(i, i)` are linear biases; every other key is quadratic,
    /// so this never fails with a self-loop.
    ///
    /// # Errors
    ///
    /// Propagates construction errors from [`BinaryQuadraticModel::new`].
    pub fn from_qubo<Q>(qubo: Q, offset: f64, backing: Backing) -> Result<Self, ModelError>
    where
        Q: IntoIterator<Item = ((L, L), f64)>,
    {
        let (linear, quadratic): (Vec<_>, Vec<_>) =
            qubo.into_iter().partition(|((u, v), _)| u == v);
        let linear = linear.into_iter().map(|((label, _), bias)| (label, bias));
        Self::new(linear, quadratic, offset, Vartype::Binary, backing)
    }

    /// Build a SPIN model from Ising biases.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SelfLoop`] if a quadratic key has equal endpoints.
    pub fn from_ising<Lin, Quad>(
        linear: Lin,
        quadratic: Quad,
        offset: f64,
        backing: Backing,
    ) -> Result<Self, ModelError>
    where
        Lin: IntoIterator<Item = (L, f64)>,
        Quad: IntoIterator<Item = ((L, L), f64)>,
    {
        Self::new(linear, quadratic, offset, Vartype::Spin, backing)
    }

    /// Build from a square matrix over `variables`.
    ///
    /// Rows and columns `0..n` follow `variables`, which also fixes the
    /// position order. Two shapes are accepted:
    ///
    /// - `n x n`: `[i][i]` is the linear bias of `i`, `[i][j]` and `[j][i]`
    ///   add to the quadratic bias of `(i, j)`.
    /// - augmented `(n+1)x(n+1)`: `[i][n]` and `[n][i]` add to the linear bias
    ///   of `i`, `[n][n]` adds to `offset`, and the diagonal `[i][i]`, `i < n`,
    ///   must be zero.
    ///
    /// # Errors
    ///
    /// - [`ModelError::Shape`] if the matrix is not square or has neither
    ///   `n` nor `n + 1` rows.
    /// - [`ModelError::InvalidArgument`] if `variables` repeats a label.
    /// - [`ModelError::SelfLoop`] if an augmented matrix has a nonzero
    ///   diagonal entry `[i][i]`, `i < n`.
    pub fn from_dense_matrix(
        matrix: ArrayView2<'_, f64>,
        variables: &[L],
        offset: f64,
        vartype: Vartype,
        backing: Backing,
    ) -> Result<Self, ModelError> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(ModelError::Shape {
                expected: rows,
                found: cols,
            });
        }
        let n = variables.len();
        let augmented = if rows == n + 1 {
            true
        } else if rows == n {
            false
        } else {
            return Err(ModelError::Shape {
                expected: n + 1,
                found: rows,
            });
        };
        let distinct: BTreeSet<&L> = variables.iter().collect();
        if distinct.len() != n {
            return Err(ModelError::invalid_argument(
                "variables must not repeat a label",
            ));
        }
        if augmented {
            if let Some(i) = (0..n).find(|i| matrix[[*i, *i]] != 0.0) {
                return Err(ModelError::SelfLoop {
                    label: format!("{:?}", variables[i]),
                });
            }
        }

        let index: LabelIndex<L> = variables.iter().cloned().collect();
        let inner = matrix.slice(s![..n, ..n]);
        let mut linear = Vec::with_capacity(2 * n);
        let mut quadratic = Vec::new();
        for ((i, j), bias) in inner.indexed_iter() {
            if i == j {
                linear.push((i, *bias));
            } else if *bias != 0.0 {
                quadratic.push((i, j, *bias));
            }
        }
        let mut offset = offset;
        if augmented {
            let column = matrix.column(n);
            let row = matrix.row(n);
            for i in 0..n {
                linear.push((i, column[i] + row[i]));
            }
            offset += matrix[[n, n]];
        }
        let store = InteractionStore::from_terms(n, backing, linear, quadratic, offset);
        let model = Self::from_parts(index, store, vartype);

        tracing::debug!(
            component = "bqm",
            operation = "from_dense_matrix",
            status = "success",
            variables = model.num_variables(),
            interactions = model.num_interactions(),
            augmented,
            backing = backing.as_str(),
            "Imported dense matrix"
        );
        Ok(model)
    }

    /// Build from parallel key and value lists.
    ///
    /// # Errors
    ///
    /// - [`ModelError::InvalidArgument`] if a key list and its value list differ in length.
    /// - [`ModelError::SelfLoop`] if a quadratic key has equal endpoints.
    pub fn from_key_value_lists(
        linear_keys: Vec<L>,
        linear_values: Vec<f64>,
        quadratic_keys: Vec<(L, L)>,
        quadratic_values: Vec<f64>,
        offset: f64,
        vartype: Vartype,
        backing: Backing,
    ) -> Result<Self, ModelError> {
        if linear_keys.len() != linear_values.len() {
            return Err(ModelError::invalid_argument(format!(
                "{} linear keys but {} linear values",
                linear_keys.len(),
                linear_values.len()
            )));
        }
        if quadratic_keys.len() != quadratic_values.len() {
            return Err(ModelError::invalid_argument(format!(
                "{} quadratic keys but {} quadratic values",
                quadratic_keys.len(),
                quadratic_values.len()
            )));
        }
        Self::new(
            linear_keys.into_iter().zip(linear_values),
            quadratic_keys.into_iter().zip(quadratic_values),
            offset,
            vartype,
            backing,
        )
    }
}
