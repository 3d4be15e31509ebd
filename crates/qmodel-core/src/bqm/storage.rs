//! Augmented interaction store.
//!
//! For `n` variables the store is an `(n+1)x(n+1)` upper-triangular matrix:
//! `[i][j]` with `i < j < n` holds the quadratic bias of `(i, j)`, `[i][n]`
//! the linear bias of `i`, and `[n][n]` the offset.

use ndarray::{Array1, Array2, s};

use super::matrix::{AdjacencyMatrix, CsrMatrix, DenseMatrix, InteractionMatrix};
use crate::types::Backing;

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionStore {
    Dense(DenseMatrix),
    Sparse(AdjacencyMatrix),
}

impl InteractionStore {
    /// Empty store for `num_variables` variables.
    pub fn zeros(num_variables: usize, backing: Backing) -> Self {
        match backing {
            Backing::Dense => InteractionStore::Dense(DenseMatrix::zeros(num_variables + 1)),
            Backing::Sparse => InteractionStore::Sparse(AdjacencyMatrix::zeros(num_variables + 1)),
        }
    }

    /// Build from linear, quadratic and offset terms given by position.
    ///
    /// Quadratic pairs must already have distinct endpoints; they are folded
    /// into the upper triangle here.
    pub(crate) fn from_terms<L, Q>(
        num_variables: usize,
        backing: Backing,
        linear: L,
        quadratic: Q,
        offset: f64,
    ) -> Self
    where
        L: IntoIterator<Item = (usize, f64)>,
        Q: IntoIterator<Item = (usize, usize, f64)>,
    {
        let slot = num_variables;
        let triplets = linear
            .into_iter()
            .map(|(i, bias)| (i, slot, bias))
            .chain(
                quadratic
                    .into_iter()
                    .map(|(u, v, bias)| (u.min(v), u.max(v), bias)),
            )
            .chain(std::iter::once((slot, slot, offset)));
        match backing {
            Backing::Dense => {
                InteractionStore::Dense(DenseMatrix::from_triplets(num_variables + 1, triplets))
            }
            Backing::Sparse => InteractionStore::Sparse(AdjacencyMatrix::from_triplets(
                num_variables + 1,
                triplets,
            )),
        }
    }

    pub fn backing(&self) -> Backing {
        match self {
            InteractionStore::Dense(_) => Backing::Dense,
            InteractionStore::Sparse(_) => Backing::Sparse,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.dim() - 1
    }

    fn dim(&self) -> usize {
        match self {
            InteractionStore::Dense(matrix) => matrix.dim(),
            InteractionStore::Sparse(matrix) => matrix.dim(),
        }
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        match self {
            InteractionStore::Dense(matrix) => matrix.get(row, col),
            InteractionStore::Sparse(matrix) => matrix.get(row, col),
        }
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        match self {
            InteractionStore::Dense(matrix) => matrix.set(row, col, value),
            InteractionStore::Sparse(matrix) => matrix.set(row, col, value),
        }
    }

    fn add(&mut self, row: usize, col: usize, delta: f64) {
        match self {
            InteractionStore::Dense(matrix) => matrix.add(row, col, delta),
            InteractionStore::Sparse(matrix) => matrix.add(row, col, delta),
        }
    }

    pub fn linear(&self, position: usize) -> f64 {
        self.get(position, self.num_variables())
    }

    pub fn add_linear(&mut self, position: usize, delta: f64) {
        let slot = self.num_variables();
        self.add(position, slot, delta);
    }

    pub fn set_linear(&mut self, position: usize, bias: f64) {
        let slot = self.num_variables();
        self.set(position, slot, bias);
    }

    pub fn quadratic(&self, u: usize, v: usize) -> f64 {
        self.get(u.min(v), u.max(v))
    }

    pub fn add_quadratic(&mut self, u: usize, v: usize, delta: f64) {
        self.add(u.min(v), u.max(v), delta);
    }

    pub fn set_quadratic(&mut self, u: usize, v: usize, bias: f64) {
        self.set(u.min(v), u.max(v), bias);
    }

    pub fn offset(&self) -> f64 {
        let slot = self.num_variables();
        self.get(slot, slot)
    }

    pub fn add_offset(&mut self, delta: f64) {
        let slot = self.num_variables();
        self.add(slot, slot, delta);
    }

    pub fn set_offset(&mut self, offset: f64) {
        let slot = self.num_variables();
        self.set(slot, slot, offset);
    }

    /// Append a variable with zero biases and return its position.
    pub fn push_variable(&mut self) -> usize {
        let position = self.num_variables();
        match self {
            InteractionStore::Dense(matrix) => matrix.insert_index(position),
            InteractionStore::Sparse(matrix) => matrix.insert_index(position),
        }
        position
    }

    /// Drop a variable and every bias touching it; higher positions shift down.
    pub fn remove_variable(&mut self, position: usize) {
        match self {
            InteractionStore::Dense(matrix) => matrix.remove_index(position),
            InteractionStore::Sparse(matrix) => matrix.remove_index(position),
        }
    }

    /// Visit every nonzero term in row-major order as `(row, col, bias)`.
    ///
    /// Linear terms appear as `(i, n, bias)` and the offset as `(n, n, offset)`.
    pub fn for_each_term(&self, f: impl FnMut(usize, usize, f64)) {
        match self {
            InteractionStore::Dense(matrix) => matrix.for_each_nonzero(f),
            InteractionStore::Sparse(matrix) => matrix.for_each_nonzero(f),
        }
    }

    /// Visit nonzero quadratic biases as `(u, v, bias)` with `u < v`.
    pub fn for_each_quadratic(&self, mut f: impl FnMut(usize, usize, f64)) {
        let slot = self.num_variables();
        self.for_each_term(|row, col, bias| {
            if col != slot {
                f(row, col, bias);
            }
        });
    }

    /// Nonzero linear biases as `(position, bias)`.
    pub fn for_each_linear(&self, mut f: impl FnMut(usize, f64)) {
        let slot = self.num_variables();
        let mut visit = |row: usize, bias: f64| {
            if row != slot {
                f(row, bias);
            }
        };
        match self {
            InteractionStore::Dense(matrix) => matrix.for_each_in_column(slot, &mut visit),
            InteractionStore::Sparse(matrix) => matrix.for_each_in_column(slot, &mut visit),
        }
    }

    /// Neighbors of `position` with their quadratic biases, in position order.
    pub fn neighbors(&self, position: usize) -> Vec<(usize, f64)> {
        let slot = self.num_variables();
        let mut neighbors = Vec::new();
        let mut upper = |row: usize, bias: f64| {
            if row < position {
                neighbors.push((row, bias));
            }
        };
        match self {
            InteractionStore::Dense(matrix) => matrix.for_each_in_column(position, &mut upper),
            InteractionStore::Sparse(matrix) => matrix.for_each_in_column(position, &mut upper),
        }
        let mut lower = |col: usize, bias: f64| {
            if col > position && col != slot {
                neighbors.push((col, bias));
            }
        };
        match self {
            InteractionStore::Dense(matrix) => matrix.for_each_in_row(position, &mut lower),
            InteractionStore::Sparse(matrix) => matrix.for_each_in_row(position, &mut lower),
        }
        neighbors
    }

    pub fn num_interactions(&self) -> usize {
        let mut count = 0;
        self.for_each_quadratic(|_, _, _| count += 1);
        count
    }

    /// Replace each nonzero term with `f(row, col, bias)`, in augmented
    /// coordinates.
    pub fn map_terms(&mut self, f: impl FnMut(usize, usize, f64) -> f64) {
        match self {
            InteractionStore::Dense(matrix) => matrix.map_in_place(f),
            InteractionStore::Sparse(matrix) => matrix.map_in_place(f),
        }
    }

    /// Symmetric `n x n` interaction matrix in the same layout as the store.
    pub fn symmetric(&self) -> InteractionMatrix {
        let slot = self.num_variables();
        let mut triplets = Vec::new();
        self.for_each_term(|row, col, bias| {
            if row == slot {
                return;
            }
            if col == slot {
                triplets.push((row, row, bias));
            } else {
                triplets.push((row, col, bias));
                triplets.push((col, row, bias));
            }
        });
        match self {
            InteractionStore::Dense(_) => {
                InteractionMatrix::Dense(DenseMatrix::from_triplets(slot, triplets))
            }
            InteractionStore::Sparse(_) => {
                InteractionMatrix::Sparse(CsrMatrix::from_triplets(slot, triplets))
            }
        }
    }

    /// Energy of a position-ordered sample.
    ///
    /// The dense store evaluates `yᵀ A y` with `y = [x, 1]`; the sparse store
    /// sums its stored terms.
    pub fn energy(&self, values: &Array1<f64>) -> f64 {
        match self {
            InteractionStore::Dense(matrix) => {
                let n = values.len();
                let mut augmented: Array1<f64> = Array1::ones(n + 1);
                augmented.slice_mut(s![..n]).assign(values);
                augmented.dot(&matrix.as_array().dot(&augmented))
            }
            InteractionStore::Sparse(_) => {
                let slot = self.num_variables();
                let mut energy = 0.0;
                self.for_each_term(|row, col, bias| {
                    energy += if row == slot {
                        bias
                    } else if col == slot {
                        bias * values[row]
                    } else {
                        bias * values[row] * values[col]
                    };
                });
                energy
            }
        }
    }

    /// Copy out as a dense `(n+1)x(n+1)` augmented matrix.
    pub fn to_array(&self) -> Array2<f64> {
        match self {
            InteractionStore::Dense(matrix) => matrix.as_array().clone(),
            InteractionStore::Sparse(matrix) => matrix.to_array(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use ndarray::array;

    use super::InteractionStore;
    use crate::types::Backing;

    fn build(backing: Backing) -> InteractionStore {
        InteractionStore::from_terms(
            3,
            backing,
            vec![(0, 1.0), (2, -0.5)],
            vec![(1, 0, 2.0), (0, 2, 3.0), (2, 1, -1.0), (0, 1, 1.0)],
            0.25,
        )
    }

    #[test]
    fn terms_land_in_upper_triangle() {
        for backing in [Backing::Dense, Backing::Sparse] {
            let store = build(backing);
            assert_eq!(store.backing(), backing);
            assert_eq!(store.num_variables(), 3);
            assert_eq!(store.quadratic(0, 1), 3.0);
            assert_eq!(store.quadratic(1, 0), 3.0);
            assert_eq!(store.quadratic(1, 2), -1.0);
            assert_eq!(store.linear(0), 1.0);
            assert_eq!(store.linear(1), 0.0);
            assert_eq!(store.offset(), 0.25);
            assert_eq!(store.num_interactions(), 3);
            let array = store.to_array();
            assert_eq!(array[[1, 0]], 0.0);
            assert_eq!(array[[0, 3]], 1.0);
        }
    }

    #[test]
    fn push_variable_moves_bias_column() {
        for backing in [Backing::Dense, Backing::Sparse] {
            let mut store = build(backing);
            assert_eq!(store.push_variable(), 3);
            assert_eq!(store.num_variables(), 4);
            assert_eq!(store.linear(0), 1.0);
            assert_eq!(store.linear(3), 0.0);
            assert_eq!(store.offset(), 0.25);
            store.add_quadratic(3, 0, 4.0);
            assert_eq!(store.neighbors(0), vec![(1, 3.0), (2, 3.0), (3, 4.0)]);
        }
    }

    #[test]
    fn remove_variable_drops_incident_biases() {
        for backing in [Backing::Dense, Backing::Sparse] {
            let mut store = build(backing);
            store.remove_variable(0);
            assert_eq!(store.num_variables(), 2);
            assert_eq!(store.quadratic(0, 1), -1.0);
            assert_eq!(store.linear(1), -0.5);
            assert_eq!(store.offset(), 0.25);
            assert_eq!(store.num_interactions(), 1);
        }
    }

    #[test]
    fn energy_agrees_between_backings() {
        let x = array![1.0, -1.0, 1.0];
        assert_eq!(build(Backing::Dense).energy(&x), 1.75);
        assert_eq!(build(Backing::Sparse).energy(&x), 1.75);
    }

    #[test]
    fn symmetric_form_mirrors_quadratic_and_diagonal_linear() {
        for backing in [Backing::Dense, Backing::Sparse] {
            let matrix = build(backing).symmetric();
            assert_eq!(
                matrix.to_array(),
                array![[1.0, 3.0, 3.0], [3.0, 0.0, -1.0], [3.0, -1.0, -0.5]]
            );
        }
    }
}
