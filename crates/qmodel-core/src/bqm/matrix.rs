//! Square matrices backing the quadratic model.
//!
//! [`DenseMatrix`] wraps an [`Array2`]. [`AdjacencyMatrix`] keeps one sorted
//! map per row with a dense trailing column, so appending an index in front
//! of that column renumbers nothing. [`CsrMatrix`] is the compressed, read-only
//! form used for the cached sparse interaction matrix.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, Axis, s};

/// Dense square matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: Array2<f64>,
}

impl DenseMatrix {
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: Array2::zeros((dim, dim)),
        }
    }

    /// Accumulate `(row, col, value)` triplets into a new matrix.
    pub fn from_triplets<I>(dim: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut matrix = Self::zeros(dim);
        for (row, col, value) in triplets {
            matrix.data[[row, col]] += value;
        }
        matrix
    }

    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[[row, col]] = value;
    }

    pub fn add(&mut self, row: usize, col: usize, delta: f64) {
        self.data[[row, col]] += delta;
    }

    /// Count of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.data.iter().filter(|value| **value != 0.0).count()
    }

    /// Insert an all-zero row and column at `index`.
    pub fn insert_index(&mut self, index: usize) {
        let dim = self.dim() + 1;
        let mut grown = Array2::zeros((dim, dim));
        grown
            .slice_mut(s![..index, ..index])
            .assign(&self.data.slice(s![..index, ..index]));
        grown
            .slice_mut(s![..index, index + 1..])
            .assign(&self.data.slice(s![..index, index..]));
        grown
            .slice_mut(s![index + 1.., ..index])
            .assign(&self.data.slice(s![index.., ..index]));
        grown
            .slice_mut(s![index + 1.., index + 1..])
            .assign(&self.data.slice(s![index.., index..]));
        self.data = grown;
    }

    /// Drop row and column `index`.
    pub fn remove_index(&mut self, index: usize) {
        let keep: Vec<usize> = (0..self.dim()).filter(|i| *i != index).collect();
        self.data = self.data.select(Axis(0), &keep).select(Axis(1), &keep);
    }

    /// Visit nonzero entries in row-major order.
    pub fn for_each_nonzero(&self, mut f: impl FnMut(usize, usize, f64)) {
        for ((row, col), value) in self.data.indexed_iter() {
            if *value != 0.0 {
                f(row, col, *value);
            }
        }
    }

    pub fn for_each_in_row(&self, row: usize, mut f: impl FnMut(usize, f64)) {
        for (col, value) in self.data.row(row).iter().enumerate() {
            if *value != 0.0 {
                f(col, *value);
            }
        }
    }

    pub fn for_each_in_column(&self, col: usize, mut f: impl FnMut(usize, f64)) {
        for (row, value) in self.data.column(col).iter().enumerate() {
            if *value != 0.0 {
                f(row, *value);
            }
        }
    }

    pub fn map_in_place(&mut self, mut f: impl FnMut(usize, usize, f64) -> f64) {
        for ((row, col), value) in self.data.indexed_iter_mut() {
            if *value != 0.0 {
                *value = f(row, col, *value);
            }
        }
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }
}

/// Square matrix stored as sorted per-row maps plus a dense last column.
///
/// Row maps only hold columns below `dim - 1`; explicit zeros are erased.
/// Inserting an index directly before the last column is amortized `O(1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    rows: Vec<BTreeMap<usize, f64>>,
    last: Vec<f64>,
}

impl AdjacencyMatrix {
    pub fn zeros(dim: usize) -> Self {
        Self {
            rows: vec![BTreeMap::new(); dim],
            last: vec![0.0; dim],
        }
    }

    /// Accumulate triplets. Repeated keys sum; zero sums are dropped.
    pub fn from_triplets<I>(dim: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut matrix = Self::zeros(dim);
        for (row, col, value) in triplets {
            matrix.add(row, col, value);
        }
        matrix
    }

    pub fn dim(&self) -> usize {
        self.last.len()
    }

    fn is_last(&self, col: usize) -> bool {
        col + 1 == self.last.len()
    }

    pub fn nnz(&self) -> usize {
        let stored: usize = self.rows.iter().map(BTreeMap::len).sum();
        stored + self.last.iter().filter(|value| **value != 0.0).count()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        if self.is_last(col) {
            return self.last[row];
        }
        self.rows[row].get(&col).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if self.is_last(col) {
            self.last[row] = value;
        } else if value == 0.0 {
            self.rows[row].remove(&col);
        } else {
            self.rows[row].insert(col, value);
        }
    }

    pub fn add(&mut self, row: usize, col: usize, delta: f64) {
        if self.is_last(col) {
            self.last[row] += delta;
            return;
        }
        let entries = &mut self.rows[row];
        let value = entries.get(&col).copied().unwrap_or(0.0) + delta;
        if value == 0.0 {
            entries.remove(&col);
        } else {
            entries.insert(col, value);
        }
    }

    /// Insert an empty row and column at `index`, which must not exceed
    /// `dim - 1`.
    pub fn insert_index(&mut self, index: usize) {
        debug_assert!(index < self.last.len());
        if index + 1 < self.last.len() {
            for entries in &mut self.rows {
                if entries.range(index..).next().is_some() {
                    *entries = std::mem::take(entries)
                        .into_iter()
                        .map(|(col, value)| (col + usize::from(col >= index), value))
                        .collect();
                }
            }
        }
        self.rows.insert(index, BTreeMap::new());
        self.last.insert(index, 0.0);
    }

    /// Drop row and column `index`, which must be below `dim - 1`.
    pub fn remove_index(&mut self, index: usize) {
        debug_assert!(index + 1 < self.last.len());
        self.rows.remove(index);
        self.last.remove(index);
        for entries in &mut self.rows {
            if entries.range(index..).next().is_some() {
                *entries = std::mem::take(entries)
                    .into_iter()
                    .filter(|(col, _)| *col != index)
                    .map(|(col, value)| (col - usize::from(col > index), value))
                    .collect();
            }
        }
    }

    /// Visit nonzero entries in row-major order.
    pub fn for_each_nonzero(&self, mut f: impl FnMut(usize, usize, f64)) {
        let last = self.last.len().saturating_sub(1);
        for (row, entries) in self.rows.iter().enumerate() {
            for (col, value) in entries {
                f(row, *col, *value);
            }
            if self.last[row] != 0.0 {
                f(row, last, self.last[row]);
            }
        }
    }

    pub fn for_each_in_row(&self, row: usize, mut f: impl FnMut(usize, f64)) {
        for (col, value) in &self.rows[row] {
            f(*col, *value);
        }
        if self.last[row] != 0.0 {
            f(self.last.len() - 1, self.last[row]);
        }
    }

    pub fn for_each_in_column(&self, col: usize, mut f: impl FnMut(usize, f64)) {
        if self.is_last(col) {
            for (row, value) in self.last.iter().enumerate() {
                if *value != 0.0 {
                    f(row, *value);
                }
            }
            return;
        }
        for (row, entries) in self.rows.iter().enumerate() {
            if let Some(value) = entries.get(&col) {
                f(row, *value);
            }
        }
    }

    /// Rewrite stored values; results that are exactly zero are dropped.
    pub fn map_in_place(&mut self, mut f: impl FnMut(usize, usize, f64) -> f64) {
        let last = self.last.len().saturating_sub(1);
        for (row, entries) in self.rows.iter_mut().enumerate() {
            for (col, value) in entries.iter_mut() {
                *value = f(row, *col, *value);
            }
            entries.retain(|_, value| *value != 0.0);
        }
        for (row, value) in self.last.iter_mut().enumerate() {
            if *value != 0.0 {
                *value = f(row, last, *value);
            }
        }
    }

    pub fn to_array(&self) -> Array2<f64> {
        let mut array = Array2::zeros((self.dim(), self.dim()));
        self.for_each_nonzero(|row, col, value| array[[row, col]] = value);
        array
    }
}

/// Compressed sparse row matrix with sorted column indices.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    dim: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Accumulate triplets, then compress. Repeated keys sum; zero sums are
    /// dropped.
    pub fn from_triplets<I>(dim: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut accumulated: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (row, col, value) in triplets {
            *accumulated.entry((row, col)).or_insert(0.0) += value;
        }

        let mut row_ptr = vec![0; dim + 1];
        let mut col_idx = Vec::with_capacity(accumulated.len());
        let mut values = Vec::with_capacity(accumulated.len());
        for ((row, col), value) in accumulated {
            if value == 0.0 {
                continue;
            }
            row_ptr[row + 1] += 1;
            col_idx.push(col);
            values.push(value);
        }
        for row in 0..dim {
            row_ptr[row + 1] += row_ptr[row];
        }
        Self {
            dim,
            row_ptr,
            col_idx,
            values,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        match self.col_idx[start..end].binary_search(&col) {
            Ok(found) => self.values[start + found],
            Err(_) => 0.0,
        }
    }

    /// Visit stored entries in row-major order.
    pub fn for_each_nonzero(&self, mut f: impl FnMut(usize, usize, f64)) {
        for row in 0..self.dim {
            for slot in self.row_ptr[row]..self.row_ptr[row + 1] {
                f(row, self.col_idx[slot], self.values[slot]);
            }
        }
    }

    /// `A x`.
    pub fn dot(&self, x: &Array1<f64>) -> Array1<f64> {
        Array1::from_shape_fn(self.dim, |row| {
            (self.row_ptr[row]..self.row_ptr[row + 1])
                .map(|slot| self.values[slot] * x[self.col_idx[slot]])
                .sum()
        })
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn col_indices(&self) -> &[usize] {
        &self.col_idx
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn to_array(&self) -> Array2<f64> {
        let mut array = Array2::zeros((self.dim, self.dim));
        self.for_each_nonzero(|row, col, value| array[[row, col]] = value);
        array
    }
}

/// Symmetric `n x n` interaction matrix `H` of a quadratic model.
///
/// `H[i][i]` holds the linear bias of variable `i` and
/// `H[i][j] = H[j][i]` the quadratic bias of `(i, j)`.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionMatrix {
    Dense(DenseMatrix),
    Sparse(CsrMatrix),
}

impl InteractionMatrix {
    pub fn dim(&self) -> usize {
        match self {
            InteractionMatrix::Dense(matrix) => matrix.dim(),
            InteractionMatrix::Sparse(matrix) => matrix.dim(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        match self {
            InteractionMatrix::Dense(matrix) => matrix.get(row, col),
            InteractionMatrix::Sparse(matrix) => matrix.get(row, col),
        }
    }

    /// `xᵀ H x`.
    pub fn quadratic_form(&self, x: &Array1<f64>) -> f64 {
        match self {
            InteractionMatrix::Dense(matrix) => x.dot(&matrix.as_array().dot(x)),
            InteractionMatrix::Sparse(matrix) => x.dot(&matrix.dot(x)),
        }
    }

    pub fn diagonal(&self) -> Array1<f64> {
        match self {
            InteractionMatrix::Dense(matrix) => matrix.as_array().diag().to_owned(),
            InteractionMatrix::Sparse(matrix) => {
                Array1::from_shape_fn(matrix.dim(), |i| matrix.get(i, i))
            }
        }
    }

    pub fn to_array(&self) -> Array2<f64> {
        match self {
            InteractionMatrix::Dense(matrix) => matrix.as_array().clone(),
            InteractionMatrix::Sparse(matrix) => matrix.to_array(),
        }
    }
}
