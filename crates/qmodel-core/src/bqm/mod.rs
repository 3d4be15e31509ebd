//! Binary quadratic model.
//!
//! This module provides [`BinaryQuadraticModel`], a label-indexed quadratic
//! objective over SPIN or BINARY variables backed by a dense or sparse
//! interaction store.
//!
//! # Module Organization
//!
//! - [`matrix`]: Dense, adjacency-map and CSR square matrices
//! - [`storage`]: Augmented interaction store
//! - [`builder`]: Adding variables and interactions
//! - [`import`]: Factory constructors (QUBO, Ising, dense matrix, key/value lists)
//! - [`inspect`]: Read accessors
//! - [`mutate`]: Removal, scaling, fixing, flipping and contraction
//! - [`energy`]: Energy evaluation and the cached interaction matrix
//! - [`convert`]: SPIN/BINARY conversion
//! - [`serialize`]: JSON document round-trip
//! - [`pretty`]: Human-readable summary

mod builder;
mod convert;
mod energy;
mod import;
mod inspect;
pub mod matrix;
mod mutate;
mod pretty;
mod serialize;
pub mod storage;

use std::collections::BTreeMap;
use std::time::Instant;

use qmodel_labels::{Label, LabelIndex};

use crate::error::ModelError;
use crate::types::{Backing, Vartype};
use matrix::InteractionMatrix;
use storage::InteractionStore;

pub use mutate::{QuadraticNormalizeOptions, QuadraticScaleOptions};
pub use serialize::{DENSE_SCHEMA, QUADRATIC_MODEL_TYPE, SPARSE_SCHEMA};

/// Linear biases keyed by label.
pub type Linear<L> = BTreeMap<L, f64>;
/// Quadratic biases keyed by label pair.
pub type Quadratic<L> = BTreeMap<(L, L), f64>;

/// A quadratic objective `offset + Σ h_i x_i + Σ_{i<j} J_ij x_i x_j`.
///
/// Labels are mapped to positions by a [`LabelIndex`]; all arithmetic runs on
/// positions. Quadratic keys are unordered and self-loops are rejected.
#[derive(Debug, Clone)]
pub struct BinaryQuadraticModel<L> {
    pub(crate) index: LabelIndex<L>,
    pub(crate) store: InteractionStore,
    pub(crate) vartype: Vartype,
    // Symmetric interaction matrix, rebuilt on read once `dirty` is set.
    cache: Option<InteractionMatrix>,
    dirty: bool,
}

impl<L: Label> BinaryQuadraticModel<L> {
    /// Build a model from label-keyed linear and quadratic biases.
    ///
    /// Positions follow sorted label order. Repeated keys accumulate, and
    /// `(u, v)` and `(v, u)` share one bias.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SelfLoop`] if a quadratic key has equal endpoints.
    pub fn new<Lin, Quad>(
        linear: Lin,
        quadratic: Quad,
        offset: f64,
        vartype: Vartype,
        backing: Backing,
    ) -> Result<Self, ModelError>
    where
        Lin: IntoIterator<Item = (L, f64)>,
        Quad: IntoIterator<Item = ((L, L), f64)>,
    {
        let started = Instant::now();
        let linear: Vec<(L, f64)> = linear.into_iter().collect();
        let quadratic: Vec<((L, L), f64)> = quadratic.into_iter().collect();

        if let Some(((u, _), _)) = quadratic.iter().find(|((u, v), _)| u == v) {
            return Err(ModelError::SelfLoop {
                label: format!("{u:?}"),
            });
        }

        let index = LabelIndex::build_sorted(
            linear
                .iter()
                .map(|(label, _)| label.clone())
                .chain(
                    quadratic
                        .iter()
                        .flat_map(|((u, v), _)| [u.clone(), v.clone()]),
                ),
        );
        let mut linear_terms = Vec::with_capacity(linear.len());
        for (label, bias) in &linear {
            linear_terms.push((index.position_of(label)?, *bias));
        }
        let mut quadratic_terms = Vec::with_capacity(quadratic.len());
        for ((u, v), bias) in &quadratic {
            quadratic_terms.push((index.position_of(u)?, index.position_of(v)?, *bias));
        }

        let store =
            InteractionStore::from_terms(index.len(), backing, linear_terms, quadratic_terms, offset);
        let model = Self::from_parts(index, store, vartype);

        tracing::debug!(
            component = "bqm",
            operation = "build",
            status = "success",
            vartype = vartype.as_str(),
            backing = backing.as_str(),
            variables = model.num_variables(),
            interactions = model.num_interactions(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Built quadratic model"
        );

        Ok(model)
    }

    /// A model with no variables and a zero offset.
    pub fn empty(vartype: Vartype, backing: Backing) -> Self {
        Self::from_parts(
            LabelIndex::new(),
            InteractionStore::zeros(0, backing),
            vartype,
        )
    }

    pub(crate) fn from_parts(
        index: LabelIndex<L>,
        store: InteractionStore,
        vartype: Vartype,
    ) -> Self {
        Self {
            index,
            store,
            vartype,
            cache: None,
            dirty: true,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Position of `label`, appending a zero-bias variable when unseen.
    pub(crate) fn intern(&mut self, label: &L) -> usize {
        if let Some(position) = self.index.get(label) {
            return position;
        }
        let position = self.store.push_variable();
        self.index.intern(label);
        self.mark_dirty();
        position
    }

    pub(crate) fn position(&self, label: &L) -> Result<usize, ModelError> {
        Ok(self.index.position_of(label)?)
    }

    pub(crate) fn label_at(&self, position: usize) -> Result<&L, ModelError> {
        Ok(self.index.try_label_of(position)?)
    }

    /// Order a label pair canonically.
    pub(crate) fn pair_key(u: &L, v: &L) -> (L, L) {
        if u <= v {
            (u.clone(), v.clone())
        } else {
            (v.clone(), u.clone())
        }
    }

    /// Whether the interaction matrix cache must be rebuilt on next read.
    pub fn matrix_cache_dirty(&self) -> bool {
        self.dirty || self.cache.is_none()
    }

    pub(crate) fn cached_matrix(&mut self) -> &InteractionMatrix {
        if self.dirty {
            self.cache = None;
            self.dirty = false;
        }
        let store = &self.store;
        let rebuilt = self.cache.is_none();
        let matrix = self.cache.get_or_insert_with(|| store.symmetric());
        if rebuilt {
            tracing::debug!(
                component = "bqm",
                operation = "interaction_matrix",
                status = "rebuilt",
                dim = matrix.dim(),
                "Rebuilt interaction matrix cache"
            );
        }
        matrix
    }
}
