//! Binary polynomial model.
//!
//! [`BinaryPolynomialModel`] generalizes the quadratic model to interactions
//! of any arity. Terms are stored by sorted position tuple; the empty tuple
//! holds the offset and singletons hold linear biases.
//!
//! # Module Organization
//!
//! - [`key`]: Key reduction and SPIN/BINARY monomial expansion
//! - [`builder`]: Adding terms and merging models
//! - [`import`]: Factory constructors (HUBO, HISING, key/value lists)
//! - [`inspect`]: Read accessors
//! - [`mutate`]: Removal, scaling, fixing, flipping and contraction
//! - [`energy`]: Energy evaluation
//! - [`convert`]: SPIN/BINARY conversion
//! - [`serialize`]: JSON document round-trip
//! - [`pretty`]: Human-readable summary

mod builder;
mod convert;
mod energy;
mod import;
mod inspect;
pub(crate) mod key;
mod mutate;
mod pretty;
mod serialize;

use std::collections::BTreeMap;
use std::time::Instant;

use qmodel_labels::{Label, LabelIndex};

use crate::types::Vartype;

pub use key::MAX_CONVERSION_ARITY;
pub use mutate::{PolynomialNormalizeOptions, PolynomialScaleOptions};
pub use serialize::{POLYNOMIAL_MODEL_TYPE, POLYNOMIAL_SCHEMA};

/// Polynomial biases keyed by label tuple. The empty key is the offset.
pub type Polynomial<L> = BTreeMap<Vec<L>, f64>;

/// Position-keyed terms; keys are sorted and reduced.
pub(crate) type Terms = BTreeMap<Vec<usize>, f64>;

pub(crate) const OFFSET_KEY: &[usize] = &[];

/// A polynomial objective `Σ_S bias[S] Π_{i ∈ S} x_i` over SPIN or BINARY
/// variables.
///
/// Every variable in the index appears in at least one stored term: a
/// variable whose last term is removed leaves the model and the positions
/// above it shift down.
#[derive(Debug, Clone)]
pub struct BinaryPolynomialModel<L> {
    pub(crate) index: LabelIndex<L>,
    pub(crate) terms: Terms,
    // Number of stored terms mentioning each position.
    refcount: Vec<usize>,
    pub(crate) vartype: Vartype,
}

impl<L: Label> BinaryPolynomialModel<L> {
    /// Build a model from label-keyed terms.
    ///
    /// Keys are reduced for `vartype` first, so `[a, a, b]` means `[b]` for
    /// SPIN and `[a, b]` for BINARY. Repeated keys accumulate and terms that
    /// sum to exactly zero are dropped. Positions follow sorted label order.
    pub fn new<P>(polynomial: P, vartype: Vartype) -> Self
    where
        P: IntoIterator<Item = (Vec<L>, f64)>,
    {
        let started = Instant::now();
        let mut reduced: Polynomial<L> = BTreeMap::new();
        for (key, bias) in polynomial {
            *reduced.entry(key::reduce(&key, vartype)).or_insert(0.0) += bias;
        }
        reduced.retain(|_, bias| *bias != 0.0);

        let index = LabelIndex::build_sorted(reduced.keys().flatten().cloned());
        let mut terms = Terms::new();
        for (labels, bias) in reduced {
            let mut positions: Vec<usize> = labels
                .iter()
                .filter_map(|label| index.get(label))
                .collect();
            positions.sort_unstable();
            terms.insert(positions, bias);
        }
        let model = Self::from_parts(index, terms, vartype);

        tracing::debug!(
            component = "bpm",
            operation = "build",
            status = "success",
            vartype = vartype.as_str(),
            variables = model.num_variables(),
            interactions = model.num_interactions(),
            degree = model.degree(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Built polynomial model"
        );
        model
    }

    /// A model with no terms.
    pub fn empty(vartype: Vartype) -> Self {
        Self::from_parts(LabelIndex::new(), Terms::new(), vartype)
    }

    /// Drop every term and variable, keeping the vartype.
    pub fn clear(&mut self) {
        self.index.clear();
        self.terms.clear();
        self.refcount.clear();
    }

    /// Assemble a model and drop variables no term mentions.
    pub(crate) fn from_parts(index: LabelIndex<L>, terms: Terms, vartype: Vartype) -> Self {
        let mut model = Self {
            index,
            terms: Terms::new(),
            refcount: Vec::new(),
            vartype,
        };
        model.replace_terms(terms);
        model
    }

    /// Swap in a new term map, recounting references and pruning.
    pub(crate) fn replace_terms(&mut self, mut terms: Terms) {
        terms.retain(|_, bias| *bias != 0.0);
        let mut refcount = vec![0; self.index.len()];
        for key in terms.keys() {
            for position in key {
                refcount[*position] += 1;
            }
        }
        self.terms = terms;
        self.refcount = refcount;
        self.prune();
    }

    /// Position of `label`, appending it when unseen.
    pub(crate) fn intern(&mut self, label: &L) -> usize {
        let position = self.index.intern(label);
        if position == self.refcount.len() {
            self.refcount.push(0);
        }
        position
    }

    /// Reduce a label key and translate it to sorted positions, interning
    /// unseen labels.
    pub(crate) fn intern_key(&mut self, key: &[L]) -> Vec<usize> {
        let mut positions: Vec<usize> = key::reduce(key, self.vartype)
            .iter()
            .map(|label| self.intern(label))
            .collect();
        positions.sort_unstable();
        positions
    }

    /// Reduce a label key and translate it to sorted positions. `None` if a
    /// surviving label is unknown.
    pub(crate) fn lookup_key(&self, key: &[L]) -> Option<Vec<usize>> {
        let mut positions = key::reduce(key, self.vartype)
            .iter()
            .map(|label| self.index.get(label))
            .collect::<Option<Vec<usize>>>()?;
        positions.sort_unstable();
        Some(positions)
    }

    /// Add `delta` to the term at `key` (sorted positions). A sum of exactly
    /// zero erases the term. Call [`prune`](Self::prune) afterwards.
    pub(crate) fn add_term(&mut self, key: Vec<usize>, delta: f64) {
        if delta == 0.0 {
            return;
        }
        match self.terms.get_mut(&key) {
            Some(bias) => {
                *bias += delta;
                if *bias == 0.0 {
                    self.take_term(&key);
                }
            }
            None => {
                for position in &key {
                    self.refcount[*position] += 1;
                }
                self.terms.insert(key, delta);
            }
        }
    }

    /// Remove and return the term at `key`. Call [`prune`](Self::prune)
    /// afterwards.
    pub(crate) fn take_term(&mut self, key: &[usize]) -> Option<f64> {
        let bias = self.terms.remove(key)?;
        for position in key {
            self.refcount[*position] -= 1;
        }
        Some(bias)
    }

    /// Keys (sorted positions) of the stored terms that mention `position`.
    pub(crate) fn keys_with(&self, position: usize) -> Vec<Vec<usize>> {
        self.terms
            .keys()
            .filter(|key| key.binary_search(&position).is_ok())
            .cloned()
            .collect()
    }

    /// Remove variables that no stored term mentions, compacting positions.
    pub(crate) fn prune(&mut self) {
        if self.refcount.iter().all(|count| *count > 0) {
            return;
        }
        let mut shift = Vec::with_capacity(self.refcount.len());
        let mut removed = 0;
        for count in &self.refcount {
            shift.push(removed);
            if *count == 0 {
                removed += 1;
            }
        }
        let refcount = &self.refcount;
        self.index.retain_positions(|position| refcount[position] > 0);
        let terms = std::mem::take(&mut self.terms);
        self.terms = terms
            .into_iter()
            .map(|(key, bias)| {
                let key = key.iter().map(|position| position - shift[*position]).collect();
                (key, bias)
            })
            .collect();
        self.refcount.retain(|count| *count > 0);
        tracing::debug!(
            component = "bpm",
            operation = "prune",
            status = "success",
            removed,
            variables = self.index.len(),
            "Dropped unreferenced variables"
        );
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    mod convert_vartype;
    mod energy_eval;
    mod key_reduction;
    mod mutation;
    mod serialize_roundtrip;
    mod support;

    #[test]
    fn test_new_sorts_labels_and_keys() {
        let model = BinaryPolynomialModel::new(
            [(vec![3_i64, 1], 2.0), (vec![2], -1.0), (vec![], 0.5)],
            Vartype::Spin,
        );
        assert_eq!(model.variables(), &[1, 2, 3]);
        assert_eq!(model.offset(), 0.5);
        assert_eq!(model.polynomial_bias(&[1, 3]).unwrap(), 2.0);
        assert_eq!(model.num_interactions(), 2);
        assert_eq!(model.degree(), 2);
    }

    #[test]
    fn test_zero_terms_do_not_create_variables() {
        let model = BinaryPolynomialModel::new(
            [(vec![0_i64, 1], 1.0), (vec![1, 0], -1.0), (vec![2], 3.0)],
            Vartype::Binary,
        );
        assert_eq!(model.variables(), &[2]);
        assert_eq!(model.position_of(&2).unwrap(), 0);
    }

    #[test]
    fn test_clear_keeps_vartype() {
        let mut model = BinaryPolynomialModel::new([(vec![0_i64, 1, 2], 1.0)], Vartype::Binary);
        model.clear();
        assert_eq!(model.num_variables(), 0);
        assert_eq!(model.num_interactions(), 0);
        assert_eq!(model.vartype(), Vartype::Binary);
    }

    #[test]
    fn test_empty_model() {
        let model: BinaryPolynomialModel<String> = BinaryPolynomialModel::empty(Vartype::Spin);
        assert_eq!(model.degree(), 0);
        assert_eq!(model.offset(), 0.0);
        assert!(model.polynomial().is_empty());
    }
}
