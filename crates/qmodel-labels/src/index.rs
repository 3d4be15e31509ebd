//! Bidirectional label <-> position index.

use std::collections::{BTreeSet, HashMap};

use crate::error::LabelError;
use crate::label::Label;

/// Maps labels to contiguous positions `0..len` and back.
///
/// Insertion hands out the next free position. Removal compacts, so every
/// position above the removed one shifts down by one; positions are internal
/// and must not be held across a removal.
#[derive(Debug, Clone)]
pub struct LabelIndex<L> {
    labels: Vec<L>,
    positions: HashMap<L, usize>,
}

impl<L: Label> LabelIndex<L> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Build an index whose positions follow sorted label order.
    ///
    /// Duplicate labels collapse to one position.
    pub fn build_sorted<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
    {
        let sorted: BTreeSet<L> = labels.into_iter().collect();
        let mut index = Self {
            labels: Vec::with_capacity(sorted.len()),
            positions: HashMap::with_capacity(sorted.len()),
        };
        for label in sorted {
            index.positions.insert(label.clone(), index.labels.len());
            index.labels.push(label);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &L) -> bool {
        self.positions.contains_key(label)
    }

    /// Position of `label`, or `None` when unknown.
    pub fn get(&self, label: &L) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Position of `label`.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::KeyNotFound`] when the label is unknown.
    pub fn position_of(&self, label: &L) -> Result<usize, LabelError> {
        self.get(label).ok_or_else(|| LabelError::KeyNotFound {
            label: format!("{label:?}"),
        })
    }

    pub fn label_of(&self, position: usize) -> Option<&L> {
        self.labels.get(position)
    }

    /// Label stored at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::PositionOutOfRange`] past the end of the index.
    pub fn try_label_of(&self, position: usize) -> Result<&L, LabelError> {
        self.labels
            .get(position)
            .ok_or(LabelError::PositionOutOfRange {
                position,
                len: self.labels.len(),
            })
    }

    /// Return the position of `label`, appending it if unseen.
    pub fn intern(&mut self, label: &L) -> usize {
        if let Some(position) = self.positions.get(label) {
            return *position;
        }
        let position = self.labels.len();
        self.labels.push(label.clone());
        self.positions.insert(label.clone(), position);
        position
    }

    /// Remove `label` and compact the positions above it.
    ///
    /// Returns the position the label held before removal.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::KeyNotFound`] when the label is unknown.
    pub fn remove(&mut self, label: &L) -> Result<usize, LabelError> {
        let position = self.position_of(label)?;
        self.remove_at(position);
        Ok(position)
    }

    /// Remove the label at `position` and compact. `None` if out of range.
    pub fn remove_at(&mut self, position: usize) -> Option<L> {
        if position >= self.labels.len() {
            return None;
        }
        let label = self.labels.remove(position);
        self.positions.remove(&label);
        for (shifted, moved) in self.labels.iter().enumerate().skip(position) {
            if let Some(slot) = self.positions.get_mut(moved) {
                *slot = shifted;
            }
        }
        Some(label)
    }

    /// Keep the labels whose position passes `keep`, compacting in one pass.
    pub fn retain_positions(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let labels = std::mem::take(&mut self.labels);
        self.positions.clear();
        for (position, label) in labels.into_iter().enumerate() {
            if keep(position) {
                self.positions.insert(label.clone(), self.labels.len());
                self.labels.push(label);
            }
        }
    }

    /// Labels in position order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Iterate `(position, label)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &L)> {
        self.labels.iter().enumerate()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.positions.clear();
    }
}

impl<L: Label> Default for LabelIndex<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Label> FromIterator<L> for LabelIndex<L> {
    /// Intern labels in iteration order.
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        let mut index = Self::new();
        for label in iter {
            index.intern(&label);
        }
        index
    }
}
