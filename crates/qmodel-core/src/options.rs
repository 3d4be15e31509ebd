//! Options for scaling and normalizing models.
//!
//! `V` is the variable label type and `K` the interaction key type: `(L, L)`
//! for quadratic models and `Vec<L>` for polynomial models.

/// Biases left untouched by [`scale`](crate::BinaryQuadraticModel::scale).
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOptions<V, K> {
    /// Variables whose linear bias is not scaled.
    pub ignored_variables: Vec<V>,
    /// Interactions whose bias is not scaled.
    pub ignored_interactions: Vec<K>,
    /// Keep the offset as is.
    pub ignored_offset: bool,
}

impl<V, K> Default for ScaleOptions<V, K> {
    fn default() -> Self {
        Self {
            ignored_variables: Vec::new(),
            ignored_interactions: Vec::new(),
            ignored_offset: false,
        }
    }
}

impl<V, K> ScaleOptions<V, K> {
    /// Scale everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignored_variables<I: IntoIterator<Item = V>>(mut self, variables: I) -> Self {
        self.ignored_variables.extend(variables);
        self
    }

    pub fn with_ignored_interactions<I: IntoIterator<Item = K>>(mut self, keys: I) -> Self {
        self.ignored_interactions.extend(keys);
        self
    }

    pub fn with_ignored_offset(mut self, ignored: bool) -> Self {
        self.ignored_offset = ignored;
        self
    }

    /// True when nothing is ignored.
    pub fn is_empty(&self) -> bool {
        self.ignored_variables.is_empty()
            && self.ignored_interactions.is_empty()
            && !self.ignored_offset
    }
}

/// Target range and exclusions for `normalize`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions<V, K> {
    /// Bias range to fit into. `None` means `(-1.0, 1.0)`.
    pub range: Option<(f64, f64)>,
    /// Biases excluded from both the maximum and the scaling.
    pub ignored: ScaleOptions<V, K>,
}

impl<V, K> Default for NormalizeOptions<V, K> {
    fn default() -> Self {
        Self {
            range: None,
            ignored: ScaleOptions::default(),
        }
    }
}

impl<V, K> NormalizeOptions<V, K> {
    pub const DEFAULT_RANGE: (f64, f64) = (-1.0, 1.0);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, lower: f64, upper: f64) -> Self {
        self.range = Some((lower, upper));
        self
    }

    pub fn with_ignored_variables<I: IntoIterator<Item = V>>(mut self, variables: I) -> Self {
        self.ignored = self.ignored.with_ignored_variables(variables);
        self
    }

    pub fn with_ignored_interactions<I: IntoIterator<Item = K>>(mut self, keys: I) -> Self {
        self.ignored = self.ignored.with_ignored_interactions(keys);
        self
    }

    pub fn with_ignored_offset(mut self, ignored: bool) -> Self {
        self.ignored = self.ignored.with_ignored_offset(ignored);
        self
    }

    /// Largest magnitude allowed by the target range.
    pub fn bound(&self) -> f64 {
        let (lower, upper) = self.range.unwrap_or(Self::DEFAULT_RANGE);
        lower.abs().max(upper.abs())
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_none() && self.ignored.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{NormalizeOptions, ScaleOptions};

    #[test]
    fn test_scale_options_new_is_empty() {
        let options: ScaleOptions<i64, (i64, i64)> = ScaleOptions::new();
        assert!(options.is_empty());
    }

    #[test]
    fn test_scale_options_builder_pattern() {
        let options: ScaleOptions<i64, (i64, i64)> = ScaleOptions::new()
            .with_ignored_variables([1, 2])
            .with_ignored_interactions([(1, 2)])
            .with_ignored_offset(true);
        assert!(!options.is_empty());
        assert_eq!(options.ignored_variables, vec![1, 2]);
        assert_eq!(options.ignored_interactions, vec![(1, 2)]);
        assert!(options.ignored_offset);
    }

    #[test]
    fn test_normalize_bound_uses_widest_end() {
        let options: NormalizeOptions<i64, Vec<i64>> = NormalizeOptions::new();
        assert_eq!(options.bound(), 1.0);
        assert!(options.is_empty());

        let options: NormalizeOptions<i64, Vec<i64>> = NormalizeOptions::new().with_range(-3.0, 2.0);
        assert_eq!(options.bound(), 3.0);
        assert!(!options.is_empty());
    }
}
