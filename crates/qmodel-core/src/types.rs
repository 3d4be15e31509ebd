use std::collections::BTreeMap;

/// A label-keyed assignment of spin (±1) or binary (0/1) values.
pub type Sample<L> = BTreeMap<L, i32>;

/// Variable domain of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vartype {
    /// Values in {-1, +1}
    Spin,
    /// Values in {0, 1}
    Binary,
}

impl Vartype {
    pub fn as_str(self) -> &'static str {
        match self {
            Vartype::Spin => "SPIN",
            Vartype::Binary => "BINARY",
        }
    }

    /// Parse the serialized name (`"SPIN"` or `"BINARY"`).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "SPIN" => Some(Vartype::Spin),
            "BINARY" => Some(Vartype::Binary),
            _ => None,
        }
    }

    /// The other domain.
    pub fn flipped(self) -> Self {
        match self {
            Vartype::Spin => Vartype::Binary,
            Vartype::Binary => Vartype::Spin,
        }
    }

    /// Whether `value` belongs to this domain.
    pub fn contains(self, value: i32) -> bool {
        match self {
            Vartype::Spin => value == -1 || value == 1,
            Vartype::Binary => value == 0 || value == 1,
        }
    }

    /// Map a value of this domain onto `target` via `b = (s + 1) / 2`.
    pub fn convert_value(self, value: i32, target: Vartype) -> i32 {
        match (self, target) {
            (Vartype::Spin, Vartype::Binary) => (value + 1) / 2,
            (Vartype::Binary, Vartype::Spin) => 2 * value - 1,
            _ => value,
        }
    }

    /// Convert every value of a sample from this domain onto `target`.
    pub fn convert_sample<L: Ord + Clone>(self, sample: &Sample<L>, target: Vartype) -> Sample<L> {
        sample
            .iter()
            .map(|(label, value)| (label.clone(), self.convert_value(*value, target)))
            .collect()
    }
}

impl std::fmt::Display for Vartype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical layout of a quadratic model's interaction store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backing {
    /// Row-major `(n+1)x(n+1)` matrix
    #[default]
    Dense,
    /// Compressed sparse rows over the same index space
    Sparse,
}

impl Backing {
    pub fn as_str(self) -> &'static str {
        match self {
            Backing::Dense => "dense",
            Backing::Sparse => "sparse",
        }
    }
}
