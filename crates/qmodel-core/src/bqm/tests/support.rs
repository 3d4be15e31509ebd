use super::*;
use crate::types::Sample;

pub(super) const BACKINGS: [Backing; 2] = [Backing::Dense, Backing::Sparse];

/// `h = {0: 1, 1: -2}`, `J = {(0, 1): -1}`.
pub(super) fn small_ising(backing: Backing) -> BinaryQuadraticModel<i64> {
    BinaryQuadraticModel::new(
        [(0, 1.0), (1, -2.0)],
        [((0, 1), -1.0)],
        0.0,
        Vartype::Spin,
        backing,
    )
    .unwrap()
}

/// Four variables with a triangle and a pendant edge; dyadic biases only.
pub(super) fn triangle_with_tail(vartype: Vartype, backing: Backing) -> BinaryQuadraticModel<i64> {
    BinaryQuadraticModel::new(
        [(0, 1.0), (1, -0.5), (2, 0.25), (3, 2.0)],
        [((0, 1), 1.5), ((1, 2), -2.0), ((0, 2), 0.75), ((2, 3), -1.25)],
        0.5,
        vartype,
        backing,
    )
    .unwrap()
}

/// Every assignment of `n` variables in `vartype`'s domain.
pub(super) fn all_states(n: usize, vartype: Vartype) -> Vec<Vec<i32>> {
    let (low, high) = match vartype {
        Vartype::Spin => (-1, 1),
        Vartype::Binary => (0, 1),
    };
    (0..1_u32 << n)
        .map(|bits| {
            (0..n)
                .map(|i| if (bits >> i) & 1 == 1 { high } else { low })
                .collect()
        })
        .collect()
}

pub(super) fn labelled<L: Clone + Ord>(labels: &[L], values: &[i32]) -> Sample<L> {
    labels.iter().cloned().zip(values.iter().copied()).collect()
}
