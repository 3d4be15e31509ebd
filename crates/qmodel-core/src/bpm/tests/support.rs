use super::*;

/// `{1: 1, 3: 3, (1,2): 12, (1,3): 13, (2,3,4): 234, (3,5): 35}`.
pub(super) fn reference_terms() -> Vec<(Vec<i64>, f64)> {
    vec![
        (vec![1], 1.0),
        (vec![3], 3.0),
        (vec![1, 2], 12.0),
        (vec![1, 3], 13.0),
        (vec![2, 3, 4], 234.0),
        (vec![3, 5], 35.0),
    ]
}

pub(super) fn reference_model(vartype: Vartype) -> BinaryPolynomialModel<i64> {
    BinaryPolynomialModel::new(reference_terms(), vartype)
}

/// Mixed-arity model with dyadic biases and an offset.
pub(super) fn cubic_model(vartype: Vartype) -> BinaryPolynomialModel<i64> {
    BinaryPolynomialModel::new(
        [
            (vec![], 0.5),
            (vec![0], 1.0),
            (vec![1], -0.25),
            (vec![0, 2], 1.5),
            (vec![1, 2, 3], -2.0),
            (vec![0, 1, 2, 3], 0.75),
        ],
        vartype,
    )
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
