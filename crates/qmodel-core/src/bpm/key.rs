//! Polynomial key algebra.
//!
//! A key is a product of variables. Repeated variables are reduced by the
//! domain's idempotence rule before a key is stored or looked up: for SPIN
//! `s·s = 1`, so equal pairs cancel; for BINARY `b·b = b`, so repeats collapse.

use crate::error::ModelError;
use crate::types::Vartype;

/// Largest key that can change domain. A `k`-ary term expands into `2^k`
/// monomials.
pub const MAX_CONVERSION_ARITY: usize = 24;

/// Sort `key` and reduce repeated elements according to `vartype`.
pub(crate) fn reduce<T: Ord + Clone>(key: &[T], vartype: Vartype) -> Vec<T> {
    let mut sorted = key.to_vec();
    sorted.sort();
    match vartype {
        Vartype::Binary => {
            sorted.dedup();
            sorted
        }
        Vartype::Spin => {
            let mut reduced: Vec<T> = Vec::with_capacity(sorted.len());
            for item in sorted {
                if reduced.last() == Some(&item) {
                    reduced.pop();
                } else {
                    reduced.push(item);
                }
            }
            reduced
        }
    }
}

/// Expand `bias · Π key` from `source` into `target` monomials.
///
/// `key` must already be reduced. Each subset `S` of a `k`-element key
/// receives `bias · 2^|S| · (-1)^(k-|S|)` for SPIN to BINARY and
/// `bias / 2^k` for BINARY to SPIN; a same-domain call yields the term
/// unchanged.
///
/// # Errors
///
/// Returns [`ModelError::InvalidArgument`] if the domains differ and `key`
/// has more than [`MAX_CONVERSION_ARITY`] elements.
pub(crate) fn expand<T: Clone>(
    key: &[T],
    bias: f64,
    source: Vartype,
    target: Vartype,
) -> Result<Vec<(Vec<T>, f64)>, ModelError> {
    if source == target {
        return Ok(vec![(key.to_vec(), bias)]);
    }
    check_arity(key.len())?;
    let k = key.len();
    let mut terms = Vec::with_capacity(1 << k);
    for mask in 0..(1_usize << k) {
        let subset: Vec<T> = key
            .iter()
            .enumerate()
            .filter(|(i, _)| (mask >> i) & 1 == 1)
            .map(|(_, item)| item.clone())
            .collect();
        let coefficient = match target {
            Vartype::Binary => {
                let sign = if (k - subset.len()) % 2 == 0 { 1.0 } else { -1.0 };
                sign * 2_f64.powi(subset.len() as i32)
            }
            Vartype::Spin => 2_f64.powi(-(k as i32)),
        };
        terms.push((subset, bias * coefficient));
    }
    Ok(terms)
}

pub(crate) fn check_arity(arity: usize) -> Result<(), ModelError> {
    if arity > MAX_CONVERSION_ARITY {
        return Err(ModelError::invalid_argument(format!(
            "term of arity {arity} exceeds the conversion limit of {MAX_CONVERSION_ARITY}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{MAX_CONVERSION_ARITY, expand, reduce};
    use crate::types::Vartype;

    #[test]
    fn spin_pairs_cancel() {
        assert_eq!(reduce(&[3, 1, 3], Vartype::Spin), vec![1]);
        assert_eq!(reduce(&[2, 2, 2], Vartype::Spin), vec![2]);
        assert_eq!(reduce(&[4, 4], Vartype::Spin), Vec::<i32>::new());
    }

    #[test]
    fn binary_repeats_collapse() {
        assert_eq!(reduce(&[3, 1, 3], Vartype::Binary), vec![1, 3]);
        assert_eq!(reduce(&[4, 4], Vartype::Binary), vec![4]);
    }

    #[test]
    fn spin_to_binary_expansion() {
        // s0 s1 = 4 b0 b1 - 2 b0 - 2 b1 + 1
        let mut terms = expand(&[0, 1], 1.0, Vartype::Spin, Vartype::Binary).unwrap();
        terms.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            terms,
            vec![
                (vec![], 1.0),
                (vec![0], -2.0),
                (vec![0, 1], 4.0),
                (vec![1], -2.0),
            ]
        );
    }

    #[test]
    fn binary_to_spin_expansion() {
        let terms = expand(&[7, 8, 9], 8.0, Vartype::Binary, Vartype::Spin).unwrap();
        assert_eq!(terms.len(), 8);
        assert!(terms.iter().all(|(_, bias)| *bias == 1.0));
    }

    #[test]
    fn wide_keys_refuse_to_change_domain() {
        let key: Vec<usize> = (0..64).collect();
        let err = expand(&key, 1.0, Vartype::Binary, Vartype::Spin).unwrap_err();
        assert_eq!(err.code(), "ARGUMENT_INVALID");
        let widest: Vec<usize> = (0..MAX_CONVERSION_ARITY + 1).collect();
        assert!(expand(&widest, 1.0, Vartype::Spin, Vartype::Binary).is_err());

        let same = expand(&key, 1.0, Vartype::Spin, Vartype::Spin).unwrap();
        assert_eq!(same, vec![(key, 1.0)]);
    }
}
