use super::support::cubic_model;
use super::*;

#[test]
fn test_add_then_remove_cancels_for_every_arity() {
    for vartype in [Vartype::Spin, Vartype::Binary] {
        for arity in 0..=4_i64 {
            let key: Vec<i64> = (0..arity).collect();
            let mut model: BinaryPolynomialModel<i64> = BinaryPolynomialModel::empty(vartype);
            model.add_interaction(&key, 1.25);
            assert_eq!(model.num_variables(), key.len());
            model.add_interaction(&key, -1.25);
            assert_eq!(model.num_variables(), 0, "{vartype} arity {arity}");
            assert!(model.polynomial().is_empty());
        }
    }
}

#[test]
fn test_add_then_cancel_restores_populated_spin_model() {
    let mut model = cubic_model(Vartype::Spin);
    let before = model.clone();

    // [1, 1, 2, 3, 3] reduces to [2], as does [3, 2, 3].
    model.add_interaction(&[1, 1, 2, 3, 3], 0.75);
    assert_eq!(model.polynomial_bias(&[2]).unwrap(), 0.75);
    model.add_interaction(&[3, 2, 3], -0.75);
    assert_eq!(model.polynomial(), before.polynomial());
    assert_eq!(model.variables(), before.variables());
    assert_eq!(model.refcount, before.refcount);

    // A fresh variable enters through a reduced key and leaves on cancel.
    model.add_interaction(&[7, 0, 7, 7], 2.0);
    assert_eq!(model.polynomial_bias(&[0, 7]).unwrap(), 2.0);
    model.add_interaction(&[0, 7], -2.0);
    assert!(!model.has_variable(&7));
    assert_eq!(model.refcount, before.refcount);

    // [4, 4] is the constant term and never interns 4.
    model.add_interaction(&[4, 4], 1.0);
    assert!(!model.has_variable(&4));
    model.add_interaction(&[], -1.0);
    assert_eq!(model.polynomial(), before.polynomial());
    assert_eq!(model.variables(), before.variables());
    assert_eq!(model.refcount, before.refcount);
}

#[test]
fn test_spin_repeats_cancel_in_pairs() {
    let mut model: BinaryPolynomialModel<i64> = BinaryPolynomialModel::empty(Vartype::Spin);
    model.add_interaction(&[1, 1, 2], 3.0);
    assert_eq!(model.variables(), &[2]);
    assert_eq!(model.polynomial_bias(&[2]).unwrap(), 3.0);

    // [a, a] is the constant term.
    model.add_interaction(&[5, 5], 0.5);
    assert_eq!(model.offset(), 0.5);
    assert!(!model.has_variable(&5));

    model.add_interaction(&[2, 3, 3, 3], -3.0);
    assert_eq!(model.polynomial_bias(&[2, 3]).unwrap(), -3.0);
    model.add_interaction(&[3, 2, 2, 2], 3.0);
    assert_eq!(model.num_interactions(), 1);
    assert_eq!(model.variables(), &[2]);
}

#[test]
fn test_binary_repeats_collapse() {
    let mut model: BinaryPolynomialModel<i64> = BinaryPolynomialModel::empty(Vartype::Binary);
    model.add_interaction(&[1, 1, 2], 3.0);
    model.add_interaction(&[2, 1], 1.0);
    assert_eq!(model.polynomial_bias(&[1, 2]).unwrap(), 4.0);
    assert_eq!(model.polynomial_bias(&[2, 2, 1, 1]).unwrap(), 4.0);

    model.add_interaction(&[1, 2, 2], -4.0);
    assert_eq!(model.num_variables(), 0);
}

#[test]
fn test_remove_interaction_reduces_key() {
    let mut model = BinaryPolynomialModel::new(
        [(vec![0_i64, 1], 1.0), (vec![1, 2], 2.0)],
        Vartype::Spin,
    );
    model.remove_interaction(&[0, 1, 2, 2]);
    assert_eq!(model.variables(), &[1, 2]);
    assert_eq!(model.position_of(&2).unwrap(), 1);
    // Missing keys and unknown labels are ignored.
    model.remove_interaction(&[0, 1]);
    model.remove_interaction(&[7, 8]);
    assert_eq!(model.num_interactions(), 1);
}

#[test]
fn test_polynomial_bias_lookup() {
    let model = BinaryPolynomialModel::new(
        [(vec!["a".to_string(), "b".to_string()], 2.0)],
        Vartype::Spin,
    );
    let a = "a".to_string();
    let b = "b".to_string();
    let z = "z".to_string();
    assert_eq!(model.polynomial_bias(&[b.clone(), a.clone()]).unwrap(), 2.0);
    assert_eq!(model.polynomial_bias(&[a.clone()]).unwrap(), 0.0);
    // `z` cancels before lookup.
    assert_eq!(
        model
            .polynomial_bias(&[a.clone(), z.clone(), b, z.clone()])
            .unwrap(),
        2.0
    );
    assert_eq!(
        model.polynomial_bias(&[a, z]).unwrap_err().code(),
        "KEY_NOT_FOUND"
    );
}

#[test]
fn test_key_value_lists_round_trip() {
    let model = BinaryPolynomialModel::new(
        [(vec![2_i64, 0], 1.5), (vec![1], -1.0), (vec![], 0.25)],
        Vartype::Binary,
    );
    let (keys, values) = model.key_value_lists();
    assert_eq!(keys.len(), 3);
    let rebuilt = BinaryPolynomialModel::from_key_value_lists(keys, values, Vartype::Binary).unwrap();
    assert_eq!(rebuilt.polynomial(), model.polynomial());

    let err = BinaryPolynomialModel::<i64>::from_key_value_lists(vec![vec![0]], vec![], Vartype::Spin)
        .unwrap_err();
    assert_eq!(err.code(), "ARGUMENT_INVALID");
}
