use super::support::{BACKINGS, all_states, triangle_with_tail};
use super::*;

#[test]
fn test_binary_to_spin_coefficients() {
    for backing in BACKINGS {
        let binary = BinaryQuadraticModel::new(
            [(0_i64, 1.0)],
            [((0, 1), 4.0)],
            0.0,
            Vartype::Binary,
            backing,
        )
        .unwrap();
        let spin = binary.change_vartype(Vartype::Spin);
        assert_eq!(spin.vartype(), Vartype::Spin);
        assert_eq!(spin.linear(), Linear::from([(0, 1.5), (1, 1.0)]));
        assert_eq!(spin.quadratic(), Quadratic::from([((0, 1), 1.0)]));
        assert_eq!(spin.offset(), 1.5);
        assert_eq!(binary.vartype(), Vartype::Binary);
    }
}

#[test]
fn test_spin_to_binary_coefficients() {
    let spin = BinaryQuadraticModel::new(
        [(0_i64, 1.0), (1, -2.0)],
        [((0, 1), -1.0)],
        0.5,
        Vartype::Spin,
        Backing::Sparse,
    )
    .unwrap();
    let binary = spin.change_vartype(Vartype::Binary);
    // h' = 2h - 2ΣJ, J' = 4J, c' = c - Σh + ΣJ
    assert_eq!(binary.linear(), Linear::from([(0, 4.0), (1, -2.0)]));
    assert_eq!(binary.quadratic(), Quadratic::from([((0, 1), -4.0)]));
    assert_eq!(binary.offset(), 0.5);
}

#[test]
fn test_round_trip_restores_biases() {
    for backing in BACKINGS {
        for vartype in [Vartype::Spin, Vartype::Binary] {
            let model = triangle_with_tail(vartype, backing);
            let back = model
                .change_vartype(vartype.flipped())
                .change_vartype(vartype);
            assert_eq!(back.linear(), model.linear());
            assert_eq!(back.quadratic(), model.quadratic());
            assert_eq!(back.offset(), model.offset());
        }
    }
}

#[test]
fn test_conversion_preserves_energy() {
    for backing in BACKINGS {
        for vartype in [Vartype::Spin, Vartype::Binary] {
            let model = triangle_with_tail(vartype, backing);
            let target = vartype.flipped();
            let converted = model.change_vartype(target);
            for state in all_states(4, vartype) {
                let mapped: Vec<i32> = state
                    .iter()
                    .map(|value| vartype.convert_value(*value, target))
                    .collect();
                assert_eq!(
                    model.energy_array(&state).unwrap(),
                    converted.energy_array(&mapped).unwrap()
                );
            }
        }
    }
}

#[test]
fn test_same_vartype_is_noop() {
    let mut model = triangle_with_tail(Vartype::Spin, Backing::Dense);
    let before = model.clone();
    model.interaction_matrix();
    model.change_vartype_inplace(Vartype::Spin);
    assert_eq!(model.to_dense_matrix(), before.to_dense_matrix());
    assert!(!model.matrix_cache_dirty());
}

#[test]
fn test_inplace_conversion_invalidates_cache() {
    let mut model = triangle_with_tail(Vartype::Binary, Backing::Sparse);
    model.interaction_matrix();
    model.change_vartype_inplace(Vartype::Spin);
    assert!(model.matrix_cache_dirty());
    assert_eq!(model.vartype(), Vartype::Spin);
}

#[test]
fn test_to_qubo_puts_linear_on_diagonal() {
    let spin = BinaryQuadraticModel::new(
        [(0_i64, 1.0), (1, -2.0)],
        [((0, 1), -1.0)],
        0.5,
        Vartype::Spin,
        Backing::Dense,
    )
    .unwrap();
    let (qubo, offset) = spin.to_qubo();
    assert_eq!(
        qubo,
        Quadratic::from([((0, 0), 4.0), ((0, 1), -4.0), ((1, 1), -2.0)])
    );
    assert_eq!(offset, 0.5);

    let rebuilt = BinaryQuadraticModel::from_qubo(qubo, offset, Backing::Dense).unwrap();
    for state in all_states(2, Vartype::Spin) {
        let bits: Vec<i32> = state
            .iter()
            .map(|s| Vartype::Spin.convert_value(*s, Vartype::Binary))
            .collect();
        assert_eq!(
            spin.energy_array(&state).unwrap(),
            rebuilt.energy_array(&bits).unwrap()
        );
    }
}

#[test]
fn test_to_ising_of_binary_model() {
    let binary = BinaryQuadraticModel::from_qubo(
        [((0_i64, 0), 1.0), ((0, 1), 4.0)],
        0.0,
        Backing::Sparse,
    )
    .unwrap();
    let (h, j, offset) = binary.to_ising();
    assert_eq!(h, Linear::from([(0, 1.5), (1, 1.0)]));
    assert_eq!(j, Quadratic::from([((0, 1), 1.0)]));
    assert_eq!(offset, 1.5);
    assert_eq!(binary.vartype(), Vartype::Binary);
}
