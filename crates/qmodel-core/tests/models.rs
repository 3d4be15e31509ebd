#![allow(clippy::float_cmp)]

use qmodel_core::{
    AnyPolynomialModel, AnyQuadraticModel, Backing, BinaryPolynomialModel, BinaryQuadraticModel,
    Linear, Sample, Vartype, state_and_energy,
};
use qmodel_labels::LabelKind;

fn init_logging() {
    let _ = qmodel_tools::enable_logging(Some("debug"));
}

fn states(labels: &[&str], vartype: Vartype) -> Vec<Sample<String>> {
    let low = Vartype::Spin.convert_value(-1, vartype);
    (0..1_u32 << labels.len())
        .map(|bits| {
            labels
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let value = if (bits >> i) & 1 == 1 { 1 } else { low };
                    (label.to_string(), value)
                })
                .collect()
        })
        .collect()
}

fn pair(u: &str, v: &str) -> (String, String) {
    (u.to_string(), v.to_string())
}

fn key(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

#[test]
fn test_quadratic_and_polynomial_models_agree() {
    init_logging();
    for vartype in [Vartype::Spin, Vartype::Binary] {
        for backing in [Backing::Dense, Backing::Sparse] {
            let bqm = BinaryQuadraticModel::new(
                [("a".to_string(), 1.0), ("b".to_string(), -0.5)],
                [(pair("a", "b"), 2.0), (pair("b", "c"), -1.5), (pair("c", "a"), 0.25)],
                0.75,
                vartype,
                backing,
            )
            .unwrap();
            let bpm = BinaryPolynomialModel::new(
                [
                    (key(&["a"]), 1.0),
                    (key(&["b"]), -0.5),
                    (key(&["a", "b"]), 2.0),
                    (key(&["b", "c"]), -1.5),
                    (key(&["a", "c"]), 0.25),
                    (key(&[]), 0.75),
                ],
                vartype,
            );
            assert_eq!(bqm.variables(), bpm.variables());

            let samples = states(&["a", "b", "c"], vartype);
            assert_eq!(bqm.energies(&samples).unwrap(), bpm.energies(&samples).unwrap());

            let target = vartype.flipped();
            let bqm = bqm.change_vartype(target);
            let bpm = bpm.change_vartype(target).unwrap();
            let samples = states(&["a", "b", "c"], target);
            assert_eq!(bqm.energies(&samples).unwrap(), bpm.energies(&samples).unwrap());
        }
    }
}

#[test]
fn test_qubo_scenario() {
    init_logging();
    for backing in [Backing::Dense, Backing::Sparse] {
        let model = BinaryQuadraticModel::from_qubo(
            [((0_i64, 0_i64), 1.0), ((0, 1), -1.0), ((1, 1), 2.0)],
            0.0,
            backing,
        )
        .unwrap();
        assert_eq!(model.vartype(), Vartype::Binary);
        assert_eq!(model.energy(&Sample::from([(0, 1), (1, 1)])).unwrap(), 2.0);
    }
}

#[test]
fn test_fix_variable_scenario() {
    init_logging();
    for backing in [Backing::Dense, Backing::Sparse] {
        let mut model = BinaryQuadraticModel::new(
            [(0_i64, 1.0), (1, 2.0)],
            [((0, 1), 3.0)],
            0.0,
            Vartype::Spin,
            backing,
        )
        .unwrap();
        model.fix_variable(&0, 1).unwrap();
        assert_eq!(model.linear(), Linear::from([(1, 5.0)]));
        assert!(model.quadratic().is_empty());
        assert_eq!(model.offset(), 1.0);
    }
}

#[test]
fn test_self_loops_rejected_by_quadratic_reduced_by_polynomial() {
    init_logging();
    let mut bqm = BinaryQuadraticModel::new(
        [(0_i64, 1.0)],
        [((0, 1), 1.0)],
        0.0,
        Vartype::Spin,
        Backing::Sparse,
    )
    .unwrap();
    let before = bqm.to_dense_matrix();
    assert_eq!(
        bqm.add_interaction(&1, &1, 2.0).unwrap_err().code(),
        "INTERACTION_SELF_LOOP"
    );
    assert_eq!(bqm.to_dense_matrix(), before);

    let mut spin = BinaryPolynomialModel::from_hising([(vec![0_i64, 1], 1.0)]);
    spin.add_interaction(&[1, 1], 2.0);
    assert_eq!(spin.offset(), 2.0);

    let mut binary = BinaryPolynomialModel::from_hubo([(vec![0_i64, 1], 1.0)]);
    binary.add_interaction(&[1, 1], 2.0);
    assert_eq!(binary.polynomial_bias(&[1]).unwrap(), 2.0);
}

#[test]
fn test_tuple_labels_through_dispatch() {
    init_logging();
    let cell = |x: i64, y: i64, z: i64| (x, y, z);
    let bqm = BinaryQuadraticModel::new(
        [(cell(0, 0, 0), 1.0)],
        [((cell(0, 0, 0), cell(0, 0, 1)), -2.0)],
        0.0,
        Vartype::Spin,
        Backing::Dense,
    )
    .unwrap();
    let document = bqm.to_serializable().unwrap();
    let any = AnyQuadraticModel::from_serializable(&document).unwrap();
    assert_eq!(any.label_kind(), LabelKind::IntTuple3);
    let AnyQuadraticModel::IntTuple3(decoded) = any else {
        panic!("expected int_tuple3 labels");
    };
    assert_eq!(decoded.quadratic(), bqm.quadratic());
    assert_eq!(decoded.backing(), Backing::Dense);

    let site = |a: &str, b: &str| (a.to_string(), b.to_string());
    let bpm = BinaryPolynomialModel::new(
        [
            (vec![site("r", "0"), site("r", "1"), site("g", "0")], 1.5),
            (vec![site("g", "0")], -1.0),
        ],
        Vartype::Binary,
    );
    let any = AnyPolynomialModel::from_serializable(&bpm.to_serializable().unwrap()).unwrap();
    assert_eq!(any.label_kind(), LabelKind::StrTuple2);
    assert_eq!(any.vartype(), Vartype::Binary);
    assert_eq!(any.num_variables(), 3);
}

#[test]
fn test_raw_solver_state_labelling() {
    init_logging();
    let model = BinaryQuadraticModel::from_ising(
        [("x".to_string(), 1.0), ("y".to_string(), -2.0)],
        [(pair("x", "y"), -1.0)],
        0.0,
        Backing::Sparse,
    )
    .unwrap();
    // BINARY-encoded output from a solver: 0 reads as -1.
    let (sample, energy) = state_and_energy(&model, &[1, 0], 10.0, &[]).unwrap();
    assert_eq!(sample, Sample::from([("x".to_string(), 1), ("y".to_string(), -1)]));
    assert_eq!(energy, 14.0);
}
