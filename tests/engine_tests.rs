//! Integration tests for the state-vector engine: register construction,
//! gate application, marginal probabilities, collapse and fidelity.

use ndarray::array;
use num_complex::Complex64;
use qteleport::errors::{ErrorKind, GateError, StateError};
use qteleport::{Gate, RandomSource, StateVector, sample, state_fidelity};
use std::f64::consts::PI;

const TOL: f64 = 1e-9;

/// Deterministic draw source that always returns the same value.
struct ConstSource(f64);

impl RandomSource for ConstSource {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

#[test]
fn fresh_register_measures_zero_everywhere() {
    let state = StateVector::new(3).unwrap();
    for qubit in 0..3 {
        let (p0, p1) = state.probabilities(qubit).unwrap();
        assert!((p0 - 1.0).abs() < TOL);
        assert!(p1.abs() < TOL);
    }
}

#[test]
fn empty_register_is_rejected() {
    let err = StateVector::new(0).unwrap_err();
    assert_eq!(err, StateError::EmptyRegister(0));
    assert_eq!(err.kind(), ErrorKind::Dimension);
}

#[test]
fn from_amplitudes_validates_input() {
    // Not a power of two
    let err = StateVector::from_amplitudes(array![c(1.0), c(0.0), c(0.0)]).unwrap_err();
    assert!(matches!(err, StateError::DimensionMismatch { .. }));

    // Not normalized
    let err = StateVector::from_amplitudes(array![c(0.8), c(0.8)]).unwrap_err();
    assert!(matches!(err, StateError::NotNormalized(_)));

    let ok = StateVector::from_amplitudes(array![c(0.6), c(0.8)]).unwrap();
    assert_eq!(ok.num_qubits(), 1);
}

#[test]
fn ry_prepares_documented_probabilities() {
    let theta = PI / 3.0;
    let mut state = StateVector::new(3).unwrap();
    state.apply(&Gate::ry(theta), &[0]).unwrap();

    let (p0, p1) = state.probabilities(0).unwrap();
    assert!((p0 - 0.75).abs() < TOL, "P0 = {p0}");
    assert!((p1 - 0.25).abs() < TOL, "P1 = {p1}");

    // Untouched qubits are unaffected
    let (p0, _) = state.probabilities(1).unwrap();
    assert!((p0 - 1.0).abs() < TOL);
}

#[test]
fn bell_pair_occupies_the_expected_basis_states() {
    let mut state = StateVector::new(3).unwrap();
    state.apply(&Gate::h(), &[1]).unwrap();
    state.apply(&Gate::cnot(), &[1, 2]).unwrap();

    // Little-endian: |q2 q1 q0> = |000> is index 0, |110> is index 6
    let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
    assert!((state.amplitude(0) - c(inv_sqrt2)).norm() < TOL);
    assert!((state.amplitude(6) - c(inv_sqrt2)).norm() < TOL);

    let occupied: f64 = state.amplitude(0).norm_sqr() + state.amplitude(6).norm_sqr();
    assert!((occupied - 1.0).abs() < TOL);
}

#[test]
fn apply_rejects_bad_targets() {
    let mut state = StateVector::new(3).unwrap();

    let err = state.apply(&Gate::h(), &[3]).unwrap_err();
    assert!(matches!(err, StateError::IndexOutOfBounds { index: 3, .. }));
    assert_eq!(err.kind(), ErrorKind::QubitIndex);

    let err = state.apply(&Gate::cnot(), &[0]).unwrap_err();
    assert!(matches!(
        err,
        StateError::ArityMismatch {
            gate_qubits: 2,
            targets: 1
        }
    ));

    let err = state.apply(&Gate::cnot(), &[1, 1]).unwrap_err();
    assert_eq!(err, StateError::Gate(GateError::DuplicateQubit(1)));
}

#[test]
fn norm_is_conserved_under_gate_sequences() {
    let mut state = StateVector::new(3).unwrap();
    state.apply(&Gate::ry(1.234), &[0]).unwrap();
    state.apply(&Gate::h(), &[1]).unwrap();
    state.apply(&Gate::cnot(), &[1, 2]).unwrap();
    state.apply(&Gate::cnot(), &[0, 1]).unwrap();
    state.apply(&Gate::h(), &[0]).unwrap();
    state.apply(&Gate::x(), &[2]).unwrap();
    state.apply(&Gate::z(), &[2]).unwrap();
    state.apply(&Gate::cz(), &[0, 2]).unwrap();

    assert!((state.norm_sqr() - 1.0).abs() < TOL);
}

#[test]
fn probabilities_are_idempotent() {
    let mut state = StateVector::new(2).unwrap();
    state.apply(&Gate::ry(0.7), &[0]).unwrap();
    state.apply(&Gate::h(), &[1]).unwrap();

    let first = state.probabilities(0).unwrap();
    let second = state.probabilities(0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn collapse_renormalizes_the_survivors() {
    let mut state = StateVector::new(1).unwrap();
    state.apply(&Gate::h(), &[0]).unwrap();
    state.collapse(0, 1).unwrap();

    assert!((state.norm_sqr() - 1.0).abs() < TOL);
    assert!((state.amplitude(1) - c(1.0)).norm() < TOL);
    let (p0, p1) = state.probabilities(0).unwrap();
    assert!(p0.abs() < TOL);
    assert!((p1 - 1.0).abs() < TOL);
}

#[test]
fn renormalize_restores_unit_norm() {
    let mut state = StateVector::from_amplitudes(array![c(0.6), c(0.8)]).unwrap();
    state.collapse(0, 0).unwrap();
    state.renormalize();

    assert!((state.norm_sqr() - 1.0).abs() < TOL);
    assert_eq!(state.amplitudes().len(), 2);
    assert!((state.amplitude(0) - c(1.0)).norm() < TOL);
}

#[test]
fn collapse_rejects_out_of_domain_outcomes() {
    let mut state = StateVector::new(1).unwrap();
    let err = state.collapse(0, 2).unwrap_err();
    assert_eq!(err, StateError::InvalidOutcome(2));
    assert_eq!(err.kind(), ErrorKind::Dimension);
}

#[test]
fn collapse_onto_empty_branch_fails() {
    let mut state = StateVector::new(2).unwrap();
    let err = state.collapse(1, 1).unwrap_err();
    assert!(matches!(
        err,
        StateError::ImpossibleOutcome {
            qubit: 1,
            outcome: 1,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::ImpossibleOutcome);
}

#[test]
fn gate_constructor_rejects_non_unitary_matrices() {
    let err = Gate::new(ndarray::arr2(&[
        [c(1.0), c(1.0)],
        [c(0.0), c(1.0)],
    ]))
    .unwrap_err();
    assert_eq!(err, GateError::NonUnitary);

    let err = Gate::new(ndarray::arr2(&[[c(1.0), c(0.0)]])).unwrap_err();
    assert_eq!(err, GateError::NotSquareMatrix);
}

#[test]
fn library_gates_are_unitary() {
    let eye2 = ndarray::Array2::<Complex64>::eye(2);
    let eye4 = ndarray::Array2::<Complex64>::eye(4);

    for gate in [Gate::i(), Gate::x(), Gate::z(), Gate::h(), Gate::ry(PI / 5.0)] {
        let dagger = gate.matrix.t().mapv(|v| v.conj());
        let product = gate.matrix.dot(&dagger);
        assert!(
            product
                .iter()
                .zip(eye2.iter())
                .all(|(a, b)| (*a - *b).norm() < TOL)
        );
    }

    for gate in [Gate::cnot(), Gate::cz()] {
        let dagger = gate.matrix.t().mapv(|v| v.conj());
        let product = gate.matrix.dot(&dagger);
        assert!(
            product
                .iter()
                .zip(eye4.iter())
                .all(|(a, b)| (*a - *b).norm() < TOL)
        );
    }
}

#[test]
fn sample_is_deterministic_given_the_draws() {
    let theta = PI / 3.0;

    let mut first = StateVector::new(1).unwrap();
    first.apply(&Gate::ry(theta), &[0]).unwrap();
    let mut second = first.clone();

    let a = sample(&mut first, 0, &mut ConstSource(0.4)).unwrap();
    let b = sample(&mut second, 0, &mut ConstSource(0.4)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.bit, 0);
    assert!((a.probability - 0.75).abs() < TOL);
}

#[test]
fn sample_tie_at_the_boundary_resolves_to_zero() {
    let mut state = StateVector::new(1).unwrap();
    state.apply(&Gate::ry(PI / 3.0), &[0]).unwrap();

    // Draw exactly P0
    let outcome = sample(&mut state, 0, &mut ConstSource(0.75)).unwrap();
    assert_eq!(outcome.bit, 0);
}

#[test]
fn sample_never_picks_a_zero_probability_outcome() {
    // Payload |1>: P0 = 0, so even a 0.0 draw must yield bit 1
    let mut state = StateVector::new(1).unwrap();
    state.apply(&Gate::x(), &[0]).unwrap();

    let outcome = sample(&mut state, 0, &mut ConstSource(0.0)).unwrap();
    assert_eq!(outcome.bit, 1);
    assert!((outcome.probability - 1.0).abs() < TOL);
}

#[test]
fn fidelity_of_identical_and_orthogonal_states() {
    let zero = (c(1.0), c(0.0));
    let one = (c(0.0), c(1.0));
    let plus = (c(1.0 / 2.0_f64.sqrt()), c(1.0 / 2.0_f64.sqrt()));

    assert!((state_fidelity(&zero, &zero).unwrap() - 1.0).abs() < TOL);
    assert!(state_fidelity(&zero, &one).unwrap() < TOL);
    assert!((state_fidelity(&zero, &plus).unwrap() - 0.5).abs() < TOL);
}

#[test]
fn fidelity_ignores_global_phase() {
    let half = PI / 6.0;
    let psi = (c(half.cos()), c(half.sin()));
    let minus_psi = (c(-half.cos()), c(-half.sin()));
    assert!((state_fidelity(&psi, &minus_psi).unwrap() - 1.0).abs() < TOL);
}

#[test]
fn fidelity_rejects_unnormalized_input() {
    let bad = (c(1.0), c(1.0));
    let good = (c(1.0), c(0.0));
    let err = state_fidelity(&bad, &good).unwrap_err();
    assert!(matches!(err, StateError::NotNormalized(_)));
    assert_eq!(err.kind(), ErrorKind::Dimension);
}
