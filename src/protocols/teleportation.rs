//! Quantum Teleportation Protocol.
//!
//! Transfers an arbitrary single-qubit state from a sender (Alice) to a
//! receiver (Bob) using a pre-shared entangled pair and two classical bits,
//! without transmitting the qubit itself. The payload is prepared as
//! `Ry(θ)|0⟩ = cos(θ/2)|0⟩ + sin(θ/2)|1⟩` on qubit 0; qubits 1 and 2 hold
//! the Bell pair (qubit 1 stays with Alice, qubit 2 is Bob's).
//!
//! The protocol is a fixed straight line, not a general circuit engine:
//! prepare → entangle → Bell-measure → classical communication → correct.
//! Any engine error aborts the run; nothing is retried, since every failure
//! here is deterministic and indicates a defect rather than a transient
//! condition.

use crate::core::errors::StateError;
use crate::core::{Gate, RandomSource, StateVector, sample, state_fidelity};

use num_complex::Complex64;
use tracing::debug;

/// Terminal snapshot of a completed teleportation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportationResult {
    /// The two bits Alice obtained from her Bell measurement, in measurement
    /// order: `(a, b)` with `a` from qubit 0 and `b` from qubit 1.
    pub classical_bits: (u8, u8),
    /// Bob's qubit after corrections, as `(amplitude of |0⟩, amplitude of |1⟩)`.
    pub final_qubit_state: (Complex64, Complex64),
    /// Overlap |⟨ψ_original|ψ_final⟩|² between the payload and Bob's qubit.
    pub fidelity: f64,
}

/// Runs the teleportation protocol for a payload `Ry(theta)|0⟩`.
///
/// All measurement randomness comes from `source`; with a fixed draw
/// sequence the entire run is reproducible.
pub fn run<R: RandomSource + ?Sized>(
    theta: f64,
    source: &mut R,
) -> Result<TeleportationResult, StateError> {
    let mut state = StateVector::new(3)?;

    // Step 1: prepare Alice's payload on qubit 0
    debug!(theta, "preparing payload state");
    state.apply(&Gate::ry(theta), &[0])?;

    // Step 2: Bell pair (|00> + |11>)/sqrt(2) between qubits 1 and 2
    debug!("creating Bell pair between qubits 1 and 2");
    state.apply(&Gate::h(), &[1])?;
    state.apply(&Gate::cnot(), &[1, 2])?;

    // Step 3: Bell measurement on qubits 0 and 1, qubit 0 strictly first
    debug!("performing Bell measurement");
    state.apply(&Gate::cnot(), &[0, 1])?;
    state.apply(&Gate::h(), &[0])?;
    let a = sample(&mut state, 0, source)?;
    let b = sample(&mut state, 1, source)?;
    debug!(a = a.bit, b = b.bit, "classical bits sent to Bob");

    // Step 4 is the classical channel: a and b reach Bob unmodified.

    // Step 5: conditional corrections on Bob's qubit, X before Z
    if b.bit == 1 {
        state.apply(&Gate::x(), &[2])?;
    }
    if a.bit == 1 {
        state.apply(&Gate::z(), &[2])?;
    }

    // Qubits 0 and 1 are collapsed to |a>|b>, so the register factorizes and
    // Bob's qubit is read off the two basis states consistent with (a, b).
    let base = (a.bit as usize) | ((b.bit as usize) << 1);
    let final_qubit_state = (state.amplitude(base), state.amplitude(base | 0b100));

    let half = theta / 2.0;
    let original = (
        Complex64::new(half.cos(), 0.0),
        Complex64::new(half.sin(), 0.0),
    );
    let fidelity = state_fidelity(&original, &final_qubit_state)?;
    debug!(fidelity, "teleportation complete");

    Ok(TeleportationResult {
        classical_bits: (a.bit, b.bit),
        final_qubit_state,
        fidelity,
    })
}
