//! State overlap between single-qubit states.

use crate::core::errors::StateError;
use crate::core::state::NORM_TOLERANCE;

use num_complex::Complex64;

/// Documented success threshold for a teleportation run. A policy constant
/// for reporting layers, not enforced by the engine.
pub const SUCCESS_THRESHOLD: f64 = 0.95;

/// Squared inner-product magnitude |⟨a|b⟩|² of two single-qubit states.
///
/// Returns a value in `[0, 1]`; 1 means the states are identical up to a
/// global phase. Both inputs must be 2-amplitude vectors normalized within
/// tolerance.
pub fn state_fidelity(
    a: &(Complex64, Complex64),
    b: &(Complex64, Complex64),
) -> Result<f64, StateError> {
    for state in [a, b] {
        let norm_sqr = state.0.norm_sqr() + state.1.norm_sqr();
        if (norm_sqr - 1.0).abs() > NORM_TOLERANCE {
            return Err(StateError::NotNormalized(norm_sqr));
        }
    }

    let overlap = a.0.conj() * b.0 + a.1.conj() * b.1;
    // Clamp away the float noise that could push |<a|b>|^2 past 1
    Ok(overlap.norm_sqr().min(1.0))
}
