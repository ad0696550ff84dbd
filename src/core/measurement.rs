//! Computational-basis measurement of a single qubit.
//!
//! Randomness is an injected dependency: [`sample`] takes any
//! [`RandomSource`], so production code passes a `rand` generator while tests
//! pass a fixed draw sequence and get fully reproducible outcomes.

use crate::core::errors::StateError;
use crate::core::state::StateVector;

use rand::Rng;

/// Supplies uniform draws in `[0, 1)`.
///
/// Blanket-implemented for every [`rand::Rng`], so `rand::rng()` or a seeded
/// `StdRng` can be passed directly.
pub trait RandomSource {
    fn draw(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn draw(&mut self) -> f64 {
        self.random()
    }
}

/// The classical result of measuring one qubit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementOutcome {
    /// The observed classical bit.
    pub bit: u8,
    /// The Born-rule probability this bit was drawn under, before collapse.
    pub probability: f64,
}

/// Measures `qubit` in the computational basis and collapses the state.
///
/// One uniform draw is compared against the 0-outcome probability: a draw at
/// or below `P0` yields bit 0 (ties resolve to 0), anything above yields
/// bit 1. A zero-probability outcome can never be selected by a tie. Given
/// the same state and the same draw sequence the result is identical; there
/// is no hidden randomness.
pub fn sample<R: RandomSource + ?Sized>(
    state: &mut StateVector,
    qubit: usize,
    source: &mut R,
) -> Result<MeasurementOutcome, StateError> {
    let (prob_zero, prob_one) = state.probabilities(qubit)?;

    let roll = source.draw();
    let bit: u8 = if prob_zero > 0.0 && roll <= prob_zero {
        0
    } else {
        1
    };

    state.collapse(qubit, bit)?;

    let probability = if bit == 0 { prob_zero } else { prob_one };
    Ok(MeasurementOutcome { bit, probability })
}
