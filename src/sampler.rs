use crate::core::errors::StateError;
use crate::core::{RandomSource, sample};
use crate::protocols::teleportation;

use std::collections::HashMap;

/// Multi-shot statistics driver for the teleportation protocol.
///
/// Each shot runs the full protocol on a fresh register, then performs one
/// extra computational-basis measurement of Bob's qubit purely for
/// verification, and tallies the joint outcome. The histogram keys are
/// 3-bit strings written most significant qubit first (`c2 c1 c0`, Bob's bit
/// leftmost), so `counts["100"]` is the number of shots where Alice observed
/// `a = 0`, `b = 0` and Bob's qubit measured 1.
#[derive(Debug, Clone, Default)]
pub struct Sampler;

impl Sampler {
    pub fn new() -> Self {
        Self
    }

    /// Runs `num_shots` independent protocol executions.
    ///
    /// All randomness (two Bell-measurement draws plus the verification draw
    /// per shot) comes from the one injected `source` in a fixed order, so a
    /// seeded generator reproduces the histogram exactly.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        theta: f64,
        num_shots: usize,
        source: &mut R,
    ) -> Result<HashMap<String, usize>, StateError> {
        let mut counts = HashMap::new();

        for _ in 0..num_shots {
            let outcome = Self::one_shot(theta, source)?;
            *counts.entry(outcome).or_insert(0) += 1;
        }

        Ok(counts)
    }

    fn one_shot<R: RandomSource + ?Sized>(
        theta: f64,
        source: &mut R,
    ) -> Result<String, StateError> {
        let result = teleportation::run(theta, source)?;
        let (a, b) = result.classical_bits;

        // Verification-only measurement of Bob's corrected qubit
        let (alpha, beta) = result.final_qubit_state;
        let mut receiver = crate::core::StateVector::from_amplitudes(ndarray::array![alpha, beta])?;
        let bob = sample(&mut receiver, 0, source)?;

        Ok(format!("{}{}{}", bob.bit, b, a))
    }
}
