//! # qteleport
//!
//! State-vector simulation of the quantum teleportation protocol: an
//! arbitrary single-qubit state is transferred from sender to receiver using
//! a pre-shared Bell pair and two classical bits.
//!
//! ```
//! use qteleport::run_teleportation;
//! use std::f64::consts::PI;
//!
//! let mut rng = rand::rng();
//! let result = run_teleportation(PI / 3.0, &mut rng).unwrap();
//! assert!(result.fidelity > 0.99);
//! ```

mod core;
pub mod protocols;
mod sampler;

pub use crate::core::{
    Gate, MeasurementOutcome, NORM_TOLERANCE, RandomSource, SUCCESS_THRESHOLD, StateVector,
    errors, sample, state_fidelity, utils,
};
pub use crate::protocols::{TeleportationResult, run_teleportation};
pub use crate::sampler::Sampler;
