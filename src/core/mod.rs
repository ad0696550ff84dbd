pub mod errors;
mod fidelity;
mod gates;
mod measurement;
mod state;
pub mod utils;

pub use fidelity::{SUCCESS_THRESHOLD, state_fidelity};
pub use gates::Gate;
pub use measurement::{MeasurementOutcome, RandomSource, sample};
pub use state::{NORM_TOLERANCE, StateVector};
