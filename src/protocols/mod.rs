//! Quantum communication protocols built on the simulation engine.

pub mod teleportation;

pub use teleportation::{TeleportationResult, run as run_teleportation};
