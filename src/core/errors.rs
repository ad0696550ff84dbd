use thiserror::Error;

/// Coarse classification of engine failures, for consumers (a CLI or report
/// layer) that only need to know what broke, not the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed vector/matrix sizes. A construction bug, never recoverable.
    Dimension,
    /// An operator or measurement addressed a qubit the register does not have.
    QubitIndex,
    /// Probability mass drifted away from unity. Signals an engine bug.
    Normalization,
    /// A collapse retained numerically zero probability mass. Signals invalid
    /// protocol sequencing.
    ImpossibleOutcome,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Matrix is not Unitary (U·U† != I)")]
    NonUnitary,

    #[error("Matrix must be square")]
    NotSquareMatrix,

    #[error("Matrix dimension must be a power of two")]
    InvalidDimensions,

    #[error("Qubit {0} cannot be both control and target")]
    ControlTargetOverlap(usize),

    #[error("Duplicate qubit index found: {0}")]
    DuplicateQubit(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("A register needs at least one qubit, got {0}")]
    EmptyRegister(usize),

    #[error("Expected a vector of {expected} amplitudes, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Vector is not normalized. Norm squared: {0}")]
    NotNormalized(f64),

    #[error("A classical outcome must be 0 or 1, got {0}")]
    InvalidOutcome(u8),

    #[error("Qubit index {index} out of bounds for {num_qubits}-qubit register")]
    IndexOutOfBounds { index: usize, num_qubits: usize },

    #[error("Gate acts on {gate_qubits} qubit(s) but {targets} target(s) were given")]
    ArityMismatch { gate_qubits: usize, targets: usize },

    #[error("Marginal probabilities sum to {0}, expected 1 within 1e-9")]
    NormalizationBroken(f64),

    #[error("Outcome {outcome} on qubit {qubit} retains probability mass {mass:.3e}")]
    ImpossibleOutcome { qubit: usize, outcome: u8, mass: f64 },

    #[error("Gate error: {0}")]
    Gate(#[from] GateError),
}

impl StateError {
    /// Maps the variant onto the four externally documented failure kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StateError::EmptyRegister(_)
            | StateError::DimensionMismatch { .. }
            | StateError::NotNormalized(_)
            | StateError::InvalidOutcome(_)
            | StateError::Gate(_) => ErrorKind::Dimension,
            StateError::IndexOutOfBounds { .. } | StateError::ArityMismatch { .. } => {
                ErrorKind::QubitIndex
            }
            StateError::NormalizationBroken(_) => ErrorKind::Normalization,
            StateError::ImpossibleOutcome { .. } => ErrorKind::ImpossibleOutcome,
        }
    }
}
