//! Utility functions for quantum operations.
//!
//! This module contains helper functions for:
//! - Operator expansion to larger systems.
//! - Bit manipulation for state indices.

use ndarray::Array2;
use num_complex::Complex64;

/// Generates the full operator matrix ($2^N \times 2^N$) for the whole system.
///
/// It expands a local operator acting on `targets` (and controlled by `controls`)
/// to an operator on the full system of `num_total_qubits`.
///
/// Basis-index convention: little-endian, bit `q` of a basis index holds the
/// computational-basis value of qubit `q`. Every index computation in the
/// engine goes through this function or [`extract_bits`]/[`deposit_bits`],
/// so the convention cannot diverge between gate application, marginal
/// probabilities and collapse.
///
/// # Arguments
///
/// * `num_total_qubits` - Total number of qubits in the system.
/// * `matrix` - The matrix representation of the local gate.
/// * `targets` - Indices of the target qubits.
/// * `controls` - Indices of the control qubits.
pub fn expand_operator(
    num_total_qubits: usize,
    matrix: &Array2<Complex64>,
    targets: &[usize],
    controls: &[usize],
) -> Array2<Complex64> {
    let dim = 1 << num_total_qubits;
    let mut full_matrix = Array2::<Complex64>::zeros((dim, dim));
    // 1 in position c if qubit c is a control qubit
    let mut control_mask = 0usize;
    for &c in controls {
        control_mask |= 1 << c;
    }
    // 1 in position t if qubit t is a target qubit
    let mut target_mask = 0usize;
    for &t in targets {
        target_mask |= 1 << t;
    }
    // Bits that are not targets keep their value
    let passive_mask = !target_mask;
    // Each column corresponds to one input basis state
    for col_idx in 0..dim {
        // Basis states where not all control qubits are 1 pass through untouched
        if (col_idx & control_mask) != control_mask {
            full_matrix[[col_idx, col_idx]] = Complex64::new(1.0, 0.0);
            continue;
        }
        // Gather the target-qubit bits of this basis state into the local basis
        let small_col = extract_bits(col_idx, targets);
        for small_row in 0..matrix.nrows() {
            let val = matrix[[small_row, small_col]];
            if val.norm_sqr() < f64::EPSILON {
                continue;
            }
            // Scatter the local row bits back to their physical positions and
            // recombine with the untouched passive bits
            let new_target_bits = deposit_bits(small_row, targets);
            let row_idx = (col_idx & passive_mask) | new_target_bits;
            full_matrix[[row_idx, col_idx]] = val;
        }
    }
    full_matrix
}

/// Gathers the bits of `value` at positions `indices` into a compact value.
pub(crate) fn extract_bits(value: usize, indices: &[usize]) -> usize {
    let mut result = 0;
    for (i, &pos) in indices.iter().enumerate() {
        if (value >> pos) & 1 == 1 {
            result |= 1 << i;
        }
    }
    result
}

/// Scatters bits from `compact_value` into the positions specified by `indices`.
pub(crate) fn deposit_bits(compact_value: usize, indices: &[usize]) -> usize {
    // Maps the i-th bit of `compact_value` to bit position `indices[i]` in the result.
    let mut result = 0;
    for (i, &pos) in indices.iter().enumerate() {
        if (compact_value >> i) & 1 == 1 {
            result |= 1 << pos;
        }
    }
    result
}

/// Find duplicate in a slice of usize
pub fn find_duplicate(indices: &[usize]) -> Option<usize> {
    let mut seen = std::collections::HashSet::new();
    indices.iter().find(|&&idx| !seen.insert(idx)).copied()
}
