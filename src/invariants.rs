//! Tensor invariants computed from bulk block data.
//!
//! Stress rows follow the symmetric Voigt convention used by the archive
//! format: S11, S22, S33, S12, S13, S23.

use crate::error::ShapeError;
use nalgebra::{DMatrix, DVector};

/// Number of components in a symmetric 3D tensor row.
pub const TENSOR_WIDTH: usize = 6;

/// Compute sign(trace(S)) for a batch of stress tensors.
///
/// `tensors` is an N x 6 matrix, one tensor per row. Returns one value per
/// row, +1.0 when the trace (S11 + S22 + S33) is non-negative and -1.0
/// otherwise, in row order.
///
/// Fails with [`ShapeError`] when the rows are not 6 components wide. The
/// caller is expected to hand over well-formed tensor blocks; a mismatch
/// here means the archive itself is malformed.
pub fn sign_of_trace(tensors: &DMatrix<f64>) -> Result<DVector<f64>, ShapeError> {
    if tensors.ncols() != TENSOR_WIDTH {
        return Err(ShapeError {
            found: tensors.ncols(),
        });
    }
    let signs = tensors
        .row_iter()
        .map(|row| {
            let trace = row[0] + row[1] + row[2];
            if trace < 0.0 {
                -1.0
            } else {
                1.0
            }
        })
        .collect::<Vec<f64>>();
    Ok(DVector::from_vec(signs))
}

/// Von Mises equivalent stress of one tensor row (S11, S22, S33, S12, S13, S23).
pub fn von_mises(row: &[f64]) -> f64 {
    let (s11, s22, s33) = (row[0], row[1], row[2]);
    let (s12, s13, s23) = (row[3], row[4], row[5]);
    let s_vm = ((s11 - s22).powi(2)
        + (s22 - s33).powi(2)
        + (s33 - s11).powi(2)
        + 6.0 * (s12.powi(2) + s13.powi(2) + s23.powi(2)))
        / 2.0;
    s_vm.sqrt()
}
