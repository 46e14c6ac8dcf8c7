//! Reduced singular value decomposition of the snapshot matrix.
//!
//! Delegates the factorization to nalgebra's Golub–Kahan SVD and normalizes
//! its output into a [`Decomposition`]: economy-sized factors, singular values
//! in descending order, and `V` stored with one column per singular triplet.

use super::error::Error;
use crate::model::decomposition::Decomposition;
use crate::model::snapshot::SnapshotMatrix;
use log::debug;
use nalgebra::{DMatrix, DVector};

/// Convergence controls passed to the SVD routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdOptions {
    /// Off-diagonal magnitude treated as zero during bidiagonal QR sweeps.
    pub epsilon: f64,
    /// Upper bound on QR sweeps; `0` means no limit.
    pub max_iterations: usize,
}

impl Default for SvdOptions {
    fn default() -> Self {
        Self {
            epsilon: 5.0 * f64::EPSILON,
            max_iterations: 0,
        }
    }
}

/// Computes `M = U·diag(S)·Vᵗ` with `r = min(point_count, timestep_count)`.
pub fn decompose_matrix(matrix: &SnapshotMatrix) -> Result<Decomposition, Error> {
    decompose_with(matrix, &SvdOptions::default())
}

pub fn decompose_with(
    matrix: &SnapshotMatrix,
    options: &SvdOptions,
) -> Result<Decomposition, Error> {
    let (points, steps) = matrix.shape();
    if points == 0 || steps == 0 {
        return Ok(Decomposition {
            u: DMatrix::zeros(points, 0),
            s: DVector::zeros(0),
            v: DMatrix::zeros(steps, 0),
        });
    }

    if matrix.as_matrix().iter().any(|v| !v.is_finite()) {
        return Err(Error::NumericalFailure(
            "snapshot matrix contains NaN or infinite values".to_string(),
        ));
    }

    debug!("computing SVD of {points} x {steps} matrix");
    let svd = matrix
        .as_matrix()
        .clone()
        .try_svd(true, true, options.epsilon, options.max_iterations)
        .ok_or_else(|| {
            Error::NumericalFailure(format!(
                "no convergence within {} iterations",
                options.max_iterations
            ))
        })?;

    let u = svd.u.ok_or_else(|| {
        Error::NumericalFailure("left singular vectors were not computed".to_string())
    })?;
    let v_t = svd.v_t.ok_or_else(|| {
        Error::NumericalFailure("right singular vectors were not computed".to_string())
    })?;
    let s = svd.singular_values;
    let rank = s.len();

    let mut order: Vec<usize> = (0..rank).collect();
    order.sort_by(|&a, &b| s[b].total_cmp(&s[a]));

    Ok(Decomposition {
        u: DMatrix::from_fn(points, rank, |i, j| u[(i, order[j])]),
        s: DVector::from_fn(rank, |j, _| s[order[j]]),
        v: DMatrix::from_fn(steps, rank, |i, j| v_t[(order[j], i)]),
    })
}
