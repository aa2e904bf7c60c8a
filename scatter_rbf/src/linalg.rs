/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines the dense solver interface and the default LU based implementation.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # linalg
//!
//! The RBF system is handed to a [`DenseSolver`] as a whole. The interpolator
//! never inspects the factorisation itself; it only receives weights or an error.

use crate::error::{RBFError, Result};
use faer::{Mat, prelude::*};
use std::fmt::Debug;

/// Solves `system * x = rhs` for a square, dense system.
///
/// Implementations must report a singular (or numerically singular) system as an
/// error rather than substituting a regularised or least-squares solution.
pub trait DenseSolver: Send + Sync + Debug {
    fn solve(&self, system: &Mat<f64>, rhs: &Mat<f64>) -> Result<Mat<f64>>;
}

/// Partially pivoted LU factorisation followed by a factorised solve.
///
/// A pivot is treated as zero when
/// `|u_ii| <= pivot_tolerance * n * max_j |u_jj|`. With the default tolerance of
/// machine epsilon this only rejects systems whose rank deficiency is already
/// below working precision, such as those built from duplicate points.
#[derive(Debug, Clone, Copy)]
pub struct PartialPivLuSolver {
    pub pivot_tolerance: f64,
}

impl Default for PartialPivLuSolver {
    fn default() -> Self {
        Self {
            pivot_tolerance: f64::EPSILON,
        }
    }
}

impl DenseSolver for PartialPivLuSolver {
    fn solve(&self, system: &Mat<f64>, rhs: &Mat<f64>) -> Result<Mat<f64>> {
        let n = system.nrows();

        let lu = system.partial_piv_lu();

        let pivots = lu.U().diagonal().column_vector();

        let max_pivot = pivots.iter().fold(0.0f64, |acc, p| acc.max(p.abs()));
        let threshold = self.pivot_tolerance * (n as f64) * max_pivot;

        if let Some((pivot_index, pivot)) = pivots
            .iter()
            .enumerate()
            .find(|(_, p)| p.abs() <= threshold)
        {
            return Err(RBFError::SingularSystem {
                pivot_index,
                pivot: *pivot,
            });
        }

        let weights = lu.solve(rhs);

        check_finite(&weights)?;

        Ok(weights)
    }
}

/// Fails with [`RBFError::NonFiniteWeights`] at the first NaN or infinite entry.
pub(crate) fn check_finite(weights: &Mat<f64>) -> Result<()> {
    for (index, row) in weights.row_iter().enumerate() {
        if row.iter().any(|w| !w.is_finite()) {
            return Err(RBFError::NonFiniteWeights { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::{mat, utils::approx::*};

    #[test]
    fn solves_well_conditioned_system() {
        let a = mat![
            [4.0, 1.0, 0.5],
            [1.0, 3.0, 0.25],
            [0.5, 0.25, 2.0f64],
        ];
        let b = Mat::<f64>::from_fn(3, 1, |i, _| (i + 1) as f64);

        let x = PartialPivLuSolver::default().solve(&a, &b).unwrap();

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * 3.0);
        assert!(&a * &x ~ b);
    }

    #[test]
    fn solves_indefinite_symmetric_system() {
        // Distance matrices are indefinite, so pivoting matters.
        let a = mat![
            [0.0, 1.0, 3.0],
            [1.0, 0.0, 2.0],
            [3.0, 2.0, 0.0f64],
        ];
        let b = mat![[1.0], [-2.0], [0.5f64]];

        let x = PartialPivLuSolver::default().solve(&a, &b).unwrap();

        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * 3.0);
        assert!(&a * &x ~ b);
    }

    #[test]
    fn exactly_singular_system_is_reported() {
        let a = mat![
            [1.0, 2.0, 3.0],
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 5.0f64],
        ];
        let b = mat![[1.0], [1.0], [2.0f64]];

        let err = PartialPivLuSolver::default().solve(&a, &b).unwrap_err();
        assert!(matches!(err, RBFError::SingularSystem { .. }));
    }

    #[test]
    fn zero_matrix_is_singular_at_first_pivot() {
        let a = Mat::<f64>::zeros(1, 1);
        let b = mat![[3.0f64]];

        let err = PartialPivLuSolver::default().solve(&a, &b).unwrap_err();
        assert!(
            err == RBFError::SingularSystem {
                pivot_index: 0,
                pivot: 0.0
            }
        );
    }

    #[test]
    fn nan_entries_surface_as_non_finite_weights() {
        let a = mat![[f64::NAN, 1.0], [1.0, 2.0f64]];
        let b = mat![[1.0], [1.0f64]];

        let err = PartialPivLuSolver::default().solve(&a, &b).unwrap_err();
        assert!(err.is_singular());
    }
}
