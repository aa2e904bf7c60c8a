/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares the error type returned while configuring, solving, and evaluating interpolants.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use scatter_rbf_utils::UnknownKernelName;
use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, RBFError>;

/// Errors that can occur when building or evaluating an [`crate::RBFInterpolator`].
///
/// Configuration and dimension errors are raised before any matrix is
/// assembled. Solve errors are raised by the [`crate::DenseSolver`] and passed
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RBFError {
    /// The kernel name is not one of the registered kernels.
    #[error("unknown kernel {name:?}, expected one of: {expected}")]
    UnknownKernel { name: String, expected: String },

    /// No source points were supplied.
    #[error("at least one source point is required")]
    EmptyInput,

    /// The number of values does not match the number of points.
    #[error("point/value count mismatch: {points} points, {values} values")]
    CountMismatch { points: usize, values: usize },

    /// A source point has a different number of coordinates from the first point.
    #[error("point {index} has {found} coordinates, expected {expected}")]
    RaggedPoints {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A query point does not have the dimensionality of the source points.
    #[error("query has {found} coordinates, interpolant expects {expected}")]
    QueryDimension { expected: usize, found: usize },

    /// Epsilon cannot be estimated from fewer than two points.
    #[error("cannot estimate epsilon from {num_points} point(s); supply epsilon explicitly")]
    DegenerateInput { num_points: usize },

    /// The system matrix is singular or numerically so.
    #[error("system matrix is singular: pivot {pivot_index} is {pivot:e}")]
    SingularSystem { pivot_index: usize, pivot: f64 },

    /// The solve produced a non-finite weight.
    #[error("system solve produced a non-finite weight at index {index}")]
    NonFiniteWeights { index: usize },

    /// A stored interpolator has a matrix whose shape disagrees with its points.
    #[error("{field} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl From<UnknownKernelName> for RBFError {
    fn from(e: UnknownKernelName) -> Self {
        let expected = scatter_rbf_utils::KernelType::ALL
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ");

        RBFError::UnknownKernel {
            name: e.name,
            expected,
        }
    }
}

impl RBFError {
    /// Whether this error was raised by the linear solve rather than by input
    /// validation.
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            RBFError::SingularSystem { .. } | RBFError::NonFiniteWeights { .. }
        )
    }
}
