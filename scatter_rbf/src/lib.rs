/////////////////////////////////////////////////////////////////////////////////////////////
//
// Exposes the public API and high-level documentation for exact-fit RBF interpolation.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Exact-fit Radial Basis Function (RBF) interpolation of scattered data.
//!
//! Given `N` points in `D` dimensions and a scalar value at each point, this crate
//! builds a smooth function that reproduces every value at its point and
//! interpolates between them.
//!
//! Construction is a single direct pass:
//!
//! 1. The `N × N` matrix of pairwise Euclidean distances is assembled.
//! 2. If no shape parameter was supplied, epsilon is estimated as the mean
//!    distance between distinct points.
//! 3. The kernel is applied to every entry of the distance matrix.
//! 4. The resulting system is solved for one weight per point with a partially
//!    pivoted LU factorisation from [`faer`](https://docs.rs/faer/latest/faer/).
//!
//! Direct solvers require **O(N²)** memory and **O(N³)** operations, so this crate
//! is aimed at point sets of up to a few thousand points.
//!
//! # Kernels
//! `linear` (default), `cubic`, `quintic`, `thin-plate`, `gaussian`,
//! `inverse-multiquadric` and `multiquadric` are built in and can be selected by
//! [`KernelType`] or by name. Any `Fn(r, epsilon) -> f64` can be supplied through
//! [`interpolant_config::Kernel::custom`].
//!
//! # Examples
//!
//! ```
//! use scatter_rbf::{
//!     RBFInterpolator,
//!     interpolant_config::InterpolantSettings,
//!     generate_random_points,
//!     KernelType,
//!     RBFTestFunctions,
//! };
//!
//! // Generate some random data in the unit square
//! let dimensions = 2;
//! let num_points = 100;
//! let source_points = generate_random_points(num_points, dimensions, Some(42));
//!
//! // Assign some values to the source points using Franke's function
//! let source_values: Vec<f64> = RBFTestFunctions::franke_2d(&source_points)
//!     .col(0)
//!     .iter()
//!     .copied()
//!     .collect();
//!
//! // Create an InterpolantSettings instance
//! let interpolant_settings = InterpolantSettings::builder()
//!     .kernel(KernelType::Linear)
//!     .build()?;
//!
//! // Setup and solve the RBF
//! let rbfi = RBFInterpolator::builder(source_points, source_values)
//!     .settings(interpolant_settings)
//!     .build()?;
//!
//! // Evaluate the RBF at the input source locations
//! let fitted = rbfi.evaluate_at_source();
//!
//! // Test that the interpolated values match the input source values
//! let max_diff: f64 = rbfi
//!     .point_values()
//!     .col(0)
//!     .iter()
//!     .zip(fitted.col(0).iter())
//!     .fold(0.0, |acc, (a, b)| acc.max((a - b).abs()));
//!
//! assert!(max_diff < 1e-6);
//! # Ok::<(), scatter_rbf::RBFError>(())
//! ```
//!
//! The one-call form takes plain vectors and a kernel name:
//!
//! ```
//! let points = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
//! let values = [0.0, 1.0, 1.0];
//!
//! let rbfi = scatter_rbf::rbf(&points, &values, Some("cubic"), None)?;
//! assert!((rbfi.evaluate_point(&[0.0, 1.0])? - 1.0).abs() < 1e-9);
//!
//! assert!(scatter_rbf::rbf(&points, &values, Some("bogus"), None).is_err());
//! # Ok::<(), scatter_rbf::RBFError>(())
//! ```
//!
//! # References
//! 1.  Fasshauer, G., 2007. Meshfree Approximation Methods with Matlab. World Scientific Publishing Co.
//! 2.  Buhmann, M. D., 2003. Radial Basis Functions: Theory and Implementations.
//!     Cambridge University Press.
pub mod interpolant_config;

mod common;

mod error;

mod rbf;

mod linalg;

pub mod progress;

mod rbf_test_functions;

pub use {
    common::{estimate_epsilon, generate_random_points, points_from_rows},
    error::{RBFError, Result},
    linalg::{DenseSolver, PartialPivLuSolver},
    rbf::{RBFInterpolator, RBFInterpolatorBuilder},
    rbf_test_functions::RBFTestFunctions,
    scatter_rbf_utils::KernelType,
};

use interpolant_config::{InterpolantSettings, Kernel};

/// Builds an interpolant in one call from plain point and value lists.
///
/// - `points`: one coordinate vector per point, all of the same length.
/// - `values`: one value per point.
/// - `kernel`: a registered kernel name, `linear` when `None`.
/// - `epsilon`: the shape parameter, estimated from the points when `None`.
///
/// The kernel name is resolved and the inputs validated before any matrix is
/// assembled.
///
/// ### Errors
/// - [`RBFError::UnknownKernel`] for an unregistered kernel name.
/// - [`RBFError::EmptyInput`] or [`RBFError::RaggedPoints`] for malformed points.
/// - Any error from [`RBFInterpolatorBuilder::build`].
pub fn rbf(
    points: &[Vec<f64>],
    values: &[f64],
    kernel: Option<&str>,
    epsilon: Option<f64>,
) -> Result<RBFInterpolator> {
    let mut settings = InterpolantSettings::builder();

    if let Some(name) = kernel {
        settings = settings.kernel_name(name);
    }

    if let Some(epsilon) = epsilon {
        settings = settings.epsilon(epsilon);
    }

    build_from_rows(points, values, settings.build()?)
}

/// Builds an interpolant in one call with a kernel given by value rather than by
/// name, including a caller-supplied function.
///
/// ```
/// use scatter_rbf::interpolant_config::Kernel;
///
/// let points = vec![vec![0.0], vec![1.0], vec![3.0]];
///
/// let rbfi = scatter_rbf::rbf_with_kernel(
///     &points,
///     &[1.0, 2.0, 0.0],
///     Kernel::custom(|r, eps| (r / eps).powi(3)),
///     Some(2.0),
/// )?;
/// assert!((rbfi.evaluate_point(&[1.0])? - 2.0).abs() < 1e-9);
/// # Ok::<(), scatter_rbf::RBFError>(())
/// ```
///
/// ### Errors
/// The same as [`rbf`], apart from [`RBFError::UnknownKernel`].
pub fn rbf_with_kernel(
    points: &[Vec<f64>],
    values: &[f64],
    kernel: impl Into<Kernel>,
    epsilon: Option<f64>,
) -> Result<RBFInterpolator> {
    let mut settings = InterpolantSettings::builder().kernel(kernel);

    if let Some(epsilon) = epsilon {
        settings = settings.epsilon(epsilon);
    }

    build_from_rows(points, values, settings.build()?)
}

fn build_from_rows(
    points: &[Vec<f64>],
    values: &[f64],
    settings: InterpolantSettings,
) -> Result<RBFInterpolator> {
    let points = points_from_rows(points)?;

    RBFInterpolator::builder(points, values.to_vec())
        .settings(settings)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;

    #[test]
    fn one_call_factory_defaults_to_linear() {
        let points = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
        let rbfi = rbf(&points, &[0.0, 1.0, 1.0], None, None).unwrap();

        assert!(rbfi.kernel().kernel_type() == Some(KernelType::Linear));
        assert!(rbfi.num_points() == 3);
        assert!(rbfi.dimensions() == 2);
        assert!(rbfi.evaluate_point(&[0.0, 0.0]).unwrap().abs() < 1e-6);
    }

    #[test]
    fn unknown_kernel_wins_over_bad_points() {
        // The name is checked first, so a ragged point list does not mask it.
        let points = vec![vec![0.0, 0.0], vec![1.0]];
        let err = rbf(&points, &[0.0, 1.0], Some("bogus"), None).unwrap_err();
        assert!(matches!(err, RBFError::UnknownKernel { ref name, .. } if name == "bogus"));
    }

    #[test]
    fn ragged_and_mismatched_inputs_are_rejected() {
        let ragged = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            rbf(&ragged, &[0.0, 1.0], None, None),
            Err(RBFError::RaggedPoints { index: 1, .. })
        ));

        let points = vec![vec![0.0], vec![1.0], vec![3.0]];
        assert!(
            rbf(&points, &[0.0, 1.0], None, None).unwrap_err()
                == RBFError::CountMismatch {
                    points: 3,
                    values: 2
                }
        );

        assert!(rbf(&[], &[], None, None).unwrap_err() == RBFError::EmptyInput);
    }

    #[test]
    fn one_call_factory_accepts_kernel_values() {
        let points = vec![vec![0.0, 0.0], vec![2.0, 0.5], vec![0.5, 1.5], vec![1.5, 2.5]];
        let values = [1.0, -1.0, 0.5, 2.0];

        let custom = rbf_with_kernel(&points, &values, Kernel::custom(|r, _| r * r * r), None)
            .unwrap();
        let named = rbf(&points, &values, Some("cubic"), None).unwrap();

        assert!(custom.kernel().kernel_type().is_none());
        for (point, value) in points.iter().zip(values) {
            assert!((custom.evaluate_point(point).unwrap() - value).abs() < 1e-9);
        }

        let query = [0.9, 0.7];
        let difference =
            custom.evaluate_point(&query).unwrap() - named.evaluate_point(&query).unwrap();
        assert!(difference.abs() < 1e-9);

        let typed = rbf_with_kernel(&points, &values, KernelType::Cubic, Some(0.5)).unwrap();
        assert!(typed.kernel().kernel_type() == Some(KernelType::Cubic));
        assert!(typed.epsilon() == 0.5);
    }

    #[test]
    fn explicit_epsilon_is_kept() {
        let points = vec![vec![0.0], vec![1.0], vec![3.0]];
        let rbfi = rbf(&points, &[1.0, 2.0, 0.0], Some("gaussian"), Some(1.5)).unwrap();
        assert!(rbfi.epsilon() == 1.5);

        let estimated = rbf(&points, &[1.0, 2.0, 0.0], Some("gaussian"), None).unwrap();
        assert!(estimated.epsilon() == 2.0);
    }
}
