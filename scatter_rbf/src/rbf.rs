/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the main RBF interpolator, its builder, and the construction pipeline.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    common,
    error::{RBFError, Result},
    interpolant_config::{InterpolantSettings, Kernel},
    linalg::{self, DenseSolver, PartialPivLuSolver},
    progress::{ProgressMsg, ProgressSink},
};

use faer::Mat;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Instant};

/// Convenience builder for constructing an [`RBFInterpolator`].
///
/// The builder should be called via the [`RBFInterpolator::builder`] method.
/// Nothing is computed until [`RBFInterpolatorBuilder::build`] is called.
pub struct RBFInterpolatorBuilder {
    points: Mat<f64>,
    point_values: Vec<f64>,
    interpolant_settings: InterpolantSettings,
    solver: Arc<dyn DenseSolver>,
    progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl RBFInterpolatorBuilder {
    /// Creates a new builder with the required inputs:
    /// - `points`: coordinates of the data points, one point per row.
    /// - `point_values`: the scalar value at each point.
    ///
    /// Defaults to the `linear` kernel, an estimated epsilon, and a
    /// [`PartialPivLuSolver`].
    fn new(points: Mat<f64>, point_values: Vec<f64>) -> Self {
        Self {
            points,
            point_values,
            interpolant_settings: InterpolantSettings::default(),
            solver: Arc::new(PartialPivLuSolver::default()),
            progress_callback: None,
        }
    }

    /// Sets the kernel and epsilon.
    pub fn settings(mut self, interpolant_settings: InterpolantSettings) -> Self {
        self.interpolant_settings = interpolant_settings;
        self
    }

    /// Replaces the dense solver used for the weights.
    pub fn solver(mut self, solver: Arc<dyn DenseSolver>) -> Self {
        self.solver = solver;
        self
    }

    /// Optional callback for reporting construction progress.
    pub fn progress_callback(mut self, progress_callback: Arc<dyn ProgressSink>) -> Self {
        self.progress_callback = Some(progress_callback);
        self
    }

    /// Validates the inputs, then assembles and solves the RBF system.
    ///
    /// ### Errors
    /// - [`RBFError::EmptyInput`] if there are no points.
    /// - [`RBFError::CountMismatch`] if the value count differs from the point count.
    /// - [`RBFError::DegenerateInput`] if epsilon must be estimated from fewer
    ///   than two points.
    /// - Any error raised by the solver, typically [`RBFError::SingularSystem`].
    pub fn build(self) -> Result<RBFInterpolator> {
        RBFInterpolator::new(
            self.points,
            self.point_values,
            self.interpolant_settings,
            self.solver.as_ref(),
            self.progress_callback.as_deref(),
        )
    }
}

/// An exact-fit radial basis function interpolant over scattered points.
///
/// Holds the source points, their values, the solved weights, the kernel and
/// the epsilon it was solved with. Nothing is mutated after construction, so an
/// interpolator can be shared freely between threads for evaluation.
///
/// The value at a point `p` is
///
/// `f(p) = sum_i w_i * phi(|p - x_i|, epsilon)`
///
/// where the weights `w` solve `A w = values` with `A_ij = phi(|x_i - x_j|, epsilon)`.
///
/// Interpolators built from a named kernel can be serialised with serde.
/// Deserialising checks that the stored values and weights match the stored
/// points before an interpolator is returned.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RBFInterpolatorData")]
pub struct RBFInterpolator {
    /// Coordinates of the input data points.
    points: Mat<f64>,

    /// Scalar value at each input point, as an `(n × 1)` matrix.
    point_values: Mat<f64>,

    /// Solved RBF weights, as an `(n × 1)` matrix.
    weights: Mat<f64>,

    /// Kernel the system was assembled with.
    kernel: Kernel,

    /// Shape parameter, supplied or estimated.
    epsilon: f64,
}

impl RBFInterpolator {
    /// Creates a new [`RBFInterpolatorBuilder`] for the given points and values.
    ///
    /// This is the way to construct an interpolator.
    pub fn builder(points: Mat<f64>, point_values: Vec<f64>) -> RBFInterpolatorBuilder {
        RBFInterpolatorBuilder::new(points, point_values)
    }

    fn new(
        points: Mat<f64>,
        point_values: Vec<f64>,
        interpolant_settings: InterpolantSettings,
        solver: &dyn DenseSolver,
        progress_callback: Option<&dyn ProgressSink>,
    ) -> Result<Self> {
        let solver_start = Instant::now();

        let num_points = points.nrows();
        let dimensions = points.ncols();

        if num_points == 0 {
            return Err(RBFError::EmptyInput);
        }

        if point_values.len() != num_points {
            return Err(RBFError::CountMismatch {
                points: num_points,
                values: point_values.len(),
            });
        }

        if interpolant_settings.epsilon.is_none() && num_points < 2 {
            return Err(RBFError::DegenerateInput { num_points });
        }

        let InterpolantSettings { kernel, epsilon } = interpolant_settings;

        let mut system = scatter_rbf_utils::get_distance_matrix(&points);

        emit(progress_callback, || ProgressMsg::DistanceMatrixBuilt {
            num_points,
            dimensions,
        });

        let epsilon = match epsilon {
            Some(epsilon) => epsilon,
            None => {
                let epsilon = common::estimate_epsilon(&system)?;
                emit(progress_callback, || ProgressMsg::EpsilonEstimated { epsilon });
                epsilon
            }
        };

        kernel.transform_distances(&mut system, epsilon);

        let point_values = Mat::from_fn(num_points, 1, |i, _| point_values[i]);

        let weights = solver.solve(&system, &point_values)?;

        emit(progress_callback, || ProgressMsg::SystemSolved { num_points });

        emit(progress_callback, || ProgressMsg::Message {
            message: format!(
                "Took {:?} to solve RBF for {} points in {} dimensions using the following settings:\n\
                Kernel: {}, Epsilon: {}",
                solver_start.elapsed(),
                num_points,
                dimensions,
                kernel,
                epsilon,
            ),
        });

        Ok(Self {
            points,
            point_values,
            weights,
            kernel,
            epsilon,
        })
    }

    /// Evaluate the interpolant at a single point.
    ///
    /// ### Errors
    /// - [`RBFError::QueryDimension`] if `point` does not have one coordinate per
    ///   source dimension.
    ///
    /// ### Example
    /// ```
    /// # use scatter_rbf::{RBFInterpolator, interpolant_config::InterpolantSettings};
    /// # use faer::mat;
    /// let points = mat![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0f64]];
    /// let rbfi = RBFInterpolator::builder(points, vec![0.0, 1.0, 1.0]).build()?;
    ///
    /// assert!((rbfi.evaluate_point(&[1.0, 0.0])? - 1.0).abs() < 1e-12);
    /// # Ok::<(), scatter_rbf::RBFError>(())
    /// ```
    pub fn evaluate_point(&self, point: &[f64]) -> Result<f64> {
        self.check_dimensions(point.len())?;

        let target = Mat::from_fn(1, point.len(), |_, j| point[j]);
        let target = target.row(0);

        let value = self
            .points
            .row_iter()
            .zip(self.weights.col(0).iter())
            .fold(0.0, |acc, (source, w)| {
                let r = scatter_rbf_utils::get_distance(target, source);
                acc + self.kernel.phi(r, self.epsilon) * w
            });

        Ok(value)
    }

    /// Evaluate the interpolant at every row of `target_points`.
    ///
    /// ### Returns
    /// A `(n_targets × 1)` matrix of interpolated values.
    ///
    /// ### Errors
    /// - [`RBFError::QueryDimension`] if `target_points` does not have one column
    ///   per source dimension.
    pub fn evaluate(&self, target_points: &Mat<f64>) -> Result<Mat<f64>> {
        self.check_dimensions(target_points.ncols())?;

        let eval_a_matrix = self.kernel.a_matrix(target_points, &self.points, self.epsilon);

        Ok(eval_a_matrix * &self.weights)
    }

    /// Evaluate the interpolant **at the original source points**.
    ///
    /// Useful for checking how closely the solve reproduced the input values.
    ///
    /// ### Returns
    /// A `(n_sources × 1)` matrix of values at the source points.
    pub fn evaluate_at_source(&self) -> Mat<f64> {
        let eval_a_matrix = self.kernel.a_matrix(&self.points, &self.points, self.epsilon);

        eval_a_matrix * &self.weights
    }

    /// Coordinates of the source points, one point per row.
    pub fn points(&self) -> &Mat<f64> {
        &self.points
    }

    /// Values at the source points, as an `(n × 1)` matrix.
    pub fn point_values(&self) -> &Mat<f64> {
        &self.point_values
    }

    /// Solved weights, one per source point, as an `(n × 1)` matrix.
    pub fn weights(&self) -> &Mat<f64> {
        &self.weights
    }

    /// The kernel the interpolant was solved with.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// The supplied or estimated shape parameter.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of source points.
    pub fn num_points(&self) -> usize {
        self.points.nrows()
    }

    /// Number of coordinates per point.
    pub fn dimensions(&self) -> usize {
        self.points.ncols()
    }

    fn check_dimensions(&self, found: usize) -> Result<()> {
        let expected = self.dimensions();
        match found == expected {
            true => Ok(()),
            false => Err(RBFError::QueryDimension { expected, found }),
        }
    }
}

/// Unchecked serialised form of an [`RBFInterpolator`].
#[derive(Deserialize)]
struct RBFInterpolatorData {
    points: Mat<f64>,
    point_values: Mat<f64>,
    weights: Mat<f64>,
    kernel: Kernel,
    epsilon: f64,
}

impl TryFrom<RBFInterpolatorData> for RBFInterpolator {
    type Error = RBFError;

    fn try_from(data: RBFInterpolatorData) -> Result<Self> {
        let num_points = data.points.nrows();

        if num_points == 0 {
            return Err(RBFError::EmptyInput);
        }

        check_column("point_values", &data.point_values, num_points)?;
        check_column("weights", &data.weights, num_points)?;
        linalg::check_finite(&data.weights)?;

        Ok(Self {
            points: data.points,
            point_values: data.point_values,
            weights: data.weights,
            kernel: data.kernel,
            epsilon: data.epsilon,
        })
    }
}

fn check_column(field: &'static str, column: &Mat<f64>, num_points: usize) -> Result<()> {
    let expected = (num_points, 1);
    match column.shape() == expected {
        true => Ok(()),
        false => Err(RBFError::ShapeMismatch {
            field,
            expected,
            found: column.shape(),
        }),
    }
}

#[inline]
fn emit(sink: Option<&dyn ProgressSink>, msg: impl FnOnce() -> ProgressMsg) {
    if let Some(sink) = sink {
        sink.emit(msg());
    }
}
