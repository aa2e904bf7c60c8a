/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides benchmark test functions for validating and demonstrating RBF interpolation quality.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! The 3D Franke function is implemented from [1].
//!
//! # References
//! 1. Bozzini, Mira & Rossini, Milvia. (2002). Testing methods for 3D scattered data
//!    interpolation. 20. 111-135.
use faer::Mat;

/// Struct that implements 1D, 2D and 3D functions to generate values for testing RBF
/// interpolation.
///
/// Every function takes an `(n × d)` point matrix and returns an `(n × 1)` value matrix.
pub struct RBFTestFunctions;

impl RBFTestFunctions {
    /// Runge's function, `1 / (1 + 25x^2)`. Well known for defeating
    /// high-order polynomial interpolation on uniform nodes.
    pub fn runge_1d(points: &Mat<f64>) -> Mat<f64> {
        assert_eq!(points.ncols(), 1);

        Mat::from_fn(points.nrows(), 1, |i, _| {
            let x = points[(i, 0)];
            1.0 / (1.0 + 25.0 * x * x)
        })
    }

    /// Franke's two-dimensional test function:
    /// <div>
    /// $$
    /// \begin{aligned}
    /// F(x,y) &=
    /// \tfrac{3}{4}\exp\!\left[
    ///     -\frac{(9x-2)^2 + (9y-2)^2}{4}
    /// \right] \\[6pt]
    /// &\quad+ \tfrac{3}{4}\exp\!\left[
    ///     -\frac{(9x+1)^2}{49}
    ///     -\frac{(9y+1)^2}{10}
    /// \right] \\[6pt]
    /// &\quad+ \tfrac{1}{2}\exp\!\left[
    ///     -\frac{(9x-7)^2 + (9y-3)^2}{4}
    /// \right] \\[6pt]
    /// &\quad- \tfrac{1}{5}\exp\!\left[
    ///     -(9x-4)^2 - (9y-7)^2
    /// \right]
    /// \end{aligned}
    /// $$
    /// </div>
    pub fn franke_2d(points: &Mat<f64>) -> Mat<f64> {
        assert_eq!(points.ncols(), 2);
        let n = points.nrows();

        Mat::from_fn(n, 1, |i, _| {
            let nx = 9.0 * points[(i, 0)];
            let ny = 9.0 * points[(i, 1)];

            let term1 = 0.75 * (-((nx - 2.0).powi(2) + (ny - 2.0).powi(2)) / 4.0).exp();
            let term2 = 0.75 * (-(nx + 1.0).powi(2) / 49.0 - (ny + 1.0).powi(2) / 10.0).exp();
            let term3 = 0.5 * (-((nx - 7.0).powi(2) + (ny - 3.0).powi(2)) / 4.0).exp();
            let term4 = -0.2 * (-(nx - 4.0).powi(2) - (ny - 7.0).powi(2)).exp();

            term1 + term2 + term3 + term4
        })
    }

    /// 3D Franke-like test function:
    ///
    /// <div>
    /// $$
    /// \begin{aligned}
    /// F(x,y,z) &=
    /// \tfrac{3}{4}\exp\!\left[
    ///     -\frac{(9x-2)^2 + (9y-2)^2 + (9z-2)^2}{4}
    /// \right] \\[6pt]
    /// &\quad+ \tfrac{3}{4}\exp\!\left[
    ///     -\frac{(9x+1)^2}{49}
    ///     -\frac{(9y+1)^2}{10}
    ///     -\frac{(9z+1)^2}{10}
    /// \right] \\[6pt]
    /// &\quad+ \tfrac{1}{2}\exp\!\left[
    ///     -\frac{(9x-7)^2 + (9y-3)^2 + (9z-5)^2}{4}
    /// \right] \\[6pt]
    /// &\quad- \tfrac{1}{5}\exp\!\left[
    ///     -(9x-4)^2 - (9y-7)^2 - (9z-5)^2
    /// \right]
    /// \end{aligned}
    /// $$
    /// </div>
    pub fn franke_3d(points: &Mat<f64>) -> Mat<f64> {
        assert_eq!(points.ncols(), 3);
        let n = points.nrows();

        Mat::from_fn(n, 1, |i, _| {
            let nx = 9.0 * points[(i, 0)];
            let ny = 9.0 * points[(i, 1)];
            let nz = 9.0 * points[(i, 2)];

            let term1 = 0.75
                * (-((nx - 2.0).powi(2) + (ny - 2.0).powi(2) + (nz - 2.0).powi(2)) / 4.0).exp();
            let term2 = 0.75
                * (-(nx + 1.0).powi(2) / 49.0
                    - (ny + 1.0).powi(2) / 10.0
                    - (nz + 1.0).powi(2) / 10.0)
                    .exp();
            let term3 = 0.5
                * (-((nx - 7.0).powi(2) + (ny - 3.0).powi(2) + (nz - 5.0).powi(2)) / 4.0).exp();
            let term4 =
                -0.2 * (-(nx - 4.0).powi(2) - (ny - 7.0).powi(2) - (nz - 5.0).powi(2)).exp();

            term1 + term2 + term3 + term4
        })
    }
}
