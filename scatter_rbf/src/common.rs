/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines shared helpers for point conversion, random point generation, and epsilon estimation.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::error::{RBFError, Result};
use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a matrix of random points in the unit hypercube.
///
/// # Parameters
/// - `n`: Number of points to generate (rows in the output matrix).
/// - `d`: Number of spatial dimensions per point (columns in the output matrix).
/// - `seed`: Optional random seed.
///   - If `Some(seed)` is provided, the same sequence of points will be generated
///     deterministically across runs and platforms (useful for reproducible tests).
///   - If `None`, the generator is seeded from the operating system's randomness source.
///
/// # Returns
/// A `Mat<f64>` of shape `(n, d)` where each element lies in `[0.0, 1.0)`.
///
/// # Example
/// ```
/// use scatter_rbf::generate_random_points;
///
/// // Generate 100 reproducible 3D points
/// let pts = generate_random_points(100, 3, Some(42));
/// assert_eq!(pts.ncols(), 3);
/// ```
pub fn generate_random_points(n: usize, d: usize, seed: Option<u64>) -> Mat<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    Mat::from_fn(n, d, |_, _| rng.random_range(0.0..1.0))
}

/// Packs a list of points into an `(n × d)` matrix, one point per row.
///
/// Every point must have the same number of coordinates as the first.
///
/// # Example
/// ```
/// use scatter_rbf::points_from_rows;
///
/// let pts = points_from_rows(&[vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
/// assert_eq!(pts.shape(), (2, 2));
/// assert_eq!(pts[(1, 0)], 2.0);
///
/// assert!(points_from_rows(&[vec![0.0, 1.0], vec![2.0]]).is_err());
/// ```
pub fn points_from_rows(rows: &[Vec<f64>]) -> Result<Mat<f64>> {
    let first = rows.first().ok_or(RBFError::EmptyInput)?;
    let dimensions = first.len();

    if let Some((index, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != dimensions)
    {
        return Err(RBFError::RaggedPoints {
            index,
            expected: dimensions,
            found: row.len(),
        });
    }

    Ok(Mat::from_fn(rows.len(), dimensions, |i, j| rows[i][j]))
}

/// Estimates the kernel shape parameter as the mean distance between distinct
/// points.
///
/// Every entry of the raw distance matrix is summed, the zero diagonal
/// included, and the total divided by `n^2 - n`.
///
/// ### Errors
/// - [`RBFError::DegenerateInput`] when there are fewer than two points.
pub fn estimate_epsilon(distances: &Mat<f64>) -> Result<f64> {
    let n = distances.nrows();

    if n < 2 {
        return Err(RBFError::DegenerateInput { num_points: n });
    }

    let mut total = 0.0;
    for i in 0..n {
        for j in 0..distances.ncols() {
            total += distances[(i, j)];
        }
    }

    Ok(total / ((n * n - n) as f64))
}
