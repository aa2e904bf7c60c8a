/////////////////////////////////////////////////////////////////////////////////////////////
//
// Supplies distance matrices, the kernel registry, and kernel matrix helpers.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{KernelFromParams, KernelParams, RadialKernel};
use faer::{Mat, RowRef};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Calculates the euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use scatter_rbf_utils::get_distance;
///
/// let points = mat![
///     [1.0, 2.0],
///     [4.0, 6.0],
/// ];
///
/// let target = points.row(0);
/// let source = points.row(1);
///
/// let dist = get_distance(target, source);
///
/// assert_eq!(dist, 5.0);
/// ```
#[inline(always)]
pub fn get_distance(target: RowRef<f64>, source: RowRef<f64>) -> f64 {
    let mut dist = 0.0;
    for (t, s) in target.iter().zip(source.iter()) {
        let diff = t - s;
        dist += diff * diff;
    }
    dist.sqrt()
}

/// Builds the symmetric matrix of pairwise euclidean distances between the rows
/// of `points`.
///
/// Each pair is computed once and written to both `(i, j)` and `(j, i)`; the
/// diagonal is exactly zero.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use scatter_rbf_utils::get_distance_matrix;
///
/// let points = mat![[0.0], [1.0], [3.0f64]];
///
/// let distances = get_distance_matrix(&points);
///
/// assert_eq!(
///     distances,
///     mat![
///         [0.0, 1.0, 3.0],
///         [1.0, 0.0, 2.0],
///         [3.0, 2.0, 0.0f64],
///     ]
/// );
/// ```
pub fn get_distance_matrix(points: &Mat<f64>) -> Mat<f64> {
    let n = points.nrows();

    let mut distances = Mat::<f64>::zeros(n, n);

    for j in 0..n {
        let source_row = points.row(j);

        for i in (j + 1)..n {
            let dist = get_distance(points.row(i), source_row);

            distances[(i, j)] = dist;
            distances[(j, i)] = dist;
        }
    }

    distances
}

/// Builds a dense kernel matrix using a typed kernel function.
#[inline(always)]
pub fn get_a_matrix_typed<K>(
    target_points: &Mat<f64>,
    source_points: &Mat<f64>,
    kernel_function: &K,
) -> Mat<f64>
where
    K: RadialKernel,
{
    let m = target_points.nrows();
    let n = source_points.nrows();

    let mut a_matrix = Mat::<f64>::zeros(m, n);

    for j in 0..n {
        let source = source_points.row(j);

        for i in 0..m {
            let target = target_points.row(i);

            a_matrix[(i, j)] = kernel_function.evaluate(target, source);
        }
    }

    a_matrix
}

/// Replaces every entry `r` of a distance matrix with `phi(r)`, diagonal included.
#[inline(always)]
pub fn apply_kernel_typed<K>(distances: &mut Mat<f64>, kernel_function: &K)
where
    K: RadialKernel,
{
    let (m, n) = distances.shape();

    for j in 0..n {
        for i in 0..m {
            distances[(i, j)] = kernel_function.phi(distances[(i, j)]);
        }
    }
}

/// Error returned when parsing a kernel name that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown kernel name {name:?}")]
pub struct UnknownKernelName {
    pub name: String,
}

// K-free dispatcher generated from the kernel registry below.
// Assumes each kernel type implements `KernelFromParams::from_params(&KernelParams) -> K`.
macro_rules! for_each_kernel {
    ( registry = [ $( ($V:ident, $name:literal, $Kty:path) ),* $(,)? ] ) => {

        /// Runtime kernel selector built from the kernel registry.
        ///
        /// Serialises as, and parses from, the kernel's name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum KernelType {
            $(
                #[serde(rename = $name)]
                $V,
            )*
        }

        impl KernelType {
            /// Every registered kernel, in registry order.
            pub const ALL: &'static [KernelType] = &[ $( KernelType::$V, )* ];

            /// The name this kernel is selected by.
            pub fn name(&self) -> &'static str {
                match self {
                    $( KernelType::$V => $name, )*
                }
            }
        }

        impl FromStr for KernelType {
            type Err = UnknownKernelName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(KernelType::$V), )*
                    _ => Err(UnknownKernelName { name: s.to_string() }),
                }
            }
        }

        /// Builds a dense kernel matrix for the selected [`KernelType`].
        #[inline(always)]
        pub fn get_a_matrix(
            target_points: &Mat<f64>,
            source_points: &Mat<f64>,
            params: &KernelParams,
        ) -> Mat<f64> {
            match params.kernel_type {
                $(
                    KernelType::$V => {
                        // Convert uniform params -> concrete kernel type
                        let k = <$Kty as KernelFromParams>::from_params(params);
                        get_a_matrix_typed(target_points, source_points, &k)
                    }
                ),*
            }
        }

        /// Transforms a distance matrix in place into a kernel matrix for the
        /// selected [`KernelType`].
        #[inline(always)]
        pub fn apply_kernel(distances: &mut Mat<f64>, params: &KernelParams) {
            match params.kernel_type {
                $(
                    KernelType::$V => {
                        let k = <$Kty as KernelFromParams>::from_params(params);
                        apply_kernel_typed(distances, &k)
                    }
                ),*
            }
        }

        /// Evaluates the selected kernel function at distance `r`.
        #[inline(always)]
        pub fn kernel_phi(
            r: f64,
            params: &KernelParams,
        ) -> f64 {
            match params.kernel_type {
                $(
                    KernelType::$V => {
                        let k = <$Kty as KernelFromParams>::from_params(params);
                        k.phi(r)
                    }
                ),*
            }
        }
    };
}

for_each_kernel! {
    registry = [
        (Linear,              "linear",               crate::kernels::LinearRbfKernel),
        (Cubic,               "cubic",                crate::kernels::CubicRbfKernel),
        (Quintic,             "quintic",              crate::kernels::QuinticRbfKernel),
        (ThinPlate,           "thin-plate",           crate::kernels::ThinPlateSplineRbfKernel),
        (Gaussian,            "gaussian",             crate::kernels::GaussianRbfKernel),
        (InverseMultiquadric, "inverse-multiquadric", crate::kernels::InverseMultiquadricRbfKernel),
        (Multiquadric,        "multiquadric",         crate::kernels::MultiquadricRbfKernel),
    ]
}

impl Default for KernelType {
    fn default() -> Self {
        KernelType::Linear
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::{mat, utils::approx::*};

    fn sample_points() -> Mat<f64> {
        mat![
            [0.0, 0.0, 0.0],
            [1.0, 2.0, 2.0],
            [-3.0, 0.5, 4.0],
            [2.5, -1.0, 0.25],
            [0.1, 0.1, 0.1f64],
        ]
    }

    #[test]
    fn distance_matrix_is_symmetric_with_zero_diagonal() {
        let points = sample_points();
        let d = get_distance_matrix(&points);

        assert!(d.shape() == (5, 5));
        for i in 0..5 {
            assert!(d[(i, i)] == 0.0);
            for j in 0..5 {
                assert!(d[(i, j)] == d[(j, i)]);
            }
        }
        assert!(d[(0, 1)] == 3.0);
    }

    #[test]
    fn distance_matrix_matches_pointwise_distances() {
        let points = sample_points();
        let d = get_distance_matrix(&points);

        for i in 0..points.nrows() {
            for j in 0..points.nrows() {
                let expected = get_distance(points.row(i), points.row(j));
                assert!((d[(i, j)] - expected).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn applying_kernel_to_distances_matches_dense_kernel_matrix() {
        let points = sample_points();
        let approx_eq = CwiseMat(ApproxEq::eps() * 128.0 * (points.nrows() as f64));

        for kernel_type in KernelType::ALL {
            let params = KernelParams::builder(*kernel_type).epsilon(1.5).build();

            let mut transformed = get_distance_matrix(&points);
            apply_kernel(&mut transformed, &params);

            let dense = get_a_matrix(&points, &points, &params);

            assert!(&transformed ~ &dense);
        }
    }

    #[test]
    fn kernel_names_round_trip_through_from_str() {
        for kernel_type in KernelType::ALL {
            let parsed: KernelType = kernel_type.name().parse().unwrap();
            assert!(parsed == *kernel_type);
            assert!(kernel_type.to_string() == kernel_type.name());
        }
        assert!(KernelType::ALL.len() == 7);
        assert!(KernelType::default() == KernelType::Linear);
    }

    #[test]
    fn unknown_kernel_name_is_rejected() {
        let err = "bogus".parse::<KernelType>().unwrap_err();
        assert!(err.name == "bogus");

        // Names are case sensitive and hyphenated.
        assert!("Linear".parse::<KernelType>().is_err());
        assert!("thin_plate".parse::<KernelType>().is_err());
    }

    #[test]
    fn kernel_type_serialises_by_name() {
        let json = serde_json::to_string(&KernelType::InverseMultiquadric).unwrap();
        assert!(json == "\"inverse-multiquadric\"");

        let back: KernelType = serde_json::from_str("\"thin-plate\"").unwrap();
        assert!(back == KernelType::ThinPlate);
    }
}
