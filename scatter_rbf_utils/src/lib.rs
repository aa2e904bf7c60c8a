/////////////////////////////////////////////////////////////////////////////////////////////
//
// Re-exports kernel utilities and distance helpers used across the scatter_rbf crates.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Kernels and distance utilities for the [`scatter_rbf`] crate
//!
//! Holds the fixed registry of named radial kernels ([`KernelType`]), the
//! concrete kernel functions behind it, and the dense matrix helpers that turn a
//! point set into a pairwise distance matrix and a distance matrix into an RBF
//! system matrix.
//!
//! ```
//! use faer::mat;
//! use scatter_rbf_utils::{apply_kernel, get_distance_matrix, KernelParams, KernelType};
//!
//! let points = mat![[0.0, 0.0], [3.0, 4.0f64]];
//!
//! let mut system = get_distance_matrix(&points);
//! assert_eq!(system[(0, 1)], 5.0);
//!
//! let params = KernelParams::builder("gaussian".parse::<KernelType>().unwrap())
//!     .epsilon(5.0)
//!     .build();
//! apply_kernel(&mut system, &params);
//!
//! assert_eq!(system[(0, 0)], 1.0);
//! assert!((system[(0, 1)] - (-1.0f64).exp()).abs() < 1e-15);
//! ```
mod kernel_helpers;
mod rbf_kernels;
mod traits;
mod utils;

/// Implemented kernels for use in the [`scatter_rbf`] crate.
pub mod kernels {
    pub use super::rbf_kernels::*;
}

pub use {
    kernel_helpers::{KernelParams, KernelParamsBuilder},
    traits::{KernelFromParams, RadialKernel},
    utils::{
        KernelType, UnknownKernelName, apply_kernel, apply_kernel_typed, get_a_matrix,
        get_a_matrix_typed, get_distance, get_distance_matrix, kernel_phi,
    },
};
