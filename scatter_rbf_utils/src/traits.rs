/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares the traits shared by every radial kernel in the registry.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::kernel_helpers::KernelParams;
use faer::RowRef;

/// Converts a shared [`KernelParams`] configuration into a concrete kernel type.
pub trait KernelFromParams: Sized {
    /// Constructs `Self` from a set of uniform kernel parameters.
    fn from_params(p: &KernelParams) -> Self;
}

/// A function of distance only, with any shape parameter fixed at construction.
pub trait RadialKernel {
    /// Evaluates the kernel at distance `r`.
    fn phi(&self, r: f64) -> f64;

    /// Evaluates the kernel between two points.
    #[inline(always)]
    fn evaluate(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
        self.phi(crate::get_distance(target, source))
    }
}
