/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the concrete RBF kernel functions selectable by name.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{KernelFromParams, KernelParams, RadialKernel};

/// Linear RBF kernel with `phi(r) = r`.
#[derive(Clone, Debug, Copy)]
pub struct LinearRbfKernel;

impl RadialKernel for LinearRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        r
    }
}

impl KernelFromParams for LinearRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        LinearRbfKernel
    }
}

/// Cubic RBF kernel with `phi(r) = r^3`.
#[derive(Clone, Debug, Copy)]
pub struct CubicRbfKernel;

impl RadialKernel for CubicRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        r.powi(3)
    }
}

impl KernelFromParams for CubicRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        CubicRbfKernel
    }
}

/// Quintic RBF kernel with `phi(r) = r^5`.
#[derive(Clone, Debug, Copy)]
pub struct QuinticRbfKernel;

impl RadialKernel for QuinticRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        r.powi(5)
    }
}

impl KernelFromParams for QuinticRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        QuinticRbfKernel
    }
}

/// Thin plate spline RBF kernel with `phi(r) = r^2 log r`.
///
/// The limit at the origin is taken as exactly zero.
#[derive(Clone, Debug, Copy)]
pub struct ThinPlateSplineRbfKernel;

impl RadialKernel for ThinPlateSplineRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        match r == 0.0 {
            true => 0.0,
            false => r.powi(2) * r.ln(),
        }
    }
}

impl KernelFromParams for ThinPlateSplineRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        ThinPlateSplineRbfKernel
    }
}

/// Gaussian RBF kernel with `phi(r) = exp(-(r / epsilon)^2)`.
#[derive(Clone, Debug, Copy)]
pub struct GaussianRbfKernel {
    pub epsilon: f64,
}

impl RadialKernel for GaussianRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        (-(r / self.epsilon).powi(2)).exp()
    }
}

impl KernelFromParams for GaussianRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        GaussianRbfKernel { epsilon: p.epsilon }
    }
}

/// Inverse multiquadric RBF kernel with `phi(r) = 1 / sqrt((r / epsilon)^2 + 1)`.
#[derive(Clone, Debug, Copy)]
pub struct InverseMultiquadricRbfKernel {
    pub epsilon: f64,
}

impl RadialKernel for InverseMultiquadricRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        1.0 / ((r / self.epsilon).powi(2) + 1.0).sqrt()
    }
}

impl KernelFromParams for InverseMultiquadricRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        InverseMultiquadricRbfKernel { epsilon: p.epsilon }
    }
}

/// Multiquadric RBF kernel with `phi(r) = sqrt((r / epsilon)^2 + 1)`.
#[derive(Clone, Debug, Copy)]
pub struct MultiquadricRbfKernel {
    pub epsilon: f64,
}

impl RadialKernel for MultiquadricRbfKernel {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        ((r / self.epsilon).powi(2) + 1.0).sqrt()
    }
}

impl KernelFromParams for MultiquadricRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        MultiquadricRbfKernel { epsilon: p.epsilon }
    }
}
