/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides parameter and builder types for configuring RBF kernels.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use serde::{Deserialize, Serialize};
use crate::utils::KernelType;

/// Defines the [`KernelType`] to use, along with the shape parameter
/// passed to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelParams {
    /// KernelType enum variant to use.
    pub kernel_type: KernelType,

    /// Shape parameter. Scales distances as `r / epsilon` before the kernel
    /// formula is applied.
    ///
    /// Only used by the gaussian, multiquadric and inverse multiquadric kernels.
    /// Larger values produce flatter, broader basis functions.
    pub epsilon: f64,
}

impl KernelParams {
    /// Begins building a [`KernelParams`] instance for the given kernel type.
    pub fn builder(kernel_type: KernelType) -> KernelParamsBuilder {
        KernelParamsBuilder {
            kernel_type,
            epsilon: 1.0,
        }
    }
}

/// Builder for [`KernelParams`] that provides sensible defaults.
#[derive(Debug, Clone, Copy)]
pub struct KernelParamsBuilder {
    kernel_type: KernelType,
    epsilon: f64,
}

impl KernelParamsBuilder {
    /// Sets the `epsilon` shape parameter on the builder.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Finalises the builder into a [`KernelParams`] value.
    pub fn build(self) -> KernelParams {
        KernelParams {
            kernel_type: self.kernel_type,
            epsilon: self.epsilon,
        }
    }
}
