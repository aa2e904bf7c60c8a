/////////////////////////////////////////////////////////////////////////////////////////////
//
// Specifies the kernel and shape parameter options for configuring RBF interpolants.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Specifies the kernel and shape parameter options for configuring RBF interpolants.
use crate::error::{RBFError, Result};
use faer::Mat;
use scatter_rbf_utils::{self, KernelParams, KernelType, RadialKernel};
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser};
use std::{fmt, str::FromStr, sync::Arc};

/// Signature of a caller-supplied kernel: `(r, epsilon) -> phi`.
pub type CustomKernelFn = dyn Fn(f64, f64) -> f64 + Send + Sync;

/// The radial kernel used by an interpolant.
///
/// Either one of the registered kernels, selected by [`KernelType`] or by name,
/// or a caller-supplied function of `(r, epsilon)`.
///
/// | name                   | `phi(r)`                     |
/// |------------------------|------------------------------|
/// | `linear`               | `r`                          |
/// | `cubic`                | `r^3`                        |
/// | `quintic`              | `r^5`                        |
/// | `thin-plate`           | `r^2 ln r` (`0` at `r = 0`)  |
/// | `gaussian`             | `exp(-(r/eps)^2)`            |
/// | `inverse-multiquadric` | `1 / sqrt((r/eps)^2 + 1)`    |
/// | `multiquadric`         | `sqrt((r/eps)^2 + 1)`        |
///
/// A named kernel serialises as its name. Custom kernels cannot be serialised.
#[derive(Clone)]
pub enum Kernel {
    Named(KernelType),
    Custom(Arc<CustomKernelFn>),
}

impl Kernel {
    /// Wraps a caller-supplied kernel function.
    ///
    /// ```
    /// use scatter_rbf::interpolant_config::Kernel;
    ///
    /// let kernel = Kernel::custom(|r, eps| (r / eps).powi(2));
    /// assert_eq!(kernel.phi(2.0, 4.0), 0.25);
    /// ```
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Kernel::Custom(Arc::new(f))
    }

    /// Looks up a registered kernel by name.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Kernel::Named(name.parse::<KernelType>()?))
    }

    /// Returns the registered kernel type, or `None` for a custom kernel.
    pub fn kernel_type(&self) -> Option<KernelType> {
        match self {
            Kernel::Named(kernel_type) => Some(*kernel_type),
            Kernel::Custom(_) => None,
        }
    }

    /// Evaluates the kernel at distance `r` with shape parameter `epsilon`.
    #[inline]
    pub fn phi(&self, r: f64, epsilon: f64) -> f64 {
        match self {
            Kernel::Named(kernel_type) => {
                scatter_rbf_utils::kernel_phi(r, &kernel_params(*kernel_type, epsilon))
            }
            Kernel::Custom(f) => f(r, epsilon),
        }
    }

    /// Replaces every entry of a raw distance matrix with `phi(r, epsilon)`,
    /// diagonal included.
    pub(crate) fn transform_distances(&self, distances: &mut Mat<f64>, epsilon: f64) {
        match self {
            Kernel::Named(kernel_type) => {
                scatter_rbf_utils::apply_kernel(distances, &kernel_params(*kernel_type, epsilon))
            }
            Kernel::Custom(f) => {
                scatter_rbf_utils::apply_kernel_typed(distances, &CustomRbfKernel::new(f, epsilon))
            }
        }
    }

    /// Builds the `(targets × sources)` kernel matrix.
    pub(crate) fn a_matrix(
        &self,
        target_points: &Mat<f64>,
        source_points: &Mat<f64>,
        epsilon: f64,
    ) -> Mat<f64> {
        match self {
            Kernel::Named(kernel_type) => scatter_rbf_utils::get_a_matrix(
                target_points,
                source_points,
                &kernel_params(*kernel_type, epsilon),
            ),
            Kernel::Custom(f) => scatter_rbf_utils::get_a_matrix_typed(
                target_points,
                source_points,
                &CustomRbfKernel::new(f, epsilon),
            ),
        }
    }
}

#[inline(always)]
fn kernel_params(kernel_type: KernelType, epsilon: f64) -> KernelParams {
    KernelParams::builder(kernel_type).epsilon(epsilon).build()
}

/// A caller-supplied kernel with its shape parameter fixed.
struct CustomRbfKernel<'a> {
    f: &'a CustomKernelFn,
    epsilon: f64,
}

impl<'a> CustomRbfKernel<'a> {
    fn new(f: &'a Arc<CustomKernelFn>, epsilon: f64) -> Self {
        Self {
            f: f.as_ref(),
            epsilon,
        }
    }
}

impl RadialKernel for CustomRbfKernel<'_> {
    #[inline(always)]
    fn phi(&self, r: f64) -> f64 {
        (self.f)(r, self.epsilon)
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Kernel::Named(KernelType::default())
    }
}

impl From<KernelType> for Kernel {
    fn from(kernel_type: KernelType) -> Self {
        Kernel::Named(kernel_type)
    }
}

impl FromStr for Kernel {
    type Err = RBFError;

    fn from_str(s: &str) -> Result<Self> {
        Kernel::from_name(s)
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kernel::Named(kernel_type) => f.debug_tuple("Named").field(kernel_type).finish(),
            Kernel::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kernel::Named(kernel_type) => write!(f, "{}", kernel_type),
            Kernel::Custom(_) => f.write_str("custom"),
        }
    }
}

impl Serialize for Kernel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Kernel::Named(kernel_type) => kernel_type.serialize(serializer),
            Kernel::Custom(_) => Err(ser::Error::custom("custom kernels cannot be serialised")),
        }
    }
}

impl<'de> Deserialize<'de> for Kernel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        KernelType::deserialize(deserializer).map(Kernel::Named)
    }
}

/// How the kernel was requested on the builder. Names are resolved at build time.
#[derive(Debug, Clone)]
enum KernelSelection {
    Kernel(Kernel),
    Name(String),
}

/// A convenience builder for constructing an [`InterpolantSettings`] instance.
///
/// The builder should be called via the [`InterpolantSettings::builder`] method.
///
/// See [`InterpolantSettings`] for details on each field.
#[derive(Debug, Clone)]
pub struct InterpolantSettingsBuilder {
    kernel: KernelSelection,
    epsilon: Option<f64>,
}

impl InterpolantSettingsBuilder {
    /// Creates a new instance of the [`InterpolantSettingsBuilder`].
    fn new() -> Self {
        Self {
            kernel: KernelSelection::Kernel(Kernel::default()),
            epsilon: None,
        }
    }

    /// Sets the kernel.
    pub fn kernel(mut self, kernel: impl Into<Kernel>) -> Self {
        self.kernel = KernelSelection::Kernel(kernel.into());
        self
    }

    /// Selects a registered kernel by name. An unknown name is reported by
    /// [`InterpolantSettingsBuilder::build`].
    pub fn kernel_name(mut self, name: &str) -> Self {
        self.kernel = KernelSelection::Name(name.to_string());
        self
    }

    /// Sets the shape parameter. When unset it is estimated from the data.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Builds and returns an instance of [`InterpolantSettings`] from the values
    /// defined in the builder.
    ///
    /// ### Errors
    /// - [`RBFError::UnknownKernel`] if a kernel name was given that is not registered.
    pub fn build(self) -> Result<InterpolantSettings> {
        let kernel = match self.kernel {
            KernelSelection::Kernel(kernel) => kernel,
            KernelSelection::Name(name) => Kernel::from_name(&name)?,
        };

        Ok(InterpolantSettings {
            kernel,
            epsilon: self.epsilon,
        })
    }
}

/// Kernel and shape parameter for an RBF interpolant.
///
/// The default is the `linear` kernel with an estimated epsilon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterpolantSettings {
    /// The RBF kernel to use for interpolation.
    pub kernel: Kernel,

    /// Shape parameter passed to the kernel. `None` means it is estimated as
    /// the mean distance between distinct source points.
    pub epsilon: Option<f64>,
}

impl InterpolantSettings {
    /// Returns a new [`InterpolantSettingsBuilder`] using the `linear` kernel.
    pub fn builder() -> InterpolantSettingsBuilder {
        InterpolantSettingsBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;

    #[test]
    fn default_settings_use_linear_kernel_and_estimated_epsilon() {
        let settings = InterpolantSettings::builder().build().unwrap();
        assert!(settings.kernel.kernel_type() == Some(KernelType::Linear));
        assert!(settings.epsilon.is_none());
    }

    #[test]
    fn kernel_name_is_resolved_at_build() {
        let settings = InterpolantSettings::builder()
            .kernel_name("thin-plate")
            .epsilon(0.5)
            .build()
            .unwrap();
        assert!(settings.kernel.kernel_type() == Some(KernelType::ThinPlate));
        assert!(settings.epsilon == Some(0.5));

        let err = InterpolantSettings::builder()
            .kernel_name("bogus")
            .build()
            .unwrap_err();
        assert!(matches!(err, RBFError::UnknownKernel { ref name, .. } if name == "bogus"));
    }

    #[test]
    fn unknown_kernel_error_lists_registered_names() {
        let err = "spline".parse::<Kernel>().unwrap_err();
        let message = err.to_string();
        for kernel_type in KernelType::ALL {
            assert!(message.contains(kernel_type.name()));
        }
    }

    #[test]
    fn custom_kernel_receives_distance_and_epsilon() {
        let kernel = Kernel::custom(|r, eps| r * 10.0 + eps);
        assert!(kernel.kernel_type().is_none());
        assert!(kernel.phi(2.0, 0.5) == 20.5);

        let mut distances = faer::mat![[0.0, 1.0], [1.0, 0.0f64]];
        kernel.transform_distances(&mut distances, 3.0);

        let expected = faer::mat![[3.0, 13.0], [13.0, 3.0f64]];
        assert!(distances == expected);
    }

    #[test]
    fn named_kernel_matches_registry() {
        let kernel = Kernel::from(KernelType::Multiquadric);
        let params = KernelParams::builder(KernelType::Multiquadric).epsilon(2.0).build();
        assert!(kernel.phi(3.0, 2.0) == scatter_rbf_utils::kernel_phi(3.0, &params));
    }

    #[test]
    fn custom_kernel_matrix_matches_named_equivalent() {
        let targets = faer::mat![[0.0, 0.0], [1.5, -0.5], [2.0, 3.0f64]];
        let sources = faer::mat![[0.5, 0.5], [-1.0, 2.0f64]];

        let custom = Kernel::custom(|r, eps| (-(r / eps).powi(2)).exp());
        let named = Kernel::from(KernelType::Gaussian);

        let from_custom = custom.a_matrix(&targets, &sources, 1.7);
        let from_named = named.a_matrix(&targets, &sources, 1.7);

        assert!(from_custom.shape() == (3, 2));
        assert!(from_custom == from_named);

        let mut distances = scatter_rbf_utils::get_distance_matrix(&sources);
        custom.transform_distances(&mut distances, 1.7);
        assert!(distances == named.a_matrix(&sources, &sources, 1.7));
    }

    #[test]
    fn settings_serialise_with_kernel_name() {
        let settings = InterpolantSettings::builder()
            .kernel(KernelType::Gaussian)
            .epsilon(1.25)
            .build()
            .unwrap();

        let json = serde_json::to_string(&settings).unwrap();
        assert!(json == r#"{"kernel":"gaussian","epsilon":1.25}"#);

        let back: InterpolantSettings = serde_json::from_str(&json).unwrap();
        assert!(back.kernel.kernel_type() == Some(KernelType::Gaussian));
        assert!(back.epsilon == Some(1.25));

        let custom = InterpolantSettings::builder()
            .kernel(Kernel::custom(|r, _| r))
            .build()
            .unwrap();
        assert!(serde_json::to_string(&custom).is_err());
    }
}
