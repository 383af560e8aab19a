//! BSDF interface.

use crate::geometry::{Point2f, ShadingBasis, Vector3f};
use crate::math::Float;
use crate::spectrum::Spectrum;
use bitflags::bitflags;

bitflags! {
    /// Stores combination of flags for the scattering modes.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ScatteringMode: u8 {
        const DIFFUSE = 1;
        const GLOSSY = 2;
        const ALL = Self::DIFFUSE.bits() | Self::GLOSSY.bits();
    }
}

/// The result of sampling a scattering direction.
pub struct BsdfSample {
    /// Sampled incoming direction in world space.
    pub incoming: Vector3f,

    /// Spectral throughput value of the sampled lobe.
    pub value: Spectrum,

    /// Probability density of the sampled direction under the sampled lobe.
    pub pdf: Float,

    /// Scattering mode of the sampled lobe; empty means absorption.
    pub mode: ScatteringMode,
}

impl BsdfSample {
    /// Returns an absorption sample carrying no contribution.
    pub fn absorption() -> Self {
        Self {
            incoming: Vector3f::zero(),
            value: Spectrum::new(0.0),
            pdf: 0.0,
            mode: ScatteringMode::empty(),
        }
    }

    /// Returns true if the sample represents absorption.
    pub fn is_absorption(&self) -> bool {
        self.mode.is_empty()
    }
}

/// BSDF interface. Directions are unit vectors in world space pointing away
/// from the surface; the shading basis anchors the local frame.
pub trait Bsdf {
    /// Material input values resolved for one shading point.
    type Inputs;

    /// Samples one scattering direction for the given outgoing direction.
    /// The returned value and probability density are those of the sampled
    /// lobe alone, not reweighted by any lobe-selection probability.
    ///
    /// * `inputs`   - Material input values.
    /// * `basis`    - Shading basis at the shading point.
    /// * `outgoing` - Outgoing direction.
    /// * `s`        - Uniform random scalar used for lobe selection.
    /// * `u`        - Uniform random pair used for direction sampling.
    fn sample(
        &self,
        inputs: &Self::Inputs,
        basis: &ShadingBasis,
        outgoing: &Vector3f,
        s: Float,
        u: &Point2f,
    ) -> BsdfSample;

    /// Evaluates the BSDF for a direction pair, returning the summed lobe
    /// values and the lobe-weighted probability density of `incoming`.
    ///
    /// * `inputs`   - Material input values.
    /// * `basis`    - Shading basis at the shading point.
    /// * `outgoing` - Outgoing direction.
    /// * `incoming` - Incoming direction.
    /// * `modes`    - Scattering modes to include.
    fn evaluate(
        &self,
        inputs: &Self::Inputs,
        basis: &ShadingBasis,
        outgoing: &Vector3f,
        incoming: &Vector3f,
        modes: ScatteringMode,
    ) -> (Spectrum, Float);

    /// Returns the lobe-weighted probability density of `incoming`.
    ///
    /// * `inputs`   - Material input values.
    /// * `basis`    - Shading basis at the shading point.
    /// * `outgoing` - Outgoing direction.
    /// * `incoming` - Incoming direction.
    /// * `modes`    - Scattering modes to include.
    fn evaluate_pdf(
        &self,
        inputs: &Self::Inputs,
        basis: &ShadingBasis,
        outgoing: &Vector3f,
        incoming: &Vector3f,
        modes: ScatteringMode,
    ) -> Float;
}
