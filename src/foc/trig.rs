// Electrical angle representation and stationary-to-rotating frame transform.
//
// Uses idsp::cossin for fast fixed-point trigonometry instead of libm
// sinf/cosf, trading a small amount of accuracy (~1e-5) for a large
// speedup in the interrupt hot path.

use core::f32::consts::{PI, TAU};

use super::vect::{DqVector, PhaseVector};

const INV_SQRT3: f32 = 0.577_350_26; // 1/sqrt(3)

/// Wrap an angle into the range [0, 2π).
pub fn wrap_angle(theta: f32) -> f32 {
    let mut theta = theta;
    while theta >= TAU {
        theta -= TAU;
    }
    while theta < 0.0 {
        theta += TAU;
    }
    theta
}

/// Precomputed cos/sin pair for one electrical angle.
///
/// Built once per scheduler step and reused for every transform at that
/// angle, so the trigonometry cost is paid a single time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectricalAngle {
    cos: f32,
    sin: f32,
}

impl ElectricalAngle {
    /// Build the cos/sin pair from an angle in radians.
    ///
    /// # Arguments
    /// * `theta` - Electrical angle (radians, any range)
    pub fn from_radians(theta: f32) -> Self {
        // idsp::cossin takes the phase as i32 where the full i32 range
        // maps to [-π, π)
        let theta = wrap_angle(theta);
        let centered = if theta > PI { theta - TAU } else { theta };

        const SCALE: f32 = 2_147_483_648.0 / PI; // 2^31 / π
        const I32_TO_F32: f32 = 1.0 / 2_147_483_648.0; // 2^-31

        let phase = (centered * SCALE) as i32;
        let (cos_i32, sin_i32) = idsp::cossin(phase);

        Self {
            cos: cos_i32 as f32 * I32_TO_F32,
            sin: sin_i32 as f32 * I32_TO_F32,
        }
    }

    pub fn cos(&self) -> f32 {
        self.cos
    }

    pub fn sin(&self) -> f32 {
        self.sin
    }

    /// Rotate stationary-frame phase quantities into the rotating frame.
    ///
    /// Amplitude-invariant Clarke transform followed by the Park
    /// transform at this angle.
    ///
    /// # Arguments
    /// * `uvw` - Phase quantities (currents or their slopes)
    ///
    /// # Returns
    /// The d/q components at this electrical angle
    pub fn to_rotating(&self, uvw: PhaseVector) -> DqVector {
        let alpha = (2.0 * uvw.u - uvw.v - uvw.w) * (1.0 / 3.0);
        let beta = (uvw.v - uvw.w) * INV_SQRT3;

        DqVector {
            d: alpha * self.cos + beta * self.sin,
            q: -alpha * self.sin + beta * self.cos,
        }
    }
}
