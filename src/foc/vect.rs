// Frame vector value types shared across the control core.

use libm::sqrtf;

/// Stationary-frame three-phase quantities (u, v, w).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseVector {
    pub u: f32,
    pub v: f32,
    pub w: f32,
}

impl PhaseVector {
    pub const ZERO: PhaseVector = PhaseVector {
        u: 0.0,
        v: 0.0,
        w: 0.0,
    };

    pub const fn new(u: f32, v: f32, w: f32) -> Self {
        Self { u, v, w }
    }
}

/// Rotating-frame quantities (d, q).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DqVector {
    pub d: f32,
    pub q: f32,
}

impl DqVector {
    pub const ZERO: DqVector = DqVector { d: 0.0, q: 0.0 };

    pub const fn new(d: f32, q: f32) -> Self {
        Self { d, q }
    }

    /// Euclidean magnitude of the vector.
    pub fn magnitude(&self) -> f32 {
        sqrtf(self.d * self.d + self.q * self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dq_magnitude() {
        let v = DqVector::new(3.0, 4.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_constants() {
        assert_eq!(DqVector::ZERO.magnitude(), 0.0);
        assert_eq!(PhaseVector::ZERO, PhaseVector::new(0.0, 0.0, 0.0));
    }
}
