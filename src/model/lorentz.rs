//! Energy-momentum four-vectors.
//!
//! Units follow the rest of the crate: momenta in GeV/c, energies in GeV.

use std::iter::Sum;
use std::ops::Add;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Value returned as pseudorapidity for a vector along the beam axis.
pub const BEAM_AXIS_ETA: f64 = 1e20;

/// Four-vector with spatial part `p` and time component `e`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorentzVector {
    pub p: Vector3<f64>,
    pub e: f64,
}

impl LorentzVector {
    pub fn new(p: Vector3<f64>, e: f64) -> Self {
        Self { p, e }
    }

    /// Builds the on-shell four-momentum of a particle of `mass` with momentum `p`.
    pub fn from_mass_hypothesis(p: Vector3<f64>, mass: f64) -> Self {
        Self {
            p,
            e: (p.norm_squared() + mass * mass).sqrt(),
        }
    }

    #[inline]
    pub fn vect(&self) -> Vector3<f64> {
        self.p
    }

    #[inline]
    pub fn px(&self) -> f64 {
        self.p.x
    }

    #[inline]
    pub fn py(&self) -> f64 {
        self.p.y
    }

    #[inline]
    pub fn pz(&self) -> f64 {
        self.p.z
    }

    #[inline]
    pub fn m2(&self) -> f64 {
        self.e * self.e - self.p.norm_squared()
    }

    /// Invariant mass; space-like vectors report a negative mass.
    pub fn m(&self) -> f64 {
        let m2 = self.m2();
        if m2 < 0.0 { -(-m2).sqrt() } else { m2.sqrt() }
    }

    /// Transverse momentum.
    #[inline]
    pub fn perp(&self) -> f64 {
        self.p.x.hypot(self.p.y)
    }

    #[inline]
    pub fn phi(&self) -> f64 {
        self.p.y.atan2(self.p.x)
    }

    pub fn theta(&self) -> f64 {
        let mag = self.p.norm();
        if mag == 0.0 {
            0.0
        } else {
            (self.p.z / mag).clamp(-1.0, 1.0).acos()
        }
    }

    /// Pseudorapidity `-ln tan(θ/2)`, or [`BEAM_AXIS_ETA`] when undefined.
    pub fn pseudo_rapidity(&self) -> f64 {
        let t = (self.theta() / 2.0).tan();
        if t <= 0.0 { BEAM_AXIS_ETA } else { -t.ln() }
    }
}

impl Default for LorentzVector {
    fn default() -> Self {
        Self {
            p: Vector3::zeros(),
            e: 0.0,
        }
    }
}

impl Add for LorentzVector {
    type Output = LorentzVector;

    fn add(self, rhs: LorentzVector) -> LorentzVector {
        LorentzVector {
            p: self.p + rhs.p,
            e: self.e + rhs.e,
        }
    }
}

impl Sum for LorentzVector {
    fn sum<I: Iterator<Item = LorentzVector>>(iter: I) -> Self {
        iter.fold(LorentzVector::default(), Add::add)
    }
}
