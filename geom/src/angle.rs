use std::{f64, fmt};

use serde::{Deserialize, Serialize};

/// An angle, stored in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn radians(rads: f64) -> Angle {
        Angle(rads)
    }

    pub fn degrees(degs: f64) -> Angle {
        Angle(degs.to_radians())
    }

    pub fn opposite(self) -> Angle {
        Angle(self.0 + f64::consts::PI)
    }

    /// Returns [0, 2pi)
    pub fn normalized_radians(self) -> f64 {
        let rads = self.0.rem_euclid(2.0 * f64::consts::PI);
        // rem_euclid can round up to exactly 2pi for tiny negative inputs
        if rads >= 2.0 * f64::consts::PI {
            0.0
        } else {
            rads
        }
    }

    /// Returns [0, 360)
    pub fn normalized_degrees(self) -> f64 {
        self.normalized_radians().to_degrees()
    }

    /// True if the two angles are within some number of degrees of each other.
    pub fn approx_eq(self, other: Angle, within_degrees: f64) -> bool {
        let diff = (self.normalized_degrees() - other.normalized_degrees()).abs();
        diff.min(360.0 - diff) <= within_degrees
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({} degrees)", self.normalized_degrees())
    }
}
