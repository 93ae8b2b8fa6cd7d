use std::{fmt, ops};

use serde::{Deserialize, Serialize};

use crate::{deserialize_f64, serialize_f64, trim_f64, Distance, Duration};

/// In miles per hour. Can be negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Speed(
    #[serde(serialize_with = "serialize_f64", deserialize_with = "deserialize_f64")] f64,
);

impl Speed {
    pub const ZERO: Speed = Speed::const_miles_per_hour(0.0);

    pub fn miles_per_hour(value: f64) -> Speed {
        if !value.is_finite() {
            panic!("Bad Speed {}", value);
        }

        Speed(trim_f64(value))
    }

    pub const fn const_miles_per_hour(value: f64) -> Speed {
        Speed(value)
    }

    /// Panics if the duration is zero; callers have to rule that out first.
    pub fn from_dist_time(d: Distance, t: Duration) -> Speed {
        if t == Duration::ZERO {
            panic!("Can't compute a speed for {} over zero time", d);
        }
        Speed::miles_per_hour(d.to_miles() / (t.inner_minutes() / 60.0))
    }

    pub fn inner_miles_per_hour(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} mph", self.0)
    }
}

impl ops::Mul<Duration> for Speed {
    type Output = Distance;

    fn mul(self, other: Duration) -> Distance {
        Distance::miles(self.0 * other.inner_minutes() / 60.0)
    }
}
