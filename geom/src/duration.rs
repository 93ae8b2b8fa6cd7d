use std::{fmt, ops};

use serde::{Deserialize, Serialize};

use crate::{deserialize_f64, serialize_f64, trim_f64};

/// A duration, in minutes. Can be negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Duration(
    #[serde(serialize_with = "serialize_f64", deserialize_with = "deserialize_f64")] f64,
);

impl Duration {
    pub const ZERO: Duration = Duration::const_minutes(0.0);

    /// Creates a duration in minutes.
    pub fn minutes(value: f64) -> Duration {
        if !value.is_finite() {
            panic!("Bad Duration {}", value);
        }

        Duration(trim_f64(value))
    }

    pub fn seconds(value: f64) -> Duration {
        Duration::minutes(value / 60.0)
    }

    pub fn hours(value: f64) -> Duration {
        Duration::minutes(value * 60.0)
    }

    pub const fn const_minutes(value: f64) -> Duration {
        Duration(value)
    }

    pub fn inner_minutes(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

impl ops::Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        Duration::minutes(self.0 + other.0)
    }
}

impl ops::AddAssign for Duration {
    fn add_assign(&mut self, other: Duration) {
        *self = *self + other;
    }
}

impl ops::Mul<f64> for Duration {
    type Output = Duration;

    fn mul(self, other: f64) -> Duration {
        Duration::minutes(self.0 * other)
    }
}

impl ops::Div<f64> for Duration {
    type Output = Duration;

    fn div(self, other: f64) -> Duration {
        if other == 0.0 {
            panic!("Can't divide {} / 0", self);
        }
        Duration::minutes(self.0 / other)
    }
}

impl ops::Div<Duration> for Duration {
    type Output = f64;

    fn div(self, other: Duration) -> f64 {
        if other == Duration::ZERO {
            panic!("Can't divide {} / 0", self);
        }
        self.0 / other.0
    }
}
