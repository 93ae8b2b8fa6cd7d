//! Geometry primitives and typed units for road networks.
//!
//! World space is measured in feet, with x growing eastward and y growing northward.

mod angle;
mod distance;
mod duration;
mod line;
mod pt;
mod speed;

pub use crate::angle::Angle;
pub use crate::distance::Distance;
pub use crate::duration::Duration;
pub use crate::line::Line;
pub use crate::pt::Pt2D;
pub use crate::speed::Speed;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reduce the precision of an f64. This helps ensure serialization is idempotent (everything is
/// exactly the same before and after saving/loading). Ideally we'd use some kind of proper
/// fixed-precision type instead of f64.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Serializes a trimmed `f64` as an integer number of ten-thousandths. Distances are in feet, so
/// an `i32` would only reach about 40 miles; an `i64` covers anything an f64 holds exactly.
fn serialize_f64<S: Serializer>(x: &f64, s: S) -> Result<S::Ok, S::Error> {
    let int = (x * 10_000.0).round() as i64;
    int.serialize(s)
}

/// Deserializes a trimmed `f64` from an `i64`.
fn deserialize_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let x = <i64>::deserialize(d)?;
    Ok(x as f64 / 10_000.0)
}
