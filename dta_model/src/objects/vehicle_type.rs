use serde::{Deserialize, Serialize};

use geom::{Distance, Duration};

/// A kind of vehicle, like `small_truck`, belonging to a broader class like `Truck`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    pub name: String,
    pub class_name: String,
    /// Effective length, including the gap to the vehicle in front
    pub length: Distance,
    pub response_time: Duration,
}

impl VehicleType {
    pub fn new(
        name: &str,
        class_name: &str,
        length: Distance,
        response_time: Duration,
    ) -> VehicleType {
        VehicleType {
            name: name.to_string(),
            class_name: class_name.to_string(),
            length,
            response_time,
        }
    }
}
