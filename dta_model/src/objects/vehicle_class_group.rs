use std::fmt;

use serde::{Deserialize, Serialize};

/// A named set of vehicle classes, used to restrict who may use a lane or a movement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleClassGroup {
    pub name: String,
    /// Either `All`, `Prohibited`, or vehicle class names joined by `|`
    pub class_definition: String,
    pub color_code: String,
}

impl VehicleClassGroup {
    pub const CLASS_DEFINITION_ALL: &'static str = "All";
    pub const CLASS_DEFINITION_PROHIBITED: &'static str = "Prohibited";

    pub fn new(name: &str, class_definition: &str, color_code: &str) -> VehicleClassGroup {
        VehicleClassGroup {
            name: name.to_string(),
            class_definition: class_definition.to_string(),
            color_code: color_code.to_string(),
        }
    }

    pub fn allows_all(&self) -> bool {
        self.class_definition == VehicleClassGroup::CLASS_DEFINITION_ALL
    }

    pub fn prohibits_all(&self) -> bool {
        self.class_definition == VehicleClassGroup::CLASS_DEFINITION_PROHIBITED
    }

    pub fn allows(&self, vehicle_class: &str) -> bool {
        if self.allows_all() {
            return true;
        }
        if self.prohibits_all() {
            return false;
        }
        self.class_definition
            .split('|')
            .any(|class| class.trim() == vehicle_class)
    }
}

impl fmt::Display for VehicleClassGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "VehicleClassGroup {} ({})", self.name, self.class_definition)
    }
}
