//! The road network of a dynamic traffic assignment model: nodes, road links, the movements
//! (turns) between them, and the time-binned volumes and travel times a simulation produces for
//! each.

#[macro_use]
extern crate log;

mod error;
mod network;
mod objects;
mod series;
mod sim_clock;

pub use crate::error::{DtaError, Result};
pub use crate::network::Network;
pub use crate::objects::link::{Link, LinkID};
pub use crate::objects::movement::{Movement, MovementID};
pub use crate::objects::node::{Node, NodeID};
pub use crate::objects::road_link::{Direction, RoadLink, RoadLinkAttributes};
pub use crate::objects::vehicle_class_group::VehicleClassGroup;
pub use crate::objects::vehicle_type::VehicleType;
pub use crate::series::{BinnedSeries, SimSeries};
pub use crate::sim_clock::{SimClock, TimeWindow};

use geom::Distance;

pub const DEFAULT_LANE_WIDTH: Distance = Distance::const_feet(12.0);
pub const DEFAULT_LEVEL: isize = 0;
/// Links closer than this in angle are considered to overlap.
pub const OVERLAP_THRESHOLD_DEGREES: f64 = 1.0;
