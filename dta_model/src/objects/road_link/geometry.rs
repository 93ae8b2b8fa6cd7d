use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use geom::{Angle, Distance, Line, Pt2D};

use crate::{
    DtaError, Network, Result, RoadLink, DEFAULT_LANE_WIDTH, OVERLAP_THRESHOLD_DEGREES,
};

/// How far a cosine may stray outside [-1, 1] from floating point error alone
const COSINE_EPSILON: f64 = 0.00001;

/// A coarse compass heading, for grouping and reporting links. Not precise geometry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Northbound,
    Eastbound,
    Southbound,
    Westbound,
}

impl Direction {
    /// Buckets a compass bearing (clockwise from north) into 90 degree slices centered on the
    /// four cardinal directions.
    pub fn from_orientation(orientation: Angle) -> Direction {
        let degrees = orientation.normalized_degrees();
        if !(45.0..315.0).contains(&degrees) {
            Direction::Northbound
        } else if degrees < 135.0 {
            Direction::Eastbound
        } else if degrees < 225.0 {
            Direction::Southbound
        } else {
            Direction::Westbound
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Northbound => write!(f, "NB"),
            Direction::Eastbound => write!(f, "EB"),
            Direction::Southbound => write!(f, "SB"),
            Direction::Westbound => write!(f, "WB"),
        }
    }
}

/// Geometry is derived from the positions of the link's nodes in `net`. Every method here panics
/// if `net` isn't the network holding the link, the same as `Network::get_n`.
impl RoadLink {
    /// The straight segment between the two nodes, ignoring shape points.
    pub fn node_to_node(&self, net: &Network) -> Line {
        Line::new(net.get_n(self.start_node).pt(), net.get_n(self.end_node).pt())
    }

    pub fn euclidean_length(&self, net: &Network) -> Distance {
        self.node_to_node(net).length()
    }

    /// The length given at construction, or the straight-line distance between the nodes.
    pub fn length(&self, net: &Network) -> Distance {
        self.length.unwrap_or_else(|| self.euclidean_length(net))
    }

    pub fn get_length_in_miles(&self, net: &Network) -> f64 {
        self.length(net).to_miles()
    }

    /// The width of all lanes together
    pub fn get_width(&self) -> Distance {
        DEFAULT_LANE_WIDTH * (self.num_lanes as f64)
    }

    /// The node-to-node segment shifted right by half the road's width. Always derived from the
    /// current node positions.
    pub fn center_line(&self, net: &Network) -> Line {
        self.node_to_node(net).shift_right(self.get_width() / 2.0)
    }

    /// The physical footprint of the road, clockwise: start node, end node, then both of those
    /// shifted right by the full road width times `scale`.
    pub fn outline(&self, net: &Network, scale: f64) -> [Pt2D; 4] {
        let edge = self.node_to_node(net);
        let shifted = edge.shift_right(self.get_width() * scale);
        [edge.pt1(), edge.pt2(), shifted.pt2(), shifted.pt1()]
    }

    pub fn mid_point(&self, net: &Network) -> Pt2D {
        self.center_line(net).middle()
    }

    /// The angle in [0, 180] degrees between the two links, each treated as a straight segment
    /// from start to end node.
    pub fn acute_angle(&self, other: &RoadLink, net: &Network) -> Result<Angle> {
        let line1 = self.node_to_node(net);
        let line2 = other.node_to_node(net);
        for (id, line) in [(self.id, &line1), (other.id, &line2)] {
            if line.is_degenerate() {
                return Err(DtaError::DegenerateGeometry(format!(
                    "{} has zero length, so it has no direction",
                    id
                )));
            }
        }

        if self.id == other.id || line1 == line2 {
            return Ok(Angle::ZERO);
        }
        if self.start_node == other.end_node && self.end_node == other.start_node {
            return Ok(Angle::degrees(180.0));
        }

        let cos = line1.cos_between(&line2).ok_or_else(|| {
            DtaError::DegenerateGeometry(format!("{} or {} has zero length", self.id, other.id))
        })?;
        if cos.abs() <= 1.0 {
            return Ok(Angle::radians(cos.acos()));
        }
        // Rounding error past either end of the range counts as parallel
        if cos.abs() - 1.0 < COSINE_EPSILON {
            return Ok(Angle::ZERO);
        }
        Err(DtaError::DegenerateGeometry(format!(
            "can't find the angle between {} and {} (cosine {})",
            self.id, other.id, cos
        )))
    }

    /// Nearly parallel links pointing the same way are treated as duplicates of each other.
    pub fn is_overlapping(&self, other: &RoadLink, net: &Network) -> Result<bool> {
        Ok(self.acute_angle(other, net)?.normalized_degrees() <= OVERLAP_THRESHOLD_DEGREES)
    }

    /// The compass bearing of the link's last segment, clockwise from north. The last segment
    /// runs between the last two shape points, if there are any.
    pub fn orientation(&self, net: &Network) -> Angle {
        let (from, to) = match self.shape_points.len() {
            0 => (
                net.get_n(self.start_node).pt(),
                net.get_n(self.end_node).pt(),
            ),
            1 => (self.shape_points[0], net.get_n(self.end_node).pt()),
            n => (self.shape_points[n - 2], self.shape_points[n - 1]),
        };
        compass_bearing(from, to)
    }

    pub fn direction(&self, net: &Network) -> Direction {
        Direction::from_orientation(self.orientation(net))
    }
}

/// Clockwise from north, by quadrant. Identical points point north.
fn compass_bearing(from: Pt2D, to: Pt2D) -> Angle {
    let dx = to.x() - from.x();
    let dy = to.y() - from.y();
    let rads = if dx > 0.0 && dy <= 0.0 {
        // Southeast
        (dy.abs() / dx.abs()).atan() + FRAC_PI_2
    } else if dx <= 0.0 && dy < 0.0 {
        // Southwest
        (dx.abs() / dy.abs()).atan() + PI
    } else if dx < 0.0 && dy >= 0.0 {
        // Northwest
        (dy.abs() / dx.abs()).atan() + 3.0 * FRAC_PI_2
    } else if dx >= 0.0 && dy > 0.0 {
        // Northeast
        (dx.abs() / dy.abs()).atan()
    } else {
        0.0
    };
    Angle::radians(rads)
}
