mod geometry;
mod sim;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use geom::{Distance, Pt2D, Speed};

use crate::{
    DtaError, Link, LinkID, Movement, MovementID, Network, NodeID, Result, SimSeries,
    VehicleClassGroup, DEFAULT_LEVEL,
};

pub use self::geometry::Direction;

/// Everything needed to create a `RoadLink` besides its identity and endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadLinkAttributes {
    /// The link going the other way between the same nodes, if the two are attached
    pub reverse_attached_link: Option<LinkID>,
    /// Freeway, arterial, collector... Lower numbers are higher priority facilities.
    pub facility_type: usize,
    /// If None, the straight-line distance between the two nodes is used.
    pub length: Option<Distance>,
    pub freeflow_speed: Speed,
    /// Applied to the effective length of vehicles on the link
    pub effective_length_factor: f64,
    /// Applied to the response time of vehicles on the link
    pub response_time_factor: f64,
    pub num_lanes: usize,
    pub round_about: bool,
    /// Vertical alignment. None means `DEFAULT_LEVEL`.
    pub level: Option<isize>,
    pub label: Option<String>,
}

impl Default for RoadLinkAttributes {
    fn default() -> RoadLinkAttributes {
        RoadLinkAttributes {
            reverse_attached_link: None,
            facility_type: 0,
            length: None,
            freeflow_speed: Speed::miles_per_hour(30.0),
            effective_length_factor: 1.0,
            response_time_factor: 1.0,
            num_lanes: 1,
            round_about: false,
            level: None,
            label: None,
        }
    }
}

/// A directed road segment between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadLink {
    pub id: LinkID,
    pub start_node: NodeID,
    pub end_node: NodeID,
    pub label: String,
    pub reverse_attached_link: Option<LinkID>,
    pub facility_type: usize,
    pub effective_length_factor: f64,
    pub response_time_factor: f64,
    pub round_about: bool,
    pub level: isize,

    length: Option<Distance>,
    freeflow_speed: Speed,
    num_lanes: usize,
    /// Lane 0 is the outside lane; numbers increase towards the inside.
    lane_permissions: BTreeMap<usize, VehicleClassGroup>,
    /// Owns the outgoing movements, if there are any
    sim: SimSeries,
    incoming_movements: Vec<MovementID>,
    start_shift: Option<isize>,
    end_shift: Option<isize>,
    shape_points: Vec<Pt2D>,
}

impl RoadLink {
    pub fn new(
        id: LinkID,
        start_node: NodeID,
        end_node: NodeID,
        attribs: RoadLinkAttributes,
    ) -> Result<RoadLink> {
        let link = RoadLink {
            id,
            start_node,
            end_node,
            label: attribs.label.unwrap_or_default(),
            reverse_attached_link: attribs.reverse_attached_link,
            facility_type: attribs.facility_type,
            effective_length_factor: attribs.effective_length_factor,
            response_time_factor: attribs.response_time_factor,
            round_about: attribs.round_about,
            level: attribs.level.unwrap_or(DEFAULT_LEVEL),

            length: attribs.length,
            freeflow_speed: attribs.freeflow_speed,
            num_lanes: attribs.num_lanes,
            lane_permissions: BTreeMap::new(),
            sim: SimSeries::default(),
            incoming_movements: Vec::new(),
            start_shift: None,
            end_shift: None,
            shape_points: Vec::new(),
        };
        link.validate()?;
        Ok(link)
    }

    /// Checks the attributes every link must have. Deserialized links skip `new`, so the network
    /// checks them again when they're added.
    pub fn validate(&self) -> Result<()> {
        if self.num_lanes == 0 {
            return Err(DtaError::InvalidAttribute(format!(
                "{} can't have 0 lanes",
                self.id
            )));
        }
        if self.freeflow_speed <= Speed::ZERO {
            return Err(DtaError::InvalidAttribute(format!(
                "{} needs a positive free-flow speed, not {}",
                self.id, self.freeflow_speed
            )));
        }
        if let Some(lane) = self.lane_permissions.keys().find(|lane| **lane >= self.num_lanes) {
            return Err(DtaError::InvalidLane(format!(
                "{} has {} lanes, but a permission for lane {}",
                self.id, self.num_lanes, lane
            )));
        }
        Ok(())
    }

    pub fn get_num_lanes(&self) -> usize {
        self.num_lanes
    }

    pub fn set_num_lanes(&mut self, num_lanes: usize) -> Result<()> {
        if num_lanes == 0 {
            return Err(DtaError::InvalidAttribute(format!(
                "{} can't have 0 lanes",
                self.id
            )));
        }
        self.num_lanes = num_lanes;
        Ok(())
    }

    pub fn get_freeflow_speed(&self) -> Speed {
        self.freeflow_speed
    }

    /// Restricts lane `lane` (0 is the outside lane) to a group of vehicle classes.
    pub fn add_lane_permission(&mut self, lane: usize, group: VehicleClassGroup) -> Result<()> {
        if lane >= self.num_lanes {
            return Err(DtaError::InvalidLane(format!(
                "{} has {} lanes, so lane {} doesn't exist",
                self.id, self.num_lanes, lane
            )));
        }
        self.lane_permissions.insert(lane, group);
        Ok(())
    }

    pub fn get_lane_permission(&self, lane: usize) -> Option<&VehicleClassGroup> {
        self.lane_permissions.get(&lane)
    }

    /// The number of lanes the first and last segments are shifted from the roadway's center
    /// line.
    pub fn add_shifts(&mut self, start_shift: isize, end_shift: isize) {
        self.start_shift = Some(start_shift);
        self.end_shift = Some(end_shift);
    }

    /// Both are None until `add_shifts` is called.
    pub fn get_shifts(&self) -> (Option<isize>, Option<isize>) {
        (self.start_shift, self.end_shift)
    }

    pub fn add_shape_point(&mut self, pt: Pt2D) {
        self.shape_points.push(pt);
    }

    pub fn get_num_shape_points(&self) -> usize {
        self.shape_points.len()
    }

    pub fn shape_points(&self) -> &[Pt2D] {
        &self.shape_points
    }

    /// Either the link's own series, or the movements that hold them instead
    pub fn get_sim_series(&self) -> &SimSeries {
        &self.sim
    }

    pub fn num_outgoing_movements(&self) -> usize {
        self.sim.outgoing_movements().len()
    }

    pub fn outgoing_movements(&self) -> &[MovementID] {
        self.sim.outgoing_movements()
    }

    pub fn num_incoming_movements(&self) -> usize {
        self.incoming_movements.len()
    }

    pub fn incoming_movements(&self) -> &[MovementID] {
        &self.incoming_movements
    }

    pub fn has_outgoing_movement(&self, destination: NodeID, net: &Network) -> bool {
        self.get_outgoing_movement(destination, net).is_ok()
    }

    pub fn get_outgoing_movement<'a>(
        &self,
        destination: NodeID,
        net: &'a Network,
    ) -> Result<&'a Movement> {
        for id in self.outgoing_movements() {
            let movement = net.get_movement(*id)?;
            if movement.get_destination_node() == destination {
                return Ok(movement);
            }
        }
        Err(DtaError::UnknownObject(format!(
            "movement from {} ({} to {}) towards {}",
            self.id, self.start_node, self.end_node, destination
        )))
    }

    /// Fails if the link already holds its own series, since those would silently disappear once
    /// flow is split by movement.
    pub(crate) fn add_outgoing_movement(&mut self, movement: MovementID) -> Result<()> {
        match self.sim {
            SimSeries::Aggregated(ref series) => {
                if !series.is_empty() {
                    return Err(DtaError::StructuralConflict(format!(
                        "{} already has simulated series, so {} can't be added to it",
                        self.id, movement
                    )));
                }
                self.sim = SimSeries::Disaggregated(vec![movement]);
            }
            SimSeries::Disaggregated(ref mut movements) => {
                if movements.contains(&movement) {
                    return Err(DtaError::StructuralConflict(format!(
                        "{} already has {}",
                        self.id, movement
                    )));
                }
                movements.push(movement);
            }
        }
        Ok(())
    }

    pub(crate) fn remove_outgoing_movement(&mut self, movement: MovementID) -> Result<()> {
        let now_empty = match self.sim {
            SimSeries::Disaggregated(ref mut movements) if movements.contains(&movement) => {
                movements.retain(|m| *m != movement);
                movements.is_empty()
            }
            _ => {
                return Err(DtaError::UnknownObject(format!(
                    "{} on {}, which can't be removed",
                    movement, self.id
                )));
            }
        };
        if now_empty {
            self.sim = SimSeries::default();
        }
        Ok(())
    }

    pub(crate) fn add_incoming_movement(&mut self, movement: MovementID) {
        self.incoming_movements.push(movement);
    }

    pub(crate) fn remove_incoming_movement(&mut self, movement: MovementID) {
        self.incoming_movements.retain(|m| *m != movement);
    }
}

impl Link for RoadLink {
    fn id(&self) -> LinkID {
        self.id
    }

    fn start_node(&self) -> NodeID {
        self.start_node
    }

    fn end_node(&self) -> NodeID {
        self.end_node
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn is_road_link(&self) -> bool {
        true
    }
}
