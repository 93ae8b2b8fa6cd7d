use std::collections::BTreeMap;

use geom::{Duration, Pt2D};

use crate::{
    DtaError, LinkID, Movement, MovementID, Node, NodeID, Result, RoadLink, SimClock,
    TimeWindow, VehicleClassGroup, VehicleType,
};

/// Owns every object in the network and keeps the relationships between them consistent.
pub struct Network {
    clock: SimClock,
    nodes: BTreeMap<NodeID, Node>,
    links: BTreeMap<LinkID, RoadLink>,
    movements: BTreeMap<MovementID, Movement>,
    vehicle_class_groups: BTreeMap<String, VehicleClassGroup>,
    vehicle_types: Vec<VehicleType>,
    next_movement_id: usize,
}

impl Network {
    pub fn new(clock: SimClock) -> Network {
        Network {
            clock,
            nodes: BTreeMap::new(),
            links: BTreeMap::new(),
            movements: BTreeMap::new(),
            vehicle_class_groups: BTreeMap::new(),
            vehicle_types: Vec::new(),
            next_movement_id: 0,
        }
    }

    pub fn get_clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(DtaError::StructuralConflict(format!(
                "{} already exists",
                node.id
            )));
        }
        debug!("Adding {} at {}", node.id, node.pt);
        self.nodes.insert(node.id, node);
        Ok(())
    }

    /// Link geometry is always derived from the current node positions, so nothing else needs
    /// updating.
    pub fn move_node(&mut self, id: NodeID, pt: Pt2D) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| DtaError::UnknownObject(id.to_string()))?;
        info!("Moving {} from {} to {}", id, node.pt, pt);
        node.pt = pt;
        Ok(())
    }

    pub fn add_link(&mut self, link: RoadLink) -> Result<()> {
        if self.links.contains_key(&link.id) {
            return Err(DtaError::StructuralConflict(format!(
                "{} already exists",
                link.id
            )));
        }
        link.validate()?;
        for node in [link.start_node, link.end_node] {
            self.get_node(node)?;
        }
        if link.get_sim_series().is_disaggregated() || link.num_incoming_movements() > 0 {
            return Err(DtaError::StructuralConflict(format!(
                "{} already has movements; register them with add_movement instead",
                link.id
            )));
        }
        debug!("Adding {} from {} to {}", link.id, link.start_node, link.end_node);
        self.links.insert(link.id, link);
        Ok(())
    }

    pub fn add_vehicle_class_group(&mut self, group: VehicleClassGroup) -> Result<()> {
        if self.vehicle_class_groups.contains_key(&group.name) {
            return Err(DtaError::StructuralConflict(format!(
                "{} already exists",
                group
            )));
        }
        self.vehicle_class_groups.insert(group.name.clone(), group);
        Ok(())
    }

    pub fn add_vehicle_type(&mut self, vehicle_type: VehicleType) {
        self.vehicle_types.push(vehicle_type);
    }

    /// Registers a turn from the end of `incoming` onto `outgoing`, updating both links. A link
    /// can have at most one movement towards each destination node, and a link that already
    /// stores its own simulated series can't start splitting flow by movement.
    pub fn add_movement(
        &mut self,
        incoming: LinkID,
        outgoing: LinkID,
        permission: VehicleClassGroup,
    ) -> Result<MovementID> {
        let from = self.get_link(incoming)?;
        let to = self.get_link(outgoing)?;
        if from.end_node != to.start_node {
            return Err(DtaError::StructuralConflict(format!(
                "{} ends at {}, but {} starts at {}",
                incoming, from.end_node, outgoing, to.start_node
            )));
        }
        let at_node = from.end_node;
        let destination = to.end_node;
        if from.has_outgoing_movement(destination, self) {
            return Err(DtaError::StructuralConflict(format!(
                "{} already has a movement towards {}",
                incoming, destination
            )));
        }

        let id = MovementID(self.next_movement_id);
        // This is the only step that can fail, so nothing is half-registered afterwards
        self.get_link_mut(incoming)?.add_outgoing_movement(id)?;
        self.get_link_mut(outgoing)?.add_incoming_movement(id);
        let movement = Movement::new(id, at_node, incoming, outgoing, destination, permission);
        debug!("Adding {}", movement);
        self.movements.insert(id, movement);
        self.next_movement_id += 1;
        Ok(id)
    }

    /// Unregisters a movement from both of its links and hands it back, series included.
    pub fn remove_movement(&mut self, id: MovementID) -> Result<Movement> {
        let (incoming, outgoing) = {
            let movement = self.get_movement(id)?;
            (movement.incoming_link, movement.outgoing_link)
        };
        self.get_link_mut(incoming)?.remove_outgoing_movement(id)?;
        self.get_link_mut(outgoing)?.remove_incoming_movement(id);
        debug!("Removed {}", id);
        self.movements
            .remove(&id)
            .ok_or_else(|| DtaError::UnknownObject(id.to_string()))
    }

    pub fn get_node(&self, id: NodeID) -> Result<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| DtaError::UnknownObject(id.to_string()))
    }

    /// Like `get_node`, but panics if the node doesn't exist. Links can only be added when both
    /// of their nodes exist and nodes are never removed, so this never fails for the endpoints of
    /// a link in this network. Passing a link that belongs to a different network will panic.
    pub fn get_n(&self, id: NodeID) -> &Node {
        match self.nodes.get(&id) {
            Some(node) => node,
            None => panic!("{} isn't in this network", id),
        }
    }

    pub fn get_link(&self, id: LinkID) -> Result<&RoadLink> {
        self.links
            .get(&id)
            .ok_or_else(|| DtaError::UnknownObject(id.to_string()))
    }

    pub fn get_link_mut(&mut self, id: LinkID) -> Result<&mut RoadLink> {
        self.links
            .get_mut(&id)
            .ok_or_else(|| DtaError::UnknownObject(id.to_string()))
    }

    pub fn get_movement(&self, id: MovementID) -> Result<&Movement> {
        self.movements
            .get(&id)
            .ok_or_else(|| DtaError::UnknownObject(id.to_string()))
    }

    pub fn get_vehicle_class_group(&self, name: &str) -> Result<&VehicleClassGroup> {
        self.vehicle_class_groups
            .get(name)
            .ok_or_else(|| DtaError::UnknownObject(format!("vehicle class group {}", name)))
    }

    pub fn get_vehicle_types(&self) -> &[VehicleType] {
        &self.vehicle_types
    }

    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn all_links(&self) -> impl Iterator<Item = &RoadLink> {
        self.links.values()
    }

    pub fn all_movements(&self) -> impl Iterator<Item = &Movement> {
        self.movements.values()
    }

    /// Sets the simulated volume of a link for one native time bin. See
    /// `RoadLink::set_sim_volume` for when this is delegated to a movement.
    pub fn set_sim_volume(
        &mut self,
        link: LinkID,
        window: TimeWindow,
        volume: usize,
    ) -> Result<()> {
        let road_link = self
            .links
            .get_mut(&link)
            .ok_or_else(|| DtaError::UnknownObject(link.to_string()))?;
        road_link.set_sim_volume(window, volume, &self.clock, &mut self.movements)
    }

    /// Sets the simulated mean travel time of a link for one native time bin.
    pub fn set_sim_tt(&mut self, link: LinkID, window: TimeWindow, tt: Duration) -> Result<()> {
        let road_link = self
            .links
            .get_mut(&link)
            .ok_or_else(|| DtaError::UnknownObject(link.to_string()))?;
        road_link.set_sim_tt(window, tt, &self.clock, &mut self.movements)
    }

    pub fn set_movement_sim_volume(
        &mut self,
        id: MovementID,
        window: TimeWindow,
        volume: usize,
    ) -> Result<()> {
        let movement = self
            .movements
            .get_mut(&id)
            .ok_or_else(|| DtaError::UnknownObject(id.to_string()))?;
        movement.set_sim_volume(window, volume, &self.clock)
    }

    pub fn set_movement_sim_tt(
        &mut self,
        id: MovementID,
        window: TimeWindow,
        tt: Duration,
    ) -> Result<()> {
        let movement = self
            .movements
            .get_mut(&id)
            .ok_or_else(|| DtaError::UnknownObject(id.to_string()))?;
        movement.set_sim_tt(window, tt, &self.clock)
    }
}
