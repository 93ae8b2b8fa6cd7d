//! Shared helpers for building small networks in scenario tests.

use anyhow::Result;

use dta_model::{
    LinkID, MovementID, Network, Node, NodeID, RoadLink, RoadLinkAttributes, SimClock,
    VehicleClassGroup,
};
use geom::{Distance, Pt2D, Speed};

/// Turns on logging, once. Set `RUST_LOG=debug` to see what the network does.
pub fn setup() {
    dta_util::logger::setup_with_default_filter("warn");
}

/// One hour, in 15 minute bins
pub fn hour_clock() -> Result<SimClock> {
    Ok(SimClock::new(0, 60, 15)?)
}

pub fn empty_network() -> Result<Network> {
    setup();
    Ok(Network::new(hour_clock()?))
}

pub fn all_vehicles() -> VehicleClassGroup {
    VehicleClassGroup::new("all", VehicleClassGroup::CLASS_DEFINITION_ALL, "#ffffff")
}

pub fn add_node(net: &mut Network, id: usize, x: f64, y: f64) -> Result<NodeID> {
    net.add_node(Node::new(NodeID(id), Pt2D::new(x, y)))?;
    Ok(NodeID(id))
}

pub fn add_link(
    net: &mut Network,
    id: usize,
    from: NodeID,
    to: NodeID,
    attribs: RoadLinkAttributes,
) -> Result<LinkID> {
    net.add_link(RoadLink::new(LinkID(id), from, to, attribs)?)?;
    Ok(LinkID(id))
}

/// A network with one link between two points.
pub fn single_link(from: (f64, f64), to: (f64, f64), num_lanes: usize) -> Result<(Network, LinkID)> {
    let mut net = empty_network()?;
    let n1 = add_node(&mut net, 1, from.0, from.1)?;
    let n2 = add_node(&mut net, 2, to.0, to.1)?;
    let link = add_link(
        &mut net,
        1,
        n1,
        n2,
        RoadLinkAttributes {
            num_lanes,
            ..Default::default()
        },
    )?;
    Ok((net, link))
}

/// A one mile approach, 30 mph free-flow, heading east into node 0. From there, `num_exits`
/// links leave towards the north, east, and south (in that order), each with a movement from
/// the approach.
pub fn fan_out(num_exits: usize) -> Result<(Network, LinkID, Vec<MovementID>)> {
    assert!(num_exits <= 3);
    let mut net = empty_network()?;
    let center = add_node(&mut net, 0, 5280.0, 0.0)?;
    let west = add_node(&mut net, 1, 0.0, 0.0)?;
    let approach = add_link(
        &mut net,
        100,
        west,
        center,
        RoadLinkAttributes {
            length: Some(Distance::miles(1.0)),
            freeflow_speed: Speed::miles_per_hour(30.0),
            num_lanes: 2,
            ..Default::default()
        },
    )?;

    let mut movements = Vec::new();
    for (idx, (x, y)) in [(5280.0, 500.0), (5780.0, 0.0), (5280.0, -500.0)]
        .into_iter()
        .take(num_exits)
        .enumerate()
    {
        let node = add_node(&mut net, 10 + idx, x, y)?;
        let exit = add_link(&mut net, 200 + idx, center, node, RoadLinkAttributes::default())?;
        movements.push(net.add_movement(approach, exit, all_vehicles())?);
    }
    Ok((net, approach, movements))
}
