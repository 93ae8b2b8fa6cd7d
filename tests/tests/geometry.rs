use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use dta_model::{Direction, DtaError, LinkID, Network, RoadLinkAttributes};
use geom::{Angle, Distance, Pt2D};
use tests::{add_link, add_node, empty_network, single_link};

fn pts_close(actual: Pt2D, expected: (f64, f64)) -> bool {
    actual.approx_eq(Pt2D::new(expected.0, expected.1), Distance::feet(0.001))
}

/// Links between random pairs of points, none of them zero-length.
fn random_links(rng: &mut XorShiftRng, count: usize) -> Result<(Network, Vec<LinkID>)> {
    let mut net = empty_network()?;
    let mut links = Vec::new();
    for i in 0..count {
        let from = add_node(
            &mut net,
            2 * i,
            rng.gen_range(-1000.0..1000.0),
            rng.gen_range(-1000.0..1000.0),
        )?;
        let to = add_node(
            &mut net,
            2 * i + 1,
            rng.gen_range(-1000.0..1000.0),
            rng.gen_range(-1000.0..1000.0),
        )?;
        links.push(add_link(&mut net, i, from, to, RoadLinkAttributes::default())?);
    }
    Ok((net, links))
}

#[test]
fn eastbound_link() -> Result<()> {
    let (net, link) = single_link((0.0, 0.0), (10.0, 0.0), 2)?;
    let road = net.get_link(link)?;
    assert!(road.orientation(&net).approx_eq(Angle::degrees(90.0), 0.0001));
    assert_eq!(road.direction(&net), Direction::Eastbound);
    assert_eq!(road.direction(&net).to_string(), "EB");
    assert_eq!(road.get_width(), Distance::feet(24.0));
    Ok(())
}

#[test]
fn northbound_footprint() -> Result<()> {
    let (net, link) = single_link((0.0, 0.0), (0.0, 10.0), 1)?;
    let road = net.get_link(link)?;
    assert_eq!(road.direction(&net), Direction::Northbound);

    // Half a lane to the right of the nodes
    let center = road.center_line(&net);
    assert!(pts_close(center.pt1(), (6.0, 0.0)));
    assert!(pts_close(center.pt2(), (6.0, 10.0)));
    assert!(pts_close(road.mid_point(&net), (6.0, 5.0)));

    let outline = road.outline(&net, 1.0);
    for (pt, expected) in outline
        .iter()
        .zip([(0.0, 0.0), (0.0, 10.0), (12.0, 10.0), (12.0, 0.0)])
    {
        assert!(pts_close(*pt, expected), "{} isn't {:?}", pt, expected);
    }
    let wide = road.outline(&net, 2.0);
    assert!(pts_close(wide[2], (24.0, 10.0)));
    Ok(())
}

#[test]
fn shape_points_set_the_orientation() -> Result<()> {
    let (mut net, link) = single_link((0.0, 0.0), (100.0, 0.0), 1)?;
    assert_eq!(net.get_link(link)?.direction(&net), Direction::Eastbound);

    // From the only shape point to the end node, heading south
    net.get_link_mut(link)?.add_shape_point(Pt2D::new(100.0, 100.0));
    assert_eq!(net.get_link(link)?.direction(&net), Direction::Southbound);

    // Between the last two shape points, heading west
    net.get_link_mut(link)?.add_shape_point(Pt2D::new(0.0, 100.0));
    assert_eq!(net.get_link(link)?.direction(&net), Direction::Westbound);
    assert_eq!(net.get_link(link)?.get_num_shape_points(), 2);
    Ok(())
}

#[test]
fn directions_follow_the_compass() -> Result<()> {
    let mut net = empty_network()?;
    let origin = add_node(&mut net, 0, 0.0, 0.0)?;
    // Stay clear of the bucket boundaries at 45, 135, 225, and 315 degrees
    for i in 0..36 {
        let degrees = (i * 10 + 3) as f64;
        let rads = degrees.to_radians();
        let to = add_node(&mut net, i + 1, 1000.0 * rads.sin(), 1000.0 * rads.cos())?;
        let link = add_link(&mut net, i, origin, to, RoadLinkAttributes::default())?;

        let road = net.get_link(link)?;
        assert!(road.orientation(&net).approx_eq(Angle::degrees(degrees), 0.001));
        let expected = if !(45.0..315.0).contains(&degrees) {
            Direction::Northbound
        } else if degrees < 135.0 {
            Direction::Eastbound
        } else if degrees < 225.0 {
            Direction::Southbound
        } else {
            Direction::Westbound
        };
        assert_eq!(road.direction(&net), expected, "at {} degrees", degrees);
    }
    Ok(())
}

#[test]
fn acute_angles() -> Result<()> {
    let mut net = empty_network()?;
    let a = add_node(&mut net, 1, 0.0, 0.0)?;
    let b = add_node(&mut net, 2, 1000.0, 0.0)?;
    let c = add_node(&mut net, 3, 1000.0, 1000.0)?;
    let ab = add_link(&mut net, 1, a, b, RoadLinkAttributes::default())?;
    let ba = add_link(&mut net, 2, b, a, RoadLinkAttributes::default())?;
    let bc = add_link(&mut net, 3, b, c, RoadLinkAttributes::default())?;
    let ac = add_link(&mut net, 4, a, c, RoadLinkAttributes::default())?;

    let link = |id: LinkID| net.get_link(id);
    assert_eq!(link(ab)?.acute_angle(link(ab)?, &net)?, Angle::ZERO);
    assert_eq!(link(ab)?.acute_angle(link(ba)?, &net)?, Angle::degrees(180.0));
    assert!(link(ab)?
        .acute_angle(link(bc)?, &net)?
        .approx_eq(Angle::degrees(90.0), 0.0001));
    assert!(link(ab)?
        .acute_angle(link(ac)?, &net)?
        .approx_eq(Angle::degrees(45.0), 0.0001));
    assert!(link(ab)?.is_overlapping(link(ab)?, &net)?);
    assert!(!link(ab)?.is_overlapping(link(ba)?, &net)?);
    Ok(())
}

#[test]
fn overlap_threshold() -> Result<()> {
    let mut net = empty_network()?;
    let a = add_node(&mut net, 1, 0.0, 0.0)?;
    let b = add_node(&mut net, 2, 1000.0, 0.0)?;
    let c = add_node(&mut net, 3, 0.0, 10.0)?;
    // About 0.97 degrees off
    let d = add_node(&mut net, 4, 1000.0, 27.0)?;
    // About 1.15 degrees off
    let e = add_node(&mut net, 5, 1000.0, 30.0)?;
    let ab = add_link(&mut net, 1, a, b, RoadLinkAttributes::default())?;
    let cd = add_link(&mut net, 2, c, d, RoadLinkAttributes::default())?;
    let ce = add_link(&mut net, 3, c, e, RoadLinkAttributes::default())?;

    let road = net.get_link(ab)?;
    assert!(road.is_overlapping(net.get_link(cd)?, &net)?);
    assert!(!road.is_overlapping(net.get_link(ce)?, &net)?);
    Ok(())
}

#[test]
fn rounding_past_antiparallel_clamps_to_zero() -> Result<()> {
    let mut net = empty_network()?;
    let a = add_node(&mut net, 1, 0.0, 0.0)?;
    let b = add_node(&mut net, 2, -943.305, 671.5302)?;
    let c = add_node(&mut net, 3, 0.0, 0.0)?;
    let d = add_node(&mut net, 4, 2094.1371, -1490.797)?;
    let ab = add_link(&mut net, 1, a, b, RoadLinkAttributes::default())?;
    let cd = add_link(&mut net, 2, c, d, RoadLinkAttributes::default())?;

    let l1 = net.get_link(ab)?;
    let l2 = net.get_link(cd)?;
    // The two point in opposite directions, but the cosine lands just below -1
    let cos = l1.node_to_node(&net).cos_between(&l2.node_to_node(&net));
    assert!(cos.map(|cos| cos < -1.0).unwrap_or(false), "{:?}", cos);

    assert_eq!(l1.acute_angle(l2, &net)?, Angle::ZERO);
    assert_eq!(l2.acute_angle(l1, &net)?, Angle::ZERO);
    assert!(l1.is_overlapping(l2, &net)?);
    Ok(())
}

#[test]
fn acute_angle_is_symmetric() -> Result<()> {
    let mut rng = XorShiftRng::seed_from_u64(42);
    let (net, links) = random_links(&mut rng, 30)?;
    for id1 in &links {
        for id2 in &links {
            let l1 = net.get_link(*id1)?;
            let l2 = net.get_link(*id2)?;
            let angle = l1.acute_angle(l2, &net)?;
            assert!(angle.approx_eq(l2.acute_angle(l1, &net)?, 0.0001));
            let degrees = angle.normalized_degrees();
            assert!((0.0..=180.0).contains(&degrees), "{} and {}: {}", id1, id2, degrees);
            assert_eq!(
                l1.is_overlapping(l2, &net)?,
                degrees <= dta_model::OVERLAP_THRESHOLD_DEGREES
            );
        }
    }
    Ok(())
}

#[test]
fn zero_length_links() -> Result<()> {
    let mut net = empty_network()?;
    let a = add_node(&mut net, 1, 5.0, 5.0)?;
    let b = add_node(&mut net, 2, 5.0, 5.0)?;
    let c = add_node(&mut net, 3, 50.0, 5.0)?;
    let ab = add_link(&mut net, 1, a, b, RoadLinkAttributes::default())?;
    let ac = add_link(&mut net, 2, a, c, RoadLinkAttributes::default())?;

    let stub = net.get_link(ab)?;
    assert_eq!(stub.length(&net), Distance::ZERO);
    assert!(matches!(
        stub.acute_angle(net.get_link(ac)?, &net),
        Err(DtaError::DegenerateGeometry(_))
    ));
    assert!(matches!(
        net.get_link(ac)?.acute_angle(stub, &net),
        Err(DtaError::DegenerateGeometry(_))
    ));
    // Even compared to itself
    assert!(matches!(
        stub.acute_angle(stub, &net),
        Err(DtaError::DegenerateGeometry(_))
    ));
    // There's no direction to shift in, so the center line stays on the nodes
    let center = stub.center_line(&net);
    assert!(pts_close(center.pt1(), (5.0, 5.0)));
    assert!(pts_close(center.pt2(), (5.0, 5.0)));
    Ok(())
}

#[test]
fn geometry_follows_moved_nodes() -> Result<()> {
    let (mut net, link) = single_link((0.0, 0.0), (0.0, 100.0), 1)?;
    assert_eq!(net.get_link(link)?.length(&net), Distance::feet(100.0));

    let end = net.get_link(link)?.end_node;
    net.move_node(end, Pt2D::new(-300.0, 0.0))?;
    let road = net.get_link(link)?;
    assert_eq!(road.length(&net), Distance::feet(300.0));
    assert_eq!(road.direction(&net), Direction::Westbound);
    assert!(pts_close(road.center_line(&net).pt2(), (-300.0, 6.0)));
    Ok(())
}

#[test]
fn lane_counts() -> Result<()> {
    assert!(matches!(
        single_link((0.0, 0.0), (10.0, 0.0), 0),
        Err(err) if matches!(err.downcast_ref::<DtaError>(), Some(DtaError::InvalidAttribute(_)))
    ));

    let (mut net, link) = single_link((0.0, 0.0), (10.0, 0.0), 3)?;
    assert!(matches!(
        net.get_link_mut(link)?.set_num_lanes(0),
        Err(DtaError::InvalidAttribute(_))
    ));
    assert_eq!(net.get_link(link)?.get_num_lanes(), 3);
    net.get_link_mut(link)?.set_num_lanes(1)?;
    assert_eq!(net.get_link(link)?.get_width(), Distance::feet(12.0));
    Ok(())
}
