use std::fmt;

use serde::{Deserialize, Serialize};

use geom::Duration;

use crate::{
    BinnedSeries, DtaError, LinkID, Network, NodeID, Result, SimClock, TimeWindow,
    VehicleClassGroup,
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovementID(pub usize);

impl fmt::Display for MovementID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Movement #{}", self.0)
    }
}

/// A permitted turn from the end of one link onto the start of another, through their shared
/// node. Movements only exist inside a `Network`, which keeps both links' movement lists in sync.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementID,
    /// Where the turn happens: the end of the incoming link and the start of the outgoing one
    pub at_node: NodeID,
    pub incoming_link: LinkID,
    pub outgoing_link: LinkID,
    /// The far end of the outgoing link
    pub destination_node: NodeID,
    pub permission: VehicleClassGroup,
    series: BinnedSeries,
}

impl Movement {
    pub(crate) fn new(
        id: MovementID,
        at_node: NodeID,
        incoming_link: LinkID,
        outgoing_link: LinkID,
        destination_node: NodeID,
        permission: VehicleClassGroup,
    ) -> Movement {
        Movement {
            id,
            at_node,
            incoming_link,
            outgoing_link,
            destination_node,
            permission,
            series: BinnedSeries::default(),
        }
    }

    pub fn get_incoming_link(&self) -> LinkID {
        self.incoming_link
    }

    pub fn get_outgoing_link(&self) -> LinkID {
        self.outgoing_link
    }

    pub fn get_destination_node(&self) -> NodeID {
        self.destination_node
    }

    pub fn get_sim_volume(&self, window: TimeWindow, net: &Network) -> Result<usize> {
        self.sim_volume(window, net.get_clock())
    }

    /// In vehicles per hour
    pub fn get_sim_flow(&self, window: TimeWindow, net: &Network) -> Result<usize> {
        Ok(window.hourly_flow(self.get_sim_volume(window, net)?))
    }

    /// The volume-weighted mean travel time over the window. Zero if nothing used the movement,
    /// so it drops out of any volume-weighted average taken over several movements.
    pub fn get_sim_tt(&self, window: TimeWindow, net: &Network) -> Result<Duration> {
        self.sim_tt(window, net.get_clock())
    }

    /// Like `get_sim_volume`, for callers already holding part of the network mutably.
    pub(crate) fn sim_volume(&self, window: TimeWindow, clock: &SimClock) -> Result<usize> {
        clock.validate_window(window)?;
        clock.check_output_step(window)?;
        Ok(self.series.volume(clock, window))
    }

    pub(crate) fn sim_tt(&self, window: TimeWindow, clock: &SimClock) -> Result<Duration> {
        clock.validate_window(window)?;
        clock.check_output_step(window)?;
        Ok(self
            .series
            .weighted_mean_tt(window, self.id)?
            .unwrap_or(Duration::ZERO))
    }

    pub(crate) fn set_sim_volume(
        &mut self,
        window: TimeWindow,
        volume: usize,
        clock: &SimClock,
    ) -> Result<()> {
        clock.validate_window(window)?;
        clock.check_input_step(window)?;
        self.series.set_volume(window, volume);
        Ok(())
    }

    /// A zero travel time is ignored. Otherwise the bin must already have volume.
    pub(crate) fn set_sim_tt(
        &mut self,
        window: TimeWindow,
        tt: Duration,
        clock: &SimClock,
    ) -> Result<()> {
        clock.validate_window(window)?;
        clock.check_input_step(window)?;
        if tt == Duration::ZERO {
            return Ok(());
        }
        if self.series.volume(clock, window) == 0 {
            return Err(DtaError::InconsistentState(format!(
                "can't set the travel time of {} for {}, because it has no volume then",
                self.id, window
            )));
        }
        self.series.set_mean_tt(window, tt);
        Ok(())
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {} via {})",
            self.id, self.incoming_link, self.outgoing_link, self.at_node
        )
    }
}
