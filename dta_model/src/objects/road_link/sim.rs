use std::collections::BTreeMap;

use geom::{Duration, Speed};

use crate::{
    DtaError, LinkID, Movement, MovementID, Network, Result, RoadLink, SimClock, SimSeries,
    TimeWindow,
};

impl RoadLink {
    /// The number of vehicles leaving the link during the window. If the link has movements,
    /// this is the sum over them.
    pub fn get_sim_volume(&self, window: TimeWindow, net: &Network) -> Result<usize> {
        let clock = net.get_clock();
        clock.validate_window(window)?;
        clock.check_output_step(window)?;

        match self.sim {
            SimSeries::Aggregated(ref series) => Ok(series.volume(clock, window)),
            SimSeries::Disaggregated(ref movements) => {
                let mut total = 0;
                for id in movements {
                    total += net.get_movement(*id)?.sim_volume(window, clock)?;
                }
                Ok(total)
            }
        }
    }

    /// In vehicles per hour
    pub fn get_sim_flow(&self, window: TimeWindow, net: &Network) -> Result<usize> {
        Ok(window.hourly_flow(self.get_sim_volume(window, net)?))
    }

    /// The mean travel time of vehicles traversing the link during the window. Falls back to the
    /// free-flow travel time when nothing used the link, or when the link's own series has
    /// volumes but no travel times at all.
    pub fn get_sim_tt(&self, window: TimeWindow, net: &Network) -> Result<Duration> {
        let clock = net.get_clock();
        clock.validate_window(window)?;
        clock.check_output_step(window)?;

        if self.get_sim_volume(window, net)? == 0 {
            return Ok(self.get_free_flow_tt(net));
        }

        match self.sim {
            SimSeries::Disaggregated(ref movements) => {
                let mut total_flow = 0;
                let mut total_time = Duration::ZERO;
                for id in movements {
                    let movement = net.get_movement(*id)?;
                    let volume = movement.sim_volume(window, clock)?;
                    total_flow += volume;
                    total_time += movement.sim_tt(window, clock)? * (volume as f64);
                }
                // The volume check above guarantees total_flow > 0
                Ok(total_time / (total_flow as f64))
            }
            SimSeries::Aggregated(ref series) => {
                if !(series.has_volumes() && series.has_travel_times()) {
                    return Ok(self.get_free_flow_tt(net));
                }
                Ok(series
                    .weighted_mean_tt(window, self.id)?
                    .unwrap_or_else(|| self.get_free_flow_tt(net)))
            }
        }
    }

    pub fn get_sim_speed(&self, window: TimeWindow, net: &Network) -> Result<Speed> {
        let clock = net.get_clock();
        clock.validate_window(window)?;
        clock.check_output_step(window)?;

        let tt = self.get_sim_tt(window, net)?;
        if tt <= Duration::ZERO {
            return Err(DtaError::InconsistentState(format!(
                "{} has a travel time of {} for {}, so there's no speed",
                self.id, tt, window
            )));
        }
        Ok(Speed::from_dist_time(self.length(net), tt))
    }

    /// Observed data isn't supported yet.
    pub fn get_obs_mean_tt(&self, window: TimeWindow) -> Result<Duration> {
        Err(DtaError::NotImplemented(format!(
            "observed travel time of {} for {}",
            self.id, window
        )))
    }

    /// Observed data isn't supported yet.
    pub fn get_obs_speed(&self, window: TimeWindow) -> Result<Speed> {
        Err(DtaError::NotImplemented(format!(
            "observed speed of {} for {}",
            self.id, window
        )))
    }

    pub fn get_free_flow_tt(&self, net: &Network) -> Duration {
        self.length(net) / self.freeflow_speed
    }

    fn has_movement_volumes(
        &self,
        window: TimeWindow,
        clock: &SimClock,
        movements: &BTreeMap<MovementID, Movement>,
    ) -> Result<bool> {
        for id in self.outgoing_movements() {
            if lookup(movements, *id)?.sim_volume(window, clock)? > 0 {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Records the volume for one native bin. With exactly one outgoing movement, the volume is
    /// stored there instead; with more, the caller has to address each movement.
    pub(crate) fn set_sim_volume(
        &mut self,
        window: TimeWindow,
        volume: usize,
        clock: &SimClock,
        movements: &mut BTreeMap<MovementID, Movement>,
    ) -> Result<()> {
        clock.validate_window(window)?;
        clock.check_input_step(window)?;

        if self.has_movement_volumes(window, clock, movements)? {
            return Err(DtaError::StructuralConflict(format!(
                "can't set the volume of {} for {}, because a movement leaving it already has \
                 volume",
                self.id, window
            )));
        }

        match self.sim {
            SimSeries::Aggregated(ref mut series) => {
                series.set_volume(window, volume);
                Ok(())
            }
            SimSeries::Disaggregated(ref ids) => {
                let only = single_movement(self.id, ids, "volume")?;
                debug!("Setting volume of {} on its only movement {}", self.id, only);
                lookup_mut(movements, only)?.set_sim_volume(window, volume, clock)
            }
        }
    }

    /// Records the mean travel time for one native bin. A zero travel time isn't meaningful and
    /// is ignored.
    pub(crate) fn set_sim_tt(
        &mut self,
        window: TimeWindow,
        tt: Duration,
        clock: &SimClock,
        movements: &mut BTreeMap<MovementID, Movement>,
    ) -> Result<()> {
        clock.validate_window(window)?;
        clock.check_input_step(window)?;

        let only = match self.sim {
            SimSeries::Disaggregated(ref ids) => {
                Some(single_movement(self.id, ids, "travel time")?)
            }
            SimSeries::Aggregated(_) => None,
        };
        if tt == Duration::ZERO {
            debug!("Ignoring a zero travel time for {} during {}", self.id, window);
            return Ok(());
        }
        if let Some(id) = only {
            return lookup_mut(movements, id)?.set_sim_tt(window, tt, clock);
        }

        if let SimSeries::Aggregated(ref mut series) = self.sim {
            if series.volume(clock, window) == 0 {
                return Err(DtaError::InconsistentState(format!(
                    "can't set the travel time of {} for {}, because it has no volume then",
                    self.id, window
                )));
            }
            series.set_mean_tt(window, tt);
        }
        Ok(())
    }
}

/// The movement that link-level writes go to. Links with several movements can't take them.
fn single_movement(link: LinkID, ids: &[MovementID], what: &str) -> Result<MovementID> {
    match ids {
        [only] => Ok(*only),
        [] => Err(DtaError::InconsistentState(format!(
            "{} is split by movement, but has none",
            link
        ))),
        _ => Err(DtaError::StructuralConflict(format!(
            "can't set the {} of {}, because it has {} outgoing movements. Set the {} of each \
             movement instead.",
            what,
            link,
            ids.len(),
            what
        ))),
    }
}

fn lookup(movements: &BTreeMap<MovementID, Movement>, id: MovementID) -> Result<&Movement> {
    movements
        .get(&id)
        .ok_or_else(|| DtaError::UnknownObject(id.to_string()))
}

fn lookup_mut(
    movements: &mut BTreeMap<MovementID, Movement>,
    id: MovementID,
) -> Result<&mut Movement> {
    movements
        .get_mut(&id)
        .ok_or_else(|| DtaError::UnknownObject(id.to_string()))
}
