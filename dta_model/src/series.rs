use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use dta_util::{deserialize_btreemap, serialize_btreemap};
use geom::Duration;

use crate::{DtaError, MovementID, Result, SimClock, TimeWindow};

/// Simulated volume and mean travel time per native time bin. Missing bins read as zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BinnedSeries {
    #[serde(
        serialize_with = "serialize_btreemap",
        deserialize_with = "deserialize_btreemap"
    )]
    volume: BTreeMap<TimeWindow, usize>,
    #[serde(
        serialize_with = "serialize_btreemap",
        deserialize_with = "deserialize_btreemap"
    )]
    mean_tt: BTreeMap<TimeWindow, Duration>,
}

impl BinnedSeries {
    pub fn is_empty(&self) -> bool {
        self.volume.is_empty() && self.mean_tt.is_empty()
    }

    pub fn has_volumes(&self) -> bool {
        !self.volume.is_empty()
    }

    pub fn has_travel_times(&self) -> bool {
        !self.mean_tt.is_empty()
    }

    /// Sums the native bins covering an aligned window.
    pub fn volume(&self, clock: &SimClock, window: TimeWindow) -> usize {
        clock
            .bins(window)
            .map(|bin| self.volume.get(&bin).cloned().unwrap_or(0))
            .sum()
    }

    pub(crate) fn set_volume(&mut self, bin: TimeWindow, volume: usize) {
        self.volume.insert(bin, volume);
    }

    pub(crate) fn set_mean_tt(&mut self, bin: TimeWindow, tt: Duration) {
        self.mean_tt.insert(bin, tt);
    }

    /// The volume-weighted mean travel time over every recorded bin inside the window. Bins
    /// without volume or travel time are skipped; a bin with only one of the two is an error
    /// naming `owner`. Returns None when no bin carries volume.
    pub fn weighted_mean_tt(
        &self,
        window: TimeWindow,
        owner: impl fmt::Display,
    ) -> Result<Option<Duration>> {
        let mut total_flow = 0;
        let mut total_time = Duration::ZERO;
        for (bin, flow) in &self.volume {
            if !bin.within(window) {
                continue;
            }
            let tt = self.mean_tt.get(bin).cloned().unwrap_or(Duration::ZERO);
            match (*flow > 0, tt > Duration::ZERO) {
                (false, false) => {}
                (true, true) => {
                    total_flow += flow;
                    total_time += tt * (*flow as f64);
                }
                _ => {
                    return Err(DtaError::InconsistentState(format!(
                        "{} has volume {} and travel time {} for {} (queried {})",
                        owner, flow, tt, bin, window
                    )));
                }
            }
        }

        if total_flow == 0 {
            return Ok(None);
        }
        Ok(Some(total_time / (total_flow as f64)))
    }
}

/// Where a link's simulated series live. A link without outgoing movements keeps its own bins;
/// once it has movements, flow is split by turn and the movements own the series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimSeries {
    Aggregated(BinnedSeries),
    /// The outgoing movements, in registration order. Never empty.
    Disaggregated(Vec<MovementID>),
}

impl Default for SimSeries {
    fn default() -> SimSeries {
        SimSeries::Aggregated(BinnedSeries::default())
    }
}

impl SimSeries {
    pub fn outgoing_movements(&self) -> &[MovementID] {
        match self {
            SimSeries::Aggregated(_) => &[],
            SimSeries::Disaggregated(movements) => movements,
        }
    }

    pub fn is_disaggregated(&self) -> bool {
        matches!(self, SimSeries::Disaggregated(_))
    }
}
