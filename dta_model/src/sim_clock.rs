use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DtaError, Result};

/// A half-open `[start_min, end_min)` interval of simulated minutes. Used as the key of every
/// simulated series.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_min: usize,
    pub end_min: usize,
}

impl TimeWindow {
    pub fn new(start_min: usize, end_min: usize) -> TimeWindow {
        TimeWindow { start_min, end_min }
    }

    /// Zero for empty or inverted windows.
    pub fn len_min(self) -> usize {
        self.end_min.saturating_sub(self.start_min)
    }

    /// Scales a volume observed over this window to an hourly rate, truncating.
    pub fn hourly_flow(self, volume: usize) -> usize {
        (volume as f64 / self.len_min() as f64 * 60.0) as usize
    }

    /// Does this window lie entirely inside `outer`?
    pub fn within(self, outer: TimeWindow) -> bool {
        self.start_min >= outer.start_min && self.end_min <= outer.end_min
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}) min", self.start_min, self.end_min)
    }
}

/// The simulation horizon and its native bin width. Set once when the network is created and
/// shared read-only by every link and movement. Only valid clocks can be built or deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SimClockConfig")]
pub struct SimClock {
    start_min: usize,
    end_min: usize,
    step_min: usize,
}

/// The unchecked form of a `SimClock` in config files.
#[derive(Deserialize)]
struct SimClockConfig {
    start_min: usize,
    end_min: usize,
    step_min: usize,
}

impl TryFrom<SimClockConfig> for SimClock {
    type Error = DtaError;

    fn try_from(config: SimClockConfig) -> Result<SimClock> {
        SimClock::new(config.start_min, config.end_min, config.step_min)
    }
}

impl SimClock {
    pub fn new(start_min: usize, end_min: usize, step_min: usize) -> Result<SimClock> {
        let clock = SimClock {
            start_min,
            end_min,
            step_min,
        };
        clock.validate()?;
        Ok(clock)
    }

    pub fn step_min(&self) -> usize {
        self.step_min
    }

    fn validate(&self) -> Result<()> {
        if self.step_min == 0 {
            return Err(DtaError::InvalidAttribute(
                "the simulation time step must be positive".to_string(),
            ));
        }
        if self.start_min >= self.end_min {
            return Err(DtaError::InvalidAttribute(format!(
                "the simulation horizon {} is empty",
                self.horizon()
            )));
        }
        if self.horizon().len_min() % self.step_min != 0 {
            return Err(DtaError::InvalidAttribute(format!(
                "the simulation horizon {} isn't a multiple of the {} min time step",
                self.horizon(),
                self.step_min
            )));
        }
        Ok(())
    }

    pub fn horizon(&self) -> TimeWindow {
        TimeWindow::new(self.start_min, self.end_min)
    }

    /// The window must be non-empty and inside the horizon.
    pub fn validate_window(&self, window: TimeWindow) -> Result<()> {
        if window.start_min >= window.end_min {
            return Err(DtaError::InvalidTimeWindow(format!(
                "{}: the end time must be after the start time",
                window
            )));
        }
        if !window.within(self.horizon()) {
            return Err(DtaError::InvalidTimeWindow(format!(
                "{} is outside the simulation horizon {}",
                window,
                self.horizon()
            )));
        }
        Ok(())
    }

    /// Writes address exactly one native bin.
    pub fn check_input_step(&self, window: TimeWindow) -> Result<()> {
        self.check_bin_boundary(window)?;
        if window.len_min() != self.step_min {
            return Err(DtaError::MisalignedTimeWindow(format!(
                "{} isn't a single simulation time step of {} min",
                window, self.step_min
            )));
        }
        Ok(())
    }

    /// Reads may span any whole number of native bins.
    pub fn check_output_step(&self, window: TimeWindow) -> Result<()> {
        self.check_bin_boundary(window)?;
        if window.len_min() % self.step_min != 0 {
            return Err(DtaError::MisalignedTimeWindow(format!(
                "{} isn't a multiple of the simulation time step of {} min",
                window, self.step_min
            )));
        }
        Ok(())
    }

    fn check_bin_boundary(&self, window: TimeWindow) -> Result<()> {
        if window.start_min.saturating_sub(self.start_min) % self.step_min != 0 {
            return Err(DtaError::MisalignedTimeWindow(format!(
                "{} doesn't start on a {} min boundary of the horizon {}",
                window,
                self.step_min,
                self.horizon()
            )));
        }
        Ok(())
    }

    /// Splits an aligned window into its native bins.
    pub fn bins(&self, window: TimeWindow) -> impl Iterator<Item = TimeWindow> {
        let step = self.step_min;
        (window.start_min..window.end_min)
            .step_by(step)
            .map(move |start| TimeWindow::new(start, start + step))
    }
}
