use thiserror::Error;

/// Everything that can go wrong while building a network or reading and writing its simulated
/// series. Nothing is recovered internally; the caller decides whether to abort a batch or skip
/// the offending object.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DtaError {
    /// The window is empty, inverted, or outside the simulation horizon.
    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),
    /// The window doesn't line up with the simulation time step.
    #[error("Misaligned time window: {0}")]
    MisalignedTimeWindow(String),
    /// A write was addressed to the wrong owner, like a link whose flow lives on its movements.
    #[error("Structural conflict: {0}")]
    StructuralConflict(String),
    /// Volume was recorded without a travel time, or vice versa.
    #[error("Inconsistent simulation state: {0}")]
    InconsistentState(String),
    #[error("Invalid lane: {0}")]
    InvalidLane(String),
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("Not implemented: {0}")]
    NotImplemented(String),
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),
    #[error("Unknown {0}")]
    UnknownObject(String),
}

pub type Result<T> = std::result::Result<T, DtaError>;
