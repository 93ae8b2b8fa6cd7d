//! Plumbing shared by the DTA crates that doesn't belong to the network model itself.

pub mod logger;
mod serde_helpers;

pub use crate::serde_helpers::{deserialize_btreemap, serialize_btreemap};
