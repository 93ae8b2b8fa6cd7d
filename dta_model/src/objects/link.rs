use std::fmt;

use serde::{Deserialize, Serialize};

use crate::NodeID;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkID(pub usize);

impl fmt::Display for LinkID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Link #{}", self.0)
    }
}

/// A directed edge between two nodes. Road links, centroid connectors, and virtual links are all
/// links; the predicates tell them apart.
pub trait Link {
    fn id(&self) -> LinkID;
    fn start_node(&self) -> NodeID;
    fn end_node(&self) -> NodeID;
    fn label(&self) -> &str;

    fn is_road_link(&self) -> bool {
        false
    }
    fn is_connector(&self) -> bool {
        false
    }
    fn is_virtual_link(&self) -> bool {
        false
    }
}
