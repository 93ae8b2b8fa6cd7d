use std::fmt;

use serde::{Deserialize, Serialize};

use geom::Pt2D;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeID(pub usize);

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node #{}", self.0)
    }
}

/// An intersection (or any other point where links meet).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeID,
    pub(crate) pt: Pt2D,
    pub label: String,
}

impl Node {
    pub fn new(id: NodeID, pt: Pt2D) -> Node {
        Node {
            id,
            pt,
            label: String::new(),
        }
    }

    pub fn id(&self) -> NodeID {
        self.id
    }

    pub fn pt(&self) -> Pt2D {
        self.pt
    }

    pub fn x(&self) -> f64 {
        self.pt.x()
    }

    pub fn y(&self) -> f64 {
        self.pt.y()
    }
}
