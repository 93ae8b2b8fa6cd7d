use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D};

/// A line segment. Unlike most geometry, the two endpoints may coincide; callers that need a
/// direction have to check `is_degenerate` first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line(pt1, pt2)
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn dx(&self) -> f64 {
        self.1.x() - self.0.x()
    }

    pub fn dy(&self) -> f64 {
        self.1.y() - self.0.y()
    }

    pub fn length(&self) -> Distance {
        self.0.dist_to(self.1)
    }

    pub fn is_degenerate(&self) -> bool {
        self.dx() == 0.0 && self.dy() == 0.0
    }

    pub fn reversed(&self) -> Line {
        Line(self.1, self.0)
    }

    pub fn middle(&self) -> Pt2D {
        Pt2D::center(&[self.0, self.1])
    }

    /// Shifts the line perpendicular to its direction, towards the right side of travel. A
    /// degenerate line is treated as having length 1, so it stays put.
    pub fn shift_right(&self, width: Distance) -> Line {
        let (dx, dy) = (self.dx(), self.dy());
        let mut len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            len = 1.0;
        }
        let scale = width.inner_feet() / len;
        let (x_offset, y_offset) = (dy * scale, -dx * scale);
        Line(
            self.0.offset(x_offset, y_offset),
            self.1.offset(x_offset, y_offset),
        )
    }

    /// The cosine of the angle between the two directions, or None if either line is degenerate.
    /// Floating point error can push the result slightly outside [-1, 1].
    pub fn cos_between(&self, other: &Line) -> Option<f64> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }
        let dot = self.dx() * other.dx() + self.dy() * other.dy();
        let len1 = (self.dx().powi(2) + self.dy().powi(2)).sqrt();
        let len2 = (other.dx().powi(2) + other.dy().powi(2)).sqrt();
        Some(dot / (len1 * len2))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Line::new(")?;
        writeln!(f, "  {},", self.0)?;
        writeln!(f, "  {},", self.1)?;
        write!(f, ")")
    }
}
