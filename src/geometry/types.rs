//! Core types for absolute geometry

use serde::Serialize;

use crate::model::NodeId;

/// A 2D point in absolute logical units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// An axis-aligned box in absolute logical units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge x-coordinate
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Top edge y-coordinate
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Center point of the box
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Absolute rectangle of one node, tagged with its parent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeBounds {
    pub id: NodeId,
    /// `None` for roots, whose container is the canvas
    pub parent: Option<NodeId>,
    pub rect: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_zero_size_center() {
        let rect = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert_eq!(rect.center(), Point::new(5.0, 5.0));
    }
}
