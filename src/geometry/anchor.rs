//! Anchor math: where an anchor sits in its container and how the element's
//! own box is shifted so the matching edge or center lands on it

use crate::model::{Anchor, Vec2};

use super::types::Point;

/// Alignment of an anchor along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisAlign {
    /// Left or top
    Start,
    Center,
    /// Right or bottom
    End,
}

impl AxisAlign {
    /// Fraction of the container extent where the anchor sits
    pub fn factor(self) -> f64 {
        match self {
            AxisAlign::Start => 0.0,
            AxisAlign::Center => 0.5,
            AxisAlign::End => 1.0,
        }
    }

    /// Correction applied to an extent of `size` along this axis
    pub fn offset(self, size: f64) -> f64 {
        match self {
            AxisAlign::Start => 0.0,
            AxisAlign::Center => -size / 2.0,
            AxisAlign::End => -size,
        }
    }
}

impl Anchor {
    /// Horizontal component of the anchor
    pub fn horizontal(self) -> AxisAlign {
        match self {
            Anchor::TopLeft | Anchor::MiddleLeft | Anchor::BottomLeft => AxisAlign::Start,
            Anchor::TopCenter | Anchor::MiddleCenter | Anchor::BottomCenter => AxisAlign::Center,
            Anchor::TopRight | Anchor::MiddleRight | Anchor::BottomRight => AxisAlign::End,
        }
    }

    /// Vertical component of the anchor
    pub fn vertical(self) -> AxisAlign {
        match self {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => AxisAlign::Start,
            Anchor::MiddleLeft | Anchor::MiddleCenter | Anchor::MiddleRight => AxisAlign::Center,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => AxisAlign::End,
        }
    }
}

/// Reference point of `anchor` inside a container of the given size
pub fn anchor_start(anchor: Anchor, container_width: f64, container_height: f64) -> Point {
    Point::new(
        container_width * anchor.horizontal().factor(),
        container_height * anchor.vertical().factor(),
    )
}

/// Per-axis shift that aligns a box of `size` to the anchor point
pub fn anchor_offset(anchor: Anchor, size: Vec2) -> Point {
    Point::new(
        anchor.horizontal().offset(size.x),
        anchor.vertical().offset(size.y),
    )
}
