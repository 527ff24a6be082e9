//! Geometry resolver for computing absolute element bounds
//!
//! Positions are stored relative to an anchor point in the parent (or the
//! canvas for roots). This module turns them into absolute rectangles and
//! converts absolute edits back into anchor-relative offsets.

pub mod anchor;
pub mod config;
pub mod resolver;
pub mod types;

pub use anchor::{anchor_offset, anchor_start, AxisAlign};
pub use config::CanvasConfig;
pub use resolver::{
    absolute_position, absolute_rect, bounds_of, compute_all_bounds, local_from_absolute,
};
pub use types::{NodeBounds, Point, Rect};
