//! Configuration for geometry resolution

use crate::model::Vec2;

use super::types::Rect;

/// The fixed container every root node is anchored against
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Canvas width in logical units
    pub width: f64,

    /// Canvas height in logical units
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl CanvasConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// The canvas as an absolute rectangle at the origin
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CanvasConfig::default();
        assert_eq!(config.width, 1920.0);
        assert_eq!(config.height, 1080.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = CanvasConfig::new().with_size(800.0, 600.0);
        assert_eq!(config.rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }
}
