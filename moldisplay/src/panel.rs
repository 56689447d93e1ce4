//! Geometry of the round GC9A01-class panel
//!
//! The SPI init sequence and transaction handling live in the vendor driver;
//! this module only carries the numbers the rendering side needs to agree on
//! with it.

use embedded_graphics::prelude::*;

/// Panel width in pixels
pub const SCREEN_WIDTH: u32 = 240;
/// Panel height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Static description of a display panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    pub width: u32,
    pub height: u32,
    /// Offset of the visible area inside panel memory
    pub offset_x: i32,
    pub offset_y: i32,
    /// Rotation in quarter turns (0..=3)
    pub rotation: u8,
    /// Panel expects inverted colors
    pub invert_colors: bool,
}

impl PanelGeometry {
    /// The 240x240 round panel of the remote
    pub const fn round_240() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            offset_x: 0,
            offset_y: 0,
            rotation: 0,
            invert_colors: true,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as i32 / 2, self.height as i32 / 2)
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::round_240()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_panel_geometry() {
        let panel = PanelGeometry::round_240();
        assert_eq!(panel.size(), Size::new(240, 240));
        assert_eq!(panel.center(), Point::new(120, 120));
        assert!(panel.invert_colors);
    }
}
