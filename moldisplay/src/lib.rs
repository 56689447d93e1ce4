//! Display adapter for the Molette round panel
//!
//! This crate provides:
//! - [`FrameBuffer`]: an RGB565 `embedded-graphics` draw target with
//!   dirty-rectangle tracking
//! - [`FlushSink`]: the rectangular-blit contract the panel driver consumes
//! - [`PanelGeometry`]: the numbers shared with the vendor SPI driver

pub mod framebuffer;
pub mod panel;

pub use framebuffer::{FlushSink, FrameBuffer};
pub use panel::{PanelGeometry, SCREEN_HEIGHT, SCREEN_WIDTH};
