//! Style constants for the round display
//!
//! The theme is an explicitly constructed handle passed into every draw
//! call; nothing here is process-global.

use std::time::Duration;

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_7X13, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Screen geometry
pub const SCREEN_WIDTH: u32 = 240;
pub const SCREEN_HEIGHT: u32 = 240;
pub const SCREEN_CENTER: Point = Point::new(120, 120);

/// Cover image diameters
pub const COVER_SIZE_LARGE: u32 = 120;
pub const COVER_SIZE_MEDIUM: u32 = 100;

/// Screen-transition slide duration
pub const ANIM_DURATION_NORMAL: Duration = Duration::from_millis(150);

/// Page-indicator dots are capped regardless of list length
pub const MAX_INDICATOR_DOTS: usize = 7;

/// Convert a 24-bit RGB value to RGB565
fn rgb(hex: u32) -> Rgb565 {
    Rgb565::new(
        ((hex >> 16 & 0xff) >> 3) as u8,
        ((hex >> 8 & 0xff) >> 2) as u8,
        ((hex & 0xff) >> 3) as u8,
    )
}

/// Color and font set shared by all screens
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_primary: Rgb565,
    pub bg_secondary: Rgb565,
    pub accent: Rgb565,
    pub text_primary: Rgb565,
    pub text_secondary: Rgb565,

    pub font_small: &'static MonoFont<'static>,
    pub font_medium: &'static MonoFont<'static>,
    pub font_large: &'static MonoFont<'static>,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            bg_primary: rgb(0x1a1a2e),
            bg_secondary: rgb(0x16213e),
            accent: rgb(0x1DB954),
            text_primary: rgb(0xFFFFFF),
            text_secondary: rgb(0xB3B3B3),

            font_small: &FONT_6X10,
            font_medium: &FONT_7X13,
            font_large: &FONT_9X15_BOLD,
        }
    }

    pub fn title_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.font_large, self.text_primary)
    }

    pub fn subtitle_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.font_medium, self.text_secondary)
    }

    pub fn accent_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.font_medium, self.accent)
    }

    pub fn small_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.font_small, self.text_secondary)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
