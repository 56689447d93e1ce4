//! Player screen: now playing, volume ring, progress
//!
//! Rotation adjusts a local volume value; click toggles a local playing
//! flag. Neither touches the network here: the orchestrator turns both
//! into commands. Each server poll overwrites the local state wholesale
//! (last write wins).

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Arc, Circle, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
};
use embedded_graphics::text::{Alignment, Text};

use molapi::{DEFAULT_VOLUME, PlayerState};

use crate::model::RotateDirection;
use crate::theme::{COVER_SIZE_MEDIUM, SCREEN_CENTER, SCREEN_HEIGHT, SCREEN_WIDTH, Theme};

/// Volume change per knob detent
pub const VOLUME_STEP: i32 = 5;

/// The volume ring spans 270 degrees starting at the lower left
const ARC_DIAMETER: u32 = 230;
const ARC_START_DEG: f32 = 135.0;
const ARC_SWEEP_DEG: f32 = 270.0;

pub struct PlayerScreen {
    volume: u8,
    is_playing: bool,
    track_title: String,
    position_ms: u64,
    duration_ms: u64,
}

impl PlayerScreen {
    pub fn new() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            is_playing: false,
            track_title: String::new(),
            position_ms: 0,
            duration_ms: 0,
        }
    }

    /// Adjust the volume by ±5 per detent, clamped to [0, 100].
    ///
    /// Returns true when the value changed.
    pub fn handle_rotate(&mut self, direction: RotateDirection) -> bool {
        let next = (self.volume as i32 + direction.delta() * VOLUME_STEP).clamp(0, 100) as u8;
        if next == self.volume {
            return false;
        }
        self.volume = next;
        true
    }

    /// Toggle the local playing flag; returns the new value
    pub fn toggle_play_pause(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }

    /// Overwrite the local state from a server snapshot
    pub fn update_state(&mut self, state: &PlayerState) {
        self.volume = state.volume.min(100);
        self.is_playing = state.is_playing;
        self.track_title = state.current_track.name.clone();
        self.position_ms = state.position_ms;
        self.duration_ms = state.duration_ms;
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Progress in percent, 0 while the duration is unknown
    fn progress_percent(&self) -> u32 {
        if self.duration_ms == 0 {
            return 0;
        }
        ((self.position_ms * 100 / self.duration_ms) as u32).min(100)
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        target: &mut D,
        theme: &Theme,
    ) -> Result<(), D::Error> {
        Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(theme.bg_primary))
            .draw(target)?;

        // Volume ring: full track plus the filled part up to the volume.
        Arc::with_center(
            SCREEN_CENTER,
            ARC_DIAMETER,
            Angle::from_degrees(ARC_START_DEG),
            Angle::from_degrees(ARC_SWEEP_DEG),
        )
        .into_styled(PrimitiveStyle::with_stroke(theme.bg_secondary, 8))
        .draw(target)?;

        let sweep = ARC_SWEEP_DEG * self.volume as f32 / 100.0;
        if self.volume > 0 {
            Arc::with_center(
                SCREEN_CENTER,
                ARC_DIAMETER,
                Angle::from_degrees(ARC_START_DEG),
                Angle::from_degrees(sweep),
            )
            .into_styled(PrimitiveStyle::with_stroke(theme.accent, 8))
            .draw(target)?;
        }

        // Cover with play/pause glyph.
        let cover_center = Point::new(120, 95);
        Circle::with_center(cover_center, COVER_SIZE_MEDIUM)
            .into_styled(PrimitiveStyle::with_fill(theme.bg_secondary))
            .draw(target)?;
        self.draw_play_glyph(target, theme, cover_center)?;

        let title = if self.track_title.is_empty() {
            "No track"
        } else {
            &self.track_title
        };
        Text::with_alignment(
            title,
            Point::new(120, 172),
            embedded_graphics::mono_font::MonoTextStyle::new(theme.font_medium, theme.text_primary),
            Alignment::Center,
        )
        .draw(target)?;

        // Progress bar.
        let bar_origin = Point::new(40, 192);
        RoundedRectangle::with_equal_corners(
            Rectangle::new(bar_origin, Size::new(160, 6)),
            Size::new(3, 3),
        )
        .into_styled(PrimitiveStyle::with_fill(theme.bg_secondary))
        .draw(target)?;

        let filled = 160 * self.progress_percent() / 100;
        if filled > 0 {
            RoundedRectangle::with_equal_corners(
                Rectangle::new(bar_origin, Size::new(filled, 6)),
                Size::new(3, 3),
            )
            .into_styled(PrimitiveStyle::with_fill(theme.accent))
            .draw(target)?;
        }

        Text::with_alignment(
            &format_elapsed(self.position_ms),
            Point::new(120, 214),
            theme.small_style(),
            Alignment::Center,
        )
        .draw(target)?;

        Ok(())
    }

    fn draw_play_glyph<D: DrawTarget<Color = Rgb565>>(
        &self,
        target: &mut D,
        theme: &Theme,
        center: Point,
    ) -> Result<(), D::Error> {
        if self.is_playing {
            // Pause: two bars.
            for dx in [-9, 3] {
                Rectangle::new(center + Point::new(dx, -12), Size::new(6, 24))
                    .into_styled(PrimitiveStyle::with_fill(theme.text_primary))
                    .draw(target)?;
            }
        } else {
            // Play: triangle pointing right.
            Triangle::new(
                center + Point::new(-8, -12),
                center + Point::new(-8, 12),
                center + Point::new(12, 0),
            )
            .into_styled(PrimitiveStyle::with_fill(theme.text_primary))
            .draw(target)?;
        }
        Ok(())
    }
}

impl Default for PlayerScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a position as MM:SS (minutes do not roll into hours)
fn format_elapsed(position_ms: u64) -> String {
    let total_secs = position_ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
