//! Series screen: track list of the selected playlist
//!
//! A windowed list of track names; the cursor moves with clamping (no
//! wraparound) so the ends of the list feel like end stops on the knob.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Line, PrimitiveStyle, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::{Alignment, Text};

use molapi::Track;

use crate::model::RotateDirection;
use crate::theme::{SCREEN_HEIGHT, SCREEN_WIDTH, Theme};

/// Rows visible at once
const VISIBLE_ROWS: usize = 4;
const ROW_HEIGHT: i32 = 26;
const LIST_TOP: i32 = 72;

pub struct SeriesScreen {
    tracks: Vec<Track>,
    cursor: usize,
    title: String,
}

impl SeriesScreen {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            cursor: 0,
            title: "Episodes".to_string(),
        }
    }

    /// Move the cursor with clamping: past either end is a no-op.
    ///
    /// Returns true when the cursor moved.
    pub fn handle_rotate(&mut self, direction: RotateDirection) -> bool {
        if self.tracks.is_empty() {
            return false;
        }

        let next = self.cursor as i32 + direction.delta();
        if next < 0 || next >= self.tracks.len() as i32 {
            return false;
        }
        self.cursor = next as usize;
        true
    }

    /// Selection intent: the cursor index, or `None` while empty
    pub fn handle_click(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// Replace the list wholesale and reset the cursor
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.cursor = 0;
    }

    /// Header text, usually the selected playlist's name
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Track> {
        self.tracks.get(self.cursor)
    }

    /// First visible row, keeping the cursor roughly centered
    fn window_start(&self) -> usize {
        let len = self.tracks.len();
        if len <= VISIBLE_ROWS {
            0
        } else {
            self.cursor
                .saturating_sub(VISIBLE_ROWS / 2)
                .min(len - VISIBLE_ROWS)
        }
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        target: &mut D,
        theme: &Theme,
    ) -> Result<(), D::Error> {
        Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(theme.bg_primary))
            .draw(target)?;

        Text::with_alignment(
            &self.title,
            Point::new(120, 30),
            theme.accent_style(),
            Alignment::Center,
        )
        .draw(target)?;

        Line::new(Point::new(30, 48), Point::new(210, 48))
            .into_styled(PrimitiveStyle::with_stroke(theme.text_secondary, 2))
            .draw(target)?;

        if self.tracks.is_empty() {
            Text::with_alignment(
                "No tracks",
                Point::new(120, 130),
                theme.subtitle_style(),
                Alignment::Center,
            )
            .draw(target)?;
            return Ok(());
        }

        let start = self.window_start();
        let end = (start + VISIBLE_ROWS).min(self.tracks.len());
        for (row, index) in (start..end).enumerate() {
            let y = LIST_TOP + row as i32 * ROW_HEIGHT;
            let selected = index == self.cursor;

            if selected {
                RoundedRectangle::with_equal_corners(
                    Rectangle::new(Point::new(28, y - 6), Size::new(184, ROW_HEIGHT as u32 - 4)),
                    Size::new(6, 6),
                )
                .into_styled(PrimitiveStyle::with_fill(theme.bg_secondary))
                .draw(target)?;
            }

            let color = if selected {
                theme.text_primary
            } else {
                theme.text_secondary
            };
            Text::with_alignment(
                &self.tracks[index].name,
                Point::new(120, y + 8),
                embedded_graphics::mono_font::MonoTextStyle::new(theme.font_medium, color),
                Alignment::Center,
            )
            .draw(target)?;
        }

        Ok(())
    }
}

impl Default for SeriesScreen {
    fn default() -> Self {
        Self::new()
    }
}
