//! Home screen: playlist carousel
//!
//! One playlist at a time, rotated through with wraparound. A row of
//! indicator dots (capped at [`MAX_INDICATOR_DOTS`]) shows the position;
//! past the cap the dot-to-item mapping is intentionally not 1:1.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Alignment, Text};

use molapi::Playlist;

use crate::model::RotateDirection;
use crate::theme::{
    COVER_SIZE_LARGE, MAX_INDICATOR_DOTS, SCREEN_HEIGHT, SCREEN_WIDTH, Theme,
};

const DOT_DIAMETER: u32 = 8;
const DOT_SPACING: i32 = 12;

pub struct HomeScreen {
    playlists: Vec<Playlist>,
    cursor: usize,
    /// False until the first `set_playlists`, to tell "still loading"
    /// apart from "server has no playlists"
    loaded: bool,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            playlists: Vec::new(),
            cursor: 0,
            loaded: false,
        }
    }

    /// Advance the cursor with wraparound. No-op while empty.
    ///
    /// Returns true when the cursor moved.
    pub fn handle_rotate(&mut self, direction: RotateDirection) -> bool {
        if self.playlists.is_empty() {
            return false;
        }

        let count = self.playlists.len() as i32;
        let next = (self.cursor as i32 + direction.delta()).rem_euclid(count) as usize;
        if next == self.cursor {
            return false;
        }
        self.cursor = next;
        true
    }

    /// Selection intent: the cursor index, or `None` while empty
    pub fn handle_click(&self) -> Option<usize> {
        if self.playlists.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// Replace the list wholesale and reset the cursor
    pub fn set_playlists(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;
        self.cursor = 0;
        self.loaded = true;
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Playlist> {
        self.playlists.get(self.cursor)
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        target: &mut D,
        theme: &Theme,
    ) -> Result<(), D::Error> {
        Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(theme.bg_primary))
            .draw(target)?;

        // Cover placeholder: circular panel with an accent ring.
        let cover_style = PrimitiveStyleBuilder::new()
            .fill_color(theme.bg_secondary)
            .stroke_color(theme.accent)
            .stroke_width(2)
            .build();
        Circle::with_center(Point::new(120, 90), COVER_SIZE_LARGE)
            .into_styled(cover_style)
            .draw(target)?;

        let title = if !self.loaded {
            "Loading..."
        } else if self.playlists.is_empty() {
            "No playlists"
        } else {
            &self.playlists[self.cursor].name
        };
        Text::with_alignment(title, Point::new(120, 180), theme.title_style(), Alignment::Center)
            .draw(target)?;

        self.draw_indicator_dots(target, theme)?;
        Ok(())
    }

    fn draw_indicator_dots<D: DrawTarget<Color = Rgb565>>(
        &self,
        target: &mut D,
        theme: &Theme,
    ) -> Result<(), D::Error> {
        let count = self.playlists.len().min(MAX_INDICATOR_DOTS);
        if count == 0 {
            return Ok(());
        }

        let row_width = DOT_DIAMETER as i32 + (count as i32 - 1) * DOT_SPACING;
        let start_x = 120 - row_width / 2;
        for i in 0..count {
            let active = i == self.cursor;
            let color = if active {
                theme.accent
            } else {
                theme.text_secondary
            };
            Circle::new(
                Point::new(start_x + i as i32 * DOT_SPACING, 206),
                DOT_DIAMETER,
            )
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target)?;
        }
        Ok(())
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RotateDirection::{Clockwise, CounterClockwise};

    fn playlists(count: usize) -> Vec<Playlist> {
        (0..count)
            .map(|i| Playlist {
                id: format!("pl{i}"),
                name: format!("Playlist {i}"),
                ..Playlist::default()
            })
            .collect()
    }

    #[test]
    fn test_rotate_wraps_around() {
        let mut screen = HomeScreen::new();
        screen.set_playlists(playlists(3));

        assert!(screen.handle_rotate(Clockwise));
        assert_eq!(screen.cursor(), 1);
        screen.handle_rotate(Clockwise);
        screen.handle_rotate(Clockwise);
        assert_eq!(screen.cursor(), 0);

        assert!(screen.handle_rotate(CounterClockwise));
        assert_eq!(screen.cursor(), 2);
    }

    #[test]
    fn test_full_turn_returns_to_origin() {
        let mut screen = HomeScreen::new();
        screen.set_playlists(playlists(5));
        screen.handle_rotate(Clockwise);
        screen.handle_rotate(Clockwise);
        let origin = screen.cursor();

        for _ in 0..5 {
            screen.handle_rotate(Clockwise);
        }
        assert_eq!(screen.cursor(), origin);
    }

    #[test]
    fn test_rotate_on_empty_is_noop() {
        let mut screen = HomeScreen::new();
        assert!(!screen.handle_rotate(Clockwise));
        assert_eq!(screen.cursor(), 0);

        screen.set_playlists(Vec::new());
        assert!(!screen.handle_rotate(CounterClockwise));
    }

    #[test]
    fn test_single_item_rotate_does_not_move() {
        let mut screen = HomeScreen::new();
        screen.set_playlists(playlists(1));
        assert!(!screen.handle_rotate(Clockwise));
        assert_eq!(screen.cursor(), 0);
    }

    #[test]
    fn test_click_requires_items() {
        let mut screen = HomeScreen::new();
        assert_eq!(screen.handle_click(), None);

        screen.set_playlists(playlists(2));
        screen.handle_rotate(Clockwise);
        assert_eq!(screen.handle_click(), Some(1));
    }

    #[test]
    fn test_set_playlists_resets_cursor() {
        let mut screen = HomeScreen::new();
        screen.set_playlists(playlists(4));
        screen.handle_rotate(Clockwise);
        screen.handle_rotate(Clockwise);

        screen.set_playlists(playlists(2));
        assert_eq!(screen.cursor(), 0);
    }

    #[test]
    fn test_draw_smoke() {
        let mut frame = moldisplay::FrameBuffer::round_240();
        let theme = Theme::new();

        let mut screen = HomeScreen::new();
        screen.draw(&mut frame, &theme).unwrap();

        screen.set_playlists(playlists(9));
        screen.draw(&mut frame, &theme).unwrap();
        assert!(frame.dirty_region().is_some());
    }
}
