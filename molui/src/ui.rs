//! Screen orchestrator: input routing, navigation, slide animation
//!
//! Owns the three screen controllers and the command bus. Input goes to
//! the active screen only; whatever the screen decides (a selection, a
//! volume change) comes back as a return value and is turned into
//! [`UiCommand`]s and navigation here.

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use crossbeam_channel::Receiver;
use tracing::debug;

use molapi::{PlayerState, Playlist, Track};

use crate::events::UiCommandBus;
use crate::model::{
    InputEvent, RotateDirection, ScreenId, SlideDirection, UiCommand, transition,
};
use crate::screens::{HomeScreen, PlayerScreen, SeriesScreen};
use crate::theme::{ANIM_DURATION_NORMAL, SCREEN_HEIGHT, SCREEN_WIDTH, Theme};

/// Hold time before a button press counts as a long press
pub const LONG_PRESS_HOLD: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy)]
struct SlideAnimation {
    from: ScreenId,
    direction: SlideDirection,
    started: Instant,
    duration: Duration,
}

pub struct Ui {
    theme: Theme,
    home: HomeScreen,
    series: SeriesScreen,
    player: PlayerScreen,
    current: ScreenId,
    previous: ScreenId,
    animation: Option<SlideAnimation>,
    /// Set while the physical button is held; cleared once the long press
    /// fires so it cannot fire twice per hold
    button_pressed_at: Option<Instant>,
    long_press_hold: Duration,
    commands: UiCommandBus,
}

impl Ui {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            home: HomeScreen::new(),
            series: SeriesScreen::new(),
            player: PlayerScreen::new(),
            current: ScreenId::Home,
            previous: ScreenId::Home,
            animation: None,
            button_pressed_at: None,
            long_press_hold: LONG_PRESS_HOLD,
            commands: UiCommandBus::new(),
        }
    }

    /// Override the default long-press hold time
    pub fn with_long_press_hold(mut self, hold: Duration) -> Self {
        self.long_press_hold = hold;
        self
    }

    /// Receiver for the commands this orchestrator emits
    pub fn subscribe_commands(&self) -> Receiver<UiCommand> {
        self.commands.subscribe()
    }

    pub fn current_screen(&self) -> ScreenId {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Rotate(direction) => self.on_rotate(direction),
            InputEvent::Click => self.on_click(now),
            InputEvent::DoubleClick => self.on_double_click(now),
            InputEvent::ButtonPress => self.button_pressed_at = Some(now),
            InputEvent::ButtonRelease => self.button_pressed_at = None,
        }
    }

    /// Fire the long press once the button has been held long enough.
    ///
    /// Called every loop iteration; the latch clears on fire, so a single
    /// hold produces at most one long press.
    pub fn tick(&mut self, now: Instant) {
        let Some(pressed_at) = self.button_pressed_at else {
            return;
        };
        if now.duration_since(pressed_at) >= self.long_press_hold {
            self.button_pressed_at = None;
            self.on_long_press(now);
        }
    }

    fn on_rotate(&mut self, direction: RotateDirection) {
        match self.current {
            ScreenId::Home => {
                self.home.handle_rotate(direction);
            }
            ScreenId::Series => {
                self.series.handle_rotate(direction);
            }
            ScreenId::Player => {
                if self.player.handle_rotate(direction) {
                    self.commands.broadcast(UiCommand::SetVolume(self.player.volume()));
                }
            }
        }
    }

    fn on_click(&mut self, now: Instant) {
        match self.current {
            ScreenId::Home => {
                let Some(index) = self.home.handle_click() else {
                    return;
                };
                if let Some(playlist) = self.home.selected() {
                    self.series.set_title(playlist.name.clone());
                }
                self.series.set_tracks(Vec::new());
                self.commands
                    .broadcast(UiCommand::LoadTracks { playlist_index: index });
                self.navigate_to(ScreenId::Series, now);
            }
            ScreenId::Series => {
                let Some(index) = self.series.handle_click() else {
                    return;
                };
                self.commands
                    .broadcast(UiCommand::PlayTrack { track_index: index });
                self.navigate_to(ScreenId::Player, now);
            }
            ScreenId::Player => {
                let playing = self.player.toggle_play_pause();
                self.commands.broadcast(UiCommand::SetPlayback { playing });
            }
        }
    }

    fn on_double_click(&mut self, now: Instant) {
        match self.current {
            ScreenId::Home => {}
            ScreenId::Series => self.navigate_to(ScreenId::Home, now),
            ScreenId::Player => self.navigate_to(ScreenId::Series, now),
        }
    }

    fn on_long_press(&mut self, now: Instant) {
        // Long press is the panic button: stop playback, back to Home.
        if self.current == ScreenId::Player {
            self.commands.broadcast(UiCommand::Stop);
            self.navigate_to(ScreenId::Home, now);
        }
    }

    fn navigate_to(&mut self, target: ScreenId, now: Instant) {
        let Some(direction) = transition(self.current, target) else {
            return;
        };
        debug!(from = ?self.current, to = ?target, "navigate");

        self.previous = self.current;
        self.animation = Some(SlideAnimation {
            from: self.current,
            direction,
            started: now,
            duration: ANIM_DURATION_NORMAL,
        });
        self.current = target;
    }

    /// Go back to the previously shown screen
    pub fn go_back(&mut self, now: Instant) {
        self.navigate_to(self.previous, now);
    }

    pub fn set_playlists(&mut self, playlists: Vec<Playlist>) {
        self.home.set_playlists(playlists);
    }

    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.series.set_tracks(tracks);
    }

    pub fn update_player_state(&mut self, state: &PlayerState) {
        self.player.update_state(state);
    }

    pub fn playlist(&self, index: usize) -> Option<&Playlist> {
        self.home.playlists().get(index)
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.series.tracks().get(index)
    }

    /// Render the active screen, or both screens of a running slide.
    ///
    /// A finished animation is cleared here rather than in `tick` so the
    /// last frame is always drawn at the final position.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        target: &mut D,
        now: Instant,
    ) -> Result<(), D::Error> {
        let Some(animation) = &self.animation else {
            return self.draw_screen(self.current, target);
        };
        let SlideAnimation {
            from,
            direction,
            started,
            duration,
        } = *animation;

        let elapsed = now.duration_since(started);
        let progress = (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0);
        if progress >= 1.0 {
            self.animation = None;
            return self.draw_screen(self.current, target);
        }

        let width = SCREEN_WIDTH as i32;
        let shift = (progress * width as f32) as i32;
        let (from_x, to_x) = match direction {
            SlideDirection::Forward => (-shift, width - shift),
            SlideDirection::Backward => (shift, shift - width),
        };

        // Both screens only paint within their own shifted frame, so clear
        // the real target first to cover the seam.
        Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(self.theme.bg_primary))
            .draw(target)?;

        self.draw_screen(from, &mut target.translated(Point::new(from_x, 0)))?;
        self.draw_screen(self.current, &mut target.translated(Point::new(to_x, 0)))?;
        Ok(())
    }

    fn draw_screen<D: DrawTarget<Color = Rgb565>>(
        &self,
        id: ScreenId,
        target: &mut D,
    ) -> Result<(), D::Error> {
        match id {
            ScreenId::Home => self.home.draw(target, &self.theme),
            ScreenId::Series => self.series.draw(target, &self.theme),
            ScreenId::Player => self.player.draw(target, &self.theme),
        }
    }
}
