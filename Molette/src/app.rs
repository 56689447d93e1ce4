//! The host loop tying input, UI, polling, and the API client together
//!
//! Single-threaded and cooperative: every iteration handles at most one
//! input event, gives the UI a tick, lets the poller run if due, drains
//! the command bus, then redraws. Blocking HTTP calls pause the loop for
//! at most the request timeout.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{Receiver, unbounded};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use tracing::{info, trace, warn};

use molapi::{MusicClient, PlayerState, StatePoller};
use moldisplay::{FrameBuffer, PanelGeometry};
use molui::{Theme, Ui, UiCommand};

use crate::config::Config;
use crate::input::{self, HostEvent};

/// How long one loop iteration waits for input
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Puts the terminal in raw mode for the lifetime of the guard
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

pub struct App {
    client: MusicClient,
    ui: Ui,
    poller: StatePoller,
    frame: FrameBuffer,
    commands: Receiver<UiCommand>,
    states: Receiver<PlayerState>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let client = MusicClient::builder()
            .host(config.server.host.clone())
            .port(config.server.port)
            .player_id(config.server.player_id.clone())
            .build();

        let geometry = PanelGeometry::round_240();
        info!(
            "Panel {}x{}, rotation {}, inverted {}",
            geometry.width, geometry.height, geometry.rotation, geometry.invert_colors
        );
        let frame = FrameBuffer::new(geometry.width, geometry.height);

        let ui = Ui::new(Theme::new()).with_long_press_hold(config.long_press_hold());
        let commands = ui.subscribe_commands();

        let (state_tx, states) = unbounded();
        let mut poller = StatePoller::with_interval(config.poll_interval());
        poller.set_on_state_changed(move |state| {
            let _ = state_tx.send(state);
        });

        Self {
            client,
            ui,
            poller,
            frame,
            commands,
            states,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let _raw = RawModeGuard::new()?;

        info!(
            "Remote for player '{}' at {}",
            self.client.player_id(),
            self.client.base_url()
        );
        let playlists = self.client.playlists();
        self.ui.set_playlists(playlists);

        loop {
            let now = Instant::now();

            match input::poll_input(INPUT_POLL_TIMEOUT)? {
                Some(HostEvent::Quit) => break,
                Some(HostEvent::Input(event)) => self.ui.handle_event(event, now),
                None => {}
            }

            self.ui.tick(now);
            self.poller.tick(now, &self.client);
            while let Ok(state) = self.states.try_recv() {
                self.ui.update_player_state(&state);
            }
            while let Ok(command) = self.commands.try_recv() {
                self.dispatch(command);
            }

            self.ui.draw(&mut self.frame, now)?;
            self.frame.flush(&mut |region: Rectangle, pixels: &[Rgb565]| {
                trace!(
                    "blit {}x{} at ({}, {}), {} px",
                    region.size.width,
                    region.size.height,
                    region.top_left.x,
                    region.top_left.y,
                    pixels.len()
                );
            });
        }

        info!("Shutting down");
        Ok(())
    }

    /// Execute one command emitted by the UI
    fn dispatch(&mut self, command: UiCommand) {
        match command {
            UiCommand::LoadTracks { playlist_index } => {
                let Some(id) = self.ui.playlist(playlist_index).map(|p| p.id.clone()) else {
                    warn!("LoadTracks for unknown playlist index {playlist_index}");
                    return;
                };
                let tracks = self.client.playlist_tracks(&id);
                self.ui.set_tracks(tracks);
            }
            UiCommand::PlayTrack { track_index } => {
                let Some(uri) = self.ui.track(track_index).map(|t| t.uri.clone()) else {
                    warn!("PlayTrack for unknown track index {track_index}");
                    return;
                };
                self.client.play_track(&uri);
            }
            UiCommand::SetVolume(volume) => {
                self.client.set_volume(volume);
            }
            UiCommand::SetPlayback { playing } => {
                if playing {
                    self.client.play();
                } else {
                    self.client.pause();
                }
            }
            UiCommand::Stop => {
                self.client.stop();
            }
        }
    }
}
