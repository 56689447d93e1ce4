//! HTTP client for the Music Assistant server
//!
//! Requests are blocking and run to completion inside the cooperative loop:
//! the remote issues at most one request at a time, so no pooling or
//! cancellation is needed. All failures are absorbed at this boundary:
//! the public methods log and return empty/default data, the `try_*`
//! variants expose the underlying [`Error`] for callers that want it.
//!
//! # Example
//!
//! ```no_run
//! use molapi::MusicClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MusicClient::builder()
//!         .host("music.local")
//!         .player_id("office")
//!         .build();
//!
//!     for playlist in client.playlists() {
//!         println!("{} ({})", playlist.name, playlist.id);
//!     }
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, error};
use ureq::Agent;

use crate::error::{Error, Result};
use crate::models::{PlayerPayload, PlayerState, Playlist, PlaylistPayload, Track, TrackPayload};

/// Default Music Assistant API port
pub const DEFAULT_PORT: u16 = 8095;

/// Default timeout for HTTP requests (5 seconds)
///
/// A request stalls the whole loop for its duration, so the timeout stays
/// short.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Blocking Music Assistant client bound to one player
#[derive(Debug, Clone)]
pub struct MusicClient {
    agent: Agent,
    base_url: String,
    player_id: String,
}

/// Builder for [`MusicClient`]
#[derive(Debug, Clone)]
pub struct MusicClientBuilder {
    host: String,
    port: u16,
    player_id: String,
    timeout: Duration,
}

impl Default for MusicClientBuilder {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            player_id: String::new(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl MusicClientBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn player_id(mut self, player_id: impl Into<String>) -> Self {
        self.player_id = player_id.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> MusicClient {
        // Non-2xx statuses are handled by looking at the status code, not by
        // erroring out of the call: a 404 body is still a readable response.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(self.timeout))
            .build();

        MusicClient {
            agent: config.into(),
            base_url: format!("http://{}:{}/api", self.host, self.port),
            player_id: self.player_id,
        }
    }
}

impl MusicClient {
    /// Create a builder for configuring the client
    pub fn builder() -> MusicClientBuilder {
        MusicClientBuilder::default()
    }

    /// Base URL of the server API (`http://{host}:{port}/api`)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Identifier of the player this client controls
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    // ========================================================================
    // Library
    // ========================================================================

    /// Fetch the library playlists.
    ///
    /// Transport and parse failures are logged and yield an empty list.
    pub fn playlists(&self) -> Vec<Playlist> {
        match self.try_playlists() {
            Ok(playlists) => {
                debug!("Loaded {} playlists", playlists.len());
                playlists
            }
            Err(e) => {
                error!("Failed to load playlists: {e}");
                Vec::new()
            }
        }
    }

    /// Fallible variant of [`playlists`](Self::playlists)
    pub fn try_playlists(&self) -> Result<Vec<Playlist>> {
        let payloads: Vec<PlaylistPayload> = self.get_json("/library/playlists")?;
        Ok(payloads.into_iter().map(Playlist::from).collect())
    }

    /// Fetch the tracks of one playlist. Same failure policy as
    /// [`playlists`](Self::playlists).
    pub fn playlist_tracks(&self, playlist_id: &str) -> Vec<Track> {
        match self.try_playlist_tracks(playlist_id) {
            Ok(tracks) => {
                debug!("Loaded {} tracks for playlist {playlist_id}", tracks.len());
                tracks
            }
            Err(e) => {
                error!("Failed to load tracks for playlist {playlist_id}: {e}");
                Vec::new()
            }
        }
    }

    /// Fallible variant of [`playlist_tracks`](Self::playlist_tracks)
    pub fn try_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        let endpoint = format!("/library/playlists/{playlist_id}/tracks");
        let payloads: Vec<TrackPayload> = self.get_json(&endpoint)?;
        Ok(payloads.into_iter().map(Track::from).collect())
    }

    // ========================================================================
    // Player commands
    // ========================================================================

    /// Start playback of a URI on the bound player
    pub fn play_track(&self, uri: &str) -> bool {
        let endpoint = format!("/players/{}/play_media", self.player_id);
        let body = serde_json::json!({"media": {"uri": uri}});
        self.post(&endpoint, Some(body))
    }

    /// Resume playback
    pub fn play(&self) -> bool {
        self.post(&format!("/players/{}/play", self.player_id), None)
    }

    /// Pause playback
    pub fn pause(&self) -> bool {
        self.post(&format!("/players/{}/pause", self.player_id), None)
    }

    /// Stop playback
    pub fn stop(&self) -> bool {
        self.post(&format!("/players/{}/stop", self.player_id), None)
    }

    /// Set the player volume.
    ///
    /// The value is transmitted as-is; range policy belongs to the caller.
    pub fn set_volume(&self, volume: u8) -> bool {
        let endpoint = format!("/players/{}/volume_set", self.player_id);
        let body = serde_json::json!({"volume_level": volume});
        self.post(&endpoint, Some(body))
    }

    // ========================================================================
    // Player state
    // ========================================================================

    /// Best-effort snapshot of the bound player.
    ///
    /// On failure the returned state carries only the player identity.
    pub fn player_state(&self) -> PlayerState {
        match self.try_player_state() {
            Ok(state) => state,
            Err(e) => {
                error!("Failed to fetch player state: {e}");
                PlayerState::for_player(&self.player_id)
            }
        }
    }

    /// Fallible variant of [`player_state`](Self::player_state)
    pub fn try_player_state(&self) -> Result<PlayerState> {
        let endpoint = format!("/players/{}", self.player_id);
        let payload: PlayerPayload = self.get_json(&endpoint)?;
        Ok(PlayerState::from_payload(&self.player_id, payload))
    }

    // ========================================================================
    // HTTP plumbing
    // ========================================================================

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut response = self.agent.get(&url).call()?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::status(status, endpoint));
        }

        let body = response.body_mut().read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a command; success is HTTP 200/204, anything else is logged.
    fn post(&self, endpoint: &str, body: Option<serde_json::Value>) -> bool {
        match self.try_post(endpoint, body) {
            Ok(ok) => ok,
            Err(e) => {
                error!("HTTP POST failed: {endpoint}: {e}");
                false
            }
        }
    }

    fn try_post(&self, endpoint: &str, body: Option<serde_json::Value>) -> Result<bool> {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json");

        let response = match body {
            Some(json) => request.send(json.to_string())?,
            None => request.send_empty()?,
        };

        let status = response.status().as_u16();
        if status == 200 || status == 204 {
            Ok(true)
        } else {
            error!("HTTP POST failed: {endpoint}, code: {status}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer one request on an ephemeral port with a canned response
    fn serve_once(response: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        port
    }

    #[test]
    fn test_base_url_construction() {
        let client = MusicClient::builder()
            .host("music.local")
            .port(8095)
            .player_id("office")
            .build();

        assert_eq!(client.base_url(), "http://music.local:8095/api");
        assert_eq!(client.player_id(), "office");
    }

    #[test]
    fn test_builder_defaults() {
        let client = MusicClient::builder().build();
        assert_eq!(client.base_url(), "http://localhost:8095/api");
        assert_eq!(client.player_id(), "");
    }

    /// Port 1 refuses the connection; the absorbing boundary must turn
    /// that into empty/default data instead of an error.
    #[test]
    fn test_transport_failure_is_absorbed() {
        let client = MusicClient::builder()
            .host("127.0.0.1")
            .port(1)
            .player_id("office")
            .timeout(Duration::from_millis(200))
            .build();

        assert!(client.playlists().is_empty());
        assert!(client.playlist_tracks("pl1").is_empty());

        let state = client.player_state();
        assert_eq!(state.player_id, "office");
        assert!(!state.is_playing);

        assert!(!client.play());
        assert!(!client.set_volume(40));
        assert!(client.try_playlists().is_err());
    }

    /// A 200 response with a garbage body must come back as empty data,
    /// not as an error escaping the client.
    #[test]
    fn test_malformed_json_is_absorbed() {
        let port = serve_once(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 16\r\n\
             \r\n\
             this is not json",
        );
        let client = MusicClient::builder()
            .host("127.0.0.1")
            .port(port)
            .player_id("office")
            .timeout(Duration::from_millis(500))
            .build();

        assert!(client.playlists().is_empty());
    }

    /// Same policy for the player snapshot: a garbage body degrades to the
    /// identity-only state.
    #[test]
    fn test_malformed_player_state_keeps_identity() {
        let port = serve_once(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 9\r\n\
             \r\n\
             not\njson!",
        );
        let client = MusicClient::builder()
            .host("127.0.0.1")
            .port(port)
            .player_id("office")
            .timeout(Duration::from_millis(500))
            .build();

        let state = client.player_state();
        assert_eq!(state.player_id, "office");
        assert!(!state.is_playing);
        assert_eq!(state.volume, crate::models::DEFAULT_VOLUME);
    }
}
