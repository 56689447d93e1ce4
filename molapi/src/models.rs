//! Data models for Music Assistant API responses
//!
//! Domain records are immutable snapshots: a refreshed list replaces the
//! previous one wholesale, and the player state is rebuilt fully on each
//! poll (no partial merge). The `payload` structs mirror the server JSON
//! and are converted into the domain types by the client.

use serde::Deserialize;

// ============================================================================
// Domain records
// ============================================================================

/// A playlist from the server library
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    /// Server item id
    pub id: String,
    /// Display name
    pub name: String,
    /// Cover art URL, when the server provides one
    pub image_url: Option<String>,
    /// Number of tracks, when the server provides it
    pub track_count: u32,
}

/// A playable track inside a playlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    /// Server item id
    pub id: String,
    /// Playable URI handed back to the player on selection
    pub uri: String,
    /// Display name
    pub name: String,
    /// Album name, empty when unknown
    pub album_name: String,
    /// Cover art URL, when the server provides one
    pub image_url: Option<String>,
    /// Track duration in milliseconds (0 when unknown)
    pub duration_ms: u64,
}

/// Snapshot of a player as reported by the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub player_id: String,
    pub player_name: String,
    pub is_playing: bool,
    /// Volume level in [0, 100]
    pub volume: u8,
    /// Playback position in milliseconds
    pub position_ms: u64,
    /// Duration of the current track in milliseconds
    pub duration_ms: u64,
    pub current_track: Track,
}

/// Default volume reported before the first successful poll
pub const DEFAULT_VOLUME: u8 = 50;

impl PlayerState {
    /// Empty state carrying only the player identity.
    ///
    /// Returned when a poll fails at the transport level, so the UI keeps
    /// rendering something sensible instead of an error.
    pub fn for_player(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            volume: DEFAULT_VOLUME,
            ..Self::default()
        }
    }

    pub(crate) fn from_payload(player_id: &str, payload: PlayerPayload) -> Self {
        let mut state = Self {
            player_id: player_id.to_string(),
            player_name: payload.display_name.unwrap_or_default(),
            is_playing: payload.state == "playing",
            volume: payload.volume_level.clamp(0, 100) as u8,
            position_ms: payload.elapsed_time.unwrap_or(0) * 1000,
            ..Self::default()
        };

        if let Some(media) = payload.current_media {
            state.duration_ms = media.duration.unwrap_or(0) * 1000;
            state.current_track = Track {
                name: media.name,
                image_url: media.image.and_then(|image| image.url),
                duration_ms: state.duration_ms,
                ..Track::default()
            };
        }

        state
    }
}

// ============================================================================
// Wire payloads (server JSON shapes)
// ============================================================================

/// Nested `image` object: `{"url": "..."}`
#[derive(Debug, Deserialize)]
pub(crate) struct ImagePayload {
    #[serde(default)]
    pub url: Option<String>,
}

/// One entry of `GET /library/playlists`
#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistPayload {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<ImagePayload>,
    #[serde(default)]
    pub track_count: u32,
}

impl From<PlaylistPayload> for Playlist {
    fn from(payload: PlaylistPayload) -> Self {
        Self {
            id: payload.item_id,
            name: payload.name,
            image_url: payload.image.and_then(|image| image.url),
            track_count: payload.track_count,
        }
    }
}

/// One entry of `GET /library/playlists/{id}/tracks`
///
/// `duration` is in seconds on the wire.
#[derive(Debug, Deserialize)]
pub(crate) struct TrackPayload {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

impl From<TrackPayload> for Track {
    fn from(payload: TrackPayload) -> Self {
        Self {
            id: payload.item_id,
            uri: payload.uri,
            name: payload.name,
            album_name: payload.album.unwrap_or_default(),
            image_url: payload.image.and_then(|image| image.url),
            duration_ms: payload.duration.unwrap_or(0) * 1000,
        }
    }
}

/// Body of `GET /players/{id}`
///
/// `elapsed_time` and `current_media.duration` are in seconds on the wire.
#[derive(Debug, Deserialize)]
pub(crate) struct PlayerPayload {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub volume_level: i64,
    #[serde(default)]
    pub elapsed_time: Option<u64>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub current_media: Option<MediaPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_payload_conversion() {
        let json = r#"[
            {"item_id": "pl1", "name": "Morning", "image": {"url": "http://x/cover.jpg"}},
            {"item_id": "pl2", "name": "Evening"}
        ]"#;
        let payloads: Vec<PlaylistPayload> = serde_json::from_str(json).unwrap();
        let playlists: Vec<Playlist> = payloads.into_iter().map(Playlist::from).collect();

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].id, "pl1");
        assert_eq!(playlists[0].name, "Morning");
        assert_eq!(
            playlists[0].image_url.as_deref(),
            Some("http://x/cover.jpg")
        );
        assert_eq!(playlists[1].image_url, None);
        assert_eq!(playlists[1].track_count, 0);
    }

    #[test]
    fn test_track_payload_duration_is_seconds_on_the_wire() {
        let json = r#"{"item_id": "t1", "uri": "library://track/1", "name": "Ep1", "duration": 130}"#;
        let payload: TrackPayload = serde_json::from_str(json).unwrap();
        let track = Track::from(payload);

        assert_eq!(track.duration_ms, 130_000);
        assert_eq!(track.uri, "library://track/1");
        assert_eq!(track.album_name, "");
    }

    #[test]
    fn test_player_state_scenario() {
        let json = r#"{
            "state": "playing",
            "volume_level": 42,
            "elapsed_time": 65,
            "current_media": {"name": "Ep1", "duration": 130}
        }"#;
        let payload: PlayerPayload = serde_json::from_str(json).unwrap();
        let state = PlayerState::from_payload("office", payload);

        assert!(state.is_playing);
        assert_eq!(state.volume, 42);
        assert_eq!(state.position_ms, 65_000);
        assert_eq!(state.duration_ms, 130_000);
        assert_eq!(state.current_track.name, "Ep1");
    }

    #[test]
    fn test_player_state_missing_fields_default() {
        let payload: PlayerPayload = serde_json::from_str("{}").unwrap();
        let state = PlayerState::from_payload("office", payload);

        assert_eq!(state.player_id, "office");
        assert!(!state.is_playing);
        assert_eq!(state.volume, 0);
        assert_eq!(state.position_ms, 0);
        assert_eq!(state.duration_ms, 0);
        assert_eq!(state.current_track, Track::default());
    }

    #[test]
    fn test_player_state_volume_clamped() {
        let payload: PlayerPayload =
            serde_json::from_str(r#"{"state": "paused", "volume_level": 300}"#).unwrap();
        let state = PlayerState::from_payload("office", payload);
        assert_eq!(state.volume, 100);

        let payload: PlayerPayload =
            serde_json::from_str(r#"{"volume_level": -10}"#).unwrap();
        let state = PlayerState::from_payload("office", payload);
        assert_eq!(state.volume, 0);
    }

    #[test]
    fn test_for_player_carries_identity_only() {
        let state = PlayerState::for_player("kitchen");
        assert_eq!(state.player_id, "kitchen");
        assert_eq!(state.volume, DEFAULT_VOLUME);
        assert!(!state.is_playing);
        assert_eq!(state.current_track, Track::default());
    }
}
