//! UI model types: screens, input events, navigation, host commands

/// The three screens of the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    /// Playlist carousel
    Home,
    /// Track list of the selected playlist
    Series,
    /// Now-playing / volume screen
    Player,
}

/// Knob rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// Cursor delta for one detent: +1 clockwise, -1 counter-clockwise
    pub fn delta(self) -> i32 {
        match self {
            RotateDirection::Clockwise => 1,
            RotateDirection::CounterClockwise => -1,
        }
    }
}

/// Raw input events from the knob/button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Rotate(RotateDirection),
    Click,
    DoubleClick,
    /// Physical button went down (starts long-press timing)
    ButtonPress,
    /// Physical button came back up
    ButtonRelease,
}

/// Direction of the screen-transition slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// New screen slides in from the right
    Forward,
    /// New screen slides in from the left
    Backward,
}

/// Slide direction for a navigation, or `None` when the target is already
/// the current screen.
///
/// Kept as an explicit table so the direction rules are testable on their
/// own: navigating home is always backward, deeper is always forward, and
/// Series is forward only when coming from Home.
pub fn transition(current: ScreenId, target: ScreenId) -> Option<SlideDirection> {
    if current == target {
        return None;
    }

    let direction = match target {
        ScreenId::Home => SlideDirection::Backward,
        ScreenId::Series => {
            if current == ScreenId::Home {
                SlideDirection::Forward
            } else {
                SlideDirection::Backward
            }
        }
        ScreenId::Player => SlideDirection::Forward,
    };

    Some(direction)
}

/// Commands the orchestrator asks the host to perform.
///
/// The screens themselves never touch the network; selections and volume
/// changes are broadcast on the command bus and the host forwards them to
/// the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Fetch the tracks of the playlist at `playlist_index` on Home
    LoadTracks { playlist_index: usize },
    /// Start playback of the track at `track_index` on Series
    PlayTrack { track_index: usize },
    /// Send the new volume to the player
    SetVolume(u8),
    /// Resume (`playing == true`) or pause playback
    SetPlayback { playing: bool },
    /// Stop playback
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScreenId::*;
    use SlideDirection::*;

    #[test]
    fn test_transition_self_is_noop() {
        assert_eq!(transition(Home, Home), None);
        assert_eq!(transition(Series, Series), None);
        assert_eq!(transition(Player, Player), None);
    }

    #[test]
    fn test_transition_directions() {
        assert_eq!(transition(Home, Series), Some(Forward));
        assert_eq!(transition(Series, Player), Some(Forward));
        assert_eq!(transition(Home, Player), Some(Forward));

        assert_eq!(transition(Series, Home), Some(Backward));
        assert_eq!(transition(Player, Home), Some(Backward));
        assert_eq!(transition(Player, Series), Some(Backward));
    }

    #[test]
    fn test_rotate_delta() {
        assert_eq!(RotateDirection::Clockwise.delta(), 1);
        assert_eq!(RotateDirection::CounterClockwise.delta(), -1);
    }
}
