use serde::Serialize;

/// Playback events a scene can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PlaybackEvent {
    Play,
    Pause,
    Resume,
    Stop,
    Scrobble,
    Rate,
}

impl PlaybackEvent {
    pub const ALL: [PlaybackEvent; 6] = [
        PlaybackEvent::Play,
        PlaybackEvent::Pause,
        PlaybackEvent::Resume,
        PlaybackEvent::Stop,
        PlaybackEvent::Scrobble,
        PlaybackEvent::Rate,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "media.play" => Some(PlaybackEvent::Play),
            "media.pause" => Some(PlaybackEvent::Pause),
            "media.resume" => Some(PlaybackEvent::Resume),
            "media.stop" => Some(PlaybackEvent::Stop),
            // Plex sends "media.scrobble"; the short spelling is what deployments configure
            "media.scobble" | "media.scrobble" => Some(PlaybackEvent::Scrobble),
            "media.rate" => Some(PlaybackEvent::Rate),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlaybackEvent::Play => "media.play",
            PlaybackEvent::Pause => "media.pause",
            PlaybackEvent::Resume => "media.resume",
            PlaybackEvent::Stop => "media.stop",
            PlaybackEvent::Scrobble => "media.scobble",
            PlaybackEvent::Rate => "media.rate",
        }
    }

    /// Name of the setting holding the scene for this event.
    pub fn env_key(&self) -> String {
        self.name().to_uppercase().replace('.', "_")
    }

    /// Events that fall back to restoring the snapshot when no scene is set.
    pub fn restores_snapshot(&self) -> bool {
        matches!(self, PlaybackEvent::Stop | PlaybackEvent::Pause)
    }
}

impl std::fmt::Display for PlaybackEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for event in PlaybackEvent::ALL {
            assert_eq!(PlaybackEvent::from_name(event.name()), Some(event));
        }
    }

    #[test]
    fn test_scrobble_aliases() {
        assert_eq!(
            PlaybackEvent::from_name("media.scrobble"),
            Some(PlaybackEvent::Scrobble)
        );
        assert_eq!(PlaybackEvent::from_name("library.new"), None);
        assert_eq!(PlaybackEvent::from_name("MEDIA.PLAY"), None);
    }

    #[test]
    fn test_env_key() {
        assert_eq!(PlaybackEvent::Play.env_key(), "MEDIA_PLAY");
        assert_eq!(PlaybackEvent::Scrobble.env_key(), "MEDIA_SCOBBLE");
        assert_eq!(PlaybackEvent::Rate.env_key(), "MEDIA_RATE");
    }

    #[test]
    fn test_restores_snapshot() {
        assert!(PlaybackEvent::Stop.restores_snapshot());
        assert!(PlaybackEvent::Pause.restores_snapshot());
        assert!(!PlaybackEvent::Play.restores_snapshot());
        assert!(!PlaybackEvent::Resume.restores_snapshot());
    }
}
