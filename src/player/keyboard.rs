use std::str::FromStr;

/// Physical keys the player reacts to, named after DOM `KeyboardEvent.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    KeyM,
    KeyF,
}

impl FromStr for KeyCode {
    type Err = ();

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "Space" => Ok(Self::Space),
            "ArrowLeft" => Ok(Self::ArrowLeft),
            "ArrowRight" => Ok(Self::ArrowRight),
            "ArrowUp" => Ok(Self::ArrowUp),
            "ArrowDown" => Ok(Self::ArrowDown),
            "KeyM" => Ok(Self::KeyM),
            "KeyF" => Ok(Self::KeyF),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shortcut {
    TogglePlayPause,
    Seek(f64),
    ChangeVolume(i32),
    ToggleMute,
    ToggleFullscreen,
}

impl Shortcut {
    pub fn for_key(key: KeyCode, seek_step_secs: f64, volume_step: i32) -> Self {
        match key {
            KeyCode::Space => Self::TogglePlayPause,
            KeyCode::ArrowLeft => Self::Seek(-seek_step_secs),
            KeyCode::ArrowRight => Self::Seek(seek_step_secs),
            KeyCode::ArrowUp => Self::ChangeVolume(volume_step),
            KeyCode::ArrowDown => Self::ChangeVolume(-volume_step),
            KeyCode::KeyM => Self::ToggleMute,
            KeyCode::KeyF => Self::ToggleFullscreen,
        }
    }
}

/// Tells the host whether to suppress its default handling of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    PreventDefault,
    PassThrough,
}
