//! Error taxonomy
//!
//! Input and asset errors are per-event: an unmapped key drops that key
//! press, a missing sprite drops that draw call. Neither ends the run.
//! Settings errors are caught at load time and fall back to defaults.

use std::fmt;

use crate::assets::Sprite;

/// A key token reached the dispatcher without a binding
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputError {
    UnmappedKey { token: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappedKey { token } => write!(f, "no command bound to key {token:?}"),
        }
    }
}

impl std::error::Error for InputError {}

/// A sprite has no registered size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetLookupError {
    MissingSprite { sprite: Sprite },
}

impl fmt::Display for AssetLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSprite { sprite } => {
                write!(f, "sprite {} is not registered", sprite.name())
            }
        }
    }
}

impl std::error::Error for AssetLookupError {}

/// A settings value the game cannot run with
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettingsError {
    /// Must be finite and greater than zero
    NotPositive { field: &'static str, value: f32 },
    /// Must be finite
    NotFinite { field: &'static str, value: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be greater than zero, got {value}")
            }
            Self::NotFinite { field, value } => write!(f, "{field} must be finite, got {value}"),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = InputError::UnmappedKey {
            token: "Escape".to_string(),
        };
        assert_eq!(err.to_string(), "no command bound to key \"Escape\"");

        let err = AssetLookupError::MissingSprite {
            sprite: Sprite::SkierDown,
        };
        assert_eq!(err.to_string(), "sprite skierDown is not registered");

        let err = SettingsError::NotPositive {
            field: "viewport_width",
            value: -10.0,
        };
        assert_eq!(err.to_string(), "viewport_width must be greater than zero, got -10");
    }
}
