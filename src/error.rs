//! Error types for controller binding operations.

use thiserror::Error;

/// Rejected attempts to read or write a binding slot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("button {button} is a modifier and cannot be bound directly")]
    ModifierButton { button: u8 },

    #[error("button index {button} out of range: profile has {buttons} buttons")]
    ButtonRange { button: u8, buttons: u8 },

    #[error("modifier {modifier} out of range: profile has {mods} modifier buttons")]
    ModifierRange { modifier: u8, mods: usize },

    #[error("axis index {axis} out of range: profile has {axes} axes")]
    AxisRange { axis: u8, axes: u8 },
}

/// Primary error type for cardpad operations.
#[derive(Error, Debug)]
pub enum PadError {
    // Registry errors
    #[error("Unknown controller: {name}")]
    UnknownController { name: String },

    #[error("Unknown state: {name}")]
    UnknownState { name: String },

    // Binding errors
    #[error("Invalid binding: {0}")]
    InvalidBinding(#[from] BindingError),

    // Profile errors
    #[error("Profile not found: {name}")]
    ProfileNotFound { name: String },

    #[error("Profile already exists: {name}")]
    ProfileExists { name: String },

    #[error("Profile '{name}' failed validation: {reason}")]
    ProfileInvalid { name: String, reason: String },

    #[error("Profile parse error: {0}")]
    ProfileParse(String),

    // Settings errors
    #[error("Settings parse error: {0}")]
    SettingsParse(String),

    #[error("Could not determine data directory")]
    NoDataDir,

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl PadError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownController { .. }
                | Self::UnknownState { .. }
                | Self::InvalidBinding(_)
                | Self::ProfileNotFound { .. }
                | Self::ProfileExists { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnknownController { .. } => Some("Run: cardpad controllers"),
            Self::UnknownState { .. } => {
                Some("Valid states: all, deckBrowser, overview, review, question, answer, dialog")
            }
            Self::ProfileNotFound { .. } => Some("Run: cardpad profiles"),
            Self::ProfileExists { .. } => Some("Pick a different name or delete the profile first"),
            Self::InvalidBinding(BindingError::ModifierButton { .. }) => {
                Some("Modifier buttons select binding layers and cannot carry actions")
            }
            _ => None,
        }
    }
}

/// Convenience type alias for Results using PadError.
pub type Result<T> = std::result::Result<T, PadError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| PadError::Other(format!("{}: {e}", f().into())))
    }
}
