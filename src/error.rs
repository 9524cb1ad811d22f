use std::fmt;

use thiserror::Error;

/// Which side of the device a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => f.write_str("input"),
            PortDirection::Output => f.write_str("output"),
        }
    }
}

/// Errors surfaced by the FaderPort driver.
#[derive(Debug, Error)]
pub enum Error {
    /// A button name (or alias) that the registry does not know.
    #[error("no FaderPort button named \"{0}\"")]
    NotFound(String),

    #[error("failed to initialise MIDI {0}")]
    MidiInit(String),

    #[error("no MIDI {direction} port starting with \"{prefix}\" at index {index}")]
    PortNotFound {
        direction: PortDirection,
        prefix: String,
        index: usize,
    },

    #[error("failed to open MIDI connection: {0}")]
    Connection(String),

    #[error("failed to send MIDI message: {0}")]
    Send(#[from] midir::SendError),

    /// The output port has already been released.
    #[error("FaderPort session is closed")]
    Closed,

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
