use thiserror::Error;

use crate::{Family, LedCommand, ModeCommand};

#[derive(Debug, Error)]
pub enum MidiError {
    #[error("couldn't find a port for {keyword:?}")]
    NoPortFound {
        // The keyword that was searched for
        keyword: String,
    },
    #[error("connecting to MIDI port {port:?} failed")]
    ConnectFailed { port: String },
    #[error("session is not open")]
    NotOpen,
    #[error("session has been closed")]
    Closed,
    #[error("MIDI transport failed: {msg}")]
    Transport { msg: String },
    #[cfg(feature = "midir")]
    #[error(transparent)]
    Init(#[from] midir::InitError),
    #[cfg(feature = "midir")]
    #[error(transparent)]
    PortInfo(#[from] midir::PortInfoError),
    #[cfg(feature = "midir")]
    #[error(transparent)]
    ConnectInput(#[from] midir::ConnectError<midir::MidiInput>),
    #[cfg(feature = "midir")]
    #[error(transparent)]
    ConnectOutput(#[from] midir::ConnectError<midir::MidiOutput>),
    #[cfg(feature = "midir")]
    #[error(transparent)]
    Send(#[from] midir::SendError),
}

impl MidiError {
    /// Whether the error means the device couldn't be found or acquired, as opposed to a failure
    /// while talking to an already acquired port.
    pub fn is_device_unavailable(&self) -> bool {
        match self {
            Self::NoPortFound { .. } | Self::ConnectFailed { .. } => true,
            #[cfg(feature = "midir")]
            Self::Init(_) | Self::PortInfo(_) | Self::ConnectInput(_) | Self::ConnectOutput(_) => {
                true
            }
            _ => false,
        }
    }
}

/// Signals about requests that were silently dropped instead of failing the caller.
///
/// The hardware ignores values it can't display, and so do we. These are handed to the
/// diagnostics hook of a [`Session`](crate::Session) and logged at debug level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The LED command addressed a button or color outside the family's domain
    OutOfRange { family: Family, command: LedCommand },
    /// The family doesn't know this mode command, or its argument was out of range
    ModeRejected { family: Family, command: ModeCommand },
    /// A pressure message was dropped because pressure reporting is off
    PressureDropped { family: Family, status: u8 },
}
