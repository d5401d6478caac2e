//! The MIDI port capability the sessions are built on.
//!
//! A [`MidiTransport`] enumerates ports and opens them. The handles it hands out are owned by
//! exactly one session and released when closed or dropped.

#[cfg(feature = "midir")]
pub mod midir;

pub mod mock;

use crate::{util::name_matches, MidiError, WireMessage};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

/// A port as found during enumeration
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PortId {
    /// Position in the transport's enumeration of ports of this direction
    pub index: usize,
    pub name: String,
    pub direction: PortDirection,
}

/// A short message as read from an input port. Missing data bytes read as zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawMessage {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
    /// Microseconds, as reported by the transport
    pub timestamp: u64,
}

impl RawMessage {
    pub fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self {
            status,
            data1,
            data2,
            timestamp: 0,
        }
    }

    /// Returns `None` for an empty read
    pub fn from_bytes(timestamp: u64, bytes: &[u8]) -> Option<Self> {
        let (&status, rest) = bytes.split_first()?;
        Some(Self {
            status,
            data1: rest.first().copied().unwrap_or(0),
            data2: rest.get(1).copied().unwrap_or(0),
            timestamp,
        })
    }

    pub fn bytes(&self) -> [u8; 3] {
        [self.status, self.data1, self.data2]
    }
}

pub trait MidiTransport {
    type Input: MidiInputHandle;
    type Output: MidiOutputHandle;

    /// Lists the ports whose name contains `name_filter`, ignoring case. An empty filter lists
    /// every port. Input ports come before output ports.
    fn list_ports(
        &self,
        name_filter: &str,
        want_input: bool,
        want_output: bool,
    ) -> Result<Vec<PortId>, MidiError>;

    fn open_output(&self, port: &PortId) -> Result<Self::Output, MidiError>;

    fn open_input(&self, port: &PortId) -> Result<Self::Input, MidiError>;
}

pub trait MidiOutputHandle {
    fn write_short(&mut self, status: u8, data1: u8, data2: u8) -> Result<(), MidiError>;

    /// Sends a complete SysEx frame. A timestamp of 0 means "now".
    fn write_sysex(&mut self, frame: &[u8], timestamp: u64) -> Result<(), MidiError>;

    fn write(&mut self, message: &WireMessage) -> Result<(), MidiError> {
        log::trace!("Sending MIDI output: {:02x?}", message.bytes());
        match message {
            WireMessage::Short([status, data1, data2]) => {
                self.write_short(*status, *data1, *data2)
            }
            WireMessage::SysEx(frame) => self.write_sysex(frame, 0),
        }
    }

    /// Releases the port
    fn close(self)
    where
        Self: Sized,
    {
    }
}

pub trait MidiInputHandle {
    /// Whether a message is waiting. Doesn't block.
    fn poll(&mut self) -> bool;

    /// Takes the next waiting message, or `None` if there is none
    fn read_one(&mut self) -> Result<Option<RawMessage>, MidiError>;

    /// Releases the port
    fn close(self)
    where
        Self: Sized,
    {
    }
}

/// Finds the `number`th port of a direction whose name contains `keyword`
pub fn find_port<T: MidiTransport + ?Sized>(
    transport: &T,
    keyword: &str,
    direction: PortDirection,
    number: usize,
) -> Result<Option<PortId>, MidiError> {
    let ports = transport.list_ports(
        keyword,
        direction == PortDirection::Input,
        direction == PortDirection::Output,
    )?;
    Ok(ports
        .into_iter()
        .filter(|port| port.direction == direction && name_matches(&port.name, keyword))
        .nth(number))
}

/// Skips messages matching `predicate`, starting with `first`.
///
/// Returns the first message that doesn't match, or `None` if the input ran dry before one
/// arrived. `on_skip` sees every skipped message.
pub fn drain_while<I: MidiInputHandle + ?Sized>(
    input: &mut I,
    first: RawMessage,
    predicate: impl Fn(&RawMessage) -> bool,
    mut on_skip: impl FnMut(&RawMessage),
) -> Result<Option<RawMessage>, MidiError> {
    let mut msg = first;
    while predicate(&msg) {
        on_skip(&msg);
        msg = match input.read_one()? {
            Some(next) => next,
            None => return Ok(None),
        };
    }
    Ok(Some(msg))
}
