//! Hardware ports through [`midir`].
//!
//! Input arrives on midir's callback thread and is queued on a channel until the session polls
//! for it.

use std::sync::mpsc::{self, Receiver, TryRecvError};

use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};

use super::{MidiInputHandle, MidiOutputHandle, MidiTransport, PortDirection, PortId, RawMessage};
use crate::{ok_or_continue, util::name_matches, MidiError};

pub struct MidirTransport {
    client_name: String,
}

impl MidirTransport {
    pub fn new() -> Self {
        Self::with_client_name(crate::APPLICATION_NAME)
    }

    /// The client name shows up in the port lists of other MIDI applications
    pub fn with_client_name(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }
}

impl Default for MidirTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn list<T: midir::MidiIO>(
    midi_io: &T,
    name_filter: &str,
    direction: PortDirection,
    found: &mut Vec<PortId>,
) {
    for (index, port) in midi_io.ports().iter().enumerate() {
        let name = ok_or_continue!(midi_io.port_name(port));
        if name_matches(&name, name_filter) {
            found.push(PortId {
                index,
                name,
                direction,
            });
        }
    }
}

/// Looks the port up again; the enumeration may have changed since it was listed
fn resolve<T: midir::MidiIO>(midi_io: &T, port: &PortId) -> Result<T::Port, MidiError> {
    midi_io
        .ports()
        .into_iter()
        .nth(port.index)
        .filter(|candidate| {
            midi_io
                .port_name(candidate)
                .map_or(false, |name| name == port.name)
        })
        .ok_or_else(|| MidiError::ConnectFailed {
            port: port.name.clone(),
        })
}

impl MidiTransport for MidirTransport {
    type Input = MidirInput;
    type Output = MidirOutput;

    fn list_ports(
        &self,
        name_filter: &str,
        want_input: bool,
        want_output: bool,
    ) -> Result<Vec<PortId>, MidiError> {
        let mut found = Vec::new();
        if want_input {
            let midi_input = MidiInput::new(&self.client_name)?;
            list(&midi_input, name_filter, PortDirection::Input, &mut found);
        }
        if want_output {
            let midi_output = MidiOutput::new(&self.client_name)?;
            list(&midi_output, name_filter, PortDirection::Output, &mut found);
        }
        log::debug!("Ports matching {name_filter:?}: {found:?}");
        Ok(found)
    }

    fn open_output(&self, port: &PortId) -> Result<MidirOutput, MidiError> {
        let midi_output = MidiOutput::new(&self.client_name)?;
        let midir_port = resolve(&midi_output, port)?;
        let connection = midi_output.connect(&midir_port, &format!("{} output", self.client_name))?;
        Ok(MidirOutput { connection })
    }

    fn open_input(&self, port: &PortId) -> Result<MidirInput, MidiError> {
        let mut midi_input = MidiInput::new(&self.client_name)?;
        midi_input.ignore(Ignore::TimeAndActiveSense);
        let midir_port = resolve(&midi_input, port)?;

        let (sender, receiver) = mpsc::channel();
        let connection = midi_input.connect(
            &midir_port,
            &format!("{} input", self.client_name),
            move |timestamp, data, _| {
                log::trace!("Received MIDI input: {timestamp} {data:02x?}");
                if let Some(msg) = RawMessage::from_bytes(timestamp, data) {
                    // Fails only once the session has dropped the receiver
                    let _ = sender.send(msg);
                }
            },
            (),
        )?;

        Ok(MidirInput {
            connection,
            receiver,
            pending: None,
        })
    }
}

pub struct MidirOutput {
    connection: MidiOutputConnection,
}

impl MidiOutputHandle for MidirOutput {
    fn write_short(&mut self, status: u8, data1: u8, data2: u8) -> Result<(), MidiError> {
        self.connection.send(&[status, data1, data2])?;
        Ok(())
    }

    fn write_sysex(&mut self, frame: &[u8], _timestamp: u64) -> Result<(), MidiError> {
        self.connection.send(frame)?;
        Ok(())
    }

    fn close(self) {
        self.connection.close();
    }
}

pub struct MidirInput {
    connection: MidiInputConnection<()>,
    receiver: Receiver<RawMessage>,
    // A message taken off the channel by `poll`
    pending: Option<RawMessage>,
}

impl MidiInputHandle for MidirInput {
    fn poll(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.receiver.try_recv().ok();
        }
        self.pending.is_some()
    }

    fn read_one(&mut self) -> Result<Option<RawMessage>, MidiError> {
        if let Some(msg) = self.pending.take() {
            return Ok(Some(msg));
        }
        match self.receiver.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(MidiError::Transport {
                msg: "MIDI input callback has hung up".to_owned(),
            }),
        }
    }

    fn close(self) {
        self.connection.close();
    }
}
