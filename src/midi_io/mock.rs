//! An in-memory transport. Ports are declared up front, input is scripted, and everything written
//! is recorded, which makes sessions testable without hardware.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use super::{MidiInputHandle, MidiOutputHandle, MidiTransport, PortDirection, PortId, RawMessage};
use crate::{util::name_matches, MidiError, WireMessage};

#[derive(Debug, Default)]
struct MockState {
    ports: Vec<(String, PortDirection)>,
    input: VecDeque<RawMessage>,
    written: Vec<WireMessage>,
    open_inputs: usize,
    open_outputs: usize,
    refuse: Vec<PortDirection>,
    fail_writes: bool,
    phantom_input: bool,
}

/// Cloning yields another handle onto the same mock devices.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport with one device that has an input and an output port called `name`
    pub fn with_device(name: &str) -> Self {
        let transport = Self::new();
        transport.add_device(name);
        transport
    }

    pub fn add_device(&self, name: &str) {
        self.add_port(name, PortDirection::Input);
        self.add_port(name, PortDirection::Output);
    }

    pub fn add_port(&self, name: &str, direction: PortDirection) {
        self.state
            .borrow_mut()
            .ports
            .push((name.to_owned(), direction));
    }

    /// Makes every following attempt to open a port of this direction fail
    pub fn refuse_connections(&self, direction: PortDirection) {
        self.state.borrow_mut().refuse.push(direction);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Makes input ports claim a message is waiting while reads come back empty
    pub fn phantom_input(&self, phantom: bool) {
        self.state.borrow_mut().phantom_input = phantom;
    }

    /// Queues a message for the input ports to read
    pub fn push_input(&self, msg: RawMessage) {
        self.state.borrow_mut().input.push_back(msg);
    }

    /// Everything written to output ports so far
    pub fn written(&self) -> Vec<WireMessage> {
        self.state.borrow().written.clone()
    }

    pub fn take_written(&self) -> Vec<WireMessage> {
        std::mem::take(&mut self.state.borrow_mut().written)
    }

    /// Number of currently open input and output handles
    pub fn open_handles(&self) -> (usize, usize) {
        let state = self.state.borrow();
        (state.open_inputs, state.open_outputs)
    }

    fn check_connect(&self, port: &PortId) -> Result<(), MidiError> {
        let state = self.state.borrow();
        let known = state
            .ports
            .iter()
            .any(|(name, direction)| *name == port.name && *direction == port.direction);
        if !known || state.refuse.contains(&port.direction) {
            return Err(MidiError::ConnectFailed {
                port: port.name.clone(),
            });
        }
        Ok(())
    }
}

impl MidiTransport for MockTransport {
    type Input = MockInput;
    type Output = MockOutput;

    fn list_ports(
        &self,
        name_filter: &str,
        want_input: bool,
        want_output: bool,
    ) -> Result<Vec<PortId>, MidiError> {
        let state = self.state.borrow();
        let mut found = Vec::new();
        for (direction, wanted) in [
            (PortDirection::Input, want_input),
            (PortDirection::Output, want_output),
        ] {
            if !wanted {
                continue;
            }
            let ports = state.ports.iter().filter(|(_, d)| *d == direction);
            for (index, (name, _)) in ports.enumerate() {
                if name_matches(name, name_filter) {
                    found.push(PortId {
                        index,
                        name: name.clone(),
                        direction,
                    });
                }
            }
        }
        Ok(found)
    }

    fn open_output(&self, port: &PortId) -> Result<MockOutput, MidiError> {
        self.check_connect(port)?;
        self.state.borrow_mut().open_outputs += 1;
        Ok(MockOutput {
            state: Rc::clone(&self.state),
        })
    }

    fn open_input(&self, port: &PortId) -> Result<MockInput, MidiError> {
        self.check_connect(port)?;
        self.state.borrow_mut().open_inputs += 1;
        Ok(MockInput {
            state: Rc::clone(&self.state),
        })
    }
}

#[derive(Debug)]
pub struct MockOutput {
    state: Rc<RefCell<MockState>>,
}

impl MidiOutputHandle for MockOutput {
    fn write_short(&mut self, status: u8, data1: u8, data2: u8) -> Result<(), MidiError> {
        self.record(WireMessage::short(status, data1, data2))
    }

    fn write_sysex(&mut self, frame: &[u8], _timestamp: u64) -> Result<(), MidiError> {
        self.record(WireMessage::SysEx(frame.to_vec()))
    }
}

impl MockOutput {
    fn record(&mut self, message: WireMessage) -> Result<(), MidiError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(MidiError::Transport {
                msg: "mock output refused the write".to_owned(),
            });
        }
        state.written.push(message);
        Ok(())
    }
}

impl Drop for MockOutput {
    fn drop(&mut self) {
        self.state.borrow_mut().open_outputs -= 1;
    }
}

#[derive(Debug)]
pub struct MockInput {
    state: Rc<RefCell<MockState>>,
}

impl MidiInputHandle for MockInput {
    fn poll(&mut self) -> bool {
        let state = self.state.borrow();
        state.phantom_input || !state.input.is_empty()
    }

    fn read_one(&mut self) -> Result<Option<RawMessage>, MidiError> {
        Ok(self.state.borrow_mut().input.pop_front())
    }
}

impl Drop for MockInput {
    fn drop(&mut self) {
        self.state.borrow_mut().open_inputs -= 1;
    }
}
