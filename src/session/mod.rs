//! A connection to one device.
//!
//! A [`Session`] finds the ports of its family by name, owns them while open and puts the device
//! into a usable mode. Everything that talks to the device goes through it; the encoding itself
//! is left to the [`Family`].

#[cfg(test)]
mod tests;

use std::{thread, time::Duration};

use crate::{
    midi_io::{drain_while, find_port, MidiInputHandle, MidiOutputHandle, MidiTransport},
    text::{render_char, scroll_frames, Font, ScrollDirection},
    Diagnostic, EncodeOptions, Family, InputEvent, Layout, LedColor, LedCommand, MidiError,
    ModeCommand, PortDirection, PortId, RawMessage, SessionConfig, WireMessage,
};

/// Consecutive empty polls after which the input counts as flushed
const FLUSH_EMPTY_POLLS: usize = 3;
const FLUSH_POLL_INTERVAL: Duration = Duration::from_millis(5);
/// Upper bound for one flush, so a device that keeps sending can't stall it
const FLUSH_MAX_MESSAGES: usize = 1024;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SessionState {
    Unopened,
    /// The ports were found, but not taken
    Checked,
    Opening,
    Open,
    Closing,
    /// Final; a closed session can't be opened again
    Closed,
}

type DiagnosticsHook<'t> = Box<dyn FnMut(&Diagnostic) + 't>;

pub struct Session<'t, T: MidiTransport> {
    family: Family,
    config: SessionConfig,
    transport: &'t T,
    input: Option<T::Input>,
    output: Option<T::Output>,
    state: SessionState,
    /// Last mode byte sent to the device
    mode: Option<u8>,
    template: u8,
    diagnostics: Option<DiagnosticsHook<'t>>,
}

impl<'t, T: MidiTransport> Session<'t, T> {
    pub fn new(family: Family, transport: &'t T, config: SessionConfig) -> Self {
        let template = config.template.clamp(1, 16);
        Self {
            family,
            config,
            transport,
            input: None,
            output: None,
            state: SessionState::Unopened,
            mode: None,
            template,
            diagnostics: None,
        }
    }

    /// Installs a hook that sees every request dropped as out of range
    pub fn with_diagnostics(mut self, hook: impl FnMut(&Diagnostic) + 't) -> Self {
        self.diagnostics = Some(Box::new(hook));
        self
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn mode(&self) -> Option<u8> {
        self.mode
    }

    pub fn template(&self) -> u8 {
        self.template
    }

    fn keywords(&self) -> Vec<&str> {
        match &self.config.port_name {
            Some(name) => vec![name.as_str()],
            None => self.family.descriptor().port_keywords.to_vec(),
        }
    }

    /// Tries every keyword in turn
    fn find(&self, direction: PortDirection) -> Result<Option<PortId>, MidiError> {
        for keyword in self.keywords() {
            let port = find_port(self.transport, keyword, direction, self.config.device_number)?;
            if port.is_some() {
                return Ok(port);
            }
        }
        Ok(None)
    }

    fn find_or_fail(&self, direction: PortDirection) -> Result<PortId, MidiError> {
        self.find(direction)?.ok_or_else(|| MidiError::NoPortFound {
            keyword: self.keywords().join(" / "),
        })
    }

    /// Looks for the device's input and output ports without opening them
    pub fn check(&mut self) -> Result<bool, MidiError> {
        if self.state == SessionState::Closed {
            return Err(MidiError::Closed);
        }
        let found = self.find(PortDirection::Output)?.is_some()
            && self.find(PortDirection::Input)?.is_some();
        log::debug!("{}: device {} present: {found}", self.family, self.config.device_number);
        if found && self.state == SessionState::Unopened {
            self.state = SessionState::Checked;
        }
        Ok(found)
    }

    /// Opens output and input port and puts the device into its working mode.
    ///
    /// If anything fails along the way, every port acquired so far is released again and the
    /// session is back to [`SessionState::Unopened`].
    pub fn open(&mut self) -> Result<(), MidiError> {
        match self.state {
            SessionState::Open => return Ok(()),
            SessionState::Closed => return Err(MidiError::Closed),
            _ => {}
        }

        self.state = SessionState::Opening;
        if let Err(e) = self.acquire().and_then(|()| self.initialize()) {
            log::debug!("{}: open failed, releasing ports: {e}", self.family);
            self.release();
            self.mode = None;
            self.state = SessionState::Unopened;
            return Err(e);
        }
        log::debug!("{}: open", self.family);
        Ok(())
    }

    fn acquire(&mut self) -> Result<(), MidiError> {
        let port = self.find_or_fail(PortDirection::Output)?;
        log::debug!("{}: opening output {:?}", self.family, port.name);
        self.output = Some(self.transport.open_output(&port)?);

        let port = self.find_or_fail(PortDirection::Input)?;
        log::debug!("{}: opening input {:?}", self.family, port.name);
        self.input = Some(self.transport.open_input(&port)?);

        self.state = SessionState::Open;
        Ok(())
    }

    fn initialize(&mut self) -> Result<(), MidiError> {
        let descriptor = self.family.descriptor();
        if descriptor.uses_templates {
            self.set_template(self.template)
        } else if let Some(mode) = descriptor.open_mode {
            self.set_mode(mode)
        } else {
            Ok(())
        }
    }

    fn release(&mut self) {
        if let Some(input) = self.input.take() {
            input.close();
        }
        if let Some(output) = self.output.take() {
            output.close();
        }
    }

    /// Restores the device's original mode where needed and releases the ports. Failures while
    /// restoring are logged, not returned.
    pub fn close(&mut self) {
        match self.state {
            SessionState::Closed => return,
            SessionState::Open => {
                self.state = SessionState::Closing;
                if let Some(mode) = self.family.descriptor().restore_mode {
                    if let Err(e) = self.send_mode_switch(ModeCommand::Mode(mode)) {
                        log::warn!("{}: couldn't restore mode {mode}: {e}", self.family);
                    }
                }
            }
            _ => {}
        }
        self.release();
        self.state = SessionState::Closed;
        log::debug!("{}: closed", self.family);
    }

    fn ensure_open(&self) -> Result<(), MidiError> {
        match self.state {
            SessionState::Open | SessionState::Closing => Ok(()),
            SessionState::Closed => Err(MidiError::Closed),
            _ => Err(MidiError::NotOpen),
        }
    }

    fn output(&mut self) -> Result<&mut T::Output, MidiError> {
        self.ensure_open()?;
        self.output.as_mut().ok_or(MidiError::NotOpen)
    }

    fn input(&mut self) -> Result<&mut T::Input, MidiError> {
        self.ensure_open()?;
        self.input.as_mut().ok_or(MidiError::NotOpen)
    }

    fn write_all(&mut self, messages: &[WireMessage]) -> Result<(), MidiError> {
        let output = self.output()?;
        for message in messages {
            output.write(message)?;
        }
        Ok(())
    }

    fn diagnose(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}: dropped request: {diagnostic:?}", self.family);
        if let Some(hook) = &mut self.diagnostics {
            hook(&diagnostic);
        }
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            layout: self.config.layout,
            template: self.template,
        }
    }

    /// Sends an LED command. Commands the family can't express are dropped and reported to the
    /// diagnostics hook.
    pub fn send_led(&mut self, command: &LedCommand) -> Result<(), MidiError> {
        self.send_led_with(command, self.encode_options())
    }

    fn send_led_with(
        &mut self,
        command: &LedCommand,
        options: EncodeOptions,
    ) -> Result<(), MidiError> {
        self.ensure_open()?;
        let messages = self.family.encode_led(command, options);
        if messages.is_empty() {
            self.diagnose(Diagnostic::OutOfRange {
                family: self.family,
                command: *command,
            });
            return Ok(());
        }
        self.write_all(&messages)
    }

    fn send_mode_switch(&mut self, command: ModeCommand) -> Result<bool, MidiError> {
        let Some(switch) = self.family.encode_mode_switch(command) else {
            self.diagnose(Diagnostic::ModeRejected {
                family: self.family,
                command,
            });
            return Ok(false);
        };
        self.output()?.write(&switch.message)?;
        if !switch.settle.is_zero() {
            thread::sleep(switch.settle);
        }
        Ok(true)
    }

    /// Sends any mode command and remembers the mode or template it selects
    pub fn send_mode(&mut self, command: ModeCommand) -> Result<(), MidiError> {
        self.ensure_open()?;
        if self.send_mode_switch(command)? {
            match command {
                ModeCommand::Mode(mode) => self.mode = Some(mode),
                ModeCommand::Template(template) => self.template = template,
                _ => {}
            }
        }
        Ok(())
    }

    pub fn set_mode(&mut self, mode: u8) -> Result<(), MidiError> {
        self.send_mode(ModeCommand::Mode(mode))
    }

    pub fn set_layout(&mut self, layout: u8) -> Result<(), MidiError> {
        self.send_mode(ModeCommand::Layout(layout))
    }

    pub fn set_template(&mut self, template: u8) -> Result<(), MidiError> {
        self.send_mode(ModeCommand::Template(template))
    }

    /// Turns all LEDs off, and resets the device where it supports that
    pub fn reset(&mut self) -> Result<(), MidiError> {
        let messages = self.family.encode_reset(self.template);
        self.write_all(&messages)
    }

    /// Whether input is waiting. Doesn't block.
    pub fn button_changed(&mut self) -> Result<bool, MidiError> {
        Ok(self.input()?.poll())
    }

    /// The next message as it came from the device
    pub fn event_raw(&mut self) -> Result<Option<RawMessage>, MidiError> {
        self.input()?.read_one()
    }

    /// The next decoded event, or `None` if no input is waiting.
    ///
    /// Unless pressure reporting is on, runs of pressure messages are skipped up to the next
    /// message of another kind.
    pub fn next_event(&mut self) -> Result<Option<InputEvent>, MidiError> {
        let family = self.family;
        let layout = self.config.layout;
        let return_pressure = self.config.return_pressure;

        let input = self.input()?;
        let Some(mut msg) = input.read_one()? else {
            return Ok(None);
        };

        if !return_pressure && family.is_pressure_status(msg.status) {
            let mut dropped = Vec::new();
            let next = drain_while(
                input,
                msg,
                |msg| family.is_pressure_status(msg.status),
                |msg| dropped.push(msg.status),
            )?;
            for status in dropped {
                self.diagnose(Diagnostic::PressureDropped { family, status });
            }
            msg = match next {
                Some(msg) => msg,
                None => return Ok(None),
            };
        }

        Ok(Some(family.decode_raw_event(&msg, layout)))
    }

    /// Discards buffered input, e.g. presses queued up while nobody was listening. Returns the
    /// number of discarded messages.
    pub fn flush_input(&mut self) -> Result<usize, MidiError> {
        let input = self.input()?;
        let mut discarded = 0;
        let mut empty_polls = 0;
        while empty_polls < FLUSH_EMPTY_POLLS && discarded < FLUSH_MAX_MESSAGES {
            if input.poll() && input.read_one()?.is_some() {
                discarded += 1;
                empty_polls = 0;
            } else {
                empty_polls += 1;
                thread::sleep(FLUSH_POLL_INTERVAL);
            }
        }
        log::debug!("{}: flushed {discarded} input messages", self.family);
        Ok(discarded)
    }

    /// Draws a character on the 8x8 grid, shifted sideways by `offset` (-8..=8). The grid is the
    /// same whatever layout the session uses.
    pub fn show_char(
        &mut self,
        font: &Font<'_>,
        ch: char,
        color: LedColor,
        offset: i8,
    ) -> Result<(), MidiError> {
        self.ensure_open()?;
        // Text cells are classic coordinates
        let options = EncodeOptions {
            layout: Layout::Classic,
            ..self.encode_options()
        };
        for command in render_char(self.family, font, ch, offset, color, LedColor::OFF) {
            self.send_led_with(&command, options)?;
        }
        Ok(())
    }

    /// Shows `text` frame by frame, waiting the configured text delay after every frame
    pub fn scroll_text(
        &mut self,
        font: &Font<'_>,
        text: &str,
        color: LedColor,
        direction: ScrollDirection,
    ) -> Result<(), MidiError> {
        self.ensure_open()?;
        if self.family.descriptor().text_origin.is_none() {
            log::debug!("{}: no grid to show text on", self.family);
            return Ok(());
        }
        for frame in scroll_frames(text, direction) {
            for placement in frame {
                self.show_char(font, placement.ch, color, placement.offset)?;
            }
            thread::sleep(self.config.text_delay);
        }
        Ok(())
    }
}

impl<T: MidiTransport> Drop for Session<'_, T> {
    fn drop(&mut self) {
        if self.state == SessionState::Open {
            self.close();
        }
    }
}

impl<T: MidiTransport> std::fmt::Debug for Session<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("family", &self.family)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
