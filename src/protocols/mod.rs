//! The values that flow through the codec: decoded input events, LED and mode requests, and the
//! wire messages they turn into.

use std::time::Duration;

use crate::LedColor;

pub mod double_buffering;

/// Added to a button number to mark a pressure value, so pressure and button numbers never share
/// a value in the legacy list encoding.
pub const PRESSURE_OFFSET: u16 = 255;

/// An X/Y coordinate. The origin is the top left button of the device, including the top row of
/// control buttons if the device has one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xy {
    pub x: u8,
    pub y: u8,
}

impl Xy {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl From<(u8, u8)> for Xy {
    fn from((x, y): (u8, u8)) -> Self {
        Self { x, y }
    }
}

/// How X/Y coordinates map onto the raw numbers of a decade-numbered Launchpad.
///
/// `Classic` puts the left column of side buttons at `x = 9`, so the 8x8 grid starts at `x = 0`
/// like on the older Launchpads. `Pro` keeps the device's own column order, putting the left
/// column at `x = 0`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Layout {
    #[default]
    Classic,
    Pro,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ButtonEvent {
    /// The family's raw number for the button
    pub raw: u8,
    /// The coordinate of the button, if the family maps it onto its X/Y grid
    pub xy: Option<Xy>,
    pub pressed: bool,
    pub velocity: u8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PressureTarget {
    /// Channel pressure: the device reports one value for all pads
    Channel,
    /// Polyphonic pressure on a single pad
    Button { raw: u8, xy: Option<Xy> },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PressureEvent {
    pub target: PressureTarget,
    pub value: u8,
}

impl PressureEvent {
    /// The target as a single number: `255` for channel pressure, `255 + raw` for a pad.
    pub fn legacy_raw(&self) -> u16 {
        match self.target {
            PressureTarget::Channel => PRESSURE_OFFSET,
            PressureTarget::Button { raw, .. } => PRESSURE_OFFSET + raw as u16,
        }
    }

    /// The target as a coordinate pair: `(255, 255)` for channel pressure, `(x + 255, y + 255)`
    /// for a pad.
    pub fn legacy_xy(&self) -> Option<(u16, u16)> {
        match self.target {
            PressureTarget::Channel => Some((PRESSURE_OFFSET, PRESSURE_OFFSET)),
            PressureTarget::Button { xy, .. } => {
                xy.map(|xy| (PRESSURE_OFFSET + xy.x as u16, PRESSURE_OFFSET + xy.y as u16))
            }
        }
    }
}

/// A decoded input message
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum InputEvent {
    Button(ButtonEvent),
    Pressure(PressureEvent),
    /// A knob or fader moved
    Potentiometer {
        index: u8,
        value: u8,
    },
    /// A well-formed message that this family doesn't assign any meaning to
    Unrecognized,
}

impl InputEvent {
    pub fn as_button(&self) -> Option<&ButtonEvent> {
        match self {
            Self::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn is_press(&self) -> bool {
        matches!(self, Self::Button(ButtonEvent { pressed: true, .. }))
    }
}

/// A request to light one or more LEDs.
///
/// Whatever a family can't express or address is dropped without producing wire bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LedCommand {
    /// Light a button by raw number with a palette code (or a pre-packed color byte)
    RawByCode { index: u8, colorcode: u8 },
    /// Light a button by raw number with an RGB color. Without blue, red and green are 2-bit.
    RawRgb { index: u8, r: u8, g: u8, b: Option<u8> },
    Xy { x: u8, y: u8, color: LedColor },
    /// Light every LED. A code of 0 turns everything off.
    AllOn { colorcode: u8 },
    /// Pulse a button between the code and black
    Pulse { index: u8, colorcode: u8 },
    /// Flash a button between the code and black
    Flash { index: u8, colorcode: u8 },
    PulseXy { x: u8, y: u8, colorcode: u8 },
    FlashXy { x: u8, y: u8, colorcode: u8 },
    /// Midi Fighter LED animation: `mode` is one of the brightness, toggle, pulse or animation
    /// slots (18..=53)
    RawMode { index: u8, mode: u8 },
    /// Midi Fighter color and animation mode in one go. A mode outside 18..=53 only sets the
    /// color.
    RawWithMode { index: u8, colorcode: u8, mode: u8 },
    XyWithMode { x: u8, y: u8, colorcode: u8, mode: u8 },
    /// Every LED in one color and animation mode (Midi Fighter)
    AllOnWithMode { colorcode: u8, mode: u8 },
    /// Turn all LEDs off (Dicer)
    AllOff,
}

impl LedCommand {
    pub fn xy(x: u8, y: u8, color: impl Into<LedColor>) -> Self {
        Self::Xy {
            x,
            y,
            color: color.into(),
        }
    }
}

/// One message on the wire
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum WireMessage {
    /// A three byte channel message
    Short([u8; 3]),
    /// A complete system exclusive frame, `F0` to `F7`
    SysEx(Vec<u8>),
}

impl WireMessage {
    pub fn short(status: u8, data1: u8, data2: u8) -> Self {
        Self::Short([status, data1, data2])
    }

    /// Frames `payload` behind a 5 byte Novation header (`00 20 29 02 <model>`)
    pub fn sysex(header: &[u8], payload: &[u8]) -> Self {
        let mut frame = Vec::with_capacity(header.len() + payload.len() + 2);
        frame.push(0xF0);
        frame.extend_from_slice(header);
        frame.extend_from_slice(payload);
        frame.push(0xF7);
        Self::SysEx(frame)
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Short(bytes) => bytes,
            Self::SysEx(frame) => frame,
        }
    }
}

/// A change of device mode or configuration
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ModeCommand {
    /// Select the device mode, e.g. Live (0) or Programmer (1) on the Mk3 generation
    Mode(u8),
    /// Select a button layout
    Layout(u8),
    /// Select a Launch Control template, 1..=16
    Template(u8),
    Brightness(u8),
    Sleep(bool),
    /// Set the multiplexing duty cycle of the original Launchpads, numerator 1..=16 and
    /// denominator 3..=18
    DutyCycle { numerator: u8, denominator: u8 },
    DoubleBuffering(double_buffering::DoubleBuffering),
    /// Select one of the seven Dicer modes on the master (0) or slave (1) unit
    DicerMode { device: u8, mode: u8 },
    DicerLightShow { device: u8, enable: bool },
}

/// An encoded mode change, together with the time the device needs before it accepts the next
/// message
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ModeSwitch {
    pub message: WireMessage,
    pub settle: Duration,
}

/// Session state the encoder depends on
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct EncodeOptions {
    pub layout: Layout,
    /// The active Launch Control template, 1..=16
    pub template: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Classic,
            template: 1,
        }
    }
}
