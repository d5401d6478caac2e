//! The supported device families and what they have in common.
//!
//! Every family implements [`FamilyCodec`] in its own module. [`Family`] is the tag used
//! everywhere else, and forwards to the codec.


use std::time::Duration;

use strum::EnumIter;

use crate::{
    dicer, launch_control, launchkey, launchpad_mk1, launchpad_mk2, launchpad_mk3, launchpad_pro,
    midi_fighter, shared::confirm_xy, ButtonEvent, EncodeOptions, InputEvent, Layout, LedColor,
    LedCommand, ModeCommand, ModeSwitch, RawMessage, WireMessage, Xy,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColorDepth {
    /// Red and green with 2 bits each
    TwoBit,
    /// 6-bit RGB or a palette code
    SixBit,
    /// 6-bit RGB shifted into 7 bits, or a palette code
    SixBitExtended,
    /// 7-bit palette codes only
    Palette,
    /// Hue and intensity
    HueIntensity,
    /// No LEDs under control
    None,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PressureReporting {
    None,
    /// One value for the whole device, status `0xD0`
    Channel,
    /// One value per pad, status `0xA0`
    Polyphonic,
}

impl PressureReporting {
    pub fn status(self) -> Option<u8> {
        match self {
            Self::None => None,
            Self::Channel => Some(0xD0),
            Self::Polyphonic => Some(0xA0),
        }
    }
}

/// Static facts about a family
#[derive(Debug)]
pub struct FamilyDescriptor {
    pub name: &'static str,
    /// Searched for in port names, in this order, ignoring case
    pub port_keywords: &'static [&'static str],
    /// `00 20 29 02 <model>` for Novation devices that take SysEx
    pub sysex_header: Option<[u8; 5]>,
    /// Width and height of the X/Y bounding box
    pub xy_bounds: Option<(u8, u8)>,
    pub color_depth: ColorDepth,
    pub pressure: PressureReporting,
    pub layouts: &'static [Layout],
    /// Mode selected right after opening
    pub open_mode: Option<u8>,
    /// Mode restored before closing, so the device doesn't stay in programmer mode
    pub restore_mode: Option<u8>,
    /// How long the device needs after a mode change
    pub mode_settle: Duration,
    pub uses_templates: bool,
    /// Top left cell of the 8x8 grid that text is drawn on
    pub text_origin: Option<Xy>,
}

pub(crate) const CLASSIC_ONLY: &[Layout] = &[Layout::Classic];
pub(crate) const BOTH_LAYOUTS: &[Layout] = &[Layout::Classic, Layout::Pro];

pub(crate) const fn novation_header(model: u8) -> [u8; 5] {
    [0x00, 0x20, 0x29, 0x02, model]
}

/// Protocol strategy of one family.
///
/// Decoding and encoding are pure: they only look at their arguments and never touch a port.
pub trait FamilyCodec: Sync {
    fn descriptor(&self) -> &'static FamilyDescriptor;

    /// Maps a raw button number to its coordinate. Only called with a supported layout.
    fn raw_to_xy(&self, raw: u8, layout: Layout) -> Option<Xy>;

    /// The raw number the forward formula gives for `xy`, before gap checking
    fn xy_candidate(&self, xy: Xy, layout: Layout) -> Option<u8>;

    fn decode(&self, msg: &RawMessage, layout: Layout) -> InputEvent;

    fn encode_led(&self, command: &LedCommand, options: EncodeOptions) -> Vec<WireMessage>;

    fn encode_mode(&self, _command: ModeCommand) -> Option<ModeSwitch> {
        None
    }

    fn encode_reset(&self, template: u8) -> Vec<WireMessage>;

    fn supports(&self, layout: Layout) -> bool {
        self.descriptor().layouts.contains(&layout)
    }

    fn xy_of(&self, raw: u8, layout: Layout) -> Option<Xy> {
        if !self.supports(layout) {
            return None;
        }
        self.raw_to_xy(raw, layout)
    }

    fn xy_to_raw(&self, xy: Xy, layout: Layout) -> Option<u8> {
        if !self.supports(layout) {
            return None;
        }
        confirm_xy(self.xy_candidate(xy, layout), xy, |raw| {
            self.raw_to_xy(raw, layout)
        })
    }

    fn button(&self, raw: u8, pressed: bool, velocity: u8, layout: Layout) -> InputEvent {
        InputEvent::Button(ButtonEvent {
            raw,
            xy: self.xy_of(raw, layout),
            pressed,
            velocity,
        })
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Family {
    /// Launchpad, Launchpad S and the first Launchpad Mini
    LaunchpadMk1,
    /// The first Launchpad Pro
    LaunchpadPro,
    LaunchpadMk2,
    LaunchpadMiniMk3,
    LaunchpadX,
    LaunchpadProMk3,
    LaunchControl,
    LaunchControlXl,
    LaunchkeyMini,
    Dicer,
    MidiFighter64,
    MidiFighter3d,
}

impl Family {
    pub fn codec(self) -> &'static dyn FamilyCodec {
        match self {
            Self::LaunchpadMk1 => &launchpad_mk1::Spec,
            Self::LaunchpadPro => &launchpad_pro::Spec,
            Self::LaunchpadMk2 => &launchpad_mk2::Spec,
            Self::LaunchpadMiniMk3 => &launchpad_mk3::MINI,
            Self::LaunchpadX => &launchpad_mk3::X,
            Self::LaunchpadProMk3 => &launchpad_mk3::PRO,
            Self::LaunchControl => &launch_control::CONTROL,
            Self::LaunchControlXl => &launch_control::CONTROL_XL,
            Self::LaunchkeyMini => &launchkey::Spec,
            Self::Dicer => &dicer::Spec,
            Self::MidiFighter64 => &midi_fighter::FIGHTER_64,
            Self::MidiFighter3d => &midi_fighter::FIGHTER_3D,
        }
    }

    pub fn descriptor(self) -> &'static FamilyDescriptor {
        self.codec().descriptor()
    }

    pub fn raw_to_xy(self, raw: u8, layout: Layout) -> Option<Xy> {
        self.codec().xy_of(raw, layout)
    }

    pub fn xy_to_raw(self, xy: Xy, layout: Layout) -> Option<u8> {
        self.codec().xy_to_raw(xy, layout)
    }

    /// Decodes one message. Both the raw number and the coordinate (in `layout`) of a button are
    /// filled in.
    pub fn decode_raw_event(self, msg: &RawMessage, layout: Layout) -> InputEvent {
        self.codec().decode(msg, layout)
    }

    /// Like [`Self::decode_raw_event`] for bytes straight off a port. An empty read decodes to
    /// `None`.
    pub fn decode_bytes(self, bytes: &[u8], timestamp: u64, layout: Layout) -> Option<InputEvent> {
        let msg = RawMessage::from_bytes(timestamp, bytes)?;
        Some(self.decode_raw_event(&msg, layout))
    }

    /// The wire messages for an LED request. An empty list means the request was out of range or
    /// not supported by this family.
    pub fn encode_led(self, command: &LedCommand, options: EncodeOptions) -> Vec<WireMessage> {
        self.codec().encode_led(command, options)
    }

    /// `None` if the family has no such mode, or the argument is out of range
    pub fn encode_mode_switch(self, command: ModeCommand) -> Option<ModeSwitch> {
        self.codec().encode_mode(command)
    }

    /// Turns all LEDs off and, where the device supports it, resets its configuration
    pub fn encode_reset(self, template: u8) -> Vec<WireMessage> {
        self.codec().encode_reset(template)
    }

    pub fn is_pressure_status(self, status: u8) -> bool {
        self.descriptor().pressure.status() == Some(status)
    }

    /// Raw number of a cell of the 8x8 text grid, `column` and `row` counted from the top left
    pub fn text_cell(self, column: u8, row: u8) -> Option<u8> {
        let origin = self.descriptor().text_origin?;
        if column > 7 || row > 7 {
            return None;
        }
        self.xy_to_raw(
            Xy::new(origin.x + column, origin.y + row),
            Layout::Classic,
        )
    }
}

/// Rewrites coordinate-addressed commands into their raw-number form. Raw commands pass through;
/// `None` if the coordinate isn't a button of the family.
pub(crate) fn to_raw_command<C: FamilyCodec + ?Sized>(
    codec: &C,
    command: &LedCommand,
    layout: Layout,
) -> Option<LedCommand> {
    let raw = |x, y| codec.xy_to_raw(Xy::new(x, y), layout);
    Some(match *command {
        LedCommand::Xy {
            x,
            y,
            color: LedColor::Code(colorcode),
        } => LedCommand::RawByCode {
            index: raw(x, y)?,
            colorcode,
        },
        LedCommand::Xy {
            x,
            y,
            color: LedColor::Rgb { r, g, b },
        } => LedCommand::RawRgb {
            index: raw(x, y)?,
            r,
            g,
            b,
        },
        LedCommand::PulseXy { x, y, colorcode } => LedCommand::Pulse {
            index: raw(x, y)?,
            colorcode,
        },
        LedCommand::FlashXy { x, y, colorcode } => LedCommand::Flash {
            index: raw(x, y)?,
            colorcode,
        },
        LedCommand::XyWithMode {
            x,
            y,
            colorcode,
            mode,
        } => LedCommand::RawWithMode {
            index: raw(x, y)?,
            colorcode,
            mode,
        },
        other => other,
    })
}

/// Builds the LED list for the families that send one note per LED
pub(crate) fn notes(
    status: u8,
    indices: impl IntoIterator<Item = u8>,
    value: u8,
) -> Vec<WireMessage> {
    indices
        .into_iter()
        .map(|index| WireMessage::short(status, index, value))
        .collect()
}
