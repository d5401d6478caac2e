/*!
# Novation Dicer

A master and an optional slave unit, each with five big buttons and three page buttons (hot cue,
loop, auto loop). Holding a page button shifts the big buttons by 5.

Raw numbers are 1..=10 on the first page, 11..=20 on the second and 21..=30 on the third; the
slave adds 100. In X/Y, `x` is the button within its page and `y` the page, the slave's pages
being `y = 3..=5`.

LEDs take a hue (0..=7, red to green) and an intensity (0..=15), packed with
[`pack_hue_intensity`](crate::color::pack_hue_intensity).
*/

use std::time::Duration;

use crate::{
    color::{clamp_code, pack_hue_intensity},
    family::{
        to_raw_command, ColorDepth, FamilyCodec, FamilyDescriptor, PressureReporting,
        CLASSIC_ONLY,
    },
    EncodeOptions, InputEvent, Layout, LedCommand, ModeCommand, ModeSwitch, RawMessage,
    WireMessage, Xy,
};

pub static DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    name: "Dicer",
    port_keywords: &["Dicer"],
    sysex_header: None,
    xy_bounds: Some((10, 6)),
    color_depth: ColorDepth::HueIntensity,
    pressure: PressureReporting::None,
    layouts: CLASSIC_ONLY,
    open_mode: None,
    restore_mode: None,
    mode_settle: Duration::ZERO,
    uses_templates: false,
    text_origin: None,
};

// One status per page
const MASTER: u8 = 0x9A;
const SLAVE: u8 = 0x9D;

// Control messages for the master and the slave unit
const MASTER_CONTROL: u8 = 0xBA;
const SLAVE_CONTROL: u8 = 0xBD;

const FIRST_NOTE: u8 = 60;
const SLAVE_OFFSET: u8 = 100;

const SELECT_MODE: u8 = 17;
const LIGHT_SHOW_ON: u8 = 40;
const LIGHT_SHOW_OFF: u8 = 41;
const ALL_OFF: u8 = 112;

#[doc(hidden)]
pub struct Spec;

/// Splits a raw number into the status of its page and the note
fn raw_to_note(raw: u8) -> Option<(u8, u8)> {
    let (status, number) = match raw {
        1..=30 => (MASTER, raw),
        101..=130 => (SLAVE, raw - SLAVE_OFFSET),
        _ => return None,
    };
    let page = (number - 1) / 10;
    Some((status + page, number - 10 * page - 1 + FIRST_NOTE))
}

fn control_status(device: u8) -> Option<u8> {
    match device {
        0 => Some(MASTER_CONTROL),
        1 => Some(SLAVE_CONTROL),
        _ => None,
    }
}

impl FamilyCodec for Spec {
    fn descriptor(&self) -> &'static FamilyDescriptor {
        &DESCRIPTOR
    }

    fn raw_to_xy(&self, raw: u8, _layout: Layout) -> Option<Xy> {
        let (number, slave) = match raw {
            1..=30 => (raw, 0),
            101..=130 => (raw - SLAVE_OFFSET, 1),
            _ => return None,
        };
        Some(Xy::new((number - 1) % 10, (number - 1) / 10 + 3 * slave))
    }

    fn xy_candidate(&self, xy: Xy, _layout: Layout) -> Option<u8> {
        if xy.x > 9 || xy.y > 5 {
            return None;
        }
        let slave = if xy.y >= 3 { SLAVE_OFFSET } else { 0 };
        Some(slave + (xy.y % 3) * 10 + xy.x + 1)
    }

    fn decode(&self, msg: &RawMessage, layout: Layout) -> InputEvent {
        let (page, offset) = match msg.status {
            MASTER..=0x9C => (msg.status - MASTER, 0),
            SLAVE..=0x9F => (msg.status - SLAVE, SLAVE_OFFSET),
            _ => return InputEvent::Unrecognized,
        };
        if !(FIRST_NOTE..FIRST_NOTE + 10).contains(&msg.data1) {
            return InputEvent::Unrecognized;
        }
        let raw = msg.data1 - FIRST_NOTE + 1 + 10 * page + offset;
        // Releases come as note on with a lower velocity
        let pressed = msg.data2 == 127;
        self.button(raw, pressed, if pressed { 127 } else { 0 }, layout)
    }

    fn encode_led(&self, command: &LedCommand, options: EncodeOptions) -> Vec<WireMessage> {
        let light = |index, color| match raw_to_note(index) {
            Some((status, note)) => vec![WireMessage::short(status, note, color)],
            None => Vec::new(),
        };

        match to_raw_command(self, command, options.layout) {
            Some(LedCommand::RawByCode { index, colorcode }) => light(index, clamp_code(colorcode)),
            // Red is read as the hue, green as the intensity
            Some(LedCommand::RawRgb { index, r, g, .. }) => light(index, pack_hue_intensity(r, g)),
            Some(LedCommand::AllOff) => vec![WireMessage::short(MASTER_CONTROL, 0, ALL_OFF)],
            _ => Vec::new(),
        }
    }

    fn encode_mode(&self, command: ModeCommand) -> Option<ModeSwitch> {
        let message = match command {
            ModeCommand::DicerMode { device, mode } if mode <= 6 => {
                WireMessage::short(control_status(device)?, SELECT_MODE, mode)
            }
            ModeCommand::DicerLightShow { device, enable } => WireMessage::short(
                control_status(device)?,
                0,
                if enable { LIGHT_SHOW_ON } else { LIGHT_SHOW_OFF },
            ),
            _ => return None,
        };
        Some(ModeSwitch {
            message,
            settle: Duration::ZERO,
        })
    }

    /// Restores the power-on state, but leaves a running light show alone
    fn encode_reset(&self, _template: u8) -> Vec<WireMessage> {
        vec![WireMessage::short(MASTER_CONTROL, 0, 0)]
    }
}
