use super::{Spec, HEADER, TOP_ROW};
use crate::{
    color::{clamp_code, resolve_rgb},
    family::to_raw_command,
    EncodeOptions, LedCommand, ModeCommand, ModeSwitch, WireMessage,
};

const SET_RGB: u8 = 11;
const SET_ALL: u8 = 14;
const FLASH: u8 = 35;
const PULSE: u8 = 40;
const SELECT_LAYOUT: u8 = 34;

/// 90..=103 aren't wired to anything
fn is_led(index: u8) -> bool {
    index <= 111 && !(90..TOP_ROW).contains(&index)
}

pub(super) fn all_on(colorcode: u8) -> Vec<WireMessage> {
    vec![WireMessage::sysex(&HEADER, &[SET_ALL, clamp_code(colorcode)])]
}

pub(super) fn encode_led(
    spec: &Spec,
    command: &LedCommand,
    options: EncodeOptions,
) -> Vec<WireMessage> {
    let Some(command) = to_raw_command(spec, command, options.layout) else {
        return Vec::new();
    };

    match command {
        LedCommand::RawByCode { index, colorcode } if is_led(index) => {
            let status = if index < TOP_ROW { 0x90 } else { 0xB0 };
            vec![WireMessage::short(status, index, clamp_code(colorcode))]
        }
        LedCommand::RawRgb { index, r, g, b } if is_led(index) => {
            let [r, g, b] = resolve_rgb(r, g, b);
            vec![WireMessage::sysex(&HEADER, &[SET_RGB, index, r, g, b])]
        }
        LedCommand::AllOn { colorcode } => all_on(colorcode),
        // Blinking is only addressable on the decade numbers
        LedCommand::Pulse { index, colorcode } if index <= 99 => {
            vec![WireMessage::sysex(&HEADER, &[PULSE, 0, index, clamp_code(colorcode)])]
        }
        LedCommand::Flash { index, colorcode } if index <= 99 => {
            vec![WireMessage::sysex(&HEADER, &[FLASH, 0, index, clamp_code(colorcode)])]
        }
        _ => Vec::new(),
    }
}

pub(super) fn encode_mode(command: ModeCommand) -> Option<ModeSwitch> {
    match command {
        // Session, User 1, User 2, reserved, Volume, Pan
        ModeCommand::Layout(layout @ 0..=5) => Some(ModeSwitch {
            message: WireMessage::sysex(&HEADER, &[SELECT_LAYOUT, layout]),
            settle: super::DESCRIPTOR.mode_settle,
        }),
        _ => None,
    }
}
