use super::{Spec, DESCRIPTOR, HEADER};
use crate::{
    color::{clamp_code, resolve_rgb},
    family::to_raw_command,
    EncodeOptions, LedCommand, ModeCommand, ModeSwitch, WireMessage,
};

const MAX_INDEX: u8 = 99;

// SysEx commands
const SET_RGB: u8 = 11;
const SET_ALL: u8 = 14;
const FLASH: u8 = 35;
const PULSE: u8 = 40;
const SELECT_MODE: u8 = 33;
const SELECT_LAYOUT: u8 = 44;

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
        LedCommand::RawByCode { index, colorcode } if index <= MAX_INDEX => {
            vec![WireMessage::short(0x90, index, clamp_code(colorcode))]
        }
        LedCommand::RawRgb { index, r, g, b } if index <= MAX_INDEX => {
            let [r, g, b] = resolve_rgb(r, g, b);
            vec![WireMessage::sysex(&HEADER, &[SET_RGB, index, r, g, b])]
        }
        LedCommand::AllOn { colorcode } => all_on(colorcode),
        LedCommand::Pulse { index, colorcode } if index <= MAX_INDEX => {
            vec![WireMessage::sysex(&HEADER, &[PULSE, index, clamp_code(colorcode)])]
        }
        LedCommand::Flash { index, colorcode } if index <= MAX_INDEX => {
            vec![WireMessage::sysex(&HEADER, &[FLASH, index, clamp_code(colorcode)])]
        }
        _ => Vec::new(),
    }
}

pub(super) fn encode_mode(command: ModeCommand) -> Option<ModeSwitch> {
    let payload = match command {
        ModeCommand::Mode(mode @ 0..=1) => [SELECT_MODE, mode],
        ModeCommand::Layout(layout @ 0..=15) => [SELECT_LAYOUT, layout],
        _ => return None,
    };
    Some(ModeSwitch {
        message: WireMessage::sysex(&HEADER, &payload),
        settle: DESCRIPTOR.mode_settle,
    })
}
