use super::{LaunchControl, Template};
use crate::{
    color::{pack_2bit_rg, resolve_2bit},
    EncodeOptions, LedColor, LedCommand, ModeCommand, ModeSwitch, WireMessage, Xy,
};

// SysEx commands
const SELECT_TEMPLATE: u8 = 119;
const SET_LED: u8 = 120;

pub(super) fn reset(template: Template) -> WireMessage {
    WireMessage::short(0xB0 + template.channel(), 0, 0)
}

fn color_byte(color: LedColor) -> u8 {
    match color {
        LedColor::Code(code) => code.clamp(0, 0x3F),
        LedColor::Rgb { r, g, b } => resolve_2bit(r, g, b),
    }
}

pub(super) fn encode_led(
    control: &LaunchControl,
    command: &LedCommand,
    options: EncodeOptions,
) -> Vec<WireMessage> {
    let template = Template::clamped(options.template);

    match *command {
        LedCommand::RawByCode { index, colorcode } if index <= 127 => {
            vec![WireMessage::short(0x90, index, color_byte(colorcode.into()))]
        }
        LedCommand::RawRgb { index, r, g, b } if index <= 127 => {
            vec![WireMessage::short(0x90, index, resolve_2bit(r, g, b))]
        }
        LedCommand::Xy { x, y, color } => {
            let Some(index) = control.led_index(Xy::new(x, y)) else {
                return Vec::new();
            };
            let mut color = color_byte(color);
            // The cursor and side button LEDs are single colored: any color lights them fully
            if x >= 8 && color != 0 {
                color = pack_2bit_rg(3, 3);
            }
            vec![WireMessage::sysex(
                &control.header,
                &[SET_LED, template.channel(), index, color],
            )]
        }
        LedCommand::AllOn { colorcode: 0 } | LedCommand::AllOff => vec![reset(template)],
        LedCommand::AllOn { .. } => vec![WireMessage::short(0xB0, 0, 127)],
        _ => Vec::new(),
    }
}

pub(super) fn encode_mode(control: &LaunchControl, command: ModeCommand) -> Option<ModeSwitch> {
    let ModeCommand::Template(number) = command else {
        return None;
    };
    let template = Template::new(number)?;
    Some(ModeSwitch {
        message: WireMessage::sysex(&control.header, &[SELECT_TEMPLATE, template.channel()]),
        settle: control.descriptor.mode_settle,
    })
}
