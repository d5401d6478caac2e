use super::{Mk3, Model};
use crate::{
    color::{clamp_code, pack_6bit_rgb_extended, resolve_rgb},
    family::{notes, to_raw_command},
    EncodeOptions, LedCommand, ModeCommand, ModeSwitch, WireMessage,
};

pub(super) const LIVE_MODE: u8 = 0;
pub(super) const PROGRAMMER_MODE: u8 = 1;

const MAX_INDEX: u8 = 99;

// SysEx commands
const SELECT_LAYOUT: u8 = 0x00;
const LED_SPEC: u8 = 0x03;
const BRIGHTNESS: u8 = 0x08;
const SLEEP: u8 = 0x09;
const SELECT_MODE: u8 = 0x0E;

// Lighting type of one LED entry
const RGB: u8 = 0x03;

/// Every pad of the 9x9 area, one note each
pub(super) fn all_on(colorcode: u8) -> Vec<WireMessage> {
    let pads = (0..9).flat_map(|x| (0..9).map(move |y| (x + 1) + (y + 1) * 10));
    notes(0x90, pads, clamp_code(colorcode))
}

pub(super) fn encode_led(
    mk3: &Mk3,
    command: &LedCommand,
    options: EncodeOptions,
) -> Vec<WireMessage> {
    let Some(command) = to_raw_command(mk3, command, options.layout) else {
        return Vec::new();
    };

    match command {
        LedCommand::RawByCode { index, colorcode } if index <= MAX_INDEX => {
            vec![WireMessage::short(0x90, index, clamp_code(colorcode))]
        }
        LedCommand::RawRgb { index, r, g, b } if index <= MAX_INDEX => {
            let [r, g, b] = resolve_rgb(r, g, b);
            let [r, g, b] = pack_6bit_rgb_extended(r, g, b);
            vec![WireMessage::sysex(&mk3.header, &[LED_SPEC, RGB, index, r, g, b])]
        }
        LedCommand::AllOn { colorcode } => all_on(colorcode),
        // Channel 2 flashes, channel 3 pulses
        LedCommand::Flash { index, colorcode } if index <= MAX_INDEX => {
            vec![WireMessage::short(0x91, index, clamp_code(colorcode))]
        }
        LedCommand::Pulse { index, colorcode } if index <= MAX_INDEX => {
            vec![WireMessage::short(0x92, index, clamp_code(colorcode))]
        }
        _ => Vec::new(),
    }
}

pub(super) fn encode_mode(mk3: &Mk3, command: ModeCommand) -> Option<ModeSwitch> {
    let settle = mk3.descriptor.mode_settle;
    let has_display_settings = matches!(mk3.model, Model::Mini | Model::X);

    let (payload, settle) = match command {
        ModeCommand::Mode(mode @ (LIVE_MODE | PROGRAMMER_MODE)) => ([SELECT_MODE, mode], settle),
        ModeCommand::Layout(layout) if mk3.layouts.contains(&layout) => {
            ([SELECT_LAYOUT, layout], settle)
        }
        ModeCommand::Brightness(level) if has_display_settings => {
            ([BRIGHTNESS, clamp_code(level)], Default::default())
        }
        ModeCommand::Sleep(sleep) if has_display_settings => {
            ([SLEEP, u8::from(!sleep)], Default::default())
        }
        _ => return None,
    };
    Some(ModeSwitch {
        message: WireMessage::sysex(&mk3.header, &payload),
        settle,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{EncodeOptions, Family, LedColor, LedCommand, ModeCommand, WireMessage};

    #[test]
    fn rgb_is_shifted_into_seven_bits() {
        let encoded = Family::LaunchpadMiniMk3.encode_led(
            &LedCommand::RawRgb { index: 0, r: 63, g: 0, b: Some(0) },
            EncodeOptions::default(),
        );
        assert_eq!(
            encoded,
            vec![WireMessage::SysEx(vec![
                0xF0, 0x00, 0x20, 0x29, 0x02, 0x0D, 0x03, 0x03, 0x00, 0x7E, 0x00, 0x00, 0xF7
            ])]
        );

        let encoded = Family::LaunchpadX.encode_led(
            &LedCommand::xy(0, 0, LedColor::classic(3, 0)),
            EncodeOptions::default(),
        );
        assert_eq!(
            encoded,
            vec![WireMessage::sysex(&[0, 32, 41, 2, 12], &[3, 3, 91, 126, 0, 0])]
        );
    }

    #[test]
    fn out_of_range_index_is_dropped() {
        for family in [Family::LaunchpadMiniMk3, Family::LaunchpadX, Family::LaunchpadProMk3] {
            assert!(family
                .encode_led(
                    &LedCommand::RawByCode { index: 150, colorcode: 10 },
                    EncodeOptions::default()
                )
                .is_empty());
        }
    }

    #[test]
    fn blinking_uses_channels() {
        let options = EncodeOptions::default();
        let family = Family::LaunchpadProMk3;
        assert_eq!(
            family.encode_led(&LedCommand::Pulse { index: 45, colorcode: 9 }, options),
            vec![WireMessage::short(0x92, 45, 9)]
        );
        assert_eq!(
            family.encode_led(&LedCommand::FlashXy { x: 0, y: 10, colorcode: 9 }, options),
            vec![WireMessage::short(0x91, 1, 9)]
        );
    }

    #[test]
    fn all_on_lights_every_pad() {
        let encoded = Family::LaunchpadX.encode_led(
            &LedCommand::AllOn { colorcode: 21 },
            EncodeOptions::default(),
        );
        assert_eq!(encoded.len(), 81);
        assert_eq!(encoded[0], WireMessage::short(0x90, 11, 21));
        assert_eq!(encoded[80], WireMessage::short(0x90, 99, 21));
        assert!(encoded.contains(&WireMessage::short(0x90, 19, 21)));
    }

    #[test]
    fn modes_and_layouts() {
        let switch = Family::LaunchpadProMk3
            .encode_mode_switch(ModeCommand::Mode(1))
            .unwrap();
        assert_eq!(switch.message, WireMessage::sysex(&[0, 32, 41, 2, 14], &[14, 1]));
        assert_eq!(switch.settle, Duration::from_millis(100));

        let switch = Family::LaunchpadMiniMk3
            .encode_mode_switch(ModeCommand::Layout(0x7F))
            .unwrap();
        assert_eq!(switch.message, WireMessage::sysex(&[0, 32, 41, 2, 13], &[0, 0x7F]));
        assert_eq!(switch.settle, Duration::from_millis(10));

        assert_eq!(
            Family::LaunchpadMiniMk3.encode_mode_switch(ModeCommand::Layout(1)),
            None
        );
        assert!(Family::LaunchpadX
            .encode_mode_switch(ModeCommand::Layout(1))
            .is_some());
        assert_eq!(
            Family::LaunchpadProMk3.encode_mode_switch(ModeCommand::Layout(0)),
            None
        );
        assert_eq!(Family::LaunchpadX.encode_mode_switch(ModeCommand::Mode(2)), None);

        let switch = Family::LaunchpadMiniMk3
            .encode_mode_switch(ModeCommand::Sleep(true))
            .unwrap();
        assert_eq!(switch.message, WireMessage::sysex(&[0, 32, 41, 2, 13], &[9, 0]));
    }
}
