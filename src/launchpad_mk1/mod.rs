/*!
# Original Launchpad, Launchpad S and first-generation Launchpad Mini

The 8x8 grid and the right column of scene buttons send notes, numbered `16 * row + column`.
The top row sends control changes 104..=111; its raw numbers are shifted to 200..=207 so they
don't collide with the grid.

```text
+---+---+---+---+---+---+---+---+
|200|201|202|203|204|205|206|207|     < CC 104..111
+---+---+---+---+---+---+---+---+

+---+---+---+---+---+---+---+---+  +--+
|  0|...|   |   |   |   |   |  7|  |  8|
+---+---+---+---+---+---+---+---+  +--+
| 16|...|   |   |   |   |   | 23|  | 24|
+---+---+---+---+---+---+---+---+  +--+
 ...
+---+---+---+---+---+---+---+---+  +--+
|112|...|   |   |   |   |   |119|  |120|
+---+---+---+---+---+---+---+---+  +--+
```

X/Y coordinates put the top row at `y = 0` and the grid at `y = 1..=8`.
*/

use std::time::Duration;

use crate::{
    color::resolve_2bit,
    family::{ColorDepth, FamilyCodec, FamilyDescriptor, PressureReporting, CLASSIC_ONLY},
    EncodeOptions, InputEvent, Layout, LedColor, LedCommand, ModeCommand, ModeSwitch, RawMessage,
    WireMessage, Xy,
};

pub static DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    name: "Launchpad Mk1",
    port_keywords: &["Launchpad"],
    sysex_header: None,
    xy_bounds: Some((9, 9)),
    color_depth: ColorDepth::TwoBit,
    pressure: PressureReporting::None,
    layouts: CLASSIC_ONLY,
    open_mode: None,
    restore_mode: None,
    mode_settle: Duration::ZERO,
    uses_templates: false,
    text_origin: Some(Xy::new(0, 1)),
};

/// First raw number of the top row
const TOP_ROW: u8 = 200;

// Bit 6 must be zero, the rest is red, green and the double buffering flags
const MAX_COLOR_BYTE: u8 = 0x3F;

#[doc(hidden)]
pub struct Spec;

fn is_led(index: u8) -> bool {
    (index <= 120 && index & 0x0F <= 8) || (TOP_ROW..=TOP_ROW + 7).contains(&index)
}

fn light(index: u8, value: u8) -> Vec<WireMessage> {
    if !is_led(index) {
        return Vec::new();
    }
    let message = if index >= TOP_ROW {
        WireMessage::short(0xB0, index - TOP_ROW + 104, value)
    } else {
        WireMessage::short(0x90, index, value)
    };
    vec![message]
}

fn color_byte(color: LedColor) -> u8 {
    match color {
        LedColor::Code(code) => code.clamp(0, MAX_COLOR_BYTE),
        LedColor::Rgb { r, g, b } => resolve_2bit(r, g, b),
    }
}

/// All-on brightness: 0 is off, 1 and 2 are low and medium, everything above is full
fn all_on_byte(colorcode: u8) -> u8 {
    match colorcode {
        0 => 0,
        1 => 125,
        2 => 126,
        _ => 127,
    }
}

impl FamilyCodec for Spec {
    fn descriptor(&self) -> &'static FamilyDescriptor {
        &DESCRIPTOR
    }

    fn raw_to_xy(&self, raw: u8, _layout: Layout) -> Option<Xy> {
        if raw >= TOP_ROW {
            return (raw <= TOP_ROW + 7).then(|| Xy::new(raw - TOP_ROW, 0));
        }
        let (x, row) = (raw & 0x0F, raw >> 4);
        (x <= 8 && row <= 7).then(|| Xy::new(x, row + 1))
    }

    fn xy_candidate(&self, xy: Xy, _layout: Layout) -> Option<u8> {
        match xy.y {
            0 if xy.x <= 7 => Some(TOP_ROW + xy.x),
            1..=8 if xy.x <= 8 => Some(((xy.y - 1) << 4) | xy.x),
            _ => None,
        }
    }

    fn decode(&self, msg: &RawMessage, layout: Layout) -> InputEvent {
        match (msg.status, msg.data1) {
            (0x90, note) => self.button(note, msg.data2 > 0, msg.data2, layout),
            (0xB0, number @ 104..=111) => {
                self.button(number - 104 + TOP_ROW, msg.data2 > 0, msg.data2, layout)
            }
            _ => InputEvent::Unrecognized,
        }
    }

    fn encode_led(&self, command: &LedCommand, options: EncodeOptions) -> Vec<WireMessage> {
        match *command {
            LedCommand::RawByCode { index, colorcode } => {
                light(index, color_byte(LedColor::Code(colorcode)))
            }
            LedCommand::RawRgb { index, r, g, b } => light(index, resolve_2bit(r, g, b)),
            LedCommand::Xy { x, y, color } => match self.xy_to_raw(Xy::new(x, y), options.layout)
            {
                Some(index) => light(index, color_byte(color)),
                None => Vec::new(),
            },
            LedCommand::AllOn { colorcode } => {
                vec![WireMessage::short(0xB0, 0, all_on_byte(colorcode))]
            }
            _ => Vec::new(),
        }
    }

    fn encode_mode(&self, command: ModeCommand) -> Option<ModeSwitch> {
        let message = match command {
            ModeCommand::DutyCycle {
                numerator,
                denominator,
            } => {
                if !(1..=16).contains(&numerator) || !(3..=18).contains(&denominator) {
                    return None;
                }
                if numerator < 9 {
                    WireMessage::short(0xB0, 30, 16 * (numerator - 1) + (denominator - 3))
                } else {
                    WireMessage::short(0xB0, 31, 16 * (numerator - 9) + (denominator - 3))
                }
            }
            ModeCommand::DoubleBuffering(buffering) => {
                WireMessage::short(0xB0, 0, buffering.control_byte())
            }
            _ => return None,
        };
        Some(ModeSwitch {
            message,
            settle: Duration::ZERO,
        })
    }

    fn encode_reset(&self, _template: u8) -> Vec<WireMessage> {
        vec![WireMessage::short(0xB0, 0, 0)]
    }
}

/// Full red and green, the brightest color the 2-bit LEDs can show
pub const AMBER: u8 = 0x33;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::pack_2bit_rg, protocols::double_buffering::DoubleBuffering, Family};

    const FAMILY: Family = Family::LaunchpadMk1;

    #[test]
    fn grid_and_top_row_numbering() {
        assert_eq!(FAMILY.raw_to_xy(0, Layout::Classic), Some(Xy::new(0, 1)));
        assert_eq!(FAMILY.raw_to_xy(120, Layout::Classic), Some(Xy::new(8, 8)));
        assert_eq!(FAMILY.raw_to_xy(203, Layout::Classic), Some(Xy::new(3, 0)));
        assert_eq!(FAMILY.raw_to_xy(9, Layout::Classic), None);
        assert_eq!(FAMILY.xy_to_raw(Xy::new(8, 0), Layout::Classic), None);
        assert_eq!(FAMILY.xy_to_raw(Xy::new(2, 3), Layout::Classic), Some(34));
        assert_eq!(FAMILY.raw_to_xy(16, Layout::Pro), None);
    }

    #[test]
    fn decodes_notes_and_control_changes() {
        let event = FAMILY.decode_raw_event(&RawMessage::new(0x90, 0x10, 127), Layout::Classic);
        let button = event.as_button().unwrap();
        assert_eq!(button.xy, Some(Xy::new(0, 2)));
        assert!(button.pressed);

        let event = FAMILY.decode_raw_event(&RawMessage::new(0xB0, 104, 0), Layout::Classic);
        let button = event.as_button().unwrap();
        assert_eq!((button.raw, button.xy), (200, Some(Xy::new(0, 0))));
        assert!(!button.pressed);

        // Text scrolling finished
        assert_eq!(
            FAMILY.decode_raw_event(&RawMessage::new(0xB0, 0, 3), Layout::Classic),
            InputEvent::Unrecognized
        );
    }

    #[test]
    fn encodes_leds() {
        let options = EncodeOptions::default();
        assert_eq!(
            FAMILY.encode_led(&LedCommand::RawRgb { index: 17, r: 3, g: 1, b: None }, options),
            vec![WireMessage::short(0x90, 17, 0x13)]
        );
        assert_eq!(
            FAMILY.encode_led(&LedCommand::xy(7, 0, LedColor::classic(0, 3)), options),
            vec![WireMessage::short(0xB0, 111, 0x30)]
        );
        assert_eq!(
            FAMILY.encode_led(&LedCommand::RawByCode { index: 13, colorcode: AMBER }, options),
            Vec::new()
        );
        assert_eq!(
            FAMILY.encode_led(&LedCommand::AllOn { colorcode: 2 }, options),
            vec![WireMessage::short(0xB0, 0, 126)]
        );
        assert_eq!(
            FAMILY.encode_led(&LedCommand::Pulse { index: 1, colorcode: 5 }, options),
            Vec::new()
        );
        assert_eq!(pack_2bit_rg(3, 3), AMBER);
    }

    #[test]
    fn duty_cycle_and_buffering() {
        let switch = FAMILY
            .encode_mode_switch(ModeCommand::DutyCycle { numerator: 10, denominator: 5 })
            .unwrap();
        assert_eq!(switch.message, WireMessage::short(0xB0, 31, 18));
        assert_eq!(
            FAMILY.encode_mode_switch(ModeCommand::DutyCycle { numerator: 0, denominator: 5 }),
            None
        );

        let switch = FAMILY
            .encode_mode_switch(ModeCommand::DoubleBuffering(DoubleBuffering {
                flash: true,
                ..Default::default()
            }))
            .unwrap();
        assert_eq!(switch.message, WireMessage::short(0xB0, 0, 0b0010_1000));
        assert_eq!(FAMILY.encode_mode_switch(ModeCommand::Mode(1)), None);
    }
}
