/*!
# DJ TechTools Midi Fighter 64 and Midi Fighter 3D

Buttons and LEDs share note numbers 36..=99. Colors are entries of the Midi Fighter color table,
0..=127; there is no RGB.

The Midi Fighter 64 splits its 8x8 grid into a left and a right half of 4x8 each:

```text
+---+---+---+---+---+---+---+---+
| 64|   |   | 67| 96|   |   | 99|
+---+---+---+---+---+---+---+---+
 ...
+---+---+---+---+---+---+---+---+
| 36|   |   | 39| 68|   |   | 71|
+---+---+---+---+---+---+---+---+
```

The Midi Fighter 3D has four banks of 4x4 buttons. X/Y addresses the first bank, whose top left
button is 39 and bottom right 48.

Besides a color, every LED has an animation mode, sent three octaves lower on channel 4:
brightness 18..=33, toggle 34..=41, pulse 42..=49 and the animations 50..=53.
*/

use std::{ops::RangeInclusive, time::Duration};

use crate::{
    color::clamp_code,
    family::{
        notes, to_raw_command, ColorDepth, FamilyCodec, FamilyDescriptor, PressureReporting,
        CLASSIC_ONLY,
    },
    EncodeOptions, InputEvent, Layout, LedCommand, RawMessage, WireMessage, Xy,
};

/// Animation modes, see [`LedCommand::RawMode`]
pub mod mode {
    use std::ops::RangeInclusive;

    pub const BRIGHTNESS: RangeInclusive<u8> = 18..=33;
    pub const TOGGLE: RangeInclusive<u8> = 34..=41;
    pub const PULSE: RangeInclusive<u8> = 42..=49;
    pub const ANIMATION_SQUARE: u8 = 50;
    pub const ANIMATION_CIRCLE: u8 = 51;
    pub const ANIMATION_STAR: u8 = 52;
    pub const ANIMATION_TRIANGLE: u8 = 53;

    pub const ALL: RangeInclusive<u8> = 18..=53;
}

const FIRST_NOTE: u8 = 36;
const LAST_NOTE: u8 = 99;
const LED_STATUS: u8 = 0x92;
const MODE_STATUS: u8 = 0x93;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Model {
    Fighter64,
    Fighter3d,
}

#[derive(Debug)]
pub struct MidiFighter {
    model: Model,
    descriptor: &'static FamilyDescriptor,
    /// Note on statuses; the matching note offs are 16 lower
    note_on: RangeInclusive<u8>,
}

pub static FIGHTER_64_DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    name: "Midi Fighter 64",
    port_keywords: &["Fighter 64"],
    sysex_header: None,
    xy_bounds: Some((8, 8)),
    color_depth: ColorDepth::Palette,
    pressure: PressureReporting::None,
    layouts: CLASSIC_ONLY,
    open_mode: None,
    restore_mode: None,
    mode_settle: Duration::ZERO,
    uses_templates: false,
    text_origin: Some(Xy::new(0, 0)),
};

pub static FIGHTER_3D_DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    name: "Midi Fighter 3D",
    port_keywords: &["Fighter 3D"],
    sysex_header: None,
    xy_bounds: Some((4, 4)),
    color_depth: ColorDepth::Palette,
    pressure: PressureReporting::None,
    layouts: CLASSIC_ONLY,
    open_mode: None,
    restore_mode: None,
    mode_settle: Duration::ZERO,
    uses_templates: false,
    text_origin: None,
};

pub static FIGHTER_64: MidiFighter = MidiFighter {
    model: Model::Fighter64,
    descriptor: &FIGHTER_64_DESCRIPTOR,
    note_on: 0x91..=0x92,
};

pub static FIGHTER_3D: MidiFighter = MidiFighter {
    model: Model::Fighter3d,
    descriptor: &FIGHTER_3D_DESCRIPTOR,
    note_on: 0x92..=0x93,
};

impl MidiFighter {
    pub fn model(&self) -> Model {
        self.model
    }
}

fn is_note(index: u8) -> bool {
    (FIRST_NOTE..=LAST_NOTE).contains(&index)
}

/// Color, then the animation mode if it is a valid one
fn light(messages: &mut Vec<WireMessage>, index: u8, colorcode: u8, mode: Option<u8>) {
    messages.push(WireMessage::short(LED_STATUS, index, clamp_code(colorcode)));
    if let Some(mode) = mode.filter(|slot| mode::ALL.contains(slot)) {
        messages.push(WireMessage::short(MODE_STATUS, index - FIRST_NOTE, mode));
    }
}

impl FamilyCodec for MidiFighter {
    fn descriptor(&self) -> &'static FamilyDescriptor {
        self.descriptor
    }

    fn raw_to_xy(&self, raw: u8, _layout: Layout) -> Option<Xy> {
        match self.model {
            Model::Fighter64 if is_note(raw) => {
                let offset = raw - FIRST_NOTE;
                let x = offset % 4 + if raw >= 68 { 4 } else { 0 };
                Some(Xy::new(x, 7 - (offset % 32) / 4))
            }
            Model::Fighter3d if (FIRST_NOTE..FIRST_NOTE + 16).contains(&raw) => {
                let offset = raw - FIRST_NOTE;
                Some(Xy::new(3 - offset % 4, offset / 4))
            }
            _ => None,
        }
    }

    fn xy_candidate(&self, xy: Xy, _layout: Layout) -> Option<u8> {
        let Xy { x, y } = xy;
        match self.model {
            Model::Fighter64 if x <= 7 && y <= 7 => {
                let half = if x < 4 { FIRST_NOTE } else { 68 };
                Some(half + x % 4 + (7 - y) * 4)
            }
            Model::Fighter3d if x <= 3 && y <= 3 => Some(39 - x + 4 * y),
            _ => None,
        }
    }

    fn decode(&self, msg: &RawMessage, layout: Layout) -> InputEvent {
        if self.note_on.contains(&msg.status) {
            self.button(msg.data1, msg.data2 > 0, msg.data2, layout)
        } else if msg.status & 0xF0 == 0x80 && self.note_on.contains(&(msg.status | 0x10)) {
            self.button(msg.data1, false, 0, layout)
        } else {
            InputEvent::Unrecognized
        }
    }

    fn encode_led(&self, command: &LedCommand, options: EncodeOptions) -> Vec<WireMessage> {
        match to_raw_command(self, command, options.layout) {
            Some(LedCommand::RawByCode { index, colorcode }) if is_note(index) => {
                vec![WireMessage::short(LED_STATUS, index, clamp_code(colorcode))]
            }
            Some(LedCommand::RawMode { index, mode }) if is_note(index) => {
                if !mode::ALL.contains(&mode) {
                    return Vec::new();
                }
                vec![WireMessage::short(MODE_STATUS, index - FIRST_NOTE, mode)]
            }
            Some(LedCommand::RawWithMode {
                index,
                colorcode,
                mode,
            }) if is_note(index) => {
                let mut messages = Vec::with_capacity(2);
                light(&mut messages, index, colorcode, Some(mode));
                messages
            }
            Some(LedCommand::AllOn { colorcode }) => {
                notes(LED_STATUS, FIRST_NOTE..FIRST_NOTE + 64, clamp_code(colorcode))
            }
            Some(LedCommand::AllOnWithMode { colorcode, mode }) => {
                let mut messages = Vec::with_capacity(128);
                for index in FIRST_NOTE..FIRST_NOTE + 64 {
                    light(&mut messages, index, colorcode, Some(mode));
                }
                messages
            }
            _ => Vec::new(),
        }
    }

    /// There is no reset message
    fn encode_reset(&self, _template: u8) -> Vec<WireMessage> {
        Vec::new()
    }
}
