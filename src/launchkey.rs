/*!
# Launchkey Mini

Input only. Keys send notes on channel 1, the pads on channel 10. The round buttons next to the
pads and the track buttons send control changes 104..=109, the knobs 21..=28.

The octave buttons shift the keys over the whole note range, so key numbers collide with the pad
and knob numbers in the lower octaves. None of the controls has a coordinate.
*/

use std::time::Duration;

use crate::{
    family::{ColorDepth, FamilyCodec, FamilyDescriptor, PressureReporting, CLASSIC_ONLY},
    ButtonEvent, EncodeOptions, InputEvent, Layout, LedCommand, RawMessage, WireMessage, Xy,
};

pub static DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    name: "Launchkey Mini",
    port_keywords: &["LaunchKey"],
    sysex_header: None,
    xy_bounds: None,
    color_depth: ColorDepth::None,
    pressure: PressureReporting::None,
    layouts: CLASSIC_ONLY,
    open_mode: None,
    restore_mode: None,
    mode_settle: Duration::ZERO,
    uses_templates: false,
    text_origin: None,
};

#[doc(hidden)]
pub struct Spec;

fn button(raw: u8, pressed: bool, velocity: u8) -> InputEvent {
    InputEvent::Button(ButtonEvent {
        raw,
        xy: None,
        pressed,
        velocity: if pressed { velocity } else { 0 },
    })
}

impl FamilyCodec for Spec {
    fn descriptor(&self) -> &'static FamilyDescriptor {
        &DESCRIPTOR
    }

    fn raw_to_xy(&self, _raw: u8, _layout: Layout) -> Option<Xy> {
        None
    }

    fn xy_candidate(&self, _xy: Xy, _layout: Layout) -> Option<u8> {
        None
    }

    fn decode(&self, msg: &RawMessage, _layout: Layout) -> InputEvent {
        match (msg.status, msg.data1) {
            // Keys, then pads
            (0x90 | 0x99, note) => button(note, true, msg.data2),
            (0x80 | 0x89, note) => button(note, false, 0),
            (0xB0, number @ 104..=109) => button(number, msg.data2 > 0, 127),
            (0xB0, number) => InputEvent::Potentiometer {
                index: number,
                value: msg.data2,
            },
            _ => InputEvent::Unrecognized,
        }
    }

    fn encode_led(&self, _command: &LedCommand, _options: EncodeOptions) -> Vec<WireMessage> {
        Vec::new()
    }

    fn encode_reset(&self, _template: u8) -> Vec<WireMessage> {
        Vec::new()
    }
}
