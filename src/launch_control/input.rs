use super::LaunchControl;
use crate::{family::FamilyCodec, ButtonEvent, InputEvent, Layout, RawMessage};

pub(super) fn decode(control: &LaunchControl, msg: &RawMessage, layout: Layout) -> InputEvent {
    // The low nibble is the template the message was sent in
    match (msg.status & 0xF0, msg.data1) {
        (0x90, note) => control.button(note, true, msg.data2, layout),
        // A release after a template change arrives as note 0, without template
        (0x80, note) => control.button(note, false, 0, layout),
        (0xB0, number) if control.cursor.contains(&number) => InputEvent::Button(ButtonEvent {
            raw: number,
            xy: None,
            pressed: msg.data2 > 0,
            velocity: msg.data2,
        }),
        (0xB0, number) => InputEvent::Potentiometer {
            index: number,
            value: msg.data2,
        },
        _ => InputEvent::Unrecognized,
    }
}
