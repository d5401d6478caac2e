use super::Spec;
use crate::{
    family::FamilyCodec, InputEvent, Layout, PressureEvent, PressureTarget, RawMessage,
};

pub(super) fn decode(spec: &Spec, msg: &RawMessage, layout: Layout) -> InputEvent {
    match msg.status {
        // Grid pads send notes, the surrounding buttons control changes
        0x90 | 0xB0 => spec.button(msg.data1, msg.data2 > 0, msg.data2, layout),
        0xD0 => InputEvent::Pressure(PressureEvent {
            target: PressureTarget::Channel,
            value: msg.data1,
        }),
        _ => InputEvent::Unrecognized,
    }
}
