use super::Spec;
use crate::{family::FamilyCodec, InputEvent, Layout, RawMessage};

pub(super) fn decode(spec: &Spec, msg: &RawMessage, layout: Layout) -> InputEvent {
    match msg.status {
        0x90 | 0xB0 => spec.button(msg.data1, msg.data2 > 0, msg.data2, layout),
        _ => InputEvent::Unrecognized,
    }
}
