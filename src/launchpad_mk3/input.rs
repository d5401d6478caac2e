use super::Mk3;
use crate::{
    family::{FamilyCodec, PressureReporting},
    InputEvent, Layout, PressureEvent, PressureTarget, RawMessage,
};

pub(super) fn decode(mk3: &Mk3, msg: &RawMessage, layout: Layout) -> InputEvent {
    let pressure = mk3.descriptor.pressure;
    if pressure.status() == Some(msg.status) {
        return match pressure {
            PressureReporting::Polyphonic => InputEvent::Pressure(PressureEvent {
                target: PressureTarget::Button {
                    raw: msg.data1,
                    xy: mk3.xy_of(msg.data1, layout),
                },
                value: msg.data2,
            }),
            _ => InputEvent::Pressure(PressureEvent {
                target: PressureTarget::Channel,
                value: msg.data1,
            }),
        };
    }

    match msg.status {
        // Pads send notes, the buttons around them control changes
        0x90 | 0xB0 => mk3.button(msg.data1, msg.data2 > 0, msg.data2, layout),
        _ => InputEvent::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use crate::{ButtonEvent, Family, InputEvent, Layout, PressureTarget, RawMessage, Xy};

    #[test]
    fn decade_button() {
        let event = Family::LaunchpadMiniMk3
            .decode_raw_event(&RawMessage::new(0x90, 11, 127), Layout::Classic);
        assert_eq!(
            event,
            InputEvent::Button(ButtonEvent {
                raw: 11,
                xy: Some(Xy::new(0, 8)),
                pressed: true,
                velocity: 127,
            })
        );
    }

    #[test]
    fn polyphonic_pressure_is_never_a_button() {
        let family = Family::LaunchpadX;
        for note in [11, 55, 89] {
            match family.decode_raw_event(&RawMessage::new(0xA0, note, 100), Layout::Classic) {
                InputEvent::Pressure(pressure) => {
                    let PressureTarget::Button { raw, xy } = pressure.target else {
                        panic!("expected per-pad pressure");
                    };
                    assert_eq!(raw, note);
                    assert_eq!(xy, family.raw_to_xy(note, Layout::Classic));
                    assert_eq!(pressure.legacy_raw(), 255 + note as u16);
                    assert_eq!(pressure.value, 100);
                }
                other => panic!("expected pressure, got {other:?}"),
            }
        }
    }

    #[test]
    fn channel_pressure_on_pro_mk3() {
        let event = Family::LaunchpadProMk3
            .decode_raw_event(&RawMessage::new(0xD0, 64, 0), Layout::Pro);
        assert!(matches!(
            event,
            InputEvent::Pressure(p) if p.target == PressureTarget::Channel && p.value == 64
        ));

        // The Mini has no pressure sensors
        assert_eq!(
            Family::LaunchpadMiniMk3.decode_raw_event(&RawMessage::new(0xD0, 64, 0), Layout::Pro),
            InputEvent::Unrecognized
        );
    }

    #[test]
    fn pro_mk3_bottom_rows() {
        let event = Family::LaunchpadProMk3
            .decode_raw_event(&RawMessage::new(0xB0, 3, 127), Layout::Classic);
        assert_eq!(event.as_button().and_then(|b| b.xy), Some(Xy::new(2, 10)));
    }
}
