/*!
# Launchpad MK2

The 8x8 grid and the right column use decade numbers (`11` bottom left, `89` top of the right
column). The top row sends control changes 104..=111.

```text
+---+---+---+---+---+---+---+---+
|104|   |106|   |   |   |   |111|
+---+---+---+---+---+---+---+---+

+---+---+---+---+---+---+---+---+  +---+
| 81|   |   |   |   |   |   |   |  | 89|
+---+---+---+---+---+---+---+---+  +---+
 ...
+---+---+---+---+---+---+---+---+  +---+
| 11|   |   |   |   |   |   |   |  | 19|
+---+---+---+---+---+---+---+---+  +---+
```

The top row is `y = 0`; the grid spans `(0, 1)` to `(7, 8)` with the right column at `x = 8`.
*/

mod input;
mod output;

use std::time::Duration;

use crate::{
    family::{
        novation_header, ColorDepth, FamilyCodec, FamilyDescriptor, PressureReporting,
        CLASSIC_ONLY,
    },
    shared::{decade_to_xy, xy_to_decade},
    EncodeOptions, InputEvent, Layout, LedCommand, ModeCommand, ModeSwitch, RawMessage,
    WireMessage, Xy,
};

pub(crate) const HEADER: [u8; 5] = novation_header(0x18);

/// Control change number of the leftmost top row button
const TOP_ROW: u8 = 104;

pub static DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    name: "Launchpad Mk2",
    port_keywords: &["Mk2"],
    sysex_header: Some(HEADER),
    xy_bounds: Some((9, 9)),
    color_depth: ColorDepth::SixBit,
    pressure: PressureReporting::None,
    layouts: CLASSIC_ONLY,
    open_mode: None,
    restore_mode: None,
    mode_settle: Duration::ZERO,
    uses_templates: false,
    text_origin: Some(Xy::new(0, 1)),
};

#[doc(hidden)]
pub struct Spec;

impl FamilyCodec for Spec {
    fn descriptor(&self) -> &'static FamilyDescriptor {
        &DESCRIPTOR
    }

    fn raw_to_xy(&self, raw: u8, layout: Layout) -> Option<Xy> {
        match raw {
            TOP_ROW..=111 => Some(Xy::new(raw - TOP_ROW, 0)),
            11..=89 if raw % 10 != 0 => decade_to_xy(raw, layout),
            _ => None,
        }
    }

    fn xy_candidate(&self, xy: Xy, layout: Layout) -> Option<u8> {
        match xy.y {
            0 if xy.x <= 7 => Some(TOP_ROW + xy.x),
            0 => None,
            _ => xy_to_decade(xy, layout),
        }
    }

    fn decode(&self, msg: &RawMessage, layout: Layout) -> InputEvent {
        input::decode(self, msg, layout)
    }

    fn encode_led(&self, command: &LedCommand, options: EncodeOptions) -> Vec<WireMessage> {
        output::encode_led(self, command, options)
    }

    fn encode_mode(&self, command: ModeCommand) -> Option<ModeSwitch> {
        output::encode_mode(command)
    }

    fn encode_reset(&self, _template: u8) -> Vec<WireMessage> {
        output::all_on(0)
    }
}
