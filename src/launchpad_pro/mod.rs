/*!
# Launchpad Pro (first generation)

Ten rows of ten, minus the corners. Raw numbers are "decades": the tens digit is the row counted
from the bottom, the ones digit the column.

```text
    +---+---+---+---+---+---+---+---+
    | 91|   |   |   |   |   |   | 98|
    +---+---+---+---+---+---+---+---+
+---+---+---+---+---+---+---+---+---+---+
| 80| 81|   |   |   |   |   |   | 88| 89|
+---+---+---+---+---+---+---+---+---+---+
 ...
+---+---+---+---+---+---+---+---+---+---+
| 10| 11|   |   |   |   |   |   | 18| 19|
+---+---+---+---+---+---+---+---+---+---+
    +---+---+---+---+---+---+---+---+
    |  1|  2|   |   |   |   |   |  8|
    +---+---+---+---+---+---+---+---+
```

In the [`Classic`](crate::Layout::Classic) layout the top row is `y = 0`, the 8x8 grid starts
at `(0, 1)`, the right column is `x = 8` and the left column `x = 9`. In the
[`Pro`](crate::Layout::Pro) layout the left column is `x = 0` and the grid starts at `(1, 1)`.
The bottom row is `y = 9` in both.
*/

mod input;
mod output;

use std::time::Duration;

use crate::{
    family::{
        novation_header, ColorDepth, FamilyCodec, FamilyDescriptor, PressureReporting,
        BOTH_LAYOUTS,
    },
    shared::{decade_to_xy, xy_to_decade},
    EncodeOptions, InputEvent, Layout, LedCommand, ModeCommand, ModeSwitch, RawMessage,
    WireMessage, Xy,
};

pub(crate) const HEADER: [u8; 5] = novation_header(0x10);

pub static DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    name: "Launchpad Pro",
    port_keywords: &["Pro"],
    sysex_header: Some(HEADER),
    xy_bounds: Some((10, 10)),
    color_depth: ColorDepth::SixBit,
    pressure: PressureReporting::Channel,
    layouts: BOTH_LAYOUTS,
    // Ableton Live mode; the power-up default is standalone mode
    open_mode: Some(0),
    restore_mode: None,
    mode_settle: Duration::from_millis(10),
    uses_templates: false,
    text_origin: Some(Xy::new(0, 1)),
};

#[doc(hidden)]
pub struct Spec;

fn is_button(raw: u8) -> bool {
    let (row, column) = (raw / 10, raw % 10);
    match row {
        0 | 9 => (1..=8).contains(&column),
        1..=8 => true,
        _ => false,
    }
}

impl FamilyCodec for Spec {
    fn descriptor(&self) -> &'static FamilyDescriptor {
        &DESCRIPTOR
    }

    fn raw_to_xy(&self, raw: u8, layout: Layout) -> Option<Xy> {
        if !is_button(raw) {
            return None;
        }
        decade_to_xy(raw, layout)
    }

    fn xy_candidate(&self, xy: Xy, layout: Layout) -> Option<u8> {
        xy_to_decade(xy, layout)
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
