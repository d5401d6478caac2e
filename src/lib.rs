/*!
Talk to grid MIDI controllers: Novation's Launchpads (the original Launchpad, S and Mini, Pro,
Mk2, Mini MK3, X and Pro MK3), Launch Control and Launch Control XL, Launchkey Mini and Dicer,
and DJ TechTools' Midi Fighter 64 and 3D.

Every device family speaks its own dialect of MIDI. This crate translates between those dialects
and a common vocabulary: buttons have a raw number and, where the family has a grid, an X/Y
coordinate; LEDs are lit by raw number or coordinate, with a palette code or an RGB color.

# The codec

[`Family`] decodes incoming messages into [`InputEvent`]s and encodes [`LedCommand`]s and
[`ModeCommand`]s into wire messages. It's pure: no ports involved.

```
use gridpad::{Family, Layout, LedCommand, RawMessage, Xy};

let family = Family::LaunchpadMiniMk3;

let event = family.decode_raw_event(&RawMessage::new(0x90, 11, 127), Layout::Classic);
let button = event.as_button().unwrap();
assert_eq!(button.xy, Some(Xy::new(0, 8)));

let messages = family.encode_led(
    &LedCommand::RawRgb { index: 0, r: 63, g: 0, b: Some(0) },
    Default::default(),
);
assert_eq!(
    messages[0].bytes(),
    [0xF0, 0x00, 0x20, 0x29, 0x02, 0x0D, 0x03, 0x03, 0x00, 0x7E, 0x00, 0x00, 0xF7],
);
```

# Sessions

A [`Session`] finds a device's ports through a [`MidiTransport`], opens them and keeps the
device in a sensible mode while it's open. Enable the `midir` feature for hardware access through
[`midir`](https://docs.rs/midir); the in-memory [`MockTransport`](midi_io::mock::MockTransport)
is always available.

```
use gridpad::{midi_io::mock::MockTransport, prelude::*};

let transport = MockTransport::with_device("Launchpad X LPX MIDI");
let mut session = Session::new(Family::LaunchpadX, &transport, SessionConfig::default());
session.open()?;

session.send_led(&LedCommand::xy(0, 1, LedColor::rgb(63, 0, 0)))?;
while let Some(event) = session.next_event()? {
    if let InputEvent::Button(button) = event {
        println!("{button:?}");
    }
}
session.close();
# Ok::<(), gridpad::MidiError>(())
```

Requests a family can't express, like a raw index outside its range, are dropped without error.
A session hands them to its diagnostics hook, see [`Session::with_diagnostics`].
*/

pub mod util;

pub mod color;
pub use color::LedColor;

mod protocols;
pub use protocols::double_buffering::{Buffer, DoubleBuffering};
pub use protocols::*;

mod shared;

pub mod family;
pub use family::{Family, FamilyCodec, FamilyDescriptor};

pub mod midi_io;
pub use midi_io::{
    MidiInputHandle, MidiOutputHandle, MidiTransport, PortDirection, PortId, RawMessage,
};

mod errors;
pub use errors::*;

mod config;
pub use config::SessionConfig;

mod session;
pub use session::{Session, SessionState};

pub mod text;

pub mod launchpad_mk1;
pub use launchpad_mk1 as mk1;

pub mod launchpad_pro;
pub use launchpad_pro as pro;

pub mod launchpad_mk2;
pub use launchpad_mk2 as mk2;

pub mod launchpad_mk3;
pub use launchpad_mk3 as mk3;

pub mod launch_control;
pub use launch_control as control;

pub mod launchkey;

pub mod dicer;

pub mod midi_fighter;

pub mod prelude {
    pub use crate::family::FamilyCodec as _;
    pub use crate::midi_io::{MidiInputHandle as _, MidiOutputHandle as _, MidiTransport};
    pub use crate::{
        Family, InputEvent, Layout, LedColor, LedCommand, ModeCommand, Session, SessionConfig, Xy,
    };
}

/// Client name under which ports are opened, shown by other MIDI applications
pub const APPLICATION_NAME: &str = "gridpad";
