use std::{cell::RefCell, time::Duration};

use super::*;
use crate::{midi_io::mock::MockTransport, Layout, PressureTarget, Xy};

const MINI_MK3: &str = "Launchpad Mini MK3 LPMiniMK3 MIDI";
const PRO_MK3: &str = "Launchpad Pro MK3 LPProMK3 MIDI";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mini_sysex(payload: &[u8]) -> WireMessage {
    WireMessage::sysex(&[0x00, 0x20, 0x29, 0x02, 0x0D], payload)
}

#[test]
fn open_selects_programmer_mode() {
    init_logger();
    let transport = MockTransport::with_device(MINI_MK3);
    let mut session = Session::new(Family::LaunchpadMiniMk3, &transport, SessionConfig::default());

    assert!(session.check().unwrap());
    assert_eq!(session.state(), SessionState::Checked);
    assert!(transport.written().is_empty());
    assert_eq!(transport.open_handles(), (0, 0));

    session.open().unwrap();
    assert!(session.is_open());
    assert_eq!(session.mode(), Some(1));
    assert_eq!(transport.written(), vec![mini_sysex(&[0x0E, 1])]);
    assert_eq!(transport.open_handles(), (1, 1));
}

#[test]
fn missing_input_leaks_nothing() {
    let transport = MockTransport::new();
    transport.add_port(PRO_MK3, PortDirection::Output);
    let mut session = Session::new(Family::LaunchpadProMk3, &transport, SessionConfig::default());

    assert!(!session.check().unwrap());
    assert_eq!(session.state(), SessionState::Unopened);

    let err = session.open().unwrap_err();
    assert!(matches!(err, MidiError::NoPortFound { .. }));
    assert!(err.is_device_unavailable());
    assert_eq!(session.state(), SessionState::Unopened);
    assert_eq!(transport.open_handles(), (0, 0));
    assert!(transport.written().is_empty());
}

#[test]
fn refused_input_releases_output() {
    let transport = MockTransport::with_device(PRO_MK3);
    transport.refuse_connections(PortDirection::Input);
    let mut session = Session::new(Family::LaunchpadProMk3, &transport, SessionConfig::default());

    let err = session.open().unwrap_err();
    assert!(matches!(err, MidiError::ConnectFailed { .. }));
    assert_eq!(session.state(), SessionState::Unopened);
    assert_eq!(transport.open_handles(), (0, 0));
}

#[test]
fn failed_mode_switch_rolls_back() {
    let transport = MockTransport::with_device(MINI_MK3);
    transport.fail_writes(true);
    let mut session = Session::new(Family::LaunchpadMiniMk3, &transport, SessionConfig::default());

    let err = session.open().unwrap_err();
    assert!(matches!(err, MidiError::Transport { .. }));
    assert!(!err.is_device_unavailable());
    assert_eq!(session.state(), SessionState::Unopened);
    assert_eq!(session.mode(), None);
    assert_eq!(transport.open_handles(), (0, 0));

    transport.fail_writes(false);
    session.open().unwrap();
    assert!(session.is_open());
}

#[test]
fn close_restores_live_mode() {
    let transport = MockTransport::with_device(PRO_MK3);
    let mut session = Session::new(Family::LaunchpadProMk3, &transport, SessionConfig::default());
    session.open().unwrap();
    transport.take_written();

    session.close();
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(
        transport.written(),
        vec![WireMessage::sysex(&[0x00, 0x20, 0x29, 0x02, 0x0E], &[0x0E, 0])]
    );
    assert_eq!(transport.open_handles(), (0, 0));

    assert!(matches!(session.open(), Err(MidiError::Closed)));
    assert!(matches!(
        session.send_led(&LedCommand::AllOn { colorcode: 3 }),
        Err(MidiError::Closed)
    ));
}

#[test]
fn close_is_best_effort() {
    let transport = MockTransport::with_device(PRO_MK3);
    let mut session = Session::new(Family::LaunchpadProMk3, &transport, SessionConfig::default());
    session.open().unwrap();

    transport.fail_writes(true);
    session.close();
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(transport.open_handles(), (0, 0));
}

#[test]
fn drop_closes() {
    let transport = MockTransport::with_device(PRO_MK3);
    {
        let mut session =
            Session::new(Family::LaunchpadProMk3, &transport, SessionConfig::default());
        session.open().unwrap();
        assert_eq!(transport.open_handles(), (1, 1));
    }
    assert_eq!(transport.open_handles(), (0, 0));
    assert_eq!(transport.written().len(), 2);
}

#[test]
fn requires_open_session() {
    let transport = MockTransport::with_device(MINI_MK3);
    let mut session = Session::new(Family::LaunchpadMiniMk3, &transport, SessionConfig::default());
    assert!(matches!(session.reset(), Err(MidiError::NotOpen)));
    assert!(matches!(session.next_event(), Err(MidiError::NotOpen)));
    assert!(matches!(session.set_mode(1), Err(MidiError::NotOpen)));
}

#[test]
fn dropped_requests_reach_the_hook() {
    let transport = MockTransport::with_device(MINI_MK3);
    let seen = RefCell::new(Vec::new());
    let mut session = Session::new(Family::LaunchpadMiniMk3, &transport, SessionConfig::default())
        .with_diagnostics(|diagnostic| seen.borrow_mut().push(diagnostic.clone()));
    session.open().unwrap();
    transport.take_written();

    let command = LedCommand::RawByCode {
        index: 150,
        colorcode: 10,
    };
    session.send_led(&command).unwrap();
    session.set_layout(1).unwrap();
    assert!(transport.written().is_empty());
    assert_eq!(
        *seen.borrow(),
        vec![
            Diagnostic::OutOfRange {
                family: Family::LaunchpadMiniMk3,
                command,
            },
            Diagnostic::ModeRejected {
                family: Family::LaunchpadMiniMk3,
                command: ModeCommand::Layout(1),
            },
        ]
    );

    session.send_led(&LedCommand::xy(0, 0, 5)).unwrap();
    assert_eq!(transport.written(), vec![WireMessage::short(0x90, 91, 5)]);
}

#[test]
fn pressure_is_skipped_unless_asked_for() {
    let transport = MockTransport::with_device("LPX MIDI");
    let dropped = RefCell::new(0);
    let mut session = Session::new(Family::LaunchpadX, &transport, SessionConfig::default())
        .with_diagnostics(|diagnostic| {
            if let Diagnostic::PressureDropped { .. } = diagnostic {
                *dropped.borrow_mut() += 1;
            }
        });
    session.open().unwrap();

    transport.push_input(RawMessage::new(0xA0, 11, 20));
    transport.push_input(RawMessage::new(0xA0, 11, 40));
    transport.push_input(RawMessage::new(0x90, 11, 127));
    let event = session.next_event().unwrap().unwrap();
    assert_eq!(event.as_button().map(|b| b.xy), Some(Some(Xy::new(0, 8))));
    assert_eq!(*dropped.borrow(), 2);

    // Nothing but pressure waiting
    transport.push_input(RawMessage::new(0xA0, 11, 0));
    assert_eq!(session.next_event().unwrap(), None);
    assert_eq!(session.next_event().unwrap(), None);
}

#[test]
fn pressure_on_request() {
    let transport = MockTransport::with_device("Launchpad Pro MIDI");
    let config = SessionConfig::new().return_pressure(true).layout(Layout::Pro);
    let mut session = Session::new(Family::LaunchpadPro, &transport, config);
    session.open().unwrap();

    transport.push_input(RawMessage::new(0xD0, 77, 0));
    transport.push_input(RawMessage::new(0x90, 11, 127));
    match session.next_event().unwrap() {
        Some(InputEvent::Pressure(pressure)) => {
            assert_eq!(pressure.target, PressureTarget::Channel);
            assert_eq!(pressure.value, 77);
        }
        other => panic!("expected pressure, got {other:?}"),
    }
    let event = session.next_event().unwrap().unwrap();
    assert_eq!(event.as_button().and_then(|b| b.xy), Some(Xy::new(1, 8)));
}

#[test]
fn raw_events_and_flushing() {
    let transport = MockTransport::with_device(MINI_MK3);
    let mut session = Session::new(Family::LaunchpadMiniMk3, &transport, SessionConfig::default());
    session.open().unwrap();

    assert!(!session.button_changed().unwrap());
    transport.push_input(RawMessage::new(0x90, 45, 127));
    assert!(session.button_changed().unwrap());
    assert_eq!(session.event_raw().unwrap(), Some(RawMessage::new(0x90, 45, 127)));

    for note in [11, 12, 13] {
        transport.push_input(RawMessage::new(0x90, note, 0));
    }
    assert_eq!(session.flush_input().unwrap(), 3);
    assert_eq!(session.event_raw().unwrap(), None);
}

#[test]
fn flushing_ends_on_phantom_and_endless_input() {
    let transport = MockTransport::with_device(MINI_MK3);
    let mut session = Session::new(Family::LaunchpadMiniMk3, &transport, SessionConfig::default());
    session.open().unwrap();

    transport.phantom_input(true);
    assert_eq!(session.flush_input().unwrap(), 0);
    transport.phantom_input(false);

    for _ in 0..FLUSH_MAX_MESSAGES + 10 {
        transport.push_input(RawMessage::new(0xA0, 11, 64));
    }
    assert_eq!(session.flush_input().unwrap(), FLUSH_MAX_MESSAGES);
    assert_eq!(session.flush_input().unwrap(), 10);
}

#[test]
fn launch_control_templates() {
    let transport = MockTransport::with_device("Launch Control XL");
    let config = SessionConfig::new().template(3);
    let mut session = Session::new(Family::LaunchControlXl, &transport, config);
    session.open().unwrap();
    assert_eq!(
        transport.take_written(),
        vec![WireMessage::sysex(&[0x00, 0x20, 0x29, 0x02, 0x11], &[119, 2])]
    );

    session.set_template(10).unwrap();
    assert_eq!(session.template(), 10);
    session.reset().unwrap();
    assert_eq!(
        transport.take_written(),
        vec![
            WireMessage::sysex(&[0x00, 0x20, 0x29, 0x02, 0x11], &[119, 9]),
            WireMessage::short(0xB9, 0, 0),
        ]
    );

    session.set_template(0).unwrap();
    assert_eq!(session.template(), 10);
}

#[test]
fn port_name_override() {
    let transport = MockTransport::new();
    transport.add_device("Launchpad");
    transport.add_device("Launchpad S 2");
    let config = SessionConfig::new().port_name("launchpad s");
    let mut session = Session::new(Family::LaunchpadMk1, &transport, config);
    assert!(session.check().unwrap());
    session.open().unwrap();
    assert_eq!(transport.open_handles(), (1, 1));

    let config = SessionConfig::new().device_number(2);
    let mut third = Session::new(Family::LaunchpadMk1, &transport, config);
    assert!(!third.check().unwrap());
}

#[test]
fn text_on_the_grid() {
    let mut table = vec![0; 128 * 8];
    table[b'A' as usize * 8] = 0xFF;
    let font = Font::new(&table);

    let transport = MockTransport::with_device("Launchpad Mini");
    let config = SessionConfig::new().text_delay(Duration::ZERO);
    let mut session = Session::new(Family::LaunchpadMk1, &transport, config);
    session.open().unwrap();

    session.show_char(&font, 'A', LedColor::Code(0x33), 0).unwrap();
    let written = transport.take_written();
    assert_eq!(written.len(), 64);
    assert_eq!(written[0], WireMessage::short(0x90, 0, 0x33));
    assert_eq!(written[8], WireMessage::short(0x90, 0x10, 0));

    session
        .scroll_text(&font, "A", LedColor::Code(0x33), ScrollDirection::None)
        .unwrap();
    assert_eq!(transport.take_written().len(), 4 * 64);
}

/// A font whose 'A' lights the left half of every row
fn half_font_table() -> Vec<u8> {
    let mut table = vec![0; 128 * 8];
    table[b'A' as usize * 8..b'A' as usize * 8 + 8].fill(0xF0);
    table
}

/// Grid notes of the decade numbered Launchpads, top row first
fn decade_grid() -> Vec<u8> {
    (0..8u8)
        .flat_map(|row| (0..8u8).map(move |column| 81 - 10 * row + column))
        .collect()
}

fn text_session<'t>(
    family: Family,
    transport: &'t MockTransport,
    layout: Layout,
    dropped: &'t RefCell<usize>,
) -> Session<'t, MockTransport> {
    let config = SessionConfig::new()
        .layout(layout)
        .text_delay(Duration::ZERO);
    let count_dropped = move |diagnostic: &Diagnostic| {
        if let Diagnostic::OutOfRange { .. } = diagnostic {
            *dropped.borrow_mut() += 1;
        }
    };
    let mut session = Session::new(family, transport, config).with_diagnostics(count_dropped);
    session.open().unwrap();
    transport.take_written();
    session
}

#[test]
fn text_covers_the_grid_in_both_layouts() {
    let table = half_font_table();
    let font = Font::new(&table);
    let red = LedColor::Code(5);

    for (family, port) in [
        (Family::LaunchpadMiniMk3, MINI_MK3),
        (Family::LaunchpadPro, "Launchpad Pro MIDI"),
    ] {
        for layout in [Layout::Classic, Layout::Pro] {
            let transport = MockTransport::with_device(port);
            let dropped = RefCell::new(0);
            let mut session = text_session(family, &transport, layout, &dropped);

            session.show_char(&font, 'A', red, 0).unwrap();
            let expected: Vec<_> = decade_grid()
                .into_iter()
                .map(|note| {
                    let lit = (note % 10) <= 4;
                    WireMessage::short(0x90, note, if lit { 5 } else { 0 })
                })
                .collect();
            assert_eq!(transport.take_written(), expected, "{family} {layout:?}");
            assert_eq!(*dropped.borrow(), 0);
        }
    }
}

#[test]
fn shifted_text_is_clipped_at_the_edge() {
    let table = half_font_table();
    let font = Font::new(&table);
    let transport = MockTransport::with_device(MINI_MK3);
    let dropped = RefCell::new(0);
    let mut session = text_session(Family::LaunchpadMiniMk3, &transport, Layout::Pro, &dropped);

    // The lit half moves onto the right half of the grid
    session.show_char(&font, 'A', LedColor::Code(5), 4).unwrap();
    let written = transport.take_written();
    assert_eq!(written.len(), 32);
    assert_eq!(written[0], WireMessage::short(0x90, 85, 5));
    assert_eq!(written[3], WireMessage::short(0x90, 88, 5));
    assert_eq!(written[31], WireMessage::short(0x90, 18, 5));

    // Only the dark half stays on the grid
    session.show_char(&font, 'A', LedColor::Code(5), -4).unwrap();
    let written = transport.take_written();
    assert_eq!(written.len(), 32);
    assert_eq!(written[0], WireMessage::short(0x90, 81, 0));
    assert_eq!(written[31], WireMessage::short(0x90, 14, 0));
    assert_eq!(*dropped.borrow(), 0);
}

#[test]
fn scrolling_through_a_session() {
    let table = half_font_table();
    let font = Font::new(&table);

    for direction in [ScrollDirection::Left, ScrollDirection::Right] {
        let transport = MockTransport::with_device("LPX MIDI");
        let dropped = RefCell::new(0);
        let mut session = text_session(Family::LaunchpadX, &transport, Layout::Pro, &dropped);

        session
            .scroll_text(&font, "A", LedColor::Code(5), direction)
            .unwrap();
        let cells: usize = crate::text::scroll_frames("A", direction)
            .iter()
            .flatten()
            .map(|placement| 8 * (8 - placement.offset.unsigned_abs() as usize))
            .sum();
        assert_eq!(transport.take_written().len(), cells, "{direction:?}");
        assert_eq!(*dropped.borrow(), 0);
    }
}
