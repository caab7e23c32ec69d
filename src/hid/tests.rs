//! Unit tests for action → HID report translation.
//!
//! These tests run on the host (not embedded) and check the usage codes
//! and byte layout the knob puts on the wire.

use super::consumer::{ConsumerReport, ConsumerUsage, CONSUMER_REPORT_SIZE};
use super::keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE, KEY_DOWN_ARROW, KEY_UP_ARROW};
use super::HidReport;
use crate::knob::Action;

// ═══════════════════════════════════════════════════════════════════════════
// Consumer actions
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn volume_and_media_actions_use_consumer_page() {
    let cases = [
        (Action::VolumeUp, ConsumerUsage::VolumeUp),
        (Action::VolumeDown, ConsumerUsage::VolumeDown),
        (Action::Play, ConsumerUsage::PlayPause),
        (Action::Next, ConsumerUsage::NextTrack),
        (Action::Previous, ConsumerUsage::PrevTrack),
    ];
    for (action, usage) in cases {
        match HidReport::for_action(action) {
            HidReport::Consumer(c) => assert_eq!(c, ConsumerReport::new(usage)),
            other => panic!("expected consumer report, got {:?}", other),
        }
    }
}

#[test]
fn volume_up_serializes_little_endian() {
    let report = HidReport::for_action(Action::VolumeUp);
    let mut buf = [0u8; 8];
    assert_eq!(report.serialize(&mut buf), CONSUMER_REPORT_SIZE);
    assert_eq!(&buf[..2], &[0xE9, 0x00]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard actions
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn scroll_actions_are_arrow_keys() {
    assert_eq!(
        HidReport::for_action(Action::ScrollUp),
        HidReport::Keyboard(KeyboardReport::single_key(KEY_UP_ARROW))
    );
    assert_eq!(
        HidReport::for_action(Action::ScrollDown),
        HidReport::Keyboard(KeyboardReport::single_key(KEY_DOWN_ARROW))
    );
}

#[test]
fn scroll_down_serializes_boot_layout() {
    let report = HidReport::for_action(Action::ScrollDown);
    let mut buf = [0u8; 8];
    assert_eq!(report.serialize(&mut buf), KEYBOARD_REPORT_SIZE);
    assert_eq!(buf, [0x00, 0x00, 0x51, 0x00, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn keyboard_serialize_buffer_too_small() {
    let report = HidReport::for_action(Action::ScrollUp);
    let mut buf = [0u8; 4];
    assert_eq!(report.serialize(&mut buf), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Release reports
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn release_stays_on_the_same_interface() {
    for action in [
        Action::VolumeUp,
        Action::VolumeDown,
        Action::ScrollUp,
        Action::ScrollDown,
        Action::Play,
        Action::Next,
        Action::Previous,
    ] {
        let press = HidReport::for_action(action);
        let release = press.released();
        assert_eq!(press.is_keyboard(), release.is_keyboard());
        assert_eq!(press.is_consumer(), release.is_consumer());
        assert_ne!(press, release);
        let mut buf = [0xFFu8; 8];
        let n = release.serialize(&mut buf);
        assert!(n > 0);
        assert!(buf[..n].iter().all(|&b| b == 0), "{:?} not released", action);
    }
}
