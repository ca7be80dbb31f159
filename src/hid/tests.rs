//! Unit tests for keyboard report parsing and payload classification.
//!
//! These tests run on the host (not embedded) and verify the pure
//! logic of report construction and length-based classification.

use super::keyboard::{KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR, KEY_CODE_MAX};
use super::{classify_payload, PayloadKind};

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keyboard_report_release() {
    let report = KeyboardReport::release();
    assert!(report.is_release());
    assert_eq!(report.modifier, 0);
    assert_eq!(report.reserved, 0);
    assert_eq!(report.keycodes, [0; 6]);
    assert_eq!(report.to_bytes(), [0u8; 8]);
}

#[test]
fn keyboard_report_from_payload() {
    // Modifier: Left Shift (0x02), Reserved: 0, Keys: 'a' (0x04)
    let data = [0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];
    let report = KeyboardReport::from_payload(&data).unwrap();

    assert_eq!(report.modifier, 0x02);
    assert_eq!(report.reserved, 0x00);
    assert_eq!(report.keycodes[0], 0x04);
    assert_eq!(report.pressed_count(), 1);
    assert!(!report.is_release());
}

#[test]
fn keyboard_report_requires_exact_length() {
    assert!(KeyboardReport::from_payload(&[]).is_none());
    assert!(KeyboardReport::from_payload(&[0x02, 0x00, 0x04]).is_none());
    assert!(KeyboardReport::from_payload(&[0; 7]).is_none());
    assert!(KeyboardReport::from_payload(&[0; 9]).is_none());
}

#[test]
fn keyboard_report_bytes_are_verbatim() {
    // Out-of-range codes and a non-zero reserved byte pass through untouched.
    let data = [0xFF, 0x7E, 0x04, 0x05, 0x06, 0x07, 0x08, 0xF0];
    let report = KeyboardReport::from_payload(&data).unwrap();
    assert_eq!(report.to_bytes(), data);
    assert_eq!(report.pressed_count(), 6);
}

#[test]
fn modifier_only_report_is_not_release() {
    let data = [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    let report = KeyboardReport::from_payload(&data).unwrap();
    assert_eq!(report.pressed_count(), 0);
    assert!(!report.is_release());
}

#[test]
fn reserved_byte_alone_is_not_release() {
    let data = [0x00, 0x7E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    let report = KeyboardReport::from_payload(&data).unwrap();
    assert_eq!(report.pressed_count(), 0);
    assert!(!report.is_release());
}

#[test]
fn report_descriptor_declares_boot_keyboard_layout() {
    assert_eq!(KEYBOARD_REPORT_DESCRIPTOR.len(), 45);
    assert_eq!(&KEYBOARD_REPORT_DESCRIPTOR[..6], &[0x05, 0x01, 0x09, 0x06, 0xA1, 0x01]);
    assert_eq!(KEYBOARD_REPORT_DESCRIPTOR.last(), Some(&0xC0));
    // Logical Maximum for key slots.
    assert!(KEYBOARD_REPORT_DESCRIPTOR
        .windows(2)
        .any(|w| w == [0x25, KEY_CODE_MAX]));
}

// ═══════════════════════════════════════════════════════════════════════════
// Payload Classification Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn classify_eight_bytes_as_report() {
    let data = [0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];
    match classify_payload(&data) {
        PayloadKind::Report(report) => assert_eq!(report.to_bytes(), data),
        other => panic!("expected report, got {:?}", other),
    }
}

#[test]
fn classify_two_bytes_as_link_test() {
    assert_eq!(classify_payload(&[0x01, 0x02]), PayloadKind::LinkTest([0x01, 0x02]));
}

#[test]
fn classify_other_lengths_as_unrecognized() {
    for len in [0usize, 1, 3, 5, 7, 9, 32] {
        let data = [0xAAu8; 32];
        assert_eq!(
            classify_payload(&data[..len]),
            PayloadKind::Unrecognized(&data[..len]),
            "length {}",
            len
        );
    }
}
