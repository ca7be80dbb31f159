//! HID keyboard report types and the radio payload -> report mapping.

pub mod keyboard;

#[cfg(test)]
mod tests;

pub use keyboard::{KeyboardReport, KEYBOARD_REPORT_DESCRIPTOR, KEYBOARD_REPORT_SIZE};

/// Length of the link-test payload.
pub const LINK_TEST_PAYLOAD_SIZE: usize = 2;

/// What a radio payload carries. The length is the only message tag on
/// the wire: 8 bytes is a keyboard report, 2 bytes a link-test payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadKind<'a> {
    Report(KeyboardReport),
    LinkTest([u8; LINK_TEST_PAYLOAD_SIZE]),
    Unrecognized(&'a [u8]),
}

pub fn classify_payload(data: &[u8]) -> PayloadKind<'_> {
    match data.len() {
        KEYBOARD_REPORT_SIZE => match KeyboardReport::from_payload(data) {
            Some(report) => PayloadKind::Report(report),
            None => PayloadKind::Unrecognized(data),
        },
        LINK_TEST_PAYLOAD_SIZE => PayloadKind::LinkTest([data[0], data[1]]),
        _ => PayloadKind::Unrecognized(data),
    }
}
