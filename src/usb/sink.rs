//! HID interrupt-IN endpoint, as seen by the report forwarder.

use crate::error::UsbError;
use crate::hid::KEYBOARD_REPORT_SIZE;

/// Non-blocking submission of keyboard reports to the host.
///
/// `submit` hands the report to the transport and returns at once; it
/// reports only whether the transport took it, never whether the host
/// read it.
pub trait HidSink {
    /// Whether the HID device was acquired and its class initialised.
    fn is_ready(&self) -> bool {
        true
    }

    fn submit(&mut self, report: &[u8; KEYBOARD_REPORT_SIZE]) -> Result<(), UsbError>;
}
