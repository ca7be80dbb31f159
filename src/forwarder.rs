//! Report forwarder - press report followed by a forced release.

use crate::error::UsbError;
use crate::hid::KeyboardReport;
use crate::usb::sink::HidSink;

/// Sends each keyboard report to the host, then an all-zero report so the
/// key never stays down on the host side.
pub struct ReportForwarder<S> {
    sink: S,
}

impl<S: HidSink> ReportForwarder<S> {
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Whether the underlying HID device is usable.
    pub fn is_ready(&self) -> bool {
        self.sink.is_ready()
    }

    /// Submit `report`, then the release report.
    ///
    /// Both submissions are always attempted, so a rejected press still
    /// gets its release. Returns `WriteFailed` if either was rejected.
    pub fn forward(&mut self, report: KeyboardReport) -> Result<(), UsbError> {
        let release = KeyboardReport::release();

        let pressed = self.sink.submit(&report.to_bytes());
        if let Err(e) = pressed {
            warn!("HID press report rejected: {:?}", e);
        }

        let released = self.sink.submit(&release.to_bytes());
        if let Err(e) = released {
            warn!("HID release report rejected: {:?}", e);
        }

        pressed.and(released)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
