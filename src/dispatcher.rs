//! Event dispatcher - the receive-side state machine.
//!
//! Classifies each link event and decides what happens to it:
//!
//! | Event                    | Action                                   |
//! |--------------------------|------------------------------------------|
//! | TX success / TX failed   | diagnostic only (receive-only mode)      |
//! | RX, 8 bytes              | forward if the USB link is configured    |
//! | RX, 2 bytes              | log the link-test bytes                  |
//! | RX, any other length     | warning with raw bytes                   |
//! | RX, read failed          | error log, reception continues           |
//!
//! Nothing here blocks: the dispatcher runs inside the radio interrupt.

use crate::error::{RuntimeWarning, UsbError};
use crate::hid::{classify_payload, KeyboardReport, PayloadKind};
use crate::forwarder::ReportForwarder;
use crate::radio::payload::RadioPayload;
use crate::radio::receiver::{EventHandler, LinkEvent};
use crate::usb::readiness::UsbReadiness;
use crate::usb::sink::HidSink;

/// What the dispatcher did with one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Press and release both handed to the HID endpoint.
    Forwarded,
    /// At least one of the two submissions was rejected.
    DeliveryFailed(UsbError),
    /// Keyboard report dropped: HID not ready or host not configured.
    Dropped,
    /// Two-byte link-test payload, logged only.
    LinkTest([u8; 2]),
    /// Non-fatal anomaly, logged.
    Warning(RuntimeWarning),
}

pub struct Dispatcher<'a, S> {
    forwarder: ReportForwarder<S>,
    readiness: &'a UsbReadiness,
}

impl<'a, S: HidSink> Dispatcher<'a, S> {
    pub const fn new(forwarder: ReportForwarder<S>, readiness: &'a UsbReadiness) -> Self {
        Self {
            forwarder,
            readiness,
        }
    }

    pub fn dispatch(&mut self, event: LinkEvent<'_>) -> Dispatch {
        match event {
            LinkEvent::TxSuccess => {
                info!("TX success (unexpected in PRX mode)");
                Dispatch::Warning(RuntimeWarning::UnexpectedTxSuccess)
            }
            LinkEvent::TxFailed => {
                error!("TX failed (unexpected in PRX mode)");
                Dispatch::Warning(RuntimeWarning::UnexpectedTxFailed)
            }
            LinkEvent::ReadFailed(e) => {
                error!("Failed to read RX payload: {:?}", e);
                Dispatch::Warning(RuntimeWarning::ReadFailed(e))
            }
            LinkEvent::Received(payload) => self.dispatch_payload(payload),
        }
    }

    fn dispatch_payload(&mut self, payload: &RadioPayload) -> Dispatch {
        let data = payload.data();
        info!(
            "Received payload (length: {} bytes, pipe {}): {=[u8]:x}",
            payload.len(),
            payload.pipe(),
            data
        );

        match classify_payload(data) {
            PayloadKind::Report(report) => self.dispatch_report(report),
            PayloadKind::LinkTest(bytes) => {
                info!(
                    "Received test payload (2 bytes): D+ = {}, D- = {}",
                    bytes[0],
                    bytes[1]
                );
                Dispatch::LinkTest(bytes)
            }
            PayloadKind::Unrecognized(raw) => {
                warn!("Unexpected payload length: {}", raw.len());
                info!("Unexpected payload: {=[u8]:x}", raw);
                Dispatch::Warning(RuntimeWarning::UnexpectedLength(raw.len() as u8))
            }
        }
    }

    fn dispatch_report(&mut self, report: KeyboardReport) -> Dispatch {
        if !self.forwarder.is_ready() || !self.readiness.is_configured() {
            debug!("USB not configured, dropping HID report");
            return Dispatch::Dropped;
        }

        debug!(
            "Processing HID report: modifier={=u8:x}, {} key(s)",
            report.modifier,
            report.pressed_count()
        );
        match self.forwarder.forward(report) {
            Ok(()) => Dispatch::Forwarded,
            Err(e) => Dispatch::DeliveryFailed(e),
        }
    }

    pub fn forwarder(&self) -> &ReportForwarder<S> {
        &self.forwarder
    }
}

impl<S: HidSink> EventHandler for Dispatcher<'_, S> {
    fn on_event(&mut self, event: LinkEvent<'_>) {
        // Every outcome has already been logged; nothing propagates past
        // the radio callback.
        let _ = self.dispatch(event);
    }
}
