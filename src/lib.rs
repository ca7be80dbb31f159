//! 2.4 GHz ESB -> USB HID keyboard receiver.
//!
//! Radio payloads arrive from a remote keyboard over an Enhanced
//! ShockBurst link. Eight-byte payloads are boot-keyboard reports and are
//! forwarded to the USB host, each followed by an all-zero release report;
//! two-byte payloads are link tests and are only logged.
//!
//! The dispatch and forwarding logic is `no_std` and runs on the host for
//! testing (`cargo test`). The nRF52840 firmware is the `esb2usb` binary,
//! built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod forwarder;
pub mod hid;
pub mod radio;
pub mod startup;
pub mod usb;

#[cfg(test)]
mod mock;

pub use dispatcher::{Dispatch, Dispatcher};
pub use error::{Error, LinkError, RuntimeWarning, UsbError};
pub use forwarder::ReportForwarder;
pub use hid::KeyboardReport;
pub use usb::readiness::{UsbReadiness, UsbStatus, USB_READINESS};
pub use usb::sink::HidSink;
