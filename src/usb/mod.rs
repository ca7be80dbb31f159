//! USB side of the bridge.
//!
//! - `readiness`: the atomic `configured` flag and the status handler
//!   that drives it.
//! - `sink`: the non-blocking HID endpoint trait the forwarder writes to.
//! - `hid_device` (embedded only): the embassy-usb keyboard device on the
//!   nRF52840 USBD peripheral.

pub mod readiness;
pub mod sink;

#[cfg(feature = "embedded")]
pub mod hid_device;
