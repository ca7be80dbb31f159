//! Error types for esb2usb.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

use core::fmt;

/// Startup error. Every variant is fatal: the bring-up sequence stops and
/// the receiver stays inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // USB
    /// The HID device handle could not be acquired.
    DeviceNotFound,

    /// The HID device exists but its driver is not ready.
    DeviceNotReady,

    /// HID class initialisation failed.
    HidInit,

    /// The USB device stack could not be enabled.
    UsbEnable,

    // Radio
    /// The radio link rejected configuration, addressing or start.
    Link(LinkError),
}

/// Radio link layer errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Invalid parameter combination, already initialised, or hardware busy.
    InitFailed,
    /// Invalid address/prefix set, or addressing applied at the wrong time.
    AddressRejected,
    /// The radio could not enter receive mode.
    StartFailed,
    /// A received payload could not be read (CRC error, bad length).
    ReadFailed,
}

/// USB HID transport errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbError {
    /// The interrupt-IN endpoint rejected a report (e.g. busy).
    WriteFailed,
}

/// Non-fatal conditions raised while handling radio events. Logged, the
/// event is dropped and reception continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RuntimeWarning {
    /// TX success reported while in receive-only mode.
    UnexpectedTxSuccess,
    /// TX failure reported while in receive-only mode.
    UnexpectedTxFailed,
    /// Payload length is neither a keyboard report nor a test payload.
    UnexpectedLength(u8),
    /// The link signalled a reception but the payload could not be read.
    ReadFailed(LinkError),
}

// Convenience conversions

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Error::Link(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceNotFound => write!(f, "HID device not found"),
            Self::DeviceNotReady => write!(f, "HID device not ready"),
            Self::HidInit => write!(f, "HID class initialisation failed"),
            Self::UsbEnable => write!(f, "USB enable failed"),
            Self::Link(e) => write!(f, "radio link: {}", e),
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed => write!(f, "initialisation failed"),
            Self::AddressRejected => write!(f, "address rejected"),
            Self::StartFailed => write!(f, "receive start failed"),
            Self::ReadFailed => write!(f, "payload read failed"),
        }
    }
}

impl fmt::Display for UsbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "HID endpoint write failed"),
        }
    }
}

impl fmt::Display for RuntimeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedTxSuccess => write!(f, "TX success (unexpected in PRX mode)"),
            Self::UnexpectedTxFailed => write!(f, "TX failed (unexpected in PRX mode)"),
            Self::UnexpectedLength(len) => write!(f, "unexpected payload length: {}", len),
            Self::ReadFailed(e) => write!(f, "failed to read RX payload: {}", e),
        }
    }
}
