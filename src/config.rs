//! Application-wide constants and compile-time configuration.
//!
//! USB identity, startup timing and the default radio link parameters
//! live here so they can be tuned in one place.

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "esb2usb";
pub const USB_PRODUCT: &str = "2.4GHz HID Keyboard Receiver";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms). 1 ms = 1000 Hz for lowest latency.
pub const USB_HID_POLL_MS: u8 = 1;

/// Depth of the interrupt-IN submission channel. Holds exactly one
/// press + release pair.
pub const HID_ENDPOINT_DEPTH: usize = 2;

// Startup timing

/// Hardware settling delay between HID class init and USB enable (ms).
pub const USB_ENABLE_SETTLE_MS: u64 = 10;

/// Upper bound on the wait for the host configuration handshake (ms).
pub const USB_CONFIGURE_TIMEOUT_MS: u64 = 350;

/// Initial value of the USB `configured` flag.
pub const USB_ASSUME_CONFIGURED: bool = cfg!(feature = "assume-configured");

// Radio link

/// RF channel (2400 MHz + n). Channel 2 is the ESB default.
pub const ESB_RF_CHANNEL: u8 = 2;

/// Fixed payload length advertised to the link; one keyboard report.
pub const ESB_PAYLOAD_LENGTH: u8 = 8;

/// Automatic retransmissions performed by the link layer.
pub const ESB_RETRANSMIT_COUNT: u8 = 3;

/// Base address for pipe 0.
pub const ESB_BASE_ADDRESS_0: [u8; 4] = [0xAB, 0x12, 0xCD, 0x34];

/// Base address for pipes 1-7 (ESB default, not reconfigured).
pub const ESB_BASE_ADDRESS_1: [u8; 4] = [0xC2, 0xC2, 0xC2, 0xC2];

/// Address prefixes for pipes 0-7.
pub const ESB_PREFIXES: [u8; 8] = [0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8];
