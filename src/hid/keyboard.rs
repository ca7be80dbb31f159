//! USB HID keyboard report (boot protocol compatible).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield over usage codes 224-231)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (0 = no key, 1-101)
//! ```

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// First and last modifier usage code.
pub const KEY_CTRL_CODE_MIN: u8 = 224;
pub const KEY_CTRL_CODE_MAX: u8 = 231;

/// Highest key code the report descriptor declares.
pub const KEY_CODE_MAX: u8 = 101;

/// Simultaneous key slots.
pub const KEY_PRESS_MAX: usize = 6;

const _: () = assert!((KEY_CTRL_CODE_MAX - KEY_CTRL_CODE_MIN) as usize + 1 == 8);
const _: () = assert!(1 + 1 + KEY_PRESS_MAX == KEYBOARD_REPORT_SIZE);

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (0x00 in the boot protocol, forwarded as received).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; KEY_PRESS_MAX],
}

impl KeyboardReport {
    /// The all-keys-released report.
    pub const fn release() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; KEY_PRESS_MAX],
        }
    }

    /// Copy a report verbatim out of a radio payload.
    ///
    /// Only an exact 8-byte payload is a keyboard report; the length is
    /// the sole framing on the wire.
    pub fn from_payload(data: &[u8]) -> Option<Self> {
        let bytes: &[u8; KEYBOARD_REPORT_SIZE] = data.try_into().ok()?;
        Some(Self::from_bytes(bytes))
    }

    pub const fn from_bytes(b: &[u8; KEYBOARD_REPORT_SIZE]) -> Self {
        Self {
            modifier: b[0],
            reserved: b[1],
            keycodes: [b[2], b[3], b[4], b[5], b[6], b[7]],
        }
    }

    /// Wire representation for the interrupt-IN endpoint.
    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..].copy_from_slice(&self.keycodes);
        buf
    }

    /// Returns `true` if this is byte-for-byte the all-zero release report.
    #[cfg(test)]
    pub fn is_release(&self) -> bool {
        self.to_bytes() == [0u8; KEYBOARD_REPORT_SIZE]
    }

    /// Number of occupied key slots.
    pub fn pressed_count(&self) -> usize {
        self.keycodes.iter().filter(|&&k| k != 0).count()
    }
}

// USB HID report descriptor for a boot-protocol keyboard

/// USB HID Report Descriptor for the receiver keyboard.
///
/// Input only: 8 modifier bits, 1 constant byte and 6 key code bytes in
/// the range 0-101. The receiver has no LED output report.
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Modifier keys (8 bits) -
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (224)
    0x29, 0xE7, //   Usage Maximum (231)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant)
    //
    //   - Key codes (6 bytes) -
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x65, //   Logical Maximum (101)
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0x65, //   Usage Maximum (101)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];
