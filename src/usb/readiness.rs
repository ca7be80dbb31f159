//! USB readiness - the `configured` flag shared between the USB status
//! handler (single writer) and the report path (readers).

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config;

/// Bus state transitions reported by the USB device stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbStatus {
    Configured,
    Disconnected,
    Reset,
    Suspend,
    Resume,
}

/// Whether the host has configured the device.
pub struct UsbReadiness {
    configured: AtomicBool,
}

/// Process-wide readiness, driven by the USB stack's status handler.
pub static USB_READINESS: UsbReadiness = UsbReadiness::new(config::USB_ASSUME_CONFIGURED);

impl UsbReadiness {
    pub const fn new(configured: bool) -> Self {
        Self {
            configured: AtomicBool::new(configured),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::Acquire)
    }

    pub fn set_configured(&self, configured: bool) {
        self.configured.store(configured, Ordering::Release);
    }

    /// Apply a status transition. Returns `true` when the transition is the
    /// configuration handshake completing.
    pub fn on_status(&self, status: UsbStatus) -> bool {
        match status {
            UsbStatus::Configured => {
                info!("USB configured");
                self.set_configured(true);
                true
            }
            UsbStatus::Disconnected => {
                info!("USB disconnected, reports will be dropped");
                self.set_configured(false);
                false
            }
            UsbStatus::Reset => {
                info!("USB reset, reports will be dropped");
                self.set_configured(false);
                false
            }
            UsbStatus::Suspend => {
                info!("USB suspended");
                false
            }
            UsbStatus::Resume => {
                info!("USB resumed");
                false
            }
        }
    }
}
