//! One-time bring-up sequence.
//!
//! Order is fixed: HID device -> readiness check -> report descriptor ->
//! HID class -> USB enable -> host configuration -> radio parameters ->
//! addressing -> receive. Each stage assumes the previous ones exist, so
//! the first failure ends startup and leaves the receiver inert.

use crate::config;
use crate::error::Error;
use crate::hid::KEYBOARD_REPORT_DESCRIPTOR;
use crate::radio::config::{Addressing, LinkConfiguration};
use crate::radio::link::EsbLink;
use crate::radio::receiver::{EventHandler, RadioReceiver};

/// USB device stack operations needed during bring-up.
///
/// Only `settle` and `wait_configured` may wait, and both are bounded.
#[allow(async_fn_in_trait)]
pub trait UsbBringup {
    /// Acquire the HID device handle.
    fn acquire_device(&mut self) -> Result<(), Error>;

    /// Whether the acquired device's driver is ready for use.
    fn is_device_ready(&self) -> bool;

    /// Register the HID report descriptor with the device.
    fn register_hid(&mut self, report_descriptor: &'static [u8]);

    /// Initialise the HID class.
    fn init_hid(&mut self) -> Result<(), Error>;

    /// Enable the USB device stack; the host may enumerate from here on.
    fn enable(&mut self) -> Result<(), Error>;

    /// Fixed hardware settling delay.
    async fn settle(&mut self, millis: u64);

    /// Wait for the configuration handshake, at most `timeout_millis`.
    /// Returns `true` if the host configured the device in time.
    async fn wait_configured(&mut self, timeout_millis: u64) -> bool;
}

/// USB half of startup: everything up to the host configuration wait.
///
/// A configuration timeout is not fatal; reports are dropped until the
/// host configures the device.
pub async fn bring_up_usb<U: UsbBringup>(usb: &mut U) -> Result<(), Error> {
    info!("Starting 2.4GHz HID keyboard receiver");

    usb.acquire_device().inspect_err(|_| {
        error!("Failed to get USB HID device");
    })?;
    info!("USB device acquired, checking readiness...");

    if !usb.is_device_ready() {
        error!("USB device not ready");
        return Err(Error::DeviceNotReady);
    }
    info!("USB device found and ready");

    usb.register_hid(KEYBOARD_REPORT_DESCRIPTOR);
    info!("HID registered");

    usb.init_hid().inspect_err(|e| {
        error!("Failed to init USB HID: {:?}", e);
    })?;
    info!("HID initialized");

    usb.settle(config::USB_ENABLE_SETTLE_MS).await;
    usb.enable().inspect_err(|e| {
        error!("Failed to enable USB: {:?}", e);
    })?;
    info!("USB enabled");

    if usb.wait_configured(config::USB_CONFIGURE_TIMEOUT_MS).await {
        info!("USB configured by host");
    } else {
        warn!(
            "USB not configured after {} ms, continuing",
            config::USB_CONFIGURE_TIMEOUT_MS
        );
    }
    Ok(())
}

/// Radio half of startup: configure, address and start the receiver.
pub fn start_radio<L: EsbLink, H: EventHandler>(
    receiver: &mut RadioReceiver<L, H>,
    link_config: LinkConfiguration<H>,
    addressing: &Addressing,
) -> Result<(), Error> {
    receiver.initialize(link_config)?;
    receiver.set_addressing(addressing.base_address, addressing.prefixes)?;
    receiver.start_receiving()?;
    info!("ESB receiver initialized and started successfully");
    Ok(())
}

/// Full startup sequence.
pub async fn run<U: UsbBringup, L: EsbLink, H: EventHandler>(
    usb: &mut U,
    receiver: &mut RadioReceiver<L, H>,
    link_config: LinkConfiguration<H>,
    addressing: &Addressing,
) -> Result<(), Error> {
    bring_up_usb(usb).await?;
    start_radio(receiver, link_config, addressing)
}
