//! USB HID keyboard device on the nRF52840 USBD peripheral.
//!
//! Implements [`UsbBringup`] on top of embassy-usb and exposes the
//! interrupt-IN endpoint as a non-blocking [`HidSink`]: submissions go
//! into a small channel drained by the HID writer task.

use crate::config;
use crate::error::{Error, UsbError};
use crate::hid::KEYBOARD_REPORT_SIZE;
use crate::startup::UsbBringup;
use crate::usb::readiness::{UsbStatus, USB_READINESS};
use crate::usb::sink::HidSink;
use embassy_executor::Spawner;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration, Timer};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;
type KeyboardWriter = HidWriter<'static, UsbDriver, KEYBOARD_REPORT_SIZE>;
type Report = [u8; KEYBOARD_REPORT_SIZE];

static KB_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_STATUS_HANDLER: StaticCell<UsbStatusHandler> = StaticCell::new();
static USB_CONFIGURED_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Interrupt-IN submissions waiting for the writer task.
pub static HID_REPORTS: Channel<CriticalSectionRawMutex, Report, { config::HID_ENDPOINT_DEPTH }> =
    Channel::new();

/// Maps embassy-usb bus callbacks onto [`UsbStatus`] transitions.
struct UsbStatusHandler;

impl embassy_usb::Handler for UsbStatusHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            USB_READINESS.on_status(UsbStatus::Disconnected);
        }
    }

    fn reset(&mut self) {
        USB_READINESS.on_status(UsbStatus::Reset);
    }

    fn configured(&mut self, configured: bool) {
        let status = if configured {
            UsbStatus::Configured
        } else {
            UsbStatus::Disconnected
        };
        if USB_READINESS.on_status(status) {
            USB_CONFIGURED_SIGNAL.signal(());
        }
    }

    fn suspended(&mut self, suspended: bool) {
        let status = if suspended {
            UsbStatus::Suspend
        } else {
            UsbStatus::Resume
        };
        USB_READINESS.on_status(status);
    }
}

/// Interrupt-IN endpoint handle used by the report forwarder.
pub struct HidEndpoint {
    tx: Sender<'static, CriticalSectionRawMutex, Report, { config::HID_ENDPOINT_DEPTH }>,
}

impl HidEndpoint {
    pub fn new() -> Self {
        Self {
            tx: HID_REPORTS.sender(),
        }
    }
}

impl Default for HidEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl HidSink for HidEndpoint {
    fn submit(&mut self, report: &Report) -> Result<(), UsbError> {
        self.tx.try_send(*report).map_err(|_| UsbError::WriteFailed)
    }
}

/// Bring-up progress of the USB stack.
enum Stage {
    Unclaimed(peripherals::USBD),
    Acquired(UsbDriver),
    Registered(Builder<'static, UsbDriver>, KeyboardWriter),
    Built(UsbDevice<'static, UsbDriver>, KeyboardWriter),
    Enabled,
    Failed,
}

/// The receiver's USB keyboard, brought up step by step by
/// [`startup::bring_up_usb`](crate::startup::bring_up_usb).
pub struct UsbHidKeyboard {
    spawner: Spawner,
    stage: Stage,
}

impl UsbHidKeyboard {
    pub fn new(spawner: Spawner, usbd: peripherals::USBD) -> Self {
        Self {
            spawner,
            stage: Stage::Unclaimed(usbd),
        }
    }

    fn take_stage(&mut self) -> Stage {
        core::mem::replace(&mut self.stage, Stage::Failed)
    }
}

impl UsbBringup for UsbHidKeyboard {
    fn acquire_device(&mut self) -> Result<(), Error> {
        match self.take_stage() {
            Stage::Unclaimed(usbd) => {
                // Create the low-level USB driver with hardware VBUS detection.
                let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));
                self.stage = Stage::Acquired(driver);
                Ok(())
            }
            _ => Err(Error::DeviceNotFound),
        }
    }

    fn is_device_ready(&self) -> bool {
        matches!(self.stage, Stage::Acquired(_))
    }

    fn register_hid(&mut self, report_descriptor: &'static [u8]) {
        let Stage::Acquired(driver) = self.take_stage() else {
            return;
        };

        // USB device-level configuration.
        let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
        usb_config.manufacturer = Some(config::USB_MANUFACTURER);
        usb_config.product = Some(config::USB_PRODUCT);
        usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
        usb_config.max_power = 100; // mA
        usb_config.max_packet_size_0 = 64;

        let mut builder = Builder::new(
            driver,
            usb_config,
            USB_CONFIG_DESC.init([0u8; 256]),
            USB_BOS_DESC.init([0u8; 256]),
            USB_MSOS_DESC.init([0u8; 256]),
            USB_CTRL_BUF.init([0u8; 128]),
        );
        builder.handler(USB_STATUS_HANDLER.init(UsbStatusHandler));

        let kb_config = HidConfig {
            report_descriptor,
            request_handler: None,
            poll_ms: config::USB_HID_POLL_MS,
            max_packet_size: KEYBOARD_REPORT_SIZE as u16,
        };
        let writer = HidWriter::new(&mut builder, KB_STATE.init(State::new()), kb_config);
        self.stage = Stage::Registered(builder, writer);
    }

    fn init_hid(&mut self) -> Result<(), Error> {
        match self.take_stage() {
            Stage::Registered(builder, writer) => {
                self.stage = Stage::Built(builder.build(), writer);
                Ok(())
            }
            _ => Err(Error::HidInit),
        }
    }

    fn enable(&mut self) -> Result<(), Error> {
        let Stage::Built(device, writer) = self.take_stage() else {
            return Err(Error::UsbEnable);
        };
        self.spawner
            .spawn(run_usb_device(device))
            .map_err(|_| Error::UsbEnable)?;
        self.spawner
            .spawn(hid_writer_task(writer, HID_REPORTS.receiver()))
            .map_err(|_| Error::UsbEnable)?;
        self.stage = Stage::Enabled;
        Ok(())
    }

    async fn settle(&mut self, millis: u64) {
        Timer::after_millis(millis).await;
    }

    async fn wait_configured(&mut self, timeout_millis: u64) -> bool {
        if USB_READINESS.is_configured() {
            return true;
        }
        with_timeout(
            Duration::from_millis(timeout_millis),
            USB_CONFIGURED_SIGNAL.wait(),
        )
        .await
        .is_ok()
    }
}

/// Run the USB device stack - handles enumeration, suspend/resume and
/// endpoint servicing for as long as the device is powered.
#[embassy_executor::task]
async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Drain submitted reports into the interrupt-IN endpoint.
#[embassy_executor::task]
async fn hid_writer_task(
    mut keyboard: KeyboardWriter,
    reports: Receiver<'static, CriticalSectionRawMutex, Report, { config::HID_ENDPOINT_DEPTH }>,
) -> ! {
    info!("HID writer task started - waiting for reports");

    loop {
        let report = reports.receive().await;
        if keyboard.write(&report).await.is_err() {
            warn!("USB keyboard write failed");
        }
    }
}
