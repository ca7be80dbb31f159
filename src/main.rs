//! esb2usb - 2.4 GHz ESB keyboard receiver for nRF52840.
//!
//! Brings up the USB HID keyboard, then the radio in PRX mode. From there
//! on everything happens in the RADIO interrupt: each received payload is
//! classified and, if it is a keyboard report, forwarded to the host
//! followed by a release report.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_nrf::config::{Config, HfclkSource};
use embassy_nrf::{bind_interrupts, interrupt};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use esb2usb::radio::nrf::NrfEsb;
use esb2usb::radio::{Addressing, LinkConfiguration, RadioReceiver};
use esb2usb::startup;
use esb2usb::usb::hid_device::{HidEndpoint, UsbHidKeyboard};
use esb2usb::{Dispatcher, ReportForwarder, USB_READINESS};

type Receiver = RadioReceiver<NrfEsb, Dispatcher<'static, HidEndpoint>>;

/// Receiver shared with the RADIO interrupt.
static RECEIVER: Mutex<CriticalSectionRawMutex, RefCell<Option<Receiver>>> =
    Mutex::new(RefCell::new(None));

struct RadioInterruptHandler;

impl interrupt::typelevel::Handler<interrupt::typelevel::RADIO> for RadioInterruptHandler {
    unsafe fn on_interrupt() {
        let Some(event) = NrfEsb::take_event() else {
            return;
        };
        RECEIVER.lock(|cell| {
            if let Some(receiver) = cell.borrow_mut().as_mut() {
                receiver.on_event(event);
            }
        });
    }
}

bind_interrupts!(struct RadioIrqs {
    RADIO => RadioInterruptHandler;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // The radio needs the crystal oscillator; the RC source drifts too far.
    let mut config = Config::default();
    config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(config);

    let mut usb = UsbHidKeyboard::new(spawner, p.USBD);
    if let Err(e) = startup::bring_up_usb(&mut usb).await {
        error!("USB bring-up failed: {:?}", e);
        return;
    }

    let dispatcher = Dispatcher::new(ReportForwarder::new(HidEndpoint::new()), &USB_READINESS);
    let started = RECEIVER.lock(|cell| {
        let mut slot = cell.borrow_mut();
        let receiver = slot.insert(RadioReceiver::new(NrfEsb::new(p.RADIO)));
        startup::start_radio(
            receiver,
            LinkConfiguration::new(dispatcher),
            &Addressing::default(),
        )
    });
    if let Err(e) = started {
        error!("Radio bring-up failed: {:?}", e);
        return;
    }

    info!("Receiver ready, listening on 2.4GHz");
    loop {
        Timer::after_secs(1).await;
    }
}
