//! Receive-only ESB link on the nRF52840 RADIO peripheral.
//!
//! Just enough of the Nordic ESB packet format to receive from PTX
//! keyboards: 2-byte CRC, 4-byte base address plus 1-byte prefix, and in
//! DPL mode a 6-bit length field followed by a 3-bit S1 field (PID and
//! no-ACK flag). ACK packets are never sent.

use crate::error::LinkError;
use crate::radio::address::{
    base_address_word, prefix_word, BASE_ADDRESS_LEN, PREFIXES_PER_REGISTER,
};
use crate::radio::config::{Bitrate, LinkParameters, Protocol};
use crate::radio::link::{EsbLink, RadioEvent, Result};
use crate::radio::payload::{RadioPayload, MAX_PAYLOAD_LEN};
use crate::config;
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::pac;
use embassy_nrf::pac::radio::vals;
use embassy_nrf::peripherals;
use static_cell::StaticCell;

/// Length byte, S1 byte, payload.
const DPL_HEADER_LEN: usize = 2;
const PACKET_BUFFER_LEN: usize = DPL_HEADER_LEN + MAX_PAYLOAD_LEN;

static PACKET_BUFFER: StaticCell<[u8; PACKET_BUFFER_LEN]> = StaticCell::new();

pub struct NrfEsb {
    _radio: peripherals::RADIO,
    buffer: &'static mut [u8; PACKET_BUFFER_LEN],
    protocol: Protocol,
    payload_length: u8,
}

impl NrfEsb {
    pub fn new(radio: peripherals::RADIO) -> Self {
        Self {
            _radio: radio,
            buffer: PACKET_BUFFER.init([0u8; PACKET_BUFFER_LEN]),
            protocol: Protocol::EsbDpl,
            payload_length: config::ESB_PAYLOAD_LENGTH,
        }
    }

    /// Acknowledge a pending RADIO interrupt and translate it.
    ///
    /// Called from the RADIO interrupt handler before the receiver runs.
    pub fn take_event() -> Option<RadioEvent> {
        let r = pac::RADIO;
        if r.events_end().read() != 0 {
            r.events_end().write_value(0);
            return Some(RadioEvent::RxReceived);
        }
        None
    }

    fn restart_rx(&mut self) {
        let r = pac::RADIO;
        r.packetptr().write_value(self.buffer.as_ptr() as u32);
        r.tasks_rxen().write_value(1);
    }
}

impl EsbLink for NrfEsb {
    fn init(&mut self, parameters: &LinkParameters) -> Result<()> {
        if parameters.payload_length as usize > MAX_PAYLOAD_LEN {
            return Err(LinkError::InitFailed);
        }
        let r = pac::RADIO;

        r.power().write(|w| w.set_power(true));
        r.mode().write(|w| {
            w.set_mode(match parameters.bitrate {
                Bitrate::_1Mbps => vals::Mode::NRF_1MBIT,
                Bitrate::_2Mbps => vals::Mode::NRF_2MBIT,
            })
        });
        r.frequency().write(|w| w.set_frequency(parameters.rf_channel));

        match parameters.protocol {
            Protocol::EsbDpl => {
                r.pcnf0().write(|w| {
                    w.set_lflen(6);
                    w.set_s1len(3);
                });
                r.pcnf1().write(|w| {
                    w.set_maxlen(MAX_PAYLOAD_LEN as u8);
                    w.set_statlen(0);
                    w.set_balen(BASE_ADDRESS_LEN as u8);
                    w.set_endian(vals::Endian::BIG);
                });
            }
            Protocol::Esb => {
                r.pcnf0().write(|w| {
                    w.set_lflen(0);
                    w.set_s1len(1);
                });
                r.pcnf1().write(|w| {
                    w.set_maxlen(parameters.payload_length);
                    w.set_statlen(parameters.payload_length);
                    w.set_balen(BASE_ADDRESS_LEN as u8);
                    w.set_endian(vals::Endian::BIG);
                });
            }
        }

        r.crccnf().write(|w| {
            w.set_len(vals::Len::TWO);
            w.set_skipaddr(vals::Skipaddr::INCLUDE);
        });
        r.crcinit().write(|w| w.set_crcinit(0xFFFF));
        r.crcpoly().write(|w| w.set_crcpoly(0x1_1021));

        r.base1()
            .write_value(base_address_word(&config::ESB_BASE_ADDRESS_1));
        r.rxaddresses().write_value(pac::radio::regs::Rxaddresses(0xFF));

        r.shorts().write(|w| {
            w.set_ready_start(true);
            w.set_end_disable(true);
        });
        r.intenset().write(|w| w.set_end(true));

        self.protocol = parameters.protocol;
        self.payload_length = parameters.payload_length;
        Ok(())
    }

    fn set_base_address_0(&mut self, address: &[u8; 4]) -> Result<()> {
        pac::RADIO.base0().write_value(base_address_word(address));
        Ok(())
    }

    fn set_prefixes(&mut self, prefixes: &[u8]) -> Result<()> {
        if prefixes.is_empty() || prefixes.len() > 2 * PREFIXES_PER_REGISTER {
            return Err(LinkError::AddressRejected);
        }
        let r = pac::RADIO;
        let (low, high) = prefixes.split_at(prefixes.len().min(PREFIXES_PER_REGISTER));
        r.prefix0()
            .write_value(pac::radio::regs::Prefix0(prefix_word(low)));
        r.prefix1()
            .write_value(pac::radio::regs::Prefix1(prefix_word(high)));
        r.rxaddresses()
            .write_value(pac::radio::regs::Rxaddresses((1u32 << prefixes.len()) - 1));
        Ok(())
    }

    fn start_rx(&mut self) -> Result<()> {
        if !pac::CLOCK.hfclkstat().read().state() {
            return Err(LinkError::StartFailed);
        }
        let r = pac::RADIO;
        r.events_end().write_value(0);
        r.events_disabled().write_value(0);

        interrupt::RADIO.set_priority(Priority::P2);
        interrupt::RADIO.unpend();
        // SAFETY: the handler only touches state guarded by a critical section.
        unsafe { interrupt::RADIO.enable() };

        self.restart_rx();
        Ok(())
    }

    fn read_rx_payload(&mut self, payload: &mut RadioPayload) -> Result<()> {
        let r = pac::RADIO;
        let crc_ok = r.crcstatus().read().crcstatus() == vals::Crcstatus::CRCOK;
        let pipe = r.rxmatch().read().rxmatch();

        let result = if !crc_ok {
            Err(LinkError::ReadFailed)
        } else {
            match self.protocol {
                Protocol::EsbDpl => {
                    let len = (self.buffer[0] & 0x3F) as usize;
                    if len > MAX_PAYLOAD_LEN {
                        Err(LinkError::ReadFailed)
                    } else {
                        payload.fill(pipe, &self.buffer[DPL_HEADER_LEN..DPL_HEADER_LEN + len])
                    }
                }
                Protocol::Esb => {
                    let len = self.payload_length as usize;
                    payload.fill(pipe, &self.buffer[1..1 + len])
                }
            }
        };

        self.restart_rx();
        result
    }
}
