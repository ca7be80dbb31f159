//! Link configuration applied once at startup.

use crate::config;
use crate::radio::payload::MAX_PAYLOAD_LEN;

/// ESB packet format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    /// Fixed payload length.
    Esb,
    /// Dynamic payload length (length field in every packet).
    EsbDpl,
}

/// Radio role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Primary transmitter.
    Ptx,
    /// Primary receiver - the only mode this receiver accepts.
    Prx,
}

/// On-air data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bitrate {
    _1Mbps,
    _2Mbps,
}

/// Radio parameters handed to the link layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkParameters {
    pub protocol: Protocol,
    pub mode: Mode,
    pub bitrate: Bitrate,
    /// RF channel (0-100), 2400 MHz + channel.
    pub rf_channel: u8,
    /// Fixed payload length (1-32). In DPL mode this is the maximum the
    /// transmitter is expected to send.
    pub payload_length: u8,
    /// Link-layer retransmissions (0-15), consumed by the radio itself.
    pub retransmit_count: u8,
}

impl Default for LinkParameters {
    fn default() -> Self {
        Self {
            protocol: Protocol::EsbDpl,
            mode: Mode::Prx,
            bitrate: Bitrate::_2Mbps,
            rf_channel: config::ESB_RF_CHANNEL,
            payload_length: config::ESB_PAYLOAD_LENGTH,
            retransmit_count: config::ESB_RETRANSMIT_COUNT,
        }
    }
}

impl LinkParameters {
    /// Returns `true` if every parameter is in range and the mode is
    /// receive-only.
    pub fn validate(&self) -> bool {
        self.mode == Mode::Prx
            && self.rf_channel <= 100
            && self.payload_length >= 1
            && self.payload_length as usize <= MAX_PAYLOAD_LEN
            && self.retransmit_count <= 15
    }
}

/// Parameters plus the event handler registered with them.
///
/// Consumed by [`RadioReceiver::initialize`](super::RadioReceiver::initialize);
/// changing any of it needs a fresh receiver.
pub struct LinkConfiguration<H> {
    pub parameters: LinkParameters,
    pub event_handler: H,
}

impl<H> LinkConfiguration<H> {
    /// Default receiver parameters with `event_handler` as the callback.
    pub fn new(event_handler: H) -> Self {
        Self {
            parameters: LinkParameters::default(),
            event_handler,
        }
    }
}

/// Pipe addressing: one base address and eight prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Addressing {
    pub base_address: [u8; 4],
    pub prefixes: [u8; 8],
}

impl Default for Addressing {
    fn default() -> Self {
        Self {
            base_address: config::ESB_BASE_ADDRESS_0,
            prefixes: config::ESB_PREFIXES,
        }
    }
}

/// Returns `true` if no two prefixes are equal.
pub fn prefixes_are_unique(prefixes: &[u8]) -> bool {
    prefixes
        .iter()
        .enumerate()
        .all(|(i, p)| !prefixes[i + 1..].contains(p))
}
