//! Mock collaborators for host tests.
//!
//! `MockLink` stands in for the ESB link, `MockSink` for the HID
//! interrupt-IN endpoint and `RecordingHandler` captures what the receiver
//! hands to its callback.

use heapless::{Deque, Vec};

use crate::error::{LinkError, UsbError};
use crate::radio::config::LinkParameters;
use crate::radio::link::{self, EsbLink};
use crate::radio::payload::{RadioPayload, MAX_PAYLOAD_LEN};
use crate::radio::receiver::{EventHandler, LinkEvent};
use crate::usb::sink::HidSink;

/// Link operation as recorded by [`MockLink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCall {
    Init,
    BaseAddress([u8; 4]),
    Prefixes,
    StartRx,
}

/// Scripted link: queued frames are returned by `read_rx_payload` in order.
pub struct MockLink {
    pub calls: Vec<LinkCall, 8>,
    pub rx_queue: Deque<(u8, Vec<u8, 40>), 8>,
    pub fail_init: bool,
    pub fail_start: bool,
}

impl MockLink {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            rx_queue: Deque::new(),
            fail_init: false,
            fail_start: false,
        }
    }

    /// Queue a frame for the next read. Frames longer than 32 bytes make
    /// the read fail, like a corrupt length field would.
    pub fn queue(&mut self, pipe: u8, data: &[u8]) {
        let frame = Vec::from_slice(data).unwrap();
        self.rx_queue.push_back((pipe, frame)).unwrap();
    }
}

impl EsbLink for MockLink {
    fn init(&mut self, _parameters: &LinkParameters) -> link::Result<()> {
        self.calls.push(LinkCall::Init).unwrap();
        if self.fail_init {
            Err(LinkError::InitFailed)
        } else {
            Ok(())
        }
    }

    fn set_base_address_0(&mut self, address: &[u8; 4]) -> link::Result<()> {
        self.calls.push(LinkCall::BaseAddress(*address)).unwrap();
        Ok(())
    }

    fn set_prefixes(&mut self, prefixes: &[u8]) -> link::Result<()> {
        assert_eq!(prefixes.len(), 8);
        self.calls.push(LinkCall::Prefixes).unwrap();
        Ok(())
    }

    fn start_rx(&mut self) -> link::Result<()> {
        self.calls.push(LinkCall::StartRx).unwrap();
        if self.fail_start {
            Err(LinkError::StartFailed)
        } else {
            Ok(())
        }
    }

    fn read_rx_payload(&mut self, payload: &mut RadioPayload) -> link::Result<()> {
        let (pipe, frame) = self.rx_queue.pop_front().ok_or(LinkError::ReadFailed)?;
        if frame.len() > MAX_PAYLOAD_LEN {
            return Err(LinkError::ReadFailed);
        }
        payload.fill(pipe, &frame)
    }
}

/// Event captured by [`RecordingHandler`], with the payload copied out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    TxSuccess,
    TxFailed,
    Received { pipe: u8, data: Vec<u8, 32> },
    ReadFailed(LinkError),
}

#[derive(Default)]
pub struct RecordingHandler {
    pub seen: Vec<Seen, 8>,
}

impl EventHandler for RecordingHandler {
    fn on_event(&mut self, event: LinkEvent<'_>) {
        let seen = match event {
            LinkEvent::TxSuccess => Seen::TxSuccess,
            LinkEvent::TxFailed => Seen::TxFailed,
            LinkEvent::Received(payload) => Seen::Received {
                pipe: payload.pipe(),
                data: Vec::from_slice(payload.data()).unwrap(),
            },
            LinkEvent::ReadFailed(e) => Seen::ReadFailed(e),
        };
        self.seen.push(seen).unwrap();
    }
}

/// Endpoint that records every accepted report.
pub struct MockSink {
    pub written: Vec<[u8; 8], 16>,
    pub attempts: usize,
    /// Reject the submission with this (zero-based) attempt index.
    pub reject_attempt: Option<usize>,
    pub ready: bool,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            written: Vec::new(),
            attempts: 0,
            reject_attempt: None,
            ready: true,
        }
    }
}

impl HidSink for MockSink {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn submit(&mut self, report: &[u8; 8]) -> Result<(), UsbError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.reject_attempt == Some(attempt) {
            return Err(UsbError::WriteFailed);
        }
        self.written.push(*report).map_err(|_| UsbError::WriteFailed)
    }
}
