//! Link layer trait.
//!
//! The receiver only needs a handful of operations from the ESB link:
//! apply parameters, program addresses, enter receive mode and copy out
//! the last received payload. Implementations own the radio peripheral;
//! the ordering rules between calls are enforced by
//! [`RadioReceiver`](super::RadioReceiver), not here.

use crate::error::LinkError;
use crate::radio::config::LinkParameters;
use crate::radio::payload::RadioPayload;

/// Result type for link operations
pub type Result<T> = core::result::Result<T, LinkError>;

/// Notification raised by the link, usually from its interrupt handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioEvent {
    TxSuccess,
    TxFailed,
    RxReceived,
}

/// ESB link operations used by the receiver.
pub trait EsbLink {
    /// Apply the radio parameters. Called once.
    fn init(&mut self, parameters: &LinkParameters) -> Result<()>;

    /// Program the base address for pipe 0.
    fn set_base_address_0(&mut self, address: &[u8; 4]) -> Result<()>;

    /// Program one prefix per pipe, pipe 0 first.
    fn set_prefixes(&mut self, prefixes: &[u8]) -> Result<()>;

    /// Enter receive mode.
    fn start_rx(&mut self) -> Result<()>;

    /// Copy the most recent reception into `payload`.
    ///
    /// On error `payload` must be left as it was.
    fn read_rx_payload(&mut self, payload: &mut RadioPayload) -> Result<()>;
}
