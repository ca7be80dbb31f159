//! Receive buffer shared between the link layer and the dispatcher.

use crate::error::LinkError;

/// Maximum ESB payload length in bytes.
pub const MAX_PAYLOAD_LEN: usize = 32;

/// One received radio payload.
///
/// Owned by the [`RadioReceiver`](super::RadioReceiver) and overwritten in
/// place on every successful read; handlers only ever see it by shared
/// reference for the duration of one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioPayload {
    data: [u8; MAX_PAYLOAD_LEN],
    length: u8,
    pipe: u8,
}

impl RadioPayload {
    pub const fn new() -> Self {
        Self {
            data: [0; MAX_PAYLOAD_LEN],
            length: 0,
            pipe: 0,
        }
    }

    /// Replace the contents with `data` received on `pipe`.
    ///
    /// Rejects oversize input before touching the buffer, so a failed fill
    /// leaves the previous payload intact.
    pub fn fill(&mut self, pipe: u8, data: &[u8]) -> Result<(), LinkError> {
        if data.len() > MAX_PAYLOAD_LEN {
            return Err(LinkError::ReadFailed);
        }
        self.data[..data.len()].copy_from_slice(data);
        self.length = data.len() as u8;
        self.pipe = pipe;
        Ok(())
    }

    /// The valid bytes of the last receive.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.length as usize]
    }

    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Logical pipe the payload arrived on.
    pub fn pipe(&self) -> u8 {
        self.pipe
    }
}

impl Default for RadioPayload {
    fn default() -> Self {
        Self::new()
    }
}
