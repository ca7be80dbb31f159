//! ESB radio subsystem (receive-only).
//!
//! 1. **Configuration** - link parameters and pipe addressing, applied once.
//! 2. **Link** - the `EsbLink` trait implemented by the radio driver.
//! 3. **Receiver** - enforces bring-up order, owns the receive buffer and
//!    lends each payload to the registered event handler.

pub mod address;
pub mod config;
pub mod link;
pub mod payload;
pub mod receiver;

#[cfg(feature = "embedded")]
pub mod nrf;

pub use config::{Addressing, LinkConfiguration, LinkParameters};
pub use link::{EsbLink, RadioEvent};
pub use payload::RadioPayload;
pub use receiver::{EventHandler, LinkEvent, RadioReceiver, ReceiverState};
