//! Radio receiver - owns the link and the receive buffer.

use crate::error::LinkError;
use crate::radio::config::{prefixes_are_unique, LinkConfiguration, LinkParameters};
use crate::radio::link::{EsbLink, RadioEvent};
use crate::radio::payload::RadioPayload;

/// Event as seen by the registered handler.
///
/// `Received` lends the receiver's buffer; the borrow cannot outlive the
/// handler call, so the next reception can reuse the buffer safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent<'a> {
    TxSuccess,
    TxFailed,
    Received(&'a RadioPayload),
    ReadFailed(LinkError),
}

/// Callback registered with the receiver at initialisation.
///
/// Runs in the radio interrupt: implementations must not block.
pub trait EventHandler {
    fn on_event(&mut self, event: LinkEvent<'_>);
}

/// Bring-up progress. Calls are only valid in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverState {
    Idle,
    Initialized,
    Addressed,
    Receiving,
}

/// Receive-only ESB endpoint.
pub struct RadioReceiver<L, H> {
    link: L,
    payload: RadioPayload,
    parameters: Option<LinkParameters>,
    handler: Option<H>,
    state: ReceiverState,
}

impl<L: EsbLink, H: EventHandler> RadioReceiver<L, H> {
    pub const fn new(link: L) -> Self {
        Self {
            link,
            payload: RadioPayload::new(),
            parameters: None,
            handler: None,
            state: ReceiverState::Idle,
        }
    }

    /// Apply `config` to the link and register its event handler.
    ///
    /// # Errors
    ///
    /// - `InitFailed` - invalid parameters, already initialised, or the
    ///   link refused the configuration
    pub fn initialize(&mut self, config: LinkConfiguration<H>) -> Result<(), LinkError> {
        if self.state != ReceiverState::Idle {
            error!("ESB already initialised");
            return Err(LinkError::InitFailed);
        }
        let LinkConfiguration {
            parameters,
            event_handler,
        } = config;
        if !parameters.validate() {
            error!("ESB configuration invalid: {:?}", parameters);
            return Err(LinkError::InitFailed);
        }

        self.link.init(&parameters).map_err(|e| {
            error!("ESB initialization failed, err {:?}", e);
            LinkError::InitFailed
        })?;

        info!(
            "ESB initialised (channel={}, payload={}, retransmit={})",
            parameters.rf_channel,
            parameters.payload_length,
            parameters.retransmit_count
        );
        self.parameters = Some(parameters);
        self.handler = Some(event_handler);
        self.state = ReceiverState::Initialized;
        Ok(())
    }

    /// Program the pipe 0 base address and the eight pipe prefixes.
    ///
    /// # Errors
    ///
    /// - `AddressRejected` - not initialised, already receiving, duplicate
    ///   prefixes, or the link refused the addresses
    pub fn set_addressing(
        &mut self,
        base_address: [u8; 4],
        prefixes: [u8; 8],
    ) -> Result<(), LinkError> {
        if !matches!(
            self.state,
            ReceiverState::Initialized | ReceiverState::Addressed
        ) {
            error!("Addressing rejected in state {:?}", self.state);
            return Err(LinkError::AddressRejected);
        }
        if !prefixes_are_unique(&prefixes) {
            error!("Duplicate pipe prefixes: {=[u8]:x}", &prefixes[..]);
            return Err(LinkError::AddressRejected);
        }

        self.link.set_base_address_0(&base_address).map_err(|e| {
            error!("Failed to set base address 0, err {:?}", e);
            LinkError::AddressRejected
        })?;
        self.link.set_prefixes(&prefixes).map_err(|e| {
            error!("Failed to set prefixes, err {:?}", e);
            LinkError::AddressRejected
        })?;

        self.state = ReceiverState::Addressed;
        Ok(())
    }

    /// Enter receive mode. From here on the link delivers events through
    /// [`on_event`](Self::on_event) until power-off.
    ///
    /// # Errors
    ///
    /// - `StartFailed` - addressing not applied, already receiving, or the
    ///   radio could not enter receive mode
    pub fn start_receiving(&mut self) -> Result<(), LinkError> {
        if self.state != ReceiverState::Addressed {
            error!("Cannot start RX in state {:?}", self.state);
            return Err(LinkError::StartFailed);
        }
        self.link.start_rx().map_err(|e| {
            error!("Failed to start ESB RX, err {:?}", e);
            LinkError::StartFailed
        })?;

        self.state = ReceiverState::Receiving;
        info!("ESB receiver started");
        Ok(())
    }

    /// Handle one link notification.
    ///
    /// On `RxReceived` the payload is read into the owned buffer and lent to
    /// the handler; a read failure is reported instead and reception goes on.
    pub fn on_event(&mut self, event: RadioEvent) {
        if self.state != ReceiverState::Receiving {
            debug!("Ignoring {:?} before RX start", event);
            return;
        }
        let Some(handler) = self.handler.as_mut() else {
            return;
        };

        match event {
            RadioEvent::TxSuccess => handler.on_event(LinkEvent::TxSuccess),
            RadioEvent::TxFailed => handler.on_event(LinkEvent::TxFailed),
            RadioEvent::RxReceived => match self.link.read_rx_payload(&mut self.payload) {
                Ok(()) => handler.on_event(LinkEvent::Received(&self.payload)),
                Err(e) => handler.on_event(LinkEvent::ReadFailed(e)),
            },
        }
    }

    pub fn state(&self) -> ReceiverState {
        self.state
    }

    /// Parameters applied by [`initialize`](Self::initialize).
    pub fn parameters(&self) -> Option<&LinkParameters> {
        self.parameters.as_ref()
    }

    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    pub fn link(&self) -> &L {
        &self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{LinkCall, MockLink, RecordingHandler, Seen};
    use crate::radio::config::{Addressing, Mode};

    fn receiver() -> RadioReceiver<MockLink, RecordingHandler> {
        RadioReceiver::new(MockLink::new())
    }

    fn started() -> RadioReceiver<MockLink, RecordingHandler> {
        let mut rx = receiver();
        let addressing = Addressing::default();
        rx.initialize(LinkConfiguration::new(RecordingHandler::default()))
            .unwrap();
        rx.set_addressing(addressing.base_address, addressing.prefixes)
            .unwrap();
        rx.start_receiving().unwrap();
        rx
    }

    #[test]
    fn bring_up_calls_link_in_order() {
        let rx = started();
        assert_eq!(rx.state(), ReceiverState::Receiving);
        assert_eq!(
            rx.link().calls.as_slice(),
            &[
                LinkCall::Init,
                LinkCall::BaseAddress([0xAB, 0x12, 0xCD, 0x34]),
                LinkCall::Prefixes,
                LinkCall::StartRx,
            ]
        );
        assert_eq!(rx.parameters().unwrap().payload_length, 8);
    }

    #[test]
    fn initialize_twice_fails() {
        let mut rx = receiver();
        rx.initialize(LinkConfiguration::new(RecordingHandler::default()))
            .unwrap();
        let err = rx
            .initialize(LinkConfiguration::new(RecordingHandler::default()))
            .unwrap_err();
        assert_eq!(err, LinkError::InitFailed);
    }

    #[test]
    fn initialize_rejects_transmit_mode() {
        let mut rx = receiver();
        let mut config = LinkConfiguration::new(RecordingHandler::default());
        config.parameters.mode = Mode::Ptx;
        assert_eq!(rx.initialize(config), Err(LinkError::InitFailed));
        assert_eq!(rx.state(), ReceiverState::Idle);
        assert!(rx.link().calls.is_empty());
    }

    #[test]
    fn initialize_maps_link_failure() {
        let mut link = MockLink::new();
        link.fail_init = true;
        let mut rx: RadioReceiver<_, RecordingHandler> = RadioReceiver::new(link);
        assert_eq!(
            rx.initialize(LinkConfiguration::new(RecordingHandler::default())),
            Err(LinkError::InitFailed)
        );
        assert!(rx.handler().is_none());
    }

    #[test]
    fn addressing_before_initialize_rejected() {
        let mut rx = receiver();
        let addressing = Addressing::default();
        assert_eq!(
            rx.set_addressing(addressing.base_address, addressing.prefixes),
            Err(LinkError::AddressRejected)
        );
    }

    #[test]
    fn duplicate_prefixes_rejected() {
        let mut rx = receiver();
        rx.initialize(LinkConfiguration::new(RecordingHandler::default()))
            .unwrap();
        let prefixes = [0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA1];
        assert_eq!(
            rx.set_addressing([0xAB, 0x12, 0xCD, 0x34], prefixes),
            Err(LinkError::AddressRejected)
        );
        assert_eq!(rx.state(), ReceiverState::Initialized);
    }

    #[test]
    fn addressing_after_start_rejected() {
        let mut rx = started();
        let addressing = Addressing::default();
        assert_eq!(
            rx.set_addressing(addressing.base_address, addressing.prefixes),
            Err(LinkError::AddressRejected)
        );
    }

    #[test]
    fn start_without_addressing_fails() {
        let mut rx = receiver();
        rx.initialize(LinkConfiguration::new(RecordingHandler::default()))
            .unwrap();
        assert_eq!(rx.start_receiving(), Err(LinkError::StartFailed));
    }

    #[test]
    fn start_maps_link_failure() {
        let mut link = MockLink::new();
        link.fail_start = true;
        let mut rx = RadioReceiver::new(link);
        let addressing = Addressing::default();
        rx.initialize(LinkConfiguration::new(RecordingHandler::default()))
            .unwrap();
        rx.set_addressing(addressing.base_address, addressing.prefixes)
            .unwrap();
        assert_eq!(rx.start_receiving(), Err(LinkError::StartFailed));
        assert_eq!(rx.state(), ReceiverState::Addressed);
    }

    #[test]
    fn events_before_start_are_ignored() {
        let mut rx = receiver();
        rx.initialize(LinkConfiguration::new(RecordingHandler::default()))
            .unwrap();
        rx.on_event(RadioEvent::RxReceived);
        assert!(rx.handler().unwrap().seen.is_empty());
    }

    #[test]
    fn received_payload_is_lent_to_handler() {
        let mut rx = started();
        rx.link.queue(1, &[0x01, 0x02]);
        rx.on_event(RadioEvent::RxReceived);
        assert_eq!(
            rx.handler().unwrap().seen.as_slice(),
            &[Seen::Received {
                pipe: 1,
                data: heapless::Vec::from_slice(&[0x01, 0x02]).unwrap()
            }]
        );
    }

    #[test]
    fn read_failure_reported_and_reception_continues() {
        let mut rx = started();
        rx.on_event(RadioEvent::RxReceived); // nothing queued -> read fails
        rx.link.queue(0, &[0x10; 8]);
        rx.on_event(RadioEvent::RxReceived);

        let seen = &rx.handler().unwrap().seen;
        assert_eq!(seen[0], Seen::ReadFailed(LinkError::ReadFailed));
        assert!(matches!(seen[1], Seen::Received { pipe: 0, .. }));
        assert_eq!(rx.state(), ReceiverState::Receiving);
    }

    #[test]
    fn transmit_events_forwarded() {
        let mut rx = started();
        rx.on_event(RadioEvent::TxSuccess);
        rx.on_event(RadioEvent::TxFailed);
        assert_eq!(
            rx.handler().unwrap().seen.as_slice(),
            &[Seen::TxSuccess, Seen::TxFailed]
        );
    }
}
