//! Relay between the signal handler and the worker
//!
//! The relay runs in the handler of the relay interrupt. The interrupt is pended by the
//! [`Handler`](crate::handler::Handler) after it writes to the mailbox, and by the arbiter when it
//! notifies about radio activity of the primary protocol. The relay tells the two sources apart
//! by checking the mailbox: an empty mailbox means a radio notification.
//!
//! ```no_run
//! # use critical_section as _;
//! use nrf_timeslot::session::Session;
//!
//! static SESSION: Session = Session::new();
//!
//! // Installed in the vector of `nrf_timeslot::hw::irq::RELAY_IRQ`
//! fn qdec_irq_handler() {
//!     SESSION.relay().on_interrupt();
//! }
//! ```

use crate::session::Session;
use crate::signal::Code;

/// Forwards events to the worker's queue
#[derive(Clone, Copy)]
pub struct Relay {
    session: &'static Session,
}

impl Relay {
    pub(crate) fn new(session: &'static Session) -> Self {
        Self { session }
    }

    /// Handle the relay interrupt
    ///
    /// A radio notification arriving while no timeslot is requested is dropped.
    pub fn on_interrupt(&self) {
        if let Some(code) = self.session.mailbox.take() {
            self.forward(code);
        } else if self.session.phase().requests_windows() {
            self.forward(Code::RadioActivityPending);
        } else {
            trace!("radio notification ignored in phase {:?}", self.session.phase());
        }
    }

    fn forward(&self, code: Code) {
        if self.session.signals.try_send(code).is_err() {
            self.session.record_overrun();
            warn!("worker queue full, {:?} dropped", code);
        }
    }
}
