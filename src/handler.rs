//! Handler of the arbiter's signals
//!
//! The handler runs in the arbiter's signal context, which has the highest priority in the
//! system and preempts everything else. It must return in bounded, minimal time and it must never
//! block. That's why it does not call any user callback. It only:
//!
//! * arms and disarms the countdown ending the window before the safety margin,
//! * writes a [`Code`] to the session's [`Mailbox`](crate::mailbox::Mailbox) and pends the
//!   [`Relay`](crate::relay::Relay) interrupt,
//! * returns the [`Action`] the arbiter shall take.
//!
//! The application forwards signals from its arbiter adapter:
//!
//! ```no_run
//! # use critical_section as _;
//! use nrf_timeslot::handler::Handler;
//! use nrf_timeslot::hw::irq::NvicIrq;
//! use nrf_timeslot::hw::timer::timer0::Timer0;
//! use nrf_timeslot::session::Session;
//! use nrf52840_hal::pac::TIMER0;
//!
//! static SESSION: Session = Session::new();
//!
//! fn radio_irq_handler() {
//!     // Handle RADIO events of the proprietary protocol
//! }
//!
//! # #[cfg(not(feature = "deferred_radio_event"))]
//! fn signal_callback(signal: u32) -> u32 {
//!     let handler = Handler::new(
//!         &SESSION,
//!         Timer0::new(unsafe { &*TIMER0::ptr() }),
//!         NvicIrq::relay(),
//!         radio_irq_handler,
//!     );
//!     handler.on_raw_signal(signal).as_raw()
//! }
//! ```

use crate::hw::irq::SoftIrq;
use crate::hw::timer::traits::WindowTimer;
use crate::session::Session;
use crate::signal::{Action, Code, Signal};

/// Reacts to signals delivered by the arbiter
pub struct Handler<T: WindowTimer, I: SoftIrq> {
    session: &'static Session,
    window_timer: T,
    relay_irq: I,
    #[cfg(not(feature = "deferred_radio_event"))]
    radio_irq: fn(),
}

impl<T: WindowTimer, I: SoftIrq> Handler<T, I> {
    /// Create a handler of the `session`'s signals
    ///
    /// RADIO signals received during a window are passed directly to `radio_irq`, in the
    /// arbiter's signal context.
    #[cfg(not(feature = "deferred_radio_event"))]
    pub const fn new(
        session: &'static Session,
        window_timer: T,
        relay_irq: I,
        radio_irq: fn(),
    ) -> Self {
        Self {
            session,
            window_timer,
            relay_irq,
            radio_irq,
        }
    }

    /// Create a handler of the `session`'s signals
    ///
    /// RADIO signals received during a window are deferred to the `radio_event` callback.
    #[cfg(feature = "deferred_radio_event")]
    pub const fn new(session: &'static Session, window_timer: T, relay_irq: I) -> Self {
        Self {
            session,
            window_timer,
            relay_irq,
        }
    }

    /// Handle a signal identified by the arbiter's signal number
    ///
    /// Unknown signal numbers are ignored.
    pub fn on_raw_signal(&self, raw: u32) -> Action {
        match Signal::from_raw(raw) {
            Some(signal) => self.on_signal(signal),
            None => Action::None,
        }
    }

    /// Handle a signal and return the action the arbiter shall take
    pub fn on_signal(&self, signal: Signal) -> Action {
        match signal {
            Signal::Start => {
                if self.session.stop_requested() {
                    // Window granted after a stop was requested is given back untouched
                    return Action::End;
                }
                self.window_timer.arm(self.session.countdown_us());
                self.post(Code::Start);
                Action::None
            }

            Signal::WindowTimerExpired => self.end_window(),

            Signal::RadioActivity => {
                if self.session.stop_requested() {
                    return self.end_window();
                }
                self.radio_activity();
                Action::None
            }

            Signal::Blocked | Signal::Cancelled => {
                self.post(Code::BlockedOrCancelled);
                Action::None
            }

            Signal::SessionIdle => {
                self.post(Code::SessionIdle);
                Action::None
            }

            Signal::Overstayed => {
                self.post(Code::Overstayed);
                Action::None
            }

            Signal::ExtendFailed
            | Signal::ExtendSucceeded
            | Signal::InvalidReturn
            | Signal::SessionClosed => {
                self.post(Code::Unexpected);
                Action::None
            }
        }
    }

    /// Close the window without extending it and notify the worker
    fn end_window(&self) -> Action {
        self.window_timer.disarm();
        self.post(Code::WindowExpired);
        Action::End
    }

    #[cfg(not(feature = "deferred_radio_event"))]
    fn radio_activity(&self) {
        (self.radio_irq)();
    }

    #[cfg(feature = "deferred_radio_event")]
    fn radio_activity(&self) {
        self.post(Code::RadioActivity);
    }

    fn post(&self, code: Code) {
        if self.session.mailbox.post(code).is_some() {
            self.session.record_overrun();
        }
        self.relay_irq.pend();
    }
}
