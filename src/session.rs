//! Timeslot session shared by all execution contexts
//!
//! There is exactly one [`Session`] for the lifetime of the application. It is intended to be
//! allocated statically, so that the arbiter's signal handler and the relay interrupt can reach
//! it:
//!
//! ```no_run
//! # use critical_section as _;
//! use nrf_timeslot::arbiter::{Arbiter, EarliestRequest, SessionId};
//! use nrf_timeslot::callbacks::Callbacks;
//! use nrf_timeslot::config::{Config, NotificationDistance};
//! use nrf_timeslot::error::Error;
//! use nrf_timeslot::hw::irq::NvicIrq;
//! use nrf_timeslot::session::Session;
//!
//! static SESSION: Session = Session::new();
//!
//! struct Mpsl;
//! impl Arbiter for Mpsl {
//!     fn configure_radio_notification(&mut self, _: NotificationDistance) -> Result<(), i32> {
//!         Ok(())
//!     }
//!     fn open_session(&mut self) -> Result<SessionId, i32> {
//!         Ok(SessionId(0))
//!     }
//!     fn request_earliest(&mut self, _: SessionId, _: &EarliestRequest) -> Result<(), i32> {
//!         Ok(())
//!     }
//! }
//!
//! struct Delay;
//! impl embedded_hal_async::delay::DelayNs for Delay {
//!     async fn delay_ns(&mut self, _ns: u32) {}
//! }
//!
//! fn error(err: Error) {}
//! fn start() {}
//! fn end() {}
//! fn skipped(count: u8) {}
//! fn stopped() {}
//!
//! let callbacks = Callbacks {
//!     error: Some(error),
//!     start: Some(start),
//!     end: Some(end),
//!     skipped: Some(skipped),
//!     stopped: Some(stopped),
//!     ..Default::default()
//! };
//!
//! let worker = SESSION
//!     .open(Config::default(), callbacks, &NvicIrq::relay(), Mpsl, Delay)
//!     .unwrap();
//! // Spawn `worker.run()` as an async task, then:
//! SESSION.start(25_000).unwrap();
//! ```
//!
//! The public API only flips the session [`Phase`] and the stop request flag. Everything else is
//! done asynchronously by the [`Worker`] returned from [`Session::open`].

use crate::arbiter::Arbiter;
use crate::callbacks::{Callbacks, ValidCallbacks};
use crate::config::Config;
use crate::error::Error;
use crate::hw::irq::SoftIrq;
use crate::mailbox::Mailbox;
use crate::relay::Relay;
use crate::signal::Code;
use crate::worker::Worker;

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_hal_async::delay::DelayNs;

/// Capacity of the queue between the relay and the worker
pub const SIGNAL_QUEUE_DEPTH: usize = 8;

pub(crate) type SignalQueue = Channel<CriticalSectionRawMutex, Code, SIGNAL_QUEUE_DEPTH>;

/// Lifecycle phase of the session
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Phase {
    /// The session was not opened yet
    Closed = 0,
    /// The session is opened, no timeslot is started
    Idle = 1,
    /// A recurring timeslot is started and the next window is awaited
    AwaitingGrant = 2,
    /// A window is in progress
    Active = 3,
    /// A stop was requested and the session waits for a boundary where it can stop
    Stopping = 4,
}

impl Phase {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Phase::Idle,
            2 => Phase::AwaitingGrant,
            3 => Phase::Active,
            4 => Phase::Stopping,
            _ => Phase::Closed,
        }
    }

    /// Check if windows are being requested in this phase
    ///
    /// Requests go on while stopping, because a stop completes only at a boundary reported by
    /// the arbiter.
    pub fn requests_windows(&self) -> bool {
        matches!(
            self,
            Phase::AwaitingGrant | Phase::Active | Phase::Stopping
        )
    }
}

/// State of the timeslot session accessible from all execution contexts
pub struct Session {
    opened: AtomicBool,
    phase: AtomicU8,
    stop_requested: AtomicBool,
    requested_length_us: AtomicU32,
    safety_margin_us: AtomicU32,
    skip_count: AtomicU8,
    overruns: AtomicU32,
    pub(crate) mailbox: Mailbox,
    pub(crate) signals: SignalQueue,
}

impl Session {
    /// Create a closed session
    pub const fn new() -> Self {
        Self {
            opened: AtomicBool::new(false),
            phase: AtomicU8::new(Phase::Closed as u8),
            stop_requested: AtomicBool::new(false),
            requested_length_us: AtomicU32::new(0),
            safety_margin_us: AtomicU32::new(0),
            skip_count: AtomicU8::new(0),
            overruns: AtomicU32::new(0),
            mailbox: Mailbox::new(),
            signals: Channel::new(),
        }
    }

    /// Open the session
    ///
    /// Stores the configuration and the callbacks in the returned [`Worker`], enables the relay
    /// interrupt and schedules opening the arbiter session in the worker context. This function
    /// does not block. The returned worker must be run for the session to make any progress.
    ///
    /// Opening a session is always the first step. Closing a session is not supported.
    ///
    /// Returns:
    /// * [`Ok(Worker)`](Worker) if the session was opened
    /// * [`Err(Error::AlreadyOpen)`](Error::AlreadyOpen) if the session is already opened
    /// * [`Err(Error::InvalidParam)`](Error::InvalidParam) if a callback is missing or `config`
    ///   is out of range
    pub fn open<A: Arbiter, D: DelayNs>(
        &'static self,
        config: Config,
        callbacks: Callbacks,
        relay_irq: &impl SoftIrq,
        arbiter: A,
        delay: D,
    ) -> Result<Worker<A, D>, Error> {
        if self.is_open() {
            return Err(Error::AlreadyOpen);
        }

        config.validate()?;
        let callbacks = ValidCallbacks::try_from(callbacks)?;

        self.opened
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::AlreadyOpen)?;

        info!("open session");
        self.safety_margin_us
            .store(config.safety_margin_us, Ordering::Release);
        self.phase.store(Phase::Idle as u8, Ordering::Release);

        relay_irq.enable();
        self.signals
            .try_send(Code::OpenRequested)
            .map_err(|_| Error::Internal)?;

        Ok(Worker::new(self, config, callbacks, arbiter, delay))
    }

    /// Start requesting a recurring window of `len_us`
    ///
    /// A window is requested after every radio notification, so once per connection interval.
    /// The usable part of each window is shorter than `len_us` by the configured safety margin.
    ///
    /// Returns:
    /// * [`Ok(())`](core::result::Result::Ok) if the timeslot is started
    /// * [`Err(Error::AlreadyStarted)`](Error::AlreadyStarted) if the session is not opened, a
    ///   timeslot is already started, or a stop is still in progress
    /// * [`Err(Error::InvalidParam)`](Error::InvalidParam) if `len_us` is out of the arbiter's
    ///   range or not longer than the safety margin
    pub fn start(&self, len_us: u32) -> Result<(), Error> {
        if self.phase() != Phase::Idle || self.stop_requested() {
            return Err(Error::AlreadyStarted);
        }

        Config::validate_window_length(len_us, self.safety_margin_us.load(Ordering::Acquire))?;

        info!("start (len_us: {})", len_us);
        self.requested_length_us.store(len_us, Ordering::Release);
        self.skip_count.store(0, Ordering::Release);

        if self.transition(Phase::Idle, Phase::AwaitingGrant) {
            Ok(())
        } else {
            Err(Error::AlreadyStarted)
        }
    }

    /// Stop requesting the recurring window and let the session go idle
    ///
    /// An active window is never interrupted. The stop completes when the arbiter reports the
    /// session idle, or a window blocked or cancelled. Then the `stopped` callback is called and
    /// a new timeslot may be started.
    ///
    /// Returns:
    /// * [`Ok(())`](core::result::Result::Ok) if the stop was requested
    /// * [`Err(Error::NoTimeslotStarted)`](Error::NoTimeslotStarted) if there is no timeslot to
    ///   stop
    pub fn stop(&self) -> Result<(), Error> {
        self.phase
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                match Phase::from_raw(raw) {
                    Phase::AwaitingGrant | Phase::Active => Some(Phase::Stopping as u8),
                    _ => None,
                }
            })
            .map_err(|_| Error::NoTimeslotStarted)?;
        self.stop_requested.store(true, Ordering::Release);

        info!("stop");
        Ok(())
    }

    /// Get a handle to run the relay from its interrupt
    pub fn relay(&'static self) -> Relay {
        Relay::new(self)
    }

    /// Current phase of the session
    pub fn phase(&self) -> Phase {
        Phase::from_raw(self.phase.load(Ordering::Acquire))
    }

    /// Check if the session was opened
    pub fn is_open(&self) -> bool {
        self.opened.load(Ordering::Acquire)
    }

    /// Number of consecutive blocked or cancelled windows
    pub fn skip_count(&self) -> u8 {
        self.skip_count.load(Ordering::Acquire)
    }

    /// Number of signals lost because the worker did not keep up
    ///
    /// Counts codes overwritten in the mailbox before the relay took them and codes dropped by
    /// the relay because the worker's queue was full.
    pub fn overruns(&self) -> u32 {
        self.overruns.load(Ordering::Relaxed)
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    pub(crate) fn requested_length_us(&self) -> u32 {
        self.requested_length_us.load(Ordering::Acquire)
    }

    /// Time from the start of a window to the moment it must be closed
    pub(crate) fn countdown_us(&self) -> u32 {
        self.requested_length_us()
            .saturating_sub(self.safety_margin_us.load(Ordering::Acquire))
    }

    pub(crate) fn set_skip_count(&self, count: u8) {
        self.skip_count.store(count, Ordering::Release);
    }

    /// Move from phase `from` to phase `to`
    ///
    /// Returns `false` and leaves the phase unchanged if the current phase is not `from`.
    pub(crate) fn transition(&self, from: Phase, to: Phase) -> bool {
        self.phase
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Complete a requested stop, a new timeslot may be started afterwards
    pub(crate) fn finish_stop(&self) {
        self.stop_requested.store(false, Ordering::Release);
        self.phase.store(Phase::Idle as u8, Ordering::Release);
    }

    pub(crate) fn record_overrun(&self) {
        self.overruns.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
