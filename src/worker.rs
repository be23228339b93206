//! Worker processing timeslot events and calling user callbacks
//!
//! The worker is the only place where user callbacks are called and where the arbiter adapter is
//! used. It consumes codes forwarded by the [`Relay`](crate::relay::Relay) one at a time, so
//! state owned by the worker needs no synchronization.
//!
//! The worker is an `async` task. With `embassy-executor` it is spawned like this:
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn timeslot_worker(worker: Worker<MpslArbiter, embassy_time::Delay>) -> ! {
//!     worker.run().await
//! }
//! ```

use crate::arbiter::{Arbiter, EarliestRequest, Priority, SessionId};
use crate::callbacks::ValidCallbacks;
use crate::config::Config;
use crate::error::Error;
use crate::session::{Phase, Session};
use crate::signal::Code;

use embedded_hal_async::delay::DelayNs;

/// Single consumer of the session's events
pub struct Worker<A: Arbiter, D: DelayNs> {
    session: &'static Session,
    config: Config,
    callbacks: ValidCallbacks,
    arbiter: A,
    delay: D,
    session_id: Option<SessionId>,
    request_outstanding: bool,
}

impl<A: Arbiter, D: DelayNs> Worker<A, D> {
    pub(crate) fn new(
        session: &'static Session,
        config: Config,
        callbacks: ValidCallbacks,
        arbiter: A,
        delay: D,
    ) -> Self {
        Self {
            session,
            config,
            callbacks,
            arbiter,
            delay,
            session_id: None,
            request_outstanding: false,
        }
    }

    /// Process events forever
    pub async fn run(mut self) -> ! {
        loop {
            self.step().await;
        }
    }

    /// Wait for the next event and process it
    pub async fn step(&mut self) {
        let code = self.session.signals.receive().await;
        self.process(code).await;
    }

    /// Check if a window request is waiting for the arbiter's answer
    pub fn request_outstanding(&self) -> bool {
        self.request_outstanding
    }

    /// Identifier of the arbiter session, if it is opened already
    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub(crate) async fn process(&mut self, code: Code) {
        debug!("process {:?}", code);

        match code {
            Code::OpenRequested => self.open_arbiter_session(),

            Code::Start => {
                self.session.set_skip_count(0);
                self.session.transition(Phase::AwaitingGrant, Phase::Active);
                (self.callbacks.start)();
            }

            Code::WindowExpired => {
                self.session.transition(Phase::Active, Phase::AwaitingGrant);
                (self.callbacks.end)();
            }

            Code::RadioActivity => self.radio_event(),

            Code::BlockedOrCancelled => self.window_skipped(),

            Code::SessionIdle => {
                self.request_outstanding = false;
                if self.session.stop_requested() {
                    self.finish_stop();
                }
            }

            Code::Overstayed => {
                error!("window overstayed");
                (self.callbacks.error)(Error::Overstayed);
            }

            Code::Unexpected => {
                error!("unexpected signal from the arbiter");
                (self.callbacks.error)(Error::Internal);
            }

            Code::RadioActivityPending => self.request_window().await,
        }
    }

    fn open_arbiter_session(&mut self) {
        if let Err(code) = self
            .arbiter
            .configure_radio_notification(self.config.timing.notification)
        {
            error!("radio notification config failed ({})", code);
            (self.callbacks.error)(Error::Arbiter(code));
            return;
        }

        match self.arbiter.open_session() {
            Ok(id) => {
                debug!("arbiter session {} opened", id.0);
                self.session_id = Some(id);
            }
            Err(code) => {
                error!("arbiter session open failed ({})", code);
                (self.callbacks.error)(Error::Arbiter(code));
            }
        }
    }

    #[cfg(feature = "deferred_radio_event")]
    fn radio_event(&mut self) {
        (self.callbacks.radio_event)();
    }

    #[cfg(not(feature = "deferred_radio_event"))]
    fn radio_event(&mut self) {
        // Radio events are passed through by the handler in this build
        (self.callbacks.error)(Error::Internal);
    }

    fn window_skipped(&mut self) {
        self.request_outstanding = false;

        let count = self.session.skip_count().saturating_add(1);
        if count > self.config.skip_tolerance {
            warn!("{} windows skipped in a row", count);
            self.session.set_skip_count(0);
            (self.callbacks.error)(Error::RequestsFailed);
        } else if self.session.stop_requested() {
            self.session.set_skip_count(count);
            self.finish_stop();
        } else {
            debug!("window skipped ({})", count);
            self.session.set_skip_count(count);
            (self.callbacks.skipped)(count);
        }
    }

    fn finish_stop(&mut self) {
        info!("timeslot stopped");
        self.session.finish_stop();
        (self.callbacks.stopped)();
    }

    async fn request_window(&mut self) {
        if self.request_outstanding {
            return;
        }

        let Some(id) = self.session_id else {
            error!("window requested before the arbiter session was opened");
            (self.callbacks.error)(Error::Internal);
            return;
        };

        self.delay
            .delay_us(self.config.timing.request_delay_us())
            .await;

        let request = EarliestRequest {
            hfclk: self.config.hfclk,
            priority: Priority::Normal,
            length_us: self.session.requested_length_us(),
            timeout_us: self.config.timeout_us,
        };

        self.request_outstanding = true;
        if let Err(code) = self.arbiter.request_earliest(id, &request) {
            error!("window request failed ({})", code);
            self.request_outstanding = false;
            (self.callbacks.error)(Error::Arbiter(code));
        }
    }
}
