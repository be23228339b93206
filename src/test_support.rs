//! Helpers shared by unit tests
//!
//! User callbacks are plain functions, so they record into a static list. Tests inspecting the
//! list must be `#[serial]`.

use crate::arbiter::MockArbiter;
use crate::callbacks::Callbacks;
use crate::config::Config;
use crate::error::Error;
use crate::hw::irq::MockSoftIrq;
use crate::session::Session;
use crate::worker::Worker;
use embedded_hal_async::delay::DelayNs;
use std::sync::Mutex;

/// A callback call observed by the tests
#[allow(dead_code)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Error(Error),
    Start,
    End,
    Skipped(u8),
    Stopped,
    RadioEvent,
    RadioIrq,
}

static EVENTS: Mutex<Vec<Event>> = Mutex::new(Vec::new());

fn record(event: Event) {
    EVENTS.lock().unwrap().push(event);
}

/// Forget all recorded callback calls
pub fn reset_events() {
    EVENTS.lock().unwrap().clear();
}

/// Get and forget all recorded callback calls
pub fn take_events() -> Vec<Event> {
    core::mem::take(&mut *EVENTS.lock().unwrap())
}

fn on_error(err: Error) {
    record(Event::Error(err));
}

fn on_start() {
    record(Event::Start);
}

fn on_end() {
    record(Event::End);
}

fn on_skipped(count: u8) {
    record(Event::Skipped(count));
}

fn on_stopped() {
    record(Event::Stopped);
}

#[cfg(feature = "deferred_radio_event")]
fn on_radio_event() {
    record(Event::RadioEvent);
}

/// Radio driver's IRQ handler called directly by the signal handler
pub fn radio_irq() {
    record(Event::RadioIrq);
}

/// Complete table of recording callbacks
pub fn callbacks() -> Callbacks {
    Callbacks {
        error: Some(on_error),
        start: Some(on_start),
        end: Some(on_end),
        skipped: Some(on_skipped),
        stopped: Some(on_stopped),
        #[cfg(feature = "deferred_radio_event")]
        radio_event: Some(on_radio_event),
    }
}

/// A session with static lifetime, separate for each test
pub fn leak_session() -> &'static Session {
    Box::leak(Box::new(Session::new()))
}

/// Open `session` with default configuration and recording callbacks
///
/// The `OpenRequested` event is left in the worker's queue.
pub fn open(session: &'static Session, arbiter: MockArbiter) -> Worker<MockArbiter, RecordingDelay> {
    let mut irq = MockSoftIrq::new();
    irq.expect_enable().return_const(());
    match session.open(
        Config::default(),
        callbacks(),
        &irq,
        arbiter,
        RecordingDelay::default(),
    ) {
        Ok(worker) => worker,
        Err(err) => panic!("opening session failed: {:?}", err),
    }
}

/// An opened session with a started timeslot of `len_us` and an empty worker's queue
pub fn started_session(len_us: u32) -> &'static Session {
    let session = leak_session();
    let _worker = open(session, MockArbiter::new());
    while session.signals.try_receive().is_ok() {}
    assert_eq!(session.start(len_us), Ok(()));
    session
}

/// Delay returning immediately and remembering requested delays
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub delays_us: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.delays_us.push(ns / 1000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.delays_us.push(us);
    }
}
