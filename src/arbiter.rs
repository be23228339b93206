//! Interface of the radio arbiter granting timeslots
//!
//! The arbiter is the service deciding which user owns the radio at any given time (the MPSL
//! timeslot API on nRF SoCs). This crate does not implement it. The application provides an
//! adapter implementing [`Arbiter`] and forwards arbiter signals to the
//! [`Handler`](crate::handler::Handler).
//!
//! All adapter methods are called from the [`Worker`](crate::worker::Worker) context. Errors are
//! reported with the raw code returned by the arbiter.

use crate::config::{HfclkSource, NotificationDistance};

#[cfg(test)]
use mockall::*;

/// Identifier of a session opened by the arbiter
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionId(pub u8);

/// Priority of a timeslot request
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Priority {
    /// High priority
    High,
    /// Normal priority
    Normal,
}

/// Request of the earliest available window
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EarliestRequest {
    /// High frequency clock source
    pub hfclk: HfclkSource,
    /// Priority of the request
    pub priority: Priority,
    /// Length of the requested window
    pub length_us: u32,
    /// Time after which the arbiter stops looking for an available window
    pub timeout_us: u32,
}

/// Adapter of the radio arbiter
#[cfg_attr(test, automock)]
pub trait Arbiter {
    /// Enable the radio notification interrupt `distance` before the radio becomes active
    ///
    /// The notification must pend the same interrupt which runs the
    /// [`Relay`](crate::relay::Relay).
    fn configure_radio_notification(&mut self, distance: NotificationDistance) -> Result<(), i32>;

    /// Open a session
    ///
    /// From now on the adapter delivers the session's signals to the
    /// [`Handler`](crate::handler::Handler).
    fn open_session(&mut self) -> Result<SessionId, i32>;

    /// Request the earliest available window in the opened session
    fn request_earliest(
        &mut self,
        session: SessionId,
        request: &EarliestRequest,
    ) -> Result<(), i32>;
}
