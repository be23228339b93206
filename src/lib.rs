#![cfg_attr(not(any(test, doctest)), no_std)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::missing_doc_code_examples)]

//! Radio timeslots for a proprietary protocol running alongside Bluetooth LE on Nordic nRF SoCs.
//!
//! The radio arbiter (the MPSL timeslot API) owns the RADIO peripheral while the Bluetooth stack
//! is running. This crate opens a single timeslot session with the arbiter and requests a window
//! of radio time once per connection interval. Every granted window is handed over to the
//! proprietary protocol through a table of callbacks.
//!
//! Three execution contexts cooperate:
//!
//! * [`Handler`](handler::Handler) runs in the arbiter's highest priority signal context,
//! * [`Relay`](relay::Relay) runs in a low priority software interrupt,
//! * [`Worker`](worker::Worker) is an async task owning the session state machine and calling
//!   the user callbacks.
//!
//! The user calls [`Session::open`](session::Session::open),
//! [`Session::start`](session::Session::start) and [`Session::stop`](session::Session::stop)
//! from any thread context.

#[cfg(not(any(feature = "mocked_platform", feature = "nrf52840")))]
compile_error!("One platform must be enabled as a build feature");

#[cfg(all(feature = "mocked_platform", feature = "nrf52840"))]
compile_error!("Cannot enable multiple platforms simultaneously (mocked and nrf52840)");

#[cfg(all(test, not(feature = "mocked_platform")))]
compile_error!("For tests \"mocked_platform\" feature shall be selected");

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Select at most one logging backend (defmt or log)");

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod arbiter;
pub mod callbacks;
pub mod config;
pub mod handler;
pub mod hw;
pub mod mailbox;
pub mod relay;
pub mod session;
pub mod signal;
pub mod worker;

/// Defines errors reported by this crate
pub mod error;

#[cfg(test)]
mod test_support;
