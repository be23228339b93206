//! Countdown guarding the end of a granted window
//!
//! The arbiter starts TIMER0 in 1 MHz mode at the beginning of every window and routes its
//! interrupt to the [`Handler`](crate::handler::Handler) as a
//! [`WindowTimerExpired`](crate::signal::Signal::WindowTimerExpired) signal. The handler arms a
//! compare channel of this timer to end the window `safety_margin_us` before the granted length.

pub mod timer0;
pub mod traits;
