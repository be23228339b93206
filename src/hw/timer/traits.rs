//! Traits required from a portable window timer

#[cfg(test)]
use mockall::*;

/// Countdown measured from the start of the current window
///
/// Both methods are called from the arbiter's signal context, so they must complete in bounded,
/// short time.
#[cfg_attr(test, automock)]
pub trait WindowTimer {
    /// Fire the timer interrupt `after_us` microseconds after the window started
    fn arm(&self, after_us: u32);

    /// Stop the timer and disable its interrupt
    fn disarm(&self);
}
