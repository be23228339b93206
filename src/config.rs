//! Session configuration
//!
//! The configuration is passed to [`Session::open`](crate::session::Session::open) and is
//! immutable afterwards.

use crate::error::Error;

/// Shortest window the arbiter can grant
pub const WINDOW_LENGTH_MIN_US: u32 = 100;
/// Longest window the arbiter can grant
pub const WINDOW_LENGTH_MAX_US: u32 = 100_000;
/// Longest time the arbiter accepts to look for an earliest window
pub const TIMEOUT_MAX_US: u32 = 128_000_000;

/// High frequency clock source requested for the granted windows
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HfclkSource {
    /// The crystal oscillator is running and stable when the window starts
    #[default]
    XtalGuaranteed,
    /// The crystal oscillator may still be starting when the window starts
    NoGuarantee,
}

impl HfclkSource {
    /// Value used by the arbiter's API
    pub fn as_raw(&self) -> u8 {
        match self {
            HfclkSource::XtalGuaranteed => 0,
            HfclkSource::NoGuarantee => 1,
        }
    }
}

/// Lead time of the radio notification before the radio becomes active
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotificationDistance {
    /// 200 µs
    Us200,
    /// 420 µs
    Us420,
    /// 800 µs
    #[default]
    Us800,
    /// 1740 µs
    Us1740,
    /// 2680 µs
    Us2680,
    /// 3620 µs
    Us3620,
    /// 4560 µs
    Us4560,
    /// 5500 µs
    Us5500,
}

impl NotificationDistance {
    /// The distance in microseconds
    pub fn as_us(&self) -> u32 {
        match self {
            NotificationDistance::Us200 => 200,
            NotificationDistance::Us420 => 420,
            NotificationDistance::Us800 => 800,
            NotificationDistance::Us1740 => 1740,
            NotificationDistance::Us2680 => 2680,
            NotificationDistance::Us3620 => 3620,
            NotificationDistance::Us4560 => 4560,
            NotificationDistance::Us5500 => 5500,
        }
    }
}

/// Timing of the requests relative to the Bluetooth connection events
///
/// A request is issued after a radio notification, when the Bluetooth connection event is about
/// to start. The request is delayed so that the granted window starts right after the connection
/// event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Maximum length of a connection event of the Bluetooth stack
    pub conn_event_len_us: u32,
    /// Time between an earliest request and the start of the granted window
    pub request_latency_us: u32,
    /// Lead time of the radio notification triggering requests
    pub notification: NotificationDistance,
}

impl Timing {
    /// Delay between a radio notification and the following request
    ///
    /// # Examples
    ///
    /// ```
    /// use nrf_timeslot::config::Timing;
    ///
    /// assert_eq!(Timing::default().request_delay_us(), 7500 - 2600 + 800);
    /// ```
    pub fn request_delay_us(&self) -> u32 {
        self.conn_event_len_us
            .saturating_sub(self.request_latency_us)
            .saturating_add(self.notification.as_us())
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            conn_event_len_us: 7500,
            request_latency_us: 2600,
            notification: NotificationDistance::Us800,
        }
    }
}

/// Configuration of a timeslot session
///
/// # Examples
///
/// ```
/// use nrf_timeslot::config::Config;
///
/// let config = Config {
///     skip_tolerance: 3,
///     ..Default::default()
/// };
/// assert_eq!(config.safety_margin_us, 100);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// High frequency clock source
    pub hfclk: HfclkSource,
    /// Amount of time before a request times out
    pub timeout_us: u32,
    /// Close the timeslot this amount of time before the end to ensure that it closes cleanly
    pub safety_margin_us: u32,
    /// The number of consecutive skipped timeslots before an error is raised
    pub skip_tolerance: u8,
    /// Request timing
    pub timing: Timing,
}

impl Config {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !(1..=TIMEOUT_MAX_US).contains(&self.timeout_us) {
            return Err(Error::InvalidParam);
        }
        if self.safety_margin_us >= WINDOW_LENGTH_MAX_US {
            return Err(Error::InvalidParam);
        }
        Ok(())
    }

    /// Check if a window of `len_us` leaves any usable time after `safety_margin_us`
    pub(crate) fn validate_window_length(len_us: u32, safety_margin_us: u32) -> Result<(), Error> {
        if !(WINDOW_LENGTH_MIN_US..=WINDOW_LENGTH_MAX_US).contains(&len_us)
            || len_us <= safety_margin_us
        {
            return Err(Error::InvalidParam);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hfclk: HfclkSource::XtalGuaranteed,
            timeout_us: 2_000_000,
            safety_margin_us: 100,
            skip_tolerance: 5,
            timing: Timing::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.hfclk, HfclkSource::XtalGuaranteed);
        assert_eq!(config.timeout_us, 2_000_000);
        assert_eq!(config.safety_margin_us, 100);
        assert_eq!(config.skip_tolerance, 5);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_request_delay_saturates() {
        let timing = Timing {
            conn_event_len_us: 1000,
            request_latency_us: 2600,
            notification: NotificationDistance::Us200,
        };

        assert_eq!(timing.request_delay_us(), 200);
    }

    #[test]
    fn test_timeout_out_of_range_is_invalid() {
        let mut config = Config::default();

        config.timeout_us = 0;
        assert_eq!(config.validate(), Err(Error::InvalidParam));

        config.timeout_us = TIMEOUT_MAX_US + 1;
        assert_eq!(config.validate(), Err(Error::InvalidParam));

        config.timeout_us = TIMEOUT_MAX_US;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_safety_margin_longer_than_any_window_is_invalid() {
        let config = Config {
            safety_margin_us: WINDOW_LENGTH_MAX_US,
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(Error::InvalidParam));
    }

    #[test]
    fn test_window_length_limits() {
        let margin = Config::default().safety_margin_us;

        assert_eq!(Config::validate_window_length(25_000, margin), Ok(()));
        assert_eq!(
            Config::validate_window_length(WINDOW_LENGTH_MIN_US - 1, margin),
            Err(Error::InvalidParam)
        );
        assert_eq!(
            Config::validate_window_length(WINDOW_LENGTH_MAX_US + 1, margin),
            Err(Error::InvalidParam)
        );
        // Nothing would be left of the window after the safety margin
        assert_eq!(
            Config::validate_window_length(100, margin),
            Err(Error::InvalidParam)
        );
        assert_eq!(Config::validate_window_length(101, margin), Ok(()));
    }
}
