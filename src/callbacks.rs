//! Callbacks notifying the user about timeslot events
//!
//! All callbacks are called from the [`Worker`](crate::worker::Worker) context, never from an
//! interrupt.

use crate::error::Error;

/// Signature of a callback reporting a (potentially unrecoverable) error
pub type ErrorCallback = fn(Error);
/// Signature of a callback reporting that a number of consecutive timeslots were skipped
pub type SkippedCallback = fn(u8);
/// Signature of callbacks without parameters
pub type NotifyCallback = fn();

/// Table of callbacks passed to [`Session::open`](crate::session::Session::open)
///
/// All entries are required. A table with any entry missing is rejected with
/// [`Error::InvalidParam`].
///
/// # Examples
///
/// ```
/// use nrf_timeslot::callbacks::Callbacks;
/// use nrf_timeslot::error::Error;
///
/// fn error(err: Error) {}
/// fn start() {}
/// fn end() {}
/// fn skipped(count: u8) {}
/// fn stopped() {}
///
/// let callbacks = Callbacks {
///     error: Some(error),
///     start: Some(start),
///     end: Some(end),
///     skipped: Some(skipped),
///     stopped: Some(stopped),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Copy, Default)]
pub struct Callbacks {
    /// A (potentially unrecoverable) error has occurred
    ///
    /// The session is not closed by this crate. It is up to the user to decide if an error is
    /// fatal.
    pub error: Option<ErrorCallback>,
    /// Called at the beginning of every timeslot
    pub start: Option<NotifyCallback>,
    /// Called `safety_margin_us` before the end of every timeslot
    pub end: Option<NotifyCallback>,
    /// A timeslot has been blocked or cancelled
    ///
    /// The parameter is the number of consecutive timeslots that have been skipped.
    pub skipped: Option<SkippedCallback>,
    /// The recurring timeslot has been stopped (the session is idle)
    pub stopped: Option<NotifyCallback>,
    /// The radio peripheral requested attention during a timeslot
    #[cfg(feature = "deferred_radio_event")]
    pub radio_event: Option<NotifyCallback>,
}

/// Callbacks table with all required entries present
#[derive(Clone, Copy)]
pub(crate) struct ValidCallbacks {
    pub error: ErrorCallback,
    pub start: NotifyCallback,
    pub end: NotifyCallback,
    pub skipped: SkippedCallback,
    pub stopped: NotifyCallback,
    #[cfg(feature = "deferred_radio_event")]
    pub radio_event: NotifyCallback,
}

impl TryFrom<Callbacks> for ValidCallbacks {
    type Error = Error;

    fn try_from(callbacks: Callbacks) -> Result<Self, Self::Error> {
        Ok(Self {
            error: callbacks.error.ok_or(Error::InvalidParam)?,
            start: callbacks.start.ok_or(Error::InvalidParam)?,
            end: callbacks.end.ok_or(Error::InvalidParam)?,
            skipped: callbacks.skipped.ok_or(Error::InvalidParam)?,
            stopped: callbacks.stopped.ok_or(Error::InvalidParam)?,
            #[cfg(feature = "deferred_radio_event")]
            radio_event: callbacks.radio_event.ok_or(Error::InvalidParam)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(_err: Error) {}
    fn notify() {}
    fn skipped(_count: u8) {}

    fn complete_table() -> Callbacks {
        Callbacks {
            error: Some(error),
            start: Some(notify),
            end: Some(notify),
            skipped: Some(skipped),
            stopped: Some(notify),
            #[cfg(feature = "deferred_radio_event")]
            radio_event: Some(notify),
        }
    }

    #[test]
    fn test_complete_table_is_valid() {
        assert!(ValidCallbacks::try_from(complete_table()).is_ok());
    }

    #[test]
    fn test_empty_table_is_invalid() {
        let result = ValidCallbacks::try_from(Callbacks::default());
        assert!(matches!(result, Err(Error::InvalidParam)));
    }

    #[test]
    fn test_each_missing_entry_is_invalid() {
        let tables = [
            Callbacks {
                error: None,
                ..complete_table()
            },
            Callbacks {
                start: None,
                ..complete_table()
            },
            Callbacks {
                end: None,
                ..complete_table()
            },
            Callbacks {
                skipped: None,
                ..complete_table()
            },
            Callbacks {
                stopped: None,
                ..complete_table()
            },
        ];

        for table in tables {
            assert!(matches!(
                ValidCallbacks::try_from(table),
                Err(Error::InvalidParam)
            ));
        }
    }

    #[cfg(feature = "deferred_radio_event")]
    #[test]
    fn test_missing_radio_event_is_invalid_in_deferred_build() {
        let table = Callbacks {
            radio_event: None,
            ..complete_table()
        };
        assert!(matches!(
            ValidCallbacks::try_from(table),
            Err(Error::InvalidParam)
        ));
    }
}
