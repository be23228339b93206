/// Errors reported by timeslot software
///
/// Configuration errors are returned by the offending API call. Errors detected at run-time are
/// reported only through the `error` callback, see [`Callbacks`](crate::callbacks::Callbacks).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Could not get a granted timeslot using an "earliest" request more times than tolerated
    ///
    /// The requested length is probably too long for the current connection interval.
    RequestsFailed,
    /// The arbiter complained because the timeslot did not close on time
    Overstayed,
    /// The arbiter delivered a signal which is not expected in this session
    Internal,
    /// The session was already opened
    AlreadyOpen,
    /// A timeslot was started before the previous one was stopped (and the `stopped` callback
    /// was called), or before the session was opened
    AlreadyStarted,
    /// There is no started timeslot to stop
    NoTimeslotStarted,
    /// An argument is out of range or a required callback is missing
    InvalidParam,
    /// The arbiter rejected an operation with the contained code
    Arbiter(i32),
}

impl Error {
    /// Numeric code of this error
    ///
    /// The codes of the errors generated by this crate are stable. [`Error::Arbiter`] returns the
    /// code reported by the arbiter.
    ///
    /// # Examples
    ///
    /// ```
    /// use nrf_timeslot::error::Error;
    ///
    /// assert_eq!(Error::RequestsFailed.code(), 94);
    /// assert_eq!(Error::Arbiter(-22).code(), -22);
    /// ```
    pub fn code(&self) -> i32 {
        match self {
            Error::RequestsFailed => 94,
            Error::Overstayed => 93,
            Error::Internal => 92,
            Error::AlreadyOpen => 91,
            Error::AlreadyStarted => 90,
            Error::NoTimeslotStarted => 89,
            Error::InvalidParam => 88,
            Error::Arbiter(code) => *code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            Error::RequestsFailed,
            Error::Overstayed,
            Error::Internal,
            Error::AlreadyOpen,
            Error::AlreadyStarted,
            Error::NoTimeslotStarted,
            Error::InvalidParam,
        ];

        for (i, a) in errors.iter().enumerate() {
            for b in errors.iter().skip(i + 1) {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn test_arbiter_code_is_passed_through() {
        assert_eq!(Error::Arbiter(0).code(), 0);
        assert_eq!(Error::Arbiter(-5).code(), -5);
    }
}
