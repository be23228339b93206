//! Signals exchanged between the arbiter and the timeslot contexts

/// Signal delivered by the arbiter to the [`Handler`](crate::handler::Handler)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// A granted window has started
    Start,
    /// The TIMER0 interrupt fired during a window
    WindowTimerExpired,
    /// The RADIO interrupt fired during a window
    RadioActivity,
    /// Extending the window failed
    ExtendFailed,
    /// Extending the window succeeded
    ExtendSucceeded,
    /// The requested window was blocked by a higher priority user of the radio
    Blocked,
    /// The requested window was cancelled by a higher priority user of the radio
    Cancelled,
    /// The session has no more pending requests
    SessionIdle,
    /// The handler returned an invalid action
    InvalidReturn,
    /// The session was closed
    SessionClosed,
    /// The window was not ended before its timer fired
    Overstayed,
}

impl Signal {
    /// Decode a signal number used by the arbiter's API
    ///
    /// Returns `None` for numbers which do not represent any signal.
    ///
    /// # Examples
    ///
    /// ```
    /// use nrf_timeslot::signal::Signal;
    ///
    /// assert_eq!(Signal::from_raw(0), Some(Signal::Start));
    /// assert_eq!(Signal::from_raw(42), None);
    /// ```
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Signal::Start),
            1 => Some(Signal::WindowTimerExpired),
            2 => Some(Signal::RadioActivity),
            3 => Some(Signal::ExtendFailed),
            4 => Some(Signal::ExtendSucceeded),
            5 => Some(Signal::Blocked),
            6 => Some(Signal::Cancelled),
            7 => Some(Signal::SessionIdle),
            8 => Some(Signal::InvalidReturn),
            9 => Some(Signal::SessionClosed),
            10 => Some(Signal::Overstayed),
            _ => None,
        }
    }
}

/// Action returned to the arbiter by the [`Handler`](crate::handler::Handler)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Keep the window running
    None,
    /// End the current window immediately
    End,
}

impl Action {
    /// Action number used by the arbiter's API
    pub fn as_raw(&self) -> u32 {
        match self {
            Action::None => 0,
            Action::End => 2,
        }
    }
}

/// Event processed by the [`Worker`](crate::worker::Worker)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Code {
    /// A window has started
    Start = 0,
    /// The usable part of a window is over
    WindowExpired = 1,
    /// The radio requested attention during a window
    RadioActivity = 2,
    /// The requested window was blocked or cancelled
    BlockedOrCancelled = 3,
    /// The arbiter reported that the window was not vacated in time
    Overstayed = 4,
    /// The arbiter session has no more pending requests
    SessionIdle = 5,
    /// The radio is about to become active, it's time to request the next window
    RadioActivityPending = 6,
    /// The arbiter delivered a signal which is not expected
    Unexpected = 7,
    /// The session was opened by the user and the arbiter session is to be opened
    OpenRequested = 8,
}

impl Code {
    pub(crate) fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Code::Start),
            1 => Some(Code::WindowExpired),
            2 => Some(Code::RadioActivity),
            3 => Some(Code::BlockedOrCancelled),
            4 => Some(Code::Overstayed),
            5 => Some(Code::SessionIdle),
            6 => Some(Code::RadioActivityPending),
            7 => Some(Code::Unexpected),
            8 => Some(Code::OpenRequested),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_raw_signals_are_decoded() {
        for raw in 0..=10 {
            assert!(Signal::from_raw(raw).is_some());
        }
        assert_eq!(Signal::from_raw(11), None);
        assert_eq!(Signal::from_raw(u32::MAX), None);
    }

    #[test]
    fn test_action_numbers() {
        assert_eq!(Action::None.as_raw(), 0);
        assert_eq!(Action::End.as_raw(), 2);
    }

    #[test]
    fn test_code_from_its_own_number() {
        let codes = [
            Code::Start,
            Code::WindowExpired,
            Code::RadioActivity,
            Code::BlockedOrCancelled,
            Code::Overstayed,
            Code::SessionIdle,
            Code::RadioActivityPending,
            Code::Unexpected,
            Code::OpenRequested,
        ];

        for code in codes {
            assert_eq!(Code::from_raw(code as u8), Some(code));
        }
        assert_eq!(Code::from_raw(9), None);
    }
}
