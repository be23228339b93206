//! Single-slot handoff from the [`Handler`](crate::handler::Handler) to the
//! [`Relay`](crate::relay::Relay)
//!
//! The handler writes a code and immediately pends the relay interrupt. The relay consumes the
//! code on its next entry. An entry of the relay which finds the mailbox empty was triggered by
//! the radio notification sharing the same interrupt vector.

use crate::signal::Code;
use core::sync::atomic::{AtomicU8, Ordering};

const EMPTY: u8 = u8::MAX;

/// Holds at most one pending [`Code`]
pub struct Mailbox {
    slot: AtomicU8,
}

impl Mailbox {
    /// Create an empty mailbox
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(EMPTY),
        }
    }

    /// Write `code` to the mailbox
    ///
    /// Overwrites any code which was not taken yet and returns the overwritten code.
    ///
    /// # Examples
    ///
    /// ```
    /// use nrf_timeslot::mailbox::Mailbox;
    /// use nrf_timeslot::signal::Code;
    ///
    /// let mailbox = Mailbox::new();
    /// assert_eq!(mailbox.post(Code::Start), None);
    /// assert_eq!(mailbox.post(Code::WindowExpired), Some(Code::Start));
    /// ```
    pub fn post(&self, code: Code) -> Option<Code> {
        let prev = self.slot.swap(code as u8, Ordering::AcqRel);
        Code::from_raw(prev)
    }

    /// Read and clear the mailbox
    pub fn take(&self) -> Option<Code> {
        let raw = self.slot.swap(EMPTY, Ordering::AcqRel);
        if raw == EMPTY {
            None
        } else {
            // Only valid codes are ever posted
            Some(Code::from_raw(raw).unwrap_or(Code::Unexpected))
        }
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mailbox_is_empty() {
        let mailbox = Mailbox::new();
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_take_clears_the_slot() {
        let mailbox = Mailbox::new();

        mailbox.post(Code::BlockedOrCancelled);
        assert_eq!(mailbox.take(), Some(Code::BlockedOrCancelled));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_post_overwrites_pending_code() {
        let mailbox = Mailbox::new();

        assert_eq!(mailbox.post(Code::Start), None);
        assert_eq!(mailbox.post(Code::Overstayed), Some(Code::Start));
        assert_eq!(mailbox.take(), Some(Code::Overstayed));
    }
}
