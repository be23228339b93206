//! Window timer based on the TIMER0 peripheral owned by the arbiter during a window
//!
//! The arbiter configures TIMER0 for 1 MHz mode and starts it from zero at the beginning of each
//! window. This module only arms one compare channel and its interrupt.

use super::traits::WindowTimer;
use core::ops::Deref;

use nrf52840_hal::pac::timer0;
type TimerRegisterBlock = timer0::RegisterBlock;

struct TimerPeriphWrapper {
    ptr: *const TimerRegisterBlock,
}
impl TimerPeriphWrapper {
    pub fn new(timer: &TimerRegisterBlock) -> Self {
        TimerPeriphWrapper { ptr: timer }
    }
}
impl Deref for TimerPeriphWrapper {
    type Target = TimerRegisterBlock;
    fn deref(&self) -> &Self::Target {
        unsafe { &*self.ptr }
    }
}
// TIMER0 is touched only from the arbiter's signal context
unsafe impl Sync for TimerPeriphWrapper {}
unsafe impl Send for TimerPeriphWrapper {}

const WINDOW_CC: usize = 0;

/// Window timer using the `TIMER0` peripheral
pub struct Timer0 {
    timer: TimerPeriphWrapper,
}

impl Timer0 {
    /// Create a new [`Timer0`] instance using passed hardware TIMER instance
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nrf_timeslot::hw::timer::timer0::Timer0;
    /// use nrf52840_hal::pac::TIMER0;
    ///
    /// // Safety: TIMER0 belongs to the arbiter, which lends it to the timeslot during a window
    /// let timer = Timer0::new(unsafe { &*TIMER0::ptr() });
    /// ```
    pub fn new(timer: &TimerRegisterBlock) -> Self {
        Self {
            timer: TimerPeriphWrapper::new(timer),
        }
    }
}

impl WindowTimer for Timer0 {
    fn arm(&self, after_us: u32) {
        self.timer.cc[WINDOW_CC].write(|w| w.cc().variant(after_us));
        self.timer.events_compare[WINDOW_CC].write(|w| w.events_compare().clear_bit());
        self.timer.intenset.write(|w| w.compare0().set_bit());

        // The arbiter masks TIMER0 outside of windows
        #[cfg(feature = "nrf52840")]
        unsafe {
            cortex_m::peripheral::NVIC::unmask(nrf52840_hal::pac::Interrupt::TIMER0)
        };
    }

    fn disarm(&self) {
        self.timer.tasks_stop.write(|w| w.tasks_stop().set_bit());
        self.timer.intenclr.write(|w| w.compare0().set_bit());
        self.timer.events_compare[WINDOW_CC].write(|w| w.events_compare().clear_bit());
    }
}
