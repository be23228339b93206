//! Software-triggered interrupts
//!
//! The [`Relay`](crate::relay::Relay) runs in an interrupt handler of a peripheral unused by the
//! application. The same vector receives the arbiter's radio notifications, what makes the relay
//! multiplex two event sources.
//!
//! The relay interrupt priority must stay lower than the arbiter's signal context. Otherwise the
//! arbiter does not deliver TIMER0 signals correctly.

use cortex_m::peripheral::NVIC;
use nrf52840_hal::pac::Interrupt;

#[cfg(test)]
use mockall::*;

/// Interrupt vector used by the relay on nRF52840
pub const RELAY_IRQ: Interrupt = Interrupt::QDEC;
/// Priority of the relay interrupt (0 is the highest)
pub const RELAY_IRQ_PRIORITY: u8 = 4;

const NVIC_PRIO_BITS: u8 = 3;

/// Interrupt which can be triggered by software
#[cfg_attr(test, automock)]
pub trait SoftIrq {
    /// Configure priority and unmask the interrupt
    fn enable(&self);

    /// Mark the interrupt as pending
    fn pend(&self);
}

/// Interrupt of the nRF52840 NVIC
#[derive(Clone, Copy)]
pub struct NvicIrq {
    irq: Interrupt,
    priority: u8,
}

impl NvicIrq {
    /// Create an interrupt trigger for `irq` running at `priority`
    pub const fn new(irq: Interrupt, priority: u8) -> Self {
        Self { irq, priority }
    }

    /// Interrupt used by the relay with its default priority
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nrf_timeslot::hw::irq::{NvicIrq, SoftIrq};
    ///
    /// let relay_irq = NvicIrq::relay();
    /// relay_irq.enable();
    /// ```
    pub const fn relay() -> Self {
        Self::new(RELAY_IRQ, RELAY_IRQ_PRIORITY)
    }
}

/// Convert logical priority to the value of NVIC's priority register
fn hw_priority(priority: u8) -> u8 {
    priority << (8 - NVIC_PRIO_BITS)
}

impl SoftIrq for NvicIrq {
    fn enable(&self) {
        // Safety: only the priority of this interrupt is modified and the interrupt is unmasked
        //         after its priority is set
        unsafe {
            let mut peripherals = cortex_m::Peripherals::steal();
            peripherals
                .NVIC
                .set_priority(self.irq, hw_priority(self.priority));
            NVIC::unmask(self.irq);
        }
    }

    fn pend(&self) {
        NVIC::pend(self.irq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_uses_upper_bits() {
        assert_eq!(hw_priority(0), 0x00);
        assert_eq!(hw_priority(RELAY_IRQ_PRIORITY), 0x80);
        assert_eq!(hw_priority(7), 0xe0);
    }
}
