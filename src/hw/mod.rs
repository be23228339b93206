//! Hardware used by the timeslot contexts
//!
//! Each piece of hardware is accessed through a trait, so that the contexts can be tested on a
//! host with mocks. Implementations for nRF52840 are provided next to the traits.

pub mod irq;
pub mod timer;
