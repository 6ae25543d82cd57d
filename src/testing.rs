//! Test doubles recording pin levels and delays on one shared timeline.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    High,
    Low,
    /// Microseconds
    Wait(u32),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    pub(crate) fn pin(&self) -> TracePin {
        TracePin(self.clone())
    }

    pub(crate) fn clock(&self) -> TraceClock {
        TraceClock(self.clone())
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub(crate) fn count(&self, event: Event) -> usize {
        self.0.borrow().iter().filter(|&&e| e == event).count()
    }

    /// Total time spent, in microseconds.
    pub(crate) fn duration_us(&self) -> u64 {
        self.0
            .borrow()
            .iter()
            .map(|e| match e {
                Event::Wait(us) => u64::from(*us),
                _ => 0,
            })
            .sum()
    }

    fn record(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }
}

#[derive(Debug)]
pub(crate) struct TracePin(Trace);

impl ErrorType for TracePin {
    type Error = Infallible;
}

impl OutputPin for TracePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.record(Event::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.record(Event::High);
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct TraceClock(Trace);

impl DelayNs for TraceClock {
    fn delay_ns(&mut self, ns: u32) {
        self.0.record(Event::Wait(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.record(Event::Wait(us));
    }
}
