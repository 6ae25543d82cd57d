//! Burst completion timer and tick scheduling glue.
//!
//! The wire format has no length field or terminator, so a burst is complete once the
//! host has been quiet for [`IDLE_THRESHOLD_TICKS`] ticks of a periodic timer. Every
//! received byte restarts the count. A byte delayed past the threshold is treated as
//! the start of the next burst; that is a limitation of the heuristic.
//!
//! Two ways of driving the tick are provided: an interrupt service routine using
//! `critical_section::with` (`timer-isr` feature), or a polling loop on a blocking
//! delay (`delay-loop` feature).
//!
//! Contains:
//! - [`BurstTimer`]: the restartable idle timeout
//! - [`compute_ocr_value`]: runtime OCR calculator for the hardware tick
//! - `global_byte_received`, `global_idle_tick` and the `init_receiver!()`,
//!   `byte_received!()`, `idle_tick!()` macros (feature `timer-isr`)
//! - `run_idle_tick_loop`: blocking polling loop (feature `delay-loop`)
//!
//! Common prescalers: (For use with `compute_ocr_value`)
//!
//! | PRESCALER | TIMER_COUNTS | Overflow Interval |
//! |-----------|--------------|-------------------|
//! |        64 |          250 |              1 ms |
//! |       256 |          125 |              2 ms |
//! |       256 |          250 |              4 ms |
//! |      1024 |          125 |              8 ms |
//! |      1024 |          250 |             16 ms |

use libm::round;

use crate::consts::IDLE_THRESHOLD_TICKS;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// Whether a burst is being received.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum BurstState {
    /// No burst in progress; the timer is disarmed.
    #[default]
    Idle,
    /// At least one byte arrived and the idle period has not elapsed yet.
    Accumulating,
}

/// A restartable idle timeout counted in timer ticks.
#[derive(Debug, Clone)]
pub struct BurstTimer {
    state: BurstState,
    elapsed: u8,
    threshold: u8,
}

impl BurstTimer {
    /// Creates a disarmed timer firing after `threshold` quiet ticks.
    ///
    /// A threshold of `0` is treated as `1`.
    pub const fn new(threshold: u8) -> Self {
        Self {
            state: BurstState::Idle,
            elapsed: 0,
            threshold: if threshold == 0 { 1 } else { threshold },
        }
    }

    /// Current state.
    pub fn state(&self) -> BurstState {
        self.state
    }

    /// Whether the timer is counting.
    pub fn is_armed(&self) -> bool {
        self.state == BurstState::Accumulating
    }

    /// Quiet ticks counted so far.
    pub fn elapsed(&self) -> u8 {
        self.elapsed
    }

    /// Ticks needed to fire.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Arms the timer, or restarts the count if it is already armed.
    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.state = BurstState::Accumulating;
    }

    /// Advances the timer by one tick.
    ///
    /// Returns `true` exactly once per burst, on the tick that reaches the threshold;
    /// the timer is disarmed at that point. Ticks while disarmed do nothing.
    pub fn tick(&mut self) -> bool {
        if self.state != BurstState::Accumulating {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.threshold {
            self.elapsed = 0;
            self.state = BurstState::Idle;
            return true;
        }
        false
    }

    /// Disarms the timer without firing.
    pub fn cancel(&mut self) {
        self.elapsed = 0;
        self.state = BurstState::Idle;
    }
}

impl Default for BurstTimer {
    fn default() -> Self {
        Self::new(IDLE_THRESHOLD_TICKS)
    }
}

/// Computes the OCR value for an AVR timer (CTC mode)
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256)
/// - `tick_us`: desired idle tick interval in microseconds (e.g., 4000.0)
///
/// # Returns
/// - OCR value for OCRnA (rounds to nearest integer, minus one for CTC)
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, tick_us: f32) -> u16 {
    let ticks_per_second = f64::from(f_cpu) / f64::from(prescaler);
    let counts = round(ticks_per_second * f64::from(tick_us) / 1_000_000.0);
    if counts < 1.0 {
        return 0;
    }
    (counts - 1.0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_starts_idle() {
        let mut timer = BurstTimer::default();
        assert_eq!(timer.state(), BurstState::Idle);
        assert_eq!(timer.threshold(), IDLE_THRESHOLD_TICKS);
        for _ in 0..10 {
            assert!(!timer.tick());
        }
    }

    #[test]
    fn test_fires_once_after_threshold_quiet_ticks() {
        let mut timer = BurstTimer::new(4);
        timer.reset();
        assert!(timer.is_armed());
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
        assert_eq!(timer.state(), BurstState::Idle);
        for _ in 0..10 {
            assert!(!timer.tick());
        }
    }

    #[test]
    fn test_resets_keep_timer_from_firing() {
        let mut timer = BurstTimer::new(4);
        timer.reset();
        for _ in 0..20 {
            for _ in 0..3 {
                assert!(!timer.tick());
            }
            timer.reset();
            assert_eq!(timer.elapsed(), 0);
        }
        assert!(timer.is_armed());
    }

    #[test]
    fn test_reset_while_accumulating_is_idempotent() {
        let mut timer = BurstTimer::new(2);
        timer.reset();
        timer.reset();
        assert_eq!(timer.state(), BurstState::Accumulating);
        assert!(!timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn test_cancel_disarms() {
        let mut timer = BurstTimer::new(1);
        timer.reset();
        timer.cancel();
        assert!(!timer.tick());
        assert_eq!(BurstTimer::new(0).threshold(), 1);
    }

    #[test]
    fn test_compute_ocr_value() {
        // 16 MHz, /256, 4 ms -> 250 counts
        assert_eq!(compute_ocr_value(16_000_000, 256, 4_000.0), 249);
        // 16 MHz, /64, 1 ms -> 250 counts
        assert_eq!(compute_ocr_value(16_000_000, 64, 1_000.0), 249);
        assert_eq!(compute_ocr_value(1_000, 1024, 1.0), 0);
    }
}
