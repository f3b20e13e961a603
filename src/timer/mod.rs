//! Timer and tick-loop utilities for the pager driver.
//!
//! [`PagerDriver::tick()`](crate::driver::PagerDriver::tick) must run once per
//! audio sample. This employs two approaches: an interrupt service routine using
//! `critical_section::with` (`timer-isr` feature), or a busy-loop delay timer
//! (`delay-loop` feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `compute_ocr_value`: runtime OCR calculator
//! - `const_ocr_value`: compile-time OCR calculator
//! - `run_pager_tick_loop`: blocking driver loop for `DelayNs` (feature `delay-loop`)
//! - `global_pager_timer_tick` and `tick_pager_timer!()`: interrupt-based tick callback wrapper
//!   (feature `timer-isr`)
//!
//! Sample-rate interrupts for a 16 MHz AVR in CTC mode:
//!
//! | SAMPLE RATE | PRESCALER | OCR | Actual rate |
//! |-------------|-----------|-----|-------------|
//! |     8000 Hz |         8 | 249 |     8000 Hz |
//! |     9600 Hz |         8 | 207 |  9615.4 Hz  |
//! |    48000 Hz |         1 | 332 | 48048.0 Hz  |

use libm::round;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// 1,000,000,000 nanoseconds = 1 second
pub const NANOSECONDS_PER_SECOND: u32 = 1_000_000_000;

/// Computes the OCR value for an AVR timer (CTC mode) firing at `sample_rate`.
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 1, 8, 64)
/// - `sample_rate`: desired interrupt rate in Hz, equal to the audio sample rate
///
/// # Returns
/// - OCR value for OCRnA (the counter period rounded to the nearest count, minus one),
///   saturated to the 16-bit register range
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, sample_rate: u32) -> u16 {
    let timer_hz = f64::from(f_cpu) / f64::from(prescaler);
    let counts = round(timer_hz / f64::from(sample_rate));
    let ocr = counts - 1.0;
    if ocr <= 0.0 {
        0
    } else if ocr >= f64::from(u16::MAX) {
        u16::MAX
    } else {
        ocr as u16
    }
}

/// Compile-time OCR value calculator
///
/// Integer-only counterpart of [`compute_ocr_value`], usable in `const` items.
pub const fn const_ocr_value(f_cpu: u32, prescaler: u32, sample_rate: u32) -> u16 {
    let timer_hz = f_cpu / prescaler;
    let counts = (timer_hz + sample_rate / 2) / sample_rate;
    let ocr = counts.saturating_sub(1);
    if ocr > u16::MAX as u32 {
        u16::MAX
    } else {
        ocr as u16
    }
}

/// Time between two ticks at `sample_rate`, in nanoseconds, rounded down.
///
/// `None` for a zero sample rate.
pub const fn tick_interval_ns(sample_rate: u32) -> Option<u32> {
    NANOSECONDS_PER_SECOND.checked_div(sample_rate)
}
