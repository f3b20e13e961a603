use crate::driver::{PagerDriver, PagerMode, SampleSink};
use crate::timer::tick_interval_ns;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Runs a blocking loop that calls `tick()` on the driver until the current page is sent.
///
/// This is a simple timing loop for use in environments where interrupts are unavailable
/// or undesired. The delay between ticks is one sample period at the driver's configured
/// sample rate; the time spent inside `tick()` is not compensated, so keep the sink fast
/// or the audio will run slow.
///
/// # Arguments
/// - `driver`: A mutable reference to a `PagerDriver` with a page queued by `send()`.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
///
/// # Example
/// ```rust,ignore
/// use pocsag::timer::run_pager_tick_loop;
///
/// driver.send(123_456, "HELLO")?;
/// run_pager_tick_loop(&mut driver, &mut delay);
/// ```
///
/// # Notes
/// - Returns immediately if no page is queued.
/// - For more efficient or concurrent applications, prefer interrupt-driven tick scheduling.
pub fn run_pager_tick_loop<D, SINK, PTT>(driver: &mut PagerDriver<SINK, PTT>, delay: &mut D)
where
    D: DelayNs,
    SINK: SampleSink,
    PTT: OutputPin,
{
    let Some(interval) = tick_interval_ns(driver.config().sample_rate) else {
        return;
    };
    while driver.mode == PagerMode::Tx {
        driver.tick();
        delay.delay_ns(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PagerConfig;
    use core::convert::Infallible;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;

    #[derive(Debug, Default)]
    struct Counter(usize);

    impl SampleSink for Counter {
        type Error = Infallible;

        fn write_sample(&mut self, _sample: f32) -> nb::Result<(), Infallible> {
            self.0 += 1;
            Ok(())
        }
    }

    fn counting_driver(config: PagerConfig) -> PagerDriver<Counter, PinMock> {
        PagerDriver::new(Counter::default(), None, config, None).unwrap()
    }

    #[test]
    fn test_loop_runs_until_page_sent() {
        let config = PagerConfig::default().with_sample_rate(9_600);
        let mut driver = counting_driver(config);
        driver.send(8, "LOOP").unwrap();
        run_pager_tick_loop(&mut driver, &mut NoopDelay::new());
        assert_eq!(driver.mode, PagerMode::Idle);
        assert_eq!(driver.tx_good, 1);
        // 72-byte preamble and one batch at 8 samples per bit
        assert_eq!(driver.sink.0, (72 + 68) * 8 * 8);
    }

    #[test]
    fn test_loop_returns_when_idle() {
        let mut driver = counting_driver(PagerConfig::default());
        run_pager_tick_loop(&mut driver, &mut NoopDelay::new());
        assert_eq!(driver.sink.0, 0);
    }
}
