use crate::config::PagerConfig;
use crate::driver::{PagerDriver, SampleSink};
use crate::error::Error;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

/// Global driver slot shared between `main()` and the timer interrupt.
pub type GlobalPagerDriver<SINK, PTT> = Mutex<RefCell<Option<PagerDriver<SINK, PTT>>>>;

/// Used to initialize the global static `PagerDriver` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use pocsag::timer::{GlobalPagerDriver, global_pager_driver_init};
/// use some_hal::{Dac0, PD2};
///
/// static PAGER_DRIVER: GlobalPagerDriver<Dac0, PD2> = global_pager_driver_init();
/// ```
pub const fn global_pager_driver_init<SINK: SampleSink, PTT: OutputPin>()
-> GlobalPagerDriver<SINK, PTT> {
    Mutex::new(RefCell::new(None))
}

/// Builds a `PagerDriver` and stores it in the global slot, replacing any previous one.
///
/// # Arguments
/// * The global static `PagerDriver`
/// * The sample sink
/// * The optional PTT pin
/// * The synthesis settings; the timer must fire at `config.sample_rate`
/// * Whether the PTT pin is active low
///
/// # Errors
/// Any error from [`PagerConfig::validate`].
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     global_pager_driver_setup(&PAGER_DRIVER, dac, Some(ptt), PagerConfig::default(), None)
///         .unwrap();
/// }
/// ```
pub fn global_pager_driver_setup<SINK: SampleSink, PTT: OutputPin>(
    global_driver: &'static GlobalPagerDriver<SINK, PTT>,
    sink: SINK,
    ptt: Option<PTT>,
    config: PagerConfig,
    ptt_inverted: Option<bool>,
) -> Result<(), Error> {
    let driver = PagerDriver::new(sink, ptt, config, ptt_inverted)?;
    critical_section::with(|cs| {
        let _ = global_driver.borrow(cs).replace(Some(driver));
    });
    Ok(())
}

/// Queues a page on the global driver.
///
/// Encoding runs inside the critical section, so keep messages short when the
/// timer interrupt has tight latency requirements.
///
/// # Errors
/// - [`Error::NotInitialized`] before `global_pager_driver_setup`
/// - Any error from [`PagerDriver::send`]
pub fn global_pager_send<SINK: SampleSink, PTT: OutputPin>(
    global_driver: &'static GlobalPagerDriver<SINK, PTT>,
    ric: u32,
    text: &str,
) -> Result<(), Error> {
    critical_section::with(|cs| {
        global_driver
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .ok_or(Error::NotInitialized)?
            .send(ric, text)
    })
}

/// Runs the tick at each interrupt
///
/// # Arguments
/// * The global static `PagerDriver`
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     global_pager_timer_tick(&PAGER_DRIVER);
/// }
/// ```
pub fn global_pager_timer_tick<SINK: SampleSink, PTT: OutputPin>(
    global_driver: &'static GlobalPagerDriver<SINK, PTT>,
) {
    critical_section::with(|cs| {
        if let Some(driver) = global_driver.borrow(cs).borrow_mut().as_mut() {
            driver.tick();
        }
    });
}
