/// Declares a static global `PAGER_DRIVER` instance protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `PAGER_DRIVER` suitable for use in
/// interrupt-based environments, where both the main thread and an ISR need
/// to safely access the shared driver state.
///
/// # Arguments
/// - `$sink`: The concrete type of the sample sink (must implement `SampleSink`)
/// - `$ptt`: The concrete type of the PTT pin (must implement `OutputPin`)
///
/// # Example
/// ```rust,ignore
/// init_pager_driver!(MyDacType, MyPttPinType);
/// ```
#[macro_export]
macro_rules! init_pager_driver {
    ( $sink:ty, $ptt:ty ) => {
        pub static PAGER_DRIVER: $crate::timer::GlobalPagerDriver<$sink, $ptt> =
            $crate::timer::global_pager_driver_init();
    };
}

/// Initializes the global `PAGER_DRIVER` singleton with a new driver instance.
///
/// Expands to a `Result<(), pocsag::error::Error>` that is `Err` when the
/// configuration is rejected.
///
/// # Arguments
/// - `$sink`: The sample sink
/// - `$ptt`: The optional PTT pin
/// - `$config`: The `PagerConfig`; the timer must fire at its sample rate
/// - `$ptt_inverted`: Whether the PTT pin is active low, as an `Option<bool>`
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     setup_pager_driver!(dac, Some(ptt), PagerConfig::default(), None).unwrap();
/// }
/// ```
///
/// # Notes
/// - Requires `init_pager_driver!` to have been used earlier.
#[macro_export]
macro_rules! setup_pager_driver {
    ( $sink:expr, $ptt:expr, $config:expr, $ptt_inverted:expr $(,)? ) => {
        $crate::timer::global_pager_driver_setup(&PAGER_DRIVER, $sink, $ptt, $config, $ptt_inverted)
    };
}

/// Calls `tick()` on the global `PAGER_DRIVER` if it has been initialized.
///
/// This macro is intended to be invoked from a timer ISR firing at the
/// configured sample rate.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     tick_pager_timer!();
/// }
/// ```
///
/// # Notes
/// - This macro assumes `PAGER_DRIVER` was declared with `init_pager_driver!`
///   and initialized via `setup_pager_driver!`.
/// - Does nothing if the driver hasn't been set up yet.
#[macro_export]
macro_rules! tick_pager_timer {
    () => {
        $crate::timer::global_pager_timer_tick(&PAGER_DRIVER)
    };
}
