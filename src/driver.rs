//! Tick-driven pager transmitter.
//!
//! This module provides the [`PagerDriver`] struct, which turns queued pages into
//! audio samples for an FM transmitter's modulation input. It keys the radio
//! through an optional push-to-talk (PTT) pin for the duration of each page and
//! hands one sample per [`tick()`](PagerDriver::tick) to a [`SampleSink`]
//! (a DAC, a PWM channel, an audio stream...).
//!
//! `tick()` must be called once per sample period, i.e. at the configured
//! sample rate, from a timer interrupt or a delay loop (see [`crate::timer`]).
//! Samples are synthesized on the fly, so no audio buffer is kept.
//!
//! ## Example
//!
//! ```rust
//! use core::convert::Infallible;
//! use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use pocsag::config::PagerConfig;
//! use pocsag::driver::{PagerDriver, PagerMode, SampleSink};
//!
//! struct Discard;
//!
//! impl SampleSink for Discard {
//!     type Error = Infallible;
//!
//!     fn write_sample(&mut self, _sample: f32) -> nb::Result<(), Infallible> {
//!         Ok(())
//!     }
//! }
//!
//! let ptt = Pin::new(&[
//!     PinTransaction::set(PinState::High),
//!     PinTransaction::set(PinState::Low),
//! ]);
//! let mut driver = PagerDriver::new(Discard, Some(ptt), PagerConfig::default(), None).unwrap();
//! driver.send(123_456, "HELLO").unwrap();
//! while driver.mode == PagerMode::Tx {
//!     driver.tick(); // Called at the sample rate by a timer or delay loop
//! }
//! assert_eq!(driver.tx_good, 1);
//! # driver.ptt.as_mut().map(|ptt| ptt.done());
//! ```

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use nb::block;

use crate::address::Address;
use crate::batch::{MsbBits, encode_message_with};
use crate::buffer::WireBuffer;
use crate::config::PagerConfig;
use crate::error::{Error, TransmitError};
use crate::fsk::FskModulator;

/// Destination for synthesized audio samples.
///
/// Implementations return [`nb::Error::WouldBlock`] when they cannot take a
/// sample yet (a full FIFO, a busy DAC); the driver offers the same sample
/// again on the next tick.
pub trait SampleSink {
    /// Error reported by the underlying output.
    type Error: core::fmt::Debug;

    /// Accepts one sample, nominally in `[-1, 1]`.
    fn write_sample(&mut self, sample: f32) -> nb::Result<(), Self::Error>;
}

/// Operating mode of a [`PagerDriver`].
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum PagerMode {
    /// Nothing queued, PTT released.
    #[default]
    Idle,
    /// A page is being played out, PTT keyed.
    Tx,
}

/// Sample stream of the page being transmitted.
pub type PageSamples = FskModulator<MsbBits<WireBuffer>>;

/// A software pager transmitter feeding an FM radio's modulation input.
///
/// ## Type Parameters
///
/// - `SINK`: A [`SampleSink`] receiving one sample per tick
/// - `PTT`: A type implementing [`embedded_hal::digital::OutputPin`] keying the transmitter
///
/// ## Notes
///
/// - Only one `PagerDriver` instance should be active if you're using interrupts.
/// - Call [`tick()`](PagerDriver::tick) at exactly the configured sample rate;
///   any other rate shifts both the baud rate and the FSK tones.
#[derive(Debug)]
pub struct PagerDriver<SINK, PTT>
where
    SINK: SampleSink,
    PTT: OutputPin,
{
    /// The current mode of the transmitter
    pub mode: PagerMode,
    /// Audio output
    pub sink: SINK,
    /// Push To Talk (PTT) pin
    pub ptt: Option<PTT>,
    config: PagerConfig,
    ptt_inverted: bool,
    samples: Option<PageSamples>,
    pending: Option<f32>,

    /// Counter of pages played out in full.
    pub tx_good: u16,

    /// Counter of ticks on which the sink could not take a sample.
    pub tx_underruns: u16,

    /// Counter of samples dropped because the sink reported an error.
    pub tx_errors: u16,
}

impl<SINK, PTT> PagerDriver<SINK, PTT>
where
    SINK: SampleSink,
    PTT: OutputPin,
{
    /// Creates a new `PagerDriver`.
    ///
    /// # Arguments
    /// - `sink`: Where samples are written on each tick.
    /// - `ptt`: The optional push to talk pin.
    /// - `config`: Baud rate, sample rate, deviation and access tone.
    /// - `ptt_inverted`: Whether the PTT signal is active low (On = LOW, Off = HIGH).
    ///
    /// # Errors
    /// Any error from [`PagerConfig::validate`].
    ///
    /// # Notes
    /// The PTT pin is not driven until the first page is sent.
    pub fn new(
        sink: SINK,
        ptt: Option<PTT>,
        config: PagerConfig,
        ptt_inverted: Option<bool>,
    ) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            mode: PagerMode::Idle,
            sink,
            ptt,
            config,
            ptt_inverted: ptt_inverted.unwrap_or(false),
            samples: None,
            pending: None,
            tx_good: 0,
            tx_underruns: 0,
            tx_errors: 0,
        })
    }

    /// The settings used for every page.
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    fn write_ptt(&mut self, mode: bool) {
        let state = if self.ptt_inverted { !mode } else { mode };
        if let Some(ref mut ptt) = self.ptt {
            let _ = if state { ptt.set_high() } else { ptt.set_low() };
        }
    }

    /// Releases PTT and drops whatever is left of the current page.
    pub fn set_mode_idle(&mut self) {
        self.samples = None;
        self.pending = None;
        if self.mode != PagerMode::Idle {
            self.write_ptt(false);
            self.mode = PagerMode::Idle;
            debug!("pager idle");
        }
    }

    fn set_mode_tx(&mut self, samples: PageSamples) {
        self.samples = Some(samples);
        self.pending = None;
        if self.mode != PagerMode::Tx {
            self.write_ptt(true);
            self.mode = PagerMode::Tx;
            debug!("pager transmitting");
        }
    }

    /// Non-blocking check for the end of the current page.
    pub fn wait_page_sent(&self) -> nb::Result<(), Infallible> {
        if self.mode == PagerMode::Tx {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    /// Encodes a page for `ric` and starts transmitting it.
    ///
    /// The PTT pin is keyed immediately; samples flow on subsequent ticks.
    ///
    /// # Errors
    /// - [`Error::Busy`] if the previous page is still being sent
    /// - Any validation error for the RIC or the text
    pub fn send(&mut self, ric: u32, text: &str) -> Result<(), Error> {
        if self.wait_page_sent().is_err() {
            return Err(Error::Busy);
        }
        let address = Address::new(ric)?;
        let wire = encode_message_with(address, self.config.function, text)?;
        let samples = FskModulator::new(MsbBits::new(wire), &self.config)?;
        self.set_mode_tx(samples);
        Ok(())
    }

    fn next_sample(&mut self) -> Option<f32> {
        self.pending
            .take()
            .or_else(|| self.samples.as_mut().and_then(Iterator::next))
    }

    /// Advances the transmitter by one sample period.
    ///
    /// Writes the next sample to the sink. A sink that would block keeps the
    /// sample for the next tick; a sink error drops it. When the page is
    /// exhausted the PTT is released and [`tx_good`](PagerDriver::tx_good)
    /// incremented.
    pub fn tick(&mut self) {
        if self.mode != PagerMode::Tx {
            return;
        }
        let Some(sample) = self.next_sample() else {
            self.tx_good = self.tx_good.wrapping_add(1);
            trace!("page sent");
            self.set_mode_idle();
            return;
        };
        match self.sink.write_sample(sample) {
            Ok(()) => {}
            Err(nb::Error::WouldBlock) => {
                self.pending = Some(sample);
                self.tx_underruns = self.tx_underruns.wrapping_add(1);
                trace!("sample sink full, retrying");
            }
            Err(nb::Error::Other(_)) => {
                self.tx_errors = self.tx_errors.wrapping_add(1);
                warn!("sample sink error, sample dropped");
            }
        }
    }

    /// Sends a page and blocks until every sample has been accepted by the sink.
    ///
    /// Suited to sinks that pace themselves, such as an audio stream with a
    /// bounded queue. Ticks are not used.
    ///
    /// # Returns
    /// The number of samples written.
    ///
    /// # Errors
    /// - [`TransmitError::Encode`] if the page could not be encoded
    /// - [`TransmitError::Sink`] on the first sink error; PTT is released
    pub fn transmit_blocking(
        &mut self,
        ric: u32,
        text: &str,
    ) -> Result<usize, TransmitError<SINK::Error>> {
        self.send(ric, text)?;
        let mut written = 0;
        while let Some(sample) = self.next_sample() {
            if let Err(e) = block!(self.sink.write_sample(sample)) {
                self.tx_errors = self.tx_errors.wrapping_add(1);
                self.set_mode_idle();
                return Err(TransmitError::Sink(e));
            }
            written += 1;
        }
        self.tx_good = self.tx_good.wrapping_add(1);
        self.set_mode_idle();
        Ok(written)
    }
}
