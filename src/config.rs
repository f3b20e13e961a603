//! Runtime settings for synthesis and transmission.

use crate::address::FunctionCode;
use crate::consts::{DEFAULT_ACCESS_TONE_LEVEL, DEFAULT_DEVIATION_HZ, DEFAULT_SAMPLE_RATE};
use crate::error::Error;
use crate::fsk::BaudRate;

/// Settings shared by the synthesizer and the [`PagerDriver`](crate::driver::PagerDriver).
///
/// The defaults are 1200 baud, 48 kHz audio, 4.5 kHz deviation, no access
/// tone and alphanumeric pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagerConfig {
    /// Symbol rate of the POCSAG bitstream.
    pub baud: BaudRate,
    /// Audio sample rate, in Hz.
    pub sample_rate: u32,
    /// Frequency deviation of the FSK tone, in Hz.
    pub deviation_hz: f32,
    /// Sub-audible access (CTCSS) tone, in Hz.
    pub access_tone_hz: Option<f32>,
    /// Amplitude of the access tone relative to full scale.
    pub access_tone_level: f32,
    /// Function code placed in the address codeword.
    pub function: FunctionCode,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            baud: BaudRate::Baud1200,
            sample_rate: DEFAULT_SAMPLE_RATE,
            deviation_hz: DEFAULT_DEVIATION_HZ,
            access_tone_hz: None,
            access_tone_level: DEFAULT_ACCESS_TONE_LEVEL,
            function: FunctionCode::Alphanumeric,
        }
    }
}

impl PagerConfig {
    /// Sets the symbol rate from a raw baud value.
    pub fn with_baud(mut self, baud: u32) -> Result<Self, Error> {
        self.baud = BaudRate::try_from(baud)?;
        Ok(self)
    }

    /// Sets the audio sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the FSK deviation.
    pub fn with_deviation(mut self, deviation_hz: f32) -> Self {
        self.deviation_hz = deviation_hz;
        self
    }

    /// Enables an access tone at `frequency_hz`.
    pub fn with_access_tone(mut self, frequency_hz: f32) -> Self {
        self.access_tone_hz = Some(frequency_hz);
        self
    }

    /// Sets the access tone amplitude.
    pub fn with_access_tone_level(mut self, level: f32) -> Self {
        self.access_tone_level = level;
        self
    }

    /// Sets the address function code.
    pub fn with_function(mut self, function: FunctionCode) -> Self {
        self.function = function;
        self
    }

    /// Audio samples per transmitted bit, rounded down.
    pub fn samples_per_symbol(&self) -> u32 {
        self.baud.samples_per_symbol(self.sample_rate)
    }

    /// Checks that the settings describe a signal that can be synthesized.
    ///
    /// # Errors
    /// - [`Error::SampleRateTooLow`] when a symbol would span no sample
    /// - [`Error::InvalidDeviation`] when the deviation is not positive or reaches Nyquist
    /// - [`Error::InvalidAccessTone`] when the access tone is not positive or reaches Nyquist
    /// - [`Error::InvalidToneLevel`] when the tone level is outside `0.0..=1.0`
    pub fn validate(&self) -> Result<(), Error> {
        if self.samples_per_symbol() == 0 {
            return Err(Error::SampleRateTooLow {
                sample_rate: self.sample_rate,
                baud: self.baud.bits_per_second(),
            });
        }
        let audible = |hz: f32| hz.is_finite() && hz > 0.0 && hz < self.sample_rate as f32 / 2.0;
        if !audible(self.deviation_hz) {
            return Err(Error::InvalidDeviation(self.deviation_hz));
        }
        if let Some(tone) = self.access_tone_hz.filter(|&hz| !audible(hz)) {
            return Err(Error::InvalidAccessTone(tone));
        }
        if !(0.0..=1.0).contains(&self.access_tone_level) {
            return Err(Error::InvalidToneLevel(self.access_tone_level));
        }
        Ok(())
    }
}
