//! Audio-domain FSK synthesis for an FM transmitter's modulation input.
//!
//! Each bit becomes a bipolar symbol (`1` → `+1`, `0` → `-1`) held for a whole
//! number of samples. The symbols steer the frequency of a sine tone: its phase
//! advances by `symbol * deviation / sample_rate` cycles per sample, so the
//! instantaneous frequency swings by ± the deviation. Feeding this tone to an
//! FM transmitter reproduces the bitstream as an over-the-air FSK signal.
//!
//! ## Timing
//!
//! Samples per symbol is `sample_rate / baud`, rounded down. When the ratio is
//! not an integer the symbol clock runs slightly fast and the error grows with
//! message length. Receivers tolerate this for page-sized transmissions, but it
//! is an approximation, not exact continuous-phase synthesis.
//!
//! ## Access tone
//!
//! An optional sub-audible tone (CTCSS, typically 67-254 Hz) can be added to
//! every sample to open a repeater's squelch. The sum is not re-normalized, so
//! samples may exceed `[-1, 1]`; see [`crate::pcm::to_i16`] for clipping.
//!
//! The modulator is an iterator and never buffers audio; collect it (or use
//! [`synthesize`] with `std`) when the whole waveform is needed at once.

use core::f64::consts::TAU;

use libm::{floor, sin};

use crate::batch::MsbBits;
use crate::config::PagerConfig;
use crate::error::Error;

/// POCSAG symbol rates.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum BaudRate {
    /// 512 bits per second.
    Baud512,
    /// 1200 bits per second.
    #[default]
    Baud1200,
    /// 2400 bits per second.
    Baud2400,
}

impl BaudRate {
    /// Symbol rate in bits per second.
    pub const fn bits_per_second(self) -> u32 {
        match self {
            BaudRate::Baud512 => 512,
            BaudRate::Baud1200 => 1200,
            BaudRate::Baud2400 => 2400,
        }
    }

    /// Whole audio samples per symbol at `sample_rate`.
    pub const fn samples_per_symbol(self, sample_rate: u32) -> u32 {
        sample_rate / self.bits_per_second()
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = Error;

    fn try_from(baud: u32) -> Result<Self, Error> {
        match baud {
            512 => Ok(BaudRate::Baud512),
            1200 => Ok(BaudRate::Baud1200),
            2400 => Ok(BaudRate::Baud2400),
            other => Err(Error::UnsupportedBaudRate(other)),
        }
    }
}

/// Reduces a phase expressed in cycles to `[0, 1)`.
fn wrap(phase: f64) -> f64 {
    phase - floor(phase)
}

/// A continuous sine tone at a fixed level, starting at zero phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessTone {
    phase: f64,
    step: f64,
    level: f32,
}

impl AccessTone {
    /// Creates a tone at `frequency_hz` and amplitude `level`.
    ///
    /// # Errors
    /// - [`Error::InvalidAccessTone`] unless the frequency is finite, positive
    ///   and below half the sample rate
    /// - [`Error::InvalidToneLevel`] unless the level is within `0.0..=1.0`
    pub fn new(frequency_hz: f32, level: f32, sample_rate: u32) -> Result<Self, Error> {
        let nyquist = f64::from(sample_rate) / 2.0;
        let hz = f64::from(frequency_hz);
        if !hz.is_finite() || hz <= 0.0 || hz >= nyquist {
            return Err(Error::InvalidAccessTone(frequency_hz));
        }
        if !(0.0..=1.0).contains(&level) {
            return Err(Error::InvalidToneLevel(level));
        }
        Ok(Self {
            phase: 0.0,
            step: hz / f64::from(sample_rate),
            level,
        })
    }

    /// Returns the current sample and advances by one sample period.
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.level * sin(TAU * self.phase) as f32;
        self.phase = wrap(self.phase + self.step);
        sample
    }

    /// Adds the tone to every sample of `samples`, in place.
    pub fn mix_into(&mut self, samples: &mut [f32]) {
        for s in samples {
            *s += self.next_sample();
        }
    }
}

/// Streaming FSK modulator producing one audio sample per iteration.
#[derive(Debug, Clone)]
pub struct FskModulator<I> {
    bits: I,
    samples_per_symbol: u32,
    remaining: u32,
    symbol: f64,
    phase: f64,
    step: f64,
    tone: Option<AccessTone>,
}

impl<I: Iterator<Item = bool>> FskModulator<I> {
    /// Creates a modulator over `bits` using the rates, deviation and access
    /// tone of `config`.
    ///
    /// # Errors
    /// Any error from [`PagerConfig::validate`].
    pub fn new(bits: I, config: &PagerConfig) -> Result<Self, Error> {
        config.validate()?;
        let level = config.access_tone_level;
        let tone = match config.access_tone_hz {
            Some(hz) => Some(AccessTone::new(hz, level, config.sample_rate)?),
            None => None,
        };
        Ok(Self {
            bits,
            samples_per_symbol: config.samples_per_symbol(),
            remaining: 0,
            symbol: 0.0,
            phase: 0.0,
            step: f64::from(config.deviation_hz) / f64::from(config.sample_rate),
            tone,
        })
    }

    /// Samples emitted for each bit.
    pub fn samples_per_symbol(&self) -> u32 {
        self.samples_per_symbol
    }
}

impl<I: Iterator<Item = bool>> Iterator for FskModulator<I> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.remaining == 0 {
            self.symbol = if self.bits.next()? { 1.0 } else { -1.0 };
            self.remaining = self.samples_per_symbol;
        }
        self.remaining -= 1;
        self.phase = wrap(self.phase + self.symbol * self.step);

        let mut sample = sin(TAU * self.phase) as f32;
        if let Some(tone) = self.tone.as_mut() {
            sample += tone.next_sample();
        }
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let per = self.samples_per_symbol as usize;
        let pending = self.remaining as usize;
        let (lo, hi) = self.bits.size_hint();
        (
            lo.saturating_mul(per).saturating_add(pending),
            hi.and_then(|h| h.checked_mul(per)?.checked_add(pending)),
        )
    }
}

/// Modulates wire bytes, most significant bit first.
pub fn modulate<B: AsRef<[u8]>>(
    wire: B,
    config: &PagerConfig,
) -> Result<FskModulator<MsbBits<B>>, Error> {
    FskModulator::new(MsbBits::new(wire), config)
}

/// Synthesizes the complete waveform for `wire`.
#[cfg(feature = "std")]
pub fn synthesize(wire: &[u8], config: &PagerConfig) -> Result<Vec<f32>, Error> {
    Ok(modulate(wire, config)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(cycles: f64) -> f32 {
        (TAU * cycles).sin() as f32
    }

    #[test]
    fn test_samples_per_symbol() {
        assert_eq!(BaudRate::Baud1200.samples_per_symbol(48_000), 40);
        assert_eq!(BaudRate::Baud512.samples_per_symbol(48_000), 93);
        assert_eq!(BaudRate::Baud2400.samples_per_symbol(44_100), 18);
    }

    #[test]
    fn test_baud_rate_from_u32() {
        assert_eq!(BaudRate::try_from(2400), Ok(BaudRate::Baud2400));
        assert_eq!(
            BaudRate::try_from(300),
            Err(Error::UnsupportedBaudRate(300))
        );
    }

    #[test]
    fn test_output_length() {
        let config = PagerConfig::default();
        let samples = synthesize(&[0xA5, 0x0F], &config).unwrap();
        assert_eq!(samples.len(), 16 * 40);
        assert_eq!(modulate([0u8; 3], &config).unwrap().count(), 24 * 40);
    }

    #[test]
    fn test_mark_tone_advances_by_deviation() {
        let config = PagerConfig::default();
        let samples = synthesize(&[0xFF], &config).unwrap();
        let step = 4500.0 / 48_000.0;
        for (n, &s) in samples.iter().enumerate() {
            let want = expected(step * (n + 1) as f64);
            assert!((s - want).abs() < 1e-4, "sample {n}");
        }
    }

    #[test]
    fn test_space_tone_runs_backwards() {
        let config = PagerConfig::default();
        let samples = synthesize(&[0x00], &config).unwrap();
        assert!((samples[0] + expected(4500.0 / 48_000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_symbols_return_to_zero_phase() {
        let config = PagerConfig::default();
        // one mark then one space
        let samples: Vec<f32> = FskModulator::new([true, false].into_iter(), &config)
            .unwrap()
            .collect();
        assert_eq!(samples.len(), 80);
        assert!(samples[79].abs() < 1e-4);
    }

    #[test]
    fn test_access_tone_is_added_without_normalizing() {
        let plain = PagerConfig::default();
        let toned = plain.with_access_tone(100.0);
        let wire = [0x5A, 0xC3, 0x99];
        let a = synthesize(&wire, &plain).unwrap();
        let b = synthesize(&wire, &toned).unwrap();
        assert_eq!(a.len(), b.len());
        for (n, (x, y)) in a.iter().zip(&b).enumerate() {
            let tone = 0.1 * expected(100.0 * n as f64 / 48_000.0);
            assert!((y - x - tone).abs() < 1e-5, "sample {n}");
        }
        assert!(b.iter().all(|s| s.abs() <= 1.1 + 1e-6));
    }

    #[test]
    fn test_mix_into_matches_streaming_tone() {
        let mut samples = [0.0f32; 8];
        AccessTone::new(1000.0, 0.5, 8000)
            .unwrap()
            .mix_into(&mut samples);
        assert_eq!(samples[0], 0.0);
        assert!((samples[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_access_tone_rejects_bad_input() {
        assert_eq!(
            AccessTone::new(48_000.0, 0.1, 48_000),
            Err(Error::InvalidAccessTone(48_000.0))
        );
        assert!(AccessTone::new(100.0, 0.1, 0).is_err());
        assert!(AccessTone::new(f32::INFINITY, 0.1, 48_000).is_err());
        assert_eq!(
            AccessTone::new(100.0, 2.0, 48_000),
            Err(Error::InvalidToneLevel(2.0))
        );
    }

    #[test]
    fn test_wrap_reduces_any_phase() {
        assert_eq!(wrap(0.25), 0.25);
        assert_eq!(wrap(3.25), 0.25);
        assert_eq!(wrap(-1.75), 0.25);
        assert_eq!(wrap(1.0), 0.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PagerConfig::default().with_sample_rate(1000);
        assert!(matches!(
            modulate([0u8], &config),
            Err(Error::SampleRateTooLow { .. })
        ));
    }
}
