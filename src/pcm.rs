//! Fixed-point PCM conversion of synthesized samples.
//!
//! Samples are scaled by 32767 after clipping to `[-1, 1]`, since the access
//! tone can push the waveform past full scale. Container formats (WAV and the
//! like) are left to the caller.

#[cfg(feature = "std")]
use std::io::{self, Write};

/// Converts a sample to signed 16-bit PCM, clipping out-of-range values.
pub fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

/// Writes `samples` into `out` as little-endian 16-bit PCM.
///
/// # Returns
/// The number of samples written, limited by whichever of the two runs out first.
pub fn encode_i16le<I>(samples: I, out: &mut [u8]) -> usize
where
    I: IntoIterator<Item = f32>,
{
    let mut written = 0;
    for (sample, dst) in samples.into_iter().zip(out.chunks_exact_mut(2)) {
        dst.copy_from_slice(&to_i16(sample).to_le_bytes());
        written += 1;
    }
    written
}

/// Streams `samples` to `writer` as little-endian 16-bit PCM.
///
/// # Returns
/// The number of samples written.
#[cfg(feature = "std")]
pub fn write_i16le<W, I>(writer: &mut W, samples: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = f32>,
{
    let mut written = 0;
    for sample in samples {
        writer.write_all(&to_i16(sample).to_le_bytes())?;
        written += 1;
    }
    Ok(written)
}
