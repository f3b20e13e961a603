//! Growable buffers: `std::vec::Vec` with `std`, fixed-capacity `heapless::Vec` without.

use crate::codeword::Codeword;
#[cfg(not(feature = "std"))]
use crate::consts::{MAX_MESSAGE_CODEWORDS, MAX_PACKED_LEN, MAX_WIRE_LEN};
use crate::error::Error;

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Packed 7-bit text.
#[cfg(not(feature = "std"))]
pub type PackedBuffer = Vec<u8, MAX_PACKED_LEN>;
/// Packed 7-bit text.
#[cfg(feature = "std")]
pub type PackedBuffer = Vec<u8>;

/// Message codewords of a single page.
#[cfg(not(feature = "std"))]
pub type CodewordBuffer = Vec<Codeword, MAX_MESSAGE_CODEWORDS>;
/// Message codewords of a single page.
#[cfg(feature = "std")]
pub type CodewordBuffer = Vec<Codeword>;

/// Encoded transmission: preamble followed by batches.
#[cfg(not(feature = "std"))]
pub type WireBuffer = Vec<u8, MAX_WIRE_LEN>;
/// Encoded transmission: preamble followed by batches.
#[cfg(feature = "std")]
pub type WireBuffer = Vec<u8>;

/// Appending that reports exhausted capacity instead of panicking.
pub(crate) trait TryPush<T> {
    fn try_push(&mut self, item: T) -> Result<(), Error>;
}

#[cfg(not(feature = "std"))]
impl<T, const N: usize> TryPush<T> for Vec<T, N> {
    fn try_push(&mut self, item: T) -> Result<(), Error> {
        self.push(item).map_err(|_| Error::BufferOverflow)
    }
}

#[cfg(feature = "std")]
impl<T> TryPush<T> for Vec<T> {
    fn try_push(&mut self, item: T) -> Result<(), Error> {
        self.push(item);
        Ok(())
    }
}
