//! BCH(31,21) check bits and even parity for POCSAG codewords.
//!
//! The 21 data bits (type flag + payload) sit in bits 31..11. The check field
//! is the remainder of dividing them by [`BCH_GENERATOR`] and fills bits 10..1;
//! bit 0 is the parity bit.

use crate::consts::{BCH_DATA_BITS, BCH_GENERATOR, DATA_MASK};

/// Completes a codeword whose data bits are set and whose lower 11 bits are zero.
///
/// Any bits already present below bit 11 are discarded before the check field
/// and parity are computed.
pub fn build_codeword(raw: u32) -> u32 {
    let data = raw & DATA_MASK;
    even_parity(data | remainder(data))
}

/// Divides bits 31..11 of `word` by the generator and returns the 10-bit
/// remainder aligned to bits 10..1.
pub fn remainder(word: u32) -> u32 {
    let mut dividend = word;
    let mut generator = BCH_GENERATOR << BCH_DATA_BITS;
    let mut mask = 1u32 << 31;
    for _ in 0..BCH_DATA_BITS {
        if dividend & mask != 0 {
            dividend ^= generator;
        }
        generator >>= 1;
        mask >>= 1;
    }
    dividend & !DATA_MASK
}

/// Sets bit 0 when bits 1 through 30 hold an odd number of ones.
pub fn even_parity(word: u32) -> u32 {
    let ones = (word & 0x7FFF_FFFE).count_ones();
    word | (ones & 1)
}

/// Remainder of the full 31-bit word (parity excluded) under the generator.
///
/// Zero for every codeword produced by [`build_codeword`].
pub fn syndrome(word: u32) -> u32 {
    remainder(word & !1)
}
