//! 7-bit text packing and message codeword splitting.
//!
//! POCSAG sends each character as 7 bits, least significant bit first, with
//! characters following each other without gaps. Message codewords then carry
//! that stream 20 bits at a time.
//!
//! ## Functions
//!
//! - [`reverse_bits`]: Mirrors the bit order of a byte
//! - [`validate_text`]: Rejects messages the packer cannot represent
//! - [`pack_text`]: Packs characters into the on-air 7-bit stream
//! - [`split_message_frames`]: Cuts the stream into message codewords
//!
//! ## Bit order
//!
//! The packer's reversed, LSB-first character convention is distinct from the
//! MSB-first byte order used when the assembled batches are turned into bits
//! (see [`crate::batch::MsbBits`]). Both are part of the protocol.

use crate::buffer::{CodewordBuffer, PackedBuffer, TryPush};
use crate::codeword::Codeword;
use crate::consts::{CHAR_BITS, MESSAGE_BITS_PER_CODEWORD};
#[cfg(not(feature = "std"))]
use crate::consts::MAX_MESSAGE_LEN;
use crate::error::Error;

/// Reverses the bit order of a byte.
pub const fn reverse_bits(byte: u8) -> u8 {
    let b = ((byte & 0xF0) >> 4) | ((byte & 0x0F) << 4);
    let b = ((b & 0xCC) >> 2) | ((b & 0x33) << 2);
    ((b & 0xAA) >> 1) | ((b & 0x55) << 1)
}

/// Checks that `text` only holds 7-bit characters.
///
/// Without `std` the text must also fit the fixed-capacity buffers, i.e. hold
/// at most [`MAX_MESSAGE_LEN`](crate::consts::MAX_MESSAGE_LEN) characters.
/// With `std` any length is accepted.
///
/// # Returns
/// The number of characters in `text`.
pub fn validate_text(text: &str) -> Result<usize, Error> {
    let mut len = 0;
    for (position, character) in text.chars().enumerate() {
        if !character.is_ascii() {
            return Err(Error::InvalidCharacter {
                character,
                position,
            });
        }
        len += 1;
    }
    #[cfg(not(feature = "std"))]
    if len > MAX_MESSAGE_LEN {
        return Err(Error::MessageTooLong {
            len,
            max: MAX_MESSAGE_LEN,
        });
    }
    Ok(len)
}

/// Text packed into the continuous 7-bit stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedText {
    bytes: PackedBuffer,
    chars: usize,
}

impl PackedText {
    /// The packed bytes, exactly `ceil(7 * n / 8)` of them for `n` characters.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of characters packed.
    pub fn chars(&self) -> usize {
        self.chars
    }

    /// Number of meaningful bits in [`bytes`](PackedText::bytes).
    pub fn bit_len(&self) -> usize {
        self.chars * CHAR_BITS
    }
}

/// Packs 7-bit characters into a dense bit stream.
///
/// Each character is bit-reversed and its (now lowest) eighth bit dropped, so
/// its least significant bit is sent first. The 7-bit groups are laid out
/// back to back, most significant bit of each byte first: a sub-byte shift
/// rotates through 1..=7 and 0, so every 8 characters fill exactly 7 bytes.
///
/// Characters above 0x7F are rejected; callers append [`ETX`](crate::consts::ETX)
/// themselves when a terminator is wanted.
pub fn pack_text<I>(chars: I) -> Result<PackedText, Error>
where
    I: IntoIterator<Item = u8>,
{
    let mut bytes = PackedBuffer::new();
    let mut count = 0;
    let mut shift = 1;
    let mut index = 0;

    for c in chars {
        if c > 0x7F {
            return Err(Error::InvalidCharacter {
                character: char::from(c),
                position: count,
            });
        }
        let bits = u16::from(reverse_bits(c) >> 1) << shift;
        while bytes.len() <= index {
            bytes.try_push(0)?;
        }
        bytes[index] |= (bits & 0xFF) as u8;
        if index > 0 {
            bytes[index - 1] |= (bits >> 8) as u8;
        }

        shift += 1;
        if shift == 8 {
            shift = 0;
        } else {
            index += 1;
        }
        count += 1;
    }

    Ok(PackedText {
        bytes,
        chars: count,
    })
}

/// Splits packed text into message codewords, 20 bits each.
///
/// Bytes are read in 3-byte windows, most significant byte first, and the
/// windows alternate between two alignments: even windows take their top 20
/// bits and advance by 2 bytes, odd windows skip the 4 bits already consumed,
/// take the next 20 and advance by 3 bytes. Windows running past the end of
/// the stream are zero-padded. One codeword is produced per started 20-bit
/// group of meaningful bits.
pub fn split_message_frames(packed: &PackedText) -> Result<CodewordBuffer, Error> {
    let bytes = packed.bytes();
    let count = packed.bit_len().div_ceil(MESSAGE_BITS_PER_CODEWORD);
    let mut frames = CodewordBuffer::new();
    let mut cursor = 0;

    for chunk in 0..count {
        let byte_at = |i: usize| u32::from(bytes.get(cursor + i).copied().unwrap_or(0));
        let window = (byte_at(0) << 24) | (byte_at(1) << 16) | (byte_at(2) << 8);
        let payload = if chunk % 2 == 0 {
            cursor += 2;
            window >> 12
        } else {
            cursor += 3;
            (window >> 8) & 0x000F_FFFF
        };
        frames.try_push(Codeword::message(payload))?;
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bch::syndrome;
    use crate::consts::ETX;

    #[test]
    fn test_reverse_bits_is_involutive() {
        for x in 0..=255u8 {
            assert_eq!(reverse_bits(reverse_bits(x)), x);
        }
        assert_eq!(reverse_bits(0x01), 0x80);
        assert_eq!(reverse_bits(0x41), 0x82);
    }

    #[test]
    fn test_pack_single_character() {
        let packed = pack_text(*b"A").unwrap();
        assert_eq!(packed.bytes(), &[0x82]);
        assert_eq!(packed.bit_len(), 7);
    }

    #[test]
    fn test_packed_length_is_ceil_seven_eighths() {
        for n in 0..=40 {
            let packed = pack_text(core::iter::repeat_n(b'z', n)).unwrap();
            assert_eq!(packed.bytes().len(), (7 * n).div_ceil(8), "n = {n}");
            assert_eq!(packed.chars(), n);
        }
    }

    #[test]
    fn test_pack_is_a_continuous_lsb_first_stream() {
        let text = b"HELLO WORLD";
        let packed = pack_text(text.iter().copied()).unwrap();
        for (i, &c) in text.iter().enumerate() {
            let mut value = 0u8;
            for bit in 0..CHAR_BITS {
                let pos = i * CHAR_BITS + bit;
                let set = packed.bytes()[pos / 8] & (0x80 >> (pos % 8)) != 0;
                value |= u8::from(set) << bit;
            }
            assert_eq!(value, c, "character {i}");
        }
    }

    #[test]
    fn test_pack_rejects_eight_bit_characters() {
        assert_eq!(
            pack_text([b'a', 0xE9]),
            Err(Error::InvalidCharacter {
                character: 'é',
                position: 1
            })
        );
    }

    #[test]
    fn test_validate_text() {
        assert_eq!(validate_text(""), Ok(0));
        assert_eq!(validate_text("HELLO"), Ok(5));
        assert_eq!(
            validate_text("né"),
            Err(Error::InvalidCharacter {
                character: 'é',
                position: 1
            })
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_validate_accepts_long_text_with_growable_buffers() {
        let long = "x".repeat(500);
        assert_eq!(validate_text(&long), Ok(500));
    }

    #[cfg(not(feature = "std"))]
    #[test]
    fn test_validate_rejects_text_over_buffer_capacity() {
        let long = [b'x'; MAX_MESSAGE_LEN + 1];
        let long = core::str::from_utf8(&long).unwrap();
        assert_eq!(
            validate_text(long),
            Err(Error::MessageTooLong {
                len: MAX_MESSAGE_LEN + 1,
                max: MAX_MESSAGE_LEN
            })
        );
    }

    #[test]
    fn test_split_preserves_stream() {
        let text = b"The quick brown fox jumps over the lazy dog\x03";
        let packed = pack_text(text.iter().copied()).unwrap();
        let frames = split_message_frames(&packed).unwrap();
        assert_eq!(frames.len(), (text.len() * 7).div_ceil(20));

        // concatenating the payloads gives back the packed stream
        let mut stream = Vec::new();
        for frame in &frames {
            assert!(frame.is_message());
            assert_eq!(syndrome(frame.bits()), 0);
            for bit in (0..20).rev() {
                stream.push((frame.payload() >> bit) & 1 == 1);
            }
        }
        for (pos, &bit) in stream.iter().enumerate().take(packed.bit_len()) {
            let expected = packed.bytes()[pos / 8] & (0x80 >> (pos % 8)) != 0;
            assert_eq!(bit, expected, "bit {pos}");
        }
    }

    #[test]
    fn test_split_short_message() {
        // "A" + ETX: 14 bits, one codeword
        let packed = pack_text([b'A', ETX]).unwrap();
        let frames = split_message_frames(&packed).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].payload() >> 6, 0b1000001_1100000);
    }
}
