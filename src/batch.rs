//! Preamble, batch and frame assembly.
//!
//! A transmission is a preamble followed by one or more batches. Each batch is
//! the sync codeword and 16 codeword slots, grouped into 8 frames of 2. The
//! address codeword is sent once, in the first batch, at the frame selected by
//! the low bits of the RIC; message codewords follow it and spill into as many
//! further batches as needed. Unused slots carry the idle codeword.
//!
//! ## Functions
//!
//! - [`message_frames`]: Message codewords for a text, terminator included
//! - [`assemble`]: Lays out preamble, address and message codewords into batches
//! - [`encode_message`]: Validates and encodes a page end to end
//! - [`MsbBits`]: Iterates the wire bytes as bits, most significant bit first

use crate::address::{Address, FunctionCode};
use crate::buffer::{CodewordBuffer, TryPush, WireBuffer};
use crate::codeword::Codeword;
use crate::consts::{
    CODEWORDS_PER_BATCH, CODEWORDS_PER_FRAME, ETX, FRAMES_PER_BATCH, PREAMBLE_FILL, PREAMBLE_LEN,
};
use crate::encoding::{pack_text, split_message_frames, validate_text};
use crate::error::Error;

/// Message codewords for `text`.
///
/// A non-empty text is packed with a trailing [`ETX`]; an empty text becomes a
/// single idle codeword.
pub fn message_frames(text: &str) -> Result<CodewordBuffer, Error> {
    if validate_text(text)? == 0 {
        let mut frames = CodewordBuffer::new();
        frames.try_push(Codeword::IDLE)?;
        return Ok(frames);
    }
    let packed = pack_text(text.bytes().chain([ETX]))?;
    split_message_frames(&packed)
}

/// Lays out a complete transmission.
///
/// # Layout
/// - The preamble, once.
/// - Per batch: the sync codeword, then 16 slots.
/// - First batch only: two idle codewords for each frame before the address's
///   frame offset, then the address codeword.
/// - Message codewords fill the following slots in order, continuing at slot 0
///   of later batches; slots left over in the last batch are idle.
///
/// Assembly stops once the batch holding the last message codeword is full.
pub fn assemble(
    address: Codeword,
    frame_offset: usize,
    frames: &[Codeword],
) -> Result<WireBuffer, Error> {
    let mut wire = WireBuffer::new();
    for _ in 0..PREAMBLE_LEN {
        wire.try_push(PREAMBLE_FILL)?;
    }

    let address_slot = (frame_offset % FRAMES_PER_BATCH) * CODEWORDS_PER_FRAME;
    let mut frames = frames.iter().copied().peekable();
    let mut first = true;
    let mut batches = 0;

    loop {
        push_codeword(&mut wire, Codeword::SYNC)?;
        let mut slot = 0;

        if first {
            while slot < address_slot {
                push_codeword(&mut wire, Codeword::IDLE)?;
                slot += 1;
            }
            push_codeword(&mut wire, address)?;
            slot += 1;
            first = false;
        }

        while slot < CODEWORDS_PER_BATCH {
            push_codeword(&mut wire, frames.next().unwrap_or(Codeword::IDLE))?;
            slot += 1;
        }
        batches += 1;

        if frames.peek().is_none() {
            break;
        }
    }

    trace!("assembled {} batches, {} bytes", batches, wire.len());
    Ok(wire)
}

fn push_codeword(wire: &mut WireBuffer, cw: Codeword) -> Result<(), Error> {
    for byte in cw.to_wire_bytes() {
        wire.try_push(byte)?;
    }
    Ok(())
}

/// Encodes an alphanumeric page for `address`.
///
/// # Returns
/// The wire bytes: preamble followed by the batches.
///
/// # Example
/// ```rust
/// use pocsag::address::Address;
/// use pocsag::batch::encode_message;
///
/// let wire = encode_message(Address::new(123_456).unwrap(), "HELLO").unwrap();
/// assert_eq!(wire.len(), 72 + 68);
/// ```
pub fn encode_message(address: Address, text: &str) -> Result<WireBuffer, Error> {
    encode_message_with(address, FunctionCode::Alphanumeric, text)
}

/// Encodes a page for `address` using an explicit function code.
///
/// # Errors
/// - [`Error::ReservedAddress`] when `address` and `function` encode to the
///   idle or sync codeword
/// - Any text validation or buffer capacity error
pub fn encode_message_with(
    address: Address,
    function: FunctionCode,
    text: &str,
) -> Result<WireBuffer, Error> {
    let frames = message_frames(text)?;
    debug!(
        "encoding page for RIC {}: frame {}, {} message codewords",
        address.ric(),
        address.frame_offset(),
        frames.len()
    );
    let address_cw = address.checked_codeword(function)?;
    assemble(address_cw, address.frame_offset(), &frames)
}

/// Iterates over bytes as bits, most significant bit of each byte first.
///
/// This is the order in which the assembled batches go on air; it is not the
/// reversed order used inside packed text.
#[derive(Debug, Clone)]
pub struct MsbBits<B> {
    bytes: B,
    position: usize,
}

impl<B: AsRef<[u8]>> MsbBits<B> {
    /// Starts at the first bit of `bytes`.
    pub fn new(bytes: B) -> Self {
        Self { bytes, position: 0 }
    }
}

impl<B: AsRef<[u8]>> Iterator for MsbBits<B> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let byte = *self.bytes.as_ref().get(self.position / 8)?;
        let bit = byte & (0x80 >> (self.position % 8)) != 0;
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.bytes.as_ref().len() * 8;
        let left = total.saturating_sub(self.position);
        (left, Some(left))
    }
}

impl<B: AsRef<[u8]>> ExactSizeIterator for MsbBits<B> {}

/// Converts bytes into bits, most significant bit of each byte first.
#[cfg(feature = "std")]
pub fn bits_from_bytes(bytes: &[u8]) -> Vec<bool> {
    MsbBits::new(bytes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BATCH_LEN, IDLE_CODEWORD, SYNC_CODEWORD};

    fn codewords(wire: &[u8]) -> Vec<u32> {
        wire[PREAMBLE_LEN..]
            .chunks(4)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn test_empty_message_is_single_idle_codeword() {
        let frames = message_frames("").unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0], Codeword::IDLE);
    }

    #[test]
    fn test_preamble_is_alternating() {
        let wire = encode_message(Address::new(8).unwrap(), "hi").unwrap();
        assert!(wire[..PREAMBLE_LEN].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_address_in_frame_zero() {
        let address = Address::new(123_456).unwrap();
        let wire = encode_message(address, "HELLO").unwrap();
        assert_eq!(wire.len(), PREAMBLE_LEN + BATCH_LEN);

        let words = codewords(&wire);
        assert_eq!(words[0], SYNC_CODEWORD);
        let address_cw = address.codeword(FunctionCode::Alphanumeric).bits();
        assert_eq!(words[1], address_cw);
        // "HELLO" + ETX = 42 bits, three message codewords
        for &w in &words[2..5] {
            assert!(w & 0x8000_0000 != 0);
        }
        assert!(words[5..].iter().all(|&w| w == IDLE_CODEWORD));
    }

    #[test]
    fn test_idle_fill_before_frame_offset() {
        let address = Address::new(1_234_567).unwrap();
        assert_eq!(address.frame_offset(), 7);
        // "HI" + ETX = 21 bits, two message codewords
        let wire = encode_message(address, "HI").unwrap();
        let words = codewords(&wire);
        assert_eq!(words.len(), 2 * (CODEWORDS_PER_BATCH + 1));
        assert!(words[1..15].iter().all(|&w| w == IDLE_CODEWORD));
        let address_cw = address.codeword(FunctionCode::Alphanumeric).bits();
        assert_eq!(words[15], address_cw);
        assert!(words[16] & 0x8000_0000 != 0);
        assert_eq!(words[17], SYNC_CODEWORD);
        assert!(words[18] & 0x8000_0000 != 0);
        assert!(words[19..].iter().all(|&w| w == IDLE_CODEWORD));
    }

    #[test]
    fn test_message_spills_into_later_batches() {
        let address = Address::new(0o15).unwrap(); // frame 5
        let text = "0123456789".repeat(6);
        let frames = message_frames(&text).unwrap();
        assert_eq!(frames.len(), 22);

        let wire = encode_message(address, &text).unwrap();
        let words = codewords(&wire);
        // 10 idles + address + 5 messages, then 16 messages, then 1 message + 15 idles
        assert_eq!(words.len(), 3 * (CODEWORDS_PER_BATCH + 1));
        assert_eq!(words[17], SYNC_CODEWORD);
        assert_eq!(words[34], SYNC_CODEWORD);
        let messages: Vec<u32> = words
            .iter()
            .copied()
            .filter(|w| w & 0x8000_0000 != 0)
            .collect();
        let expected: Vec<u32> = frames.iter().map(|f| f.bits()).collect();
        assert_eq!(messages, expected);
        assert!(words[36..].iter().all(|&w| w == IDLE_CODEWORD));
    }

    #[test]
    fn test_exactly_full_batch_needs_no_extra_batch() {
        // frame 0: address + 15 message codewords fill the first batch
        let frames = [Codeword::message(1); 15];
        let wire = assemble(Codeword::address(0), 0, &frames).unwrap();
        assert_eq!(wire.len(), PREAMBLE_LEN + BATCH_LEN);
    }

    #[test]
    fn test_msb_bits_order() {
        let bits = bits_from_bytes(&[0x80, 0x01]);
        assert_eq!(bits.len(), 16);
        assert!(bits[0]);
        assert!(bits[1..15].iter().all(|&b| !b));
        assert!(bits[15]);
        assert_eq!(MsbBits::new([0xAAu8]).len(), 8);
    }

    #[test]
    fn test_rejects_invalid_text() {
        let address = Address::new(42).unwrap();
        assert!(matches!(
            encode_message(address, "caf\u{e9}"),
            Err(Error::InvalidCharacter { position: 3, .. })
        ));
    }
}
