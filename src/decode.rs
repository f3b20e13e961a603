//! Diagnostic decoder for checking the encoder's own output.
//!
//! **This is not a POCSAG receiver.** It finds the first sync codeword in a
//! clean bitstream and classifies the codewords that follow by their type flag
//! and the fixed sync/idle patterns. Check bits and parity are never verified
//! or used for correction, there is no resynchronization after bit slips, and
//! every address found is reported regardless of which pager it belongs to.
//! Use it on synthesized or loop-back data only.

use crate::address::FunctionCode;
use crate::consts::{
    CHAR_BITS, CODEWORDS_PER_BATCH, CODEWORDS_PER_FRAME, ETX, IDLE_CODEWORD,
    MESSAGE_BITS_PER_CODEWORD, SYNC_CODEWORD,
};
use crate::encoding::reverse_bits;

/// One codeword classified by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    /// The frame synchronization codeword.
    Sync,
    /// The idle codeword.
    Idle,
    /// An address codeword.
    Address {
        /// RIC rebuilt from the address bits and the frame the codeword sat in.
        ric: u32,
        /// Function code bits.
        function: FunctionCode,
    },
    /// A message codeword.
    Message {
        /// The 20 payload bits.
        payload: u32,
    },
}

/// Result of a successful sync search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Bit index just past the first sync codeword.
    pub sync_end: usize,
    /// Codewords found after the sync, in order.
    pub words: Vec<Word>,
}

impl Decoded {
    /// Address and message codewords, skipping sync and idle fill.
    pub fn elements(&self) -> impl Iterator<Item = &Word> {
        self.words
            .iter()
            .filter(|w| matches!(w, Word::Address { .. } | Word::Message { .. }))
    }

    /// RICs of all address codewords found.
    pub fn addresses(&self) -> impl Iterator<Item = u32> + '_ {
        self.words.iter().filter_map(|w| match w {
            Word::Address { ric, .. } => Some(*ric),
            _ => None,
        })
    }

    /// Reassembles the text carried by the message codewords.
    ///
    /// The payloads are concatenated into one bit stream and read back as
    /// 7-bit characters, least significant bit first, up to the first ETX.
    pub fn text(&self) -> String {
        let mut text = String::new();
        let mut acc = 0u8;
        let mut count = 0;
        for w in &self.words {
            let Word::Message { payload } = *w else {
                continue;
            };
            for bit in (0..MESSAGE_BITS_PER_CODEWORD).rev() {
                acc |= (((payload >> bit) & 1) as u8) << count;
                count += 1;
                if count == CHAR_BITS {
                    if acc == ETX {
                        return text;
                    }
                    text.push(char::from(acc));
                    acc = 0;
                    count = 0;
                }
            }
        }
        text
    }
}

/// Splits one message payload into up to three characters, in stream order.
///
/// The third group only holds 6 bits; its missing high bit reads as zero.
/// Characters spanning codeword boundaries come out wrong, and NUL groups are
/// skipped.
pub fn payload_chars(payload: u32) -> impl Iterator<Item = char> {
    [13u32, 6, 0].into_iter().filter_map(move |shift| {
        let group = if shift == 0 {
            (payload & 0x3F) << 1
        } else {
            (payload >> shift) & 0x7F
        };
        let c = reverse_bits((group as u8) << 1);
        (c != 0).then(|| char::from(c))
    })
}

fn read_word(bits: &[bool]) -> u32 {
    bits.iter()
        .take(32)
        .fold(0u32, |acc, &b| (acc << 1) | u32::from(b))
}

/// Looks for the sync codeword and classifies the codewords after it.
///
/// # Returns
/// `None` when no sync codeword appears anywhere in `bits`.
pub fn decode_bits(bits: &[bool]) -> Option<Decoded> {
    let start = bits
        .windows(32)
        .position(|w| read_word(w) == SYNC_CODEWORD)?;
    let sync_end = start + 32;

    let mut words = Vec::new();
    let mut slot = 0;
    for chunk in bits[sync_end..].chunks_exact(32) {
        let cw = read_word(chunk);
        let word = match cw {
            SYNC_CODEWORD => {
                slot = 0;
                words.push(Word::Sync);
                continue;
            }
            IDLE_CODEWORD => Word::Idle,
            _ if cw & (1 << 31) == 0 => {
                let frame = (slot % CODEWORDS_PER_BATCH / CODEWORDS_PER_FRAME) as u32;
                Word::Address {
                    ric: (((cw >> 13) & 0x3_FFFF) << 3) | frame,
                    function: FunctionCode::from_bits(cw >> 11),
                }
            }
            _ => Word::Message {
                payload: (cw >> 11) & 0xF_FFFF,
            },
        };
        words.push(word);
        slot += 1;
    }

    Some(Decoded { sync_end, words })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::batch::{bits_from_bytes, encode_message, encode_message_with};
    use crate::consts::PREAMBLE_LEN;

    #[test]
    fn test_no_sync_returns_none() {
        assert_eq!(decode_bits(&[]), None);
        assert_eq!(decode_bits(&bits_from_bytes(&[0xAA; 16])), None);
    }

    #[test]
    fn test_round_trip_finds_sync_and_elements() {
        let address = Address::new(123_456).unwrap();
        let wire = encode_message(address, "HELLO WORLD").unwrap();
        let decoded = decode_bits(&bits_from_bytes(&wire)).unwrap();
        assert_eq!(decoded.sync_end, PREAMBLE_LEN * 8 + 32);
        assert!(decoded.elements().count() >= 1);
        assert_eq!(decoded.addresses().collect::<Vec<_>>(), vec![123_456]);
        assert_eq!(decoded.text(), "HELLO WORLD");
    }

    #[test]
    fn test_round_trip_across_batches() {
        let address = Address::new(1_234_567).unwrap();
        let message = "PAGE 2: the quick brown fox jumps over the lazy dog";
        let wire = encode_message(address, message).unwrap();
        let decoded = decode_bits(&bits_from_bytes(&wire)).unwrap();
        assert!(decoded.words.contains(&Word::Sync));
        assert_eq!(decoded.addresses().collect::<Vec<_>>(), vec![1_234_567]);
        assert_eq!(decoded.text(), message);
    }

    #[test]
    fn test_round_trip_longer_than_fixed_buffers() {
        let message: String = (0..30).map(|i| format!("{i:02} ")).collect::<String>() + "END";
        assert!(message.len() > crate::consts::MAX_MESSAGE_LEN);
        let wire = encode_message(Address::new(8).unwrap(), &message).unwrap();
        let decoded = decode_bits(&bits_from_bytes(&wire)).unwrap();
        assert_eq!(decoded.addresses().collect::<Vec<_>>(), vec![8]);
        assert_eq!(decoded.text(), message);
    }

    #[test]
    fn test_reserved_address_never_reaches_the_wire() {
        let address = Address::new(0x1E_A270).unwrap();
        assert_eq!(
            encode_message_with(address, FunctionCode::Numeric, "x"),
            Err(crate::error::Error::ReservedAddress {
                ric: 0x1E_A270,
                function: FunctionCode::Numeric
            })
        );
        let wire = encode_message_with(address, FunctionCode::Alphanumeric, "x").unwrap();
        let decoded = decode_bits(&bits_from_bytes(&wire)).unwrap();
        assert_eq!(decoded.addresses().collect::<Vec<_>>(), vec![0x1E_A270]);
    }

    #[test]
    fn test_function_code_is_reported() {
        let wire = encode_message(Address::new(8).unwrap(), "x").unwrap();
        let decoded = decode_bits(&bits_from_bytes(&wire)).unwrap();
        assert!(decoded.words.contains(&Word::Address {
            ric: 8,
            function: FunctionCode::Alphanumeric
        }));
    }

    #[test]
    fn test_payload_chars_reads_first_codeword() {
        let wire = encode_message(Address::new(0).unwrap(), "OK").unwrap();
        let decoded = decode_bits(&bits_from_bytes(&wire)).unwrap();
        let Some(Word::Message { payload }) = decoded
            .words
            .iter()
            .copied()
            .find(|w| matches!(w, Word::Message { .. }))
        else {
            panic!("no message codeword");
        };
        assert_eq!(payload_chars(payload).collect::<String>(), "OK\u{3}");
    }

    #[test]
    fn test_empty_message_decodes_to_address_and_idles() {
        let wire = encode_message(Address::new(16).unwrap(), "").unwrap();
        let decoded = decode_bits(&bits_from_bytes(&wire)).unwrap();
        assert_eq!(decoded.elements().count(), 1);
        assert_eq!(decoded.text(), "");
    }

    #[test]
    fn test_sync_found_at_any_bit_offset() {
        let wire = encode_message(Address::new(3).unwrap(), "A").unwrap();
        let mut bits = vec![true, false, true];
        bits.extend(bits_from_bytes(&wire));
        let decoded = decode_bits(&bits).unwrap();
        assert_eq!(decoded.sync_end, 3 + PREAMBLE_LEN * 8 + 32);
        assert_eq!(decoded.text(), "A");
    }
}
