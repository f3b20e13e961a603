//! Constants used across the POCSAG encoder and synthesizer.
//!
//! This module defines the protocol-wide fixed values (synchronization and
//! idle codewords, the BCH generator, preamble and batch geometry), the
//! message limits, the defaults of [`PagerConfig`](crate::config::PagerConfig)
//! and the capacities of the fixed-size buffers used without `std`.
//!
//! ## Key Concepts
//!
//! - **Codeword**: 32 bits. Bit 31 flags address (0) or message (1), bits 30..11
//!   carry the payload, bits 10..1 the BCH check field and bit 0 even parity.
//! - **Batch**: one sync codeword followed by 16 codewords (8 frames of 2).
//! - **Preamble**: alternating `1010...` bits sent once before the first batch.
//!
//! None of these values vary at runtime.

/// Frame synchronization codeword, sent at the start of every batch.
pub const SYNC_CODEWORD: u32 = 0x7CD2_15D8;

/// Idle codeword, used to fill codeword slots that carry no traffic.
pub const IDLE_CODEWORD: u32 = 0x7A89_C197;

/// BCH(31,21) generator polynomial `x^10 + x^9 + x^8 + x^6 + x^5 + x^3 + 1`.
pub const BCH_GENERATOR: u32 = 0x769;

/// Number of data bits (type flag + payload) protected by the BCH code.
pub const BCH_DATA_BITS: u32 = 21;

/// Mask selecting the type flag and payload bits of a codeword.
pub const DATA_MASK: u32 = 0xFFFF_F800;

/// Type flag marking a message codeword.
pub const MESSAGE_FLAG: u32 = 1 << 31;

/// Number of bits to the right of the payload (check field + parity).
pub const PAYLOAD_SHIFT: u32 = 11;

/// Mask of the 20-bit payload once shifted down by [`PAYLOAD_SHIFT`].
pub const PAYLOAD_MASK: u32 = 0x000F_FFFF;

/// Byte repeated to form the preamble (`10101010`).
pub const PREAMBLE_FILL: u8 = 0xAA;

/// Length (in bytes) of the preamble, 576 bits.
pub const PREAMBLE_LEN: usize = 72;

/// Number of codeword slots following the sync codeword in a batch.
pub const CODEWORDS_PER_BATCH: usize = 16;

/// Number of codeword slots in one frame.
pub const CODEWORDS_PER_FRAME: usize = 2;

/// Number of frames in one batch, and the number of distinct frame offsets.
pub const FRAMES_PER_BATCH: usize = CODEWORDS_PER_BATCH / CODEWORDS_PER_FRAME;

/// Bytes occupied by one codeword on the wire.
pub const CODEWORD_LEN: usize = 4;

/// Bytes occupied by one batch on the wire, sync codeword included.
pub const BATCH_LEN: usize = CODEWORD_LEN * (CODEWORDS_PER_BATCH + 1);

/// Largest representable RIC, 21 significant bits.
pub const MAX_ADDRESS: u32 = 0x001F_FFFF;

/// Bits of the RIC selecting the frame offset.
pub const FRAME_OFFSET_MASK: u32 = 0x7;

/// End-of-text control character appended to every non-empty message.
pub const ETX: u8 = 0x03;

/// Bits per packed character.
pub const CHAR_BITS: usize = 7;

/// Payload bits carried by one message codeword.
pub const MESSAGE_BITS_PER_CODEWORD: usize = 20;

/// Maximum number of characters in a single page without `std`, terminator excluded.
///
/// Sizes the fixed-capacity buffers; `std` builds accept any length.
pub const MAX_MESSAGE_LEN: usize = 80;

/// Packed size (in bytes) of the longest message plus its terminator.
pub const MAX_PACKED_LEN: usize = ((MAX_MESSAGE_LEN + 1) * CHAR_BITS).div_ceil(8);

/// Number of message codewords needed by the longest message.
pub const MAX_MESSAGE_CODEWORDS: usize =
    ((MAX_MESSAGE_LEN + 1) * CHAR_BITS).div_ceil(MESSAGE_BITS_PER_CODEWORD);

/// Worst-case codeword slots: idles for seven frames, the address and the longest message.
const MAX_SLOTS: usize = (FRAMES_PER_BATCH - 1) * CODEWORDS_PER_FRAME + 1 + MAX_MESSAGE_CODEWORDS;

/// Worst-case number of batches: address in the last frame of the first batch.
pub const MAX_BATCHES: usize = MAX_SLOTS.div_ceil(CODEWORDS_PER_BATCH);

/// Maximum size (in bytes) of an encoded transmission, preamble included.
pub const MAX_WIRE_LEN: usize = PREAMBLE_LEN + MAX_BATCHES * BATCH_LEN;

/// Default symbol rate, in bits per second.
pub const DEFAULT_BAUD: u32 = 1200;

/// Default audio sample rate, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Default FSK deviation, in Hz.
pub const DEFAULT_DEVIATION_HZ: f32 = 4500.0;

/// Default access tone amplitude, relative to full scale.
pub const DEFAULT_ACCESS_TONE_LEVEL: f32 = 0.1;
