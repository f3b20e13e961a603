//! The 32-bit unit of every POCSAG transmission.

use crate::bch::build_codeword;
use crate::consts::{IDLE_CODEWORD, MESSAGE_FLAG, PAYLOAD_MASK, PAYLOAD_SHIFT, SYNC_CODEWORD};

/// A complete codeword: type flag, 20-bit payload, BCH check field and parity.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Hash)]
pub struct Codeword(pub u32);

impl Codeword {
    /// Frame synchronization codeword.
    pub const SYNC: Codeword = Codeword(SYNC_CODEWORD);

    /// Filler for unused codeword slots.
    pub const IDLE: Codeword = Codeword(IDLE_CODEWORD);

    /// Builds an address-type codeword from 20 payload bits (address + function).
    pub fn address(payload: u32) -> Self {
        Codeword(build_codeword((payload & PAYLOAD_MASK) << PAYLOAD_SHIFT))
    }

    /// Builds a message-type codeword from 20 bits of packed text.
    pub fn message(payload: u32) -> Self {
        Codeword(build_codeword(
            MESSAGE_FLAG | ((payload & PAYLOAD_MASK) << PAYLOAD_SHIFT),
        ))
    }

    /// Raw 32-bit value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `true` when the type flag marks a message codeword.
    pub const fn is_message(self) -> bool {
        self.0 & MESSAGE_FLAG != 0
    }

    /// The 20 payload bits, shifted down to bits 19..0.
    pub const fn payload(self) -> u32 {
        (self.0 >> PAYLOAD_SHIFT) & PAYLOAD_MASK
    }

    /// Bytes in transmission order, most significant byte first.
    pub const fn to_wire_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<Codeword> for u32 {
    fn from(cw: Codeword) -> u32 {
        cw.0
    }
}
