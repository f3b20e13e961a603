//! Pager identities (RIC) and the address codeword.
//!
//! The low three bits of a RIC pick the frame in which the pager listens; they
//! are not transmitted. The remaining 18 bits and a 2-bit function code form
//! the address codeword payload.

use crate::codeword::Codeword;
use crate::consts::{FRAME_OFFSET_MASK, MAX_ADDRESS};
use crate::error::Error;

/// The 2-bit function code of an address codeword.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum FunctionCode {
    /// Numeric (BCD) message.
    Numeric = 0,
    /// Tone-only alert, first source.
    Tone1 = 1,
    /// Tone-only alert, second source.
    Tone2 = 2,
    /// Alphanumeric (7-bit text) message.
    #[default]
    Alphanumeric = 3,
}

impl FunctionCode {
    /// Maps the two low bits of `bits` to a function code.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => FunctionCode::Numeric,
            1 => FunctionCode::Tone1,
            2 => FunctionCode::Tone2,
            _ => FunctionCode::Alphanumeric,
        }
    }

    /// The 2-bit value placed in the codeword.
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// A validated 21-bit Radio Identity Code.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Address(u32);

impl Address {
    /// Validates `ric`, rejecting values above [`MAX_ADDRESS`].
    pub const fn new(ric: u32) -> Result<Self, Error> {
        if ric > MAX_ADDRESS {
            Err(Error::AddressOutOfRange(ric))
        } else {
            Ok(Address(ric))
        }
    }

    /// The RIC as given.
    pub const fn ric(self) -> u32 {
        self.0
    }

    /// Frame (0-7) within each batch where this pager listens.
    pub const fn frame_offset(self) -> usize {
        (self.0 & FRAME_OFFSET_MASK) as usize
    }

    /// Builds the address codeword for this RIC and `function`.
    ///
    /// The upper 18 bits of the RIC fill payload bits 19..2 and the function
    /// code bits 1..0, so the type flag of the result is always clear.
    ///
    /// Two address/function pairs collide with the idle and sync codewords;
    /// [`checked_codeword`](Address::checked_codeword) rejects them.
    pub fn codeword(self, function: FunctionCode) -> Codeword {
        Codeword::address(((self.0 >> 3) << 2) | function.bits())
    }

    /// Like [`codeword`](Address::codeword), but fails on reserved codewords.
    ///
    /// # Errors
    /// [`Error::ReservedAddress`] when the result equals [`Codeword::IDLE`] or
    /// [`Codeword::SYNC`]; a pager would never see such a page.
    pub fn checked_codeword(self, function: FunctionCode) -> Result<Codeword, Error> {
        let cw = self.codeword(function);
        if cw == Codeword::IDLE || cw == Codeword::SYNC {
            return Err(Error::ReservedAddress {
                ric: self.0,
                function,
            });
        }
        Ok(cw)
    }
}

impl TryFrom<u32> for Address {
    type Error = Error;

    fn try_from(ric: u32) -> Result<Self, Error> {
        Address::new(ric)
    }
}

impl From<Address> for u32 {
    fn from(address: Address) -> u32 {
        address.0
    }
}

/// Address codeword for `ric`, validating its range first.
pub fn encode_address(ric: u32, function: FunctionCode) -> Result<Codeword, Error> {
    Address::new(ric)?.checked_codeword(function)
}
