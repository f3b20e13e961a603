//! Error types returned by the encoder, synthesizer and driver.

use thiserror::Error;

use crate::address::FunctionCode;

/// Errors raised while validating input, encoding a page or configuring synthesis.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// The RIC does not fit in 21 bits.
    #[error("address {0} exceeds the 21-bit RIC range")]
    AddressOutOfRange(u32),

    /// The address and function code encode to the idle or sync codeword.
    #[error("address {ric} with function {function:?} encodes to a reserved codeword")]
    ReservedAddress {
        /// The rejected RIC.
        ric: u32,
        /// The function code it was paired with.
        function: FunctionCode,
    },

    /// The message contains a character outside the 7-bit range.
    #[error("character {character:?} at position {position} is not 7-bit ASCII")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Its index (in characters) within the message.
        position: usize,
    },

    /// The message is longer than a single page can carry.
    #[error("message of {len} characters exceeds the {max} character limit")]
    MessageTooLong {
        /// Length of the rejected message, in characters.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The symbol rate is not one of 512, 1200 or 2400 baud.
    #[error("unsupported baud rate {0}, expected 512, 1200 or 2400")]
    UnsupportedBaudRate(u32),

    /// The sample rate yields fewer than one sample per symbol.
    #[error("sample rate {sample_rate} Hz is too low for {baud} baud")]
    SampleRateTooLow {
        /// Requested audio sample rate, in Hz.
        sample_rate: u32,
        /// Requested symbol rate, in baud.
        baud: u32,
    },

    /// The deviation is not a finite, positive frequency below Nyquist.
    #[error("invalid deviation {0} Hz")]
    InvalidDeviation(f32),

    /// The access tone is not a finite, positive frequency below Nyquist.
    #[error("invalid access tone frequency {0} Hz")]
    InvalidAccessTone(f32),

    /// The access tone level is outside `0.0..=1.0`.
    #[error("invalid access tone level {0}")]
    InvalidToneLevel(f32),

    /// A fixed-capacity buffer ran out of space.
    #[error("buffer capacity exceeded")]
    BufferOverflow,

    /// The driver is still transmitting the previous page.
    #[error("transmitter busy")]
    Busy,

    /// The global driver has not been set up yet.
    #[error("pager driver not initialized")]
    NotInitialized,
}

/// Errors raised while pushing a page into a [`SampleSink`](crate::driver::SampleSink).
#[derive(Error, Debug)]
pub enum TransmitError<E> {
    /// The page could not be encoded.
    #[error(transparent)]
    Encode(#[from] Error),

    /// The sink rejected a sample.
    #[error("sample sink failed: {0:?}")]
    Sink(E),
}
