//! # pocsag
//!
//! A portable, no_std Rust encoder for POCSAG pager messages, producing audio for the
//! modulation input of an ordinary FM transmitter.
//!
//! The crate covers the whole path from a text message to audio samples:
//! - BCH(31,21) check bits and even parity for every codeword
//! - address codewords carrying a 21-bit RIC and a function code
//! - 7-bit text packing and splitting into 20-bit message codewords
//! - batch assembly with preamble, sync words, frame placement and idle fill
//! - FSK tone synthesis at 512, 1200 or 2400 baud with an optional access (CTCSS) tone
//! - a tick-driven transmitter that keys a PTT pin and feeds a sample sink
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]`, replaces `heapless::Vec`s with `Vec`s and enables the diagnostic decoder |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` for sample timing |
//! | `timer-isr` (default) | Uses `critical_section::with` for sample timing |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust
//! use pocsag::address::Address;
//! use pocsag::batch::encode_message;
//! use pocsag::config::PagerConfig;
//! use pocsag::fsk::modulate;
//! use pocsag::pcm::to_i16;
//!
//! let wire = encode_message(Address::new(123_456)?, "HELLO WORLD")?;
//! let config = PagerConfig::default().with_access_tone(100.0);
//! let pcm: Vec<i16> = modulate(&wire, &config)?.map(to_i16).collect();
//! assert_eq!(pcm.len(), wire.len() * 8 * 40);
//! # Ok::<(), pocsag::error::Error>(())
//! ```
//!
//! On a microcontroller, queue the page on a [`driver::PagerDriver`] and call
//! `tick()` once per sample from a timer interrupt (see [`timer`]).
//!
//! ## Integration Notes
//!
//! - Deviation is expressed in audio Hz; the transmitter's own FM deviation
//!   setting scales it to the over-the-air swing
//! - Samples per bit are rounded down from `sample_rate / baud`; pick a sample
//!   rate that divides evenly when long messages must stay on time
//! - Only one driver instance should be active at a time in interrupt-driven mode
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod fmt;

#[cfg(feature = "timer-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod address;
pub mod batch;
pub mod bch;
pub mod buffer;
pub mod codeword;
pub mod config;
pub mod consts;
#[cfg(feature = "std")]
pub mod decode;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod fsk;
pub mod pcm;
pub mod timer;
