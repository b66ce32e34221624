//! A byte-stuffed, HDLC-style framing codec with CRC-16/X.25 error detection.
//!
//! A frame on the wire looks like:
//!
//! ```text
//! FLAG ADDRESS CONTROL PAYLOAD... FCS_LO FCS_HI FLAG
//! ```
//!
//! `ADDRESS`, `CONTROL`, and `PAYLOAD` are byte-stuffed before transmission: any occurrence of
//! `FLAG` or `ESCAPE` inside them is replaced with `ESCAPE` followed by the original byte XOR'd
//! with `0x20`. [`frame_data`] builds a frame from a [`ControlField`] and a payload;
//! [`ParserState::get_data`] consumes a byte stream, possibly split across many calls, and
//! recovers frames from it.
//!
//! The crate has no heap and no runtime dependency on an allocator: both sides work against
//! caller-supplied buffers, and the parser's internal scratch space is a fixed-capacity
//! [`heapless::Vec`] sized by a const generic.
#![cfg_attr(not(test), no_std)]

mod control;
mod encoder;
mod error;
mod fcs;
mod parser;

pub use control::{ControlField, FrameType};
pub use encoder::{frame_data, max_encoded_len};
pub use error::{Error, Result};
pub use parser::{ParseOutcome, ParserState};

/// Marks the start and end of every frame on the wire.
pub const FLAG: u8 = 0x7E;
/// Prefixes a byte-stuffed `FLAG` or `ESCAPE` occurring inside a frame's content.
pub const ESCAPE: u8 = 0x7D;
/// XOR mask applied to a stuffed byte's original value.
pub const ESCAPE_MASK: u8 = 0x20;
/// The only address this codec speaks; present on the wire for compatibility with peers that
/// inspect it, but never interpreted on the receive side.
pub const ADDRESS: u8 = 0xFF;
/// Width in bytes of the trailing frame check sequence.
pub const FCS_LEN: usize = 2;

/// Default scratch capacity for [`ParserState`]: enough to hold ADDRESS + CONTROL + a 512-byte
/// payload + FCS (1 + 1 + 512 + 2 = 516), rounded up, without forcing every caller to pick their
/// own number.
///
/// Callers with tighter memory budgets or larger payloads should instantiate
/// `ParserState::<N>::new()` directly rather than relying on this default.
pub const DEFAULT_MAX_FRAME: usize = 520;
