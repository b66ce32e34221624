//! Error types for the framing codec.

use core::fmt;

/// A specialized `Result` type using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced by [`crate::frame_data`] and [`crate::ParserState::get_data`].
///
/// This is a closed set: encoding and decoding can only fail in these three ways. A fourth,
/// partial-data condition exists on the decode side (`ParseOutcome::Incomplete`) but it is not
/// a failure and is therefore folded into the `Ok` side of `get_data`'s `Result` rather than
/// living here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The destination buffer passed to the encoder or the parser is too small to hold the
    /// output. `need` is a lower bound on the required capacity.
    BufferTooSmall {
        /// Minimum number of bytes the destination buffer would have needed.
        need: usize,
    },
    /// A frame's destuffed content grew past the parser's fixed capacity before a closing FLAG
    /// was seen. The parser has already resynchronized and is waiting for the next FLAG.
    FrameTooLarge {
        /// Number of input bytes consumed from the call that triggered the overflow.
        consumed: usize,
    },
    /// A complete frame boundary was found but the FCS did not validate.
    FcsInvalid {
        /// Number of input bytes consumed, including the closing FLAG.
        consumed: usize,
        /// Destuffed (but unverified) buffer length, FCS bytes included, plus one.
        length: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { need } => {
                write!(f, "destination buffer too small, need at least {need} bytes")
            }
            Self::FrameTooLarge { consumed } => write!(
                f,
                "frame content exceeded the parser's capacity ({consumed} bytes consumed)"
            ),
            Self::FcsInvalid { consumed, length } => write!(
                f,
                "frame check sequence mismatch ({consumed} bytes consumed, {length} bytes of unverified content)"
            ),
        }
    }
}

impl core::error::Error for Error {}
