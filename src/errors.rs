// src/errors.rs
//! Decode error taxonomy for the EIT core.

use thiserror::Error;

/// Errors raised while decoding one EIT section. A failure aborts that
/// section only; the caller moves on to the next one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Section header or body truncated before a declared field.
    #[error("malformed section: {0}")]
    MalformedSection(&'static str),

    /// A descriptor's internal length fields overrun the remaining buffer.
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(&'static str),

    /// Table id outside the EIT range was handed to the EIT decoder.
    #[error("not an EIT section (table_id 0x{0:02X})")]
    NotEit(u8),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
