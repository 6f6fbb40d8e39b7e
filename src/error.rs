use crate::network::SocketError;
use std::io;
use thiserror::Error;

/// A field setter received a value outside its allowed domain.
///
/// Validation happens at assignment time, so a [`Packet`](crate::Packet)
/// that was constructed successfully never holds an invalid field.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("supplied {field} {value} isn't an integer between 0 and {max}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("supplied {field} '{value}' isn't a valid IPv4 address")]
    InvalidAddress {
        field: &'static str,
        value: String,
    },

    #[error("supplied {field} must not be the zero address")]
    ZeroAddress { field: &'static str },

    #[error("supplied {field} is too long: {len} bytes (maximum {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("option code {0} is reserved for the end-of-options marker")]
    ReservedOptionCode(u8),
}

/// A raw buffer could not be decoded into a [`Packet`](crate::Packet).
///
/// Decoding is all-or-nothing: no partial packet is ever returned.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("packet too short: {len} bytes (minimum {min})")]
    TooShort { len: usize, min: usize },

    #[error("option {code} is truncated: missing length byte")]
    OptionTruncated { code: u8 },

    #[error("option {code} declares {declared} value bytes but only {available} remain")]
    OptionOverrun {
        code: u8,
        declared: usize,
        available: usize,
    },

    #[error("option {code} value has unexpected length {len}")]
    BadOptionLength { code: u8, len: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A [`Packet`](crate::Packet) could not be encoded to wire bytes.
///
/// Like decoding, encoding is all-or-nothing.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("no converter registered for option code {0}")]
    UnregisteredOption(u8),

    #[error("field {0} must be set before encoding")]
    FieldUnset(&'static str),

    #[error("chaddr component '{0}' isn't a hex octet")]
    BadHardwareOctet(String),

    #[error("chaddr has {0} octets, more than the 16-byte field can hold")]
    HardwareAddressTooLong(usize),

    #[error("option {code} value doesn't match the registered {expected} converter")]
    ValueKindMismatch { code: u8, expected: &'static str },

    #[error("option {code} value is {len} bytes, more than a single option can carry")]
    ValueTooLong { code: u8, len: usize },
}

/// Top-level error for the monitor binary and stream plumbing.
#[derive(Error, Debug)]
pub enum BootwireError {
    #[error("socket operation failed")]
    Socket(#[from] SocketError),

    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("packet decoding failed")]
    Decode(#[from] DecodeError),

    #[error("packet encoding failed")]
    Encode(#[from] EncodeError),

    #[error("field validation failed")]
    Validation(#[from] ValidationError),
}
