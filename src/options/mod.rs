//! The option sub-protocol: decoded values, the insertion-ordered option
//! map, and the descriptor interface the registry dispatches through.
//!
//! Options on the wire are TLV triplets (code, length, value) following the
//! fixed header. What a value *means* is up to the descriptor registered for
//! its code; this module only defines the shapes those descriptors work
//! with. See [`registry`] for the priority-ordered dispatch itself and
//! [`standard`] for the stock RFC 2132 table.

pub mod registry;
pub mod standard;

pub use registry::OptionRegistry;
pub use standard::standard_registry;

use std::net::Ipv4Addr;

use bytes::{BufMut as _, BytesMut};

use crate::error::{DecodeError, EncodeError, ValidationError};

/// End-of-options marker. Reserved: never stored as data.
pub const OPTION_END: u8 = 255;

/// A decoded option value.
///
/// The source protocol is loosely typed here; each registered descriptor
/// decides which variant it produces on decode and accepts on encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A single IPv4 address (e.g. subnet mask, server identifier).
    Ipv4(Ipv4Addr),
    /// A list of IPv4 addresses (e.g. routers, DNS servers).
    Ipv4List(Vec<Ipv4Addr>),
    /// A one-byte integer (e.g. the DHCP message type).
    U8(u8),
    /// A two-byte big-endian integer (e.g. interface MTU).
    U16(u16),
    /// A four-byte big-endian integer (e.g. lease time).
    U32(u32),
    /// Text (e.g. host name, domain name).
    Str(String),
    /// Raw bytes for anything else.
    Bytes(Vec<u8>),
}

/// The option mapping of a packet, and the accumulator shared across
/// decode passes.
///
/// Codes are unique and iteration follows insertion order, which is also
/// the order options are written on encode. Equality is order-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Options {
    entries: Vec<(u8, OptionValue)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `code`. Replacing keeps the
    /// original insertion position. Code 255 is refused.
    pub fn insert(&mut self, code: u8, value: OptionValue) -> Result<(), ValidationError> {
        if code == OPTION_END {
            return Err(ValidationError::ReservedOptionCode(code));
        }
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == code) {
            entry.1 = value;
        } else {
            self.entries.push((code, value));
        }
        Ok(())
    }

    pub fn get(&self, code: u8) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, code: u8) -> Option<OptionValue> {
        let index = self.entries.iter().position(|(c, _)| *c == code)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, code: u8) -> bool {
        self.entries.iter().any(|(c, _)| *c == code)
    }

    /// Iterates (code, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &OptionValue)> {
        self.entries.iter().map(|(code, value)| (*code, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(code, value)| other.get(*code) == Some(value))
    }
}

/// Interprets and produces the bytes of one option code.
///
/// Descriptors are registered once, sorted by [`priority`](Self::priority)
/// when the registry is frozen, and read-only afterwards, so a codec can be
/// shared across tasks without synchronization.
pub trait OptionDescriptor: Send + Sync {
    /// The option code this descriptor is responsible for.
    fn code(&self) -> u8;

    /// Decode order: ascending, lower values run first. Descriptors whose
    /// decode depends on keys another descriptor populates must use a
    /// higher value than their dependency.
    fn priority(&self) -> i32 {
        0
    }

    /// Gates whether [`decode`](Self::decode) applies to this raw value.
    /// The default accepts everything.
    fn matches(&self, _raw: &[u8]) -> bool {
        true
    }

    /// Interprets `raw` into the shared accumulator. A decode may add or
    /// remove any keys, not just its own code.
    fn decode(&self, raw: &[u8], options: &mut Options) -> Result<(), DecodeError>;

    /// Appends the complete TLV (code, length, value bytes) for `value`.
    fn encode(&self, buffer: &mut BytesMut, value: &OptionValue) -> Result<(), EncodeError>;
}

/// The wire shape a [`TypedOption`] reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Ipv4,
    Ipv4List,
    U8,
    U16,
    U32,
    Str,
    Bytes,
}

impl ValueKind {
    fn name(self) -> &'static str {
        match self {
            Self::Ipv4 => "Ipv4",
            Self::Ipv4List => "Ipv4List",
            Self::U8 => "U8",
            Self::U16 => "U16",
            Self::U32 => "U32",
            Self::Str => "Str",
            Self::Bytes => "Bytes",
        }
    }
}

/// The common descriptor: one code, one value shape, no matcher.
///
/// This is the degenerate case of the registry design; anything that needs
/// a matcher or cross-option decoding implements [`OptionDescriptor`]
/// directly.
#[derive(Debug, Clone)]
pub struct TypedOption {
    code: u8,
    kind: ValueKind,
    priority: i32,
}

impl TypedOption {
    pub fn new(code: u8, kind: ValueKind) -> Self {
        Self {
            code,
            kind,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl OptionDescriptor for TypedOption {
    fn code(&self) -> u8 {
        self.code
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn decode(&self, raw: &[u8], options: &mut Options) -> Result<(), DecodeError> {
        let bad_length = || DecodeError::BadOptionLength {
            code: self.code,
            len: raw.len(),
        };
        let value = match self.kind {
            ValueKind::Ipv4 => {
                let octets: [u8; 4] = raw.try_into().map_err(|_| bad_length())?;
                OptionValue::Ipv4(Ipv4Addr::from(octets))
            }
            ValueKind::Ipv4List => {
                if raw.len() % 4 != 0 {
                    return Err(bad_length());
                }
                OptionValue::Ipv4List(
                    raw.chunks_exact(4)
                        .map(|chunk| {
                            Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3])
                        })
                        .collect(),
                )
            }
            ValueKind::U8 => {
                let octets: [u8; 1] = raw.try_into().map_err(|_| bad_length())?;
                OptionValue::U8(octets[0])
            }
            ValueKind::U16 => {
                let octets: [u8; 2] = raw.try_into().map_err(|_| bad_length())?;
                OptionValue::U16(u16::from_be_bytes(octets))
            }
            ValueKind::U32 => {
                let octets: [u8; 4] = raw.try_into().map_err(|_| bad_length())?;
                OptionValue::U32(u32::from_be_bytes(octets))
            }
            ValueKind::Str => {
                // Option text is 7-bit on the wire.
                OptionValue::Str(raw.iter().map(|byte| (byte & 0x7f) as char).collect())
            }
            ValueKind::Bytes => OptionValue::Bytes(raw.to_vec()),
        };
        options.insert(self.code, value)?;
        Ok(())
    }

    fn encode(&self, buffer: &mut BytesMut, value: &OptionValue) -> Result<(), EncodeError> {
        let mismatch = || EncodeError::ValueKindMismatch {
            code: self.code,
            expected: self.kind.name(),
        };
        let payload: Vec<u8> = match (self.kind, value) {
            (ValueKind::Ipv4, OptionValue::Ipv4(addr)) => addr.octets().to_vec(),
            (ValueKind::Ipv4List, OptionValue::Ipv4List(addrs)) => addrs
                .iter()
                .flat_map(|addr| addr.octets())
                .collect(),
            (ValueKind::U8, OptionValue::U8(v)) => vec![*v],
            (ValueKind::U16, OptionValue::U16(v)) => v.to_be_bytes().to_vec(),
            (ValueKind::U32, OptionValue::U32(v)) => v.to_be_bytes().to_vec(),
            (ValueKind::Str, OptionValue::Str(s)) => s.as_bytes().to_vec(),
            (ValueKind::Bytes, OptionValue::Bytes(b)) => b.clone(),
            _ => return Err(mismatch()),
        };
        if payload.len() > usize::from(u8::MAX) {
            return Err(EncodeError::ValueTooLong {
                code: self.code,
                len: payload.len(),
            });
        }
        buffer.put_u8(self.code);
        buffer.put_u8(payload.len() as u8);
        buffer.put_slice(&payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_keep_insertion_order() {
        let mut options = Options::new();
        options.insert(53, OptionValue::U8(1)).unwrap();
        options.insert(12, OptionValue::Str("host".into())).unwrap();
        options.insert(51, OptionValue::U32(86_400)).unwrap();

        let codes: Vec<u8> = options.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec![53, 12, 51]);
    }

    #[test]
    fn replacing_a_value_keeps_its_position() {
        let mut options = Options::new();
        options.insert(53, OptionValue::U8(1)).unwrap();
        options.insert(12, OptionValue::Str("host".into())).unwrap();
        options.insert(53, OptionValue::U8(3)).unwrap();

        let codes: Vec<u8> = options.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec![53, 12]);
        assert_eq!(options.get(53), Some(&OptionValue::U8(3)));
    }

    #[test]
    fn the_terminator_code_is_refused() {
        let mut options = Options::new();
        assert!(options.insert(255, OptionValue::U8(0)).is_err());
        assert!(options.insert(254, OptionValue::U8(0)).is_ok());
    }

    #[test]
    fn equality_ignores_order() {
        let mut a = Options::new();
        a.insert(53, OptionValue::U8(1)).unwrap();
        a.insert(51, OptionValue::U32(7_200)).unwrap();

        let mut b = Options::new();
        b.insert(51, OptionValue::U32(7_200)).unwrap();
        b.insert(53, OptionValue::U8(1)).unwrap();

        assert_eq!(a, b);

        b.insert(53, OptionValue::U8(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn typed_option_round_trips_each_kind() {
        let cases = [
            (
                TypedOption::new(54, ValueKind::Ipv4),
                OptionValue::Ipv4(Ipv4Addr::new(192, 168, 1, 1)),
            ),
            (
                TypedOption::new(6, ValueKind::Ipv4List),
                OptionValue::Ipv4List(vec![
                    Ipv4Addr::new(8, 8, 8, 8),
                    Ipv4Addr::new(8, 8, 4, 4),
                ]),
            ),
            (TypedOption::new(53, ValueKind::U8), OptionValue::U8(5)),
            (TypedOption::new(26, ValueKind::U16), OptionValue::U16(1500)),
            (
                TypedOption::new(51, ValueKind::U32),
                OptionValue::U32(86_400),
            ),
            (
                TypedOption::new(12, ValueKind::Str),
                OptionValue::Str("bootserver".into()),
            ),
            (
                TypedOption::new(61, ValueKind::Bytes),
                OptionValue::Bytes(vec![1, 0xaa, 0xbb]),
            ),
        ];

        for (descriptor, value) in cases {
            let mut buffer = BytesMut::new();
            descriptor.encode(&mut buffer, &value).unwrap();
            assert_eq!(buffer[0], descriptor.code());
            assert_eq!(usize::from(buffer[1]), buffer.len() - 2);

            let mut options = Options::new();
            descriptor.decode(&buffer[2..], &mut options).unwrap();
            assert_eq!(options.get(descriptor.code()), Some(&value));
        }
    }

    #[test]
    fn typed_option_rejects_bad_lengths() {
        let descriptor = TypedOption::new(51, ValueKind::U32);
        let mut options = Options::new();
        assert!(descriptor.decode(&[0, 1], &mut options).is_err());
        assert!(options.is_empty());
    }

    #[test]
    fn typed_option_rejects_mismatched_values() {
        let descriptor = TypedOption::new(51, ValueKind::U32);
        let mut buffer = BytesMut::new();
        let result = descriptor.encode(&mut buffer, &OptionValue::Str("nope".into()));
        assert!(result.is_err());
    }
}
