//! BOOTP/DHCP wire codec per RFC 951 / RFC 2131.
//!
//! A datagram is a fixed 236-byte header, a 4-byte magic cookie, then
//! variable-length options:
//!
//! ```text
//! offset  length  field
//!      0       1  op
//!      1       1  htype
//!      2       1  hlen
//!      3       1  hops
//!      4       4  xid (big-endian)
//!      8       2  secs (big-endian)
//!     10       2  flags (big-endian)
//!     12       4  ciaddr
//!     16       4  yiaddr
//!     20       4  siaddr
//!     24       4  giaddr
//!     28      16  chaddr (hlen bytes significant)
//!     44      64  sname (ASCII, null-padded)
//!    108     128  file (ASCII, null-padded)
//!    236       4  magic cookie 99.130.83.99
//!    240       *  options: (code, len, value) until code 255
//! ```
//!
//! Decode and encode are stateless pure transforms over an immutable
//! [`OptionRegistry`]; a codec can be shared freely across tasks.

use std::fmt::Write as _;

use bytes::{BufMut as _, Bytes, BytesMut};

use crate::error::{DecodeError, EncodeError};
use crate::options::{OptionRegistry, Options, OPTION_END};
use crate::packet::Packet;

/// Magic cookie marking the start of the options region.
pub const MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

/// Size of the fixed header including the magic cookie.
pub const FIXED_HEADER_SIZE: usize = 240;

const CHADDR_OFFSET: usize = 28;
const CHADDR_FIELD_SIZE: usize = 16;
const SNAME_OFFSET: usize = 44;
const SNAME_SIZE: usize = 64;
const FILE_OFFSET: usize = 108;
const FILE_SIZE: usize = 128;
const MAGIC_COOKIE_OFFSET: usize = 236;
const OPTIONS_OFFSET: usize = 240;

/// Decodes raw datagrams into [`Packet`]s and encodes them back.
pub struct PacketCodec {
    registry: OptionRegistry,
}

impl PacketCodec {
    /// A codec over the standard RFC 2132 option table.
    pub fn new() -> Self {
        Self::with_registry(crate::options::standard_registry())
    }

    /// A codec over a caller-assembled registry.
    ///
    /// Freezes the registry: descriptors are sorted ascending by priority
    /// once, here, and never again.
    pub fn with_registry(mut registry: OptionRegistry) -> Self {
        registry.freeze();
        Self { registry }
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Decodes one datagram.
    ///
    /// The buffer must hold at least the fixed 240-byte header. Options are
    /// interpreted per the registry: one pass per descriptor in priority
    /// order, all passes sharing one accumulator, unregistered codes
    /// silently skipped.
    ///
    /// The cookie bytes at 236..240 are not checked: plain BOOTP datagrams
    /// carry zeros there and still decode (with whatever options follow, if
    /// any).
    pub fn decode(&self, data: &[u8]) -> Result<Packet, DecodeError> {
        if data.len() < FIXED_HEADER_SIZE {
            return Err(DecodeError::TooShort {
                len: data.len(),
                min: FIXED_HEADER_SIZE,
            });
        }

        let mut packet = Packet::new();
        packet.set_op(u64::from(data[0]))?;
        packet.set_htype(u64::from(data[1]))?;
        packet.set_hlen(u64::from(data[2]))?;
        packet.set_hops(u64::from(data[3]))?;
        packet.set_xid(u64::from(u32::from_be_bytes([
            data[4], data[5], data[6], data[7],
        ])))?;
        packet.set_secs(u64::from(u16::from_be_bytes([data[8], data[9]])))?;
        packet.set_flags(u64::from(u16::from_be_bytes([data[10], data[11]])))?;

        packet.set_ciaddr_octets([data[12], data[13], data[14], data[15]]);
        packet.set_yiaddr_octets([data[16], data[17], data[18], data[19]]);
        packet.set_siaddr_octets([data[20], data[21], data[22], data[23]]);
        packet.set_giaddr_octets([data[24], data[25], data[26], data[27]]);

        // hlen bounds the significant chaddr bytes; clamp at the buffer end
        // rather than erroring, as oversized hlen values occur in the wild.
        let hlen = usize::from(data[2]);
        let chaddr_end = (CHADDR_OFFSET + hlen).min(data.len());
        packet.set_chaddr(&format_hardware_addr(&data[CHADDR_OFFSET..chaddr_end]));

        packet.set_sname(&ascii_field(&data[SNAME_OFFSET..SNAME_OFFSET + SNAME_SIZE]))?;
        packet.set_file(&ascii_field(&data[FILE_OFFSET..FILE_OFFSET + FILE_SIZE]))?;

        let raw_options = scan_options(&data[OPTIONS_OFFSET..])?;
        let mut accumulator = Options::new();
        for descriptor in self.registry.descriptors() {
            for (code, raw) in &raw_options {
                if *code == descriptor.code() && descriptor.matches(raw) {
                    descriptor.decode(raw, &mut accumulator)?;
                }
            }
        }
        *packet.options_mut() = accumulator;

        Ok(packet)
    }

    /// Encodes one packet.
    ///
    /// Scalars and `chaddr` must be set; address fields default to
    /// 0.0.0.0 and `sname`/`file` to empty. The returned buffer ends
    /// immediately after the options terminator, with no trailing padding.
    pub fn encode(&self, packet: &Packet) -> Result<Bytes, EncodeError> {
        let mut buffer = BytesMut::zeroed(FIXED_HEADER_SIZE);

        buffer[0] = packet.op().ok_or(EncodeError::FieldUnset("op"))?;
        buffer[1] = packet.htype().ok_or(EncodeError::FieldUnset("htype"))?;
        buffer[2] = packet.hlen().ok_or(EncodeError::FieldUnset("hlen"))?;
        buffer[3] = packet.hops().ok_or(EncodeError::FieldUnset("hops"))?;

        let xid = packet.xid().ok_or(EncodeError::FieldUnset("xid"))?;
        buffer[4..8].copy_from_slice(&xid.to_be_bytes());
        let secs = packet.secs().ok_or(EncodeError::FieldUnset("secs"))?;
        buffer[8..10].copy_from_slice(&secs.to_be_bytes());
        let flags = packet.flags().ok_or(EncodeError::FieldUnset("flags"))?;
        buffer[10..12].copy_from_slice(&flags.to_be_bytes());

        for (offset, addr) in [
            (12, packet.ciaddr()),
            (16, packet.yiaddr()),
            (20, packet.siaddr()),
            (24, packet.giaddr()),
        ] {
            let octets = addr.map_or([0; 4], |addr| addr.octets());
            buffer[offset..offset + 4].copy_from_slice(&octets);
        }

        let chaddr = packet.chaddr().ok_or(EncodeError::FieldUnset("chaddr"))?;
        let hardware = parse_hardware_addr(chaddr)?;
        buffer[CHADDR_OFFSET..CHADDR_OFFSET + hardware.len()].copy_from_slice(&hardware);

        if let Some(sname) = packet.sname() {
            buffer[SNAME_OFFSET..SNAME_OFFSET + sname.len()].copy_from_slice(sname.as_bytes());
        }
        if let Some(file) = packet.file() {
            buffer[FILE_OFFSET..FILE_OFFSET + file.len()].copy_from_slice(file.as_bytes());
        }

        buffer[MAGIC_COOKIE_OFFSET..MAGIC_COOKIE_OFFSET + 4].copy_from_slice(&MAGIC_COOKIE);

        for (code, value) in packet.options().iter() {
            let converter = self
                .registry
                .converter_for(code)
                .ok_or(EncodeError::UnregisteredOption(code))?;
            converter.encode(&mut buffer, value)?;
        }
        buffer.put_u8(OPTION_END);

        Ok(buffer.freeze())
    }
}

impl Default for PacketCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Slices the option region into raw (code, value) pairs, up to the
/// terminator. Truncated or overrunning declarations fail here, before any
/// descriptor runs.
fn scan_options(region: &[u8]) -> Result<Vec<(u8, &[u8])>, DecodeError> {
    let mut raw = Vec::new();
    let mut index = 0;
    while index < region.len() && region[index] != OPTION_END {
        let code = region[index];
        let declared = match region.get(index + 1) {
            Some(&len) => usize::from(len),
            None => return Err(DecodeError::OptionTruncated { code }),
        };
        let start = index + 2;
        let end = start + declared;
        if end > region.len() {
            return Err(DecodeError::OptionOverrun {
                code,
                declared,
                available: region.len() - start,
            });
        }
        raw.push((code, &region[start..end]));
        index = end;
    }
    Ok(raw)
}

/// Renders hardware address bytes as lowercase colon-separated hex.
fn format_hardware_addr(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (index, byte) in bytes.iter().enumerate() {
        if index > 0 {
            out.push(':');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Parses a colon-separated hex hardware address back into bytes.
/// Empty components are skipped so "aa::bb" and trailing colons survive.
fn parse_hardware_addr(chaddr: &str) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::new();
    for component in chaddr.split(':') {
        if component.is_empty() {
            continue;
        }
        let byte = u8::from_str_radix(component, 16)
            .map_err(|_| EncodeError::BadHardwareOctet(component.to_string()))?;
        bytes.push(byte);
    }
    if bytes.len() > CHADDR_FIELD_SIZE {
        return Err(EncodeError::HardwareAddressTooLong(bytes.len()));
    }
    Ok(bytes)
}

/// Null-strips a fixed-width ASCII field, masking each byte to 7 bits.
fn ascii_field(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&byte| byte != 0)
        .map(|&byte| (byte & 0x7f) as char)
        .collect()
}
