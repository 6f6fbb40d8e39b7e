//! # Bootwire - A BOOTP/DHCP Packet Codec
//!
//! Bootwire converts raw BOOTP/DHCP datagrams into structured,
//! field-validated [`Packet`]s and back. The option region is interpreted
//! through a pluggable, priority-ordered [`OptionRegistry`]: each
//! registered descriptor gets its own decode pass over the TLVs, sharing
//! one accumulator, so an option whose meaning depends on another option
//! can be decoded after its dependency.
//!
//! ## Features
//!
//! - Fixed-header parsing with per-field validation at assignment
//! - Priority-ordered, matcher-gated option decoding
//! - A stock RFC 2132 option table, extensible with custom descriptors
//! - A per-datagram stream adapter with one-packet backpressure
//!
//! ## Example
//!
//! ```rust
//! use bootwire::{OptionValue, Packet, PacketCodec};
//! use bootwire::options::standard;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut packet = Packet::new();
//!     packet
//!         .set_op(1)?
//!         .set_htype(1)?
//!         .set_hlen(6)?
//!         .set_hops(0)?
//!         .set_xid(0x1234_5678)?
//!         .set_secs(0)?
//!         .set_flags(0x8000)?;
//!     packet.set_chaddr("00:0c:29:a8:92:f4");
//!     packet
//!         .options_mut()
//!         .insert(standard::MESSAGE_TYPE, OptionValue::U8(1))?;
//!
//!     let codec = PacketCodec::new();
//!     let wire = codec.encode(&packet)?;
//!     let decoded = codec.decode(&wire)?;
//!     assert_eq!(decoded.xid(), Some(0x1234_5678));
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod network;
pub mod options;
pub mod packet;
pub mod stream;

pub use codec::{PacketCodec, FIXED_HEADER_SIZE, MAGIC_COOKIE};
pub use error::{BootwireError, DecodeError, EncodeError, ValidationError};
pub use options::{
    standard_registry, OptionDescriptor, OptionRegistry, OptionValue, Options, TypedOption,
    ValueKind, OPTION_END,
};
pub use packet::Packet;
pub use stream::PacketStream;
