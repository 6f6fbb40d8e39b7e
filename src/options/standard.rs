//! The stock option table covering the commonly seen RFC 2132 codes.
//!
//! Every entry here is a plain [`TypedOption`]; anything needing matchers or
//! cross-option decoding registers its own [`OptionDescriptor`](super::OptionDescriptor)
//! on top of this table.

use super::{OptionRegistry, TypedOption, ValueKind};

/// Subnet mask (RFC 2132 §3.3).
pub const SUBNET_MASK: u8 = 1;
/// Router/gateway addresses (RFC 2132 §3.5).
pub const ROUTER: u8 = 3;
/// DNS server addresses (RFC 2132 §3.8).
pub const DOMAIN_NAME_SERVER: u8 = 6;
/// Client host name (RFC 2132 §3.14).
pub const HOST_NAME: u8 = 12;
/// Domain name for DNS resolution (RFC 2132 §3.17).
pub const DOMAIN_NAME: u8 = 15;
/// Interface MTU (RFC 2132 §5.1).
pub const INTERFACE_MTU: u8 = 26;
/// Broadcast address (RFC 2132 §5.3).
pub const BROADCAST_ADDRESS: u8 = 28;
/// Vendor-specific information (RFC 2132 §8.4).
pub const VENDOR_SPECIFIC: u8 = 43;
/// Requested IP address (RFC 2132 §9.1).
pub const REQUESTED_IP_ADDRESS: u8 = 50;
/// Address lease time in seconds (RFC 2132 §9.2).
pub const ADDRESS_LEASE_TIME: u8 = 51;
/// DHCP message type (RFC 2132 §9.6).
pub const MESSAGE_TYPE: u8 = 53;
/// Server identifier (RFC 2132 §9.7).
pub const SERVER_IDENTIFIER: u8 = 54;
/// Parameter request list (RFC 2132 §9.8).
pub const PARAMETER_REQUEST_LIST: u8 = 55;
/// Renewal time T1 (RFC 2132 §9.11).
pub const RENEWAL_TIME: u8 = 58;
/// Rebinding time T2 (RFC 2132 §9.12).
pub const REBINDING_TIME: u8 = 59;
/// Vendor class identifier (RFC 2132 §9.13).
pub const VENDOR_CLASS_IDENTIFIER: u8 = 60;
/// Client identifier (RFC 2132 §9.14).
pub const CLIENT_IDENTIFIER: u8 = 61;

/// Builds the standard registry.
///
/// The message type decodes first; the bulk of the table follows, and
/// vendor-specific information runs last so a descriptor layered on top of
/// it can consult the vendor class the earlier pass produced.
pub fn standard_registry() -> OptionRegistry {
    let mut registry = OptionRegistry::new();
    registry.register(Box::new(TypedOption::new(MESSAGE_TYPE, ValueKind::U8)));

    for descriptor in [
        TypedOption::new(SUBNET_MASK, ValueKind::Ipv4),
        TypedOption::new(ROUTER, ValueKind::Ipv4List),
        TypedOption::new(DOMAIN_NAME_SERVER, ValueKind::Ipv4List),
        TypedOption::new(HOST_NAME, ValueKind::Str),
        TypedOption::new(DOMAIN_NAME, ValueKind::Str),
        TypedOption::new(INTERFACE_MTU, ValueKind::U16),
        TypedOption::new(BROADCAST_ADDRESS, ValueKind::Ipv4),
        TypedOption::new(REQUESTED_IP_ADDRESS, ValueKind::Ipv4),
        TypedOption::new(ADDRESS_LEASE_TIME, ValueKind::U32),
        TypedOption::new(SERVER_IDENTIFIER, ValueKind::Ipv4),
        TypedOption::new(PARAMETER_REQUEST_LIST, ValueKind::Bytes),
        TypedOption::new(RENEWAL_TIME, ValueKind::U32),
        TypedOption::new(REBINDING_TIME, ValueKind::U32),
        TypedOption::new(VENDOR_CLASS_IDENTIFIER, ValueKind::Str),
        TypedOption::new(CLIENT_IDENTIFIER, ValueKind::Bytes),
    ] {
        registry.register(Box::new(descriptor.with_priority(10)));
    }

    registry.register(Box::new(
        TypedOption::new(VENDOR_SPECIFIC, ValueKind::Bytes).with_priority(20),
    ));

    registry
}
