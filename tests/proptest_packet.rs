use proptest::prelude::*;

use bootwire::{Packet, PacketCodec};

const MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];
const FIXED_HEADER_SIZE: usize = 240;

fn valid_header() -> Vec<u8> {
    let mut data = vec![0u8; FIXED_HEADER_SIZE];
    data[0] = 1;
    data[1] = 1;
    data[2] = 6;
    data[236..240].copy_from_slice(&MAGIC_COOKIE);
    data
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    #[test]
    fn decode_never_panics_on_arbitrary_bytes(data: Vec<u8>) {
        let codec = PacketCodec::new();
        let _ = codec.decode(&data);
    }

    #[test]
    fn decode_never_panics_on_valid_header_with_random_options(
        options_data in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        let codec = PacketCodec::new();
        let mut data = valid_header();
        data.extend_from_slice(&options_data);
        let _ = codec.decode(&data);
    }

    #[test]
    fn decode_never_panics_on_oversized_hlen(
        hlen in any::<u8>(),
        extra in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        let codec = PacketCodec::new();
        let mut data = valid_header();
        data[2] = hlen;
        data.extend_from_slice(&extra);
        let _ = codec.decode(&data);
    }

    #[test]
    fn scalar_fields_round_trip(
        op: u8,
        htype: u8,
        hops: u8,
        xid: u32,
        secs: u16,
        flags: u16,
    ) {
        let mut packet = Packet::new();
        packet
            .set_op(u64::from(op)).unwrap()
            .set_htype(u64::from(htype)).unwrap()
            .set_hlen(6).unwrap()
            .set_hops(u64::from(hops)).unwrap()
            .set_xid(u64::from(xid)).unwrap()
            .set_secs(u64::from(secs)).unwrap()
            .set_flags(u64::from(flags)).unwrap();
        packet.set_chaddr("aa:bb:cc:dd:ee:ff");

        let codec = PacketCodec::new();
        let wire = codec.encode(&packet).unwrap();
        let decoded = codec.decode(&wire).unwrap();

        prop_assert_eq!(decoded.op(), Some(op));
        prop_assert_eq!(decoded.htype(), Some(htype));
        prop_assert_eq!(decoded.hops(), Some(hops));
        prop_assert_eq!(decoded.xid(), Some(xid));
        prop_assert_eq!(decoded.secs(), Some(secs));
        prop_assert_eq!(decoded.flags(), Some(flags));
        prop_assert_eq!(decoded.chaddr(), Some("aa:bb:cc:dd:ee:ff"));
    }

    #[test]
    fn hardware_addresses_round_trip(bytes in prop::collection::vec(any::<u8>(), 1..=16)) {
        let mut packet = Packet::new();
        packet
            .set_op(1).unwrap()
            .set_htype(1).unwrap()
            .set_hlen(bytes.len() as u64).unwrap()
            .set_hops(0).unwrap()
            .set_xid(1).unwrap()
            .set_secs(0).unwrap()
            .set_flags(0).unwrap();

        let chaddr: Vec<String> = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
        packet.set_chaddr(&chaddr.join(":"));

        let codec = PacketCodec::new();
        let wire = codec.encode(&packet).unwrap();
        let decoded = codec.decode(&wire).unwrap();

        prop_assert_eq!(decoded.chaddr(), packet.chaddr());
    }
}
