use std::net::Ipv4Addr;
use std::time::Duration;

use bytes::Buf;
use olsr_wire::{
    Association, Hello, Hna, LinkCode, LinkMessage, MESSAGE_HEADER_SIZE, Message,
    MessageType, Mid, OpaqueBody, PACKET_HEADER_SIZE, Packet, Tc, Willingness, compact_time,
};

fn addr(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

fn roundtrip_message(message: &Message) -> Message {
    let mut bytes = message.encode();
    let decoded = Message::decode(&mut bytes).unwrap();
    assert_eq!(bytes.remaining(), 0, "all bytes of the message should be read");
    decoded
}

#[test]
fn compact_time_whole_seconds() {
    for time in 1..=30 {
        let seconds = compact_time::decode(compact_time::encode(f64::from(time)));
        assert!(seconds >= 0.0);
        assert!((seconds - f64::from(time)).abs() <= 0.1, "{time}s -> {seconds}s");
    }
}

#[test]
fn mid_messages_share_one_packet() {
    let msg1 = Message::new(Mid::new(vec![addr("1.2.3.4"), addr("1.2.3.5")]))
        .with_time_to_live(255)
        .with_originator(addr("11.22.33.44"))
        .with_validity(Duration::from_secs(9))
        .with_sequence_number(7);
    let msg2 = Message::new(Mid::new(vec![addr("2.2.3.4"), addr("2.2.3.5")]))
        .with_time_to_live(254)
        .with_originator(addr("12.22.33.44"))
        .with_validity(Duration::from_secs(10))
        .with_sequence_number(7);
    let packet = Packet::with_messages(123, vec![msg1, msg2]);

    let mut bytes = packet.encode();
    let decoded = Packet::decode(&mut bytes).unwrap();
    assert_eq!(bytes.remaining(), 0);
    assert_eq!(decoded.sequence_number(), 123);

    let mut size_left = usize::from(decoded.length()) - PACKET_HEADER_SIZE;
    let first = &decoded.messages()[0];
    assert_eq!(first.time_to_live(), 255);
    assert_eq!(first.originator(), addr("11.22.33.44"));
    assert_eq!(first.validity(), Duration::from_secs(9));
    assert_eq!(first.message_type(), Some(MessageType::Mid));
    assert_eq!(first.sequence_number(), 7);
    let mid1 = first.as_mid().unwrap();
    assert_eq!(mid1.interface_addresses.len(), 2);
    assert_eq!(mid1.interface_addresses[0], addr("1.2.3.4"));
    size_left -= usize::from(first.size());
    assert!(size_left > 0);

    let second = &decoded.messages()[1];
    assert_eq!(second.time_to_live(), 254);
    assert_eq!(second.originator(), addr("12.22.33.44"));
    assert_eq!(second.validity(), Duration::from_secs(10));
    assert_eq!(second.message_type(), Some(MessageType::Mid));
    assert_eq!(second.sequence_number(), 7);
    let mid2 = second.as_mid().unwrap();
    assert_eq!(mid2.interface_addresses.len(), 2);
    assert_eq!(mid2.interface_addresses[0], addr("2.2.3.4"));
    size_left -= usize::from(second.size());
    assert_eq!(size_left, 0);

    assert_eq!(decoded, packet);
}

#[test]
fn hello_link_messages_keep_order_and_codes() {
    let hello = Hello::new(
        Duration::from_secs(7),
        Willingness::HIGH,
        vec![
            LinkMessage::new(LinkCode::from_u8(2), vec![addr("1.2.3.4"), addr("1.2.3.5")]),
            LinkMessage::new(LinkCode::from_u8(3), vec![addr("2.2.3.4"), addr("2.2.3.5")]),
        ],
    );
    let decoded = roundtrip_message(&Message::new(hello));
    let hello_out = decoded.as_hello().unwrap();

    assert_eq!(hello_out.hello_interval, Duration::from_secs(7));
    assert_eq!(hello_out.willingness, Willingness::HIGH);
    assert_eq!(hello_out.link_messages.len(), 2);

    assert_eq!(hello_out.link_messages[0].link_code.as_u8(), 2);
    assert_eq!(
        hello_out.link_messages[0].neighbor_interface_addresses,
        vec![addr("1.2.3.4"), addr("1.2.3.5")]
    );
    assert_eq!(hello_out.link_messages[1].link_code.as_u8(), 3);
    assert_eq!(
        hello_out.link_messages[1].neighbor_interface_addresses,
        vec![addr("2.2.3.4"), addr("2.2.3.5")]
    );
}

#[test]
fn hello_equal_link_codes_are_not_merged() {
    let hello = Hello::new(
        Duration::from_secs(2),
        Willingness::DEFAULT,
        vec![
            LinkMessage::new(LinkCode::from_u8(6), vec![addr("10.0.0.1")]),
            LinkMessage::new(LinkCode::from_u8(2), vec![addr("10.0.0.2")]),
            LinkMessage::new(LinkCode::from_u8(6), vec![addr("10.0.0.3")]),
        ],
    );
    let decoded = roundtrip_message(&Message::new(hello.clone()));
    assert_eq!(decoded.as_hello(), Some(&hello));
}

#[test]
fn tc_roundtrip() {
    let tc = Tc::new(0x1234, vec![addr("1.2.3.4"), addr("1.2.3.5")]);
    let decoded = roundtrip_message(&Message::new(tc));
    let tc_out = decoded.as_tc().unwrap();

    assert_eq!(tc_out.ansn, 0x1234);
    assert_eq!(tc_out.neighbor_addresses.len(), 2);
    assert_eq!(tc_out.neighbor_addresses[0], addr("1.2.3.4"));
    assert_eq!(tc_out.neighbor_addresses[1], addr("1.2.3.5"));
}

#[test]
fn hna_roundtrip() {
    let hna = Hna::new(vec![
        Association::new(addr("1.2.3.4"), addr("255.255.255.0")),
        Association::new(addr("1.2.3.5"), addr("255.255.0.0")),
    ]);
    let decoded = roundtrip_message(&Message::new(hna));
    let hna_out = decoded.as_hna().unwrap();

    assert_eq!(hna_out.associations.len(), 2);
    assert_eq!(hna_out.associations[0].address, addr("1.2.3.4"));
    assert_eq!(hna_out.associations[0].mask, addr("255.255.255.0"));
    assert_eq!(hna_out.associations[1].address, addr("1.2.3.5"));
    assert_eq!(hna_out.associations[1].mask, addr("255.255.0.0"));
}

#[test]
fn packet_with_every_message_kind() {
    let originator = addr("10.0.0.1");
    let messages = vec![
        Message::new(Hello::new(
            Duration::from_secs(2),
            Willingness::DEFAULT,
            vec![LinkMessage::new(LinkCode::from_u8(6), vec![addr("10.0.0.2")])],
        )),
        Message::new(Tc::new(42, vec![addr("10.0.0.2"), addr("10.0.0.3")])),
        Message::new(Mid::new(vec![addr("10.0.1.1")])),
        Message::new(Hna::new(vec![Association::new(
            addr("192.168.1.0"),
            addr("255.255.255.0"),
        )])),
    ]
    .into_iter()
    .enumerate()
    .map(|(seq, message)| {
        message
            .with_originator(originator)
            .with_validity(Duration::from_secs(6))
            .with_hop_count(1)
            .with_time_to_live(64)
            .with_sequence_number(seq as u16)
    })
    .collect();
    let packet = Packet::with_messages(0xABCD, messages);

    let mut bytes = packet.encode();
    let decoded = Packet::decode(&mut bytes).unwrap();
    assert_eq!(decoded, packet);
    assert!(!bytes.has_remaining());

    let total: usize = decoded.messages().iter().map(|m| usize::from(m.size())).sum();
    assert_eq!(usize::from(decoded.length()), PACKET_HEADER_SIZE + total);
    for message in decoded.messages() {
        assert_eq!(
            usize::from(message.size()),
            MESSAGE_HEADER_SIZE + usize::from(message.body().serialized_size())
        );
    }
}

#[test]
fn unknown_message_is_relayed_with_neighbors_intact() {
    let body = OpaqueBody::new(0xD0, bytes::Bytes::from_static(b"lq-ext")).unwrap();
    let opaque = Message::new(body)
        .with_originator(addr("10.9.9.9"))
        .with_validity(Duration::from_secs(4))
        .with_time_to_live(3);
    let tc = Message::new(Tc::new(1, vec![addr("10.0.0.5")])).with_validity(Duration::from_secs(4));
    let packet = Packet::with_messages(8, vec![opaque.clone(), tc.clone()]);

    let mut bytes = packet.encode();
    let decoded = Packet::decode(&mut bytes).unwrap();
    assert_eq!(decoded.messages(), &[opaque.clone(), tc][..]);

    let relayed = decoded.messages()[0].forwarded().unwrap();
    assert_eq!(relayed.time_to_live(), 2);
    assert_eq!(relayed.hop_count(), 1);
    assert_eq!(relayed.body(), opaque.body());
}

#[test]
fn message_type_bytes_on_the_wire() {
    let packet = Packet::with_messages(
        3,
        vec![
            Message::new(Mid::new(vec![addr("1.2.3.4")])),
            Message::new(Hello::default()),
            Message::new(Tc::default()),
            Message::new(Hna::default()),
        ],
    );
    let bytes = packet.encode();

    // MID (4-byte body), then HELLO (4), TC (4), HNA (0)
    let offsets = [4, 4 + 16, 4 + 32, 4 + 48];
    let types: Vec<u8> = offsets.iter().map(|&at| bytes[at]).collect();
    assert_eq!(types, [1, 2, 3, 4]);
    assert_eq!(bytes.len(), 4 + 16 + 16 + 16 + 12);
}

#[test]
fn opaque_body_cannot_claim_a_known_type() {
    assert!(OpaqueBody::new(MessageType::Hello.as_u8(), &b"x"[..]).is_none());
    let relayed = OpaqueBody::new(0x7F, &b"x"[..]).unwrap();
    assert_eq!(Message::new(relayed).message_type(), None);
}
