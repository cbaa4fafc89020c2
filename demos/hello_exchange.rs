//! Build a HELLO packet, put it on the wire and read it back

use std::net::Ipv4Addr;
use std::time::Duration;

use olsr_wire::{Hello, LinkCode, LinkMessage, LinkType, Message, NeighborType, Packet, Willingness};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("OLSR HELLO Exchange");
    println!("===================\n");

    let hello = Hello::new(
        Duration::from_secs(2),
        Willingness::HIGH,
        vec![
            LinkMessage::new(
                LinkCode::new(LinkType::Symmetric, NeighborType::Mpr),
                vec![Ipv4Addr::new(10, 0, 0, 2)],
            ),
            LinkMessage::new(
                LinkCode::new(LinkType::Asymmetric, NeighborType::NotNeighbor),
                vec![Ipv4Addr::new(10, 0, 0, 3), Ipv4Addr::new(10, 0, 0, 4)],
            ),
        ],
    );
    let message = Message::new(hello)
        .with_originator(Ipv4Addr::new(10, 0, 0, 1))
        .with_validity(Duration::from_secs(6))
        .with_time_to_live(1);
    let packet = Packet::with_messages(1, vec![message]);

    let mut wire = packet.encode();
    println!("Encoded to {} bytes: {:02x?}", wire.len(), &wire[..]);

    let decoded = Packet::decode(&mut wire)?;
    for message in decoded.messages() {
        let Some(hello) = message.as_hello() else {
            continue;
        };
        println!(
            "HELLO from {} (willingness {}, interval {:?})",
            message.originator(),
            hello.willingness,
            hello.hello_interval
        );
        for link in &hello.link_messages {
            println!(
                "  {:?}/{:?}: {:?}",
                link.link_code.link_type(),
                link.link_code.neighbor_type(),
                link.neighbor_interface_addresses
            );
        }
    }

    Ok(())
}
