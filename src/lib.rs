//! OLSR wire format - encoder/decoder for RFC 3626 control messages
//!
//! This library encodes and decodes the packets exchanged by OLSR routers:
//! the packet header, the common message header and the HELLO, TC, MID and
//! HNA message bodies. Messages of any other type are carried opaquely so
//! they can still be relayed.
//!
//! # Quick Start
//!
//! ```rust
//! use std::net::Ipv4Addr;
//! use std::time::Duration;
//! use olsr_wire::{Message, Mid, Packet};
//!
//! let mid = Mid::new(vec![Ipv4Addr::new(10, 0, 1, 1)]);
//! let mut packet = Packet::new(1);
//! packet.push(
//!     Message::new(mid)
//!         .with_originator(Ipv4Addr::new(10, 0, 0, 1))
//!         .with_validity(Duration::from_secs(15)),
//! );
//!
//! let mut bytes = packet.encode();
//! let decoded = Packet::decode(&mut bytes)?;
//! assert_eq!(decoded, packet);
//! # Ok::<(), olsr_wire::Error>(())
//! ```
//!
//! # Features
//!
//! - **Size-driven decoding** - repeated entries recovered from length fields
//! - **Compact time** - 8-bit exponent/mantissa durations
//! - **Forward compatible** - unknown message types pass through untouched

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;

pub use protocol::{
    Association, Codec, Error, Hello, Hna, LinkCode, LinkMessage, LinkType, MESSAGE_HEADER_SIZE,
    Message, MessageBody, MessageType, Mid, NeighborType, OLSR_PORT, OpaqueBody,
    PACKET_HEADER_SIZE, Packet, Result, Tc, Willingness, compact_time,
};
