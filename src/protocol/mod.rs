//! OLSR protocol core implementation
//!
//! This module provides the wire format, message types, and codec for OLSR
//! control traffic.

mod body;
mod codec;
pub mod compact_time;
mod error;
mod message;
mod packet;
mod types;
mod wire;

pub use body::{Association, Hello, Hna, LinkMessage, MessageBody, Mid, OpaqueBody, Tc};
pub use codec::{Codec, decode, encode};
pub use error::{Error, Result};
pub use message::Message;
pub use packet::Packet;
pub use types::{LinkCode, LinkType, MessageType, NeighborType, Willingness};

/// UDP port assigned to OLSR
pub const OLSR_PORT: u16 = 698;

/// Packet header size in bytes
pub const PACKET_HEADER_SIZE: usize = 4;

/// Message header size in bytes
pub const MESSAGE_HEADER_SIZE: usize = 12;

/// HELLO link message header size in bytes
pub const LINK_MESSAGE_HEADER_SIZE: usize = 4;

/// Largest packet or message the 16-bit size fields can describe
pub const MAX_MESSAGE_SIZE: usize = u16::MAX as usize;
