//! OLSR packet envelope

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use super::wire::{WireRead, size_field};
use super::{Codec, Error, Message, PACKET_HEADER_SIZE, Result};

/// OLSR packet: length and sequence number followed by messages
///
/// ```text
/// +-------------------------------+-------------------------------+
/// |         Packet Length         |    Packet Sequence Number     |
/// +-------------------------------+-------------------------------+
/// |                     Message (repeated)                        |
/// +---------------------------------------------------------------+
/// ```
///
/// There is no message count on the wire: messages are read until the
/// declared packet length is used up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    sequence_number: u16,
    messages: Vec<Message>,
}

impl Packet {
    /// Create an empty packet
    #[must_use]
    pub fn new(sequence_number: u16) -> Self {
        Self {
            sequence_number,
            messages: Vec::new(),
        }
    }

    /// Create a packet carrying `messages`
    #[must_use]
    pub fn with_messages(sequence_number: u16, messages: Vec<Message>) -> Self {
        Self {
            sequence_number,
            messages,
        }
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Get packet sequence number
    #[must_use]
    pub const fn sequence_number(&self) -> u16 {
        self.sequence_number
    }

    /// Encoded length including the 4-byte packet header
    #[must_use]
    pub fn length(&self) -> u16 {
        let messages: usize = self.messages.iter().map(|m| usize::from(m.size())).sum();
        size_field(PACKET_HEADER_SIZE + messages)
    }

    /// Messages in wire order
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consume the packet and return its messages
    #[must_use]
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Append the encoded packet to `out`
    pub fn encode_into<B: BufMut>(&self, out: &mut B) {
        let mut messages = BytesMut::with_capacity(usize::from(self.length()));
        for message in &self.messages {
            message.encode_into(&mut messages);
        }

        out.put_u16(size_field(PACKET_HEADER_SIZE + messages.len()));
        out.put_u16(self.sequence_number);
        out.put_slice(&messages);
    }

    /// Encode packet to bytes
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(usize::from(self.length()));
        self.encode_into(&mut out);
        out.freeze()
    }

    /// Decode one packet from the front of `buf` with the default codec
    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self> {
        Codec::default().decode_packet(buf)
    }

    pub(crate) fn decode_with<B: Buf>(buf: &mut B, codec: &Codec) -> Result<Self> {
        buf.ensure(PACKET_HEADER_SIZE)?;
        let length = usize::from(buf.get_u16());
        let sequence_number = buf.get_u16();

        if length < PACKET_HEADER_SIZE {
            return Err(Error::MalformedLength {
                field: "packet",
                declared: length,
                reason: "shorter than the packet header",
            });
        }
        if length > codec.max_packet_len() {
            return Err(Error::MalformedLength {
                field: "packet",
                declared: length,
                reason: "exceeds the configured maximum",
            });
        }

        let mut payload = buf.read_bytes(length - PACKET_HEADER_SIZE)?;
        let mut messages = Vec::new();
        while payload.has_remaining() {
            messages.push(Message::decode_with(&mut payload, codec)?);
        }
        trace!(length, sequence_number, messages = messages.len(), "decoded packet");

        Ok(Self {
            sequence_number,
            messages,
        })
    }
}
