//! OLSR message envelope

use std::net::Ipv4Addr;
use std::time::Duration;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use super::wire::{WireRead, WireWrite, size_field};
use super::{
    Codec, Error, Hello, Hna, MESSAGE_HEADER_SIZE, MessageBody, MessageType, Mid, Result, Tc,
    compact_time,
};

/// OLSR message: common header plus a type-specific body
///
/// # Wire Format
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Message Type |     Vtime     |         Message Size          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      Originator Address                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Time To Live |   Hop Count   |    Message Sequence Number    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Body (size - 12)                      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The type byte and size are derived from the body. Validity travels in
/// compact form, so only durations on the compact grid survive a round trip
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    validity: Duration,
    originator: Ipv4Addr,
    time_to_live: u8,
    hop_count: u8,
    sequence_number: u16,
    body: MessageBody,
}

impl Message {
    /// Validity used by [`Message::new`]; sits on the compact grid
    pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(6);

    /// Create a message with TTL 255, hop count 0 and [`Self::DEFAULT_VALIDITY`]
    pub fn new(body: impl Into<MessageBody>) -> Self {
        Self {
            validity: Self::DEFAULT_VALIDITY,
            originator: Ipv4Addr::UNSPECIFIED,
            time_to_live: u8::MAX,
            hop_count: 0,
            sequence_number: 0,
            body: body.into(),
        }
    }

    /// Set validity time
    #[must_use]
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    /// Set originator address
    #[must_use]
    pub fn with_originator(mut self, originator: Ipv4Addr) -> Self {
        self.originator = originator;
        self
    }

    /// Set time to live
    #[must_use]
    pub fn with_time_to_live(mut self, time_to_live: u8) -> Self {
        self.time_to_live = time_to_live;
        self
    }

    /// Set hop count
    #[must_use]
    pub fn with_hop_count(mut self, hop_count: u8) -> Self {
        self.hop_count = hop_count;
        self
    }

    /// Set message sequence number
    #[must_use]
    pub fn with_sequence_number(mut self, sequence_number: u16) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    /// Get message type, `None` for opaque bodies
    #[must_use]
    pub fn message_type(&self) -> Option<MessageType> {
        self.body.message_type()
    }

    /// Get message type byte
    #[must_use]
    pub fn type_byte(&self) -> u8 {
        self.body.type_byte()
    }

    /// Get validity time
    #[must_use]
    pub const fn validity(&self) -> Duration {
        self.validity
    }

    /// Get originator address
    #[must_use]
    pub const fn originator(&self) -> Ipv4Addr {
        self.originator
    }

    /// Get time to live
    #[must_use]
    pub const fn time_to_live(&self) -> u8 {
        self.time_to_live
    }

    /// Get hop count
    #[must_use]
    pub const fn hop_count(&self) -> u8 {
        self.hop_count
    }

    /// Get message sequence number
    #[must_use]
    pub const fn sequence_number(&self) -> u16 {
        self.sequence_number
    }

    /// Encoded length including the 12-byte header
    #[must_use]
    pub fn size(&self) -> u16 {
        size_field(MESSAGE_HEADER_SIZE + usize::from(self.body.serialized_size()))
    }

    /// Get body
    #[must_use]
    pub const fn body(&self) -> &MessageBody {
        &self.body
    }

    /// Get mutable body
    pub fn body_mut(&mut self) -> &mut MessageBody {
        &mut self.body
    }

    /// Consume the message and return its body
    #[must_use]
    pub fn into_body(self) -> MessageBody {
        self.body
    }

    /// HELLO body, if this is a HELLO message
    #[must_use]
    pub fn as_hello(&self) -> Option<&Hello> {
        match &self.body {
            MessageBody::Hello(hello) => Some(hello),
            _ => None,
        }
    }

    /// TC body, if this is a TC message
    #[must_use]
    pub fn as_tc(&self) -> Option<&Tc> {
        match &self.body {
            MessageBody::Tc(tc) => Some(tc),
            _ => None,
        }
    }

    /// MID body, if this is a MID message
    #[must_use]
    pub fn as_mid(&self) -> Option<&Mid> {
        match &self.body {
            MessageBody::Mid(mid) => Some(mid),
            _ => None,
        }
    }

    /// HNA body, if this is an HNA message
    #[must_use]
    pub fn as_hna(&self) -> Option<&Hna> {
        match &self.body {
            MessageBody::Hna(hna) => Some(hna),
            _ => None,
        }
    }

    /// Copy of this message as it should be retransmitted: TTL decremented,
    /// hop count incremented. `None` once the TTL is exhausted.
    #[must_use]
    pub fn forwarded(&self) -> Option<Self> {
        if self.time_to_live <= 1 {
            return None;
        }
        let mut next = self.clone();
        next.time_to_live -= 1;
        next.hop_count = next.hop_count.saturating_add(1);
        Some(next)
    }

    /// Append the encoded message to `out`
    pub fn encode_into<B: BufMut>(&self, out: &mut B) {
        // Body first, so the size field comes from what was actually written
        let mut body = BytesMut::with_capacity(usize::from(self.body.serialized_size()));
        self.body.encode(&mut body);

        out.put_u8(self.body.type_byte());
        out.put_u8(compact_time::encode_duration(self.validity));
        out.put_u16(size_field(MESSAGE_HEADER_SIZE + body.len()));
        out.put_addr(self.originator);
        out.put_u8(self.time_to_live);
        out.put_u8(self.hop_count);
        out.put_u16(self.sequence_number);
        out.put_slice(&body);
    }

    /// Encode message to bytes
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(usize::from(self.size()));
        self.encode_into(&mut out);
        out.freeze()
    }

    /// Decode one message from the front of `buf` with the default codec
    pub fn decode<B: Buf>(buf: &mut B) -> Result<Self> {
        Codec::default().decode_message(buf)
    }

    /// The cursor always advances by the declared message size, whatever the
    /// body decoder makes of those bytes.
    pub(crate) fn decode_with<B: Buf>(buf: &mut B, codec: &Codec) -> Result<Self> {
        buf.ensure(MESSAGE_HEADER_SIZE)?;
        let type_byte = buf.get_u8();
        let validity = compact_time::decode_duration(buf.get_u8());
        let size = usize::from(buf.get_u16());
        let originator = buf.read_addr()?;
        let time_to_live = buf.get_u8();
        let hop_count = buf.get_u8();
        let sequence_number = buf.get_u16();

        if size < MESSAGE_HEADER_SIZE {
            return Err(Error::MalformedLength {
                field: "message",
                declared: size,
                reason: "shorter than the message header",
            });
        }

        let body = buf.read_bytes(size - MESSAGE_HEADER_SIZE)?;
        trace!(type_byte, size, %originator, sequence_number, "decoding message");
        let body = MessageBody::decode(type_byte, body, codec)?;
        if matches!(body, MessageBody::Unknown(_)) {
            debug!(type_byte, size, %originator, "passing through message of unknown type");
        }

        Ok(Self {
            validity,
            originator,
            time_to_live,
            hop_count,
            sequence_number,
            body,
        })
    }
}
