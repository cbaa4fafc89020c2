//! OLSR packet codec (encode/decode)
//!
//! Encoding is a pure function of the in-memory packet. Decoding is driven
//! entirely by the size fields on the wire and can be tuned through
//! [`Codec`].

use bytes::{Buf, Bytes};
use tracing::debug;

use super::{Error, MAX_MESSAGE_SIZE, Message, Packet, Result};

/// Decoding options
///
/// The default codec follows the protocol: reserved fields are ignored and
/// any packet length the 16-bit field can express is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    /// Reject non-zero reserved fields
    strict_reserved: bool,
    /// Largest packet length accepted
    max_packet_len: usize,
}

impl Codec {
    /// Create a codec with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict_reserved: false,
            max_packet_len: MAX_MESSAGE_SIZE,
        }
    }

    /// Create a codec that rejects non-zero reserved fields
    #[must_use]
    pub const fn strict() -> Self {
        Self::new().with_strict_reserved(true)
    }

    /// Enable or disable reserved field checking
    #[must_use]
    pub const fn with_strict_reserved(mut self, strict: bool) -> Self {
        self.strict_reserved = strict;
        self
    }

    /// Cap the accepted packet length
    #[must_use]
    pub const fn with_max_packet_len(mut self, max_packet_len: usize) -> Self {
        self.max_packet_len = max_packet_len;
        self
    }

    /// Whether reserved fields are checked
    #[must_use]
    pub const fn strict_reserved(&self) -> bool {
        self.strict_reserved
    }

    /// Largest packet length accepted
    #[must_use]
    pub const fn max_packet_len(&self) -> usize {
        self.max_packet_len
    }

    /// Decode one packet from the front of `buf`
    pub fn decode_packet<B: Buf>(&self, buf: &mut B) -> Result<Packet> {
        Packet::decode_with(buf, self).inspect_err(|err| {
            debug!(error = %err, "failed to decode packet");
        })
    }

    /// Decode one message from the front of `buf`
    pub fn decode_message<B: Buf>(&self, buf: &mut B) -> Result<Message> {
        Message::decode_with(buf, self).inspect_err(|err| {
            debug!(error = %err, "failed to decode message");
        })
    }

    pub(crate) fn check_reserved(&self, field: &'static str, value: u64) -> Result<()> {
        if self.strict_reserved && value != 0 {
            return Err(Error::ReservedFieldNonZero { field, value });
        }
        Ok(())
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a packet to bytes
///
/// # Format
///
/// ```text
/// [PACKET HEADER (4 bytes)] [MESSAGE (12-byte header + body)]*
/// ```
#[must_use]
pub fn encode(packet: &Packet) -> Bytes {
    packet.encode()
}

/// Decode a packet from the front of `buf` with the default codec
///
/// # Errors
///
/// Returns an error if:
/// - The buffer ends before the declared packet or message length
/// - A size field is smaller than its header or inconsistent with the body
pub fn decode<B: Buf>(buf: &mut B) -> Result<Packet> {
    Codec::default().decode_packet(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Mid, Tc};
    use bytes::{BufMut, BytesMut};
    use std::net::Ipv4Addr;
    use std::time::Duration;

    fn packet_with_reserved(value: u16) -> Bytes {
        let packet = Packet::with_messages(
            5,
            vec![
                Message::new(Tc::new(3, vec![Ipv4Addr::new(10, 0, 0, 2)]))
                    .with_validity(Duration::from_secs(15)),
            ],
        );
        let mut raw = BytesMut::from(&encode(&packet)[..]);
        // TC reserved field sits after packet header, message header and ANSN
        raw[4 + 12 + 2..4 + 12 + 4].copy_from_slice(&value.to_be_bytes());
        raw.freeze()
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = Packet::with_messages(
            77,
            vec![Message::new(Mid::new(vec![Ipv4Addr::new(10, 0, 0, 9)]))
                .with_validity(Duration::from_secs(30))],
        );
        let mut bytes = encode(&original);
        let decoded = decode(&mut bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_default_ignores_reserved() {
        let mut bytes = packet_with_reserved(0xBEEF);
        let packet = decode(&mut bytes).unwrap();
        assert_eq!(packet.messages()[0].as_tc().map(|tc| tc.ansn), Some(3));
    }

    #[test]
    fn test_strict_rejects_reserved() {
        let mut bytes = packet_with_reserved(0xBEEF);
        assert_eq!(
            Codec::strict().decode_packet(&mut bytes),
            Err(Error::ReservedFieldNonZero {
                field: "TC reserved",
                value: 0xBEEF
            })
        );

        let mut clean = packet_with_reserved(0);
        assert!(Codec::strict().decode_packet(&mut clean).is_ok());
    }

    #[test]
    fn test_max_packet_len() {
        let mut bytes = packet_with_reserved(0);
        let codec = Codec::new().with_max_packet_len(16);
        assert!(matches!(
            codec.decode_packet(&mut bytes),
            Err(Error::MalformedLength {
                field: "packet",
                declared: 24,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_message_with_codec() {
        let mut raw = BytesMut::new();
        Message::new(Mid::default()).encode_into(&mut raw);
        raw.put_u8(0);
        let mut bytes = raw.freeze();
        let message = Codec::new().decode_message(&mut bytes).unwrap();
        assert_eq!(message.size(), 12);
        assert_eq!(bytes.remaining(), 1);
    }
}
