//! Message bodies for the four OLSR message types.
//!
//! Each body decodes from a buffer holding exactly the bytes its message
//! header declared, so repeated entries are recovered from lengths alone.

use std::net::Ipv4Addr;
use std::time::Duration;

use bytes::{Buf, BufMut, Bytes};

use super::wire::{WireRead, WireWrite, read_addr_list, size_field};
use super::{
    Codec, Error, LINK_MESSAGE_HEADER_SIZE, LinkCode, MessageType, Result, Willingness,
    compact_time,
};

/// Fixed bytes ahead of the repeated part of HELLO and TC bodies.
const FIXED_PREFIX_SIZE: usize = 4;

fn check_fixed_prefix(body: &Bytes, field: &'static str) -> Result<()> {
    if body.remaining() < FIXED_PREFIX_SIZE {
        return Err(Error::MalformedLength {
            field,
            declared: body.remaining(),
            reason: "shorter than the fixed body fields",
        });
    }
    Ok(())
}

/// MID body: the originator's additional interface addresses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mid {
    /// Interface addresses other than the main address
    pub interface_addresses: Vec<Ipv4Addr>,
}

impl Mid {
    /// Create a MID body
    #[must_use]
    pub fn new(interface_addresses: Vec<Ipv4Addr>) -> Self {
        Self {
            interface_addresses,
        }
    }

    /// Encoded length in bytes
    #[must_use]
    pub fn serialized_size(&self) -> u16 {
        size_field(4 * self.interface_addresses.len())
    }

    /// Write the body
    pub fn encode<B: BufMut>(&self, out: &mut B) {
        for addr in &self.interface_addresses {
            out.put_addr(*addr);
        }
    }

    pub(crate) fn decode(mut body: Bytes) -> Result<Self> {
        let interface_addresses = read_addr_list(&mut body, "MID body")?;
        Ok(Self {
            interface_addresses,
        })
    }
}

/// Neighbor addresses sharing one link code inside a HELLO
///
/// ```text
/// +-------------+-------------+------------------------------+
/// | Link Code   | Reserved    | Link Message Size            |
/// +-------------+-------------+------------------------------+
/// |              Neighbor Interface Address (repeated)       |
/// +----------------------------------------------------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkMessage {
    /// Relationship to the listed neighbors
    pub link_code: LinkCode,
    /// Neighbor interface addresses
    pub neighbor_interface_addresses: Vec<Ipv4Addr>,
}

impl LinkMessage {
    /// Create a link message
    #[must_use]
    pub fn new(link_code: LinkCode, neighbor_interface_addresses: Vec<Ipv4Addr>) -> Self {
        Self {
            link_code,
            neighbor_interface_addresses,
        }
    }

    /// Encoded length including the 4-byte link message header
    #[must_use]
    pub fn serialized_size(&self) -> u16 {
        size_field(LINK_MESSAGE_HEADER_SIZE + 4 * self.neighbor_interface_addresses.len())
    }

    fn encode<B: BufMut>(&self, out: &mut B) {
        out.put_u8(self.link_code.as_u8());
        out.put_u8(0);
        out.put_u16(self.serialized_size());
        for addr in &self.neighbor_interface_addresses {
            out.put_addr(*addr);
        }
    }
}

/// HELLO body: link sensing and neighbor advertisement
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hello {
    /// Emission interval, compact-encoded on the wire
    pub hello_interval: Duration,
    /// Willingness to act as a relay
    pub willingness: Willingness,
    /// Link messages in wire order; equal link codes are never merged
    pub link_messages: Vec<LinkMessage>,
}

impl Hello {
    /// Emission interval used by [`Hello::default`]
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

    /// Create a HELLO body
    #[must_use]
    pub fn new(
        hello_interval: Duration,
        willingness: Willingness,
        link_messages: Vec<LinkMessage>,
    ) -> Self {
        Self {
            hello_interval,
            willingness,
            link_messages,
        }
    }

    /// Encoded length in bytes
    #[must_use]
    pub fn serialized_size(&self) -> u16 {
        let links: usize = self
            .link_messages
            .iter()
            .map(|lm| usize::from(lm.serialized_size()))
            .sum();
        size_field(FIXED_PREFIX_SIZE + links)
    }

    /// Write the body
    pub fn encode<B: BufMut>(&self, out: &mut B) {
        out.put_u16(0);
        out.put_u8(compact_time::encode_duration(self.hello_interval));
        out.put_u8(self.willingness.as_u8());
        for link_message in &self.link_messages {
            link_message.encode(out);
        }
    }

    pub(crate) fn decode(mut body: Bytes, codec: &Codec) -> Result<Self> {
        check_fixed_prefix(&body, "HELLO body")?;
        codec.check_reserved("HELLO reserved", body.read_u16()?.into())?;
        let hello_interval = compact_time::decode_duration(body.read_u8()?);
        let willingness = Willingness::from_u8(body.read_u8()?);

        let declared = body.remaining();
        let mut consumed = 0;
        let mut link_messages = Vec::new();
        while consumed < declared {
            if declared - consumed < LINK_MESSAGE_HEADER_SIZE {
                return Err(Error::MalformedLength {
                    field: "HELLO body",
                    declared: declared + FIXED_PREFIX_SIZE,
                    reason: "trailing bytes shorter than a link message header",
                });
            }

            let link_code = LinkCode::from_u8(body.read_u8()?);
            codec.check_reserved("link message reserved", body.read_u8()?.into())?;
            let record_size = usize::from(body.read_u16()?);
            if record_size < LINK_MESSAGE_HEADER_SIZE {
                return Err(Error::MalformedLength {
                    field: "link message",
                    declared: record_size,
                    reason: "shorter than the link message header",
                });
            }
            if record_size > declared - consumed {
                return Err(Error::MalformedLength {
                    field: "link message",
                    declared: record_size,
                    reason: "overruns the HELLO body",
                });
            }

            let mut record = body.read_bytes(record_size - LINK_MESSAGE_HEADER_SIZE)?;
            let neighbor_interface_addresses = read_addr_list(&mut record, "link message")?;
            link_messages.push(LinkMessage {
                link_code,
                neighbor_interface_addresses,
            });
            consumed += record_size;
        }

        Ok(Self {
            hello_interval,
            willingness,
            link_messages,
        })
    }
}

impl Default for Hello {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Willingness::DEFAULT, Vec::new())
    }
}

/// TC body: advertised neighbor set of the originator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tc {
    /// Advertised neighbor sequence number
    pub ansn: u16,
    /// Advertised neighbor main addresses
    pub neighbor_addresses: Vec<Ipv4Addr>,
}

impl Tc {
    /// Create a TC body
    #[must_use]
    pub fn new(ansn: u16, neighbor_addresses: Vec<Ipv4Addr>) -> Self {
        Self {
            ansn,
            neighbor_addresses,
        }
    }

    /// Encoded length in bytes
    #[must_use]
    pub fn serialized_size(&self) -> u16 {
        size_field(FIXED_PREFIX_SIZE + 4 * self.neighbor_addresses.len())
    }

    /// Write the body
    pub fn encode<B: BufMut>(&self, out: &mut B) {
        out.put_u16(self.ansn);
        out.put_u16(0);
        for addr in &self.neighbor_addresses {
            out.put_addr(*addr);
        }
    }

    pub(crate) fn decode(mut body: Bytes, codec: &Codec) -> Result<Self> {
        check_fixed_prefix(&body, "TC body")?;
        let ansn = body.read_u16()?;
        codec.check_reserved("TC reserved", body.read_u16()?.into())?;
        let neighbor_addresses = read_addr_list(&mut body, "TC neighbor list")?;
        Ok(Self {
            ansn,
            neighbor_addresses,
        })
    }
}

/// A network reachable through the originator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Association {
    /// Network address
    pub address: Ipv4Addr,
    /// Network mask
    pub mask: Ipv4Addr,
}

impl Association {
    /// Create an association
    #[must_use]
    pub const fn new(address: Ipv4Addr, mask: Ipv4Addr) -> Self {
        Self { address, mask }
    }

    /// Number of leading one bits in the mask
    #[must_use]
    pub fn prefix_len(&self) -> u32 {
        u32::from(self.mask).leading_ones()
    }
}

/// HNA body: external networks reachable through the originator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hna {
    /// Network/mask pairs in wire order
    pub associations: Vec<Association>,
}

impl Hna {
    /// Create an HNA body
    #[must_use]
    pub fn new(associations: Vec<Association>) -> Self {
        Self { associations }
    }

    /// Encoded length in bytes
    #[must_use]
    pub fn serialized_size(&self) -> u16 {
        size_field(8 * self.associations.len())
    }

    /// Write the body
    pub fn encode<B: BufMut>(&self, out: &mut B) {
        for association in &self.associations {
            out.put_addr(association.address);
            out.put_addr(association.mask);
        }
    }

    pub(crate) fn decode(mut body: Bytes) -> Result<Self> {
        let len = body.remaining();
        if len % 8 != 0 {
            return Err(Error::MalformedLength {
                field: "HNA body",
                declared: len,
                reason: "not a multiple of the association size",
            });
        }

        let mut associations = Vec::with_capacity(len / 8);
        while body.has_remaining() {
            let address = body.read_addr()?;
            let mask = body.read_addr()?;
            associations.push(Association { address, mask });
        }
        Ok(Self { associations })
    }
}

/// Body of a message whose type this codec does not interpret
///
/// Kept byte-for-byte so it can still be relayed. The type byte never names
/// one of the known [`MessageType`]s, otherwise the body would come back as
/// a different variant after a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpaqueBody {
    type_byte: u8,
    payload: Bytes,
}

impl OpaqueBody {
    /// Wrap a raw body, or `None` if `type_byte` is a known message type
    #[must_use]
    pub fn new(type_byte: u8, payload: impl Into<Bytes>) -> Option<Self> {
        if MessageType::from_u8(type_byte).is_some() {
            return None;
        }
        Some(Self {
            type_byte,
            payload: payload.into(),
        })
    }

    /// Type byte from the message header
    #[must_use]
    pub const fn type_byte(&self) -> u8 {
        self.type_byte
    }

    /// Raw body
    #[must_use]
    pub const fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Consume and return the raw body
    #[must_use]
    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}

/// Message body, selected by the message type byte
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageBody {
    /// HELLO message
    Hello(Hello),
    /// TC message
    Tc(Tc),
    /// MID message
    Mid(Mid),
    /// HNA message
    Hna(Hna),
    /// Message of a type this codec does not interpret
    Unknown(OpaqueBody),
}

impl MessageBody {
    /// Type byte written in the message header
    #[must_use]
    pub fn type_byte(&self) -> u8 {
        match self {
            Self::Hello(_) => MessageType::Hello.as_u8(),
            Self::Tc(_) => MessageType::Tc.as_u8(),
            Self::Mid(_) => MessageType::Mid.as_u8(),
            Self::Hna(_) => MessageType::Hna.as_u8(),
            Self::Unknown(opaque) => opaque.type_byte(),
        }
    }

    /// Message type, `None` for opaque bodies of unknown type
    #[must_use]
    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::from_u8(self.type_byte())
    }

    /// Encoded length in bytes
    #[must_use]
    pub fn serialized_size(&self) -> u16 {
        match self {
            Self::Hello(hello) => hello.serialized_size(),
            Self::Tc(tc) => tc.serialized_size(),
            Self::Mid(mid) => mid.serialized_size(),
            Self::Hna(hna) => hna.serialized_size(),
            Self::Unknown(opaque) => size_field(opaque.payload().len()),
        }
    }

    /// Write the body
    pub fn encode<B: BufMut>(&self, out: &mut B) {
        match self {
            Self::Hello(hello) => hello.encode(out),
            Self::Tc(tc) => tc.encode(out),
            Self::Mid(mid) => mid.encode(out),
            Self::Hna(hna) => hna.encode(out),
            Self::Unknown(opaque) => out.put_slice(opaque.payload()),
        }
    }

    /// Decode a body holding exactly the bytes declared by its message header
    pub(crate) fn decode(type_byte: u8, body: Bytes, codec: &Codec) -> Result<Self> {
        match MessageType::from_u8(type_byte) {
            Some(MessageType::Hello) => Hello::decode(body, codec).map(Self::Hello),
            Some(MessageType::Tc) => Tc::decode(body, codec).map(Self::Tc),
            Some(MessageType::Mid) => Mid::decode(body).map(Self::Mid),
            Some(MessageType::Hna) => Hna::decode(body).map(Self::Hna),
            None => Ok(Self::Unknown(OpaqueBody {
                type_byte,
                payload: body,
            })),
        }
    }
}

impl From<Hello> for MessageBody {
    fn from(hello: Hello) -> Self {
        Self::Hello(hello)
    }
}

impl From<Tc> for MessageBody {
    fn from(tc: Tc) -> Self {
        Self::Tc(tc)
    }
}

impl From<Mid> for MessageBody {
    fn from(mid: Mid) -> Self {
        Self::Mid(mid)
    }
}

impl From<Hna> for MessageBody {
    fn from(hna: Hna) -> Self {
        Self::Hna(hna)
    }
}

impl From<OpaqueBody> for MessageBody {
    fn from(opaque: OpaqueBody) -> Self {
        Self::Unknown(opaque)
    }
}
