//! OLSR message types, willingness levels and link codes

use std::fmt;

/// OLSR message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageType {
    /// Multiple interface declaration
    Mid = 1,
    /// Link sensing and neighbor detection
    Hello = 2,
    /// Topology control
    Tc = 3,
    /// Host and network association
    Hna = 4,
}

impl MessageType {
    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Mid),
            2 => Some(Self::Hello),
            3 => Some(Self::Tc),
            4 => Some(Self::Hna),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hello => "HELLO",
            Self::Tc => "TC",
            Self::Mid => "MID",
            Self::Hna => "HNA",
        };
        write!(f, "{name}")
    }
}

/// A node's willingness to carry traffic on behalf of others.
///
/// Carried as a raw byte; the named levels are the ones RFC 3626 defines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Willingness(u8);

impl Willingness {
    /// Never select this node as MPR
    pub const NEVER: Self = Self(0);
    /// Low willingness
    pub const LOW: Self = Self(1);
    /// Default willingness
    pub const DEFAULT: Self = Self(3);
    /// High willingness
    pub const HIGH: Self = Self(6);
    /// Always select this node as MPR
    pub const ALWAYS: Self = Self(7);

    /// Create from byte
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        Self(value)
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Willingness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NEVER => write!(f, "NEVER"),
            Self::LOW => write!(f, "LOW"),
            Self::DEFAULT => write!(f, "DEFAULT"),
            Self::HIGH => write!(f, "HIGH"),
            Self::ALWAYS => write!(f, "ALWAYS"),
            Self(other) => write!(f, "{other}"),
        }
    }
}

/// Link type held in the two low bits of a link code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LinkType {
    /// No link information
    Unspecified = 0,
    /// Heard but not confirmed bidirectional
    Asymmetric = 1,
    /// Verified bidirectional
    Symmetric = 2,
    /// Link has been lost
    Lost = 3,
}

impl LinkType {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Unspecified,
            1 => Self::Asymmetric,
            2 => Self::Symmetric,
            _ => Self::Lost,
        }
    }
}

/// Neighbor type held in bits 2-3 of a link code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NeighborType {
    /// Not a neighbor
    NotNeighbor = 0,
    /// Symmetric neighbor
    Symmetric = 1,
    /// Symmetric neighbor selected as multipoint relay
    Mpr = 2,
}

/// Link code tagging a group of neighbor addresses in a HELLO message.
///
/// ```text
///   7   6   5   4   3   2   1   0
/// +---+---+---+---+---+---+---+---+
/// |   reserved    | neigh | link  |
/// +---+---+---+---+---+---+---+---+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkCode(u8);

impl LinkCode {
    /// Combine a link type and a neighbor type
    #[must_use]
    pub const fn new(link: LinkType, neighbor: NeighborType) -> Self {
        Self(((neighbor as u8) << 2) | link as u8)
    }

    /// Create from byte
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        Self(value)
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Link type bits
    #[must_use]
    pub const fn link_type(self) -> LinkType {
        LinkType::from_bits(self.0)
    }

    /// Neighbor type bits, `None` for the undefined value 3
    #[must_use]
    pub const fn neighbor_type(self) -> Option<NeighborType> {
        match (self.0 >> 2) & 0x03 {
            0 => Some(NeighborType::NotNeighbor),
            1 => Some(NeighborType::Symmetric),
            2 => Some(NeighborType::Mpr),
            _ => None,
        }
    }

    /// Whether the code is meaningful: high bits clear, a defined neighbor
    /// type, and not a symmetric neighbor over an asymmetric link.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        if self.0 & 0xF0 != 0 {
            return false;
        }
        match self.neighbor_type() {
            None => false,
            Some(NeighborType::Symmetric) => !matches!(self.link_type(), LinkType::Asymmetric),
            Some(_) => true,
        }
    }
}

impl From<u8> for LinkCode {
    fn from(value: u8) -> Self {
        Self(value)
    }
}
