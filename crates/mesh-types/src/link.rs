//! Inter-chip link directions.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bit mask selecting the six link bits of a `source`/`route` field;
/// higher bits address on-chip cores.
pub const LINK_MASK: u32 = 0x3f;

/// One of the six inter-chip links of a mesh router.
///
/// The bit assignment matches the hardware: links pair with their
/// opposites three bits apart, so a packet travelling "straight through"
/// arrives on bit `b` and leaves on bit `(b + 3) % 6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    /// North (bit 0).
    North,
    /// North-east (bit 1).
    NorthEast,
    /// East (bit 2).
    East,
    /// South (bit 3).
    South,
    /// South-west (bit 4).
    SouthWest,
    /// West (bit 5).
    West,
}

impl Link {
    /// All links in bit order.
    pub const ALL: [Link; 6] = [
        Link::North,
        Link::NorthEast,
        Link::East,
        Link::South,
        Link::SouthWest,
        Link::West,
    ];

    /// The bit index of this link in a `source`/`route` field.
    pub const fn bit(&self) -> u32 {
        *self as u32
    }

    /// The link a straight-through packet leaves by.
    pub const fn opposite(&self) -> Link {
        match self {
            Link::North => Link::South,
            Link::NorthEast => Link::SouthWest,
            Link::East => Link::West,
            Link::South => Link::North,
            Link::SouthWest => Link::NorthEast,
            Link::West => Link::East,
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Link::North => "n",
            Link::NorthEast => "ne",
            Link::East => "e",
            Link::South => "s",
            Link::SouthWest => "sw",
            Link::West => "w",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Link {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n" => Ok(Link::North),
            "ne" => Ok(Link::NorthEast),
            "e" => Ok(Link::East),
            "s" => Ok(Link::South),
            "sw" => Ok(Link::SouthWest),
            "w" => Ok(Link::West),
            _ => Err(ParseError::InvalidLink(s.to_string())),
        }
    }
}

/// Maps each link bit in a 6-bit field to the opposite direction.
pub const fn opposite_links(links: u32) -> u32 {
    ((links << 3) & 0x38) | ((links >> 3) & 0x07)
}

/// Number of link bits set in a `source`/`route` field.
pub const fn link_count(field: u32) -> u32 {
    (field & LINK_MASK).count_ones()
}

/// True if the field addresses any on-chip cores.
pub const fn has_core_bits(field: u32) -> bool {
    field & !LINK_MASK != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_opposite_pairs() {
        for link in Link::ALL {
            assert_eq!(link.opposite().opposite(), link);
            assert_eq!((link.bit() + 3) % 6, link.opposite().bit());
        }
    }

    #[test]
    fn test_opposite_links_matches_enum() {
        for link in Link::ALL {
            assert_eq!(opposite_links(1 << link.bit()), 1 << link.opposite().bit());
        }

        // Multiple links flip together
        let north_east_and_west = (1 << 1) | (1 << 5);
        assert_eq!(opposite_links(north_east_and_west), (1 << 4) | (1 << 2));
    }

    #[test]
    fn test_link_count_ignores_core_bits() {
        assert_eq!(link_count(0b100_0100), 1);
        assert_eq!(link_count(0b111_1111), 6);
        assert_eq!(link_count(0xffff_ffc0), 0);
    }

    #[test]
    fn test_has_core_bits() {
        assert!(!has_core_bits(0b11_1111));
        assert!(has_core_bits(0b100_0000));
        assert!(has_core_bits(0x8000_0001));
    }

    #[test]
    fn test_display_round_trip() {
        for link in Link::ALL {
            assert_eq!(link.to_string().parse::<Link>().unwrap(), link);
        }
        assert!("nw".parse::<Link>().is_err());
    }
}
