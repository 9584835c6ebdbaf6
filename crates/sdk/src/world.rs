//! World-space types used by visibility and team queries

use std::collections::BTreeSet;
use std::fmt;

/// A point in world space
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1} {:.1} {:.1})", self.x, self.y, self.z)
    }
}

/// Visibility cluster of the world's leaf partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub i32);

/// Ordered set of visibility clusters
pub type ClusterSet = BTreeSet<ClusterId>;

/// Team number as stored in `m_iTeamNum`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TeamId(pub u8);

impl TeamId {
    pub const UNASSIGNED: Self = Self(0);
    pub const SPECTATOR: Self = Self(1);
    pub const TERRORIST: Self = Self(2);
    pub const COUNTER_TERRORIST: Self = Self(3);
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UNASSIGNED => f.write_str("unassigned"),
            Self::SPECTATOR => f.write_str("spectator"),
            Self::TERRORIST => f.write_str("t"),
            Self::COUNTER_TERRORIST => f.write_str("ct"),
            Self(other) => write!(f, "team{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_display() {
        assert_eq!(TeamId::TERRORIST.to_string(), "t");
        assert_eq!(TeamId::COUNTER_TERRORIST.to_string(), "ct");
        assert_eq!(TeamId(7).to_string(), "team7");
    }

    #[test]
    fn test_vector_display() {
        assert_eq!(Vector::new(1.0, -2.5, 3.0).to_string(), "(1.0 -2.5 3.0)");
    }
}
