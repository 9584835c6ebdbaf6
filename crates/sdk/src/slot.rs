//! Player slot addressing
//!
//! Every connection on the server occupies a slot in `[0, ABSOLUTE_PLAYER_LIMIT)`.
//! The slot is also the player's controller entity index minus one.
//!
//! ```text
//! slot:          0   1   2  ...  63
//! entity index:  1   2   3  ...  64
//! ```

use std::fmt;

/// Hard upper bound on player slots (CS2 value)
pub const ABSOLUTE_PLAYER_LIMIT: usize = 64;

/// A client connection slot
///
/// Any `i32` can be stored, but only values in `[0, ABSOLUTE_PLAYER_LIMIT)`
/// are valid. `-1` is the canonical invalid slot.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerSlot(i32);

impl PlayerSlot {
    /// The canonical invalid slot
    pub const INVALID: Self = Self(-1);

    /// Wrap a raw slot value
    #[inline]
    pub const fn new(slot: i32) -> Self {
        Self(slot)
    }

    /// Get the raw slot value
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Check if the slot lies in `[0, ABSOLUTE_PLAYER_LIMIT)`
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0 && (self.0 as usize) < ABSOLUTE_PLAYER_LIMIT
    }

    /// Get the slot as an array index, or `None` if out of range
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.0 as usize)
        } else {
            None
        }
    }

    /// Convert a controller entity index (1-based) to a slot
    ///
    /// Indices that do not fit a slot give [`PlayerSlot::INVALID`].
    #[inline]
    pub fn from_entity_index(index: u32) -> Self {
        i32::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .map_or(Self::INVALID, Self)
    }

    /// Get the controller entity index (slot + 1), or `None` if out of range
    #[inline]
    pub const fn entity_index(self) -> Option<i32> {
        if self.is_valid() {
            Some(self.0 + 1)
        } else {
            None
        }
    }
}

impl Default for PlayerSlot {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<i32> for PlayerSlot {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<PlayerSlot> for i32 {
    fn from(slot: PlayerSlot) -> Self {
        slot.0
    }
}

impl fmt::Debug for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "PlayerSlot({})", self.0)
        } else {
            write!(f, "PlayerSlot(invalid:{})", self.0)
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_validity() {
        assert!(PlayerSlot::new(0).is_valid());
        assert!(PlayerSlot::new(63).is_valid());
        assert!(!PlayerSlot::new(64).is_valid());
        assert!(!PlayerSlot::new(-1).is_valid());
        assert!(!PlayerSlot::INVALID.is_valid());
        assert!(!PlayerSlot::new(i32::MIN).is_valid());
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(PlayerSlot::new(5).index(), Some(5));
        assert_eq!(PlayerSlot::new(64).index(), None);
        assert_eq!(PlayerSlot::INVALID.index(), None);
    }

    #[test]
    fn test_entity_index_conversion() {
        assert_eq!(PlayerSlot::from_entity_index(1), PlayerSlot::new(0));
        assert_eq!(PlayerSlot::from_entity_index(64), PlayerSlot::new(63));
        assert_eq!(PlayerSlot::new(0).entity_index(), Some(1));
        // Entity 0 is the world, never a player
        assert!(!PlayerSlot::from_entity_index(0).is_valid());
    }

    #[test]
    fn test_entity_index_extremes() {
        assert_eq!(PlayerSlot::from_entity_index(0x8000_0000), PlayerSlot::INVALID);
        assert_eq!(PlayerSlot::from_entity_index(u32::MAX), PlayerSlot::INVALID);
        assert_eq!(
            PlayerSlot::from_entity_index(i32::MAX as u32),
            PlayerSlot::new(i32::MAX - 1)
        );

        assert_eq!(PlayerSlot::new(i32::MAX).entity_index(), None);
        assert_eq!(PlayerSlot::new(i32::MIN).entity_index(), None);
        assert_eq!(PlayerSlot::INVALID.entity_index(), None);
        assert_eq!(PlayerSlot::new(63).entity_index(), Some(64));
    }

    #[test]
    fn test_slot_default_is_invalid() {
        assert_eq!(PlayerSlot::default(), PlayerSlot::INVALID);
    }

    #[test]
    fn test_slot_debug() {
        assert_eq!(format!("{:?}", PlayerSlot::new(3)), "PlayerSlot(3)");
        assert_eq!(format!("{:?}", PlayerSlot::new(99)), "PlayerSlot(invalid:99)");
        assert_eq!(format!("{}", PlayerSlot::new(7)), "7");
    }
}
