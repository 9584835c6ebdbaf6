//! Fixed-capacity player bit vector
//!
//! One bit per player slot, packed into `u32` words the same way the engine's
//! `CPlayerBitVec` is laid out:
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │          word 0 (u32)        │          word 1 (u32)        │
//! │        slots 0 - 31          │        slots 32 - 63         │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Slot-mutating operations ignore slots outside `[0, ABSOLUTE_PLAYER_LIMIT)`.

use std::fmt;

use crate::slot::{PlayerSlot, ABSOLUTE_PLAYER_LIMIT};

/// Number of `u32` words backing a [`PlayerBitVec`]
pub const PLAYER_BITVEC_WORDS: usize = ABSOLUTE_PLAYER_LIMIT.div_ceil(32);

const BITS_PER_WORD: usize = 32;

/// Set of player slots
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlayerBitVec {
    words: [u32; PLAYER_BITVEC_WORDS],
}

impl PlayerBitVec {
    /// Create an empty set
    pub const fn new() -> Self {
        Self {
            words: [0; PLAYER_BITVEC_WORDS],
        }
    }

    /// Create a set from a raw 64-bit slot mask
    pub fn from_mask(mask: u64) -> Self {
        let mut bits = Self::new();
        bits.set_recipients(mask);
        bits
    }

    /// Add a slot (no-op when out of range)
    #[inline]
    pub fn set(&mut self, slot: PlayerSlot) {
        if let Some(index) = slot.index() {
            self.words[index / BITS_PER_WORD] |= 1 << (index % BITS_PER_WORD);
        }
    }

    /// Remove a slot (no-op when out of range)
    #[inline]
    pub fn clear(&mut self, slot: PlayerSlot) {
        if let Some(index) = slot.index() {
            self.words[index / BITS_PER_WORD] &= !(1 << (index % BITS_PER_WORD));
        }
    }

    /// Check if a slot is present (always `false` when out of range)
    #[inline]
    pub fn is_set(&self, slot: PlayerSlot) -> bool {
        slot.index()
            .map(|index| self.words[index / BITS_PER_WORD] & (1 << (index % BITS_PER_WORD)) != 0)
            .unwrap_or(false)
    }

    /// Remove every slot
    #[inline]
    pub fn clear_all(&mut self) {
        self.words = [0; PLAYER_BITVEC_WORDS];
    }

    /// Find the first set bit at or after `from`
    ///
    /// A negative `from` starts at bit 0.
    ///
    /// # Returns
    /// The bit index, or `-1` if no set bit remains.
    pub fn find_next_set_bit(&self, from: i32) -> i32 {
        let start = from.max(0) as usize;
        if start >= ABSOLUTE_PLAYER_LIMIT {
            return -1;
        }

        let mut word_index = start / BITS_PER_WORD;
        let mut word = self.words[word_index] & (u32::MAX << (start % BITS_PER_WORD));

        loop {
            if word != 0 {
                let bit = word_index * BITS_PER_WORD + word.trailing_zeros() as usize;
                return if bit < ABSOLUTE_PLAYER_LIMIT {
                    bit as i32
                } else {
                    -1
                };
            }

            word_index += 1;
            if word_index >= PLAYER_BITVEC_WORDS {
                return -1;
            }
            word = self.words[word_index];
        }
    }

    /// Union a raw 64-bit slot mask into the set
    ///
    /// The low 32 bits land in word 0 and the high 32 bits in word 1.
    pub fn set_recipients(&mut self, mask: u64) {
        self.words[0] |= mask as u32;
        if let Some(high) = self.words.get_mut(1) {
            *high |= (mask >> 32) as u32;
        }
        self.trim();
    }

    /// View the first 64 slots as a raw mask
    pub fn low_mask(&self) -> u64 {
        let low = u64::from(self.words[0]);
        let high = self.words.get(1).copied().map(u64::from).unwrap_or(0);
        low | (high << 32)
    }

    /// Number of slots in the set, counted across the full capacity
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if no slot is set
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Keep only slots also present in `other`
    pub fn intersect_with(&mut self, other: &PlayerBitVec) {
        for (dst, src) in self.words.iter_mut().zip(other.words.iter()) {
            *dst &= *src;
        }
    }

    /// Raw backing words
    pub fn words(&self) -> &[u32; PLAYER_BITVEC_WORDS] {
        &self.words
    }

    /// Iterate set slots in ascending order
    pub fn iter(&self) -> PlayerBitVecIter {
        PlayerBitVecIter {
            bits: *self,
            next: 0,
        }
    }

    /// Clear bits past the last addressable slot
    fn trim(&mut self) {
        let tail = ABSOLUTE_PLAYER_LIMIT % BITS_PER_WORD;
        if tail != 0 {
            self.words[PLAYER_BITVEC_WORDS - 1] &= (1u32 << tail) - 1;
        }
    }
}

/// Iterator over the set slots of a [`PlayerBitVec`]
#[derive(Clone, Debug)]
pub struct PlayerBitVecIter {
    bits: PlayerBitVec,
    next: i32,
}

impl Iterator for PlayerBitVecIter {
    type Item = PlayerSlot;

    fn next(&mut self) -> Option<Self::Item> {
        let bit = self.bits.find_next_set_bit(self.next);
        if bit < 0 {
            self.next = ABSOLUTE_PLAYER_LIMIT as i32;
            return None;
        }
        self.next = bit + 1;
        Some(PlayerSlot::new(bit))
    }
}

impl IntoIterator for &PlayerBitVec {
    type Item = PlayerSlot;
    type IntoIter = PlayerBitVecIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<PlayerSlot> for PlayerBitVec {
    fn from_iter<I: IntoIterator<Item = PlayerSlot>>(iter: I) -> Self {
        let mut bits = Self::new();
        bits.extend(iter);
        bits
    }
}

impl Extend<PlayerSlot> for PlayerBitVec {
    fn extend<I: IntoIterator<Item = PlayerSlot>>(&mut self, iter: I) {
        for slot in iter {
            self.set(slot);
        }
    }
}

impl fmt::Debug for PlayerBitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(PlayerSlot::get)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(values: &[i32]) -> PlayerBitVec {
        values.iter().copied().map(PlayerSlot::new).collect()
    }

    fn collect(bits: &PlayerBitVec) -> Vec<i32> {
        bits.iter().map(PlayerSlot::get).collect()
    }

    #[test]
    fn test_set_and_clear() {
        let mut bits = PlayerBitVec::new();
        bits.set(PlayerSlot::new(3));
        bits.set(PlayerSlot::new(40));
        assert!(bits.is_set(PlayerSlot::new(3)));
        assert!(bits.is_set(PlayerSlot::new(40)));
        assert_eq!(bits.count(), 2);

        bits.clear(PlayerSlot::new(3));
        assert!(!bits.is_set(PlayerSlot::new(3)));
        assert_eq!(bits.count(), 1);

        bits.clear_all();
        assert!(bits.is_empty());
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut bits = slots(&[1, 2]);
        let before = bits;

        for raw in [-1, -100, 64, 65, 1000, i32::MAX, i32::MIN] {
            bits.set(PlayerSlot::new(raw));
            assert_eq!(bits, before);
            bits.clear(PlayerSlot::new(raw));
            assert_eq!(bits, before);
            assert!(!bits.is_set(PlayerSlot::new(raw)));
        }
    }

    #[test]
    fn test_find_next_set_bit() {
        let bits = slots(&[0, 31, 32, 63]);
        assert_eq!(bits.find_next_set_bit(0), 0);
        assert_eq!(bits.find_next_set_bit(1), 31);
        assert_eq!(bits.find_next_set_bit(32), 32);
        assert_eq!(bits.find_next_set_bit(33), 63);
        assert_eq!(bits.find_next_set_bit(64), -1);
        assert_eq!(bits.find_next_set_bit(-5), 0);

        assert_eq!(PlayerBitVec::new().find_next_set_bit(0), -1);
        assert_eq!(slots(&[10]).find_next_set_bit(11), -1);
    }

    #[test]
    fn test_set_recipients_splits_mask_across_words() {
        let mut bits = PlayerBitVec::new();
        bits.set_recipients(0x0000_0001_8000_0001);
        assert_eq!(bits.words()[0], 0x8000_0001);
        assert_eq!(bits.words()[1], 0x0000_0001);
        assert_eq!(collect(&bits), vec![0, 31, 32]);
    }

    #[test]
    fn test_set_recipients_is_union() {
        let mut bits = slots(&[5]);
        bits.set_recipients(1 << 7);
        assert_eq!(collect(&bits), vec![5, 7]);
    }

    #[test]
    fn test_low_mask_round_trips_mask() {
        let mask = 0xDEAD_BEEF_0000_F00D;
        assert_eq!(PlayerBitVec::from_mask(mask).low_mask(), mask);
    }

    #[test]
    fn test_count_covers_full_capacity() {
        let all: PlayerBitVec = (0..ABSOLUTE_PLAYER_LIMIT as i32).map(PlayerSlot::new).collect();
        assert_eq!(all.count(), ABSOLUTE_PLAYER_LIMIT);
    }

    #[test]
    fn test_intersect_with() {
        let mut a = slots(&[1, 3, 4]);
        a.intersect_with(&slots(&[3, 4, 5]));
        assert_eq!(collect(&a), vec![3, 4]);
    }

    #[test]
    fn test_iter_ascending() {
        let bits = slots(&[63, 0, 17, 32]);
        assert_eq!(collect(&bits), vec![0, 17, 32, 63]);

        let mut iter = bits.iter();
        for _ in 0..4 {
            assert!(iter.next().is_some());
        }
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_debug_lists_slots() {
        assert_eq!(format!("{:?}", slots(&[2, 5, 9])), "{2, 5, 9}");
        assert_eq!(format!("{:?}", PlayerBitVec::new()), "{}");
    }
}
