//! Tournament blind progression shared by any number of tables.
//!
//! A [`Tournament`] is a cheap handle: clones share the same blind schedule
//! and the same current level, so a table bound to a tournament always
//! posts the blinds of the tournament's live level.
//!
//! ## Example
//!
//! ```
//! use pkr_components::tournament::{BlindStructure, Tournament};
//!
//! let tournament = Tournament::new(BlindStructure::standard());
//! let handle = tournament.clone();
//!
//! tournament.advance_level();
//! assert_eq!(handle.level().big_blind, 30);
//! ```

pub mod models;

pub use models::{BlindLevel, BlindStructure};

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

#[derive(Clone, Debug)]
pub struct Tournament {
    structure: Arc<BlindStructure>,
    current: Arc<AtomicUsize>,
}

impl Tournament {
    #[must_use]
    pub fn new(structure: BlindStructure) -> Self {
        Self {
            structure: Arc::new(structure),
            current: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The live blind level.
    #[must_use]
    pub fn level(&self) -> BlindLevel {
        let idx = self.current.load(Ordering::Acquire);
        self.structure
            .get(idx)
            .unwrap_or_else(|| self.structure.last())
    }

    #[must_use]
    pub fn level_index(&self) -> usize {
        self.current.load(Ordering::Acquire)
    }

    /// Moves to the next level, staying on the last one once reached.
    /// Returns the new level.
    pub fn advance_level(&self) -> BlindLevel {
        let last = self.structure.len().saturating_sub(1);
        let idx = match self
            .current
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |idx| {
                Some((idx + 1).min(last))
            }) {
            Ok(prev) | Err(prev) => (prev + 1).min(last),
        };
        let level = self
            .structure
            .get(idx)
            .unwrap_or_else(|| self.structure.last());
        log::info!(
            "tournament blinds now level {} ({}/{})",
            level.level,
            level.small_blind,
            level.big_blind
        );
        level
    }

    /// Jumps to a level by index. An index past the schedule leaves the
    /// current level untouched and returns `None`.
    pub fn set_level_index(&self, index: usize) -> Option<BlindLevel> {
        let level = self.structure.get(index)?;
        self.current.store(index, Ordering::Release);
        log::info!(
            "tournament blinds set to level {} ({}/{})",
            level.level,
            level.small_blind,
            level.big_blind
        );
        Some(level)
    }

    #[must_use]
    pub fn structure(&self) -> &BlindStructure {
        &self.structure
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(BlindStructure::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_first_level() {
        let tournament = Tournament::default();
        assert_eq!(tournament.level(), BlindLevel::new(1, 20));
        assert_eq!(tournament.level_index(), 0);
    }

    #[test]
    fn test_clones_share_level() {
        let tournament = Tournament::default();
        let other = tournament.clone();
        tournament.advance_level();
        tournament.advance_level();
        assert_eq!(other.level().big_blind, 50);
    }

    #[test]
    fn test_advance_saturates() {
        let structure =
            BlindStructure::new(vec![BlindLevel::new(1, 100), BlindLevel::new(2, 200)]).unwrap();
        let tournament = Tournament::new(structure);
        tournament.advance_level();
        assert_eq!(tournament.advance_level().big_blind, 200);
        assert_eq!(tournament.level_index(), 1);
    }

    #[test]
    fn test_set_level_index_rejects_out_of_range() {
        let tournament = Tournament::default();
        assert_eq!(tournament.set_level_index(3).unwrap().big_blind, 100);
        assert_eq!(tournament.set_level_index(99), None);
        assert_eq!(tournament.level_index(), 3);
        assert_eq!(tournament.level().big_blind, 100);
    }

    #[test]
    fn test_advance_returns_level_it_moved_to() {
        let tournament = Tournament::default();
        let other = tournament.clone();
        assert_eq!(tournament.advance_level().big_blind, 30);
        assert_eq!(other.advance_level().big_blind, 40);
        assert_eq!(tournament.level_index(), 2);
    }

    #[test]
    fn test_handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Tournament>();
    }
}
