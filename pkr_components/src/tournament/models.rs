//! Blind level data for tournaments.

use serde::{Deserialize, Serialize};

use crate::game::entities::Chips;

/// One step of a blind schedule.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct BlindLevel {
    /// Level number (1-indexed)
    pub level: u32,
    /// Small blind amount
    pub small_blind: Chips,
    /// Big blind amount
    pub big_blind: Chips,
    /// Ante posted by every dealt-in player
    #[serde(default)]
    pub ante: Chips,
}

impl BlindLevel {
    /// Create a blind level whose small blind is half the big blind and
    /// whose ante is an eighth of it
    #[must_use]
    pub fn new(level: u32, big_blind: Chips) -> Self {
        Self {
            level,
            small_blind: big_blind / 2,
            big_blind,
            ante: big_blind / 8,
        }
    }

    /// Override the small blind
    #[must_use]
    pub fn with_small_blind(mut self, small_blind: Chips) -> Self {
        self.small_blind = small_blind;
        self
    }

    /// Override the ante (0 for none)
    #[must_use]
    pub fn with_ante(mut self, ante: Chips) -> Self {
        self.ante = ante;
        self
    }
}

impl Default for BlindLevel {
    fn default() -> Self {
        Self::new(1, 100)
    }
}

/// Ordered list of blind levels.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BlindStructure {
    levels: Vec<BlindLevel>,
}

impl BlindStructure {
    /// Returns `None` for an empty schedule.
    #[must_use]
    pub fn new(levels: Vec<BlindLevel>) -> Option<Self> {
        if levels.is_empty() {
            None
        } else {
            Some(Self { levels })
        }
    }

    /// Standard Sit-n-Go schedule
    ///
    /// Big blinds: 20, 30, 50, 100, 150, 200, 300, 400, 600, 800, 1000
    #[must_use]
    pub fn standard() -> Self {
        let levels = [20, 30, 50, 100, 150, 200, 300, 400, 600, 800, 1000]
            .into_iter()
            .enumerate()
            .map(|(i, bb)| BlindLevel::new(i as u32 + 1, bb))
            .collect();
        Self { levels }
    }

    #[must_use]
    pub fn levels(&self) -> &[BlindLevel] {
        &self.levels
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<BlindLevel> {
        self.levels.get(index).copied()
    }

    /// Last level; the schedule never runs past it.
    #[must_use]
    pub fn last(&self) -> BlindLevel {
        self.levels.last().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for BlindStructure {
    fn default() -> Self {
        Self::standard()
    }
}
