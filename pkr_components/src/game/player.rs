use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{Chips, Combo, SeatNumber};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayerStatus {
    /// In the hand and able to act.
    #[default]
    Active,
    Folded,
    /// Whole stack committed; stays in the hand without acting.
    AllIn,
    /// Seated but not dealt in.
    SittingOut,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Active => "active",
            Self::Folded => "folded",
            Self::AllIn => "all-in",
            Self::SittingOut => "sitting out",
        };
        write!(f, "{repr}")
    }
}

/// A seated player and their betting state for the current hand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TablePlayer {
    seat: SeatNumber,
    name: String,
    stack: Chips,
    /// Chips committed on the current street.
    current_bet: Chips,
    /// Chips committed over the whole hand.
    total_bet: Chips,
    status: PlayerStatus,
    cards: Option<Combo>,
    /// Whether the player voluntarily acted on the current street.
    acted: bool,
}

impl TablePlayer {
    #[must_use]
    pub fn new(seat: SeatNumber, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            seat,
            name: name.into(),
            stack,
            current_bet: 0,
            total_bet: 0,
            status: PlayerStatus::Active,
            cards: None,
            acted: false,
        }
    }

    #[must_use]
    pub fn seat(&self) -> SeatNumber {
        self.seat
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn stack(&self) -> Chips {
        self.stack
    }

    #[must_use]
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    #[must_use]
    pub fn total_bet(&self) -> Chips {
        self.total_bet
    }

    #[must_use]
    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    #[must_use]
    pub fn cards(&self) -> Option<Combo> {
        self.cards
    }

    #[must_use]
    pub fn has_acted(&self) -> bool {
        self.acted
    }

    #[must_use]
    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    #[must_use]
    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    #[must_use]
    pub fn is_sitting_out(&self) -> bool {
        self.status == PlayerStatus::SittingOut
    }

    /// Able to take a betting action.
    #[must_use]
    pub fn can_play(&self) -> bool {
        self.status == PlayerStatus::Active && self.stack > 0
    }

    /// Still contesting the pot (active or all-in).
    #[must_use]
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.stack == 0
    }

    /// Moves `amount` chips from the stack into the pot. The caller has
    /// checked `amount <= stack`. Returns whether the stack is now empty.
    pub(crate) fn commit(&mut self, amount: Chips) -> bool {
        self.stack -= amount;
        self.current_bet += amount;
        self.total_bet += amount;
        if self.stack == 0 {
            self.status = PlayerStatus::AllIn;
        }
        self.is_all_in()
    }

    /// Antes are dead money: they count towards the hand total but not
    /// towards the street bet.
    pub(crate) fn post_ante(&mut self, amount: Chips) -> bool {
        self.stack -= amount;
        self.total_bet += amount;
        if self.stack == 0 {
            self.status = PlayerStatus::AllIn;
        }
        self.is_all_in()
    }

    pub(crate) fn mark_acted(&mut self) {
        self.acted = true;
    }

    pub(crate) fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
        self.acted = true;
    }

    pub(crate) fn deal(&mut self, cards: Combo) {
        self.cards = Some(cards);
    }

    pub(crate) fn win(&mut self, amount: Chips) {
        self.stack += amount;
    }

    pub(crate) fn sit_out(&mut self) {
        self.status = PlayerStatus::SittingOut;
    }

    pub(crate) fn sit_in(&mut self) {
        if self.status == PlayerStatus::SittingOut {
            self.status = PlayerStatus::Active;
        }
    }

    pub(crate) fn reset_for_new_street(&mut self) {
        self.current_bet = 0;
        self.acted = false;
    }

    pub(crate) fn reset_for_new_hand(&mut self) {
        self.reset_for_new_street();
        self.total_bet = 0;
        self.cards = None;
        if self.status != PlayerStatus::SittingOut {
            self.status = PlayerStatus::Active;
        }
    }
}

impl fmt::Display for TablePlayer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "seat {} {} ({} chips, {})",
            self.seat, self.name, self.stack, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_is_active() {
        let player = TablePlayer::new(3, "alice", 1000);
        assert_eq!(player.seat(), 3);
        assert_eq!(player.name(), "alice");
        assert!(player.can_play());
        assert!(player.in_hand());
        assert!(!player.has_acted());
    }

    #[test]
    fn test_commit_whole_stack_goes_all_in() {
        let mut player = TablePlayer::new(1, "bob", 300);
        assert!(!player.commit(100));
        assert_eq!(player.stack(), 200);
        assert_eq!(player.current_bet(), 100);
        assert!(player.commit(200));
        assert!(player.is_all_in());
        assert!(!player.can_play());
        assert!(player.in_hand());
        assert_eq!(player.total_bet(), 300);
    }

    #[test]
    fn test_street_reset_keeps_total() {
        let mut player = TablePlayer::new(1, "carol", 500);
        player.commit(100);
        player.mark_acted();
        player.reset_for_new_street();
        assert_eq!(player.current_bet(), 0);
        assert_eq!(player.total_bet(), 100);
        assert!(!player.has_acted());
    }

    #[test]
    fn test_hand_reset_reactivates_folded() {
        let mut player = TablePlayer::new(1, "dave", 500);
        player.deal("AsKs".parse().unwrap());
        player.fold();
        assert!(player.is_folded());
        player.reset_for_new_hand();
        assert_eq!(player.status(), PlayerStatus::Active);
        assert_eq!(player.cards(), None);
        assert_eq!(player.total_bet(), 0);
    }

    #[test]
    fn test_sitting_out_survives_hand_reset() {
        let mut player = TablePlayer::new(1, "erin", 500);
        player.sit_out();
        player.reset_for_new_hand();
        assert!(player.is_sitting_out());
        player.sit_in();
        assert!(player.can_play());
    }

    #[test]
    fn test_display() {
        let player = TablePlayer::new(2, "frank", 750);
        assert_eq!(player.to_string(), "seat 2 frank (750 chips, active)");
    }
}
