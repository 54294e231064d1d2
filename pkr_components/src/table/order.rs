//! Button placement, positions and acting order.

use std::collections::BTreeMap;

use super::{Table, TableError, TableResult};
use crate::game::{
    constants::MIN_PLAYERS_TO_DEAL,
    entities::{Position, SeatNumber},
};

/// Index of the default button among `n` dealt-in seats: the lowest seat
/// ends up posting the big blind.
fn default_button_index(n: usize) -> usize {
    match n {
        0 | 1 => 0,
        2 => 1,
        n => n - 2,
    }
}

/// Names for the seats between the big blind and the button.
fn middle_positions(k: usize) -> Vec<Position> {
    if k == 0 {
        return Vec::new();
    }
    let late = (k - 1).min(Position::LATE.len());
    let early = (k - late).min(Position::EARLY.len());
    Position::EARLY[..early]
        .iter()
        .chain(&Position::LATE[Position::LATE.len() - late..])
        .copied()
        .collect()
}

impl Table {
    /// Seats dealt into the hand, in seat order.
    ///
    /// Once a hand has started the seats are fixed: sitting out or leaving
    /// folds a player without moving anyone else's turn, and new arrivals
    /// wait for the next hand.
    #[must_use]
    pub fn dealt_in(&self) -> Vec<SeatNumber> {
        match &self.hand_seats {
            Some(seats) => seats.clone(),
            None => self
                .players
                .values()
                .filter(|p| !p.is_sitting_out())
                .map(|p| p.seat())
                .collect(),
        }
    }

    /// Index of the button within `dealt`. A button whose seat is no longer
    /// dealt in stays on the closest dealt seat before it.
    fn button_index(&self, dealt: &[SeatNumber]) -> usize {
        match self.button {
            None => default_button_index(dealt.len()),
            Some(button) => dealt
                .iter()
                .rposition(|seat| *seat <= button)
                .unwrap_or(dealt.len().saturating_sub(1)),
        }
    }

    /// Places the button so that the lowest dealt-in seat posts the big
    /// blind.
    pub fn distribute_positions(&mut self) -> TableResult<SeatNumber> {
        let dealt = self.dealt_in();
        if dealt.len() < MIN_PLAYERS_TO_DEAL {
            return Err(TableError::NotEnoughPlayers);
        }
        let button = dealt[default_button_index(dealt.len())];
        self.button = Some(button);
        log::debug!("button placed on seat {button}");
        Ok(button)
    }

    /// Moves the button to the next dealt-in seat.
    pub fn move_button(&mut self) -> TableResult<SeatNumber> {
        let Some(current) = self.button else {
            return self.distribute_positions();
        };
        let dealt = self.dealt_in();
        if dealt.len() < MIN_PLAYERS_TO_DEAL {
            return Err(TableError::NotEnoughPlayers);
        }
        let button = dealt
            .iter()
            .copied()
            .find(|seat| *seat > current)
            .unwrap_or(dealt[0]);
        self.button = Some(button);
        log::debug!("button moves from seat {current} to seat {button}");
        Ok(button)
    }

    /// Small blind and big blind seats. Heads-up the button posts the small
    /// blind.
    #[must_use]
    pub fn blind_seats(&self) -> Option<(SeatNumber, SeatNumber)> {
        let dealt = self.dealt_in();
        let n = dealt.len();
        if n < MIN_PLAYERS_TO_DEAL {
            return None;
        }
        let b = self.button_index(&dealt);
        if n == 2 {
            Some((dealt[b], dealt[(b + 1) % n]))
        } else {
            Some((dealt[(b + 1) % n], dealt[(b + 2) % n]))
        }
    }

    /// Position of every dealt-in seat.
    #[must_use]
    pub fn positions(&self) -> BTreeMap<SeatNumber, Position> {
        let dealt = self.dealt_in();
        let n = dealt.len();
        let mut positions = BTreeMap::new();
        if n == 0 {
            return positions;
        }
        let b = self.button_index(&dealt);
        match n {
            1 => {
                positions.insert(dealt[b], Position::Btn);
            }
            2 => {
                positions.insert(dealt[b], Position::Sb);
                positions.insert(dealt[(b + 1) % n], Position::Bb);
            }
            _ => {
                positions.insert(dealt[b], Position::Btn);
                positions.insert(dealt[(b + 1) % n], Position::Sb);
                positions.insert(dealt[(b + 2) % n], Position::Bb);
                for (i, position) in middle_positions(n - 3).into_iter().enumerate() {
                    positions.insert(dealt[(b + 3 + i) % n], position);
                }
            }
        }
        positions
    }

    #[must_use]
    pub fn position(&self, seat: SeatNumber) -> Option<Position> {
        self.positions().get(&seat).copied()
    }

    /// Dealt-in seats in acting order for the current street.
    ///
    /// Preflop action starts after the big blind (with the button when
    /// heads-up); later streets start with the first seat after the button
    /// (the big blind when heads-up).
    #[must_use]
    pub fn playing_order(&self) -> Vec<SeatNumber> {
        let dealt = self.dealt_in();
        let n = dealt.len();
        if n == 0 {
            return dealt;
        }
        let b = self.button_index(&dealt);
        let start = match (n, self.street.is_preflop()) {
            (2, true) => b,
            (2, false) => b + 1,
            (_, true) => b + 3,
            (_, false) => b + 1,
        };
        (0..n).map(|i| dealt[(start + i) % n]).collect()
    }

    /// Seats still expected to act on this street: able to play and either
    /// not yet acted or facing a bet.
    #[must_use]
    pub fn players_waiting(&self) -> Vec<SeatNumber> {
        self.playing_order()
            .into_iter()
            .filter(|seat| {
                self.players.get(seat).is_some_and(|p| {
                    p.can_play() && (!p.has_acted() || self.to_call(*seat).unwrap_or(0) > 0)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{entities::Street, player::TablePlayer};

    fn table_with(seats: &[SeatNumber]) -> Table {
        let mut table = Table::new();
        for seat in seats {
            table
                .sit(TablePlayer::new(*seat, format!("p{seat}"), 1000))
                .unwrap();
        }
        table
    }

    #[test]
    fn test_middle_position_names() {
        use Position::*;
        assert_eq!(middle_positions(0), Vec::<Position>::new());
        assert_eq!(middle_positions(1), vec![Utg]);
        assert_eq!(middle_positions(2), vec![Utg, Co]);
        assert_eq!(middle_positions(3), vec![Utg, Hj, Co]);
        assert_eq!(middle_positions(4), vec![Utg, Utg4, Hj, Co]);
        assert_eq!(middle_positions(6), vec![Utg, Utg1, Utg2, Utg4, Hj, Co]);
        assert_eq!(
            middle_positions(7),
            vec![Utg, Utg1, Utg2, Utg3, Utg4, Hj, Co]
        );
    }

    #[test]
    fn test_default_button_makes_lowest_seat_big_blind() {
        let mut table = table_with(&[1, 2, 4, 6]);
        assert_eq!(table.distribute_positions().unwrap(), 4);
        assert_eq!(table.blind_seats(), Some((6, 1)));
        let positions = table.positions();
        assert_eq!(positions[&4], Position::Btn);
        assert_eq!(positions[&6], Position::Sb);
        assert_eq!(positions[&1], Position::Bb);
        assert_eq!(positions[&2], Position::Utg);
    }

    #[test]
    fn test_playing_order_by_street() {
        let mut table = table_with(&[1, 2, 4, 6]);
        assert_eq!(table.playing_order(), vec![2, 4, 6, 1]);
        table.street = Street::Flop;
        assert_eq!(table.playing_order(), vec![6, 1, 2, 4]);
    }

    #[test]
    fn test_heads_up_order() {
        let mut table = table_with(&[3, 8]);
        assert_eq!(table.distribute_positions().unwrap(), 8);
        assert_eq!(table.blind_seats(), Some((8, 3)));
        assert_eq!(table.position(8), Some(Position::Sb));
        assert_eq!(table.position(3), Some(Position::Bb));
        assert_eq!(table.playing_order(), vec![8, 3]);
        table.street = Street::Turn;
        assert_eq!(table.playing_order(), vec![3, 8]);
    }

    #[test]
    fn test_move_button_skips_sitting_out() {
        let mut table = table_with(&[1, 3, 5, 7]);
        table.distribute_positions().unwrap();
        assert_eq!(table.button(), Some(5));
        table.sit_out(7).unwrap();
        assert_eq!(table.move_button().unwrap(), 1);
        assert_eq!(table.playing_order(), vec![1, 3, 5]);
    }

    #[test]
    fn test_not_enough_players_for_button() {
        let mut table = table_with(&[4]);
        assert_eq!(table.distribute_positions(), Err(TableError::NotEnoughPlayers));
        assert_eq!(table.blind_seats(), None);
        assert_eq!(table.playing_order(), vec![4]);
    }

    #[test]
    fn test_full_ring_positions() {
        let table = table_with(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let positions = table.positions();
        assert_eq!(positions[&8], Position::Btn);
        assert_eq!(positions[&9], Position::Sb);
        assert_eq!(positions[&1], Position::Bb);
        assert_eq!(positions[&2], Position::Utg);
        assert_eq!(positions[&5], Position::Utg4);
        assert_eq!(positions[&7], Position::Co);
    }
}
