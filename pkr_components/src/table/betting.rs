//! Blinds, antes, betting actions and showdown.

use std::collections::BTreeMap;

use super::{Table, TableError, TableResult};
use crate::game::{
    constants::MIN_PLAYERS_TO_DEAL,
    entities::{Action, Chips, SeatNumber, Street},
    evaluation::{HandEvaluation, HandEvaluator},
    player::TablePlayer,
};

impl Table {
    // === Derived values ===

    /// Largest street bet among the seated players.
    #[must_use]
    pub fn highest_bet(&self) -> Chips {
        self.players
            .values()
            .map(TablePlayer::current_bet)
            .max()
            .unwrap_or(0)
    }

    /// Chips `seat` needs to match the highest bet, capped at its stack.
    pub fn to_call(&self, seat: SeatNumber) -> TableResult<Chips> {
        let player = self.seated(seat)?;
        Ok(self
            .highest_bet()
            .saturating_sub(player.current_bet())
            .min(player.stack()))
    }

    /// Pot size over the amount to call; infinite when nothing is owed.
    pub fn pot_odds(&self, seat: SeatNumber) -> TableResult<f64> {
        let to_call = self.to_call(seat)?;
        if to_call == 0 {
            return Ok(f64::INFINITY);
        }
        Ok(f64::from(self.pot()) / f64::from(to_call))
    }

    /// Share of the final pot a call needs to win to break even.
    pub fn req_equity(&self, seat: SeatNumber) -> TableResult<f64> {
        let to_call = self.to_call(seat)?;
        if to_call == 0 {
            return Ok(0.0);
        }
        Ok(f64::from(to_call) / f64::from(self.pot() + to_call))
    }

    pub fn current_bet(&self, seat: SeatNumber) -> TableResult<Chips> {
        Ok(self.seated(seat)?.current_bet())
    }

    // === Pregame ===

    /// Collects antes and posts the blinds of the current level. Short
    /// stacks post what they have and are all-in.
    pub fn post_pregame(&mut self) -> TableResult<()> {
        let dealt = self.dealt_in();
        if dealt.len() < MIN_PLAYERS_TO_DEAL {
            return Err(TableError::NotEnoughPlayers);
        }
        if self.street != Street::Preflop || self.pots.total() > 0 {
            return Err(TableError::BlindsAlreadyPosted);
        }
        self.hand_seats = Some(dealt.clone());
        if self.button.is_none() {
            self.distribute_positions()?;
        }
        let (sb, bb) = self.blind_seats().ok_or(TableError::NotEnoughPlayers)?;
        let level = self.level();

        if level.ante > 0 {
            for seat in &dealt {
                let Some(player) = self.players.get_mut(seat).filter(|p| p.in_hand()) else {
                    continue;
                };
                let ante = level.ante.min(player.stack());
                if ante == 0 {
                    continue;
                }
                let all_in = player.post_ante(ante);
                self.pots.add_contribution(*seat, ante, all_in);
            }
            self.pots.end_street();
        }

        self.post_blind(sb, level.small_blind);
        self.post_blind(bb, level.big_blind);
        log::debug!(
            "blinds {}/{} (ante {}) posted by seats {sb} and {bb}, pot {}",
            level.small_blind,
            level.big_blind,
            level.ante,
            self.pot()
        );
        Ok(())
    }

    /// A blind seat that left or sat out since the hand began posts nothing.
    fn post_blind(&mut self, seat: SeatNumber, blind: Chips) {
        let Some(player) = self.players.get_mut(&seat).filter(|p| p.in_hand()) else {
            return;
        };
        let amount = blind.min(player.stack());
        if amount > 0 {
            let all_in = player.commit(amount);
            self.pots.add_contribution(seat, amount, all_in);
        }
    }

    // === Actions ===

    /// The seat, provided it can still act.
    fn actor(&self, seat: SeatNumber) -> TableResult<&TablePlayer> {
        let player = self.seated(seat)?;
        if !player.can_play() {
            log::warn!("seat {seat} tried to act while {}", player.status());
            return Err(TableError::CannotAct(seat));
        }
        Ok(player)
    }

    fn commit(&mut self, seat: SeatNumber, amount: Chips) -> TableResult<()> {
        let player = self.seated_mut(seat)?;
        let all_in = player.commit(amount);
        player.mark_acted();
        self.pots.add_contribution(seat, amount, all_in);
        log::debug!(
            "seat {seat} puts in {amount}{}",
            if all_in { " and is all-in" } else { "" }
        );
        Ok(())
    }

    /// Puts `amount` more chips in. The amount may not exceed the stack and
    /// must at least match the call unless it is the whole stack.
    pub fn bet(&mut self, seat: SeatNumber, amount: Chips) -> TableResult<()> {
        let stack = self.actor(seat)?.stack();
        let to_call = self.to_call(seat)?;
        if amount > stack {
            log::warn!("seat {seat} bets {amount} with only {stack} behind");
            return Err(TableError::BetExceedsStack {
                seat,
                amount,
                stack,
            });
        }
        if amount == 0 || (amount < to_call && amount < stack) {
            log::warn!("seat {seat} bets {amount} facing {to_call}");
            return Err(TableError::BetBelowCall {
                seat,
                amount,
                to_call,
            });
        }
        self.commit(seat, amount)
    }

    /// Matches the highest bet, or as much of it as the stack allows.
    /// Returns the chips put in.
    pub fn call(&mut self, seat: SeatNumber) -> TableResult<Chips> {
        self.actor(seat)?;
        let to_call = self.to_call(seat)?;
        if to_call == 0 {
            self.seated_mut(seat)?.mark_acted();
        } else {
            self.commit(seat, to_call)?;
        }
        Ok(to_call)
    }

    pub fn check(&mut self, seat: SeatNumber) -> TableResult<()> {
        self.actor(seat)?;
        let to_call = self.to_call(seat)?;
        if to_call > 0 {
            log::warn!("seat {seat} checks facing {to_call}");
            return Err(TableError::CannotCheck { seat, to_call });
        }
        self.seated_mut(seat)?.mark_acted();
        Ok(())
    }

    pub fn fold(&mut self, seat: SeatNumber) -> TableResult<()> {
        self.actor(seat)?;
        self.seated_mut(seat)?.fold();
        self.pots.fold(seat);
        log::debug!("seat {seat} folds");
        Ok(())
    }

    /// Commits the whole stack. Returns the chips put in.
    pub fn all_in(&mut self, seat: SeatNumber) -> TableResult<Chips> {
        let stack = self.actor(seat)?.stack();
        self.commit(seat, stack)?;
        Ok(stack)
    }

    /// Raises so the seat's street bet totals `target`.
    pub fn raise_to(&mut self, seat: SeatNumber, target: Chips) -> TableResult<()> {
        let player = self.actor(seat)?;
        let (current, stack) = (player.current_bet(), player.stack());
        let highest = self.highest_bet();
        if target <= highest {
            log::warn!("seat {seat} raises to {target} below the bet of {highest}");
            return Err(TableError::RaiseTooSmall { target, highest });
        }
        let amount = target - current;
        if amount > stack {
            log::warn!("seat {seat} raises by {amount} with only {stack} behind");
            return Err(TableError::BetExceedsStack {
                seat,
                amount,
                stack,
            });
        }
        self.commit(seat, amount)
    }

    pub fn apply(&mut self, seat: SeatNumber, action: Action) -> TableResult<()> {
        match action {
            Action::Fold => self.fold(seat),
            Action::Check => self.check(seat),
            Action::Call => self.call(seat).map(|_| ()),
            Action::Bet(amount) => self.bet(seat, amount),
            Action::RaiseTo(target) => self.raise_to(seat, target),
            Action::AllIn => self.all_in(seat).map(|_| ()),
        }
    }

    // === Showdown ===

    pub fn evaluate<E: HandEvaluator + ?Sized>(
        &self,
        seat: SeatNumber,
        evaluator: &E,
    ) -> TableResult<HandEvaluation> {
        let cards = self.seated(seat)?.cards().ok_or(TableError::NoCards(seat))?;
        Ok(evaluator.evaluate(cards, &self.board.cards()))
    }

    /// Players still in the hand grouped by hand strength, best first. A
    /// lone remaining player wins without needing cards; otherwise every
    /// contender must hold hole cards.
    pub fn rank_players<E: HandEvaluator + ?Sized>(
        &self,
        evaluator: &E,
    ) -> TableResult<Vec<Vec<SeatNumber>>> {
        let contenders: Vec<&TablePlayer> =
            self.players.values().filter(|p| p.in_hand()).collect();
        if let [only] = contenders.as_slice() {
            return Ok(vec![vec![only.seat()]]);
        }

        let board = self.board.cards();
        let mut scored: Vec<(u32, SeatNumber)> = contenders
            .iter()
            .map(|p| -> TableResult<(u32, SeatNumber)> {
                let cards = p.cards().ok_or(TableError::NoCards(p.seat()))?;
                Ok((evaluator.evaluate(cards, &board).hand_score, p.seat()))
            })
            .collect::<TableResult<_>>()?;
        scored.sort_unstable();

        let mut ranked: Vec<Vec<SeatNumber>> = Vec::new();
        let mut last_score = None;
        for (score, seat) in scored {
            match ranked.last_mut() {
                Some(group) if last_score == Some(score) => group.push(seat),
                _ => ranked.push(vec![seat]),
            }
            last_score = Some(score);
        }
        Ok(ranked)
    }

    /// Pays every pot to the best ranked eligible seats and credits their
    /// stacks. Returns the winnings per seat.
    pub fn showdown(
        &mut self,
        ranked: &[Vec<SeatNumber>],
    ) -> TableResult<BTreeMap<SeatNumber, Chips>> {
        let payouts = self.pots.distribute(ranked)?;
        for (seat, amount) in &payouts {
            if let Some(player) = self.players.get_mut(seat) {
                player.win(*amount);
            }
            log::info!("seat {seat} wins {amount}");
        }
        for player in self.players.values_mut() {
            player.reset_for_new_street();
        }
        self.street = Street::Showdown;
        Ok(payouts)
    }

    pub fn showdown_with<E: HandEvaluator + ?Sized>(
        &mut self,
        evaluator: &E,
    ) -> TableResult<BTreeMap<SeatNumber, Chips>> {
        let ranked = self.rank_players(evaluator)?;
        self.showdown(&ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{Card, Combo};
    use crate::tournament::BlindLevel;

    fn pregame_table() -> Table {
        let mut table = Table::new();
        table.set_level(BlindLevel::new(4, 400));
        for (seat, stack) in [(1, 2000), (2, 2500), (6, 25000), (4, 120_327)] {
            table
                .sit(TablePlayer::new(seat, format!("p{seat}"), stack))
                .unwrap();
        }
        table.distribute_positions().unwrap();
        table
    }

    // === Pregame Tests ===

    #[test]
    fn test_post_pregame_odds() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();

        assert_eq!(table.pot(), 800);
        assert_eq!(table.current_pot().unwrap().highest_bet(), 400);
        assert_eq!(table.to_call(1).unwrap(), 0);
        assert_eq!(table.pot_odds(1).unwrap(), f64::INFINITY);
        assert_eq!(table.req_equity(1).unwrap(), 0.0);
        assert_eq!(table.current_bet(1).unwrap(), 400);
        assert_eq!(table.to_call(2).unwrap(), 400);
        assert_eq!(table.pot_odds(2).unwrap(), 2.0);
        assert_eq!(table.req_equity(2).unwrap(), 1.0 / 3.0);
        assert_eq!(table.current_bet(2).unwrap(), 0);
        assert_eq!(table.to_call(4).unwrap(), 400);
        assert_eq!(table.to_call(6).unwrap(), 200);
        assert_eq!(table.pot_odds(6).unwrap(), 4.0);
        assert_eq!(table.req_equity(6).unwrap(), 1.0 / 5.0);
        assert_eq!(table.current_bet(6).unwrap(), 200);
    }

    #[test]
    fn test_blinds_do_not_count_as_acting() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        assert_eq!(table.players_waiting(), vec![2, 4, 6, 1]);
    }

    #[test]
    fn test_post_pregame_twice_rejected() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        assert_eq!(table.post_pregame(), Err(TableError::BlindsAlreadyPosted));
    }

    #[test]
    fn test_post_pregame_needs_two_players() {
        let mut table = Table::new();
        table.sit(TablePlayer::new(1, "solo", 1000)).unwrap();
        assert_eq!(table.post_pregame(), Err(TableError::NotEnoughPlayers));
    }

    #[test]
    fn test_short_big_blind_posts_all_in() {
        let mut table = Table::new();
        table.set_level(BlindLevel::new(1, 400).with_ante(0));
        for (seat, stack) in [(1, 150), (2, 5000), (3, 5000)] {
            table
                .sit(TablePlayer::new(seat, format!("p{seat}"), stack))
                .unwrap();
        }
        table.post_pregame().unwrap();
        // Button on 2, small blind 3, big blind 1.
        assert!(table.player(1).unwrap().is_all_in());
        assert_eq!(table.pot(), 350);
        assert_eq!(table.pots().len(), 2);
        assert_eq!(table.pots()[0].cap(), Some(150));
        assert_eq!(table.pots()[1].value(), 50);
        assert_eq!(table.players_waiting(), vec![2, 3]);
    }

    // === Action Tests ===

    #[test]
    fn test_bet_above_stack_rejected() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        assert_eq!(
            table.bet(2, 4000),
            Err(TableError::BetExceedsStack {
                seat: 2,
                amount: 4000,
                stack: 2450
            })
        );
        assert_eq!(table.player(2).unwrap().stack(), 2450);
    }

    #[test]
    fn test_under_call_rejected() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        assert!(matches!(
            table.bet(2, 100),
            Err(TableError::BetBelowCall { to_call: 400, .. })
        ));
        assert!(matches!(table.check(2), Err(TableError::CannotCheck { .. })));
    }

    #[test]
    fn test_call_then_check_around() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        assert_eq!(table.call(2).unwrap(), 400);
        assert_eq!(table.call(4).unwrap(), 400);
        assert_eq!(table.call(6).unwrap(), 200);
        assert_eq!(table.players_waiting(), vec![1]);
        table.check(1).unwrap();
        assert!(table.players_waiting().is_empty());
        assert_eq!(table.pot(), 1800);
    }

    #[test]
    fn test_raise_reopens_action() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        table.call(2).unwrap();
        table.raise_to(4, 1200).unwrap();
        assert_eq!(table.highest_bet(), 1200);
        assert_eq!(table.players_waiting(), vec![2, 6, 1]);
        assert_eq!(
            table.raise_to(6, 1000),
            Err(TableError::RaiseTooSmall {
                target: 1000,
                highest: 1200
            })
        );
    }

    #[test]
    fn test_folded_player_cannot_act() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        table.apply(2, Action::Fold).unwrap();
        assert_eq!(table.apply(2, Action::Call), Err(TableError::CannotAct(2)));
        assert!(!table.pots()[0].is_eligible(2));
        assert_eq!(table.players_waiting(), vec![4, 6, 1]);
    }

    #[test]
    fn test_unknown_seat() {
        let mut table = pregame_table();
        assert_eq!(table.call(3), Err(TableError::UnknownSeat(3)));
        assert_eq!(table.to_call(9), Err(TableError::UnknownSeat(9)));
    }

    // === Showdown Tests ===

    fn by_high_card(hole: Combo, _board: &[Card]) -> HandEvaluation {
        HandEvaluation {
            hand_score: 15 - u32::from(hole.high().rank.value()),
            rank_class: 9,
            class_str: "High Card".to_string(),
        }
    }

    #[test]
    fn test_showdown_with_evaluator() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        table.call(2).unwrap();
        table.fold(4).unwrap();
        table.call(6).unwrap();
        table.check(1).unwrap();
        table.deal_hole_cards(1, Some("KsQs".parse().unwrap())).unwrap();
        table.deal_hole_cards(2, Some("AcJd".parse().unwrap())).unwrap();
        table.deal_hole_cards(6, Some("7c2d".parse().unwrap())).unwrap();

        assert_eq!(table.evaluate(2, &by_high_card).unwrap().hand_score, 1);
        assert_eq!(
            table.rank_players(&by_high_card).unwrap(),
            vec![vec![2], vec![1], vec![6]]
        );

        let payouts = table.showdown_with(&by_high_card).unwrap();
        assert_eq!(payouts[&2], 1400);
        assert_eq!(table.player(2).unwrap().stack(), 2500 - 450 + 1400);
        assert_eq!(table.pot(), 0);
        assert_eq!(table.street(), Street::Showdown);
    }

    #[test]
    fn test_lone_player_wins_uncontested() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        table.fold(2).unwrap();
        table.fold(4).unwrap();
        table.fold(6).unwrap();
        assert_eq!(table.rank_players(&by_high_card).unwrap(), vec![vec![1]]);
        let payouts = table.showdown_with(&by_high_card).unwrap();
        assert_eq!(payouts[&1], 800);
    }

    #[test]
    fn test_contender_without_cards_blocks_showdown() {
        let mut table = pregame_table();
        table.post_pregame().unwrap();
        table.deal_hole_cards(2, Some("AcJd".parse().unwrap())).unwrap();
        table.call(2).unwrap();
        table.fold(4).unwrap();
        table.fold(6).unwrap();

        assert_eq!(
            table.rank_players(&by_high_card),
            Err(TableError::NoCards(1))
        );
        assert_eq!(
            table.showdown_with(&by_high_card),
            Err(TableError::NoCards(1))
        );
        assert_eq!(table.pot(), 1200);
        assert_eq!(table.player(2).unwrap().stack(), 2050);
    }

    #[test]
    fn test_evaluate_without_cards() {
        let table = pregame_table();
        assert_eq!(
            table.evaluate(1, &by_high_card),
            Err(TableError::NoCards(1))
        );
    }
}
