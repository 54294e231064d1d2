//! Main pot and side pots.
//!
//! Chips enter through [`PotManager::add_contribution`]. Every pot may carry
//! a per-street cap, set when a player goes all-in inside it: chips above the
//! cap spill into the next pot, and the capped player never becomes eligible
//! for anything beyond it.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::entities::{Chips, SeatNumber};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PotError {
    #[error("pot {pot} has no eligible seat among the ranked players")]
    NoEligibleWinner { pot: usize },
}

pub type PotResult<T> = Result<T, PotError>;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Pot {
    value: Chips,
    /// Chips each seat put into this pot during the current street.
    contributions: BTreeMap<SeatNumber, Chips>,
    /// Per-seat limit for this street, set by an all-in.
    cap: Option<Chips>,
    eligible: BTreeSet<SeatNumber>,
    /// Capped pots close at the end of the street.
    closed: bool,
}

impl Pot {
    fn with_contributions(contributions: BTreeMap<SeatNumber, Chips>, cap: Option<Chips>) -> Self {
        Self {
            value: contributions.values().sum(),
            eligible: contributions.keys().copied().collect(),
            contributions,
            cap,
            closed: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> Chips {
        self.value
    }

    /// Largest single contribution into this pot on the current street.
    #[must_use]
    pub fn highest_bet(&self) -> Chips {
        self.contributions.values().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn contribution(&self, seat: SeatNumber) -> Chips {
        self.contributions.get(&seat).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn cap(&self) -> Option<Chips> {
        self.cap
    }

    #[must_use]
    pub fn eligible(&self) -> &BTreeSet<SeatNumber> {
        &self.eligible
    }

    #[must_use]
    pub fn is_eligible(&self, seat: SeatNumber) -> bool {
        self.eligible.contains(&seat)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Chips `seat` may still put in before reaching the cap.
    fn room_for(&self, seat: SeatNumber, wanted: Chips) -> Chips {
        match self.cap {
            Some(cap) => cap.saturating_sub(self.contribution(seat)).min(wanted),
            None => wanted,
        }
    }

    fn put(&mut self, seat: SeatNumber, amount: Chips) {
        *self.contributions.entry(seat).or_default() += amount;
        self.value += amount;
        self.eligible.insert(seat);
    }

    /// Moves every contribution above `level` out of this pot.
    fn split_above(&mut self, level: Chips) -> BTreeMap<SeatNumber, Chips> {
        let mut excess = BTreeMap::new();
        for (seat, contribution) in &mut self.contributions {
            if *contribution > level {
                excess.insert(*seat, *contribution - level);
                self.value -= *contribution - level;
                *contribution = level;
            }
        }
        excess
    }
}

/// Ordered list of pots for one hand. The first is the main pot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl Default for PotManager {
    fn default() -> Self {
        Self {
            pots: vec![Pot::default()],
        }
    }
}

impl PotManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` chips from `seat`. With `all_in` set, the pot the chips
    /// end up in is capped at the seat's level, moving any larger
    /// contributions into a new side pot right after it.
    pub fn add_contribution(&mut self, seat: SeatNumber, amount: Chips, all_in: bool) {
        let mut remaining = amount;
        let mut reached = None;

        for (idx, pot) in self.pots.iter_mut().enumerate() {
            if pot.closed || remaining == 0 {
                continue;
            }
            let put = pot.room_for(seat, remaining);
            if put > 0 {
                pot.put(seat, put);
                remaining -= put;
                reached = Some(idx);
            }
        }

        if remaining > 0 {
            let mut pot = Pot::default();
            pot.put(seat, remaining);
            self.pots.push(pot);
            reached = Some(self.pots.len() - 1);
        }

        if let (true, Some(idx)) = (all_in, reached) {
            self.cap_at(idx, seat);
        }
    }

    fn cap_at(&mut self, idx: usize, seat: SeatNumber) {
        let pot = &mut self.pots[idx];
        let level = pot.contribution(seat);
        let old_cap = pot.cap.replace(level);

        if pot.highest_bet() > level {
            let eligible = pot.eligible.clone();
            let excess = pot.split_above(level);
            let mut side = Pot::with_contributions(excess, old_cap.map(|cap| cap - level));
            side.eligible.retain(|s| eligible.contains(s));
            log::debug!(
                "seat {seat} all-in for {level}: splitting {} chips into a side pot",
                side.value
            );
            self.pots.insert(idx + 1, side);
        }
    }

    /// Removes `seat` from every pot's eligibility. Its chips stay in.
    pub fn fold(&mut self, seat: SeatNumber) {
        for pot in &mut self.pots {
            pot.eligible.remove(&seat);
        }
    }

    /// Closes the betting street: contributions are forgotten and capped
    /// pots stop accepting chips.
    pub fn end_street(&mut self) {
        for pot in &mut self.pots {
            pot.contributions.clear();
            if pot.cap.is_some() {
                pot.closed = true;
            }
        }
    }

    /// Splits every pot among the best ranked group eligible for it.
    ///
    /// `ranked` lists groups of tied seats, best first. Odd chips go one at a
    /// time to the lowest seats of the winning group. Nothing changes if some
    /// pot has no eligible seat in `ranked`.
    pub fn distribute(&mut self, ranked: &[Vec<SeatNumber>]) -> PotResult<BTreeMap<SeatNumber, Chips>> {
        let mut winners_by_pot = Vec::with_capacity(self.pots.len());
        for (idx, pot) in self.pots.iter().enumerate() {
            if pot.value == 0 {
                winners_by_pot.push(Vec::new());
                continue;
            }
            let winners: BTreeSet<SeatNumber> = ranked
                .iter()
                .map(|group| {
                    group
                        .iter()
                        .copied()
                        .filter(|s| pot.is_eligible(*s))
                        .collect::<BTreeSet<_>>()
                })
                .find(|group| !group.is_empty())
                .ok_or(PotError::NoEligibleWinner { pot: idx })?;
            winners_by_pot.push(winners.into_iter().collect::<Vec<_>>());
        }

        let mut payouts = BTreeMap::new();
        for (pot, winners) in self.pots.iter().zip(winners_by_pot) {
            if winners.is_empty() {
                continue;
            }
            let n = winners.len() as Chips;
            let share = pot.value / n;
            let odd = (pot.value % n) as usize;
            for (i, seat) in winners.into_iter().enumerate() {
                let amount = share + Chips::from(i < odd);
                *payouts.entry(seat).or_default() += amount;
            }
        }

        log::debug!("distributed {} chips: {payouts:?}", self.total());
        self.reset();
        Ok(payouts)
    }

    #[must_use]
    pub fn total(&self) -> Chips {
        self.pots.iter().map(Pot::value).sum()
    }

    #[must_use]
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// The pot currently receiving chips (the last one).
    #[must_use]
    pub fn current(&self) -> Option<&Pot> {
        self.pots.last()
    }

    pub fn reset(&mut self) {
        self.pots = vec![Pot::default()];
    }
}
