//! Table orchestration.
//!
//! A [`Table`] owns the board, the deck and the pots, and tracks the seated
//! players through the betting streets of a hand:
//! - Seating, sitting out and leaving
//! - Button placement, positions and acting order ([`order`])
//! - Blinds, antes, bets and showdown payouts ([`betting`])
//! - Community card draws, explicit or random
//!
//! ## Example
//!
//! ```
//! use pkr_components::{Table, TablePlayer};
//!
//! let mut table = Table::new();
//! for (seat, name) in [(1, "toto"), (2, "tata"), (4, "tete"), (6, "titi")] {
//!     table.sit(TablePlayer::new(seat, name, 10_000)).unwrap();
//! }
//! assert_eq!(table.playing_order(), vec![2, 4, 6, 1]);
//! ```

pub mod betting;
pub mod config;
pub mod order;

pub use config::{ConfigError, ConfigResult, TableSettings};

use rand::{SeedableRng, rngs::StdRng};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use thiserror::Error;

use crate::{
    game::{
        board::{Board, BoardError},
        constants::{MAX_PLAYERS, MIN_PLAYERS},
        deck::{Deck, DeckError},
        entities::{Card, Chips, Combo, EntityError, SeatNumber, Street},
        player::TablePlayer,
        pot::{Pot, PotError, PotManager},
    },
    tournament::{BlindLevel, Tournament},
};

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error(transparent)]
    Entity(#[from] EntityError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Pot(#[from] PotError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("seat {seat} is outside 1..={max}")]
    SeatOutOfRange { seat: SeatNumber, max: usize },
    #[error("seat {0} is already taken")]
    SeatOccupied(SeatNumber),
    #[error("table is full")]
    TableFull,
    #[error("no player in seat {0}")]
    UnknownSeat(SeatNumber),
    #[error("seat {seat} is occupied, max players cannot drop to {max}")]
    SeatAboveMax { seat: SeatNumber, max: usize },
    #[error("at least 2 players must be dealt in")]
    NotEnoughPlayers,
    #[error("blinds were already posted this hand")]
    BlindsAlreadyPosted,
    #[error("cannot move to the {target} from the {street}")]
    WrongStreet { street: Street, target: Street },
    #[error("the {target} takes {expected} cards, got {got}")]
    WrongCardCount {
        target: Street,
        expected: usize,
        got: usize,
    },
    #[error("{0} was given twice")]
    DuplicateCard(Card),
    #[error("seat {0} cannot act")]
    CannotAct(SeatNumber),
    #[error("seat {seat} cannot put in {amount} with {stack} behind")]
    BetExceedsStack {
        seat: SeatNumber,
        amount: Chips,
        stack: Chips,
    },
    #[error("seat {seat} must put in at least {to_call}, got {amount}")]
    BetBelowCall {
        seat: SeatNumber,
        amount: Chips,
        to_call: Chips,
    },
    #[error("seat {seat} cannot check facing {to_call}")]
    CannotCheck { seat: SeatNumber, to_call: Chips },
    #[error("raise to {target} does not exceed the current bet of {highest}")]
    RaiseTooSmall { target: Chips, highest: Chips },
    #[error("seat {0} has no hole cards")]
    NoCards(SeatNumber),
    #[error("seat {0} already holds hole cards")]
    CardsAlreadyDealt(SeatNumber),
    #[error("{0} chips are still in the pots")]
    PotNotDistributed(Chips),
    #[error("a hand is in progress")]
    HandInProgress,
}

pub type TableResult<T> = Result<T, TableError>;

/// Where the table reads its blinds from.
#[derive(Clone, Debug)]
enum Blinds {
    Fixed(BlindLevel),
    Tournament(Tournament),
}

#[derive(Clone, Debug)]
pub struct Table {
    name: String,
    max_players: usize,
    players: BTreeMap<SeatNumber, TablePlayer>,
    board: Board,
    deck: Deck,
    pots: PotManager,
    street: Street,
    button: Option<SeatNumber>,
    /// Seats dealt into the current hand, fixed until the next hand.
    hand_seats: Option<Vec<SeatNumber>>,
    /// Seats that asked to sit back in while a hand was running.
    pending_sit_in: BTreeSet<SeatNumber>,
    blinds: Blinds,
    rng: StdRng,
    hands_played: u64,
}

impl Default for Table {
    fn default() -> Self {
        Self::build(TableSettings::default())
    }
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from validated settings. A seed makes every random
    /// draw reproducible.
    pub fn with_settings(settings: TableSettings) -> TableResult<Self> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    fn build(settings: TableSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            blinds: Blinds::Fixed(settings.blind_level()),
            name: settings.name,
            max_players: settings.max_players,
            players: BTreeMap::new(),
            board: Board::new(),
            deck: Deck::new(),
            pots: PotManager::new(),
            street: Street::Preflop,
            button: None,
            hand_seats: None,
            pending_sit_in: BTreeSet::new(),
            rng,
            hands_played: 0,
        }
    }

    // === Seating ===

    /// Seats a player. During a hand the player waits, sitting out, until
    /// the next one.
    pub fn sit(&mut self, mut player: TablePlayer) -> TableResult<()> {
        let seat = player.seat();
        if self.players.len() >= self.max_players {
            return Err(TableError::TableFull);
        }
        if !(1..=self.max_players).contains(&seat) {
            return Err(TableError::SeatOutOfRange {
                seat,
                max: self.max_players,
            });
        }
        if self.players.contains_key(&seat) {
            return Err(TableError::SeatOccupied(seat));
        }
        log::info!("{} sits at {} in seat {seat}", player.name(), self.name);
        if self.hand_seats.is_some() {
            player.sit_out();
            self.pending_sit_in.insert(seat);
        }
        self.players.insert(seat, player);
        Ok(())
    }

    /// Hands the player back. Their chips already in the pot stay there and
    /// their seat keeps its turn for the rest of the hand.
    pub fn remove_player(&mut self, seat: SeatNumber) -> TableResult<TablePlayer> {
        let player = self
            .players
            .remove(&seat)
            .ok_or(TableError::UnknownSeat(seat))?;
        self.pots.fold(seat);
        self.pending_sit_in.remove(&seat);
        log::info!("{} leaves seat {seat}", player.name());
        Ok(player)
    }

    /// Sits a player out. During a hand this folds them, and their seat
    /// keeps its place in the acting order.
    pub fn sit_out(&mut self, seat: SeatNumber) -> TableResult<()> {
        self.seated_mut(seat)?.sit_out();
        self.pots.fold(seat);
        self.pending_sit_in.remove(&seat);
        Ok(())
    }

    /// Brings a player back. During a hand they are dealt in from the next
    /// one.
    pub fn sit_in(&mut self, seat: SeatNumber) -> TableResult<()> {
        if !self.seated(seat)?.is_sitting_out() {
            return Ok(());
        }
        if self.hand_seats.is_some() {
            log::debug!("seat {seat} sits back in from the next hand");
            self.pending_sit_in.insert(seat);
            return Ok(());
        }
        self.seated_mut(seat)?.sit_in();
        Ok(())
    }

    pub fn set_max_players(&mut self, max_players: usize) -> TableResult<()> {
        if self.pots.total() > 0 {
            return Err(TableError::HandInProgress);
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&max_players) {
            return Err(ConfigError::MaxPlayers(max_players).into());
        }
        if let Some(&seat) = self.players.keys().next_back() {
            if seat > max_players {
                return Err(TableError::SeatAboveMax {
                    seat,
                    max: max_players,
                });
            }
        }
        self.max_players = max_players;
        Ok(())
    }

    pub(crate) fn seated(&self, seat: SeatNumber) -> TableResult<&TablePlayer> {
        self.players.get(&seat).ok_or(TableError::UnknownSeat(seat))
    }

    pub(crate) fn seated_mut(&mut self, seat: SeatNumber) -> TableResult<&mut TablePlayer> {
        self.players
            .get_mut(&seat)
            .ok_or(TableError::UnknownSeat(seat))
    }

    // === Blinds ===

    /// The blind level in force, read live from a bound tournament.
    #[must_use]
    pub fn level(&self) -> BlindLevel {
        match &self.blinds {
            Blinds::Fixed(level) => *level,
            Blinds::Tournament(tournament) => tournament.level(),
        }
    }

    /// Fixes the blind level, unbinding any tournament.
    pub fn set_level(&mut self, level: BlindLevel) {
        self.blinds = Blinds::Fixed(level);
    }

    /// Binds the blinds to a tournament's live level.
    pub fn add_tournament(&mut self, tournament: Tournament) {
        self.blinds = Blinds::Tournament(tournament);
    }

    #[must_use]
    pub fn tournament(&self) -> Option<&Tournament> {
        match &self.blinds {
            Blinds::Tournament(tournament) => Some(tournament),
            Blinds::Fixed(_) => None,
        }
    }

    // === Cards ===

    /// Gives `seat` its hole cards, either the ones named or two random
    /// cards from the deck.
    pub fn deal_hole_cards(&mut self, seat: SeatNumber, cards: Option<Combo>) -> TableResult<Combo> {
        if self.seated(seat)?.cards().is_some() {
            return Err(TableError::CardsAlreadyDealt(seat));
        }
        let combo = match cards {
            Some(combo) => {
                for card in combo.cards() {
                    if !self.deck.contains(&card) {
                        return Err(DeckError::NotInDeck(card).into());
                    }
                }
                for card in combo.cards() {
                    self.deck.remove(card)?;
                }
                combo
            }
            None => {
                if self.deck.len() < 2 {
                    return Err(DeckError::Empty.into());
                }
                let a = self.deck.draw(&mut self.rng)?;
                let b = self.deck.draw(&mut self.rng)?;
                Combo::new(a, b)?
            }
        };
        self.seated_mut(seat)?.deal(combo);
        log::debug!("seat {seat} dealt {combo}");
        Ok(combo)
    }

    /// Deals the flop. Pass three cards, or none to draw them at random.
    pub fn draw_flop(&mut self, cards: &[Card]) -> TableResult<Vec<Card>> {
        self.draw_street(Street::Flop, cards)
    }

    /// Deals the turn. Pass one card, or none to draw it at random.
    pub fn draw_turn(&mut self, cards: &[Card]) -> TableResult<Vec<Card>> {
        self.draw_street(Street::Turn, cards)
    }

    /// Deals the river. Pass one card, or none to draw it at random.
    pub fn draw_river(&mut self, cards: &[Card]) -> TableResult<Vec<Card>> {
        self.draw_street(Street::River, cards)
    }

    fn draw_street(&mut self, target: Street, cards: &[Card]) -> TableResult<Vec<Card>> {
        if self.street.next() != Some(target) {
            return Err(TableError::WrongStreet {
                street: self.street,
                target,
            });
        }
        let expected = target.cards_dealt();

        let drawn = if cards.is_empty() {
            if self.deck.len() < expected {
                return Err(DeckError::Empty.into());
            }
            let mut drawn = Vec::with_capacity(expected);
            for _ in 0..expected {
                drawn.push(self.deck.draw(&mut self.rng)?);
            }
            drawn
        } else {
            if cards.len() != expected {
                return Err(TableError::WrongCardCount {
                    target,
                    expected,
                    got: cards.len(),
                });
            }
            let mut seen = HashSet::with_capacity(expected);
            for card in cards {
                if !seen.insert(*card) {
                    return Err(TableError::DuplicateCard(*card));
                }
                self.board.check_addable(*card)?;
                if !self.deck.contains(card) {
                    return Err(DeckError::NotInDeck(*card).into());
                }
            }
            for card in cards {
                self.deck.remove(*card)?;
            }
            cards.to_vec()
        };

        for card in &drawn {
            self.board.add(*card)?;
        }
        self.close_street(target);
        log::debug!("{target} dealt: {}", self.board);
        Ok(drawn)
    }

    /// Ends the river betting and moves to showdown.
    pub fn go_to_showdown(&mut self) -> TableResult<()> {
        if self.street != Street::River {
            return Err(TableError::WrongStreet {
                street: self.street,
                target: Street::Showdown,
            });
        }
        self.close_street(Street::Showdown);
        Ok(())
    }

    fn close_street(&mut self, next: Street) {
        for player in self.players.values_mut() {
            player.reset_for_new_street();
        }
        self.pots.end_street();
        self.street = next;
    }

    // === Hands ===

    /// Clears the table for the next hand and moves the button. Players
    /// with no chips left are unseated and returned. Fails while chips are
    /// still in the pots.
    pub fn new_hand(&mut self) -> TableResult<Vec<TablePlayer>> {
        let undistributed = self.pots.total();
        if undistributed > 0 {
            return Err(TableError::PotNotDistributed(undistributed));
        }
        let busted: Vec<SeatNumber> = self
            .players
            .iter()
            .filter(|(_, p)| p.is_busted())
            .map(|(seat, _)| *seat)
            .collect();
        let removed: Vec<TablePlayer> = busted
            .iter()
            .filter_map(|seat| self.players.remove(seat))
            .collect();
        for player in &removed {
            log::info!("{} busted out of seat {}", player.name(), player.seat());
        }

        self.board.clear();
        self.deck.reset();
        self.pots.reset();
        self.street = Street::Preflop;
        self.hand_seats = None;
        for seat in std::mem::take(&mut self.pending_sit_in) {
            if let Some(player) = self.players.get_mut(&seat) {
                player.sit_in();
            }
        }
        for player in self.players.values_mut() {
            player.reset_for_new_hand();
        }

        let button = match self.button {
            Some(_) => self.move_button(),
            None => self.distribute_positions(),
        };
        self.hand_seats = Some(self.dealt_in());
        self.hands_played += 1;
        match button {
            Ok(seat) => log::info!(
                "hand #{} at {}: button on seat {seat}",
                self.hands_played,
                self.name
            ),
            Err(_) => log::info!(
                "hand #{} at {}: not enough players for a button",
                self.hands_played,
                self.name
            ),
        }
        Ok(removed)
    }

    // === Accessors ===

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Total chips across every pot.
    #[must_use]
    pub fn pot(&self) -> Chips {
        self.pots.total()
    }

    #[must_use]
    pub fn pots(&self) -> &[Pot] {
        self.pots.pots()
    }

    #[must_use]
    pub fn current_pot(&self) -> Option<&Pot> {
        self.pots.current()
    }

    #[must_use]
    pub fn players(&self) -> &BTreeMap<SeatNumber, TablePlayer> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, seat: SeatNumber) -> Option<&TablePlayer> {
        self.players.get(&seat)
    }

    #[must_use]
    pub fn street(&self) -> Street {
        self.street
    }

    #[must_use]
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    #[must_use]
    pub fn button(&self) -> Option<SeatNumber> {
        self.button
    }

    #[must_use]
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }
}

impl TryFrom<TableSettings> for Table {
    type Error = TableError;

    fn try_from(settings: TableSettings) -> Result<Self, Self::Error> {
        Self::with_settings(settings)
    }
}
