//! Community cards and the flop texture classifiers derived from them.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::{
    constants::{BOARD_SIZE, FLOP_SIZE},
    entities::{Card, Combo, EntityError},
};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BoardError {
    #[error(transparent)]
    Card(#[from] EntityError),
    #[error("{0} is already on the board")]
    DuplicateCard(Card),
    #[error("board already holds five cards")]
    Full,
    #[error("no card dealt in the {0} slot yet")]
    EmptySlot(BoardSlot),
    #[error("board index {0} is out of range")]
    OutOfRange(usize),
    #[error("unknown board slot {0:?}")]
    UnknownSlot(String),
    #[error("the flop is not complete ({0} of 3 cards)")]
    IncompleteFlop(usize),
}

pub type BoardResult<T> = Result<T, BoardError>;

/// Named community card slots, in dealing order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardSlot {
    #[serde(rename = "flop_1")]
    Flop1,
    #[serde(rename = "flop_2")]
    Flop2,
    #[serde(rename = "flop_3")]
    Flop3,
    Turn,
    River,
}

impl BoardSlot {
    pub const ALL: [Self; BOARD_SIZE] = [
        Self::Flop1,
        Self::Flop2,
        Self::Flop3,
        Self::Turn,
        Self::River,
    ];

    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Flop1 => "flop_1",
            Self::Flop2 => "flop_2",
            Self::Flop3 => "flop_3",
            Self::Turn => "turn",
            Self::River => "river",
        }
    }
}

impl FromStr for BoardSlot {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.name() == s)
            .ok_or_else(|| BoardError::UnknownSlot(s.to_string()))
    }
}

impl fmt::Display for BoardSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Every texture classifier of a flop, in one serializable record.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct BoardTexture {
    pub rainbow: bool,
    pub monotone: bool,
    pub triplet: bool,
    pub pair: bool,
    pub straightdraw: bool,
    pub gutshot: bool,
    pub flushdraw: bool,
}

/// The five community card slots.
///
/// Cards fill the slots strictly in order and never repeat. Texture
/// classifiers only ever look at the three flop slots.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Board {
    slots: [Option<Card>; BOARD_SIZE],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from up to five cards, validated exactly like
    /// [`Board::add`].
    pub fn from_cards(cards: &[Card]) -> BoardResult<Self> {
        let mut board = Self::new();
        for card in cards {
            board.add(*card)?;
        }
        Ok(board)
    }

    /// Builds a board from card identifiers such as `["As", "Ad", "Tc"]`.
    pub fn from_identifiers<S: AsRef<str>>(identifiers: &[S]) -> BoardResult<Self> {
        let cards = identifiers
            .iter()
            .map(|id| id.as_ref().parse::<Card>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cards(&cards)
    }

    /// Puts `card` in the first empty slot.
    pub fn add(&mut self, card: Card) -> BoardResult<BoardSlot> {
        self.check_addable(card)?;
        let index = self.len();
        self.slots[index] = Some(card);
        Ok(BoardSlot::ALL[index])
    }

    /// Checks that `card` could be added without changing the board.
    pub fn check_addable(&self, card: Card) -> BoardResult<()> {
        if self.contains(&card) {
            return Err(BoardError::DuplicateCard(card));
        }
        if self.is_full() {
            return Err(BoardError::Full);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.slots = [None; BOARD_SIZE];
    }

    pub fn card(&self, slot: BoardSlot) -> BoardResult<Card> {
        self.slots[slot.index()].ok_or(BoardError::EmptySlot(slot))
    }

    pub fn card_at(&self, index: usize) -> BoardResult<Card> {
        let slot = BoardSlot::ALL
            .get(index)
            .copied()
            .ok_or(BoardError::OutOfRange(index))?;
        self.card(slot)
    }

    /// Resolves a slot by name (`"flop_1"` .. `"river"`).
    pub fn slot_named(&self, name: &str) -> BoardResult<Card> {
        self.card(name.parse()?)
    }

    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.slots.iter().flatten().copied().collect()
    }

    /// The cards present in the three flop slots.
    #[must_use]
    pub fn flop(&self) -> Vec<Card> {
        self.slots[..FLOP_SIZE].iter().flatten().copied().collect()
    }

    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.slots.iter().flatten().any(|c| c == card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == BOARD_SIZE
    }

    fn full_flop(&self) -> BoardResult<[Card; FLOP_SIZE]> {
        match self.flop().as_slice() {
            [a, b, c] => Ok([*a, *b, *c]),
            partial => Err(BoardError::IncompleteFlop(partial.len())),
        }
    }

    /// The three two-card combinations of the flop, ordered
    /// (first, second), (first, third), (second, third).
    pub fn flop_combinations(&self) -> BoardResult<[Combo; 3]> {
        let [a, b, c] = self.full_flop()?;
        Ok([Combo::new(a, b)?, Combo::new(a, c)?, Combo::new(b, c)?])
    }

    /// Absolute rank gaps between the flop cards, in the same pair order as
    /// [`Board::flop_combinations`].
    pub fn differences(&self) -> BoardResult<(u8, u8, u8)> {
        let [a, b, c] = self.full_flop()?;
        Ok((a.rank_gap(&b), a.rank_gap(&c), b.rank_gap(&c)))
    }

    fn flop_pairs(&self) -> Vec<(Card, Card)> {
        let flop = self.flop();
        let mut pairs = Vec::with_capacity(3);
        for (i, a) in flop.iter().enumerate() {
            for b in &flop[i + 1..] {
                pairs.push((*a, *b));
            }
        }
        pairs
    }

    /// True when some pair of flop cards sits `min..=max` ranks apart,
    /// with the ace allowed to play either high or low.
    fn has_connected_pair(&self, max: u8) -> bool {
        self.flop_pairs().iter().any(|(a, b)| {
            let high = a.rank.value().abs_diff(b.rank.value());
            let low = a.rank.low_value().abs_diff(b.rank.low_value());
            (1..=max).contains(&high) || (1..=max).contains(&low)
        })
    }

    #[must_use]
    pub fn is_rainbow(&self) -> bool {
        self.flop_pairs().iter().all(|(a, b)| a.suit != b.suit)
    }

    #[must_use]
    pub fn is_monotone(&self) -> bool {
        let flop = self.flop();
        flop.len() >= 2 && flop.iter().all(|c| c.suit == flop[0].suit)
    }

    #[must_use]
    pub fn is_triplet(&self) -> bool {
        let flop = self.flop();
        flop.len() == FLOP_SIZE && flop.iter().all(|c| c.rank == flop[0].rank)
    }

    #[must_use]
    pub fn has_pair(&self) -> bool {
        self.flop_pairs().iter().any(|(a, b)| a.rank == b.rank)
    }

    #[must_use]
    pub fn has_straightdraw(&self) -> bool {
        self.has_connected_pair(3)
    }

    #[must_use]
    pub fn has_gutshot(&self) -> bool {
        self.has_connected_pair(4)
    }

    #[must_use]
    pub fn has_flushdraw(&self) -> bool {
        self.flop_pairs().iter().any(|(a, b)| a.suit == b.suit)
    }

    #[must_use]
    pub fn texture(&self) -> BoardTexture {
        BoardTexture {
            rainbow: self.is_rainbow(),
            monotone: self.is_monotone(),
            triplet: self.is_triplet(),
            pair: self.has_pair(),
            straightdraw: self.has_straightdraw(),
            gutshot: self.has_gutshot(),
            flushdraw: self.has_flushdraw(),
        }
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cards(&Card::parse(s)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = self
            .cards()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "[{repr}]")
    }
}
