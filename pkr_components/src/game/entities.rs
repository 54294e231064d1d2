use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt::{self},
    str::FromStr,
    sync::LazyLock,
};
use thiserror::Error;

/// Errors raised while building cards or resolving named categories.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EntityError {
    #[error("invalid card identifier {0:?}: expected rank + suit, e.g. \"As\"")]
    InvalidCard(String),
    #[error("invalid rank {0:?}")]
    InvalidRank(char),
    #[error("invalid suit {0:?}")]
    InvalidSuit(char),
    #[error("a combo needs two distinct cards, got {0} twice")]
    DuplicateCard(Card),
    #[error("unknown {kind} name {name:?}")]
    UnknownName { kind: &'static str, name: String },
}

pub type EntityResult<T> = Result<T, EntityError>;

/// Type alias for whole chips. Stacks, bets and pots are all counted in
/// chips.
pub type Chips = u32;

/// Seat numbers are 1-based, matching how hand histories label seats.
pub type SeatNumber = usize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Diamond, Self::Heart, Self::Spade];

    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Club => '♣',
            Self::Diamond => '♦',
            Self::Heart => '♥',
            Self::Spade => '♠',
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = EntityError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'c' | 'C' | '♣' => Ok(Self::Club),
            'd' | 'D' | '♦' => Ok(Self::Diamond),
            'h' | 'H' | '♥' => Ok(Self::Heart),
            's' | 'S' | '♠' => Ok(Self::Spade),
            other => Err(EntityError::InvalidSuit(other)),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "c",
            Self::Diamond => "d",
            Self::Heart => "h",
            Self::Spade => "s",
        };
        write!(f, "{repr}")
    }
}

/// Card ranks ordered from deuce to ace. The discriminant is the rank value
/// used for gap arithmetic (ace = 14).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Rank value, deuce = 2 through ace = 14.
    #[must_use]
    pub const fn value(&self) -> u8 {
        *self as u8
    }

    /// Rank value with the ace playing low (ace = 1).
    #[must_use]
    pub const fn low_value(&self) -> u8 {
        match self {
            Self::Ace => 1,
            other => other.value(),
        }
    }

    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Ten => 'T',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Ace => 'A',
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = EntityError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|rank| rank.symbol() == c.to_ascii_uppercase())
            .ok_or(EntityError::InvalidRank(c))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single playing card. Ordering is by rank first, then suit.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Compares two cards by rank alone, ignoring suits.
    #[must_use]
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }

    /// Absolute rank distance between two cards (ace = 14).
    #[must_use]
    pub fn rank_gap(&self, other: &Self) -> u8 {
        self.rank.value().abs_diff(other.rank.value())
    }

    /// The 52 cards of a standard deck in rank-then-suit order.
    pub fn all() -> impl Iterator<Item = Self> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Self::new(rank, suit)))
    }

    /// Parses concatenated card identifiers such as `"AsKd Tc"`.
    /// Whitespace is ignored.
    pub fn parse(s: &str) -> EntityResult<Vec<Self>> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        chars
            .chunks(2)
            .map(|pair| pair.iter().collect::<String>().parse())
            .collect()
    }
}

impl FromStr for Card {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => {
                Ok(Self::new(Rank::try_from(rank)?, Suit::try_from(suit)?))
            }
            _ => Err(EntityError::InvalidCard(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Card {
    type Error = EntityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Two distinct cards, e.g. a player's hole cards or a pair of flop cards.
/// The higher card is always stored first so `AsAd` and `AdAs` are equal.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Combo {
    high: Card,
    low: Card,
}

impl Combo {
    pub fn new(a: Card, b: Card) -> EntityResult<Self> {
        match a.cmp(&b) {
            Ordering::Equal => Err(EntityError::DuplicateCard(a)),
            Ordering::Greater => Ok(Self { high: a, low: b }),
            Ordering::Less => Ok(Self { high: b, low: a }),
        }
    }

    #[must_use]
    pub fn high(&self) -> Card {
        self.high
    }

    #[must_use]
    pub fn low(&self) -> Card {
        self.low
    }

    #[must_use]
    pub fn cards(&self) -> [Card; 2] {
        [self.high, self.low]
    }

    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.high == *card || self.low == *card
    }

    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.high.rank == self.low.rank
    }

    #[must_use]
    pub fn is_suited(&self) -> bool {
        self.high.suit == self.low.suit
    }
}

impl FromStr for Combo {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Card::parse(s)?.as_slice() {
            [a, b] => Self::new(*a, *b),
            _ => Err(EntityError::InvalidCard(s.to_string())),
        }
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

impl Serialize for Combo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Combo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Builds a lowercase alias -> canonical lookup from a static alias list.
fn alias_table<T: Copy>(entries: &[(T, &[&str])]) -> HashMap<String, T> {
    entries
        .iter()
        .flat_map(|(value, aliases)| {
            aliases
                .iter()
                .map(move |alias| (alias.to_lowercase(), *value))
        })
        .collect()
}

fn resolve<T: Copy>(
    table: &HashMap<String, T>,
    kind: &'static str,
    name: &str,
) -> EntityResult<T> {
    table
        .get(&name.trim().to_lowercase())
        .copied()
        .ok_or_else(|| EntityError::UnknownName {
            kind,
            name: name.to_string(),
        })
}

/// Betting rounds, in the order they are played.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

const STREET_ALIASES: &[(Street, &[&str])] = &[
    (
        Street::Preflop,
        &["PF", "PreFlop", "PREFLOP", "Préflop", "pre-flop"],
    ),
    (Street::Flop, &["F", "Flop"]),
    (Street::Turn, &["T", "Turn"]),
    (Street::River, &["R", "River"]),
    (Street::Showdown, &["SD", "ShowDown", "Showdown"]),
];

static STREET_NAMES: LazyLock<HashMap<String, Street>> =
    LazyLock::new(|| alias_table(STREET_ALIASES));

impl Street {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Preflop => "PF",
            Self::Flop => "F",
            Self::Turn => "T",
            Self::River => "R",
            Self::Showdown => "SD",
        }
    }

    #[must_use]
    pub const fn is_preflop(&self) -> bool {
        matches!(self, Self::Preflop)
    }

    /// The following street, or `None` at showdown.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Preflop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => Some(Self::Showdown),
            Self::Showdown => None,
        }
    }

    /// Community cards revealed when moving onto this street.
    #[must_use]
    pub const fn cards_dealt(&self) -> usize {
        match self {
            Self::Flop => 3,
            Self::Turn | Self::River => 1,
            Self::Preflop | Self::Showdown => 0,
        }
    }
}

impl FromStr for Street {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(&STREET_NAMES, "street", s)
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
        };
        write!(f, "{repr}")
    }
}

/// Table positions relative to the button.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Position {
    Utg,
    Utg1,
    Utg2,
    Utg3,
    /// Also known as the lojack.
    Utg4,
    Hj,
    Co,
    Btn,
    Sb,
    Bb,
}

const POSITION_ALIASES: &[(Position, &[&str])] = &[
    (Position::Utg, &["UTG", "under the gun"]),
    (Position::Utg1, &["UTG1", "utg+1", "utg + 1"]),
    (Position::Utg2, &["UTG2", "utg+2", "utg + 2"]),
    (Position::Utg3, &["UTG3", "utg+3", "utg + 3"]),
    (
        Position::Utg4,
        &["UTG4", "LJ", "lojack", "lowjack", "utg+4", "utg + 4"],
    ),
    (
        Position::Hj,
        &["HJ", "hijack", "highjack", "utg+5", "utg + 5"],
    ),
    (Position::Co, &["CO", "cutoff", "cut off", "cut-off"]),
    (Position::Btn, &["BTN", "bu", "button"]),
    (Position::Sb, &["SB", "small blind"]),
    (Position::Bb, &["BB", "big blind"]),
];

static POSITION_NAMES: LazyLock<HashMap<String, Position>> =
    LazyLock::new(|| alias_table(POSITION_ALIASES));

impl Position {
    /// Early positions handed out first after the big blind.
    pub(crate) const EARLY: [Self; 4] = [Self::Utg, Self::Utg1, Self::Utg2, Self::Utg3];
    /// Late positions, filled backwards from the button.
    pub(crate) const LATE: [Self; 3] = [Self::Utg4, Self::Hj, Self::Co];

    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Utg => "UTG",
            Self::Utg1 => "UTG1",
            Self::Utg2 => "UTG2",
            Self::Utg3 => "UTG3",
            Self::Utg4 => "LJ",
            Self::Hj => "HJ",
            Self::Co => "CO",
            Self::Btn => "BTN",
            Self::Sb => "SB",
            Self::Bb => "BB",
        }
    }

    #[must_use]
    pub const fn is_blind(&self) -> bool {
        matches!(self, Self::Sb | Self::Bb)
    }
}

impl FromStr for Position {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(&POSITION_NAMES, "position", s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Kinds of moves found in hand histories, including the non-betting ones.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ActionMove {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    Return,
    Win,
    Show,
    Muck,
}

const ACTION_MOVE_ALIASES: &[(ActionMove, &[&str])] = &[
    (ActionMove::Fold, &["F", "fold", "folds", "folded"]),
    (ActionMove::Check, &["X", "check", "checks"]),
    (ActionMove::Call, &["C", "call", "calls"]),
    (ActionMove::Bet, &["B", "bet", "bets"]),
    (ActionMove::Raise, &["R", "raise", "raises"]),
    (ActionMove::Return, &["O", "return", "returned", "uncalled"]),
    (ActionMove::Win, &["W", "win", "won", "collected"]),
    (ActionMove::Show, &["S", "show", "shows"]),
    (
        ActionMove::Muck,
        &[
            "M",
            "mucks",
            "don't show",
            "didn't show",
            "did not show",
            "does not show",
            "doesn't show",
        ],
    ),
];

static ACTION_MOVE_NAMES: LazyLock<HashMap<String, ActionMove>> =
    LazyLock::new(|| alias_table(ACTION_MOVE_ALIASES));

impl ActionMove {
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Fold => 'F',
            Self::Check => 'X',
            Self::Call => 'C',
            Self::Bet => 'B',
            Self::Raise => 'R',
            Self::Return => 'O',
            Self::Win => 'W',
            Self::Show => 'S',
            Self::Muck => 'M',
        }
    }

    #[must_use]
    pub const fn is_call_move(&self) -> bool {
        matches!(self, Self::Call | Self::Check)
    }

    #[must_use]
    pub const fn is_bet_move(&self) -> bool {
        matches!(self, Self::Bet | Self::Raise)
    }

    /// Moves that voluntarily put money in the pot.
    #[must_use]
    pub const fn is_vpip_move(&self) -> bool {
        matches!(self, Self::Call | Self::Bet | Self::Raise)
    }
}

impl FromStr for ActionMove {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(&ACTION_MOVE_NAMES, "action", s)
    }
}

impl fmt::Display for ActionMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A structured betting action applied to a table seat.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Put this many more chips in.
    Bet(Chips),
    /// Raise so the street contribution totals this many chips.
    RaiseTo(Chips),
    AllIn,
}

impl Action {
    #[must_use]
    pub const fn action_move(&self) -> ActionMove {
        match self {
            Self::Fold => ActionMove::Fold,
            Self::Check => ActionMove::Check,
            Self::Call => ActionMove::Call,
            Self::Bet(_) | Self::AllIn => ActionMove::Bet,
            Self::RaiseTo(_) => ActionMove::Raise,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "folds"),
            Self::Check => write!(f, "checks"),
            Self::Call => write!(f, "calls"),
            Self::Bet(amount) => write!(f, "bets {amount}"),
            Self::RaiseTo(amount) => write!(f, "raises to {amount}"),
            Self::AllIn => write!(f, "is all-in"),
        }
    }
}
