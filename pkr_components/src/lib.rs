//! # pkr_components
//!
//! Poker table state model for hand-history replay and analytics.
//!
//! The crate rebuilds the state of a Texas Hold'em table from already
//! structured actions: community cards, seated players, pots and side pots,
//! betting streets and acting order. Derived values such as flop texture,
//! amount to call, pot odds and required equity are read off the model.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, board texture, deck, players, pots and the hand
//!   evaluation seam
//! - [`table`]: the [`Table`] orchestrating a hand street by street
//! - [`tournament`]: blind levels and a shared [`Tournament`] handle
//!
//! ## Example
//!
//! ```
//! use pkr_components::{Board, Table, TablePlayer};
//!
//! let board: Board = "QdAdJc".parse().unwrap();
//! assert!(board.has_straightdraw());
//! assert_eq!(board.differences().unwrap(), (2, 1, 3));
//!
//! let mut table = Table::new();
//! table.sit(TablePlayer::new(1, "toto", 2000)).unwrap();
//! table.sit(TablePlayer::new(2, "tata", 2500)).unwrap();
//! table.post_pregame().unwrap();
//! assert_eq!(table.pot(), 150);
//! ```

/// Cards, board, deck, players and pots.
pub mod game;
pub use game::{
    Action, ActionMove, Board, BoardError, BoardSlot, BoardTexture, Card, Chips, Combo, Deck,
    DeckError, EntityError, HandEvaluation, HandEvaluator, PlayerStatus, Position, Pot, PotError,
    PotManager, Rank, SeatNumber, Street, Suit, TablePlayer,
    constants::{self, DEFAULT_MAX_PLAYERS, MAX_PLAYERS, MIN_PLAYERS},
};

/// Table orchestration.
pub mod table;
pub use table::{ConfigError, Table, TableError, TableResult, TableSettings};

/// Blind levels and tournament handles.
pub mod tournament;
pub use tournament::{BlindLevel, BlindStructure, Tournament};
