//! Table building blocks.
//!
//! This module provides the value types and per-hand containers a table is
//! made of:
//! - Cards, combos and the named categories (streets, positions, moves)
//! - The community board and its flop texture classifiers
//! - The deck, seated players and the side pot manager
//! - The hand evaluation seam used at showdown

pub mod board;
pub mod constants;
pub mod deck;
pub mod entities;
pub mod evaluation;
pub mod player;
pub mod pot;

pub use board::{Board, BoardError, BoardResult, BoardSlot, BoardTexture};
pub use deck::{Deck, DeckError, DeckResult};
pub use entities::{
    Action, ActionMove, Card, Chips, Combo, EntityError, EntityResult, Position, Rank,
    SeatNumber, Street, Suit,
};
pub use evaluation::{HandEvaluation, HandEvaluator};
pub use player::{PlayerStatus, TablePlayer};
pub use pot::{Pot, PotError, PotManager, PotResult};
