use rand::Rng;
use thiserror::Error;

use super::{constants::DECK_SIZE, entities::Card};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DeckError {
    #[error("{0} is not in the deck")]
    NotInDeck(Card),
    #[error("the deck is empty")]
    Empty,
}

pub type DeckResult<T> = Result<T, DeckError>;

/// The cards not yet dealt this hand.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            cards: Card::all().collect(),
        }
    }
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a specific card out of the deck.
    pub fn remove(&mut self, card: Card) -> DeckResult<Card> {
        let idx = self
            .cards
            .iter()
            .position(|c| *c == card)
            .ok_or(DeckError::NotInDeck(card))?;
        Ok(self.cards.swap_remove(idx))
    }

    /// Takes a uniformly random card out of the deck.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DeckResult<Card> {
        if self.cards.is_empty() {
            return Err(DeckError::Empty);
        }
        let idx = rng.random_range(0..self.cards.len());
        Ok(self.cards.swap_remove(idx))
    }

    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.extend(Card::all());
    }

    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards already dealt out of the deck.
    #[must_use]
    pub fn dealt(&self) -> usize {
        DECK_SIZE - self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn test_deck_default_has_52_unique_cards() {
        let deck = Deck::default();
        assert_eq!(deck.len(), DECK_SIZE);
        let unique: HashSet<Card> = deck.cards.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_deck_remove() {
        let mut deck = Deck::new();
        let card: Card = "As".parse().unwrap();
        assert_eq!(deck.remove(card).unwrap(), card);
        assert!(!deck.contains(&card));
        assert_eq!(deck.dealt(), 1);
        assert_eq!(deck.remove(card), Err(DeckError::NotInDeck(card)));
    }

    #[test]
    fn test_deck_draw_exhausts() {
        let mut deck = Deck::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..DECK_SIZE {
            assert!(seen.insert(deck.draw(&mut rng).unwrap()));
        }
        assert!(deck.is_empty());
        assert_eq!(deck.draw(&mut rng), Err(DeckError::Empty));
    }

    #[test]
    fn test_deck_draw_is_seeded() {
        let mut a = Deck::new();
        let mut b = Deck::new();
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        for _ in 0..5 {
            assert_eq!(a.draw(&mut rng_a), b.draw(&mut rng_b));
        }
    }

    #[test]
    fn test_deck_reset() {
        let mut deck = Deck::new();
        deck.remove("Kd".parse().unwrap()).unwrap();
        deck.reset();
        assert_eq!(deck.len(), DECK_SIZE);
        assert!(deck.contains(&"Kd".parse().unwrap()));
    }
}
