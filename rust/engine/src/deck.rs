use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card, Rank, Suit};
use crate::errors::GameError;

pub const DECK_SIZE: usize = 52;

/// A single-use shuffled deck.
///
/// The permutation is fixed at construction; cards are drawn front to back
/// and the deck can neither be reshuffled nor rewound. A new hand takes a
/// new deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Shuffles with entropy from the operating system.
    pub fn new() -> Self {
        let mut cards = full_deck();
        cards.shuffle(&mut rand::rng());
        Self { cards, position: 0 }
    }

    /// Same seed produces the same card order.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        Self { cards, position: 0 }
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let card = *self
            .cards
            .get(self.position)
            .ok_or(GameError::DeckExhausted)?;
        self.position += 1;
        Ok(card)
    }

    pub fn draw_n<const N: usize>(&mut self) -> Result<[Card; N], GameError> {
        if self.remaining() < N {
            return Err(GameError::DeckExhausted);
        }
        let mut out = [Card::new(Rank::Two, Suit::Clubs); N];
        for slot in out.iter_mut() {
            *slot = self.draw()?;
        }
        Ok(out)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
