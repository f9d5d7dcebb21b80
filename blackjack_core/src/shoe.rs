//! The card source: the trait the round engine draws from, and the shuffled
//! multi-deck shoe that implements it.

use crate::card::{Card, FULL_DECK};
use crate::error::GameError;
use log::debug;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// The depth below which a shoe reshuffles itself.
pub const DEFAULT_REFRESH_THRESHOLD: f32 = 0.2;

/// The contract the round engine consumes cards through. Implementations own
/// all shuffle mechanics; the engine only draws and asks for depth.
pub trait CardSource {
    /// Draws the next card. Implementations reshuffle themselves when
    /// depleted; `EmptyShoe` is returned only when a draw is structurally
    /// impossible.
    fn draw(&mut self) -> Result<Card, GameError>;

    /// The fraction of the source's full capacity still undrawn, in [0, 1].
    fn remaining_fraction(&self) -> f32;

    /// Reshuffles if the source has fallen below its depth threshold.
    fn health_check(&mut self);
}

/// A shoe of one or more 52-card decks, shuffled together.
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    num_decks: usize,
    refresh_threshold: f32,
}

impl Shoe {
    /// Associated function to create a new shuffled `Shoe` holding
    /// `num_decks` full decks, with the default refresh threshold.
    pub fn new(num_decks: usize) -> Shoe {
        Shoe::with_threshold(num_decks, DEFAULT_REFRESH_THRESHOLD)
    }

    /// Associated function to create a new shuffled `Shoe` with an explicit
    /// refresh threshold.
    pub fn with_threshold(num_decks: usize, refresh_threshold: f32) -> Shoe {
        let mut shoe = Shoe {
            cards: Vec::with_capacity(num_decks * FULL_DECK.len()),
            num_decks,
            refresh_threshold,
        };
        shoe.reset();
        shoe
    }

    /// Method that restores the shoe to full capacity and shuffles it.
    pub fn reset(&mut self) {
        self.cards.clear();
        for _ in 0..self.num_decks {
            self.cards.extend(FULL_DECK.iter().copied());
        }
        self.cards.shuffle(&mut thread_rng());
    }

    fn capacity(&self) -> usize {
        self.num_decks * FULL_DECK.len()
    }
}

impl CardSource for Shoe {
    fn draw(&mut self) -> Result<Card, GameError> {
        if self.cards.is_empty() {
            debug!("shoe depleted, reshuffling {} deck(s)", self.num_decks);
            self.reset();
        }
        self.cards.pop().ok_or(GameError::EmptyShoe)
    }

    fn remaining_fraction(&self) -> f32 {
        if self.capacity() == 0 {
            return 0.0;
        }
        self.cards.len() as f32 / self.capacity() as f32
    }

    fn health_check(&mut self) {
        if self.remaining_fraction() < self.refresh_threshold {
            debug!(
                "shoe below {:.0}% threshold, reshuffling",
                self.refresh_threshold * 100.0
            );
            self.reset();
        }
    }
}
