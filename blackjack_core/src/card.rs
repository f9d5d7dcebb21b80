//! The card model: ranks, suits and the immutable playing card itself.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The thirteen card ranks, ace lowest. The ordinal is only used for equality
/// and deck completeness, never directly as a blackjack value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
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
}

/// All ranks in ordinal order, used when building a fresh deck.
pub const RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

impl Rank {
    /// The rank's position in the total order, ace lowest at 1.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The four suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

/// All suits, used when building a fresh deck.
pub const SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
        };
        write!(f, "{}", name)
    }
}

/// A single playing card. Identity is the (rank, suit) pair; a full set has
/// exactly 52 distinct cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Associated function to create a new `Card`.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// The card's base blackjack value: face cards count 10, the ace counts 1
    /// here and is elevated to 11 by the hand when legal.
    pub fn value(&self) -> u8 {
        u8::min(self.rank.ordinal(), 10)
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

lazy_static! {
    /// The canonical ordered 52-card set, one card per (rank, suit) pair.
    pub static ref FULL_DECK: Vec<Card> = {
        let mut cards = Vec::with_capacity(52);
        for suit in SUITS {
            for rank in RANKS {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    };
}
