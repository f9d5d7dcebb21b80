//! A blackjack hand: ordered cards, the soft/hard ace valuation, terminal
//! flags, and the hand's own bet and insurance ledgers.

use crate::card::{Card, Rank};
use crate::ledger::Ledger;

/// A single hand, created at deal time or by a split and discarded when the
/// round ends. Cards are append-only while the round runs.
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<Card>,
    elevated_aces: u8,
    value: u8,
    pub has_blackjack: bool,
    pub has_stood: bool,
    pub has_busted: bool,
    /// The ledger tracking this hand's wagered amount.
    pub bet: Ledger,
    /// The ledger tracking any insurance side-bet riding on this hand.
    pub insurance: Ledger,
}

impl Hand {
    /// Associated function to create a new `Hand` with the given starting
    /// cards and a bet ledger seeded at `bet`.
    pub fn new(starting_cards: Vec<Card>, bet: f32) -> Hand {
        let mut hand = Hand {
            cards: starting_cards,
            elevated_aces: 0,
            value: 0,
            has_blackjack: false,
            has_stood: false,
            has_busted: false,
            bet: Ledger::new(bet),
            insurance: Ledger::default(),
        };
        hand.recount_aces();
        hand.update_value();
        hand
    }

    /// Getter method for the cards in the hand.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The hand's current value under the soft/hard ace rule: the best legal
    /// total not exceeding 21 if one exists, otherwise the minimal bust total.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Method for appending a card. Recounts the aces, revalues the hand and
    /// re-evaluates the bust flags. Returns the new hand value.
    pub fn add_card(&mut self, card: Card) -> u8 {
        self.cards.push(card);
        self.recount_aces();
        self.update_value();
        self.check_if_busted();
        self.value
    }

    /// Method that posts an amount to the bet ledger. Zero amounts are
    /// skipped. Returns the new bet balance.
    pub fn add_bet(&mut self, name: &str, amount: f32) -> f32 {
        if amount != 0.0 {
            self.bet.add_transaction(name, amount);
        }
        self.bet.balance()
    }

    /// Method that posts an amount to the insurance ledger. Zero amounts are
    /// skipped. Returns the new insurance balance.
    pub fn add_insurance(&mut self, name: &str, amount: f32) -> f32 {
        if amount != 0.0 {
            self.insurance.add_transaction(name, amount);
        }
        self.insurance.balance()
    }

    /// Method for doubling down: posts a bet transaction equal to the current
    /// bet balance, takes exactly one more card, and ends the hand's turn
    /// whatever the outcome. Returns the new hand value.
    pub fn double_down(&mut self, card: Card) -> u8 {
        let current_bet = self.bet.balance();
        self.add_bet("Double Down", current_bet);
        let value = self.add_card(card);
        self.has_stood = true;
        value
    }

    /// Method that marks the hand busted (and therefore stood) once its value
    /// exceeds 21. Returns the bust flag.
    pub fn check_if_busted(&mut self) -> bool {
        if self.value > 21 {
            self.has_busted = true;
            self.has_stood = true;
        }
        self.has_busted
    }

    // Every ace in the hand starts elevated whenever the card composition
    // changes; update_value then devalues them one at a time as needed.
    fn recount_aces(&mut self) {
        self.elevated_aces = self
            .cards
            .iter()
            .filter(|card| card.rank == Rank::Ace)
            .count() as u8;
    }

    fn update_value(&mut self) {
        let mut current_value: u8 = self.cards.iter().map(|card| card.value()).sum();
        current_value += self.elevated_aces * 10;
        while current_value > 21 && self.elevated_aces > 0 {
            current_value -= 10;
            self.elevated_aces -= 1;
        }
        self.value = current_value;
    }
}
