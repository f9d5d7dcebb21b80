//! Settlement: pure outcome determination from final hands, and the payout
//! rules that move money between the two banks.

use crate::actor::Actor;
use crate::hand::Hand;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const STANDARD_PAYOUT: f32 = 1.0;
pub const BLACKJACK_PAYOUT: f32 = 1.5;
pub const INSURANCE_PAYOUT: f32 = 2.0;

/// How a settled hand ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    DealerWon,
    PlayerWon,
    PlayerWonBlackjack,
    Push,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::DealerWon => write!(f, "dealer won"),
            Outcome::PlayerWon => write!(f, "player won"),
            Outcome::PlayerWonBlackjack => write!(f, "player won with blackjack"),
            Outcome::Push => write!(f, "push"),
        }
    }
}

/// Determines the outcome of one player hand against the dealer's final hand.
///
/// A dealer blackjack beats everything except a player blackjack, which
/// pushes. A busted hand always loses; the player busted first, so a player
/// bust loses even when the dealer busts too. Otherwise the higher value
/// wins, with the player's win upgraded when the hand was a dealt blackjack.
pub fn determine_winner(dealer_hand: &Hand, player_hand: &Hand) -> Outcome {
    if dealer_hand.has_blackjack && !player_hand.has_blackjack {
        return Outcome::DealerWon;
    }
    if player_hand.has_busted {
        return Outcome::DealerWon;
    }
    if dealer_hand.has_busted {
        return if player_hand.has_blackjack {
            Outcome::PlayerWonBlackjack
        } else {
            Outcome::PlayerWon
        };
    }
    let dealer_result = dealer_hand.value();
    let player_result = player_hand.value();
    if player_result > dealer_result && player_hand.has_blackjack {
        Outcome::PlayerWonBlackjack
    } else if player_result > dealer_result {
        Outcome::PlayerWon
    } else if dealer_result > player_result {
        Outcome::DealerWon
    } else {
        Outcome::Push
    }
}

/// Settles one hand's bet onto the two banks and records the result in both
/// actors' histories. `bet` is the hand's final bet-ledger balance, which
/// already reflects any double-down.
pub fn settle_bets(dealer: &mut Actor, player: &mut Actor, bet: f32, outcome: Outcome) {
    match outcome {
        Outcome::DealerWon => {
            dealer.bank.add_transaction("Won Round", bet);
        }
        Outcome::PlayerWon => {
            dealer.bank.add_transaction("Lost Round", -bet * STANDARD_PAYOUT);
            player.bank.add_transaction("Won Round", bet * STANDARD_PAYOUT);
        }
        Outcome::PlayerWonBlackjack => {
            dealer.bank.add_transaction("Lost Round", -bet * BLACKJACK_PAYOUT);
            player.bank.add_transaction("Won Round", bet * BLACKJACK_PAYOUT);
        }
        Outcome::Push => {
            player.bank.add_transaction("Pushed Round", bet);
        }
    }
    dealer.history.add_round(outcome, bet);
    player.history.add_round(outcome, bet);
}

/// Resolves the insurance side-bet before the main settlement. With a dealer
/// blackjack the pot pays the player 2:1 and is charged against the dealer;
/// otherwise the pot is forfeited to the dealer. A zero pot is a no-op.
pub fn settle_insurance(dealer: &mut Actor, player: &mut Actor, pot: f32, dealer_blackjack: bool) {
    if pot <= 0.0 {
        return;
    }
    if dealer_blackjack {
        dealer
            .bank
            .add_transaction("Insurance Payout", -pot * INSURANCE_PAYOUT);
        player
            .bank
            .add_transaction("Insurance Payout", pot * INSURANCE_PAYOUT);
    } else {
        dealer.bank.add_transaction("Insurance Payout", pot);
    }
}
