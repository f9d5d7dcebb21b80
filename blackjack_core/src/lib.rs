//! Core engine for a blackjack table: hand valuation under the soft/hard ace
//! rule, transaction-logged ledgers, player/dealer actors with split
//! bookkeeping, the round state machine and the settlement rules.
//!
//! The engine is fully synchronous and deterministic given its two
//! collaborators: a [`shoe::CardSource`] that yields cards and a
//! [`round::InputHandler`] that supplies validated player decisions. All
//! rendering is left to consumers of [`round::RoundState`] snapshots.

pub mod actor;
pub mod card;
pub mod error;
pub mod hand;
pub mod ledger;
pub mod round;
pub mod settlement;
pub mod shoe;

pub mod prelude {
    pub use crate::actor::{Actor, Role, RoundHistory, RoundRecord};
    pub use crate::card::{Card, Rank, Suit, FULL_DECK, RANKS, SUITS};
    pub use crate::error::GameError;
    pub use crate::hand::Hand;
    pub use crate::ledger::{Ledger, Transaction};
    pub use crate::round::{
        Action, HandSnapshot, InputHandler, Round, RoundPhase, RoundState, TableConfig,
    };
    pub use crate::settlement::{
        determine_winner, settle_bets, settle_insurance, Outcome, BLACKJACK_PAYOUT,
        INSURANCE_PAYOUT, STANDARD_PAYOUT,
    };
    pub use crate::shoe::{CardSource, Shoe, DEFAULT_REFRESH_THRESHOLD};
}

pub use prelude::*;
