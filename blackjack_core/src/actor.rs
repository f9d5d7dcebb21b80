//! Players and the dealer. Both own a bank ledger and a list of hands; only
//! players may split, so the two are variants of one `Actor` rather than a
//! hierarchy.

use crate::card::Card;
use crate::error::GameError;
use crate::hand::Hand;
use crate::ledger::Ledger;
use crate::settlement::Outcome;
use serde::Serialize;

/// The two actor capabilities at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Player,
    Dealer,
}

/// One settled hand's result, kept for reporting. The engine never reads
/// these back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundRecord {
    pub outcome: Outcome,
    pub bet: f32,
}

/// An append-only log of settled hands.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundHistory {
    records: Vec<RoundRecord>,
}

impl RoundHistory {
    /// Method for appending a settled hand's result.
    pub fn add_round(&mut self, outcome: Outcome, bet: f32) {
        self.records.push(RoundRecord { outcome, bet });
    }

    /// Getter method for the recorded results.
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }
}

/// A participant in the round: a name, a bank ledger, one or more hands and a
/// pointer to the hand currently in play.
///
/// Invariant: `current_hand_index` always indexes into `split_hands`, and
/// `split_hands` has length 1 unless a player has split.
#[derive(Debug)]
pub struct Actor {
    pub name: String,
    pub bank: Ledger,
    split_hands: Vec<Hand>,
    current_hand_index: usize,
    pub history: RoundHistory,
    role: Role,
}

impl Actor {
    fn new(name: &str, starting_balance: f32, role: Role) -> Actor {
        Actor {
            name: name.to_string(),
            bank: Ledger::new(starting_balance),
            split_hands: vec![Hand::new(Vec::new(), 0.0)],
            current_hand_index: 0,
            history: RoundHistory::default(),
            role,
        }
    }

    /// Associated function to create a new player.
    pub fn player(name: &str, starting_balance: f32) -> Actor {
        Actor::new(name, starting_balance, Role::Player)
    }

    /// Associated function to create a new dealer.
    pub fn dealer(name: &str, starting_balance: f32) -> Actor {
        Actor::new(name, starting_balance, Role::Dealer)
    }

    /// Getter method for the actor's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns whether this actor is allowed to split. Only players are.
    pub fn can_split(&self) -> bool {
        matches!(self.role, Role::Player)
    }

    /// The hand currently in play.
    pub fn hand(&self) -> &Hand {
        &self.split_hands[self.current_hand_index]
    }

    /// Mutable access to the hand currently in play.
    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.split_hands[self.current_hand_index]
    }

    /// All of the actor's hands, in play order.
    pub fn hands(&self) -> &[Hand] {
        &self.split_hands
    }

    /// Mutable access to the hand at `index`. Panics on a bad index, which
    /// the engine never produces.
    pub fn hand_at_mut(&mut self, index: usize) -> &mut Hand {
        &mut self.split_hands[index]
    }

    /// Getter method for the current hand pointer.
    pub fn current_hand_index(&self) -> usize {
        self.current_hand_index
    }

    /// Method that discards every hand from the previous round, leaving a
    /// single empty hand.
    pub fn reset_hand(&mut self) {
        self.split_hands = vec![Hand::new(Vec::new(), 0.0)];
        self.current_hand_index = 0;
    }

    /// Method that starts a fresh round: a single new hand with the given
    /// cards and a bet ledger seeded at `bet`.
    pub fn start_hand(&mut self, starting_cards: Vec<Card>, bet: f32) {
        self.split_hands = vec![Hand::new(starting_cards, bet)];
        self.current_hand_index = 0;
    }

    /// Method that splits the current hand into two. Exactly two replacement
    /// cards must be supplied, one for each half; anything else is rejected
    /// before any state mutates. Each new hand's bet ledger is seeded with
    /// the original hand's current bet balance, and the first new hand
    /// inherits any insurance riding on the original. The current hand
    /// pointer stays on the first half.
    pub fn split(&mut self, replacement_cards: &[Card]) -> Result<(), GameError> {
        if !self.can_split() {
            return Err(GameError::InvalidSplit(
                "only players may split a hand".to_string(),
            ));
        }
        if replacement_cards.len() != 2 {
            return Err(GameError::InvalidSplit(format!(
                "exactly two replacement cards are required, got {}",
                replacement_cards.len()
            )));
        }
        let index = self.current_hand_index;
        if self.split_hands[index].cards().len() != 2 {
            return Err(GameError::InvalidSplit(
                "only a two-card hand can be split".to_string(),
            ));
        }

        let original_bet = self.split_hands[index].bet.balance();
        let original_cards = [
            self.split_hands[index].cards()[0],
            self.split_hands[index].cards()[1],
        ];
        let mut first = Hand::new(vec![original_cards[0], replacement_cards[0]], original_bet);
        let second = Hand::new(vec![original_cards[1], replacement_cards[1]], original_bet);
        first.insurance = std::mem::take(&mut self.split_hands[index].insurance);

        self.split_hands[index] = first;
        self.split_hands.insert(index + 1, second);
        Ok(())
    }

    /// Method that advances the current hand pointer. Returns `false` when
    /// there is no further hand, which tells the caller the actor's turn is
    /// complete; the pointer never moves past the last hand.
    pub fn next_hand(&mut self) -> bool {
        if self.current_hand_index + 1 < self.split_hands.len() {
            self.current_hand_index += 1;
            true
        } else {
            false
        }
    }
}
