//! Transaction-logged balances. Every money-holding entity in the game (bank,
//! per-hand bet, insurance side-bet) is a `Ledger`, so every balance change
//! leaves an audit trail.

use serde::Serialize;

/// The label given to the seed transaction of every fresh ledger.
pub const INITIAL_BALANCE: &str = "Initial Balance";

/// The label given to seed transactions demoted during a merge, so they do not
/// masquerade as a fresh ledger's starting balance.
pub const MERGED_BALANCE_INITIAL: &str = "Merged Balance Initial";

/// A single recorded balance change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub name: String,
    pub amount: f32,
    pub sequence: usize,
}

impl Transaction {
    fn new(name: &str, amount: f32, sequence: usize) -> Transaction {
        Transaction {
            name: name.to_string(),
            amount,
            sequence,
        }
    }
}

/// An append-only transaction log with a cached balance.
///
/// Invariant: the balance always equals the sum of recorded transaction
/// amounts, and sequence numbers are dense from 0.
#[derive(Debug, Clone, Serialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    balance: f32,
}

impl Ledger {
    /// Associated function to create a new `Ledger` seeded with an
    /// "Initial Balance" transaction at sequence 0.
    pub fn new(balance: f32) -> Ledger {
        let transactions = vec![Transaction::new(INITIAL_BALANCE, balance, 0)];
        Ledger {
            transactions,
            balance,
        }
    }

    /// Getter method for the cached balance.
    pub fn balance(&self) -> f32 {
        self.balance
    }

    /// Method for appending a transaction with the next sequence number and
    /// adjusting the cached balance. Negative amounts decrease the balance.
    pub fn add_transaction(&mut self, name: &str, amount: f32) {
        let sequence = self.transactions.len();
        self.transactions.push(Transaction::new(name, amount, sequence));
        self.balance += amount;
    }

    /// Method that recomputes the balance by summing the full transaction
    /// history. Reconciliation only; normal updates go through
    /// `add_transaction`.
    pub fn refresh(&mut self) {
        self.balance = self.transactions.iter().map(|t| t.amount).sum();
    }

    /// Returns the most recent `count` transactions in chronological order.
    pub fn history(&self, count: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(count);
        &self.transactions[start..]
    }

    /// Returns the full transaction history in chronological order.
    pub fn history_all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Method that replaces this ledger's history with the concatenation of
    /// several histories, in the given order. Sequence numbers are renumbered
    /// densely from 0 and every "Initial Balance" entry after the first is
    /// relabeled "Merged Balance Initial". The balance is refreshed from the
    /// merged history.
    pub fn rebuild_from_histories(&mut self, histories: &[&[Transaction]]) {
        let mut merged: Vec<Transaction> = Vec::new();
        let mut first_initial = true;
        for history in histories {
            for transaction in *history {
                let mut merged_transaction = transaction.clone();
                if transaction.name == INITIAL_BALANCE {
                    if first_initial {
                        first_initial = false;
                    } else {
                        merged_transaction.name = MERGED_BALANCE_INITIAL.to_string();
                    }
                }
                merged_transaction.sequence = merged.len();
                merged.push(merged_transaction);
            }
        }
        self.transactions = merged;
        self.refresh();
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_equals_sum_of_history() {
        let mut ledger = Ledger::new(100.0);
        ledger.add_transaction("Won Round", 25.0);
        ledger.add_transaction("Lost Round", -40.0);
        ledger.add_transaction("Won Round", 15.5);
        let total: f32 = ledger.history_all().iter().map(|t| t.amount).sum();
        assert_eq!(ledger.balance(), total);
        assert_eq!(ledger.balance(), 100.5);
        ledger.refresh();
        assert_eq!(ledger.balance(), total);
    }

    #[test]
    fn sequence_numbers_are_dense_from_zero() {
        let mut ledger = Ledger::new(10.0);
        ledger.add_transaction("a", 1.0);
        ledger.add_transaction("b", -1.0);
        for (i, transaction) in ledger.history_all().iter().enumerate() {
            assert_eq!(transaction.sequence, i);
        }
        assert_eq!(ledger.history_all()[0].name, INITIAL_BALANCE);
    }

    #[test]
    fn history_returns_most_recent_in_chronological_order() {
        let mut ledger = Ledger::new(0.0);
        ledger.add_transaction("first", 1.0);
        ledger.add_transaction("second", 2.0);
        let recent = ledger.history(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "first");
        assert_eq!(recent[1].name, "second");
        assert_eq!(ledger.history(10).len(), 3);
    }

    #[test]
    fn merge_renumbers_and_relabels() {
        let mut first = Ledger::new(50.0);
        first.add_transaction("Round Ante", -10.0);
        let mut second = Ledger::new(10.0);
        second.add_transaction("Double Down", 10.0);

        let mut merged = Ledger::default();
        merged.rebuild_from_histories(&[first.history_all(), second.history_all()]);

        let history = merged.history_all();
        assert_eq!(
            history.len(),
            first.history_all().len() + second.history_all().len()
        );
        for (i, transaction) in history.iter().enumerate() {
            assert_eq!(transaction.sequence, i);
        }
        let initials: Vec<&Transaction> = history
            .iter()
            .filter(|t| t.name == INITIAL_BALANCE)
            .collect();
        assert_eq!(initials.len(), 1);
        assert_eq!(initials[0].sequence, 0);
        assert_eq!(
            history
                .iter()
                .filter(|t| t.name == MERGED_BALANCE_INITIAL)
                .count(),
            1
        );
        assert_eq!(merged.balance(), 50.0 - 10.0 + 10.0 + 10.0);
    }
}
