//! Terminal rendering. The engine mandates no text format; everything here
//! works off `RoundState` snapshots and public actor state.

use blackjack_core::prelude::*;

/// Formats one hand with its value, e.g. "Ace of Spades, King of Hearts, Value: 21".
pub fn hand_str(hand: &HandSnapshot) -> String {
    let cards = hand
        .cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<String>>()
        .join(", ");
    format!("{}, Value: {}", cards, hand.value)
}

fn hand_status(hand: &HandSnapshot, active: bool) -> &'static str {
    if active {
        "Active"
    } else if hand.has_busted {
        "Busted"
    } else if hand.has_stood {
        "Stood"
    } else {
        "Waiting"
    }
}

/// Method-free rendering of a round snapshot: the dealer's visible card (and
/// full hand once revealed), every player hand with its status, and the shoe
/// depth.
pub fn render_round_state(state: &RoundState) -> String {
    let mut out = String::new();
    if let Some(upcard) = state.dealer_upcard {
        out += &format!("\nDealer card is: {}\n", upcard);
    }
    if let Some(ref dealer_hand) = state.dealer_hand {
        out += &format!("Dealer hand is: {}\n", hand_str(dealer_hand));
    }
    if state.player_hands.len() > 1 {
        for (i, hand) in state.player_hands.iter().enumerate() {
            out += &format!("Player hand #{}: {}\n", i + 1, hand_str(hand));
            out += &format!(
                "Status: {}\n\n",
                hand_status(hand, i == state.current_hand_index)
            );
        }
    } else if let Some(hand) = state.player_hands.first() {
        out += &format!("Player hand is: {}\n", hand_str(hand));
    }
    out += &format!(
        "Shoe has {:.0}% remaining cards.",
        state.shoe_remaining * 100.0
    );
    out
}

/// Prints the settled round: final hands, per-hand outcomes and both banks.
pub fn show_round_results(state: &RoundState, results: &[(Outcome, f32)]) {
    println!("{}", render_round_state(state));
    println!();
    for (i, (outcome, bet)) in results.iter().enumerate() {
        if results.len() > 1 {
            println!("Hand #{}: {} at a bet of {:.2}", i + 1, outcome, bet);
        } else {
            println!("Result: {} at a bet of {:.2}", outcome, bet);
        }
    }
    println!("Dealer bank: {:.2}", state.dealer_balance);
    println!("Player bank: {:.2}", state.player_balance);
}

/// Prints the session tallies and the merged audit trail on the way out.
pub fn show_session_summary(dealer: &Actor, player: &Actor) {
    let width = 46;
    let numeric_width = 60 - width;
    let (mut wins, mut blackjacks, mut pushes, mut losses) = (0, 0, 0, 0);
    for record in player.history.records() {
        match record.outcome {
            Outcome::PlayerWon => wins += 1,
            Outcome::PlayerWonBlackjack => blackjacks += 1,
            Outcome::Push => pushes += 1,
            Outcome::DealerWon => losses += 1,
        }
    }

    println!("{}", "-".repeat(60));
    println!("{:-^60}", "session");
    println!("{:<width$}{:>numeric_width$}", "hands won:", wins);
    println!(
        "{:<width$}{:>numeric_width$}",
        "hands won with blackjack:", blackjacks
    );
    println!("{:<width$}{:>numeric_width$}", "hands pushed:", pushes);
    println!("{:<width$}{:>numeric_width$}", "hands lost:", losses);
    println!(
        "{:<width$}{:>numeric_width$.2}",
        "final balance:",
        player.bank.balance()
    );
    println!(
        "{:<width$}{:>numeric_width$.2}",
        "dealer balance:",
        dealer.bank.balance()
    );
    println!("{}", "-".repeat(60));

    show_audit_trail(player);
}

/// Prints the full merged transaction trail: the player's bank history
/// reconciled with the final round's per-hand bet histories.
pub fn show_audit_trail(player: &Actor) {
    let mut histories: Vec<&[Transaction]> = vec![player.bank.history_all()];
    for hand in player.hands() {
        histories.push(hand.bet.history_all());
    }
    let mut audit = Ledger::default();
    audit.rebuild_from_histories(&histories);

    println!("{:-^60}", "audit trail");
    for transaction in audit.history_all() {
        println!(
            "{:<6}{:<34}{:>20.2}",
            transaction.sequence, transaction.name, transaction.amount
        );
    }
    println!("{:<40}{:>20.2}", "merged total", audit.balance());
    println!("{}", "-".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(cards: Vec<Card>, value: u8) -> HandSnapshot {
        HandSnapshot {
            cards,
            value,
            has_blackjack: false,
            has_stood: false,
            has_busted: false,
            bet: 10.0,
        }
    }

    #[test]
    fn hand_string_lists_cards_and_value() {
        let hand = snapshot(
            vec![
                Card::new(Rank::Ace, Suit::Spades),
                Card::new(Rank::King, Suit::Hearts),
            ],
            21,
        );
        assert_eq!(
            hand_str(&hand),
            "Ace of Spades, King of Hearts, Value: 21"
        );
    }

    #[test]
    fn multi_hand_state_shows_statuses() {
        let mut second = snapshot(vec![Card::new(Rank::Eight, Suit::Clubs)], 8);
        second.has_busted = true;
        second.has_stood = true;
        let state = RoundState {
            phase: RoundPhase::PlayerTurn,
            dealer_upcard: Some(Card::new(Rank::King, Suit::Hearts)),
            dealer_hand: None,
            player_hands: vec![snapshot(vec![Card::new(Rank::Eight, Suit::Spades)], 8), second],
            current_hand_index: 0,
            player_balance: 80.0,
            dealer_balance: 1000.0,
            shoe_remaining: 0.5,
        };
        let rendered = render_round_state(&state);
        assert!(rendered.contains("Player hand #1"));
        assert!(rendered.contains("Status: Active"));
        assert!(rendered.contains("Status: Busted"));
        assert!(rendered.contains("Shoe has 50% remaining cards."));
    }
}
