//! The stdin input collaborator. Every validation-retry loop lives here; the
//! engine only ever receives values that already passed these checks (and
//! re-validates them anyway).

use crate::output;
use blackjack_core::prelude::*;
use std::collections::BTreeSet;
use std::io::{self, Write};

const NUMBER_ERROR: &str = "Please enter a valid number.";
const OVER_BALANCE: &str = "You don't have enough money.";

/// The interactive prompt handler for one player at the terminal.
pub struct CliInput {
    min_bet: f32,
}

impl CliInput {
    /// Associated function to create a new `CliInput` for a table minimum.
    pub fn new(min_bet: f32) -> CliInput {
        CliInput { min_bet }
    }

    fn read_line(prompt: &str) -> String {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return String::new();
        }
        line.trim().to_lowercase()
    }

    /// Asks whether another round should be played.
    pub fn prompt_play_again(&mut self) -> bool {
        loop {
            match Self::read_line("\nPlay another round? (y/n): ").as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => println!("Please answer y or n."),
            }
        }
    }
}

impl InputHandler for CliInput {
    fn prompt_bet(&mut self, balance: f32) -> f32 {
        loop {
            println!("\nYour current balance: {:.2}.", balance);
            let raw = Self::read_line(&format!("Place your bet (minimum {}): ", self.min_bet));
            match raw.parse::<f32>() {
                Ok(bet) if bet < self.min_bet => {
                    println!("Bet must be at least {}.", self.min_bet);
                }
                Ok(bet) if bet > balance => println!("{}", OVER_BALANCE),
                Ok(bet) => return bet,
                Err(_) => println!("{}", NUMBER_ERROR),
            }
        }
    }

    fn prompt_insurance(&mut self, balance: f32, bet: f32) -> f32 {
        let min_insurance = bet * 0.1;
        if min_insurance > balance {
            println!("Dealer shows an ace, but you cannot afford the minimum insurance.");
            return 0.0;
        }
        loop {
            println!(
                "Dealer shows an ace. Insurance is open up to {} (minimum {}).",
                bet, min_insurance
            );
            match Self::read_line("Take insurance? (y/n): ").as_str() {
                "y" | "yes" => loop {
                    let raw = Self::read_line(&format!("Amount (max {}): ", bet));
                    match raw.parse::<f32>() {
                        Ok(amount) if amount < min_insurance => {
                            println!("Amount must be at least {}.", min_insurance);
                        }
                        Ok(amount) if amount > bet => {
                            println!("Amount cannot exceed the main bet of {}.", bet);
                        }
                        Ok(amount) if amount > balance => println!("{}", OVER_BALANCE),
                        Ok(amount) => return amount,
                        Err(_) => println!("{}", NUMBER_ERROR),
                    }
                },
                "n" | "no" => return 0.0,
                _ => println!("Please answer y or n."),
            }
        }
    }

    fn prompt_action(&mut self, state: &RoundState, allowed: &BTreeSet<Action>) -> Action {
        println!("{}", output::render_round_state(state));
        println!("Options: {}", describe_options(allowed));
        loop {
            let raw = Self::read_line("Your move: ");
            match parse_action(&raw, allowed) {
                Some(action) => return action,
                None => println!("Invalid input. Use one of the listed options."),
            }
        }
    }
}

/// Maps a short code to an action, if that action is currently allowed.
pub fn parse_action(raw: &str, allowed: &BTreeSet<Action>) -> Option<Action> {
    let action = match raw {
        "h" | "hit" => Action::Hit,
        "s" | "stand" => Action::Stand,
        "d" | "dd" => Action::Double,
        "sp" | "split" => Action::Split,
        _ => return None,
    };
    if allowed.contains(&action) {
        Some(action)
    } else {
        None
    }
}

/// The option legend shown above the move prompt.
pub fn describe_options(allowed: &BTreeSet<Action>) -> String {
    allowed
        .iter()
        .map(|action| match action {
            Action::Hit => "h = Hit",
            Action::Stand => "s = Stand",
            Action::Double => "d/dd = Double Down",
            Action::Split => "sp/split = Split",
        })
        .collect::<Vec<&str>>()
        .join(", ")
}
