//! The interactive blackjack table: process loop, argument parsing and wiring
//! of the engine to the terminal collaborators.

mod input;
mod output;

use blackjack_core::prelude::*;
use clap::Parser;

/// An interactive blackjack table played at the terminal.
#[derive(Parser, Debug)]
#[command(name = "blackjack", version, about)]
struct TableArgs {
    /// The player's starting balance
    #[arg(long, default_value_t = 1000.0)]
    balance: f32,

    /// The dealer's starting balance
    #[arg(long, default_value_t = 100000.0)]
    dealer_balance: f32,

    /// The table's minimum bet
    #[arg(long, default_value_t = 5.0)]
    min_bet: f32,

    /// The number of decks in the shoe
    #[arg(long, default_value_t = 1)]
    decks: usize,

    /// The shoe fraction below which it reshuffles
    #[arg(long, default_value_t = 0.2)]
    refresh_threshold: f32,

    /// The player's name
    #[arg(long, default_value = "Player")]
    name: String,
}

fn main() {
    env_logger::init();
    let args = TableArgs::parse();
    log::info!(
        "starting a table with {} deck(s), minimum bet {}",
        args.decks,
        args.min_bet
    );

    let config = TableConfig::new()
        .min_bet(args.min_bet)
        .shoe_refresh_threshold(args.refresh_threshold)
        .build();
    let mut shoe = Shoe::with_threshold(args.decks, args.refresh_threshold);
    let mut dealer = Actor::dealer("Dealer", args.dealer_balance);
    let mut player = Actor::player(&args.name, args.balance);
    let mut input = input::CliInput::new(args.min_bet);

    while player.bank.balance() >= args.min_bet && dealer.bank.balance() > 0.0 {
        let mut round = Round::new(config);
        match round.play(&mut dealer, &mut player, &mut shoe, &mut input) {
            Ok(results) => {
                let state = round.state(&dealer, &player, &shoe);
                output::show_round_results(&state, &results);
            }
            Err(e) => {
                eprintln!("error: {}", e);
                break;
            }
        }
        if !input.prompt_play_again() {
            break;
        }
    }

    if player.bank.balance() < args.min_bet {
        println!("\nYou can no longer cover the table minimum.");
    }
    output::show_session_summary(&dealer, &player);
}
