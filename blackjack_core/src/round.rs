//! The round engine: a forward-only state machine that takes one round from
//! ante through settlement, pulling cards from a `CardSource` and decisions
//! from an `InputHandler`.

use crate::actor::Actor;
use crate::card::{Card, Rank};
use crate::error::GameError;
use crate::hand::Hand;
use crate::settlement::{self, Outcome};
use crate::shoe::{CardSource, DEFAULT_REFRESH_THRESHOLD};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

/// The decisions a player can be offered on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Hit => write!(f, "hit"),
            Action::Stand => write!(f, "stand"),
            Action::Double => write!(f, "double down"),
            Action::Split => write!(f, "split"),
        }
    }
}

/// The phases of one round, always entered in this order with no backward
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Ante,
    Deal,
    PlayerTurn,
    DealerTurn,
    Settlement,
    Done,
}

/// Table-level settings the engine consults during a round.
#[derive(Debug, Clone, Copy)]
pub struct TableConfig {
    pub min_bet: f32,
    pub shoe_refresh_threshold: f32,
}

impl TableConfig {
    /// Associated method for returning a new `TableConfigBuilder`.
    pub fn new() -> TableConfigBuilder {
        TableConfigBuilder {
            min_bet: None,
            shoe_refresh_threshold: None,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig::new().build()
    }
}

/// Struct to implement the builder pattern for `TableConfig`.
#[derive(Clone, Copy)]
pub struct TableConfigBuilder {
    min_bet: Option<f32>,
    shoe_refresh_threshold: Option<f32>,
}

impl TableConfigBuilder {
    /// Method for setting the minimum bet for the table.
    pub fn min_bet(&mut self, bet: f32) -> &mut Self {
        self.min_bet = Some(bet);
        self
    }

    /// Method for setting the shoe depth below which splits are no longer
    /// offered and health checks reshuffle.
    pub fn shoe_refresh_threshold(&mut self, threshold: f32) -> &mut Self {
        self.shoe_refresh_threshold = Some(threshold);
        self
    }

    /// Method for building a `TableConfig` from the given builder.
    pub fn build(&mut self) -> TableConfig {
        TableConfig {
            min_bet: self.min_bet.unwrap_or(1.0),
            shoe_refresh_threshold: self
                .shoe_refresh_threshold
                .unwrap_or(DEFAULT_REFRESH_THRESHOLD),
        }
    }
}

/// A point-in-time view of one hand, for renderers.
#[derive(Debug, Clone, Serialize)]
pub struct HandSnapshot {
    pub cards: Vec<Card>,
    pub value: u8,
    pub has_blackjack: bool,
    pub has_stood: bool,
    pub has_busted: bool,
    pub bet: f32,
}

impl HandSnapshot {
    fn of(hand: &Hand) -> HandSnapshot {
        HandSnapshot {
            cards: hand.cards().to_vec(),
            value: hand.value(),
            has_blackjack: hand.has_blackjack,
            has_stood: hand.has_stood,
            has_busted: hand.has_busted,
            bet: hand.bet.balance(),
        }
    }
}

/// Everything a renderer needs to describe the round after any phase. The
/// dealer's full hand is withheld until the dealer's turn begins.
#[derive(Debug, Clone, Serialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub dealer_upcard: Option<Card>,
    pub dealer_hand: Option<HandSnapshot>,
    pub player_hands: Vec<HandSnapshot>,
    pub current_hand_index: usize,
    pub player_balance: f32,
    pub dealer_balance: f32,
    pub shoe_remaining: f32,
}

/// The contract for the collaborator that supplies player decisions. All
/// retry/validation loops live behind this trait; the engine still
/// re-validates everything it is handed.
pub trait InputHandler {
    /// Returns a bet amount for the coming round.
    fn prompt_bet(&mut self, balance: f32) -> f32;

    /// Returns an insurance amount in `[0, bet]`, 0 to decline.
    fn prompt_insurance(&mut self, balance: f32, bet: f32) -> f32;

    /// Returns one of the allowed actions for the current hand.
    fn prompt_action(&mut self, state: &RoundState, allowed: &BTreeSet<Action>) -> Action;
}

/// One round of blackjack. Construct a fresh `Round` per round; the phase
/// only ever moves forward.
pub struct Round {
    config: TableConfig,
    phase: RoundPhase,
    bet: f32,
}

impl Round {
    /// Associated function to create a new `Round` in the ante phase.
    pub fn new(config: TableConfig) -> Round {
        Round {
            config,
            phase: RoundPhase::Ante,
            bet: 0.0,
        }
    }

    /// Getter method for the current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Getter method for the round's main bet.
    pub fn bet(&self) -> f32 {
        self.bet
    }

    fn expect_phase(&self, expected: RoundPhase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::OutOfTurn(format!(
                "operation requires the {:?} phase, round is in {:?}",
                expected, self.phase
            )));
        }
        Ok(())
    }

    /// Accepts the round's main bet. The bet must reach the table minimum
    /// and fit within the player's bank balance; nothing mutates on
    /// rejection.
    pub fn ante(&mut self, player: &Actor, bet: f32) -> Result<(), GameError> {
        self.expect_phase(RoundPhase::Ante)?;
        if !(bet >= self.config.min_bet) {
            return Err(GameError::InvalidBet(format!(
                "bet must be at least the table minimum of {}",
                self.config.min_bet
            )));
        }
        if !(bet <= player.bank.balance()) {
            return Err(GameError::InvalidBet(format!(
                "bet of {} exceeds the available balance of {}",
                bet,
                player.bank.balance()
            )));
        }
        self.bet = bet;
        self.phase = RoundPhase::Deal;
        Ok(())
    }

    /// Deals the round: both hands are reset, two cards go to each actor
    /// alternately (player first), the ante moves out of the player's bank
    /// and both hands are checked once for a dealt blackjack.
    pub fn deal<S: CardSource>(
        &mut self,
        dealer: &mut Actor,
        player: &mut Actor,
        shoe: &mut S,
    ) -> Result<(), GameError> {
        self.expect_phase(RoundPhase::Deal)?;
        shoe.health_check();

        dealer.reset_hand();
        player.reset_hand();
        let mut player_cards = Vec::with_capacity(2);
        let mut dealer_cards = Vec::with_capacity(2);
        for _ in 0..2 {
            player_cards.push(shoe.draw()?);
            dealer_cards.push(shoe.draw()?);
        }

        player.bank.add_transaction("Round Ante", -self.bet);
        player.start_hand(player_cards, self.bet);
        dealer.start_hand(dealer_cards, 0.0);

        // The blackjack check happens exactly once, here; a 21 reached later
        // is a plain 21.
        if dealer.hand().value() == 21 {
            dealer.hand_mut().has_blackjack = true;
        }
        if player.hand().value() == 21 {
            let hand = player.hand_mut();
            hand.has_blackjack = true;
            hand.has_stood = true;
        }

        debug!(
            "dealt {} ({}) against dealer upcard {}",
            player.name,
            player.hand().value(),
            dealer.hand().cards()[0]
        );
        self.phase = RoundPhase::PlayerTurn;
        Ok(())
    }

    /// Returns whether insurance is on offer: exactly when the dealer's
    /// first dealt card is an ace.
    pub fn insurance_offered(&self, dealer: &Actor) -> bool {
        self.phase == RoundPhase::PlayerTurn
            && dealer
                .hand()
                .cards()
                .first()
                .map(|card| card.rank == Rank::Ace)
                .unwrap_or(false)
    }

    /// Places an insurance side-bet on the player's hand. The amount must
    /// lie in `[0, bet]` and fit within the bank balance; zero declines.
    pub fn place_insurance(&mut self, player: &mut Actor, amount: f32) -> Result<(), GameError> {
        self.expect_phase(RoundPhase::PlayerTurn)?;
        if !(amount >= 0.0 && amount <= self.bet) {
            return Err(GameError::InvalidInsurance(format!(
                "insurance must be between 0 and the main bet of {}",
                self.bet
            )));
        }
        if !(amount <= player.bank.balance()) {
            return Err(GameError::InvalidInsurance(format!(
                "insurance of {} exceeds the available balance of {}",
                amount,
                player.bank.balance()
            )));
        }
        if amount == 0.0 {
            return Ok(());
        }
        player.bank.add_transaction("Insurance Bet", -amount);
        player.hand_mut().add_insurance("Insurance Bet", amount);
        Ok(())
    }

    /// The actions currently on offer for the player's current hand. Hit and
    /// stand are always available; double and split additionally require an
    /// unmodified two-card hand, a bank balance covering the extra bet, and
    /// for a split a matching pair, the split capability and enough depth
    /// left in the shoe.
    pub fn allowed_actions<S: CardSource>(&self, player: &Actor, shoe: &S) -> BTreeSet<Action> {
        let mut actions = BTreeSet::from([Action::Hit, Action::Stand]);
        let hand = player.hand();
        if hand.cards().len() == 2 && !hand.has_stood {
            let covers_extra_bet = player.bank.balance() >= hand.bet.balance();
            if covers_extra_bet {
                actions.insert(Action::Double);
            }
            if covers_extra_bet
                && player.can_split()
                && hand.cards()[0].rank == hand.cards()[1].rank
                && shoe.remaining_fraction() > self.config.shoe_refresh_threshold
            {
                actions.insert(Action::Split);
            }
        }
        actions
    }

    /// Applies one action to the player's current hand. Monetary checks run
    /// before anything mutates; a busted or doubled hand comes back with
    /// `has_stood` set.
    pub fn apply_action<S: CardSource>(
        &mut self,
        player: &mut Actor,
        shoe: &mut S,
        action: Action,
    ) -> Result<(), GameError> {
        self.expect_phase(RoundPhase::PlayerTurn)?;
        if player.hand().has_stood {
            return Err(GameError::OutOfTurn(
                "the current hand has already stood".to_string(),
            ));
        }
        if !self.allowed_actions(player, shoe).contains(&action) {
            return Err(GameError::UnavailableAction(format!(
                "{} is not available for the current hand",
                action
            )));
        }

        match action {
            Action::Hit => {
                let card = shoe.draw()?;
                debug!("{} hits and draws {}", player.name, card);
                player.hand_mut().add_card(card);
            }
            Action::Stand => {
                player.hand_mut().has_stood = true;
            }
            Action::Double => {
                let card = shoe.draw()?;
                let bet = player.hand().bet.balance();
                debug!("{} doubles down and draws {}", player.name, card);
                player.bank.add_transaction("Double Down", -bet);
                player.hand_mut().double_down(card);
            }
            Action::Split => {
                let replacements = [shoe.draw()?, shoe.draw()?];
                let bet = player.hand().bet.balance();
                debug!(
                    "{} splits, drawing {} and {}",
                    player.name, replacements[0], replacements[1]
                );
                player.split(&replacements)?;
                player.bank.add_transaction("Split Bet", -bet);
            }
        }
        Ok(())
    }

    /// Runs the whole player turn: the optional insurance offer, then every
    /// hand in order until it stands, advancing until no hand remains.
    pub fn player_turn<S: CardSource, I: InputHandler>(
        &mut self,
        dealer: &Actor,
        player: &mut Actor,
        shoe: &mut S,
        input: &mut I,
    ) -> Result<(), GameError> {
        self.expect_phase(RoundPhase::PlayerTurn)?;
        if self.insurance_offered(dealer) {
            let amount = input.prompt_insurance(player.bank.balance(), self.bet);
            self.place_insurance(player, amount)?;
        }
        loop {
            while !player.hand().has_stood {
                let allowed = self.allowed_actions(player, shoe);
                let state = self.state(dealer, player, shoe);
                let action = input.prompt_action(&state, &allowed);
                self.apply_action(player, shoe, action)?;
            }
            if !player.next_hand() {
                break;
            }
        }
        self.phase = RoundPhase::DealerTurn;
        Ok(())
    }

    /// Resolves the dealer's hand: an immediate stand on a dealt blackjack,
    /// otherwise hit below 17 and stand. Returns the dealer's final value.
    pub fn dealer_turn<S: CardSource>(
        &mut self,
        dealer: &mut Actor,
        shoe: &mut S,
    ) -> Result<u8, GameError> {
        self.expect_phase(RoundPhase::DealerTurn)?;
        if !dealer.hand().has_blackjack {
            while dealer.hand().value() < 17 {
                let card = shoe.draw()?;
                debug!("dealer draws {}", card);
                dealer.hand_mut().add_card(card);
            }
        }
        dealer.hand_mut().has_stood = true;
        self.phase = RoundPhase::Settlement;
        Ok(dealer.hand().value())
    }

    /// Settles the round: insurance first, then every player hand
    /// independently against the dealer's final hand. Each settled hand is
    /// recorded in both actors' histories. Returns the per-hand outcomes
    /// with the bets they settled at.
    pub fn settle(
        &mut self,
        dealer: &mut Actor,
        player: &mut Actor,
    ) -> Result<Vec<(Outcome, f32)>, GameError> {
        self.expect_phase(RoundPhase::Settlement)?;
        let dealer_blackjack = dealer.hand().has_blackjack;

        let insurance_pot = {
            let hand = player.hand_at_mut(0);
            hand.insurance.refresh();
            hand.insurance.balance()
        };
        settlement::settle_insurance(dealer, player, insurance_pot, dealer_blackjack);

        let mut results = Vec::with_capacity(player.hands().len());
        for index in 0..player.hands().len() {
            let bet = {
                let hand = player.hand_at_mut(index);
                hand.bet.refresh();
                hand.bet.balance()
            };
            let outcome = settlement::determine_winner(dealer.hand(), &player.hands()[index]);
            settlement::settle_bets(dealer, player, bet, outcome);
            info!(
                "hand {} of {} settled: {} at a bet of {}",
                index + 1,
                player.hands().len(),
                outcome,
                bet
            );
            results.push((outcome, bet));
        }
        self.phase = RoundPhase::Done;
        Ok(results)
    }

    /// Drives one full round from ante to settlement against the given
    /// collaborators.
    pub fn play<S: CardSource, I: InputHandler>(
        &mut self,
        dealer: &mut Actor,
        player: &mut Actor,
        shoe: &mut S,
        input: &mut I,
    ) -> Result<Vec<(Outcome, f32)>, GameError> {
        let bet = input.prompt_bet(player.bank.balance());
        self.ante(player, bet)?;
        self.deal(dealer, player, shoe)?;
        self.player_turn(&*dealer, player, shoe, input)?;
        self.dealer_turn(dealer, shoe)?;
        self.settle(dealer, player)
    }

    /// Builds a snapshot of the round for renderers. The dealer's full hand
    /// only appears once the dealer's turn has begun.
    pub fn state<S: CardSource>(&self, dealer: &Actor, player: &Actor, shoe: &S) -> RoundState {
        let dealer_revealed = matches!(
            self.phase,
            RoundPhase::DealerTurn | RoundPhase::Settlement | RoundPhase::Done
        );
        RoundState {
            phase: self.phase,
            dealer_upcard: dealer.hand().cards().first().copied(),
            dealer_hand: if dealer_revealed {
                Some(HandSnapshot::of(dealer.hand()))
            } else {
                None
            },
            player_hands: player.hands().iter().map(HandSnapshot::of).collect(),
            current_hand_index: player.current_hand_index(),
            player_balance: player.bank.balance(),
            dealer_balance: dealer.bank.balance(),
            shoe_remaining: shoe.remaining_fraction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::SUITS;
    use std::collections::VecDeque;

    /// A deterministic card source dealing a scripted sequence.
    struct ScriptedShoe {
        cards: VecDeque<Card>,
    }

    impl ScriptedShoe {
        fn new(ranks: &[Rank]) -> ScriptedShoe {
            let cards = ranks
                .iter()
                .enumerate()
                .map(|(i, rank)| Card::new(*rank, SUITS[i % SUITS.len()]))
                .collect();
            ScriptedShoe { cards }
        }
    }

    impl CardSource for ScriptedShoe {
        fn draw(&mut self) -> Result<Card, GameError> {
            self.cards.pop_front().ok_or(GameError::EmptyShoe)
        }

        fn remaining_fraction(&self) -> f32 {
            1.0
        }

        fn health_check(&mut self) {}
    }

    /// An input collaborator replaying a scripted decision sequence. Panics
    /// when asked for an action it was not scripted with.
    struct ScriptedInput {
        bet: f32,
        insurance: f32,
        actions: VecDeque<Action>,
    }

    impl ScriptedInput {
        fn new(bet: f32, insurance: f32, actions: &[Action]) -> ScriptedInput {
            ScriptedInput {
                bet,
                insurance,
                actions: actions.iter().copied().collect(),
            }
        }
    }

    impl InputHandler for ScriptedInput {
        fn prompt_bet(&mut self, _balance: f32) -> f32 {
            self.bet
        }

        fn prompt_insurance(&mut self, _balance: f32, _bet: f32) -> f32 {
            self.insurance
        }

        fn prompt_action(&mut self, _state: &RoundState, allowed: &BTreeSet<Action>) -> Action {
            let action = self.actions.pop_front().expect("no scripted action left");
            assert!(allowed.contains(&action), "scripted {} not allowed", action);
            action
        }
    }

    fn table() -> TableConfig {
        TableConfig::new().min_bet(5.0).build()
    }

    // Deal order is player, dealer, player, dealer.
    #[test]
    fn standing_twenty_beats_a_dealer_seventeen() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        let mut shoe = ScriptedShoe::new(&[Rank::King, Rank::King, Rank::Queen, Rank::Seven]);
        let mut input = ScriptedInput::new(10.0, 0.0, &[Action::Stand]);

        let mut round = Round::new(table());
        let results = round
            .play(&mut dealer, &mut player, &mut shoe, &mut input)
            .unwrap();

        assert_eq!(results, vec![(Outcome::PlayerWon, 10.0)]);
        assert_eq!(round.phase(), RoundPhase::Done);
        assert_eq!(player.bank.balance(), 100.0 - 10.0 + 10.0);
        assert_eq!(dealer.bank.balance(), 1000.0 - 10.0);
    }

    #[test]
    fn dealt_blackjack_skips_the_player_turn_and_pays_three_to_two() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        let mut shoe = ScriptedShoe::new(&[Rank::Ace, Rank::King, Rank::King, Rank::Queen]);
        // No scripted actions: prompting at all would panic.
        let mut input = ScriptedInput::new(10.0, 0.0, &[]);

        let mut round = Round::new(table());
        let results = round
            .play(&mut dealer, &mut player, &mut shoe, &mut input)
            .unwrap();

        assert_eq!(results, vec![(Outcome::PlayerWonBlackjack, 10.0)]);
        assert!(player.hands()[0].has_blackjack);
        assert_eq!(player.bank.balance(), 100.0 - 10.0 + 15.0);
        assert_eq!(dealer.bank.balance(), 1000.0 - 15.0);
    }

    #[test]
    fn insurance_pays_out_against_a_dealer_blackjack() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        // Dealer shows an ace and holds a blackjack; the player stands on 20.
        let mut shoe = ScriptedShoe::new(&[Rank::King, Rank::Ace, Rank::Queen, Rank::King]);
        let mut input = ScriptedInput::new(10.0, 5.0, &[Action::Stand]);

        let mut round = Round::new(table());
        let results = round
            .play(&mut dealer, &mut player, &mut shoe, &mut input)
            .unwrap();

        // The main bet loses to the blackjack despite the 20.
        assert_eq!(results, vec![(Outcome::DealerWon, 10.0)]);
        // Ante -10, insurance -5, insurance payout +10.
        assert_eq!(player.bank.balance(), 100.0 - 10.0 - 5.0 + 10.0);
        // Insurance payout -10, won round +10.
        assert_eq!(dealer.bank.balance(), 1000.0);
        assert!(player
            .bank
            .history_all()
            .iter()
            .any(|t| t.name == "Insurance Payout" && t.amount == 10.0));
    }

    #[test]
    fn insurance_is_forfeited_when_the_dealer_misses() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        // Dealer shows an ace but holds 17 (ace + six); the player stands on 20.
        let mut shoe = ScriptedShoe::new(&[Rank::King, Rank::Ace, Rank::Queen, Rank::Six]);
        let mut input = ScriptedInput::new(10.0, 5.0, &[Action::Stand]);

        let mut round = Round::new(table());
        let results = round
            .play(&mut dealer, &mut player, &mut shoe, &mut input)
            .unwrap();

        assert_eq!(results, vec![(Outcome::PlayerWon, 10.0)]);
        // Ante -10, insurance -5 forfeited, won round +10.
        assert_eq!(player.bank.balance(), 100.0 - 10.0 - 5.0 + 10.0);
        // Forfeited insurance +5, lost round -10.
        assert_eq!(dealer.bank.balance(), 1000.0 + 5.0 - 10.0);
    }

    #[test]
    fn split_plays_both_hands_against_the_dealer() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        // Player is dealt a pair of eights, splits into 8+2 and 8+3, stands
        // on both; the dealer stands on 17.
        let mut shoe = ScriptedShoe::new(&[
            Rank::Eight,
            Rank::King,
            Rank::Eight,
            Rank::Seven,
            Rank::Two,
            Rank::Three,
        ]);
        let mut input =
            ScriptedInput::new(10.0, 0.0, &[Action::Split, Action::Stand, Action::Stand]);

        let mut round = Round::new(table());
        let results = round
            .play(&mut dealer, &mut player, &mut shoe, &mut input)
            .unwrap();

        assert_eq!(player.hands().len(), 2);
        assert_eq!(
            results,
            vec![(Outcome::DealerWon, 10.0), (Outcome::DealerWon, 10.0)]
        );
        // Ante -10 and the additional split bet -10.
        assert_eq!(player.bank.balance(), 100.0 - 20.0);
        assert_eq!(dealer.bank.balance(), 1000.0 + 20.0);
        assert!(player
            .bank
            .history_all()
            .iter()
            .any(|t| t.name == "Split Bet" && t.amount == -10.0));
        assert_eq!(player.history.records().len(), 2);
    }

    #[test]
    fn double_down_settles_at_the_doubled_bet() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        // Player doubles an eleven into 21; the dealer stands on 17.
        let mut shoe = ScriptedShoe::new(&[
            Rank::Five,
            Rank::King,
            Rank::Six,
            Rank::Seven,
            Rank::King,
        ]);
        let mut input = ScriptedInput::new(10.0, 0.0, &[Action::Double]);

        let mut round = Round::new(table());
        let results = round
            .play(&mut dealer, &mut player, &mut shoe, &mut input)
            .unwrap();

        // The hand's bet ledger already reflects the doubled stake.
        assert_eq!(results, vec![(Outcome::PlayerWon, 20.0)]);
        assert_eq!(player.hands()[0].bet.balance(), 20.0);
        assert_eq!(player.bank.balance(), 100.0 - 10.0 - 10.0 + 20.0);
        assert_eq!(dealer.bank.balance(), 1000.0 - 20.0);
    }

    #[test]
    fn dealer_hits_below_seventeen() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        // Dealer starts on 7 and must draw the king to reach 17.
        let mut shoe = ScriptedShoe::new(&[
            Rank::King,
            Rank::Two,
            Rank::Queen,
            Rank::Five,
            Rank::King,
        ]);
        let mut input = ScriptedInput::new(10.0, 0.0, &[Action::Stand]);

        let mut round = Round::new(table());
        round.ante(&player, 10.0).unwrap();
        round.deal(&mut dealer, &mut player, &mut shoe).unwrap();
        round
            .player_turn(&dealer, &mut player, &mut shoe, &mut input)
            .unwrap();
        let final_value = round.dealer_turn(&mut dealer, &mut shoe).unwrap();

        assert_eq!(final_value, 17);
        assert_eq!(dealer.hand().cards().len(), 3);
        let results = round.settle(&mut dealer, &mut player).unwrap();
        assert_eq!(results, vec![(Outcome::PlayerWon, 10.0)]);
    }

    #[test]
    fn ante_rejects_an_over_balance_bet_without_mutating() {
        let player = Actor::player("Player", 5.0);
        let mut round = Round::new(table());
        let result = round.ante(&player, 10.0);
        assert!(matches!(result, Err(GameError::InvalidBet(_))));
        assert_eq!(round.phase(), RoundPhase::Ante);
        assert_eq!(player.bank.history_all().len(), 1);
    }

    #[test]
    fn ante_rejects_a_bet_below_the_minimum() {
        let player = Actor::player("Player", 100.0);
        let mut round = Round::new(table());
        assert!(matches!(
            round.ante(&player, 2.0),
            Err(GameError::InvalidBet(_))
        ));
        assert_eq!(round.phase(), RoundPhase::Ante);
    }

    #[test]
    fn phases_only_move_forward() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        let mut shoe = ScriptedShoe::new(&[Rank::King, Rank::King, Rank::Queen, Rank::Seven]);

        let mut round = Round::new(table());
        // Dealing before the ante is out of turn.
        assert!(matches!(
            round.deal(&mut dealer, &mut player, &mut shoe),
            Err(GameError::OutOfTurn(_))
        ));

        let mut input = ScriptedInput::new(10.0, 0.0, &[Action::Stand]);
        round
            .play(&mut dealer, &mut player, &mut shoe, &mut input)
            .unwrap();
        // A settled round cannot settle again.
        assert!(matches!(
            round.settle(&mut dealer, &mut player),
            Err(GameError::OutOfTurn(_))
        ));
    }

    #[test]
    fn split_is_not_offered_on_a_mismatched_pair() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        let mut shoe = ScriptedShoe::new(&[Rank::Eight, Rank::King, Rank::Nine, Rank::Seven]);

        let mut round = Round::new(table());
        round.ante(&player, 10.0).unwrap();
        round.deal(&mut dealer, &mut player, &mut shoe).unwrap();

        let allowed = round.allowed_actions(&player, &shoe);
        assert!(!allowed.contains(&Action::Split));
        let result = round.apply_action(&mut player, &mut shoe, Action::Split);
        assert!(matches!(result, Err(GameError::UnavailableAction(_))));
        assert_eq!(player.hands().len(), 1);
        // Only the seed and the ante are on the bank.
        assert_eq!(player.bank.history_all().len(), 2);
    }

    #[test]
    fn double_requires_a_covering_balance() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        // The ante consumes the whole balance, so no double is on offer.
        let mut player = Actor::player("Player", 10.0);
        let mut shoe = ScriptedShoe::new(&[Rank::Five, Rank::King, Rank::Six, Rank::Seven]);

        let mut round = Round::new(table());
        round.ante(&player, 10.0).unwrap();
        round.deal(&mut dealer, &mut player, &mut shoe).unwrap();

        let allowed = round.allowed_actions(&player, &shoe);
        assert!(!allowed.contains(&Action::Double));
        assert!(matches!(
            round.apply_action(&mut player, &mut shoe, Action::Double),
            Err(GameError::UnavailableAction(_))
        ));
    }

    #[test]
    fn busting_ends_the_hand_and_loses_the_round() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        let mut shoe = ScriptedShoe::new(&[
            Rank::King,
            Rank::King,
            Rank::Five,
            Rank::Seven,
            Rank::Queen,
        ]);
        let mut input = ScriptedInput::new(10.0, 0.0, &[Action::Hit]);

        let mut round = Round::new(table());
        let results = round
            .play(&mut dealer, &mut player, &mut shoe, &mut input)
            .unwrap();

        assert!(player.hands()[0].has_busted);
        assert_eq!(results, vec![(Outcome::DealerWon, 10.0)]);
        assert_eq!(player.bank.balance(), 90.0);
        assert_eq!(dealer.bank.balance(), 1010.0);
    }

    #[test]
    fn round_state_hides_the_dealer_hand_until_their_turn() {
        let mut dealer = Actor::dealer("Dealer", 1000.0);
        let mut player = Actor::player("Player", 100.0);
        let mut shoe = ScriptedShoe::new(&[Rank::King, Rank::King, Rank::Queen, Rank::Seven]);

        let mut round = Round::new(table());
        round.ante(&player, 10.0).unwrap();
        round.deal(&mut dealer, &mut player, &mut shoe).unwrap();

        let state = round.state(&dealer, &player, &shoe);
        assert_eq!(state.phase, RoundPhase::PlayerTurn);
        assert!(state.dealer_upcard.is_some());
        assert!(state.dealer_hand.is_none());
        assert_eq!(state.player_hands.len(), 1);
        assert_eq!(state.player_hands[0].value, 20);
        // Snapshots serialize for non-terminal renderers.
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"phase\":\"PlayerTurn\""));
    }
}
