//! Round settlement
//!
//! Applies a round's precomputed outcome to an account through a game's payout
//! rule. A win credits `wager * multiplier`; a loss debits the wager and fails
//! with [`WagerError::InsufficientFunds`] when the account cannot cover it.

use crate::accounts::Account;
use crate::errors::WagerError;
use crate::games::types::{Game, GameOutcome};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// What a settlement did to the account
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum SettlementReport {
    Won { payout: f64 },
    Lost { wager: f64 },
}

impl SettlementReport {
    /// Signed change applied to the account balance
    pub fn balance_delta(&self) -> f64 {
        match *self {
            SettlementReport::Won { payout } => payout,
            SettlementReport::Lost { wager } => -wager,
        }
    }
}

impl fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementReport::Won { payout } => write!(f, "Win: {}", payout),
            SettlementReport::Lost { wager } => write!(f, "Loss: {}", wager),
        }
    }
}

/// Settle one wager against `account` without keeping any round state.
///
/// Wager limits are not checked here.
pub fn settle(
    account: &mut Account,
    game: &Game,
    wager: f64,
    outcome: GameOutcome,
) -> Result<SettlementReport, WagerError> {
    let report = match outcome {
        GameOutcome::Win => {
            let payout = game.compute_payout(wager, outcome);
            account.credit(payout);
            SettlementReport::Won { payout }
        }
        GameOutcome::Loss => {
            account.debit(wager)?;
            SettlementReport::Lost { wager }
        }
    };

    info!(
        "Settled {} on {} for account {}: {} (balance {})",
        wager,
        game.name(),
        account.id(),
        report,
        account.balance()
    );
    Ok(report)
}

/// Settlement status tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Pending,
    Settled,
}

/// A single wager on a game, borrowed against an account for its lifetime.
///
/// Moves from `Pending` to `Settled` once; further settle calls fail with
/// [`WagerError::AlreadySettled`]. A failed settlement stays `Pending`.
#[derive(Debug)]
pub struct Round<'a> {
    account: &'a mut Account,
    game: &'a Game,
    wager: f64,
    outcome: GameOutcome,
    status: RoundStatus,
}

impl<'a> Round<'a> {
    pub fn new(account: &'a mut Account, game: &'a Game, wager: f64, outcome: GameOutcome) -> Self {
        Self {
            account,
            game,
            wager,
            outcome,
            status: RoundStatus::Pending,
        }
    }

    pub fn settle(&mut self) -> Result<SettlementReport, WagerError> {
        if self.status == RoundStatus::Settled {
            return Err(WagerError::AlreadySettled);
        }
        let report = settle(&mut *self.account, self.game, self.wager, self.outcome)?;
        self.status = RoundStatus::Settled;
        Ok(report)
    }

    pub fn account(&self) -> &Account {
        &*self.account
    }

    pub fn game(&self) -> &Game {
        self.game
    }

    pub fn wager(&self) -> f64 {
        self.wager
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Round<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player balance: {}, Game: {}, Wager: {}, Result: {}",
            self.account.balance(),
            self.game.name(),
            self.wager,
            self.outcome.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountCounter, AccountTier};

    fn account_with(counter: &AccountCounter, balance: f64) -> Account {
        Account::new_in(counter, 1, "Ivan", "ivan123", balance, AccountTier::Plain)
    }

    fn doubler() -> Game {
        Game::new("Roulette", 10.0, 500.0, 2.0)
    }

    #[test]
    fn test_winning_round_credits_payout() {
        let counter = AccountCounter::new();
        let mut account = account_with(&counter, 100.0);
        let game = doubler();

        let mut round = Round::new(&mut account, &game, 50.0, GameOutcome::Win);
        let report = round.settle().unwrap();

        assert_eq!(report, SettlementReport::Won { payout: 100.0 });
        assert_eq!(round.status(), RoundStatus::Settled);
        assert_eq!(account.balance(), 200.0);
    }

    #[test]
    fn test_losing_round_debits_wager() {
        let counter = AccountCounter::new();
        let mut account = account_with(&counter, 100.0);
        let game = doubler();

        let report = Round::new(&mut account, &game, 50.0, GameOutcome::Loss)
            .settle()
            .unwrap();

        assert_eq!(report, SettlementReport::Lost { wager: 50.0 });
        assert_eq!(report.balance_delta(), -50.0);
        assert_eq!(account.balance(), 50.0);
    }

    #[test]
    fn test_uncovered_loss_fails_and_leaves_balance() {
        let counter = AccountCounter::new();
        let mut account = account_with(&counter, 100.0);
        let game = doubler();

        let mut round = Round::new(&mut account, &game, 150.0, GameOutcome::Loss);
        let err = round.settle().unwrap_err();

        assert!(matches!(err, WagerError::InsufficientFunds { .. }));
        assert_eq!(round.status(), RoundStatus::Pending);
        assert_eq!(account.balance(), 100.0);
    }

    #[test]
    fn test_second_settle_is_rejected() {
        let counter = AccountCounter::new();
        let mut account = account_with(&counter, 100.0);
        let game = doubler();

        let mut round = Round::new(&mut account, &game, 50.0, GameOutcome::Win);
        round.settle().unwrap();
        assert_eq!(round.settle(), Err(WagerError::AlreadySettled));
        assert_eq!(account.balance(), 200.0);
    }

    #[test]
    fn test_wager_outside_limits_is_settled() {
        let counter = AccountCounter::new();
        let mut account = account_with(&counter, 100.0);
        let game = doubler();

        let report = settle(&mut account, &game, 1_000.0, GameOutcome::Win).unwrap();
        assert_eq!(report.balance_delta(), 2_000.0);
        assert_eq!(account.balance(), 2_100.0);
    }

    #[test]
    fn test_describe_before_and_after() {
        let counter = AccountCounter::new();
        let mut account = account_with(&counter, 100.0);
        let game = doubler();

        let mut round = Round::new(&mut account, &game, 50.0, GameOutcome::Win);
        assert_eq!(
            round.describe(),
            "Player balance: 100, Game: Roulette, Wager: 50, Result: Win"
        );

        round.settle().unwrap();
        assert_eq!(
            round.describe(),
            "Player balance: 200, Game: Roulette, Wager: 50, Result: Win"
        );
    }

    #[test]
    fn test_describe_losing_round() {
        let counter = AccountCounter::new();
        let mut account = account_with(&counter, 100.0);
        let game = doubler();

        let mut round = Round::new(&mut account, &game, 50.0, GameOutcome::Loss);
        round.settle().unwrap();
        assert_eq!(
            round.describe(),
            "Player balance: 50, Game: Roulette, Wager: 50, Result: Loss"
        );
    }

    #[test]
    fn test_negative_wager_on_loss_is_refused() {
        let counter = AccountCounter::new();
        let mut account = account_with(&counter, 100.0);
        let game = doubler();

        let err = settle(&mut account, &game, -50.0, GameOutcome::Loss).unwrap_err();
        assert_eq!(err, WagerError::InvalidAmount { amount: -50.0 });
        assert_eq!(account.balance(), 100.0);
    }

    #[test]
    fn test_report_display() {
        assert_eq!(SettlementReport::Won { payout: 100.0 }.to_string(), "Win: 100");
        assert_eq!(SettlementReport::Lost { wager: 50.0 }.to_string(), "Loss: 50");
    }
}
