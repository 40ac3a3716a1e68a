//! Scenario runner
//!
//! Builds accounts, a game, a jackpot and a bonus from a [`ScenarioConfig`] and
//! drives the configured steps against them in order, one at a time.

use crate::accounts::{Account, AccountCounter, AccountTier};
use crate::awards::{Bonus, BonusReport, Jackpot, JackpotOutcome};
use crate::config::{validate, PolicyConfig, ScenarioConfig, StepConfig};
use crate::errors::{ConfigurationError, WagerkitError, WagerkitResult};
use crate::games::{Game, Round, SettlementReport};
use crate::transaction::Transaction;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Result of one step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum StepOutcome {
    Settled(SettlementReport),
    Bonus(BonusReport),
    Jackpot(JackpotOutcome),
    BonusConsumed { amount: f64, remaining: f64 },
    Failed { error: String },
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }

    /// Signed change to the main balance, if any
    fn balance_delta(&self) -> Option<f64> {
        match self {
            StepOutcome::Settled(report) => Some(report.balance_delta()),
            StepOutcome::Bonus(report) => Some(report.amount),
            StepOutcome::Jackpot(JackpotOutcome::Awarded { amount }) => Some(*amount),
            _ => None,
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Settled(report) => write!(f, "{}", report),
            StepOutcome::Bonus(report) => write!(f, "{}", report),
            StepOutcome::Jackpot(outcome) => write!(f, "{}", outcome),
            StepOutcome::BonusConsumed { amount, remaining } => {
                write!(f, "Spent {} bonus, {} left", amount, remaining)
            }
            StepOutcome::Failed { error } => write!(f, "Failed: {}", error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub account: u32,
    pub outcome: StepOutcome,
    /// Round summary line, for round steps that settled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
}

/// Account state at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    pub id: u32,
    pub name: String,
    pub login: String,
    pub balance: f64,
    pub tier: AccountTier,
}

impl From<&Account> for AccountSnapshot {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_string(),
            login: account.login().to_string(),
            balance: account.balance(),
            tier: account.tier().clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub steps: Vec<StepRecord>,
    pub accounts: Vec<AccountSnapshot>,
    pub jackpot_awarded: bool,
    pub live_accounts: usize,
    /// False when the run stopped early on a failed step
    pub completed: bool,
}

impl ScenarioReport {
    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_failure()).count()
    }

    pub fn account(&self, id: u32) -> Option<&AccountSnapshot> {
        self.accounts.iter().find(|a| a.id == id)
    }
}

/// Objects built from a scenario, ready to run
#[derive(Debug)]
pub struct Scenario {
    policy: PolicyConfig,
    game: Game,
    jackpot: Jackpot,
    bonus: Bonus,
    accounts: Vec<Account>,
    steps: Vec<StepConfig>,
    counter: AccountCounter,
    next_transaction_id: u64,
}

impl Scenario {
    /// Build from a validated configuration, registering accounts with the process-wide counter
    pub fn from_config(config: &ScenarioConfig) -> WagerkitResult<Self> {
        Self::with_counter(config, AccountCounter::global())
    }

    pub fn with_counter(config: &ScenarioConfig, counter: &AccountCounter) -> WagerkitResult<Self> {
        validate(config)?;

        let accounts = config
            .accounts
            .iter()
            .map(|a| {
                Account::new_in(
                    counter,
                    a.id,
                    a.name.as_str(),
                    a.login.as_str(),
                    a.balance,
                    a.tier.clone(),
                )
            })
            .collect();

        Ok(Self {
            policy: config.policy.clone(),
            game: config.game.clone(),
            jackpot: Jackpot::new(config.jackpot.amount),
            bonus: Bonus::new(config.bonus.category.as_str(), config.bonus.amount),
            accounts,
            steps: config.steps.clone(),
            counter: counter.clone(),
            next_transaction_id: 1,
        })
    }

    /// Execute every step in order and report the results
    pub fn run(&mut self) -> ScenarioReport {
        info!("Running scenario: {} steps on {}", self.steps.len(), self.game.name());
        let mut records = Vec::with_capacity(self.steps.len());
        let mut completed = true;

        for index in 0..self.steps.len() {
            let step = self.steps[index].clone();
            let (outcome, round_summary) = match self.execute(&step) {
                Ok(done) => done,
                Err(e) => {
                    warn!("Step {} for account {} failed: {}", index, step.account(), e);
                    (StepOutcome::from(e), None)
                }
            };
            debug!("Step {}: {}", index, outcome);

            let transaction = outcome.balance_delta().map(|amount| {
                let id = self.next_transaction_id;
                self.next_transaction_id += 1;
                Transaction::now(id, step.account(), amount)
            });
            let failed = outcome.is_failure();

            records.push(StepRecord {
                index,
                account: step.account(),
                outcome,
                round_summary,
                transaction,
            });

            if failed && self.policy.stop_on_error {
                completed = false;
                break;
            }
        }

        ScenarioReport {
            steps: records,
            accounts: self.accounts.iter().map(AccountSnapshot::from).collect(),
            jackpot_awarded: self.jackpot.is_awarded(),
            live_accounts: self.counter.live(),
            completed,
        }
    }

    fn execute(&mut self, step: &StepConfig) -> WagerkitResult<(StepOutcome, Option<String>)> {
        let id = step.account();
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or(ConfigurationError::UnknownAccount(id))?;

        let outcome = match *step {
            StepConfig::Round { wager, won, .. } => {
                if self.policy.enforce_wager_limits {
                    self.game.check_wager(wager)?;
                }
                let mut round = Round::new(account, &self.game, wager, won.into());
                let report = round.settle()?;
                return Ok((StepOutcome::Settled(report), Some(round.describe())));
            }
            StepConfig::Bonus { .. } => StepOutcome::Bonus(self.bonus.apply(account)),
            StepConfig::Jackpot { .. } => StepOutcome::Jackpot(self.jackpot.try_award(account)),
            StepConfig::ConsumeBonus { amount, .. } => {
                account.consume_bonus(amount)?;
                StepOutcome::BonusConsumed {
                    amount,
                    remaining: account.bonus_balance().unwrap_or(0.0),
                }
            }
        };
        Ok((outcome, None))
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn jackpot(&self) -> &Jackpot {
        &self.jackpot
    }

    pub fn bonus(&self) -> &Bonus {
        &self.bonus
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: u32) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }
}

impl From<WagerkitError> for StepOutcome {
    fn from(e: WagerkitError) -> Self {
        StepOutcome::Failed {
            error: e.to_string(),
        }
    }
}
