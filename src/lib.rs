//! Wagerkit - account and wager settlement simulation
//!
//! Player accounts hold a balance; games define payout multipliers; rounds
//! settle a caller-decided outcome against an account; jackpots and bonuses
//! grant one-off credits. Everything runs sequentially in-process with no
//! persistence.
//!
//! - [`accounts`] - accounts, tiers and the live-account counter
//! - [`games`] - games, rounds and settlement
//! - [`awards`] - single-shot jackpot and repeatable bonus
//! - [`config`] / [`scenario`] - scripted scenarios loaded from TOML

pub mod accounts;
pub mod awards;
pub mod config;
pub mod errors;
pub mod games;
pub mod scenario;
pub mod transaction;

pub use accounts::{live_accounts, Account, AccountCounter, AccountTier};
pub use awards::{Bonus, BonusReport, Jackpot, JackpotOutcome};
pub use config::{ConfigLoader, ScenarioConfig, StepConfig};
pub use errors::{ConfigurationError, WagerError, WagerkitError, WagerkitResult};
pub use games::{settle, Game, GameOutcome, Round, RoundStatus, SettlementReport};
pub use scenario::{Scenario, ScenarioReport, StepOutcome, StepRecord};
pub use transaction::Transaction;
