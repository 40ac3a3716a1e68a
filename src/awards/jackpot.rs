use crate::accounts::Account;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Result of a jackpot attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JackpotOutcome {
    Awarded { amount: f64 },
    AlreadyAwarded,
}

impl JackpotOutcome {
    pub fn is_awarded(&self) -> bool {
        matches!(self, JackpotOutcome::Awarded { .. })
    }
}

impl fmt::Display for JackpotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JackpotOutcome::Awarded { amount } => write!(f, "Jackpot won! Amount: {}", amount),
            JackpotOutcome::AlreadyAwarded => write!(f, "Jackpot has already been won"),
        }
    }
}

/// Fixed pool that pays out to the first account that claims it, and never again
#[derive(Debug)]
pub struct Jackpot {
    amount: f64,
    awarded: AtomicBool,
}

impl Jackpot {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            awarded: AtomicBool::new(false),
        }
    }

    /// Credit the whole pool to `account` if nobody has won it yet.
    ///
    /// The flag flips atomically, so of any number of callers exactly one
    /// receives [`JackpotOutcome::Awarded`].
    pub fn try_award(&self, account: &mut Account) -> JackpotOutcome {
        if self
            .awarded
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Jackpot already awarded, account {} gets nothing", account.id());
            return JackpotOutcome::AlreadyAwarded;
        }

        account.credit(self.amount);
        info!("Jackpot of {} awarded to account {}", self.amount, account.id());
        JackpotOutcome::Awarded {
            amount: self.amount,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn is_awarded(&self) -> bool {
        self.awarded.load(Ordering::SeqCst)
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Jackpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Jackpot: {}, State: {}",
            self.amount,
            if self.is_awarded() { "Won" } else { "Not won" }
        )
    }
}
