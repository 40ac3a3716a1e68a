use crate::errors::WagerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round outcome, decided by the caller before settlement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
}

impl GameOutcome {
    pub fn is_win(self) -> bool {
        self == GameOutcome::Win
    }

    /// Label used in round summaries
    pub fn label(self) -> &'static str {
        match self {
            GameOutcome::Win => "Win",
            GameOutcome::Loss => "Loss",
        }
    }
}

impl From<bool> for GameOutcome {
    fn from(won: bool) -> Self {
        if won {
            GameOutcome::Win
        } else {
            GameOutcome::Loss
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win => write!(f, "win"),
            GameOutcome::Loss => write!(f, "loss"),
        }
    }
}

/// Game definition: wager limits and payout multiplier.
///
/// The limits are descriptive; [`Game::compute_payout`] does not enforce them.
/// Callers that want enforcement use [`Game::check_wager`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    name: String,
    min_wager: f64,
    max_wager: f64,
    payout_multiplier: f64,
}

impl Game {
    pub fn new(name: impl Into<String>, min_wager: f64, max_wager: f64, payout_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            min_wager,
            max_wager,
            payout_multiplier,
        }
    }

    /// Payout for a wager: `wager * multiplier` on a win, zero on a loss
    pub fn compute_payout(&self, wager: f64, outcome: GameOutcome) -> f64 {
        match outcome {
            GameOutcome::Win => wager * self.payout_multiplier,
            GameOutcome::Loss => 0.0,
        }
    }

    /// Whether `wager` lies within `[min_wager, max_wager]`
    pub fn accepts(&self, wager: f64) -> bool {
        wager >= self.min_wager && wager <= self.max_wager
    }

    pub fn check_wager(&self, wager: f64) -> Result<(), WagerError> {
        if self.accepts(wager) {
            Ok(())
        } else {
            Err(WagerError::WagerOutOfBounds {
                wager,
                min: self.min_wager,
                max: self.max_wager,
            })
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_wager(&self) -> f64 {
        self.min_wager
    }

    pub fn max_wager(&self) -> f64 {
        self.max_wager
    }

    pub fn payout_multiplier(&self) -> f64 {
        self.payout_multiplier
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Game: {}, Min wager: {}, Max wager: {}, Multiplier: {}x",
            self.name, self.min_wager, self.max_wager, self.payout_multiplier
        )
    }
}
