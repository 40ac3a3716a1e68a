//! One-off balance grants that bypass games and rounds

pub mod bonus;
pub mod jackpot;

pub use bonus::{Bonus, BonusReport};
pub use jackpot::{Jackpot, JackpotOutcome};
