pub mod settlement;
pub mod types;

pub use settlement::{settle, Round, RoundStatus, SettlementReport};
pub use types::{Game, GameOutcome};
