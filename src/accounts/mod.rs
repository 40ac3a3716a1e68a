pub mod account;
pub mod counter;

pub use account::{Account, AccountTier};
pub use counter::{live_accounts, AccountCounter};
