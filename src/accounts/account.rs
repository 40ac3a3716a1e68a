use crate::accounts::counter::{AccountCounter, LiveToken};
use crate::errors::WagerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Account variant with the fields only that variant carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountTier {
    #[default]
    Plain,
    /// Secondary bonus balance, spent independently of the main balance
    Premium { bonus_balance: f64 },
    /// Descriptive access tag, no behavioural effect
    Privileged { access_level: String },
}

impl fmt::Display for AccountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountTier::Plain => write!(f, "plain"),
            AccountTier::Premium { .. } => write!(f, "premium"),
            AccountTier::Privileged { .. } => write!(f, "privileged"),
        }
    }
}

/// Player account holding identity and a monetary balance.
///
/// The balance only changes through [`Account::credit`] and [`Account::debit`];
/// a debit that would take it below zero is refused.
#[derive(Debug, Serialize)]
pub struct Account {
    id: u32,
    name: String,
    login: String,
    balance: f64,
    tier: AccountTier,
    #[serde(skip)]
    live: LiveToken,
}

impl Account {
    /// Create an account registered with the process-wide counter
    pub fn new(
        id: u32,
        name: impl Into<String>,
        login: impl Into<String>,
        balance: f64,
        tier: AccountTier,
    ) -> Self {
        Self::new_in(AccountCounter::global(), id, name, login, balance, tier)
    }

    /// Create an account registered with `counter`
    pub fn new_in(
        counter: &AccountCounter,
        id: u32,
        name: impl Into<String>,
        login: impl Into<String>,
        balance: f64,
        tier: AccountTier,
    ) -> Self {
        let account = Self {
            id,
            name: name.into(),
            login: login.into(),
            balance,
            tier,
            live: counter.register(),
        };
        debug!(
            "Opened {} account {} ({}) with balance {}",
            account.tier, account.id, account.login, account.balance
        );
        account
    }

    pub fn plain(id: u32, name: impl Into<String>, login: impl Into<String>, balance: f64) -> Self {
        Self::new(id, name, login, balance, AccountTier::Plain)
    }

    pub fn premium(
        id: u32,
        name: impl Into<String>,
        login: impl Into<String>,
        balance: f64,
        bonus_balance: f64,
    ) -> Self {
        Self::new(id, name, login, balance, AccountTier::Premium { bonus_balance })
    }

    pub fn privileged(
        id: u32,
        name: impl Into<String>,
        login: impl Into<String>,
        balance: f64,
        access_level: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            name,
            login,
            balance,
            AccountTier::Privileged {
                access_level: access_level.into(),
            },
        )
    }

    /// Add `amount` to the balance. Never fails; negative amounts are not rejected.
    pub fn credit(&mut self, amount: f64) {
        self.balance += amount;
        debug!("Account {} credited {} (balance {})", self.id, amount, self.balance);
    }

    /// Remove `amount` from the balance, or fail without touching it
    pub fn debit(&mut self, amount: f64) -> Result<(), WagerError> {
        check_amount(amount)?;
        if !(amount <= self.balance) {
            warn!(
                "Account {} debit of {} refused, balance {}",
                self.id, amount, self.balance
            );
            return Err(WagerError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        debug!("Account {} debited {} (balance {})", self.id, amount, self.balance);
        Ok(())
    }

    /// Spend from the bonus balance. Accounts without one behave as if it were zero.
    pub fn consume_bonus(&mut self, amount: f64) -> Result<(), WagerError> {
        check_amount(amount)?;
        let available = self.bonus_balance().unwrap_or(0.0);
        if !(amount <= available) {
            warn!(
                "Account {} bonus spend of {} refused, bonus balance {}",
                self.id, amount, available
            );
            return Err(WagerError::InsufficientBonus {
                requested: amount,
                available,
            });
        }
        if let AccountTier::Premium { bonus_balance } = &mut self.tier {
            *bonus_balance -= amount;
            debug!(
                "Account {} spent {} bonus (bonus balance {})",
                self.id, amount, bonus_balance
            );
        }
        Ok(())
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn tier(&self) -> &AccountTier {
        &self.tier
    }

    /// Secondary balance, present on premium accounts only
    pub fn bonus_balance(&self) -> Option<f64> {
        match self.tier {
            AccountTier::Premium { bonus_balance } => Some(bonus_balance),
            _ => None,
        }
    }

    /// Access tag, present on privileged accounts only
    pub fn access_level(&self) -> Option<&str> {
        match &self.tier {
            AccountTier::Privileged { access_level } => Some(access_level),
            _ => None,
        }
    }

    /// Counter this account is registered with
    pub fn counter(&self) -> &AccountCounter {
        self.live.counter()
    }

    /// Human-readable summary, base fields first and tier fields around them
    pub fn describe(&self) -> String {
        self.to_string()
    }

    fn fmt_base(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Login: {}, Balance: {}",
            self.id, self.name, self.login, self.balance
        )
    }
}

/// Guarded withdrawals take only finite, non-negative amounts
fn check_amount(amount: f64) -> Result<(), WagerError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        warn!("Refusing withdrawal of invalid amount {}", amount);
        Err(WagerError::InvalidAmount { amount })
    }
}

impl Clone for Account {
    /// A clone is a new live account.
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            login: self.login.clone(),
            balance: self.balance,
            tier: self.tier.clone(),
            live: self.live.clone(),
        }
    }

    /// Assignment: copies every field but keeps this account's registration.
    fn clone_from(&mut self, source: &Self) {
        self.id = source.id;
        self.name.clone_from(&source.name);
        self.login.clone_from(&source.login);
        self.balance = source.balance;
        self.tier.clone_from(&source.tier);
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tier {
            AccountTier::Plain => self.fmt_base(f),
            AccountTier::Premium { bonus_balance } => {
                self.fmt_base(f)?;
                write!(f, "\nBonus balance: {}", bonus_balance)
            }
            AccountTier::Privileged { access_level } => {
                write!(f, "[Admin] ")?;
                self.fmt_base(f)?;
                write!(f, "\nAccess level: {}", access_level)
            }
        }
    }
}
