use crate::accounts::Account;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Amount credited by one bonus application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusReport {
    pub category: String,
    pub amount: f64,
}

impl fmt::Display for BonusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bonus '{}' added {} to balance", self.category, self.amount)
    }
}

/// Fixed grant that can be applied to any account any number of times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    category: String,
    amount: f64,
}

impl Bonus {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }

    pub fn apply(&self, account: &mut Account) -> BonusReport {
        account.credit(self.amount);
        info!(
            "Bonus '{}' of {} applied to account {}",
            self.category,
            self.amount,
            account.id()
        );
        BonusReport {
            category: self.category.clone(),
            amount: self.amount,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Bonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bonus: {}, Amount: {}", self.category, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountCounter, AccountTier};

    #[test]
    fn test_bonus_is_repeatable() {
        let counter = AccountCounter::new();
        let mut account = Account::new_in(&counter, 2, "Maria", "maria456", 200.0, AccountTier::Plain);
        let bonus = Bonus::new("Freespins", 20.0);

        let report = bonus.apply(&mut account);
        assert_eq!(report.amount, 20.0);
        assert_eq!(account.balance(), 220.0);

        bonus.apply(&mut account);
        assert_eq!(account.balance(), 240.0);
    }

    #[test]
    fn test_bonus_applies_to_many_accounts() {
        let counter = AccountCounter::new();
        let mut a = Account::new_in(&counter, 1, "A", "a", 0.0, AccountTier::Plain);
        let mut b = Account::new_in(
            &counter,
            2,
            "B",
            "b",
            5.0,
            AccountTier::Premium { bonus_balance: 1.0 },
        );
        let bonus = Bonus::new("Freespins", 20.0);

        bonus.apply(&mut a);
        bonus.apply(&mut b);

        assert_eq!(a.balance(), 20.0);
        assert_eq!(b.balance(), 25.0);
        // The bonus award goes to the main balance, not the bonus balance
        assert_eq!(b.bonus_balance(), Some(1.0));
    }

    #[test]
    fn test_display() {
        let bonus = Bonus::new("Freespins", 20.0);
        assert_eq!(bonus.describe(), "Bonus: Freespins, Amount: 20");

        let counter = AccountCounter::new();
        let mut account = Account::new_in(&counter, 1, "A", "a", 0.0, AccountTier::Plain);
        assert_eq!(
            bonus.apply(&mut account).to_string(),
            "Bonus 'Freespins' added 20 to balance"
        );
    }
}
