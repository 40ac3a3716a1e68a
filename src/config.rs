//! Scenario configuration with validation and defaults
//!
//! A scenario lists the accounts, the game, the jackpot and bonus, and the
//! ordered steps to run against them. It loads from TOML, takes environment
//! overrides, and is validated before anything is built from it.

use crate::accounts::AccountTier;
use crate::errors::{ConfigurationError, WagerkitResult};
use crate::games::Game;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

/// Complete scenario description
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub policy: PolicyConfig,
    pub game: Game,
    pub jackpot: JackpotConfig,
    pub bonus: BonusConfig,
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// Checks the core leaves to the caller
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Reject rounds whose wager is outside the game's limits
    #[serde(default)]
    pub enforce_wager_limits: bool,
    /// Stop at the first failed step instead of recording it and continuing
    #[serde(default)]
    pub stop_on_error: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub id: u32,
    pub name: String,
    pub login: String,
    pub balance: f64,
    #[serde(default)]
    pub tier: AccountTier,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JackpotConfig {
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusConfig {
    pub category: String,
    pub amount: f64,
}

/// One scripted action against an account
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepConfig {
    Round { account: u32, wager: f64, won: bool },
    Bonus { account: u32 },
    Jackpot { account: u32 },
    ConsumeBonus { account: u32, amount: f64 },
}

impl StepConfig {
    pub fn account(&self) -> u32 {
        match *self {
            StepConfig::Round { account, .. }
            | StepConfig::Bonus { account }
            | StepConfig::Jackpot { account }
            | StepConfig::ConsumeBonus { account, .. } => account,
        }
    }
}

impl Default for ScenarioConfig {
    /// The built-in demo: three accounts, roulette, one winning round, a bonus and a jackpot
    fn default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            game: Game::new("Roulette", 10.0, 500.0, 2.0),
            jackpot: JackpotConfig { amount: 5000.0 },
            bonus: BonusConfig {
                category: "Freespins".to_string(),
                amount: 20.0,
            },
            accounts: vec![
                AccountConfig {
                    id: 1,
                    name: "Ivan".to_string(),
                    login: "ivan123".to_string(),
                    balance: 100.0,
                    tier: AccountTier::Plain,
                },
                AccountConfig {
                    id: 2,
                    name: "Maria".to_string(),
                    login: "maria456".to_string(),
                    balance: 200.0,
                    tier: AccountTier::Premium { bonus_balance: 50.0 },
                },
                AccountConfig {
                    id: 0,
                    name: "Admin".to_string(),
                    login: "admin".to_string(),
                    balance: 1000.0,
                    tier: AccountTier::Privileged {
                        access_level: "Full".to_string(),
                    },
                },
            ],
            steps: vec![
                StepConfig::Round {
                    account: 1,
                    wager: 50.0,
                    won: true,
                },
                StepConfig::Bonus { account: 2 },
                StepConfig::Jackpot { account: 2 },
            ],
        }
    }
}

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the scenario file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load the scenario from file (or defaults), apply environment overrides, validate
    pub fn load(&self) -> WagerkitResult<ScenarioConfig> {
        let mut config = match self.config_path {
            Some(ref path) => Self::load_from_file(path)?,
            None => ScenarioConfig::default(),
        };

        apply_overrides(&mut config, |key| env::var(key).ok())?;
        validate(&config)?;

        Ok(config)
    }

    fn load_from_file(path: &Path) -> WagerkitResult<ScenarioConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Write the scenario as pretty TOML
    pub fn save<P: AsRef<Path>>(config: &ScenarioConfig, path: P) -> WagerkitResult<()> {
        let path = path.as_ref();
        let toml_string = toml::to_string_pretty(config).map_err(|e| {
            ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, toml_string).map_err(|e| {
            ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path.display(), e))
                .into()
        })
    }
}

/// Apply `WAGERKIT_*` overrides read through `lookup`
pub fn apply_overrides<F>(config: &mut ScenarioConfig, lookup: F) -> Result<(), ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("WAGERKIT_JACKPOT_AMOUNT") {
        config.jackpot.amount = parse_override("WAGERKIT_JACKPOT_AMOUNT", value)?;
    }
    if let Some(value) = lookup("WAGERKIT_BONUS_AMOUNT") {
        config.bonus.amount = parse_override("WAGERKIT_BONUS_AMOUNT", value)?;
    }
    if let Some(value) = lookup("WAGERKIT_PAYOUT_MULTIPLIER") {
        let multiplier = parse_override("WAGERKIT_PAYOUT_MULTIPLIER", value)?;
        let game = &config.game;
        config.game = Game::new(game.name(), game.min_wager(), game.max_wager(), multiplier);
    }
    if let Some(value) = lookup("WAGERKIT_ENFORCE_WAGER_LIMITS") {
        config.policy.enforce_wager_limits =
            parse_override("WAGERKIT_ENFORCE_WAGER_LIMITS", value)?;
    }
    Ok(())
}

fn parse_override<T: std::str::FromStr>(field: &str, value: String) -> Result<T, ConfigurationError> {
    value.parse().map_err(|_| ConfigurationError::InvalidValue {
        field: field.to_string(),
        reason: format!("cannot parse as {}", std::any::type_name::<T>()),
        value,
    })
}

fn check_amount(field: &str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be a non-negative finite amount".to_string(),
        })
    }
}

/// Validate a scenario before it is built
pub fn validate(config: &ScenarioConfig) -> Result<(), ConfigurationError> {
    if config.accounts.is_empty() {
        return Err(ConfigurationError::MissingRequired("accounts".to_string()));
    }

    let mut ids = HashSet::new();
    for account in &config.accounts {
        if !ids.insert(account.id) {
            return Err(ConfigurationError::InvalidValue {
                field: "accounts.id".to_string(),
                value: account.id.to_string(),
                reason: "duplicate account id".to_string(),
            });
        }
        check_amount("accounts.balance", account.balance)?;
        if let AccountTier::Premium { bonus_balance } = account.tier {
            check_amount("accounts.tier.bonus_balance", bonus_balance)?;
        }
    }

    let game = &config.game;
    check_amount("game.min_wager", game.min_wager())?;
    check_amount("game.max_wager", game.max_wager())?;
    check_amount("game.payout_multiplier", game.payout_multiplier())?;
    if game.min_wager() > game.max_wager() {
        return Err(ConfigurationError::InvalidValue {
            field: "game.max_wager".to_string(),
            value: game.max_wager().to_string(),
            reason: format!("below min_wager {}", game.min_wager()),
        });
    }

    check_amount("jackpot.amount", config.jackpot.amount)?;
    check_amount("bonus.amount", config.bonus.amount)?;

    for step in &config.steps {
        if !ids.contains(&step.account()) {
            return Err(ConfigurationError::UnknownAccount(step.account()));
        }
        match *step {
            StepConfig::Round { wager, .. } => check_amount("steps.wager", wager)?,
            StepConfig::ConsumeBonus { amount, .. } => check_amount("steps.amount", amount)?,
            StepConfig::Bonus { .. } | StepConfig::Jackpot { .. } => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_is_valid() {
        let config = ScenarioConfig::default();
        assert!(validate(&config).is_ok());
        assert_eq!(config.accounts.len(), 3);
        assert_eq!(config.steps.len(), 3);
    }

    #[test]
    fn test_overrides() {
        let mut config = ScenarioConfig::default();
        let env = env_of(&[
            ("WAGERKIT_JACKPOT_AMOUNT", "750"),
            ("WAGERKIT_PAYOUT_MULTIPLIER", "3.5"),
            ("WAGERKIT_ENFORCE_WAGER_LIMITS", "true"),
        ]);

        apply_overrides(&mut config, |k| env.get(k).cloned()).unwrap();

        assert_eq!(config.jackpot.amount, 750.0);
        assert_eq!(config.bonus.amount, 20.0);
        assert_eq!(config.game.payout_multiplier(), 3.5);
        assert_eq!(config.game.name(), "Roulette");
        assert!(config.policy.enforce_wager_limits);
    }

    #[test]
    fn test_bad_override() {
        let mut config = ScenarioConfig::default();
        let env = env_of(&[("WAGERKIT_BONUS_AMOUNT", "lots")]);

        let err = apply_overrides(&mut config, |k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { ref field, .. } if field == "WAGERKIT_BONUS_AMOUNT"));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut config = ScenarioConfig::default();
        config.accounts[1].id = 1;

        assert!(matches!(
            validate(&config),
            Err(ConfigurationError::InvalidValue { reason, .. }) if reason == "duplicate account id"
        ));
    }

    #[test]
    fn test_rejects_unknown_step_account() {
        let mut config = ScenarioConfig::default();
        config.steps.push(StepConfig::Jackpot { account: 42 });

        assert!(matches!(
            validate(&config),
            Err(ConfigurationError::UnknownAccount(42))
        ));
    }

    #[test]
    fn test_rejects_negative_amounts() {
        let mut config = ScenarioConfig::default();
        config.bonus.amount = -1.0;
        assert!(validate(&config).is_err());

        let mut config = ScenarioConfig::default();
        config.steps.push(StepConfig::Round {
            account: 1,
            wager: f64::NAN,
            won: false,
        });
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_inverted_wager_limits() {
        let mut config = ScenarioConfig::default();
        config.game = Game::new("Broken", 100.0, 10.0, 2.0);

        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_accounts() {
        let mut config = ScenarioConfig::default();
        config.accounts.clear();
        config.steps.clear();

        assert!(matches!(
            validate(&config),
            Err(ConfigurationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
            [game]
            name = "Dice"
            min_wager = 1.0
            max_wager = 100.0
            payout_multiplier = 6.0

            [jackpot]
            amount = 1000.0

            [bonus]
            category = "Cashback"
            amount = 5.0

            [[accounts]]
            id = 1
            name = "Ivan"
            login = "ivan123"
            balance = 100.0

            [[accounts]]
            id = 2
            name = "Maria"
            login = "maria456"
            balance = 200.0
            tier = { kind = "premium", bonus_balance = 50.0 }

            [[steps]]
            action = "round"
            account = 1
            wager = 10.0
            won = false

            [[steps]]
            action = "consume_bonus"
            account = 2
            amount = 20.0
        "#;

        let config: ScenarioConfig = toml::from_str(text).unwrap();

        assert_eq!(config.policy, PolicyConfig::default());
        assert_eq!(config.accounts[0].tier, AccountTier::Plain);
        assert_eq!(
            config.accounts[1].tier,
            AccountTier::Premium { bonus_balance: 50.0 }
        );
        assert_eq!(
            config.steps[1],
            StepConfig::ConsumeBonus {
                account: 2,
                amount: 20.0
            }
        );
        assert!(validate(&config).is_ok());
    }
}
