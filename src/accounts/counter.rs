//! Live account tracking
//!
//! Every [`Account`](crate::accounts::Account) holds a [`LiveToken`] registered
//! with an [`AccountCounter`]. The token increments the count when created or
//! cloned and decrements it when dropped, so the count always equals the number
//! of accounts currently alive against that counter.

use once_cell::sync::Lazy;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

static GLOBAL_COUNTER: Lazy<AccountCounter> = Lazy::new(AccountCounter::new);

/// Shared count of live accounts
#[derive(Debug, Clone, Default)]
pub struct AccountCounter {
    live: Arc<AtomicUsize>,
}

impl AccountCounter {
    /// Create an independent counter starting at zero
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Process-wide counter used by the plain `Account` constructors.
    /// Starts at zero and lives for the whole process.
    pub fn global() -> &'static AccountCounter {
        &GLOBAL_COUNTER
    }

    /// Number of accounts currently registered
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Whether two handles refer to the same underlying count
    pub fn same_as(&self, other: &AccountCounter) -> bool {
        Arc::ptr_eq(&self.live, &other.live)
    }

    pub(crate) fn register(&self) -> LiveToken {
        self.live.fetch_add(1, Ordering::SeqCst);
        LiveToken {
            counter: self.clone(),
        }
    }
}

/// Number of live accounts registered with the process-wide counter
pub fn live_accounts() -> usize {
    AccountCounter::global().live()
}

/// Registration held by one account for as long as it lives
#[derive(Debug)]
pub(crate) struct LiveToken {
    counter: AccountCounter,
}

impl LiveToken {
    pub(crate) fn counter(&self) -> &AccountCounter {
        &self.counter
    }
}

impl Clone for LiveToken {
    fn clone(&self) -> Self {
        self.counter.register()
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.counter.live.fetch_sub(1, Ordering::SeqCst);
    }
}
