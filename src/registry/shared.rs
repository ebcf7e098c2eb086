//! Thread-safe handle over an [`AccountRegistry`].
//!
//! A single `parking_lot::Mutex` guards the whole registry. Every call below
//! is one critical section, so both legs of a transfer are checked and applied
//! without any other operation interleaving. Operations are short and never
//! block on I/O, which keeps one coarse lock cheap enough.

use std::sync::Arc;

use parking_lot::Mutex;

use super::account_registry::AccountRegistry;
use super::error::RegistryError;
use super::Decimal;

/// Cloneable, `Send + Sync` registry handle. Clones share the same accounts.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<AccountRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        username: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.inner.lock().register(username, credential)
    }

    pub fn register_with_balance(
        &self,
        username: impl Into<String>,
        credential: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<(), RegistryError> {
        self.inner
            .lock()
            .register_with_balance(username, credential, initial_balance)
    }

    pub fn open_account(
        &self,
        username: impl Into<String>,
        credential: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<(), RegistryError> {
        self.inner
            .lock()
            .open_account(username, credential, initial_balance)
    }

    pub fn validate_credential(&self, username: &str, credential: &str) -> bool {
        self.inner.lock().validate_credential(username, credential)
    }

    pub fn balance(&self, username: &str) -> Result<Decimal, RegistryError> {
        self.inner.lock().balance(username)
    }

    pub fn credit(&self, username: &str, amount: Decimal) -> Result<(), RegistryError> {
        self.inner.lock().credit(username, amount)
    }

    pub fn debit(&self, username: &str, amount: Decimal) -> Result<(), RegistryError> {
        self.inner.lock().debit(username, amount)
    }

    pub fn delete_account(&self, username: &str) -> Result<(), RegistryError> {
        self.inner.lock().delete_account(username)
    }

    pub fn change_credential(
        &self,
        username: &str,
        new_credential: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.inner.lock().change_credential(username, new_credential)
    }

    pub fn total_balance(&self) -> Decimal {
        self.inner.lock().total_balance()
    }

    pub fn transfer(
        &self,
        sender: &str,
        recipient: &str,
        amount: Decimal,
    ) -> Result<(), RegistryError> {
        self.inner.lock().transfer(sender, recipient, amount)
    }

    pub fn account_count(&self) -> usize {
        self.inner.lock().account_count()
    }

    /// Run `f` with the lock held, for reads spanning several accounts.
    pub fn with<T>(&self, f: impl FnOnce(&AccountRegistry) -> T) -> T {
        f(&self.inner.lock())
    }

    /// Run `f` with the lock held. Nothing else observes the registry until `f` returns.
    pub fn with_mut<T>(&self, f: impl FnOnce(&mut AccountRegistry) -> T) -> T {
        f(&mut self.inner.lock())
    }
}

impl From<AccountRegistry> for SharedRegistry {
    fn from(registry: AccountRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let registry = SharedRegistry::new();
        let other = registry.clone();

        registry
            .register_with_balance("alice", "pw", dec!(100))
            .unwrap();
        other.credit("alice", dec!(50)).unwrap();

        assert_eq!(registry.balance("alice").unwrap(), dec!(150));
        assert_eq!(other.account_count(), 1);
    }

    #[test]
    fn test_from_existing_registry() {
        let mut registry = AccountRegistry::new();
        registry.register_with_balance("bob", "pw", dec!(5)).unwrap();

        let shared = SharedRegistry::from(registry);
        assert!(shared.validate_credential("bob", "pw"));
        assert_eq!(shared.total_balance(), dec!(5));
    }

    #[test]
    fn test_with_mut_is_one_critical_section() {
        let shared = SharedRegistry::new();
        shared.register_with_balance("a", "pw", dec!(10)).unwrap();
        shared.register_with_balance("b", "pw", dec!(0)).unwrap();

        let moved = shared.with_mut(|registry| {
            let all = registry.balance("a")?;
            registry.transfer("a", "b", all)?;
            Ok::<_, RegistryError>(all)
        });

        assert_eq!(moved.unwrap(), dec!(10));
        let balances = shared.with(|r| (r.balance("a"), r.balance("b")));
        assert_eq!(balances, (Ok(dec!(0)), Ok(dec!(10))));
    }

    #[test]
    fn test_concurrent_debits_never_overdraw() {
        let shared = SharedRegistry::new();
        shared.register_with_balance("carol", "pw", dec!(100)).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    (0..50)
                        .filter(|_| shared.debit("carol", dec!(1)).is_ok())
                        .count()
                })
            })
            .collect();

        let succeeded: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(succeeded, 100);
        assert_eq!(shared.balance("carol").unwrap(), Decimal::ZERO);
    }
}
