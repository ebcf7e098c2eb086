use super::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// Upper bound on any balance and on the sum of all balances in a registry.
///
/// Amounts carry at most 4 decimal places, and every such value up to this
/// bound fits `Decimal`'s 96-bit mantissa, so sums below it are exact.
pub const MAX_BALANCE: Decimal = Decimal::from_parts(694_066_715, 3_133_608_139, 429_496, false, 0);

/// Serialize Decimal with exactly 4 decimal places
fn serialize_decimal_4dp<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.4}"))
}

/// A single user's account: a credential and a non-negative balance.
///
/// The credential is never serialized and never shows up in `Debug` output.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    username: String,
    #[serde(skip)]
    credential: String,
    #[serde(serialize_with = "serialize_decimal_4dp")]
    balance: Decimal,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("credential", &"<redacted>")
            .field("balance", &self.balance)
            .finish()
    }
}

impl Account {
    pub(super) fn new(username: String, credential: String, balance: Decimal) -> Self {
        debug_assert!(
            balance >= Decimal::ZERO && balance <= MAX_BALANCE,
            "account opened with out of range balance"
        );
        Self {
            username,
            credential,
            balance: balance.normalize(),
        }
    }

    /// Returns the username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Returns whether `credential` matches the stored one
    pub fn credential_matches(&self, credential: &str) -> bool {
        self.credential == credential
    }

    pub(super) fn set_credential(&mut self, credential: String) {
        self.credential = credential;
    }

    /// The balance after crediting `amount`, or `None` if it would pass [`MAX_BALANCE`].
    pub(super) fn credited(&self, amount: Decimal) -> Option<Decimal> {
        self.balance
            .checked_add(amount)
            .filter(|balance| *balance <= MAX_BALANCE)
    }

    /// The balance after debiting `amount`, or `None` if it would go negative.
    pub(super) fn debited(&self, amount: Decimal) -> Option<Decimal> {
        self.balance
            .checked_sub(amount)
            .filter(|balance| *balance >= Decimal::ZERO)
    }

    /// Store a balance computed by [`Account::credited`] or [`Account::debited`].
    pub(super) fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
        self.normalize();
        #[cfg(debug_assertions)]
        self.assert_invariant();
    }

    #[cfg(debug_assertions)]
    fn assert_invariant(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO && self.balance <= MAX_BALANCE,
            "Invariant violated: balance of {} out of range ({})",
            self.username,
            self.balance
        );
    }

    /// Trim trailing zeros so equal balances share one representation.
    fn normalize(&mut self) {
        self.balance = self.balance.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        Account::new("alice".to_owned(), "secret".to_owned(), balance)
    }

    #[test]
    fn test_new_account_keeps_fields() {
        let account = account(dec!(10));
        assert_eq!(account.username(), "alice");
        assert_eq!(account.balance(), dec!(10));
        assert!(account.credential_matches("secret"));
    }

    #[test]
    fn test_credited_adds_amount() {
        let mut account = account(dec!(100));
        let balance = account.credited(dec!(50.5)).unwrap();
        account.set_balance(balance);
        assert_eq!(account.balance(), dec!(150.5));
    }

    #[test]
    fn test_debited_subtracts_amount() {
        let mut account = account(dec!(100));
        let balance = account.debited(dec!(40)).unwrap();
        account.set_balance(balance);
        assert_eq!(account.balance(), dec!(60));
    }

    #[test]
    fn test_debited_to_zero() {
        let account = account(dec!(25.25));
        assert_eq!(account.debited(dec!(25.25)), Some(Decimal::ZERO));
    }

    #[test]
    fn test_debited_refuses_negative_result() {
        let account = account(dec!(25));
        assert_eq!(account.debited(dec!(25.0001)), None);
        assert_eq!(account.balance(), dec!(25));
    }

    #[test]
    fn test_credited_stops_at_max_balance() {
        let account = account(MAX_BALANCE);
        assert_eq!(account.credited(Decimal::ZERO), Some(MAX_BALANCE));
        assert_eq!(account.credited(dec!(0.0001)), None);
        assert_eq!(account.credited(Decimal::MAX), None);
    }

    #[test]
    fn test_max_balance_keeps_four_decimal_places_exact() {
        let below = MAX_BALANCE - dec!(0.0001);
        assert_eq!(below + dec!(0.0001), MAX_BALANCE);
        assert_eq!(below.scale(), 4);
    }

    #[test]
    fn test_set_credential_replaces_old_one() {
        let mut account = account(dec!(1));
        account.set_credential("new".to_owned());
        assert!(account.credential_matches("new"));
        assert!(!account.credential_matches("secret"));
        assert_eq!(account.balance(), dec!(1));
    }

    #[test]
    fn test_credential_match_is_exact() {
        let account = account(Decimal::ZERO);
        assert!(!account.credential_matches("Secret"));
        assert!(!account.credential_matches("secret "));
        assert!(!account.credential_matches(""));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let rendered = format!("{:?}", account(dec!(1)));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_normalize_trims_trailing_zeros() {
        let mut account = account(Decimal::ZERO);
        account.set_balance(dec!(100.0000));
        assert_eq!(account.balance().to_string(), "100");
    }
}
