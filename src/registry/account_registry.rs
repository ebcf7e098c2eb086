use std::collections::HashMap;
use std::io::{Read, Write};

use super::account::{Account, MAX_BALANCE};
use super::command::{
    ChangeCredential, Command, CommandRecord, Credit, Debit, Delete, Register, Transfer,
};
use super::error::{Error, RegistryError};
use super::Decimal;

/// In-memory registry of user accounts.
///
/// The registry is the only owner of its accounts. Callers get shared views
/// through [`AccountRegistry::account`] and [`AccountRegistry::accounts`];
/// every mutation goes through a registry method that checks the
/// non-negative balance invariant before touching anything.
///
/// The sum of all balances never exceeds [`MAX_BALANCE`]; operations that
/// would push it past the limit fail with `Overflow`.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    /// Maps username to the account record
    accounts: HashMap<String, Account>,
    /// Running sum of every balance in `accounts`
    total: Decimal,
}

impl AccountRegistry {
    /// Create a new, empty `AccountRegistry`
    pub fn new() -> Self {
        log::trace!("AccountRegistry initialized");
        Self {
            accounts: HashMap::new(),
            total: Decimal::ZERO,
        }
    }

    /// Register `username` with a zero balance. See [`AccountRegistry::register_with_balance`].
    pub fn register(
        &mut self,
        username: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.register_with_balance(username, credential, Decimal::ZERO)
    }

    /// Insert the account for `username`, replacing any account already
    /// registered under that name (its balance is discarded).
    ///
    /// Fails with `InvalidAmount` for a negative initial balance or one with
    /// more than 4 decimal places, `InvalidUsername` for an empty username and
    /// `Overflow` if the registry total would pass [`MAX_BALANCE`].
    pub fn register_with_balance(
        &mut self,
        username: impl Into<String>,
        credential: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<(), RegistryError> {
        let username = username.into();
        Self::check_new_account(&username, initial_balance)?;

        let replaced = self
            .accounts
            .get(&username)
            .map_or(Decimal::ZERO, Account::balance);
        let total = self.checked_total(&username, replaced, initial_balance)?;

        let account = Account::new(username.clone(), credential.into(), initial_balance);
        self.total = total;
        if let Some(previous) = self.accounts.insert(username.clone(), account) {
            log::debug!(
                "[register] Replaced account {username} (discarded balance={})",
                previous.balance()
            );
        } else {
            log::debug!("[register] Created account {username} balance={initial_balance}");
        }
        Ok(())
    }

    /// Like [`AccountRegistry::register_with_balance`], but refuses to replace
    /// an existing account.
    pub fn open_account(
        &mut self,
        username: impl Into<String>,
        credential: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<(), RegistryError> {
        let username = username.into();
        Self::check_new_account(&username, initial_balance)?;

        if self.accounts.contains_key(&username) {
            return Err(RegistryError::AlreadyExists { username });
        }
        let total = self.checked_total(&username, Decimal::ZERO, initial_balance)?;

        let account = Account::new(username.clone(), credential.into(), initial_balance);
        self.accounts.insert(username.clone(), account);
        self.total = total;
        log::debug!("[open] Created account {username} balance={initial_balance}");
        Ok(())
    }

    /// Returns `true` iff `username` exists and its credential equals `credential`.
    pub fn validate_credential(&self, username: &str, credential: &str) -> bool {
        self.accounts
            .get(username)
            .is_some_and(|account| account.credential_matches(credential))
    }

    /// Returns the balance of `username`
    pub fn balance(&self, username: &str) -> Result<Decimal, RegistryError> {
        self.accounts
            .get(username)
            .map(Account::balance)
            .ok_or_else(|| RegistryError::user_not_found(username))
    }

    pub fn credit(&mut self, username: &str, amount: Decimal) -> Result<(), RegistryError> {
        log::trace!("[credit] username={username} amount={amount}");
        Self::check_amount(amount)?;

        let account = self.account_ref(username)?;
        let balance = Self::credited_balance(account, amount)?;
        let total = self.checked_total(username, Decimal::ZERO, amount)?;

        self.account_mut(username)?.set_balance(balance);
        self.total = total;

        log::trace!("[credit] username={username} amount={amount} -> new_balance={balance}");
        Ok(())
    }

    pub fn debit(&mut self, username: &str, amount: Decimal) -> Result<(), RegistryError> {
        log::trace!("[debit] username={username} amount={amount}");
        Self::check_amount(amount)?;

        let balance = Self::debited_balance(self.account_ref(username)?, amount)?;

        self.account_mut(username)?.set_balance(balance);
        self.total -= amount;

        log::trace!("[debit] username={username} amount={amount} -> new_balance={balance}");
        Ok(())
    }

    /// Remove the account for `username` entirely.
    pub fn delete_account(&mut self, username: &str) -> Result<(), RegistryError> {
        let removed = self
            .accounts
            .remove(username)
            .ok_or_else(|| RegistryError::user_not_found(username))?;
        self.total -= removed.balance();

        log::debug!(
            "[delete] Removed account {username} (balance={})",
            removed.balance()
        );
        Ok(())
    }

    pub fn change_credential(
        &mut self,
        username: &str,
        new_credential: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.account_mut(username)?
            .set_credential(new_credential.into());
        log::trace!("[change_credential] username={username}");
        Ok(())
    }

    /// Exact sum of all balances; zero for an empty registry.
    pub fn total_balance(&self) -> Decimal {
        self.total
    }

    /// Move `amount` from `sender` to `recipient`.
    ///
    /// Both new balances are computed before either account is touched, so a
    /// failed transfer leaves both balances as they were. Transferring to
    /// oneself only checks the funds and changes nothing.
    pub fn transfer(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: Decimal,
    ) -> Result<(), RegistryError> {
        log::trace!("[transfer] sender={sender} recipient={recipient} amount={amount}");
        Self::check_amount(amount)?;

        for username in [sender, recipient] {
            if !self.accounts.contains_key(username) {
                return Err(RegistryError::user_not_found(username));
            }
        }
        let sender_balance = Self::debited_balance(self.account_ref(sender)?, amount)?;

        if sender == recipient {
            log::trace!("[transfer] self-transfer for {sender}, nothing to move");
            return Ok(());
        }

        let recipient_balance = Self::credited_balance(self.account_ref(recipient)?, amount)?;

        self.account_mut(sender)?.set_balance(sender_balance);
        self.account_mut(recipient)?.set_balance(recipient_balance);

        log::trace!(
            "[transfer] sender={sender} recipient={recipient} amount={amount} -> balances {}/{}",
            self.balance(sender)?,
            self.balance(recipient)?
        );
        Ok(())
    }

    /// Shared view of the account for `username`, if any
    pub fn account(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    /// Iterate over all accounts in no particular order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Returns the number of accounts in the registry
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account_ref(&self, username: &str) -> Result<&Account, RegistryError> {
        self.accounts
            .get(username)
            .ok_or_else(|| RegistryError::user_not_found(username))
    }

    fn account_mut(&mut self, username: &str) -> Result<&mut Account, RegistryError> {
        self.accounts
            .get_mut(username)
            .ok_or_else(|| RegistryError::user_not_found(username))
    }

    fn check_amount(amount: Decimal) -> Result<(), RegistryError> {
        if amount < Decimal::ZERO || amount.normalize().scale() > 4 {
            return Err(RegistryError::InvalidAmount { amount });
        }
        Ok(())
    }

    fn debited_balance(account: &Account, amount: Decimal) -> Result<Decimal, RegistryError> {
        account
            .debited(amount)
            .ok_or_else(|| RegistryError::InsufficientFunds {
                username: account.username().to_owned(),
                available: account.balance(),
                requested: amount,
            })
    }

    fn credited_balance(account: &Account, amount: Decimal) -> Result<Decimal, RegistryError> {
        account
            .credited(amount)
            .ok_or_else(|| RegistryError::Overflow {
                username: account.username().to_owned(),
            })
    }

    /// The registry total after `removed` leaves and `added` arrives for `username`.
    fn checked_total(
        &self,
        username: &str,
        removed: Decimal,
        added: Decimal,
    ) -> Result<Decimal, RegistryError> {
        (self.total - removed)
            .checked_add(added)
            .filter(|total| *total <= MAX_BALANCE)
            .ok_or_else(|| RegistryError::Overflow {
                username: username.to_owned(),
            })
    }

    fn check_new_account(username: &str, initial_balance: Decimal) -> Result<(), RegistryError> {
        if username.is_empty() {
            return Err(RegistryError::InvalidUsername);
        }
        Self::check_amount(initial_balance)
    }
}

// =============================================================================
// Batch commands
// =============================================================================

impl AccountRegistry {
    /// Replay a CSV command stream from any source (File, `TcpStream`, etc.)
    ///
    /// Malformed rows abort the batch. Rows the registry refuses (unknown user,
    /// insufficient funds, ...) are logged and skipped.
    /// The CSV reader is buffered already; do not wrap `reader` in an `io::BufReader`.
    pub fn process_commands<R: Read>(&mut self, reader: R) -> Result<(), Error> {
        log::info!("Starting command processing");

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut processed = 0u64;
        let mut skipped = 0u64;

        for result in csv_reader.deserialize() {
            let record: CommandRecord = result?;

            let row_num = processed + skipped + 1;
            log::trace!("[row {row_num}] Parsing: {record}");

            let command = Command::try_from(record)?;

            if let Err(e) = self.apply_command(command) {
                log::warn!("[row {row_num}] - Skipped: {e}");
                skipped += 1;
            } else {
                processed += 1;
            }
        }

        log::info!(
            "Processing complete: {} processed, {} skipped, {} accounts",
            processed,
            skipped,
            self.accounts.len()
        );
        Ok(())
    }

    /// Write `username,balance` rows to any sink (Stdout, File, `TcpStream`, etc.)
    /// Credentials are never written.
    pub fn export_accounts<W: Write>(&self, writer: W) -> Result<(), Error> {
        log::info!("Exporting {} accounts", self.accounts.len());

        let mut csv_writer = csv::Writer::from_writer(writer);
        for account in self.accounts.values() {
            csv_writer.serialize(account)?;
        }
        csv_writer.flush()?;

        log::trace!("Export complete");
        Ok(())
    }

    /// Apply a single validated command.
    pub fn apply_command(&mut self, command: Command) -> Result<(), RegistryError> {
        log::trace!("Applying command: {command}");
        match command {
            Command::Register(register) => self.handle_register(&register),
            Command::Credit(credit) => self.handle_credit(&credit),
            Command::Debit(debit) => self.handle_debit(&debit),
            Command::Transfer(transfer) => self.handle_transfer(&transfer),
            Command::Delete(delete) => self.handle_delete(&delete),
            Command::ChangeCredential(change) => self.handle_change_credential(&change),
        }
    }

    fn handle_register(&mut self, register: &Register) -> Result<(), RegistryError> {
        self.register_with_balance(
            register.username(),
            register.credential(),
            register.initial_balance(),
        )
    }

    fn handle_credit(&mut self, credit: &Credit) -> Result<(), RegistryError> {
        self.credit(credit.username(), credit.amount())
    }

    fn handle_debit(&mut self, debit: &Debit) -> Result<(), RegistryError> {
        self.debit(debit.username(), debit.amount())
    }

    fn handle_transfer(&mut self, transfer: &Transfer) -> Result<(), RegistryError> {
        self.transfer(transfer.sender(), transfer.recipient(), transfer.amount())
    }

    fn handle_delete(&mut self, delete: &Delete) -> Result<(), RegistryError> {
        self.delete_account(delete.username())
    }

    fn handle_change_credential(&mut self, change: &ChangeCredential) -> Result<(), RegistryError> {
        self.change_credential(change.username(), change.new_credential())
    }
}
