//! Account registry module.
//!
//! This module contains the account state logic including:
//! - `AccountRegistry` - Owns all accounts and enforces the balance invariant
//! - `SharedRegistry` - Thread-safe handle for concurrent callers
//! - `Account` - A user's credential and balance
//! - `Command` types - Register, Credit, Debit, Transfer, Delete, `ChangeCredential`
//! - `Error` types - Batch and registry errors

mod account;
mod account_registry;
mod command;
mod error;
mod shared;

pub use rust_decimal::Decimal;

pub use account::{Account, MAX_BALANCE};
pub use account_registry::AccountRegistry;
pub use command::{
    ChangeCredential, Command, CommandRecord, CommandType, Credit, Debit, Delete, Register, Transfer,
};
pub use error::{CommandError, Error, RegistryError};
pub use shared::SharedRegistry;
