//! In-memory account registry.
//!
//! Users are keyed by username and hold a credential and a non-negative
//! balance. Balances change through credits, debits and atomic two-party
//! transfers; a failed operation never leaves a partial change behind.

mod registry;

pub use registry::{
    Account, AccountRegistry, ChangeCredential, Command, CommandError, CommandRecord, CommandType,
    Credit, Debit, Decimal, Delete, Error, Register, RegistryError, SharedRegistry, Transfer,
    MAX_BALANCE,
};
