mod change_credential;
mod credit;
mod debit;
mod delete;
mod register;
mod transfer;

pub use change_credential::ChangeCredential;
pub use credit::Credit;
pub use debit::Debit;
pub use delete::Delete;
pub use register::Register;
pub use transfer::Transfer;

use super::Decimal;
use crate::registry::error::CommandError;
use serde::Deserialize;

/// Raw command record as parsed from CSV input.
/// This is the unvalidated form that needs conversion to a specific Command type.
#[derive(Debug, Deserialize, Clone)]
pub struct CommandRecord {
    #[serde(rename = "type")]
    pub command_type: CommandType,
    /// The account the command acts on (the sender for transfers)
    pub username: String,
    /// Required for Register/ChangeCredential, must be None otherwise
    pub credential: Option<String>,
    /// Required for Transfer, must be None otherwise
    pub recipient: Option<String>,
    /// Required for Credit/Debit/Transfer, optional for Register, None otherwise
    pub amount: Option<Decimal>,
}

impl std::fmt::Display for CommandRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (username: {}", self.command_type, self.username)?;
        if self.credential.is_some() {
            write!(f, ", credential: <redacted>")?;
        }
        if let Some(recipient) = &self.recipient {
            write!(f, ", recipient: {recipient}")?;
        }
        if let Some(amount) = self.amount {
            write!(f, ", amount: {amount}")?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Register,
    Credit,
    Debit,
    Transfer,
    Delete,
    ChangeCredential,
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandType::Register => write!(f, "register"),
            CommandType::Credit => write!(f, "credit"),
            CommandType::Debit => write!(f, "debit"),
            CommandType::Transfer => write!(f, "transfer"),
            CommandType::Delete => write!(f, "delete"),
            CommandType::ChangeCredential => write!(f, "change_credential"),
        }
    }
}

/// A validated command ready to be applied to the registry.
///
/// Validation here covers the shape of the row only. Whether an amount is
/// acceptable is decided by the registry when the command is applied.
#[derive(Debug, Clone)]
pub enum Command {
    Register(Register),
    Credit(Credit),
    Debit(Debit),
    Transfer(Transfer),
    Delete(Delete),
    ChangeCredential(ChangeCredential),
}

impl TryFrom<CommandRecord> for Command {
    type Error = CommandError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        match record.command_type {
            CommandType::Register => Ok(Command::Register(Register::try_from(record)?)),
            CommandType::Credit => Ok(Command::Credit(Credit::try_from(record)?)),
            CommandType::Debit => Ok(Command::Debit(Debit::try_from(record)?)),
            CommandType::Transfer => Ok(Command::Transfer(Transfer::try_from(record)?)),
            CommandType::Delete => Ok(Command::Delete(Delete::try_from(record)?)),
            CommandType::ChangeCredential => Ok(Command::ChangeCredential(
                ChangeCredential::try_from(record)?,
            )),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Register(r) => write!(
                f,
                "[register] username={} balance={}",
                r.username(),
                r.initial_balance()
            ),
            Command::Credit(c) => write!(
                f,
                "[credit] username={} amount={}",
                c.username(),
                c.amount()
            ),
            Command::Debit(d) => write!(
                f,
                "[debit] username={} amount={}",
                d.username(),
                d.amount()
            ),
            Command::Transfer(t) => write!(
                f,
                "[transfer] sender={} recipient={} amount={}",
                t.sender(),
                t.recipient(),
                t.amount()
            ),
            Command::Delete(d) => write!(f, "[delete] username={}", d.username()),
            Command::ChangeCredential(c) => {
                write!(f, "[change_credential] username={}", c.username())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_display_hides_credential() {
        let record = CommandRecord {
            command_type: CommandType::Register,
            username: "alice".to_owned(),
            credential: Some("hunter2".to_owned()),
            recipient: None,
            amount: Some(dec!(10)),
        };
        let rendered = record.to_string();
        assert_eq!(
            rendered,
            "register (username: alice, credential: <redacted>, amount: 10)"
        );
    }

    #[test]
    fn test_dispatches_on_command_type() {
        let record = CommandRecord {
            command_type: CommandType::Transfer,
            username: "dan".to_owned(),
            credential: None,
            recipient: Some("erin".to_owned()),
            amount: Some(dec!(200)),
        };
        let command = Command::try_from(record).unwrap();
        assert!(matches!(command, Command::Transfer(_)));
        assert_eq!(
            command.to_string(),
            "[transfer] sender=dan recipient=erin amount=200"
        );
    }

    #[test]
    fn test_command_type_parses_snake_case() {
        let input = "type,username,credential,recipient,amount\nchange_credential,bob,pw,,\n";
        let mut rdr = csv::Reader::from_reader(input.as_bytes());
        let record: CommandRecord = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(record.command_type, CommandType::ChangeCredential);
        assert_eq!(record.credential.as_deref(), Some("pw"));
        assert!(record.recipient.is_none());
        assert!(record.amount.is_none());
    }
}
