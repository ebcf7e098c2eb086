use crate::registry::{
    command::{CommandRecord, CommandType},
    error::CommandError,
    Decimal,
};

/// A validated debit command.
///
/// Debits decrease the user's balance. If the balance is lower than the
/// amount, the registry refuses the debit.
#[derive(Debug, Clone)]
pub struct Debit {
    username: String,
    amount: Decimal,
}

impl Debit {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl TryFrom<CommandRecord> for Debit {
    type Error = CommandError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        match record {
            CommandRecord {
                command_type: CommandType::Debit,
                username,
                credential: None,
                recipient: None,
                amount: Some(amount),
            } => Ok(Debit { username, amount }),
            _ => Err(CommandError::InvalidCommand(record)),
        }
    }
}
