use crate::registry::{
    command::{CommandRecord, CommandType},
    error::CommandError,
    Decimal,
};

/// A validated register command.
///
/// Creates the account, or replaces an existing account with the same username.
/// The initial balance defaults to zero when the row leaves it empty.
#[derive(Debug, Clone)]
pub struct Register {
    username: String,
    credential: String,
    initial_balance: Decimal,
}

impl Register {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn initial_balance(&self) -> Decimal {
        self.initial_balance
    }
}

impl TryFrom<CommandRecord> for Register {
    type Error = CommandError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        match record {
            CommandRecord {
                command_type: CommandType::Register,
                username,
                credential: Some(credential),
                recipient: None,
                amount,
            } => Ok(Register {
                username,
                credential,
                initial_balance: amount.unwrap_or(Decimal::ZERO),
            }),
            _ => Err(CommandError::InvalidCommand(record)),
        }
    }
}
