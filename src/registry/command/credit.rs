use crate::registry::{
    command::{CommandRecord, CommandType},
    error::CommandError,
    Decimal,
};

/// A validated credit command.
///
/// Credits increase the user's balance by the given amount.
#[derive(Debug, Clone)]
pub struct Credit {
    username: String,
    amount: Decimal,
}

impl Credit {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl TryFrom<CommandRecord> for Credit {
    type Error = CommandError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        match record {
            CommandRecord {
                command_type: CommandType::Credit,
                username,
                credential: None,
                recipient: None,
                amount: Some(amount),
            } => Ok(Credit { username, amount }),
            _ => Err(CommandError::InvalidCommand(record)),
        }
    }
}
