use crate::registry::{
    command::{CommandRecord, CommandType},
    error::CommandError,
};

/// A validated delete command.
///
/// Removes the account entirely, balance included.
#[derive(Debug, Clone)]
pub struct Delete {
    username: String,
}

impl Delete {
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl TryFrom<CommandRecord> for Delete {
    type Error = CommandError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        match record {
            CommandRecord {
                command_type: CommandType::Delete,
                username,
                credential: None,
                recipient: None,
                amount: None,
            } => Ok(Delete { username }),
            _ => Err(CommandError::InvalidCommand(record)),
        }
    }
}
