use crate::registry::{
    command::{CommandRecord, CommandType},
    error::CommandError,
};

/// A validated credential change. The balance is left untouched.
#[derive(Debug, Clone)]
pub struct ChangeCredential {
    username: String,
    new_credential: String,
}

impl ChangeCredential {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn new_credential(&self) -> &str {
        &self.new_credential
    }
}

impl TryFrom<CommandRecord> for ChangeCredential {
    type Error = CommandError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        match record {
            CommandRecord {
                command_type: CommandType::ChangeCredential,
                username,
                credential: Some(new_credential),
                recipient: None,
                amount: None,
            } => Ok(ChangeCredential {
                username,
                new_credential,
            }),
            _ => Err(CommandError::InvalidCommand(record)),
        }
    }
}
