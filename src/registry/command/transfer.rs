use crate::registry::{
    command::{CommandRecord, CommandType},
    error::CommandError,
    Decimal,
};

/// A validated transfer command.
///
/// Moves `amount` from the sender (the row's username) to the recipient as a
/// single unit: both balances change or neither does.
#[derive(Debug, Clone)]
pub struct Transfer {
    sender: String,
    recipient: String,
    amount: Decimal,
}

impl Transfer {
    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl TryFrom<CommandRecord> for Transfer {
    type Error = CommandError;

    fn try_from(record: CommandRecord) -> Result<Self, Self::Error> {
        match record {
            CommandRecord {
                command_type: CommandType::Transfer,
                username,
                credential: None,
                recipient: Some(recipient),
                amount: Some(amount),
            } => Ok(Transfer {
                sender: username,
                recipient,
                amount,
            }),
            _ => Err(CommandError::InvalidCommand(record)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_record(recipient: Option<&str>, amount: Option<Decimal>) -> CommandRecord {
        CommandRecord {
            command_type: CommandType::Transfer,
            username: "dan".to_owned(),
            credential: None,
            recipient: recipient.map(str::to_owned),
            amount,
        }
    }

    #[test]
    fn test_valid_transfer() {
        let transfer = Transfer::try_from(make_record(Some("erin"), Some(dec!(200)))).unwrap();

        assert_eq!(transfer.sender(), "dan");
        assert_eq!(transfer.recipient(), "erin");
        assert_eq!(transfer.amount(), dec!(200));
    }

    #[test]
    fn test_self_transfer_is_a_valid_shape() {
        let transfer = Transfer::try_from(make_record(Some("dan"), Some(dec!(1)))).unwrap();
        assert_eq!(transfer.sender(), transfer.recipient());
    }

    #[test]
    fn test_rejects_missing_recipient() {
        assert!(Transfer::try_from(make_record(None, Some(dec!(1)))).is_err());
    }

    #[test]
    fn test_rejects_missing_amount() {
        assert!(Transfer::try_from(make_record(Some("erin"), None)).is_err());
    }

    #[test]
    fn test_rejects_wrong_command_type() {
        let mut record = make_record(Some("erin"), Some(dec!(1)));
        record.command_type = CommandType::Debit;
        assert!(Transfer::try_from(record).is_err());
    }
}
