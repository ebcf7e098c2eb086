pub(crate) use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "account-registry",
    author,
    version,
    about = "Replay account commands against an in-memory registry",
    long_about = None,
    after_help = "OUTPUT:\n    Final accounts (username, balance) are printed to stdout in CSV format.\n    Credentials are never printed.\n\n    account-registry commands.csv > accounts.csv"
)]
pub struct Args {
    /// Path to the input commands CSV file
    #[arg(
        index = 1,
        value_name = "FILE",
        help = "Input CSV file with columns: type, username, credential, recipient, amount"
    )]
    pub input_file: PathBuf,

    /// Log the total balance across all accounts when done
    #[arg(long)]
    pub total: bool,
}
