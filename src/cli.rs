use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dashbot")]
#[command(author, version, about = "Telegram bot that keeps a single dashboard message per chat", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling unless --webhook is given)
    Run {
        /// Receive updates through the configured webhook instead of long polling
        #[arg(long)]
        webhook: bool,
    },

    /// Load the configuration, print a summary and exit
    CheckConfig,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
