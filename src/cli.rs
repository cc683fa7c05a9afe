//! CLI argument parsing.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "coffeetbl",
    version,
    about = "Find someone to email, guess their address, and draft a coffee-chat ask",
    after_help = "Examples:\n  coffeetbl wizard\n  coffeetbl draft --name Sam --company \"Acme Corp\" --role Engineer\n  coffeetbl draft --name Sam --company Acme --role Engineer --no-signature --json\n  coffeetbl email --first Jane --last Doe --company \"Acme Corp\"\n  coffeetbl compose --name Sam --recipient Alex --company Acme --role Engineer",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// JSON config file (default: <config dir>/coffeetbl/config.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Random user endpoint
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "N", global = true)]
    pub timeout_secs: Option<u64>,

    /// Emit debug logs to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Wizard(WizardArgs),
    Draft(DraftArgs),
    Email(EmailArgs),
    Compose(ComposeArgs),
    /// Print the effective configuration as JSON
    Config,
}

/// Interactive three-step flow.
#[derive(Parser, Debug)]
#[command(about = "Run the interactive wizard")]
pub struct WizardArgs {
    /// Print links instead of opening them
    #[arg(long)]
    pub print_links: bool,
}

/// One-shot lookup and draft.
#[derive(Parser, Debug)]
#[command(about = "Look up a random employee and print the draft")]
pub struct DraftArgs {
    /// Your name, used in the intro and signature
    #[arg(long)]
    pub name: String,

    /// Company the employee works at
    #[arg(long)]
    pub company: String,

    /// Role you want to talk to
    #[arg(long)]
    pub role: String,

    /// Leave the signature block off the draft
    #[arg(long)]
    pub no_signature: bool,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Print the guessed email address for a name and company")]
pub struct EmailArgs {
    #[arg(long)]
    pub first: String,

    #[arg(long, default_value = "")]
    pub last: String,

    #[arg(long)]
    pub company: String,
}

#[derive(Parser, Debug)]
#[command(about = "Print a draft without looking anyone up")]
pub struct ComposeArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Recipient first name
    #[arg(long)]
    pub recipient: String,

    #[arg(long)]
    pub company: String,

    #[arg(long)]
    pub role: String,

    /// Leave the signature block off the draft
    #[arg(long)]
    pub no_signature: bool,
}
