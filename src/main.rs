use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::Write;

mod cli;
mod config;
mod employee;
mod error;
mod logging;
mod outreach;
mod session;
mod wizard;

use cli::{ComposeArgs, Command, DraftArgs, EmailArgs, RootArgs, WizardArgs};
use config::{AppConfig, ConfigOverrides};
use employee::RandomUserClient;
use outreach::DraftContext;
use session::{Session, TerminalHost};
use wizard::{GenerateOutcome, Wizard, LOOKUP_FAILED_MESSAGE};

#[derive(Serialize)]
struct DraftReport {
    sender_name: String,
    employee_first_name: String,
    employee_last_name: String,
    role: String,
    company: String,
    email: String,
    include_signature: bool,
    draft: String,
    mailto_link: Option<String>,
    linkedin_link: Option<String>,
}

fn main() -> Result<()> {
    let args = RootArgs::parse();
    logging::init(args.verbose);

    let overrides = ConfigOverrides {
        config_path: args.config,
        endpoint: args.endpoint,
        timeout_secs: args.timeout_secs,
    };

    match args.command {
        Command::Wizard(cmd) => cmd_wizard(&overrides, cmd),
        Command::Draft(cmd) => cmd_draft(&overrides, cmd),
        Command::Email(cmd) => cmd_email(cmd),
        Command::Compose(cmd) => cmd_compose(cmd),
        Command::Config => cmd_config(&overrides),
    }
}

fn client_for(config: &AppConfig) -> RandomUserClient {
    let client = RandomUserClient::new(config.endpoint.clone(), config.timeout());
    tracing::debug!(
        endpoint = client.endpoint(),
        timeout_secs = config.timeout_secs,
        "client ready"
    );
    client
}

fn cmd_wizard(overrides: &ConfigOverrides, args: WizardArgs) -> Result<()> {
    let config = config::resolve(overrides)?;
    let client = client_for(&config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(
        stdin.lock(),
        stdout.lock(),
        TerminalHost::new(args.print_links),
        &client,
    )
    .with_default_sender(config.sender_name.clone());
    session.run()
}

fn cmd_draft(overrides: &ConfigOverrides, args: DraftArgs) -> Result<()> {
    let config = config::resolve(overrides)?;
    let client = client_for(&config);

    let mut wizard = Wizard::new();
    wizard.set_user_name(args.name);
    wizard.submit_user()?;
    wizard.set_target(args.company, args.role)?;
    wizard.preset_include_signature(!args.no_signature);
    if wizard.generate(&client)? == GenerateOutcome::Failed {
        let message = wizard.error_message().unwrap_or(LOOKUP_FAILED_MESSAGE);
        return Err(anyhow!("{message}"));
    }

    let employee = wizard
        .employee()
        .context("lookup finished without an employee")?;
    let report = DraftReport {
        sender_name: wizard.user_name().to_string(),
        employee_first_name: employee.first_name.clone(),
        employee_last_name: employee.last_name.clone(),
        role: wizard.role().to_string(),
        company: wizard.company().to_string(),
        email: wizard.email().to_string(),
        include_signature: wizard.include_signature(),
        draft: wizard.draft().to_string(),
        mailto_link: wizard.mailto_link(),
        linkedin_link: wizard.linkedin_link(),
    };

    let mut out = std::io::stdout().lock();
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize draft report")?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    for (label, value) in wizard.summary() {
        writeln!(out, "{label:<9}{value}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", report.draft)?;
    writeln!(out)?;
    if let Some(link) = &report.mailto_link {
        writeln!(out, "Mail:     {link}")?;
    }
    if let Some(link) = &report.linkedin_link {
        writeln!(out, "LinkedIn: {link}")?;
    }
    Ok(())
}

fn cmd_email(args: EmailArgs) -> Result<()> {
    println!(
        "{}",
        outreach::guess_email(&args.first, &args.last, &args.company)
    );
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> Result<()> {
    let draft = outreach::compose_draft(&DraftContext {
        sender_name: args.name,
        recipient_first_name: args.recipient,
        role: args.role,
        company: args.company,
        include_signature: !args.no_signature,
    });
    println!("{draft}");
    Ok(())
}

fn cmd_config(overrides: &ConfigOverrides) -> Result<()> {
    let config = config::resolve(overrides)?;
    let json = serde_json::to_string_pretty(&config).context("serialize config")?;
    println!("{json}");
    Ok(())
}
