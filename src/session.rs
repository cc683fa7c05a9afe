//! Interactive terminal front end for the wizard.
//!
//! The session reads one answer per line and writes prompts and results to a
//! writer, so tests can drive it with in-memory buffers. Clipboard and URL
//! opening go through [`Host`], which is handed the same writer.
use crate::employee::EmployeeSource;
use crate::wizard::{GenerateOutcome, Wizard, WizardStep};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

const DRAFT_BEGIN: &str = "----- draft -----";
const DRAFT_END: &str = "----- end draft -----";

const MENU: &str = "[s] toggle signature  [e] edit draft  [c] copy draft  [m] open mail  [l] search on LinkedIn  [q] quit";

/// Platform facilities the session hands text and links to.
pub trait Host {
    fn copy_text(&mut self, out: &mut dyn Write, text: &str) -> Result<()>;
    fn open_url(&mut self, out: &mut dyn Write, url: &str) -> Result<()>;
}

/// Host for a real terminal: prints copied text, opens links with the
/// system opener.
pub struct TerminalHost {
    print_links: bool,
}

impl TerminalHost {
    pub fn new(print_links: bool) -> Self {
        Self { print_links }
    }
}

impl Host for TerminalHost {
    fn copy_text(&mut self, out: &mut dyn Write, text: &str) -> Result<()> {
        writeln!(out, "{DRAFT_BEGIN}\n{text}\n{DRAFT_END}").context("write draft")?;
        Ok(())
    }

    fn open_url(&mut self, out: &mut dyn Write, url: &str) -> Result<()> {
        if !self.print_links {
            match open::that(url) {
                Ok(()) => return Ok(()),
                Err(err) => tracing::warn!(error = %err, "could not open link; printing it"),
            }
        }
        writeln!(out, "{url}").context("write link")?;
        Ok(())
    }
}

pub struct Session<'a, R, W, H> {
    input: R,
    output: W,
    host: H,
    source: &'a dyn EmployeeSource,
    wizard: Wizard,
    default_sender: Option<String>,
}

impl<'a, R, W, H> Session<'a, R, W, H>
where
    R: BufRead,
    W: Write,
    H: Host,
{
    pub fn new(input: R, output: W, host: H, source: &'a dyn EmployeeSource) -> Self {
        Self {
            input,
            output,
            host,
            source,
            wizard: Wizard::new(),
            default_sender: None,
        }
    }

    /// Offer `name` as the answer to the name prompt.
    pub fn with_default_sender(mut self, name: Option<String>) -> Self {
        self.default_sender = name;
        self
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "CoffeeTBL")?;
        writeln!(self.output, "Email Lookup & Outreach")?;
        loop {
            let keep_going = match self.wizard.step() {
                WizardStep::CollectUser => self.collect_user()?,
                WizardStep::CollectTarget => self.collect_target()?,
                WizardStep::ShowResult => return self.show_result(),
            };
            if !keep_going {
                tracing::debug!(step = %self.wizard.step(), "input ended");
                return Ok(());
            }
        }
    }

    fn collect_user(&mut self) -> Result<bool> {
        writeln!(self.output)?;
        writeln!(self.output, "Your Info")?;
        writeln!(self.output, "We'll use this in the closing of your email.")?;
        let default = self.default_sender.clone();
        loop {
            let Some(name) = self.ask("Your name", default.as_deref())? else {
                return Ok(false);
            };
            self.wizard.set_user_name(name);
            match self.wizard.submit_user() {
                Ok(()) => return Ok(true),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn collect_target(&mut self) -> Result<bool> {
        writeln!(self.output)?;
        writeln!(self.output, "Employee Info")?;
        writeln!(
            self.output,
            "Tell us the company and the role you want to talk to."
        )?;
        let company_default = non_empty(self.wizard.company());
        let Some(company) = self.ask_required("Company (ex: Fidelity)", company_default)? else {
            return Ok(false);
        };
        let role_default = non_empty(self.wizard.role());
        let Some(role) = self.ask_required("Role (ex: Product Manager)", role_default)? else {
            return Ok(false);
        };
        self.wizard.set_target(company, role)?;

        writeln!(self.output, "Finding person...")?;
        self.output.flush()?;
        if self.wizard.generate(self.source)? == GenerateOutcome::Failed {
            if let Some(message) = self.wizard.error_message() {
                writeln!(self.output, "{message}")?;
            }
        }
        Ok(true)
    }

    fn show_result(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Result")?;
        for (label, value) in self.wizard.summary() {
            writeln!(self.output, "{label:<9}{value}")?;
        }
        self.print_draft()?;
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.ask("Action", None)? else {
                return Ok(());
            };
            match choice.trim() {
                "s" => {
                    let include = !self.wizard.include_signature();
                    self.wizard.set_include_signature(include)?;
                    let state = if include { "on" } else { "off" };
                    writeln!(self.output, "Include my name at the end: {state}")?;
                    self.print_draft()?;
                }
                "e" => {
                    writeln!(
                        self.output,
                        "Enter the new draft; finish with a line containing only '.'"
                    )?;
                    let Some(text) = self.read_block()? else {
                        return Ok(());
                    };
                    self.wizard.edit_draft(text)?;
                    self.print_draft()?;
                }
                "c" => {
                    self.host.copy_text(&mut self.output, self.wizard.draft())?;
                    writeln!(self.output, "Draft copied.")?;
                }
                "m" => match self.wizard.mailto_link() {
                    Some(link) => self.host.open_url(&mut self.output, &link)?,
                    None => writeln!(self.output, "Could not build a mail link.")?,
                },
                "l" => match self.wizard.linkedin_link() {
                    Some(link) => self.host.open_url(&mut self.output, &link)?,
                    None => writeln!(self.output, "Could not build a LinkedIn link.")?,
                },
                "q" => return Ok(()),
                _ => {}
            }
        }
    }

    fn print_draft(&mut self) -> Result<()> {
        writeln!(self.output, "Email Draft")?;
        writeln!(self.output, "{DRAFT_BEGIN}")?;
        writeln!(self.output, "{}", self.wizard.draft())?;
        writeln!(self.output, "{DRAFT_END}")?;
        Ok(())
    }

    /// Ask until a non-empty answer (or the default) is given.
    fn ask_required(&mut self, label: &str, default: Option<String>) -> Result<Option<String>> {
        loop {
            match self.ask(label, default.as_deref())? {
                None => return Ok(None),
                Some(answer) if answer.is_empty() => {
                    writeln!(self.output, "{label} is required.")?;
                }
                Some(answer) => return Ok(Some(answer)),
            }
        }
    }

    /// Prompt once. `None` means input ended.
    fn ask(&mut self, label: &str, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(value) => write!(self.output, "{label} [{value}]: ")?,
            None => write!(self.output, "{label}: ")?,
        }
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        if line.is_empty() {
            if let Some(value) = default {
                return Ok(Some(value.to_string()));
            }
        }
        Ok(Some(line))
    }

    fn read_block(&mut self) -> Result<Option<String>> {
        let mut lines = Vec::new();
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line == "." {
                return Ok(Some(lines.join("\n")));
            }
            lines.push(line);
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
