//! Three-step outreach wizard.
//!
//! The wizard owns the form fields and derived values and only moves forward:
//! collect the sender, collect the target, show the result. Fetching is split
//! into [`Wizard::begin_generate`] and [`Wizard::finish_generate`] so the
//! loading flag is observable while a lookup is outstanding; the
//! [`PendingFetch`] token makes a second concurrent lookup impossible, is
//! consumed when the result is applied, and is only accepted by the wizard
//! that issued it.
use crate::employee::{Employee, EmployeeSource};
use crate::error::{FetchError, WizardError};
use crate::outreach::{self, DraftContext};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIZARD_ID: AtomicU64 = AtomicU64::new(1);

/// Message shown for any failed lookup, whatever the cause.
pub const LOOKUP_FAILED_MESSAGE: &str = "Could not load employee. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    CollectUser,
    CollectTarget,
    ShowResult,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::CollectUser => "collect_user",
            WizardStep::CollectTarget => "collect_target",
            WizardStep::ShowResult => "show_result",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof that a lookup was started; hand it back with the result.
#[derive(Debug)]
#[must_use = "a pending fetch must be finished to clear the loading flag"]
pub struct PendingFetch {
    wizard_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    Ready,
    Failed,
}

#[derive(Debug, Default)]
struct ResultState {
    employee: Option<Employee>,
    email: String,
    draft: String,
}

#[derive(Debug)]
pub struct Wizard {
    id: u64,
    step: WizardStep,
    user_name: String,
    company: String,
    role: String,
    include_signature: bool,
    loading: bool,
    error_message: Option<String>,
    result: ResultState,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            id: NEXT_WIZARD_ID.fetch_add(1, Ordering::Relaxed),
            step: WizardStep::CollectUser,
            user_name: String::new(),
            company: String::new(),
            role: String::new(),
            include_signature: true,
            loading: false,
            error_message: None,
            result: ResultState::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn include_signature(&self) -> bool {
        self.include_signature
    }

    pub fn employee(&self) -> Option<&Employee> {
        self.result.employee.as_ref()
    }

    pub fn email(&self) -> &str {
        &self.result.email
    }

    pub fn draft(&self) -> &str {
        &self.result.draft
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user_name = name.into();
    }

    /// Step 1 → step 2.
    pub fn submit_user(&mut self) -> Result<(), WizardError> {
        self.require_step(WizardStep::CollectUser)?;
        if self.user_name.is_empty() {
            return Err(WizardError::MissingUserName);
        }
        self.step = WizardStep::CollectTarget;
        tracing::debug!(step = %self.step, "advanced");
        Ok(())
    }

    pub fn set_target(
        &mut self,
        company: impl Into<String>,
        role: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.require_step(WizardStep::CollectTarget)?;
        self.company = company.into();
        self.role = role.into();
        Ok(())
    }

    /// Set the signature option before a lookup; it is carried into the draft.
    pub fn preset_include_signature(&mut self, include: bool) {
        self.include_signature = include;
    }

    /// Start a lookup. Fails if one is already outstanding or the target is
    /// incomplete.
    pub fn begin_generate(&mut self) -> Result<PendingFetch, WizardError> {
        self.require_step(WizardStep::CollectTarget)?;
        if self.loading {
            return Err(WizardError::FetchInFlight);
        }
        if self.company.is_empty() || self.role.is_empty() {
            return Err(WizardError::MissingTarget);
        }
        self.error_message = None;
        self.loading = true;
        Ok(PendingFetch { wizard_id: self.id })
    }

    /// Apply the lookup result started by [`Wizard::begin_generate`].
    ///
    /// Tokens issued by another wizard, or arriving when no lookup is
    /// outstanding, are rejected without touching state.
    pub fn finish_generate(
        &mut self,
        pending: PendingFetch,
        result: Result<Employee, FetchError>,
    ) -> Result<GenerateOutcome, WizardError> {
        if pending.wizard_id != self.id || !self.loading {
            return Err(WizardError::UnexpectedFetch);
        }
        self.require_step(WizardStep::CollectTarget)?;
        self.loading = false;
        Ok(match result {
            Ok(employee) => {
                self.result.email =
                    outreach::guess_email(&employee.first_name, &employee.last_name, &self.company);
                self.result.employee = Some(employee);
                self.result.draft = outreach::compose_draft(&self.draft_context());
                self.step = WizardStep::ShowResult;
                tracing::debug!(step = %self.step, email = %self.result.email, "advanced");
                GenerateOutcome::Ready
            }
            Err(err) => {
                tracing::warn!(error = %err, "employee lookup failed");
                self.error_message = Some(LOOKUP_FAILED_MESSAGE.to_string());
                GenerateOutcome::Failed
            }
        })
    }

    /// Begin, fetch from `source`, and finish in one call.
    pub fn generate(&mut self, source: &dyn EmployeeSource) -> Result<GenerateOutcome, WizardError> {
        let pending = self.begin_generate()?;
        let result = source.fetch_employee();
        self.finish_generate(pending, result)
    }

    /// Toggle the signature block; recomposes the draft, discarding edits.
    pub fn set_include_signature(&mut self, include: bool) -> Result<(), WizardError> {
        self.require_step(WizardStep::ShowResult)?;
        self.include_signature = include;
        self.result.draft = outreach::compose_draft(&self.draft_context());
        Ok(())
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) -> Result<(), WizardError> {
        self.require_step(WizardStep::ShowResult)?;
        self.result.draft = text.into();
        Ok(())
    }

    pub fn mailto_link(&self) -> Option<String> {
        self.result.employee.as_ref()?;
        outreach::mailto_link(&self.result.email, &self.result.draft)
    }

    pub fn linkedin_link(&self) -> Option<String> {
        let employee = self.result.employee.as_ref()?;
        outreach::linkedin_search_link(&employee.first_name, &employee.last_name)
    }

    /// Result rows in display order.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let employee = self
            .result
            .employee
            .as_ref()
            .map(|e| format!("{} {}", e.first_name, e.last_name))
            .unwrap_or_default();
        vec![
            ("Employee", employee),
            ("Role", self.role.clone()),
            ("Company", self.company.clone()),
            ("Email", self.result.email.clone()),
        ]
    }

    fn draft_context(&self) -> DraftContext {
        DraftContext {
            sender_name: self.user_name.clone(),
            recipient_first_name: self
                .result
                .employee
                .as_ref()
                .map(|e| e.first_name.clone())
                .unwrap_or_default(),
            role: self.role.clone(),
            company: self.company.clone(),
            include_signature: self.include_signature,
        }
    }

    fn require_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep(self.step.as_str()))
        }
    }
}
