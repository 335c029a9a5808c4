#[cfg(test)]
#[path = "wizard_test.rs"]
mod tests;

use crate::domain::models::CandidateFile;
use crate::domain::models::WizardStep;

/// Owns the wizard's navigation state: the active step, the completed marker
/// on the upload step, and the single candidate file. All mutation goes
/// through the methods here so the one-step-at-a-time rules hold.
pub struct WizardState {
    step: WizardStep,
    upload_completed: bool,
    candidate: Option<CandidateFile>,
}

impl Default for WizardState {
    fn default() -> WizardState {
        return WizardState {
            step: WizardStep::Upload,
            upload_completed: false,
            candidate: None,
        };
    }
}

impl WizardState {
    pub fn step(&self) -> WizardStep {
        return self.step;
    }

    pub fn upload_completed(&self) -> bool {
        return self.upload_completed;
    }

    pub fn candidate(&self) -> Option<&CandidateFile> {
        return self.candidate.as_ref();
    }

    pub fn can_advance(&self) -> bool {
        return self.candidate.is_some();
    }

    /// Installs a validated file as the candidate, replacing any previous
    /// selection wholesale.
    pub fn accept_candidate(&mut self, file: CandidateFile) {
        self.candidate = Some(file);
    }

    /// Moves to the configure step and marks the upload step completed.
    /// Refuses without a candidate, leaving the state untouched.
    pub fn advance(&mut self) -> bool {
        if self.candidate.is_none() {
            return false;
        }

        self.step = WizardStep::Configure;
        self.upload_completed = true;
        return true;
    }

    /// Returns to the upload step and makes it active again. The candidate
    /// survives, so advancing a second time needs no re-validation.
    pub fn retreat(&mut self) {
        self.step = WizardStep::Upload;
        self.upload_completed = false;
    }

    /// Drops the candidate without changing the active step. Safe to call
    /// when nothing is selected.
    pub fn clear_selection(&mut self) {
        self.candidate = None;
    }
}
