//! Step sequencing for the checkout wizard.
//!
//! The sequencer itself never validates: [`OrderState::next_step`] and
//! [`OrderState::go_to_step`] move unconditionally. Step handlers advance
//! through [`OrderState::try_advance`], which runs the current step's
//! guard first.

pub mod guards;

pub use guards::GuardFailure;
use tracing::warn;

use crate::models::{OrderState, WizardStep};

impl OrderState {
    /// Jumps straight to `step`. Callers only use this to return to a step
    /// that is already completed.
    pub fn go_to_step(
        &mut self,
        step: WizardStep,
    ) {
        self.set_step(step);
    }

    /// Moves one step forward, staying on the terminal step.
    pub fn next_step(&mut self) {
        let next = self.step().next().unwrap_or(WizardStep::LAST);
        self.set_step(next);
    }

    /// Moves one step back, staying on the initial step.
    pub fn prev_step(&mut self) {
        let previous = self.step().previous().unwrap_or(WizardStep::FIRST);
        self.set_step(previous);
    }

    /// A step is completed once the wizard has moved past it.
    pub fn is_completed(
        &self,
        step: WizardStep,
    ) -> bool {
        step < self.step()
    }

    /// The navigation bar lets the customer open completed steps and the
    /// current one.
    pub fn can_navigate_to(
        &self,
        step: WizardStep,
    ) -> bool {
        step <= self.step()
    }

    /// Navigation-bar click: goes back to `step` if it is completed.
    /// Returns whether the wizard moved.
    pub fn jump_back(
        &mut self,
        step: WizardStep,
    ) -> bool {
        if self.is_completed(step) {
            self.go_to_step(step);
            true
        } else {
            false
        }
    }

    /// Checks the exit condition of the current step.
    pub fn check_current_step(&self) -> Result<(), GuardFailure> {
        guards::check(self, self.step())
    }

    /// Advances one step if the current step's guard passes and returns
    /// the new step. On failure the order is left untouched.
    pub fn try_advance(&mut self) -> Result<WizardStep, GuardFailure> {
        if let Err(failure) = self.check_current_step() {
            warn!(step = %self.step(), %failure, "cannot advance");
            return Err(failure);
        }
        self.next_step();
        Ok(self.step())
    }
}
