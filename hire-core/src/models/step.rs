use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of the checkout wizard.
///
/// The wizard is strictly linear: `Postcode` is the initial step and
/// `Payment` the terminal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    Postcode,
    WasteType,
    SelectSkip,
    PermitCheck,
    ChooseDate,
    Payment,
}

impl WizardStep {
    pub const FIRST: Self = Self::Postcode;
    pub const LAST: Self = Self::Payment;

    pub fn all() -> &'static [WizardStep] {
        &[
            Self::Postcode,
            Self::WasteType,
            Self::SelectSkip,
            Self::PermitCheck,
            Self::ChooseDate,
            Self::Payment,
        ]
    }

    /// 1-based position shown in the step navigation.
    pub fn number(&self) -> u8 {
        match self {
            Self::Postcode => 1,
            Self::WasteType => 2,
            Self::SelectSkip => 3,
            Self::PermitCheck => 4,
            Self::ChooseDate => 5,
            Self::Payment => 6,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Postcode),
            2 => Some(Self::WasteType),
            3 => Some(Self::SelectSkip),
            4 => Some(Self::PermitCheck),
            5 => Some(Self::ChooseDate),
            6 => Some(Self::Payment),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Postcode => "Postcode",
            Self::WasteType => "Waste Type",
            Self::SelectSkip => "Select Skip",
            Self::PermitCheck => "Permit Check",
            Self::ChooseDate => "Choose Date",
            Self::Payment => "Payment",
        }
    }

    /// The following step, or `None` from the terminal step.
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, or `None` from the initial step.
    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for WizardStep {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.name())
    }
}
