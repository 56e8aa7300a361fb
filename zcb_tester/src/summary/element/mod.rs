//!
//! The scenario summary element.
//!

pub mod outcome;

use colored::Colorize;

use self::outcome::Outcome;

///
/// The scenario summary element.
///
#[derive(Debug, Clone)]
pub struct Element {
    /// The scenario group, e.g. `issuer` or `bond`.
    pub group: String,
    /// The step name.
    pub name: String,
    /// The step outcome.
    pub outcome: Outcome,
}

impl Element {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(group: String, name: String, outcome: Outcome) -> Self {
        Self {
            group,
            name,
            outcome,
        }
    }

    ///
    /// Prints the element.
    ///
    pub fn print(&self, verbosity: bool) -> Option<String> {
        match self.outcome {
            Outcome::Passed { .. } if !verbosity => return None,
            Outcome::Ignored => return None,
            _ => {}
        }

        let outcome = match self.outcome {
            Outcome::Passed { .. } => "PASSED".green(),
            Outcome::Failed { .. } => "FAILED".bright_red(),
            Outcome::Invalid { .. } => "INVALID".red(),
            Outcome::Ignored => "IGNORED".bright_black(),
        };

        let details = match self.outcome {
            Outcome::Passed { ref expectation } => {
                format!("(expected {expectation})").bright_white().to_string()
            }
            Outcome::Failed {
                ref expected,
                ref found,
            } => format!("(expected {expected}, found {found})"),
            Outcome::Invalid { ref error } => error.to_owned(),
            Outcome::Ignored => String::new(),
        };

        Some(format!(
            "{:8} {:>7} {} {}",
            self.group.bright_white(),
            outcome,
            self.name,
            details
        ))
    }
}
