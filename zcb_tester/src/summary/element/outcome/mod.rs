//!
//! The scenario summary element outcome.
//!

use crate::scenario::step::expectation::Expectation;

///
/// The scenario summary element outcome.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The `passed` outcome.
    Passed {
        /// The expectation that has been met.
        expectation: Expectation,
    },
    /// The `failed` outcome. The step result contradicts its expectation.
    Failed {
        /// The expected result.
        expected: Expectation,
        /// The actual result description.
        found: String,
    },
    /// The `invalid` outcome. The step could not be prepared.
    Invalid {
        /// The error description.
        error: String,
    },
    /// The `ignored` outcome. The step is filtered out.
    Ignored,
}

impl Outcome {
    ///
    /// A shortcut constructor.
    ///
    pub fn passed(expectation: Expectation) -> Self {
        Self::Passed { expectation }
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn failed<S>(expected: Expectation, found: S) -> Self
    where
        S: ToString,
    {
        Self::Failed {
            expected,
            found: found.to_string(),
        }
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn invalid<S>(error: S) -> Self
    where
        S: ToString,
    {
        Self::Invalid {
            error: error.to_string(),
        }
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn ignored() -> Self {
        Self::Ignored
    }
}
