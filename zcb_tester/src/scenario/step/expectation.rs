//!
//! The scenario step expectation.
//!

///
/// The scenario step expectation.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The step must return `Ok`.
    Success,
    /// The step must return an error.
    Failure,
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}
