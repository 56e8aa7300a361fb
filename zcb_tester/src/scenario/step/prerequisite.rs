//!
//! The missing scenario step prerequisite.
//!

///
/// The state an earlier step should have produced is missing.
///
/// The step is reported as invalid rather than compared against its expectation.
///
#[derive(Debug, thiserror::Error)]
#[error("Missing prerequisite: {0}")]
pub struct MissingPrerequisite(pub &'static str);
