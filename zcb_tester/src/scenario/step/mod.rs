//!
//! The scenario step.
//!

pub mod expectation;
pub mod prerequisite;

use crate::client::Client;
use crate::scenario::context::ScenarioContext;

use self::expectation::Expectation;

///
/// The scenario step action.
///
pub type Action<C> = fn(&mut ScenarioContext<C>) -> anyhow::Result<()>;

///
/// The scenario step.
///
pub struct Step<C>
where
    C: Client,
{
    /// The step name.
    pub name: &'static str,
    /// The expected result.
    pub expectation: Expectation,
    /// The step action.
    pub action: Action<C>,
}

impl<C> Step<C>
where
    C: Client,
{
    ///
    /// A shortcut constructor for a step that must succeed.
    ///
    pub fn success(name: &'static str, action: Action<C>) -> Self {
        Self {
            name,
            expectation: Expectation::Success,
            action,
        }
    }

    ///
    /// A shortcut constructor for a step that must fail.
    ///
    pub fn failure(name: &'static str, action: Action<C>) -> Self {
        Self {
            name,
            expectation: Expectation::Failure,
            action,
        }
    }
}

impl<C> std::fmt::Debug for Step<C>
where
    C: Client,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("expectation", &self.expectation)
            .finish_non_exhaustive()
    }
}
