//!
//! The scenario driver.
//!

pub mod bond_info;
pub mod config;
pub mod context;
pub mod step;
pub mod steps;

use std::sync::Arc;
use std::sync::Mutex;

use crate::client::Client;
use crate::error::Error;
use crate::filters::Filters;
use crate::summary::Summary;

use self::context::ScenarioContext;
use self::step::expectation::Expectation;
use self::step::prerequisite::MissingPrerequisite;
use self::step::Step;

///
/// The scenario driver.
///
/// Runs the issuer and bond steps in order on one context.
///
#[derive(Debug)]
pub struct Scenario<C>
where
    C: Client,
{
    /// The context populated by the setup.
    context: ScenarioContext<C>,
    /// The summary the step outcomes are recorded into.
    summary: Arc<Mutex<Summary>>,
    /// The step filters.
    filters: Filters,
}

impl<C> Scenario<C>
where
    C: Client,
{
    ///
    /// A shortcut constructor.
    ///
    pub fn new(context: ScenarioContext<C>, summary: Arc<Mutex<Summary>>, filters: Filters) -> Self {
        Self {
            context,
            summary,
            filters,
        }
    }

    ///
    /// Returns the scenario context.
    ///
    pub fn context(&self) -> &ScenarioContext<C> {
        &self.context
    }

    ///
    /// Runs all groups.
    ///
    pub fn run(&mut self) {
        self.run_group(steps::issuer::GROUP, steps::issuer::steps());
        self.run_group(steps::bond::GROUP, steps::bond::steps());
    }

    ///
    /// Runs `steps` in order, recording each outcome.
    ///
    pub fn run_group(&mut self, group: &str, steps: Vec<Step<C>>) {
        let is_group_selected = self.filters.check_group(group);

        for step in steps.into_iter() {
            let name = step.name.to_owned();
            if !is_group_selected || !self.filters.check_name(step.name) {
                Summary::ignored(self.summary.clone(), group, name);
                continue;
            }

            let result = (step.action)(&mut self.context);
            match (step.expectation, result) {
                (_, Err(error)) if error.downcast_ref::<MissingPrerequisite>().is_some() => {
                    Summary::invalid(self.summary.clone(), group, name, error);
                }
                (Expectation::Failure, Err(error)) if !is_ledger_rejection(&error) => {
                    Summary::invalid(self.summary.clone(), group, name, format!("{error:#}"));
                }
                (Expectation::Success, Ok(())) | (Expectation::Failure, Err(_)) => {
                    Summary::passed(self.summary.clone(), group, name, step.expectation);
                }
                (Expectation::Success, Err(error)) => {
                    Summary::failed(
                        self.summary.clone(),
                        group,
                        name,
                        step.expectation,
                        format!("{error:#}"),
                    );
                }
                (Expectation::Failure, Ok(())) => {
                    Summary::failed(
                        self.summary.clone(),
                        group,
                        name,
                        step.expectation,
                        Expectation::Success,
                    );
                }
            }
        }
    }
}

///
/// Whether the step error is a transaction declined by the ledger.
///
fn is_ledger_rejection(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|error| error.downcast_ref::<Error>())
        .any(Error::is_ledger_rejection)
}
