//!
//! The scenario summary.
//!

pub mod element;


use std::sync::Arc;
use std::sync::Mutex;

use colored::Colorize;

use crate::scenario::step::expectation::Expectation;

use self::element::outcome::Outcome;
use self::element::Element;

///
/// The scenario summary.
///
#[derive(Debug)]
pub struct Summary {
    /// The summary elements.
    elements: Vec<Element>,
    /// The output verbosity.
    verbosity: bool,
    /// Whether the output is suppressed.
    quiet: bool,
    /// The passed steps counter.
    passed: usize,
    /// The failed steps counter.
    failed: usize,
    /// The invalid steps counter.
    invalid: usize,
    /// The ignored steps counter.
    ignored: usize,
}

impl Summary {
    /// The elements vector default capacity.
    pub const ELEMENTS_INITIAL_CAPACITY: usize = 64;

    ///
    /// A shortcut constructor.
    ///
    pub fn new(verbosity: bool, quiet: bool) -> Self {
        Self {
            elements: Vec::with_capacity(Self::ELEMENTS_INITIAL_CAPACITY),
            verbosity,
            quiet,
            passed: 0,
            failed: 0,
            invalid: 0,
            ignored: 0,
        }
    }

    ///
    /// Whether the scenario run has been successful.
    ///
    pub fn is_successful(&self) -> bool {
        for element in self.elements.iter() {
            match element.outcome {
                Outcome::Passed { .. } => continue,
                Outcome::Failed { .. } => return false,
                Outcome::Invalid { .. } => return false,
                Outcome::Ignored => continue,
            }
        }

        true
    }

    ///
    /// Returns the recorded elements in order.
    ///
    pub fn elements(&self) -> &[Element] {
        self.elements.as_slice()
    }

    ///
    /// Returns the passed steps counter.
    ///
    pub fn passed_count(&self) -> usize {
        self.passed
    }

    ///
    /// Returns the failed steps counter.
    ///
    pub fn failed_count(&self) -> usize {
        self.failed
    }

    ///
    /// Wraps the summary to be shared with the scenario driver.
    ///
    pub fn wrap(self) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(self))
    }

    ///
    /// Takes the summary back once the scenario driver is dropped.
    ///
    pub fn unwrap_arc(summary: Arc<Mutex<Self>>) -> Self {
        Arc::try_unwrap(summary)
            .expect("Last shared reference")
            .into_inner()
            .expect("Last shared reference")
    }

    ///
    /// Records a step whose result met its expectation.
    ///
    pub fn passed(summary: Arc<Mutex<Self>>, group: &str, name: String, expectation: Expectation) {
        let element = Element::new(group.to_owned(), name, Outcome::passed(expectation));
        summary.lock().expect("Sync").push_element(element);
    }

    ///
    /// Records a step whose result contradicts its expectation.
    ///
    pub fn failed<S>(
        summary: Arc<Mutex<Self>>,
        group: &str,
        name: String,
        expected: Expectation,
        found: S,
    ) where
        S: ToString,
    {
        let element = Element::new(group.to_owned(), name, Outcome::failed(expected, found));
        summary.lock().expect("Sync").push_element(element);
    }

    ///
    /// Records a step that could not be prepared.
    ///
    pub fn invalid<S>(summary: Arc<Mutex<Self>>, group: &str, name: String, error: S)
    where
        S: ToString,
    {
        let element = Element::new(group.to_owned(), name, Outcome::invalid(error));
        summary.lock().expect("Sync").push_element(element);
    }

    ///
    /// Records a step skipped by the filters.
    ///
    pub fn ignored(summary: Arc<Mutex<Self>>, group: &str, name: String) {
        let element = Element::new(group.to_owned(), name, Outcome::ignored());
        summary.lock().expect("Sync").push_element(element);
    }

    ///
    /// Prints the element unless quiet, and counts it.
    ///
    fn push_element(&mut self, element: Element) {
        if !self.quiet {
            if let Some(string) = element.print(self.verbosity) {
                println!("{string}");
            }
        }

        match element.outcome {
            Outcome::Passed { .. } => self.passed += 1,
            Outcome::Failed { .. } => self.failed += 1,
            Outcome::Invalid { .. } => self.invalid += 1,
            Outcome::Ignored => self.ignored += 1,
        }

        self.elements.push(element);
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.quiet {
            return Ok(());
        }

        let rows = [
            ("PASSED".green(), self.passed.to_string().green()),
            ("FAILED".bright_red(), self.failed.to_string().bright_red()),
            ("INVALID".red(), self.invalid.to_string().red()),
            ("IGNORED".bright_black(), self.ignored.to_string().bright_black()),
        ];

        writeln!(f, "╔═══════════════════╡ SCENARIO TESTING ╞═══════════════════════╗")?;
        writeln!(f, "║{:62}║", "")?;
        for (status, count) in rows.into_iter() {
            writeln!(f, "║     {status:7}{:35}{count:10}     ║", "")?;
        }
        writeln!(f, "╚{}╝", "═".repeat(62))?;

        Ok(())
    }
}
