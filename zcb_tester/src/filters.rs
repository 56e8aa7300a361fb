//!
//! The scenario filters.
//!

use std::collections::HashSet;

///
/// The scenario filters.
///
#[derive(Debug, Default)]
pub struct Filters {
    /// The step name filters.
    name_filters: HashSet<String>,
    /// The group filters.
    group_filters: HashSet<String>,
}

impl Filters {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(name_filters: Vec<String>, group_filters: Vec<String>) -> Self {
        Self {
            name_filters: name_filters.into_iter().collect(),
            group_filters: group_filters.into_iter().collect(),
        }
    }

    ///
    /// Check if the step name is compatible with the filters.
    ///
    pub fn check_name(&self, name: &str) -> bool {
        self.name_filters.is_empty() || self.name_filters.iter().any(|filter| name.contains(filter))
    }

    ///
    /// Check if the scenario group is compatible with the filters.
    ///
    pub fn check_group(&self, group: &str) -> bool {
        self.group_filters.is_empty() || self.group_filters.contains(group)
    }
}
