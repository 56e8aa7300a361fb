//!
//! The log decoder registration.
//!

use web3::ethabi;

///
/// The contract registered for log decoding.
///
#[derive(Debug, Clone)]
pub struct Registration {
    /// The contract ABI.
    pub interface: ethabi::Contract,
    /// The names of the events to decode, in order.
    pub event_names: Vec<String>,
}

impl Registration {
    /// The event decoded by default.
    pub const DEFAULT_EVENT_NAME: &'static str = "Create";

    ///
    /// A shortcut constructor.
    ///
    pub fn new(interface: ethabi::Contract, event_names: Vec<String>) -> Self {
        Self {
            interface,
            event_names,
        }
    }
}
