//!
//! The transaction log decoder.
//!

pub mod registration;


use std::collections::BTreeMap;

use web3::ethabi;

use crate::error::Error;
use crate::error::Result;
use crate::transaction::DecodedEvent;
use crate::transaction::LogEntry;
use crate::transaction::TransactionResult;

use self::registration::Registration;

///
/// The transaction log decoder.
///
/// Results sent to a registered contract are annotated with the fields of its registered events.
/// Any other result passes through unchanged.
///
#[derive(Debug, Clone, Default)]
pub struct LogDecoder {
    /// The registrations by contract address.
    registrations: BTreeMap<web3::types::Address, Registration>,
}

impl LogDecoder {
    ///
    /// A shortcut constructor.
    ///
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Registers `address` with the default `Create` event.
    ///
    pub fn register_default(&mut self, address: web3::types::Address, interface: ethabi::Contract) {
        self.register(
            address,
            Registration::new(
                interface,
                vec![Registration::DEFAULT_EVENT_NAME.to_owned()],
            ),
        );
    }

    ///
    /// Registers `address`, replacing the previous registration.
    ///
    pub fn register(&mut self, address: web3::types::Address, registration: Registration) {
        self.registrations.insert(address, registration);
    }

    ///
    /// Annotates `result` with the decoded fields of the registered events.
    ///
    /// Addresses are compared as bytes, so the hex case of their textual forms never matters.
    /// Logs that match an event signature, but not its shape, are skipped.
    ///
    pub fn decode(&self, mut result: TransactionResult) -> TransactionResult {
        let registration = match result
            .to
            .as_ref()
            .and_then(|to| self.registrations.get(to))
        {
            Some(registration) => registration,
            None => return result,
        };

        let mut decoded = DecodedEvent::new();
        for event_name in registration.event_names.iter() {
            let event = match registration.interface.event(event_name) {
                Ok(event) => event,
                Err(_) => continue,
            };
            let signature = event.signature();

            for log in result.logs.iter() {
                if log.topics.first() != Some(&signature) {
                    continue;
                }
                if let Ok(fields) = Self::decode_log(event, log) {
                    decoded.extend(fields);
                }
            }
        }

        result.decoded = Some(decoded);
        result
    }

    ///
    /// Decodes the indexed topics and the data of `log` into named fields.
    ///
    pub fn decode_log(event: &ethabi::Event, log: &LogEntry) -> Result<DecodedEvent> {
        let raw_log = ethabi::RawLog {
            topics: log.topics.clone(),
            data: log.data.clone(),
        };
        let parsed = event
            .parse_log(raw_log)
            .map_err(|error| Error::DecodeMismatch {
                event: event.name.clone(),
                reason: error.to_string(),
            })?;

        Ok(parsed
            .params
            .into_iter()
            .map(|param| (param.name, param.value))
            .collect())
    }
}
