//!
//! The transaction result.
//!

use std::collections::BTreeMap;

use web3::ethabi;

///
/// The transaction execution status.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The transaction has been executed successfully.
    Success,
    /// The transaction execution has been reverted.
    Reverted,
}

///
/// The log entry emitted by a contract.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// The emitting contract address.
    pub address: web3::types::Address,
    /// The topics, where the first one is the event signature hash for non-anonymous events.
    pub topics: Vec<web3::types::H256>,
    /// The non-indexed data.
    pub data: Vec<u8>,
}

impl From<web3::types::Log> for LogEntry {
    fn from(log: web3::types::Log) -> Self {
        Self {
            address: log.address,
            topics: log.topics,
            data: log.data.0,
        }
    }
}

///
/// The decoded event fields, keyed by the ABI parameter name.
///
pub type DecodedEvent = BTreeMap<String, ethabi::Token>;

///
/// The result of an included transaction.
///
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionResult {
    /// The transaction hash.
    pub transaction_hash: web3::types::H256,
    /// The execution status.
    pub status: Status,
    /// The sender.
    pub from: web3::types::Address,
    /// The destination, `None` for contract creations.
    pub to: Option<web3::types::Address>,
    /// The created contract address.
    pub contract_address: Option<web3::types::Address>,
    /// The including block number.
    pub block_number: Option<u64>,
    /// The gas used by the transaction.
    pub gas_used: Option<web3::types::U256>,
    /// The emitted logs in order.
    pub logs: Vec<LogEntry>,
    /// The decoded event fields, if the destination is a registered contract.
    pub decoded: Option<DecodedEvent>,
}

impl TransactionResult {
    ///
    /// Whether the execution has succeeded.
    ///
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    ///
    /// Returns the decoded field `name`.
    ///
    pub fn decoded_field(&self, name: &str) -> Option<&ethabi::Token> {
        self.decoded.as_ref().and_then(|decoded| decoded.get(name))
    }

    ///
    /// Returns the decoded address field `name`.
    ///
    pub fn decoded_address(&self, name: &str) -> Option<web3::types::Address> {
        self.decoded_field(name)
            .cloned()
            .and_then(ethabi::Token::into_address)
    }

    ///
    /// Returns the decoded unsigned integer field `name`.
    ///
    pub fn decoded_uint(&self, name: &str) -> Option<web3::types::U256> {
        self.decoded_field(name)
            .cloned()
            .and_then(ethabi::Token::into_uint)
    }
}

impl From<web3::types::TransactionReceipt> for TransactionResult {
    fn from(receipt: web3::types::TransactionReceipt) -> Self {
        let status = match receipt.status {
            Some(status) if status.is_zero() => Status::Reverted,
            _ => Status::Success,
        };

        Self {
            transaction_hash: receipt.transaction_hash,
            status,
            from: receipt.from,
            to: receipt.to,
            contract_address: receipt.contract_address,
            block_number: receipt.block_number.map(|number| number.as_u64()),
            gas_used: receipt.gas_used,
            logs: receipt.logs.into_iter().map(LogEntry::from).collect(),
            decoded: None,
        }
    }
}
