//!
//! The ledger block header subset.
//!

///
/// The block selector.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    /// The most recent included block.
    Latest,
    /// The genesis block.
    Earliest,
    /// The block being built.
    Pending,
    /// The block with the specified number.
    Number(u64),
}

impl BlockTag {
    ///
    /// Returns the JSON-RPC block parameter.
    ///
    pub fn as_rpc_parameter(&self) -> String {
        match self {
            Self::Latest => "latest".to_owned(),
            Self::Earliest => "earliest".to_owned(),
            Self::Pending => "pending".to_owned(),
            Self::Number(number) => format!("0x{number:x}"),
        }
    }
}

///
/// The block header fields used by the scenarios.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// The block number.
    pub number: u64,
    /// The block timestamp in seconds.
    pub timestamp: u64,
}

impl Block {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(number: u64, timestamp: u64) -> Self {
        Self { number, timestamp }
    }
}
