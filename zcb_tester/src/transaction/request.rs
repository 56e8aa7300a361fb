//!
//! The transaction request.
//!

///
/// The transaction request, before signing.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    /// The destination, or `None` for a contract creation.
    pub to: Option<web3::types::Address>,
    /// The sender.
    pub from: web3::types::Address,
    /// The calldata, or init code with constructor arguments.
    pub data: Vec<u8>,
    /// The value in wei.
    pub value: web3::types::U256,
    /// The gas limit.
    pub gas: Option<web3::types::U256>,
    /// The gas price.
    pub gas_price: Option<web3::types::U256>,
    /// The sender nonce.
    pub nonce: Option<web3::types::U256>,
}

impl TransactionRequest {
    ///
    /// A shortcut constructor for a contract call.
    ///
    pub fn call(from: web3::types::Address, to: web3::types::Address, data: Vec<u8>) -> Self {
        Self {
            to: Some(to),
            from,
            data,
            value: web3::types::U256::zero(),
            gas: None,
            gas_price: None,
            nonce: None,
        }
    }

    ///
    /// A shortcut constructor for a contract creation.
    ///
    pub fn create(from: web3::types::Address, init_code: Vec<u8>) -> Self {
        Self {
            to: None,
            from,
            data: init_code,
            value: web3::types::U256::zero(),
            gas: None,
            gas_price: None,
            nonce: None,
        }
    }

    ///
    /// Sets the value in wei.
    ///
    pub fn with_value(mut self, value: web3::types::U256) -> Self {
        self.value = value;
        self
    }

    ///
    /// Whether the request creates a contract.
    ///
    pub fn is_creation(&self) -> bool {
        self.to.is_none()
    }
}
