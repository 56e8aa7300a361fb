//!
//! The transaction submission.
//!

///
/// The transaction submission, before gas estimation and signing.
///
#[derive(Debug, Clone)]
pub struct Submission {
    /// The calldata.
    pub data: Vec<u8>,
    /// The value in wei.
    pub value: web3::types::U256,
    /// The sender private key as hex.
    pub private_key: String,
    /// The destination, or `None` for the default one.
    pub to: Option<web3::types::Address>,
}

impl Submission {
    ///
    /// A shortcut constructor for a call to the default destination without value.
    ///
    pub fn new(data: Vec<u8>, private_key: String) -> Self {
        Self {
            data,
            value: web3::types::U256::zero(),
            private_key,
            to: None,
        }
    }

    ///
    /// Sets the destination.
    ///
    pub fn to(mut self, to: web3::types::Address) -> Self {
        self.to = Some(to);
        self
    }

    ///
    /// Sets the value in wei.
    ///
    pub fn with_value(mut self, value: web3::types::U256) -> Self {
        self.value = value;
        self
    }
}
