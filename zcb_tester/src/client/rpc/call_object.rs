//!
//! The JSON-RPC transaction call object.
//!

use serde::Serialize;

use crate::transaction::TransactionRequest;

///
/// The transaction call object of `eth_call` and `eth_estimateGas`.
///
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallObject {
    /// The sender.
    pub from: web3::types::Address,
    /// The destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<web3::types::Address>,
    /// The gas limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<web3::types::U256>,
    /// The gas price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<web3::types::U256>,
    /// The value in wei.
    pub value: web3::types::U256,
    /// The calldata.
    pub data: web3::types::Bytes,
}

impl From<&TransactionRequest> for CallObject {
    fn from(request: &TransactionRequest) -> Self {
        Self {
            from: request.from,
            to: request.to,
            gas: request.gas,
            gas_price: request.gas_price,
            value: request.value,
            data: web3::types::Bytes(request.data.clone()),
        }
    }
}
