//!
//! The JSON-RPC ledger client.
//!

pub mod call_object;
pub mod envelope;


use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::client::block::Block;
use crate::client::block::BlockTag;
use crate::client::Client;
use crate::error::Error;
use crate::error::Result;
use crate::transaction::SignedTransaction;
use crate::transaction::TransactionRequest;
use crate::transaction::TransactionResult;

use self::call_object::CallObject;
use self::envelope::Request;
use self::envelope::Response;

///
/// The JSON-RPC ledger client over blocking HTTP.
///
#[derive(Debug)]
pub struct RpcClient {
    /// The node endpoint.
    url: String,
    /// The HTTP client.
    http_client: reqwest::blocking::Client,
    /// The receipt polling interval.
    poll_interval: Duration,
    /// The next request ID.
    next_id: AtomicU64,
}

impl RpcClient {
    /// The default node endpoint.
    pub const DEFAULT_URL: &'static str = "http://127.0.0.1:8545";

    /// The default receipt polling interval in milliseconds.
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

    ///
    /// A shortcut constructor.
    ///
    pub fn new(url: String, poll_interval: Duration) -> Result<Self> {
        let http_client = reqwest::blocking::ClientBuilder::new()
            .timeout(None)
            .build()
            .map_err(|error| Error::Transport {
                method: "<connect>".to_owned(),
                message: error.to_string(),
            })?;

        Ok(Self {
            url,
            http_client,
            poll_interval,
            next_id: AtomicU64::new(1),
        })
    }

    ///
    /// Sends a JSON-RPC request and deserializes its result.
    ///
    /// A `null` result is deserialized as well, so optional results must be requested as `Option<T>`.
    ///
    pub fn request<T>(&self, method: &str, params: serde_json::Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, params)?;
        Self::parse(method, response)
    }

    ///
    /// Posts the request envelope and reads the response envelope.
    ///
    /// Failures to reach the node or to read its reply are transport errors.
    ///
    fn send(&self, method: &str, params: serde_json::Value) -> Result<Response> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request::new(id, method, params);

        self.http_client
            .post(self.url.as_str())
            .json(&request)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<Response>())
            .map_err(|error| Error::Transport {
                method: method.to_owned(),
                message: error.to_string(),
            })
    }

    ///
    /// Deserializes the result of the response envelope.
    ///
    fn parse<T>(method: &str, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let rpc_error = |message: String| Error::Rpc {
            method: method.to_owned(),
            message,
        };

        if let Some(error) = response.error {
            return Err(rpc_error(error.to_string()));
        }
        let result = response.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result)
            .map_err(|error| rpc_error(format!("Invalid result: {error}")))
    }

    ///
    /// Deserializes the gas estimate, treating an error object as the node declining the estimation.
    ///
    fn parse_estimation(response: Response) -> Result<web3::types::U256> {
        if let Some(error) = response.error {
            return Err(Error::EstimationRejected {
                reason: error.to_string(),
            });
        }
        Self::parse("eth_estimateGas", response)
    }

    ///
    /// Polls the receipt of `hash` until the transaction is included.
    ///
    fn wait_for_receipt(
        &self,
        hash: web3::types::H256,
    ) -> Result<web3::types::TransactionReceipt> {
        loop {
            let receipt: Option<web3::types::TransactionReceipt> =
                self.request("eth_getTransactionReceipt", serde_json::json!([hash]))?;
            if let Some(receipt) = receipt {
                return Ok(receipt);
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}

impl Client for RpcClient {
    fn chain_id(&self) -> Result<u64> {
        let chain_id: web3::types::U256 = self.request("eth_chainId", serde_json::json!([]))?;
        Ok(chain_id.low_u64())
    }

    fn gas_price(&self) -> Result<web3::types::U256> {
        self.request("eth_gasPrice", serde_json::json!([]))
    }

    fn estimate_gas(&self, request: &TransactionRequest) -> Result<web3::types::U256> {
        let response = self.send(
            "eth_estimateGas",
            serde_json::json!([CallObject::from(request)]),
        )?;
        Self::parse_estimation(response)
    }

    fn balance(&self, address: web3::types::Address) -> Result<web3::types::U256> {
        self.request(
            "eth_getBalance",
            serde_json::json!([address, BlockTag::Latest.as_rpc_parameter()]),
        )
    }

    fn block(&self, tag: BlockTag) -> Result<Block> {
        let block: Option<web3::types::Block<web3::types::H256>> = self.request(
            "eth_getBlockByNumber",
            serde_json::json!([tag.as_rpc_parameter(), false]),
        )?;
        let block = block.ok_or_else(|| Error::Rpc {
            method: "eth_getBlockByNumber".to_owned(),
            message: format!("Block `{}` not found", tag.as_rpc_parameter()),
        })?;

        Ok(Block::new(
            block.number.map(|number| number.as_u64()).unwrap_or_default(),
            block.timestamp.low_u64(),
        ))
    }

    fn transaction_count(&self, address: web3::types::Address) -> Result<web3::types::U256> {
        self.request(
            "eth_getTransactionCount",
            serde_json::json!([address, BlockTag::Pending.as_rpc_parameter()]),
        )
    }

    fn send_signed(&self, transaction: &SignedTransaction) -> Result<TransactionResult> {
        let submission_error = |error: Error| match error {
            Error::Rpc { message, .. } => Error::SubmissionFailed { reason: message },
            error => error,
        };

        let hash: web3::types::H256 = self
            .request(
                "eth_sendRawTransaction",
                serde_json::json!([web3::types::Bytes(transaction.raw.clone())]),
            )
            .map_err(submission_error)?;
        let receipt = self.wait_for_receipt(hash).map_err(submission_error)?;
        Ok(TransactionResult::from(receipt))
    }

    fn call(&self, request: &TransactionRequest) -> Result<Vec<u8>> {
        let output: web3::types::Bytes = self.request(
            "eth_call",
            serde_json::json!([
                CallObject::from(request),
                BlockTag::Latest.as_rpc_parameter()
            ]),
        )?;
        Ok(output.0)
    }

    fn mine(&self, timestamp: Option<u64>) -> Result<()> {
        let params = match timestamp {
            Some(timestamp) => serde_json::json!([{ "timestamp": timestamp }]),
            None => serde_json::json!([]),
        };
        let _: serde_json::Value = self.request("evm_mine", params)?;
        Ok(())
    }
}
