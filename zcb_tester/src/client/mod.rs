//!
//! The ledger client.
//!

pub mod block;
pub mod rpc;

use crate::account::Account;
use crate::error::Result;
use crate::transaction::SignedTransaction;
use crate::transaction::TransactionRequest;
use crate::transaction::TransactionResult;

use self::block::Block;
use self::block::BlockTag;

///
/// The ledger client.
///
/// Every method blocks until the ledger answers. There are no timeouts or retries.
///
pub trait Client {
    ///
    /// Returns the chain ID used for replay-protected signatures.
    ///
    fn chain_id(&self) -> Result<u64>;

    ///
    /// Returns the current gas price.
    ///
    fn gas_price(&self) -> Result<web3::types::U256>;

    ///
    /// Estimates the gas limit of `request`.
    ///
    /// Fails with `EstimationRejected` if the ledger expects the transaction to revert.
    ///
    fn estimate_gas(&self, request: &TransactionRequest) -> Result<web3::types::U256>;

    ///
    /// Returns the native currency balance of `address`.
    ///
    fn balance(&self, address: web3::types::Address) -> Result<web3::types::U256>;

    ///
    /// Returns the block selected by `tag`.
    ///
    fn block(&self, tag: BlockTag) -> Result<Block>;

    ///
    /// Returns the next nonce of `address`, including pending transactions.
    ///
    fn transaction_count(&self, address: web3::types::Address) -> Result<web3::types::U256>;

    ///
    /// Submits the signed transaction and waits for its inclusion.
    ///
    fn send_signed(&self, transaction: &SignedTransaction) -> Result<TransactionResult>;

    ///
    /// Executes `request` without changing the state, returning the output.
    ///
    fn call(&self, request: &TransactionRequest) -> Result<Vec<u8>>;

    ///
    /// Mines a block, at `timestamp` if specified.
    ///
    fn mine(&self, timestamp: Option<u64>) -> Result<()>;

    ///
    /// Derives the account from its hex private key.
    ///
    fn account_from_private_key(&self, private_key: &str) -> Result<Account> {
        Account::from_private_key(private_key)
    }
}
