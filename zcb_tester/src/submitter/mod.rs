//!
//! The transaction submitter.
//!

pub mod submission;

use crate::client::Client;
use crate::decoder::LogDecoder;
use crate::error::Error;
use crate::error::Result;
use crate::transaction::SignedTransaction;
use crate::transaction::TransactionRequest;
use crate::transaction::TransactionResult;

use self::submission::Submission;

///
/// The transaction submitter.
///
/// Estimates gas, signs, submits once, and passes the result to the log decoder.
///
#[derive(Debug)]
pub struct Submitter<C>
where
    C: Client,
{
    /// The ledger client.
    client: C,
    /// The log decoder applied to every result.
    decoder: LogDecoder,
    /// The destination used when a submission does not specify one.
    default_destination: Option<web3::types::Address>,
}

impl<C> Submitter<C>
where
    C: Client,
{
    ///
    /// A shortcut constructor.
    ///
    pub fn new(client: C, decoder: LogDecoder) -> Self {
        Self {
            client,
            decoder,
            default_destination: None,
        }
    }

    ///
    /// Returns the ledger client.
    ///
    pub fn client(&self) -> &C {
        &self.client
    }

    ///
    /// Sets the destination used when a submission does not specify one.
    ///
    pub fn set_default_destination(&mut self, destination: web3::types::Address) {
        self.default_destination = Some(destination);
    }

    ///
    /// Returns the destination used when a submission does not specify one.
    ///
    pub fn default_destination(&self) -> Option<web3::types::Address> {
        self.default_destination
    }

    ///
    /// Submits the transaction and waits for its inclusion.
    ///
    /// Estimation failures and reverted executions are returned as errors.
    ///
    pub fn submit(&self, submission: Submission) -> Result<TransactionResult> {
        let account = self
            .client
            .account_from_private_key(submission.private_key.as_str())?;
        let destination = submission
            .to
            .or(self.default_destination)
            .ok_or_else(|| Error::SubmissionFailed {
                reason: "Neither the destination nor the default one is set".to_owned(),
            })?;

        let mut request = TransactionRequest::call(account.address, destination, submission.data)
            .with_value(submission.value);
        request.gas = Some(self.client.estimate_gas(&request)?);
        request.gas_price = Some(self.client.gas_price()?);
        request.nonce = Some(self.client.transaction_count(account.address)?);
        let chain_id = self.client.chain_id()?;

        let transaction = SignedTransaction::sign(&request, &account, chain_id)?;
        let result = self.client.send_signed(&transaction)?;
        if !result.is_success() {
            return Err(Error::Reverted {
                hash: result.transaction_hash,
            });
        }

        Ok(self.decoder.decode(result))
    }
}
