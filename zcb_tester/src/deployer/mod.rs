//!
//! The contract deployer.
//!

pub mod deployment;

use web3::ethabi;

use crate::account::Account;
use crate::artifact::Artifact;
use crate::binding;
use crate::client::Client;
use crate::error::Error;
use crate::error::Result;
use crate::transaction::SignedTransaction;
use crate::transaction::TransactionRequest;

use self::deployment::Deployment;

///
/// The contract deployer.
///
/// Deployments are submitted with a fixed gas limit, without estimation.
///
#[derive(Debug)]
pub struct Deployer<'a, C>
where
    C: Client,
{
    /// The ledger client.
    client: &'a C,
}

impl<'a, C> Deployer<'a, C>
where
    C: Client,
{
    /// The deployment gas limit.
    pub const GAS_LIMIT: u64 = 30_000_000;

    ///
    /// A shortcut constructor.
    ///
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    ///
    /// Deploys the contract from `artifact`.
    ///
    pub fn deploy_artifact(
        &self,
        account: &Account,
        artifact: &Artifact,
        arguments: &[ethabi::Token],
    ) -> Result<Deployment> {
        self.deploy(
            account,
            &artifact.interface,
            artifact.bytecode.as_slice(),
            arguments,
        )
    }

    ///
    /// Deploys `bytecode` with the ABI-encoded constructor `arguments` and waits for its inclusion.
    ///
    /// Every failure is returned as `DeploymentFailed` carrying the cause.
    ///
    pub fn deploy(
        &self,
        account: &Account,
        interface: &ethabi::Contract,
        bytecode: &[u8],
        arguments: &[ethabi::Token],
    ) -> Result<Deployment> {
        self.deploy_inner(account, interface, bytecode, arguments)
            .map_err(Error::into_deployment_failure)
    }

    ///
    /// The deployment wrapper used for proper error handling.
    ///
    fn deploy_inner(
        &self,
        account: &Account,
        interface: &ethabi::Contract,
        bytecode: &[u8],
        arguments: &[ethabi::Token],
    ) -> Result<Deployment> {
        let gas_price = self.client.gas_price()?;
        let init_code = binding::encode_constructor(interface, bytecode, arguments)?;
        let nonce = self.client.transaction_count(account.address)?;
        let chain_id = self.client.chain_id()?;

        let mut request = TransactionRequest::create(account.address, init_code);
        request.gas = Some(web3::types::U256::from(Self::GAS_LIMIT));
        request.gas_price = Some(gas_price);
        request.nonce = Some(nonce);

        let transaction = SignedTransaction::sign(&request, account, chain_id)?;
        let result = self.client.send_signed(&transaction)?;
        if !result.is_success() {
            return Err(Error::Reverted {
                hash: result.transaction_hash,
            });
        }
        let contract_address = result
            .contract_address
            .ok_or_else(|| Error::SubmissionFailed {
                reason: format!(
                    "The receipt of {:?} has no contract address",
                    result.transaction_hash
                ),
            })?;

        Ok(Deployment::new(
            contract_address,
            account.address,
            interface.clone(),
        ))
    }
}
