//!
//! The scenario context.
//!

use web3::ethabi;

use crate::account::Account;
use crate::artifact::contract_type::ContractType;
use crate::artifact::Artifacts;
use crate::binding::ContractBinding;
use crate::client::Client;
use crate::decoder::LogDecoder;
use crate::deployer::Deployer;
use crate::submitter::submission::Submission;
use crate::submitter::Submitter;
use crate::transaction::TransactionResult;

use super::bond_info::BondInfo;
use super::config::ScenarioConfig;
use super::step::prerequisite::MissingPrerequisite;

///
/// The scenario context, populated by the setup and by earlier steps.
///
#[derive(Debug)]
pub struct ScenarioContext<C>
where
    C: Client,
{
    /// The transaction submitter owning the ledger client.
    submitter: Submitter<C>,
    /// The artifacts directory.
    artifacts: Artifacts,
    /// The scenario configuration.
    pub config: ScenarioConfig,
    /// The issuer contract owner and deployer of all contracts.
    pub owner: Account,
    /// The other wallets in order.
    pub wallets: Vec<Account>,
    /// The issuer contract.
    pub issuer: ContractBinding,
    /// The USDT token contract.
    pub usdt: ContractBinding,
    /// The USDC token contract.
    pub usdc: ContractBinding,
    /// The bond created by the issuer scenario.
    pub bond: Option<BondInfo>,
}

impl<C> ScenarioContext<C>
where
    C: Client,
{
    /// The number of wallets required besides the owner.
    pub const WALLETS_REQUIRED: usize = 4;

    ///
    /// Deploys the issuer and the token contracts, deriving the accounts from `private_keys`.
    ///
    /// The first key belongs to the owner.
    ///
    pub fn setup(
        client: C,
        artifacts: Artifacts,
        issuer_type: ContractType,
        private_keys: &[String],
        config: ScenarioConfig,
    ) -> anyhow::Result<Self> {
        if !issuer_type.is_issuer() {
            anyhow::bail!("Contract type `{issuer_type}` is not an issuer");
        }
        if private_keys.len() < Self::WALLETS_REQUIRED + 1 {
            anyhow::bail!(
                "At least {} private keys are required, found {}",
                Self::WALLETS_REQUIRED + 1,
                private_keys.len()
            );
        }

        let mut accounts = private_keys
            .iter()
            .map(|private_key| client.account_from_private_key(private_key.as_str()))
            .collect::<crate::Result<Vec<Account>>>()?;
        let owner = accounts.remove(0);

        let deployer = Deployer::new(&client);
        let issuer = deployer
            .deploy_artifact(
                &owner,
                &artifacts.load(issuer_type)?,
                &[
                    ethabi::Token::Uint(config.initial_creation_fee),
                    ethabi::Token::Uint(config.initial_creation_fee_percentage.into()),
                ],
            )?
            .binding();
        let usdt = deployer
            .deploy_artifact(&owner, &artifacts.load(ContractType::Usdt)?, &[])?
            .binding();
        let usdc = deployer
            .deploy_artifact(&owner, &artifacts.load(ContractType::Usdc)?, &[])?
            .binding();

        let mut decoder = LogDecoder::new();
        decoder.register_default(issuer.address(), issuer.interface().to_owned());
        let mut submitter = Submitter::new(client, decoder);
        submitter.set_default_destination(issuer.address());

        Ok(Self {
            submitter,
            artifacts,
            config,
            owner,
            wallets: accounts,
            issuer,
            usdt,
            usdc,
            bond: None,
        })
    }

    ///
    /// Returns the ledger client.
    ///
    pub fn client(&self) -> &C {
        self.submitter.client()
    }

    ///
    /// Returns the transaction submitter.
    ///
    pub fn submitter(&self) -> &Submitter<C> {
        &self.submitter
    }

    ///
    /// Returns the wallet at `index`, where `0` is the first key after the owner.
    ///
    pub fn wallet(&self, index: usize) -> anyhow::Result<Account> {
        self.wallets
            .get(index)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Wallet #{index} is not configured"))
    }

    ///
    /// Returns the bond created by the issuer scenario.
    ///
    pub fn bond(&self) -> Result<&BondInfo, MissingPrerequisite> {
        self.bond
            .as_ref()
            .ok_or(MissingPrerequisite("the bond has not been created"))
    }

    ///
    /// Returns the bond created by the issuer scenario, for updates.
    ///
    pub fn bond_mut(&mut self) -> Result<&mut BondInfo, MissingPrerequisite> {
        self.bond
            .as_mut()
            .ok_or(MissingPrerequisite("the bond has not been created"))
    }

    ///
    /// Returns the binding of the created bond, reading the bond artifact afresh.
    ///
    pub fn bond_binding(&self) -> anyhow::Result<ContractBinding> {
        let id = self.bond()?.id;
        let artifact = self.artifacts.load(ContractType::Zcb)?;
        Ok(ContractBinding::new(id, artifact.interface))
    }

    ///
    /// Returns the binding of the token deployed at `address`.
    ///
    pub fn token(&self, address: web3::types::Address) -> anyhow::Result<&ContractBinding> {
        [&self.usdt, &self.usdc]
            .into_iter()
            .find(|token| token.address() == address)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No token is deployed at {}",
                    crate::utils::address_as_string(&address)
                )
            })
    }

    ///
    /// Calls `name` of the issuer contract, relying on the default destination.
    ///
    pub fn transact_issuer(
        &self,
        sender: &Account,
        name: &str,
        arguments: &[ethabi::Token],
        value: web3::types::U256,
    ) -> crate::Result<TransactionResult> {
        let data = self.issuer.encode(name, arguments)?;
        self.submitter
            .submit(Submission::new(data, sender.private_key()).with_value(value))
    }

    ///
    /// Calls `name` of the contract bound by `binding`.
    ///
    pub fn transact(
        &self,
        sender: &Account,
        binding: &ContractBinding,
        name: &str,
        arguments: &[ethabi::Token],
    ) -> crate::Result<TransactionResult> {
        let data = binding.encode(name, arguments)?;
        self.submitter.submit(
            Submission::new(data, sender.private_key()).to(binding.address()),
        )
    }
}
