//!
//! The in-process simulated ledger shared by the integration tests.
//!
//! Transactions are accepted only as signed raw envelopes, whose senders are recovered from the
//! signatures. Each execution is atomic: a revert restores the state, but still consumes the nonce.
//! Blocks do not advance the time, only `mine` does.
//!

#![allow(dead_code)]


use std::cell::Cell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use web3::ethabi;

use zcb_tester::Block;
use zcb_tester::BlockTag;
use zcb_tester::Client;
use zcb_tester::ContractType;
use zcb_tester::Error;
use zcb_tester::SignedTransaction;
use zcb_tester::TransactionRequest;
use zcb_tester::TransactionResult;

use zcb_tester::transaction::LogEntry;
use zcb_tester::transaction::Status;

use self::contracts::Bond;
use self::contracts::Contract;
use self::contracts::Issuer;
use self::contracts::Revert;
use self::contracts::Token;

/// The simulated chain ID.
pub const CHAIN_ID: u64 = 1337;

/// The genesis block timestamp.
pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

/// The initial balance of every funded account, in ether.
pub const INITIAL_BALANCE_ETHER: u64 = 1000;

/// The simulated gas price.
pub const GAS_PRICE: u64 = 1_000_000_000;

/// The gas reported by estimations and receipts.
pub const GAS_USED: u64 = 100_000;

///
/// Returns the fixture artifacts root.
///
pub fn artifacts_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("artifacts")
}

///
/// Returns the fixture artifacts.
///
pub fn artifacts() -> zcb_tester::Artifacts {
    zcb_tester::Artifacts::new(artifacts_root())
}

///
/// Returns `count` deterministic private keys.
///
pub fn private_keys(count: usize) -> Vec<String> {
    (1..=count).map(|index| format!("0x{index:064x}")).collect()
}

///
/// The compiled contract known to the ledger.
///
#[derive(Debug, Clone)]
struct Program {
    /// The contract type.
    contract_type: ContractType,
    /// The init code without constructor arguments.
    bytecode: Vec<u8>,
    /// The contract ABI.
    interface: ethabi::Contract,
}

///
/// The ledger state.
///
#[derive(Debug, Clone, Default)]
pub struct State {
    /// The native currency balances.
    pub balances: BTreeMap<web3::types::Address, web3::types::U256>,
    /// The account nonces.
    pub nonces: BTreeMap<web3::types::Address, web3::types::U256>,
    /// The deployed contracts.
    pub contracts: BTreeMap<web3::types::Address, Contract>,
    /// The latest block number.
    pub block_number: u64,
    /// The latest block timestamp.
    pub timestamp: u64,
}

impl State {
    ///
    /// Returns the nonce of `address`.
    ///
    pub fn nonce(&self, address: web3::types::Address) -> web3::types::U256 {
        self.nonces.get(&address).copied().unwrap_or_default()
    }

    ///
    /// Returns the native currency balance of `address`.
    ///
    pub fn balance(&self, address: web3::types::Address) -> web3::types::U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    ///
    /// Returns the token at `address`.
    ///
    pub fn token(&self, address: web3::types::Address) -> Result<&Token, Revert> {
        match self.contracts.get(&address) {
            Some(Contract::Token(token)) => Ok(token),
            _ => Err("not a token".to_owned()),
        }
    }

    ///
    /// Returns the token at `address` for updates.
    ///
    pub fn token_mut(&mut self, address: web3::types::Address) -> Result<&mut Token, Revert> {
        match self.contracts.get_mut(&address) {
            Some(Contract::Token(token)) => Ok(token),
            _ => Err("not a token".to_owned()),
        }
    }

    ///
    /// Moves native currency.
    ///
    fn transfer_value(
        &mut self,
        from: web3::types::Address,
        to: web3::types::Address,
        value: web3::types::U256,
    ) -> Result<(), Revert> {
        if value.is_zero() {
            return Ok(());
        }
        let balance = self.balance(from);
        contracts::require(balance >= value, "insufficient funds")?;
        self.balances.insert(from, balance - value);
        *self.balances.entry(to).or_default() += value;
        Ok(())
    }
}

///
/// The successful execution.
///
#[derive(Debug, Default)]
struct Execution {
    /// The return data.
    output: Vec<u8>,
    /// The emitted logs.
    logs: Vec<LogEntry>,
    /// The created contract.
    contract_address: Option<web3::types::Address>,
}

///
/// The simulated ledger.
///
#[derive(Debug)]
pub struct Ledger {
    /// The known compiled contracts.
    programs: Vec<Program>,
    /// The current state.
    state: RefCell<State>,
    /// Whether the gas estimation executes the transaction.
    is_estimation_enabled: Cell<bool>,
}

impl Ledger {
    ///
    /// Creates the ledger, funding the accounts of `private_keys`.
    ///
    pub fn new(private_keys: &[String]) -> Self {
        let artifacts = artifacts();
        let programs = ContractType::ALL
            .into_iter()
            .map(|contract_type| {
                let artifact = artifacts
                    .load(contract_type)
                    .expect("Fixture artifacts are valid");
                Program {
                    contract_type,
                    bytecode: artifact.bytecode,
                    interface: artifact.interface,
                }
            })
            .collect();

        let mut state = State {
            timestamp: GENESIS_TIMESTAMP,
            ..State::default()
        };
        for private_key in private_keys.iter() {
            let account = zcb_tester::Account::from_private_key(private_key.as_str())
                .expect("Fixture keys are valid");
            state.balances.insert(
                account.address,
                zcb_tester::utils::scaled(INITIAL_BALANCE_ETHER, 18),
            );
        }

        Self {
            programs,
            state: RefCell::new(state),
            is_estimation_enabled: Cell::new(true),
        }
    }

    ///
    /// Makes the gas estimation accept every transaction without executing it.
    ///
    pub fn disable_estimation(&self) {
        self.is_estimation_enabled.set(false);
    }

    ///
    /// Returns a copy of the current state.
    ///
    pub fn snapshot(&self) -> State {
        self.state.borrow().clone()
    }

    ///
    /// Returns the ABI of `contract_type`.
    ///
    pub fn interface(&self, contract_type: ContractType) -> ethabi::Contract {
        self.program(contract_type).interface.clone()
    }

    fn program(&self, contract_type: ContractType) -> &Program {
        self.programs
            .iter()
            .find(|program| program.contract_type == contract_type)
            .expect("Every contract type is loaded")
    }

    ///
    /// Derives the address of a created contract.
    ///
    fn create_address(
        creator: web3::types::Address,
        salt: web3::types::U256,
    ) -> web3::types::Address {
        let mut preimage = creator.as_bytes().to_vec();
        preimage.extend_from_slice(zcb_tester::utils::u256_to_h256(&salt).as_bytes());
        let hash = web3::signing::keccak256(preimage.as_slice());
        web3::types::Address::from_slice(&hash[zcb_tester::BYTE_LENGTH_FIELD - zcb_tester::BYTE_LENGTH_ETH_ADDRESS..])
    }

    ///
    /// Builds a log of `event` emitted by `address`.
    ///
    fn log(
        &self,
        contract_type: ContractType,
        address: web3::types::Address,
        event: &str,
        indexed: &[web3::types::H256],
        data: &[ethabi::Token],
    ) -> LogEntry {
        let signature = self
            .program(contract_type)
            .interface
            .event(event)
            .expect("Fixture events exist")
            .signature();
        let mut topics = vec![signature];
        topics.extend_from_slice(indexed);
        LogEntry {
            address,
            topics,
            data: ethabi::encode(data),
        }
    }

    ///
    /// Executes `request` on `state`, leaving it partially updated on revert.
    ///
    fn execute(&self, state: &mut State, request: &TransactionRequest) -> Result<Execution, Revert> {
        match request.to {
            None => self.create(state, request),
            Some(to) => {
                state.transfer_value(request.from, to, request.value)?;
                match state.contracts.get(&to).cloned() {
                    None => Ok(Execution::default()),
                    Some(Contract::Issuer(issuer)) => {
                        self.execute_issuer(state, request, to, issuer)
                    }
                    Some(Contract::Bond(bond)) => self.execute_bond(state, request, to, bond),
                    Some(Contract::Token(token)) => {
                        self.execute_token(state, request, to, token)
                    }
                }
            }
        }
    }

    ///
    /// Deploys the contract whose init code prefixes the request data.
    ///
    fn create(&self, state: &mut State, request: &TransactionRequest) -> Result<Execution, Revert> {
        let program = self
            .programs
            .iter()
            .find(|program| request.data.starts_with(program.bytecode.as_slice()))
            .ok_or_else(|| "unknown init code".to_owned())?;
        let encoded_arguments = &request.data[program.bytecode.len()..];
        let parameter_types: Vec<ethabi::ParamType> = program
            .interface
            .constructor()
            .map(|constructor| {
                constructor
                    .inputs
                    .iter()
                    .map(|input| input.kind.clone())
                    .collect()
            })
            .unwrap_or_default();
        let arguments = ethabi::decode(parameter_types.as_slice(), encoded_arguments)
            .map_err(|error| format!("constructor arguments: {error}"))?;

        let address = Self::create_address(request.from, state.nonce(request.from));
        let contract = match program.contract_type {
            ContractType::ZcbIssuer => Contract::Issuer(Issuer::new(request.from, &arguments)?),
            ContractType::Zcb => Contract::Bond(Bond::new(
                web3::types::Address::zero(),
                contracts::address(&arguments, 0)?,
                web3::types::U256::zero(),
                &arguments,
                1,
            )?),
            ContractType::Usdt => Contract::Token(Token::new("USDT", request.from)),
            ContractType::Usdc => Contract::Token(Token::new("USDC", request.from)),
        };
        state.contracts.insert(address, contract);
        state.transfer_value(request.from, address, request.value)?;

        Ok(Execution {
            contract_address: Some(address),
            ..Execution::default()
        })
    }

    ///
    /// Selects the called function and decodes its arguments.
    ///
    fn function<'a>(
        &'a self,
        contract_type: ContractType,
        request: &TransactionRequest,
    ) -> Result<(&'a ethabi::Function, Vec<ethabi::Token>), Revert> {
        contracts::require(request.data.len() >= 4, "no selector")?;
        let function = self
            .program(contract_type)
            .interface
            .functions()
            .find(|function| function.short_signature() == request.data[..4])
            .ok_or_else(|| "unknown selector".to_owned())?;
        let arguments = function
            .decode_input(&request.data[4..])
            .map_err(|error| format!("{}: {error}", function.name))?;
        if function.state_mutability != ethabi::StateMutability::Payable {
            contracts::require(request.value.is_zero(), "non-payable function")?;
        }
        Ok((function, arguments))
    }

    fn execute_issuer(
        &self,
        state: &mut State,
        request: &TransactionRequest,
        address: web3::types::Address,
        mut issuer: Issuer,
    ) -> Result<Execution, Revert> {
        let (function, arguments) = self.function(ContractType::ZcbIssuer, request)?;
        let mut execution = Execution::default();

        let output = match function.name.as_str() {
            "changeCreationFee" => {
                issuer.only_owner(request.from)?;
                issuer.creation_fee = contracts::uint(&arguments, 0)?;
                vec![]
            }
            "changeCreationFeePercentage" => {
                issuer.only_owner(request.from)?;
                issuer.creation_fee_percentage = contracts::uint(&arguments, 0)?;
                vec![]
            }
            "changeIssuer" => {
                issuer.only_owner(request.from)?;
                issuer.owner = contracts::address(&arguments, 0)?;
                vec![]
            }
            "changePauseState" => {
                issuer.only_owner(request.from)?;
                issuer.is_paused = contracts::boolean(&arguments, 0)?;
                vec![]
            }
            "withdraw" => {
                issuer.only_owner(request.from)?;
                let to = contracts::address(&arguments, 0)?;
                let amount = contracts::uint(&arguments, 1)?;
                state.transfer_value(address, to, amount)?;
                vec![]
            }
            "create" => {
                contracts::require(!issuer.is_paused, "Pausable: paused")?;
                contracts::require(
                    request.value == issuer.creation_fee,
                    "Issuer: invalid creation fee",
                )?;
                let bond = Bond::new(
                    address,
                    request.from,
                    issuer.creation_fee_percentage,
                    &arguments,
                    0,
                )?;
                state.token(bond.investment_token)?;
                state.token(bond.interest_token)?;

                issuer.created += 1;
                let bond_address =
                    Self::create_address(address, web3::types::U256::from(issuer.created));
                state.contracts.insert(bond_address, Contract::Bond(bond));
                execution.logs.push(self.log(
                    ContractType::ZcbIssuer,
                    address,
                    "Create",
                    &[zcb_tester::utils::address_to_h256(&bond_address)],
                    &[ethabi::Token::Address(request.from)],
                ));
                vec![]
            }
            "creationFee" => vec![ethabi::Token::Uint(issuer.creation_fee)],
            "creationFeePercentage" => vec![ethabi::Token::Uint(issuer.creation_fee_percentage)],
            "isPaused" => vec![ethabi::Token::Bool(issuer.is_paused)],
            "issuer" => vec![ethabi::Token::Address(issuer.owner)],
            name => return Err(format!("`{name}` is not simulated")),
        };

        state.contracts.insert(address, Contract::Issuer(issuer));
        execution.output = ethabi::encode(output.as_slice());
        Ok(execution)
    }

    fn execute_bond(
        &self,
        state: &mut State,
        request: &TransactionRequest,
        address: web3::types::Address,
        mut bond: Bond,
    ) -> Result<Execution, Revert> {
        let (function, arguments) = self.function(ContractType::Zcb, request)?;
        let mut execution = Execution::default();
        let vault_owner = match state.contracts.get(&bond.issuer_contract) {
            Some(Contract::Issuer(issuer)) => issuer.owner,
            _ => bond.issuer,
        };

        let output = match function.name.as_str() {
            "purchase" => {
                let count = contracts::uint(&arguments, 0)?;
                contracts::require(!count.is_zero(), "ZCB: zero count")?;
                contracts::require(
                    bond.purchased + count <= bond.total,
                    "ZCB: exceeds the total",
                )?;
                let amount = bond.investment_amount * count;
                state.token_mut(bond.investment_token)?.transfer_from(
                    address,
                    request.from,
                    address,
                    amount,
                )?;
                for _ in 0..count.as_u64() {
                    let id = bond.purchased;
                    bond.owners.insert(id, request.from);
                    bond.purchase_dates.insert(id, state.timestamp);
                    bond.purchased += web3::types::U256::one();
                    execution.logs.push(self.log(
                        ContractType::Zcb,
                        address,
                        "Transfer",
                        &[
                            web3::types::H256::zero(),
                            zcb_tester::utils::address_to_h256(&request.from),
                            zcb_tester::utils::u256_to_h256(&id),
                        ],
                        &[],
                    ));
                }
                vec![]
            }
            "redeem" => {
                let ids = contracts::uint_array(&arguments, 0)?;
                contracts::require(!ids.is_empty(), "ZCB: no ids")?;
                for id in ids.iter() {
                    contracts::require(
                        bond.owners.get(id) == Some(&request.from),
                        "ZCB: not the owner",
                    )?;
                    let purchase_date = bond.purchase_dates.get(id).copied().unwrap_or_default();
                    contracts::require(
                        web3::types::U256::from(state.timestamp)
                            >= web3::types::U256::from(purchase_date) + bond.redeem_lock_period,
                        "ZCB: locked",
                    )?;
                    bond.owners.remove(id);
                }
                let amount = bond.interest_amount * web3::types::U256::from(ids.len());
                state
                    .token_mut(bond.interest_token)?
                    .transfer(address, request.from, amount)?;
                vec![]
            }
            "decreaseRedeemLockPeriod" => {
                contracts::require(request.from == bond.issuer, "ZCB: not the issuer")?;
                let period = contracts::uint(&arguments, 0)?;
                contracts::require(
                    period < bond.redeem_lock_period,
                    "ZCB: the period can only decrease",
                )?;
                bond.redeem_lock_period = period;
                vec![]
            }
            "changeFeePercentage" => {
                contracts::require(request.from == vault_owner, "ZCB: not the vault owner")?;
                bond.fee_percentage = contracts::uint(&arguments, 0)?;
                vec![]
            }
            "changeVaultAddress" => {
                contracts::require(request.from == vault_owner, "ZCB: not the vault owner")?;
                bond.vault = contracts::address(&arguments, 0)?;
                vec![]
            }
            "changeOwner" => {
                contracts::require(request.from == bond.issuer, "ZCB: not the issuer")?;
                bond.issuer = contracts::address(&arguments, 0)?;
                vec![]
            }
            "AMET_VAULT" => vec![ethabi::Token::Address(bond.vault)],
            "balanceOf" => vec![ethabi::Token::Uint(
                bond.balance_of(contracts::address(&arguments, 0)?),
            )],
            "feePercentage" => vec![ethabi::Token::Uint(bond.fee_percentage)],
            "issuer" => vec![ethabi::Token::Address(bond.issuer)],
            "name" => vec![ethabi::Token::String(bond.name.clone())],
            "ownerOf" => {
                let id = contracts::uint(&arguments, 0)?;
                let owner = bond
                    .owners
                    .get(&id)
                    .copied()
                    .ok_or_else(|| "ZCB: invalid id".to_owned())?;
                vec![ethabi::Token::Address(owner)]
            }
            "purchased" => vec![ethabi::Token::Uint(bond.purchased)],
            "redeemLockPeriod" => vec![ethabi::Token::Uint(bond.redeem_lock_period)],
            "total" => vec![ethabi::Token::Uint(bond.total)],
            name => return Err(format!("`{name}` is not simulated")),
        };

        state.contracts.insert(address, Contract::Bond(bond));
        execution.output = ethabi::encode(output.as_slice());
        Ok(execution)
    }

    fn execute_token(
        &self,
        state: &mut State,
        request: &TransactionRequest,
        address: web3::types::Address,
        mut token: Token,
    ) -> Result<Execution, Revert> {
        let contract_type = match token.symbol.as_str() {
            "USDT" => ContractType::Usdt,
            _ => ContractType::Usdc,
        };
        let (function, arguments) = self.function(contract_type, request)?;
        let mut execution = Execution::default();

        let output = match function.name.as_str() {
            "approve" => {
                let spender = contracts::address(&arguments, 0)?;
                let amount = contracts::uint(&arguments, 1)?;
                token.allowances.insert((request.from, spender), amount);
                execution.logs.push(self.log(
                    contract_type,
                    address,
                    "Approval",
                    &[
                        zcb_tester::utils::address_to_h256(&request.from),
                        zcb_tester::utils::address_to_h256(&spender),
                    ],
                    &[ethabi::Token::Uint(amount)],
                ));
                vec![ethabi::Token::Bool(true)]
            }
            "transfer" => {
                let to = contracts::address(&arguments, 0)?;
                let amount = contracts::uint(&arguments, 1)?;
                token.transfer(request.from, to, amount)?;
                execution.logs.push(self.log(
                    contract_type,
                    address,
                    "Transfer",
                    &[
                        zcb_tester::utils::address_to_h256(&request.from),
                        zcb_tester::utils::address_to_h256(&to),
                    ],
                    &[ethabi::Token::Uint(amount)],
                ));
                vec![ethabi::Token::Bool(true)]
            }
            "transferFrom" => {
                let from = contracts::address(&arguments, 0)?;
                let to = contracts::address(&arguments, 1)?;
                let amount = contracts::uint(&arguments, 2)?;
                token.transfer_from(request.from, from, to, amount)?;
                vec![ethabi::Token::Bool(true)]
            }
            "allowance" => vec![ethabi::Token::Uint(token.allowance(
                contracts::address(&arguments, 0)?,
                contracts::address(&arguments, 1)?,
            ))],
            "balanceOf" => vec![ethabi::Token::Uint(
                token.balance_of(contracts::address(&arguments, 0)?),
            )],
            "decimals" => vec![ethabi::Token::Uint(Token::DECIMALS.into())],
            "name" | "symbol" => vec![ethabi::Token::String(token.symbol.clone())],
            "totalSupply" => vec![ethabi::Token::Uint(token.total_supply)],
            name => return Err(format!("`{name}` is not simulated")),
        };

        state.contracts.insert(address, Contract::Token(token));
        execution.output = ethabi::encode(output.as_slice());
        Ok(execution)
    }
}

impl Client for Ledger {
    fn chain_id(&self) -> zcb_tester::Result<u64> {
        Ok(CHAIN_ID)
    }

    fn gas_price(&self) -> zcb_tester::Result<web3::types::U256> {
        Ok(web3::types::U256::from(GAS_PRICE))
    }

    fn estimate_gas(&self, request: &TransactionRequest) -> zcb_tester::Result<web3::types::U256> {
        if self.is_estimation_enabled.get() {
            let mut state = self.snapshot();
            self.execute(&mut state, request)
                .map_err(|reason| Error::EstimationRejected { reason })?;
        }
        Ok(web3::types::U256::from(GAS_USED))
    }

    fn balance(&self, address: web3::types::Address) -> zcb_tester::Result<web3::types::U256> {
        Ok(self.state.borrow().balance(address))
    }

    fn block(&self, tag: BlockTag) -> zcb_tester::Result<Block> {
        let state = self.state.borrow();
        let block = match tag {
            BlockTag::Latest => Block::new(state.block_number, state.timestamp),
            BlockTag::Pending => Block::new(state.block_number + 1, state.timestamp),
            BlockTag::Earliest => Block::new(0, GENESIS_TIMESTAMP),
            BlockTag::Number(number) if number <= state.block_number => {
                Block::new(number, state.timestamp)
            }
            BlockTag::Number(number) => {
                return Err(Error::Rpc {
                    method: "eth_getBlockByNumber".to_owned(),
                    message: format!("Block {number} not found"),
                })
            }
        };
        Ok(block)
    }

    fn transaction_count(
        &self,
        address: web3::types::Address,
    ) -> zcb_tester::Result<web3::types::U256> {
        Ok(self.state.borrow().nonce(address))
    }

    fn send_signed(&self, transaction: &SignedTransaction) -> zcb_tester::Result<TransactionResult> {
        let recovered = SignedTransaction::decode(transaction.raw.as_slice()).map_err(|error| {
            Error::SubmissionFailed {
                reason: error.to_string(),
            }
        })?;
        if recovered.chain_id != Some(CHAIN_ID) {
            return Err(Error::SubmissionFailed {
                reason: format!("Invalid chain ID {:?}", recovered.chain_id),
            });
        }
        let request = recovered.request;

        let mut state = self.state.borrow_mut();
        let nonce = state.nonce(request.from);
        if request.nonce != Some(nonce) {
            return Err(Error::SubmissionFailed {
                reason: format!("Invalid nonce {:?}, expected {nonce}", request.nonce),
            });
        }

        let snapshot = state.clone();
        let (status, logs, contract_address) = match self.execute(&mut state, &request) {
            Ok(execution) => (Status::Success, execution.logs, execution.contract_address),
            Err(_) => {
                *state = snapshot;
                (Status::Reverted, vec![], None)
            }
        };
        *state.nonces.entry(request.from).or_default() += web3::types::U256::one();
        state.block_number += 1;

        Ok(TransactionResult {
            transaction_hash: recovered.hash,
            status,
            from: request.from,
            to: request.to,
            contract_address,
            block_number: Some(state.block_number),
            gas_used: Some(web3::types::U256::from(GAS_USED)),
            logs,
            decoded: None,
        })
    }

    fn call(&self, request: &TransactionRequest) -> zcb_tester::Result<Vec<u8>> {
        let mut state = self.snapshot();
        self.execute(&mut state, request)
            .map(|execution| execution.output)
            .map_err(|message| Error::Rpc {
                method: "eth_call".to_owned(),
                message,
            })
    }

    fn mine(&self, timestamp: Option<u64>) -> zcb_tester::Result<()> {
        let mut state = self.state.borrow_mut();
        state.block_number += 1;
        if let Some(timestamp) = timestamp {
            state.timestamp = timestamp;
        }
        Ok(())
    }
}
