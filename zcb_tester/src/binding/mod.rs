//!
//! The contract binding, encoding calls by function name.
//!


use web3::ethabi;

use crate::client::Client;
use crate::error::Error;
use crate::error::Result;
use crate::transaction::TransactionRequest;

///
/// The deployed contract binding.
///
#[derive(Debug, Clone)]
pub struct ContractBinding {
    /// The contract address.
    address: web3::types::Address,
    /// The contract ABI.
    interface: ethabi::Contract,
}

impl ContractBinding {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(address: web3::types::Address, interface: ethabi::Contract) -> Self {
        Self { address, interface }
    }

    ///
    /// Returns the contract address.
    ///
    pub fn address(&self) -> web3::types::Address {
        self.address
    }

    ///
    /// Returns the contract ABI.
    ///
    pub fn interface(&self) -> &ethabi::Contract {
        &self.interface
    }

    ///
    /// Selects the overload of `name` whose parameter types accept `arguments`.
    ///
    pub fn function(&self, name: &str, arguments: &[ethabi::Token]) -> Result<&ethabi::Function> {
        let overloads = self
            .interface
            .functions_by_name(name)
            .map_err(|error| Error::binding(name, error))?;

        overloads
            .iter()
            .find(|function| {
                let types: Vec<ethabi::ParamType> = function
                    .inputs
                    .iter()
                    .map(|input| input.kind.clone())
                    .collect();
                ethabi::Token::types_check(arguments, types.as_slice())
            })
            .ok_or_else(|| {
                Error::binding(
                    name,
                    format!(
                        "no overload accepts {} argument(s) of the given types",
                        arguments.len()
                    ),
                )
            })
    }

    ///
    /// Encodes the call of `name`: the selector followed by the ABI-encoded arguments.
    ///
    pub fn encode(&self, name: &str, arguments: &[ethabi::Token]) -> Result<Vec<u8>> {
        self.function(name, arguments)?
            .encode_input(arguments)
            .map_err(|error| Error::binding(name, error))
    }

    ///
    /// Executes the read-only call of `name` and decodes its outputs.
    ///
    pub fn call<C>(
        &self,
        client: &C,
        name: &str,
        arguments: &[ethabi::Token],
    ) -> Result<Vec<ethabi::Token>>
    where
        C: Client,
    {
        let function = self.function(name, arguments)?;
        let calldata = function
            .encode_input(arguments)
            .map_err(|error| Error::binding(name, error))?;
        let request = TransactionRequest::call(web3::types::Address::zero(), self.address, calldata);
        let output = client.call(&request)?;
        function
            .decode_output(output.as_slice())
            .map_err(|error| Error::binding(name, error))
    }

    ///
    /// Executes the read-only call of `name` that returns exactly one value.
    ///
    pub fn call_single<C>(
        &self,
        client: &C,
        name: &str,
        arguments: &[ethabi::Token],
    ) -> Result<ethabi::Token>
    where
        C: Client,
    {
        let mut outputs = self.call(client, name, arguments)?;
        if outputs.len() != 1 {
            return Err(Error::binding(
                name,
                format!("expected a single output, found {}", outputs.len()),
            ));
        }
        Ok(outputs.remove(0))
    }

    ///
    /// Executes the read-only call of `name` returning an `address`.
    ///
    pub fn call_address<C>(
        &self,
        client: &C,
        name: &str,
        arguments: &[ethabi::Token],
    ) -> Result<web3::types::Address>
    where
        C: Client,
    {
        let token = self.call_single(client, name, arguments)?;
        self::as_address(name, token)
    }

    ///
    /// Executes the read-only call of `name` returning an unsigned integer.
    ///
    pub fn call_uint<C>(
        &self,
        client: &C,
        name: &str,
        arguments: &[ethabi::Token],
    ) -> Result<web3::types::U256>
    where
        C: Client,
    {
        let token = self.call_single(client, name, arguments)?;
        self::as_uint(name, token)
    }

    ///
    /// Executes the read-only call of `name` returning a `bool`.
    ///
    pub fn call_bool<C>(&self, client: &C, name: &str, arguments: &[ethabi::Token]) -> Result<bool>
    where
        C: Client,
    {
        let token = self.call_single(client, name, arguments)?;
        self::as_bool(name, token)
    }
}

///
/// Encodes the contract init code: `bytecode` followed by the ABI-encoded constructor arguments.
///
pub fn encode_constructor(
    interface: &ethabi::Contract,
    bytecode: &[u8],
    arguments: &[ethabi::Token],
) -> Result<Vec<u8>> {
    match interface.constructor() {
        Some(constructor) => constructor
            .encode_input(bytecode.to_vec(), arguments)
            .map_err(|error| Error::binding("constructor", error)),
        None if arguments.is_empty() => Ok(bytecode.to_vec()),
        None => Err(Error::binding(
            "constructor",
            format!(
                "the contract has no constructor, but {} argument(s) were given",
                arguments.len()
            ),
        )),
    }
}

///
/// Converts the output of `function` into an address.
///
pub fn as_address(function: &str, token: ethabi::Token) -> Result<web3::types::Address> {
    token
        .clone()
        .into_address()
        .ok_or_else(|| Error::binding(function, format!("expected an address, found {token}")))
}

///
/// Converts the output of `function` into an unsigned integer.
///
pub fn as_uint(function: &str, token: ethabi::Token) -> Result<web3::types::U256> {
    token
        .clone()
        .into_uint()
        .ok_or_else(|| Error::binding(function, format!("expected an integer, found {token}")))
}

///
/// Converts the output of `function` into a `bool`.
///
pub fn as_bool(function: &str, token: ethabi::Token) -> Result<bool> {
    token
        .clone()
        .into_bool()
        .ok_or_else(|| Error::binding(function, format!("expected a bool, found {token}")))
}
