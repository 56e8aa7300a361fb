//!
//! The deployed contract.
//!

use web3::ethabi;

use crate::binding::ContractBinding;

///
/// The deployed contract.
///
#[derive(Debug, Clone)]
pub struct Deployment {
    /// The created contract address.
    pub contract_address: web3::types::Address,
    /// The deploying account address.
    pub issuer: web3::types::Address,
    /// The contract ABI.
    pub abi: ethabi::Contract,
}

impl Deployment {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        contract_address: web3::types::Address,
        issuer: web3::types::Address,
        abi: ethabi::Contract,
    ) -> Self {
        Self {
            contract_address,
            issuer,
            abi,
        }
    }

    ///
    /// Returns the binding of the deployed contract.
    ///
    pub fn binding(&self) -> ContractBinding {
        ContractBinding::new(self.contract_address, self.abi.clone())
    }
}
