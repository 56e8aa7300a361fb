//!
//! The locally tracked bond.
//!

///
/// The locally tracked bond, populated from the `Create` event.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondInfo {
    /// The bond contract address.
    pub id: web3::types::Address,
    /// The account that created the bond.
    pub issuer: web3::types::Address,
    /// The number of bonds issued.
    pub total: u64,
    /// The current redeem lock period in seconds.
    pub redeem_lock_period: u64,
    /// The investment token address.
    pub investment_token: web3::types::Address,
    /// The investment token amount per bond.
    pub investment_amount: web3::types::U256,
    /// The interest token address.
    pub interest_token: web3::types::Address,
    /// The interest token amount per bond.
    pub interest_amount: web3::types::U256,
    /// The ids of the bonds purchased by the owner.
    pub purchased_ids: Vec<u64>,
}
