//!
//! The scenario configuration.
//!

///
/// The scenario configuration.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    /// The issuer creation fee set by the constructor.
    pub initial_creation_fee: web3::types::U256,
    /// The issuer creation fee percentage set by the constructor, with two decimals.
    pub initial_creation_fee_percentage: u16,
    /// The issuer creation fee after the change.
    pub changed_creation_fee: web3::types::U256,
    /// The issuer creation fee percentage after the change.
    pub changed_creation_fee_percentage: u16,
    /// The issuer pause flag after the change.
    pub changed_pause_state: bool,
    /// The number of bonds issued.
    pub total: u64,
    /// The redeem lock period in seconds.
    pub redeem_lock_period: u64,
    /// The redeem lock period after the decrease.
    pub decreased_redeem_lock_period: u64,
    /// The investment token amount per bond.
    pub investment_amount: web3::types::U256,
    /// The interest token amount per bond.
    pub interest_amount: web3::types::U256,
    /// The bond name.
    pub bond_name: String,
    /// The number of bonds purchased by the owner.
    pub purchase_count: u64,
    /// The bond fee percentage after the change, with two decimals.
    pub changed_bond_fee_percentage: u16,
}

impl ScenarioConfig {
    /// The token decimals.
    pub const TOKEN_DECIMALS: usize = 18;
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            initial_creation_fee: web3::types::U256::exp10(Self::TOKEN_DECIMALS) / 2,
            initial_creation_fee_percentage: 50,
            changed_creation_fee: web3::types::U256::exp10(Self::TOKEN_DECIMALS),
            changed_creation_fee_percentage: 100,
            changed_pause_state: true,
            total: 1000,
            redeem_lock_period: 10,
            decreased_redeem_lock_period: 3,
            investment_amount: crate::utils::scaled(100, Self::TOKEN_DECIMALS),
            interest_amount: crate::utils::scaled(110, Self::TOKEN_DECIMALS),
            bond_name: "USDT-USDC| Amet Finance".to_owned(),
            purchase_count: 10,
            changed_bond_fee_percentage: 50,
        }
    }
}
