//!
//! The contract type.
//!

use std::str::FromStr;

use crate::error::Error;

///
/// The contract type, one per compiled contract build.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractType {
    /// The zero-coupon bond issuer factory.
    ZcbIssuer,
    /// The zero-coupon bond created by the issuer.
    Zcb,
    /// The USDT stablecoin mock.
    Usdt,
    /// The USDC stablecoin mock.
    Usdc,
}

impl ContractType {
    /// All contract types in the artifact table order.
    pub const ALL: [Self; 4] = [Self::ZcbIssuer, Self::Zcb, Self::Usdt, Self::Usdc];

    ///
    /// Returns the `.bin` and `.abi` paths relative to the artifacts root.
    ///
    pub fn paths(&self) -> (&'static str, &'static str) {
        match self {
            Self::ZcbIssuer => (
                "zcb-v2/artefacts/zcb-issuer/bin/ZeroCouponBondsIssuerV1.bin",
                "zcb-v2/artefacts/zcb-issuer/abi/ZeroCouponBondsIssuerV1.abi",
            ),
            Self::Zcb => (
                "zcb-v2/artefacts/zcb/bin/ZeroCouponBondsV1.bin",
                "zcb-v2/artefacts/zcb/abi/ZeroCouponBondsV1.abi",
            ),
            Self::Usdt => (
                "tokens/artefacts/USDT/bin/USDT.bin",
                "tokens/artefacts/USDT/abi/USDT.abi",
            ),
            Self::Usdc => (
                "tokens/artefacts/USDC/bin/USDC.bin",
                "tokens/artefacts/USDC/abi/USDC.abi",
            ),
        }
    }

    ///
    /// Whether the contract can be deployed as the scenario issuer.
    ///
    pub fn is_issuer(&self) -> bool {
        matches!(self, Self::ZcbIssuer)
    }
}

impl FromStr for ContractType {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_lowercase().replace('_', "-").as_str() {
            "zcb-issuer" => Ok(Self::ZcbIssuer),
            "zcb" => Ok(Self::Zcb),
            "usdt" => Ok(Self::Usdt),
            "usdc" => Ok(Self::Usdc),
            _ => Err(Error::ArtifactNotFound {
                name: string.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZcbIssuer => write!(f, "zcb-issuer"),
            Self::Zcb => write!(f, "zcb"),
            Self::Usdt => write!(f, "usdt"),
            Self::Usdc => write!(f, "usdc"),
        }
    }
}
