//!
//! The signing account.
//!

use web3::signing::Key;
use web3::signing::SecretKey;
use web3::signing::SecretKeyRef;

use crate::error::Error;
use crate::error::Result;

///
/// The signing account, derived from its private key.
///
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Account {
    /// The account address.
    pub address: web3::types::Address,
    /// The private key bytes.
    private_key: web3::types::H256,
    /// The parsed secp256k1 key.
    secret: SecretKey,
}

impl Account {
    ///
    /// Derives the account from a hex private key, with or without the `0x` marker.
    ///
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let private_key = private_key.trim();
        let private_key = private_key.strip_prefix("0x").unwrap_or(private_key);
        let bytes = hex::decode(private_key).map_err(|error| Error::Signing {
            reason: format!("Private key is not hex: {error}"),
        })?;
        Self::from_bytes(bytes.as_slice())
    }

    ///
    /// Derives the account from raw private key bytes.
    ///
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != crate::BYTE_LENGTH_FIELD {
            return Err(Error::Signing {
                reason: format!(
                    "Private key must be {} bytes long, found {}",
                    crate::BYTE_LENGTH_FIELD,
                    bytes.len()
                ),
            });
        }
        let secret = SecretKey::from_slice(bytes).map_err(|error| Error::Signing {
            reason: format!("Invalid private key: {error}"),
        })?;
        let address = SecretKeyRef::new(&secret).address();

        Ok(Self {
            address,
            private_key: web3::types::H256::from_slice(bytes),
            secret,
        })
    }

    ///
    /// Returns the private key as hex with the `0x` marker.
    ///
    pub fn private_key(&self) -> String {
        format!("0x{}", hex::encode(self.private_key.as_bytes()))
    }

    ///
    /// Signs a 32-byte message hash, applying the EIP-155 `v` offset if `chain_id` is set.
    ///
    pub fn sign_hash(
        &self,
        hash: &[u8; crate::BYTE_LENGTH_FIELD],
        chain_id: Option<u64>,
    ) -> Result<web3::signing::Signature> {
        SecretKeyRef::new(&self.secret)
            .sign(hash, chain_id)
            .map_err(|error| Error::Signing {
                reason: error.to_string(),
            })
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

