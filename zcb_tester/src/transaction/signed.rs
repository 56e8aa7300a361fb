//!
//! The signed legacy transaction envelope.
//!

use crate::account::Account;
use crate::error::Error;
use crate::error::Result;
use crate::transaction::request::TransactionRequest;

///
/// The signed transaction, ready for `eth_sendRawTransaction`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// The RLP-encoded signed envelope.
    pub raw: Vec<u8>,
    /// The transaction hash.
    pub hash: web3::types::H256,
}

///
/// The transaction decoded from its raw envelope, with the sender recovered from the signature.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredTransaction {
    /// The request fields, with `from` set to the recovered sender.
    pub request: TransactionRequest,
    /// The chain ID, if the signature is replay-protected.
    pub chain_id: Option<u64>,
    /// The transaction hash.
    pub hash: web3::types::H256,
}

impl SignedTransaction {
    /// The number of items in the signed envelope.
    const ITEMS_COUNT: usize = 9;

    /// The first `v` value carrying the EIP-155 chain ID.
    const EIP155_V_OFFSET: u64 = 35;

    /// The first `v` value without the chain ID.
    const LEGACY_V_OFFSET: u64 = 27;

    ///
    /// Signs `request` with `account` for the chain `chain_id`.
    ///
    /// The gas limit, gas price and nonce must be already set.
    ///
    pub fn sign(request: &TransactionRequest, account: &Account, chain_id: u64) -> Result<Self> {
        if request.from != account.address {
            return Err(Error::Signing {
                reason: format!(
                    "Request sender {} does not match the signing account {}",
                    crate::utils::address_as_string(&request.from),
                    crate::utils::address_as_string(&account.address),
                ),
            });
        }
        let nonce = request.nonce.ok_or_else(|| Error::Signing {
            reason: "The nonce is not set".to_owned(),
        })?;
        let gas_price = request.gas_price.ok_or_else(|| Error::Signing {
            reason: "The gas price is not set".to_owned(),
        })?;
        let gas = request.gas.ok_or_else(|| Error::Signing {
            reason: "The gas limit is not set".to_owned(),
        })?;

        let mut unsigned = rlp::RlpStream::new_list(Self::ITEMS_COUNT);
        Self::append_fields(&mut unsigned, request, nonce, gas_price, gas);
        unsigned.append(&chain_id);
        unsigned.append_empty_data();
        unsigned.append_empty_data();
        let signing_hash = web3::signing::keccak256(unsigned.out().as_ref());

        let signature = account.sign_hash(&signing_hash, Some(chain_id))?;

        let mut signed = rlp::RlpStream::new_list(Self::ITEMS_COUNT);
        Self::append_fields(&mut signed, request, nonce, gas_price, gas);
        signed.append(&signature.v);
        signed.append(&crate::utils::u256_to_minimal_bytes(
            &web3::types::U256::from_big_endian(signature.r.as_bytes()),
        ));
        signed.append(&crate::utils::u256_to_minimal_bytes(
            &web3::types::U256::from_big_endian(signature.s.as_bytes()),
        ));
        let raw = signed.out().to_vec();
        let hash = web3::types::H256(web3::signing::keccak256(raw.as_slice()));

        Ok(Self { raw, hash })
    }

    ///
    /// Decodes the raw envelope and recovers its sender.
    ///
    pub fn decode(raw: &[u8]) -> Result<RecoveredTransaction> {
        let rlp = rlp::Rlp::new(raw);
        if !rlp.is_list() {
            return Err(Error::InvalidTransaction {
                reason: "The envelope is not an RLP list".to_owned(),
            });
        }
        let count = rlp.item_count().map_err(Self::rlp_error)?;
        if count != Self::ITEMS_COUNT {
            return Err(Error::InvalidTransaction {
                reason: format!(
                    "Expected {} envelope items, found {count}",
                    Self::ITEMS_COUNT
                ),
            });
        }

        let nonce = Self::decode_u256(Self::item(&rlp, 0)?)?;
        let gas_price = Self::decode_u256(Self::item(&rlp, 1)?)?;
        let gas = Self::decode_u256(Self::item(&rlp, 2)?)?;
        let to = match Self::item(&rlp, 3)? {
            [] => None,
            bytes if bytes.len() == crate::BYTE_LENGTH_ETH_ADDRESS => {
                Some(web3::types::Address::from_slice(bytes))
            }
            bytes => {
                return Err(Error::InvalidTransaction {
                    reason: format!("Invalid destination length {}", bytes.len()),
                })
            }
        };
        let value = Self::decode_u256(Self::item(&rlp, 4)?)?;
        let data = Self::item(&rlp, 5)?.to_vec();
        let v = Self::decode_u256(Self::item(&rlp, 6)?)?;
        if v > web3::types::U256::from(u64::MAX) {
            return Err(Error::InvalidTransaction {
                reason: "The `v` value is out of range".to_owned(),
            });
        }
        let v = v.as_u64();
        let r = Self::decode_u256(Self::item(&rlp, 7)?)?;
        let s = Self::decode_u256(Self::item(&rlp, 8)?)?;

        let (chain_id, recovery_id) = if v >= Self::EIP155_V_OFFSET {
            (
                Some((v - Self::EIP155_V_OFFSET) / 2),
                (v - Self::EIP155_V_OFFSET) % 2,
            )
        } else if v == Self::LEGACY_V_OFFSET || v == Self::LEGACY_V_OFFSET + 1 {
            (None, v - Self::LEGACY_V_OFFSET)
        } else {
            return Err(Error::InvalidTransaction {
                reason: format!("Invalid `v` value {v}"),
            });
        };

        let mut request = TransactionRequest {
            to,
            from: web3::types::Address::zero(),
            data,
            value,
            gas: Some(gas),
            gas_price: Some(gas_price),
            nonce: Some(nonce),
        };

        let unsigned = match chain_id {
            Some(chain_id) => {
                let mut stream = rlp::RlpStream::new_list(Self::ITEMS_COUNT);
                Self::append_fields(&mut stream, &request, nonce, gas_price, gas);
                stream.append(&chain_id);
                stream.append_empty_data();
                stream.append_empty_data();
                stream
            }
            None => {
                let mut stream = rlp::RlpStream::new_list(Self::ITEMS_COUNT - 3);
                Self::append_fields(&mut stream, &request, nonce, gas_price, gas);
                stream
            }
        };
        let signing_hash = web3::signing::keccak256(unsigned.out().as_ref());

        let mut signature = Vec::with_capacity(crate::BYTE_LENGTH_FIELD * 2);
        signature.extend_from_slice(crate::utils::u256_to_h256(&r).as_bytes());
        signature.extend_from_slice(crate::utils::u256_to_h256(&s).as_bytes());
        request.from = web3::signing::recover(&signing_hash, signature.as_slice(), recovery_id as i32)
            .map_err(|error| Error::InvalidTransaction {
                reason: format!("Sender recovery: {error}"),
            })?;

        Ok(RecoveredTransaction {
            request,
            chain_id,
            hash: web3::types::H256(web3::signing::keccak256(raw)),
        })
    }

    ///
    /// Appends the six payload fields shared by the signed and unsigned envelopes.
    ///
    fn append_fields(
        stream: &mut rlp::RlpStream,
        request: &TransactionRequest,
        nonce: web3::types::U256,
        gas_price: web3::types::U256,
        gas: web3::types::U256,
    ) {
        stream.append(&crate::utils::u256_to_minimal_bytes(&nonce));
        stream.append(&crate::utils::u256_to_minimal_bytes(&gas_price));
        stream.append(&crate::utils::u256_to_minimal_bytes(&gas));
        match request.to {
            Some(to) => stream.append(&to.as_bytes().to_vec()),
            None => stream.append_empty_data(),
        };
        stream.append(&crate::utils::u256_to_minimal_bytes(&request.value));
        stream.append(&request.data);
    }

    ///
    /// Decodes a big-endian RLP scalar.
    ///
    fn decode_u256(bytes: &[u8]) -> Result<web3::types::U256> {
        if bytes.len() > crate::BYTE_LENGTH_FIELD {
            return Err(Error::InvalidTransaction {
                reason: format!("Scalar of {} bytes does not fit 256 bits", bytes.len()),
            });
        }
        Ok(web3::types::U256::from_big_endian(bytes))
    }

    ///
    /// Returns the payload of the envelope item at `index`.
    ///
    fn item<'a>(rlp: &rlp::Rlp<'a>, index: usize) -> Result<&'a [u8]> {
        rlp.at(index)
            .and_then(|item| item.data())
            .map_err(Self::rlp_error)
    }

    fn rlp_error(error: rlp::DecoderError) -> Error {
        Error::InvalidTransaction {
            reason: error.to_string(),
        }
    }
}
