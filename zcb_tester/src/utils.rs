//!
//! The harness utils.
//!

///
/// Formats `Address` as full `0x`-prefixed hex, unlike its `Display`, which elides the middle.
///
pub fn address_as_string(value: &web3::types::Address) -> String {
    format!("0x{}", hex::encode(value.as_bytes()))
}

///
/// Converts `Address` into `H256`.
///
pub fn address_to_h256(address: &web3::types::Address) -> web3::types::H256 {
    let mut buffer = [0u8; crate::BYTE_LENGTH_FIELD];
    buffer[crate::BYTE_LENGTH_FIELD - crate::BYTE_LENGTH_ETH_ADDRESS..]
        .copy_from_slice(address.as_bytes());
    web3::types::H256(buffer)
}

///
/// Converts `U256` into `H256`.
///
pub fn u256_to_h256(value: &web3::types::U256) -> web3::types::H256 {
    let mut bytes = vec![0; crate::BYTE_LENGTH_FIELD];
    value.to_big_endian(&mut bytes);
    web3::types::H256::from_slice(bytes.as_slice())
}

///
/// Converts `U256` into big-endian bytes without leading zeros, as RLP expects.
///
pub fn u256_to_minimal_bytes(value: &web3::types::U256) -> Vec<u8> {
    let mut bytes = vec![0; crate::BYTE_LENGTH_FIELD];
    value.to_big_endian(&mut bytes);
    let start = bytes
        .iter()
        .position(|byte| *byte != 0)
        .unwrap_or(bytes.len());
    bytes.split_off(start)
}

///
/// Returns `10^decimals * amount`.
///
pub fn scaled(amount: u64, decimals: usize) -> web3::types::U256 {
    web3::types::U256::from(amount) * web3::types::U256::exp10(decimals)
}
