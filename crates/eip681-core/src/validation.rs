//! Input gate applied to a [`PaymentIntent`] before any request string is built.

use alloy_primitives::Address;

use crate::error::{Eip681Error, Field, Result};
use crate::types::{ChainId, PaymentIntent};
use crate::units::{has_nonzero_digit, split_decimal};

const ADDRESS_PREFIX: &str = "0x";
const ADDRESS_HEX_LEN: usize = 40;

/// Decides whether a string is a well-formed account or contract address.
pub trait AddressValidator {
    fn is_valid_address(&self, address: &str) -> bool;
}

/// `0x`-prefixed, 40 hex digits; mixed case must carry a valid EIP-55 checksum.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecksumAddressValidator;

impl AddressValidator for ChecksumAddressValidator {
    fn is_valid_address(&self, address: &str) -> bool {
        let Some(body) = address.strip_prefix(ADDRESS_PREFIX) else {
            return false;
        };
        if body.len() != ADDRESS_HEX_LEN || !body.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return false;
        }

        let has_lower = body.bytes().any(|byte| byte.is_ascii_lowercase());
        let has_upper = body.bytes().any(|byte| byte.is_ascii_uppercase());
        if !(has_lower && has_upper) {
            return true;
        }
        Address::parse_checksummed(address, None).is_ok()
    }
}

pub fn validate_token_contract(validator: &dyn AddressValidator, erc20: &str) -> Result<()> {
    if validator.is_valid_address(erc20) {
        Ok(())
    } else {
        Err(Eip681Error::invalid(
            Field::Erc20,
            erc20,
            "is not a valid ERC-20 contract address",
        ))
    }
}

pub fn validate_recipient(validator: &dyn AddressValidator, to: &str) -> Result<()> {
    if validator.is_valid_address(to) {
        Ok(())
    } else {
        Err(Eip681Error::invalid(
            Field::To,
            to,
            "is not a valid Ethereum address",
        ))
    }
}

pub fn validate_amount(amount: &str) -> Result<()> {
    if let Some(magnitude) = amount.trim().strip_prefix('-') {
        if has_nonzero_digit(magnitude) && split_decimal(magnitude).is_ok() {
            return Err(Eip681Error::invalid(Field::Amount, amount, "must not be negative"));
        }
    }
    split_decimal(amount)
        .map(|_| ())
        .map_err(|_| Eip681Error::invalid(Field::Amount, amount, "is not a valid amount of ether"))
}

pub fn validate_chain_id(chain_id: &str) -> Result<ChainId> {
    chain_id
        .parse::<ChainId>()
        .map_err(|err| Eip681Error::invalid(Field::ChainId, chain_id, err.to_string()))
}

/// Runs every check in order and stops at the first failure: token contract,
/// recipient, amount, explicit chain id. Returns the chain id the request
/// targets.
pub fn validate_intent(intent: &PaymentIntent, validator: &dyn AddressValidator) -> Result<ChainId> {
    if let Some(erc20) = intent.token_contract() {
        validate_token_contract(validator, erc20)?;
    }
    validate_recipient(validator, intent.recipient())?;
    validate_amount(intent.amount())?;
    match intent.explicit_chain_id() {
        Some(raw) => validate_chain_id(raw),
        None => Ok(ChainId::MAINNET),
    }
}
