use crate::error::{Eip681Error, Field, Result};
use crate::types::{PaymentIntent, PaymentUri};
use crate::units::{Unit, UnitConverter};
use crate::validation::{validate_intent, AddressValidator};

pub const SCHEME: &str = "ethereum";
pub const TRANSFER_FUNCTION: &str = "transfer";

/// Validates `intent` and assembles its canonical EIP-681 request.
///
/// Native transfers anchor on the recipient and carry `value`; token transfers
/// anchor on the contract and call `transfer(address, uint256)`. The chain id
/// is always present, defaulting to mainnet.
pub fn build_payment_uri(
    intent: &PaymentIntent,
    validator: &dyn AddressValidator,
    converter: &dyn UnitConverter,
) -> Result<PaymentUri> {
    let chain_id = validate_intent(intent, validator)?;

    let amount = intent.amount();
    let base_units = converter
        .to_base_units(amount, Unit::Ether)
        .map_err(|err| Eip681Error::invalid(Field::Amount, amount, err.to_string()))?;

    let uri = match intent.token_contract() {
        None => format!(
            "{SCHEME}:{to}@{chain_id}?value={base_units}",
            to = intent.recipient()
        ),
        Some(erc20) => format!(
            "{SCHEME}:{erc20}@{chain_id}/{TRANSFER_FUNCTION}?address={to}&uint256={base_units}",
            to = intent.recipient()
        ),
    };

    let kind = intent.kind();
    let payload_bytes = uri.len();
    tracing::debug!(%kind, %chain_id, payload_bytes, "built payment request");

    Ok(PaymentUri {
        uri,
        kind,
        chain_id,
        base_units,
        payload_bytes,
    })
}
