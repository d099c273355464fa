use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ChainIdParseError;

/// EIP-155 chain identifier embedded after the `@` of a payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct ChainId(u64);

impl ChainId {
    pub const MAINNET: ChainId = ChainId(1);
    pub const SEPOLIA: ChainId = ChainId(11_155_111);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::MAINNET
    }
}

impl From<u64> for ChainId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ChainId> for u64 {
    fn from(value: ChainId) -> Self {
        value.0
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.starts_with('-') {
            return Err(ChainIdParseError::Negative);
        }
        if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(if looks_fractional(trimmed) {
                ChainIdParseError::NotWhole
            } else {
                ChainIdParseError::Malformed
            });
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ChainIdParseError::Overflow)
    }
}

fn looks_fractional(input: &str) -> bool {
    match input.split_once('.') {
        Some((whole, frac)) => {
            !(whole.is_empty() && frac.is_empty())
                && whole.bytes().chain(frac.bytes()).all(|byte| byte.is_ascii_digit())
        }
        None => false,
    }
}

/// Which of the four request shapes an intent is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    NativeTransfer,
    NativeTransferOnNetwork,
    TokenTransfer,
    TokenTransferOnNetwork,
}

impl IntentKind {
    pub const fn is_token(self) -> bool {
        matches!(self, Self::TokenTransfer | Self::TokenTransferOnNetwork)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NativeTransfer => "native_transfer",
            Self::NativeTransferOnNetwork => "native_transfer_on_network",
            Self::TokenTransfer => "token_transfer",
            Self::TokenTransferOnNetwork => "token_transfer_on_network",
        }
    }
}

impl Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to pay, exactly as the caller supplied it.
///
/// Fields hold raw strings; nothing here has been validated. Variants without
/// a `chain_id` target [`ChainId::MAINNET`]. Deserialization rejects fields the
/// chosen `kind` does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "snake_case",
    rename_all_fields = "camelCase",
    deny_unknown_fields
)]
pub enum PaymentIntent {
    NativeTransfer {
        to: String,
        amount: String,
    },
    NativeTransferOnNetwork {
        to: String,
        amount: String,
        #[serde(deserialize_with = "raw_chain_id")]
        chain_id: String,
    },
    TokenTransfer {
        erc20: String,
        to: String,
        amount: String,
    },
    TokenTransferOnNetwork {
        erc20: String,
        to: String,
        amount: String,
        #[serde(deserialize_with = "raw_chain_id")]
        chain_id: String,
    },
}

impl PaymentIntent {
    pub fn native(to: impl Into<String>, amount: impl Into<String>) -> Self {
        Self::NativeTransfer {
            to: to.into(),
            amount: amount.into(),
        }
    }

    pub fn native_on_chain(
        to: impl Into<String>,
        amount: impl Into<String>,
        chain_id: impl ToString,
    ) -> Self {
        Self::NativeTransferOnNetwork {
            to: to.into(),
            amount: amount.into(),
            chain_id: chain_id.to_string(),
        }
    }

    pub fn token(
        erc20: impl Into<String>,
        to: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self::TokenTransfer {
            erc20: erc20.into(),
            to: to.into(),
            amount: amount.into(),
        }
    }

    pub fn token_on_chain(
        erc20: impl Into<String>,
        to: impl Into<String>,
        amount: impl Into<String>,
        chain_id: impl ToString,
    ) -> Self {
        Self::TokenTransferOnNetwork {
            erc20: erc20.into(),
            to: to.into(),
            amount: amount.into(),
            chain_id: chain_id.to_string(),
        }
    }

    pub const fn kind(&self) -> IntentKind {
        match self {
            Self::NativeTransfer { .. } => IntentKind::NativeTransfer,
            Self::NativeTransferOnNetwork { .. } => IntentKind::NativeTransferOnNetwork,
            Self::TokenTransfer { .. } => IntentKind::TokenTransfer,
            Self::TokenTransferOnNetwork { .. } => IntentKind::TokenTransferOnNetwork,
        }
    }

    pub fn token_contract(&self) -> Option<&str> {
        match self {
            Self::TokenTransfer { erc20, .. } | Self::TokenTransferOnNetwork { erc20, .. } => {
                Some(erc20)
            }
            _ => None,
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Self::NativeTransfer { to, .. }
            | Self::NativeTransferOnNetwork { to, .. }
            | Self::TokenTransfer { to, .. }
            | Self::TokenTransferOnNetwork { to, .. } => to,
        }
    }

    pub fn amount(&self) -> &str {
        match self {
            Self::NativeTransfer { amount, .. }
            | Self::NativeTransferOnNetwork { amount, .. }
            | Self::TokenTransfer { amount, .. }
            | Self::TokenTransferOnNetwork { amount, .. } => amount,
        }
    }

    pub fn explicit_chain_id(&self) -> Option<&str> {
        match self {
            Self::NativeTransferOnNetwork { chain_id, .. }
            | Self::TokenTransferOnNetwork { chain_id, .. } => Some(chain_id),
            _ => None,
        }
    }
}

/// Canonical request string produced from a validated intent, before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUri {
    pub uri: String,
    pub kind: IntentKind,
    pub chain_id: ChainId,
    pub base_units: String,
    pub payload_bytes: usize,
}

impl PaymentUri {
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl Display for PaymentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

// JSON callers send chain ids as numbers; keep the raw text so the gate can judge it.
fn raw_chain_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Unsigned(value) => value.to_string(),
        NumberOrString::Signed(value) => value.to_string(),
        NumberOrString::Float(value) => value.to_string(),
        NumberOrString::Text(value) => value,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::ChainIdParseError;

    use super::{ChainId, IntentKind, PaymentIntent};

    const TO: &str = "0x7772fb5804c9C60B76C56aBEEb79f2F6d54519C4";
    const LINK: &str = "0x514910771AF9Ca656af840dff83E8264EcF986CA";

    #[test]
    fn chain_id_parses_whole_non_negative_numbers() {
        assert_eq!("1".parse::<ChainId>().unwrap(), ChainId::MAINNET);
        assert_eq!("11155111".parse::<ChainId>().unwrap(), ChainId::SEPOLIA);
        assert_eq!("0".parse::<ChainId>().unwrap().as_u64(), 0);
    }

    #[test]
    fn chain_id_rejects_malformed_input() {
        assert_eq!("-1".parse::<ChainId>(), Err(ChainIdParseError::Negative));
        assert_eq!("1.5".parse::<ChainId>(), Err(ChainIdParseError::NotWhole));
        assert_eq!("sepolia".parse::<ChainId>(), Err(ChainIdParseError::Malformed));
        assert_eq!("".parse::<ChainId>(), Err(ChainIdParseError::Malformed));
        assert_eq!("+5".parse::<ChainId>(), Err(ChainIdParseError::Malformed));
        assert_eq!("0x1".parse::<ChainId>(), Err(ChainIdParseError::Malformed));
        assert_eq!(
            "18446744073709551616".parse::<ChainId>(),
            Err(ChainIdParseError::Overflow)
        );
    }

    #[test]
    fn accessors_follow_the_variant() {
        let native = PaymentIntent::native(TO, "0.1");
        assert_eq!(native.kind(), IntentKind::NativeTransfer);
        assert_eq!(native.token_contract(), None);
        assert_eq!(native.explicit_chain_id(), None);

        let token = PaymentIntent::token_on_chain(LINK, TO, "1", ChainId::SEPOLIA);
        assert_eq!(token.kind(), IntentKind::TokenTransferOnNetwork);
        assert!(token.kind().is_token());
        assert_eq!(token.token_contract(), Some(LINK));
        assert_eq!(token.recipient(), TO);
        assert_eq!(token.amount(), "1");
        assert_eq!(token.explicit_chain_id(), Some("11155111"));
    }

    #[test]
    fn intent_deserializes_numeric_and_textual_chain_ids() {
        let numeric: PaymentIntent = serde_json::from_str(&format!(
            r#"{{"kind":"native_transfer_on_network","to":"{TO}","amount":"0.1","chainId":11155111}}"#
        ))
        .unwrap();
        assert_eq!(numeric.explicit_chain_id(), Some("11155111"));

        let negative: PaymentIntent = serde_json::from_str(&format!(
            r#"{{"kind":"native_transfer_on_network","to":"{TO}","amount":"0.1","chainId":-5}}"#
        ))
        .unwrap();
        assert_eq!(negative.explicit_chain_id(), Some("-5"));

        let textual: PaymentIntent = serde_json::from_str(&format!(
            r#"{{"kind":"token_transfer_on_network","erc20":"{LINK}","to":"{TO}","amount":"1","chainId":"5"}}"#
        ))
        .unwrap();
        assert_eq!(textual.explicit_chain_id(), Some("5"));
    }

    #[test]
    fn intent_serializes_with_kind_tag() {
        let intent = PaymentIntent::token(LINK, TO, "2");
        let value = serde_json::to_value(&intent).unwrap();
        assert_eq!(value["kind"], "token_transfer");
        assert_eq!(value["erc20"], LINK);
        assert_eq!(value["to"], TO);
        assert_eq!(value["amount"], "2");
    }

    #[test]
    fn intent_rejects_fields_its_kind_does_not_carry() {
        let chain_on_mainnet_shape = serde_json::from_str::<PaymentIntent>(&format!(
            r#"{{"kind":"native_transfer","to":"{TO}","amount":"1","chainId":11155111}}"#
        ));
        let err = chain_on_mainnet_shape.unwrap_err().to_string();
        assert!(err.contains("chainId"), "{err}");

        let erc20_on_native = serde_json::from_str::<PaymentIntent>(&format!(
            r#"{{"kind":"native_transfer_on_network","erc20":"{LINK}","to":"{TO}","amount":"1","chainId":5}}"#
        ));
        assert!(erc20_on_native.is_err());

        let stray_value = serde_json::from_str::<PaymentIntent>(&format!(
            r#"{{"kind":"native_transfer","to":"{TO}","value":"1","amount":"2"}}"#
        ));
        assert!(stray_value.unwrap_err().to_string().contains("value"));
    }
}
