pub mod qr;
pub mod uri;

use std::path::PathBuf;

use clap::Args;
use eip681_core::{PaymentIntent, PaymentUri};

use crate::output::RequestSummary;
use crate::CliError;

/// Describes the payment either inline or through a JSON intent file.
#[derive(Debug, Clone, Args)]
pub struct IntentArgs {
    /// JSON file holding a serialized payment intent
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Recipient address
    #[arg(long)]
    pub to: Option<String>,

    /// Amount in ether, as a decimal string
    #[arg(long = "value")]
    pub value: Option<String>,

    /// ERC-20 contract address; requests a token transfer instead of ether
    #[arg(long)]
    pub erc20: Option<String>,

    /// Chain id; mainnet is used when absent
    #[arg(long, env = "EIP681_CHAIN_ID")]
    pub chain_id: Option<String>,
}

impl IntentArgs {
    pub fn resolve(&self) -> Result<PaymentIntent, CliError> {
        if let Some(path) = &self.input {
            if self.to.is_some() || self.value.is_some() || self.erc20.is_some() {
                return Err(CliError::Usage(
                    "--input cannot be combined with --to, --value or --erc20".to_string(),
                ));
            }
            // The intent file names its own chain.
            if self.chain_id.is_some() {
                return Err(CliError::Usage(
                    "--input cannot be combined with --chain-id or EIP681_CHAIN_ID".to_string(),
                ));
            }
            let bytes = std::fs::read(path)?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let to = self
            .to
            .clone()
            .ok_or_else(|| CliError::Usage("missing --to (or --input)".to_string()))?;
        let value = self
            .value
            .clone()
            .ok_or_else(|| CliError::Usage("missing --value (or --input)".to_string()))?;

        Ok(match (&self.erc20, &self.chain_id) {
            (None, None) => PaymentIntent::native(to, value),
            (None, Some(chain_id)) => PaymentIntent::native_on_chain(to, value, chain_id),
            (Some(erc20), None) => PaymentIntent::token(erc20.clone(), to, value),
            (Some(erc20), Some(chain_id)) => {
                PaymentIntent::token_on_chain(erc20.clone(), to, value, chain_id)
            }
        })
    }
}

pub(crate) fn request_summary(intent: &PaymentIntent, uri: &PaymentUri) -> RequestSummary {
    RequestSummary {
        kind: uri.kind.to_string(),
        chain_id: uri.chain_id.as_u64(),
        target: intent
            .token_contract()
            .unwrap_or_else(|| intent.recipient())
            .to_string(),
        recipient: intent.recipient().to_string(),
        base_units: uri.base_units.clone(),
        uri: uri.uri.clone(),
    }
}
