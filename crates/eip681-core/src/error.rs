use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input field named by an [`Eip681Error::InvalidInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Erc20,
    To,
    Amount,
    ChainId,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Erc20 => "erc20",
            Field::To => "to",
            Field::Amount => "amount",
            Field::ChainId => "chainId",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode QR data: {0}")]
    QrEncode(String),

    #[error("failed to encode PNG bytes: {0}")]
    PngEncode(String),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("not a decimal number")]
    InvalidNumeric,

    #[error("has {decimals} significant decimal places, {unit} allows at most {max}")]
    TooManyDecimals {
        decimals: usize,
        max: u8,
        unit: &'static str,
    },

    #[error("does not fit in 256 bits of base units")]
    Overflow,

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainIdParseError {
    #[error("is not a valid chain id")]
    Malformed,

    #[error("must not be negative")]
    Negative,

    #[error("must be a whole number")]
    NotWhole,

    #[error("does not fit in 64 bits")]
    Overflow,
}

#[derive(Debug, Error)]
pub enum Eip681Error {
    #[error("provided '{field}' {reason}: {value}")]
    InvalidInput {
        field: Field,
        value: String,
        reason: String,
    },

    #[error("render failure: {0}")]
    RenderFailure(#[from] RenderError),
}

impl Eip681Error {
    pub(crate) fn invalid(field: Field, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// The offending field, for validation failures.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::InvalidInput { field, .. } => Some(*field),
            Self::RenderFailure(_) => None,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidInput {
                field: Field::Erc20 | Field::To,
                ..
            } => 1001,
            Self::InvalidInput {
                field: Field::Amount,
                ..
            } => 1002,
            Self::InvalidInput {
                field: Field::ChainId,
                ..
            } => 1003,
            Self::RenderFailure(_) => 5003,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.code() {
            1001 => "INVALID_ADDRESS",
            1002 => "INVALID_AMOUNT",
            1003 => "INVALID_CHAIN_ID",
            _ => "RENDER_FAILED",
        }
    }
}

pub type Result<T> = std::result::Result<T, Eip681Error>;
