use thiserror::Error;

/// Validation and contract errors exposed by `wyrelink-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("asset code cannot be empty")]
    EmptyAssetCode,
    #[error("asset code length {len} exceeds max {max}")]
    AssetCodeTooLong { len: usize, max: usize },
    #[error("asset code must start with an ASCII letter: '{ch}'")]
    AssetCodeInvalidStart { ch: char },
    #[error("asset code contains invalid character '{ch}' at index {index}")]
    AssetCodeInvalidChar { ch: char, index: usize },

    #[error("amount is not a valid decimal: '{value}'")]
    MalformedAmount { value: String },
    #[error("amount must be strictly positive: '{value}'")]
    NonPositiveAmount { value: String },

    #[error("destination must be '<scheme>:<address>': '{value}'")]
    DestinationMissingScheme { value: String },
    #[error("destination address cannot be empty")]
    EmptyDestinationAddress,

    #[error("transfer id cannot be empty")]
    EmptyTransferId,

    #[error("deposit address must be '<account>:<secondary-id>': '{value}'")]
    MalformedDepositAddress { value: String },
}
