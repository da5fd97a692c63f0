use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

use super::{Amount, AssetCode};

/// Destination address with its chain scheme (`"stellar:<address>"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Destination(String);

impl Destination {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let Some((scheme, address)) = trimmed.split_once(':') else {
            return Err(ValidationError::DestinationMissingScheme {
                value: trimmed.to_owned(),
            });
        };
        if scheme.is_empty() {
            return Err(ValidationError::DestinationMissingScheme {
                value: trimmed.to_owned(),
            });
        }
        if address.is_empty() {
            return Err(ValidationError::EmptyDestinationAddress);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Build a Stellar destination from a bare account address.
    pub fn stellar(address: &str) -> Result<Self, ValidationError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ValidationError::EmptyDestinationAddress);
        }
        Ok(Self(format!("stellar:{address}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Destination {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Destination {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Destination> for String {
    fn from(value: Destination) -> Self {
        value.0
    }
}

/// Opaque provider-assigned transfer identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransferId(String);

impl TransferId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTransferId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransferId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TransferId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for TransferId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TransferId> for String {
    fn from(value: TransferId) -> Self {
        value.0
    }
}

/// Remote transfer status as reported by the provider.
///
/// Only `Completed` and `Failed` are terminal; every other value, including
/// statuses this crate does not know about, keeps the settlement wait going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransferStatus {
    Pending,
    Initiated,
    Completed,
    Failed,
    Other(String),
}

impl TransferStatus {
    pub fn parse(input: &str) -> Self {
        match input {
            "PENDING" => Self::Pending,
            "INITIATED" => Self::Initiated,
            "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Initiated => "INITIATED",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Other(value) => value,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl Display for TransferStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TransferStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<TransferStatus> for String {
    fn from(value: TransferStatus) -> Self {
        value.as_str().to_owned()
    }
}

/// Provider-held receiving account plus the per-user secondary id embedded
/// alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositAddress {
    account: String,
    secondary_id: String,
}

impl DepositAddress {
    /// Split the provider's composite `"<account>:<secondary-id>"` string on
    /// the first colon. Secondary ids may themselves contain colons.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let Some((account, secondary_id)) = input.split_once(':') else {
            return Err(ValidationError::MalformedDepositAddress {
                value: input.to_owned(),
            });
        };
        if account.is_empty() || secondary_id.is_empty() {
            return Err(ValidationError::MalformedDepositAddress {
                value: input.to_owned(),
            });
        }
        Ok(Self {
            account: account.to_owned(),
            secondary_id: secondary_id.to_owned(),
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn secondary_id(&self) -> &str {
        &self.secondary_id
    }
}

/// Immutable transfer submission, constructed once per deposit.
///
/// Source and destination currency are always identical; this core does not
/// support cross-currency conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    currency: AssetCode,
    amount: Amount,
    destination: Destination,
}

impl TransferRequest {
    pub fn new(currency: AssetCode, amount: Amount, destination: Destination) -> Self {
        Self {
            currency,
            amount,
            destination,
        }
    }

    pub fn currency(&self) -> &AssetCode {
        &self.currency
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }
}
