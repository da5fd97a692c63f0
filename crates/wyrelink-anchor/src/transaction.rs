use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wyrelink_core::AssetCode;

/// Asset descriptor supplied by the host framework alongside a deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorAsset {
    pub code: AssetCode,
    /// Decimal places the chain representation of this asset carries.
    pub significant_decimals: u32,
}

impl AnchorAsset {
    pub fn new(code: AssetCode, significant_decimals: u32) -> Self {
        Self {
            code,
            significant_decimals,
        }
    }
}

/// Memo flavor attached to the receiving account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoType {
    Text,
    Id,
    Hash,
}

/// Framework-level deposit record this adapter reads and populates.
///
/// The host framework persists the record; this crate only fills in the
/// receiving account, memo, and memo type during deposit setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositTransaction {
    /// Gross amount the user sent in.
    pub amount_in: Decimal,
    /// Fee withheld by the anchor.
    pub amount_fee: Decimal,
    pub asset: AnchorAsset,
    /// Destination account on the network.
    pub to_address: String,
    pub receiving_anchor_account: Option<String>,
    pub memo: Option<String>,
    pub memo_type: Option<MemoType>,
}

impl DepositTransaction {
    pub fn new(
        amount_in: Decimal,
        amount_fee: Decimal,
        asset: AnchorAsset,
        to_address: impl Into<String>,
    ) -> Self {
        Self {
            amount_in,
            amount_fee,
            asset,
            to_address: to_address.into(),
            receiving_anchor_account: None,
            memo: None,
            memo_type: None,
        }
    }
}
