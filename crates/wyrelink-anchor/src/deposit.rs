//! Deposit-side custody flow: the operations the anchoring framework drives
//! against a custody provider and the ledger.

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use wyrelink_core::{
    Amount, CancelToken, CustodyCapabilities, CustodyError, CustodyProvider, Destination,
    TransferRequest, ValidationError,
};

use crate::ledger::{LedgerError, LedgerGateway};
use crate::transaction::{DepositTransaction, MemoType};

#[derive(Debug, Error)]
pub enum AnchorError {
    #[error(transparent)]
    Custody(#[from] CustodyError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Malformed(#[from] ValidationError),

    /// The fee consumed the whole deposit; nothing is left to forward.
    #[error("deposit payout must be positive: amount_in {amount_in} minus fee {amount_fee} leaves {payout}")]
    NonPositivePayout {
        amount_in: Decimal,
        amount_fee: Decimal,
        payout: Decimal,
    },
}

/// Custody-backed deposit flow over a provider and a ledger gateway.
pub struct DepositFlow<P, L> {
    provider: P,
    ledger: L,
}

impl<P, L> DepositFlow<P, L>
where
    P: CustodyProvider,
    L: LedgerGateway,
{
    pub fn new(provider: P, ledger: L) -> Self {
        Self { provider, ledger }
    }

    pub fn capabilities(&self) -> CustodyCapabilities {
        self.provider.capabilities()
    }

    /// The provider-held account that receives payments for every asset this
    /// anchor distributes. Stable across calls for the same configuration.
    pub async fn distribution_account(&self) -> Result<String, AnchorError> {
        let deposit_address = self.provider.resolve_receiving_address().await?;
        Ok(deposit_address.account().to_owned())
    }

    /// Store the receiving account, memo, and memo type on the transaction
    /// record. Called once per transaction during deposit setup.
    pub async fn assign_receiving_account(
        &self,
        transaction: &mut DepositTransaction,
    ) -> Result<(), AnchorError> {
        let deposit_address = self.provider.resolve_receiving_address().await?;
        transaction.receiving_anchor_account = Some(deposit_address.account().to_owned());
        // TODO: derive a per-transaction memo; the provider exposes one
        // secondary id per account, so concurrent deposits to the same
        // account are not distinguishable by memo alone.
        transaction.memo = Some(deposit_address.secondary_id().to_owned());
        transaction.memo_type = Some(MemoType::Text);
        Ok(())
    }

    /// Forward a deposit through the provider and return the finalized
    /// on-chain transaction record from the ledger.
    pub async fn submit_deposit(
        &self,
        transaction: &DepositTransaction,
        cancel: &CancelToken,
    ) -> Result<Value, AnchorError> {
        let request = transfer_request_for(transaction)?;
        let transfer_id = self.provider.initiate_transfer(request).await?;
        let network_tx_id = self.provider.await_settlement(&transfer_id, cancel).await?;
        info!(
            transfer_id = %transfer_id,
            network_tx_id = %network_tx_id,
            "deposit settled, fetching ledger record"
        );
        Ok(self.ledger.transaction_by_id(&network_tx_id).await?)
    }

    /// Fund the destination account for providers that support it.
    pub async fn create_destination_account(
        &self,
        transaction: &DepositTransaction,
    ) -> Result<(), AnchorError> {
        Ok(self
            .provider
            .create_destination_account(&transaction.to_address)
            .await?)
    }
}

/// Build the provider transfer request for a deposit: payout is the gross
/// amount minus the fee, rounded to the asset's significant decimals
/// (midpoint-to-even, matching the framework's own rounding).
fn transfer_request_for(
    transaction: &DepositTransaction,
) -> Result<TransferRequest, AnchorError> {
    let payout = (transaction.amount_in - transaction.amount_fee)
        .round_dp(transaction.asset.significant_decimals);
    if payout <= Decimal::ZERO {
        return Err(AnchorError::NonPositivePayout {
            amount_in: transaction.amount_in,
            amount_fee: transaction.amount_fee,
            payout,
        });
    }

    Ok(TransferRequest::new(
        transaction.asset.code.clone(),
        Amount::new(payout)?,
        Destination::stellar(&transaction.to_address)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::AnchorAsset;
    use wyrelink_core::AssetCode;

    fn deposit(amount_in: &str, amount_fee: &str, decimals: u32) -> DepositTransaction {
        DepositTransaction::new(
            amount_in.parse().expect("valid decimal"),
            amount_fee.parse().expect("valid decimal"),
            AnchorAsset::new(AssetCode::parse("USDC").expect("valid code"), decimals),
            "GADDR123",
        )
    }

    #[test]
    fn payout_subtracts_fee_and_rounds_to_significant_decimals() {
        let request = transfer_request_for(&deposit("100.129", "0.10", 2)).expect("valid payout");

        assert_eq!(request.amount().to_string(), "100.03");
        assert_eq!(request.currency().as_str(), "USDC");
        assert_eq!(request.destination().as_str(), "stellar:GADDR123");
    }

    #[test]
    fn payout_rounds_midpoints_to_even() {
        let request = transfer_request_for(&deposit("100.005", "0", 2)).expect("valid payout");
        assert_eq!(request.amount().to_string(), "100.00");

        let request = transfer_request_for(&deposit("100.015", "0", 2)).expect("valid payout");
        assert_eq!(request.amount().to_string(), "100.02");
    }

    #[test]
    fn fee_consuming_the_deposit_is_rejected() {
        let error = transfer_request_for(&deposit("1.00", "1.00", 2)).expect_err("must fail");
        assert!(matches!(error, AnchorError::NonPositivePayout { .. }));
    }

    #[test]
    fn fee_exceeding_the_deposit_is_rejected() {
        let error = transfer_request_for(&deposit("1.00", "2.50", 2)).expect_err("must fail");
        assert!(matches!(error, AnchorError::NonPositivePayout { .. }));
    }
}
