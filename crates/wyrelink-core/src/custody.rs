//! Custody provider contract and error taxonomy.
//!
//! This module defines the seam between the anchor-facing adapter layer and
//! a concrete custody provider. A provider exposes exactly three domain
//! operations:
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | [`resolve_receiving_address`](CustodyProvider::resolve_receiving_address) | Provider-held account + secondary id deposits should target |
//! | [`initiate_transfer`](CustodyProvider::initiate_transfer) | Submit a transfer, returning its provider id |
//! | [`await_settlement`](CustodyProvider::await_settlement) | Block until the transfer settles, returning the on-chain tx id |
//!
//! plus capability flags and an account-creation hook for providers that
//! support funding destination accounts (Wyre does not).

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::domain::{DepositAddress, TransferId, TransferRequest};
use crate::http_client::HttpError;
use crate::poll::CancelToken;
use crate::ValidationError;

/// Non-success provider response, preserved verbatim.
///
/// Raised for any HTTP status outside `[200, 300)`; the caller gets the
/// original status code, reason phrase, request URL, and body text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{status} {reason} for url {url}: {body}")]
pub struct ApiError {
    pub status: u16,
    pub reason: String,
    pub url: String,
    pub body: String,
}

/// Failures surfaced by custody operations. Nothing is swallowed: every
/// variant aborts the current operation and reaches the caller.
#[derive(Debug, Error)]
pub enum CustodyError {
    /// The provider answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The exchange itself failed below the status level.
    #[error("transport failure: {0}")]
    Http(#[from] HttpError),

    /// The remote transfer reached FAILED; distinct from transport failure
    /// so callers can decide whether to resubmit.
    #[error("provider reported transfer {transfer_id} as FAILED")]
    TransferFailed { transfer_id: TransferId },

    /// The account data has no deposit address for the targeted chain.
    #[error("no deposit address for chain '{chain}' in account data")]
    DepositAddressMissing { chain: String },

    /// A field this core relies on is absent from an otherwise well-formed
    /// response.
    #[error("field '{field}' missing from {context} response")]
    MissingField {
        field: &'static str,
        context: &'static str,
    },

    #[error(transparent)]
    Malformed(#[from] ValidationError),

    /// The response body was not valid JSON of the expected shape.
    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The settlement wait exhausted its attempt or deadline budget without
    /// observing a terminal status.
    #[error("settlement wait for transfer {transfer_id} gave up after {attempts} lookups")]
    SettlementTimeout {
        transfer_id: TransferId,
        attempts: u32,
    },

    /// The caller cancelled the settlement wait.
    #[error("settlement wait for transfer {transfer_id} was cancelled")]
    Cancelled { transfer_id: TransferId },

    #[error("operation '{operation}' is not supported by this provider")]
    Unsupported { operation: &'static str },
}

/// What a custody provider can do beyond the three core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustodyCapabilities {
    /// Provider can fund destination accounts that do not exist yet.
    pub account_creation: bool,
    /// Provider can deliver deposits as claimable balances.
    pub claimable_balances: bool,
}

impl CustodyCapabilities {
    pub const fn new(account_creation: bool, claimable_balances: bool) -> Self {
        Self {
            account_creation,
            claimable_balances,
        }
    }

    pub const fn none() -> Self {
        Self::new(false, false)
    }
}

/// Custody provider contract.
///
/// The three entry points are the only operations the anchor adapter layer
/// calls; implementations own their transport and polling configuration.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a provider holds no per-call
/// mutable state, so sequential calls may share one instance.
pub trait CustodyProvider: Send + Sync {
    /// Returns the provider's capability flags.
    fn capabilities(&self) -> CustodyCapabilities;

    /// Resolves the provider-held receiving account and its secondary id.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError`] if the account lookup fails, the targeted
    /// chain has no deposit address, or the composite entry is malformed.
    fn resolve_receiving_address<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<DepositAddress, CustodyError>> + Send + 'a>>;

    /// Submits a transfer and returns the provider-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError`] if the creation call fails or the response
    /// carries no id.
    fn initiate_transfer<'a>(
        &'a self,
        request: TransferRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransferId, CustodyError>> + Send + 'a>>;

    /// Waits for the transfer to settle and returns the network transaction
    /// id from the settlement record.
    ///
    /// # Errors
    ///
    /// Returns [`CustodyError::TransferFailed`] on a FAILED terminal status,
    /// [`CustodyError::SettlementTimeout`] once the polling bounds are
    /// exhausted, [`CustodyError::Cancelled`] if the token fires, and any
    /// transport error unchanged.
    fn await_settlement<'a>(
        &'a self,
        transfer_id: &'a TransferId,
        cancel: &'a CancelToken,
    ) -> Pin<Box<dyn Future<Output = Result<String, CustodyError>> + Send + 'a>>;

    /// Funds a destination account, for providers that support it.
    fn create_destination_account<'a>(
        &'a self,
        account: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), CustodyError>> + Send + 'a>>;
}
