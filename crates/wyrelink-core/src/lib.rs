//! # Wyrelink Core
//!
//! Custody contracts and the Wyre provider adapter for the wyrelink
//! connector.
//!
//! ## Overview
//!
//! This crate provides the core of the connector:
//!
//! - **Validated domain types** for transfer submissions, statuses, and
//!   deposit addresses
//! - **Custody provider contract**: the three operations the anchor layer
//!   calls, plus capability flags
//! - **Transport abstraction** over HTTP with uniform non-success handling
//! - **Bounded settlement polling** with backoff, deadline, and cancellation
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Wyre) |
//! | [`custody`] | Custody provider trait and error taxonomy |
//! | [`domain`] | Domain types (TransferRequest, TransferStatus, DepositAddress) |
//! | [`error`] | Validation errors |
//! | [`http_client`] | HTTP client abstraction |
//! | [`poll`] | Settlement-wait pacing and cancellation |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wyrelink_core::{
//!     Amount, AssetCode, CancelToken, CustodyProvider, Destination, TransferRequest,
//!     WyreAdapter, WyreConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = WyreAdapter::new(WyreConfig::new("api-token", "account-id"));
//!
//!     let request = TransferRequest::new(
//!         AssetCode::parse("USDC")?,
//!         Amount::parse("100")?,
//!         Destination::stellar("GDEPOSIT...")?,
//!     );
//!
//!     let transfer_id = adapter.initiate_transfer(request).await?;
//!     let network_tx_id = adapter
//!         .await_settlement(&transfer_id, &CancelToken::new())
//!         .await?;
//!     println!("settled on-chain as {network_tx_id}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns `Result`; nothing is retried or swallowed inside
//! the core. A `FAILED` transfer, a transport failure, an exhausted polling
//! budget, and a cancellation each surface as their own
//! [`CustodyError`] variant so callers can decide whether to resubmit.
//!
//! ## Security
//!
//! - Credentials live in an explicit [`WyreConfig`]; no hidden global state
//! - The bearer token is attached per request and never logged

pub mod adapters;
pub mod custody;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod poll;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{WyreAdapter, WyreApi, WyreConfig, TEST_BASE_URL};

// Custody contract
pub use custody::{ApiError, CustodyCapabilities, CustodyError, CustodyProvider};

// Domain types
pub use domain::{
    Amount, AssetCode, DepositAddress, Destination, TransferId, TransferRequest, TransferStatus,
};

// Error types
pub use error::ValidationError;

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

// Polling
pub use poll::{Backoff, CancelToken, PollPolicy};
