//! Wyre custodial wallet adapter.
//!
//! Two layers, thin transport below, polling on top:
//!
//! - [`WyreApi`] issues the three authenticated endpoint calls and funnels
//!   every response through one uniform dispatcher (non-2xx becomes
//!   [`ApiError`], anything else is decoded as JSON).
//! - [`WyreAdapter`] owns the domain operations and implements
//!   [`CustodyProvider`]: deposit-address resolution, transfer initiation,
//!   and the bounded settlement wait.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::custody::{ApiError, CustodyCapabilities, CustodyError, CustodyProvider};
use crate::domain::{DepositAddress, TransferId, TransferRequest, TransferStatus};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::poll::{CancelToken, PollPolicy};

/// Wyre's sandbox endpoint, the default base URL.
pub const TEST_BASE_URL: &str = "https://api.testwyre.com";

/// Chain key under `depositAddresses` this adapter targets.
const DEPOSIT_CHAIN: &str = "XLM";

/// Explicit Wyre credentials and endpoint configuration.
///
/// Nothing here is read from ambient state implicitly; [`from_env`] exists
/// as an opt-in convenience for deployments that configure through the
/// environment.
///
/// [`from_env`]: WyreConfig::from_env
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WyreConfig {
    pub api_token: String,
    pub account_id: String,
    pub api_url: String,
}

impl WyreConfig {
    /// Sandbox configuration for the given credentials.
    pub fn new(api_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            account_id: account_id.into(),
            api_url: TEST_BASE_URL.to_owned(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Read `WYRELINK_WYRE_API_TOKEN`, `WYRELINK_WYRE_ACCOUNT_ID`, and
    /// optionally `WYRELINK_WYRE_API_URL`. Returns `None` when either
    /// credential is absent.
    pub fn from_env() -> Option<Self> {
        let api_token = std::env::var("WYRELINK_WYRE_API_TOKEN").ok()?;
        let account_id = std::env::var("WYRELINK_WYRE_ACCOUNT_ID").ok()?;
        let api_url = std::env::var("WYRELINK_WYRE_API_URL")
            .unwrap_or_else(|_| TEST_BASE_URL.to_owned());
        Some(Self {
            api_token,
            account_id,
            api_url,
        })
    }
}

/// Transport layer for Wyre's REST API.
pub struct WyreApi {
    config: WyreConfig,
    auth: HttpAuth,
    http: Arc<dyn HttpClient>,
}

impl WyreApi {
    pub fn new(config: WyreConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: WyreConfig, http: Arc<dyn HttpClient>) -> Self {
        let auth = HttpAuth::BearerToken(config.api_token.clone());
        Self { config, auth, http }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_url.trim_end_matches('/'))
    }

    /// Uniform response handling: non-2xx raises [`ApiError`] with the
    /// original status, reason, URL, and body; success decodes as JSON.
    async fn dispatch(&self, request: HttpRequest) -> Result<Value, CustodyError> {
        let response = self.http.execute(request).await?;
        if !response.is_success() {
            warn!(
                status = response.status,
                url = %response.url,
                "wyre call returned non-success status"
            );
            return Err(ApiError {
                status: response.status,
                reason: response.reason,
                url: response.url,
                body: response.body,
            }
            .into());
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// `GET v2/account`.
    pub async fn fetch_account(&self) -> Result<Value, CustodyError> {
        let request = HttpRequest::get(self.endpoint("v2/account"))
            .with_header("content-type", "application/json")
            .with_auth(&self.auth);
        self.dispatch(request).await
    }

    /// `GET v3/transfers/{id}`.
    pub async fn fetch_transfer(&self, transfer_id: &TransferId) -> Result<Value, CustodyError> {
        let request = HttpRequest::get(self.endpoint(&format!("v3/transfers/{transfer_id}")))
            .with_header("content-type", "application/json")
            .with_auth(&self.auth);
        self.dispatch(request).await
    }

    /// `POST v3/transfers`.
    pub async fn create_transfer(&self, request: &TransferRequest) -> Result<Value, CustodyError> {
        let body = CreateTransferBody::from_request(&self.config.account_id, request);
        let http_request = HttpRequest::post(self.endpoint("v3/transfers"))
            .with_header("content-type", "application/json")
            .with_auth(&self.auth)
            .with_body(serde_json::to_string(&body)?);
        self.dispatch(http_request).await
    }
}

/// `POST v3/transfers` payload, reproduced field-for-field from the wire
/// contract. Source and destination currency are always the same and the
/// amount travels as its exact decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTransferBody {
    auto_confirm: bool,
    source: String,
    source_currency: String,
    source_amount: String,
    dest: String,
    dest_currency: String,
}

impl CreateTransferBody {
    fn from_request(account_id: &str, request: &TransferRequest) -> Self {
        Self {
            auto_confirm: true,
            source: format!("account:{account_id}"),
            source_currency: request.currency().to_string(),
            source_amount: request.amount().to_string(),
            dest: request.destination().to_string(),
            dest_currency: request.currency().to_string(),
        }
    }
}

/// Fields of the transfer resource the settlement wait reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferSnapshot {
    status: TransferStatus,
    #[serde(default)]
    blockchain_tx: Option<BlockchainTx>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockchainTx {
    #[serde(default)]
    network_tx_id: Option<String>,
}

/// Settlement-polling layer over [`WyreApi`].
pub struct WyreAdapter {
    api: WyreApi,
    policy: PollPolicy,
}

impl WyreAdapter {
    pub fn new(config: WyreConfig) -> Self {
        info!(api_url = %config.api_url, "initializing wyre custody adapter");
        Self {
            api: WyreApi::new(config),
            policy: PollPolicy::default(),
        }
    }

    pub fn with_http_client(config: WyreConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            api: WyreApi::with_http_client(config, http),
            policy: PollPolicy::default(),
        }
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn resolve_receiving_address_inner(&self) -> Result<DepositAddress, CustodyError> {
        let account = self.api.fetch_account().await?;
        let entry = account
            .get("depositAddresses")
            .and_then(|addresses| addresses.get(DEPOSIT_CHAIN))
            .and_then(Value::as_str)
            .ok_or_else(|| CustodyError::DepositAddressMissing {
                chain: DEPOSIT_CHAIN.to_owned(),
            })?;
        Ok(DepositAddress::parse(entry)?)
    }

    async fn initiate_transfer_inner(
        &self,
        request: TransferRequest,
    ) -> Result<TransferId, CustodyError> {
        let created = self.api.create_transfer(&request).await?;
        let id = created
            .get("id")
            .and_then(Value::as_str)
            .ok_or(CustodyError::MissingField {
                field: "id",
                context: "create-transfer",
            })?;
        let transfer_id = TransferId::parse(id)?;
        info!(transfer_id = %transfer_id, "initiated wyre transfer");
        Ok(transfer_id)
    }

    async fn await_settlement_inner(
        &self,
        transfer_id: &TransferId,
        cancel: &CancelToken,
    ) -> Result<String, CustodyError> {
        let started = Instant::now();

        for attempt in 0..self.policy.max_attempts {
            if cancel.is_cancelled() {
                return Err(CustodyError::Cancelled {
                    transfer_id: transfer_id.clone(),
                });
            }
            if let Some(deadline) = self.policy.deadline {
                if started.elapsed() >= deadline {
                    return Err(CustodyError::SettlementTimeout {
                        transfer_id: transfer_id.clone(),
                        attempts: attempt,
                    });
                }
            }

            let snapshot: TransferSnapshot =
                serde_json::from_value(self.api.fetch_transfer(transfer_id).await?)?;

            match snapshot.status {
                TransferStatus::Failed => {
                    warn!(transfer_id = %transfer_id, "wyre reported transfer as FAILED");
                    return Err(CustodyError::TransferFailed {
                        transfer_id: transfer_id.clone(),
                    });
                }
                TransferStatus::Completed => {
                    let network_tx_id = snapshot
                        .blockchain_tx
                        .and_then(|tx| tx.network_tx_id)
                        .ok_or(CustodyError::MissingField {
                            field: "blockchainTx.networkTxId",
                            context: "transfer",
                        })?;
                    info!(
                        transfer_id = %transfer_id,
                        network_tx_id = %network_tx_id,
                        lookups = attempt + 1,
                        "wyre transfer settled"
                    );
                    return Ok(network_tx_id);
                }
                status => {
                    debug!(
                        transfer_id = %transfer_id,
                        status = %status,
                        lookup = attempt + 1,
                        "transfer not yet terminal"
                    );
                    tokio::time::sleep(self.policy.delay_for_attempt(attempt)).await;
                }
            }
        }

        Err(CustodyError::SettlementTimeout {
            transfer_id: transfer_id.clone(),
            attempts: self.policy.max_attempts,
        })
    }
}

impl CustodyProvider for WyreAdapter {
    fn capabilities(&self) -> CustodyCapabilities {
        CustodyCapabilities::none()
    }

    fn resolve_receiving_address<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<DepositAddress, CustodyError>> + Send + 'a>> {
        Box::pin(self.resolve_receiving_address_inner())
    }

    fn initiate_transfer<'a>(
        &'a self,
        request: TransferRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransferId, CustodyError>> + Send + 'a>> {
        Box::pin(self.initiate_transfer_inner(request))
    }

    fn await_settlement<'a>(
        &'a self,
        transfer_id: &'a TransferId,
        cancel: &'a CancelToken,
    ) -> Pin<Box<dyn Future<Output = Result<String, CustodyError>> + Send + 'a>> {
        Box::pin(self.await_settlement_inner(transfer_id, cancel))
    }

    fn create_destination_account<'a>(
        &'a self,
        _account: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), CustodyError>> + Send + 'a>> {
        Box::pin(async {
            Err(CustodyError::Unsupported {
                operation: "create-destination-account",
            })
        })
    }
}
