//! Ledger query layer: look up the finalized on-chain transaction once a
//! transfer has settled. The record comes back as the remote's JSON body,
//! returned unchanged to the host framework.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use wyrelink_core::http_client::{HttpClient, HttpError, HttpRequest, ReqwestHttpClient};

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger endpoint answered with a non-2xx status.
    #[error("ledger lookup failed with status {status} for url {url}: {body}")]
    Lookup {
        status: u16,
        url: String,
        body: String,
    },

    #[error("ledger transport failure: {0}")]
    Http(#[from] HttpError),

    #[error("malformed ledger response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Distributed-ledger query contract.
pub trait LedgerGateway: Send + Sync {
    /// Fetch the finalized on-chain transaction record by network tx id.
    fn transaction_by_id<'a>(
        &'a self,
        network_tx_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Value, LedgerError>> + Send + 'a>>;
}

/// Horizon-backed ledger gateway (`GET {horizon}/transactions/{id}`).
pub struct HorizonGateway {
    horizon_url: String,
    http: Arc<dyn HttpClient>,
}

impl HorizonGateway {
    pub fn new(horizon_url: impl Into<String>) -> Self {
        Self::with_http_client(horizon_url, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(horizon_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            horizon_url: horizon_url.into(),
            http,
        }
    }

    fn endpoint(&self, network_tx_id: &str) -> String {
        format!(
            "{}/transactions/{network_tx_id}",
            self.horizon_url.trim_end_matches('/')
        )
    }
}

impl LedgerGateway for HorizonGateway {
    fn transaction_by_id<'a>(
        &'a self,
        network_tx_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Value, LedgerError>> + Send + 'a>> {
        Box::pin(async move {
            let request = HttpRequest::get(self.endpoint(network_tx_id))
                .with_header("accept", "application/json");
            let response = self.http.execute(request).await?;
            if !response.is_success() {
                return Err(LedgerError::Lookup {
                    status: response.status,
                    url: response.url,
                    body: response.body,
                });
            }
            Ok(serde_json::from_str(&response.body)?)
        })
    }
}
