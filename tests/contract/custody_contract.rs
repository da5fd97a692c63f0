//! Wire-contract tests for the Wyre adapter: endpoint URLs, headers, payload
//! shape, and error detail must match the provider's REST API exactly.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wyrelink_core::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};
use wyrelink_core::{
    Amount, AssetCode, CustodyError, CustodyProvider, Destination, TransferId, TransferRequest,
    WyreAdapter, WyreApi, WyreConfig,
};

struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    fn from_responses(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        let response = self
            .responses
            .lock()
            .expect("response script should not be poisoned")
            .pop_front()
            .expect("response script exhausted");
        Box::pin(async move { response })
    }
}

fn config() -> WyreConfig {
    WyreConfig::new("contract-token", "AC_CONTRACT")
}

fn request_with_amount(amount: &str) -> TransferRequest {
    TransferRequest::new(
        AssetCode::parse("USDC").expect("valid code"),
        Amount::parse(amount).expect("valid amount"),
        Destination::stellar("GADDR123").expect("valid destination"),
    )
}

#[tokio::test]
async fn every_call_carries_bearer_auth_and_json_content_type() {
    let client = ScriptedHttpClient::from_responses(vec![
        HttpResponse::ok_json("{}"),
        HttpResponse::ok_json("{\"status\":\"PENDING\"}"),
        HttpResponse::ok_json("{\"id\":\"TF_1\"}"),
    ]);
    let api = WyreApi::with_http_client(config(), client.clone());
    let transfer_id = TransferId::parse("TF_1").expect("valid id");

    api.fetch_account().await.expect("account call");
    api.fetch_transfer(&transfer_id).await.expect("transfer call");
    api.create_transfer(&request_with_amount("10"))
        .await
        .expect("create call");

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        assert_eq!(
            request.headers.get("authorization").map(String::as_str),
            Some("Bearer contract-token"),
            "bearer token missing on {}",
            request.url
        );
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/json"),
            "content type missing on {}",
            request.url
        );
    }
}

#[tokio::test]
async fn endpoint_urls_match_the_wire_contract() {
    let client = ScriptedHttpClient::from_responses(vec![
        HttpResponse::ok_json("{}"),
        HttpResponse::ok_json("{\"status\":\"PENDING\"}"),
        HttpResponse::ok_json("{\"id\":\"TF_1\"}"),
    ]);
    let api = WyreApi::with_http_client(config(), client.clone());
    let transfer_id = TransferId::parse("TF_WXP3YR7JJW8").expect("valid id");

    api.fetch_account().await.expect("account call");
    api.fetch_transfer(&transfer_id).await.expect("transfer call");
    api.create_transfer(&request_with_amount("10"))
        .await
        .expect("create call");

    let urls: Vec<String> = client
        .recorded_requests()
        .into_iter()
        .map(|request| request.url)
        .collect();
    assert_eq!(
        urls,
        vec![
            String::from("https://api.testwyre.com/v2/account"),
            String::from("https://api.testwyre.com/v3/transfers/TF_WXP3YR7JJW8"),
            String::from("https://api.testwyre.com/v3/transfers"),
        ]
    );
}

#[tokio::test]
async fn create_transfer_amounts_travel_as_exact_decimal_strings() {
    for (amount, expected) in [("100", "100"), ("10", "10"), ("0.1234567", "0.1234567")] {
        let client = ScriptedHttpClient::from_responses(vec![HttpResponse::ok_json(
            "{\"id\":\"TF_1\"}",
        )]);
        let api = WyreApi::with_http_client(config(), client.clone());

        api.create_transfer(&request_with_amount(amount))
            .await
            .expect("create call");

        let requests = client.recorded_requests();
        let payload: Value =
            serde_json::from_str(requests[0].body.as_deref().expect("create carries a body"))
                .expect("payload is json");
        assert_eq!(payload["sourceAmount"], expected, "amount {amount}");
    }
}

#[tokio::test]
async fn create_transfer_payload_round_trips_losslessly() {
    let original = request_with_amount("250.75");
    let client =
        ScriptedHttpClient::from_responses(vec![HttpResponse::ok_json("{\"id\":\"TF_1\"}")]);
    let api = WyreApi::with_http_client(config(), client.clone());

    api.create_transfer(&original).await.expect("create call");

    let requests = client.recorded_requests();
    let payload: Value =
        serde_json::from_str(requests[0].body.as_deref().expect("create carries a body"))
            .expect("payload is json");

    assert_eq!(
        payload,
        json!({
            "autoConfirm": true,
            "source": "account:AC_CONTRACT",
            "sourceCurrency": "USDC",
            "sourceAmount": "250.75",
            "dest": "stellar:GADDR123",
            "destCurrency": "USDC",
        })
    );

    // Re-extracting the fields reproduces the original request exactly
    let currency =
        AssetCode::parse(payload["sourceCurrency"].as_str().expect("currency is a string"))
            .expect("currency parses back");
    let amount = Amount::parse(payload["sourceAmount"].as_str().expect("amount is a string"))
        .expect("amount parses back");
    let destination = Destination::parse(payload["dest"].as_str().expect("dest is a string"))
        .expect("destination parses back");
    let rebuilt = TransferRequest::new(currency, amount, destination);

    assert_eq!(rebuilt, original);
}

#[tokio::test]
async fn secondary_ids_with_colons_survive_the_first_colon_split() {
    let client = ScriptedHttpClient::from_responses(vec![HttpResponse::ok_json(
        json!({"depositAddresses": {"XLM": "GADDR123:user:42"}}).to_string(),
    )]);
    let adapter = WyreAdapter::with_http_client(config(), client);

    let deposit_address = adapter
        .resolve_receiving_address()
        .await
        .expect("address should resolve");
    assert_eq!(deposit_address.account(), "GADDR123");
    assert_eq!(deposit_address.secondary_id(), "user:42");
}

#[tokio::test]
async fn non_success_statuses_surface_verbatim_for_every_endpoint() {
    let cases = [
        (401u16, "Unauthorized", "https://api.testwyre.com/v2/account"),
        (
            404,
            "Not Found",
            "https://api.testwyre.com/v3/transfers/TF_1",
        ),
        (400, "Bad Request", "https://api.testwyre.com/v3/transfers"),
    ];

    for (status, reason, url) in cases {
        let client = ScriptedHttpClient::from_responses(vec![HttpResponse {
            status,
            reason: reason.to_owned(),
            url: url.to_owned(),
            body: String::from("{\"message\":\"nope\"}"),
        }]);
        let api = WyreApi::with_http_client(config(), client);
        let transfer_id = TransferId::parse("TF_1").expect("valid id");

        let result = match status {
            401 => api.fetch_account().await,
            404 => api.fetch_transfer(&transfer_id).await,
            _ => api.create_transfer(&request_with_amount("10")).await,
        };

        match result.expect_err("non-success must fail") {
            CustodyError::Api(api_error) => {
                assert_eq!(api_error.status, status);
                assert_eq!(api_error.reason, reason);
                assert_eq!(api_error.url, url);
                assert_eq!(api_error.body, "{\"message\":\"nope\"}");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn wyre_reports_no_optional_capabilities() {
    let adapter =
        WyreAdapter::with_http_client(config(), ScriptedHttpClient::from_responses(vec![]));

    let capabilities = adapter.capabilities();
    assert!(!capabilities.account_creation);
    assert!(!capabilities.claimable_balances);
}
