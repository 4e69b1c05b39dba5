#![allow(dead_code)]

use async_trait::async_trait;
use qash_sdk::core::kernel::{ReqwestRest, RestClient, RestRequest};
use qash_sdk::{QashBuilder, QashClient, QashConfig, QashEnvironment, QashError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// What a request looked like once built for the wire
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request: RestRequest,
    pub url: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct MockState {
    responses: Mutex<VecDeque<Result<String, QashError>>>,
    recorded: Mutex<Vec<RecordedRequest>>,
}

/// Transport double that builds each request with a real `ReqwestRest`
/// (so URLs and headers are the ones that would be sent) and answers with
/// queued canned bodies instead of touching the network.
#[derive(Clone)]
pub struct MockRest {
    inner: ReqwestRest,
    state: Arc<MockState>,
}

impl MockRest {
    pub fn new(api_key: &str, environment: QashEnvironment) -> Self {
        let config = QashConfig::new(api_key.to_string()).environment(environment);
        let inner = QashBuilder::new(config)
            .build_rest()
            .expect("reqwest client should build");
        Self {
            inner,
            state: Arc::new(MockState::default()),
        }
    }

    pub fn respond(&self, body: &str) -> &Self {
        self.push(Ok(body.to_string()))
    }

    pub fn fail_transport(&self) -> &Self {
        self.push(Err(QashError::UnexpectedIssue))
    }

    fn push(&self, response: Result<String, QashError>) -> &Self {
        self.state.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.state.recorded.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.recorded().pop().expect("no request was sent")
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn execute(&self, request: RestRequest) -> Result<String, QashError> {
        let built = self.inner.build_request(&request)?;
        let authorization = built
            .headers()
            .get("Authorization")
            .map(|v| v.to_str().unwrap().to_string());

        self.state.recorded.lock().unwrap().push(RecordedRequest {
            url: built.url().to_string(),
            authorization,
            request,
        });

        self.state
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("{}".to_string()))
    }

    fn base_url(&self) -> &str {
        self.inner.base_url()
    }
}

pub fn mock_client(api_key: &str, environment: QashEnvironment) -> (QashClient<MockRest>, MockRest) {
    let mock = MockRest::new(api_key, environment);
    let client = QashClient::with_rest(mock.clone()).expect("mock targets a Qash host");
    (client, mock)
}

pub const PARTNER_JSON: &str = r#"{
    "_id": "ptr_01",
    "name": "Blocky Bank",
    "juridisctions": ["EU"],
    "currencies": ["eur", "usd"],
    "routing": {"identifier": "BLK001"},
    "is_cbs_partner": true,
    "joined_at": 1700000000000,
    "revoked_at": null,
    "logo_url": "https://cdn.example.com/logo.png"
}"#;

pub const HOLDER_JSON: &str = r#"{
    "_id": "ah_01",
    "type": "individual",
    "responsible_partner": "ptr_01",
    "name": "Steve",
    "created_at": 1700000000000,
    "updated_at": null,
    "revoked_at": null,
    "discord_id": "1234",
    "minecraft_id": "steve",
    "external_id": null
}"#;

pub const CURRENCY_JSON: &str = r#"{
    "_id": "cur_eur",
    "code": "eur",
    "name": "Euro",
    "symbol": {"value": "€", "is_after": true},
    "exchange_rates": [{"currency": "usd", "rate": 1.08}]
}"#;
