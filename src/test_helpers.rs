//! In-process mock backend and fixtures shared by tests.
//!
//! `MockBackend` binds an axum router on an ephemeral localhost port. Every
//! request is recorded (method, path, query, bearer header, JSON body) and
//! answered by the closure passed to `start`.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::Json;
use serde_json::{Value, json};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::config::PortalConfig;
use crate::net::ApiClient;
use crate::net::storage::MemoryStorage;
use crate::net::types::{Account, AccountType, Transaction, TransactionType, Transfer, TransferStatus};
use crate::state::route::RouteState;

#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Responder,
}

pub(crate) struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState { requests: requests.clone(), responder: Arc::new(responder) };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { base_url: format!("http://{addr}"), requests, task }
    }

    /// Backend answering every request with the same status and body.
    pub async fn fixed(status: StatusCode, body: Value) -> Self {
        Self::start(move |_| (status, body.clone())).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| &r.method == method && r.path == path)
            .collect()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
    let request = RecordedRequest {
        method,
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    let (status, value) = (state.responder)(&request);
    state.requests.lock().unwrap().push(request);
    (status, Json(value))
}

// =============================================================================
// CLIENT FIXTURES
// =============================================================================

pub(crate) struct TestClient {
    pub client: ApiClient,
    pub storage: Arc<MemoryStorage>,
    pub route: Arc<RouteState>,
}

pub(crate) fn client_for(backend: &MockBackend, storage: MemoryStorage) -> TestClient {
    let config = PortalConfig::from_lookup(|_| None).unwrap().with_base_url(&backend.base_url).unwrap();
    let storage = Arc::new(storage);
    let route = Arc::new(RouteState::new("/dashboard"));
    let client = ApiClient::new(&config, storage.clone(), route.clone()).unwrap();
    TestClient { client, storage, route }
}

// =============================================================================
// JSON FIXTURES
// =============================================================================

pub(crate) fn account_json(id: i64, iban: &str, balance: f64, account_type: &str) -> Value {
    json!({
        "id": id,
        "iban": iban,
        "balance": balance,
        "accountType": account_type,
        "accountName": format!("Account {id}"),
        "createdAt": "2024-01-10T08:00:00",
        "isActive": true
    })
}

pub(crate) fn transaction_json(id: i64, amount: f64, kind: &str, date: &str) -> Value {
    json!({
        "id": id,
        "amount": amount,
        "transactionType": kind,
        "description": format!("tx {id}"),
        "referenceNumber": format!("TXN-{id}"),
        "transactionDate": date,
        "balanceAfter": 1000.0
    })
}

pub(crate) fn transfer_json(id: i64, amount: f64, status: &str) -> Value {
    json!({
        "id": id,
        "amount": amount,
        "transferFee": 0.0,
        "fromIban": "FR1",
        "toIban": "FR2",
        "beneficiaryName": "Jane Smith",
        "description": "rent",
        "referenceNumber": format!("TRF-{id}"),
        "status": status,
        "createdAt": "2024-02-01T10:00:00"
    })
}

pub(crate) fn user_json(id: i64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.test"),
        "firstName": "First",
        "lastName": "Last",
        "role": role
    })
}

pub(crate) fn login_json(token: &str, id: i64, username: &str, role: &str) -> Value {
    json!({
        "token": token,
        "type": "Bearer",
        "id": id,
        "username": username,
        "email": format!("{username}@example.test"),
        "role": role
    })
}

// =============================================================================
// TYPED FIXTURES
// =============================================================================

pub(crate) fn at(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
}

pub(crate) fn dec(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

pub(crate) fn transaction(id: i64, amount: &str, kind: TransactionType, date: &str) -> Transaction {
    Transaction {
        id,
        amount: dec(amount),
        transaction_type: kind,
        description: format!("tx {id}"),
        reference_number: format!("TXN-{id}"),
        transaction_date: at(date),
        balance_after: Decimal::ZERO,
        transfer_fee: None,
        account_iban: None,
    }
}

pub(crate) fn account(id: i64, balance: &str, account_type: AccountType) -> Account {
    Account {
        id,
        iban: format!("FR76300060000112345678{id:04}"),
        balance: dec(balance),
        account_type,
        account_name: format!("Account {id}"),
        created_at: at("2024-01-10T08:00:00"),
        is_active: true,
    }
}

pub(crate) fn transfer(id: i64, amount: &str, status: TransferStatus) -> Transfer {
    Transfer {
        id,
        amount: dec(amount),
        transfer_fee: Decimal::ZERO,
        from_iban: "FR1".to_owned(),
        to_iban: "FR2".to_owned(),
        beneficiary_name: "Jane Smith".to_owned(),
        description: "rent".to_owned(),
        reference_number: format!("TRF-{id}"),
        status,
        created_at: at("2024-02-01T10:00:00"),
        processed_at: None,
    }
}
