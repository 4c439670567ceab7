use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use resetpass::auth::{Argon2Hasher, PasswordHasher, PasswordPolicy, PasswordRules};
use resetpass::config::{Config, PasswordConfig};
use resetpass::models::{ResetRequest, User};
use resetpass::state::AppState;
use resetpass::store::{
    MemoryRequestStore, MemoryUserStore, RequestStore, StoreError, UserStore,
};

pub const RESET_PATH: &str = "/api/auth/reset-password";

/// Failures to inject into the collaborators of a spawned app.
#[derive(Debug, Default, Clone, Copy)]
pub struct Faults {
    pub fail_request_lookup: bool,
    pub fail_user_lookup: bool,
    pub fail_password_update: bool,
    pub fail_expiry_update: bool,
    pub fail_hash: bool,
    pub panic_in_policy: bool,
}

/// A running test server backed by in-memory stores.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub users: Arc<MemoryUserStore>,
    pub requests: Arc<MemoryRequestStore>,
    pub password_updates: Arc<AtomicUsize>,
    pub expiry_updates: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to the reset endpoint, return (body, status).
    pub async fn reset(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(RESET_PATH))
            .json(body)
            .send()
            .await
            .expect("reset request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Send an arbitrary method to the reset endpoint with a JSON body.
    pub async fn reset_with_method(
        &self,
        method: reqwest::Method,
        body: &Value,
    ) -> (Value, StatusCode) {
        let resp = self
            .client
            .request(method, self.url(RESET_PATH))
            .json(body)
            .send()
            .await
            .expect("reset request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Seed a user and an open reset request for them.
    pub fn seed(&self, email: &str, request_id: &str) -> (User, ResetRequest) {
        let user = self.users.insert(email, "$argon2id$placeholder");
        let request = self
            .requests
            .insert(request_id, email, Utc::now() + chrono::Duration::hours(1));
        (user, request)
    }

    pub fn writes(&self) -> (usize, usize) {
        (
            self.password_updates.load(Ordering::SeqCst),
            self.expiry_updates.load(Ordering::SeqCst),
        )
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        max_body_size: 16 * 1024,
        db_max_connections: 1,
        log_level: "warn".to_string(),
        password: PasswordConfig {
            min_length: 7,
            // Cheap hashing keeps the suite fast.
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
        },
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Faults::default()).await
}

pub async fn spawn_app_with(faults: Faults) -> TestApp {
    let config = test_config();
    let users = Arc::new(MemoryUserStore::new());
    let requests = Arc::new(MemoryRequestStore::new());
    let password_updates = Arc::new(AtomicUsize::new(0));
    let expiry_updates = Arc::new(AtomicUsize::new(0));

    let hasher: Arc<dyn PasswordHasher> = if faults.fail_hash {
        Arc::new(FailingHasher)
    } else {
        Arc::new(Argon2Hasher::from_config(&config.password).unwrap())
    };

    let policy: Arc<dyn PasswordPolicy> = if faults.panic_in_policy {
        Arc::new(PanickingPolicy)
    } else {
        Arc::new(PasswordRules::from_config(&config.password))
    };

    let state = AppState {
        requests: Arc::new(InstrumentedRequestStore {
            inner: requests.clone(),
            fail_lookup: faults.fail_request_lookup,
            fail_update: faults.fail_expiry_update,
            updates: expiry_updates.clone(),
        }),
        users: Arc::new(InstrumentedUserStore {
            inner: users.clone(),
            fail_lookup: faults.fail_user_lookup,
            fail_update: faults.fail_password_update,
            updates: password_updates.clone(),
        }),
        hasher,
        policy,
        config,
    };

    let app = resetpass::build_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        users,
        requests,
        password_updates,
        expiry_updates,
    }
}

fn pool_timeout() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

/// Counts update calls and optionally fails lookups or updates.
struct InstrumentedUserStore {
    inner: Arc<MemoryUserStore>,
    fail_lookup: bool,
    fail_update: bool,
    updates: Arc<AtomicUsize>,
}

#[async_trait]
impl UserStore for InstrumentedUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        if self.fail_lookup {
            return Err(pool_timeout());
        }
        self.inner.find_by_email(email).await
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_update {
            return Err(pool_timeout());
        }
        self.inner.update_password(id, password_hash).await
    }
}

struct InstrumentedRequestStore {
    inner: Arc<MemoryRequestStore>,
    fail_lookup: bool,
    fail_update: bool,
    updates: Arc<AtomicUsize>,
}

#[async_trait]
impl RequestStore for InstrumentedRequestStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<ResetRequest>, StoreError> {
        if self.fail_lookup {
            return Err(pool_timeout());
        }
        self.inner.find_by_id(id).await
    }

    async fn update_expiry(&self, id: &str, expires: DateTime<Utc>) -> Result<(), StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_update {
            return Err(pool_timeout());
        }
        self.inner.update_expiry(id, expires).await
    }
}

struct FailingHasher;

impl PasswordHasher for FailingHasher {
    fn hash(&self, _password: &str) -> Result<String, String> {
        Err("Hashing failed: out of memory".to_string())
    }
}

struct PanickingPolicy;

impl PasswordPolicy for PanickingPolicy {
    fn is_valid(&self, _password: &str) -> bool {
        panic!("policy backend exploded")
    }
}
