use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::identity::error::IdentityError;
use crate::identity::IdentityService;

/// Scripted stand-in for the identity service used by router-level tests.
pub struct StubIdentityService {
    behavior: StubBehavior,
    calls: AtomicUsize,
    last_username: Mutex<Option<String>>,
}

pub enum StubBehavior {
    Permissions(Value),
    UserNotFound,
    UpstreamStatus(u16),
    Unreachable,
}

impl StubIdentityService {
    pub fn returning(permissions: Value) -> Self {
        Self::with_behavior(StubBehavior::Permissions(permissions))
    }

    pub fn with_behavior(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_username: Mutex::new(None),
        }
    }

    /// Number of permission lookups performed against this stub
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_username(&self) -> Option<String> {
        self.last_username.lock().expect("stub lock").clone()
    }
}

#[async_trait]
impl IdentityService for StubIdentityService {
    async fn get_user_permissions(&self, username: &str) -> Result<Value, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_username.lock().expect("stub lock") = Some(username.to_string());

        match &self.behavior {
            StubBehavior::Permissions(payload) => Ok(payload.clone()),
            StubBehavior::UserNotFound => Err(IdentityError::UserNotFound(username.to_string())),
            StubBehavior::UpstreamStatus(status) => {
                Err(IdentityError::UpstreamStatus { status: *status })
            }
            StubBehavior::Unreachable => {
                Err(IdentityError::Transport("connection refused".to_string()))
            }
        }
    }

    async fn health_check(&self) -> Result<(), IdentityError> {
        match &self.behavior {
            StubBehavior::Unreachable => {
                Err(IdentityError::Transport("connection refused".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Drive the router with a single GET request and decode the JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");

    (status, body)
}

/// Exactly one of `data`/`error` is populated, consistently with `success`.
pub fn assert_envelope(body: &Value) {
    let success = body["success"].as_bool().expect("success flag");
    assert_eq!(success, body.get("data").is_some(), "envelope: {}", body);
    assert_eq!(!success, body.get("error").is_some(), "envelope: {}", body);
}
