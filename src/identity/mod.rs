// External cloud identity service collaborator.
//
// The service owns the permission payload shape; this crate treats it as an
// opaque JSON value and never inspects or transforms it.
pub mod client;
pub mod error;

use async_trait::async_trait;
use serde_json::Value;

use self::error::IdentityError;

/// Capability interface for the identity service so handlers can be tested
/// against a scripted double instead of the real upstream.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Fetch the permission set granted to `username`.
    async fn get_user_permissions(&self, username: &str) -> Result<Value, IdentityError>;

    /// Probe upstream liveness for the /health endpoint.
    async fn health_check(&self) -> Result<(), IdentityError>;
}
