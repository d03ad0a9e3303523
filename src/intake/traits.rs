//! Trait abstraction for the intake endpoint to enable mocking in tests

use crate::state::FormState;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Failed to encode application: {0}")]
    Encode(String),
    #[error("Intake endpoint answered HTTP {0}")]
    Status(u16),
    #[error("Intake endpoint unreachable: {0}")]
    Transport(String),
    #[error("Delivery task aborted: {0}")]
    Task(String),
}

/// Trait for intake operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntakeClientTrait: Send + Sync {
    /// Send one application; the response body is never read
    async fn deliver(&self, payload: &FormState) -> Result<(), IntakeError>;
}
