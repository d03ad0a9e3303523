//! Background delivery of submitted applications
//!
//! The wizard never waits on delivery. Each submission gets its own task
//! that retries with a fixed backoff and reports how it ended on a channel
//! the app drains between frames.

use super::client::IntakeClient;
use super::traits::{IntakeClientTrait, IntakeError};
use crate::config::RegistrationConfig;
use crate::state::Submission;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// How a delivery ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered {
        id: Uuid,
        attempts: u32,
    },
    Failed {
        id: Uuid,
        attempts: u32,
        error: IntakeError,
    },
}

impl DeliveryOutcome {
    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        match self {
            Self::Delivered { .. } => "Application delivered".to_string(),
            Self::Failed {
                attempts, error, ..
            } => format!("Delivery failed after {attempts} attempt(s): {error}"),
        }
    }
}

pub struct Dispatcher {
    client: Arc<dyn IntakeClientTrait>,
    attempts: u32,
    backoff: Duration,
    outcomes: UnboundedSender<DeliveryOutcome>,
}

impl Dispatcher {
    pub fn new(
        client: Arc<dyn IntakeClientTrait>,
        attempts: u32,
        backoff: Duration,
    ) -> (Self, UnboundedReceiver<DeliveryOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            client,
            attempts: attempts.max(1),
            backoff,
            outcomes,
        };
        (dispatcher, receiver)
    }

    /// Dispatcher posting to the configured intake endpoint
    pub fn from_config(config: &RegistrationConfig) -> (Self, UnboundedReceiver<DeliveryOutcome>) {
        let client = IntakeClient::new(config.intake_url());
        tracing::info!(url = client.url(), "Intake endpoint configured");
        Self::new(
            Arc::new(client),
            config.delivery_attempts(),
            config.retry_backoff(),
        )
    }

    /// Start delivering `submission` and return at once
    pub fn dispatch(&self, submission: Submission) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let outcomes = self.outcomes.clone();
        let attempts = self.attempts;
        let backoff = self.backoff;
        tokio::spawn(async move {
            let outcome = deliver_with_retry(client.as_ref(), &submission, attempts, backoff).await;
            match &outcome {
                DeliveryOutcome::Delivered { id, attempts } => {
                    tracing::info!(%id, attempts, "Application delivered");
                }
                DeliveryOutcome::Failed {
                    id,
                    attempts,
                    error,
                } => {
                    tracing::warn!(%id, attempts, %error, "Application delivery failed");
                }
            }
            // Receiver gone means the app is shutting down
            let _ = outcomes.send(outcome);
        })
    }
}

async fn deliver_with_retry(
    client: &dyn IntakeClientTrait,
    submission: &Submission,
    attempts: u32,
    backoff: Duration,
) -> DeliveryOutcome {
    let mut attempt = 1;
    loop {
        match client.deliver(&submission.payload).await {
            Ok(()) => {
                return DeliveryOutcome::Delivered {
                    id: submission.id,
                    attempts: attempt,
                }
            }
            Err(error) if attempt >= attempts => {
                return DeliveryOutcome::Failed {
                    id: submission.id,
                    attempts: attempt,
                    error,
                }
            }
            Err(error) => {
                tracing::debug!(id = %submission.id, attempt, %error, "Retrying delivery");
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
