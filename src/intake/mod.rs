//! Intake module for handing accepted applications to the registry

mod client;
mod dispatcher;
mod traits;

pub use client::IntakeClient;
pub use dispatcher::{DeliveryOutcome, Dispatcher};
pub use traits::{IntakeClientTrait, IntakeError};

#[cfg(test)]
pub use traits::MockIntakeClientTrait;
