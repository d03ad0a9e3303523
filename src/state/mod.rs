//! Application state module

mod app_state;
pub mod fees;
mod forms;
mod notification;
pub mod signature;
pub mod validation;
mod wizard;

pub use app_state::*;
pub use fees::{FeeError, FeeTier, FeeTransition};
pub use forms::*;
pub use notification::*;
pub use signature::{load_signature, SignatureError};
pub use validation::StepError;
pub use wizard::*;
