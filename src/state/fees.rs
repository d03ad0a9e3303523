//! Fee selection policy
//!
//! The annual fee table is presented as independent checkboxes but behaves
//! like a radio group: at most one tier is selected at any time.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Annual fee tier, serialized with the id the intake sheet expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeTier {
    #[serde(rename = "1 GLN")]
    OneGln,
    #[serde(rename = "10 GTINs")]
    Gtins10,
    #[serde(rename = "100 GTINs")]
    Gtins100,
    #[serde(rename = "300 GTINs")]
    Gtins300,
    #[serde(rename = "500 GTINs")]
    Gtins500,
    #[serde(rename = "1000 GTINs")]
    Gtins1000,
}

impl FeeTier {
    /// Table order
    pub const ALL: [FeeTier; 6] = [
        FeeTier::OneGln,
        FeeTier::Gtins10,
        FeeTier::Gtins100,
        FeeTier::Gtins300,
        FeeTier::Gtins500,
        FeeTier::Gtins1000,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::OneGln => "1 GLN",
            Self::Gtins10 => "10 GTINs",
            Self::Gtins100 => "100 GTINs",
            Self::Gtins300 => "300 GTINs",
            Self::Gtins500 => "500 GTINs",
            Self::Gtins1000 => "1000 GTINs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneGln => "1 GTIN-13 / GLN",
            Self::Gtins10 => "10 GTIN-13s",
            Self::Gtins100 => "100 GTIN-13s",
            Self::Gtins300 => "300 GTIN-13s",
            Self::Gtins500 => "500 GTIN-13s",
            Self::Gtins1000 => "1,000 GTIN-13s",
        }
    }

    /// Informational annual fee in PKR: (base, 16% tax, total)
    pub fn annual_fee(&self) -> (u32, u32, u32) {
        match self {
            Self::OneGln | Self::Gtins10 => (8_723, 1_396, 10_119),
            Self::Gtins100 => (13_957, 2_233, 16_190),
            Self::Gtins300 => (17_445, 2_793, 20_238),
            Self::Gtins500 => (26_167, 4_188, 30_355),
            Self::Gtins1000 => (34_875, 5_599, 40_474),
        }
    }

    /// Whether the tier can be toggled. Only the 500 tier stays open on the
    /// GTIN-8 path.
    pub fn is_selectable(&self, gtin8_required: bool) -> bool {
        !gtin8_required || *self == Self::Gtins500
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error("The {} tier is not available while GTIN-8 numbers are requested.", .0.label())]
    TierDisabled(FeeTier),
}

/// Toggle `tier` with radio semantics
///
/// Selecting the current tier clears the selection; selecting any other
/// tier replaces it.
pub fn toggle_fee(
    selected: &mut Vec<FeeTier>,
    tier: FeeTier,
    gtin8_required: bool,
) -> Result<(), FeeError> {
    if !tier.is_selectable(gtin8_required) {
        return Err(FeeError::TierDisabled(tier));
    }

    let was_selected = selected.contains(&tier);
    selected.clear();
    if !was_selected {
        selected.push(tier);
    }
    Ok(())
}

/// Short-lived highlight on the row whose selection just changed
#[derive(Debug, Clone, Copy)]
pub struct FeeTransition {
    pub tier: FeeTier,
    pub started_at: Instant,
}

impl FeeTransition {
    /// Highlight lifetime (100ms lead-in plus 300ms fade)
    pub const DURATION: Duration = Duration::from_millis(400);

    pub fn new(tier: FeeTier) -> Self {
        Self {
            tier,
            started_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.started_at.elapsed() >= Self::DURATION
    }

    /// Highlight strength from 1.0 (just toggled) down to 0.0 (expired)
    pub fn intensity(&self) -> f32 {
        let progress =
            (self.started_at.elapsed().as_secs_f32() / Self::DURATION.as_secs_f32()).min(1.0);
        1.0 - simple_easing::cubic_in(progress)
    }
}
