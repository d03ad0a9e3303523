//! Application state definitions

use super::fees::FeeTier;
use super::forms::{FieldId, FieldKind, CATEGORIES};
use super::wizard::Wizard;

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Wizard
    pub wizard: Wizard,

    // Focus
    pub active_field: usize,
    pub category_cursor: usize,
    pub fee_cursor: usize,

    // Signature path typed before it is loaded
    pub signature_path: String,

    // UI state
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            wizard: Wizard::new(),
            ..Default::default()
        }
    }

    /// Inputs on the current step in focus order
    pub fn fields(&self) -> Vec<FieldId> {
        self.wizard.visible_fields()
    }

    /// The focused input, if the step has any
    pub fn focused_field(&self) -> Option<FieldId> {
        let fields = self.fields();
        let index = self.active_field.min(fields.len().saturating_sub(1));
        fields.get(index).copied()
    }

    pub fn focused_kind(&self) -> Option<FieldKind> {
        self.focused_field().map(|field| field.kind())
    }

    /// Move to next field, wrapping
    pub fn next_field(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.active_field = (self.active_field.min(count - 1) + 1) % count;
        }
    }

    /// Move to previous field, wrapping
    pub fn prev_field(&mut self) {
        let count = self.fields().len();
        if count == 0 {
            return;
        }
        let current = self.active_field.min(count - 1);
        self.active_field = if current == 0 { count - 1 } else { current - 1 };
    }

    /// Keep focus on a real field after inputs appear or disappear
    pub fn clamp_focus(&mut self) {
        let count = self.fields().len();
        self.active_field = self.active_field.min(count.saturating_sub(1));
    }

    /// Focus the given field if it is visible
    pub fn focus(&mut self, field: FieldId) {
        if let Some(index) = self.fields().iter().position(|f| *f == field) {
            self.active_field = index;
        }
    }

    /// New step: start at the top
    pub fn reset_focus(&mut self) {
        self.active_field = 0;
        self.category_cursor = 0;
        self.fee_cursor = 0;
    }

    pub fn cursor_down(&mut self) {
        match self.focused_kind() {
            Some(FieldKind::Checklist) if self.category_cursor + 1 < CATEGORIES.len() => {
                self.category_cursor += 1;
            }
            Some(FieldKind::FeeTable) if self.fee_cursor + 1 < FeeTier::ALL.len() => {
                self.fee_cursor += 1;
            }
            _ => {}
        }
    }

    pub fn cursor_up(&mut self) {
        match self.focused_kind() {
            Some(FieldKind::Checklist) => self.category_cursor = self.category_cursor.saturating_sub(1),
            Some(FieldKind::FeeTable) => self.fee_cursor = self.fee_cursor.saturating_sub(1),
            _ => {}
        }
    }

    /// Fee tier under the table cursor
    pub fn fee_under_cursor(&self) -> FeeTier {
        FeeTier::ALL[self.fee_cursor.min(FeeTier::ALL.len() - 1)]
    }
}
