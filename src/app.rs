//! Application state and core logic

use crate::config::RegistrationConfig;
use crate::intake::{DeliveryOutcome, Dispatcher};
use crate::state::{load_signature, AppState, FieldId, FieldKind, Step};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedReceiver;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Hands submitted applications to the intake endpoint
    dispatcher: Dispatcher,
    /// Delivery results reported by the dispatcher
    outcomes: UnboundedReceiver<DeliveryOutcome>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance posting to the configured endpoint
    pub fn new(config: &RegistrationConfig) -> Self {
        let (dispatcher, outcomes) = Dispatcher::from_config(config);
        Self::with_dispatcher(dispatcher, outcomes)
    }

    pub fn with_dispatcher(
        dispatcher: Dispatcher,
        outcomes: UnboundedReceiver<DeliveryOutcome>,
    ) -> Self {
        Self {
            state: AppState::new(),
            dispatcher,
            outcomes,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Whether a redraw is needed soon for animation
    pub fn is_animating(&self) -> bool {
        self.state.wizard.fee_transition().is_some()
    }

    /// Per-frame housekeeping: expire highlights and collect delivery results
    pub fn tick(&mut self) {
        self.state.wizard.tick();
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.state.status_message = Some(outcome.summary());
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Notification is modal: only acknowledgment gets through
        if self.state.wizard.notification().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.wizard.dismiss_notification();
            }
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_control_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::PageDown => self.advance(),
            KeyCode::PageUp => self.retreat(),
            KeyCode::Tab => self.state.next_field(),
            KeyCode::BackTab => self.state.prev_field(),
            _ => self.handle_field_key(key).await?,
        }

        self.state.clamp_focus();
        Ok(())
    }

    fn handle_control_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') => self.advance(),
            KeyCode::Char('p') => self.retreat(),
            KeyCode::Char('s') => self.submit(),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('d') => {
                if let Some(FieldId::GlnAddress(index)) = self.state.focused_field() {
                    self.state.wizard.remove_gln_address(index);
                    self.state.clamp_focus();
                }
            }
            _ => {}
        }
    }

    fn advance(&mut self) {
        let before = self.state.wizard.step();
        if let Ok(step) = self.state.wizard.advance() {
            if step != before {
                self.state.reset_focus();
            }
        }
    }

    fn retreat(&mut self) {
        let before = self.state.wizard.step();
        if self.state.wizard.retreat() != before {
            self.state.reset_focus();
        }
    }

    fn submit(&mut self) {
        if self.state.wizard.step() != Step::Declaration {
            self.state.status_message = Some("Finish every step before submitting".to_string());
            return;
        }
        if let Ok(submission) = self.state.wizard.submit() {
            self.dispatcher.dispatch(submission);
            self.state.signature_path.clear();
            self.state.reset_focus();
            self.state.status_message = Some("Sending application...".to_string());
        }
    }

    async fn handle_field_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(field) = self.state.focused_field() else {
            return Ok(());
        };

        match (field.kind(), key.code) {
            (FieldKind::Text, KeyCode::Enter) => self.state.next_field(),
            (FieldKind::Text | FieldKind::Multiline, KeyCode::Char(c)) => {
                self.state.wizard.push_char(field, c);
            }
            (FieldKind::Multiline, KeyCode::Enter) => {
                self.state.wizard.push_char(field, '\n');
            }
            (FieldKind::Text | FieldKind::Multiline, KeyCode::Backspace) => {
                self.state.wizard.pop_char(field);
            }

            (FieldKind::Choice, KeyCode::Right | KeyCode::Char(' ')) => {
                self.state.wizard.cycle_choice(field, true);
            }
            (FieldKind::Choice, KeyCode::Left) => {
                self.state.wizard.cycle_choice(field, false);
            }
            (FieldKind::Checkbox, KeyCode::Char(' ') | KeyCode::Enter) => {
                self.state.wizard.cycle_choice(field, true);
            }

            (FieldKind::Checklist | FieldKind::FeeTable, KeyCode::Down) => self.state.cursor_down(),
            (FieldKind::Checklist | FieldKind::FeeTable, KeyCode::Up) => self.state.cursor_up(),
            (FieldKind::Checklist, KeyCode::Char(' ') | KeyCode::Enter) => {
                let index = self.state.category_cursor;
                self.state.wizard.toggle_category(index);
            }
            (FieldKind::FeeTable, KeyCode::Char(' ') | KeyCode::Enter) => {
                let tier = self.state.fee_under_cursor();
                if let Err(e) = self.state.wizard.toggle_fee(tier) {
                    self.state.status_message = Some(e.to_string());
                }
            }

            (FieldKind::FilePath, KeyCode::Char(c)) => self.state.signature_path.push(c),
            (FieldKind::FilePath, KeyCode::Backspace) => {
                self.state.signature_path.pop();
            }
            (FieldKind::FilePath, KeyCode::Enter) => self.load_signature().await,

            (FieldKind::Button, KeyCode::Enter | KeyCode::Char(' ')) => {
                if field == FieldId::AddGlnAddress && self.state.wizard.add_gln_address() {
                    let count = self
                        .state
                        .fields()
                        .iter()
                        .filter(|f| matches!(f, FieldId::GlnAddress(_)))
                        .count();
                    self.state.focus(FieldId::GlnAddress(count.saturating_sub(1)));
                }
            }

            (_, KeyCode::Down) => self.state.next_field(),
            (_, KeyCode::Up) => self.state.prev_field(),
            _ => {}
        }
        Ok(())
    }

    async fn load_signature(&mut self) {
        let path = self.state.signature_path.trim().to_string();
        if path.is_empty() {
            return;
        }
        match load_signature(&path).await {
            Ok(data_url) => {
                self.state.wizard.set_signature(data_url);
                self.state.status_message = Some("Signature uploaded".to_string());
            }
            Err(e) => {
                tracing::warn!(%path, error = %e, "Signature rejected");
                self.state.signature_path.clear();
                self.state.wizard.notify_error(e.to_string());
            }
        }
    }
}
