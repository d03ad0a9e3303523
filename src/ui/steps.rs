//! Step body: the visible inputs of the current step, scrolled so the
//! focused one is always on screen

use super::components::render_button;
use super::forms::{
    draw_categories, draw_checkbox, draw_choice, draw_fee_table, draw_field_with_value,
};
use crate::app::App;
use crate::state::{filled_address_count, FieldId, FieldKind, FormState};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// One block of the step body
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Input(FieldId),
    /// Read-only text between inputs
    Note(String),
}

/// Rows taken by an input of the given kind
fn field_height(kind: FieldKind) -> u16 {
    match kind {
        FieldKind::Multiline => 5,
        FieldKind::Checklist => 12,
        FieldKind::FeeTable => 10,
        FieldKind::Checkbox => 4,
        _ => 3,
    }
}

fn declaration_text(user_name: &str) -> String {
    let name = if user_name.is_empty() { "[Name]" } else { user_name };
    format!(
        "I/We {name} hereby confirm that I/We have thoroughly read and fully understood all \
         the Terms and Conditions of GS1 Pakistan, and willingly agree to them in their \
         entirety without any reservations. I/We further affirm that all the information \
         provided is true, accurate, and complete to the best of my/our knowledge and belief."
    )
}

/// Inputs in focus order, with the GLN total under the address list and
/// the declaration above the terms checkbox
fn slots(fields: &[FieldId], form: &FormState) -> Vec<Slot> {
    let gln_tail = fields
        .iter()
        .rposition(|f| matches!(f, FieldId::GlnAddress(_) | FieldId::AddGlnAddress));

    let mut slots = Vec::with_capacity(fields.len() + 1);
    for (idx, field) in fields.iter().enumerate() {
        if *field == FieldId::AgreeTerms {
            slots.push(Slot::Note(declaration_text(&form.user_name)));
        }
        slots.push(Slot::Input(*field));
        if Some(idx) == gln_tail {
            let total = filled_address_count(&form.gln_addresses);
            slots.push(Slot::Note(format!("Total GLNs: {total}")));
        }
    }
    slots
}

/// Rows a word-wrapped note needs at `width` columns
fn note_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut rows = 1usize;
    let mut used = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };
        if needed <= width {
            used = needed;
        } else if len <= width {
            rows += 1;
            used = len;
        } else {
            // Overlong words are hard-broken
            rows += usize::from(used > 0) + (len - 1) / width;
            used = (len - 1) % width + 1;
        }
    }
    rows as u16
}

/// First row to show so the focused input is fully visible
fn scroll_offset(heights: &[u16], focus: usize, viewport: u16) -> u16 {
    let top: u16 = heights.iter().take(focus).sum();
    let bottom = top + heights.get(focus).copied().unwrap_or(0);
    bottom.saturating_sub(viewport).min(top)
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.state.wizard.step();
    let block = Block::default()
        .title(format!(" {} ", step.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let focused = app.state.focused_field();
    let slots = slots(&app.state.fields(), app.state.wizard.form());
    let heights: Vec<u16> = slots
        .iter()
        .map(|slot| match slot {
            Slot::Input(field) => field_height(field.kind()),
            Slot::Note(text) => note_height(text, inner.width),
        })
        .collect();
    let focus_index = slots
        .iter()
        .position(|slot| matches!(slot, Slot::Input(f) if Some(*f) == focused))
        .unwrap_or(0);
    let offset = scroll_offset(&heights, focus_index, inner.height);

    let mut y = 0u16;
    for (slot, height) in slots.iter().zip(heights) {
        // Blocks above the offset are skipped, the last one may be clipped
        if y >= offset && y - offset < inner.height {
            let rect = Rect {
                x: inner.x,
                y: inner.y + (y - offset),
                width: inner.width,
                height: height.min(inner.height - (y - offset)),
            };
            match slot {
                Slot::Input(field) => {
                    draw_input(frame, rect, app, *field, Some(*field) == focused);
                }
                Slot::Note(text) => frame.render_widget(
                    Paragraph::new(text.as_str())
                        .style(Style::default().fg(Color::Gray))
                        .wrap(Wrap { trim: true }),
                    rect,
                ),
            }
        }
        y += height;
    }
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App, field: FieldId, is_active: bool) {
    let wizard = &app.state.wizard;
    let form = wizard.form();
    let label = match (field, wizard.tax_format()) {
        (FieldId::TaxId, Some(format)) => format!("{} *", format.label()),
        _ => field.label(),
    };

    match field.kind() {
        kind @ (FieldKind::Text | FieldKind::Multiline) => {
            let value = wizard.display_text(field).unwrap_or_default();
            let placeholder = match field {
                FieldId::TaxId => wizard.tax_format().map(|f| f.placeholder()),
                FieldId::Website => Some("www.example.com"),
                FieldId::Email => Some("example@company.com"),
                _ => None,
            };
            draw_field_with_value(
                frame,
                area,
                &label,
                &value,
                placeholder,
                is_active,
                kind == FieldKind::Multiline,
            );
        }
        FieldKind::Choice => {
            let value = wizard.choice_value(field).unwrap_or_default();
            draw_choice(frame, area, &label, &value, is_active);
        }
        FieldKind::Checkbox => {
            let hint = (wizard.show_errors() && !form.agree_terms)
                .then_some("⯇ Please agree to the terms and conditions.");
            draw_checkbox(frame, area, &label, form.agree_terms, hint, is_active);
        }
        FieldKind::Checklist => {
            draw_categories(
                frame,
                area,
                &form.selected_categories,
                app.state.category_cursor,
                is_active,
            );
        }
        FieldKind::FeeTable => {
            draw_fee_table(
                frame,
                area,
                form,
                app.state.fee_cursor,
                wizard.fee_transition(),
                is_active,
            );
        }
        FieldKind::FilePath => {
            let label = if form.uploaded_image.is_some() {
                format!("{label} ✔ uploaded")
            } else {
                label
            };
            draw_field_with_value(
                frame,
                area,
                &label,
                &app.state.signature_path,
                Some("/path/to/signature.png"),
                is_active,
                false,
            );
        }
        FieldKind::Button => render_button(frame, area, &label, is_active),
    }
}
