//! Multi-row inputs: the category checklist and the fee table

use super::super::widgets::render_scrollable_list;
use crate::state::{FeeTier, FeeTransition, FormState, CATEGORIES};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Row, Table},
    Frame,
};

/// Peak colour of a freshly toggled fee row
const TRANSITION_RGB: (f32, f32, f32) = (0.0, 95.0, 135.0);

fn block(title: String, is_active: bool) -> Block<'static> {
    let border = if is_active { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

pub fn draw_categories(
    frame: &mut Frame,
    area: Rect,
    selected: &[String],
    cursor: usize,
    is_active: bool,
) {
    let items: Vec<ListItem> = CATEGORIES
        .iter()
        .map(|category| {
            let checked = selected.iter().any(|s| s == category);
            let mark = if checked { "[x] " } else { "[ ] " };
            let style = if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(format!("{mark}{category}"), style))
        })
        .collect();

    let highlight = if is_active {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let title = format!(" Product Categories * ({} selected) ", selected.len());
    let list = List::new(items)
        .block(block(title, is_active))
        .highlight_style(highlight);
    render_scrollable_list(frame, area, list, cursor);
}

/// Background for a row still fading out after being toggled
fn transition_bg(transition: Option<&FeeTransition>, tier: FeeTier) -> Option<Color> {
    let transition = transition.filter(|t| t.tier == tier && !t.is_expired())?;
    let intensity = transition.intensity();
    let (r, g, b) = TRANSITION_RGB;
    Some(Color::Rgb(
        (r * intensity) as u8,
        (g * intensity) as u8,
        (b * intensity) as u8,
    ))
}

pub fn draw_fee_table(
    frame: &mut Frame,
    area: Rect,
    form: &FormState,
    cursor: usize,
    transition: Option<&FeeTransition>,
    is_active: bool,
) {
    let gtin8_required = form.gtin8_required();
    let rows: Vec<Row> = FeeTier::ALL
        .iter()
        .enumerate()
        .map(|(idx, tier)| {
            let checked = form.selected_fees.contains(tier);
            let (base, tax, total) = tier.annual_fee();
            let mark = if checked { "(•)" } else { "( )" };

            let mut style = if !tier.is_selectable(gtin8_required) {
                Style::default().fg(Color::DarkGray)
            } else if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            if is_active && idx == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if let Some(bg) = transition_bg(transition, *tier) {
                style = style.bg(bg);
            }

            Row::new(vec![
                mark.to_string(),
                tier.label().to_string(),
                base.to_string(),
                tax.to_string(),
                total.to_string(),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["", "Tier", "Fee (PKR)", "Tax 16%", "Total"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widths = [
        Constraint::Length(4),
        Constraint::Length(12),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(9),
    ];
    let title = if gtin8_required {
        " Annual Fee (only 500 GTINs with GTIN-8) ".to_string()
    } else {
        " Annual Fee * ".to_string()
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(block(title, is_active));
    frame.render_widget(table, area);
}
