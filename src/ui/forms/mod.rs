//! Form rendering module
//!
//! - `field_renderer`: single-row inputs (text, selectors, checkbox)
//! - `lists`: the category checklist and the fee table

mod field_renderer;
mod lists;

pub use field_renderer::{draw_checkbox, draw_choice, draw_field_with_value};
pub use lists::{draw_categories, draw_fee_table};
