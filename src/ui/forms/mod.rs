//! Form rendering module
//!
//! - `field_renderer`: turns one form field into list lines
//! - `quote_form`: the quote request form panel

mod field_renderer;
mod quote_form;

pub use quote_form::draw_quote_form;
