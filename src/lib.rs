//! Barcode lookup against Open Food Facts with Portuguese allergen labels,
//! served as a ratatui terminal app.

pub mod api;
pub mod app;
pub mod events;
pub mod logging;
pub mod ui;
pub mod util;
