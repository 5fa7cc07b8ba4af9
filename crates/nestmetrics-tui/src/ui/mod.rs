//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, status bar and overlays
//! - `input`: keyboard event handling
//! - `styles`: color palette and text styling
//! - `components`: bar charts, forms and key/value panels shared by tabs
//! - `tabs`: one renderer per page

pub mod components;
pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
