pub mod api;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod layout;
pub mod render;
pub mod stats;
pub mod values;
