//! UI layer for the admin desktop app.

pub mod app;

pub use app::AdminApp;
