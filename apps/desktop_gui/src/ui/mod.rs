//! UI layer for the profile form: app shell and input widgets.

pub mod app;
pub mod widgets;

pub use app::ProfileFormApp;
