//! egui user interface.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::{MediarecApp, Route};
pub use state::{controls_for, display_binding, ControlSet, WidgetState};
pub use theme::Theme;
