//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Cursor positioning, column fitting and the clipboard escape
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, Overlay, SearchBarInfo, StatusInfo, UIViewModel,
};
