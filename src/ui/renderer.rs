//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the [`UIViewModel`] from `AppState`, then
//! hand it to the component layout. Overlays are drawn last so they sit on
//! top of the table.
//!
//! # Example
//!
//! ```rust
//! use vault_explorer::ui::render;
//! use vault_explorer::{AppState, Config, Theme};
//!
//! let state = AppState::new(&Config::default(), Theme::default());
//! render(&state, 24, 80); // Renders to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh pane on each
/// render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_layout(vm, theme, cols, rows);

    if let Some(overlay) = &vm.overlay {
        components::render_overlay(overlay, theme, rows, cols);
    }
}
