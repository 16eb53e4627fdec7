//! Application layer coordinating state, events, and actions.
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: The add/edit secret form
//! - [`guard`]: Per-operation in-flight guard
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input modes and pending confirmations
//! - [`rows`]: Table rows built from listed secrets
//! - [`search`]: Debounced substring search
//! - [`sort`]: Column sort state and comparator
//! - [`state`]: Central application state and view model computation
//!
//! # Example
//!
//! ```rust
//! use vault_explorer::app::{handle_event, AppState, Event};
//! use vault_explorer::{Config, Theme};
//!
//! let mut state = AppState::new(&Config::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), vault_explorer::ExplorerError>(())
//! ```

pub mod actions;
pub mod form;
pub mod guard;
pub mod handler;
pub mod modes;
pub mod rows;
pub mod search;
pub mod sort;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;
