//! User interface rendering layer with component-based architecture.
//!
//! This module turns the application state into ratatui widgets through
//! composable rendering components, with theme support.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → ScreenViewModel → render → ratatui Frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared text shaping utilities (truncation, cursors)
//! - [`theme`]: Color scheme definitions and style generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{FieldView, ListRow, ListView, ScreenBody, ScreenViewModel, TextView};
