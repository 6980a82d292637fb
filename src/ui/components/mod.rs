//! Composable UI component renderers.
//!
//! Each component draws one part of a screen into the area it is given. The
//! per-mode layouts live in [`crate::ui::renderer`].
//!
//! # Components
//!
//! - [`header`]: Bold title line
//! - [`footer`]: Status, keybinding hints and mode indicator
//! - [`input`]: Bordered input boxes and field labels
//! - [`list`]: Windowed command and result lists
//! - [`text`]: Multi-line value view with block cursor

pub mod footer;
pub mod header;
pub mod input;
pub mod list;
pub mod text;

pub use footer::{render_footer, FOOTER_HEIGHT};
pub use header::render_header;
pub use input::{render_input, render_label};
pub use list::render_list;
pub use text::render_text_view;
