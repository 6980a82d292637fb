//! Mode state machine types for the application.
//!
//! This module defines the tagged variants that select which keybindings are
//! active and which sub-state is live. Each [`Mode`] variant carries the state
//! that only exists while that mode is active, so leaving a mode drops it.
//!
//! # State Machine
//!
//! ```text
//!            Enter(/search)           Enter(result)            i / I
//! Palette ─────────────────▶ Search ───────────────▶ Detail ─────────▶ Edit
//!    ▲  │                     │  ▲        Esc          │  ▲    Esc, :q   │
//!    │  │ Enter(/add)     Esc │  └─────────────────────┘  └──────────────┘
//!    │  ▼                     │                                :x, :wq (on save)
//!   Add ◀─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─┘ (Esc from Add and Search returns to Palette)
//! ```
//!
//! Within Detail the [`DetailView`] toggles between a command view with a cursor
//! and a plain view. Within Edit the editor carries its own sub-mode, see
//! [`crate::editor::EditorMode`].

use crate::app::add::AddState;
use crate::app::detail::DetailState;
use crate::app::handler::Key;
use crate::app::palette::PaletteState;
use crate::editor::EditorState;

/// The active interaction mode and its sub-state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Command palette, the initial and outermost mode.
    Palette(PaletteState),

    /// Prefix search over keys. The search sub-state lives on
    /// [`AppState`](crate::app::AppState) because Detail and Edit return to it.
    Search,

    /// Read-only viewer for one entry.
    Detail(DetailState),

    /// Modal editor over one entry's value.
    Edit(Box<EditSession>),

    /// Two-step wizard creating a new entry.
    Add(AddState),
}

impl Default for Mode {
    fn default() -> Self {
        Self::Palette(PaletteState::default())
    }
}

impl Mode {
    #[must_use]
    pub const fn kind(&self) -> ModeKind {
        match self {
            Self::Palette(_) => ModeKind::Palette,
            Self::Search => ModeKind::Search,
            Self::Detail(_) => ModeKind::Detail,
            Self::Edit(_) => ModeKind::Edit,
            Self::Add(_) => ModeKind::Add,
        }
    }
}

/// Fieldless discriminant of [`Mode`], handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Palette,
    Search,
    Detail,
    Edit,
    Add,
}

/// An editor opened from the detail viewer.
///
/// `detail` is the viewer state to return to; it is restored unchanged when the
/// editor is abandoned and refreshed when a save lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub detail: DetailState,
    pub editor: EditorState,
}

/// Sub-mode of the detail viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailView {
    /// Cursor navigation with `h j k l`, deletion with `dd`.
    #[default]
    Command,

    /// Plain read-only view; only `c`, `i` and `I` are active.
    Plain,
}

/// Result of feeding one key to a [`DeleteGesture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStep {
    /// First `d` seen; the key is consumed.
    Armed,
    /// Second consecutive `d`; the caller performs the delete.
    Fired,
    /// Not part of the gesture; the caller handles the key normally.
    Passed,
}

/// Two-keystroke `dd` automaton.
///
/// | state            | key     | next state        | step     |
/// |------------------|---------|-------------------|----------|
/// | `Idle`           | `d`     | `AwaitingSecondD` | `Armed`  |
/// | `AwaitingSecondD`| `d`     | `Idle`            | `Fired`  |
/// | any              | other   | `Idle`            | `Passed` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteGesture {
    #[default]
    Idle,
    AwaitingSecondD,
}

impl DeleteGesture {
    pub fn advance(&mut self, key: &Key) -> GestureStep {
        let (next, step) = match (*self, key) {
            (Self::Idle, Key::Char('d')) => (Self::AwaitingSecondD, GestureStep::Armed),
            (Self::AwaitingSecondD, Key::Char('d')) => (Self::Idle, GestureStep::Fired),
            _ => (Self::Idle, GestureStep::Passed),
        };
        *self = next;
        step
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    #[must_use]
    pub const fn is_armed(self) -> bool {
        matches!(self, Self::AwaitingSecondD)
    }
}
