//! Actions representing side effects to be executed by the runtime.
//!
//! The state machine never performs I/O. Each apply step yields at most one
//! [`Action`], which the runtime executes: quitting the process or handing a
//! store operation to the background command layer.

use crate::worker::WorkerMessage;

/// Side effects requested by an apply step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Restores the terminal and exits the process.
    ///
    /// Produced by the interrupt key in every mode and by `Esc` in the palette.
    Quit,

    /// Runs a store operation off the interaction path.
    ///
    /// The operation resolves into exactly one
    /// [`WorkerResponse`](crate::worker::WorkerResponse) that is fed back as an
    /// [`Event::Worker`](crate::app::Event::Worker).
    PostToWorker(WorkerMessage),
}
