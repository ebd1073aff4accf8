//! Application-facing contracts.
//!
//! The runtime calls into an [`App`] for window events and after every drawn
//! frame; the app answers with [`AppControl`] and buffered runtime commands.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
