//! Paginated, filterable book catalog browsing.
//!
//! The browsing core lives in [`state`]: a [`state::RenderCoordinator`]
//! owns the active result set and its pagination tracker and answers every
//! user action with a list of [`state::RenderInstruction`]s.

pub mod config;
pub mod error;
pub mod state;

pub use error::{BrowserError, Result};
