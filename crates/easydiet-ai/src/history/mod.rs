//! Bounded per-conversation history.
//!
//! `HistoryStore` is the persistence seam; `HistoryWindow` is the
//! manager on top of it that assigns ordering, trims to the retention
//! bound, and produces the context view used for generation.

mod store;
mod window;

pub use store::{HistoryStore, MemoryHistoryStore};
pub use window::HistoryWindow;
