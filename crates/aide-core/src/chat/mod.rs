//! Chat preview domain model.
//!
//! Messages exchanged with the simulated assistant on the training page.

mod model;

pub use model::{ChatMessage, ChatSender};
