//! Application layer for AIDE.
//!
//! Use cases that sit between the presentation surface and the assistant
//! repository: the validated management flows, the training editor and the
//! chat preview.

pub mod assistant_console;
pub mod chat_simulator;
pub mod training_editor;

pub use assistant_console::{AssistantConsole, ConsoleOutcome};
pub use chat_simulator::ChatSimulator;
pub use training_editor::TrainingEditor;
