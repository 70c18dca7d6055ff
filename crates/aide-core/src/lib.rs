pub mod error;
pub mod assistant;
pub mod chat;
pub mod config;
pub mod repository;
pub mod storage;
pub mod validation;

// Re-export common error type
pub use error::AideError;
