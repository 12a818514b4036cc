pub mod config;
pub mod core;
pub mod error;
pub mod state;
pub mod terminal;
pub mod user_config;

pub use crate::core::corpus::Corpus;
pub use crate::core::record::{TagCategory, TagRecord};
pub use crate::core::session::CompletionSession;
pub use crate::error::{Result, TagError};
