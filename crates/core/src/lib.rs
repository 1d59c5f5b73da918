//! Ante-log parsing and summaries. Keep this crate free of platform concerns;
//! the only IO is the file wrapper on [`Summarizer`].

pub mod config;
pub mod error;
pub mod kings;
pub mod record;
pub mod scanner;
pub mod summarizer;
pub mod summary;
pub mod tables;

pub use config::*;
pub use error::*;
pub use record::*;
pub use scanner::*;
pub use summarizer::*;
pub use tables::*;
