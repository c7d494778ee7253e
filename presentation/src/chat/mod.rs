//! Interactive chat module
//!
//! Provides a line-editor based interactive chat with the guide assistant.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
