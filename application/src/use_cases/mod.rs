//! Use cases (application services)
//!
//! - [`send_message`]: one chat turn (send, stream, merge)

pub mod send_message;
