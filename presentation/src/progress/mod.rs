//! Live rendering of a streaming reply

pub mod reporter;
