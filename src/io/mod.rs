//! Input providers that open log streams.
//!
//! This module provides:
//! - `InputProvider`: Trait for sources that can be (re)opened from the beginning
//! - Standard implementations for files and stdin
//! - An in-memory implementation for testing

mod input;
mod memory;
mod std_io;

pub use input::InputProvider;
pub use memory::InMemorySource;
pub use std_io::{FileInput, StdinInput};
