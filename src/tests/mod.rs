//! Internal test modules.

mod config;
mod emitter;
mod io;
mod resume;
mod store;
