//! Offset store tests.
