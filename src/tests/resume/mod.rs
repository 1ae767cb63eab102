//! Resumer tests.
