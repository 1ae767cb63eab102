//! BatchEmitter tests.
