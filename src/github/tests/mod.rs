//! Unit tests for the GitHub adapter module.

mod context;
