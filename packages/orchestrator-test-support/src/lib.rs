//! Shared test utilities for the orchestrator workspace.
//!
//! Unit tests (through a `ctor` hook in the library) and integration tests
//! (through `tests/common`) both call [`logging::init`].

pub mod logging;
