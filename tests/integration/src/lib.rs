//! Integration test support
//!
//! The service layer has no wire surface, so these tests drive the services
//! directly over a seeded in-memory record store.

pub mod fixtures;

pub use fixtures::{at, FlakyPostRepository, TestApp};
