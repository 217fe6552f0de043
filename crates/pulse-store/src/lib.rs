//! # pulse-store
//!
//! Storage layer implementing the repository ports from `pulse-core` over a
//! generic record store.
//!
//! ## Overview
//!
//! The hosted backend is a record-storage API: generic CRUD over named
//! collections with filter/sort/paginate support, no transactions, and no
//! server-side counters. This crate provides:
//!
//! - The [`store::RecordStore`] trait plus an in-memory implementation
//!   ([`store::MemoryRecordStore`]) and an HTTP client for the hosted API
//!   ([`store::HttpRecordStore`])
//! - Delimited-string field codecs, isolated in [`codec`]
//! - Collection/field names and document ↔ entity mapping in [`models`]
//! - Repository implementations for every port
//! - The concurrent in-memory follow graph ([`graph::InMemoryFollowGraph`])

pub mod codec;
pub mod graph;
pub mod models;
pub mod repositories;
pub mod store;

// Re-export commonly used types
pub use graph::InMemoryFollowGraph;
pub use models::collections;
pub use repositories::{
    StoreCommentRepository, StoreConversationRepository, StoreCounterRepository,
    StoreMessageRepository, StoreNotificationRepository, StorePostRepository, StoreUserRepository,
};
pub use store::{
    Document, DocumentBuilder, HttpRecordStore, HttpStoreConfig, MemoryRecordStore, Query, Record,
    RecordStore, SharedRecordStore, StoreError, StoreResult,
};
