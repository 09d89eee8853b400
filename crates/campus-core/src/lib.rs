//! # campus-core
//!
//! Core types shared by every Campus Hub crate:
//! - Entity structs for all table rows (profiles, posts, books, study groups, ...)
//! - Status and kind enums, with state machine transitions where the data has one
//! - ID prefix constants
//! - Joined read models returned by list endpoints
//! - Pagination and required-field validation
//! - Change events and channel filters for realtime subscriptions
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod page;
pub mod realtime;
pub mod validate;
pub mod views;
