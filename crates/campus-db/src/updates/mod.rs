//! Partial-update builders. A `None` field is left unchanged.

pub mod book;
pub mod profile;

pub use book::{BookUpdate, BookUpdateBuilder};
pub use profile::{ProfileUpdate, ProfileUpdateBuilder};
