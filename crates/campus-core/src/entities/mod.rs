//! Entity structs for every Campus Hub table row.
//!
//! Each entity maps to one table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` so they can cross the HTTP API
//! unchanged and be validated against their generated schema in tests.

mod book;
mod comment;
mod direct_message;
mod message;
mod post;
mod profile;
mod report;
mod resource;
mod study_group;

pub use book::Book;
pub use comment::Comment;
pub use direct_message::DirectMessage;
pub use message::Message;
pub use post::Post;
pub use profile::Profile;
pub use report::LostFoundReport;
pub use resource::Resource;
pub use study_group::{GroupMember, StudyGroup};
