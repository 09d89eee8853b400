//! Repository methods, one module per table family.
//!
//! Each module adds an `impl CampusService` block with its queries and
//! mutations.

pub mod accounts;
pub mod book;
pub mod dashboard;
pub mod direct_message;
pub mod message;
pub mod post;
pub mod profile;
pub mod report;
pub mod resource;
pub mod study_group;
pub mod uploads;

pub use accounts::{Account, SessionRecord};
pub use book::NewBook;
pub use dashboard::DashboardSummary;
pub use profile::NewProfile;
pub use report::NewReport;
pub use resource::NewResource;
pub use study_group::NewStudyGroup;
