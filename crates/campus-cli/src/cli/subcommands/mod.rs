pub mod auth;
pub mod book;
pub mod dm;
pub mod group;
pub mod message;
pub mod post;
pub mod profile;
pub mod report;
pub mod resource;

pub use auth::AuthCommands;
pub use book::BookCommands;
pub use dm::DmCommands;
pub use group::GroupCommands;
pub use message::MessageCommands;
pub use post::PostCommands;
pub use profile::ProfileCommands;
pub use report::ReportCommands;
pub use resource::ResourceCommands;
