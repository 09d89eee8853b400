pub mod auth;
pub mod book;
pub mod dispatch;
pub mod dm;
pub mod group;
pub mod message;
pub mod migrate;
pub mod post;
pub mod profile;
pub mod report;
pub mod resource;
pub mod serve;
pub mod shared;
