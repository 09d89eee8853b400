pub mod auth;
pub mod books;
pub mod conversations;
pub mod dashboard;
pub mod health;
pub mod lost_found;
pub mod posts;
pub mod profiles;
pub mod resources;
pub mod study_groups;
pub mod uploads;
pub mod websocket;
