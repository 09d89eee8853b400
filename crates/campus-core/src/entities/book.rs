use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::BookStatus;

/// A textbook offered for sale on the book exchange.
///
/// `price` is a non-negative amount in the campus currency. Listings start as
/// `available` and follow the [`BookStatus`] state machine afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Book {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub condition: String,
    pub images: Vec<String>,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
