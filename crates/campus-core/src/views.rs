//! Joined read models returned by list and detail operations.
//!
//! Each view flattens its base entity and adds the related rows a screen
//! needs (author, seller contact, roster), so the JSON shape is the entity's
//! own fields plus a few nested objects.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    Book, Comment, DirectMessage, LostFoundReport, Message, Post, Resource, StudyGroup,
};
use crate::enums::MemberRole;

/// Public summary of a profile attached to authored rows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// Seller contact attached to book listings. Includes the phone number so a
/// buyer can reach the seller.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SellerSummary {
    pub id: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Option<AuthorSummary>,
}

/// Feed entry: the post, its author, and its comments oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub author: Option<AuthorSummary>,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BookListing {
    #[serde(flatten)]
    pub book: Book,
    pub seller: Option<SellerSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: LostFoundReport,
    pub reporter: Option<AuthorSummary>,
}

/// One roster entry of a study group.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MemberSummary {
    pub user_id: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GroupView {
    #[serde(flatten)]
    pub group: StudyGroup,
    pub creator: Option<AuthorSummary>,
    pub members: Vec<MemberSummary>,
}

impl GroupView {
    #[must_use]
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResourceView {
    #[serde(flatten)]
    pub resource: Resource,
    pub owner: Option<AuthorSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageView {
    #[serde(flatten)]
    pub message: Message,
    pub author: Option<AuthorSummary>,
}

/// Latest direct message exchanged with one counterpart.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConversationSummary {
    pub peer: AuthorSummary,
    pub last_message: DirectMessage,
}
