//! Study group chat repository.

use campus_core::entities::Message;
use campus_core::enums::Table;
use campus_core::errors::CoreError;
use campus_core::ids::PREFIX_MESSAGE;
use campus_core::page::Page;
use campus_core::realtime::ChangeKind;
use campus_core::validate;
use campus_core::views::MessageView;

use crate::error::DatabaseError;
use crate::helpers::{
    author_at, fmt_datetime, now, parse_datetime, parse_string_list, to_json_list,
};
use crate::service::CampusService;

const SELECT_COLS: &str = "id, group_id, user_id, content, attachments, created_at";
const MESSAGE_COLS: &str = "m.id, m.group_id, m.user_id, m.content, m.attachments, m.created_at";

fn row_to_message(row: &libsql::Row) -> Result<Message, DatabaseError> {
    Ok(Message {
        id: row.get(0)?,
        group_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        attachments: parse_string_list(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl CampusService {
    /// Post to a group chat. The sender must be a member of the group.
    pub async fn send_message(
        &self,
        group_id: &str,
        user_id: &str,
        content: &str,
        attachments: &[String],
    ) -> Result<Message, DatabaseError> {
        let content = validate::require_text_or_attachments("content", content, attachments)?;

        let _guard = self.write_guard().await;
        if !self.is_group_member(group_id, user_id).await? {
            // Distinguish a missing group from a non-member.
            self.get_study_group(group_id).await?;
            return Err(
                CoreError::Forbidden(format!("not a member of study group {group_id}")).into(),
            );
        }

        let id = self.db().generate_id(PREFIX_MESSAGE).await?;
        let now = now();
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO messages ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                libsql::params![
                    id.as_str(),
                    group_id,
                    user_id,
                    content,
                    to_json_list(attachments)?,
                    fmt_datetime(now)
                ],
            )
            .await?;

        let message = Message {
            id,
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            attachments: attachments.to_vec(),
            created_at: now,
        };
        self.publish(Table::Messages, ChangeKind::Insert, &message.id, &message)?;
        Ok(message)
    }

    /// A group's chat history, newest first, each message with its author.
    pub async fn list_messages(
        &self,
        group_id: &str,
        page: Page,
    ) -> Result<Vec<MessageView>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {MESSAGE_COLS}, a.id, a.full_name, a.avatar_url
                     FROM messages m LEFT JOIN profiles a ON a.id = m.user_id
                     WHERE m.group_id = ?1
                     ORDER BY m.created_at DESC, m.rowid DESC
                     LIMIT ?2 OFFSET ?3"
                ),
                libsql::params![group_id, i64::from(page.limit), i64::from(page.offset)],
            )
            .await?;

        let mut messages = Vec::new();
        while let Some(row) = rows.next().await? {
            messages.push(MessageView {
                message: row_to_message(&row)?,
                author: author_at(&row, 6)?,
            });
        }
        Ok(messages)
    }
}
