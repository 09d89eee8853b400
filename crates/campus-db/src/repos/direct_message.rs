//! Direct message repository.

use campus_core::entities::DirectMessage;
use campus_core::enums::Table;
use campus_core::errors::CoreError;
use campus_core::ids::PREFIX_DIRECT_MESSAGE;
use campus_core::page::Page;
use campus_core::realtime::ChangeKind;
use campus_core::validate;
use campus_core::views::{AuthorSummary, ConversationSummary};

use crate::error::DatabaseError;
use crate::helpers::{author_at, fmt_datetime, now, parse_datetime};
use crate::service::CampusService;

const SELECT_COLS: &str = "id, sender_id, recipient_id, content, created_at";
const DM_COLS: &str = "d.id, d.sender_id, d.recipient_id, d.content, d.created_at";

fn row_to_dm(row: &libsql::Row) -> Result<DirectMessage, DatabaseError> {
    Ok(DirectMessage {
        id: row.get(0)?,
        sender_id: row.get(1)?,
        recipient_id: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl CampusService {
    pub async fn send_direct_message(
        &self,
        sender_id: &str,
        recipient_id: &str,
        content: &str,
    ) -> Result<DirectMessage, DatabaseError> {
        let content = validate::require("content", content)?;
        if sender_id == recipient_id {
            return Err(CoreError::Validation("cannot message yourself".into()).into());
        }

        let _guard = self.write_guard().await;
        self.get_profile(recipient_id).await?;

        let id = self.db().generate_id(PREFIX_DIRECT_MESSAGE).await?;
        let now = now();
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO direct_messages ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![id.as_str(), sender_id, recipient_id, content, fmt_datetime(now)],
            )
            .await?;

        let dm = DirectMessage {
            id,
            sender_id: sender_id.to_string(),
            recipient_id: recipient_id.to_string(),
            content: content.to_string(),
            created_at: now,
        };
        self.publish(Table::DirectMessages, ChangeKind::Insert, &dm.id, &dm)?;
        Ok(dm)
    }

    /// The most recent page of messages between two users, oldest first.
    pub async fn list_conversation(
        &self,
        user_id: &str,
        peer_id: &str,
        page: Page,
    ) -> Result<Vec<DirectMessage>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM direct_messages
                     WHERE (sender_id = ?1 AND recipient_id = ?2)
                        OR (sender_id = ?2 AND recipient_id = ?1)
                     ORDER BY created_at DESC, rowid DESC
                     LIMIT ?3 OFFSET ?4"
                ),
                libsql::params![
                    user_id,
                    peer_id,
                    i64::from(page.limit),
                    i64::from(page.offset)
                ],
            )
            .await?;

        let mut messages = Vec::new();
        while let Some(row) = rows.next().await? {
            messages.push(row_to_dm(&row)?);
        }
        messages.reverse();
        Ok(messages)
    }

    /// Latest message with each counterpart, most recent conversation first.
    pub async fn list_conversations(
        &self,
        user_id: &str,
    ) -> Result<Vec<ConversationSummary>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {DM_COLS}, l.peer, p.full_name, p.avatar_url
                     FROM direct_messages d
                     JOIN (
                         SELECT CASE WHEN sender_id = ?1 THEN recipient_id ELSE sender_id END AS peer,
                                MAX(rowid) AS last_rowid
                         FROM direct_messages
                         WHERE sender_id = ?1 OR recipient_id = ?1
                         GROUP BY peer
                     ) l ON d.rowid = l.last_rowid
                     LEFT JOIN profiles p ON p.id = l.peer
                     ORDER BY d.created_at DESC, d.rowid DESC"
                ),
                [user_id],
            )
            .await?;

        let mut conversations = Vec::new();
        while let Some(row) = rows.next().await? {
            let last_message = row_to_dm(&row)?;
            let peer = author_at(&row, 5)?.unwrap_or_else(|| AuthorSummary {
                id: last_message.counterpart(user_id).to_string(),
                full_name: String::new(),
                avatar_url: None,
            });
            conversations.push(ConversationSummary { peer, last_message });
        }
        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{create_user, test_service};

    #[tokio::test]
    async fn conversation_is_oldest_first_and_two_sided() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let bob = create_user(&svc, "bob").await;
        let cyd = create_user(&svc, "cyd").await;

        svc.send_direct_message(&ada, &bob, "hi bob").await.unwrap();
        svc.send_direct_message(&bob, &ada, "hi ada").await.unwrap();
        svc.send_direct_message(&cyd, &ada, "unrelated").await.unwrap();

        let thread = svc.list_conversation(&ada, &bob, Page::messages()).await.unwrap();
        let contents: Vec<&str> = thread.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hi bob", "hi ada"]);

        let same = svc.list_conversation(&bob, &ada, Page::messages()).await.unwrap();
        assert_eq!(same, thread);
    }

    #[tokio::test]
    async fn conversation_page_keeps_latest_messages() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let bob = create_user(&svc, "bob").await;
        for i in 0..4 {
            svc.send_direct_message(&ada, &bob, &format!("m{i}")).await.unwrap();
        }
        let thread = svc.list_conversation(&ada, &bob, Page::new(2, 0)).await.unwrap();
        let contents: Vec<&str> = thread.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m2", "m3"]);
    }

    #[tokio::test]
    async fn conversations_show_last_message_per_peer() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let bob = create_user(&svc, "bob").await;
        let cyd = create_user(&svc, "cyd").await;

        svc.send_direct_message(&ada, &bob, "one").await.unwrap();
        svc.send_direct_message(&cyd, &ada, "two").await.unwrap();
        svc.send_direct_message(&bob, &ada, "three").await.unwrap();

        let list = svc.list_conversations(&ada).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].peer.id, bob);
        assert_eq!(list[0].peer.full_name, "bob");
        assert_eq!(list[0].last_message.content, "three");
        assert_eq!(list[1].peer.id, cyd);
        assert_eq!(list[1].last_message.content, "two");
    }

    #[tokio::test]
    async fn invalid_direct_messages() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        assert!(matches!(
            svc.send_direct_message(&ada, &ada, "me").await.unwrap_err(),
            DatabaseError::Domain(CoreError::Validation(_))
        ));
        assert!(svc
            .send_direct_message(&ada, "usr-00000000", "hello?")
            .await
            .unwrap_err()
            .is_not_found());
        let bob = create_user(&svc, "bob").await;
        assert!(svc.send_direct_message(&ada, &bob, " ").await.is_err());
    }
}
