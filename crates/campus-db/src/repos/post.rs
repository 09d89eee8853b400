//! Social feed repository: posts, likes, and comments.

use std::collections::HashMap;

use campus_core::entities::{Comment, Post};
use campus_core::enums::Table;
use campus_core::errors::CoreError;
use campus_core::ids::{PREFIX_COMMENT, PREFIX_POST};
use campus_core::page::Page;
use campus_core::realtime::ChangeKind;
use campus_core::validate;
use campus_core::views::{CommentView, PostView};

use crate::error::DatabaseError;
use crate::helpers::{
    author_at, fmt_datetime, now, parse_datetime, parse_string_list, placeholders, to_json_list,
};
use crate::service::CampusService;

const SELECT_COLS: &str = "id, user_id, content, images, likes, created_at, updated_at";
const POST_COLS: &str = "p.id, p.user_id, p.content, p.images, p.likes, p.created_at, p.updated_at";
const COMMENT_COLS: &str = "c.id, c.post_id, c.user_id, c.content, c.created_at";

fn row_to_post(row: &libsql::Row) -> Result<Post, DatabaseError> {
    Ok(Post {
        id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        images: parse_string_list(&row.get::<String>(3)?)?,
        likes: row.get(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl CampusService {
    /// Publish a post. Text may be blank only when at least one image is attached.
    pub async fn create_post(
        &self,
        user_id: &str,
        content: &str,
        images: &[String],
    ) -> Result<Post, DatabaseError> {
        let content = validate::require_text_or_attachments("content", content, images)?;

        let _guard = self.write_guard().await;
        let id = self.db().generate_id(PREFIX_POST).await?;
        let now = now();

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO posts ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)"),
                libsql::params![
                    id.as_str(),
                    user_id,
                    content,
                    to_json_list(images)?,
                    fmt_datetime(now),
                    fmt_datetime(now)
                ],
            )
            .await?;

        let post = Post {
            id,
            user_id: user_id.to_string(),
            content: content.to_string(),
            images: images.to_vec(),
            likes: 0,
            created_at: now,
            updated_at: now,
        };
        self.publish(Table::Posts, ChangeKind::Insert, &post.id, &post)?;
        Ok(post)
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM posts WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("post", id))?;
        row_to_post(&row)
    }

    /// Newest posts first, each with its author and comments (oldest first).
    pub async fn list_posts(&self, page: Page) -> Result<Vec<PostView>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {POST_COLS}, a.id, a.full_name, a.avatar_url
                     FROM posts p LEFT JOIN profiles a ON a.id = p.user_id
                     ORDER BY p.created_at DESC, p.rowid DESC
                     LIMIT ?1 OFFSET ?2"
                ),
                libsql::params![i64::from(page.limit), i64::from(page.offset)],
            )
            .await?;

        let mut views = Vec::new();
        while let Some(row) = rows.next().await? {
            views.push(PostView {
                post: row_to_post(&row)?,
                author: author_at(&row, 7)?,
                comments: Vec::new(),
            });
        }

        let ids: Vec<String> = views.iter().map(|v| v.post.id.clone()).collect();
        let mut comments = self.comments_for(&ids).await?;
        for view in &mut views {
            view.comments = comments.remove(&view.post.id).unwrap_or_default();
        }
        Ok(views)
    }

    async fn comments_for(
        &self,
        post_ids: &[String],
    ) -> Result<HashMap<String, Vec<CommentView>>, DatabaseError> {
        let mut grouped: HashMap<String, Vec<CommentView>> = HashMap::new();
        if post_ids.is_empty() {
            return Ok(grouped);
        }

        let sql = format!(
            "SELECT {COMMENT_COLS}, a.id, a.full_name, a.avatar_url
             FROM comments c LEFT JOIN profiles a ON a.id = c.user_id
             WHERE c.post_id IN ({})
             ORDER BY c.created_at, c.rowid",
            placeholders(1, post_ids.len())
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(post_ids.iter().cloned()))
            .await?;

        while let Some(row) = rows.next().await? {
            let comment = row_to_comment(&row)?;
            let author = author_at(&row, 5)?;
            grouped
                .entry(comment.post_id.clone())
                .or_default()
                .push(CommentView { comment, author });
        }
        Ok(grouped)
    }

    /// Like a post once per user. Liking again is a no-op.
    pub async fn like_post(&self, post_id: &str, user_id: &str) -> Result<Post, DatabaseError> {
        self.set_like(post_id, user_id, true).await
    }

    /// Remove a like. Unliking a post that was not liked is a no-op.
    pub async fn unlike_post(&self, post_id: &str, user_id: &str) -> Result<Post, DatabaseError> {
        self.set_like(post_id, user_id, false).await
    }

    async fn set_like(
        &self,
        post_id: &str,
        user_id: &str,
        liked: bool,
    ) -> Result<Post, DatabaseError> {
        let _guard = self.write_guard().await;
        self.get_post(post_id).await?;

        self.begin().await?;
        let result = async {
            let changed = if liked {
                self.db()
                    .conn()
                    .execute(
                        "INSERT OR IGNORE INTO post_likes (post_id, user_id, created_at)
                         VALUES (?1, ?2, ?3)",
                        libsql::params![post_id, user_id, fmt_datetime(now())],
                    )
                    .await?
            } else {
                self.db()
                    .conn()
                    .execute(
                        "DELETE FROM post_likes WHERE post_id = ?1 AND user_id = ?2",
                        libsql::params![post_id, user_id],
                    )
                    .await?
            };
            if changed > 0 {
                self.db()
                    .conn()
                    .execute(
                        "UPDATE posts
                         SET likes = (SELECT COUNT(*) FROM post_likes WHERE post_id = ?1),
                             updated_at = ?2
                         WHERE id = ?1",
                        libsql::params![post_id, fmt_datetime(now())],
                    )
                    .await?;
            }
            Ok::<_, DatabaseError>(changed > 0)
        }
        .await;
        let changed = self.finish(result).await?;

        let post = self.get_post(post_id).await?;
        if changed {
            self.publish(Table::Posts, ChangeKind::Update, &post.id, &post)?;
        }
        Ok(post)
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<Comment, DatabaseError> {
        let content = validate::require("content", content)?;

        let _guard = self.write_guard().await;
        self.get_post(post_id).await?;

        let id = self.db().generate_id(PREFIX_COMMENT).await?;
        let now = now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO comments (id, post_id, user_id, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), post_id, user_id, content, fmt_datetime(now)],
            )
            .await?;

        let comment = Comment {
            id,
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: now,
        };
        self.publish(Table::Comments, ChangeKind::Insert, &comment.id, &comment)?;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{create_user, test_service};

    #[tokio::test]
    async fn create_post_requires_text_or_image() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;

        assert!(matches!(
            svc.create_post(&ada, "   ", &[]).await.unwrap_err(),
            DatabaseError::Domain(CoreError::Validation(_))
        ));

        let image_only = svc
            .create_post(&ada, "", &["http://x/posts/a.jpg".into()])
            .await
            .unwrap();
        assert_eq!(image_only.content, "");
        assert_eq!(image_only.likes, 0);
        assert_eq!(svc.get_post(&image_only.id).await.unwrap(), image_only);
    }

    #[tokio::test]
    async fn list_posts_newest_first_with_author_and_comments() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let bob = create_user(&svc, "bob").await;

        let first = svc.create_post(&ada, "first", &[]).await.unwrap();
        let second = svc.create_post(&bob, "second", &[]).await.unwrap();
        svc.add_comment(&first.id, &bob, "nice").await.unwrap();
        svc.add_comment(&first.id, &ada, "thanks").await.unwrap();

        let feed = svc.list_posts(Page::default()).await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].post.id, second.id);
        assert_eq!(feed[0].author.as_ref().unwrap().full_name, "bob");
        assert!(feed[0].comments.is_empty());

        let comments: Vec<&str> = feed[1]
            .comments
            .iter()
            .map(|c| c.comment.content.as_str())
            .collect();
        assert_eq!(comments, vec!["nice", "thanks"]);
        assert_eq!(feed[1].comments[0].author.as_ref().unwrap().id, bob);
    }

    #[tokio::test]
    async fn list_posts_paginates() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        for i in 0..5 {
            svc.create_post(&ada, &format!("post {i}"), &[]).await.unwrap();
        }
        let page = svc.list_posts(Page::new(2, 2)).await.unwrap();
        let contents: Vec<&str> = page.iter().map(|v| v.post.content.as_str()).collect();
        assert_eq!(contents, vec!["post 2", "post 1"]);
    }

    #[tokio::test]
    async fn likes_are_idempotent_per_user() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let bob = create_user(&svc, "bob").await;
        let post = svc.create_post(&ada, "like me", &[]).await.unwrap();

        assert_eq!(svc.like_post(&post.id, &bob).await.unwrap().likes, 1);
        assert_eq!(svc.like_post(&post.id, &bob).await.unwrap().likes, 1);
        assert_eq!(svc.like_post(&post.id, &ada).await.unwrap().likes, 2);
        assert_eq!(svc.unlike_post(&post.id, &bob).await.unwrap().likes, 1);
        assert_eq!(svc.unlike_post(&post.id, &bob).await.unwrap().likes, 1);
    }

    #[tokio::test]
    async fn comment_on_missing_post_is_not_found() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        assert!(svc
            .add_comment("pst-00000000", &ada, "hello")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(svc.like_post("pst-00000000", &ada).await.unwrap_err().is_not_found());
    }
}
