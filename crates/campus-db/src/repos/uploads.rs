//! Lookups over stored-object URLs held in entity rows.

use crate::error::DatabaseError;
use crate::service::CampusService;

impl CampusService {
    /// How many rows still point at `url`, across every image, file,
    /// attachment, and avatar column.
    pub async fn url_reference_count(&self, url: &str) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT
                    (SELECT COUNT(*) FROM posts p, json_each(p.images) j WHERE j.value = ?1)
                  + (SELECT COUNT(*) FROM books b, json_each(b.images) j WHERE j.value = ?1)
                  + (SELECT COUNT(*) FROM resources r, json_each(r.files) j WHERE j.value = ?1)
                  + (SELECT COUNT(*) FROM messages m, json_each(m.attachments) j WHERE j.value = ?1)
                  + (SELECT COUNT(*) FROM lost_found WHERE image_url = ?1)
                  + (SELECT COUNT(*) FROM profiles WHERE avatar_url = ?1)",
                [url],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get(0)?)
    }

    pub async fn is_url_referenced(&self, url: &str) -> Result<bool, DatabaseError> {
        Ok(self.url_reference_count(url).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{create_user, test_service};
    use crate::updates::ProfileUpdateBuilder;

    const SHARED: &str = "http://localhost/storage/posts/usr-a/cat.png";

    #[tokio::test]
    async fn counts_list_and_single_url_columns() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;

        assert!(!svc.is_url_referenced(SHARED).await.unwrap());

        svc.create_post(&ada, "", &[SHARED.to_string()]).await.unwrap();
        svc.update_profile(
            &ada,
            ProfileUpdateBuilder::new()
                .avatar_url(Some(SHARED.to_string()))
                .build(),
        )
        .await
        .unwrap();

        assert_eq!(svc.url_reference_count(SHARED).await.unwrap(), 2);
        assert!(
            !svc.is_url_referenced("http://localhost/storage/posts/usr-a/cat")
                .await
                .unwrap(),
            "match is exact, not a prefix"
        );
    }
}
