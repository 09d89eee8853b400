//! Shared test utilities for campus-db tests.

pub(crate) mod helpers {
    use crate::CampusDb;
    use crate::feed::ChangeFeed;
    use crate::repos::NewProfile;
    use crate::service::CampusService;

    /// Create an in-memory service with a small change feed.
    pub async fn test_service() -> CampusService {
        let db = CampusDb::open_local(":memory:").await.unwrap();
        CampusService::from_db(db, ChangeFeed::new(64))
    }

    pub fn new_profile(full_name: &str) -> NewProfile {
        NewProfile {
            full_name: full_name.to_string(),
            student_id: format!("S-{}", full_name.len()),
            department: "Computer Science".into(),
        }
    }

    /// Register `{handle}@campus.edu` with full name `handle` and return the user id.
    pub async fn create_user(svc: &CampusService, handle: &str) -> String {
        let (account, _) = svc
            .create_account(&format!("{handle}@campus.edu"), "hash", &new_profile(handle))
            .await
            .unwrap();
        account.id
    }
}
