//! Change feed behaviour observed through the public service API.

use std::time::Duration;

use campus_core::enums::{MemberRole, Table};
use campus_core::realtime::{ChangeFilter, ChangeKind};
use campus_db::repos::{NewProfile, NewStudyGroup};
use campus_db::{CampusService, Notice};
use pretty_assertions::assert_eq;

async fn service() -> CampusService {
    CampusService::new_local(":memory:", 64).await.unwrap()
}

async fn user(svc: &CampusService, handle: &str) -> String {
    let (account, _) = svc
        .create_account(
            &format!("{handle}@campus.edu"),
            "hash",
            &NewProfile {
                full_name: handle.into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    account.id
}

async fn group(svc: &CampusService, creator: &str, name: &str) -> String {
    svc.create_study_group(
        creator,
        &NewStudyGroup {
            name: name.into(),
            description: String::new(),
            course_code: "CS101".into(),
            max_members: 10,
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn group_message_is_observed_once_by_its_channel_only() {
    let svc = service().await;
    let ada = user(&svc, "ada").await;
    let first = group(&svc, &ada, "first").await;
    let second = group(&svc, &ada, "second").await;

    let mut listener = svc.subscribe(
        ChangeFilter::table(Table::Messages)
            .kind(ChangeKind::Insert)
            .column_eq("group_id", first.as_str()),
    );
    let mut other = svc.subscribe(
        ChangeFilter::table(Table::Messages)
            .kind(ChangeKind::Insert)
            .column_eq("group_id", second.as_str()),
    );

    let sent = svc.send_message(&first, &ada, "hello", &[]).await.unwrap();

    let notice = tokio::time::timeout(Duration::from_secs(1), listener.recv())
        .await
        .expect("listener should be notified")
        .expect("feed open");
    let Notice::Change(event) = notice else {
        panic!("unexpected notice {notice:?}");
    };
    assert_eq!(event.table, Table::Messages);
    assert_eq!(event.kind, ChangeKind::Insert);
    assert_eq!(event.id, sent.id);
    assert_eq!(event.record["content"], "hello");

    assert_eq!(listener.try_recv(), None, "delivered exactly once");
    assert_eq!(other.try_recv(), None, "other group's channel stays quiet");
}

#[tokio::test]
async fn study_group_creation_publishes_group_and_admin_membership() {
    let svc = service().await;
    let ada = user(&svc, "ada").await;
    let mut members = svc.subscribe(ChangeFilter::table(Table::StudyGroupMembers));
    let mut groups = svc.subscribe(ChangeFilter::table(Table::StudyGroups));

    let id = group(&svc, &ada, "algebra").await;

    let Some(Notice::Change(member)) = members.try_recv() else {
        panic!("expected membership insert");
    };
    assert_eq!(member.record["group_id"], id.as_str());
    assert_eq!(member.record["role"], MemberRole::Admin.as_str());
    assert_eq!(members.try_recv(), None);

    let Some(Notice::Change(created)) = groups.try_recv() else {
        panic!("expected group insert");
    };
    assert_eq!(created.id, id);
    assert_eq!(created.kind, ChangeKind::Insert);
}

#[tokio::test]
async fn updates_are_filtered_by_event_kind() {
    let svc = service().await;
    let ada = user(&svc, "ada").await;
    let bob = user(&svc, "bob").await;
    let post = svc.create_post(&ada, "like this", &[]).await.unwrap();

    let mut updates = svc.subscribe(ChangeFilter::table(Table::Posts).kind(ChangeKind::Update));
    svc.create_post(&ada, "another", &[]).await.unwrap();
    svc.like_post(&post.id, &bob).await.unwrap();

    let Some(Notice::Change(event)) = updates.try_recv() else {
        panic!("expected like update");
    };
    assert_eq!(event.id, post.id);
    assert_eq!(event.record["likes"], 1);
    assert_eq!(updates.try_recv(), None);
}

#[tokio::test]
async fn rejected_writes_publish_nothing() {
    let svc = service().await;
    let ada = user(&svc, "ada").await;
    let bob = user(&svc, "bob").await;
    let id = group(&svc, &ada, "closed club").await;

    let mut all = svc.subscribe(ChangeFilter::table(Table::Messages));
    assert!(svc.send_message(&id, &bob, "let me in", &[]).await.is_err());
    assert_eq!(all.try_recv(), None);
}

#[tokio::test]
async fn leaving_publishes_membership_removal_then_group_update() {
    let svc = service().await;
    let ada = user(&svc, "ada").await;
    let bob = user(&svc, "bob").await;
    let id = group(&svc, &ada, "geometry").await;
    svc.join_study_group(&id, &bob).await.unwrap();

    let mut removals = svc.subscribe(
        ChangeFilter::table(Table::StudyGroupMembers).kind(ChangeKind::Delete),
    );
    let mut groups = svc.subscribe(ChangeFilter::table(Table::StudyGroups));

    svc.leave_study_group(&id, &bob).await.unwrap();

    let Some(Notice::Change(removed)) = removals.try_recv() else {
        panic!("expected membership removal");
    };
    assert_eq!(removed.kind, ChangeKind::Delete);
    assert_eq!(removed.record["group_id"], id.as_str());
    assert_eq!(removed.record["user_id"], bob.as_str());
    assert_eq!(removals.try_recv(), None);

    let Some(Notice::Change(updated)) = groups.try_recv() else {
        panic!("expected group update");
    };
    assert_eq!(updated.kind, ChangeKind::Update);
    assert_eq!(updated.record["current_members"], 1);
}
