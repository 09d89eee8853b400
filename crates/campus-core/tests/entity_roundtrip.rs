//! Serde roundtrip and JsonSchema validation tests for entity and view types.

use campus_core::entities::*;
use campus_core::enums::*;
use campus_core::page::Page;
use campus_core::realtime::{ChangeEvent, ChangeFilter, ChangeKind};
use campus_core::views::*;
use chrono::Utc;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn author(id: &str) -> AuthorSummary {
    AuthorSummary {
        id: id.into(),
        full_name: "Ada Lovelace".into(),
        avatar_url: Some("http://localhost:8080/storage/avatars/x.png".into()),
    }
}

fn sample_post() -> Post {
    Post {
        id: "pst-a3f8b2c1".into(),
        user_id: "usr-00000001".into(),
        content: "Anyone selling a calculator?".into(),
        images: vec!["http://localhost:8080/storage/posts/a.jpg".into()],
        likes: 2,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_book() -> Book {
    Book {
        id: "bok-a3f8b2c1".into(),
        user_id: "usr-00000001".into(),
        title: "Linear Algebra Done Right".into(),
        author: "Axler".into(),
        description: "Light pencil marks".into(),
        price: 25.5,
        condition: "good".into(),
        images: vec![],
        status: BookStatus::Available,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_group() -> StudyGroup {
    StudyGroup {
        id: "grp-a3f8b2c1".into(),
        name: "Compilers night".into(),
        description: "Dragon book chapter a week".into(),
        course_code: "CS431".into(),
        creator_id: "usr-00000001".into(),
        max_members: 6,
        current_members: 1,
        status: GroupStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_message() -> Message {
    Message {
        id: "msg-a3f8b2c1".into(),
        group_id: "grp-a3f8b2c1".into(),
        user_id: "usr-00000001".into(),
        content: "See you at 7".into(),
        attachments: vec![],
        created_at: Utc::now(),
    }
}

fn sample_dm() -> DirectMessage {
    DirectMessage {
        id: "dms-a3f8b2c1".into(),
        sender_id: "usr-00000001".into(),
        recipient_id: "usr-00000002".into(),
        content: "Is the book still available?".into(),
        created_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

roundtrip_and_validate!(
    profile_roundtrip,
    Profile,
    Profile {
        id: "usr-00000001".into(),
        full_name: "Ada Lovelace".into(),
        avatar_url: None,
        department: "Mathematics".into(),
        student_id: "S-1815".into(),
        phone: String::new(),
        bio: String::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(post_roundtrip, Post, sample_post());
roundtrip_and_validate!(book_roundtrip, Book, sample_book());
roundtrip_and_validate!(group_roundtrip, StudyGroup, sample_group());
roundtrip_and_validate!(message_roundtrip, Message, sample_message());
roundtrip_and_validate!(dm_roundtrip, DirectMessage, sample_dm());

roundtrip_and_validate!(
    report_roundtrip,
    LostFoundReport,
    LostFoundReport {
        id: "lnf-a3f8b2c1".into(),
        user_id: "usr-00000001".into(),
        kind: ReportKind::Lost,
        title: "Blue water bottle".into(),
        description: "Sticker on the side".into(),
        location: "Library 2nd floor".into(),
        category: "personal".into(),
        image_url: None,
        status: ReportStatus::Open,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    resource_roundtrip,
    Resource,
    Resource {
        id: "rsc-a3f8b2c1".into(),
        user_id: "usr-00000001".into(),
        title: "Week 3 notes".into(),
        description: String::new(),
        kind: ResourceKind::Note,
        course_code: "MA101".into(),
        files: vec!["http://localhost:8080/storage/resources/n.pdf".into()],
        downloads: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    member_roundtrip,
    GroupMember,
    GroupMember {
        id: "mem-a3f8b2c1".into(),
        group_id: "grp-a3f8b2c1".into(),
        user_id: "usr-00000001".into(),
        role: MemberRole::Admin,
        joined_at: Utc::now(),
    }
);

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

roundtrip_and_validate!(
    post_view_roundtrip,
    PostView,
    PostView {
        post: sample_post(),
        author: Some(author("usr-00000001")),
        comments: vec![CommentView {
            comment: Comment {
                id: "cmt-a3f8b2c1".into(),
                post_id: "pst-a3f8b2c1".into(),
                user_id: "usr-00000002".into(),
                content: "I have one".into(),
                created_at: Utc::now(),
            },
            author: Some(author("usr-00000002")),
        }],
    }
);

roundtrip_and_validate!(
    book_listing_roundtrip,
    BookListing,
    BookListing {
        book: sample_book(),
        seller: Some(SellerSummary {
            id: "usr-00000001".into(),
            full_name: "Ada Lovelace".into(),
            avatar_url: None,
            phone: "+1 555 0100".into(),
        }),
    }
);

roundtrip_and_validate!(
    group_view_roundtrip,
    GroupView,
    GroupView {
        group: sample_group(),
        creator: Some(author("usr-00000001")),
        members: vec![MemberSummary {
            user_id: "usr-00000001".into(),
            full_name: "Ada Lovelace".into(),
            avatar_url: None,
            role: MemberRole::Admin,
            joined_at: Utc::now(),
        }],
    }
);

roundtrip_and_validate!(
    message_view_roundtrip,
    MessageView,
    MessageView {
        message: sample_message(),
        author: None,
    }
);

roundtrip_and_validate!(
    conversation_roundtrip,
    ConversationSummary,
    ConversationSummary {
        peer: author("usr-00000002"),
        last_message: sample_dm(),
    }
);

roundtrip_and_validate!(page_roundtrip, Page, Page::new(20, 40));

roundtrip_and_validate!(
    change_filter_roundtrip,
    ChangeFilter,
    ChangeFilter::table(Table::Messages)
        .kind(ChangeKind::Insert)
        .column_eq("group_id", "grp-a3f8b2c1")
);

roundtrip_and_validate!(
    scoped_change_filter_roundtrip,
    ChangeFilter,
    ChangeFilter::table(Table::DirectMessages)
        .scoped_to(["sender_id", "recipient_id"], "usr-a3f8b2c1")
);

roundtrip_and_validate!(
    change_event_roundtrip,
    ChangeEvent,
    ChangeEvent::new(
        Table::Messages,
        ChangeKind::Insert,
        "msg-a3f8b2c1",
        &sample_message()
    )
    .unwrap()
);

#[test]
fn views_flatten_entity_fields() {
    let view = BookListing {
        book: sample_book(),
        seller: None,
    };
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["id"], "bok-a3f8b2c1");
    assert_eq!(json["status"], "available");
    assert!(json["seller"].is_null());
    assert!(json.get("book").is_none());
}

#[test]
fn group_view_membership() {
    let view = GroupView {
        group: sample_group(),
        creator: None,
        members: vec![MemberSummary {
            user_id: "usr-00000001".into(),
            full_name: "Ada".into(),
            avatar_url: None,
            role: MemberRole::Admin,
            joined_at: Utc::now(),
        }],
    };
    assert!(view.is_member("usr-00000001"));
    assert!(!view.is_member("usr-00000002"));
}

#[test]
fn dm_counterpart() {
    let dm = sample_dm();
    assert_eq!(dm.counterpart("usr-00000001"), "usr-00000002");
    assert_eq!(dm.counterpart("usr-00000002"), "usr-00000001");
}
