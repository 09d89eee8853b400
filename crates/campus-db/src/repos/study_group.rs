//! Study group repository: groups, rosters, and membership changes.
//!
//! `current_members` is maintained alongside the roster inside the same
//! transaction, and the `active`/`full` status flips whenever the count
//! reaches or drops below `max_members`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use campus_core::entities::{GroupMember, StudyGroup};
use campus_core::enums::{GroupStatus, MemberRole, Table};
use campus_core::errors::CoreError;
use campus_core::ids::{PREFIX_GROUP, PREFIX_MEMBER};
use campus_core::page::Page;
use campus_core::realtime::ChangeKind;
use campus_core::validate;
use campus_core::views::{GroupView, MemberSummary};

use crate::error::DatabaseError;
use crate::helpers::{
    author_at, fmt_datetime, get_opt_string, now, parse_datetime, parse_enum, placeholders,
};
use crate::service::CampusService;

/// Fields of the create-group form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudyGroup {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub course_code: String,
    pub max_members: i64,
}

const SELECT_COLS: &str = "id, name, description, course_code, creator_id, max_members, \
     current_members, status, created_at, updated_at";
const GROUP_COLS: &str = "g.id, g.name, g.description, g.course_code, g.creator_id, \
     g.max_members, g.current_members, g.status, g.created_at, g.updated_at";
const MEMBER_COLS: &str = "id, group_id, user_id, role, joined_at";

fn row_to_group(row: &libsql::Row) -> Result<StudyGroup, DatabaseError> {
    Ok(StudyGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        course_code: row.get(3)?,
        creator_id: row.get(4)?,
        max_members: row.get(5)?,
        current_members: row.get(6)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

fn row_to_member(row: &libsql::Row) -> Result<GroupMember, DatabaseError> {
    Ok(GroupMember {
        id: row.get(0)?,
        group_id: row.get(1)?,
        user_id: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        joined_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

/// Status implied by a member count, for a group that is not closed.
const fn status_for(current_members: i64, max_members: i64) -> GroupStatus {
    if current_members >= max_members {
        GroupStatus::Full
    } else {
        GroupStatus::Active
    }
}

impl CampusService {
    /// Create a group with the creator as its one and only admin member.
    ///
    /// The group row and the membership row are written in one transaction.
    pub async fn create_study_group(
        &self,
        creator_id: &str,
        new: &NewStudyGroup,
    ) -> Result<StudyGroup, DatabaseError> {
        let name = validate::require("name", &new.name)?;
        let course_code = validate::require("course_code", &new.course_code)?;
        let max_members = validate::capacity(new.max_members)?;

        let _guard = self.write_guard().await;
        let group_id = self.db().generate_id(PREFIX_GROUP).await?;
        let member_id = self.db().generate_id(PREFIX_MEMBER).await?;
        let now = now();
        let status = status_for(1, max_members);

        let group = StudyGroup {
            id: group_id,
            name: name.to_string(),
            description: new.description.trim().to_string(),
            course_code: course_code.to_string(),
            creator_id: creator_id.to_string(),
            max_members,
            current_members: 1,
            status,
            created_at: now,
            updated_at: now,
        };
        let admin = GroupMember {
            id: member_id,
            group_id: group.id.clone(),
            user_id: creator_id.to_string(),
            role: MemberRole::Admin,
            joined_at: now,
        };

        self.begin().await?;
        let result = async {
            self.db()
                .conn()
                .execute(
                    &format!(
                        "INSERT INTO study_groups ({SELECT_COLS})
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                    ),
                    libsql::params![
                        group.id.as_str(),
                        group.name.as_str(),
                        group.description.as_str(),
                        group.course_code.as_str(),
                        creator_id,
                        max_members,
                        1i64,
                        status.as_str(),
                        fmt_datetime(now),
                        fmt_datetime(now)
                    ],
                )
                .await?;
            self.insert_member(&admin).await
        }
        .await;
        self.finish(result).await?;

        tracing::info!(group_id = %group.id, creator_id, "study group created");
        self.publish(Table::StudyGroups, ChangeKind::Insert, &group.id, &group)?;
        self.publish(Table::StudyGroupMembers, ChangeKind::Insert, &admin.id, &admin)?;
        Ok(group)
    }

    async fn insert_member(&self, member: &GroupMember) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO study_group_members ({MEMBER_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![
                    member.id.as_str(),
                    member.group_id.as_str(),
                    member.user_id.as_str(),
                    member.role.as_str(),
                    fmt_datetime(member.joined_at)
                ],
            )
            .await?;
        Ok(())
    }

    async fn get_group_row(&self, id: &str) -> Result<StudyGroup, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM study_groups WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("study group", id))?;
        row_to_group(&row)
    }

    /// The membership row of `user_id` in `group_id`, if any.
    pub async fn find_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Option<GroupMember>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {MEMBER_COLS} FROM study_group_members
                     WHERE group_id = ?1 AND user_id = ?2"
                ),
                libsql::params![group_id, user_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_member(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn is_group_member(&self, group_id: &str, user_id: &str) -> Result<bool, DatabaseError> {
        Ok(self.find_membership(group_id, user_id).await?.is_some())
    }

    /// Every membership row of a group, oldest first.
    pub async fn list_group_members(&self, group_id: &str) -> Result<Vec<GroupMember>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {MEMBER_COLS} FROM study_group_members
                     WHERE group_id = ?1 ORDER BY joined_at, rowid"
                ),
                [group_id],
            )
            .await?;
        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(row_to_member(&row)?);
        }
        Ok(members)
    }

    async fn rosters_for(
        &self,
        group_ids: &[String],
    ) -> Result<HashMap<String, Vec<MemberSummary>>, DatabaseError> {
        let mut grouped: HashMap<String, Vec<MemberSummary>> = HashMap::new();
        if group_ids.is_empty() {
            return Ok(grouped);
        }

        let sql = format!(
            "SELECT m.group_id, m.user_id, p.full_name, p.avatar_url, m.role, m.joined_at
             FROM study_group_members m LEFT JOIN profiles p ON p.id = m.user_id
             WHERE m.group_id IN ({})
             ORDER BY m.joined_at, m.rowid",
            placeholders(1, group_ids.len())
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(group_ids.iter().cloned()))
            .await?;

        while let Some(row) = rows.next().await? {
            let group_id: String = row.get(0)?;
            grouped.entry(group_id).or_default().push(MemberSummary {
                user_id: row.get(1)?,
                full_name: row.get::<Option<String>>(2)?.unwrap_or_default(),
                avatar_url: get_opt_string(&row, 3)?,
                role: parse_enum(&row.get::<String>(4)?)?,
                joined_at: parse_datetime(&row.get::<String>(5)?)?,
            });
        }
        Ok(grouped)
    }

    async fn query_group_views(
        &self,
        where_sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<GroupView>, DatabaseError> {
        let sql = format!(
            "SELECT {GROUP_COLS}, a.id, a.full_name, a.avatar_url
             FROM study_groups g LEFT JOIN profiles a ON a.id = g.creator_id
             {where_sql}"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut views = Vec::new();
        while let Some(row) = rows.next().await? {
            views.push(GroupView {
                group: row_to_group(&row)?,
                creator: author_at(&row, 10)?,
                members: Vec::new(),
            });
        }

        let ids: Vec<String> = views.iter().map(|v| v.group.id.clone()).collect();
        let mut rosters = self.rosters_for(&ids).await?;
        for view in &mut views {
            view.members = rosters.remove(&view.group.id).unwrap_or_default();
        }
        Ok(views)
    }

    /// One group with its creator and roster.
    pub async fn get_study_group(&self, id: &str) -> Result<GroupView, DatabaseError> {
        self.query_group_views("WHERE g.id = ?1", vec![id.into()])
            .await?
            .pop()
            .ok_or_else(|| CoreError::not_found("study group", id).into())
    }

    /// Groups newest first, each with its creator and roster.
    pub async fn list_study_groups(&self, page: Page) -> Result<Vec<GroupView>, DatabaseError> {
        self.query_group_views(
            "ORDER BY g.created_at DESC, g.rowid DESC LIMIT ?1 OFFSET ?2",
            vec![i64::from(page.limit).into(), i64::from(page.offset).into()],
        )
        .await
    }

    /// Groups `user_id` belongs to, newest first.
    pub async fn list_member_groups(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<Vec<GroupView>, DatabaseError> {
        self.query_group_views(
            "JOIN study_group_members mm ON mm.group_id = g.id
             WHERE mm.user_id = ?1
             ORDER BY g.created_at DESC, g.rowid DESC LIMIT ?2 OFFSET ?3",
            vec![
                user_id.into(),
                i64::from(page.limit).into(),
                i64::from(page.offset).into(),
            ],
        )
        .await
    }

    /// Add `user_id` as a member. Rejects closed or full groups and repeat joins.
    pub async fn join_study_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<GroupView, DatabaseError> {
        let _guard = self.write_guard().await;
        let group = self.get_group_row(group_id).await?;

        if self.is_group_member(group_id, user_id).await? {
            return Err(CoreError::Conflict(format!("already a member of {group_id}")).into());
        }
        if !group.status.accepts_members() {
            return Err(CoreError::Conflict(format!("study group {group_id} is {}", group.status)).into());
        }

        let member = GroupMember {
            id: self.db().generate_id(PREFIX_MEMBER).await?,
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
            role: MemberRole::Member,
            joined_at: now(),
        };
        let count = group.current_members + 1;
        let status = status_for(count, group.max_members);

        self.begin().await?;
        let result = async {
            self.insert_member(&member).await?;
            self.set_member_count(group_id, count, status).await
        }
        .await;
        self.finish(result).await?;

        let updated = self.get_group_row(group_id).await?;
        self.publish(Table::StudyGroupMembers, ChangeKind::Insert, &member.id, &member)?;
        self.publish(Table::StudyGroups, ChangeKind::Update, &updated.id, &updated)?;
        self.get_study_group(group_id).await
    }

    /// Remove a non-admin member. A full group becomes active again.
    pub async fn leave_study_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<GroupView, DatabaseError> {
        let _guard = self.write_guard().await;
        let group = self.get_group_row(group_id).await?;
        let membership = self
            .find_membership(group_id, user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("membership", format!("{group_id}/{user_id}")))?;
        if membership.role == MemberRole::Admin {
            return Err(CoreError::Conflict("the group admin cannot leave; close the group instead".into()).into());
        }

        let count = (group.current_members - 1).max(0);
        let status = if group.status == GroupStatus::Closed {
            GroupStatus::Closed
        } else {
            status_for(count, group.max_members)
        };

        self.begin().await?;
        let result = async {
            self.db()
                .conn()
                .execute(
                    "DELETE FROM study_group_members WHERE id = ?1",
                    [membership.id.as_str()],
                )
                .await?;
            self.set_member_count(group_id, count, status).await
        }
        .await;
        self.finish(result).await?;

        let updated = self.get_group_row(group_id).await?;
        self.publish(Table::StudyGroupMembers, ChangeKind::Delete, &membership.id, &membership)?;
        self.publish(Table::StudyGroups, ChangeKind::Update, &updated.id, &updated)?;
        self.get_study_group(group_id).await
    }

    async fn set_member_count(
        &self,
        group_id: &str,
        count: i64,
        status: GroupStatus,
    ) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "UPDATE study_groups SET current_members = ?1, status = ?2, updated_at = ?3
                 WHERE id = ?4",
                libsql::params![count, status.as_str(), fmt_datetime(now()), group_id],
            )
            .await?;
        Ok(())
    }

    /// Close a group. Only one of its admins may do this.
    pub async fn close_study_group(
        &self,
        user_id: &str,
        group_id: &str,
    ) -> Result<StudyGroup, DatabaseError> {
        let _guard = self.write_guard().await;
        let group = self.get_group_row(group_id).await?;

        let is_admin = self
            .find_membership(group_id, user_id)
            .await?
            .is_some_and(|m| m.role == MemberRole::Admin);
        if !is_admin {
            return Err(CoreError::Forbidden(format!("only an admin may close {group_id}")).into());
        }
        if !group.status.can_transition_to(GroupStatus::Closed) {
            return Err(CoreError::InvalidTransition {
                entity_type: "study group".into(),
                id: group_id.to_string(),
                from: group.status.to_string(),
                to: GroupStatus::Closed.to_string(),
            }
            .into());
        }

        self.db()
            .conn()
            .execute(
                "UPDATE study_groups SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![GroupStatus::Closed.as_str(), fmt_datetime(now()), group_id],
            )
            .await?;

        let updated = self.get_group_row(group_id).await?;
        self.publish(Table::StudyGroups, ChangeKind::Update, &updated.id, &updated)?;
        Ok(updated)
    }
}
