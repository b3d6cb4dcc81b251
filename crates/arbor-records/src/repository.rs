use super::*;
use arbor_core::ID;
use arbor_core::LIST_LIMIT;
use arbor_core::Unique;
use arbor_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::types::ToSql;

const MEMBER_COLUMNS: &str =
    "id, name, relationship, birth_date, bio, photo_url, parent_id, photos, created_by, created_at";
const EVENT_COLUMNS: &str =
    "id, title, description, event_date, event_time, location, created_by, created_at";
const POST_COLUMNS: &str = "id, title, body, replies, author_id, author_name, created_at";

/// Builds the dynamic UPDATE for a non-empty changeset, with the scope
/// folded into the WHERE clause. Parameter layout: changes first, then
/// id, then the optional owner constraint.
fn recompose(
    table: &str,
    columns: &str,
    owner_column: &str,
    changes: &[(&'static str, &(dyn ToSql + Sync))],
) -> String {
    let sets = changes
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{} = ${}", column, i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE id = ${} AND (${}::uuid IS NULL OR {} = ${}) RETURNING {}",
        table,
        sets,
        changes.len() + 1,
        changes.len() + 2,
        owner_column,
        changes.len() + 2,
        columns
    )
}

/// Repository trait for family member profiles and their embedded albums.
/// Every method folds the caller's [`Scope`] into the query itself, so a
/// record outside scope reads as absent and writes as a no-op.
#[allow(async_fn_in_trait)]
pub trait MemberRepository {
    async fn create_member(&self, member: &FamilyMember) -> Result<(), PgErr>;
    async fn get_members(&self, scope: Scope) -> Result<Vec<FamilyMember>, PgErr>;
    async fn get_member(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
    ) -> Result<Option<FamilyMember>, PgErr>;
    async fn update_member(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
        patch: &MemberPatch,
    ) -> Result<Option<FamilyMember>, PgErr>;
    async fn delete_member(&self, scope: Scope, id: ID<FamilyMember>) -> Result<bool, PgErr>;
    async fn add_photo(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
        photo: &Photo,
    ) -> Result<bool, PgErr>;
    async fn get_photos(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
    ) -> Result<Option<Vec<Photo>>, PgErr>;
    async fn remove_photo(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
        photo: ID<Photo>,
    ) -> Result<bool, PgErr>;
}

impl MemberRepository for Arc<Client> {
    async fn create_member(&self, member: &FamilyMember) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                MEMBERS,
                " (",
                MEMBER_COLUMNS,
                ") VALUES ($1, $2, $3, $4, $5, $6, $7, '[]'::jsonb, $8, $9)"
            ),
            &[
                &member.id().inner(),
                &member.name(),
                &member.relationship(),
                &member.birth_date(),
                &member.bio(),
                &member.photo_url(),
                &member.parent().map(uuid::Uuid::from),
                &member.owner().inner(),
                &member.created(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn get_members(&self, scope: Scope) -> Result<Vec<FamilyMember>, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.query(
            const_format::concatcp!(
                "SELECT ",
                MEMBER_COLUMNS,
                " FROM ",
                MEMBERS,
                " WHERE ($1::uuid IS NULL OR created_by = $1) ORDER BY created_at LIMIT ",
                LIST_LIMIT
            ),
            &[&owner],
        )
        .await
        .map(|rows| rows.into_iter().map(FamilyMember::from).collect())
    }

    async fn get_member(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
    ) -> Result<Option<FamilyMember>, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.query_opt(
            const_format::concatcp!(
                "SELECT ",
                MEMBER_COLUMNS,
                " FROM ",
                MEMBERS,
                " WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2)"
            ),
            &[&id.inner(), &owner],
        )
        .await
        .map(|opt| opt.map(FamilyMember::from))
    }

    async fn update_member(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
        patch: &MemberPatch,
    ) -> Result<Option<FamilyMember>, PgErr> {
        let changes = patch.changes();
        debug_assert!(!changes.is_empty());
        let id = id.inner();
        let owner = scope.owner().map(uuid::Uuid::from);
        let sql = recompose(MEMBERS, MEMBER_COLUMNS, "created_by", &changes);
        let mut params: Vec<&(dyn ToSql + Sync)> = changes.iter().map(|(_, v)| *v).collect();
        params.push(&id);
        params.push(&owner);
        self.query_opt(&sql, &params)
            .await
            .map(|opt| opt.map(FamilyMember::from))
    }

    async fn delete_member(&self, scope: Scope, id: ID<FamilyMember>) -> Result<bool, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.execute(
            const_format::concatcp!(
                "DELETE FROM ",
                MEMBERS,
                " WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2)"
            ),
            &[&id.inner(), &owner],
        )
        .await
        .map(|n| n > 0)
    }

    async fn add_photo(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
        photo: &Photo,
    ) -> Result<bool, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        let document = serde_json::to_value(photo).expect("photo document");
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                MEMBERS,
                " SET photos = photos || $2::jsonb",
                " WHERE id = $1 AND ($3::uuid IS NULL OR created_by = $3)"
            ),
            &[&id.inner(), &document, &owner],
        )
        .await
        .map(|n| n > 0)
    }

    async fn get_photos(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
    ) -> Result<Option<Vec<Photo>>, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.query_opt(
            const_format::concatcp!(
                "SELECT photos FROM ",
                MEMBERS,
                " WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2)"
            ),
            &[&id.inner(), &owner],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                serde_json::from_value(row.get::<_, serde_json::Value>(0)).unwrap_or_default()
            })
        })
    }

    async fn remove_photo(
        &self,
        scope: Scope,
        id: ID<FamilyMember>,
        photo: ID<Photo>,
    ) -> Result<bool, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        let photo = photo.to_string();
        // single statement: the containment check distinguishes a missing
        // photo from a present one, atomically with the removal
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                MEMBERS,
                " SET photos = (SELECT COALESCE(jsonb_agg(p), '[]'::jsonb)",
                " FROM jsonb_array_elements(photos) p WHERE p->>'id' <> $2)",
                " WHERE id = $1",
                " AND ($3::uuid IS NULL OR created_by = $3)",
                " AND photos @> jsonb_build_array(jsonb_build_object('id', $2::text))"
            ),
            &[&id.inner(), &photo, &owner],
        )
        .await
        .map(|n| n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recompose_folds_the_owner_constraint_into_the_where_clause() {
        let name = "June".to_string();
        let bio = "keeper of the recipes".to_string();
        let changes: Vec<(&'static str, &(dyn ToSql + Sync))> =
            vec![("name", &name), ("bio", &bio)];
        let sql = recompose(MEMBERS, MEMBER_COLUMNS, "created_by", &changes);
        assert_eq!(
            sql,
            format!(
                "UPDATE family_members SET name = $1, bio = $2 \
                 WHERE id = $3 AND ($4::uuid IS NULL OR created_by = $4) \
                 RETURNING {}",
                MEMBER_COLUMNS
            )
        );
    }

    #[test]
    fn recompose_places_id_and_owner_after_the_changeset() {
        let title = "Reunion".to_string();
        let changes: Vec<(&'static str, &(dyn ToSql + Sync))> = vec![("title", &title)];
        let sql = recompose(POSTS, POST_COLUMNS, "author_id", &changes);
        assert!(sql.contains("SET title = $1"));
        assert!(sql.contains("WHERE id = $2"));
        assert!(sql.contains("($3::uuid IS NULL OR author_id = $3)"));
    }
}

/// Repository trait for calendar events.
#[allow(async_fn_in_trait)]
pub trait EventRepository {
    async fn create_event(&self, event: &Event) -> Result<(), PgErr>;
    async fn get_events(&self, scope: Scope) -> Result<Vec<Event>, PgErr>;
    async fn get_event(&self, scope: Scope, id: ID<Event>) -> Result<Option<Event>, PgErr>;
    async fn update_event(
        &self,
        scope: Scope,
        id: ID<Event>,
        patch: &EventPatch,
    ) -> Result<Option<Event>, PgErr>;
    async fn delete_event(&self, scope: Scope, id: ID<Event>) -> Result<bool, PgErr>;
}

impl EventRepository for Arc<Client> {
    async fn create_event(&self, event: &Event) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                EVENTS,
                " (",
                EVENT_COLUMNS,
                ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
            ),
            &[
                &event.id().inner(),
                &event.title(),
                &event.description(),
                &event.date(),
                &event.time(),
                &event.location(),
                &event.owner().inner(),
                &event.created(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn get_events(&self, scope: Scope) -> Result<Vec<Event>, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.query(
            const_format::concatcp!(
                "SELECT ",
                EVENT_COLUMNS,
                " FROM ",
                EVENTS,
                " WHERE ($1::uuid IS NULL OR created_by = $1) ORDER BY created_at LIMIT ",
                LIST_LIMIT
            ),
            &[&owner],
        )
        .await
        .map(|rows| rows.into_iter().map(Event::from).collect())
    }

    async fn get_event(&self, scope: Scope, id: ID<Event>) -> Result<Option<Event>, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.query_opt(
            const_format::concatcp!(
                "SELECT ",
                EVENT_COLUMNS,
                " FROM ",
                EVENTS,
                " WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2)"
            ),
            &[&id.inner(), &owner],
        )
        .await
        .map(|opt| opt.map(Event::from))
    }

    async fn update_event(
        &self,
        scope: Scope,
        id: ID<Event>,
        patch: &EventPatch,
    ) -> Result<Option<Event>, PgErr> {
        let changes = patch.changes();
        debug_assert!(!changes.is_empty());
        let id = id.inner();
        let owner = scope.owner().map(uuid::Uuid::from);
        let sql = recompose(EVENTS, EVENT_COLUMNS, "created_by", &changes);
        let mut params: Vec<&(dyn ToSql + Sync)> = changes.iter().map(|(_, v)| *v).collect();
        params.push(&id);
        params.push(&owner);
        self.query_opt(&sql, &params)
            .await
            .map(|opt| opt.map(Event::from))
    }

    async fn delete_event(&self, scope: Scope, id: ID<Event>) -> Result<bool, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.execute(
            const_format::concatcp!(
                "DELETE FROM ",
                EVENTS,
                " WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2)"
            ),
            &[&id.inner(), &owner],
        )
        .await
        .map(|n| n > 0)
    }
}

/// Repository trait for forum posts and their embedded replies.
///
/// `add_reply` takes no scope: posting is open to any authenticated
/// identity. `remove_reply` authorizes against the reply's own author
/// attribute, folded into the containment check.
#[allow(async_fn_in_trait)]
pub trait ForumRepository {
    async fn create_post(&self, post: &ForumPost) -> Result<(), PgErr>;
    async fn get_posts(&self, scope: Scope) -> Result<Vec<ForumPost>, PgErr>;
    async fn get_post(&self, scope: Scope, id: ID<ForumPost>) -> Result<Option<ForumPost>, PgErr>;
    async fn update_post(
        &self,
        scope: Scope,
        id: ID<ForumPost>,
        patch: &PostPatch,
    ) -> Result<Option<ForumPost>, PgErr>;
    async fn delete_post(&self, scope: Scope, id: ID<ForumPost>) -> Result<bool, PgErr>;
    async fn add_reply(&self, id: ID<ForumPost>, reply: &Reply) -> Result<bool, PgErr>;
    async fn remove_reply(
        &self,
        scope: Scope,
        id: ID<ForumPost>,
        reply: ID<Reply>,
    ) -> Result<bool, PgErr>;
}

impl ForumRepository for Arc<Client> {
    async fn create_post(&self, post: &ForumPost) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                POSTS,
                " (",
                POST_COLUMNS,
                ") VALUES ($1, $2, $3, '[]'::jsonb, $4, $5, $6)"
            ),
            &[
                &post.id().inner(),
                &post.title(),
                &post.body(),
                &post.author().inner(),
                &post.author_name(),
                &post.created(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn get_posts(&self, scope: Scope) -> Result<Vec<ForumPost>, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.query(
            const_format::concatcp!(
                "SELECT ",
                POST_COLUMNS,
                " FROM ",
                POSTS,
                " WHERE ($1::uuid IS NULL OR author_id = $1) ORDER BY created_at LIMIT ",
                LIST_LIMIT
            ),
            &[&owner],
        )
        .await
        .map(|rows| rows.into_iter().map(ForumPost::from).collect())
    }

    async fn get_post(&self, scope: Scope, id: ID<ForumPost>) -> Result<Option<ForumPost>, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.query_opt(
            const_format::concatcp!(
                "SELECT ",
                POST_COLUMNS,
                " FROM ",
                POSTS,
                " WHERE id = $1 AND ($2::uuid IS NULL OR author_id = $2)"
            ),
            &[&id.inner(), &owner],
        )
        .await
        .map(|opt| opt.map(ForumPost::from))
    }

    async fn update_post(
        &self,
        scope: Scope,
        id: ID<ForumPost>,
        patch: &PostPatch,
    ) -> Result<Option<ForumPost>, PgErr> {
        let changes = patch.changes();
        debug_assert!(!changes.is_empty());
        let id = id.inner();
        let owner = scope.owner().map(uuid::Uuid::from);
        let sql = recompose(POSTS, POST_COLUMNS, "author_id", &changes);
        let mut params: Vec<&(dyn ToSql + Sync)> = changes.iter().map(|(_, v)| *v).collect();
        params.push(&id);
        params.push(&owner);
        self.query_opt(&sql, &params)
            .await
            .map(|opt| opt.map(ForumPost::from))
    }

    async fn delete_post(&self, scope: Scope, id: ID<ForumPost>) -> Result<bool, PgErr> {
        let owner = scope.owner().map(uuid::Uuid::from);
        self.execute(
            const_format::concatcp!(
                "DELETE FROM ",
                POSTS,
                " WHERE id = $1 AND ($2::uuid IS NULL OR author_id = $2)"
            ),
            &[&id.inner(), &owner],
        )
        .await
        .map(|n| n > 0)
    }

    async fn add_reply(&self, id: ID<ForumPost>, reply: &Reply) -> Result<bool, PgErr> {
        let document = serde_json::to_value(reply).expect("reply document");
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                POSTS,
                " SET replies = replies || $2::jsonb WHERE id = $1"
            ),
            &[&id.inner(), &document],
        )
        .await
        .map(|n| n > 0)
    }

    async fn remove_reply(
        &self,
        scope: Scope,
        id: ID<ForumPost>,
        reply: ID<Reply>,
    ) -> Result<bool, PgErr> {
        let author = scope.owner().map(|a| a.to_string());
        let reply = reply.to_string();
        // non-admins must match the reply's own author_id; the post's
        // author gets no say over other people's replies
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                POSTS,
                " SET replies = (SELECT COALESCE(jsonb_agg(r), '[]'::jsonb)",
                " FROM jsonb_array_elements(replies) r WHERE r->>'id' <> $2)",
                " WHERE id = $1",
                " AND replies @> jsonb_build_array(jsonb_build_object('id', $2::text))",
                " AND ($3::text IS NULL OR replies @> jsonb_build_array(",
                "jsonb_build_object('id', $2::text, 'author_id', $3)))"
            ),
            &[&id.inner(), &reply, &author],
        )
        .await
        .map(|n| n > 0)
    }
}
